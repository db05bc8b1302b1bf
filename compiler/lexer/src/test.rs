use crate::{
    token::{BareToken::*, Token},
    BareError, Error, Lexer,
};
use span::{span, Spanned};
use utility::difference;

fn lex(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source.to_owned());
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next()?;
        let done = token.bare == EndOfInput;
        tokens.push(token);
        if done {
            break Ok(tokens);
        }
    }
}

#[track_caller]
fn assert_lex_eq(source: &str, expected: Vec<Token>) {
    let actual = lex(source).unwrap();
    if actual != expected {
        panic!(
            "the output of the lexer does not match the expected one:\n{}",
            difference(&format!("{expected:#?}"), &format!("{actual:#?}"), "\n"),
        );
    }
}

#[track_caller]
fn assert_lex_err(source: &str, expected: BareError) {
    match lex(source) {
        Ok(tokens) => panic!("expected the lexer to fail but it produced {tokens:?}"),
        Err(error) => assert_eq!(error.bare, expected),
    }
}

#[test]
fn empty_input() {
    assert_lex_eq("", vec![Token::new(span((1, 1), (1, 1)), EndOfInput)]);
}

#[test]
fn keywords_and_identifiers() {
    assert_lex_eq(
        "class _klass _ enum Int",
        vec![
            Token::new(span((1, 1), (1, 6)), Class),
            Token::new(span((1, 7), (1, 13)), Word),
            Token::new(span((1, 14), (1, 15)), Underscore),
            Token::new(span((1, 16), (1, 20)), Enum),
            Token::new(span((1, 21), (1, 24)), IntTy),
            Token::new(span((1, 24), (1, 24)), EndOfInput),
        ],
    );
}

#[test]
fn identifier_lexeme_is_recorded() {
    let mut lexer = Lexer::new("alpha beta".to_owned());
    lexer.next().unwrap();
    assert_eq!(lexer.lexeme(), "alpha");
    lexer.next().unwrap();
    assert_eq!(lexer.lexeme(), "beta");
}

#[test]
fn greedy_operator_disambiguation() {
    assert_lex_eq(
        "= == => < <= <- - -= -> . .. : :: | || & && ! !=",
        vec![
            Token::new(span((1, 1), (1, 2)), Equals),
            Token::new(span((1, 3), (1, 5)), DoubleEquals),
            Token::new(span((1, 6), (1, 8)), WideArrowRight),
            Token::new(span((1, 9), (1, 10)), LessThan),
            Token::new(span((1, 11), (1, 13)), LessThanEquals),
            Token::new(span((1, 14), (1, 16)), ThinArrowLeft),
            Token::new(span((1, 17), (1, 18)), Minus),
            Token::new(span((1, 19), (1, 21)), MinusEquals),
            Token::new(span((1, 22), (1, 24)), ThinArrowRight),
            Token::new(span((1, 25), (1, 26)), Dot),
            Token::new(span((1, 27), (1, 29)), DotDot),
            Token::new(span((1, 30), (1, 31)), Colon),
            Token::new(span((1, 32), (1, 34)), DoubleColon),
            Token::new(span((1, 35), (1, 36)), Pipe),
            Token::new(span((1, 37), (1, 39)), DoublePipe),
            Token::new(span((1, 40), (1, 41)), Ampersand),
            Token::new(span((1, 42), (1, 44)), DoubleAmpersand),
            Token::new(span((1, 45), (1, 46)), Bang),
            Token::new(span((1, 47), (1, 49)), BangEquals),
            Token::new(span((1, 49), (1, 49)), EndOfInput),
        ],
    );
}

#[test]
fn compound_assignment_operators() {
    assert_lex_eq(
        "+= -= *= /= %=",
        vec![
            Token::new(span((1, 1), (1, 3)), PlusEquals),
            Token::new(span((1, 4), (1, 6)), MinusEquals),
            Token::new(span((1, 7), (1, 9)), AsteriskEquals),
            Token::new(span((1, 10), (1, 12)), SlashEquals),
            Token::new(span((1, 13), (1, 15)), PercentEquals),
            Token::new(span((1, 15), (1, 15)), EndOfInput),
        ],
    );
}

#[test]
fn line_comments_are_skipped() {
    assert_lex_eq(
        "a // rest of the line\nb",
        vec![
            Token::new(span((1, 1), (1, 2)), Word),
            Token::new(span((2, 1), (2, 2)), Word),
            Token::new(span((2, 2), (2, 2)), EndOfInput),
        ],
    );
}

#[test]
fn block_comments_are_skipped() {
    assert_lex_eq(
        "a /* multi\nline */ b",
        vec![
            Token::new(span((1, 1), (1, 2)), Word),
            Token::new(span((2, 9), (2, 10)), Word),
            Token::new(span((2, 10), (2, 10)), EndOfInput),
        ],
    );
}

#[test]
fn unterminated_block_comment() {
    assert_lex_err("/* no end in sight", BareError::UnterminatedComment);
}

#[test]
fn carriage_return_does_not_count_lines() {
    assert_lex_eq(
        "a\r\nb",
        vec![
            Token::new(span((1, 1), (1, 2)), Word),
            Token::new(span((2, 1), (2, 2)), Word),
            Token::new(span((2, 2), (2, 2)), EndOfInput),
        ],
    );
}

#[test]
fn number_literal_value() {
    let mut lexer = Lexer::new("1009".to_owned());
    assert_eq!(
        lexer.next().unwrap(),
        Token::new(span((1, 1), (1, 5)), NumLit)
    );
    assert_eq!(lexer.num_value(), 1009);
}

#[test]
fn number_literal_overflow() {
    assert_lex_err("9223372036854775808", BareError::IntOverflow);
}

#[test]
fn char_literals() {
    let mut lexer = Lexer::new(r"'a' '\n' '\0' '\\'".to_owned());
    for expected in ['a', '\n', '\0', '\\'] {
        assert_eq!(lexer.next().unwrap().bare, CharLit);
        assert_eq!(lexer.char_value(), expected);
    }
}

#[test]
fn bad_char_escape() {
    assert_lex_err(r"'\q'", BareError::BadEscape('q'));
}

#[test]
fn unterminated_char_literal() {
    assert_lex_err("'ab'", BareError::UnterminatedChar);
}

#[test]
fn string_literals() {
    let mut lexer = Lexer::new(r#""tab\there" "q\"q""#.to_owned());
    assert_eq!(lexer.next().unwrap().bare, TextLit);
    assert_eq!(lexer.lexeme(), "tab\there");
    assert_eq!(lexer.next().unwrap().bare, TextLit);
    assert_eq!(lexer.lexeme(), "q\"q");
}

#[test]
fn unterminated_string_literal() {
    assert_lex_err("\"no end", BareError::UnterminatedString);
}

#[test]
fn unexpected_character() {
    assert_lex_err("#", BareError::UnexpectedCharacter('#'));
}

#[test]
fn peeking_is_idempotent() {
    let mut lexer = Lexer::new("a b".to_owned());
    let first = lexer.peek().unwrap();
    assert_eq!(lexer.peek().unwrap(), first);
    assert_eq!(lexer.next().unwrap(), first);
    assert_ne!(lexer.peek().unwrap(), first);
}

#[test]
fn checkpoint_restoration_is_exact() {
    let mut lexer = Lexer::new("alpha 1 'x' \"text\" beta".to_owned());
    lexer.next().unwrap(); // `alpha`

    lexer.push_checkpoint();
    let before = (
        lexer.peek().unwrap(),
        lexer.lexeme().to_owned(),
        lexer.num_value(),
        lexer.char_value(),
    );
    for _ in 0..4 {
        lexer.next().unwrap();
    }
    lexer.restore_checkpoint().unwrap();

    assert_eq!(
        (
            lexer.peek().unwrap(),
            lexer.lexeme().to_owned(),
            lexer.num_value(),
            lexer.char_value(),
        ),
        before,
    );
}

#[test]
fn nested_checkpoints() {
    let mut lexer = Lexer::new("a b c".to_owned());
    lexer.push_checkpoint();
    lexer.next().unwrap();
    lexer.push_checkpoint();
    lexer.next().unwrap();
    lexer.pop_checkpoint();
    lexer.restore_checkpoint().unwrap();
    assert_eq!(lexer.next().unwrap().span, span((1, 1), (1, 2)));
}

#[test]
fn restoring_without_checkpoint() {
    let mut lexer = Lexer::new(String::new());
    assert_eq!(
        lexer.restore_checkpoint().unwrap_err(),
        Spanned::new(span((1, 1), (1, 1)), BareError::NoCheckpoint),
    );
}
