//! The lexical analyzer (lexer).
//!
//! The lexer is pull-based: the parser requests one token at a time via
//! [`Lexer::next`] and [`Lexer::peek`]. Speculative parsing is supported
//! through a stack of [checkpoints](Lexer::push_checkpoint) capturing the
//! entire lexer state by value.

use span::{Loc, Span, Spanned};
use std::{collections::HashMap, sync::LazyLock};
use token::{BareToken, Token};
use BareToken::*;

pub mod token;

#[cfg(test)]
mod test;

pub type Error = Spanned<BareError>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BareError {
    UnexpectedCharacter(char),
    UnterminatedComment,
    UnterminatedChar,
    UnterminatedString,
    BadEscape(char),
    IntOverflow,
    NoCheckpoint,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The keyword table, initialized once at program start and never mutated.
static KEYWORDS: LazyLock<HashMap<&'static str, BareToken>> = LazyLock::new(|| {
    HashMap::from([
        ("Int", IntTy),
        ("Bool", BoolTy),
        ("Char", CharTy),
        ("String", StringTy),
        ("true", True),
        ("false", False),
        ("private", Private),
        ("protected", Protected),
        ("as", As),
        ("package", Package),
        ("module", Module),
        ("import", Import),
        ("open", Open),
        ("init", Init),
        ("func", Func),
        ("type", Type),
        ("class", Class),
        ("enum", Enum),
        ("interface", Interface),
        ("extension", Extension),
        ("where", Where),
        ("let", Let),
        ("mut", Mut),
        ("if", If),
        ("else", Else),
        ("switch", Switch),
        ("case", Case),
        ("default", Default),
        ("for", For),
        ("in", In),
        ("while", While),
        ("loop", Loop),
        ("return", Return),
        ("continue", Continue),
        ("break", Break),
    ])
});

/// The state of the lexer.
///
/// Checkpoints snapshot this in its entirety, including the cached
/// look-ahead token and the literal payloads.
#[derive(Clone)]
struct State {
    pos: usize,
    line: u32,
    column: u32,
    lexeme: String,
    num_value: i64,
    char_value: char,
    peeked: Option<Token>,
    token_start: Loc,
}

impl std::default::Default for State {
    fn default() -> Self {
        Self {
            pos: 0,
            line: 1,
            column: 1,
            lexeme: String::new(),
            num_value: 0,
            char_value: '\0',
            peeked: None,
            token_start: Loc::default(),
        }
    }
}

pub struct Lexer {
    input: String,
    state: State,
    checkpoints: Vec<State>,
}

impl Lexer {
    pub fn new(input: String) -> Self {
        Self {
            input,
            state: State::default(),
            checkpoints: Vec::new(),
        }
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token> {
        if let Some(token) = self.state.peeked {
            return Ok(token);
        }
        let token = self.next()?;
        self.state.peeked = Some(token);
        Ok(token)
    }

    /// Return and consume the next token.
    #[allow(clippy::should_implement_trait)] // fallible and non-terminating, unlike Iterator
    pub fn next(&mut self) -> Result<Token> {
        if let Some(token) = self.state.peeked.take() {
            return Ok(token);
        }

        self.skip_whitespace()?;

        self.state.token_start = self.loc();

        let Some(character) = self.curr_char() else {
            return Ok(self.token(EndOfInput));
        };

        if character.is_ascii_alphabetic() || character == '_' {
            let token = self.lex_word();
            return Ok(self.token(token));
        }

        if character.is_ascii_digit() {
            let token = self.lex_number()?;
            return Ok(self.token(token));
        }

        if character == '\'' {
            let token = self.lex_char()?;
            return Ok(self.token(token));
        }

        if character == '"' {
            let token = self.lex_string()?;
            return Ok(self.token(token));
        }

        self.advance();
        let token = match character {
            '(' => OpeningRoundBracket,
            ')' => ClosingRoundBracket,
            '[' => OpeningSquareBracket,
            ']' => ClosingSquareBracket,
            '{' => OpeningCurlyBracket,
            '}' => ClosingCurlyBracket,
            ',' => Comma,
            ';' => Semicolon,
            '@' => At,
            '?' => QuestionMark,
            '.' => {
                if self.curr_char() == Some('.') {
                    self.advance();
                    DotDot
                } else {
                    Dot
                }
            }
            ':' => {
                if self.curr_char() == Some(':') {
                    self.advance();
                    DoubleColon
                } else {
                    Colon
                }
            }
            '|' => {
                if self.curr_char() == Some('|') {
                    self.advance();
                    DoublePipe
                } else {
                    Pipe
                }
            }
            '&' => {
                if self.curr_char() == Some('&') {
                    self.advance();
                    DoubleAmpersand
                } else {
                    Ampersand
                }
            }
            '=' => match self.curr_char() {
                Some('=') => {
                    self.advance();
                    DoubleEquals
                }
                Some('>') => {
                    self.advance();
                    WideArrowRight
                }
                _ => Equals,
            },
            '!' => {
                if self.curr_char() == Some('=') {
                    self.advance();
                    BangEquals
                } else {
                    Bang
                }
            }
            '<' => match self.curr_char() {
                Some('=') => {
                    self.advance();
                    LessThanEquals
                }
                Some('-') => {
                    self.advance();
                    ThinArrowLeft
                }
                _ => LessThan,
            },
            '>' => {
                if self.curr_char() == Some('=') {
                    self.advance();
                    GreaterThanEquals
                } else {
                    GreaterThan
                }
            }
            '+' => {
                if self.curr_char() == Some('=') {
                    self.advance();
                    PlusEquals
                } else {
                    Plus
                }
            }
            '-' => match self.curr_char() {
                Some('=') => {
                    self.advance();
                    MinusEquals
                }
                Some('>') => {
                    self.advance();
                    ThinArrowRight
                }
                _ => Minus,
            },
            '*' => {
                if self.curr_char() == Some('=') {
                    self.advance();
                    AsteriskEquals
                } else {
                    Asterisk
                }
            }
            '/' => {
                if self.curr_char() == Some('=') {
                    self.advance();
                    SlashEquals
                } else {
                    Slash
                }
            }
            '%' => {
                if self.curr_char() == Some('=') {
                    self.advance();
                    PercentEquals
                } else {
                    Percent
                }
            }
            character => return Err(self.error(BareError::UnexpectedCharacter(character))),
        };
        Ok(self.token(token))
    }

    pub fn is_at_end(&self) -> bool {
        self.state.pos >= self.input.len()
    }

    /// The text of the most recently lexed identifier, keyword or text literal.
    pub fn lexeme(&self) -> &str {
        &self.state.lexeme
    }

    /// The value of the most recently lexed number literal.
    pub fn num_value(&self) -> i64 {
        self.state.num_value
    }

    /// The value of the most recently lexed character literal.
    pub fn char_value(&self) -> char {
        self.state.char_value
    }

    /// Save the current state onto the checkpoint stack.
    pub fn push_checkpoint(&mut self) {
        self.checkpoints.push(self.state.clone());
    }

    /// Discard the most recently pushed checkpoint.
    pub fn pop_checkpoint(&mut self) {
        self.checkpoints.pop();
    }

    /// Pop the most recently pushed checkpoint and reinstate it.
    pub fn restore_checkpoint(&mut self) -> Result<()> {
        match self.checkpoints.pop() {
            Some(state) => {
                self.state = state;
                Ok(())
            }
            None => Err(Spanned::new(
                Span::empty(self.loc()),
                BareError::NoCheckpoint,
            )),
        }
    }

    fn loc(&self) -> Loc {
        Loc::new(self.state.line, self.state.column)
    }

    fn token(&self, token: BareToken) -> Token {
        Token::new(Span::new(self.state.token_start, self.loc()), token)
    }

    fn error(&self, error: BareError) -> Error {
        Spanned::new(Span::new(self.state.token_start, self.loc()), error)
    }

    fn curr_char(&self) -> Option<char> {
        self.input[self.state.pos..].chars().next()
    }

    fn next_char(&self) -> Option<char> {
        let mut characters = self.input[self.state.pos..].chars();
        characters.next();
        characters.next()
    }

    /// Step past the current character, keeping the line and column counters in sync.
    ///
    /// Only `\n` increments the line counter; a lone `\r` merely advances the column.
    fn advance(&mut self) -> char {
        let character = self.curr_char().unwrap_or('\0');
        self.state.pos += character.len_utf8();
        if character == '\n' {
            self.state.line += 1;
            self.state.column = 1;
        } else {
            self.state.column += 1;
        }
        character
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(character) = self.curr_char() {
            if let ' ' | '\t' | '\n' | '\r' = character {
                self.advance();
            } else if character == '/' && self.next_char() == Some('/') {
                self.skip_line_comment();
            } else if character == '/' && self.next_char() == Some('*') {
                self.skip_block_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        self.advance(); // first `/`
        self.advance(); // second `/`
        while let Some(character) = self.curr_char() {
            if character == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let start = self.loc();
        self.advance(); // `/`
        self.advance(); // `*`
        while !self.is_at_end() {
            if self.curr_char() == Some('*') && self.next_char() == Some('/') {
                self.advance(); // `*`
                self.advance(); // `/`
                return Ok(());
            }
            self.advance();
        }
        Err(Spanned::new(
            Span::new(start, self.loc()),
            BareError::UnterminatedComment,
        ))
    }

    fn lex_word(&mut self) -> BareToken {
        let start = self.state.pos;
        while let Some(character) = self.curr_char() {
            if !character.is_ascii_alphanumeric() && character != '_' {
                break;
            }
            self.advance();
        }
        self.state.lexeme = self.input[start..self.state.pos].to_owned();

        if self.state.lexeme == "_" {
            return Underscore;
        }

        match KEYWORDS.get(&*self.state.lexeme) {
            Some(&keyword) => keyword,
            None => Word,
        }
    }

    fn lex_number(&mut self) -> Result<BareToken> {
        let start = self.state.pos;
        while let Some(character) = self.curr_char() {
            if !character.is_ascii_digit() {
                break;
            }
            self.advance();
        }
        self.state.lexeme = self.input[start..self.state.pos].to_owned();
        self.state.num_value = self
            .state
            .lexeme
            .parse()
            .map_err(|_| self.error(BareError::IntOverflow))?;
        Ok(NumLit)
    }

    fn lex_char(&mut self) -> Result<BareToken> {
        self.advance(); // opening `'`
        if self.is_at_end() {
            return Err(self.error(BareError::UnterminatedChar));
        }

        let character = self.advance();
        self.state.char_value = if character == '\\' {
            if self.is_at_end() {
                return Err(self.error(BareError::UnterminatedChar));
            }
            match self.advance() {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '\\' => '\\',
                '\'' => '\'',
                '0' => '\0',
                escape => return Err(self.error(BareError::BadEscape(escape))),
            }
        } else {
            character
        };

        if self.curr_char() != Some('\'') {
            return Err(self.error(BareError::UnterminatedChar));
        }
        self.advance(); // closing `'`
        Ok(CharLit)
    }

    fn lex_string(&mut self) -> Result<BareToken> {
        self.advance(); // opening `"`
        let mut result = String::new();
        while !self.is_at_end() && self.curr_char() != Some('"') {
            let character = self.advance();
            if character == '\\' {
                if self.is_at_end() {
                    return Err(self.error(BareError::UnterminatedString));
                }
                result.push(match self.advance() {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    '0' => '\0',
                    escape => return Err(self.error(BareError::BadEscape(escape))),
                });
            } else {
                result.push(character);
            }
        }
        if self.is_at_end() {
            return Err(self.error(BareError::UnterminatedString));
        }
        self.advance(); // closing `"`
        self.state.lexeme = result;
        Ok(TextLit)
    }
}
