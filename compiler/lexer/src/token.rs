//! The tokens emitted by the lexer.

use span::Spanned;
use std::fmt;
use utility::quoted;

pub type Token = Spanned<BareToken>;

/// A token kind.
///
/// Tokens do not carry payloads: the lexeme, the parsed integer and the parsed
/// character of the most recently lexed token live on the lexer state where
/// they are captured by checkpoints.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BareToken {
    Word,
    NumLit,
    CharLit,
    TextLit,
    /// The wildcard `_`.
    Underscore,
    OpeningRoundBracket,
    ClosingRoundBracket,
    OpeningSquareBracket,
    ClosingSquareBracket,
    OpeningCurlyBracket,
    ClosingCurlyBracket,
    Comma,
    Dot,
    DotDot,
    Colon,
    DoubleColon,
    Semicolon,
    Pipe,
    /// For attributes and binder patterns.
    At,
    Equals,
    PlusEquals,
    MinusEquals,
    AsteriskEquals,
    SlashEquals,
    PercentEquals,
    /// For function types and return-type annotations.
    ThinArrowRight,
    /// For bind statements.
    ThinArrowLeft,
    /// For lambda literals.
    WideArrowRight,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Ampersand,
    DoubleAmpersand,
    DoublePipe,
    Bang,
    DoubleEquals,
    BangEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    QuestionMark,
    IntTy,
    BoolTy,
    CharTy,
    StringTy,
    True,
    False,
    As,
    Break,
    Case,
    Class,
    Continue,
    Default,
    Else,
    Enum,
    Extension,
    For,
    Func,
    If,
    Import,
    In,
    Init,
    Interface,
    Let,
    Loop,
    Module,
    Mut,
    Open,
    Package,
    Private,
    Protected,
    Return,
    Switch,
    Type,
    Where,
    While,
    EndOfInput,
}

impl fmt::Display for BareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! keyword {
            ($keyword:ident) => {
                concat!("keyword ", quoted!(stringify!($keyword)))
            };
        }

        use BareToken::*;

        f.write_str(match self {
            Word => "identifier",
            NumLit => "number literal",
            CharLit => "character literal",
            TextLit => "text literal",
            Underscore => quoted!("_"),
            OpeningRoundBracket => quoted!("("),
            ClosingRoundBracket => quoted!(")"),
            OpeningSquareBracket => quoted!("["),
            ClosingSquareBracket => quoted!("]"),
            OpeningCurlyBracket => quoted!("{"),
            ClosingCurlyBracket => quoted!("}"),
            Comma => quoted!(","),
            Dot => quoted!("."),
            DotDot => quoted!(".."),
            Colon => quoted!(":"),
            DoubleColon => quoted!("::"),
            Semicolon => quoted!(";"),
            Pipe => quoted!("|"),
            At => quoted!("@"),
            Equals => quoted!("="),
            PlusEquals => quoted!("+="),
            MinusEquals => quoted!("-="),
            AsteriskEquals => quoted!("*="),
            SlashEquals => quoted!("/="),
            PercentEquals => quoted!("%="),
            ThinArrowRight => quoted!("->"),
            ThinArrowLeft => quoted!("<-"),
            WideArrowRight => quoted!("=>"),
            Plus => quoted!("+"),
            Minus => quoted!("-"),
            Asterisk => quoted!("*"),
            Slash => quoted!("/"),
            Percent => quoted!("%"),
            Ampersand => quoted!("&"),
            DoubleAmpersand => quoted!("&&"),
            DoublePipe => quoted!("||"),
            Bang => quoted!("!"),
            DoubleEquals => quoted!("=="),
            BangEquals => quoted!("!="),
            LessThan => quoted!("<"),
            GreaterThan => quoted!(">"),
            LessThanEquals => quoted!("<="),
            GreaterThanEquals => quoted!(">="),
            QuestionMark => quoted!("?"),
            IntTy => quoted!("Int"),
            BoolTy => quoted!("Bool"),
            CharTy => quoted!("Char"),
            StringTy => quoted!("String"),
            True => keyword!(true),
            False => keyword!(false),
            As => keyword!(as),
            Break => keyword!(break),
            Case => keyword!(case),
            Class => keyword!(class),
            Continue => keyword!(continue),
            Default => keyword!(default),
            Else => keyword!(else),
            Enum => keyword!(enum),
            Extension => keyword!(extension),
            For => keyword!(for),
            Func => keyword!(func),
            If => keyword!(if),
            Import => keyword!(import),
            In => keyword!(in),
            Init => keyword!(init),
            Interface => keyword!(interface),
            Let => keyword!(let),
            Loop => keyword!(loop),
            Module => keyword!(module),
            Mut => keyword!(mut),
            Open => keyword!(open),
            Package => keyword!(package),
            Private => keyword!(private),
            Protected => keyword!(protected),
            Return => keyword!(return),
            Switch => keyword!(switch),
            Type => keyword!(type),
            Where => keyword!(where),
            While => keyword!(while),
            EndOfInput => "end of input",
        })
    }
}
