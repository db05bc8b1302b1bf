//! The syntactic analyzer (parser).
//!
//! A handwritten top-down recursive-descent parser with an
//! operator-precedence ladder for expressions. Grammar ambiguities — type
//! arguments vs. less-than and lambda parameter lists vs. tuple
//! expressions — are resolved by speculative parsing bracketed by lexer
//! checkpoints.
//!
//! There is no error recovery whatsoever. Syntax errors are considered
//! fatal: parsing stops at the first fault. The only errors recovered
//! locally are those raised inside a speculative region.

use base::Parser;
use diagnostics::Diagnostic;
use lexer::token::BareToken;
use span::Spanned;
use std::fmt;
use utility::{Conjunction, ListingExt, QuoteExt};

mod base;
mod common;
mod decl;
mod expr;
mod pat;
mod stmt;
mod ty;

#[cfg(test)]
mod test;

/// Parse a whole package: header imports followed by declarations.
///
/// The package identifier is provided by the caller, typically derived from
/// the input file path.
pub fn parse_package(package: impl Into<String>, source: String) -> Result<ast::Package> {
    Parser::new(package.into(), source).parse_package()
}

pub fn parse_ty(source: String) -> Result<ast::Ty> {
    Parser::new(String::new(), source).parse_ty()
}

pub fn parse_expr(source: String) -> Result<ast::Expr> {
    Parser::new(String::new(), source).parse_expr()
}

pub fn parse_stmt(source: String) -> Result<ast::Stmt> {
    Parser::new(String::new(), source).parse_stmt()
}

pub fn parse_decl(source: String) -> Result<ast::Decl> {
    Parser::new(String::new(), source).parse_decl()
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    Lex(lexer::Error),
    Parse(ParseError),
}

impl From<lexer::Error> for Error {
    fn from(error: lexer::Error) -> Self {
        Self::Lex(error)
    }
}

impl Error {
    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            Self::Lex(error) => lex_error_diagnostic(error),
            Self::Parse(error) => parse_error_diagnostic(error),
        }
    }
}

pub type ParseError = Spanned<BareError>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareError {
    ExpectedButGot {
        expected: Vec<Expectation>,
        actual: BareToken,
    },
    UnexpectedInContext {
        context: &'static str,
        actual: BareToken,
    },
}

/// What the parser was looking for when it hit an unexpected token.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Expectation {
    Token(BareToken),
    Ident,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => token.fmt(f),
            Self::Ident => f.write_str("identifier"),
        }
    }
}

fn parse_error_diagnostic(error: ParseError) -> Diagnostic {
    match error.bare {
        BareError::ExpectedButGot { expected, actual } => Diagnostic::error()
            .message(format!(
                "found {actual} but expected {}",
                expected.iter().list(Conjunction::Or),
            ))
            .span(error.span, "unexpected token"),
        BareError::UnexpectedInContext { context, actual } => Diagnostic::error()
            .message(format!("found {actual} while parsing a {context}"))
            .span(error.span, "unexpected token"),
    }
}

fn lex_error_diagnostic(error: lexer::Error) -> Diagnostic {
    use lexer::BareError::*;

    match error.bare {
        UnexpectedCharacter(character) => Diagnostic::error()
            .message(format!(
                "found invalid character U+{:04X} {}",
                character as u32,
                character.quote(),
            ))
            .span(error.span, "unexpected character"),
        UnterminatedComment => Diagnostic::error()
            .message("unterminated block comment")
            .unlabeled_span(error.span)
            .help("close the comment with ‘*/’"),
        UnterminatedChar => Diagnostic::error()
            .message("unterminated character literal")
            .unlabeled_span(error.span),
        UnterminatedString => Diagnostic::error()
            .message("unterminated text literal")
            .unlabeled_span(error.span)
            .help("close the literal with a double quote"),
        BadEscape(escape) => Diagnostic::error()
            .message(format!("unknown escape sequence ‘\\{escape}’"))
            .unlabeled_span(error.span),
        IntOverflow => Diagnostic::error()
            .message("number literal does not fit into 64 bits")
            .unlabeled_span(error.span),
        NoCheckpoint => Diagnostic::error()
            .message("no checkpoint to restore")
            .unlabeled_span(error.span),
    }
}
