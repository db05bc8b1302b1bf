use crate::{BareError, Error, Expectation, Result};
use lexer::{
    token::{BareToken, Token},
    Lexer,
};
use span::{Loc, Span, Spanned};

/// The parser.
///
/// It drives the lexer one token at a time and resolves grammar ambiguities
/// by speculating under a lexer checkpoint: every checkpoint pushed inside the
/// parser is popped on commitment or restored on failure, never leaked.
pub(crate) struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) package: String,
    /// The span of the most recently consumed token.
    ///
    /// Node spans run from the start of their first token to the end of this.
    prev_span: Span,
    /// The values of [`Self::prev_span`] saved alongside the lexer checkpoints.
    checkpoints: Vec<Span>,
}

impl Parser {
    pub(crate) fn new(package: String, input: String) -> Self {
        Self {
            lexer: Lexer::new(input),
            package,
            prev_span: Span::default(),
            checkpoints: Vec::new(),
        }
    }

    /// Open a speculative region.
    pub(crate) fn push_checkpoint(&mut self) {
        self.lexer.push_checkpoint();
        self.checkpoints.push(self.prev_span);
    }

    /// Commit a speculative region.
    pub(crate) fn pop_checkpoint(&mut self) {
        self.lexer.pop_checkpoint();
        self.checkpoints.pop();
    }

    /// Abandon a speculative region: tokens consumed inside it count as
    /// never consumed.
    pub(crate) fn restore_checkpoint(&mut self) -> Result<()> {
        self.lexer.restore_checkpoint()?;
        if let Some(span) = self.checkpoints.pop() {
            self.prev_span = span;
        }
        Ok(())
    }

    pub(crate) fn peek(&mut self) -> Result<Token> {
        Ok(self.lexer.peek()?)
    }

    pub(crate) fn next(&mut self) -> Result<Token> {
        let token = self.lexer.next()?;
        self.prev_span = token.span;
        Ok(token)
    }

    /// The start location of the upcoming token.
    pub(crate) fn start(&mut self) -> Result<Loc> {
        Ok(self.peek()?.span.start)
    }

    /// The span from the given start location to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: Loc) -> Span {
        Span::new(start, self.prev_span.end)
    }

    /// Expect the upcoming token to match, consuming it on success.
    pub(crate) fn expect(&mut self, expected: BareToken) -> Result<Span> {
        let token = self.peek()?;
        if token.bare == expected {
            self.next()?;
            Ok(token.span)
        } else {
            Err(expected_error(vec![Expectation::Token(expected)], token))
        }
    }

    /// Consume the upcoming token if it matches.
    pub(crate) fn consume(&mut self, expected: BareToken) -> Result<bool> {
        if self.peek()?.bare == expected {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Verify that the entire input has been consumed.
    pub(crate) fn done(&mut self) -> Result<()> {
        let token = self.peek()?;
        if token.bare == BareToken::EndOfInput {
            Ok(())
        } else {
            Err(expected_error(
                vec![Expectation::Token(BareToken::EndOfInput)],
                token,
            ))
        }
    }

    /// Parse a separated list.
    ///
    /// The leading element and, with `allow_trailing`, the element after the
    /// final separator are speculative regions: on failure the lexer state is
    /// restored and the list ends. With `required`, a missing leading element
    /// is an error.
    pub(crate) fn parse_sep<T>(
        &mut self,
        mut parse: impl FnMut(&mut Self) -> Result<T>,
        sep: BareToken,
        allow_trailing: bool,
        required: bool,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();

        self.push_checkpoint();
        match parse(self) {
            Ok(item) => {
                self.pop_checkpoint();
                items.push(item);
            }
            Err(error) => {
                self.restore_checkpoint()?;
                if required {
                    return Err(error);
                }
                return Ok(items);
            }
        }

        while self.consume(sep)? {
            self.push_checkpoint();
            match parse(self) {
                Ok(item) => {
                    self.pop_checkpoint();
                    items.push(item);
                }
                Err(error) => {
                    self.restore_checkpoint()?;
                    if allow_trailing {
                        break;
                    }
                    return Err(error);
                }
            }
        }

        Ok(items)
    }
}

/// An [`BareError::ExpectedButGot`] error at the given token.
pub(crate) fn expected_error(expected: Vec<Expectation>, actual: Token) -> Error {
    Error::Parse(Spanned::new(
        actual.span,
        BareError::ExpectedButGot {
            expected,
            actual: actual.bare,
        },
    ))
}

/// An [`BareError::UnexpectedInContext`] error at the given token.
pub(crate) fn unexpected_error(context: &'static str, actual: Token) -> Error {
    Error::Parse(Spanned::new(
        actual.span,
        BareError::UnexpectedInContext {
            context,
            actual: actual.bare,
        },
    ))
}
