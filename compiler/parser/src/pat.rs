use crate::base::{unexpected_error, Parser};
use crate::Result;
use ast::{AtPat, BareLit, BarePat, BareTy, CtorPat, Lit, NamePat, Pat};
use lexer::token::BareToken::*;
use span::{Span, Spanned};

impl Parser {
    /// Parse a pattern: one or more basic patterns separated by `|`.
    pub(crate) fn parse_pat(&mut self, use_hint: bool) -> Result<Pat> {
        let start = self.start()?;
        let mut options = self.parse_sep(
            |this| this.parse_basic_pat(use_hint),
            Pipe,
            false,
            true,
        )?;
        Ok(match options.len() {
            1 => options.pop().unwrap(),
            _ => Spanned::new(self.span_from(start), BarePat::Or(options)),
        })
    }

    /// Parse a pattern without or-alternatives.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Basic-Pat ::=
    ///     | Lit
    ///     | "_"
    ///     | "mut"? Name Ty-Args? ("(" (Pat ",")* ")")?
    ///     | "mut"? Name Hint? "@" Basic-Pat
    ///     | Tuple-Pat
    /// ```
    ///
    /// A name pattern followed by `(` is a constructor pattern. Whether a
    /// *bare* name is a binder or an argument-less constructor is not
    /// decidable here; the table builder rewrites those later.
    pub(crate) fn parse_basic_pat(&mut self, use_hint: bool) -> Result<Pat> {
        let start = self.start()?;
        let token = self.peek()?;
        match token.bare {
            NumLit => {
                let value = self.lexer.num_value();
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BarePat::Lit(Lit::new(span, BareLit::Num(value))),
                ))
            }
            True => {
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BarePat::Lit(Lit::new(span, BareLit::Bool(true))),
                ))
            }
            False => {
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BarePat::Lit(Lit::new(span, BareLit::Bool(false))),
                ))
            }
            CharLit => {
                let value = self.lexer.char_value();
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BarePat::Lit(Lit::new(span, BareLit::Char(value))),
                ))
            }
            TextLit => {
                let value = utility::Atom::from(self.lexer.lexeme());
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BarePat::Lit(Lit::new(span, BareLit::Text(value))),
                ))
            }
            Underscore => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BarePat::Wild))
            }
            Mut | Word => {
                let mutable = self.consume(Mut)?;
                let name = self.parse_name()?;
                let ty_args = self.parse_ty_args()?;

                if self.peek()?.bare == OpeningRoundBracket {
                    self.next()?;
                    let args =
                        self.parse_sep(|this| this.parse_pat(true), Comma, false, false)?;
                    self.expect(ClosingRoundBracket)?;
                    return Ok(Spanned::new(
                        self.span_from(start),
                        CtorPat {
                            name,
                            ty_args,
                            args: Some(args),
                        }
                        .into(),
                    ));
                }

                let hint = if use_hint {
                    self.parse_hint()?
                } else {
                    Spanned::new(Span::default(), BareTy::Meta)
                };

                if self.peek()?.bare == At {
                    let token = self.peek()?;
                    self.next()?;
                    if ty_args.is_some() {
                        return Err(unexpected_error("binder pattern", token));
                    }
                    let pat = self.parse_basic_pat(true)?;
                    return Ok(Spanned::new(
                        self.span_from(start),
                        AtPat {
                            name,
                            hint,
                            mutable,
                            pat,
                        }
                        .into(),
                    ));
                }

                Ok(Spanned::new(
                    self.span_from(start),
                    NamePat {
                        name,
                        ty_args,
                        hint,
                        mutable,
                    }
                    .into(),
                ))
            }
            OpeningRoundBracket => self.parse_tuple_pat(),
            _ => Err(unexpected_error("pattern", token)),
        }
    }

    /// Parse a parenthesized pattern: unit, a grouped pattern or a tuple pattern.
    fn parse_tuple_pat(&mut self) -> Result<Pat> {
        let start = self.start()?;
        self.expect(OpeningRoundBracket)?;
        let mut elems = self.parse_sep(|this| this.parse_pat(true), Comma, false, false)?;
        self.expect(ClosingRoundBracket)?;
        Ok(match elems.len() {
            0 => {
                let span = self.span_from(start);
                Spanned::new(span, BarePat::Lit(Lit::new(span, BareLit::Unit)))
            }
            1 => elems.pop().unwrap(),
            _ => Spanned::new(self.span_from(start), BarePat::Tuple(elems)),
        })
    }
}
