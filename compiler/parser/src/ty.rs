use crate::base::{unexpected_error, Parser};
use crate::Result;
use ast::{ArrowTy, BareTy, Name, NameTy, Ty, TyBound};
use lexer::token::BareToken::*;
use span::{Span, Spanned};
use utility::Atom;

impl Parser {
    /// Parse a type.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Ty ::= Basic-Ty ("->" Basic-Ty)*
    /// ```
    ///
    /// The arrow is right-associative; a tuple type to the left of an arrow
    /// contributes its elements as the input list.
    pub(crate) fn parse_ty(&mut self) -> Result<Ty> {
        let start = self.start()?;
        let mut inputs = Vec::new();
        let mut rhs = self.parse_basic_ty()?;
        while self.consume(ThinArrowRight)? {
            inputs.push(rhs);
            rhs = self.parse_basic_ty()?;
        }
        for input in inputs.into_iter().rev() {
            let span = self.span_from(start);
            rhs = match input.bare {
                BareTy::Tuple(elems) => Spanned::new(
                    span,
                    ArrowTy {
                        inputs: elems,
                        output: rhs,
                    }
                    .into(),
                ),
                _ => Spanned::new(
                    span,
                    ArrowTy {
                        inputs: vec![input],
                        output: rhs,
                    }
                    .into(),
                ),
            };
        }
        Ok(rhs)
    }

    /// Parse a type without arrows.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Basic-Ty ::=
    ///     | "Int" | "Bool" | "Char" | "String"
    ///     | Name Ty-Args?
    ///     | Tuple-Ty
    /// ```
    fn parse_basic_ty(&mut self) -> Result<Ty> {
        let start = self.start()?;
        let token = self.peek()?;
        match token.bare {
            IntTy => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareTy::Int))
            }
            BoolTy => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareTy::Bool))
            }
            CharTy => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareTy::Char))
            }
            StringTy => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareTy::String))
            }
            Word => {
                let name = self.parse_name()?;
                let args = self.parse_ty_args()?;
                Ok(Spanned::new(
                    self.span_from(start),
                    NameTy { name, args }.into(),
                ))
            }
            OpeningRoundBracket => self.parse_tuple_ty(),
            _ => Err(unexpected_error("type", token)),
        }
    }

    /// Parse a parenthesized type: unit, a grouped type or a tuple type.
    fn parse_tuple_ty(&mut self) -> Result<Ty> {
        let start = self.start()?;
        self.expect(OpeningRoundBracket)?;
        let mut elems = self.parse_sep(Self::parse_ty, Comma, false, false)?;
        self.expect(ClosingRoundBracket)?;
        Ok(match elems.len() {
            0 => Spanned::new(self.span_from(start), BareTy::Unit),
            1 => elems.pop().unwrap(),
            _ => Spanned::new(self.span_from(start), BareTy::Tuple(elems)),
        })
    }

    /// Speculatively parse type arguments: `"<" (Ty ",")+ ">"`.
    ///
    /// The leading `<` is ambiguous with the less-than operator. We commit to
    /// the type-argument reading only if a `>` follows the type list;
    /// otherwise the lexer is restored and the caller sees the `<` again.
    pub(crate) fn parse_ty_args(&mut self) -> Result<Option<Vec<Ty>>> {
        if self.peek()?.bare != LessThan {
            return Ok(None);
        }

        self.push_checkpoint();
        self.next()?;

        let committed = match self.parse_sep(Self::parse_ty, Comma, false, false) {
            Ok(args) => match self.peek() {
                Ok(token) if token.bare == GreaterThan => Some(args),
                _ => None,
            },
            Err(_) => None,
        };

        match committed {
            Some(args) => {
                self.pop_checkpoint();
                self.next()?;
                Ok(Some(args))
            }
            None => {
                self.restore_checkpoint()?;
                Ok(None)
            }
        }
    }

    /// Parse an optional type annotation: `":" Ty`. Without one, the type is meta.
    pub(crate) fn parse_hint(&mut self) -> Result<Ty> {
        if self.consume(Colon)? {
            self.parse_ty()
        } else {
            Ok(Spanned::new(Span::default(), BareTy::Meta))
        }
    }

    /// Parse a bound: a `+`-separated disjunction of types, at least one.
    pub(crate) fn parse_ty_bound(&mut self) -> Result<Vec<Ty>> {
        self.parse_sep(Self::parse_ty, Plus, false, true)
    }

    /// Parse one type parameter, adding its inline bound (if any) to `bounds`.
    fn parse_ty_param(&mut self, bounds: &mut Vec<TyBound>) -> Result<Atom> {
        let start = self.start()?;
        let ident = self.parse_ident()?;
        if self.consume(Colon)? {
            let bound = self.parse_ty_bound()?;
            bounds.push(TyBound {
                ty: Spanned::new(
                    self.span_from(start),
                    NameTy {
                        name: Name::plain(ident),
                        args: None,
                    }
                    .into(),
                ),
                bounds: bound,
            });
        }
        Ok(ident)
    }

    /// Parse an optional type-parameter list: `"<" (Ty-Param ",")* ">"`.
    pub(crate) fn parse_ty_params(
        &mut self,
        bounds: &mut Vec<TyBound>,
    ) -> Result<Option<Vec<Atom>>> {
        if !self.consume(LessThan)? {
            return Ok(None);
        }
        let params = self.parse_sep(
            |this| this.parse_ty_param(bounds),
            Comma,
            false,
            false,
        )?;
        self.expect(GreaterThan)?;
        Ok(Some(params))
    }

    /// Parse the bounds of a where-clause: `(Ty ":" Ty-Bound ",")*`.
    pub(crate) fn parse_where_bounds(&mut self) -> Result<Vec<TyBound>> {
        self.parse_sep(
            |this| {
                let ty = this.parse_ty()?;
                this.expect(Colon)?;
                let bounds = this.parse_ty_bound()?;
                Ok(TyBound { ty, bounds })
            },
            Comma,
            true,
            false,
        )
    }
}
