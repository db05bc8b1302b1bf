use crate::base::{expected_error, unexpected_error, Parser};
use crate::{Expectation, Result};
use ast::{AliasImport, Name, NodeImport, Seg};
use lexer::token::BareToken::*;
use span::Spanned;
use utility::{Atom, SmallVec};

impl Parser {
    /// Parse an identifier.
    pub(crate) fn parse_ident(&mut self) -> Result<Atom> {
        let token = self.peek()?;
        if token.bare != Word {
            return Err(expected_error(vec![Expectation::Ident], token));
        }
        let ident = Atom::from(self.lexer.lexeme());
        self.next()?;
        Ok(ident)
    }

    /// Parse a (possibly empty) path: a sequence of `.IDENT` and `.INT` segments.
    pub(crate) fn parse_path(&mut self) -> Result<SmallVec<Seg, 1>> {
        let mut path = SmallVec::new();
        while self.peek()?.bare == Dot {
            self.next()?;
            let token = self.peek()?;
            match token.bare {
                Word => path.push(Seg::Ident(self.parse_ident()?)),
                NumLit => {
                    path.push(Seg::Index(self.lexer.num_value()));
                    self.next()?;
                }
                _ => {
                    return Err(expected_error(
                        vec![Expectation::Ident, Expectation::Token(NumLit)],
                        token,
                    ))
                }
            }
        }
        Ok(path)
    }

    /// Parse a name: an identifier followed by a path.
    pub(crate) fn parse_name(&mut self) -> Result<Name> {
        let ident = self.parse_ident()?;
        let path = self.parse_path()?;
        Ok(Name::new(ident, path))
    }

    /// Parse an import tree.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Import ::=
    ///     | #Ident
    ///     | #Ident "." Import
    ///     | #Ident "." "{" (Import ",")+ "}"
    ///     | #Ident "as" (#Ident | "_")
    ///     | "*"
    /// ```
    pub(crate) fn parse_import(&mut self) -> Result<ast::Import> {
        let start = self.start()?;
        let token = self.peek()?;
        match token.bare {
            Word => {
                let binder = self.parse_ident()?;

                if self.peek()?.bare == Dot {
                    self.next()?;

                    if self.peek()?.bare == OpeningCurlyBracket {
                        self.next()?;
                        let nested =
                            self.parse_sep(Self::parse_import, Comma, true, true)?;
                        self.expect(ClosingCurlyBracket)?;
                        return Ok(Spanned::new(
                            self.span_from(start),
                            NodeImport { binder, nested }.into(),
                        ));
                    }

                    let nested = self.parse_import()?;
                    return Ok(Spanned::new(
                        self.span_from(start),
                        NodeImport {
                            binder,
                            nested: vec![nested],
                        }
                        .into(),
                    ));
                }

                if self.peek()?.bare == As {
                    self.next()?;
                    let token = self.peek()?;
                    let alias = match token.bare {
                        Underscore => {
                            self.next()?;
                            None
                        }
                        Word => Some(self.parse_ident()?),
                        _ => {
                            return Err(expected_error(
                                vec![Expectation::Ident, Expectation::Token(Underscore)],
                                token,
                            ))
                        }
                    };
                    return Ok(Spanned::new(
                        self.span_from(start),
                        AliasImport {
                            target: binder,
                            binder: alias,
                        }
                        .into(),
                    ));
                }

                Ok(Spanned::new(
                    self.span_from(start),
                    NodeImport {
                        binder,
                        nested: Vec::new(),
                    }
                    .into(),
                ))
            }
            Asterisk => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), ast::BareImport::Wild))
            }
            _ => Err(unexpected_error("import", token)),
        }
    }

    /// Parse attributes: any number of `@` followed by an expression.
    pub(crate) fn parse_attrs(&mut self) -> Result<ast::Attrs> {
        let mut attrs = ast::Attrs::new();
        while self.peek()?.bare == At {
            self.next()?;
            attrs.push(self.parse_expr()?);
        }
        Ok(attrs)
    }

    /// Parse an optional access modifier. Defaults to public.
    pub(crate) fn parse_access(&mut self) -> Result<ast::Access> {
        match self.peek()?.bare {
            Private => {
                self.next()?;
                Ok(ast::Access::Private)
            }
            Protected => {
                self.next()?;
                Ok(ast::Access::Protected)
            }
            _ => Ok(ast::Access::Public),
        }
    }
}
