use crate::base::{expected_error, Parser};
use crate::{Expectation, Result};
use ast::{BareStmt, BareTy, BindStmt, ExprStmt, FuncStmt, LetStmt, Stmt};
use lexer::token::BareToken::*;
use span::{Span, Spanned};

impl Parser {
    /// Parse a statement.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Stmt ::= Attr* Bare-Stmt
    /// Bare-Stmt ::=
    ///     | Open-Stmt
    ///     | Let-Stmt
    ///     | Func-Stmt
    ///     | Expr ";"?
    /// ```
    ///
    /// An expression statement without a terminating semicolon is the
    /// trailing value of its block.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt> {
        let start = self.start()?;
        let attrs = self.parse_attrs()?;
        let mut stmt = match self.peek()?.bare {
            Open => self.parse_open_stmt()?,
            Let => self.parse_let_stmt()?,
            Func => self.parse_func_stmt()?,
            _ => {
                let expr = self.parse_expr()?;
                let value = !self.consume(Semicolon)?;
                Stmt::common(
                    self.span_from(start),
                    ExprStmt { expr, value }.into(),
                )
            }
        };
        stmt.attributes = attrs;
        Ok(stmt)
    }

    fn parse_open_stmt(&mut self) -> Result<Stmt> {
        let start = self.start()?;
        self.expect(Open)?;
        let import = self.parse_import()?;
        self.expect(Semicolon)?;
        Ok(Stmt::common(
            self.span_from(start),
            BareStmt::Open(import),
        ))
    }

    /// Parse a let or bind statement:
    /// `let PAT = EXPR (else BLOCK)? ";"` or `let PAT <- EXPR ";"`.
    fn parse_let_stmt(&mut self) -> Result<Stmt> {
        let start = self.start()?;
        self.expect(Let)?;

        let pat = self.parse_basic_pat(true)?;

        let token = self.peek()?;
        let stmt = match token.bare {
            Equals => {
                self.next()?;
                let body = self.parse_expr()?;
                let alternative = if self.consume(Else)? {
                    Some(self.parse_block_expr()?)
                } else {
                    None
                };
                Stmt::common(
                    self.span_from(start),
                    LetStmt {
                        pat,
                        body,
                        alternative,
                    }
                    .into(),
                )
            }
            ThinArrowLeft => {
                self.next()?;
                let body = self.parse_expr()?;
                Stmt::common(self.span_from(start), BindStmt { pat, body }.into())
            }
            _ => {
                return Err(expected_error(
                    vec![
                        Expectation::Token(Equals),
                        Expectation::Token(ThinArrowLeft),
                    ],
                    token,
                ))
            }
        };

        self.expect(Semicolon)?;

        Ok(stmt)
    }

    fn parse_func_stmt(&mut self) -> Result<Stmt> {
        let start = self.start()?;
        self.expect(Func)?;
        let binder = self.parse_ident()?;
        self.expect(OpeningRoundBracket)?;
        let params = self.parse_sep(|this| this.parse_pat(true), Comma, false, false)?;
        self.expect(ClosingRoundBracket)?;

        let output = if self.consume(ThinArrowRight)? {
            self.parse_ty()?
        } else {
            Spanned::new(Span::default(), BareTy::Meta)
        };

        let body = self.parse_block_expr()?;
        Ok(Stmt::common(
            self.span_from(start),
            FuncStmt {
                binder,
                params,
                output,
                body,
            }
            .into(),
        ))
    }
}
