use crate::base::{unexpected_error, Parser};
use crate::Result;
use ast::{
    AppExpr, AssignMode, BareCond, BareExpr, BareLit, BarePat, BinOp, BinaryExpr, BlockExpr,
    CaseClause, Clause, Cond, DefaultClause, Expr, ForExpr, HintExpr, IteArm, IteExpr, LamExpr,
    LetCond, Lit, LoopExpr, NameExpr, ReturnExpr, SwitchExpr, UnaryExpr, UnaryOp, WhileExpr,
};
use lexer::token::BareToken::*;
use span::Spanned;

impl Parser {
    /// Parse an expression.
    ///
    /// Control-flow forms are dispatched on their keyword. Everything else is
    /// first speculatively parsed as a lambda literal; when that fails, the
    /// lexer is restored and the assignment ladder takes over.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let token = self.peek()?;
        match token.bare {
            If => self.parse_ite_expr(),
            Switch => self.parse_switch_expr(),
            For => self.parse_for_expr(),
            While => self.parse_while_expr(),
            Loop => self.parse_loop_expr(),
            OpeningCurlyBracket => self.parse_block_expr(),
            Break => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareExpr::Break))
            }
            Continue => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareExpr::Continue))
            }
            Return => {
                self.next()?;
                self.push_checkpoint();
                let value = match self.parse_expr() {
                    Ok(value) => {
                        self.pop_checkpoint();
                        Some(value)
                    }
                    Err(_) => {
                        self.restore_checkpoint()?;
                        None
                    }
                };
                Ok(Spanned::new(
                    self.span_from(start),
                    ReturnExpr { value }.into(),
                ))
            }
            _ => {
                self.push_checkpoint();
                match self.parse_lam_expr() {
                    Ok(lam) => {
                        self.pop_checkpoint();
                        Ok(lam)
                    }
                    Err(_) => {
                        self.restore_checkpoint()?;
                        self.parse_assign_expr()
                    }
                }
            }
        }
    }

    /// Parse a lambda literal: `pat => expr`, a tuple pattern supplying the
    /// parameter list.
    fn parse_lam_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let pat = self.parse_basic_pat(true)?;
        let params = match pat.bare {
            BarePat::Tuple(elems) => elems,
            _ => vec![pat],
        };
        self.expect(WideArrowRight)?;
        let body = self.parse_expr()?;
        Ok(Spanned::new(
            self.span_from(start),
            LamExpr { params, body }.into(),
        ))
    }

    /// Parse right-associative (compound) assignments.
    fn parse_assign_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut rhs = self.parse_or_expr()?;
        let mut assignments = Vec::new();
        loop {
            let mode = match self.peek()?.bare {
                Equals => AssignMode::Plain,
                PlusEquals => AssignMode::Add,
                MinusEquals => AssignMode::Sub,
                AsteriskEquals => AssignMode::Mul,
                SlashEquals => AssignMode::Div,
                PercentEquals => AssignMode::Mod,
                _ => break,
            };
            self.next()?;
            assignments.push((mode, rhs));
            rhs = self.parse_or_expr()?;
        }
        for (mode, lhs) in assignments.into_iter().rev() {
            rhs = Spanned::new(
                self.span_from(start),
                BinaryExpr {
                    op: BinOp::Assign(mode),
                    lhs,
                    rhs,
                }
                .into(),
            );
        }
        Ok(rhs)
    }

    fn parse_or_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_and_expr()?;
        while self.consume(DoublePipe)? {
            let rhs = self.parse_and_expr()?;
            expr = Spanned::new(
                self.span_from(start),
                BinaryExpr {
                    op: BinOp::Or,
                    lhs: expr,
                    rhs,
                }
                .into(),
            );
        }
        Ok(expr)
    }

    fn parse_and_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_eq_expr()?;
        while self.consume(DoubleAmpersand)? {
            let rhs = self.parse_eq_expr()?;
            expr = Spanned::new(
                self.span_from(start),
                BinaryExpr {
                    op: BinOp::And,
                    lhs: expr,
                    rhs,
                }
                .into(),
            );
        }
        Ok(expr)
    }

    fn parse_eq_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_rel_expr()?;
        loop {
            let op = match self.peek()?.bare {
                DoubleEquals => BinOp::Eq,
                BangEquals => BinOp::Neq,
                _ => break,
            };
            self.next()?;
            let rhs = self.parse_rel_expr()?;
            expr = Spanned::new(
                self.span_from(start),
                BinaryExpr { op, lhs: expr, rhs }.into(),
            );
        }
        Ok(expr)
    }

    fn parse_rel_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_add_expr()?;
        loop {
            let op = match self.peek()?.bare {
                LessThan => BinOp::Lt,
                GreaterThan => BinOp::Gt,
                LessThanEquals => BinOp::Lte,
                GreaterThanEquals => BinOp::Gte,
                _ => break,
            };
            self.next()?;
            let rhs = self.parse_add_expr()?;
            expr = Spanned::new(
                self.span_from(start),
                BinaryExpr { op, lhs: expr, rhs }.into(),
            );
        }
        Ok(expr)
    }

    fn parse_add_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_mul_expr()?;
        loop {
            let op = match self.peek()?.bare {
                Plus => BinOp::Add,
                Minus => BinOp::Sub,
                _ => break,
            };
            self.next()?;
            let rhs = self.parse_mul_expr()?;
            expr = Spanned::new(
                self.span_from(start),
                BinaryExpr { op, lhs: expr, rhs }.into(),
            );
        }
        Ok(expr)
    }

    fn parse_mul_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_prefix_expr()?;
        loop {
            let op = match self.peek()?.bare {
                Asterisk => BinOp::Mul,
                Slash => BinOp::Div,
                Percent => BinOp::Mod,
                _ => break,
            };
            self.next()?;
            let rhs = self.parse_prefix_expr()?;
            expr = Spanned::new(
                self.span_from(start),
                BinaryExpr { op, lhs: expr, rhs }.into(),
            );
        }
        Ok(expr)
    }

    /// Parse prefix operators: `+`, `-`, address-of `&` and dereference `*`.
    ///
    /// The tokens are shared with the additive and multiplicative operators;
    /// context disambiguates since a prefix form starts an expression.
    fn parse_prefix_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let op = match self.peek()?.bare {
            Plus => UnaryOp::Pos,
            Minus => UnaryOp::Neg,
            Ampersand => UnaryOp::Addr,
            Asterisk => UnaryOp::Deref,
            _ => return self.parse_postfix_expr(),
        };
        self.next()?;
        let expr = self.parse_prefix_expr()?;
        Ok(Spanned::new(
            self.span_from(start),
            UnaryExpr { op, expr }.into(),
        ))
    }

    /// Parse postfix forms: try `?`, member access, indexing and calls.
    fn parse_postfix_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut expr = self.parse_primary_expr()?;
        loop {
            match self.peek()?.bare {
                QuestionMark => {
                    self.next()?;
                    expr = Spanned::new(
                        self.span_from(start),
                        UnaryExpr {
                            op: UnaryOp::Try,
                            expr,
                        }
                        .into(),
                    );
                }
                Dot => {
                    let path = self.parse_path()?.into_vec();
                    let ty_args = self.parse_ty_args()?;
                    expr = Spanned::new(
                        self.span_from(start),
                        UnaryExpr {
                            op: UnaryOp::Dot { path, ty_args },
                            expr,
                        }
                        .into(),
                    );
                }
                OpeningSquareBracket => {
                    self.next()?;
                    let indices =
                        self.parse_sep(Self::parse_expr, Comma, false, false)?;
                    self.expect(ClosingSquareBracket)?;
                    expr = Spanned::new(
                        self.span_from(start),
                        UnaryExpr {
                            op: UnaryOp::Index(indices),
                            expr,
                        }
                        .into(),
                    );
                }
                OpeningRoundBracket => {
                    self.next()?;
                    let args = self.parse_sep(Self::parse_expr, Comma, false, false)?;
                    self.expect(ClosingRoundBracket)?;
                    expr = Spanned::new(
                        self.span_from(start),
                        AppExpr { callee: expr, args }.into(),
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Parse a primary expression: literals, names, holes and parenthesized forms.
    fn parse_primary_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let token = self.peek()?;
        match token.bare {
            NumLit => {
                let value = self.lexer.num_value();
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BareExpr::Lit(Lit::new(span, BareLit::Num(value))),
                ))
            }
            True => {
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BareExpr::Lit(Lit::new(span, BareLit::Bool(true))),
                ))
            }
            False => {
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BareExpr::Lit(Lit::new(span, BareLit::Bool(false))),
                ))
            }
            CharLit => {
                let value = self.lexer.char_value();
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BareExpr::Lit(Lit::new(span, BareLit::Char(value))),
                ))
            }
            TextLit => {
                let value = utility::Atom::from(self.lexer.lexeme());
                self.next()?;
                let span = self.span_from(start);
                Ok(Spanned::new(
                    span,
                    BareExpr::Lit(Lit::new(span, BareLit::Text(value))),
                ))
            }
            Word => {
                let name = self.parse_name()?;
                let ty_args = self.parse_ty_args()?;
                Ok(Spanned::new(
                    self.span_from(start),
                    NameExpr { name, ty_args }.into(),
                ))
            }
            Underscore => {
                self.next()?;
                Ok(Spanned::new(self.span_from(start), BareExpr::Hole))
            }
            OpeningRoundBracket => self.parse_tuple_expr(),
            _ => Err(unexpected_error("expression", token)),
        }
    }

    /// Parse a parenthesized expression: unit, a grouped (possibly
    /// type-annotated) expression or a tuple expression.
    fn parse_tuple_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(OpeningRoundBracket)?;
        let mut elems = self.parse_sep(
            |this| {
                let elem_start = this.start()?;
                let expr = this.parse_expr()?;
                if this.peek()?.bare == Colon {
                    let ty = this.parse_hint()?;
                    return Ok(Spanned::new(
                        this.span_from(elem_start),
                        HintExpr { expr, ty }.into(),
                    ));
                }
                Ok(expr)
            },
            Comma,
            false,
            false,
        )?;
        self.expect(ClosingRoundBracket)?;
        Ok(match elems.len() {
            0 => {
                let span = self.span_from(start);
                Spanned::new(span, BareExpr::Lit(Lit::new(span, BareLit::Unit)))
            }
            1 => elems.pop().unwrap(),
            _ => Spanned::new(self.span_from(start), BareExpr::Tuple(elems)),
        })
    }

    /// Parse a condition: `let PAT = EXPR` or a plain expression.
    fn parse_cond(&mut self) -> Result<Cond> {
        let start = self.start()?;
        if self.consume(Let)? {
            let pat = self.parse_pat(true)?;
            self.expect(Equals)?;
            let expr = self.parse_expr()?;
            Ok(Spanned::new(
                self.span_from(start),
                LetCond { pat, expr }.into(),
            ))
        } else {
            let expr = self.parse_expr()?;
            Ok(Spanned::new(self.span_from(start), BareCond::Expr(expr)))
        }
    }

    /// Parse an if-expression with any number of `else if` arms and an
    /// optional final `else`.
    fn parse_ite_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(If)?;
        let mut arms = Vec::new();
        let cond = self.parse_cond()?;
        let consequent = self.parse_block_expr()?;
        arms.push(IteArm { cond, consequent });

        let mut alternative = None;
        while self.consume(Else)? {
            if self.consume(If)? {
                let cond = self.parse_cond()?;
                let consequent = self.parse_block_expr()?;
                arms.push(IteArm { cond, consequent });
                continue;
            }
            alternative = Some(self.parse_block_expr()?);
        }

        Ok(Spanned::new(
            self.span_from(start),
            IteExpr { arms, alternative }.into(),
        ))
    }

    /// Parse a switch clause.
    ///
    /// The statement run of a clause is bounded by the next `case`, `default`
    /// or the closing brace.
    fn parse_clause(&mut self) -> Result<Clause> {
        let start = self.start()?;
        let token = self.peek()?;
        match token.bare {
            Case => {
                self.next()?;
                let pat = self.parse_pat(false)?;
                let guard = if self.consume(If)? {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                self.expect(Colon)?;
                let body = self.parse_clause_body()?;
                Ok(Spanned::new(
                    self.span_from(start),
                    CaseClause { pat, guard, body }.into(),
                ))
            }
            Default => {
                self.next()?;
                self.expect(Colon)?;
                let body = self.parse_clause_body()?;
                Ok(Spanned::new(
                    self.span_from(start),
                    DefaultClause { body }.into(),
                ))
            }
            _ => Err(unexpected_error("clause", token)),
        }
    }

    fn parse_clause_body(&mut self) -> Result<Expr> {
        let start = self.start()?;
        let mut stmts = Vec::new();
        while !matches!(self.peek()?.bare, Case | Default | ClosingCurlyBracket) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Spanned::new(
            self.span_from(start),
            BlockExpr::new(stmts).into(),
        ))
    }

    fn parse_switch_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(Switch)?;
        let scrutinee = self.parse_expr()?;

        self.expect(OpeningCurlyBracket)?;
        let mut clauses = Vec::new();
        while self.peek()?.bare != ClosingCurlyBracket {
            clauses.push(self.parse_clause()?);
        }
        self.expect(ClosingCurlyBracket)?;

        Ok(Spanned::new(
            self.span_from(start),
            SwitchExpr { scrutinee, clauses }.into(),
        ))
    }

    fn parse_for_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(For)?;
        let pat = self.parse_basic_pat(true)?;
        self.expect(In)?;
        let iter = self.parse_expr()?;
        let body = self.parse_block_expr()?;
        Ok(Spanned::new(
            self.span_from(start),
            ForExpr { pat, iter, body }.into(),
        ))
    }

    fn parse_while_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(While)?;
        let cond = self.parse_cond()?;
        let body = self.parse_block_expr()?;
        Ok(Spanned::new(
            self.span_from(start),
            WhileExpr { cond, body }.into(),
        ))
    }

    fn parse_loop_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(Loop)?;
        let body = self.parse_block_expr()?;
        Ok(Spanned::new(
            self.span_from(start),
            LoopExpr { body }.into(),
        ))
    }

    /// Parse a braced block of statements.
    pub(crate) fn parse_block_expr(&mut self) -> Result<Expr> {
        let start = self.start()?;
        self.expect(OpeningCurlyBracket)?;
        let mut stmts = Vec::new();
        while self.peek()?.bare != ClosingCurlyBracket {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(ClosingCurlyBracket)?;
        Ok(Spanned::new(
            self.span_from(start),
            BlockExpr::new(stmts).into(),
        ))
    }
}
