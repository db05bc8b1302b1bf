use crate::{Lit, Name, Pat, Seg, Stmt, Ty};
use span::Spanned;

/// An expression.
pub type Expr = Spanned<BareExpr>;

/// A location-less expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareExpr {
    Lit(Lit),
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
    Tuple(Vec<Expr>),
    Hint(Box<HintExpr>),
    Name(Box<NameExpr>),
    /// The underscore expression `_`, representing an inferred value.
    Hole,
    Lam(Box<LamExpr>),
    App(Box<AppExpr>),
    Block(Box<BlockExpr>),
    Ite(Box<IteExpr>),
    Switch(Box<SwitchExpr>),
    For(Box<ForExpr>),
    While(Box<WhileExpr>),
    Loop(Box<LoopExpr>),
    Break,
    Continue,
    Return(Box<ReturnExpr>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Expr,
}

impl From<UnaryExpr> for BareExpr {
    fn from(expr: UnaryExpr) -> Self {
        Self::Unary(Box::new(expr))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    /// Prefix `+`.
    Pos,
    /// Prefix `-`.
    Neg,
    /// Prefix `!`.
    Not,
    /// Prefix `&`.
    Addr,
    /// Prefix `*`.
    Deref,
    /// Postfix `?`.
    Try,
    /// Postfix `[…]`.
    Index(Vec<Expr>),
    /// Postfix `.seg.seg…`, optionally with type arguments.
    Dot {
        path: Vec<Seg>,
        ty_args: Option<Vec<Ty>>,
    },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryExpr {
    pub op: BinOp,
    pub lhs: Expr,
    pub rhs: Expr,
}

impl From<BinaryExpr> for BareExpr {
    fn from(expr: BinaryExpr) -> Self {
        Self::Binary(Box::new(expr))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    Assign(AssignMode),
}

/// The mode of an assignment: plain `=` or one of the compound arithmetic forms.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssignMode {
    Plain,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// A parenthesized expression with a type annotation: `(e: T)`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HintExpr {
    pub expr: Expr,
    pub ty: Ty,
}

impl From<HintExpr> for BareExpr {
    fn from(expr: HintExpr) -> Self {
        Self::Hint(Box::new(expr))
    }
}

/// A name in expression position, optionally with type arguments.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameExpr {
    pub name: Name,
    pub ty_args: Option<Vec<Ty>>,
}

impl From<NameExpr> for BareExpr {
    fn from(expr: NameExpr) -> Self {
        Self::Name(Box::new(expr))
    }
}

/// A lambda literal: `pat => expr` or `(pat, …) => expr`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LamExpr {
    pub params: Vec<Pat>,
    pub body: Expr,
}

impl From<LamExpr> for BareExpr {
    fn from(expr: LamExpr) -> Self {
        Self::Lam(Box::new(expr))
    }
}

/// A call.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AppExpr {
    pub callee: Expr,
    pub args: Vec<Expr>,
}

impl From<AppExpr> for BareExpr {
    fn from(expr: AppExpr) -> Self {
        Self::App(Box::new(expr))
    }
}

/// A block of statements with an optional trailing value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlockExpr {
    pub stmts: Vec<Stmt>,
    pub tail: Option<Expr>,
}

impl BlockExpr {
    /// A trailing expression statement not terminated by `;` is the value of
    /// the block and moves out of the statement list.
    pub fn new(mut stmts: Vec<Stmt>) -> Self {
        let has_tail = matches!(
            stmts.last(),
            Some(stmt) if matches!(&stmt.bare, crate::BareStmt::Expr(expr) if expr.value)
        );

        let mut tail = None;
        if has_tail {
            match stmts.pop().map(|stmt| stmt.bare) {
                Some(crate::BareStmt::Expr(expr)) => tail = Some(expr.expr),
                _ => unreachable!(),
            }
        }

        Self { stmts, tail }
    }
}

impl From<BlockExpr> for BareExpr {
    fn from(expr: BlockExpr) -> Self {
        Self::Block(Box::new(expr))
    }
}

/// An if-then-else chain.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IteExpr {
    pub arms: Vec<IteArm>,
    pub alternative: Option<Expr>,
}

impl From<IteExpr> for BareExpr {
    fn from(expr: IteExpr) -> Self {
        Self::Ite(Box::new(expr))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IteArm {
    pub cond: Cond,
    pub consequent: Expr,
}

/// A condition: a plain expression or a pattern condition `let PAT = EXPR`.
pub type Cond = Spanned<BareCond>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareCond {
    Expr(Expr),
    Let(Box<LetCond>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LetCond {
    pub pat: Pat,
    pub expr: Expr,
}

impl From<LetCond> for BareCond {
    fn from(cond: LetCond) -> Self {
        Self::Let(Box::new(cond))
    }
}

/// A switch expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SwitchExpr {
    pub scrutinee: Expr,
    pub clauses: Vec<Clause>,
}

impl From<SwitchExpr> for BareExpr {
    fn from(expr: SwitchExpr) -> Self {
        Self::Switch(Box::new(expr))
    }
}

/// A switch clause.
pub type Clause = Spanned<BareClause>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareClause {
    Case(Box<CaseClause>),
    Default(Box<DefaultClause>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CaseClause {
    pub pat: Pat,
    pub guard: Option<Expr>,
    pub body: Expr,
}

impl From<CaseClause> for BareClause {
    fn from(clause: CaseClause) -> Self {
        Self::Case(Box::new(clause))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DefaultClause {
    pub body: Expr,
}

impl From<DefaultClause> for BareClause {
    fn from(clause: DefaultClause) -> Self {
        Self::Default(Box::new(clause))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ForExpr {
    pub pat: Pat,
    pub iter: Expr,
    pub body: Expr,
}

impl From<ForExpr> for BareExpr {
    fn from(expr: ForExpr) -> Self {
        Self::For(Box::new(expr))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WhileExpr {
    pub cond: Cond,
    pub body: Expr,
}

impl From<WhileExpr> for BareExpr {
    fn from(expr: WhileExpr) -> Self {
        Self::While(Box::new(expr))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoopExpr {
    pub body: Expr,
}

impl From<LoopExpr> for BareExpr {
    fn from(expr: LoopExpr) -> Self {
        Self::Loop(Box::new(expr))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReturnExpr {
    pub value: Option<Expr>,
}

impl From<ReturnExpr> for BareExpr {
    fn from(expr: ReturnExpr) -> Self {
        Self::Return(Box::new(expr))
    }
}
