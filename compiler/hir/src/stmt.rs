use crate::{Expr, Import, Item, Pat, Ty};
use utility::Atom;

/// An elaborated statement.
pub type Stmt = Item<BareStmt>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareStmt {
    Open(Import),
    Let(Box<LetStmt>),
    Func(Box<FuncStmt>),
    Bind(Box<BindStmt>),
    Expr(Box<ExprStmt>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LetStmt {
    pub pat: Pat,
    pub body: Expr,
    pub alternative: Option<Expr>,
}

impl From<LetStmt> for BareStmt {
    fn from(stmt: LetStmt) -> Self {
        Self::Let(Box::new(stmt))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FuncStmt {
    pub binder: Atom,
    pub params: Vec<Pat>,
    pub output: Ty,
    pub body: Expr,
}

impl From<FuncStmt> for BareStmt {
    fn from(stmt: FuncStmt) -> Self {
        Self::Func(Box::new(stmt))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BindStmt {
    pub pat: Pat,
    pub body: Expr,
}

impl From<BindStmt> for BareStmt {
    fn from(stmt: BindStmt) -> Self {
        Self::Bind(Box::new(stmt))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExprStmt {
    pub expr: Expr,
    pub value: bool,
}

impl From<ExprStmt> for BareStmt {
    fn from(stmt: ExprStmt) -> Self {
        Self::Expr(Box::new(stmt))
    }
}
