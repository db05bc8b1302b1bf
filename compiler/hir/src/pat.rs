use crate::{Ident, Lit, Ty};
use span::Spanned;
use std::rc::Rc;

/// An elaborated pattern, shared across the tree.
pub type Pat = Rc<Spanned<BarePat>>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BarePat {
    Lit(Lit),
    Tuple(Vec<Pat>),
    Ctor(Box<CtorPat>),
    Var(Box<VarPat>),
    Wild,
    Or(Vec<Pat>),
    At(Box<AtPat>),
}

/// A constructor pattern whose identifier is the constructor's full symbol path.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CtorPat {
    pub ident: Ident,
    pub ty_args: Option<Vec<Ty>>,
    pub args: Option<Vec<Pat>>,
}

impl From<CtorPat> for BarePat {
    fn from(pat: CtorPat) -> Self {
        Self::Ctor(Box::new(pat))
    }
}

/// A variable binder.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VarPat {
    pub ident: Ident,
    pub hint: Ty,
    pub mutable: bool,
}

impl From<VarPat> for BarePat {
    fn from(pat: VarPat) -> Self {
        Self::Var(Box::new(pat))
    }
}

/// A binder attached to a subpattern.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AtPat {
    pub ident: Ident,
    pub hint: Ty,
    pub mutable: bool,
    pub pat: Pat,
}

impl From<AtPat> for BarePat {
    fn from(pat: AtPat) -> Self {
        Self::At(Box::new(pat))
    }
}
