use crate::{Lit, Name, Ty};
use span::Spanned;

/// A pattern.
pub type Pat = Spanned<BarePat>;

/// A location-less pattern.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BarePat {
    Lit(Lit),
    Tuple(Vec<Pat>),
    Ctor(Box<CtorPat>),
    Name(Box<NamePat>),
    Wild,
    Or(Vec<Pat>),
    At(Box<AtPat>),
}

/// A constructor pattern.
///
/// Argument-less constructor patterns are indistinguishable from name
/// patterns at parse time; the table builder rewrites those [`NamePat`]s
/// whose identifier resolves to a constructor symbol into this form.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CtorPat {
    pub name: Name,
    pub ty_args: Option<Vec<Ty>>,
    pub args: Option<Vec<Pat>>,
}

impl From<CtorPat> for BarePat {
    fn from(pat: CtorPat) -> Self {
        Self::Ctor(Box::new(pat))
    }
}

/// A binder pattern.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NamePat {
    pub name: Name,
    pub ty_args: Option<Vec<Ty>>,
    pub hint: Ty,
    pub mutable: bool,
}

impl From<NamePat> for BarePat {
    fn from(pat: NamePat) -> Self {
        Self::Name(Box::new(pat))
    }
}

/// A binder attached to a subpattern: `total @ (a, b)`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AtPat {
    pub name: Name,
    pub hint: Ty,
    pub mutable: bool,
    pub pat: Pat,
}

impl From<AtPat> for BarePat {
    fn from(pat: AtPat) -> Self {
        Self::At(Box::new(pat))
    }
}
