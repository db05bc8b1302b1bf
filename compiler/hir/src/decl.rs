use crate::{DeclAttrs, Expr, Import, Pat, Ty, TyBound};
use utility::{obtain, Atom};

/// An elaborated declaration.
pub type Decl = span::item::Item<BareDecl, DeclAttrs>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareDecl {
    Module(Box<ModuleDecl>),
    Open(Import),
    Class(Box<ClassDecl>),
    Enum(Box<EnumDecl>),
    Typealias(Box<TypealiasDecl>),
    Interface(Box<InterfaceDecl>),
    Extension(Box<ExtensionDecl>),
    Let(Box<LetDecl>),
    Func(Box<FuncDecl>),
    Init(Box<InitDecl>),
    Ctor(Box<CtorDecl>),
}

impl BareDecl {
    pub fn func(&self) -> Option<&FuncDecl> {
        obtain!(self, BareDecl::Func(func) => func)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleDecl {
    pub binder: Atom,
    pub decls: Vec<Decl>,
}

impl From<ModuleDecl> for BareDecl {
    fn from(decl: ModuleDecl) -> Self {
        Self::Module(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClassDecl {
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub decls: Vec<Decl>,
}

impl From<ClassDecl> for BareDecl {
    fn from(decl: ClassDecl) -> Self {
        Self::Class(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EnumDecl {
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub decls: Vec<Decl>,
}

impl From<EnumDecl> for BareDecl {
    fn from(decl: EnumDecl) -> Self {
        Self::Enum(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypealiasDecl {
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub hint: Vec<Ty>,
    pub aliased: Option<Ty>,
}

impl From<TypealiasDecl> for BareDecl {
    fn from(decl: TypealiasDecl) -> Self {
        Self::Typealias(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InterfaceDecl {
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub decls: Vec<Decl>,
}

impl From<InterfaceDecl> for BareDecl {
    fn from(decl: InterfaceDecl) -> Self {
        Self::Interface(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExtensionDecl {
    /// The identifier synthesized by the table builder.
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub base: Ty,
    pub interface: Ty,
    pub decls: Vec<Decl>,
}

impl From<ExtensionDecl> for BareDecl {
    fn from(decl: ExtensionDecl) -> Self {
        Self::Extension(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LetDecl {
    pub pat: Pat,
    pub body: Option<Expr>,
}

impl From<LetDecl> for BareDecl {
    fn from(decl: LetDecl) -> Self {
        Self::Let(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FuncDecl {
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub params: Vec<Pat>,
    pub output: Ty,
    pub body: Option<Expr>,
}

impl From<FuncDecl> for BareDecl {
    fn from(decl: FuncDecl) -> Self {
        Self::Func(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InitDecl {
    /// The identifier from the source or the one synthesized by the table builder.
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    pub bounds: Vec<TyBound>,
    pub params: Vec<Pat>,
    pub output: Ty,
    pub body: Option<Expr>,
}

impl From<InitDecl> for BareDecl {
    fn from(decl: InitDecl) -> Self {
        Self::Init(Box::new(decl))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CtorDecl {
    pub binder: Atom,
    pub params: Option<Vec<Ty>>,
}

impl From<CtorDecl> for BareDecl {
    fn from(decl: CtorDecl) -> Self {
        Self::Ctor(Box::new(decl))
    }
}
