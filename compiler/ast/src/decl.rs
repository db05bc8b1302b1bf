use crate::{Access, Attrs, Expr, Import, Pat, Ty, TyBound};
use utility::Atom;

/// A declaration.
///
/// The syntactic category of module-level definitions like classes, enums,
/// interfaces, extensions, functions and modules.
pub type Decl = span::item::Item<BareDecl, DeclAttrs>;

/// The attributes and access level attached to a declaration.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DeclAttrs {
    pub attrs: Attrs,
    pub access: Access,
}

/// A location-less declaration.
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

/// A module declaration.
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

/// A class declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClassDecl {
    pub binder: Atom,
    pub ty_params: Option<Vec<Atom>>,
    /// Bounds from the type-parameter list and the where-clause, merged.
    pub bounds: Vec<TyBound>,
    pub decls: Vec<Decl>,
}

impl From<ClassDecl> for BareDecl {
    fn from(decl: ClassDecl) -> Self {
        Self::Class(Box::new(decl))
    }
}

/// An enum declaration.
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

/// A type alias: `type T: BOUND = U;`.
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

/// An interface declaration.
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

/// An extension attaching an interface implementation to a base type.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExtensionDecl {
    /// Synthesized by the table builder; `None` straight out of the parser.
    pub binder: Option<Atom>,
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

/// A let declaration.
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

/// A function declaration.
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

/// An initializer declaration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InitDecl {
    /// Synthesized by the table builder when the source omits it.
    pub binder: Option<Atom>,
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

/// An enum constructor: `case Name(Ty, …)` inside an enum body.
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
