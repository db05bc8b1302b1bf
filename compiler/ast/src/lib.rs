//! The abstract syntax tree (AST).
//!
//! The most important definitions are [`Decl`], [`Stmt`], [`Expr`] and [`Pat`].
//! Every node carries a [`span::Span`]; statements and declarations
//! additionally carry attributes, declarations an [access level](Access).

use derivation::Str;
use span::Span;

pub use decl::*;
pub use expr::*;
pub use import::{AliasImport, BareImport, Import, NodeImport};
pub use lit::{BareLit, Lit};
pub use name::{Name, Seg};
pub use pat::*;
pub use stmt::*;
pub use ty::*;

mod decl;
mod expr;
mod format;
mod import;
mod lit;
mod name;
mod pat;
mod stmt;
mod ty;

/// A list of attribute expressions, each introduced by `@`.
pub type Attrs = Vec<Expr>;

/// Something with a source location and attributes.
pub type Item<Bare> = span::item::Item<Bare, Attrs>;

/// The access level of a declaration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Str)]
#[format(dash_case)]
pub enum Access {
    #[default]
    Public,
    Private,
    Protected,
}

/// A parsed compilation unit: the package identifier given by the caller,
/// the header imports and the top-level declarations.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Package {
    pub ident: String,
    pub header: Vec<Import>,
    pub decls: Vec<Decl>,
    pub span: Span,
}
