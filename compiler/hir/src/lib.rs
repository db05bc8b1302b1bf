//! The elaborated syntax tree.
//!
//! It mirrors the [raw AST](ast) except that every name reference is bound:
//! name patterns became [variable patterns](VarPat), name expressions split
//! into [constants](ConstExpr) and variables, named types split into
//! [type variables](BareTy::Var) and resolved type constants, and member
//! access split into [fields](UnaryOp::Field) and [projections](UnaryOp::Proj).
//!
//! Unlike the raw tree, nodes reachable from multiple places (e.g. a pattern
//! hint recorded in an elaboration scope) are shared, so child links are
//! reference-counted.

use span::Spanned;
use std::rc::Rc;
use utility::Atom;

pub use ast::{Access, BareImport, BareLit, Import, Lit, Seg};

pub use decl::*;
pub use expr::*;
pub use pat::*;
pub use stmt::*;
pub use ty::*;

mod decl;
mod expr;
mod format;
mod pat;
mod stmt;
mod ty;

/// A list of elaborated attribute expressions.
pub type Attrs = Vec<Expr>;

/// Something with a source location and attributes.
pub type Item<Bare> = span::item::Item<Bare, Attrs>;

/// The attributes and access level attached to a declaration.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DeclAttrs {
    pub attrs: Attrs,
    pub access: Access,
}

/// An elaborated compilation unit.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Package {
    pub ident: String,
    pub header: Vec<Import>,
    pub decls: Vec<Decl>,
    pub span: span::Span,
}

/// Construct a shared node.
pub fn share<Bare>(span: span::Span, bare: Bare) -> Rc<Spanned<Bare>> {
    Rc::new(Spanned::new(span, bare))
}

/// An identifier in the elaborated tree.
///
/// For constants and constructor patterns this is the full dot-separated
/// symbol path; for variables the local identifier.
pub type Ident = Atom;
