//! The symbol table and its builder.
//!
//! Building produces a rooted tree of scopes resolving every declared name
//! to a [symbol](Symbol), performs the imports of `open` declarations and
//! rewrites ambiguous name-vs-constructor patterns in the raw tree.

pub use builder::TableBuilder;
pub use error::{
    BareResolveError, BareSemanticError, Error, Namespace, ResolveError, Result, SemanticError,
};
pub use table::{NodeIdx, NodeKind, Symbol, SymbolKind, Table, TableNode};

mod builder;
mod error;
mod table;

#[cfg(test)]
mod test;
