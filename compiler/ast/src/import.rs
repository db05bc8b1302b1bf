use span::Spanned;
use utility::Atom;

/// An import tree, the payload of `import` headers and `open` declarations.
pub type Import = Spanned<BareImport>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BareImport {
    Node(Box<NodeImport>),
    Alias(Box<AliasImport>),
    /// `*`: every entry of the target node under its original name.
    Wild,
}

/// A node import: `M` or `M.SUB` or `M.{SUB, …}`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NodeImport {
    pub binder: Atom,
    pub nested: Vec<Import>,
}

impl From<NodeImport> for BareImport {
    fn from(import: NodeImport) -> Self {
        Self::Node(Box::new(import))
    }
}

/// An alias import: `C as D`, or `C as _` to hide `C`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AliasImport {
    pub target: Atom,
    pub binder: Option<Atom>,
}

impl From<AliasImport> for BareImport {
    fn from(import: AliasImport) -> Self {
        Self::Alias(Box::new(import))
    }
}
