//! The hierarchical symbol table.
//!
//! The table is a rooted tree of [nodes](TableNode) allocated in one arena and
//! addressed by [index](NodeIdx). Imports may copy a child index into several
//! parents, so child sets are shared by identity: two entries are the same
//! node exactly when their indices are equal.

use crate::error::{BareResolveError, BareSemanticError, Namespace};
use ast::Access;
use derivation::Str;
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::IndexMut,
};
use utility::Atom;

/// A binding record: access level, kind and fully-qualified path.
///
/// Symbols are ordered on (kind, path) alone so that sets deduplicate
/// reliably when imports copy the same symbol along several routes.
#[derive(Clone, Debug)]
pub struct Symbol {
    access: Access,
    kind: SymbolKind,
    path: String,
}

impl Symbol {
    pub fn access(&self) -> Access {
        self.access
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.path == other.path
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.path.cmp(&other.path))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Str)]
#[format(dash_case)]
pub enum SymbolKind {
    Class,
    Enum,
    Typealias,
    Interface,
    Extension,
    Func,
    Init,
    Ctor,
    Var,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Str)]
#[format(dash_case)]
pub enum NodeKind {
    Module,
    Class,
    Enum,
    Interface,
    Extension,
}

/// The index of a node in the table's arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIdx(u32);

/// A scope in the table: a module, class, enum, interface or extension.
#[derive(Debug)]
pub struct TableNode {
    kind: NodeKind,
    ident: Atom,
    /// Dot-joined from the root; the root's path is its identifier.
    path: String,
    parent: Option<NodeIdx>,
    counter: u32,
    types: BTreeMap<&'static str, BTreeSet<Symbol>>,
    exprs: BTreeMap<&'static str, BTreeSet<Symbol>>,
    nested: BTreeMap<&'static str, BTreeSet<NodeIdx>>,
}

impl TableNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn ident(&self) -> Atom {
        self.ident
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up the unique type symbol under the given identifier.
    pub fn find_type_symbol(&self, ident: Atom) -> Result<Symbol, BareResolveError> {
        Self::find_symbol(&self.types, Namespace::Type, ident)
    }

    /// Look up the unique expression symbol under the given identifier.
    pub fn find_expr_symbol(&self, ident: Atom) -> Result<Symbol, BareResolveError> {
        Self::find_symbol(&self.exprs, Namespace::Expression, ident)
    }

    fn find_symbol(
        symbols: &BTreeMap<&'static str, BTreeSet<Symbol>>,
        namespace: Namespace,
        ident: Atom,
    ) -> Result<Symbol, BareResolveError> {
        let Some(set) = symbols.get(ident.to_str()) else {
            return Err(BareResolveError::SymbolNotFound { namespace, ident });
        };
        let mut symbols = set.iter();
        match (symbols.next(), symbols.next()) {
            (Some(symbol), None) => Ok(symbol.clone()),
            _ => Err(BareResolveError::AmbiguousSymbol { namespace, ident }),
        }
    }

    /// Look up the unique child node under the given identifier.
    pub fn find_node(&self, ident: Atom) -> Result<NodeIdx, BareResolveError> {
        let Some(set) = self.nested.get(ident.to_str()) else {
            return Err(BareResolveError::SymbolNotFound {
                namespace: Namespace::Node,
                ident,
            });
        };
        let mut nodes = set.iter();
        match (nodes.next(), nodes.next()) {
            (Some(&node), None) => Ok(node),
            _ => Err(BareResolveError::AmbiguousSymbol {
                namespace: Namespace::Node,
                ident,
            }),
        }
    }

}

/// The symbol table: the arena of nodes plus the active cursor.
#[derive(Debug)]
pub struct Table {
    nodes: Vec<TableNode>,
    root: NodeIdx,
    active: NodeIdx,
}

impl Table {
    /// Create a table whose root module is named after the package.
    pub fn new(ident: impl Into<Atom>) -> Self {
        let ident = ident.into();
        let root = TableNode {
            kind: NodeKind::Module,
            ident,
            path: ident.to_str().to_owned(),
            parent: None,
            counter: 0,
            types: BTreeMap::new(),
            exprs: BTreeMap::new(),
            nested: BTreeMap::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeIdx(0),
            active: NodeIdx(0),
        }
    }

    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn active(&self) -> NodeIdx {
        self.active
    }

    /// The next value of the active node's counter, for synthetic identifiers.
    pub fn fresh_count(&mut self) -> u32 {
        let node = self.index_mut(self.active);
        let count = node.counter;
        node.counter += 1;
        count
    }

    /// Add a child scope under the active node.
    pub fn add_node(&mut self, ident: Atom, kind: NodeKind) {
        let path = format!("{}.{}", self[self.active].path, ident);
        let idx = NodeIdx(self.nodes.len().try_into().expect("table node overflow"));
        self.nodes.push(TableNode {
            kind,
            ident,
            path,
            parent: Some(self.active),
            counter: 0,
            types: BTreeMap::new(),
            exprs: BTreeMap::new(),
            nested: BTreeMap::new(),
        });
        self.index_mut(self.active)
            .nested
            .entry(ident.to_str())
            .or_default()
            .insert(idx);
    }

    /// Move the cursor down into the named child scope.
    pub fn enter_node(&mut self, ident: Atom) -> Result<(), BareResolveError> {
        self.active = self[self.active].find_node(ident)?;
        Ok(())
    }

    /// Move the cursor back up to the parent scope.
    pub fn exit_node(&mut self) {
        self.active = self[self.active]
            .parent
            .expect("attempted to exit the root scope");
    }

    /// Register a type symbol on the active node.
    ///
    /// Registering the same symbol twice is a user error; set-deduplicated
    /// inserts are reserved for imports.
    pub fn add_type_symbol(
        &mut self,
        ident: Atom,
        kind: SymbolKind,
        access: Access,
    ) -> Result<(), BareSemanticError> {
        let symbol = self.symbol(ident, kind, access);
        let node = self.index_mut(self.active);
        if !node.types.entry(ident.to_str()).or_default().insert(symbol) {
            return Err(BareSemanticError::DuplicateDeclaration { ident });
        }
        Ok(())
    }

    /// Register an expression symbol on the active node.
    pub fn add_expr_symbol(
        &mut self,
        ident: Atom,
        kind: SymbolKind,
        access: Access,
    ) -> Result<(), BareSemanticError> {
        let symbol = self.symbol(ident, kind, access);
        let node = self.index_mut(self.active);
        if !node.exprs.entry(ident.to_str()).or_default().insert(symbol) {
            return Err(BareSemanticError::DuplicateDeclaration { ident });
        }
        Ok(())
    }

    /// Register a constructor symbol on the active node, which must be the
    /// enum's scope.
    ///
    /// The symbol is additionally made visible in the scope enclosing the
    /// enum (keeping its full path), so that a constructor can be named
    /// without qualification next to its enum. Hoisted copies deduplicate
    /// like imports; two enums may contribute equally-named constructors and
    /// the ambiguity only surfaces at lookup time.
    pub fn add_ctor_symbol(
        &mut self,
        ident: Atom,
        access: Access,
    ) -> Result<(), BareSemanticError> {
        let symbol = self.symbol(ident, SymbolKind::Ctor, access);
        let parent = self[self.active].parent;
        let node = self.index_mut(self.active);
        if !node
            .exprs
            .entry(ident.to_str())
            .or_default()
            .insert(symbol.clone())
        {
            return Err(BareSemanticError::DuplicateDeclaration { ident });
        }
        if let Some(parent) = parent {
            self[parent]
                .exprs
                .entry(ident.to_str())
                .or_default()
                .insert(symbol);
        }
        Ok(())
    }

    /// Register a variable symbol on the active node.
    ///
    /// Unlike [`Self::add_expr_symbol`] this deduplicates silently: the same
    /// variable may legitimately be bound by every alternative of an
    /// or-pattern.
    pub fn add_var_symbol(&mut self, ident: Atom, access: Access) {
        let symbol = self.symbol(ident, SymbolKind::Var, access);
        let node = self.index_mut(self.active);
        node.exprs.entry(ident.to_str()).or_default().insert(symbol);
    }

    fn symbol(&self, ident: Atom, kind: SymbolKind, access: Access) -> Symbol {
        Symbol {
            access,
            kind,
            path: format!("{}.{}", self[self.active].path, ident),
        }
    }

    /// Resolve a type name.
    ///
    /// With an empty path, climb the ancestors of the active node until one
    /// has a type entry for the identifier. Otherwise find the nearest
    /// ancestor with a child named `ident`, descend along the path and look
    /// up its last segment.
    pub fn find_type_symbol(
        &self,
        ident: Atom,
        path: &[Atom],
    ) -> Result<Symbol, BareResolveError> {
        self.find(ident, path, Namespace::Type, TableNode::find_type_symbol)
    }

    /// Resolve an expression name. Same algorithm as [`Self::find_type_symbol`].
    pub fn find_expr_symbol(
        &self,
        ident: Atom,
        path: &[Atom],
    ) -> Result<Symbol, BareResolveError> {
        self.find(ident, path, Namespace::Expression, TableNode::find_expr_symbol)
    }

    fn find(
        &self,
        ident: Atom,
        path: &[Atom],
        namespace: Namespace,
        find_symbol: impl Fn(&TableNode, Atom) -> Result<Symbol, BareResolveError>,
    ) -> Result<Symbol, BareResolveError> {
        if path.is_empty() {
            let mut current = Some(self.active);
            while let Some(idx) = current {
                let node = &self[idx];
                match find_symbol(node, ident) {
                    Err(BareResolveError::SymbolNotFound { .. }) => current = node.parent,
                    result => return result,
                }
            }
            return Err(BareResolveError::SymbolNotFound { namespace, ident });
        }

        let mut current = self.nearest_ancestor_with_child(ident)?;
        let (last, rest) = path.split_last().expect("path is non-empty");
        for &seg in rest {
            current = self[current].find_node(seg)?;
        }
        find_symbol(&self[current], *last)
    }

    /// Climb from the active node to the nearest one with a child named
    /// `ident` and descend into that child.
    fn nearest_ancestor_with_child(&self, ident: Atom) -> Result<NodeIdx, BareResolveError> {
        let mut current = Some(self.active);
        while let Some(idx) = current {
            let node = &self[idx];
            if node.nested.contains_key(ident.to_str()) {
                return node.find_node(ident);
            }
            current = node.parent;
        }
        Err(BareResolveError::SymbolNotFound {
            namespace: Namespace::Node,
            ident,
        })
    }
}

impl std::ops::Index<NodeIdx> for Table {
    type Output = TableNode;

    fn index(&self, idx: NodeIdx) -> &Self::Output {
        &self.nodes[idx.0 as usize]
    }
}

impl std::ops::IndexMut<NodeIdx> for Table {
    fn index_mut(&mut self, idx: NodeIdx) -> &mut Self::Output {
        &mut self.nodes[idx.0 as usize]
    }
}

/// Staged entries collected while walking an import tree.
///
/// Copies are keyed by the full import path so that an alias can erase the
/// entry staged for the original name no matter in which order the leaves
/// were walked: erasures apply only after the entire tree has been staged.
#[derive(Default)]
struct Staging {
    types: BTreeMap<Vec<&'static str>, BTreeSet<Symbol>>,
    exprs: BTreeMap<Vec<&'static str>, BTreeSet<Symbol>>,
    nested: BTreeMap<Vec<&'static str>, BTreeSet<NodeIdx>>,
    erased: Vec<Vec<&'static str>>,
}

impl Table {
    /// Bring the entries named by an import into the active node.
    ///
    /// Only node imports act at the top level: the import's head is resolved
    /// by climbing from the active node, the remainder of the tree is staged
    /// and the staged entries are copied into the active node under their
    /// final path segment.
    pub fn import(&mut self, import: &ast::Import) -> Result<(), BareResolveError> {
        let ast::BareImport::Node(node_import) = &import.bare else {
            return Ok(());
        };

        let base = self.nearest_ancestor_with_child(node_import.binder)?;

        let mut staging = Staging::default();
        let mut path = vec![node_import.binder.to_str()];
        for nested in &node_import.nested {
            self.stage(base, nested, &mut path, &mut staging)?;
        }

        for path in staging.erased {
            staging.types.remove(&path);
            staging.exprs.remove(&path);
            staging.nested.remove(&path);
        }

        for (path, symbols) in staging.types {
            let local = path.last().expect("staged path is non-empty");
            self.index_mut(self.active)
                .types
                .entry(local)
                .or_default()
                .extend(symbols);
        }
        for (path, symbols) in staging.exprs {
            let local = path.last().expect("staged path is non-empty");
            self.index_mut(self.active)
                .exprs
                .entry(local)
                .or_default()
                .extend(symbols);
        }
        for (path, nodes) in staging.nested {
            let local = path.last().expect("staged path is non-empty");
            self.index_mut(self.active)
                .nested
                .entry(local)
                .or_default()
                .extend(nodes);
        }

        Ok(())
    }

    fn stage(
        &self,
        current: NodeIdx,
        import: &ast::Import,
        path: &mut Vec<&'static str>,
        staging: &mut Staging,
    ) -> Result<(), BareResolveError> {
        match &import.bare {
            ast::BareImport::Node(node_import) => {
                path.push(node_import.binder.to_str());
                if node_import.nested.is_empty() {
                    self.stage_entry(current, node_import.binder, path, staging);
                } else {
                    let next = self[current].find_node(node_import.binder)?;
                    for nested in &node_import.nested {
                        self.stage(next, nested, path, staging)?;
                    }
                }
                path.pop();
            }
            ast::BareImport::Alias(alias_import) => {
                if let Some(binder) = alias_import.binder {
                    path.push(binder.to_str());
                    self.stage_entry(current, alias_import.target, path, staging);
                    path.pop();
                }
                path.push(alias_import.target.to_str());
                staging.erased.push(path.clone());
                path.pop();
            }
            ast::BareImport::Wild => {
                let node = &self[current];
                for (&name, symbols) in &node.types {
                    path.push(name);
                    staging
                        .types
                        .entry(path.clone())
                        .or_default()
                        .extend(symbols.iter().cloned());
                    path.pop();
                }
                for (&name, symbols) in &node.exprs {
                    path.push(name);
                    staging
                        .exprs
                        .entry(path.clone())
                        .or_default()
                        .extend(symbols.iter().cloned());
                    path.pop();
                }
                for (&name, nodes) in &node.nested {
                    path.push(name);
                    staging
                        .nested
                        .entry(path.clone())
                        .or_default()
                        .extend(nodes.iter().copied());
                    path.pop();
                }
            }
        }
        Ok(())
    }

    /// Stage every entry of `current` stored under `target` at the given path.
    fn stage_entry(
        &self,
        current: NodeIdx,
        target: Atom,
        path: &[&'static str],
        staging: &mut Staging,
    ) {
        let node = &self[current];
        if let Some(symbols) = node.types.get(target.to_str()) {
            staging
                .types
                .entry(path.to_vec())
                .or_default()
                .extend(symbols.iter().cloned());
        }
        if let Some(symbols) = node.exprs.get(target.to_str()) {
            staging
                .exprs
                .entry(path.to_vec())
                .or_default()
                .extend(symbols.iter().cloned());
        }
        if let Some(nodes) = node.nested.get(target.to_str()) {
            staging
                .nested
                .entry(path.to_vec())
                .or_default()
                .extend(nodes.iter().copied());
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}

impl Table {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, idx: NodeIdx, level: usize) -> fmt::Result {
        let indent = "    ".repeat(level);
        let node = &self[idx];
        writeln!(f, "{indent}{} {}", node.kind.name(), node.ident)?;

        if !node.types.is_empty() {
            writeln!(f, "{indent}    types:")?;
            for (name, symbols) in &node.types {
                for symbol in symbols {
                    writeln!(f, "{indent}        {name}: {symbol}")?;
                }
            }
        }

        if !node.exprs.is_empty() {
            writeln!(f, "{indent}    exprs:")?;
            for (name, symbols) in &node.exprs {
                for symbol in symbols {
                    writeln!(f, "{indent}        {name}: {symbol}")?;
                }
            }
        }

        for nodes in node.nested.values() {
            for &child in nodes {
                // An import may alias a node into its own parent; only walk
                // children that genuinely hang below this one.
                if self[child].parent == Some(idx) {
                    self.fmt_node(f, child, level + 1)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.access.name(),
            self.kind.name(),
            self.path
        )
    }
}
