//! Multi-pass construction of the symbol table.
//!
//! The passes run in a fixed order: `build_constants` registers every
//! declared entity and creates the scope tree, `merge_symbols` performs the
//! imports, `build_variables` rewrites let-patterns and registers the
//! variables they bind, and a second `merge_symbols` propagates the
//! newly-visible variables through further imports. A constructor referenced
//! by a top-level pattern may come from an imported module, so the rewrite
//! pass must not run before the first merge.

use crate::error::{BareResolveError, BareSemanticError, Result};
use crate::table::{NodeKind, SymbolKind, Table};
use ast::{Access, BareDecl, BarePat, CtorPat, Decl, Pat};
use span::Spanning;
use utility::Atom;

pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new(package: &ast::Package) -> Self {
        Self {
            table: Table::new(package.ident.as_str()),
        }
    }

    /// Run all four passes over the package, which is rewritten in place.
    pub fn build(mut self, package: &mut ast::Package) -> Result<Table> {
        self.build_constants(&mut package.decls)?;
        self.merge_symbols(&mut package.decls)?;
        self.build_variables(&mut package.decls)?;
        self.merge_symbols(&mut package.decls)?;
        Ok(self.table)
    }

    fn visit<T>(
        &mut self,
        binder: Atom,
        decls: &mut [Decl],
        span: span::Span,
        visit: impl FnOnce(&mut Self, &mut [Decl]) -> Result<T>,
    ) -> Result<T> {
        self.table
            .enter_node(binder)
            .map_err(|error| error.at(span))?;
        let result = visit(self, decls);
        self.table.exit_node();
        result
    }

    fn build_constants(&mut self, decls: &mut [Decl]) -> Result<()> {
        for decl in decls {
            let access = decl.attributes.access;
            let span = decl.span();
            match &mut decl.bare {
                BareDecl::Module(module) => {
                    self.table.add_node(module.binder, NodeKind::Module);
                    self.visit(module.binder, &mut module.decls, span, |this, decls| {
                        this.build_constants(decls)
                    })?;
                }
                BareDecl::Class(class) => {
                    self.table
                        .add_type_symbol(class.binder, SymbolKind::Class, access)
                        .map_err(|error| error.at(span))?;
                    self.table.add_node(class.binder, NodeKind::Class);
                    self.visit(class.binder, &mut class.decls, span, |this, decls| {
                        this.build_constants(decls)
                    })?;
                }
                BareDecl::Enum(enum_) => {
                    self.table
                        .add_type_symbol(enum_.binder, SymbolKind::Enum, access)
                        .map_err(|error| error.at(span))?;
                    self.table.add_node(enum_.binder, NodeKind::Enum);
                    self.visit(enum_.binder, &mut enum_.decls, span, |this, decls| {
                        this.build_constants(decls)
                    })?;
                }
                BareDecl::Typealias(alias) => {
                    self.table
                        .add_type_symbol(alias.binder, SymbolKind::Typealias, access)
                        .map_err(|error| error.at(span))?;
                }
                BareDecl::Interface(interface) => {
                    self.table
                        .add_type_symbol(interface.binder, SymbolKind::Interface, access)
                        .map_err(|error| error.at(span))?;
                    self.table.add_node(interface.binder, NodeKind::Interface);
                    self.visit(interface.binder, &mut interface.decls, span, |this, decls| {
                        this.build_constants(decls)
                    })?;
                }
                BareDecl::Extension(extension) => {
                    let binder = Atom::from(format!("ext%{}", self.table.fresh_count()));
                    extension.binder = Some(binder);
                    self.table
                        .add_expr_symbol(binder, SymbolKind::Extension, access)
                        .map_err(|error| error.at(span))?;
                    self.table.add_node(binder, NodeKind::Extension);
                    self.visit(binder, &mut extension.decls, span, |this, decls| {
                        this.build_constants(decls)
                    })?;
                }
                BareDecl::Func(func) => {
                    self.table
                        .add_expr_symbol(func.binder, SymbolKind::Func, access)
                        .map_err(|error| error.at(span))?;
                }
                BareDecl::Init(init) => {
                    let binder = match init.binder {
                        Some(binder) => binder,
                        None => {
                            let binder =
                                Atom::from(format!("init%{}", self.table.fresh_count()));
                            init.binder = Some(binder);
                            binder
                        }
                    };
                    self.table
                        .add_expr_symbol(binder, SymbolKind::Init, access)
                        .map_err(|error| error.at(span))?;
                }
                BareDecl::Ctor(ctor) => {
                    self.table
                        .add_ctor_symbol(ctor.binder, access)
                        .map_err(|error| error.at(span))?;
                }
                BareDecl::Open(_) | BareDecl::Let(_) => {}
            }
        }
        Ok(())
    }

    fn merge_symbols(&mut self, decls: &mut [Decl]) -> Result<()> {
        for decl in decls {
            let span = decl.span();
            match &mut decl.bare {
                BareDecl::Module(module) => {
                    self.visit(module.binder, &mut module.decls, span, |this, decls| {
                        this.merge_symbols(decls)
                    })?;
                }
                BareDecl::Open(import) => {
                    let span = import.span;
                    self.table
                        .import(import)
                        .map_err(|error| error.at(span))?;
                }
                BareDecl::Class(class) => {
                    self.visit(class.binder, &mut class.decls, span, |this, decls| {
                        this.merge_symbols(decls)
                    })?;
                }
                BareDecl::Enum(enum_) => {
                    self.visit(enum_.binder, &mut enum_.decls, span, |this, decls| {
                        this.merge_symbols(decls)
                    })?;
                }
                BareDecl::Interface(interface) => {
                    self.visit(interface.binder, &mut interface.decls, span, |this, decls| {
                        this.merge_symbols(decls)
                    })?;
                }
                BareDecl::Extension(extension) => {
                    let binder = extension
                        .binder
                        .expect("extension identifier is synthesized before merging");
                    self.visit(binder, &mut extension.decls, span, |this, decls| {
                        this.merge_symbols(decls)
                    })?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn build_variables(&mut self, decls: &mut [Decl]) -> Result<()> {
        for decl in decls {
            let access = decl.attributes.access;
            let span = decl.span();
            match &mut decl.bare {
                BareDecl::Module(module) => {
                    self.visit(module.binder, &mut module.decls, span, |this, decls| {
                        this.build_variables(decls)
                    })?;
                }
                BareDecl::Class(class) => {
                    self.visit(class.binder, &mut class.decls, span, |this, decls| {
                        this.build_variables(decls)
                    })?;
                }
                BareDecl::Enum(enum_) => {
                    self.visit(enum_.binder, &mut enum_.decls, span, |this, decls| {
                        this.build_variables(decls)
                    })?;
                }
                BareDecl::Interface(interface) => {
                    self.visit(interface.binder, &mut interface.decls, span, |this, decls| {
                        this.build_variables(decls)
                    })?;
                }
                BareDecl::Extension(extension) => {
                    let binder = extension
                        .binder
                        .expect("extension identifier is synthesized before merging");
                    self.visit(binder, &mut extension.decls, span, |this, decls| {
                        this.build_variables(decls)
                    })?;
                }
                BareDecl::Let(let_) => {
                    self.table.pat_rewrite(&mut let_.pat)?;
                    self.table.pat_add_vars(&let_.pat, access)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Table {
    /// Rewrite every name pattern whose identifier resolves to a constructor
    /// symbol into a constructor pattern, in place.
    ///
    /// The lookup probe is the only place where a resolution failure is
    /// recovered from: an unresolvable name stays a binder.
    pub fn pat_rewrite(&mut self, pat: &mut Pat) -> Result<()> {
        let span = pat.span;
        match &mut pat.bare {
            BarePat::Tuple(elems) => {
                for elem in elems {
                    self.pat_rewrite(elem)?;
                }
            }
            BarePat::Ctor(ctor) => {
                if let Some(args) = &mut ctor.args {
                    for arg in args {
                        self.pat_rewrite(arg)?;
                    }
                }
            }
            BarePat::Name(name_pat) => {
                let (idents, rest) = name_pat.name.slice();
                if !rest.is_empty() {
                    return Err(
                        BareResolveError::InvalidPatternName(name_pat.name.clone()).at(span)
                    );
                }

                let symbol = self.find_expr_symbol(name_pat.name.ident, &idents).ok();

                match symbol {
                    Some(symbol) if symbol.kind() == SymbolKind::Ctor => {
                        if name_pat.mutable {
                            return Err(BareSemanticError::MutOnCtorPattern.at(span));
                        }
                        if !name_pat.hint.bare.is_meta() {
                            return Err(BareSemanticError::HintOnCtorPattern.at(span));
                        }
                        let name = name_pat.name.clone();
                        let ty_args = name_pat.ty_args.take();
                        pat.bare = CtorPat {
                            name,
                            ty_args,
                            args: None,
                        }
                        .into();
                    }
                    _ => {
                        if !(name_pat.name.path.is_empty() && name_pat.ty_args.is_none()) {
                            return Err(BareResolveError::InvalidPatternName(
                                name_pat.name.clone(),
                            )
                            .at(span));
                        }
                    }
                }
            }
            BarePat::Or(options) => {
                for option in options {
                    self.pat_rewrite(option)?;
                }
            }
            BarePat::At(at) => {
                self.pat_rewrite(&mut at.pat)?;
            }
            BarePat::Lit(_) | BarePat::Wild => {}
        }
        Ok(())
    }

    /// Register a variable symbol for every binder left in a rewritten pattern.
    pub fn pat_add_vars(&mut self, pat: &Pat, access: Access) -> Result<()> {
        match &pat.bare {
            BarePat::Tuple(elems) => {
                for elem in elems {
                    self.pat_add_vars(elem, access)?;
                }
            }
            BarePat::Ctor(ctor) => {
                if let Some(args) = &ctor.args {
                    for arg in args {
                        self.pat_add_vars(arg, access)?;
                    }
                }
            }
            BarePat::Name(name_pat) => {
                self.add_var_symbol(name_pat.name.ident, access);
            }
            BarePat::Or(options) => {
                for option in options {
                    self.pat_add_vars(option, access)?;
                }
            }
            BarePat::At(at) => {
                if !at.name.path.is_empty() {
                    return Err(
                        BareResolveError::InvalidPatternName(at.name.clone()).at(pat.span)
                    );
                }
                self.add_var_symbol(at.name.ident, access);
                self.pat_add_vars(&at.pat, access)?;
            }
            BarePat::Lit(_) | BarePat::Wild => {}
        }
        Ok(())
    }
}
