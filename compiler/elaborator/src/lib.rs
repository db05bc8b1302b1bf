//! The elaborator.
//!
//! A single forward pass translating the raw tree into the elaborated one,
//! driven by the symbol table. A stack of scopes tracks the type variables
//! declared at class, enum, interface, extension, typealias, function and
//! initializer boundaries and the expression variables bound by patterns;
//! scopes pop at block and function boundaries.

use hir::share;
use resolver::{BareResolveError, SymbolKind, Table};
use span::{Span, Spanning};
use utility::{Atom, HashMap, HashSet};

pub use resolver::{Error, Result};

#[cfg(test)]
mod test;

/// Elaborate a package against its table.
pub fn elaborate(table: Table, package: &ast::Package) -> Result<hir::Package> {
    Elaborator::new(table).elab(package)
}

pub struct Elaborator {
    table: Table,
    ctx: Context,
}

impl Elaborator {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            ctx: Context::default(),
        }
    }

    pub fn elab(mut self, package: &ast::Package) -> Result<hir::Package> {
        self.ctx.push_scope();
        let decls = package
            .decls
            .iter()
            .map(|decl| self.elab_decl(decl))
            .collect::<Result<_>>()?;
        self.ctx.pop_scope();

        Ok(hir::Package {
            ident: package.ident.clone(),
            header: package.header.clone(),
            decls,
            span: package.span,
        })
    }

    fn elab_decl(&mut self, decl: &ast::Decl) -> Result<hir::Decl> {
        let attributes = hir::DeclAttrs {
            attrs: self.elab_attrs(&decl.attributes.attrs)?,
            access: decl.attributes.access,
        };
        let span = decl.span();

        let bare = match &decl.bare {
            ast::BareDecl::Module(module) => {
                self.enter(module.binder, span)?;
                let decls = self.elab_decls(&module.decls);
                self.table.exit_node();
                hir::ModuleDecl {
                    binder: module.binder,
                    decls: decls?,
                }
                .into()
            }
            ast::BareDecl::Open(import) => hir::BareDecl::Open(import.clone()),
            ast::BareDecl::Class(class) => {
                self.enter(class.binder, span)?;
                let result = self.in_ty_scope(&class.ty_params, |this| {
                    Ok((this.elab_bounds(&class.bounds)?, this.elab_decls(&class.decls)?))
                });
                self.table.exit_node();
                let (bounds, decls) = result?;
                hir::ClassDecl {
                    binder: class.binder,
                    ty_params: class.ty_params.clone(),
                    bounds,
                    decls,
                }
                .into()
            }
            ast::BareDecl::Enum(enum_) => {
                self.enter(enum_.binder, span)?;
                let result = self.in_ty_scope(&enum_.ty_params, |this| {
                    Ok((this.elab_bounds(&enum_.bounds)?, this.elab_decls(&enum_.decls)?))
                });
                self.table.exit_node();
                let (bounds, decls) = result?;
                hir::EnumDecl {
                    binder: enum_.binder,
                    ty_params: enum_.ty_params.clone(),
                    bounds,
                    decls,
                }
                .into()
            }
            ast::BareDecl::Typealias(alias) => {
                let (bounds, hint, aliased) = self.in_ty_scope(&alias.ty_params, |this| {
                    Ok((
                        this.elab_bounds(&alias.bounds)?,
                        alias
                            .hint
                            .iter()
                            .map(|ty| this.elab_ty(ty))
                            .collect::<Result<_>>()?,
                        alias
                            .aliased
                            .as_ref()
                            .map(|ty| this.elab_ty(ty))
                            .transpose()?,
                    ))
                })?;
                hir::TypealiasDecl {
                    binder: alias.binder,
                    ty_params: alias.ty_params.clone(),
                    bounds,
                    hint,
                    aliased,
                }
                .into()
            }
            ast::BareDecl::Interface(interface) => {
                self.enter(interface.binder, span)?;
                let result = self.in_ty_scope(&interface.ty_params, |this| {
                    Ok((
                        this.elab_bounds(&interface.bounds)?,
                        this.elab_decls(&interface.decls)?,
                    ))
                });
                self.table.exit_node();
                let (bounds, decls) = result?;
                hir::InterfaceDecl {
                    binder: interface.binder,
                    ty_params: interface.ty_params.clone(),
                    bounds,
                    decls,
                }
                .into()
            }
            ast::BareDecl::Extension(extension) => {
                let binder = extension
                    .binder
                    .expect("extension identifier is synthesized before elaboration");
                self.enter(binder, span)?;
                let result = self.in_ty_scope(&extension.ty_params, |this| {
                    Ok((
                        this.elab_bounds(&extension.bounds)?,
                        this.elab_ty(&extension.base)?,
                        this.elab_ty(&extension.interface)?,
                        this.elab_decls(&extension.decls)?,
                    ))
                });
                self.table.exit_node();
                let (bounds, base, interface, decls) = result?;
                hir::ExtensionDecl {
                    binder,
                    ty_params: extension.ty_params.clone(),
                    bounds,
                    base,
                    interface,
                    decls,
                }
                .into()
            }
            ast::BareDecl::Let(let_) => {
                let body = let_
                    .body
                    .as_ref()
                    .map(|body| self.elab_expr(body))
                    .transpose()?;
                let pat = self.elab_pat(&let_.pat)?;
                hir::LetDecl { pat, body }.into()
            }
            ast::BareDecl::Func(func) => {
                let (bounds, params, output, body) =
                    self.in_ty_scope(&func.ty_params, |this| {
                        Ok((
                            this.elab_bounds(&func.bounds)?,
                            this.elab_pats(&func.params)?,
                            this.elab_ty(&func.output)?,
                            func.body
                                .as_ref()
                                .map(|body| this.elab_expr(body))
                                .transpose()?,
                        ))
                    })?;
                hir::FuncDecl {
                    binder: func.binder,
                    ty_params: func.ty_params.clone(),
                    bounds,
                    params,
                    output,
                    body,
                }
                .into()
            }
            ast::BareDecl::Init(init) => {
                let binder = init
                    .binder
                    .expect("initializer identifier is synthesized before elaboration");
                let (bounds, params, output, body) =
                    self.in_ty_scope(&init.ty_params, |this| {
                        Ok((
                            this.elab_bounds(&init.bounds)?,
                            this.elab_pats(&init.params)?,
                            this.elab_ty(&init.output)?,
                            init.body
                                .as_ref()
                                .map(|body| this.elab_expr(body))
                                .transpose()?,
                        ))
                    })?;
                hir::InitDecl {
                    binder,
                    ty_params: init.ty_params.clone(),
                    bounds,
                    params,
                    output,
                    body,
                }
                .into()
            }
            ast::BareDecl::Ctor(ctor) => {
                let params = ctor
                    .params
                    .as_ref()
                    .map(|params| params.iter().map(|ty| self.elab_ty(ty)).collect())
                    .transpose()?;
                hir::CtorDecl {
                    binder: ctor.binder,
                    params,
                }
                .into()
            }
        };

        Ok(hir::Decl::new(attributes, span, bare))
    }

    fn elab_decls(&mut self, decls: &[ast::Decl]) -> Result<Vec<hir::Decl>> {
        decls.iter().map(|decl| self.elab_decl(decl)).collect()
    }

    fn enter(&mut self, binder: Atom, span: Span) -> Result<()> {
        self.table.enter_node(binder).map_err(|error| error.at(span))
    }

    /// Run the given elaboration inside a fresh scope holding the type parameters.
    fn in_ty_scope<T>(
        &mut self,
        ty_params: &Option<Vec<Atom>>,
        elab: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.ctx.push_scope();
        if let Some(ty_params) = ty_params {
            for &param in ty_params {
                self.ctx.add_ty_var(param);
            }
        }
        let result = elab(self);
        self.ctx.pop_scope();
        result
    }

    fn elab_bounds(&mut self, bounds: &[ast::TyBound]) -> Result<Vec<hir::TyBound>> {
        bounds
            .iter()
            .map(|bound| {
                Ok(hir::TyBound {
                    ty: self.elab_ty(&bound.ty)?,
                    bounds: bound
                        .bounds
                        .iter()
                        .map(|ty| self.elab_ty(ty))
                        .collect::<Result<_>>()?,
                })
            })
            .collect()
    }

    fn elab_attrs(&mut self, attrs: &ast::Attrs) -> Result<hir::Attrs> {
        attrs.iter().map(|attr| self.elab_expr(attr)).collect()
    }

    fn elab_ty(&mut self, ty: &ast::Ty) -> Result<hir::Ty> {
        let span = ty.span;
        let bare = match &ty.bare {
            ast::BareTy::Meta => hir::BareTy::Meta,
            ast::BareTy::Int => hir::BareTy::Int,
            ast::BareTy::Bool => hir::BareTy::Bool,
            ast::BareTy::Char => hir::BareTy::Char,
            ast::BareTy::String => hir::BareTy::String,
            ast::BareTy::Unit => hir::BareTy::Unit,
            ast::BareTy::Name(name_ty) => {
                let (idents, rest) = name_ty.name.slice();
                if !rest.is_empty() {
                    return Err(
                        BareResolveError::InvalidType(name_ty.name.clone()).at(span)
                    );
                }

                if idents.is_empty()
                    && name_ty.args.is_none()
                    && self.ctx.has_ty_var(name_ty.name.ident)
                {
                    hir::BareTy::Var(name_ty.name.ident)
                } else {
                    let symbol = self
                        .table
                        .find_type_symbol(name_ty.name.ident, &idents)
                        .map_err(|error| error.at(span))?;
                    let args = self.elab_opt_tys(&name_ty.args)?;
                    let named = Box::new(hir::NamedTy {
                        ident: name_ty.name.ident,
                        args,
                    });
                    match symbol.kind() {
                        SymbolKind::Enum => hir::BareTy::Enum(named),
                        SymbolKind::Class => hir::BareTy::Class(named),
                        SymbolKind::Typealias => hir::BareTy::Typealias(named),
                        SymbolKind::Interface => hir::BareTy::Interface(named),
                        _ => {
                            return Err(BareResolveError::InvalidType(name_ty.name.clone())
                                .at(span))
                        }
                    }
                }
            }
            ast::BareTy::Tuple(elems) => hir::BareTy::Tuple(
                elems
                    .iter()
                    .map(|elem| self.elab_ty(elem))
                    .collect::<Result<_>>()?,
            ),
            ast::BareTy::Arrow(arrow) => hir::ArrowTy {
                inputs: arrow
                    .inputs
                    .iter()
                    .map(|input| self.elab_ty(input))
                    .collect::<Result<_>>()?,
                output: self.elab_ty(&arrow.output)?,
            }
            .into(),
        };
        Ok(share(span, bare))
    }

    fn elab_opt_tys(&mut self, tys: &Option<Vec<ast::Ty>>) -> Result<Option<Vec<hir::Ty>>> {
        tys.as_ref()
            .map(|tys| tys.iter().map(|ty| self.elab_ty(ty)).collect())
            .transpose()
    }

    /// Elaborate a pattern, registering the variables it binds in the current
    /// scope.
    ///
    /// The pattern is first put through the constructor rewrite so that bare
    /// names referring to visible constructors match structurally rather than
    /// bind. Patterns inside declarations have already been rewritten by the
    /// table builder; the rewrite is idempotent.
    fn elab_pat(&mut self, pat: &ast::Pat) -> Result<hir::Pat> {
        let mut pat = pat.clone();
        self.table.pat_rewrite(&mut pat)?;
        self.elab_rewritten_pat(&pat)
    }

    fn elab_pats(&mut self, pats: &[ast::Pat]) -> Result<Vec<hir::Pat>> {
        pats.iter().map(|pat| self.elab_pat(pat)).collect()
    }

    fn elab_rewritten_pat(&mut self, pat: &ast::Pat) -> Result<hir::Pat> {
        let span = pat.span;
        let bare = match &pat.bare {
            ast::BarePat::Lit(lit) => hir::BarePat::Lit(*lit),
            ast::BarePat::Tuple(elems) => hir::BarePat::Tuple(
                elems
                    .iter()
                    .map(|elem| self.elab_rewritten_pat(elem))
                    .collect::<Result<_>>()?,
            ),
            ast::BarePat::Ctor(ctor) => {
                let (idents, rest) = ctor.name.slice();
                if !rest.is_empty() {
                    return Err(
                        BareResolveError::InvalidPatternName(ctor.name.clone()).at(span)
                    );
                }
                let symbol = self
                    .table
                    .find_expr_symbol(ctor.name.ident, &idents)
                    .map_err(|error| error.at(span))?;
                if symbol.kind() != SymbolKind::Ctor {
                    return Err(
                        BareResolveError::InvalidPatternName(ctor.name.clone()).at(span)
                    );
                }
                let args = ctor
                    .args
                    .as_ref()
                    .map(|args| {
                        args.iter()
                            .map(|arg| self.elab_rewritten_pat(arg))
                            .collect()
                    })
                    .transpose()?;
                hir::CtorPat {
                    ident: Atom::from(symbol.path()),
                    ty_args: self.elab_opt_tys(&ctor.ty_args)?,
                    args,
                }
                .into()
            }
            ast::BarePat::Name(name_pat) => {
                let hint = self.elab_ty(&name_pat.hint)?;
                self.ctx.add_expr_var(name_pat.name.ident, hint.clone());
                hir::VarPat {
                    ident: name_pat.name.ident,
                    hint,
                    mutable: name_pat.mutable,
                }
                .into()
            }
            ast::BarePat::Wild => hir::BarePat::Wild,
            ast::BarePat::Or(options) => hir::BarePat::Or(
                options
                    .iter()
                    .map(|option| self.elab_rewritten_pat(option))
                    .collect::<Result<_>>()?,
            ),
            ast::BarePat::At(at) => {
                let hint = self.elab_ty(&at.hint)?;
                self.ctx.add_expr_var(at.name.ident, hint.clone());
                hir::AtPat {
                    ident: at.name.ident,
                    hint,
                    mutable: at.mutable,
                    pat: self.elab_rewritten_pat(&at.pat)?,
                }
                .into()
            }
        };
        Ok(share(span, bare))
    }

    fn elab_expr(&mut self, expr: &ast::Expr) -> Result<hir::Expr> {
        let span = expr.span;
        let bare = match &expr.bare {
            ast::BareExpr::Lit(lit) => hir::BareExpr::Lit(*lit),
            ast::BareExpr::Unary(unary) => {
                let base = self.elab_expr(&unary.expr)?;
                match &unary.op {
                    ast::UnaryOp::Pos => hir::UnaryExpr {
                        op: hir::UnaryOp::Pos,
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Neg => hir::UnaryExpr {
                        op: hir::UnaryOp::Neg,
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Not => hir::UnaryExpr {
                        op: hir::UnaryOp::Not,
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Addr => hir::UnaryExpr {
                        op: hir::UnaryOp::Addr,
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Deref => hir::UnaryExpr {
                        op: hir::UnaryOp::Deref,
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Try => hir::UnaryExpr {
                        op: hir::UnaryOp::Try,
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Index(indices) => hir::UnaryExpr {
                        op: hir::UnaryOp::Index(
                            indices
                                .iter()
                                .map(|index| self.elab_expr(index))
                                .collect::<Result<_>>()?,
                        ),
                        expr: base,
                    }
                    .into(),
                    ast::UnaryOp::Dot { path, ty_args } => {
                        return Ok(self.elab_selectors(base, path, ty_args, span)?);
                    }
                }
            }
            ast::BareExpr::Binary(binary) => hir::BinaryExpr {
                op: binary.op,
                lhs: self.elab_expr(&binary.lhs)?,
                rhs: self.elab_expr(&binary.rhs)?,
            }
            .into(),
            ast::BareExpr::Tuple(elems) => hir::BareExpr::Tuple(
                elems
                    .iter()
                    .map(|elem| self.elab_expr(elem))
                    .collect::<Result<_>>()?,
            ),
            ast::BareExpr::Hint(hint) => hir::HintExpr {
                expr: self.elab_expr(&hint.expr)?,
                ty: self.elab_ty(&hint.ty)?,
            }
            .into(),
            ast::BareExpr::Name(name) => {
                return self.elab_name_expr(&name.name, &name.ty_args, span)
            }
            ast::BareExpr::Hole => hir::BareExpr::Hole,
            ast::BareExpr::Lam(lam) => {
                self.ctx.push_scope();
                let params = self.elab_pats(&lam.params);
                let body = params
                    .and_then(|params| Ok((params, self.elab_expr(&lam.body)?)));
                self.ctx.pop_scope();
                let (params, body) = body?;
                hir::LamExpr { params, body }.into()
            }
            ast::BareExpr::App(app) => hir::AppExpr {
                callee: self.elab_expr(&app.callee)?,
                args: app
                    .args
                    .iter()
                    .map(|arg| self.elab_expr(arg))
                    .collect::<Result<_>>()?,
            }
            .into(),
            ast::BareExpr::Block(block) => return self.elab_block(block, span),
            ast::BareExpr::Ite(ite) => {
                let mut arms = Vec::with_capacity(ite.arms.len());
                for arm in &ite.arms {
                    arms.push(hir::IteArm {
                        cond: self.elab_cond(&arm.cond)?,
                        consequent: self.elab_expr(&arm.consequent)?,
                    });
                }
                let alternative = ite
                    .alternative
                    .as_ref()
                    .map(|alternative| self.elab_expr(alternative))
                    .transpose()?;
                hir::IteExpr { arms, alternative }.into()
            }
            ast::BareExpr::Switch(switch) => {
                let scrutinee = self.elab_expr(&switch.scrutinee)?;
                let clauses = switch
                    .clauses
                    .iter()
                    .map(|clause| self.elab_clause(clause))
                    .collect::<Result<_>>()?;
                hir::SwitchExpr { scrutinee, clauses }.into()
            }
            ast::BareExpr::For(for_) => {
                let iter = self.elab_expr(&for_.iter)?;
                let pat = self.elab_pat(&for_.pat)?;
                let body = self.elab_expr(&for_.body)?;
                hir::ForExpr { pat, iter, body }.into()
            }
            ast::BareExpr::While(while_) => hir::WhileExpr {
                cond: self.elab_cond(&while_.cond)?,
                body: self.elab_expr(&while_.body)?,
            }
            .into(),
            ast::BareExpr::Loop(loop_) => hir::LoopExpr {
                body: self.elab_expr(&loop_.body)?,
            }
            .into(),
            ast::BareExpr::Break => hir::BareExpr::Break,
            ast::BareExpr::Continue => hir::BareExpr::Continue,
            ast::BareExpr::Return(return_) => hir::ReturnExpr {
                value: return_
                    .value
                    .as_ref()
                    .map(|value| self.elab_expr(value))
                    .transpose()?,
            }
            .into(),
        };
        Ok(share(span, bare))
    }

    /// Resolve a name in expression position.
    ///
    /// A plain identifier resolves through the scope stack first and then the
    /// table; variable symbols become [variables](hir::BareExpr::Var), all
    /// other kinds become [constants](hir::ConstExpr) carrying the symbol's
    /// full path. A qualified name is resolved as a whole where possible;
    /// otherwise its head resolves alone and the remaining segments act as
    /// member selectors.
    fn elab_name_expr(
        &mut self,
        name: &ast::Name,
        ty_args: &Option<Vec<ast::Ty>>,
        span: Span,
    ) -> Result<hir::Expr> {
        let (idents, rest) = name.slice();

        if rest.is_empty() {
            if idents.is_empty() {
                return self.elab_head(name.ident, ty_args, span);
            }

            match self.table.find_expr_symbol(name.ident, &idents) {
                Ok(symbol) => {
                    let bare = if symbol.kind() == SymbolKind::Var {
                        hir::BareExpr::Var(*idents.last().expect("path is non-empty"))
                    } else {
                        hir::ConstExpr {
                            ident: Atom::from(symbol.path()),
                            ty_args: self.elab_opt_tys(ty_args)?,
                        }
                        .into()
                    };
                    return Ok(share(span, bare));
                }
                Err(BareResolveError::SymbolNotFound { .. }) => {}
                Err(error) => return Err(error.at(span)),
            }
        }

        // The name as a whole is not a symbol: resolve the head and treat the
        // path as member selectors on it.
        let base = self.elab_head(name.ident, &None, span)?;
        self.elab_selectors(base, &name.path, ty_args, span)
    }

    /// Resolve a bare identifier in expression position.
    fn elab_head(
        &mut self,
        ident: Atom,
        ty_args: &Option<Vec<ast::Ty>>,
        span: Span,
    ) -> Result<hir::Expr> {
        if ty_args.is_none() && self.ctx.find_expr_var(ident).is_some() {
            return Ok(share(span, hir::BareExpr::Var(ident)));
        }

        let symbol = self
            .table
            .find_expr_symbol(ident, &[])
            .map_err(|error| error.at(span))?;

        let bare = if symbol.kind() == SymbolKind::Var {
            hir::BareExpr::Var(ident)
        } else {
            hir::ConstExpr {
                ident: Atom::from(symbol.path()),
                ty_args: self.elab_opt_tys(ty_args)?,
            }
            .into()
        };
        Ok(share(span, bare))
    }

    /// Apply a selector path to a base expression: a leading run of integer
    /// segments projects, the remaining identifier segments form one field
    /// access carrying the type arguments.
    fn elab_selectors(
        &mut self,
        base: hir::Expr,
        segs: &[ast::Seg],
        ty_args: &Option<Vec<ast::Ty>>,
        span: Span,
    ) -> Result<hir::Expr> {
        let mut base = base;
        let mut segs = segs;

        while let [ast::Seg::Index(index), rest @ ..] = segs {
            base = share(
                span,
                hir::UnaryExpr {
                    op: hir::UnaryOp::Proj(*index),
                    expr: base,
                }
                .into(),
            );
            segs = rest;
        }

        let mut path = Vec::with_capacity(segs.len());
        for seg in segs {
            match seg {
                ast::Seg::Ident(ident) => path.push(*ident),
                ast::Seg::Index(_) => {
                    return Err(BareResolveError::InvalidSelector.at(span));
                }
            }
        }

        if path.is_empty() {
            if ty_args.is_some() {
                return Err(BareResolveError::InvalidSelector.at(span));
            }
            return Ok(base);
        }

        let ty_args = self.elab_opt_tys(ty_args)?;
        Ok(share(
            span,
            hir::UnaryExpr {
                op: hir::UnaryOp::Field { path, ty_args },
                expr: base,
            }
            .into(),
        ))
    }

    fn elab_block(&mut self, block: &ast::BlockExpr, span: Span) -> Result<hir::Expr> {
        self.ctx.push_scope();
        let result = (|| -> Result<hir::BlockExpr> {
            let stmts = block
                .stmts
                .iter()
                .map(|stmt| self.elab_stmt(stmt))
                .collect::<Result<_>>()?;
            let tail = block
                .tail
                .as_ref()
                .map(|tail| self.elab_expr(tail))
                .transpose()?;
            Ok(hir::BlockExpr { stmts, tail })
        })();
        self.ctx.pop_scope();
        Ok(share(span, result?.into()))
    }

    fn elab_cond(&mut self, cond: &ast::Cond) -> Result<hir::Cond> {
        let span = cond.span;
        let bare = match &cond.bare {
            ast::BareCond::Expr(expr) => hir::BareCond::Expr(self.elab_expr(expr)?),
            ast::BareCond::Let(let_) => {
                let expr = self.elab_expr(&let_.expr)?;
                let pat = self.elab_pat(&let_.pat)?;
                hir::LetCond { pat, expr }.into()
            }
        };
        Ok(share(span, bare))
    }

    fn elab_clause(&mut self, clause: &ast::Clause) -> Result<hir::Clause> {
        let span = clause.span;
        let bare = match &clause.bare {
            ast::BareClause::Case(case) => {
                let pat = self.elab_pat(&case.pat)?;
                let guard = case
                    .guard
                    .as_ref()
                    .map(|guard| self.elab_expr(guard))
                    .transpose()?;
                let body = self.elab_expr(&case.body)?;
                hir::CaseClause { pat, guard, body }.into()
            }
            ast::BareClause::Default(default) => hir::DefaultClause {
                body: self.elab_expr(&default.body)?,
            }
            .into(),
        };
        Ok(share(span, bare))
    }

    fn elab_stmt(&mut self, stmt: &ast::Stmt) -> Result<hir::Stmt> {
        let attrs = self.elab_attrs(&stmt.attributes)?;
        let span = stmt.span();

        let bare = match &stmt.bare {
            ast::BareStmt::Open(import) => hir::BareStmt::Open(import.clone()),
            ast::BareStmt::Let(let_) => {
                let body = self.elab_expr(&let_.body)?;
                let pat = self.elab_pat(&let_.pat)?;
                let alternative = let_
                    .alternative
                    .as_ref()
                    .map(|alternative| self.elab_expr(alternative))
                    .transpose()?;
                hir::LetStmt {
                    pat,
                    body,
                    alternative,
                }
                .into()
            }
            ast::BareStmt::Func(func) => {
                // Make the local function visible to its own body and to the
                // rest of the block.
                let output = self.elab_ty(&func.output)?;
                self.ctx.add_expr_var(func.binder, output.clone());

                self.ctx.push_scope();
                let result = (|| -> Result<(Vec<hir::Pat>, hir::Expr)> {
                    let params = self.elab_pats(&func.params)?;
                    let body = self.elab_expr(&func.body)?;
                    Ok((params, body))
                })();
                self.ctx.pop_scope();
                let (params, body) = result?;

                hir::FuncStmt {
                    binder: func.binder,
                    params,
                    output,
                    body,
                }
                .into()
            }
            ast::BareStmt::Bind(bind) => {
                let body = self.elab_expr(&bind.body)?;
                let pat = self.elab_pat(&bind.pat)?;
                hir::BindStmt { pat, body }.into()
            }
            ast::BareStmt::Expr(expr) => hir::ExprStmt {
                expr: self.elab_expr(&expr.expr)?,
                value: expr.value,
            }
            .into(),
        };

        Ok(hir::Stmt::new(attrs, span, bare))
    }
}

/// A stack of elaboration scopes.
#[derive(Default)]
struct Context {
    scopes: Vec<Scope>,
}

/// The names bound between two scope boundaries.
#[derive(Default)]
struct Scope {
    ty_vars: HashSet<Atom>,
    expr_vars: HashMap<Atom, hir::Ty>,
}

impl Context {
    fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop().expect("no scope to pop");
    }

    fn add_ty_var(&mut self, ident: Atom) {
        self.scopes
            .last_mut()
            .expect("no scope to add a type variable to")
            .ty_vars
            .insert(ident);
    }

    fn add_expr_var(&mut self, ident: Atom, ty: hir::Ty) {
        self.scopes
            .last_mut()
            .expect("no scope to add a variable to")
            .expr_vars
            .insert(ident, ty);
    }

    fn has_ty_var(&self, ident: Atom) -> bool {
        self.scopes.iter().any(|scope| scope.ty_vars.contains(&ident))
    }

    fn find_expr_var(&self, ident: Atom) -> Option<hir::Ty> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.expr_vars.get(&ident).cloned())
    }
}
