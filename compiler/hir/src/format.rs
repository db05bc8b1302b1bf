//! Textual rendering of the elaborated tree.

use crate::{
    AppExpr, BareClause, BareCond, BareDecl, BareExpr, BarePat, BareStmt, BareTy, BlockExpr,
    Clause, Cond, Decl, Expr, IteExpr, NamedTy, Package, Stmt, Ty, TyBound, UnaryOp,
};
use ast::{AssignMode, BinOp};
use std::fmt;

const INDENT: &str = "    ";

fn indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn fmt_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    separator: &str,
    mut fmt_item: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        fmt_item(f, item)?;
    }
    Ok(())
}

fn fmt_ty_args(f: &mut fmt::Formatter<'_>, args: &Option<Vec<Ty>>) -> fmt::Result {
    if let Some(args) = args {
        if !args.is_empty() {
            f.write_str("<")?;
            fmt_list(f, args, ", ", |f, arg| write!(f, "{arg}"))?;
            f.write_str(">")?;
        }
    }
    Ok(())
}

fn fmt_named_ty(f: &mut fmt::Formatter<'_>, ty: &NamedTy) -> fmt::Result {
    write!(f, "{}", ty.ident)?;
    fmt_ty_args(f, &ty.args)
}

impl fmt::Display for BareTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meta => f.write_str("_"),
            Self::Int => f.write_str("Int"),
            Self::Bool => f.write_str("Bool"),
            Self::Char => f.write_str("Char"),
            Self::String => f.write_str("String"),
            Self::Unit => f.write_str("()"),
            Self::Var(ident) => write!(f, "{ident}"),
            Self::Enum(ty) | Self::Class(ty) | Self::Typealias(ty) | Self::Interface(ty) => {
                fmt_named_ty(f, ty)
            }
            Self::Tuple(elems) => {
                f.write_str("(")?;
                fmt_list(f, elems, ", ", |f, elem| write!(f, "{elem}"))?;
                f.write_str(")")
            }
            Self::Arrow(ty) => {
                if let [input] = &*ty.inputs {
                    write!(f, "{input}")?;
                } else {
                    f.write_str("(")?;
                    fmt_list(f, &ty.inputs, ", ", |f, input| write!(f, "{input}"))?;
                    f.write_str(")")?;
                }
                write!(f, " -> {}", ty.output)
            }
        }
    }
}

impl fmt::Display for BarePat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lit(lit) => write!(f, "{lit}"),
            Self::Tuple(elems) => {
                f.write_str("(")?;
                fmt_list(f, elems, ", ", |f, elem| write!(f, "{elem}"))?;
                f.write_str(")")
            }
            Self::Ctor(pat) => {
                write!(f, "{}", pat.ident)?;
                fmt_ty_args(f, &pat.ty_args)?;
                if let Some(args) = &pat.args {
                    f.write_str("(")?;
                    fmt_list(f, args, ", ", |f, arg| write!(f, "{arg}"))?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Var(pat) => {
                if pat.mutable {
                    f.write_str("mut ")?;
                }
                write!(f, "%{}", pat.ident)?;
                if !pat.hint.bare.is_meta() {
                    write!(f, ": {}", pat.hint)?;
                }
                Ok(())
            }
            Self::Wild => f.write_str("_"),
            Self::Or(options) => fmt_list(f, options, " | ", |f, option| write!(f, "{option}")),
            Self::At(pat) => {
                if pat.mutable {
                    f.write_str("mut ")?;
                }
                write!(f, "{}", pat.ident)?;
                if !pat.hint.bare.is_meta() {
                    write!(f, ": {}", pat.hint)?;
                }
                write!(f, " @ {}", pat.pat)
            }
        }
    }
}

fn fmt_cond(f: &mut fmt::Formatter<'_>, cond: &Cond, level: usize) -> fmt::Result {
    match &cond.bare {
        BareCond::Expr(expr) => fmt_expr(f, &expr.bare, level),
        BareCond::Let(cond) => {
            write!(f, "let {} = ", cond.pat)?;
            fmt_expr(f, &cond.expr.bare, level)
        }
    }
}

fn fmt_clause(f: &mut fmt::Formatter<'_>, clause: &Clause, level: usize) -> fmt::Result {
    indent(f, level)?;
    match &clause.bare {
        BareClause::Case(clause) => {
            write!(f, "case {}", clause.pat)?;
            if let Some(guard) = &clause.guard {
                f.write_str(" if ")?;
                fmt_expr(f, &guard.bare, level)?;
            }
            f.write_str(": ")?;
            fmt_expr(f, &clause.body.bare, level)
        }
        BareClause::Default(clause) => {
            f.write_str("default: ")?;
            fmt_expr(f, &clause.body.bare, level)
        }
    }
}

fn fmt_block(f: &mut fmt::Formatter<'_>, block: &BlockExpr, level: usize) -> fmt::Result {
    if block.stmts.is_empty() && block.tail.is_none() {
        return f.write_str("{}");
    }
    f.write_str("{\n")?;
    for stmt in &block.stmts {
        fmt_stmt(f, stmt, level + 1)?;
        f.write_str("\n")?;
    }
    if let Some(tail) = &block.tail {
        indent(f, level + 1)?;
        fmt_expr(f, &tail.bare, level + 1)?;
        f.write_str("\n")?;
    }
    indent(f, level)?;
    f.write_str("}")
}

fn fmt_ite(f: &mut fmt::Formatter<'_>, ite: &IteExpr, level: usize) -> fmt::Result {
    for (index, arm) in ite.arms.iter().enumerate() {
        if index > 0 {
            f.write_str(" else ")?;
        }
        f.write_str("if ")?;
        fmt_cond(f, &arm.cond, level)?;
        f.write_str(" ")?;
        fmt_expr(f, &arm.consequent.bare, level)?;
    }
    if let Some(alternative) = &ite.alternative {
        f.write_str(" else ")?;
        fmt_expr(f, &alternative.bare, level)?;
    }
    Ok(())
}

fn fmt_app(f: &mut fmt::Formatter<'_>, app: &AppExpr, level: usize) -> fmt::Result {
    fmt_expr(f, &app.callee.bare, level)?;
    f.write_str("(")?;
    fmt_list(f, &app.args, ", ", |f, arg| fmt_expr(f, &arg.bare, level))?;
    f.write_str(")")
}

fn fmt_expr(f: &mut fmt::Formatter<'_>, expr: &BareExpr, level: usize) -> fmt::Result {
    match expr {
        BareExpr::Lit(lit) => write!(f, "{lit}"),
        BareExpr::Unary(unary) => {
            match &unary.op {
                UnaryOp::Pos => f.write_str("+")?,
                UnaryOp::Neg => f.write_str("-")?,
                UnaryOp::Not => f.write_str("!")?,
                UnaryOp::Addr => f.write_str("&")?,
                UnaryOp::Deref => f.write_str("*")?,
                UnaryOp::Try | UnaryOp::Index(_) | UnaryOp::Field { .. } | UnaryOp::Proj(_) => {}
            }
            fmt_expr(f, &unary.expr.bare, level)?;
            match &unary.op {
                UnaryOp::Try => f.write_str("?"),
                UnaryOp::Index(indices) => {
                    f.write_str("[")?;
                    fmt_list(f, indices, ", ", |f, index| fmt_expr(f, &index.bare, level))?;
                    f.write_str("]")
                }
                UnaryOp::Field { path, ty_args } => {
                    for ident in path {
                        write!(f, ".{ident}")?;
                    }
                    fmt_ty_args(f, ty_args)
                }
                UnaryOp::Proj(index) => write!(f, ".{index}"),
                _ => Ok(()),
            }
        }
        BareExpr::Binary(binary) => {
            fmt_expr(f, &binary.lhs.bare, level)?;
            let op = match binary.op {
                BinOp::Add => " + ",
                BinOp::Sub => " - ",
                BinOp::Mul => " * ",
                BinOp::Div => " / ",
                BinOp::Mod => " % ",
                BinOp::And => " && ",
                BinOp::Or => " || ",
                BinOp::Eq => " == ",
                BinOp::Neq => " != ",
                BinOp::Lt => " < ",
                BinOp::Gt => " > ",
                BinOp::Lte => " <= ",
                BinOp::Gte => " >= ",
                BinOp::Assign(AssignMode::Plain) => " = ",
                BinOp::Assign(AssignMode::Add) => " += ",
                BinOp::Assign(AssignMode::Sub) => " -= ",
                BinOp::Assign(AssignMode::Mul) => " *= ",
                BinOp::Assign(AssignMode::Div) => " /= ",
                BinOp::Assign(AssignMode::Mod) => " %= ",
            };
            f.write_str(op)?;
            fmt_expr(f, &binary.rhs.bare, level)
        }
        BareExpr::Tuple(elems) => {
            f.write_str("(")?;
            fmt_list(f, elems, ", ", |f, elem| fmt_expr(f, &elem.bare, level))?;
            f.write_str(")")
        }
        BareExpr::Hint(hint) => {
            f.write_str("(")?;
            fmt_expr(f, &hint.expr.bare, level)?;
            write!(f, ": {})", hint.ty)
        }
        BareExpr::Const(constant) => {
            write!(f, "{}", constant.ident)?;
            fmt_ty_args(f, &constant.ty_args)
        }
        BareExpr::Var(ident) => write!(f, "{ident}"),
        BareExpr::Hole => f.write_str("_"),
        BareExpr::Lam(lam) => {
            if let [param] = &*lam.params {
                write!(f, "{param}")?;
            } else {
                f.write_str("(")?;
                fmt_list(f, &lam.params, ", ", |f, param| write!(f, "{param}"))?;
                f.write_str(")")?;
            }
            f.write_str(" => ")?;
            fmt_expr(f, &lam.body.bare, level)
        }
        BareExpr::App(app) => fmt_app(f, app, level),
        BareExpr::Block(block) => fmt_block(f, block, level),
        BareExpr::Ite(ite) => fmt_ite(f, ite, level),
        BareExpr::Switch(switch) => {
            f.write_str("switch ")?;
            fmt_expr(f, &switch.scrutinee.bare, level)?;
            f.write_str(" {\n")?;
            for clause in &switch.clauses {
                fmt_clause(f, clause, level + 1)?;
                f.write_str("\n")?;
            }
            indent(f, level)?;
            f.write_str("}")
        }
        BareExpr::For(for_) => {
            write!(f, "for {} in ", for_.pat)?;
            fmt_expr(f, &for_.iter.bare, level)?;
            f.write_str(" ")?;
            fmt_expr(f, &for_.body.bare, level)
        }
        BareExpr::While(while_) => {
            f.write_str("while ")?;
            fmt_cond(f, &while_.cond, level)?;
            f.write_str(" ")?;
            fmt_expr(f, &while_.body.bare, level)
        }
        BareExpr::Loop(loop_) => {
            f.write_str("loop ")?;
            fmt_expr(f, &loop_.body.bare, level)
        }
        BareExpr::Break => f.write_str("break"),
        BareExpr::Continue => f.write_str("continue"),
        BareExpr::Return(return_) => {
            f.write_str("return")?;
            if let Some(value) = &return_.value {
                f.write_str(" ")?;
                fmt_expr(f, &value.bare, level)?;
            }
            Ok(())
        }
    }
}

fn fmt_attrs<'a>(
    f: &mut fmt::Formatter<'_>,
    attrs: impl IntoIterator<Item = &'a Expr>,
    level: usize,
) -> fmt::Result {
    for attr in attrs {
        f.write_str("@")?;
        fmt_expr(f, &attr.bare, level)?;
        f.write_str("\n")?;
        indent(f, level)?;
    }
    Ok(())
}

fn fmt_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, level: usize) -> fmt::Result {
    indent(f, level)?;
    fmt_attrs(f, &stmt.attributes, level)?;

    match &stmt.bare {
        BareStmt::Open(import) => write!(f, "open {import};"),
        BareStmt::Let(let_) => {
            write!(f, "let {} = ", let_.pat)?;
            fmt_expr(f, &let_.body.bare, level)?;
            if let Some(alternative) = &let_.alternative {
                f.write_str(" else ")?;
                fmt_expr(f, &alternative.bare, level)?;
            }
            f.write_str(";")
        }
        BareStmt::Func(func) => {
            write!(f, "func {}(", func.binder)?;
            fmt_list(f, &func.params, ", ", |f, param| write!(f, "{param}"))?;
            f.write_str(")")?;
            if !func.output.bare.is_meta() {
                write!(f, " -> {}", func.output)?;
            }
            f.write_str(" ")?;
            fmt_expr(f, &func.body.bare, level)
        }
        BareStmt::Bind(bind) => {
            write!(f, "let {} <- ", bind.pat)?;
            fmt_expr(f, &bind.body.bare, level)?;
            f.write_str(";")
        }
        BareStmt::Expr(expr) => {
            fmt_expr(f, &expr.expr.bare, level)?;
            if !expr.value {
                f.write_str(";")?;
            }
            Ok(())
        }
    }
}

fn fmt_ty_params(
    f: &mut fmt::Formatter<'_>,
    ty_params: &Option<Vec<utility::Atom>>,
) -> fmt::Result {
    if let Some(ty_params) = ty_params {
        if !ty_params.is_empty() {
            f.write_str("<")?;
            fmt_list(f, ty_params, ", ", |f, param| write!(f, "{param}"))?;
            f.write_str(">")?;
        }
    }
    Ok(())
}

fn fmt_bounds(f: &mut fmt::Formatter<'_>, bounds: &[TyBound]) -> fmt::Result {
    if bounds.is_empty() {
        return Ok(());
    }
    f.write_str(" where ")?;
    fmt_list(f, bounds, ", ", |f, bound| {
        write!(f, "{}", bound.ty)?;
        if !bound.bounds.is_empty() {
            f.write_str(": ")?;
            fmt_list(f, &bound.bounds, " + ", |f, ty| write!(f, "{ty}"))?;
        }
        Ok(())
    })
}

fn fmt_decl_body(f: &mut fmt::Formatter<'_>, decls: &[Decl], level: usize) -> fmt::Result {
    f.write_str(" {\n")?;
    for decl in decls {
        fmt_decl(f, decl, level + 1)?;
        f.write_str("\n")?;
    }
    indent(f, level)?;
    f.write_str("}")
}

fn fmt_decl(f: &mut fmt::Formatter<'_>, decl: &Decl, level: usize) -> fmt::Result {
    indent(f, level)?;
    fmt_attrs(f, &decl.attributes.attrs, level)?;

    let access = decl.attributes.access;
    if access != ast::Access::Public {
        write!(f, "{} ", access.name())?;
    }

    match &decl.bare {
        BareDecl::Module(module) => {
            write!(f, "module {}", module.binder)?;
            fmt_decl_body(f, &module.decls, level)
        }
        BareDecl::Open(import) => write!(f, "open {import};"),
        BareDecl::Class(class) => {
            write!(f, "class {}", class.binder)?;
            fmt_ty_params(f, &class.ty_params)?;
            fmt_bounds(f, &class.bounds)?;
            fmt_decl_body(f, &class.decls, level)
        }
        BareDecl::Enum(enum_) => {
            write!(f, "enum {}", enum_.binder)?;
            fmt_ty_params(f, &enum_.ty_params)?;
            fmt_bounds(f, &enum_.bounds)?;
            fmt_decl_body(f, &enum_.decls, level)
        }
        BareDecl::Typealias(alias) => {
            write!(f, "type {}", alias.binder)?;
            fmt_ty_params(f, &alias.ty_params)?;
            if !alias.hint.is_empty() {
                f.write_str(": ")?;
                fmt_list(f, &alias.hint, " + ", |f, ty| write!(f, "{ty}"))?;
            }
            fmt_bounds(f, &alias.bounds)?;
            if let Some(aliased) = &alias.aliased {
                write!(f, " = {aliased}")?;
            }
            f.write_str(";")
        }
        BareDecl::Interface(interface) => {
            write!(f, "interface {}", interface.binder)?;
            fmt_ty_params(f, &interface.ty_params)?;
            fmt_bounds(f, &interface.bounds)?;
            fmt_decl_body(f, &interface.decls, level)
        }
        BareDecl::Extension(extension) => {
            f.write_str("extension")?;
            fmt_ty_params(f, &extension.ty_params)?;
            write!(f, " {}", extension.binder)?;
            write!(f, " {}: {}", extension.base, extension.interface)?;
            fmt_bounds(f, &extension.bounds)?;
            fmt_decl_body(f, &extension.decls, level)
        }
        BareDecl::Let(let_) => {
            write!(f, "let {}", let_.pat)?;
            if let Some(body) = &let_.body {
                f.write_str(" = ")?;
                fmt_expr(f, &body.bare, level)?;
            }
            f.write_str(";")
        }
        BareDecl::Func(func) => {
            write!(f, "func {}", func.binder)?;
            fmt_ty_params(f, &func.ty_params)?;
            f.write_str("(")?;
            fmt_list(f, &func.params, ", ", |f, param| write!(f, "{param}"))?;
            f.write_str(")")?;
            if !func.output.bare.is_meta() {
                write!(f, " -> {}", func.output)?;
            }
            fmt_bounds(f, &func.bounds)?;
            match &func.body {
                Some(body) => {
                    f.write_str(" ")?;
                    fmt_expr(f, &body.bare, level)
                }
                None => f.write_str(";"),
            }
        }
        BareDecl::Init(init) => {
            write!(f, "init {}", init.binder)?;
            fmt_ty_params(f, &init.ty_params)?;
            f.write_str("(")?;
            fmt_list(f, &init.params, ", ", |f, param| write!(f, "{param}"))?;
            f.write_str(")")?;
            if !init.output.bare.is_meta() {
                write!(f, " -> {}", init.output)?;
            }
            fmt_bounds(f, &init.bounds)?;
            match &init.body {
                Some(body) => {
                    f.write_str(" ")?;
                    fmt_expr(f, &body.bare, level)
                }
                None => f.write_str(";"),
            }
        }
        BareDecl::Ctor(ctor) => {
            write!(f, "case {}", ctor.binder)?;
            if let Some(params) = &ctor.params {
                if !params.is_empty() {
                    f.write_str("(")?;
                    fmt_list(f, params, ", ", |f, param| write!(f, "{param}"))?;
                    f.write_str(")")?;
                }
            }
            Ok(())
        }
    }
}

impl fmt::Display for BareExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(f, self, 0)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "package \"{}\" {{", self.ident)?;
        for import in &self.header {
            writeln!(f, "import {import};")?;
        }
        for decl in &self.decls {
            fmt_decl(f, decl, 0)?;
            f.write_str("\n")?;
        }
        f.write_str("}")
    }
}
