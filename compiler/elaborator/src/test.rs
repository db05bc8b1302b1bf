//! End-to-end elaboration tests: parse, build the table, elaborate.

use crate::{elaborate, Error};
use resolver::{BareResolveError, TableBuilder};
use utility::Atom;

fn atom(name: &str) -> Atom {
    Atom::from(name)
}

fn elab(source: &str) -> hir::Package {
    try_elab(source).expect("the test input should elaborate")
}

fn elab_err(source: &str) -> Error {
    try_elab(source).expect_err("the test input should not elaborate")
}

fn try_elab(source: &str) -> Result<hir::Package, Error> {
    let mut package = parser::parse_package("root", source.to_owned())
        .expect("the test input should parse");
    let table = TableBuilder::new(&package).build(&mut package)?;
    elaborate(table, &package)
}

/// The trailing value of the body of the last function declared in the package.
fn last_func_tail(package: &hir::Package) -> hir::Expr {
    let func = package
        .decls
        .iter()
        .rev()
        .find_map(|decl| decl.bare.func())
        .expect("expected a function declaration");
    let body = func.body.as_ref().expect("expected a function body");
    let hir::BareExpr::Block(block) = &body.bare else {
        panic!("expected a block body");
    };
    block.tail.clone().expect("expected a trailing value")
}

#[test]
fn constructor_application_resolves_to_its_full_path() {
    let package = elab("enum Option<T> { case None case Some(T) }\nlet x = Some(1);");

    let hir::BareDecl::Let(let_) = &package.decls[1].bare else {
        panic!("expected a let declaration");
    };

    assert!(matches!(
        &let_.pat.bare,
        hir::BarePat::Var(var) if var.ident == atom("x")
    ));

    let body = let_.body.as_ref().expect("expected an initializer");
    let hir::BareExpr::App(app) = &body.bare else {
        panic!("expected an application");
    };
    let hir::BareExpr::Const(constant) = &app.callee.bare else {
        panic!("expected a constant callee");
    };
    assert_eq!(constant.ident, atom("root.Option.Some"));
    assert!(matches!(
        &app.args[0].bare,
        hir::BareExpr::Lit(lit) if lit.bare == hir::BareLit::Num(1)
    ));
}

#[test]
fn selector_path_splits_into_projection_and_field() {
    let package = elab("func f<T>(p) { p.0.field<T> }");

    let tail = last_func_tail(&package);
    let hir::BareExpr::Unary(field) = &tail.bare else {
        panic!("expected a field access");
    };
    let hir::UnaryOp::Field { path, ty_args } = &field.op else {
        panic!("expected a field operator");
    };
    assert_eq!(path.as_slice(), [atom("field")]);
    let ty_args = ty_args.as_ref().expect("expected type arguments");
    assert!(matches!(&ty_args[0].bare, hir::BareTy::Var(ident) if *ident == atom("T")));

    let hir::BareExpr::Unary(proj) = &field.expr.bare else {
        panic!("expected a projection under the field access");
    };
    assert!(matches!(proj.op, hir::UnaryOp::Proj(0)));
    assert!(matches!(&proj.expr.bare, hir::BareExpr::Var(ident) if *ident == atom("p")));
}

#[test]
fn projection_after_field_is_invalid() {
    let error = elab_err("func f(p) { p.field.0 }");
    assert!(matches!(
        error,
        Error::Resolve(error) if error.bare == BareResolveError::InvalidSelector
    ));
}

#[test]
fn variables_and_constants_are_distinguished() {
    let package = elab("func helper() { 0 }\nlet a = 1;\nfunc g(x) { (helper(), a, x) }");

    let tail = last_func_tail(&package);
    let hir::BareExpr::Tuple(elems) = &tail.bare else {
        panic!("expected a tuple");
    };

    let hir::BareExpr::App(app) = &elems[0].bare else {
        panic!("expected a call");
    };
    assert!(matches!(
        &app.callee.bare,
        hir::BareExpr::Const(constant) if constant.ident == atom("root.helper")
    ));
    assert!(matches!(&elems[1].bare, hir::BareExpr::Var(ident) if *ident == atom("a")));
    assert!(matches!(&elems[2].bare, hir::BareExpr::Var(ident) if *ident == atom("x")));
}

#[test]
fn bound_type_parameters_become_type_variables() {
    let package = elab("enum E { }\nclass C<T> { func f(x: T, y: E) { 0 } }");

    let hir::BareDecl::Class(class) = &package.decls[1].bare else {
        panic!("expected a class declaration");
    };
    let hir::BareDecl::Func(func) = &class.decls[0].bare else {
        panic!("expected a function declaration");
    };

    let hir::BarePat::Var(x) = &func.params[0].bare else {
        panic!("expected a variable pattern");
    };
    assert!(matches!(&x.hint.bare, hir::BareTy::Var(ident) if *ident == atom("T")));

    let hir::BarePat::Var(y) = &func.params[1].bare else {
        panic!("expected a variable pattern");
    };
    assert!(matches!(
        &y.hint.bare,
        hir::BareTy::Enum(named) if named.ident == atom("E")
    ));
}

#[test]
fn interface_and_alias_types_resolve_by_kind() {
    let package = elab(
        "interface I { }\ntype A = Int;\nclass C { }\nfunc f(x: I, y: A, z: C) { 0 }",
    );

    let hir::BareDecl::Func(func) = &package.decls[3].bare else {
        panic!("expected a function declaration");
    };
    let hints: Vec<_> = func
        .params
        .iter()
        .map(|param| match &param.bare {
            hir::BarePat::Var(var) => var.hint.clone(),
            _ => panic!("expected a variable pattern"),
        })
        .collect();

    assert!(matches!(&hints[0].bare, hir::BareTy::Interface(_)));
    assert!(matches!(&hints[1].bare, hir::BareTy::Typealias(_)));
    assert!(matches!(&hints[2].bare, hir::BareTy::Class(_)));
}

#[test]
fn a_function_is_not_a_type() {
    let error = elab_err("func g() { 0 }\nfunc f(x: g) { 0 }");
    assert!(matches!(
        error,
        Error::Resolve(error)
            if matches!(error.bare, BareResolveError::SymbolNotFound { .. })
    ));
}

#[test]
fn switch_patterns_go_through_the_constructor_rewrite() {
    let package = elab(
        "enum E { case A case B }\nfunc f(x) { switch x { case A: 1; default: 0; } }",
    );

    let tail = last_func_tail(&package);
    let hir::BareExpr::Switch(switch) = &tail.bare else {
        panic!("expected a switch");
    };
    let hir::BareClause::Case(clause) = &switch.clauses[0].bare else {
        panic!("expected a case clause");
    };
    let hir::BarePat::Ctor(ctor) = &clause.pat.bare else {
        panic!("expected the bare name to match the constructor, not bind");
    };
    assert_eq!(ctor.ident, atom("root.E.A"));
}

#[test]
fn imported_constants_resolve_through_the_alias() {
    let package = elab(
        "module M { func helper() { 0 } }\nmodule N { open M.{helper as h}; func g() { h() } }",
    );

    let hir::BareDecl::Module(n) = &package.decls[1].bare else {
        panic!("expected a module declaration");
    };
    let hir::BareDecl::Func(g) = &n.decls[1].bare else {
        panic!("expected a function declaration");
    };
    let body = g.body.as_ref().unwrap();
    let hir::BareExpr::Block(block) = &body.bare else {
        panic!("expected a block");
    };
    let tail = block.tail.as_ref().unwrap();
    let hir::BareExpr::App(app) = &tail.bare else {
        panic!("expected a call");
    };
    assert!(matches!(
        &app.callee.bare,
        hir::BareExpr::Const(constant) if constant.ident == atom("root.M.helper")
    ));
}

#[test]
fn block_scopes_nest_and_pop() {
    // The variable bound inside the block does not leak into the tail of the
    // outer block, which falls back to the module-level constant.
    let package = elab("func f() { { let helper = 1; helper; }; helper() }\nfunc helper() { 0 }");

    let hir::BareDecl::Func(f) = &package.decls[0].bare else {
        panic!("expected a function declaration");
    };
    let body = f.body.as_ref().unwrap();
    let hir::BareExpr::Block(outer) = &body.bare else {
        panic!("expected a block");
    };
    let tail = outer.tail.as_ref().unwrap();
    let hir::BareExpr::App(app) = &tail.bare else {
        panic!("expected a call");
    };
    assert!(matches!(&app.callee.bare, hir::BareExpr::Const(_)));
}

#[test]
fn lambda_parameters_are_scoped_to_the_body() {
    let package = elab("func f() { (v => v)(1) }");

    let tail = last_func_tail(&package);
    let hir::BareExpr::App(app) = &tail.bare else {
        panic!("expected a call");
    };
    let hir::BareExpr::Lam(lam) = &app.callee.bare else {
        panic!("expected a lambda callee");
    };
    assert!(matches!(&lam.body.bare, hir::BareExpr::Var(ident) if *ident == atom("v")));
}

#[test]
fn pattern_condition_binds_into_the_consequent() {
    let package = elab(
        "enum E { case Some(Int) case None }\n\
         func f(o) { if let Some(v) = o { v } else { 0 } }",
    );

    let tail = last_func_tail(&package);
    let hir::BareExpr::Ite(ite) = &tail.bare else {
        panic!("expected an if expression");
    };
    let hir::BareCond::Let(cond) = &ite.arms[0].cond.bare else {
        panic!("expected a pattern condition");
    };
    assert!(matches!(&cond.pat.bare, hir::BarePat::Ctor(_)));

    let hir::BareExpr::Block(consequent) = &ite.arms[0].consequent.bare else {
        panic!("expected a block");
    };
    assert!(matches!(
        &consequent.tail.as_ref().unwrap().bare,
        hir::BareExpr::Var(ident) if *ident == atom("v")
    ));
}

#[test]
fn local_functions_are_callable() {
    let package = elab("func f() { func double(x) { x + x } double(2) }");

    let tail = last_func_tail(&package);
    let hir::BareExpr::App(app) = &tail.bare else {
        panic!("expected a call");
    };
    assert!(matches!(
        &app.callee.bare,
        hir::BareExpr::Var(ident) if *ident == atom("double")
    ));
}

#[test]
fn elaborated_output_renders() {
    let package = elab("enum Option { case Some(Int) case None }\nlet x = Some(1);");
    let rendered = package.to_string();
    assert!(rendered.contains("package \"root\""));
    assert!(rendered.contains("root.Option.Some(1)"));
    assert!(rendered.contains("%x"));
}
