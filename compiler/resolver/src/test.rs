//! Behavior tests for the table builder: scope tree shape, imports and
//! pattern rewriting.

use crate::{BareResolveError, BareSemanticError, Error, NodeKind, SymbolKind, Table, TableBuilder};
use ast::BarePat;
use utility::Atom;

fn atom(name: &str) -> Atom {
    Atom::from(name)
}

fn build(source: &str) -> (ast::Package, Table) {
    let mut package = parser::parse_package("root", source.to_owned())
        .expect("the test input should parse");
    let table = TableBuilder::new(&package)
        .build(&mut package)
        .expect("the test input should resolve");
    (package, table)
}

fn build_err(source: &str) -> Error {
    let mut package = parser::parse_package("root", source.to_owned())
        .expect("the test input should parse");
    TableBuilder::new(&package)
        .build(&mut package)
        .expect_err("the test input should not resolve")
}

#[test]
fn nested_scopes_and_symbols() {
    let (_, table) = build("module M { class C { } enum E { case A case B(Int) } }");

    let root = &table[table.root()];
    assert_eq!(root.ident(), atom("root"));
    assert_eq!(root.path(), "root");

    let m = root.find_node(atom("M")).unwrap();
    assert_eq!(table[m].kind(), NodeKind::Module);
    assert_eq!(table[m].path(), "root.M");

    let c = table[m].find_type_symbol(atom("C")).unwrap();
    assert_eq!(c.kind(), SymbolKind::Class);
    assert_eq!(c.path(), "root.M.C");

    let e = table[m].find_type_symbol(atom("E")).unwrap();
    assert_eq!(e.kind(), SymbolKind::Enum);
    assert_eq!(e.path(), "root.M.E");

    let e_node = table[m].find_node(atom("E")).unwrap();
    let a = table[e_node].find_expr_symbol(atom("A")).unwrap();
    assert_eq!(a.kind(), SymbolKind::Ctor);
    assert_eq!(a.path(), "root.M.E.A");
    let b = table[e_node].find_expr_symbol(atom("B")).unwrap();
    assert_eq!(b.kind(), SymbolKind::Ctor);
    assert_eq!(b.path(), "root.M.E.B");
}

#[test]
fn symbol_paths_extend_the_node_path() {
    let (_, table) = build("module M { module N { func f() { 0 } } }");

    let m = table[table.root()].find_node(atom("M")).unwrap();
    let n = table[m].find_node(atom("N")).unwrap();
    let f = table[n].find_expr_symbol(atom("f")).unwrap();
    assert_eq!(f.path(), format!("{}.f", table[n].path()));
}

#[test]
fn lookup_climbs_for_the_unqualified_name() {
    let (_, table) = build("class Outer { } module M { }");

    // With the cursor at the root the symbol is found directly; resolution
    // of the same name is stable across invocations.
    let first = table.find_type_symbol(atom("Outer"), &[]).unwrap();
    let second = table.find_type_symbol(atom("Outer"), &[]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.path(), "root.Outer");
}

#[test]
fn lookup_descends_along_the_path() {
    let (_, table) = build("module M { module N { enum E { } } }");

    let e = table
        .find_type_symbol(atom("M"), &[atom("N"), atom("E")])
        .unwrap();
    assert_eq!(e.kind(), SymbolKind::Enum);
    assert_eq!(e.path(), "root.M.N.E");
}

#[test]
fn missing_symbol() {
    let (_, table) = build("class C { }");
    assert!(matches!(
        table.find_type_symbol(atom("Missing"), &[]),
        Err(BareResolveError::SymbolNotFound { .. })
    ));
}

#[test]
fn let_patterns_register_variables() {
    let (_, table) = build("let (mut a, _, b @ _) = (1, 2, 3);");

    let a = table.find_expr_symbol(atom("a"), &[]).unwrap();
    assert_eq!(a.kind(), SymbolKind::Var);
    assert_eq!(a.path(), "root.a");

    let b = table.find_expr_symbol(atom("b"), &[]).unwrap();
    assert_eq!(b.kind(), SymbolKind::Var);

    // The wildcard contributes no symbol and there are exactly two variables.
    assert!(table.find_expr_symbol(atom("_"), &[]).is_err());
}

#[test]
fn name_pattern_resolving_to_a_constructor_is_rewritten() {
    let (package, _) = build("enum E { case A } let A;");

    let ast::BareDecl::Let(let_) = &package.decls[1].bare else {
        panic!("expected a let declaration");
    };
    let BarePat::Ctor(ctor) = &let_.pat.bare else {
        panic!("expected the pattern to be rewritten to a constructor");
    };
    assert_eq!(ctor.name.ident, atom("A"));
    assert!(ctor.args.is_none());
}

#[test]
fn name_pattern_not_resolving_stays_a_binder() {
    let (package, table) = build("enum E { case A } let x;");

    let ast::BareDecl::Let(let_) = &package.decls[1].bare else {
        panic!("expected a let declaration");
    };
    assert!(matches!(&let_.pat.bare, BarePat::Name(_)));
    assert_eq!(
        table.find_expr_symbol(atom("x"), &[]).unwrap().kind(),
        SymbolKind::Var,
    );
}

#[test]
fn rewritten_pattern_rejects_mut() {
    let error = build_err("enum E { case A } let mut A;");
    assert!(matches!(
        error,
        Error::Semantic(error) if error.bare == BareSemanticError::MutOnCtorPattern
    ));
}

#[test]
fn rewritten_pattern_rejects_hint() {
    let error = build_err("enum E { case A } let A: Int;");
    assert!(matches!(
        error,
        Error::Semantic(error) if error.bare == BareSemanticError::HintOnCtorPattern
    ));
}

#[test]
fn constructor_from_import_is_rewritten() {
    // The constructor only becomes visible through the merge pass running
    // before the variable pass.
    let (package, _) = build("module M { enum E { case A } } open M.{E.A}; let A;");

    let ast::BareDecl::Let(let_) = &package.decls[2].bare else {
        panic!("expected a let declaration");
    };
    assert!(matches!(&let_.pat.bare, BarePat::Ctor(_)));
}

#[test]
fn duplicate_declaration() {
    let error = build_err("class C { } class C { }");
    assert!(matches!(
        error,
        Error::Semantic(error)
            if error.bare == (BareSemanticError::DuplicateDeclaration { ident: atom("C") })
    ));
}

#[test]
fn alias_import_renames_and_hides() {
    let (_, table) = build(
        "module M { class C { } enum E { } } module N { open M.{C as D, *}; }",
    );

    let n = table[table.root()].find_node(atom("N")).unwrap();

    let d = table[n].find_type_symbol(atom("D")).unwrap();
    assert_eq!(d.kind(), SymbolKind::Class);
    assert_eq!(d.path(), "root.M.C");

    // The wildcard brings every type of M under its original name, except
    // the aliased one, which the alias rule erases.
    let e = table[n].find_type_symbol(atom("E")).unwrap();
    assert_eq!(e.path(), "root.M.E");
    assert!(table[n].find_type_symbol(atom("C")).is_err());

    // The nested node came along under the alias as well.
    let d_node = table[n].find_node(atom("D")).unwrap();
    assert_eq!(table[d_node].path(), "root.M.C");
}

#[test]
fn hiding_import_erases_without_renaming() {
    let (_, table) = build(
        "module M { class C { } class K { } } module N { open M.{C as _, *}; }",
    );

    let n = table[table.root()].find_node(atom("N")).unwrap();
    assert!(table[n].find_type_symbol(atom("C")).is_err());
    assert!(table[n].find_type_symbol(atom("K")).is_ok());
}

#[test]
fn import_resolves_the_head_upward() {
    let (_, table) = build(
        "module M { func f() { 0 } } module N { module Inner { open M.{f}; } }",
    );

    let n = table[table.root()].find_node(atom("N")).unwrap();
    let inner = table[n].find_node(atom("Inner")).unwrap();
    let f = table[inner].find_expr_symbol(atom("f")).unwrap();
    assert_eq!(f.path(), "root.M.f");
}

#[test]
fn repeated_imports_deduplicate() {
    let (_, table) = build(
        "module M { func f() { 0 } } module N { open M.{f}; open M.{f}; }",
    );

    let n = table[table.root()].find_node(atom("N")).unwrap();
    assert!(table[n].find_expr_symbol(atom("f")).is_ok());
}

#[test]
fn colliding_imports_are_ambiguous() {
    let (_, table) = build(
        "module M { func g() { 0 } } module N { func g() { 1 } } \
         module P { open M.{g}; open N.{g}; }",
    );

    let p = table[table.root()].find_node(atom("P")).unwrap();
    assert!(matches!(
        table[p].find_expr_symbol(atom("g")),
        Err(BareResolveError::AmbiguousSymbol { .. })
    ));
}

#[test]
fn import_of_unknown_base() {
    let error = build_err("open Missing.{x};");
    assert!(matches!(
        error,
        Error::Resolve(error)
            if matches!(error.bare, BareResolveError::SymbolNotFound { .. })
    ));
}

#[test]
fn extension_and_initializer_identifiers_are_synthesized() {
    let (package, table) = build(
        "interface I { } class C { init(x) { x } } extension C: I { }",
    );

    let root = table.root();
    let ext = table[root].find_expr_symbol(atom("ext%0")).unwrap();
    assert_eq!(ext.kind(), SymbolKind::Extension);
    assert!(table[root].find_node(atom("ext%0")).is_ok());

    let c = table[root].find_node(atom("C")).unwrap();
    let init = table[c].find_expr_symbol(atom("init%0")).unwrap();
    assert_eq!(init.kind(), SymbolKind::Init);

    // The synthesized identifiers are written back into the tree.
    let ast::BareDecl::Extension(extension) = &package.decls[2].bare else {
        panic!("expected an extension declaration");
    };
    assert_eq!(extension.binder, Some(atom("ext%0")));
}

#[test]
fn constructors_are_visible_next_to_their_enum() {
    let (_, table) = build("enum Option { case None case Some(Int) }");

    let some = table.find_expr_symbol(atom("Some"), &[]).unwrap();
    assert_eq!(some.kind(), SymbolKind::Ctor);
    assert_eq!(some.path(), "root.Option.Some");
}

#[test]
fn access_levels_are_recorded() {
    let (_, table) = build("private class C { } protected func f() { 0 }");

    let c = table.find_type_symbol(atom("C"), &[]).unwrap();
    assert_eq!(c.access(), ast::Access::Private);
    let f = table.find_expr_symbol(atom("f"), &[]).unwrap();
    assert_eq!(f.access(), ast::Access::Protected);
}

#[test]
fn table_rendering_shows_the_tree() {
    let (_, table) = build("module M { class C { } }");
    let rendered = table.to_string();
    assert!(rendered.contains("module root"));
    assert!(rendered.contains("module M"));
    assert!(rendered.contains("C: public class root.M.C"));
}
