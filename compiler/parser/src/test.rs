//! Positive and negative behavior tests for the parser.
//!
//! Intended for the grammar's edge cases, above all the two speculative
//! regions: type arguments vs. less-than and lambda vs. expression.

use crate::{BareError, Error, Result};
use ast::{
    AppExpr, AssignMode, BareClause, BareCond, BareDecl, BareExpr, BareImport, BareLit, BarePat,
    BareStmt, BareTy, BinOp, BinaryExpr, Expr, HintExpr, LamExpr, Lit, Name, NameExpr, NamePat,
    NameTy, Ty, UnaryOp,
};
use span::{span, Span, Spanned};
use utility::{difference, Atom};

fn parse_expr(source: &str) -> Result<Expr> {
    crate::parse_expr(source.to_owned())
}

#[track_caller]
fn assert_expr_eq(source: &str, expected: Expr) {
    match parse_expr(source) {
        Ok(actual) => {
            if actual != expected {
                panic!(
                    "the output of the parser does not match the expected one:\n{}",
                    difference(&format!("{expected:#?}"), &format!("{actual:#?}"), "\n"),
                );
            }
        }
        Err(error) => panic!("expected the parser to succeed but it failed with {error:?}"),
    }
}

fn atom(name: &str) -> Atom {
    Atom::from(name)
}

fn name_expr(name: &str, span: Span) -> Expr {
    Spanned::new(
        span,
        NameExpr {
            name: Name::plain(atom(name)),
            ty_args: None,
        }
        .into(),
    )
}

fn name_ty(name: &str, span: Span) -> Ty {
    Spanned::new(
        span,
        NameTy {
            name: Name::plain(atom(name)),
            args: None,
        }
        .into(),
    )
}

fn num(value: i64, span: Span) -> Expr {
    Spanned::new(span, BareExpr::Lit(Lit::new(span, BareLit::Num(value))))
}

fn meta() -> Ty {
    Spanned::new(Span::default(), BareTy::Meta)
}

#[test]
fn ty_args_commit_on_closing_angle() {
    assert_expr_eq(
        "f<A, B>(1, 2)",
        Spanned::new(
            span((1, 1), (1, 14)),
            AppExpr {
                callee: Spanned::new(
                    span((1, 1), (1, 8)),
                    NameExpr {
                        name: Name::plain(atom("f")),
                        ty_args: Some(vec![
                            name_ty("A", span((1, 3), (1, 4))),
                            name_ty("B", span((1, 6), (1, 7))),
                        ]),
                    }
                    .into(),
                ),
                args: vec![num(1, span((1, 9), (1, 10))), num(2, span((1, 12), (1, 13)))],
            }
            .into(),
        ),
    );
}

#[test]
fn ty_args_roll_back_to_less_than() {
    assert_expr_eq(
        "a<b",
        Spanned::new(
            span((1, 1), (1, 4)),
            BinaryExpr {
                op: BinOp::Lt,
                lhs: name_expr("a", span((1, 1), (1, 2))),
                rhs: name_expr("b", span((1, 3), (1, 4))),
            }
            .into(),
        ),
    );
}

#[test]
fn lambda_with_tuple_parameter_list() {
    assert_expr_eq(
        "(x, y) => x",
        Spanned::new(
            span((1, 1), (1, 12)),
            LamExpr {
                params: vec![
                    Spanned::new(
                        span((1, 2), (1, 3)),
                        NamePat {
                            name: Name::plain(atom("x")),
                            ty_args: None,
                            hint: meta(),
                            mutable: false,
                        }
                        .into(),
                    ),
                    Spanned::new(
                        span((1, 5), (1, 6)),
                        NamePat {
                            name: Name::plain(atom("y")),
                            ty_args: None,
                            hint: meta(),
                            mutable: false,
                        }
                        .into(),
                    ),
                ],
                body: name_expr("x", span((1, 11), (1, 12))),
            }
            .into(),
        ),
    );
}

#[test]
fn parenthesized_expression_with_hint() {
    assert_expr_eq(
        "(x: Int)",
        Spanned::new(
            span((1, 2), (1, 8)),
            HintExpr {
                expr: name_expr("x", span((1, 2), (1, 3))),
                ty: Spanned::new(span((1, 5), (1, 8)), BareTy::Int),
            }
            .into(),
        ),
    );
}

#[test]
fn lambda_rollback_falls_through_to_operators() {
    // `x => …` fails at the body, so the whole form reparses as a comparison.
    let expr = parse_expr("x < y").unwrap();
    let BareExpr::Binary(binary) = expr.bare else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.op, BinOp::Lt);
}

#[test]
fn precedence_ladder() {
    // 1 + 2 * 3 == 7 && a || b
    let expr = parse_expr("1 + 2 * 3 == 7 && a || b").unwrap();
    let BareExpr::Binary(or) = expr.bare else {
        panic!("expected ‘||’ at the top");
    };
    assert_eq!(or.op, BinOp::Or);
    let BareExpr::Binary(and) = or.lhs.bare else {
        panic!("expected ‘&&’ below ‘||’");
    };
    assert_eq!(and.op, BinOp::And);
    let BareExpr::Binary(eq) = and.lhs.bare else {
        panic!("expected ‘==’ below ‘&&’");
    };
    assert_eq!(eq.op, BinOp::Eq);
    let BareExpr::Binary(add) = eq.lhs.bare else {
        panic!("expected ‘+’ below ‘==’");
    };
    assert_eq!(add.op, BinOp::Add);
    let BareExpr::Binary(mul) = add.rhs.bare else {
        panic!("expected ‘*’ to the right of ‘+’");
    };
    assert_eq!(mul.op, BinOp::Mul);
}

#[test]
fn assignment_is_right_associative_and_carries_modes() {
    let expr = parse_expr("a = b += c").unwrap();
    let BareExpr::Binary(outer) = expr.bare else {
        panic!("expected an assignment");
    };
    assert_eq!(outer.op, BinOp::Assign(AssignMode::Plain));
    let BareExpr::Binary(inner) = outer.rhs.bare else {
        panic!("expected a nested assignment");
    };
    assert_eq!(inner.op, BinOp::Assign(AssignMode::Add));
}

#[test]
fn prefix_operators_share_tokens_with_infix_ones() {
    let expr = parse_expr("-a * &b").unwrap();
    let BareExpr::Binary(mul) = expr.bare else {
        panic!("expected ‘*’ at the top");
    };
    assert_eq!(mul.op, BinOp::Mul);
    assert!(matches!(
        &mul.lhs.bare,
        BareExpr::Unary(unary) if matches!(unary.op, UnaryOp::Neg)
    ));
    assert!(matches!(
        &mul.rhs.bare,
        BareExpr::Unary(unary) if matches!(unary.op, UnaryOp::Addr)
    ));
}

#[test]
fn postfix_member_chain_folds_into_one_name() {
    // A leading identifier absorbs the whole selector path into the name.
    let expr = parse_expr("p.0.swap").unwrap();
    let BareExpr::Name(name) = expr.bare else {
        panic!("expected a name expression");
    };
    assert_eq!(name.name.ident.to_str(), "p");
    assert_eq!(
        name.name.path.as_slice(),
        [ast::Seg::Index(0), ast::Seg::Ident(atom("swap"))],
    );
}

#[test]
fn postfix_member_on_call_result() {
    let expr = parse_expr("f().0").unwrap();
    let BareExpr::Unary(unary) = expr.bare else {
        panic!("expected a member access");
    };
    let UnaryOp::Dot { path, ty_args } = &unary.op else {
        panic!("expected a dot operator");
    };
    assert_eq!(path.as_slice(), [ast::Seg::Index(0)]);
    assert!(ty_args.is_none());
    assert!(matches!(&unary.expr.bare, BareExpr::App(_)));
}

#[test]
fn index_and_try_postfix() {
    let expr = parse_expr("xs[0]?").unwrap();
    let BareExpr::Unary(try_) = expr.bare else {
        panic!("expected a try expression");
    };
    assert!(matches!(try_.op, UnaryOp::Try));
    assert!(matches!(
        &try_.expr.bare,
        BareExpr::Unary(unary) if matches!(unary.op, UnaryOp::Index(_))
    ));
}

#[test]
fn block_trailing_value_becomes_the_tail() {
    let expr = parse_expr("{ 1; 2 }").unwrap();
    let BareExpr::Block(block) = expr.bare else {
        panic!("expected a block");
    };
    assert_eq!(block.stmts.len(), 1);
    assert!(matches!(
        &block.stmts[0].bare,
        BareStmt::Expr(stmt) if !stmt.value
    ));
    let tail = block.tail.expect("expected a trailing value");
    assert_eq!(tail.bare, num(2, span((1, 6), (1, 7))).bare);
}

#[test]
fn if_else_if_chain() {
    let expr = parse_expr("if a { 1 } else if b { 2 } else { 3 }").unwrap();
    let BareExpr::Ite(ite) = expr.bare else {
        panic!("expected an if expression");
    };
    assert_eq!(ite.arms.len(), 2);
    assert!(ite.alternative.is_some());
    assert!(matches!(&ite.arms[0].cond.bare, BareCond::Expr(_)));
}

#[test]
fn pattern_condition() {
    let expr = parse_expr("if let (a, b) = pair { a } else { b }").unwrap();
    let BareExpr::Ite(ite) = expr.bare else {
        panic!("expected an if expression");
    };
    assert!(matches!(&ite.arms[0].cond.bare, BareCond::Let(_)));
}

#[test]
fn switch_clauses_are_bounded_by_case_default_and_brace() {
    let expr = parse_expr("switch x { case A: 1; case B(y): y case _: 2; default: 0 }").unwrap();
    let BareExpr::Switch(switch) = expr.bare else {
        panic!("expected a switch");
    };
    assert_eq!(switch.clauses.len(), 4);
    assert!(matches!(
        &switch.clauses[0].bare,
        BareClause::Case(clause) if matches!(&clause.pat.bare, BarePat::Name(_))
    ));
    assert!(matches!(
        &switch.clauses[1].bare,
        BareClause::Case(clause) if matches!(&clause.pat.bare, BarePat::Ctor(_))
    ));
    assert!(matches!(
        &switch.clauses[2].bare,
        BareClause::Case(clause) if matches!(&clause.pat.bare, BarePat::Wild)
    ));
    assert!(matches!(&switch.clauses[3].bare, BareClause::Default(_)));
}

#[test]
fn switch_case_guard() {
    let expr = parse_expr("switch x { case n if n > 0: n default: 0 }").unwrap();
    let BareExpr::Switch(switch) = expr.bare else {
        panic!("expected a switch");
    };
    let BareClause::Case(clause) = &switch.clauses[0].bare else {
        panic!("expected a case clause");
    };
    assert!(clause.guard.is_some());
}

#[test]
fn or_pattern_with_binder() {
    let stmt = crate::parse_stmt("let x = 0;".to_owned()).unwrap();
    assert!(matches!(stmt.bare, BareStmt::Let(_)));

    let decl = crate::parse_decl("let a @ (1 | 2);".to_owned()).unwrap();
    let BareDecl::Let(let_) = decl.bare else {
        panic!("expected a let declaration");
    };
    let BarePat::At(at) = &let_.pat.bare else {
        panic!("expected a binder pattern");
    };
    assert!(matches!(&at.pat.bare, BarePat::Or(options) if options.len() == 2));
}

#[test]
fn let_statement_requires_a_binding_operator() {
    let result = crate::parse_stmt("let x 1;".to_owned());
    assert!(matches!(
        result,
        Err(Error::Parse(error)) if matches!(
            &error.bare,
            BareError::ExpectedButGot { expected, .. } if expected.len() == 2
        )
    ));
}

#[test]
fn bind_statement() {
    let stmt = crate::parse_stmt("let x <- compute();".to_owned()).unwrap();
    assert!(matches!(stmt.bare, BareStmt::Bind(_)));
}

#[test]
fn let_statement_with_alternative() {
    let stmt = crate::parse_stmt("let x = f() else { return };".to_owned()).unwrap();
    let BareStmt::Let(let_) = stmt.bare else {
        panic!("expected a let statement");
    };
    assert!(let_.alternative.is_some());
}

#[test]
fn statement_attributes() {
    let stmt = crate::parse_stmt("@inline func f() { 0 }".to_owned()).unwrap();
    assert_eq!(stmt.attributes.len(), 1);
    assert!(matches!(stmt.bare, BareStmt::Func(_)));
}

#[test]
fn function_declaration_with_bounds() {
    let decl = crate::parse_decl("private func f<T>(x: T) -> T where T: Eq { x }".to_owned())
        .unwrap();
    assert_eq!(decl.attributes.access, ast::Access::Private);
    let BareDecl::Func(func) = decl.bare else {
        panic!("expected a function declaration");
    };
    assert_eq!(func.ty_params.as_deref(), Some(&[atom("T")][..]));
    assert_eq!(func.bounds.len(), 1);
    assert_eq!(func.params.len(), 1);
    assert!(!func.output.bare.is_meta());
    assert!(func.body.is_some());
}

#[test]
fn inline_bounds_merge_with_where_clause() {
    let decl = crate::parse_decl("class C<T: Ord> where T: Eq { }".to_owned()).unwrap();
    let BareDecl::Class(class) = decl.bare else {
        panic!("expected a class declaration");
    };
    assert_eq!(class.bounds.len(), 2);
}

#[test]
fn enum_declaration_with_constructors() {
    let decl = crate::parse_decl("enum Option<T> { case None case Some(T) }".to_owned()).unwrap();
    let BareDecl::Enum(enum_) = decl.bare else {
        panic!("expected an enum declaration");
    };
    assert_eq!(enum_.decls.len(), 2);
    let BareDecl::Ctor(none) = &enum_.decls[0].bare else {
        panic!("expected a constructor");
    };
    assert_eq!(none.binder, atom("None"));
    assert!(none.params.is_none());
    let BareDecl::Ctor(some) = &enum_.decls[1].bare else {
        panic!("expected a constructor");
    };
    assert_eq!(some.params.as_deref().map(<[Ty]>::len), Some(1));
}

#[test]
fn typealias_declaration() {
    let decl = crate::parse_decl("type Id<T>: Printable = T;".to_owned()).unwrap();
    let BareDecl::Typealias(alias) = decl.bare else {
        panic!("expected a typealias");
    };
    assert_eq!(alias.hint.len(), 1);
    assert!(alias.aliased.is_some());
}

#[test]
fn extension_declaration_is_anonymous() {
    let decl = crate::parse_decl("extension<T> List<T>: Printable;".to_owned()).unwrap();
    let BareDecl::Extension(extension) = decl.bare else {
        panic!("expected an extension");
    };
    assert!(extension.binder.is_none());
    assert!(matches!(&extension.base.bare, BareTy::Name(_)));
    assert!(matches!(&extension.interface.bare, BareTy::Name(_)));
}

#[test]
fn initializer_without_identifier() {
    let decl = crate::parse_decl("init(x, y) { x }".to_owned()).unwrap();
    let BareDecl::Init(init) = decl.bare else {
        panic!("expected an initializer");
    };
    assert!(init.binder.is_none());
    assert_eq!(init.params.len(), 2);
}

#[test]
fn arrow_types_are_right_associative() {
    let ty = crate::parse_ty("Int -> Bool -> Char".to_owned()).unwrap();
    let BareTy::Arrow(outer) = ty.bare else {
        panic!("expected an arrow type");
    };
    assert!(matches!(outer.inputs[0].bare, BareTy::Int));
    let BareTy::Arrow(inner) = &outer.output.bare else {
        panic!("expected a nested arrow type");
    };
    assert!(matches!(inner.inputs[0].bare, BareTy::Bool));
    assert!(matches!(inner.output.bare, BareTy::Char));
}

#[test]
fn tuple_type_flattens_into_arrow_inputs() {
    let ty = crate::parse_ty("(Int, Bool) -> Char".to_owned()).unwrap();
    let BareTy::Arrow(arrow) = ty.bare else {
        panic!("expected an arrow type");
    };
    assert_eq!(arrow.inputs.len(), 2);
}

#[test]
fn unit_type_and_grouping() {
    assert!(matches!(
        crate::parse_ty("()".to_owned()).unwrap().bare,
        BareTy::Unit
    ));
    assert!(matches!(
        crate::parse_ty("(Int)".to_owned()).unwrap().bare,
        BareTy::Int
    ));
}

#[test]
fn package_header_imports() {
    let package =
        crate::parse_package("pkg", "import A.B;\nimport C as D;\nclass E { }".to_owned())
            .unwrap();
    assert_eq!(package.ident, "pkg");
    assert_eq!(package.header.len(), 2);
    assert_eq!(package.decls.len(), 1);
    assert!(matches!(&package.header[0].bare, BareImport::Node(_)));
    assert!(matches!(&package.header[1].bare, BareImport::Alias(_)));
}

#[test]
fn import_tree_forms() {
    let decl = crate::parse_decl("open M.{C as D, E.F, *};".to_owned()).unwrap();
    let BareDecl::Open(import) = decl.bare else {
        panic!("expected an open declaration");
    };
    let BareImport::Node(node) = &import.bare else {
        panic!("expected a node import");
    };
    assert_eq!(node.binder, atom("M"));
    assert_eq!(node.nested.len(), 3);
    assert!(matches!(&node.nested[0].bare, BareImport::Alias(alias) if alias.binder.is_some()));
    assert!(matches!(&node.nested[1].bare, BareImport::Node(_)));
    assert!(matches!(&node.nested[2].bare, BareImport::Wild));
}

#[test]
fn hiding_import() {
    let decl = crate::parse_decl("open M.{C as _};".to_owned()).unwrap();
    let BareDecl::Open(import) = decl.bare else {
        panic!("expected an open declaration");
    };
    let BareImport::Node(node) = &import.bare else {
        panic!("expected a node import");
    };
    assert!(matches!(
        &node.nested[0].bare,
        BareImport::Alias(alias) if alias.binder.is_none()
    ));
}

#[test]
fn package_rejects_stray_input() {
    let result = crate::parse_package("pkg", "class C { } }".to_owned());
    assert!(matches!(
        result,
        Err(Error::Parse(error))
            if matches!(error.bare, BareError::UnexpectedInContext { context: "declaration", .. })
    ));
}

#[test]
fn unexpected_token_reports_context() {
    let result = parse_expr("case");
    assert!(matches!(
        result,
        Err(Error::Parse(error))
            if matches!(error.bare, BareError::UnexpectedInContext { context: "expression", .. })
    ));
}

#[test]
fn lex_errors_surface_through_the_parser() {
    let result = parse_expr("1 + \u{1F980}");
    assert!(matches!(result, Err(Error::Lex(_))));
}

#[test]
fn incomplete_operand() {
    assert!(parse_expr("1 +").is_err());
    assert!(parse_expr("(").is_err());
}

#[test]
fn return_takes_an_optional_argument() {
    let expr = parse_expr("return").unwrap();
    let BareExpr::Return(return_) = expr.bare else {
        panic!("expected a return expression");
    };
    assert!(return_.value.is_none());

    let expr = parse_expr("return 1").unwrap();
    let BareExpr::Return(return_) = expr.bare else {
        panic!("expected a return expression");
    };
    assert!(return_.value.is_some());
}
