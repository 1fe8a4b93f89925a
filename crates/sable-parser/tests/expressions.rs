//! Integration tests for expression parsing.

use sable_parser::ast::*;
use sable_parser::{parse, ParserOptions};

fn expr_in(source: &str, options: ParserOptions) -> Expr {
    let program = parse(source, options).unwrap_or_else(|e| panic!("{source}: {e}"));
    match program.body.into_iter().next().map(|s| s.kind) {
        Some(StmtKind::Expr(expr)) => expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn expr(source: &str) -> Expr {
    expr_in(source, ParserOptions::default())
}

fn error_code(source: &str) -> &'static str {
    let errors = parse(source, ParserOptions::default()).expect_err(source);
    errors.errors()[0].code()
}

fn binary_parts(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary { op, left, right } => (*op, left, right),
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

#[test]
fn test_precedence_add_mul() {
    let e = expr("1 + 2 * 3");
    let (op, left, right) = binary_parts(&e);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(left.kind, ExprKind::Number(1.0));
    let (op, left, right) = binary_parts(right);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(left.kind, ExprKind::Number(2.0));
    assert_eq!(right.kind, ExprKind::Number(3.0));
}

#[test]
fn test_exponent_is_right_associative() {
    let e = expr("2 ** 3 ** 2");
    let (op, left, right) = binary_parts(&e);
    assert_eq!(op, BinaryOp::Pow);
    assert_eq!(left.kind, ExprKind::Number(2.0));
    let (op, left, right) = binary_parts(right);
    assert_eq!(op, BinaryOp::Pow);
    assert_eq!(left.kind, ExprKind::Number(3.0));
    assert_eq!(right.kind, ExprKind::Number(2.0));
}

#[test]
fn test_arrow_versus_sequence() {
    let ExprKind::Arrow(arrow) = expr("(a, b) => a + b").kind else {
        panic!("expected an arrow function");
    };
    assert_eq!(arrow.params.len(), 2);
    assert!(!arrow.is_async);
    let ArrowBody::Expr(body) = &arrow.body else { panic!("expected an expression body") };
    assert_eq!(binary_parts(body).0, BinaryOp::Add);

    let ExprKind::Paren(inner) = expr("(a, b)").kind else { panic!("expected parentheses") };
    let ExprKind::Sequence(items) = &inner.kind else { panic!("expected a sequence") };
    assert_eq!(items.len(), 2);
}

#[test]
fn test_arrow_parameter_forms() {
    let ExprKind::Arrow(arrow) = expr("({a}, [b] = c, ...d) => {}").kind else { panic!() };
    assert_eq!(arrow.params.items.len(), 2);
    assert!(arrow.params.rest.is_some());
    assert!(matches!(arrow.body, ArrowBody::Block(ref body) if body.is_empty()));

    let ExprKind::Arrow(arrow) = expr("() => ({})").kind else { panic!() };
    assert!(arrow.params.is_empty());

    // A line break before `=>` is not allowed.
    assert!(parse("(a)\n=> a", ParserOptions::default()).is_err());
}

#[test]
fn test_async_arrow_and_call() {
    let ExprKind::Arrow(arrow) = expr("async (x, {y}) => await x").kind else { panic!() };
    assert!(arrow.is_async);
    let ArrowBody::Expr(body) = &arrow.body else { panic!() };
    assert!(matches!(body.kind, ExprKind::Await(_)));

    let ExprKind::Call { callee, args, .. } = expr("async (x, y)").kind else { panic!() };
    assert_eq!(callee.kind, ExprKind::Ident("async".into()));
    assert_eq!(args.len(), 2);

    // A line break after `async` makes it a plain identifier call.
    assert!(matches!(expr("async\n(x)").kind, ExprKind::Call { .. }));
}

#[test]
fn test_optional_chain_links() {
    let ExprKind::OptionalChain(chain) = expr("a?.b.c").kind else { panic!("expected a chain") };
    let ExprKind::Member { object, property, chain: link } = &chain.kind else { panic!() };
    assert_eq!(*link, ChainLink::Guarded);
    assert_eq!(*property, MemberProp::Ident("c".into()));
    let ExprKind::Member { object: base, chain: link, .. } = &object.kind else { panic!() };
    assert_eq!(*link, ChainLink::Optional);
    assert_eq!(base.kind, ExprKind::Ident("a".into()));
}

#[test]
fn test_optional_call_and_plain_prefix() {
    let ExprKind::OptionalChain(chain) = expr("a.b?.(c)").kind else { panic!() };
    let ExprKind::Call { callee, chain: link, .. } = &chain.kind else { panic!() };
    assert_eq!(*link, ChainLink::Optional);
    assert!(matches!(callee.kind, ExprKind::Member { chain: ChainLink::Plain, .. }));
}

#[test]
fn test_parenthesized_chain_ends_it() {
    let ExprKind::Member { object, chain, .. } = expr("(a?.b).c").kind else { panic!() };
    assert_eq!(chain, ChainLink::Plain);
    assert!(matches!(object.kind, ExprKind::Paren(_)));
}

#[test]
fn test_tagged_template_in_chain_is_error() {
    assert_eq!(error_code("a?.b`x`"), "InvalidSyntax");
    assert_eq!(error_code("a?.`x`"), "InvalidSyntax");
}

#[test]
fn test_nullish_mixing_requires_parens() {
    assert_eq!(error_code("a ?? b || c"), "MixedCoalesce");
    assert_eq!(error_code("a && b ?? c"), "MixedCoalesce");
    assert!(parse("(a ?? b) || c", ParserOptions::default()).is_ok());
    assert!(parse("a ?? (b && c)", ParserOptions::default()).is_ok());
    assert!(parse("a ?? b ?? c", ParserOptions::default()).is_ok());
}

#[test]
fn test_conditional_and_assignment() {
    let ExprKind::Conditional { test, alternate, .. } = expr("a ? b : c ? d : e").kind else { panic!() };
    assert_eq!(test.kind, ExprKind::Ident("a".into()));
    assert!(matches!(alternate.kind, ExprKind::Conditional { .. }));

    let ExprKind::Assign { op, value, .. } = expr("a = b = c").kind else { panic!() };
    assert_eq!(op, AssignOp::Assign);
    assert!(matches!(value.kind, ExprKind::Assign { .. }));

    let ExprKind::Assign { op, .. } = expr("a.b ??= c").kind else { panic!() };
    assert_eq!(op, AssignOp::NullishAssign);
}

#[test]
fn test_invalid_assignment_targets() {
    assert_eq!(error_code("a + b = c"), "InvalidAssignmentTarget");
    assert_eq!(error_code("f() += 1"), "InvalidAssignmentTarget");
    assert_eq!(error_code("[a] += b"), "InvalidAssignmentTarget");
    assert_eq!(error_code("++a.b()"), "InvalidAssignmentTarget");
    assert_eq!(error_code("({a = 1})"), "InvalidSyntax");
}

#[test]
fn test_update_restricted_production() {
    let program = parse("a\n++b", ParserOptions::default()).unwrap();
    assert_eq!(program.body.len(), 2);
    let StmtKind::Expr(second) = &program.body[1].kind else { panic!() };
    assert!(matches!(second.kind, ExprKind::Update { prefix: true, .. }));
}

#[test]
fn test_literals() {
    assert_eq!(expr("0x1F").kind, ExprKind::Number(31.0));
    assert_eq!(expr("1_000").kind, ExprKind::Number(1000.0));
    assert_eq!(expr("10n").kind, ExprKind::BigInt("10".into()));
    assert_eq!(expr("'a\\nb'").kind, ExprKind::String("a\nb".into()));
    assert!(matches!(
        expr("/ab+c/gi").kind,
        ExprKind::Regex { ref pattern, ref flags } if pattern == "ab+c" && flags == "gi"
    ));
    let ExprKind::Template(template) = expr("`a${b}c${d}e`").kind else { panic!() };
    assert_eq!(template.quasis, ["a", "c", "e"]);
    assert_eq!(template.exprs.len(), 2);
}

#[test]
fn test_array_and_object_literals() {
    let ExprKind::Array(elements) = expr("[1, , ...a]").kind else { panic!() };
    assert_eq!(elements.len(), 3);
    assert!(elements[1].is_none());
    assert!(matches!(elements[2].as_ref().map(|e| &e.kind), Some(ExprKind::Spread(_))));

    let ExprKind::Paren(inner) = expr("({a, b: 1, [c]: 2, d() {}, get e() { return 1; }, ...f})").kind else {
        panic!()
    };
    let ExprKind::Object(props) = &inner.kind else { panic!() };
    assert_eq!(props.len(), 6);
    assert!(matches!(props[0].kind, PropertyKind::Shorthand(ref n) if n == "a"));
    assert!(matches!(props[2].kind, PropertyKind::Init { key: PropertyKey::Computed(_), .. }));
    assert!(matches!(props[3].kind, PropertyKind::Method { kind: MethodKind::Method, .. }));
    assert!(matches!(props[4].kind, PropertyKind::Method { kind: MethodKind::Get, .. }));
    assert!(matches!(props[5].kind, PropertyKind::Spread(_)));
}

#[test]
fn test_meta_properties_and_dynamic_import() {
    let e = expr_in("import.meta.url", ParserOptions::module());
    let ExprKind::Member { object, .. } = e.kind else { panic!() };
    assert!(matches!(object.kind, ExprKind::MetaProperty { ref meta, .. } if meta == "import"));

    assert_eq!(error_code("import.meta"), "InvalidSyntax");
    assert_eq!(error_code("new.target"), "InvalidSyntax");
    assert!(parse("function f() { return new.target; }", ParserOptions::default()).is_ok());

    let ExprKind::Import { options, .. } = expr("import('./m.js', { with: { type: 'json' } })").kind else {
        panic!()
    };
    assert!(options.is_some());
}

#[test]
fn test_await_and_yield_contexts() {
    // Outside async code `await` is an identifier.
    assert!(matches!(expr("await").kind, ExprKind::Ident(_)));
    let e = expr_in("await x", ParserOptions::module());
    assert!(matches!(e.kind, ExprKind::Await(_)));

    let program = parse("function* g() { yield* inner(); }", ParserOptions::default()).unwrap();
    let StmtKind::Function(function) = &program.body[0].kind else { panic!() };
    let StmtKind::Expr(body) = &function.body[0].kind else { panic!() };
    assert!(matches!(body.kind, ExprKind::Yield { delegate: true, arg: Some(_) }));
}

#[test]
fn test_new_and_super() {
    let ExprKind::New { args, .. } = expr("new Foo").kind else { panic!() };
    assert!(args.is_empty());
    assert!(parse("class A extends B { m() { return super.m(); } }", ParserOptions::default()).is_ok());
    assert!(parse("super", ParserOptions::default()).is_err());
}
