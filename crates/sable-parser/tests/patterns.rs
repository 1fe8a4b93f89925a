//! Integration tests for binding and assignment patterns.

use sable_parser::ast::*;
use sable_parser::visit::erase_spans;
use sable_parser::{parse, ParserOptions, Span};

fn declared_pattern(source: &str) -> Pattern {
    let program = parse(source, ParserOptions::default()).unwrap_or_else(|e| panic!("{source}: {e}"));
    match program.body.into_iter().next().map(|s| s.kind) {
        Some(StmtKind::Var(mut decl)) => decl.decls.remove(0).target,
        other => panic!("expected a declaration, got {other:?}"),
    }
}

fn codes(source: &str) -> Vec<&'static str> {
    match parse(source, ParserOptions::default()) {
        Ok(_) => Vec::new(),
        Err(errors) => errors.iter().map(|e| e.code()).collect(),
    }
}

fn ident(name: &str) -> Pattern {
    Pattern::new(PatternKind::Ident(name.into()), Span::default())
}

#[test]
fn test_nested_destructuring_declaration() {
    let mut program = parse("let {a, b: [c, ...d]} = e;", ParserOptions::default()).unwrap();
    erase_spans(&mut program);
    let StmtKind::Var(decl) = &program.body[0].kind else { panic!() };
    assert_eq!(decl.kind, VarKind::Let);
    assert_eq!(decl.decls[0].init.as_ref().map(|e| &e.kind), Some(&ExprKind::Ident("e".into())));

    let expected = Pattern::new(
        PatternKind::Object {
            props: vec![
                PatternProp {
                    key: PropertyKey::Ident("a".into()),
                    value: ident("a"),
                    default: None,
                    shorthand: true,
                    span: Span::default(),
                },
                PatternProp {
                    key: PropertyKey::Ident("b".into()),
                    value: Pattern::new(
                        PatternKind::Array {
                            elements: vec![Some(PatternElement {
                                target: ident("c"),
                                default: None,
                                span: Span::default(),
                            })],
                            rest: Some(Box::new(ident("d"))),
                        },
                        Span::default(),
                    ),
                    default: None,
                    shorthand: false,
                    span: Span::default(),
                },
            ],
            rest: None,
        },
        Span::default(),
    );
    assert_eq!(decl.decls[0].target, expected);
}

#[test]
fn test_defaults_and_holes() {
    let pattern = declared_pattern("var [, a = 1, [b] = [], {c = 2} = {}] = x;");
    let PatternKind::Array { elements, rest: None } = pattern.kind else { panic!() };
    assert_eq!(elements.len(), 4);
    assert!(elements[0].is_none());
    assert!(elements.iter().skip(1).flatten().all(|e| e.default.is_some()));
}

#[test]
fn test_object_rest_binding() {
    let pattern = declared_pattern("const {a, ...others} = x;");
    let PatternKind::Object { props, rest } = pattern.kind else { panic!() };
    assert_eq!(props.len(), 1);
    assert_eq!(rest.map(|r| r.kind), Some(PatternKind::Ident("others".into())));
}

#[test]
fn test_assignment_pattern_matches_declaration() {
    let mut assigned = parse("[a, {b: c = 1}, ...d] = e;", ParserOptions::default()).unwrap();
    let mut declared = parse("let [a, {b: c = 1}, ...d] = e;", ParserOptions::default()).unwrap();
    erase_spans(&mut assigned);
    erase_spans(&mut declared);

    let StmtKind::Expr(Expr { kind: ExprKind::Assign { target, .. }, .. }) = &assigned.body[0].kind else {
        panic!()
    };
    let StmtKind::Var(decl) = &declared.body[0].kind else { panic!() };
    assert_eq!(**target, decl.decls[0].target);
}

#[test]
fn test_parenthesized_targets() {
    assert!(codes("(a) = 1;").is_empty());
    assert!(codes("(a.b) = 1;").is_empty());
    assert_eq!(codes("[(a)] = 1;"), Vec::<&str>::new());
    assert_eq!(codes("({a: ({b})} = 1);"), ["InvalidPattern"]);
    assert_eq!(codes("let [(a)] = 1;"), ["UnexpectedToken"]);
}

#[test]
fn test_arrow_params_reject_members() {
    assert_eq!(codes("async (a.b) => 1;"), ["InvalidPattern"]);
    assert!(codes("(a.b) => 1;").len() == 1);
}

#[test]
fn test_object_pattern_rejects_methods() {
    assert_eq!(codes("({m() {}} = x);"), ["InvalidPattern"]);
}

#[test]
fn test_strict_eval_target() {
    assert!(codes("eval = 1;").is_empty());
    let errors = parse("eval = 1;", ParserOptions::default().with_strict(true)).unwrap_err();
    assert_eq!(errors.errors()[0].code(), "ReservedWordMisuse");
    let errors = parse("[arguments] = 1;", ParserOptions::module()).unwrap_err();
    assert_eq!(errors.errors()[0].code(), "ReservedWordMisuse");
}

#[test]
fn test_rest_element_rules() {
    assert_eq!(codes("[...a, ...b] = c;"), ["DuplicateRestElement"]);
    assert_eq!(codes("({...a, ...b} = c);"), ["DuplicateRestElement"]);
    assert_eq!(codes("let [...a,] = c;"), ["InvalidPattern"]);
    assert_eq!(codes("let {...a, b} = c;"), ["InvalidPattern"]);
    assert_eq!(codes("function f(...a, b) {}"), ["InvalidPattern"]);
}
