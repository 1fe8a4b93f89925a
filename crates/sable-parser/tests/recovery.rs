//! Integration tests for multi-error recovery.

use sable_parser::ast::*;
use sable_parser::parser::DEFAULT_MAX_DEPTH;
use sable_parser::{parse, parse_recovering, ParserOptions, Recovered};

fn recover(source: &str) -> Recovered {
    parse_recovering(source, ParserOptions::default())
}

fn error_nodes(body: &[Stmt]) -> usize {
    body.iter().filter(|stmt| stmt.kind == StmtKind::Error).count()
}

#[test]
fn test_two_independent_errors() {
    let source = "a = ;\nb;\nc = );\nd;";
    let recovered = recover(source);
    assert_eq!(recovered.errors.len(), 2);
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 4);
    assert_eq!(error_nodes(&program.body), 2);
    assert_eq!(&source[program.body[0].span.range()], "a = ;");
    assert_eq!(&source[program.body[2].span.range()], "c = );");
    assert!(matches!(program.body[3].kind, StmtKind::Expr(_)));
}

#[test]
fn test_parse_reports_the_same_errors() {
    let source = "a = ;\nb;\nc = );\nd;";
    let diagnostics = parse(source, ParserOptions::default()).unwrap_err();
    assert_eq!(diagnostics.errors(), recover(source).errors.as_slice());
}

#[test]
fn test_errors_are_in_source_order() {
    let recovered = recover("c = );\nconst a;\nb = ;");
    let starts: Vec<u32> = recovered.errors.iter().map(|e| e.span.start).collect();
    assert_eq!(starts.len(), 3);
    assert!(starts.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(recovered.errors[1].code(), "MissingInitializer");
}

#[test]
fn test_reported_errors_keep_the_statement() {
    let recovered = recover("const a; b = ;");
    assert_eq!(recovered.errors.len(), 2);
    let program = recovered.program.unwrap();
    assert!(matches!(program.body[0].kind, StmtKind::Var(_)));
    assert_eq!(program.body[1].kind, StmtKind::Error);
}

#[test]
fn test_resynchronizes_at_line_break() {
    let recovered = recover("a = b c\nd;");
    assert_eq!(recovered.errors.len(), 1);
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 2);
    assert_eq!(program.body[0].kind, StmtKind::Error);
    let StmtKind::Expr(expr) = &program.body[1].kind else { panic!() };
    assert_eq!(expr.kind, ExprKind::Ident("d".into()));
}

#[test]
fn test_resynchronizes_at_statement_keyword() {
    let recovered = recover("a = ) if (b) c();");
    assert_eq!(recovered.errors.len(), 1);
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[1].kind, StmtKind::If { .. }));
}

#[test]
fn test_recovery_inside_function_body() {
    let recovered = recover("function f() { a = ; b(); }\nc();");
    assert_eq!(recovered.errors.len(), 1);
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 2);
    let StmtKind::Function(function) = &program.body[0].kind else { panic!() };
    assert_eq!(function.body.len(), 2);
    assert_eq!(function.body[0].kind, StmtKind::Error);
}

#[test]
fn test_recovery_inside_switch_case() {
    let recovered = recover("switch (x) { case 1: a = ; case 2: b(); }");
    assert_eq!(recovered.errors.len(), 1);
    let program = recovered.program.unwrap();
    let StmtKind::Switch { cases, .. } = &program.body[0].kind else { panic!() };
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].body, [Stmt::new(StmtKind::Error, cases[0].body[0].span)]);
}

#[test]
fn test_unterminated_string_is_recoverable() {
    let recovered = recover("'abc\nb;");
    assert_eq!(recovered.errors.len(), 1);
    assert_eq!(recovered.errors[0].code(), "LexError");
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 2);
    assert_eq!(program.body[0].kind, StmtKind::Error);
}

#[test]
fn test_unterminated_template_is_fatal() {
    let recovered = recover("`abc");
    assert!(recovered.program.is_none());
    assert_eq!(recovered.errors.len(), 1);
    assert!(recovered.errors[0].is_fatal());
    assert!(!recovered.is_clean());
}

#[test]
fn test_fatal_error_keeps_earlier_errors() {
    let recovered = recover("a = ;\n/* never closed");
    assert!(recovered.program.is_none());
    let codes: Vec<&str> = recovered.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes, ["UnexpectedToken", "LexError"]);
}

#[test]
fn test_lex_errors_in_skipped_tokens_are_reported() {
    let recovered = recover("a = ) 'x\nb;");
    let codes: Vec<&str> = recovered.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes, ["UnexpectedToken", "LexError"]);
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 2);
    assert_eq!(program.body[0].kind, StmtKind::Error);
}

#[test]
fn test_fatal_lex_error_in_skipped_tokens_stops_the_parse() {
    for source in ["a = ) `abc", "a = ) /* open"] {
        let recovered = recover(source);
        assert!(recovered.program.is_none(), "{source}");
        let codes: Vec<&str> = recovered.errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, ["UnexpectedToken", "LexError"], "{source}");
        assert!(recovered.errors[1].is_fatal());
    }
}

#[test]
fn test_errors_without_placeholders() {
    let recovered = recover("const a;\nconst b;");
    assert_eq!(recovered.errors.len(), 2);
    let program = recovered.program.unwrap();
    assert_eq!(program.body.len(), 2);
    assert_eq!(error_nodes(&program.body), 0);
}

#[test]
fn test_unexpected_eof_is_fatal() {
    let recovered = recover("function f() { a(); ");
    assert!(recovered.program.is_none());
    assert_eq!(recovered.errors[0].code(), "UnexpectedEof");
}

#[test]
fn test_nesting_limit_is_fatal() {
    let source = format!("{}{};", "[".repeat(300), "]".repeat(300));
    let recovered = recover(&source);
    assert!(recovered.program.is_none());
    assert_eq!(recovered.errors.last().map(|e| e.code()), Some("NestingTooDeep"));

    let shallow = format!("{}{};", "[".repeat(40), "]".repeat(40));
    assert!(parse(&shallow, ParserOptions::default()).is_ok());
}

#[test]
fn test_nesting_up_to_the_limit_on_a_spawned_thread() {
    let levels = DEFAULT_MAX_DEPTH - 1;
    let source = format!("{}{};", "[".repeat(levels), "]".repeat(levels));
    let parsed = std::thread::spawn(move || parse(&source, ParserOptions::default()).is_ok());
    assert!(parsed.join().unwrap());
}

#[test]
fn test_raised_limit_grows_the_stack() {
    let options = ParserOptions::default().with_max_depth(1024);
    let deep = std::thread::spawn(move || {
        let arrays = format!("{}{};", "[".repeat(1000), "]".repeat(1000));
        let unary = format!("{}a;", "!".repeat(1000));
        [arrays, unary].iter().all(|source| parse(source, options).is_ok())
    });
    assert!(deep.join().unwrap());
}
