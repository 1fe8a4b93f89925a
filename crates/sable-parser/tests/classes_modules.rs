//! Integration tests for classes and module items.

use sable_parser::ast::*;
use sable_parser::{parse, parse_recovering, ParserOptions};

fn first_stmt(source: &str, options: ParserOptions) -> StmtKind {
    let program = parse(source, options).unwrap_or_else(|e| panic!("{source}: {e}"));
    program.body.into_iter().next().map(|s| s.kind).unwrap()
}

fn codes(source: &str, options: ParserOptions) -> Vec<&'static str> {
    match parse(source, options) {
        Ok(_) => Vec::new(),
        Err(errors) => errors.iter().map(|e| e.code()).collect(),
    }
}

#[test]
fn test_class_expression_with_heritage() {
    let StmtKind::Var(mut decl) = first_stmt(
        "const A = class extends mixin(B) { static #count = 0; static inc() { return A.#count; } };",
        ParserOptions::default(),
    ) else {
        panic!()
    };
    let init = decl.decls.remove(0).init.unwrap();
    let ExprKind::Class(class) = init.kind else { panic!("expected a class expression") };
    assert!(class.name.is_none());
    assert!(matches!(class.super_class.as_deref().map(|e| &e.kind), Some(ExprKind::Call { .. })));
    assert_eq!(class.body.len(), 2);
    assert!(matches!(
        &class.body[0].kind,
        ClassMemberKind::Field { key: PropertyKey::Private(name), is_static: true, value: Some(_) } if name == "count"
    ));
}

#[test]
fn test_class_member_keys() {
    let StmtKind::Class(class) =
        first_stmt("class A { [Symbol.iterator]() {} 'quoted'() {} 42 = 1 }", ParserOptions::default())
    else {
        panic!()
    };
    let keys: Vec<&PropertyKey> = class
        .body
        .iter()
        .map(|member| match &member.kind {
            ClassMemberKind::Method { key, .. } | ClassMemberKind::Field { key, .. } => key,
            ClassMemberKind::StaticBlock(_) => panic!("unexpected static block"),
        })
        .collect();
    assert!(matches!(keys[0], PropertyKey::Computed(_)));
    assert_eq!(*keys[1], PropertyKey::String("quoted".into()));
    assert_eq!(*keys[2], PropertyKey::Number(42.0));
}

#[test]
fn test_class_declaration_needs_name() {
    assert_eq!(codes("class {}", ParserOptions::default()), ["UnexpectedToken"]);
    assert!(codes("(class {});", ParserOptions::default()).is_empty());
}

#[test]
fn test_generator_and_async_methods() {
    let StmtKind::Class(class) =
        first_stmt("class A { *gen() { yield 1; } async load() { await x; } }", ParserOptions::default())
    else {
        panic!()
    };
    let ClassMemberKind::Method { function, .. } = &class.body[0].kind else { panic!() };
    assert!(function.is_generator && !function.is_async);
    let ClassMemberKind::Method { function, .. } = &class.body[1].kind else { panic!() };
    assert!(function.is_async && !function.is_generator);
}

#[test]
fn test_module_code_is_strict() {
    assert!(codes("with (a) {}", ParserOptions::default()).is_empty());
    assert_eq!(codes("with (a) {}", ParserOptions::module()), ["StrictModeViolation"]);
}

#[test]
fn test_import_in_script_keeps_the_item() {
    let recovered = parse_recovering("import a from 'm';\nb;", ParserOptions::default());
    let program = recovered.program.unwrap();
    assert_eq!(recovered.errors.len(), 1);
    assert_eq!(recovered.errors[0].code(), "IllegalModuleItem");
    assert!(matches!(program.body[0].kind, StmtKind::Import(_)));
    assert!(matches!(program.body[1].kind, StmtKind::Expr(_)));
}

#[test]
fn test_dynamic_import_allowed_in_scripts() {
    assert!(codes("import('./m.js').then(f);", ParserOptions::default()).is_empty());
}

#[test]
fn test_default_and_namespace_import() {
    let StmtKind::Import(decl) = first_stmt("import x, * as ns from 'm';", ParserOptions::module()) else {
        panic!()
    };
    assert_eq!(decl.specifiers.len(), 2);
    assert!(matches!(&decl.specifiers[1], ImportSpecifier::Namespace { local, .. } if local == "ns"));
}

#[test]
fn test_export_default_forms() {
    let StmtKind::Export(decl) = first_stmt("export default async function () {}", ParserOptions::module()) else {
        panic!()
    };
    let ExportDecl::Default { value: DefaultExport::Function(function), .. } = *decl else { panic!() };
    assert!(function.is_async);
    assert!(function.name.is_none());

    let StmtKind::Export(decl) = first_stmt("export default (a, b) => a;", ParserOptions::module()) else {
        panic!()
    };
    assert!(matches!(
        *decl,
        ExportDecl::Default { value: DefaultExport::Expr(Expr { kind: ExprKind::Arrow(_), .. }), .. }
    ));
}

#[test]
fn test_export_declarations() {
    let StmtKind::Export(decl) = first_stmt("export let a = 1, b;", ParserOptions::module()) else { panic!() };
    let ExportDecl::Decl { decl, .. } = *decl else { panic!() };
    let StmtKind::Var(var) = decl.kind else { panic!() };
    assert_eq!(var.kind, VarKind::Let);
    assert_eq!(var.decls.len(), 2);

    assert_eq!(codes("export if (a) {}", ParserOptions::module()), ["UnexpectedToken"]);
}

#[test]
fn test_reexport_with_attributes() {
    let StmtKind::Export(decl) =
        first_stmt("export { default as data } from './d.json' with { type: 'json' };", ParserOptions::module())
    else {
        panic!()
    };
    let ExportDecl::Named { specifiers, source, attributes, .. } = *decl else { panic!() };
    assert_eq!(specifiers[0].local, ModuleExportName::Ident("default".into()));
    assert_eq!(specifiers[0].exported, ModuleExportName::Ident("data".into()));
    assert_eq!(source.as_deref(), Some("./d.json"));
    assert_eq!(attributes.len(), 1);
}

#[test]
fn test_duplicate_import_attribute() {
    assert_eq!(
        codes("import a from 'm' with { type: 'json', type: 'json' };", ParserOptions::module()),
        ["InvalidSyntax"]
    );
}

#[test]
fn test_private_name_only_before_in() {
    let class = |body: &str| format!("class A {{ #x; m(a, b) {{ {body} }} }}");
    assert!(codes(&class("return #x in a;"), ParserOptions::default()).is_empty());
    assert!(codes(&class("return #x in a || #x in b;"), ParserOptions::default()).is_empty());
    assert_eq!(codes(&class("return a + #x in b;"), ParserOptions::default()), ["UnexpectedToken"]);
    assert_eq!(codes(&class("return a < #x in b;"), ParserOptions::default()), ["UnexpectedToken"]);
    assert_eq!(codes(&class("#x;"), ParserOptions::default()), ["UnexpectedToken"]);
}
