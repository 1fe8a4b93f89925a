//! Printing a parsed program and parsing the output again must give the
//! same tree once spans are erased.

use sable_parser::ast::{Expr, Pattern, Stmt};
use sable_parser::visit::{erase_spans, walk_expr, walk_pattern, walk_stmt, Visit};
use sable_parser::{parse, parse_recovering, print, ParserOptions, Program, Span};

const SCRIPTS: &[&str] = &[
    "1 + 2 * 3;",
    "2 ** 3 ** 2; (-a) ** b; a ** -b;",
    "(a + b) * c; a - (b - c); a - b - c;",
    "a ?? b; (a ?? b) || c; a && (b ?? c);",
    "a = b = c; a += 1; a.b ??= c; x ||= y; x &&= y;",
    "a ? b : c ? d : e;",
    "let {a, b: [c, ...d]} = e;",
    "var [, x = 1, [y] = [], {z = 2} = {}] = w;",
    "[a, {b: c = 1}, ...d] = e;",
    "({a, b: {c}} = d);",
    "(a, b) => a + b; (a, b);",
    "x => x * 2; async (x, y) => await x; async x => x; () => ({});",
    "({a}, [b] = c, ...d) => { return a; };",
    "a?.b.c; a?.[0]?.(x); a.b?.(c); (a?.b).c;",
    "tag`a${b}c`; `plain ${x + y} text`; `$\\{not} \\` tick`;",
    "new Foo; new Foo(a, b); new (a())(); new a.b.C();",
    "typeof x; void 0; delete a.b; !a; ~b; - -a; -(-a); +a;",
    "a++; --b; a\n++b;",
    "1..toString(); 1.5.toFixed(); 0x1F; 1e21; 0.5; 10n;",
    "'it\\'s'; \"line\\nbreak\"; 'tab\\there';",
    "/ab+c/gi.test(s); x = /[/]/;",
    "[1, , 2, ...rest]; [a, ,];",
    "({a, b: 1, [c]: 2, 'd-e': 3, 4: 5, m() {}, get g() { return 1; }, set s(v) {}, async *gen() {}, ...f});",
    "(function () {})(); (function () {}());",
    "function f(a, b = 1, ...c) { return a + b; } function s() { 'use strict'; return 1; }",
    "async function g() { for await (const x of xs) { await x; } }",
    "function* h() { yield; yield 1; yield* inner(); }",
    "class A extends B { constructor() { super(); } static #count = 0; x = 1; get y() { return this.#count; } static { init(); } [key]() {} }",
    "const C = class extends mixin(B) {};",
    "if (a) b(); else if (c) d(); else { e(); }",
    "for (let i = 0, j = 1; i < j; i++, j--) {}",
    "for (const k in obj) {} for (const [k, v] of entries) {} for (x.y of z) {} for (;;) break;",
    "outer: for (;;) { inner: while (x) { break outer; continue inner; } }",
    "do x(); while (y); while (a) b();",
    "switch (x) { case 1: a(); break; case 2: default: b(); }",
    "try { a(); } catch { b(); } try {} catch ({message}) {} finally { done(); }",
    "throw new Error('bad');",
    "with (obj) { prop; }",
    "debugger; ; {}",
    "label: { break label; }",
    "let = 1; async(a, b); async\n(x);",
    "function outer() { return new.target; }",
    "a in b; 'x' in y; a instanceof B;",
    "a, b, c;",
    "(a, b) ? c : d;",
];

const MODULES: &[&str] = &[
    "import a, { b, c as d, 'e-f' as g, default as h } from 'm';",
    "import * as ns from 'm'; import 'polyfill'; import x, * as y from 'n';",
    "import data from './data.json' with { type: 'json' };",
    "export const a = 1; export let b, c; export function f() {} export class K {}",
    "export default function () {}",
    "export default class {}",
    "export default (a, b) => a;",
    "export default a + b;",
    "export { a as 'b-c', d }; export { default as e } from 'm';",
    "export * from 'm'; export * as ns from 'n' with { type: 'json' };",
    "const meta = import.meta.url; await load(); import('./lazy.js').then(run);",
    "export async function run() { await Promise.all([a(), b()]); }",
];

fn normalized(source: &str, options: ParserOptions) -> Program {
    let mut program = parse(source, options).unwrap_or_else(|e| panic!("{source:?}: {e}"));
    erase_spans(&mut program);
    program
}

fn assert_roundtrip(source: &str, options: ParserOptions) {
    let original = normalized(source, options);
    let printed = print(&original);
    let reparsed = normalized(&printed, options);
    assert_eq!(original, reparsed, "source:\n{source}\nprinted:\n{printed}");
}

#[test]
fn test_scripts_roundtrip() {
    for source in SCRIPTS {
        assert_roundtrip(source, ParserOptions::default());
    }
}

#[test]
fn test_modules_roundtrip() {
    for source in MODULES {
        assert_roundtrip(source, ParserOptions::module());
    }
}

#[test]
fn test_printing_is_stable() {
    for source in SCRIPTS {
        let once = print(&normalized(source, ParserOptions::default()));
        let twice = print(&normalized(&once, ParserOptions::default()));
        assert_eq!(once, twice, "source:\n{source}");
    }
}

#[test]
fn test_whole_corpus_as_one_program() {
    let source = MODULES.join("\n");
    assert_roundtrip(&source, ParserOptions::module());
}

/// Checks that every node lies inside the node that contains it.
struct SpanNesting<'a> {
    source: &'a str,
    parents: Vec<Span>,
    nodes: usize,
}

impl<'a> SpanNesting<'a> {
    fn check(source: &'a str, program: &Program) -> usize {
        let mut nesting = SpanNesting { source, parents: vec![program.span], nodes: 0 };
        nesting.visit_program(program);
        nesting.nodes
    }

    fn enter(&mut self, span: Span, what: &str) {
        assert!(span.start <= span.end, "{what} span {span:?} is reversed in {:?}", self.source);
        if let Some(parent) = self.parents.last() {
            assert!(
                parent.start <= span.start && span.end <= parent.end,
                "{what} {:?} at {span:?} escapes its parent {:?} in {:?}",
                &self.source[span.range()],
                &self.source[parent.range()],
                self.source,
            );
        }
        self.parents.push(span);
        self.nodes += 1;
    }
}

impl Visit for SpanNesting<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.enter(stmt.span, "statement");
        walk_stmt(self, stmt);
        self.parents.pop();
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.enter(expr.span, "expression");
        walk_expr(self, expr);
        self.parents.pop();
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        self.enter(pattern.span, "pattern");
        walk_pattern(self, pattern);
        self.parents.pop();
    }
}

#[test]
fn test_child_spans_lie_inside_parents() {
    for source in SCRIPTS {
        let program = parse(source, ParserOptions::default()).unwrap();
        assert!(SpanNesting::check(source, &program) > 0, "{source}");
    }
    for source in MODULES {
        let program = parse(source, ParserOptions::module()).unwrap();
        assert!(SpanNesting::check(source, &program) > 0, "{source}");
    }
}

#[test]
fn test_recovered_tree_spans_lie_inside_parents() {
    let source = "a = ;\nfunction f() { b = ); c(); }\nd;";
    let recovered = parse_recovering(source, ParserOptions::default());
    assert_eq!(recovered.errors.len(), 2);
    SpanNesting::check(source, &recovered.program.unwrap());
}

#[test]
fn test_parsing_is_deterministic() {
    for source in SCRIPTS {
        let first = parse(source, ParserOptions::default());
        let second = parse(source, ParserOptions::default());
        assert_eq!(first, second, "{source}");
    }
    let broken = "a = ;\nb = ) c;\nclass { }";
    assert_eq!(
        parse_recovering(broken, ParserOptions::default()),
        parse_recovering(broken, ParserOptions::default())
    );
}

#[test]
fn test_tree_serializes_to_json() {
    let program = parse("a;", ParserOptions::module()).unwrap();
    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(json["source_type"], "module");
    assert_eq!(json["body"][0]["span"], serde_json::json!({ "start": 0, "end": 2 }));
    assert_eq!(json["body"][0]["kind"]["Expr"]["kind"]["Ident"], "a");
}
