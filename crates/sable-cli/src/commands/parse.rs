use crate::commands::{Input, ParseFlags};
use crate::diagnostic::{self, ErrorReport};
use miette::{IntoDiagnostic, Result};
use sable_parser::ast::{Class, Expr, Function, Pattern, Program, Stmt, StmtKind};
use sable_parser::visit::{walk_class, walk_expr, walk_function, walk_pattern, walk_stmt, Visit};
use sable_parser::{parse_recovering, SourceType};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Node counts for the summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeCounts {
    pub statements: usize,
    pub expressions: usize,
    pub patterns: usize,
    pub functions: usize,
    pub classes: usize,
    /// `StmtKind::Error` placeholders left by recovery.
    pub error_nodes: usize,
}

impl NodeCounts {
    pub fn of(program: &Program) -> Self {
        let mut counts = Self::default();
        counts.visit_program(program);
        counts
    }
}

impl Visit for NodeCounts {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.statements += 1;
        if stmt.kind == StmtKind::Error {
            self.error_nodes += 1;
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.expressions += 1;
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        self.patterns += 1;
        walk_pattern(self, pattern);
    }

    fn visit_function(&mut self, function: &Function) {
        self.functions += 1;
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &Class) {
        self.classes += 1;
        walk_class(self, class);
    }
}

#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    path: &'a str,
    source_type: SourceType,
    /// False when a fatal error stopped the parse before the end.
    complete: bool,
    counts: Option<NodeCounts>,
    errors: Vec<ErrorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ast: Option<&'a Program>,
}

/// Run the parse command. Returns whether the input parsed cleanly.
pub fn run(path: &Path, flags: ParseFlags, ast: bool, json: bool) -> Result<bool> {
    let input = Input::load(path, flags)?;
    let recovered = parse_recovering(&input.source, input.options);
    let counts = recovered.program.as_ref().map(NodeCounts::of);
    info!(file = %input.name, errors = recovered.errors.len(), "parsed");

    if json {
        let report = ParseReport {
            path: &input.name,
            source_type: input.options.source_type,
            complete: recovered.program.is_some(),
            counts,
            errors: diagnostic::error_reports(&recovered.errors, &input.source),
            ast: if ast { recovered.program.as_ref() } else { None },
        };
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else {
        diagnostic::emit(&recovered.errors, &input.name, &input.source);
        match counts {
            Some(counts) => println!(
                "{}: {} statements, {} expressions, {} patterns, {} functions, {} classes",
                input.name, counts.statements, counts.expressions, counts.patterns, counts.functions, counts.classes
            ),
            None => println!("{}: parse aborted", input.name),
        }
        if ast {
            if let Some(program) = &recovered.program {
                let json = serde_json::to_string_pretty(program).into_diagnostic()?;
                println!("{json}");
            }
        }
    }

    Ok(recovered.is_clean())
}
