//! Rendering syntax errors for people and for machines.

use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use sable_parser::{LineIndex, SyntaxError};
use serde::Serialize;

/// One syntax error in a JSON report. Lines and columns are 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub start: u32,
    pub end: u32,
}

impl ErrorReport {
    pub fn new(error: &SyntaxError, index: &LineIndex) -> Self {
        let (line, column) = index.line_col(error.span.start);
        Self {
            code: error.code(),
            message: error.to_string(),
            line: line + 1,
            column: column + 1,
            start: error.span.start,
            end: error.span.end,
        }
    }
}

pub fn error_reports(errors: &[SyntaxError], source: &str) -> Vec<ErrorReport> {
    let index = LineIndex::new(source);
    errors.iter().map(|error| ErrorReport::new(error, &index)).collect()
}

/// A labelled miette report pointing into `source`.
pub fn to_report(error: &SyntaxError, name: &str, source: &str) -> Report {
    let label = match &error.kind {
        sable_parser::ErrorKind::UnexpectedToken { expected, .. }
        | sable_parser::ErrorKind::UnexpectedEof { expected } if !expected.is_empty() => {
            format!("expected {}", expected.join(" or "))
        }
        _ => "here".to_string(),
    };
    let diagnostic = MietteDiagnostic::new(error.to_string())
        .with_code(format!("sable::{}", error.code()))
        .with_label(LabeledSpan::at(error.span.range(), label));
    Report::new(diagnostic).with_source_code(NamedSource::new(name, source.to_string()))
}

/// Write every error to stderr as a miette diagnostic.
pub fn emit(errors: &[SyntaxError], name: &str, source: &str) {
    for error in errors {
        eprintln!("{:?}", to_report(error, name, source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_parser::{parse_recovering, ParserOptions};

    #[test]
    fn test_error_report_positions() {
        let source = "let a = 1;\nb = ;";
        let recovered = parse_recovering(source, ParserOptions::default());
        let reports = error_reports(&recovered.errors, source);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].code, "UnexpectedToken");
        assert_eq!((reports[0].line, reports[0].column), (2, 5));
        assert_eq!(reports[0].start, 15);
    }

    #[test]
    fn test_report_carries_code() {
        let recovered = parse_recovering("try {}", ParserOptions::default());
        let report = to_report(&recovered.errors[0], "t.js", "try {}");
        let code = report.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("sable::IllegalCatchlessTry"));
    }
}
