use crate::commands::{Input, ParseFlags};
use crate::diagnostic::{self, ErrorReport};
use miette::{IntoDiagnostic, Result};
use sable_parser::{parse_recovering, SourceType};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    source_type: SourceType,
    errors: Vec<ErrorReport>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    files: Vec<FileReport>,
    error_count: usize,
}

/// Run the check command over every file. Returns whether all were clean.
pub fn run(paths: &[PathBuf], flags: ParseFlags, json: bool) -> Result<bool> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let input = Input::load(path, flags)?;
        let recovered = parse_recovering(&input.source, input.options);
        if recovered.program.is_none() {
            warn!(file = %input.name, "parse stopped at a fatal error");
        }
        if !json {
            diagnostic::emit(&recovered.errors, &input.name, &input.source);
        }
        files.push(FileReport {
            errors: diagnostic::error_reports(&recovered.errors, &input.source),
            path: input.name,
            source_type: input.options.source_type,
        });
    }

    let error_count = files.iter().map(|file| file.errors.len()).sum();
    info!(files = files.len(), errors = error_count, "check finished");

    if json {
        let report = CheckReport { files, error_count };
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else if error_count == 0 {
        println!("{} file(s) checked, no syntax errors", files.len());
    } else {
        eprintln!("{error_count} syntax error(s) in {} file(s)", files.iter().filter(|f| !f.errors.is_empty()).count());
    }

    Ok(error_count == 0)
}
