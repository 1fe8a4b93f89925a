//! Subcommand implementations.

pub mod check;
pub mod parse;
pub mod print;

use miette::{IntoDiagnostic, Result, WrapErr};
use sable_parser::{ParserOptions, SourceType};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parser flags shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct ParseFlags {
    pub module: bool,
    pub strict: bool,
    pub max_depth: usize,
}

/// A loaded source file.
pub struct Input {
    /// Display name used in diagnostics and reports.
    pub name: String,
    pub source: String,
    pub options: ParserOptions,
}

impl Input {
    /// Read `path` (or stdin for `-`) and pick the parser options for it.
    pub fn load(path: &Path, flags: ParseFlags) -> Result<Self> {
        let (name, source) = if path.as_os_str() == "-" {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            ("<stdin>".to_string(), source)
        } else {
            let source = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), source)
        };

        let options = options_for(path, flags);
        debug!(file = %name, bytes = source.len(), module = options.is_module(), "loaded input");
        Ok(Self { name, source, options })
    }
}

/// `--module` or a `.mjs` extension selects module code.
fn options_for(path: &Path, flags: ParseFlags) -> ParserOptions {
    let is_mjs = path.extension().is_some_and(|ext| ext == "mjs");
    let source_type = if flags.module || is_mjs { SourceType::Module } else { SourceType::Script };
    ParserOptions::default()
        .with_source_type(source_type)
        .with_strict(flags.strict)
        .with_max_depth(flags.max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> ParseFlags {
        ParseFlags { module: false, strict: false, max_depth: 64 }
    }

    #[test]
    fn test_source_type_from_extension() {
        assert!(options_for(Path::new("a.mjs"), flags()).is_module());
        assert!(!options_for(Path::new("a.js"), flags()).is_module());
        assert!(!options_for(Path::new("-"), flags()).is_module());
    }

    #[test]
    fn test_flags_map_onto_options() {
        let flags = ParseFlags { module: true, strict: true, max_depth: 9 };
        let options = options_for(Path::new("a.cjs"), flags);
        assert!(options.is_module());
        assert!(options.strict);
        assert_eq!(options.max_depth, 9);
    }
}
