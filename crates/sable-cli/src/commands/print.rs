use crate::commands::{Input, ParseFlags};
use crate::diagnostic;
use miette::Result;
use sable_parser::{parse, Codegen, CodegenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Run the print command. Nothing is printed unless the input parses cleanly.
pub fn run(path: &Path, flags: ParseFlags, indent: usize) -> Result<bool> {
    let input = Input::load(path, flags)?;
    let program = match parse(&input.source, input.options) {
        Ok(program) => program,
        Err(errors) => {
            diagnostic::emit(errors.errors(), &input.name, &input.source);
            return Ok(false);
        }
    };

    let options = CodegenOptions { indent: " ".repeat(indent) };
    let output = Codegen::new(&program, options).generate();
    debug!(file = %input.name, bytes = output.len(), "printed");

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = stdout.write_all(output.as_bytes()) {
        // A closed pipe (`sable print f.js | head`) is not a failure.
        if err.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(miette::miette!("failed to write output: {err}"));
        }
    }
    Ok(true)
}
