//! sable-parser: recursive descent parser for a JavaScript-family grammar
//!
//! # Design Principles
//!
//! 1. **Everything is an Expression, Pattern, or Statement**
//!    - Expressions: `foo(1)`, `a + b`, `x.y`
//!    - Patterns: `a`, `[a, b]`, `{x: y}`
//!    - Statements: `let a = 1;`, `if (x) {}`, `return x;`
//!
//! 2. **Tokens behind a stream**
//!    - The parser reads through the [`TokenStream`] trait
//!    - Speculative parses take a checkpoint and roll back on failure
//!
//! 3. **Context by value**
//!    - Grammar flags (`in` allowed, generator, async, strict) travel as a
//!      `Copy` [`Context`](context::Context) argument
//!
//! 4. **Recovery**
//!    - A statement that fails to parse becomes a `StmtKind::Error`
//!      placeholder and parsing continues at the next statement
//!
//! # Example
//!
//! ```
//! use sable_parser::{parse, print, ParserOptions};
//!
//! let program = parse("const x = 1 + 2;", ParserOptions::default()).unwrap();
//! assert_eq!(print(&program), "const x = 1 + 2;\n");
//! ```

pub mod ast;
pub mod codegen;
pub mod context;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod precedence;
pub mod span;
pub mod stream;
pub mod token;
pub mod visit;

mod class;
mod expr;
mod module;

// Re-exports
pub use ast::{Program, SourceType};
pub use codegen::{Codegen, CodegenOptions};
pub use error::{Diagnostics, ErrorKind, LexError, SyntaxError};
pub use lexer::Lexer;
pub use parser::{Parser, ParserOptions, Recovered};
pub use span::{LineIndex, Span};
pub use stream::{TokenBuffer, TokenStream};
pub use token::{Token, TokenKind};

/// Parse `source` into a [`Program`]. Fails with every error found if the
/// source has any syntax error.
pub fn parse(source: &str, options: ParserOptions) -> Result<Program, Diagnostics> {
    Parser::new(source, options).parse()
}

/// Parse `source`, keeping the tree (with error placeholders) alongside the
/// errors whenever no fatal error stopped the parse. See
/// [`Parser::parse_recovering`] for which errors leave a placeholder.
pub fn parse_recovering(source: &str, options: ParserOptions) -> Recovered {
    Parser::new(source, options).parse_recovering()
}

/// Pretty-print a program with default options.
pub fn print(program: &Program) -> String {
    Codegen::new(program, CodegenOptions::default()).generate()
}
