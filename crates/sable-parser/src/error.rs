//! Error types for lexing and parsing.

use thiserror::Error;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// A problem found while scanning a single token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated template literal")]
    UnterminatedTemplate,

    #[error("unterminated regular expression")]
    UnterminatedRegex,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("invalid number literal")]
    InvalidNumber,
}

impl LexError {
    /// Errors that run to the end of the input leave nothing to resynchronize on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LexError::UnterminatedTemplate | LexError::UnterminatedComment)
    }
}

/// What went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unexpected {found}{}", expected_suffix(.expected))]
    UnexpectedToken {
        found: String,
        expected: Vec<String>,
    },

    #[error("unexpected end of input{}", expected_suffix(.expected))]
    UnexpectedEof { expected: Vec<String> },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("invalid destructuring pattern: {0}")]
    InvalidPattern(&'static str),

    #[error("a pattern may contain only one rest element")]
    DuplicateRestElement,

    #[error("missing catch or finally after try")]
    IllegalCatchlessTry,

    #[error("`{word}` cannot be used here")]
    ReservedWordMisuse { word: String },

    #[error("cannot mix `??` with `||` or `&&` without parentheses")]
    MixedCoalesce,

    #[error("missing initializer in {0} declaration")]
    MissingInitializer(&'static str),

    #[error("invalid class member: {0}")]
    InvalidClassMember(&'static str),

    #[error("private name `#{0}` is already declared")]
    DuplicatePrivateName(String),

    #[error("import and export may only appear at the top level of a module")]
    IllegalModuleItem,

    #[error("{0} is not allowed in strict mode")]
    StrictModeViolation(&'static str),

    #[error("{0}")]
    InvalidSyntax(&'static str),

    #[error("expression nesting exceeds the configured limit")]
    NestingTooDeep,

    #[error(transparent)]
    Lex(#[from] LexError),
}

fn expected_suffix(expected: &[String]) -> String {
    match expected {
        [] => String::new(),
        [only] => format!(", expected {only}"),
        [init @ .., last] => format!(", expected one of {} or {last}", init.join(", ")),
    }
}

/// A syntax error with its source location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Error for `token` appearing where one of `expected` was required.
    pub fn unexpected(token: &Token, expected: &[&str]) -> Self {
        let expected = expected.iter().map(ToString::to_string).collect();
        let kind = match &token.kind {
            TokenKind::Eof => ErrorKind::UnexpectedEof { expected },
            TokenKind::Error(err) => ErrorKind::Lex(err.clone()),
            found => ErrorKind::UnexpectedToken { found: found.to_string(), expected },
        };
        Self::new(kind, token.span)
    }

    /// Fatal errors stop the parse: no resynchronization point remains.
    pub fn is_fatal(&self) -> bool {
        match &self.kind {
            ErrorKind::UnexpectedEof { .. } | ErrorKind::NestingTooDeep => true,
            ErrorKind::Lex(err) => err.is_fatal(),
            _ => false,
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn code(&self) -> &'static str {
        match &self.kind {
            ErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorKind::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorKind::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorKind::InvalidPattern(_) => "InvalidPattern",
            ErrorKind::DuplicateRestElement => "DuplicateRestElement",
            ErrorKind::IllegalCatchlessTry => "IllegalCatchlessTry",
            ErrorKind::ReservedWordMisuse { .. } => "ReservedWordMisuse",
            ErrorKind::MixedCoalesce => "MixedCoalesce",
            ErrorKind::MissingInitializer(_) => "MissingInitializer",
            ErrorKind::InvalidClassMember(_) => "InvalidClassMember",
            ErrorKind::DuplicatePrivateName(_) => "DuplicatePrivateName",
            ErrorKind::IllegalModuleItem => "IllegalModuleItem",
            ErrorKind::StrictModeViolation(_) => "StrictModeViolation",
            ErrorKind::InvalidSyntax(_) => "InvalidSyntax",
            ErrorKind::NestingTooDeep => "NestingTooDeep",
            ErrorKind::Lex(_) => "LexError",
        }
    }
}

/// Result type used throughout the parser.
pub type PResult<T> = Result<T, SyntaxError>;

/// The non-empty, source-ordered list of errors from a failed parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", summary(.0))]
pub struct Diagnostics(Vec<SyntaxError>);

fn summary(errors: &[SyntaxError]) -> String {
    match errors {
        [] => "no syntax errors".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

impl Diagnostics {
    /// Wrap a list of errors, or `None` if the list is empty.
    pub fn new(errors: Vec<SyntaxError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<SyntaxError> {
        self.0
    }

    pub(crate) fn push(&mut self, error: SyntaxError) {
        self.0.push(error);
    }
}

impl From<SyntaxError> for Diagnostics {
    fn from(error: SyntaxError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for Diagnostics {
    type Item = SyntaxError;
    type IntoIter = std::vec::IntoIter<SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_message() {
        let token = Token::new(TokenKind::Comma, Span::new(3, 4), false);
        let err = SyntaxError::unexpected(&token, &["`)`", "`]`"]);
        assert_eq!(err.to_string(), "unexpected `,`, expected one of `)` or `]`");
        assert_eq!(err.code(), "UnexpectedToken");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_eof_is_fatal() {
        let token = Token::new(TokenKind::Eof, Span::empty(9), true);
        let err = SyntaxError::unexpected(&token, &["`}`"]);
        assert_eq!(err.to_string(), "unexpected end of input, expected `}`");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_diagnostics_summary() {
        assert!(Diagnostics::new(Vec::new()).is_none());
        let errors = vec![
            SyntaxError::new(ErrorKind::IllegalCatchlessTry, Span::new(0, 3)),
            SyntaxError::new(ErrorKind::MixedCoalesce, Span::new(5, 9)),
        ];
        let diags = Diagnostics::new(errors).unwrap();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.to_string(), "missing catch or finally after try (and 1 more)");
    }
}
