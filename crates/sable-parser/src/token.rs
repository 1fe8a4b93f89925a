//! Token types produced by the lexer and consumed through a
//! [`TokenStream`](crate::stream::TokenStream).
//!
//! Only reserved words get their own variants. Contextual words such as
//! `async`, `await`, `yield`, `let`, `static`, `get`, `set`, `of`, `from` and
//! `as` are plain identifiers; the parser decides what they mean from its
//! [`Context`](crate::context::Context).

use std::fmt;

use crate::error::LexError;
use crate::span::Span;

/// A token with its kind, source location and line-terminator adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// At least one line terminator separates this token from the previous one.
    pub had_newline_before: bool,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, had_newline_before: bool) -> Self {
        Self { kind, span, had_newline_before }
    }

    /// Whether this token is the identifier `word` (used for contextual keywords).
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name == word)
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Names and literals ===
    /// Identifier, including contextual keywords: `foo`, `async`, `let`
    Identifier(String),
    /// Private name: `#count`
    PrivateName(String),
    /// String literal with escapes already decoded
    String(String),
    /// Number literal: `42`, `3.14`, `0xff`, `1_000`
    Number(f64),
    /// BigInt literal digits including any radix prefix: `42n` -> `42`
    BigInt(String),
    /// Regular expression: `/pattern/flags`
    Regex { pattern: String, flags: String },
    /// Template with no substitutions: `` `text` ``
    TemplateNoSub(String),
    /// Template head: `` `text${ ``
    TemplateHead(String),
    /// Template middle: `` }text${ ``
    TemplateMiddle(String),
    /// Template tail: `` }text` ``
    TemplateTail(String),

    // === Reserved words ===
    Var,
    Const,
    Function,
    Class,
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,
    Try,
    Catch,
    Finally,
    Throw,
    New,
    Delete,
    Typeof,
    Void,
    In,
    Instanceof,
    This,
    Super,
    Null,
    True,
    False,
    Import,
    Export,
    Extends,
    With,
    Debugger,
    Enum,

    // === Punctuation ===
    LParen,      // (
    RParen,      // )
    LBrace,      // {
    RBrace,      // }
    LBracket,    // [
    RBracket,    // ]
    Semicolon,   // ;
    Comma,       // ,
    Colon,       // :
    Dot,         // .
    Question,    // ?
    QuestionDot, // ?.
    Arrow,       // =>
    Spread,      // ...

    // === Assignment ===
    Eq,                 // =
    PlusEq,             // +=
    MinusEq,            // -=
    StarEq,             // *=
    SlashEq,            // /=
    PercentEq,          // %=
    StarStarEq,         // **=
    AmpEq,              // &=
    PipeEq,             // |=
    CaretEq,            // ^=
    LtLtEq,             // <<=
    GtGtEq,             // >>=
    GtGtGtEq,           // >>>=
    AmpAmpEq,           // &&=
    PipePipeEq,         // ||=
    QuestionQuestionEq, // ??=

    // === Comparison ===
    EqEq,     // ==
    EqEqEq,   // ===
    BangEq,   // !=
    BangEqEq, // !==
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=

    // === Arithmetic ===
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    StarStar,   // **
    PlusPlus,   // ++
    MinusMinus, // --

    // === Bitwise ===
    Amp,    // &
    Pipe,   // |
    Caret,  // ^
    Tilde,  // ~
    LtLt,   // <<
    GtGt,   // >>
    GtGtGt, // >>>

    // === Logical ===
    AmpAmp,           // &&
    PipePipe,         // ||
    Bang,             // !
    QuestionQuestion, // ??

    // === Special ===
    Eof,
    /// Lexical error, surfaced by the parser when it reaches this token.
    Error(LexError),
}

impl TokenKind {
    /// Text of a reserved word, or `None` for any other token.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::Function => "function",
            TokenKind::Class => "class",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::Throw => "throw",
            TokenKind::New => "new",
            TokenKind::Delete => "delete",
            TokenKind::Typeof => "typeof",
            TokenKind::Void => "void",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::This => "this",
            TokenKind::Super => "super",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Import => "import",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::With => "with",
            TokenKind::Debugger => "debugger",
            TokenKind::Enum => "enum",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword_text().is_some()
    }

    /// Text of a punctuator or operator, or `None` for any other token.
    pub fn punct_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Question => "?",
            TokenKind::QuestionDot => "?.",
            TokenKind::Arrow => "=>",
            TokenKind::Spread => "...",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::StarStarEq => "**=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::LtLtEq => "<<=",
            TokenKind::GtGtEq => ">>=",
            TokenKind::GtGtGtEq => ">>>=",
            TokenKind::AmpAmpEq => "&&=",
            TokenKind::PipePipeEq => "||=",
            TokenKind::QuestionQuestionEq => "??=",
            TokenKind::EqEq => "==",
            TokenKind::EqEqEq => "===",
            TokenKind::BangEq => "!=",
            TokenKind::BangEqEq => "!==",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::StarStar => "**",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::LtLt => "<<",
            TokenKind::GtGt => ">>",
            TokenKind::GtGtGt => ">>>",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Bang => "!",
            TokenKind::QuestionQuestion => "??",
            _ => return None,
        };
        Some(text)
    }

    /// Check if this is an assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::StarStarEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::LtLtEq
                | TokenKind::GtGtEq
                | TokenKind::GtGtGtEq
                | TokenKind::AmpAmpEq
                | TokenKind::PipePipeEq
                | TokenKind::QuestionQuestionEq
        )
    }

    /// Reserved words that always begin a statement. Error recovery stops
    /// skipping when it reaches one of these.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Class
                | TokenKind::If
                | TokenKind::Switch
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
                | TokenKind::Try
                | TokenKind::Throw
                | TokenKind::With
                | TokenKind::Debugger
                | TokenKind::Import
                | TokenKind::Export
        )
    }

    /// Whether the token can end an operand, so that a following `/` is
    /// division rather than the start of a regex.
    pub(crate) fn ends_operand(&self) -> bool {
        match self {
            TokenKind::Identifier(name) => !matches!(name.as_str(), "yield" | "await"),
            TokenKind::PrivateName(_)
            | TokenKind::String(_)
            | TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::Regex { .. }
            | TokenKind::TemplateNoSub(_)
            | TokenKind::TemplateTail(_)
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::This
            | TokenKind::Super
            | TokenKind::Null
            | TokenKind::True
            | TokenKind::False
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus => true,
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.keyword_text().or_else(|| self.punct_text()) {
            return write!(f, "`{text}`");
        }
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::PrivateName(name) => write!(f, "private name `#{name}`"),
            TokenKind::String(_) => f.write_str("string literal"),
            TokenKind::Number(_) => f.write_str("number literal"),
            TokenKind::BigInt(_) => f.write_str("bigint literal"),
            TokenKind::Regex { .. } => f.write_str("regular expression"),
            TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => f.write_str("template literal"),
            TokenKind::TemplateMiddle(_) | TokenKind::TemplateTail(_) => f.write_str("template continuation"),
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Error(err) => write!(f, "{err}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

/// Look up a reserved word.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    let kind = match s {
        "var" => TokenKind::Var,
        "const" => TokenKind::Const,
        "function" => TokenKind::Function,
        "class" => TokenKind::Class,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "return" => TokenKind::Return,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "throw" => TokenKind::Throw,
        "new" => TokenKind::New,
        "delete" => TokenKind::Delete,
        "typeof" => TokenKind::Typeof,
        "void" => TokenKind::Void,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "this" => TokenKind::This,
        "super" => TokenKind::Super,
        "null" => TokenKind::Null,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "import" => TokenKind::Import,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "with" => TokenKind::With,
        "debugger" => TokenKind::Debugger,
        "enum" => TokenKind::Enum,
        _ => return None,
    };
    Some(kind)
}

/// Words reserved only in strict mode code.
pub fn is_strict_reserved(word: &str) -> bool {
    matches!(
        word,
        "implements" | "interface" | "let" | "package" | "private" | "protected" | "public" | "static" | "yield"
    )
}
