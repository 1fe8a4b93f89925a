//! Lexer (tokenizer).
//!
//! Converts source text into tokens. The whole source is tokenized ahead of
//! parsing (see [`Lexer::tokenize`]) so that the parser can look ahead and
//! roll back freely. Two decisions that normally need parser feedback are made
//! here instead:
//!
//! - regex vs division, from the previous significant token;
//! - where a template substitution ends, from a stack of brace depths.
//!
//! Every token records whether a line terminator preceded it, which is all the
//! parser needs for automatic semicolon insertion.

use unicode_xid::UnicodeXID;

use crate::error::LexError;
use crate::span::Span;
use crate::token::{keyword_from_str, Token, TokenKind};

/// The lexer state.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    /// Source code as bytes (for fast indexing).
    bytes: &'a [u8],
    /// Current byte position.
    pos: usize,
    /// Start position of the current token.
    token_start: usize,
    /// Whether a `/` at this point starts a regex.
    allow_regex: bool,
    /// A line terminator was skipped before the current token.
    had_newline: bool,
    /// Brace depth at each open `${` substitution.
    template_stack: Vec<usize>,
    /// Number of currently open `{`.
    brace_depth: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            token_start: 0,
            allow_regex: true,
            had_newline: false,
            template_stack: Vec::new(),
            brace_depth: 0,
        };
        // Hashbang line: `#!/usr/bin/env node`
        if source.starts_with("#!") {
            lexer.skip_line_comment();
        }
        lexer
    }

    /// Tokenize the whole source. The returned vector always ends with a
    /// single [`TokenKind::Eof`] token.
    pub fn tokenize(source: &'a str) -> Vec<Token> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
        loop {
            let token = lexer.next_token();
            let done = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Get the current byte position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.had_newline = false;
        if let Err(err) = self.skip_whitespace_and_comments() {
            return self.make_token(TokenKind::Error(err));
        }
        self.token_start = self.pos;

        if self.is_eof() {
            return self.make_token(TokenKind::Eof);
        }

        let ch = self.current();
        let kind = match ch {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | b'\\' => self.scan_identifier_or_keyword(),
            b'0'..=b'9' => self.scan_number(),
            b'"' | b'\'' => self.scan_string(ch),
            b'`' => {
                self.advance();
                self.scan_template_part(true)
            }
            b'#' => self.scan_private_name(),

            b'(' => { self.advance(); TokenKind::LParen }
            b')' => { self.advance(); TokenKind::RParen }
            b'{' => {
                self.advance();
                self.brace_depth += 1;
                TokenKind::LBrace
            }
            b'}' => self.scan_right_brace(),
            b'[' => { self.advance(); TokenKind::LBracket }
            b']' => { self.advance(); TokenKind::RBracket }
            b';' => { self.advance(); TokenKind::Semicolon }
            b',' => { self.advance(); TokenKind::Comma }
            b':' => { self.advance(); TokenKind::Colon }
            b'~' => { self.advance(); TokenKind::Tilde }

            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'+' => self.scan_plus(),
            b'-' => self.scan_minus(),
            b'*' => self.scan_star(),
            b'/' => self.scan_slash(),
            b'%' => self.scan_percent(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_bang(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_pipe(),
            b'^' => self.scan_caret(),

            _ => {
                let c = self.current_char();
                if is_id_start(c) {
                    self.scan_identifier_or_keyword()
                } else {
                    self.pos += c.len_utf8();
                    TokenKind::Error(LexError::UnexpectedChar(c))
                }
            }
        };

        self.allow_regex = !kind.ends_operand();
        self.make_token(kind)
    }

    // === Helper methods ===

    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn current(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_char(&self) -> u8 {
        self.bytes.get(self.pos + 1).copied().unwrap_or(0)
    }

    /// The full (possibly multi-byte) character at the cursor.
    fn current_char(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            Span::new(self.token_start as u32, self.pos as u32),
            self.had_newline,
        )
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    // === Whitespace and comments ===

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.current() {
                b' ' | b'\t' | 0x0b | 0x0c => self.advance(),
                b'\r' | b'\n' => {
                    self.had_newline = true;
                    self.advance();
                }
                b'/' if self.peek_char() == b'/' => self.skip_line_comment(),
                b'/' if self.peek_char() == b'*' => self.skip_block_comment()?,
                c if c >= 0x80 => {
                    let ch = self.current_char();
                    match ch {
                        '\u{2028}' | '\u{2029}' => self.had_newline = true,
                        '\u{feff}' => {}
                        _ if ch.is_whitespace() => {}
                        _ => return Ok(()),
                    }
                    self.pos += ch.len_utf8();
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_eof() && !matches!(self.current(), b'\n' | b'\r') {
            if self.current() == 0xe2 && matches!(self.current_char(), '\u{2028}' | '\u{2029}') {
                return;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        self.token_start = self.pos;
        self.advance_n(2); // Skip /*
        while !self.is_eof() {
            match self.current() {
                b'*' if self.peek_char() == b'/' => {
                    self.advance_n(2);
                    return Ok(());
                }
                b'\n' | b'\r' => self.had_newline = true,
                0xe2 if matches!(self.current_char(), '\u{2028}' | '\u{2029}') => self.had_newline = true,
                _ => {}
            }
            self.advance();
        }
        Err(LexError::UnterminatedComment)
    }

    // === Token scanning ===

    fn scan_identifier_or_keyword(&mut self) -> TokenKind {
        match self.scan_identifier_name() {
            Ok((name, escaped)) => {
                if escaped {
                    TokenKind::Identifier(name)
                } else {
                    keyword_from_str(&name).unwrap_or(TokenKind::Identifier(name))
                }
            }
            Err(err) => TokenKind::Error(err),
        }
    }

    /// Scan an IdentifierName. Returns the decoded name and whether it
    /// contained a `\u` escape (escaped words never act as keywords).
    fn scan_identifier_name(&mut self) -> Result<(String, bool), LexError> {
        let start = self.pos;
        let mut run_start = start;
        let mut name = String::new();
        let mut escaped = false;
        let mut first = true;
        while !self.is_eof() {
            match self.current() {
                b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.advance(),
                b'0'..=b'9' if !first => self.advance(),
                b'\\' => {
                    name.push_str(self.slice(run_start, self.pos));
                    if self.peek_char() != b'u' {
                        self.advance();
                        return Err(LexError::UnexpectedChar('\\'));
                    }
                    self.advance_n(2);
                    let c = self.scan_unicode_escape().ok_or(LexError::UnexpectedChar('\\'))?;
                    let valid = if first { is_id_start(c) } else { is_id_continue(c) };
                    if !valid {
                        return Err(LexError::UnexpectedChar(c));
                    }
                    name.push(c);
                    escaped = true;
                    run_start = self.pos;
                }
                c if c >= 0x80 => {
                    let ch = self.current_char();
                    let valid = if first { is_id_start(ch) } else { is_id_continue(ch) };
                    if !valid {
                        break;
                    }
                    self.pos += ch.len_utf8();
                }
                _ => break,
            }
            first = false;
        }
        if escaped {
            name.push_str(self.slice(run_start, self.pos));
            Ok((name, true))
        } else {
            Ok((self.slice(start, self.pos).to_string(), false))
        }
    }

    fn scan_private_name(&mut self) -> TokenKind {
        self.advance(); // Skip #
        let next = self.current_char();
        if self.is_eof() || !(is_id_start(next) || next == '\\') {
            return TokenKind::Error(LexError::UnexpectedChar('#'));
        }
        match self.scan_identifier_name() {
            Ok((name, _)) => TokenKind::PrivateName(name),
            Err(err) => TokenKind::Error(err),
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let kind = if self.current() == b'0' {
            match self.peek_char() {
                b'x' | b'X' => self.scan_radix_number(16),
                b'b' | b'B' => self.scan_radix_number(2),
                b'o' | b'O' => self.scan_radix_number(8),
                _ => self.scan_decimal_number(),
            }
        } else {
            self.scan_decimal_number()
        };

        // `3in` and `1_` are not numbers followed by something else.
        if !self.is_eof() && (is_id_start(self.current_char()) || self.current() == b'\\') {
            while !self.is_eof() && is_id_continue(self.current_char()) {
                self.pos += self.current_char().len_utf8();
            }
            return TokenKind::Error(LexError::InvalidNumber);
        }
        kind
    }

    fn scan_decimal_number(&mut self) -> TokenKind {
        let start = self.pos;
        self.scan_digits(10);

        let mut is_integer = true;
        if self.current() == b'.' {
            is_integer = false;
            self.advance();
            self.scan_digits(10);
        }

        if matches!(self.current(), b'e' | b'E') {
            is_integer = false;
            self.advance();
            if matches!(self.current(), b'+' | b'-') {
                self.advance();
            }
            if !self.current().is_ascii_digit() {
                return TokenKind::Error(LexError::InvalidNumber);
            }
            self.scan_digits(10);
        }

        let text: String = self.slice(start, self.pos).chars().filter(|&c| c != '_').collect();

        if is_integer && self.current() == b'n' {
            self.advance();
            return TokenKind::BigInt(text);
        }

        match text.parse::<f64>() {
            Ok(value) => TokenKind::Number(value),
            Err(_) => TokenKind::Error(LexError::InvalidNumber),
        }
    }

    fn scan_radix_number(&mut self, radix: u32) -> TokenKind {
        let start = self.pos;
        self.advance_n(2); // Skip 0x / 0b / 0o
        let digits_start = self.pos;
        self.scan_digits(radix);
        if self.pos == digits_start {
            return TokenKind::Error(LexError::InvalidNumber);
        }

        if self.current() == b'n' {
            let text: String = self.slice(start, self.pos).chars().filter(|&c| c != '_').collect();
            self.advance();
            return TokenKind::BigInt(text);
        }

        let mut value = 0f64;
        for c in self.slice(digits_start, self.pos).chars() {
            if let Some(digit) = c.to_digit(radix) {
                value = value * f64::from(radix) + f64::from(digit);
            }
        }
        TokenKind::Number(value)
    }

    /// Consume digits of `radix`, allowing single `_` separators between digits.
    fn scan_digits(&mut self, radix: u32) {
        let mut last_was_digit = false;
        loop {
            let c = self.current();
            if (c as char).is_digit(radix) {
                last_was_digit = true;
                self.advance();
            } else if c == b'_' && last_was_digit && (self.peek_char() as char).is_digit(radix) {
                last_was_digit = false;
                self.advance();
            } else {
                return;
            }
        }
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        self.advance(); // Skip opening quote
        let mut value = String::new();
        loop {
            if self.is_eof() {
                return TokenKind::Error(LexError::UnterminatedString);
            }
            match self.current() {
                c if c == quote => {
                    self.advance();
                    return TokenKind::String(value);
                }
                b'\n' | b'\r' => return TokenKind::Error(LexError::UnterminatedString),
                b'\\' => {
                    self.advance();
                    if let Some(c) = self.scan_escape_sequence() {
                        value.push(c);
                    }
                }
                c if c < 0x80 => {
                    value.push(c as char);
                    self.advance();
                }
                _ => {
                    let ch = self.current_char();
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// Decode the escape after a backslash. Line continuations yield `None`.
    fn scan_escape_sequence(&mut self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let ch = self.current();
        match ch {
            b'\r' => {
                self.advance();
                if self.current() == b'\n' {
                    self.advance();
                }
                return None;
            }
            b'\n' => {
                self.advance();
                return None;
            }
            c if c >= 0x80 => {
                let c = self.current_char();
                self.pos += c.len_utf8();
                return if matches!(c, '\u{2028}' | '\u{2029}') { None } else { Some(c) };
            }
            _ => {}
        }
        self.advance();

        let decoded = match ch {
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'v' => '\u{b}',
            b'0'..=b'7' => self.scan_legacy_octal(ch),
            b'x' => self.scan_hex_digits(2).and_then(char::from_u32).unwrap_or('\u{FFFD}'),
            b'u' => self.scan_unicode_escape().unwrap_or('\u{FFFD}'),
            _ => ch as char,
        };
        Some(decoded)
    }

    fn scan_legacy_octal(&mut self, first: u8) -> char {
        let mut value = u32::from(first - b'0');
        let max_len = if first <= b'3' { 3 } else { 2 };
        let mut len = 1;
        while len < max_len && matches!(self.current(), b'0'..=b'7') {
            value = value * 8 + u32::from(self.current() - b'0');
            self.advance();
            len += 1;
        }
        char::from_u32(value).unwrap_or('\u{FFFD}')
    }

    /// Decode `XXXX` or `{X...}` after `\u`, joining surrogate pairs.
    fn scan_unicode_escape(&mut self) -> Option<char> {
        let unit = if self.current() == b'{' {
            self.advance();
            let start = self.pos;
            while self.current().is_ascii_hexdigit() {
                self.advance();
            }
            let value = u32::from_str_radix(self.slice(start, self.pos), 16).ok()?;
            if self.current() != b'}' {
                return None;
            }
            self.advance();
            value
        } else {
            self.scan_hex_digits(4)?
        };

        if (0xD800..0xDC00).contains(&unit) && self.bytes[self.pos..].starts_with(b"\\u") {
            let saved = self.pos;
            self.advance_n(2);
            if let Some(low) = self.scan_hex_digits(4).filter(|low| (0xDC00..0xE000).contains(low)) {
                return char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00));
            }
            self.pos = saved;
        }
        Some(char::from_u32(unit).unwrap_or('\u{FFFD}'))
    }

    fn scan_hex_digits(&mut self, len: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..len {
            let digit = (self.current() as char).to_digit(16)?;
            value = value * 16 + digit;
            self.advance();
        }
        Some(value)
    }

    /// Scan template text up to the closing backtick or the next `${`.
    /// `is_start` selects NoSub/Head versus Tail/Middle.
    fn scan_template_part(&mut self, is_start: bool) -> TokenKind {
        let mut value = String::new();
        while !self.is_eof() {
            match self.current() {
                b'`' => {
                    self.advance();
                    return if is_start {
                        TokenKind::TemplateNoSub(value)
                    } else {
                        TokenKind::TemplateTail(value)
                    };
                }
                b'$' if self.peek_char() == b'{' => {
                    self.advance_n(2);
                    self.template_stack.push(self.brace_depth);
                    return if is_start {
                        TokenKind::TemplateHead(value)
                    } else {
                        TokenKind::TemplateMiddle(value)
                    };
                }
                b'\\' => {
                    self.advance();
                    if let Some(c) = self.scan_escape_sequence() {
                        value.push(c);
                    }
                }
                b'\r' => {
                    // CRLF and lone CR both cook to LF.
                    self.advance();
                    if self.current() == b'\n' {
                        self.advance();
                    }
                    value.push('\n');
                }
                c if c < 0x80 => {
                    value.push(c as char);
                    self.advance();
                }
                _ => {
                    let ch = self.current_char();
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        TokenKind::Error(LexError::UnterminatedTemplate)
    }

    fn scan_right_brace(&mut self) -> TokenKind {
        self.advance();
        if self.template_stack.last() == Some(&self.brace_depth) {
            self.template_stack.pop();
            return self.scan_template_part(false);
        }
        self.brace_depth = self.brace_depth.saturating_sub(1);
        TokenKind::RBrace
    }

    fn scan_regex(&mut self) -> TokenKind {
        self.advance(); // Skip opening /
        let pattern_start = self.pos;

        let mut in_class = false;
        loop {
            if self.is_eof() {
                return TokenKind::Error(LexError::UnterminatedRegex);
            }
            match self.current() {
                b'/' if !in_class => break,
                b'[' => in_class = true,
                b']' => in_class = false,
                b'\\' => {
                    self.advance();
                    if matches!(self.current(), b'\n' | b'\r') {
                        return TokenKind::Error(LexError::UnterminatedRegex);
                    }
                }
                b'\n' | b'\r' => return TokenKind::Error(LexError::UnterminatedRegex),
                _ => {}
            }
            if self.current() >= 0x80 {
                self.pos += self.current_char().len_utf8();
            } else if !self.is_eof() {
                self.advance();
            }
        }

        let pattern = self.slice(pattern_start, self.pos).to_string();
        self.advance(); // Skip closing /

        let flags_start = self.pos;
        while self.current().is_ascii_alphanumeric() {
            self.advance();
        }
        let flags = self.slice(flags_start, self.pos).to_string();

        TokenKind::Regex { pattern, flags }
    }

    // === Multi-character operators ===

    fn scan_dot(&mut self) -> TokenKind {
        if self.peek_char().is_ascii_digit() {
            return self.scan_decimal_number();
        }
        self.advance();
        if self.current() == b'.' && self.peek_char() == b'.' {
            self.advance_n(2);
            TokenKind::Spread
        } else {
            TokenKind::Dot
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'?' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::QuestionQuestionEq
                } else {
                    TokenKind::QuestionQuestion
                }
            }
            // `a?.5:b` is a conditional, not an optional chain.
            b'.' if !self.peek_char().is_ascii_digit() => {
                self.advance();
                TokenKind::QuestionDot
            }
            _ => TokenKind::Question,
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'+' => { self.advance(); TokenKind::PlusPlus }
            b'=' => { self.advance(); TokenKind::PlusEq }
            _ => TokenKind::Plus,
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'-' => { self.advance(); TokenKind::MinusMinus }
            b'=' => { self.advance(); TokenKind::MinusEq }
            _ => TokenKind::Minus,
        }
    }

    fn scan_star(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'*' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::StarStarEq
                } else {
                    TokenKind::StarStar
                }
            }
            b'=' => { self.advance(); TokenKind::StarEq }
            _ => TokenKind::Star,
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.allow_regex {
            return self.scan_regex();
        }
        self.advance();
        if self.current() == b'=' {
            self.advance();
            TokenKind::SlashEq
        } else {
            TokenKind::Slash
        }
    }

    fn scan_percent(&mut self) -> TokenKind {
        self.advance();
        if self.current() == b'=' {
            self.advance();
            TokenKind::PercentEq
        } else {
            TokenKind::Percent
        }
    }

    fn scan_equals(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'=' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::EqEqEq
                } else {
                    TokenKind::EqEq
                }
            }
            b'>' => { self.advance(); TokenKind::Arrow }
            _ => TokenKind::Eq,
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'=' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::BangEqEq
                } else {
                    TokenKind::BangEq
                }
            }
            _ => TokenKind::Bang,
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'<' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::LtLtEq
                } else {
                    TokenKind::LtLt
                }
            }
            b'=' => { self.advance(); TokenKind::LtEq }
            _ => TokenKind::Lt,
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'>' => {
                self.advance();
                match self.current() {
                    b'>' => {
                        self.advance();
                        if self.current() == b'=' {
                            self.advance();
                            TokenKind::GtGtGtEq
                        } else {
                            TokenKind::GtGtGt
                        }
                    }
                    b'=' => { self.advance(); TokenKind::GtGtEq }
                    _ => TokenKind::GtGt,
                }
            }
            b'=' => { self.advance(); TokenKind::GtEq }
            _ => TokenKind::Gt,
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'&' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::AmpAmpEq
                } else {
                    TokenKind::AmpAmp
                }
            }
            b'=' => { self.advance(); TokenKind::AmpEq }
            _ => TokenKind::Amp,
        }
    }

    fn scan_pipe(&mut self) -> TokenKind {
        self.advance();
        match self.current() {
            b'|' => {
                self.advance();
                if self.current() == b'=' {
                    self.advance();
                    TokenKind::PipePipeEq
                } else {
                    TokenKind::PipePipe
                }
            }
            b'=' => { self.advance(); TokenKind::PipeEq }
            _ => TokenKind::Pipe,
        }
    }

    fn scan_caret(&mut self) -> TokenKind {
        self.advance();
        if self.current() == b'=' {
            self.advance();
            TokenKind::CaretEq
        } else {
            TokenKind::Caret
        }
    }
}

fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && UnicodeXID::is_xid_start(c))
}

fn is_id_continue(c: char) -> bool {
    c == '$'
        || c == '_'
        || c.is_ascii_alphanumeric()
        || c == '\u{200c}'
        || c == '\u{200d}'
        || (!c.is_ascii() && UnicodeXID::is_xid_continue(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .into_iter()
            .map(|token| token.kind)
            .take_while(|kind| !matches!(kind, TokenKind::Eof))
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.into())
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            tokenize("foo bar _baz $qux café"),
            vec![ident("foo"), ident("bar"), ident("_baz"), ident("$qux"), ident("café")]
        );
    }

    #[test]
    fn test_keywords_and_contextual_words() {
        assert_eq!(
            tokenize("const let var function async"),
            vec![TokenKind::Const, ident("let"), TokenKind::Var, TokenKind::Function, ident("async")]
        );
    }

    #[test]
    fn test_escaped_keyword_is_identifier() {
        assert_eq!(tokenize(r"\u0069f"), vec![ident("if")]);
        assert_eq!(tokenize(r"\u{61}bc"), vec![ident("abc")]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokenize("42 3.14 0xff 0b101 0o77 1_000 .5 1e3 10n"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
                TokenKind::Number(255.0),
                TokenKind::Number(5.0),
                TokenKind::Number(63.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.5),
                TokenKind::Number(1000.0),
                TokenKind::BigInt("10".into()),
            ]
        );
        assert_eq!(tokenize("3in"), vec![TokenKind::Error(LexError::InvalidNumber)]);
    }

    #[test]
    fn test_member_access_on_integer() {
        assert_eq!(
            tokenize("1..toString"),
            vec![TokenKind::Number(1.0), TokenKind::Dot, ident("toString")]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize(r#""hello" 'wörld' "a\nb" "\u{1F600}" "😀" "x\
y""#),
            vec![
                TokenKind::String("hello".into()),
                TokenKind::String("wörld".into()),
                TokenKind::String("a\nb".into()),
                TokenKind::String("\u{1F600}".into()),
                TokenKind::String("\u{1F600}".into()),
                TokenKind::String("xy".into()),
            ]
        );
        assert_eq!(
            tokenize("'abc\nd'"),
            vec![TokenKind::Error(LexError::UnterminatedString), ident("d"), TokenKind::Error(LexError::UnterminatedString)]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokenize("a + b - c * d / e % f ** g"),
            vec![
                ident("a"), TokenKind::Plus, ident("b"), TokenKind::Minus, ident("c"),
                TokenKind::Star, ident("d"), TokenKind::Slash, ident("e"),
                TokenKind::Percent, ident("f"), TokenKind::StarStar, ident("g"),
            ]
        );
        assert_eq!(
            tokenize("?. ?? ??= &&= ||= ... =>"),
            vec![
                TokenKind::QuestionDot, TokenKind::QuestionQuestion, TokenKind::QuestionQuestionEq,
                TokenKind::AmpAmpEq, TokenKind::PipePipeEq, TokenKind::Spread, TokenKind::Arrow,
            ]
        );
        assert_eq!(
            tokenize("a?.5:b"),
            vec![ident("a"), TokenKind::Question, TokenKind::Number(0.5), TokenKind::Colon, ident("b")]
        );
    }

    #[test]
    fn test_regex_vs_division() {
        assert_eq!(
            tokenize("x = /ab+c/gi"),
            vec![
                ident("x"),
                TokenKind::Eq,
                TokenKind::Regex { pattern: "ab+c".into(), flags: "gi".into() },
            ]
        );
        assert_eq!(
            tokenize("a / b / c"),
            vec![ident("a"), TokenKind::Slash, ident("b"), TokenKind::Slash, ident("c")]
        );
        assert_eq!(
            tokenize("(/[/]/)"),
            vec![
                TokenKind::LParen,
                TokenKind::Regex { pattern: "[/]".into(), flags: String::new() },
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_comments_and_newlines() {
        let tokens = Lexer::tokenize("a // line comment\nb /* block */ c /* multi\nline */ d");
        let flags: Vec<bool> = tokens.iter().map(|t| t.had_newline_before).collect();
        assert_eq!(flags, vec![false, true, false, true, false]);
        assert!(matches!(tokens[4].kind, TokenKind::Eof));
    }

    #[test]
    fn test_unterminated_comment() {
        assert_eq!(
            tokenize("a /* never closed"),
            vec![ident("a"), TokenKind::Error(LexError::UnterminatedComment)]
        );
    }

    #[test]
    fn test_templates() {
        assert_eq!(tokenize("`hello world`"), vec![TokenKind::TemplateNoSub("hello world".into())]);
        assert_eq!(
            tokenize("`a${b}c${ {d} }e`"),
            vec![
                TokenKind::TemplateHead("a".into()),
                ident("b"),
                TokenKind::TemplateMiddle("c".into()),
                TokenKind::LBrace,
                ident("d"),
                TokenKind::RBrace,
                TokenKind::TemplateTail("e".into()),
            ]
        );
        assert_eq!(
            tokenize("`outer ${`inner ${x}`}`"),
            vec![
                TokenKind::TemplateHead("outer ".into()),
                TokenKind::TemplateHead("inner ".into()),
                ident("x"),
                TokenKind::TemplateTail(String::new()),
                TokenKind::TemplateTail(String::new()),
            ]
        );
        assert_eq!(tokenize("`abc"), vec![TokenKind::Error(LexError::UnterminatedTemplate)]);
    }

    #[test]
    fn test_private_names_and_hashbang() {
        assert_eq!(
            tokenize("#!/usr/bin/env node\nthis.#count"),
            vec![TokenKind::This, TokenKind::Dot, TokenKind::PrivateName("count".into())]
        );
        assert_eq!(tokenize("# x"), vec![TokenKind::Error(LexError::UnexpectedChar('#')), ident("x")]);
    }
}
