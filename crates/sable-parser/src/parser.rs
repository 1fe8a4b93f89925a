//! Recursive descent parser.
//!
//! Statements are parsed top-down here; expressions use precedence climbing
//! (see `expr.rs`). Patterns, classes and module items live in their own
//! files, each adding an `impl Parser` block.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ast::*;
use crate::context::Context;
use crate::error::{Diagnostics, ErrorKind, PResult, SyntaxError};
use crate::pattern::PatternMode;
use crate::span::Span;
use crate::stream::{Checkpoint, TokenBuffer, TokenStream};
use crate::token::{is_strict_reserved, keyword_from_str, Token, TokenKind};

/// Default bound on expression and statement nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Stack left before `nested` moves onto a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each fresh stack segment.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Parser configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Parse as an ECMAScript module (strict, enables import/export).
    pub source_type: SourceType,
    /// Treat script code as strict from the start.
    pub strict: bool,
    /// Maximum nesting of statements and expressions.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::Script,
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn module() -> Self {
        Self { source_type: SourceType::Module, ..Self::default() }
    }

    #[must_use]
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }
}

/// Result of a parse that keeps going after errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    /// `None` only when a fatal error stopped the parse.
    pub program: Option<Program>,
    /// All errors in source order.
    pub errors: Vec<SyntaxError>,
}

impl Recovered {
    pub fn is_clean(&self) -> bool {
        self.program.is_some() && self.errors.is_empty()
    }
}

/// Where a statement list stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListEnd {
    /// Program body: runs to end of input.
    Eof,
    /// Block or function body: stops before `}`.
    Brace,
    /// Switch clause: stops before `case`, `default` or `}`.
    SwitchCase,
}

/// Everything a speculative attempt may change.
pub(crate) struct Snapshot {
    checkpoint: Checkpoint,
    errors: usize,
    pending_cover: usize,
    prev_end: u32,
    depth: usize,
}

/// The parser.
pub struct Parser<S: TokenStream = TokenBuffer> {
    stream: S,
    pub(crate) options: ParserOptions,
    /// Errors recorded so far; recovery keeps parsing after each one.
    pub(crate) errors: Vec<SyntaxError>,
    /// Spans of `{a = 1}` shorthand initializers not yet resolved as patterns.
    pub(crate) pending_cover: Vec<Span>,
    /// Offsets of `(` tokens known not to open an arrow parameter list.
    pub(crate) not_arrow: FxHashSet<u32>,
    /// Offsets of spread elements followed by a trailing comma.
    pub(crate) spread_trailing_comma: FxHashSet<u32>,
    /// End of the last consumed token.
    prev_end: u32,
    depth: usize,
}

impl Parser<TokenBuffer> {
    /// Create a parser over `source`.
    pub fn new(source: &str, options: ParserOptions) -> Self {
        Self::from_stream(TokenBuffer::new(source), options)
    }
}

impl<S: TokenStream> Parser<S> {
    /// Create a parser over an existing token stream.
    pub fn from_stream(stream: S, options: ParserOptions) -> Self {
        Self {
            stream,
            options,
            errors: Vec::new(),
            pending_cover: Vec::new(),
            not_arrow: FxHashSet::default(),
            spread_trailing_comma: FxHashSet::default(),
            prev_end: 0,
            depth: 0,
        }
    }

    /// Parse the whole input. The tree is returned only if no error at all
    /// was found.
    pub fn parse(mut self) -> Result<Program, Diagnostics> {
        let result = self.parse_program();
        let mut errors = std::mem::take(&mut self.errors);
        errors.sort_by_key(|err| err.span.start);
        match (result, Diagnostics::new(errors)) {
            (Ok(program), None) => Ok(program),
            (Ok(_), Some(diagnostics)) => Err(diagnostics),
            (Err(fatal), None) => Err(Diagnostics::from(fatal)),
            (Err(fatal), Some(mut diagnostics)) => {
                diagnostics.push(fatal);
                Err(diagnostics)
            }
        }
    }

    /// Parse the whole input, returning the tree (with error placeholders)
    /// together with every error found.
    ///
    /// Only errors that abort a statement leave a `StmtKind::Error`
    /// placeholder. Errors recorded while the statement still parses, such
    /// as `const a;` missing its initializer, keep the parsed statement, so
    /// there can be more errors than placeholders.
    pub fn parse_recovering(mut self) -> Recovered {
        let result = self.parse_program();
        let mut errors = std::mem::take(&mut self.errors);
        let program = match result {
            Ok(program) => Some(program),
            Err(fatal) => {
                debug!(code = fatal.code(), "parse aborted: {fatal}");
                errors.push(fatal);
                None
            }
        };
        errors.sort_by_key(|err| err.span.start);
        debug!(errors = errors.len(), complete = program.is_some(), "parse finished");
        Recovered { program, errors }
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    #[inline]
    pub(crate) fn cur(&self) -> &Token {
        self.stream.peek(0)
    }

    #[inline]
    pub(crate) fn kind(&self) -> &TokenKind {
        &self.stream.peek(0).kind
    }

    #[inline]
    pub(crate) fn nth(&self, offset: usize) -> &Token {
        self.stream.peek(offset)
    }

    #[inline]
    pub(crate) fn start(&self) -> u32 {
        self.cur().span.start
    }

    /// Consume the current token.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.stream.advance();
        if token.kind != TokenKind::Eof {
            self.prev_end = token.span.end;
        }
        token
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    /// Check if the current token has the same kind as `kind`, ignoring payloads.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.kind()) == std::mem::discriminant(kind)
    }

    /// Check if the current token is the contextual word `word`.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.cur().is_word(word)
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of kind `kind`, otherwise fail.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            self.unexpected(&[&kind.to_string()])
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> PResult<Token> {
        if self.at_word(word) {
            Ok(self.bump())
        } else {
            self.unexpected(&[&format!("`{word}`")])
        }
    }

    pub(crate) fn unexpected<T>(&self, expected: &[&str]) -> PResult<T> {
        Err(SyntaxError::unexpected(self.cur(), expected))
    }

    /// Record an error without interrupting the current production.
    pub(crate) fn report(&mut self, kind: ErrorKind, span: Span) {
        self.errors.push(SyntaxError::new(kind, span));
    }

    /// Consume a semicolon, applying automatic semicolon insertion.
    pub(crate) fn consume_semicolon(&mut self) -> PResult<()> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(());
        }
        if matches!(self.kind(), TokenKind::RBrace | TokenKind::Eof) || self.cur().had_newline_before {
            return Ok(());
        }
        self.unexpected(&["`;`"])
    }

    // =========================================================================
    // Speculation and Nesting
    // =========================================================================

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            checkpoint: self.stream.checkpoint(),
            errors: self.errors.len(),
            pending_cover: self.pending_cover.len(),
            prev_end: self.prev_end,
            depth: self.depth,
        }
    }

    /// Undo everything done since `snapshot` was taken.
    pub(crate) fn rollback(&mut self, snapshot: Snapshot) {
        trace!(position = snapshot.checkpoint.position(), "speculative parse rolled back");
        self.stream.rollback(snapshot.checkpoint);
        self.errors.truncate(snapshot.errors);
        self.pending_cover.truncate(snapshot.pending_cover);
        self.prev_end = snapshot.prev_end;
        self.depth = snapshot.depth;
    }

    /// Run `f` one nesting level deeper. The stack grows on demand, so any
    /// depth up to `max_depth` is safe on small thread stacks.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(SyntaxError::new(ErrorKind::NestingTooDeep, self.cur().span));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || f(self));
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Program and Statement Lists
    // =========================================================================

    fn parse_program(&mut self) -> PResult<Program> {
        let source_type = self.options.source_type;
        let cx = match source_type {
            SourceType::Module => Context::module(),
            SourceType::Script => Context::default(),
        }
        .with_strict(self.options.strict);

        let body = self.parse_stmt_list(cx, ListEnd::Eof, true)?;
        let end = self.cur().span.end.max(self.prev_end);
        Ok(Program { body, source_type, span: Span::new(0, end) })
    }

    /// Parse statements until `end`, recovering from non-fatal errors.
    pub(crate) fn parse_stmt_list(
        &mut self,
        mut cx: Context,
        end: ListEnd,
        directives: bool,
    ) -> PResult<Vec<Stmt>> {
        let top_level = end == ListEnd::Eof;
        let mut body = Vec::new();
        let mut prologue = directives;

        loop {
            match self.kind() {
                TokenKind::Eof if top_level => break,
                TokenKind::Eof => return self.unexpected(&["`}`"]),
                TokenKind::RBrace if !top_level => break,
                TokenKind::Case | TokenKind::Default if end == ListEnd::SwitchCase => break,
                _ => {}
            }

            let start = self.start();
            let checkpoint = self.stream.checkpoint();
            match self.parse_stmt_list_item(cx, top_level) {
                Ok(stmt) => {
                    if prologue {
                        match directive(&stmt) {
                            Some(true) => cx = cx.with_strict(true),
                            Some(false) => {}
                            None => prologue = false,
                        }
                    }
                    body.push(stmt);
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    prologue = false;
                    body.push(self.recover(err, start, checkpoint, end)?);
                }
            }
        }

        Ok(body)
    }

    /// Record `err` and skip to a point where a new statement can start.
    /// Lexical errors in the skipped tokens are recorded too; a fatal one
    /// ends the parse.
    fn recover(&mut self, err: SyntaxError, start: u32, checkpoint: Checkpoint, end: ListEnd) -> PResult<Stmt> {
        debug!(code = err.code(), start = err.span.start, end = err.span.end, "recovering: {err}");
        let err_span = err.span;
        self.errors.push(err);
        self.pending_cover.clear();

        if self.stream.checkpoint() == checkpoint && !self.check(&TokenKind::Eof) {
            self.skip_token(err_span)?;
        }

        loop {
            let token = self.cur();
            let past_error = token.span.start > err_span.start;
            let boundary = match &token.kind {
                TokenKind::Eof => true,
                TokenKind::RBrace => end != ListEnd::Eof,
                TokenKind::Case | TokenKind::Default => end == ListEnd::SwitchCase,
                kind => kind.starts_statement() || token.is_word("let") || (past_error && token.had_newline_before),
            };
            if boundary || self.skip_token(err_span)?.kind == TokenKind::Semicolon {
                break;
            }
        }

        Ok(Stmt::new(StmtKind::Error, self.span_from(start)))
    }

    /// Consume a token during recovery, reporting it if it is a lexical
    /// error other than the one that triggered recovery.
    fn skip_token(&mut self, err_span: Span) -> PResult<Token> {
        let token = self.cur();
        if let TokenKind::Error(lex) = &token.kind {
            if token.span != err_span {
                let lex_err = SyntaxError::new(ErrorKind::Lex(lex.clone()), token.span);
                if lex_err.is_fatal() {
                    return Err(lex_err);
                }
                self.errors.push(lex_err);
            }
        }
        Ok(self.bump())
    }

    /// A statement list item: a declaration or a statement.
    fn parse_stmt_list_item(&mut self, cx: Context, top_level: bool) -> PResult<Stmt> {
        self.nested(|p| {
            let start = p.start();
            match p.kind() {
                TokenKind::Import if !matches!(p.nth(1).kind, TokenKind::LParen | TokenKind::Dot) => {
                    p.check_module_item(top_level);
                    p.parse_import_decl(cx)
                }
                TokenKind::Export => {
                    p.check_module_item(top_level);
                    p.parse_export_decl(cx)
                }
                TokenKind::Function => p.parse_function_decl(cx, start, false),
                TokenKind::Class => p.parse_class_decl(cx),
                TokenKind::Const => p.parse_var_stmt(cx, VarKind::Const),
                _ if p.at_let_decl() => p.parse_var_stmt(cx, VarKind::Let),
                _ if p.at_async_function() => p.parse_function_decl(cx, start, true),
                _ => p.parse_stmt(cx),
            }
        })
    }

    fn check_module_item(&mut self, top_level: bool) {
        if !top_level || !self.options.is_module() {
            self.report(ErrorKind::IllegalModuleItem, self.cur().span);
        }
    }

    /// `let` followed by a binding starts a lexical declaration.
    pub(crate) fn at_let_decl(&self) -> bool {
        self.at_word("let")
            && matches!(
                self.nth(1).kind,
                TokenKind::Identifier(_) | TokenKind::LBracket | TokenKind::LBrace
            )
    }

    /// `async function` with no line break in between.
    pub(crate) fn at_async_function(&self) -> bool {
        self.at_word("async") && self.nth(1).kind == TokenKind::Function && !self.nth(1).had_newline_before
    }

    // =========================================================================
    // Statement Parsing
    // =========================================================================

    /// Parse a statement in a position that forbids declarations.
    pub(crate) fn parse_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        match self.kind() {
            TokenKind::LBrace => {
                let body = self.parse_block_body(cx)?;
                Ok(Stmt::new(StmtKind::Block(body), self.span_from(start)))
            }
            TokenKind::Var => self.parse_var_stmt(cx, VarKind::Var),
            TokenKind::Semicolon => {
                self.bump();
                Ok(Stmt::new(StmtKind::Empty, self.span_from(start)))
            }
            TokenKind::If => self.parse_if_stmt(cx),
            TokenKind::For => self.parse_for_stmt(cx),
            TokenKind::While => self.parse_while_stmt(cx),
            TokenKind::Do => self.parse_do_while_stmt(cx),
            TokenKind::Continue | TokenKind::Break => self.parse_jump_stmt(cx),
            TokenKind::Return => self.parse_return_stmt(cx),
            TokenKind::Throw => self.parse_throw_stmt(cx),
            TokenKind::Try => self.parse_try_stmt(cx),
            TokenKind::Switch => self.parse_switch_stmt(cx),
            TokenKind::With => self.parse_with_stmt(cx),
            TokenKind::Debugger => {
                self.bump();
                self.consume_semicolon()?;
                Ok(Stmt::new(StmtKind::Debugger, self.span_from(start)))
            }
            TokenKind::Function if !cx.strict => self.parse_function_decl(cx, start, false),
            TokenKind::Function | TokenKind::Class | TokenKind::Const => Err(SyntaxError::new(
                ErrorKind::InvalidSyntax("declarations are not allowed in single-statement context"),
                self.cur().span,
            )),
            _ if self.at_let_decl() || self.at_async_function() => Err(SyntaxError::new(
                ErrorKind::InvalidSyntax("declarations are not allowed in single-statement context"),
                self.cur().span,
            )),
            TokenKind::Identifier(_) if self.nth(1).kind == TokenKind::Colon => self.parse_labeled_stmt(cx),
            _ => self.parse_expr_stmt(cx),
        }
    }

    /// `{ ... }` as a list of statements.
    pub(crate) fn parse_block_body(&mut self, cx: Context) -> PResult<Vec<Stmt>> {
        self.expect(&TokenKind::LBrace)?;
        let body = self.parse_stmt_list(cx, ListEnd::Brace, false)?;
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    fn parse_expr_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        let expr = self.parse_expr(cx)?;
        self.consume_semicolon()?;
        Ok(Stmt::new(StmtKind::Expr(expr), self.span_from(start)))
    }

    pub(crate) fn parse_var_stmt(&mut self, cx: Context, kind: VarKind) -> PResult<Stmt> {
        let start = self.start();
        let decl = self.parse_var_decl(cx, kind)?;
        self.check_initializers(&decl);
        self.consume_semicolon()?;
        Ok(Stmt::new(StmtKind::Var(decl), self.span_from(start)))
    }

    /// Parse `var`/`let`/`const` and its declarators, without the semicolon.
    pub(crate) fn parse_var_decl(&mut self, cx: Context, kind: VarKind) -> PResult<VarDecl> {
        self.bump();
        let mut decls = Vec::new();
        loop {
            let start = self.start();
            if kind != VarKind::Var && self.at_word("let") {
                self.report(ErrorKind::ReservedWordMisuse { word: "let".into() }, self.cur().span);
            }
            let target = self.parse_binding_pattern(cx)?;
            let init = if self.eat(&TokenKind::Eq) {
                Some(self.parse_assign_expr(cx)?)
            } else {
                None
            };
            decls.push(VarDeclarator { target, init, span: self.span_from(start) });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(VarDecl { kind, decls })
    }

    fn check_initializers(&mut self, decl: &VarDecl) {
        for declarator in &decl.decls {
            if declarator.init.is_some() {
                continue;
            }
            if decl.kind == VarKind::Const {
                self.report(ErrorKind::MissingInitializer("const"), declarator.span);
            } else if !matches!(declarator.target.kind, PatternKind::Ident(_)) {
                self.report(ErrorKind::MissingInitializer("destructuring"), declarator.span);
            }
        }
    }

    fn parse_if_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let test = self.parse_paren_test(cx)?;
        let consequent = Box::new(self.parse_stmt(cx)?);
        let alternate = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_stmt(cx)?))
        } else {
            None
        };
        Ok(Stmt::new(StmtKind::If { test, consequent, alternate }, self.span_from(start)))
    }

    /// `( expr )` after `if`, `while`, `switch` and `with`.
    fn parse_paren_test(&mut self, cx: Context) -> PResult<Expr> {
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr(cx.with_in_allowed(true))?;
        self.expect(&TokenKind::RParen)?;
        Ok(test)
    }

    fn parse_while_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let test = self.parse_paren_test(cx)?;
        let body = Box::new(self.parse_stmt(cx)?);
        Ok(Stmt::new(StmtKind::While { test, body }, self.span_from(start)))
    }

    fn parse_do_while_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let body = Box::new(self.parse_stmt(cx)?);
        self.expect(&TokenKind::While)?;
        let test = self.parse_paren_test(cx)?;
        // The semicolon after `do-while` is always optional.
        self.eat(&TokenKind::Semicolon);
        Ok(Stmt::new(StmtKind::DoWhile { body, test }, self.span_from(start)))
    }

    fn parse_for_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let is_await = if self.at_word("await") {
            let token = self.bump();
            if !cx.in_async {
                self.report(
                    ErrorKind::InvalidSyntax("`for await` is only valid in async functions and modules"),
                    token.span,
                );
            }
            true
        } else {
            false
        };
        self.expect(&TokenKind::LParen)?;
        let head_cx = cx.with_in_allowed(false);

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if let Some(kind) = self.at_var_kind() {
            let decl = self.parse_var_decl(head_cx, kind)?;
            if decl.decls.len() == 1 && decl.decls[0].init.is_none() && self.at_for_in_of() {
                return self.parse_for_in_of(cx, start, ForHead::Var(decl), is_await);
            }
            if self.at_for_in_of() {
                return Err(SyntaxError::new(
                    ErrorKind::InvalidSyntax("for-in/of head must be a single declaration without initializer"),
                    self.cur().span,
                ));
            }
            self.check_initializers(&decl);
            Some(ForInit::Var(decl))
        } else {
            let mark = self.pending_cover.len();
            let expr = self.parse_expr(head_cx.with_cover_allowed(true))?;
            if self.at_for_in_of() {
                let target = self.expr_to_pattern(expr, PatternMode::Assignment, cx)?;
                self.pending_cover.truncate(mark);
                return self.parse_for_in_of(cx, start, ForHead::Pattern(target), is_await);
            }
            self.flush_cover(mark)?;
            Some(ForInit::Expr(expr))
        };

        if is_await {
            return self.unexpected(&["`of`"]);
        }
        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr(cx)?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr(cx)?)
        };
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_stmt(cx)?);
        Ok(Stmt::new(StmtKind::For { init, test, update, body }, self.span_from(start)))
    }

    fn at_var_kind(&self) -> Option<VarKind> {
        match self.kind() {
            TokenKind::Var => Some(VarKind::Var),
            TokenKind::Const => Some(VarKind::Const),
            _ if self.at_let_decl() => Some(VarKind::Let),
            _ => None,
        }
    }

    fn at_for_in_of(&self) -> bool {
        self.check(&TokenKind::In) || self.at_word("of")
    }

    fn parse_for_in_of(&mut self, cx: Context, start: u32, left: ForHead, is_await: bool) -> PResult<Stmt> {
        let is_of = self.at_word("of");
        let token = self.bump();
        if is_await && !is_of {
            return Err(SyntaxError::unexpected(&token, &["`of`"]));
        }
        let right = if is_of {
            self.parse_assign_expr(cx.with_in_allowed(true))?
        } else {
            self.parse_expr(cx.with_in_allowed(true))?
        };
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_stmt(cx)?);
        let kind = if is_of {
            StmtKind::ForOf { left, right, body, is_await }
        } else {
            StmtKind::ForIn { left, right, body }
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    /// `break` and `continue`, with an optional label on the same line.
    fn parse_jump_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        let keyword = self.bump();
        let label = match self.kind() {
            TokenKind::Identifier(_) if !self.cur().had_newline_before => Some(self.parse_label(cx)?),
            _ => None,
        };
        self.consume_semicolon()?;
        let kind = if keyword.kind == TokenKind::Break {
            StmtKind::Break(label)
        } else {
            StmtKind::Continue(label)
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_return_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        // Restricted production: a line break ends the statement.
        let arg = if matches!(self.kind(), TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof)
            || self.cur().had_newline_before
        {
            None
        } else {
            Some(self.parse_expr(cx)?)
        };
        self.consume_semicolon()?;
        Ok(Stmt::new(StmtKind::Return(arg), self.span_from(start)))
    }

    fn parse_throw_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        if self.cur().had_newline_before {
            return Err(SyntaxError::new(
                ErrorKind::InvalidSyntax("line break is not allowed after `throw`"),
                self.cur().span,
            ));
        }
        let arg = self.parse_expr(cx)?;
        self.consume_semicolon()?;
        Ok(Stmt::new(StmtKind::Throw(arg), self.span_from(start)))
    }

    fn parse_try_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        let keyword = self.bump();
        let block = self.parse_block_body(cx)?;

        let handler = if self.check(&TokenKind::Catch) {
            let catch_start = self.start();
            self.bump();
            let param = if self.eat(&TokenKind::LParen) {
                let param = self.parse_binding_pattern(cx)?;
                self.expect(&TokenKind::RParen)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block_body(cx)?;
            Some(CatchClause { param, body, span: self.span_from(catch_start) })
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally) {
            Some(self.parse_block_body(cx)?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(SyntaxError::new(
                ErrorKind::IllegalCatchlessTry,
                keyword.span.merge(self.span_from(start)),
            ));
        }

        Ok(Stmt::new(StmtKind::Try { block, handler, finalizer }, self.span_from(start)))
    }

    fn parse_switch_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.bump();
        let discriminant = self.parse_paren_test(cx)?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        loop {
            let case_start = self.start();
            let test = match self.kind() {
                TokenKind::RBrace => break,
                TokenKind::Case => {
                    self.bump();
                    Some(self.parse_expr(cx.with_in_allowed(true))?)
                }
                TokenKind::Default => {
                    let token = self.bump();
                    if seen_default {
                        self.report(
                            ErrorKind::InvalidSyntax("more than one `default` clause in switch"),
                            token.span,
                        );
                    }
                    seen_default = true;
                    None
                }
                _ => return self.unexpected(&["`case`", "`default`", "`}`"]),
            };
            self.expect(&TokenKind::Colon)?;
            let body = self.parse_stmt_list(cx, ListEnd::SwitchCase, false)?;
            cases.push(SwitchCase { test, body, span: self.span_from(case_start) });
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Stmt::new(StmtKind::Switch { discriminant, cases }, self.span_from(start)))
    }

    fn parse_with_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        let keyword = self.bump();
        if cx.strict {
            self.report(ErrorKind::StrictModeViolation("`with` statement"), keyword.span);
        }
        let object = self.parse_paren_test(cx)?;
        let body = Box::new(self.parse_stmt(cx)?);
        Ok(Stmt::new(StmtKind::With { object, body }, self.span_from(start)))
    }

    fn parse_labeled_stmt(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        let label = self.parse_label(cx)?;
        self.expect(&TokenKind::Colon)?;
        let body = if self.check(&TokenKind::Function) && !cx.strict {
            let fn_start = self.start();
            self.parse_function_decl(cx, fn_start, false)?
        } else {
            self.parse_stmt(cx)?
        };
        Ok(Stmt::new(StmtKind::Labeled { label, body: Box::new(body) }, self.span_from(start)))
    }

    fn parse_label(&mut self, cx: Context) -> PResult<String> {
        match self.kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.bump();
                self.check_reference_name(&name, token.span, cx);
                Ok(name)
            }
            _ => self.unexpected(&["label"]),
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub(crate) fn parse_function_decl(&mut self, cx: Context, start: u32, is_async: bool) -> PResult<Stmt> {
        if is_async {
            self.bump();
        }
        let function = self.parse_function(cx, start, is_async, FunctionName::Required)?;
        Ok(Stmt::new(StmtKind::Function(Box::new(function)), self.span_from(start)))
    }

    /// Parse `function` `*`? name? `(params) { body }`. Any `async` prefix
    /// has already been consumed.
    pub(crate) fn parse_function(
        &mut self,
        cx: Context,
        start: u32,
        is_async: bool,
        naming: FunctionName,
    ) -> PResult<Function> {
        self.expect(&TokenKind::Function)?;
        let is_generator = self.eat(&TokenKind::Star);
        let body_cx = cx.function_body(is_async, is_generator);

        let name = if matches!(self.kind(), TokenKind::Identifier(_)) {
            // An expression's own name follows the function's async/generator
            // rules; a declaration's name follows the enclosing scope.
            let name_cx = if naming == FunctionName::Optional { body_cx } else { cx };
            Some(self.parse_binding_identifier(name_cx)?)
        } else if naming == FunctionName::Required {
            return self.unexpected(&["function name"]);
        } else {
            None
        };

        let params = self.parse_formal_params(body_cx)?;
        let body = self.parse_function_body(body_cx)?;

        Ok(Function { name, params, body, is_async, is_generator, span: self.span_from(start) })
    }

    /// Parse the parameter list and body of a method. `start` is the start
    /// of the member (including modifiers).
    pub(crate) fn parse_method_function(
        &mut self,
        cx: Context,
        start: u32,
        is_async: bool,
        is_generator: bool,
    ) -> PResult<Function> {
        let body_cx = cx.function_body(is_async, is_generator);
        let params = self.parse_formal_params(body_cx)?;
        let body = self.parse_function_body(body_cx)?;
        Ok(Function { name: None, params, body, is_async, is_generator, span: self.span_from(start) })
    }

    /// `{ ... }` of a function, with its directive prologue.
    pub(crate) fn parse_function_body(&mut self, cx: Context) -> PResult<Vec<Stmt>> {
        self.expect(&TokenKind::LBrace)?;
        let body = self.parse_stmt_list(cx, ListEnd::Brace, true)?;
        self.expect(&TokenKind::RBrace)?;
        Ok(body)
    }

    /// `( a, [b, c] = d, ...rest )`
    pub(crate) fn parse_formal_params(&mut self, cx: Context) -> PResult<Params> {
        let start = self.start();
        self.expect(&TokenKind::LParen)?;
        let mut items = Vec::new();
        let mut rest = None;

        while !self.check(&TokenKind::RParen) {
            if self.check(&TokenKind::Spread) {
                rest = Some(Box::new(self.parse_rest_binding(cx)?));
                break;
            }
            items.push(self.parse_binding_element(cx)?);
            if !self.check(&TokenKind::RParen) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RParen)?;

        Ok(Params { items, rest, span: self.span_from(start) })
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// An identifier that introduces a binding.
    pub(crate) fn parse_binding_identifier(&mut self, cx: Context) -> PResult<String> {
        match self.kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.bump();
                self.check_binding_name(&name, token.span, cx);
                Ok(name)
            }
            kind => match kind.keyword_text() {
                Some(word) => Err(SyntaxError::new(
                    ErrorKind::ReservedWordMisuse { word: word.to_string() },
                    self.cur().span,
                )),
                None => self.unexpected(&["identifier"]),
            },
        }
    }

    /// Any identifier or reserved word, as used after `.` or in import and
    /// export clauses.
    pub(crate) fn parse_identifier_name(&mut self) -> PResult<String> {
        let name = match self.kind() {
            TokenKind::Identifier(name) => name.clone(),
            kind => match kind.keyword_text() {
                Some(word) => word.to_string(),
                None => return self.unexpected(&["identifier"]),
            },
        };
        self.bump();
        Ok(name)
    }

    pub(crate) fn check_binding_name(&mut self, name: &str, span: Span, cx: Context) {
        let misuse = keyword_from_str(name).is_some()
            || cx.is_reserved_binding(name)
            || (cx.strict && (is_strict_reserved(name) || matches!(name, "eval" | "arguments")));
        if misuse {
            self.report(ErrorKind::ReservedWordMisuse { word: name.to_string() }, span);
        }
    }

    pub(crate) fn check_reference_name(&mut self, name: &str, span: Span, cx: Context) {
        let misuse = keyword_from_str(name).is_some()
            || cx.is_reserved_binding(name)
            || (cx.strict && is_strict_reserved(name));
        if misuse {
            self.report(ErrorKind::ReservedWordMisuse { word: name.to_string() }, span);
        }
    }
}

/// Whether a function must, may, or may not be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionName {
    Required,
    /// Function expressions: the name binds inside the function itself.
    Optional,
    /// `export default function () {}`
    DefaultExport,
}

/// `Some(is_use_strict)` if `stmt` is a directive.
fn directive(stmt: &Stmt) -> Option<bool> {
    match &stmt.kind {
        StmtKind::Expr(Expr { kind: ExprKind::String(value), span }) => {
            // Directives compare raw source text: escapes disqualify them.
            let raw_len = value.len() as u32 + 2;
            Some(value == "use strict" && span.len() == raw_len)
        }
        _ => None,
    }
}
