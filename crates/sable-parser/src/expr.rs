//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing over the table in
//! [`precedence`](crate::precedence). Arrow functions are found by
//! speculatively parsing a parameter list at `(` and rolling back when no
//! `=>` follows.

use crate::ast::*;
use crate::context::Context;
use crate::error::{ErrorKind, PResult, SyntaxError};
use crate::parser::{FunctionName, Parser};
use crate::pattern::PatternMode;
use crate::precedence::{assignment_operator, binary_operator, Assoc, Precedence};
use crate::span::Span;
use crate::stream::TokenStream;
use crate::token::TokenKind;

impl<S: TokenStream> Parser<S> {
    // =========================================================================
    // Expression Parsing
    // =========================================================================

    /// Parse an expression, including comma sequences.
    pub(crate) fn parse_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        let first = self.parse_assign_expr(cx)?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut exprs = vec![first];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_assign_expr(cx)?);
        }
        Ok(Expr::new(ExprKind::Sequence(exprs), self.span_from(start)))
    }

    /// Parse an assignment expression (arrows, `yield` and assignments included).
    pub(crate) fn parse_assign_expr(&mut self, cx: Context) -> PResult<Expr> {
        self.nested(|p| p.parse_assign_expr_inner(cx))
    }

    fn parse_assign_expr_inner(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();

        if cx.in_generator && self.at_word("yield") {
            return self.parse_yield_expr(cx);
        }
        if let Some(arrow) = self.try_parse_arrow(cx)? {
            return Ok(arrow);
        }

        let async_call =
            self.at_word("async") && self.nth(1).kind == TokenKind::LParen && !self.nth(1).had_newline_before;
        let mark = self.pending_cover.len();
        let left = self.parse_conditional_expr(cx)?;

        // `async (a, b) => ...` was parsed as a call; reinterpret its arguments.
        if async_call && self.check(&TokenKind::Arrow) && !self.cur().had_newline_before {
            if let ExprKind::Call { callee, args, chain: ChainLink::Plain } = left.kind {
                if matches!(&callee.kind, ExprKind::Ident(name) if name == "async") {
                    let params_span = Span::new(callee.span.end, left.span.end);
                    let params = self.args_to_params(args, params_span, cx.with_async(true))?;
                    self.pending_cover.truncate(mark);
                    return self.parse_arrow_body(params, true, start, cx);
                }
            }
            return self.unexpected(&[]);
        }

        if let Some(op) = assignment_operator(self.kind()) {
            let target = if op == AssignOp::Assign && matches!(left.kind, ExprKind::Array(_) | ExprKind::Object(_)) {
                let pattern = self.expr_to_pattern(left, PatternMode::Assignment, cx)?;
                self.pending_cover.truncate(mark);
                pattern
            } else {
                self.flush_cover(mark)?;
                self.expr_to_simple_target(left, cx)?
            };
            self.bump();
            let value = self.parse_assign_expr(cx.with_cover_allowed(false))?;
            return Ok(Expr::new(
                ExprKind::Assign { op, target: Box::new(target), value: Box::new(value) },
                self.span_from(start),
            ));
        }

        if !cx.cover_allowed {
            self.flush_cover(mark)?;
        }
        Ok(left)
    }

    /// Fail on any `{a = 1}` initializer recorded since `mark`.
    pub(crate) fn flush_cover(&mut self, mark: usize) -> PResult<()> {
        if let Some(&span) = self.pending_cover.get(mark) {
            self.pending_cover.truncate(mark);
            return Err(SyntaxError::new(
                ErrorKind::InvalidSyntax("shorthand property initializers are only valid in patterns"),
                span,
            ));
        }
        Ok(())
    }

    fn parse_yield_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.bump();
        let delegate = !self.cur().had_newline_before && self.eat(&TokenKind::Star);
        let ends_here = self.cur().had_newline_before
            || matches!(
                self.kind(),
                TokenKind::RParen
                    | TokenKind::RBracket
                    | TokenKind::RBrace
                    | TokenKind::Comma
                    | TokenKind::Semicolon
                    | TokenKind::Colon
                    | TokenKind::TemplateMiddle(_)
                    | TokenKind::TemplateTail(_)
                    | TokenKind::Eof
            );
        let arg = if delegate || !ends_here {
            Some(Box::new(self.parse_assign_expr(cx.with_cover_allowed(false))?))
        } else {
            None
        };
        Ok(Expr::new(ExprKind::Yield { arg, delegate }, self.span_from(start)))
    }

    // =========================================================================
    // Arrow Functions
    // =========================================================================

    /// Parse an arrow function if one starts here. Returns `None` with the
    /// stream untouched otherwise.
    fn try_parse_arrow(&mut self, cx: Context) -> PResult<Option<Expr>> {
        let start = self.start();
        match self.kind() {
            // x => ...
            TokenKind::Identifier(_) if self.nth(1).kind == TokenKind::Arrow && !self.nth(1).had_newline_before => {
                let params = self.parse_single_param(cx)?;
                self.parse_arrow_body(params, false, start, cx).map(Some)
            }
            // async x => ...
            TokenKind::Identifier(word)
                if word == "async"
                    && matches!(self.nth(1).kind, TokenKind::Identifier(_))
                    && !self.nth(1).had_newline_before
                    && self.nth(2).kind == TokenKind::Arrow
                    && !self.nth(2).had_newline_before =>
            {
                self.bump();
                let params = self.parse_single_param(cx.with_async(true))?;
                self.parse_arrow_body(params, true, start, cx).map(Some)
            }
            // (a, b) => ...
            TokenKind::LParen if !self.not_arrow.contains(&start) => {
                let snapshot = self.snapshot();
                match self.parse_formal_params(cx.with_in_allowed(true)) {
                    Ok(params) if self.check(&TokenKind::Arrow) && !self.cur().had_newline_before => {
                        self.parse_arrow_body(params, false, start, cx).map(Some)
                    }
                    _ => {
                        self.rollback(snapshot);
                        self.not_arrow.insert(start);
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    fn parse_single_param(&mut self, cx: Context) -> PResult<Params> {
        let start = self.start();
        let name = self.parse_binding_identifier(cx)?;
        let span = self.span_from(start);
        Ok(Params {
            items: vec![PatternElement { target: Pattern::new(PatternKind::Ident(name), span), default: None, span }],
            rest: None,
            span,
        })
    }

    fn parse_arrow_body(&mut self, params: Params, is_async: bool, start: u32, cx: Context) -> PResult<Expr> {
        self.expect(&TokenKind::Arrow)?;
        let body_cx = cx.function_body(is_async, false);
        let body = if self.check(&TokenKind::LBrace) {
            ArrowBody::Block(self.parse_function_body(body_cx)?)
        } else {
            ArrowBody::Expr(Box::new(self.parse_assign_expr(body_cx.with_in_allowed(cx.in_allowed))?))
        };
        let span = self.span_from(start);
        Ok(Expr::new(ExprKind::Arrow(Box::new(ArrowFunction { params, body, is_async, span })), span))
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// Parse conditional expression (ternary).
    fn parse_conditional_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        let test = self.parse_binary_expr(cx, Precedence::Coalesce)?;

        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assign_expr(cx.with_in_allowed(true).with_cover_allowed(false))?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assign_expr(cx.with_cover_allowed(false))?;
        Ok(Expr::new(
            ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            self.span_from(start),
        ))
    }

    /// Parse binary expression using precedence climbing.
    fn parse_binary_expr(&mut self, cx: Context, min: Precedence) -> PResult<Expr> {
        let start = self.start();
        let mut left = match self.kind() {
            // `#x in obj`, only where a relational expression may start. The
            // loop below then consumes `in` first.
            TokenKind::PrivateName(name)
                if cx.in_allowed && min <= Precedence::Relational && self.nth(1).kind == TokenKind::In =>
            {
                let name = name.clone();
                self.bump();
                Expr::new(ExprKind::PrivateName(name), self.span_from(start))
            }
            _ => self.parse_unary_expr(cx)?,
        };

        loop {
            let Some((op, prec, assoc)) = binary_operator(self.kind(), cx.in_allowed) else {
                break;
            };
            if prec < min {
                break;
            }
            // `-a ** b` is ambiguous and must be parenthesized.
            if op == BinaryOp::Pow && matches!(left.kind, ExprKind::Unary { .. } | ExprKind::Await(_)) {
                return self.unexpected(&[]);
            }
            self.bump();

            let next_min = match assoc {
                Assoc::Left => prec.next(),
                Assoc::Right => prec,
            };
            let operand_cx = cx.with_cover_allowed(false);
            let right = self.nested(|p| p.parse_binary_expr(operand_cx, next_min))?;

            if mixes_coalesce(op, &left) || mixes_coalesce(op, &right) {
                return Err(SyntaxError::new(ErrorKind::MixedCoalesce, self.span_from(start)));
            }
            left = Expr::new(
                ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) },
                self.span_from(start),
            );
        }

        Ok(left)
    }

    /// Parse unary expression.
    pub(crate) fn parse_unary_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        let operand_cx = cx.with_cover_allowed(false);

        let op = match self.kind() {
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let arg = self.nested(|p| p.parse_unary_expr(operand_cx))?;
            if op == UnaryOp::Delete {
                self.check_delete_operand(&arg, cx);
            }
            return Ok(Expr::new(ExprKind::Unary { op, arg: Box::new(arg) }, self.span_from(start)));
        }

        if let Some(op) = update_operator(self.kind()) {
            self.bump();
            let arg = self.nested(|p| p.parse_unary_expr(operand_cx))?;
            self.check_simple_target(&arg, cx)?;
            return Ok(Expr::new(
                ExprKind::Update { op, prefix: true, arg: Box::new(arg) },
                self.span_from(start),
            ));
        }

        if cx.in_async && self.at_word("await") {
            self.bump();
            let arg = self.nested(|p| p.parse_unary_expr(operand_cx))?;
            return Ok(Expr::new(ExprKind::Await(Box::new(arg)), self.span_from(start)));
        }

        self.parse_postfix_expr(cx)
    }

    fn check_delete_operand(&mut self, arg: &Expr, cx: Context) {
        match &arg.unparenthesized().kind {
            ExprKind::Ident(_) if cx.strict => {
                self.report(ErrorKind::StrictModeViolation("deleting an unqualified identifier"), arg.span);
            }
            ExprKind::Member { property: MemberProp::Private(_), .. } => {
                self.report(ErrorKind::InvalidSyntax("private fields cannot be deleted"), arg.span);
            }
            _ => {}
        }
    }

    /// Parse postfix expression.
    fn parse_postfix_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        let expr = self.parse_lhs_expr(cx)?;

        // Restricted production: `a\n++b` is `a; ++b`.
        if let Some(op) = update_operator(self.kind()) {
            if !self.cur().had_newline_before {
                self.check_simple_target(&expr, cx)?;
                self.bump();
                return Ok(Expr::new(
                    ExprKind::Update { op, prefix: false, arg: Box::new(expr) },
                    self.span_from(start),
                ));
            }
        }

        Ok(expr)
    }

    // =========================================================================
    // Calls and Member Access
    // =========================================================================

    /// Parse left-hand-side expression (call, member access).
    pub(crate) fn parse_lhs_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        let expr = match self.kind() {
            TokenKind::New => self.parse_new_expr(cx)?,
            TokenKind::Super => self.parse_super(cx)?,
            TokenKind::Import => self.parse_import_expr(cx)?,
            _ => self.parse_primary_expr(cx)?,
        };
        self.parse_call_tail(cx, start, expr, true)
    }

    /// Member accesses, calls and tagged templates after `expr`. With
    /// `allow_call` unset (the callee of `new`) only member accesses and
    /// tagged templates are taken.
    pub(crate) fn parse_call_tail(&mut self, cx: Context, start: u32, mut expr: Expr, allow_call: bool) -> PResult<Expr> {
        let mut in_chain = false;

        loop {
            let link = if in_chain { ChainLink::Guarded } else { ChainLink::Plain };
            let kind = match self.kind() {
                TokenKind::Dot => {
                    self.bump();
                    let property = self.parse_member_name()?;
                    ExprKind::Member { object: Box::new(expr), property, chain: link }
                }
                TokenKind::QuestionDot if allow_call => {
                    self.bump();
                    in_chain = true;
                    match self.kind() {
                        TokenKind::LParen => {
                            let args = self.parse_arguments(cx, false)?;
                            ExprKind::Call { callee: Box::new(expr), args, chain: ChainLink::Optional }
                        }
                        TokenKind::LBracket => {
                            let property = self.parse_computed_member(cx)?;
                            ExprKind::Member { object: Box::new(expr), property, chain: ChainLink::Optional }
                        }
                        TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => {
                            return Err(SyntaxError::new(
                                ErrorKind::InvalidSyntax("tagged templates cannot be used in an optional chain"),
                                self.cur().span,
                            ));
                        }
                        _ => {
                            let property = self.parse_member_name()?;
                            ExprKind::Member { object: Box::new(expr), property, chain: ChainLink::Optional }
                        }
                    }
                }
                TokenKind::LBracket => {
                    let property = self.parse_computed_member(cx)?;
                    ExprKind::Member { object: Box::new(expr), property, chain: link }
                }
                TokenKind::LParen if allow_call => {
                    // `async(...)` may turn out to be an arrow parameter list.
                    let cover = !in_chain && matches!(&expr.kind, ExprKind::Ident(name) if name == "async");
                    let args = self.parse_arguments(cx, cover)?;
                    ExprKind::Call { callee: Box::new(expr), args, chain: link }
                }
                TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => {
                    if in_chain {
                        return Err(SyntaxError::new(
                            ErrorKind::InvalidSyntax("tagged templates cannot be used in an optional chain"),
                            self.cur().span,
                        ));
                    }
                    let quasi = self.parse_template(cx)?;
                    ExprKind::TaggedTemplate { tag: Box::new(expr), quasi }
                }
                _ => break,
            };
            expr = Expr::new(kind, self.span_from(start));
        }

        if in_chain {
            expr = Expr::new(ExprKind::OptionalChain(Box::new(expr)), self.span_from(start));
        }
        Ok(expr)
    }

    /// The name after `.` or `?.`.
    fn parse_member_name(&mut self) -> PResult<MemberProp> {
        if let TokenKind::PrivateName(name) = self.kind() {
            let name = name.clone();
            self.bump();
            return Ok(MemberProp::Private(name));
        }
        match self.parse_identifier_name() {
            Ok(name) => Ok(MemberProp::Ident(name)),
            Err(_) => self.unexpected(&["property name"]),
        }
    }

    fn parse_computed_member(&mut self, cx: Context) -> PResult<MemberProp> {
        self.expect(&TokenKind::LBracket)?;
        let property = self.parse_expr(cx.with_in_allowed(true).with_cover_allowed(false))?;
        self.expect(&TokenKind::RBracket)?;
        Ok(MemberProp::Computed(Box::new(property)))
    }

    /// `( a, ...b )` of a call. With `cover` set the arguments may still
    /// become arrow parameters.
    fn parse_arguments(&mut self, cx: Context, cover: bool) -> PResult<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        let arg_cx = cx.with_in_allowed(true).with_cover_allowed(cover);
        let mut args = Vec::new();

        while !self.check(&TokenKind::RParen) {
            let arg = if self.check(&TokenKind::Spread) {
                self.parse_spread_element(arg_cx)?
            } else {
                self.parse_assign_expr(arg_cx)?
            };
            args.push(arg);
            if !self.check(&TokenKind::RParen) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RParen)?;

        Ok(args)
    }

    fn parse_spread_element(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.expect(&TokenKind::Spread)?;
        let arg = self.parse_assign_expr(cx)?;
        if self.check(&TokenKind::Comma) {
            self.spread_trailing_comma.insert(start);
        }
        Ok(Expr::new(ExprKind::Spread(Box::new(arg)), self.span_from(start)))
    }

    fn parse_new_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.bump();

        // new.target
        if self.eat(&TokenKind::Dot) {
            self.expect_word("target")?;
            let span = self.span_from(start);
            if !cx.in_function && !cx.in_class_field {
                self.report(ErrorKind::InvalidSyntax("`new.target` is only valid inside functions"), span);
            }
            return Ok(Expr::new(
                ExprKind::MetaProperty { meta: "new".into(), property: "target".into() },
                span,
            ));
        }

        let callee_start = self.start();
        let callee = match self.kind() {
            TokenKind::New => self.parse_new_expr(cx)?,
            TokenKind::Super => self.parse_super(cx)?,
            TokenKind::Import => return self.unexpected(&["constructor"]),
            _ => self.parse_primary_expr(cx)?,
        };
        let callee = self.parse_call_tail(cx, callee_start, callee, false)?;
        if self.check(&TokenKind::QuestionDot) {
            return Err(SyntaxError::new(
                ErrorKind::InvalidSyntax("optional chains cannot be used in a `new` expression"),
                self.cur().span,
            ));
        }

        let args = if self.check(&TokenKind::LParen) {
            self.parse_arguments(cx, false)?
        } else {
            Vec::new()
        };
        Ok(Expr::new(ExprKind::New { callee: Box::new(callee), args }, self.span_from(start)))
    }

    fn parse_super(&mut self, _cx: Context) -> PResult<Expr> {
        let token = self.bump();
        if !matches!(self.kind(), TokenKind::LParen | TokenKind::Dot | TokenKind::LBracket) {
            return self.unexpected(&["`(`", "`.`", "`[`"]);
        }
        Ok(Expr::new(ExprKind::Super, token.span))
    }

    /// `import(source)`, `import(source, options)` and `import.meta`.
    fn parse_import_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.bump();

        if self.eat(&TokenKind::Dot) {
            self.expect_word("meta")?;
            let span = self.span_from(start);
            if !self.options.is_module() {
                self.report(ErrorKind::InvalidSyntax("`import.meta` is only valid in modules"), span);
            }
            return Ok(Expr::new(
                ExprKind::MetaProperty { meta: "import".into(), property: "meta".into() },
                span,
            ));
        }

        self.expect(&TokenKind::LParen)?;
        let arg_cx = cx.with_in_allowed(true).with_cover_allowed(false);
        let source = Box::new(self.parse_assign_expr(arg_cx)?);
        let mut options = None;
        if self.eat(&TokenKind::Comma) && !self.check(&TokenKind::RParen) {
            options = Some(Box::new(self.parse_assign_expr(arg_cx)?));
            self.eat(&TokenKind::Comma);
        }
        self.expect(&TokenKind::RParen)?;

        Ok(Expr::new(ExprKind::Import { source, options }, self.span_from(start)))
    }

    // =========================================================================
    // Primary Expressions
    // =========================================================================

    fn parse_primary_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        let kind = match self.kind() {
            TokenKind::Identifier(name) => {
                if name == "async" && self.nth(1).kind == TokenKind::Function && !self.nth(1).had_newline_before {
                    self.bump();
                    let function = self.parse_function(cx, start, true, FunctionName::Optional)?;
                    return Ok(Expr::new(ExprKind::Function(Box::new(function)), self.span_from(start)));
                }
                let name = name.clone();
                let token = self.bump();
                self.check_reference_name(&name, token.span, cx);
                ExprKind::Ident(name)
            }
            TokenKind::Number(value) => {
                let value = *value;
                self.bump();
                ExprKind::Number(value)
            }
            TokenKind::String(value) => {
                let value = value.clone();
                self.bump();
                ExprKind::String(value)
            }
            TokenKind::BigInt(digits) => {
                let digits = digits.clone();
                self.bump();
                ExprKind::BigInt(digits)
            }
            TokenKind::Regex { pattern, flags } => {
                let (pattern, flags) = (pattern.clone(), flags.clone());
                self.bump();
                ExprKind::Regex { pattern, flags }
            }
            TokenKind::Null => {
                self.bump();
                ExprKind::Null
            }
            TokenKind::True | TokenKind::False => {
                let value = self.bump().kind == TokenKind::True;
                ExprKind::Bool(value)
            }
            TokenKind::This => {
                self.bump();
                ExprKind::This
            }
            TokenKind::TemplateNoSub(_) | TokenKind::TemplateHead(_) => ExprKind::Template(self.parse_template(cx)?),
            TokenKind::LBracket => return self.parse_array_literal(cx),
            TokenKind::LBrace => return self.parse_object_literal(cx),
            TokenKind::LParen => return self.parse_paren_expr(cx),
            TokenKind::Function => {
                let function = self.parse_function(cx, start, false, FunctionName::Optional)?;
                ExprKind::Function(Box::new(function))
            }
            TokenKind::Class => {
                let class = self.parse_class(cx, start, false)?;
                ExprKind::Class(Box::new(class))
            }
            _ => return self.unexpected(&["expression"]),
        };
        Ok(Expr::new(kind, self.span_from(start)))
    }

    fn parse_paren_expr(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expr(cx.with_in_allowed(true).with_cover_allowed(false))?;
        self.expect(&TokenKind::RParen)?;
        Ok(Expr::new(ExprKind::Paren(Box::new(expr)), self.span_from(start)))
    }

    /// Parse a template literal; the current token is its head.
    pub(crate) fn parse_template(&mut self, cx: Context) -> PResult<Template> {
        let mut quasis = Vec::new();
        let mut exprs = Vec::new();

        let head = self.bump();
        match head.kind {
            TokenKind::TemplateNoSub(text) => return Ok(Template { quasis: vec![text], exprs }),
            TokenKind::TemplateHead(text) => quasis.push(text),
            _ => return Err(SyntaxError::unexpected(&head, &["template literal"])),
        }

        loop {
            exprs.push(self.parse_expr(cx.with_in_allowed(true).with_cover_allowed(false))?);
            let token = self.bump();
            match token.kind {
                TokenKind::TemplateMiddle(text) => quasis.push(text),
                TokenKind::TemplateTail(text) => {
                    quasis.push(text);
                    break;
                }
                _ => return Err(SyntaxError::unexpected(&token, &["`}`"])),
            }
        }

        Ok(Template { quasis, exprs })
    }

    fn parse_array_literal(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.expect(&TokenKind::LBracket)?;
        let element_cx = cx.with_in_allowed(true).with_cover_allowed(true);
        let mut elements = Vec::new();

        while !self.check(&TokenKind::RBracket) {
            if self.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            let element = if self.check(&TokenKind::Spread) {
                self.parse_spread_element(element_cx)?
            } else {
                self.parse_assign_expr(element_cx)?
            };
            elements.push(Some(element));
            if !self.check(&TokenKind::RBracket) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RBracket)?;

        Ok(Expr::new(ExprKind::Array(elements), self.span_from(start)))
    }

    fn parse_object_literal(&mut self, cx: Context) -> PResult<Expr> {
        let start = self.start();
        self.expect(&TokenKind::LBrace)?;
        let prop_cx = cx.with_in_allowed(true);
        let mut props = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            props.push(self.parse_object_property(prop_cx)?);
            if !self.check(&TokenKind::RBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Expr::new(ExprKind::Object(props), self.span_from(start)))
    }

    fn parse_object_property(&mut self, cx: Context) -> PResult<Property> {
        let start = self.start();

        if self.check(&TokenKind::Spread) {
            self.bump();
            let arg = self.parse_assign_expr(cx.with_cover_allowed(true))?;
            if self.check(&TokenKind::Comma) {
                self.spread_trailing_comma.insert(start);
            }
            return Ok(Property { kind: PropertyKind::Spread(arg), span: self.span_from(start) });
        }

        let (is_async, is_generator, method_kind) = self.parse_method_modifiers();
        let key_is_ident = matches!(self.kind(), TokenKind::Identifier(_));
        let key_span = self.cur().span;
        let key = self.parse_property_key(cx)?;
        if let PropertyKey::Private(_) = key {
            return Err(SyntaxError::new(
                ErrorKind::InvalidSyntax("private names are only valid in class bodies"),
                key_span,
            ));
        }

        if is_async || is_generator || method_kind != MethodKind::Method || self.check(&TokenKind::LParen) {
            let function = self.parse_method_function(cx, start, is_async, is_generator)?;
            self.check_accessor_params(method_kind, &function);
            return Ok(Property {
                kind: PropertyKind::Method { key, kind: method_kind, function: Box::new(function) },
                span: self.span_from(start),
            });
        }

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_assign_expr(cx.with_cover_allowed(true))?;
            return Ok(Property { kind: PropertyKind::Init { key, value }, span: self.span_from(start) });
        }

        let name = match key {
            PropertyKey::Ident(name) if key_is_ident => name,
            _ => return self.unexpected(&["`:`"]),
        };
        self.check_reference_name(&name, key_span, cx);

        if self.eat(&TokenKind::Eq) {
            let default = self.parse_assign_expr(cx.with_cover_allowed(false))?;
            let span = self.span_from(start);
            self.pending_cover.push(span);
            return Ok(Property { kind: PropertyKind::CoverInit { name, default }, span });
        }

        Ok(Property { kind: PropertyKind::Shorthand(name), span: self.span_from(start) })
    }

    /// `async`, `*`, `get` and `set` before a method name. A modifier
    /// directly followed by `(`, `:`, `=`, `,` or a closing brace is the
    /// member name itself.
    pub(crate) fn parse_method_modifiers(&mut self) -> (bool, bool, MethodKind) {
        let names_member = matches!(
            self.nth(1).kind,
            TokenKind::LParen
                | TokenKind::Colon
                | TokenKind::Eq
                | TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::RBrace
                | TokenKind::Eof
        );

        let mut is_async = false;
        let mut kind = MethodKind::Method;
        if !names_member {
            if self.at_word("async") && !self.nth(1).had_newline_before {
                self.bump();
                is_async = true;
            } else if self.at_word("get") {
                self.bump();
                kind = MethodKind::Get;
            } else if self.at_word("set") {
                self.bump();
                kind = MethodKind::Set;
            }
        }
        let is_generator = self.eat(&TokenKind::Star);
        (is_async, is_generator, kind)
    }

    pub(crate) fn check_accessor_params(&mut self, kind: MethodKind, function: &Function) {
        match kind {
            MethodKind::Get if !function.params.is_empty() => {
                self.report(ErrorKind::InvalidSyntax("a getter takes no parameters"), function.params.span);
            }
            MethodKind::Set if function.params.items.len() != 1 || function.params.rest.is_some() => {
                self.report(ErrorKind::InvalidSyntax("a setter takes exactly one parameter"), function.params.span);
            }
            MethodKind::Get | MethodKind::Set if function.is_generator || function.is_async => {
                self.report(ErrorKind::InvalidSyntax("accessors cannot be async or generators"), function.span);
            }
            _ => {}
        }
    }

    /// A property or member name: identifier, reserved word, string, number,
    /// `[computed]` or `#private`.
    pub(crate) fn parse_property_key(&mut self, cx: Context) -> PResult<PropertyKey> {
        let key = match self.kind() {
            TokenKind::Identifier(name) => PropertyKey::Ident(name.clone()),
            TokenKind::String(value) => PropertyKey::String(value.clone()),
            TokenKind::Number(value) => PropertyKey::Number(*value),
            TokenKind::BigInt(digits) => PropertyKey::BigInt(digits.clone()),
            TokenKind::PrivateName(name) => PropertyKey::Private(name.clone()),
            TokenKind::LBracket => {
                self.bump();
                let expr = self.parse_assign_expr(cx.with_in_allowed(true).with_cover_allowed(false))?;
                self.expect(&TokenKind::RBracket)?;
                return Ok(PropertyKey::Computed(Box::new(expr)));
            }
            kind => match kind.keyword_text() {
                Some(word) => PropertyKey::Ident(word.to_string()),
                None => return self.unexpected(&["property name"]),
            },
        };
        self.bump();
        Ok(key)
    }
}

fn update_operator(kind: &TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOp::Increment),
        TokenKind::MinusMinus => Some(UpdateOp::Decrement),
        _ => None,
    }
}

/// `??` directly combined with an unparenthesized `||` or `&&`.
fn mixes_coalesce(op: BinaryOp, operand: &Expr) -> bool {
    match operand.kind {
        ExprKind::Binary { op: inner, .. } => {
            (op == BinaryOp::NullishCoalesce && inner.is_short_circuit_logical())
                || (op.is_short_circuit_logical() && inner == BinaryOp::NullishCoalesce)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::{parse, ParserOptions};

    fn expr(source: &str) -> Expr {
        let program = parse(source, ParserOptions::default()).unwrap();
        match program.body.into_iter().next().map(|s| s.kind) {
            Some(StmtKind::Expr(expr)) => expr,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    fn binary(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => (*op, left, right),
            other => panic!("expected a binary expression, got {other:?}"),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let e = expr("1 + 2 * 3");
        let (op, left, right) = binary(&e);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(left.kind, ExprKind::Number(1.0));
        assert_eq!(binary(right).0, BinaryOp::Mul);
    }

    #[test]
    fn test_left_associative_subtraction() {
        let e = expr("a - b - c");
        let (op, left, _) = binary(&e);
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(binary(left).0, BinaryOp::Sub);
    }

    #[test]
    fn test_in_operator_and_private_in() {
        assert!(parse("class A { #x; has(o) { return #x in o; } }", ParserOptions::default()).is_ok());
        let e = expr("'a' in b");
        assert_eq!(binary(&e).0, BinaryOp::In);
    }

    #[test]
    fn test_unary_on_left_of_pow_is_rejected() {
        assert!(parse("-2 ** 2", ParserOptions::default()).is_err());
        assert!(parse("(-2) ** 2", ParserOptions::default()).is_ok());
        assert!(parse("2 ** -2", ParserOptions::default()).is_ok());
    }

    #[test]
    fn test_async_forms() {
        assert!(matches!(expr("async(a, b)").kind, ExprKind::Call { .. }));
        let ExprKind::Arrow(arrow) = expr("async (a, b) => a").kind else { panic!() };
        assert!(arrow.is_async);
        assert_eq!(arrow.params.len(), 2);
        let ExprKind::Arrow(arrow) = expr("async x => x").kind else { panic!() };
        assert!(arrow.is_async);
        assert!(matches!(expr("async").kind, ExprKind::Ident(_)));
    }

    #[test]
    fn test_yield_only_in_generators() {
        assert!(parse("function* g() { yield\n1; }", ParserOptions::default()).is_ok());
        assert!(matches!(expr("yield").kind, ExprKind::Ident(_)));
    }

    #[test]
    fn test_new_forms() {
        let ExprKind::New { callee, args } = expr("new a.b.C(1)").kind else { panic!() };
        assert!(matches!(callee.kind, ExprKind::Member { .. }));
        assert_eq!(args.len(), 1);
        let ExprKind::Member { object, .. } = expr("new Foo().bar").kind else { panic!() };
        assert!(matches!(object.kind, ExprKind::New { .. }));
        assert!(parse("new a?.b()", ParserOptions::default()).is_err());
    }

    #[test]
    fn test_tagged_template() {
        let ExprKind::TaggedTemplate { quasi, .. } = expr("tag`a${b}c`").kind else { panic!() };
        assert_eq!(quasi.quasis, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(quasi.exprs.len(), 1);
    }
}
