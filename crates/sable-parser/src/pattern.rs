//! Binding patterns and the expression-to-pattern resolver.
//!
//! Declarations and parameter lists parse patterns directly. Everything
//! else (`[a, b] = c`, `for ({x} of xs)`, `async (a) => a`) is first parsed
//! as an expression and then reinterpreted here.

use crate::ast::*;
use crate::context::Context;
use crate::error::{ErrorKind, PResult, SyntaxError};
use crate::parser::Parser;
use crate::span::Span;
use crate::stream::TokenStream;
use crate::token::TokenKind;

/// How a reinterpreted expression will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMode {
    /// Declares names: only identifiers and destructuring are allowed.
    Binding,
    /// Assigns to existing targets: member expressions are allowed too.
    Assignment,
}

impl<S: TokenStream> Parser<S> {
    // =========================================================================
    // Binding Patterns
    // =========================================================================

    /// Parse an identifier, array pattern or object pattern.
    pub(crate) fn parse_binding_pattern(&mut self, cx: Context) -> PResult<Pattern> {
        let start = self.start();
        match self.kind() {
            TokenKind::LBracket => self.parse_array_binding(cx),
            TokenKind::LBrace => self.parse_object_binding(cx),
            _ => {
                let name = self.parse_binding_identifier(cx)?;
                Ok(Pattern::new(PatternKind::Ident(name), self.span_from(start)))
            }
        }
    }

    /// A pattern with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self, cx: Context) -> PResult<PatternElement> {
        let start = self.start();
        let target = self.parse_binding_pattern(cx)?;
        let default = if self.eat(&TokenKind::Eq) {
            Some(self.parse_assign_expr(cx.with_in_allowed(true).with_cover_allowed(false))?)
        } else {
            None
        };
        Ok(PatternElement { target, default, span: self.span_from(start) })
    }

    /// `...target`, which must be the last entry of its list.
    pub(crate) fn parse_rest_binding(&mut self, cx: Context) -> PResult<Pattern> {
        self.expect(&TokenKind::Spread)?;
        let target = self.parse_binding_pattern(cx)?;
        if self.check(&TokenKind::Eq) {
            return Err(SyntaxError::new(
                ErrorKind::InvalidPattern("a rest element cannot have a default"),
                self.cur().span,
            ));
        }
        self.check_rest_is_last()?;
        Ok(target)
    }

    /// Fail if anything follows a rest element. A second `...` right after
    /// it is a duplicate rest.
    fn check_rest_is_last(&self) -> PResult<()> {
        if !self.check(&TokenKind::Comma) {
            return Ok(());
        }
        let next = self.nth(1);
        if next.kind == TokenKind::Spread {
            return Err(SyntaxError::new(ErrorKind::DuplicateRestElement, next.span));
        }
        Err(SyntaxError::new(ErrorKind::InvalidPattern("a rest element must be last"), self.cur().span))
    }

    fn parse_array_binding(&mut self, cx: Context) -> PResult<Pattern> {
        let start = self.start();
        self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        let mut rest = None;

        while !self.check(&TokenKind::RBracket) {
            if self.eat(&TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            if self.check(&TokenKind::Spread) {
                rest = Some(Box::new(self.parse_rest_binding(cx)?));
                break;
            }
            elements.push(Some(self.parse_binding_element(cx)?));
            if !self.check(&TokenKind::RBracket) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RBracket)?;

        Ok(Pattern::new(PatternKind::Array { elements, rest }, self.span_from(start)))
    }

    fn parse_object_binding(&mut self, cx: Context) -> PResult<Pattern> {
        let start = self.start();
        self.expect(&TokenKind::LBrace)?;
        let mut props = Vec::new();
        let mut rest = None;

        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Spread) {
                let rest_start = self.start();
                self.bump();
                let name = self.parse_binding_identifier(cx)?;
                rest = Some(Box::new(Pattern::new(PatternKind::Ident(name), self.span_from(rest_start))));
                self.check_rest_is_last()?;
                break;
            }
            props.push(self.parse_binding_prop(cx)?);
            if !self.check(&TokenKind::RBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(Pattern::new(PatternKind::Object { props, rest }, self.span_from(start)))
    }

    /// `key: pattern = default` or shorthand `name = default`.
    fn parse_binding_prop(&mut self, cx: Context) -> PResult<PatternProp> {
        let start = self.start();
        let key_is_ident = matches!(self.kind(), TokenKind::Identifier(_));
        let key_span = self.cur().span;
        let key = self.parse_property_key(cx)?;

        if self.eat(&TokenKind::Colon) {
            let element = self.parse_binding_element(cx)?;
            return Ok(PatternProp {
                key,
                value: element.target,
                default: element.default,
                shorthand: false,
                span: self.span_from(start),
            });
        }

        let name = match &key {
            PropertyKey::Ident(name) if key_is_ident => name.clone(),
            _ => return self.unexpected(&["`:`"]),
        };
        self.check_binding_name(&name, key_span, cx);
        let default = if self.eat(&TokenKind::Eq) {
            Some(self.parse_assign_expr(cx.with_in_allowed(true).with_cover_allowed(false))?)
        } else {
            None
        };
        Ok(PatternProp {
            key,
            value: Pattern::new(PatternKind::Ident(name), key_span),
            default,
            shorthand: true,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Expression to Pattern
    // =========================================================================

    /// Reinterpret an already parsed expression as a pattern.
    pub(crate) fn expr_to_pattern(&mut self, expr: Expr, mode: PatternMode, cx: Context) -> PResult<Pattern> {
        let span = expr.span;
        match expr.kind {
            ExprKind::Ident(name) => {
                self.check_target_name(&name, span, mode, cx);
                Ok(Pattern::new(PatternKind::Ident(name), span))
            }
            kind @ ExprKind::Member { .. } => match mode {
                PatternMode::Assignment => Ok(Pattern::new(PatternKind::Member(Box::new(Expr::new(kind, span))), span)),
                PatternMode::Binding => Err(SyntaxError::new(
                    ErrorKind::InvalidPattern("a member expression cannot be bound"),
                    span,
                )),
            },
            ExprKind::Paren(inner) => {
                let is_simple = matches!(inner.unparenthesized().kind, ExprKind::Ident(_) | ExprKind::Member { .. });
                if mode == PatternMode::Binding || !is_simple {
                    return Err(SyntaxError::new(
                        ErrorKind::InvalidPattern("a parenthesized pattern must be a simple target"),
                        span,
                    ));
                }
                self.expr_to_pattern(*inner, mode, cx)
            }
            ExprKind::Array(elements) => self.array_to_pattern(elements, span, mode, cx),
            ExprKind::Object(props) => self.object_to_pattern(props, span, mode, cx),
            _ => Err(SyntaxError::new(ErrorKind::InvalidAssignmentTarget, span)),
        }
    }

    /// Target of `+=`, `&&=`, `++` and friends: an identifier or a
    /// non-optional member expression, possibly parenthesized.
    pub(crate) fn expr_to_simple_target(&mut self, expr: Expr, cx: Context) -> PResult<Pattern> {
        self.check_simple_target(&expr, cx)?;
        let mut expr = expr;
        while let ExprKind::Paren(inner) = expr.kind {
            expr = *inner;
        }
        let span = expr.span;
        match expr.kind {
            ExprKind::Ident(name) => Ok(Pattern::new(PatternKind::Ident(name), span)),
            kind => Ok(Pattern::new(PatternKind::Member(Box::new(Expr::new(kind, span))), span)),
        }
    }

    pub(crate) fn check_simple_target(&mut self, expr: &Expr, cx: Context) -> PResult<()> {
        match &expr.unparenthesized().kind {
            ExprKind::Ident(name) => {
                self.check_target_name(name, expr.span, PatternMode::Assignment, cx);
                Ok(())
            }
            ExprKind::Member { .. } => Ok(()),
            _ => Err(SyntaxError::new(ErrorKind::InvalidAssignmentTarget, expr.span)),
        }
    }

    /// Arguments of `async(...)` reinterpreted as arrow parameters.
    pub(crate) fn args_to_params(&mut self, args: Vec<Expr>, span: Span, cx: Context) -> PResult<Params> {
        let count = args.len();
        let mut items = Vec::with_capacity(count);
        let mut rest = None;

        for (index, arg) in args.into_iter().enumerate() {
            if let ExprKind::Spread(inner) = arg.kind {
                if index + 1 != count {
                    return Err(SyntaxError::new(ErrorKind::InvalidPattern("a rest parameter must be last"), arg.span));
                }
                self.check_rest(&inner, arg.span)?;
                rest = Some(Box::new(self.expr_to_pattern(*inner, PatternMode::Binding, cx)?));
            } else {
                items.push(self.expr_to_element(arg, PatternMode::Binding, cx)?);
            }
        }

        Ok(Params { items, rest, span })
    }

    fn array_to_pattern(
        &mut self,
        elements: Vec<Option<Expr>>,
        span: Span,
        mode: PatternMode,
        cx: Context,
    ) -> PResult<Pattern> {
        let spreads = elements.iter().flatten().filter(|e| matches!(e.kind, ExprKind::Spread(_))).count();
        if spreads > 1 {
            return Err(SyntaxError::new(ErrorKind::DuplicateRestElement, span));
        }

        let count = elements.len();
        let mut items = Vec::with_capacity(count);
        let mut rest = None;
        for (index, element) in elements.into_iter().enumerate() {
            let Some(element) = element else {
                items.push(None);
                continue;
            };
            if let ExprKind::Spread(inner) = element.kind {
                if index + 1 != count {
                    return Err(SyntaxError::new(
                        ErrorKind::InvalidPattern("a rest element must be last"),
                        element.span,
                    ));
                }
                self.check_rest(&inner, element.span)?;
                rest = Some(Box::new(self.expr_to_pattern(*inner, mode, cx)?));
            } else {
                items.push(Some(self.expr_to_element(element, mode, cx)?));
            }
        }

        Ok(Pattern::new(PatternKind::Array { elements: items, rest }, span))
    }

    fn object_to_pattern(
        &mut self,
        props: Vec<Property>,
        span: Span,
        mode: PatternMode,
        cx: Context,
    ) -> PResult<Pattern> {
        let spreads = props.iter().filter(|p| matches!(p.kind, PropertyKind::Spread(_))).count();
        if spreads > 1 {
            return Err(SyntaxError::new(ErrorKind::DuplicateRestElement, span));
        }

        let count = props.len();
        let mut pattern_props = Vec::with_capacity(count);
        let mut rest = None;
        for (index, prop) in props.into_iter().enumerate() {
            let prop_span = prop.span;
            match prop.kind {
                PropertyKind::Init { key, value } => {
                    let element = self.expr_to_element(value, mode, cx)?;
                    pattern_props.push(PatternProp {
                        key,
                        value: element.target,
                        default: element.default,
                        shorthand: false,
                        span: prop_span,
                    });
                }
                PropertyKind::Shorthand(name) => {
                    let name_span = Span::new(prop_span.start, prop_span.start + name.len() as u32);
                    self.check_target_name(&name, name_span, mode, cx);
                    pattern_props.push(PatternProp {
                        key: PropertyKey::Ident(name.clone()),
                        value: Pattern::new(PatternKind::Ident(name), prop_span),
                        default: None,
                        shorthand: true,
                        span: prop_span,
                    });
                }
                PropertyKind::CoverInit { name, default } => {
                    let name_span = Span::new(prop_span.start, prop_span.start + name.len() as u32);
                    self.check_target_name(&name, name_span, mode, cx);
                    pattern_props.push(PatternProp {
                        key: PropertyKey::Ident(name.clone()),
                        value: Pattern::new(PatternKind::Ident(name), name_span),
                        default: Some(default),
                        shorthand: true,
                        span: prop_span,
                    });
                }
                PropertyKind::Method { .. } => {
                    return Err(SyntaxError::new(
                        ErrorKind::InvalidPattern("methods cannot appear in a pattern"),
                        prop_span,
                    ));
                }
                PropertyKind::Spread(inner) => {
                    if index + 1 != count {
                        return Err(SyntaxError::new(
                            ErrorKind::InvalidPattern("a rest element must be last"),
                            prop_span,
                        ));
                    }
                    self.check_rest(&inner, prop_span)?;
                    let target = self.expr_to_pattern(inner, mode, cx)?;
                    if !target.is_simple() {
                        return Err(SyntaxError::new(
                            ErrorKind::InvalidPattern("an object rest element must be a simple target"),
                            prop_span,
                        ));
                    }
                    rest = Some(Box::new(target));
                }
            }
        }

        Ok(Pattern::new(PatternKind::Object { props: pattern_props, rest }, span))
    }

    /// An element position: `target` or `target = default`.
    fn expr_to_element(&mut self, expr: Expr, mode: PatternMode, cx: Context) -> PResult<PatternElement> {
        let span = expr.span;
        match expr.kind {
            ExprKind::Assign { op: AssignOp::Assign, target, value } => {
                if mode == PatternMode::Binding {
                    self.check_binding_target(&target)?;
                }
                Ok(PatternElement { target: *target, default: Some(*value), span })
            }
            ExprKind::Assign { .. } => Err(SyntaxError::new(ErrorKind::InvalidAssignmentTarget, span)),
            kind => {
                let target = self.expr_to_pattern(Expr::new(kind, span), mode, cx)?;
                Ok(PatternElement { target, default: None, span })
            }
        }
    }

    /// Spread entries that become rest elements: no default, no trailing comma.
    fn check_rest(&self, inner: &Expr, spread_span: Span) -> PResult<()> {
        if matches!(inner.kind, ExprKind::Assign { .. }) {
            return Err(SyntaxError::new(
                ErrorKind::InvalidPattern("a rest element cannot have a default"),
                spread_span,
            ));
        }
        if self.spread_trailing_comma.contains(&spread_span.start) {
            return Err(SyntaxError::new(
                ErrorKind::InvalidPattern("a rest element cannot be followed by a comma"),
                spread_span,
            ));
        }
        Ok(())
    }

    /// A pattern built in assignment mode, now needed as a binding.
    fn check_binding_target(&self, pattern: &Pattern) -> PResult<()> {
        match &pattern.kind {
            PatternKind::Ident(_) => Ok(()),
            PatternKind::Member(_) => Err(SyntaxError::new(
                ErrorKind::InvalidPattern("a member expression cannot be bound"),
                pattern.span,
            )),
            PatternKind::Array { elements, rest } => {
                for element in elements.iter().flatten() {
                    self.check_binding_target(&element.target)?;
                }
                rest.as_deref().map_or(Ok(()), |rest| self.check_binding_target(rest))
            }
            PatternKind::Object { props, rest } => {
                for prop in props {
                    self.check_binding_target(&prop.value)?;
                }
                rest.as_deref().map_or(Ok(()), |rest| self.check_binding_target(rest))
            }
        }
    }

    fn check_target_name(&mut self, name: &str, span: Span, mode: PatternMode, cx: Context) {
        match mode {
            PatternMode::Binding => self.check_binding_name(name, span, cx),
            PatternMode::Assignment => {
                if cx.strict && matches!(name, "eval" | "arguments") {
                    self.report(ErrorKind::ReservedWordMisuse { word: name.to_string() }, span);
                } else {
                    self.check_reference_name(name, span, cx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::{parse, ParserOptions};

    fn first_pattern(source: &str) -> Pattern {
        let program = parse(source, ParserOptions::default()).unwrap();
        match program.body.into_iter().next().map(|s| s.kind) {
            Some(StmtKind::Var(mut decl)) => decl.decls.remove(0).target,
            Some(StmtKind::Expr(expr)) => match expr.unparenthesized().kind.clone() {
                ExprKind::Assign { target, .. } => *target,
                other => panic!("unexpected expression: {other:?}"),
            },
            other => panic!("unexpected statement: {other:?}"),
        }
    }

    #[test]
    fn test_assignment_array_pattern() {
        let pattern = first_pattern("[a, , b = 1, ...c] = d;");
        let PatternKind::Array { elements, rest } = pattern.kind else { panic!() };
        assert_eq!(elements.len(), 3);
        assert!(elements[1].is_none());
        assert!(elements[2].as_ref().unwrap().default.is_some());
        assert!(matches!(rest.unwrap().kind, PatternKind::Ident(ref n) if n == "c"));
    }

    #[test]
    fn test_member_targets_in_assignment() {
        let pattern = first_pattern("({a: x.y, b: z[0]} = obj);");
        let PatternKind::Object { props, .. } = pattern.kind else { panic!() };
        assert!(props.iter().all(|p| matches!(p.value.kind, PatternKind::Member(_))));
    }

    #[test]
    fn test_shorthand_initializer_becomes_default() {
        let pattern = first_pattern("({a = 1, b} = c);");
        let PatternKind::Object { props, .. } = pattern.kind else { panic!() };
        assert!(props[0].shorthand && props[0].default.is_some());
        assert!(props[1].shorthand && props[1].default.is_none());
    }

    #[test]
    fn test_rest_errors() {
        let cases = [
            ("[...a, ...b] = c;", "DuplicateRestElement"),
            ("[...a, b] = c;", "InvalidPattern"),
            ("[...a,] = c;", "InvalidPattern"),
            ("[...a = 1] = c;", "InvalidPattern"),
            ("let [...a, b] = c;", "InvalidPattern"),
            ("let [...a, ...b] = c;", "DuplicateRestElement"),
            ("let {...a, ...b} = c;", "DuplicateRestElement"),
            ("function f(...a, ...b) {}", "DuplicateRestElement"),
            ("function f(...a, b) {}", "InvalidPattern"),
            ("({...{a}} = c);", "InvalidPattern"),
        ];
        for (source, code) in cases {
            let errors = parse(source, ParserOptions::default()).unwrap_err();
            assert_eq!(errors.errors()[0].code(), code, "{source}");
        }
    }
}
