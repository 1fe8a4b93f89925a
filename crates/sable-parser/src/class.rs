//! Class declarations and expressions.

use rustc_hash::FxHashMap;

use crate::ast::*;
use crate::context::Context;
use crate::error::{ErrorKind, PResult};
use crate::parser::Parser;
use crate::stream::TokenStream;
use crate::token::TokenKind;

/// What a private name has been declared as so far.
#[derive(Debug, Clone, Copy, Default)]
struct PrivateSlot {
    getter: bool,
    setter: bool,
    /// A field or plain method: nothing may share the name.
    other: bool,
    is_static: bool,
}

/// Per-body bookkeeping for member validation.
#[derive(Default)]
struct ClassBodyState {
    has_constructor: bool,
    private_names: FxHashMap<String, PrivateSlot>,
}

impl<S: TokenStream> Parser<S> {
    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn parse_class_decl(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        let class = self.parse_class(cx, start, true)?;
        Ok(Stmt::new(StmtKind::Class(Box::new(class)), self.span_from(start)))
    }

    /// Parse `class` name? (`extends` expr)? `{ body }`. Class code is always strict.
    pub(crate) fn parse_class(&mut self, cx: Context, start: u32, name_required: bool) -> PResult<Class> {
        self.expect(&TokenKind::Class)?;
        let cx = cx.with_strict(true);

        let name = if matches!(self.kind(), TokenKind::Identifier(_)) {
            Some(self.parse_binding_identifier(cx)?)
        } else if name_required {
            return self.unexpected(&["class name"]);
        } else {
            None
        };

        let super_class = if self.eat(&TokenKind::Extends) {
            Some(Box::new(self.parse_lhs_expr(cx.with_cover_allowed(false))?))
        } else {
            None
        };

        let body = self.parse_class_body(cx)?;
        Ok(Class { name, super_class, body, span: self.span_from(start) })
    }

    fn parse_class_body(&mut self, cx: Context) -> PResult<Vec<ClassMember>> {
        self.expect(&TokenKind::LBrace)?;
        let mut state = ClassBodyState::default();
        let mut members = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            let member = self.nested(|p| p.parse_class_member(cx))?;
            self.check_class_member(&member, &mut state);
            members.push(member);
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(members)
    }

    fn parse_class_member(&mut self, cx: Context) -> PResult<ClassMember> {
        let start = self.start();

        if self.at_word("static") && self.nth(1).kind == TokenKind::LBrace {
            self.bump();
            let body = self.parse_block_body(cx.class_field())?;
            return Ok(ClassMember { kind: ClassMemberKind::StaticBlock(body), span: self.span_from(start) });
        }

        // `static` alone, or directly followed by `(` or `=`, names the member.
        let is_static = self.at_word("static")
            && !matches!(
                self.nth(1).kind,
                TokenKind::LParen | TokenKind::Eq | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
            );
        if is_static {
            self.bump();
        }

        let (is_async, is_generator, mut kind) = self.parse_method_modifiers();
        let key = self.parse_property_key(cx)?;

        if is_async || is_generator || kind != MethodKind::Method || self.check(&TokenKind::LParen) {
            let is_constructor =
                !is_static && matches!(&key, PropertyKey::Ident(name) | PropertyKey::String(name) if name == "constructor");
            let function = self.parse_method_function(cx, start, is_async, is_generator)?;
            self.check_accessor_params(kind, &function);
            if is_constructor {
                if kind != MethodKind::Method || is_async || is_generator {
                    self.report(
                        ErrorKind::InvalidClassMember("a constructor cannot be a getter, setter, generator or async"),
                        self.span_from(start),
                    );
                } else {
                    kind = MethodKind::Constructor;
                }
            }
            return Ok(ClassMember {
                kind: ClassMemberKind::Method { key, kind, is_static, function: Box::new(function) },
                span: self.span_from(start),
            });
        }

        let value = if self.eat(&TokenKind::Eq) {
            Some(self.parse_assign_expr(cx.class_field())?)
        } else {
            None
        };
        self.consume_semicolon()?;

        Ok(ClassMember { kind: ClassMemberKind::Field { key, value, is_static }, span: self.span_from(start) })
    }

    /// Rules that span several members: one constructor, unique private names.
    fn check_class_member(&mut self, member: &ClassMember, state: &mut ClassBodyState) {
        let (key, is_static, slot_kind) = match &member.kind {
            ClassMemberKind::StaticBlock(_) => return,
            ClassMemberKind::Method { key, kind, is_static, .. } => (key, *is_static, Some(*kind)),
            ClassMemberKind::Field { key, is_static, .. } => (key, *is_static, None),
        };

        if slot_kind == Some(MethodKind::Constructor) {
            if state.has_constructor {
                self.report(ErrorKind::InvalidClassMember("a class may only have one constructor"), member.span);
            }
            state.has_constructor = true;
        }

        match key {
            PropertyKey::Ident(name) | PropertyKey::String(name) => {
                if slot_kind.is_none() && name == "constructor" {
                    self.report(ErrorKind::InvalidClassMember("a field cannot be named `constructor`"), member.span);
                } else if is_static && name == "prototype" {
                    self.report(
                        ErrorKind::InvalidClassMember("a static member cannot be named `prototype`"),
                        member.span,
                    );
                }
            }
            PropertyKey::Private(name) => {
                if name == "constructor" {
                    self.report(ErrorKind::InvalidClassMember("`#constructor` is reserved"), member.span);
                    return;
                }
                let declared = state.private_names.entry(name.clone()).or_default();
                let fresh = !declared.getter && !declared.setter && !declared.other;
                let pairs = !fresh && !declared.other && declared.is_static == is_static;
                let ok = match slot_kind {
                    Some(MethodKind::Get) if fresh || (pairs && !declared.getter) => {
                        declared.getter = true;
                        true
                    }
                    Some(MethodKind::Set) if fresh || (pairs && !declared.setter) => {
                        declared.setter = true;
                        true
                    }
                    Some(MethodKind::Get | MethodKind::Set) => false,
                    _ if fresh => {
                        declared.other = true;
                        true
                    }
                    _ => false,
                };
                if fresh {
                    declared.is_static = is_static;
                }
                if !ok {
                    self.report(ErrorKind::DuplicatePrivateName(name.clone()), member.span);
                }
            }
            PropertyKey::Number(_) | PropertyKey::BigInt(_) | PropertyKey::Computed(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::{parse, ParserOptions};

    fn class(source: &str) -> Class {
        let program = parse(source, ParserOptions::default()).unwrap();
        match program.body.into_iter().next().map(|s| s.kind) {
            Some(StmtKind::Class(class)) => *class,
            other => panic!("expected a class declaration, got {other:?}"),
        }
    }

    fn error_codes(source: &str) -> Vec<&'static str> {
        match parse(source, ParserOptions::default()) {
            Ok(_) => Vec::new(),
            Err(diagnostics) => diagnostics.errors().iter().map(|e| e.code()).collect(),
        }
    }

    #[test]
    fn test_members() {
        let class = class(
            "class A extends B { constructor() { super(); } static x = 1; #y; get z() { return 1; } static { init(); } }",
        );
        assert_eq!(class.name.as_deref(), Some("A"));
        assert!(class.super_class.is_some());
        assert_eq!(class.body.len(), 5);
        assert!(matches!(
            &class.body[0].kind,
            ClassMemberKind::Method { kind: MethodKind::Constructor, .. }
        ));
        assert!(matches!(&class.body[1].kind, ClassMemberKind::Field { is_static: true, .. }));
        assert!(matches!(
            &class.body[2].kind,
            ClassMemberKind::Field { key: PropertyKey::Private(name), value: None, .. } if name == "y"
        ));
        assert!(matches!(&class.body[3].kind, ClassMemberKind::Method { kind: MethodKind::Get, .. }));
        assert!(matches!(&class.body[4].kind, ClassMemberKind::StaticBlock(body) if body.len() == 1));
    }

    #[test]
    fn test_modifier_words_as_names() {
        let class = class("class A { static() {} get = 1; async; set(v) {} }");
        assert_eq!(class.body.len(), 4);
        assert!(matches!(
            &class.body[0].kind,
            ClassMemberKind::Method { key: PropertyKey::Ident(name), is_static: false, .. } if name == "static"
        ));
        assert!(matches!(&class.body[1].kind, ClassMemberKind::Field { .. }));
    }

    #[test]
    fn test_constructor_rules() {
        assert_eq!(error_codes("class A { constructor() {} constructor() {} }"), ["InvalidClassMember"]);
        assert_eq!(error_codes("class A { get constructor() {} }"), ["InvalidClassMember"]);
        assert_eq!(error_codes("class A { constructor = 1 }"), ["InvalidClassMember"]);
        assert_eq!(error_codes("class A { #constructor() {} }"), ["InvalidClassMember"]);
        assert!(error_codes("class A { static constructor() {} }").is_empty());
    }

    #[test]
    fn test_private_name_rules() {
        assert!(error_codes("class A { get #a() {} set #a(v) {} }").is_empty());
        assert_eq!(error_codes("class A { #a; #a; }"), ["DuplicatePrivateName"]);
        assert_eq!(error_codes("class A { get #a() {} get #a() {} }"), ["DuplicatePrivateName"]);
        assert_eq!(error_codes("class A { static get #a() {} set #a(v) {} }"), ["DuplicatePrivateName"]);
    }

    #[test]
    fn test_class_body_is_strict() {
        assert_eq!(error_codes("class A { m() { with (a) {} } }"), ["StrictModeViolation"]);
    }

    #[test]
    fn test_field_initializer_context() {
        assert_eq!(error_codes("function* g() { class A { x = yield; } }"), ["ReservedWordMisuse"]);
    }
}
