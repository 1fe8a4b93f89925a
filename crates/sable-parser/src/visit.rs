//! Tree walkers.
//!
//! [`Visit`] walks a tree by shared reference and [`VisitMut`] by mutable
//! reference. Every `visit_*` method defaults to the matching `walk_*`
//! function, so an implementor overrides only the node families it cares
//! about and calls `walk_*` to keep descending.
//!
//! The walkers match exhaustively on every kind enum: a new node kind does
//! not compile until each walker handles it.
//!
//! # Example
//!
//! ```
//! use sable_parser::ast::Expr;
//! use sable_parser::visit::{walk_expr, Visit};
//! use sable_parser::{parse, ParserOptions};
//!
//! struct CountExprs(usize);
//!
//! impl Visit for CountExprs {
//!     fn visit_expr(&mut self, expr: &Expr) {
//!         self.0 += 1;
//!         walk_expr(self, expr);
//!     }
//! }
//!
//! let program = parse("a + b * c;", ParserOptions::default()).unwrap();
//! let mut counter = CountExprs(0);
//! counter.visit_program(&program);
//! assert_eq!(counter.0, 5);
//! ```

use crate::ast::*;
use crate::span::Span;

// =============================================================================
// Shared-reference visitor
// =============================================================================

/// Read-only AST visitor.
pub trait Visit: Sized {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        walk_var_decl(self, decl);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_pattern_element(&mut self, element: &PatternElement) {
        walk_pattern_element(self, element);
    }

    fn visit_property(&mut self, prop: &Property) {
        walk_property(self, prop);
    }

    fn visit_property_key(&mut self, key: &PropertyKey) {
        walk_property_key(self, key);
    }

    fn visit_template(&mut self, template: &Template) {
        walk_template(self, template);
    }

    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function);
    }

    fn visit_params(&mut self, params: &Params) {
        walk_params(self, params);
    }

    fn visit_arrow(&mut self, arrow: &ArrowFunction) {
        walk_arrow(self, arrow);
    }

    fn visit_class(&mut self, class: &Class) {
        walk_class(self, class);
    }

    fn visit_class_member(&mut self, member: &ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_import_decl(&mut self, decl: &ImportDecl) {
        walk_import_decl(self, decl);
    }

    fn visit_export_decl(&mut self, decl: &ExportDecl) {
        walk_export_decl(self, decl);
    }

    /// Leaf hook for identifier references and bindings.
    fn visit_ident(&mut self, _name: &str) {}
}

pub fn walk_program<V: Visit>(visitor: &mut V, program: &Program) {
    for stmt in &program.body {
        visitor.visit_stmt(stmt);
    }
}

fn walk_stmts<V: Visit>(visitor: &mut V, stmts: &[Stmt]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visit>(visitor: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Var(decl) => visitor.visit_var_decl(decl),
        StmtKind::Function(function) => visitor.visit_function(function),
        StmtKind::Class(class) => visitor.visit_class(class),
        StmtKind::Block(body) => walk_stmts(visitor, body),
        StmtKind::Empty | StmtKind::Debugger | StmtKind::Error => {}
        StmtKind::Expr(expr) | StmtKind::Throw(expr) => visitor.visit_expr(expr),
        StmtKind::If { test, consequent, alternate } => {
            visitor.visit_expr(test);
            visitor.visit_stmt(consequent);
            if let Some(alternate) = alternate {
                visitor.visit_stmt(alternate);
            }
        }
        StmtKind::Switch { discriminant, cases } => {
            visitor.visit_expr(discriminant);
            for case in cases {
                if let Some(test) = &case.test {
                    visitor.visit_expr(test);
                }
                walk_stmts(visitor, &case.body);
            }
        }
        StmtKind::While { test, body } => {
            visitor.visit_expr(test);
            visitor.visit_stmt(body);
        }
        StmtKind::DoWhile { body, test } => {
            visitor.visit_stmt(body);
            visitor.visit_expr(test);
        }
        StmtKind::For { init, test, update, body } => {
            match init {
                Some(ForInit::Var(decl)) => visitor.visit_var_decl(decl),
                Some(ForInit::Expr(expr)) => visitor.visit_expr(expr),
                None => {}
            }
            if let Some(test) = test {
                visitor.visit_expr(test);
            }
            if let Some(update) = update {
                visitor.visit_expr(update);
            }
            visitor.visit_stmt(body);
        }
        StmtKind::ForIn { left, right, body } | StmtKind::ForOf { left, right, body, .. } => {
            match left {
                ForHead::Var(decl) => visitor.visit_var_decl(decl),
                ForHead::Pattern(pattern) => visitor.visit_pattern(pattern),
            }
            visitor.visit_expr(right);
            visitor.visit_stmt(body);
        }
        StmtKind::Break(_) | StmtKind::Continue(_) => {}
        StmtKind::Return(arg) => {
            if let Some(arg) = arg {
                visitor.visit_expr(arg);
            }
        }
        StmtKind::Try { block, handler, finalizer } => {
            walk_stmts(visitor, block);
            if let Some(handler) = handler {
                if let Some(param) = &handler.param {
                    visitor.visit_pattern(param);
                }
                walk_stmts(visitor, &handler.body);
            }
            if let Some(finalizer) = finalizer {
                walk_stmts(visitor, finalizer);
            }
        }
        StmtKind::Labeled { body, .. } => visitor.visit_stmt(body),
        StmtKind::With { object, body } => {
            visitor.visit_expr(object);
            visitor.visit_stmt(body);
        }
        StmtKind::Import(decl) => visitor.visit_import_decl(decl),
        StmtKind::Export(decl) => visitor.visit_export_decl(decl),
    }
}

pub fn walk_var_decl<V: Visit>(visitor: &mut V, decl: &VarDecl) {
    for declarator in &decl.decls {
        visitor.visit_pattern(&declarator.target);
        if let Some(init) = &declarator.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_expr<V: Visit>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Null
        | ExprKind::Bool(_)
        | ExprKind::Number(_)
        | ExprKind::BigInt(_)
        | ExprKind::String(_)
        | ExprKind::Regex { .. }
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::PrivateName(_)
        | ExprKind::MetaProperty { .. } => {}
        ExprKind::Ident(name) => visitor.visit_ident(name),
        ExprKind::Template(template) => visitor.visit_template(template),
        ExprKind::Array(elements) => {
            for element in elements.iter().flatten() {
                visitor.visit_expr(element);
            }
        }
        ExprKind::Object(props) => {
            for prop in props {
                visitor.visit_property(prop);
            }
        }
        ExprKind::Function(function) => visitor.visit_function(function),
        ExprKind::Arrow(arrow) => visitor.visit_arrow(arrow),
        ExprKind::Class(class) => visitor.visit_class(class),
        ExprKind::Unary { arg, .. }
        | ExprKind::Update { arg, .. }
        | ExprKind::Spread(arg)
        | ExprKind::Await(arg)
        | ExprKind::Paren(arg)
        | ExprKind::OptionalChain(arg) => visitor.visit_expr(arg),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Assign { target, value, .. } => {
            visitor.visit_pattern(target);
            visitor.visit_expr(value);
        }
        ExprKind::Conditional { test, consequent, alternate } => {
            visitor.visit_expr(test);
            visitor.visit_expr(consequent);
            visitor.visit_expr(alternate);
        }
        ExprKind::Sequence(exprs) => {
            for expr in exprs {
                visitor.visit_expr(expr);
            }
        }
        ExprKind::Member { object, property, .. } => {
            visitor.visit_expr(object);
            match property {
                MemberProp::Computed(property) => visitor.visit_expr(property),
                MemberProp::Ident(_) | MemberProp::Private(_) => {}
            }
        }
        ExprKind::Call { callee, args, .. } | ExprKind::New { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::TaggedTemplate { tag, quasi } => {
            visitor.visit_expr(tag);
            visitor.visit_template(quasi);
        }
        ExprKind::Yield { arg, .. } => {
            if let Some(arg) = arg {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Import { source, options } => {
            visitor.visit_expr(source);
            if let Some(options) = options {
                visitor.visit_expr(options);
            }
        }
    }
}

pub fn walk_pattern<V: Visit>(visitor: &mut V, pattern: &Pattern) {
    match &pattern.kind {
        PatternKind::Ident(name) => visitor.visit_ident(name),
        PatternKind::Member(expr) => visitor.visit_expr(expr),
        PatternKind::Array { elements, rest } => {
            for element in elements.iter().flatten() {
                visitor.visit_pattern_element(element);
            }
            if let Some(rest) = rest {
                visitor.visit_pattern(rest);
            }
        }
        PatternKind::Object { props, rest } => {
            for prop in props {
                visitor.visit_property_key(&prop.key);
                visitor.visit_pattern(&prop.value);
                if let Some(default) = &prop.default {
                    visitor.visit_expr(default);
                }
            }
            if let Some(rest) = rest {
                visitor.visit_pattern(rest);
            }
        }
    }
}

pub fn walk_pattern_element<V: Visit>(visitor: &mut V, element: &PatternElement) {
    visitor.visit_pattern(&element.target);
    if let Some(default) = &element.default {
        visitor.visit_expr(default);
    }
}

pub fn walk_property<V: Visit>(visitor: &mut V, prop: &Property) {
    match &prop.kind {
        PropertyKind::Init { key, value } => {
            visitor.visit_property_key(key);
            visitor.visit_expr(value);
        }
        PropertyKind::Shorthand(name) => visitor.visit_ident(name),
        PropertyKind::CoverInit { name, default } => {
            visitor.visit_ident(name);
            visitor.visit_expr(default);
        }
        PropertyKind::Method { key, function, .. } => {
            visitor.visit_property_key(key);
            visitor.visit_function(function);
        }
        PropertyKind::Spread(arg) => visitor.visit_expr(arg),
    }
}

pub fn walk_property_key<V: Visit>(visitor: &mut V, key: &PropertyKey) {
    match key {
        PropertyKey::Computed(expr) => visitor.visit_expr(expr),
        PropertyKey::Ident(_)
        | PropertyKey::String(_)
        | PropertyKey::Number(_)
        | PropertyKey::BigInt(_)
        | PropertyKey::Private(_) => {}
    }
}

pub fn walk_template<V: Visit>(visitor: &mut V, template: &Template) {
    for expr in &template.exprs {
        visitor.visit_expr(expr);
    }
}

pub fn walk_function<V: Visit>(visitor: &mut V, function: &Function) {
    visitor.visit_params(&function.params);
    walk_stmts(visitor, &function.body);
}

pub fn walk_params<V: Visit>(visitor: &mut V, params: &Params) {
    for item in &params.items {
        visitor.visit_pattern_element(item);
    }
    if let Some(rest) = &params.rest {
        visitor.visit_pattern(rest);
    }
}

pub fn walk_arrow<V: Visit>(visitor: &mut V, arrow: &ArrowFunction) {
    visitor.visit_params(&arrow.params);
    match &arrow.body {
        ArrowBody::Expr(expr) => visitor.visit_expr(expr),
        ArrowBody::Block(body) => walk_stmts(visitor, body),
    }
}

pub fn walk_class<V: Visit>(visitor: &mut V, class: &Class) {
    if let Some(super_class) = &class.super_class {
        visitor.visit_expr(super_class);
    }
    for member in &class.body {
        visitor.visit_class_member(member);
    }
}

pub fn walk_class_member<V: Visit>(visitor: &mut V, member: &ClassMember) {
    match &member.kind {
        ClassMemberKind::Method { key, function, .. } => {
            visitor.visit_property_key(key);
            visitor.visit_function(function);
        }
        ClassMemberKind::Field { key, value, .. } => {
            visitor.visit_property_key(key);
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        ClassMemberKind::StaticBlock(body) => walk_stmts(visitor, body),
    }
}

pub fn walk_import_decl<V: Visit>(_visitor: &mut V, _decl: &ImportDecl) {
    // Specifiers and attributes hold names and strings only.
}

pub fn walk_export_decl<V: Visit>(visitor: &mut V, decl: &ExportDecl) {
    match decl {
        ExportDecl::Decl { decl, .. } => visitor.visit_stmt(decl),
        ExportDecl::Default { value, .. } => match value {
            DefaultExport::Function(function) => visitor.visit_function(function),
            DefaultExport::Class(class) => visitor.visit_class(class),
            DefaultExport::Expr(expr) => visitor.visit_expr(expr),
        },
        ExportDecl::Named { .. } | ExportDecl::All { .. } => {}
    }
}

// =============================================================================
// Mutable visitor
// =============================================================================

/// AST visitor over `&mut` nodes. [`VisitMut::visit_span`] sees every span
/// in the tree, node spans and the spans of clause-level parts alike.
pub trait VisitMut: Sized {
    fn visit_program(&mut self, program: &mut Program) {
        walk_program_mut(self, program);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt_mut(self, stmt);
    }

    fn visit_var_decl(&mut self, decl: &mut VarDecl) {
        walk_var_decl_mut(self, decl);
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr_mut(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &mut Pattern) {
        walk_pattern_mut(self, pattern);
    }

    fn visit_pattern_element(&mut self, element: &mut PatternElement) {
        walk_pattern_element_mut(self, element);
    }

    fn visit_property(&mut self, prop: &mut Property) {
        walk_property_mut(self, prop);
    }

    fn visit_property_key(&mut self, key: &mut PropertyKey) {
        walk_property_key_mut(self, key);
    }

    fn visit_template(&mut self, template: &mut Template) {
        walk_template_mut(self, template);
    }

    fn visit_function(&mut self, function: &mut Function) {
        walk_function_mut(self, function);
    }

    fn visit_params(&mut self, params: &mut Params) {
        walk_params_mut(self, params);
    }

    fn visit_arrow(&mut self, arrow: &mut ArrowFunction) {
        walk_arrow_mut(self, arrow);
    }

    fn visit_class(&mut self, class: &mut Class) {
        walk_class_mut(self, class);
    }

    fn visit_class_member(&mut self, member: &mut ClassMember) {
        walk_class_member_mut(self, member);
    }

    fn visit_import_decl(&mut self, decl: &mut ImportDecl) {
        walk_import_decl_mut(self, decl);
    }

    fn visit_export_decl(&mut self, decl: &mut ExportDecl) {
        walk_export_decl_mut(self, decl);
    }

    fn visit_span(&mut self, _span: &mut Span) {}
}

pub fn walk_program_mut<V: VisitMut>(visitor: &mut V, program: &mut Program) {
    visitor.visit_span(&mut program.span);
    walk_stmts_mut(visitor, &mut program.body);
}

fn walk_stmts_mut<V: VisitMut>(visitor: &mut V, stmts: &mut [Stmt]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt_mut<V: VisitMut>(visitor: &mut V, stmt: &mut Stmt) {
    visitor.visit_span(&mut stmt.span);
    match &mut stmt.kind {
        StmtKind::Var(decl) => visitor.visit_var_decl(decl),
        StmtKind::Function(function) => visitor.visit_function(function),
        StmtKind::Class(class) => visitor.visit_class(class),
        StmtKind::Block(body) => walk_stmts_mut(visitor, body),
        StmtKind::Empty | StmtKind::Debugger | StmtKind::Error => {}
        StmtKind::Expr(expr) | StmtKind::Throw(expr) => visitor.visit_expr(expr),
        StmtKind::If { test, consequent, alternate } => {
            visitor.visit_expr(test);
            visitor.visit_stmt(consequent);
            if let Some(alternate) = alternate {
                visitor.visit_stmt(alternate);
            }
        }
        StmtKind::Switch { discriminant, cases } => {
            visitor.visit_expr(discriminant);
            for case in cases {
                visitor.visit_span(&mut case.span);
                if let Some(test) = &mut case.test {
                    visitor.visit_expr(test);
                }
                walk_stmts_mut(visitor, &mut case.body);
            }
        }
        StmtKind::While { test, body } => {
            visitor.visit_expr(test);
            visitor.visit_stmt(body);
        }
        StmtKind::DoWhile { body, test } => {
            visitor.visit_stmt(body);
            visitor.visit_expr(test);
        }
        StmtKind::For { init, test, update, body } => {
            match init {
                Some(ForInit::Var(decl)) => visitor.visit_var_decl(decl),
                Some(ForInit::Expr(expr)) => visitor.visit_expr(expr),
                None => {}
            }
            if let Some(test) = test {
                visitor.visit_expr(test);
            }
            if let Some(update) = update {
                visitor.visit_expr(update);
            }
            visitor.visit_stmt(body);
        }
        StmtKind::ForIn { left, right, body } | StmtKind::ForOf { left, right, body, .. } => {
            match left {
                ForHead::Var(decl) => visitor.visit_var_decl(decl),
                ForHead::Pattern(pattern) => visitor.visit_pattern(pattern),
            }
            visitor.visit_expr(right);
            visitor.visit_stmt(body);
        }
        StmtKind::Break(_) | StmtKind::Continue(_) => {}
        StmtKind::Return(arg) => {
            if let Some(arg) = arg {
                visitor.visit_expr(arg);
            }
        }
        StmtKind::Try { block, handler, finalizer } => {
            walk_stmts_mut(visitor, block);
            if let Some(handler) = handler {
                visitor.visit_span(&mut handler.span);
                if let Some(param) = &mut handler.param {
                    visitor.visit_pattern(param);
                }
                walk_stmts_mut(visitor, &mut handler.body);
            }
            if let Some(finalizer) = finalizer {
                walk_stmts_mut(visitor, finalizer);
            }
        }
        StmtKind::Labeled { body, .. } => visitor.visit_stmt(body),
        StmtKind::With { object, body } => {
            visitor.visit_expr(object);
            visitor.visit_stmt(body);
        }
        StmtKind::Import(decl) => visitor.visit_import_decl(decl),
        StmtKind::Export(decl) => visitor.visit_export_decl(decl),
    }
}

pub fn walk_var_decl_mut<V: VisitMut>(visitor: &mut V, decl: &mut VarDecl) {
    for declarator in &mut decl.decls {
        visitor.visit_span(&mut declarator.span);
        visitor.visit_pattern(&mut declarator.target);
        if let Some(init) = &mut declarator.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_expr_mut<V: VisitMut>(visitor: &mut V, expr: &mut Expr) {
    visitor.visit_span(&mut expr.span);
    match &mut expr.kind {
        ExprKind::Null
        | ExprKind::Bool(_)
        | ExprKind::Number(_)
        | ExprKind::BigInt(_)
        | ExprKind::String(_)
        | ExprKind::Regex { .. }
        | ExprKind::Ident(_)
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::PrivateName(_)
        | ExprKind::MetaProperty { .. } => {}
        ExprKind::Template(template) => visitor.visit_template(template),
        ExprKind::Array(elements) => {
            for element in elements.iter_mut().flatten() {
                visitor.visit_expr(element);
            }
        }
        ExprKind::Object(props) => {
            for prop in props {
                visitor.visit_property(prop);
            }
        }
        ExprKind::Function(function) => visitor.visit_function(function),
        ExprKind::Arrow(arrow) => visitor.visit_arrow(arrow),
        ExprKind::Class(class) => visitor.visit_class(class),
        ExprKind::Unary { arg, .. }
        | ExprKind::Update { arg, .. }
        | ExprKind::Spread(arg)
        | ExprKind::Await(arg)
        | ExprKind::Paren(arg)
        | ExprKind::OptionalChain(arg) => visitor.visit_expr(arg),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Assign { target, value, .. } => {
            visitor.visit_pattern(target);
            visitor.visit_expr(value);
        }
        ExprKind::Conditional { test, consequent, alternate } => {
            visitor.visit_expr(test);
            visitor.visit_expr(consequent);
            visitor.visit_expr(alternate);
        }
        ExprKind::Sequence(exprs) => {
            for expr in exprs {
                visitor.visit_expr(expr);
            }
        }
        ExprKind::Member { object, property, .. } => {
            visitor.visit_expr(object);
            match property {
                MemberProp::Computed(property) => visitor.visit_expr(property),
                MemberProp::Ident(_) | MemberProp::Private(_) => {}
            }
        }
        ExprKind::Call { callee, args, .. } | ExprKind::New { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::TaggedTemplate { tag, quasi } => {
            visitor.visit_expr(tag);
            visitor.visit_template(quasi);
        }
        ExprKind::Yield { arg, .. } => {
            if let Some(arg) = arg {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Import { source, options } => {
            visitor.visit_expr(source);
            if let Some(options) = options {
                visitor.visit_expr(options);
            }
        }
    }
}

pub fn walk_pattern_mut<V: VisitMut>(visitor: &mut V, pattern: &mut Pattern) {
    visitor.visit_span(&mut pattern.span);
    match &mut pattern.kind {
        PatternKind::Ident(_) => {}
        PatternKind::Member(expr) => visitor.visit_expr(expr),
        PatternKind::Array { elements, rest } => {
            for element in elements.iter_mut().flatten() {
                visitor.visit_pattern_element(element);
            }
            if let Some(rest) = rest {
                visitor.visit_pattern(rest);
            }
        }
        PatternKind::Object { props, rest } => {
            for prop in props {
                visitor.visit_span(&mut prop.span);
                visitor.visit_property_key(&mut prop.key);
                visitor.visit_pattern(&mut prop.value);
                if let Some(default) = &mut prop.default {
                    visitor.visit_expr(default);
                }
            }
            if let Some(rest) = rest {
                visitor.visit_pattern(rest);
            }
        }
    }
}

pub fn walk_pattern_element_mut<V: VisitMut>(visitor: &mut V, element: &mut PatternElement) {
    visitor.visit_span(&mut element.span);
    visitor.visit_pattern(&mut element.target);
    if let Some(default) = &mut element.default {
        visitor.visit_expr(default);
    }
}

pub fn walk_property_mut<V: VisitMut>(visitor: &mut V, prop: &mut Property) {
    visitor.visit_span(&mut prop.span);
    match &mut prop.kind {
        PropertyKind::Init { key, value } => {
            visitor.visit_property_key(key);
            visitor.visit_expr(value);
        }
        PropertyKind::Shorthand(_) => {}
        PropertyKind::CoverInit { default, .. } => visitor.visit_expr(default),
        PropertyKind::Method { key, function, .. } => {
            visitor.visit_property_key(key);
            visitor.visit_function(function);
        }
        PropertyKind::Spread(arg) => visitor.visit_expr(arg),
    }
}

pub fn walk_property_key_mut<V: VisitMut>(visitor: &mut V, key: &mut PropertyKey) {
    match key {
        PropertyKey::Computed(expr) => visitor.visit_expr(expr),
        PropertyKey::Ident(_)
        | PropertyKey::String(_)
        | PropertyKey::Number(_)
        | PropertyKey::BigInt(_)
        | PropertyKey::Private(_) => {}
    }
}

pub fn walk_template_mut<V: VisitMut>(visitor: &mut V, template: &mut Template) {
    for expr in &mut template.exprs {
        visitor.visit_expr(expr);
    }
}

pub fn walk_function_mut<V: VisitMut>(visitor: &mut V, function: &mut Function) {
    visitor.visit_span(&mut function.span);
    visitor.visit_params(&mut function.params);
    walk_stmts_mut(visitor, &mut function.body);
}

pub fn walk_params_mut<V: VisitMut>(visitor: &mut V, params: &mut Params) {
    visitor.visit_span(&mut params.span);
    for item in &mut params.items {
        visitor.visit_pattern_element(item);
    }
    if let Some(rest) = &mut params.rest {
        visitor.visit_pattern(rest);
    }
}

pub fn walk_arrow_mut<V: VisitMut>(visitor: &mut V, arrow: &mut ArrowFunction) {
    visitor.visit_span(&mut arrow.span);
    visitor.visit_params(&mut arrow.params);
    match &mut arrow.body {
        ArrowBody::Expr(expr) => visitor.visit_expr(expr),
        ArrowBody::Block(body) => walk_stmts_mut(visitor, body),
    }
}

pub fn walk_class_mut<V: VisitMut>(visitor: &mut V, class: &mut Class) {
    visitor.visit_span(&mut class.span);
    if let Some(super_class) = &mut class.super_class {
        visitor.visit_expr(super_class);
    }
    for member in &mut class.body {
        visitor.visit_class_member(member);
    }
}

pub fn walk_class_member_mut<V: VisitMut>(visitor: &mut V, member: &mut ClassMember) {
    visitor.visit_span(&mut member.span);
    match &mut member.kind {
        ClassMemberKind::Method { key, function, .. } => {
            visitor.visit_property_key(key);
            visitor.visit_function(function);
        }
        ClassMemberKind::Field { key, value, .. } => {
            visitor.visit_property_key(key);
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        ClassMemberKind::StaticBlock(body) => walk_stmts_mut(visitor, body),
    }
}

pub fn walk_import_decl_mut<V: VisitMut>(visitor: &mut V, decl: &mut ImportDecl) {
    visitor.visit_span(&mut decl.span);
    for spec in &mut decl.specifiers {
        match spec {
            ImportSpecifier::Default { span, .. }
            | ImportSpecifier::Namespace { span, .. }
            | ImportSpecifier::Named { span, .. } => visitor.visit_span(span),
        }
    }
    walk_attributes_mut(visitor, &mut decl.attributes);
}

pub fn walk_export_decl_mut<V: VisitMut>(visitor: &mut V, decl: &mut ExportDecl) {
    match decl {
        ExportDecl::Decl { decl, span } => {
            visitor.visit_span(span);
            visitor.visit_stmt(decl);
        }
        ExportDecl::Default { value, span } => {
            visitor.visit_span(span);
            match value {
                DefaultExport::Function(function) => visitor.visit_function(function),
                DefaultExport::Class(class) => visitor.visit_class(class),
                DefaultExport::Expr(expr) => visitor.visit_expr(expr),
            }
        }
        ExportDecl::Named { specifiers, attributes, span, .. } => {
            visitor.visit_span(span);
            for spec in specifiers {
                visitor.visit_span(&mut spec.span);
            }
            walk_attributes_mut(visitor, attributes);
        }
        ExportDecl::All { attributes, span, .. } => {
            visitor.visit_span(span);
            walk_attributes_mut(visitor, attributes);
        }
    }
}

fn walk_attributes_mut<V: VisitMut>(visitor: &mut V, attributes: &mut [ImportAttribute]) {
    for attr in attributes {
        visitor.visit_span(&mut attr.span);
    }
}

// =============================================================================
// Span erasure
// =============================================================================

struct SpanEraser;

impl VisitMut for SpanEraser {
    fn visit_span(&mut self, span: &mut Span) {
        *span = Span::default();
    }
}

/// Reset every span in the tree to `Span::default()`, so that trees parsed
/// from differently formatted sources compare equal.
pub fn erase_spans(program: &mut Program) {
    SpanEraser.visit_program(program);
}
