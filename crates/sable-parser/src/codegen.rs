//! JavaScript code generator.
//!
//! Converts an AST back to JavaScript source code. Parenthesized expressions
//! are printed as written; for trees built by hand, parentheses are added
//! wherever operator precedence would otherwise regroup the output. Parsing
//! the output again yields the same tree, spans aside.

use crate::ast::*;
use crate::precedence::{Assoc, Precedence};

/// Code generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Indent string (default: two spaces).
    pub indent: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { indent: "  ".to_string() }
    }
}

/// Where an expression is printed, for the cases where its first token
/// would be misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Expression statement: `{`, `function` and `class` would start a
    /// declaration or block.
    Statement,
    /// Concise arrow body: `{` would start a block body.
    ArrowBody,
    /// `export default`: `function` and `class` would start a declaration.
    ExportDefault,
}

/// The code generator.
pub struct Codegen<'a> {
    /// The AST to generate code from.
    program: &'a Program,
    options: CodegenOptions,
    /// Output buffer.
    output: String,
    /// Current indentation level.
    indent_level: usize,
}

impl<'a> Codegen<'a> {
    /// Create a new code generator.
    pub fn new(program: &'a Program, options: CodegenOptions) -> Self {
        Self { program, options, output: String::new(), indent_level: 0 }
    }

    /// Generate JavaScript source code.
    pub fn generate(mut self) -> String {
        let program = self.program;
        for (i, stmt) in program.body.iter().enumerate() {
            if i > 0 {
                self.emit_newline();
            }
            self.emit_stmt(stmt);
        }
        if !program.body.is_empty() {
            self.output.push('\n');
        }
        self.output
    }

    // =========================================================================
    // Output Helpers
    // =========================================================================

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn emit_comma_list<T>(&mut self, items: &[T], mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            f(self, item);
        }
    }

    // =========================================================================
    // Statement Emission
    // =========================================================================

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Var(decl) => {
                self.emit_var_decl(decl);
                self.emit(";");
            }
            StmtKind::Function(function) => self.emit_function(function),
            StmtKind::Class(class) => self.emit_class(class),
            StmtKind::Block(stmts) => self.emit_block(stmts),
            StmtKind::Empty | StmtKind::Error => self.emit(";"),
            StmtKind::Expr(expr) => {
                self.emit_expr_at(expr, Position::Statement);
                self.emit(";");
            }
            StmtKind::If { test, consequent, alternate } => {
                self.emit("if (");
                self.emit_expr(test);
                self.emit(") ");
                self.emit_stmt(consequent);
                if let Some(alternate) = alternate {
                    self.emit(" else ");
                    self.emit_stmt(alternate);
                }
            }
            StmtKind::Switch { discriminant, cases } => {
                self.emit("switch (");
                self.emit_expr(discriminant);
                self.emit(") {");
                self.indent();
                for case in cases {
                    self.emit_newline();
                    if let Some(test) = &case.test {
                        self.emit("case ");
                        self.emit_expr(test);
                        self.emit(":");
                    } else {
                        self.emit("default:");
                    }
                    self.indent();
                    for stmt in &case.body {
                        self.emit_newline();
                        self.emit_stmt(stmt);
                    }
                    self.dedent();
                }
                self.dedent();
                self.emit_newline();
                self.emit("}");
            }
            StmtKind::While { test, body } => {
                self.emit("while (");
                self.emit_expr(test);
                self.emit(") ");
                self.emit_stmt(body);
            }
            StmtKind::DoWhile { body, test } => {
                self.emit("do ");
                self.emit_stmt(body);
                self.emit(" while (");
                self.emit_expr(test);
                self.emit(");");
            }
            StmtKind::For { init, test, update, body } => {
                self.emit("for (");
                match init {
                    Some(ForInit::Var(decl)) => self.emit_var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.emit_expr(expr),
                    None => {}
                }
                self.emit(";");
                if let Some(test) = test {
                    self.emit(" ");
                    self.emit_expr(test);
                }
                self.emit(";");
                if let Some(update) = update {
                    self.emit(" ");
                    self.emit_expr(update);
                }
                self.emit(") ");
                self.emit_stmt(body);
            }
            StmtKind::ForIn { left, right, body } => {
                self.emit("for (");
                self.emit_for_head(left);
                self.emit(" in ");
                self.emit_expr(right);
                self.emit(") ");
                self.emit_stmt(body);
            }
            StmtKind::ForOf { left, right, body, is_await } => {
                self.emit(if *is_await { "for await (" } else { "for (" });
                self.emit_for_head(left);
                self.emit(" of ");
                self.emit_expr_prec(right, Precedence::Assignment);
                self.emit(") ");
                self.emit_stmt(body);
            }
            StmtKind::Break(label) => self.emit_jump("break", label.as_deref()),
            StmtKind::Continue(label) => self.emit_jump("continue", label.as_deref()),
            StmtKind::Return(arg) => {
                self.emit("return");
                if let Some(arg) = arg {
                    self.emit(" ");
                    self.emit_expr(arg);
                }
                self.emit(";");
            }
            StmtKind::Throw(arg) => {
                self.emit("throw ");
                self.emit_expr(arg);
                self.emit(";");
            }
            StmtKind::Try { block, handler, finalizer } => {
                self.emit("try ");
                self.emit_block(block);
                if let Some(handler) = handler {
                    self.emit(" catch ");
                    if let Some(param) = &handler.param {
                        self.emit("(");
                        self.emit_pattern(param);
                        self.emit(") ");
                    }
                    self.emit_block(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.emit(" finally ");
                    self.emit_block(finalizer);
                }
            }
            StmtKind::Labeled { label, body } => {
                self.emit(label);
                self.emit(": ");
                self.emit_stmt(body);
            }
            StmtKind::With { object, body } => {
                self.emit("with (");
                self.emit_expr(object);
                self.emit(") ");
                self.emit_stmt(body);
            }
            StmtKind::Debugger => self.emit("debugger;"),
            StmtKind::Import(decl) => self.emit_import(decl),
            StmtKind::Export(decl) => self.emit_export(decl),
        }
    }

    fn emit_block(&mut self, stmts: &[Stmt]) {
        self.emit("{");
        if !stmts.is_empty() {
            self.indent();
            for stmt in stmts {
                self.emit_newline();
                self.emit_stmt(stmt);
            }
            self.dedent();
            self.emit_newline();
        }
        self.emit("}");
    }

    fn emit_jump(&mut self, keyword: &str, label: Option<&str>) {
        self.emit(keyword);
        if let Some(label) = label {
            self.emit(" ");
            self.emit(label);
        }
        self.emit(";");
    }

    /// `let a = 1, b` without the trailing semicolon.
    fn emit_var_decl(&mut self, decl: &VarDecl) {
        self.emit(decl.kind.as_str());
        self.emit(" ");
        self.emit_comma_list(&decl.decls, |p, declarator| {
            p.emit_pattern(&declarator.target);
            if let Some(init) = &declarator.init {
                p.emit(" = ");
                p.emit_expr_prec(init, Precedence::Assignment);
            }
        });
    }

    fn emit_for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Var(decl) => self.emit_var_decl(decl),
            ForHead::Pattern(pattern) => self.emit_pattern(pattern),
        }
    }

    // =========================================================================
    // Functions and Classes
    // =========================================================================

    fn emit_function(&mut self, function: &Function) {
        if function.is_async {
            self.emit("async ");
        }
        self.emit("function");
        if function.is_generator {
            self.emit("*");
        }
        if let Some(name) = &function.name {
            self.emit(" ");
            self.emit(name);
        }
        self.emit_params(&function.params);
        self.emit(" ");
        self.emit_block(&function.body);
    }

    fn emit_params(&mut self, params: &Params) {
        self.emit("(");
        self.emit_comma_list(&params.items, |p, item| p.emit_pattern_element(item));
        if let Some(rest) = &params.rest {
            if !params.items.is_empty() {
                self.emit(", ");
            }
            self.emit("...");
            self.emit_pattern(rest);
        }
        self.emit(")");
    }

    fn emit_arrow(&mut self, arrow: &ArrowFunction) {
        if arrow.is_async {
            self.emit("async ");
        }

        // Single identifier parameter can omit parens
        match (arrow.params.items.as_slice(), &arrow.params.rest) {
            ([PatternElement { target: Pattern { kind: PatternKind::Ident(name), .. }, default: None, .. }], None) => {
                self.emit(name);
            }
            _ => self.emit_params(&arrow.params),
        }
        self.emit(" => ");

        match &arrow.body {
            ArrowBody::Expr(expr) => self.emit_expr_at(expr, Position::ArrowBody),
            ArrowBody::Block(stmts) => self.emit_block(stmts),
        }
    }

    /// Modifiers, key, parameters and body of a method.
    fn emit_method(&mut self, key: &PropertyKey, kind: MethodKind, function: &Function) {
        match kind {
            MethodKind::Get => self.emit("get "),
            MethodKind::Set => self.emit("set "),
            MethodKind::Method | MethodKind::Constructor => {
                if function.is_async {
                    self.emit("async ");
                }
                if function.is_generator {
                    self.emit("*");
                }
            }
        }
        self.emit_property_key(key);
        self.emit_params(&function.params);
        self.emit(" ");
        self.emit_block(&function.body);
    }

    fn emit_class(&mut self, class: &Class) {
        self.emit("class");
        if let Some(name) = &class.name {
            self.emit(" ");
            self.emit(name);
        }
        if let Some(super_class) = &class.super_class {
            self.emit(" extends ");
            self.emit_expr_prec(super_class, Precedence::LeftHandSide);
        }
        self.emit(" {");
        if !class.body.is_empty() {
            self.indent();
            for member in &class.body {
                self.emit_newline();
                self.emit_class_member(member);
            }
            self.dedent();
            self.emit_newline();
        }
        self.emit("}");
    }

    fn emit_class_member(&mut self, member: &ClassMember) {
        match &member.kind {
            ClassMemberKind::Method { key, kind, is_static, function } => {
                if *is_static {
                    self.emit("static ");
                }
                self.emit_method(key, *kind, function);
            }
            ClassMemberKind::Field { key, value, is_static } => {
                if *is_static {
                    self.emit("static ");
                }
                self.emit_property_key(key);
                if let Some(value) = value {
                    self.emit(" = ");
                    self.emit_expr_prec(value, Precedence::Assignment);
                }
                self.emit(";");
            }
            ClassMemberKind::StaticBlock(stmts) => {
                self.emit("static ");
                self.emit_block(stmts);
            }
        }
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn emit_import(&mut self, decl: &ImportDecl) {
        self.emit("import ");

        let mut named = Vec::new();
        let mut wrote_clause = false;
        for spec in &decl.specifiers {
            match spec {
                ImportSpecifier::Default { local, .. } => {
                    self.emit(local);
                    wrote_clause = true;
                }
                ImportSpecifier::Namespace { local, .. } => {
                    if wrote_clause {
                        self.emit(", ");
                    }
                    self.emit("* as ");
                    self.emit(local);
                    wrote_clause = true;
                }
                ImportSpecifier::Named { imported, local, .. } => named.push((imported, local)),
            }
        }

        if !named.is_empty() {
            if wrote_clause {
                self.emit(", ");
            }
            self.emit("{ ");
            self.emit_comma_list(&named, |p, (imported, local)| {
                if matches!(imported, ModuleExportName::Ident(name) if name == *local) {
                    p.emit(local);
                } else {
                    p.emit_module_export_name(imported);
                    p.emit(" as ");
                    p.emit(local);
                }
            });
            self.emit(" }");
            wrote_clause = true;
        }

        if wrote_clause {
            self.emit(" from ");
        }
        self.emit_string(&decl.source);
        self.emit_import_attributes(&decl.attributes);
        self.emit(";");
    }

    fn emit_export(&mut self, decl: &ExportDecl) {
        self.emit("export ");
        match decl {
            ExportDecl::Decl { decl, .. } => self.emit_stmt(decl),
            ExportDecl::Default { value, .. } => {
                self.emit("default ");
                match value {
                    DefaultExport::Function(function) => self.emit_function(function),
                    DefaultExport::Class(class) => self.emit_class(class),
                    DefaultExport::Expr(expr) => {
                        self.emit_expr_at(expr, Position::ExportDefault);
                        self.emit(";");
                    }
                }
            }
            ExportDecl::Named { specifiers, source, attributes, .. } => {
                self.emit("{");
                if !specifiers.is_empty() {
                    self.emit(" ");
                    self.emit_comma_list(specifiers, |p, spec| {
                        p.emit_module_export_name(&spec.local);
                        if spec.local != spec.exported {
                            p.emit(" as ");
                            p.emit_module_export_name(&spec.exported);
                        }
                    });
                    self.emit(" ");
                }
                self.emit("}");
                if let Some(source) = source {
                    self.emit(" from ");
                    self.emit_string(source);
                    self.emit_import_attributes(attributes);
                }
                self.emit(";");
            }
            ExportDecl::All { exported, source, attributes, .. } => {
                self.emit("*");
                if let Some(exported) = exported {
                    self.emit(" as ");
                    self.emit_module_export_name(exported);
                }
                self.emit(" from ");
                self.emit_string(source);
                self.emit_import_attributes(attributes);
                self.emit(";");
            }
        }
    }

    fn emit_module_export_name(&mut self, name: &ModuleExportName) {
        match name {
            ModuleExportName::Ident(name) => self.emit(name),
            ModuleExportName::String(value) => self.emit_string(value),
        }
    }

    fn emit_import_attributes(&mut self, attributes: &[ImportAttribute]) {
        if attributes.is_empty() {
            return;
        }
        self.emit(" with { ");
        self.emit_comma_list(attributes, |p, attr| {
            p.emit_module_export_name(&attr.key);
            p.emit(": ");
            p.emit_string(&attr.value);
        });
        self.emit(" }");
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    fn emit_pattern(&mut self, pattern: &Pattern) {
        match &pattern.kind {
            PatternKind::Ident(name) => self.emit(name),
            PatternKind::Member(expr) => self.emit_expr_prec(expr, Precedence::LeftHandSide),
            PatternKind::Array { elements, rest } => {
                self.emit("[");
                self.emit_comma_list(elements, |p, element| {
                    if let Some(element) = element {
                        p.emit_pattern_element(element);
                    }
                });
                if let Some(rest) = rest {
                    if !elements.is_empty() {
                        self.emit(", ");
                    }
                    self.emit("...");
                    self.emit_pattern(rest);
                } else if matches!(elements.last(), Some(None)) {
                    // A trailing hole needs its own comma.
                    self.emit(",");
                }
                self.emit("]");
            }
            PatternKind::Object { props, rest } => {
                self.emit("{");
                self.emit_comma_list(props, |p, prop| {
                    if !prop.shorthand {
                        p.emit_property_key(&prop.key);
                        p.emit(": ");
                    }
                    p.emit_pattern(&prop.value);
                    if let Some(default) = &prop.default {
                        p.emit(" = ");
                        p.emit_expr_prec(default, Precedence::Assignment);
                    }
                });
                if let Some(rest) = rest {
                    if !props.is_empty() {
                        self.emit(", ");
                    }
                    self.emit("...");
                    self.emit_pattern(rest);
                }
                self.emit("}");
            }
        }
    }

    fn emit_pattern_element(&mut self, element: &PatternElement) {
        self.emit_pattern(&element.target);
        if let Some(default) = &element.default {
            self.emit(" = ");
            self.emit_expr_prec(default, Precedence::Assignment);
        }
    }

    // =========================================================================
    // Expression Emission
    // =========================================================================

    fn emit_expr(&mut self, expr: &Expr) {
        self.emit_expr_prec(expr, Precedence::Lowest);
    }

    /// Emit `expr`, parenthesized if it binds weaker than `min`.
    fn emit_expr_prec(&mut self, expr: &Expr, min: Precedence) {
        self.emit_operand(expr, expr_precedence(expr) < min);
    }

    fn emit_operand(&mut self, expr: &Expr, wrap: bool) {
        if wrap {
            self.emit("(");
            self.emit_expr_kind(expr);
            self.emit(")");
        } else {
            self.emit_expr_kind(expr);
        }
    }

    fn emit_expr_at(&mut self, expr: &Expr, position: Position) {
        let min = match position {
            Position::Statement => Precedence::Lowest,
            Position::ArrowBody | Position::ExportDefault => Precedence::Assignment,
        };
        let wrap = expr_precedence(expr) < min || starts_ambiguously(expr, position);
        self.emit_operand(expr, wrap);
    }

    fn emit_expr_kind(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Null => self.emit("null"),
            ExprKind::Bool(value) => self.emit(if *value { "true" } else { "false" }),
            ExprKind::Number(value) => self.emit(&format_number(*value)),
            ExprKind::BigInt(digits) => {
                self.emit(digits);
                self.emit("n");
            }
            ExprKind::String(value) => self.emit_string(value),
            ExprKind::Regex { pattern, flags } => {
                self.emit("/");
                self.emit(pattern);
                self.emit("/");
                self.emit(flags);
            }
            ExprKind::Template(template) => self.emit_template(template),
            ExprKind::Ident(name) => self.emit(name),
            ExprKind::This => self.emit("this"),
            ExprKind::Super => self.emit("super"),
            ExprKind::PrivateName(name) => {
                self.emit("#");
                self.emit(name);
            }
            ExprKind::Array(elements) => {
                self.emit("[");
                self.emit_comma_list(elements, |p, element| {
                    if let Some(element) = element {
                        p.emit_expr_prec(element, Precedence::Assignment);
                    }
                });
                if matches!(elements.last(), Some(None)) {
                    self.emit(",");
                }
                self.emit("]");
            }
            ExprKind::Object(props) => {
                self.emit("{");
                self.emit_comma_list(props, |p, prop| p.emit_object_property(prop));
                self.emit("}");
            }
            ExprKind::Function(function) => self.emit_function(function),
            ExprKind::Arrow(arrow) => self.emit_arrow(arrow),
            ExprKind::Class(class) => self.emit_class(class),
            ExprKind::Unary { op, arg } => {
                self.emit(op.as_str());
                let arg_start = arg.unparenthesized();
                let needs_space = match op {
                    UnaryOp::Typeof | UnaryOp::Void | UnaryOp::Delete => true,
                    // `- -x` and `- --x` must not fuse into `--`.
                    UnaryOp::Minus => starts_with_sign(arg_start, '-') && !matches!(arg.kind, ExprKind::Paren(_)),
                    UnaryOp::Plus => starts_with_sign(arg_start, '+') && !matches!(arg.kind, ExprKind::Paren(_)),
                    UnaryOp::Not | UnaryOp::BitNot => false,
                };
                if needs_space {
                    self.emit(" ");
                }
                self.emit_expr_prec(arg, Precedence::Unary);
            }
            ExprKind::Update { op, prefix, arg } => {
                if *prefix {
                    self.emit(op.as_str());
                    self.emit_expr_prec(arg, Precedence::LeftHandSide);
                } else {
                    self.emit_expr_prec(arg, Precedence::LeftHandSide);
                    self.emit(op.as_str());
                }
            }
            ExprKind::Binary { op, left, right } => {
                let prec = op.precedence();
                let (left_min, right_min) = match op.assoc() {
                    Assoc::Left => (prec, prec.next()),
                    // The left side of `**` cannot be a unary expression.
                    Assoc::Right => (Precedence::Update, prec),
                };
                self.emit_operand(left, expr_precedence(left) < left_min || mixes_coalesce(*op, left));
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.emit_operand(right, expr_precedence(right) < right_min || mixes_coalesce(*op, right));
            }
            ExprKind::Assign { op, target, value } => {
                self.emit_pattern(target);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.emit_expr_prec(value, Precedence::Assignment);
            }
            ExprKind::Conditional { test, consequent, alternate } => {
                self.emit_expr_prec(test, Precedence::Coalesce);
                self.emit(" ? ");
                self.emit_expr_prec(consequent, Precedence::Assignment);
                self.emit(" : ");
                self.emit_expr_prec(alternate, Precedence::Assignment);
            }
            ExprKind::Sequence(exprs) => {
                self.emit_comma_list(exprs, |p, expr| p.emit_expr_prec(expr, Precedence::Assignment));
            }
            ExprKind::Paren(inner) => {
                self.emit("(");
                self.emit_expr(inner);
                self.emit(")");
            }
            ExprKind::Member { object, property, chain } => {
                self.emit_callee(object, *chain);
                if is_bare_integer(object) && !chain.is_optional() && !matches!(property, MemberProp::Computed(_)) {
                    // `1.x` would lex as a number followed by `x`.
                    self.emit(".");
                }
                if chain.is_optional() {
                    self.emit("?.");
                }
                match property {
                    MemberProp::Ident(name) => {
                        if !chain.is_optional() {
                            self.emit(".");
                        }
                        self.emit(name);
                    }
                    MemberProp::Private(name) => {
                        if !chain.is_optional() {
                            self.emit(".");
                        }
                        self.emit("#");
                        self.emit(name);
                    }
                    MemberProp::Computed(property) => {
                        self.emit("[");
                        self.emit_expr(property);
                        self.emit("]");
                    }
                }
            }
            ExprKind::Call { callee, args, chain } => {
                self.emit_callee(callee, *chain);
                if chain.is_optional() {
                    self.emit("?.");
                }
                self.emit_arguments(args);
            }
            ExprKind::OptionalChain(inner) => self.emit_expr_kind(inner),
            ExprKind::New { callee, args } => {
                self.emit("new ");
                let wrap = expr_precedence(callee) < Precedence::LeftHandSide || contains_call(callee);
                self.emit_operand(callee, wrap);
                self.emit_arguments(args);
            }
            ExprKind::TaggedTemplate { tag, quasi } => {
                self.emit_callee(tag, ChainLink::Plain);
                self.emit_template(quasi);
            }
            ExprKind::Spread(arg) => {
                self.emit("...");
                self.emit_expr_prec(arg, Precedence::Assignment);
            }
            ExprKind::Yield { arg, delegate } => {
                self.emit("yield");
                if *delegate {
                    self.emit("*");
                }
                if let Some(arg) = arg {
                    self.emit(" ");
                    self.emit_expr_prec(arg, Precedence::Assignment);
                }
            }
            ExprKind::Await(arg) => {
                self.emit("await ");
                self.emit_expr_prec(arg, Precedence::Unary);
            }
            ExprKind::Import { source, options } => {
                self.emit("import(");
                self.emit_expr_prec(source, Precedence::Assignment);
                if let Some(options) = options {
                    self.emit(", ");
                    self.emit_expr_prec(options, Precedence::Assignment);
                }
                self.emit(")");
            }
            ExprKind::MetaProperty { meta, property } => {
                self.emit(meta);
                self.emit(".");
                self.emit(property);
            }
        }
    }

    /// The object of a member access, callee of a call or tag of a template.
    /// Outside its own chain an optional chain needs parentheses.
    fn emit_callee(&mut self, expr: &Expr, link: ChainLink) {
        let breaks_chain = link == ChainLink::Plain && matches!(expr.kind, ExprKind::OptionalChain(_));
        self.emit_operand(expr, expr_precedence(expr) < Precedence::LeftHandSide || breaks_chain);
    }

    fn emit_arguments(&mut self, args: &[Expr]) {
        self.emit("(");
        self.emit_comma_list(args, |p, arg| p.emit_expr_prec(arg, Precedence::Assignment));
        self.emit(")");
    }

    fn emit_object_property(&mut self, prop: &Property) {
        match &prop.kind {
            PropertyKind::Init { key, value } => {
                self.emit_property_key(key);
                self.emit(": ");
                self.emit_expr_prec(value, Precedence::Assignment);
            }
            PropertyKind::Shorthand(name) => self.emit(name),
            PropertyKind::CoverInit { name, default } => {
                self.emit(name);
                self.emit(" = ");
                self.emit_expr_prec(default, Precedence::Assignment);
            }
            PropertyKind::Method { key, kind, function } => self.emit_method(key, *kind, function),
            PropertyKind::Spread(arg) => {
                self.emit("...");
                self.emit_expr_prec(arg, Precedence::Assignment);
            }
        }
    }

    fn emit_property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Ident(name) => self.emit(name),
            PropertyKey::String(value) => self.emit_string(value),
            PropertyKey::Number(value) => self.emit(&format_number(*value)),
            PropertyKey::BigInt(digits) => {
                self.emit(digits);
                self.emit("n");
            }
            PropertyKey::Computed(expr) => {
                self.emit("[");
                self.emit_expr_prec(expr, Precedence::Assignment);
                self.emit("]");
            }
            PropertyKey::Private(name) => {
                self.emit("#");
                self.emit(name);
            }
        }
    }

    fn emit_template(&mut self, template: &Template) {
        self.emit("`");
        for (i, quasi) in template.quasis.iter().enumerate() {
            self.emit(&escape_template(quasi));
            if let Some(expr) = template.exprs.get(i) {
                self.emit("${");
                self.emit_expr(expr);
                self.emit("}");
            }
        }
        self.emit("`");
    }

    fn emit_string(&mut self, value: &str) {
        self.emit("\"");
        self.emit(&escape_string(value));
        self.emit("\"");
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// How tightly `expr` binds as an operand.
fn expr_precedence(expr: &Expr) -> Precedence {
    match &expr.kind {
        ExprKind::Sequence(_) => Precedence::Comma,
        ExprKind::Arrow(_) | ExprKind::Assign { .. } | ExprKind::Yield { .. } | ExprKind::Spread(_) => {
            Precedence::Assignment
        }
        ExprKind::Conditional { .. } => Precedence::Conditional,
        ExprKind::Binary { op, .. } => op.precedence(),
        ExprKind::Unary { .. } | ExprKind::Await(_) => Precedence::Unary,
        ExprKind::Update { .. } => Precedence::Update,
        ExprKind::Member { .. }
        | ExprKind::Call { .. }
        | ExprKind::OptionalChain(_)
        | ExprKind::New { .. }
        | ExprKind::TaggedTemplate { .. }
        | ExprKind::Import { .. }
        | ExprKind::MetaProperty { .. } => Precedence::LeftHandSide,
        ExprKind::Null
        | ExprKind::Bool(_)
        | ExprKind::Number(_)
        | ExprKind::BigInt(_)
        | ExprKind::String(_)
        | ExprKind::Regex { .. }
        | ExprKind::Template(_)
        | ExprKind::Ident(_)
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::PrivateName(_)
        | ExprKind::Array(_)
        | ExprKind::Object(_)
        | ExprKind::Function(_)
        | ExprKind::Class(_)
        | ExprKind::Paren(_) => Precedence::Primary,
    }
}

/// Whether the first token printed for `expr` would be misread at `position`.
fn starts_ambiguously(expr: &Expr, position: Position) -> bool {
    match &expr.kind {
        ExprKind::Object(_) => position != Position::ExportDefault,
        ExprKind::Function(_) | ExprKind::Class(_) => position != Position::ArrowBody,
        ExprKind::Binary { left, .. } => starts_ambiguously(left, position),
        ExprKind::Member { object, .. } => starts_ambiguously(object, position),
        ExprKind::Call { callee, .. } => starts_ambiguously(callee, position),
        ExprKind::TaggedTemplate { tag, .. } => starts_ambiguously(tag, position),
        ExprKind::Conditional { test, .. } => starts_ambiguously(test, position),
        ExprKind::Sequence(exprs) => exprs.first().is_some_and(|first| starts_ambiguously(first, position)),
        ExprKind::Update { prefix: false, arg, .. } => starts_ambiguously(arg, position),
        ExprKind::OptionalChain(inner) => starts_ambiguously(inner, position),
        ExprKind::Assign { target, .. } => match &target.kind {
            PatternKind::Object { .. } => position != Position::ExportDefault,
            PatternKind::Member(object) => starts_ambiguously(object, position),
            PatternKind::Ident(_) | PatternKind::Array { .. } => false,
        },
        _ => false,
    }
}

/// Whether `callee` of a `new` holds a call that would take `new`'s arguments.
fn contains_call(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Call { .. } | ExprKind::OptionalChain(_) => true,
        ExprKind::Member { object, .. } => contains_call(object),
        ExprKind::TaggedTemplate { tag, .. } => contains_call(tag),
        _ => false,
    }
}

fn starts_with_sign(expr: &Expr, sign: char) -> bool {
    match &expr.kind {
        ExprKind::Unary { op: UnaryOp::Minus, .. } => sign == '-',
        ExprKind::Unary { op: UnaryOp::Plus, .. } => sign == '+',
        ExprKind::Update { op: UpdateOp::Decrement, prefix: true, .. } => sign == '-',
        ExprKind::Update { op: UpdateOp::Increment, prefix: true, .. } => sign == '+',
        _ => false,
    }
}

/// `??` next to an unparenthesized `||` or `&&`.
fn mixes_coalesce(op: BinaryOp, operand: &Expr) -> bool {
    match operand.kind {
        ExprKind::Binary { op: inner, .. } => {
            (op == BinaryOp::NullishCoalesce && inner.is_short_circuit_logical())
                || (op.is_short_circuit_logical() && inner == BinaryOp::NullishCoalesce)
        }
        _ => false,
    }
}

fn is_bare_integer(expr: &Expr) -> bool {
    match expr.kind {
        ExprKind::Number(value) => format_number(value).bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Shortest text that lexes back to exactly `value`.
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        // Overflows back to infinity when lexed.
        return "1e999".to_string();
    }
    let plain = format!("{value}");
    let exponent = format!("{value:e}");
    if exponent.len() < plain.len() {
        exponent
    } else {
        plain
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result
}

fn escape_template(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '`' => result.push_str("\\`"),
            '$' => result.push_str("\\$"),
            // A raw CR would be read back as LF.
            '\r' => result.push_str("\\r"),
            c => result.push(c),
        }
    }
    result
}
