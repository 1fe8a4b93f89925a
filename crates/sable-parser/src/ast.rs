//! AST node types.
//!
//! Every node family is a struct holding a `kind` discriminant plus a
//! [`Span`]. Children are owned (`Box`/`Vec`); the tree is acyclic and never
//! shares nodes. Consumers dispatch on `kind` with exhaustive matches; the
//! [`visit`](crate::visit) module provides the standard walkers.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Whether the source is a classic script or an ECMAScript module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

/// The root of a parsed source unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub source_type: SourceType,
    pub span: Span,
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }
}

/// Expression kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    // === Literals ===
    Null,
    Bool(bool),
    Number(f64),
    /// BigInt literal digits, radix prefix included: `0xffn` -> `0xff`
    BigInt(String),
    String(String),
    Regex { pattern: String, flags: String },
    /// Template literal: `` `a${b}c` ``
    Template(Template),

    // === Identifiers ===
    Ident(String),
    This,
    Super,
    /// `#x` on the left of `in`: `#x in obj`
    PrivateName(String),

    // === Compound Expressions ===
    /// Array literal; `None` entries are holes: `[a, , b]`
    Array(Vec<Option<Expr>>),
    Object(Vec<Property>),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Class(Box<Class>),

    // === Operations ===
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// `++a`, `a--`; the argument is always a simple target.
    Update { op: UpdateOp, prefix: bool, arg: Box<Expr> },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    /// `a = b`, `[a, b] = c`, `a ??= b`
    Assign { op: AssignOp, target: Box<Pattern>, value: Box<Expr> },
    Conditional { test: Box<Expr>, consequent: Box<Expr>, alternate: Box<Expr> },
    /// `a, b, c` (always two or more entries)
    Sequence(Vec<Expr>),
    /// `(expr)`, kept so that grouping survives printing and pattern checks.
    Paren(Box<Expr>),

    // === Member Access and Calls ===
    /// `a.b`, `a[b]`, `a.#b`, `a?.b`
    Member { object: Box<Expr>, property: MemberProp, chain: ChainLink },
    /// `f(a)`, `f?.(a)`
    Call { callee: Box<Expr>, args: Vec<Expr>, chain: ChainLink },
    /// The outermost node of a chain containing at least one `?.`.
    OptionalChain(Box<Expr>),
    New { callee: Box<Expr>, args: Vec<Expr> },
    TaggedTemplate { tag: Box<Expr>, quasi: Template },

    // === Special ===
    /// `...expr` inside array literals and argument lists.
    Spread(Box<Expr>),
    Yield { arg: Option<Box<Expr>>, delegate: bool },
    Await(Box<Expr>),
    /// Dynamic `import(source)` or `import(source, options)`.
    Import { source: Box<Expr>, options: Option<Box<Expr>> },
    /// `new.target`, `import.meta`
    MetaProperty { meta: String, property: String },
}

/// Cooked template strings interleaved with substitutions.
/// `quasis.len() == exprs.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub quasis: Vec<String>,
    pub exprs: Vec<Expr>,
}

/// The property part of a member access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MemberProp {
    Ident(String),
    Private(String),
    Computed(Box<Expr>),
}

/// How a member access or call takes part in an optional chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChainLink {
    /// Not inside a chain, or before the first `?.` of it.
    Plain,
    /// This link is written `?.`.
    Optional,
    /// Short-circuited by an earlier `?.` in the same chain.
    Guarded,
}

impl ChainLink {
    pub fn is_optional(self) -> bool {
        self == ChainLink::Optional
    }
}

/// An object literal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub kind: PropertyKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyKind {
    /// `key: value`
    Init { key: PropertyKey, value: Expr },
    /// `{ a }`
    Shorthand(String),
    /// `{ a = 1 }`, only valid once the literal becomes a pattern.
    CoverInit { name: String, default: Expr },
    /// `m() {}`, `get x() {}`, `set x(v) {}`
    Method { key: PropertyKey, kind: MethodKind, function: Box<Function> },
    /// `...rest`
    Spread(Expr),
}

/// A property or class member name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyKey {
    Ident(String),
    String(String),
    Number(f64),
    BigInt(String),
    Computed(Box<Expr>),
    /// Class members only.
    Private(String),
}

impl PropertyKey {
    /// The statically known name of a non-computed key.
    pub fn static_name(&self) -> Option<String> {
        match self {
            PropertyKey::Ident(name) | PropertyKey::String(name) => Some(name.clone()),
            PropertyKey::Number(n) => Some(n.to_string()),
            PropertyKey::BigInt(digits) => Some(digits.clone()),
            PropertyKey::Computed(_) | PropertyKey::Private(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

// =============================================================================
// Patterns
// =============================================================================

/// A binding or assignment target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// An identifier or member target, as opposed to a destructuring shape.
    pub fn is_simple(&self) -> bool {
        matches!(self.kind, PatternKind::Ident(_) | PatternKind::Member(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PatternKind {
    Ident(String),
    /// `a.b` or `a[b]`; only legal as an assignment target.
    Member(Box<Expr>),
    /// `[a, , b = 1, ...rest]`
    Array { elements: Vec<Option<PatternElement>>, rest: Option<Box<Pattern>> },
    /// `{a, b: c, d = 1, ...rest}`
    Object { props: Vec<PatternProp>, rest: Option<Box<Pattern>> },
}

/// A pattern position with an optional default: array elements and parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternElement {
    pub target: Pattern,
    pub default: Option<Expr>,
    pub span: Span,
}

/// `key: value = default` inside an object pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternProp {
    pub key: PropertyKey,
    pub value: Pattern,
    pub default: Option<Expr>,
    /// Written as `{ a }` or `{ a = 1 }`.
    pub shorthand: bool,
    pub span: Span,
}

// =============================================================================
// Statements
// =============================================================================

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    // === Declarations ===
    Var(VarDecl),
    Function(Box<Function>),
    Class(Box<Class>),

    // === Control Flow ===
    Block(Vec<Stmt>),
    Empty,
    Expr(Expr),
    If { test: Expr, consequent: Box<Stmt>, alternate: Option<Box<Stmt>> },
    Switch { discriminant: Expr, cases: Vec<SwitchCase> },
    While { test: Expr, body: Box<Stmt> },
    DoWhile { body: Box<Stmt>, test: Expr },
    For {
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForIn { left: ForHead, right: Expr, body: Box<Stmt> },
    ForOf { left: ForHead, right: Expr, body: Box<Stmt>, is_await: bool },
    Break(Option<String>),
    Continue(Option<String>),
    Return(Option<Expr>),
    Throw(Expr),
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
    Labeled { label: String, body: Box<Stmt> },
    With { object: Expr, body: Box<Stmt> },
    Debugger,

    // === Modules ===
    Import(Box<ImportDecl>),
    Export(Box<ExportDecl>),

    /// Placeholder for a statement that failed to parse.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub kind: VarKind,
    pub decls: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclarator {
    pub target: Pattern,
    pub init: Option<Expr>,
    pub span: Span,
}

/// First clause of a classic `for`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInit {
    Var(VarDecl),
    Expr(Expr),
}

/// Left side of `for-in` / `for-of`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForHead {
    /// A single declarator without initializer: `for (const x of xs)`
    Var(VarDecl),
    /// An assignment target: `for ([a, b] of pairs)`
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    /// `None` for `default:`
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    /// `None` for `catch { ... }`
    pub param: Option<Pattern>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

// =============================================================================
// Functions and Classes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: Option<String>,
    pub params: Params,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

/// A formal parameter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Params {
    pub items: Vec<PatternElement>,
    pub rest: Option<Box<Pattern>>,
    pub span: Span,
}

impl Params {
    pub fn len(&self) -> usize {
        self.items.len() + usize::from(self.rest.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Only identifiers, no defaults, no rest, no destructuring.
    pub fn is_simple(&self) -> bool {
        self.rest.is_none()
            && self
                .items
                .iter()
                .all(|p| p.default.is_none() && matches!(p.target.kind, PatternKind::Ident(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunction {
    pub params: Params,
    pub body: ArrowBody,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub name: Option<String>,
    pub super_class: Option<Box<Expr>>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMember {
    pub kind: ClassMemberKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassMemberKind {
    Method {
        key: PropertyKey,
        kind: MethodKind,
        is_static: bool,
        function: Box<Function>,
    },
    Field {
        key: PropertyKey,
        value: Option<Expr>,
        is_static: bool,
    },
    /// `static { ... }`
    StaticBlock(Vec<Stmt>),
}

// =============================================================================
// Modules
// =============================================================================

/// A name in an import/export clause: an identifier or a string literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ModuleExportName {
    Ident(String),
    String(String),
}

impl ModuleExportName {
    pub fn as_str(&self) -> &str {
        match self {
            ModuleExportName::Ident(name) | ModuleExportName::String(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDecl {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub attributes: Vec<ImportAttribute>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ImportSpecifier {
    /// `import a from "m"`
    Default { local: String, span: Span },
    /// `import * as ns from "m"`
    Namespace { local: String, span: Span },
    /// `import { a as b, "c-d" as e } from "m"`
    Named { imported: ModuleExportName, local: String, span: Span },
}

/// `with { type: "json" }` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportAttribute {
    pub key: ModuleExportName,
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExportDecl {
    /// `export const a = 1;`, `export function f() {}`
    Decl { decl: Stmt, span: Span },
    /// `export default ...`
    Default { value: DefaultExport, span: Span },
    /// `export { a, b as c }` or `export { a } from "m"`
    Named {
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
        attributes: Vec<ImportAttribute>,
        span: Span,
    },
    /// `export * from "m"`, `export * as ns from "m"`
    All {
        exported: Option<ModuleExportName>,
        source: String,
        attributes: Vec<ImportAttribute>,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DefaultExport {
    Function(Box<Function>),
    Class(Box<Class>),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpecifier {
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
    pub span: Span,
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Typeof => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Comparison
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Bitwise
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    UShr,
    // Logical
    And,
    Or,
    NullishCoalesce,
    // Relational
    In,
    Instanceof,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::NullishCoalesce => "??",
            BinaryOp::In => "in",
            BinaryOp::Instanceof => "instanceof",
        }
    }

    /// `&&` and `||`, the operators `??` may not be mixed with.
    pub fn is_short_circuit_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    BitOrAssign,
    BitXorAssign,
    BitAndAssign,
    AndAssign,
    OrAssign,
    NullishAssign,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::PowAssign => "**=",
            AssignOp::ShlAssign => "<<=",
            AssignOp::ShrAssign => ">>=",
            AssignOp::UShrAssign => ">>>=",
            AssignOp::BitOrAssign => "|=",
            AssignOp::BitXorAssign => "^=",
            AssignOp::BitAndAssign => "&=",
            AssignOp::AndAssign => "&&=",
            AssignOp::OrAssign => "||=",
            AssignOp::NullishAssign => "??=",
        }
    }
}
