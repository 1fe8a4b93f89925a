//! Grammar parameters threaded through the descent.
//!
//! A [`Context`] is passed by value into every parse routine. Nested
//! constructs derive a modified copy with the `with_*` builders; returning
//! from a routine restores the caller's context automatically.

/// Grammar flags in effect at a point of the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// `in` is a binary operator (false inside a `for` head).
    pub in_allowed: bool,
    /// `yield` is an operator.
    pub in_generator: bool,
    /// `await` is an operator.
    pub in_async: bool,
    pub strict: bool,
    /// Inside a function body (including methods and arrows).
    pub in_function: bool,
    /// Inside a class field initializer or static block.
    pub in_class_field: bool,
    /// The expression being parsed may still be reinterpreted as a pattern,
    /// so shorthand initializers like `{a = 1}` are deferred instead of
    /// rejected.
    pub cover_allowed: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            in_allowed: true,
            in_generator: false,
            in_async: false,
            strict: false,
            in_function: false,
            in_class_field: false,
            cover_allowed: false,
        }
    }
}

impl Context {
    /// Top-level context of a module: strict, with top-level `await`.
    pub fn module() -> Self {
        Self { strict: true, in_async: true, ..Self::default() }
    }

    #[must_use]
    pub fn with_in_allowed(self, in_allowed: bool) -> Self {
        Self { in_allowed, ..self }
    }

    #[must_use]
    pub fn with_generator(self, in_generator: bool) -> Self {
        Self { in_generator, ..self }
    }

    #[must_use]
    pub fn with_async(self, in_async: bool) -> Self {
        Self { in_async, ..self }
    }

    #[must_use]
    pub fn with_strict(self, strict: bool) -> Self {
        Self { strict: self.strict || strict, ..self }
    }

    #[must_use]
    pub fn with_cover_allowed(self, cover_allowed: bool) -> Self {
        Self { cover_allowed, ..self }
    }

    /// Context for the body of a function: `in` is allowed again and the
    /// function's own async/generator flags replace the enclosing ones.
    #[must_use]
    pub fn function_body(self, is_async: bool, is_generator: bool) -> Self {
        Self {
            in_allowed: true,
            in_generator: is_generator,
            in_async: is_async,
            in_function: true,
            in_class_field: false,
            cover_allowed: false,
            ..self
        }
    }

    /// Context for a class field initializer or static block.
    #[must_use]
    pub fn class_field(self) -> Self {
        Self {
            in_allowed: true,
            in_generator: false,
            in_async: false,
            in_class_field: true,
            cover_allowed: false,
            strict: true,
            ..self
        }
    }

    /// Whether `word` is reserved in this context and may not name a binding.
    pub fn is_reserved_binding(&self, word: &str) -> bool {
        match word {
            "yield" => self.in_generator || self.strict,
            "await" => self.in_async || self.in_class_field,
            "let" | "static" | "implements" | "interface" | "package" | "private" | "protected"
            | "public" => self.strict,
            _ => false,
        }
    }
}
