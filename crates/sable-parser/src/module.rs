//! Import and export declarations.

use crate::ast::*;
use crate::context::Context;
use crate::error::{ErrorKind, PResult};
use crate::parser::{FunctionName, Parser};
use crate::span::Span;
use crate::stream::TokenStream;
use crate::token::{keyword_from_str, TokenKind};

impl<S: TokenStream> Parser<S> {
    // =========================================================================
    // Imports
    // =========================================================================

    pub(crate) fn parse_import_decl(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.expect(&TokenKind::Import)?;
        let mut specifiers = Vec::new();

        // import "side-effect";
        if !matches!(self.kind(), TokenKind::String(_)) {
            let mut more = true;
            if matches!(self.kind(), TokenKind::Identifier(_)) {
                let local_start = self.start();
                let local = self.parse_binding_identifier(cx)?;
                specifiers.push(ImportSpecifier::Default { local, span: self.span_from(local_start) });
                more = self.eat(&TokenKind::Comma);
            }

            if more {
                match self.kind() {
                    TokenKind::Star => {
                        let ns_start = self.start();
                        self.bump();
                        self.expect_word("as")?;
                        let local = self.parse_binding_identifier(cx)?;
                        specifiers.push(ImportSpecifier::Namespace { local, span: self.span_from(ns_start) });
                    }
                    TokenKind::LBrace => {
                        self.bump();
                        while !self.check(&TokenKind::RBrace) {
                            specifiers.push(self.parse_import_specifier(cx)?);
                            if !self.check(&TokenKind::RBrace) {
                                self.expect(&TokenKind::Comma)?;
                            }
                        }
                        self.expect(&TokenKind::RBrace)?;
                    }
                    _ => return self.unexpected(&["`*`", "`{`"]),
                }
            }
            self.expect_word("from")?;
        }

        let source = self.parse_module_source()?;
        let attributes = self.parse_import_attributes()?;
        self.consume_semicolon()?;

        let span = self.span_from(start);
        let decl = ImportDecl { specifiers, source, attributes, span };
        Ok(Stmt::new(StmtKind::Import(Box::new(decl)), span))
    }

    /// `a`, `a as b`, `default as b` or `"string name" as b`.
    fn parse_import_specifier(&mut self, cx: Context) -> PResult<ImportSpecifier> {
        let start = self.start();
        let name_span = self.cur().span;
        let is_identifier = matches!(self.kind(), TokenKind::Identifier(_));
        let imported = self.parse_module_export_name()?;

        let local = if self.eat_word("as") {
            self.parse_binding_identifier(cx)?
        } else {
            match &imported {
                ModuleExportName::Ident(name) if is_identifier => {
                    self.check_binding_name(name, name_span, cx);
                    name.clone()
                }
                // Reserved words and strings can only be imported under a new name.
                _ => return self.unexpected(&["`as`"]),
            }
        };

        Ok(ImportSpecifier::Named { imported, local, span: self.span_from(start) })
    }

    fn parse_module_export_name(&mut self) -> PResult<ModuleExportName> {
        if let TokenKind::String(value) = self.kind() {
            let value = value.clone();
            self.bump();
            return Ok(ModuleExportName::String(value));
        }
        Ok(ModuleExportName::Ident(self.parse_identifier_name()?))
    }

    fn parse_module_source(&mut self) -> PResult<String> {
        match self.kind() {
            TokenKind::String(value) => {
                let value = value.clone();
                self.bump();
                Ok(value)
            }
            _ => self.unexpected(&["module specifier"]),
        }
    }

    /// `with { type: "json" }`; the older `assert` keyword is accepted too.
    fn parse_import_attributes(&mut self) -> PResult<Vec<ImportAttribute>> {
        let introduced = self.check(&TokenKind::With) || (self.at_word("assert") && !self.cur().had_newline_before);
        if !introduced {
            return Ok(Vec::new());
        }
        self.bump();
        self.expect(&TokenKind::LBrace)?;

        let mut attributes: Vec<ImportAttribute> = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let start = self.start();
            let key = self.parse_module_export_name()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_module_source()?;
            let span = self.span_from(start);
            if attributes.iter().any(|attr| attr.key.as_str() == key.as_str()) {
                self.report(ErrorKind::InvalidSyntax("duplicate import attribute"), span);
            }
            attributes.push(ImportAttribute { key, value, span });
            if !self.check(&TokenKind::RBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(attributes)
    }

    // =========================================================================
    // Exports
    // =========================================================================

    pub(crate) fn parse_export_decl(&mut self, cx: Context) -> PResult<Stmt> {
        let start = self.start();
        self.expect(&TokenKind::Export)?;

        let decl = match self.kind() {
            TokenKind::Star => {
                self.bump();
                let exported = if self.eat_word("as") { Some(self.parse_module_export_name()?) } else { None };
                self.expect_word("from")?;
                let source = self.parse_module_source()?;
                let attributes = self.parse_import_attributes()?;
                self.consume_semicolon()?;
                ExportDecl::All { exported, source, attributes, span: self.span_from(start) }
            }
            TokenKind::LBrace => self.parse_export_named(start)?,
            TokenKind::Default => self.parse_export_default(cx, start)?,
            TokenKind::Var => ExportDecl::Decl {
                decl: self.parse_var_stmt(cx, VarKind::Var)?,
                span: self.span_from(start),
            },
            TokenKind::Const => ExportDecl::Decl {
                decl: self.parse_var_stmt(cx, VarKind::Const)?,
                span: self.span_from(start),
            },
            TokenKind::Function => {
                let decl_start = self.start();
                let decl = self.parse_function_decl(cx, decl_start, false)?;
                ExportDecl::Decl { decl, span: self.span_from(start) }
            }
            TokenKind::Class => ExportDecl::Decl { decl: self.parse_class_decl(cx)?, span: self.span_from(start) },
            _ if self.at_let_decl() => ExportDecl::Decl {
                decl: self.parse_var_stmt(cx, VarKind::Let)?,
                span: self.span_from(start),
            },
            _ if self.at_async_function() => {
                let decl_start = self.start();
                let decl = self.parse_function_decl(cx, decl_start, true)?;
                ExportDecl::Decl { decl, span: self.span_from(start) }
            }
            _ => return self.unexpected(&["declaration", "`{`", "`*`", "`default`"]),
        };

        Ok(Stmt::new(StmtKind::Export(Box::new(decl)), self.span_from(start)))
    }

    /// `export { a, b as c }` with an optional `from` clause.
    fn parse_export_named(&mut self, start: u32) -> PResult<ExportDecl> {
        self.expect(&TokenKind::LBrace)?;
        let mut specifiers = Vec::new();
        let mut local_names: Vec<(Span, bool)> = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            let spec_start = self.start();
            let is_identifier = matches!(self.kind(), TokenKind::Identifier(_));
            let local = self.parse_module_export_name()?;
            local_names.push((self.span_from(spec_start), is_identifier));
            let exported = if self.eat_word("as") { self.parse_module_export_name()? } else { local.clone() };
            specifiers.push(ExportSpecifier { local, exported, span: self.span_from(spec_start) });
            if !self.check(&TokenKind::RBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        let (source, attributes) = if self.eat_word("from") {
            let source = self.parse_module_source()?;
            (Some(source), self.parse_import_attributes()?)
        } else {
            // Without `from` the locals are references into this module.
            for (spec, (span, is_identifier)) in specifiers.iter().zip(&local_names) {
                match &spec.local {
                    ModuleExportName::String(_) => self.report(
                        ErrorKind::InvalidSyntax("a string export name needs a `from` clause"),
                        *span,
                    ),
                    ModuleExportName::Ident(name) if !is_identifier || keyword_from_str(name).is_some() => {
                        self.report(ErrorKind::ReservedWordMisuse { word: name.clone() }, *span);
                    }
                    ModuleExportName::Ident(_) => {}
                }
            }
            (None, Vec::new())
        };
        self.consume_semicolon()?;

        Ok(ExportDecl::Named { specifiers, source, attributes, span: self.span_from(start) })
    }

    fn parse_export_default(&mut self, cx: Context, start: u32) -> PResult<ExportDecl> {
        self.expect(&TokenKind::Default)?;
        let decl_start = self.start();

        let value = match self.kind() {
            TokenKind::Function => {
                let function = self.parse_function(cx, decl_start, false, FunctionName::DefaultExport)?;
                DefaultExport::Function(Box::new(function))
            }
            TokenKind::Class => DefaultExport::Class(Box::new(self.parse_class(cx, decl_start, false)?)),
            _ if self.at_async_function() => {
                self.bump();
                let function = self.parse_function(cx, decl_start, true, FunctionName::DefaultExport)?;
                DefaultExport::Function(Box::new(function))
            }
            _ => {
                let expr = self.parse_assign_expr(cx)?;
                self.consume_semicolon()?;
                DefaultExport::Expr(expr)
            }
        };

        Ok(ExportDecl::Default { value, span: self.span_from(start) })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::{parse, ParserOptions};

    fn module_item(source: &str) -> StmtKind {
        let program = parse(source, ParserOptions::module()).unwrap();
        program.body.into_iter().next().map(|s| s.kind).unwrap()
    }

    fn import(source: &str) -> ImportDecl {
        match module_item(source) {
            StmtKind::Import(decl) => *decl,
            other => panic!("expected an import, got {other:?}"),
        }
    }

    fn export(source: &str) -> ExportDecl {
        match module_item(source) {
            StmtKind::Export(decl) => *decl,
            other => panic!("expected an export, got {other:?}"),
        }
    }

    #[test]
    fn test_import_forms() {
        let decl = import("import a, { b, c as d, \"e-f\" as g, default as h } from 'm';");
        assert_eq!(decl.source, "m");
        assert_eq!(decl.specifiers.len(), 5);
        assert!(matches!(&decl.specifiers[0], ImportSpecifier::Default { local, .. } if local == "a"));
        assert!(matches!(
            &decl.specifiers[3],
            ImportSpecifier::Named { imported: ModuleExportName::String(s), local, .. } if s == "e-f" && local == "g"
        ));

        let decl = import("import * as ns from 'm'");
        assert!(matches!(&decl.specifiers[0], ImportSpecifier::Namespace { local, .. } if local == "ns"));

        let decl = import("import 'polyfill';");
        assert!(decl.specifiers.is_empty());
    }

    #[test]
    fn test_import_attributes() {
        let decl = import("import data from './data.json' with { type: 'json' };");
        assert_eq!(decl.attributes.len(), 1);
        assert_eq!(decl.attributes[0].key.as_str(), "type");
        assert_eq!(decl.attributes[0].value, "json");
    }

    #[test]
    fn test_string_import_needs_alias() {
        assert!(parse("import { 'a' } from 'm';", ParserOptions::module()).is_err());
        assert!(parse("import { default } from 'm';", ParserOptions::module()).is_err());
    }

    #[test]
    fn test_export_forms() {
        assert!(matches!(export("export * from 'm';"), ExportDecl::All { exported: None, .. }));
        assert!(matches!(export("export * as ns from 'm';"), ExportDecl::All { exported: Some(_), .. }));
        assert!(matches!(export("export const a = 1;"), ExportDecl::Decl { .. }));
        assert!(matches!(export("export async function f() {}"), ExportDecl::Decl { .. }));
        assert!(matches!(
            export("export default function () {}"),
            ExportDecl::Default { value: DefaultExport::Function(_), .. }
        ));
        assert!(matches!(
            export("export default class {}"),
            ExportDecl::Default { value: DefaultExport::Class(_), .. }
        ));
        assert!(matches!(
            export("export default a + b;"),
            ExportDecl::Default { value: DefaultExport::Expr(_), .. }
        ));

        let ExportDecl::Named { specifiers, source, .. } = export("export { a as 'b-c', d };") else {
            panic!("expected a named export");
        };
        assert_eq!(specifiers[0].exported, ModuleExportName::String("b-c".into()));
        assert!(source.is_none());
    }

    #[test]
    fn test_string_local_needs_from() {
        assert!(parse("export { 'a' as b };", ParserOptions::module()).is_err());
        assert!(parse("export { 'a' as b } from 'm';", ParserOptions::module()).is_ok());
        assert!(parse("export { default } from 'm';", ParserOptions::module()).is_ok());
        assert!(parse("export { default };", ParserOptions::module()).is_err());
    }

    #[test]
    fn test_module_items_only_at_module_top_level() {
        let errors = parse("import a from 'm';", ParserOptions::default()).unwrap_err();
        assert_eq!(errors.errors()[0].code(), "IllegalModuleItem");
        let errors = parse("{ export const a = 1; }", ParserOptions::module()).unwrap_err();
        assert_eq!(errors.errors()[0].code(), "IllegalModuleItem");
    }
}
