#![allow(dead_code)]

use jayc::ast::*;
use jayc::parser::{LookaheadScanner, Parser};

/// Parse a source string, returning the unit together with the captured
/// diagnostics and the error flag.
pub fn parse_unit(source: &str) -> (CompilationUnit, Vec<String>, bool) {
    let scanner = LookaheadScanner::from_source("Test.jay", source).expect("lexing failed");
    let mut parser = Parser::new(scanner);
    let unit = parser.parse();
    assert_eq!(
        parser.scanner().current().kind,
        jayc::parser::TokenKind::Eof,
        "scanner should sit on EOF after parse"
    );
    assert_eq!(
        parser.scanner().open_positions(),
        0,
        "all scanner bookmarks should be resolved after parse"
    );
    let diagnostics = parser.diagnostics().to_vec();
    let had_error = parser.error_has_occurred();
    (unit, diagnostics, had_error)
}

/// Parse a source string that is expected to be error free.
pub fn parse_ok(source: &str) -> CompilationUnit {
    let (unit, diagnostics, had_error) = parse_unit(source);
    assert!(
        !had_error,
        "unexpected parse errors: {:?}",
        diagnostics
    );
    assert!(diagnostics.is_empty());
    unit
}

/// The sole class of a compilation unit.
pub fn only_class(unit: &CompilationUnit) -> &ClassDecl {
    assert_eq!(unit.type_decls.len(), 1, "expected exactly one class");
    let TypeDecl::Class(class) = &unit.type_decls[0];
    class
}

/// Find a method by name in a class.
pub fn method<'a>(class: &'a ClassDecl, name: &str) -> &'a MethodDecl {
    class
        .members
        .iter()
        .find_map(|m| match m {
            Member::Method(method) if method.name == name => Some(method),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no method named {}", name))
}

/// The statements of a method body.
pub fn body_stmts<'a>(method: &'a MethodDecl) -> &'a [Stmt] {
    &method
        .body
        .as_ref()
        .expect("method should have a body")
        .statements
}

/// Parse `expr_src` in variable-initializer position and return it.
pub fn parse_init_expr(expr_src: &str) -> Expr {
    let source = format!("class T {{ void m() {{ int t = {}; }} }}", expr_src);
    let unit = parse_ok(&source);
    let class = only_class(&unit);
    let stmts = body_stmts(method(class, "m"));
    match &stmts[0] {
        Stmt::VarDecl(decl) => decl.declarators[0]
            .initializer
            .clone()
            .expect("declarator should have an initializer"),
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

/// Parse `stmt_src` as the sole statement of a method body and return it.
pub fn parse_stmt(stmt_src: &str) -> Stmt {
    let source = format!("class T {{ void m() {{ {} }} }}", stmt_src);
    let unit = parse_ok(&source);
    let class = only_class(&unit);
    let stmts = body_stmts(method(class, "m"));
    assert_eq!(stmts.len(), 1, "expected exactly one statement");
    stmts[0].clone()
}

/// Parse `stmt_src` as a statement, tolerating reported errors; returns the
/// statement with the diagnostics and the error flag.
pub fn parse_stmt_lenient(stmt_src: &str) -> (Stmt, Vec<String>, bool) {
    let source = format!("class T {{ void m() {{ {} }} }}", stmt_src);
    let (unit, diagnostics, had_error) = parse_unit(&source);
    let class = only_class(&unit);
    let stmts = body_stmts(method(class, "m"));
    (stmts[0].clone(), diagnostics, had_error)
}
