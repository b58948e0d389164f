//! Parser module for Jay
//!
//! Lexical analysis and recursive descent parsing of Jay source into an AST,
//! with Turner-Morrison error recovery.

pub mod lexer;
pub mod parser;
pub mod scanner;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use scanner::LookaheadScanner;

use crate::ast::CompilationUnit;
use crate::error::{Error, Result};

/// Parse Jay source into an AST (strict: returns Err if any syntax error
/// was reported).
///
/// Diagnostics still go to the standard-error sink as they are found; the
/// returned error only summarizes them.
pub fn parse_source(file_name: &str, source: &str) -> Result<CompilationUnit> {
    let scanner = LookaheadScanner::from_source(file_name, source)?;
    let mut parser = Parser::new(scanner);
    let unit = parser.parse();
    if parser.error_has_occurred() {
        return Err(Error::syntax(file_name, parser.diagnostics().len()));
    }
    Ok(unit)
}

/// Parse Jay source into a best-effort AST even if syntax errors occurred.
/// Only lexical failures are fatal.
pub fn parse_source_lenient(file_name: &str, source: &str) -> Result<CompilationUnit> {
    let scanner = LookaheadScanner::from_source(file_name, source)?;
    let mut parser = Parser::new(scanner);
    Ok(parser.parse())
}
