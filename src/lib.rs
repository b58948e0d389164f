//! Jay Language Compiler front end (jayc)
//!
//! A compiler front end for Jay, a reduced Java-like source language:
//! classes with single inheritance, the primitive types `boolean`, `char`
//! and `int`, arrays, methods and constructors, `if`/`while`/`return`
//! control flow, a fixed operator hierarchy, casts, `this`/`super` and
//! object/array creation.
//!
//! ## Architecture
//!
//! - **parser**: lexical analysis (logos) and recursive descent parsing of
//!   Jay source into an AST, with Turner-Morrison error recovery
//! - **ast**: the node family for one compilation unit, plus a visitor and
//!   a source printer
//!
//! ## Pipeline
//!
//! ```text
//! Jay Source → Lexer → LookaheadScanner → Parser → AST
//!                                           ↓
//!                                 diagnostics on stderr
//! ```
//!
//! The parser never fails: syntax errors surface as diagnostics and as
//! `Wild` placeholder nodes, and the strict entry points summarize them
//! into an error after the fact. Downstream phases are expected to refuse
//! trees whose parse reported errors.

pub mod ast;
pub mod error;
pub mod parser;

pub use error::{Error, Result};
pub use parser::{parse_source, parse_source_lenient};

use std::path::Path;

/// Parse a Jay source file (strict).
pub fn parse_file(path: impl AsRef<Path>) -> Result<ast::CompilationUnit> {
    let path = path.as_ref();
    let file_name = path.display().to_string();
    log::debug!("parsing file {}", file_name);
    let source = std::fs::read_to_string(path)?;
    parse_source(&file_name, &source)
}
