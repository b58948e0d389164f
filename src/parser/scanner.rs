use super::lexer::{Lexer, Token, TokenKind};
use crate::error::Result;

/// A one-token-lookahead scanner over an eagerly lexed token vector, with a
/// LIFO bookmark stack supporting speculative reads of arbitrary depth.
///
/// The vector always ends with a single `Eof` token, and `advance` is sticky
/// there: once the cursor reaches `Eof` it stays. A bookmark records both the
/// cursor and the previously consumed token, so `return_to_position` restores
/// the visible state exactly as it was at the matching `record_position`.
pub struct LookaheadScanner {
    file_name: String,
    tokens: Vec<Token>,
    pos: usize,
    prev: usize,
    marks: Vec<(usize, usize)>,
}

impl LookaheadScanner {
    /// Create a scanner over an already-lexed token vector. The vector must
    /// end with `Eof`; one is appended if the caller left it off.
    pub fn new(file_name: impl Into<String>, mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            tokens.push(Token::eof(line));
        }
        Self {
            file_name: file_name.into(),
            tokens,
            pos: 0,
            prev: 0,
            marks: Vec::new(),
        }
    }

    /// Lex `source` and scan the result.
    pub fn from_source(file_name: impl Into<String>, source: &str) -> Result<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(file_name, tokens))
    }

    /// The current (not yet consumed) token.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The token most recently consumed by `advance`.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.prev]
    }

    /// Consume the current token. At `Eof` the cursor does not move, but the
    /// consumption is still visible through `previous`.
    pub fn advance(&mut self) {
        self.prev = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Push a bookmark for speculative lookahead. Bookmarks nest LIFO and
    /// every one must be resolved by `return_to_position`.
    pub fn record_position(&mut self) {
        self.marks.push((self.pos, self.prev));
    }

    /// Pop the innermost bookmark and rewind to it.
    pub fn return_to_position(&mut self) {
        let (pos, prev) = self
            .marks
            .pop()
            .expect("return_to_position without matching record_position");
        self.pos = pos;
        self.prev = prev;
    }

    /// Number of unresolved bookmarks.
    pub fn open_positions(&self) -> usize {
        self.marks.len()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}
