use crate::error::{Error, Result};
use logos::Logos;
use std::fmt;

/// Raw token classes recognized by logos. Whitespace and comments are lexed
/// as tokens and filtered out in `tokenize`, which keeps line tracking a
/// simple scan over every lexeme. `TokenKind` is the parser-facing view;
/// it adds `Eof`, which the lexer appends after the input is exhausted.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum RawToken {
    // Keywords
    #[token("abstract")]
    Abstract,
    #[token("boolean")]
    Boolean,
    #[token("char")]
    Char,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("extends")]
    Extends,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("instanceof")]
    InstanceOf,
    #[token("int")]
    Int,
    #[token("new")]
    New,
    #[token("null")]
    Null,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("static")]
    Static,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("void")]
    Void,
    #[token("while")]
    While,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("&&")]
    LogicalAnd,
    #[token("==")]
    Equal,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Div,
    #[token("%")]
    Mod,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("!")]
    LogicalNot,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LCurly,
    #[token("}")]
    RCurly,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Literals
    #[regex(r"[0-9]+")]
    IntLiteral,
    #[regex(r"'([^'\\\n]|\\.)'")]
    CharLiteral,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    // Identifiers
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    // Comments and whitespace
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 2)]
    BlockComment,
    #[regex(r"[ \t\n\r]+", priority = 2)]
    Whitespace,
}

/// Token kinds as the parser sees them: a closed enumeration with printable
/// images used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Identifier,
    IntLiteral,
    CharLiteral,
    StringLiteral,

    // Keywords
    Abstract,
    Boolean,
    Char,
    Class,
    Else,
    Extends,
    False,
    If,
    Import,
    InstanceOf,
    Int,
    New,
    Null,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Static,
    Super,
    This,
    True,
    Void,
    While,

    // Operators
    Assign,
    PlusAssign,
    LogicalAnd,
    Equal,
    Gt,
    Le,
    Plus,
    Minus,
    Star,
    Div,
    Mod,
    Inc,
    Dec,
    LogicalNot,

    // Separators
    LParen,
    RParen,
    LCurly,
    RCurly,
    LBrack,
    RBrack,
    Semi,
    Comma,
    Dot,
}

impl TokenKind {
    /// The representative image of this kind, used in diagnostics when the
    /// kind is sought rather than found.
    pub fn image(&self) -> &'static str {
        match self {
            TokenKind::Eof => "<EOF>",
            TokenKind::Identifier => "<IDENTIFIER>",
            TokenKind::IntLiteral => "<INT_LITERAL>",
            TokenKind::CharLiteral => "<CHAR_LITERAL>",
            TokenKind::StringLiteral => "<STRING_LITERAL>",
            TokenKind::Abstract => "abstract",
            TokenKind::Boolean => "boolean",
            TokenKind::Char => "char",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::Extends => "extends",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::InstanceOf => "instanceof",
            TokenKind::Int => "int",
            TokenKind::New => "new",
            TokenKind::Null => "null",
            TokenKind::Package => "package",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::Public => "public",
            TokenKind::Return => "return",
            TokenKind::Static => "static",
            TokenKind::Super => "super",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::Assign => "=",
            TokenKind::PlusAssign => "+=",
            TokenKind::LogicalAnd => "&&",
            TokenKind::Equal => "==",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Div => "/",
            TokenKind::Mod => "%",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::LogicalNot => "!",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LCurly => "{",
            TokenKind::RCurly => "}",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
        }
    }

    /// Check if this kind is a declaration modifier
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Abstract
        )
    }

    /// Check if this kind is a basic type
    pub fn is_basic_type(&self) -> bool {
        matches!(self, TokenKind::Boolean | TokenKind::Char | TokenKind::Int)
    }

    /// Check if this kind is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.image())
    }
}

/// Lexical token with its verbatim source image and line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub image: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, image: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            image: image.into(),
            line,
        }
    }

    /// The token emitted once the input is exhausted.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, TokenKind::Eof.image(), line)
    }
}

fn kind_of(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Abstract => TokenKind::Abstract,
        RawToken::Boolean => TokenKind::Boolean,
        RawToken::Char => TokenKind::Char,
        RawToken::Class => TokenKind::Class,
        RawToken::Else => TokenKind::Else,
        RawToken::Extends => TokenKind::Extends,
        RawToken::False => TokenKind::False,
        RawToken::If => TokenKind::If,
        RawToken::Import => TokenKind::Import,
        RawToken::InstanceOf => TokenKind::InstanceOf,
        RawToken::Int => TokenKind::Int,
        RawToken::New => TokenKind::New,
        RawToken::Null => TokenKind::Null,
        RawToken::Package => TokenKind::Package,
        RawToken::Private => TokenKind::Private,
        RawToken::Protected => TokenKind::Protected,
        RawToken::Public => TokenKind::Public,
        RawToken::Return => TokenKind::Return,
        RawToken::Static => TokenKind::Static,
        RawToken::Super => TokenKind::Super,
        RawToken::This => TokenKind::This,
        RawToken::True => TokenKind::True,
        RawToken::Void => TokenKind::Void,
        RawToken::While => TokenKind::While,
        RawToken::Assign => TokenKind::Assign,
        RawToken::PlusAssign => TokenKind::PlusAssign,
        RawToken::LogicalAnd => TokenKind::LogicalAnd,
        RawToken::Equal => TokenKind::Equal,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Le => TokenKind::Le,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Div => TokenKind::Div,
        RawToken::Mod => TokenKind::Mod,
        RawToken::Inc => TokenKind::Inc,
        RawToken::Dec => TokenKind::Dec,
        RawToken::LogicalNot => TokenKind::LogicalNot,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LCurly => TokenKind::LCurly,
        RawToken::RCurly => TokenKind::RCurly,
        RawToken::LBrack => TokenKind::LBrack,
        RawToken::RBrack => TokenKind::RBrack,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::IntLiteral => TokenKind::IntLiteral,
        RawToken::CharLiteral => TokenKind::CharLiteral,
        RawToken::StringLiteral => TokenKind::StringLiteral,
        RawToken::Identifier => TokenKind::Identifier,
        RawToken::LineComment | RawToken::BlockComment | RawToken::Whitespace => {
            unreachable!("trivia is filtered before conversion")
        }
    }
}

/// Lexer for Jay source
pub struct Lexer<'a> {
    lexer: logos::Lexer<'a, RawToken>,
    current_line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: RawToken::lexer(source),
            current_line: 1,
        }
    }

    /// Get all tokens from the source, trivia filtered out, with a final
    /// `Eof` token appended.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(result) = self.lexer.next() {
            let slice = self.lexer.slice();
            let line = self.current_line;

            match result {
                Ok(raw) => {
                    self.update_position(slice);
                    if !matches!(
                        raw,
                        RawToken::Whitespace | RawToken::LineComment | RawToken::BlockComment
                    ) {
                        tokens.push(Token::new(kind_of(raw), slice, line));
                    }
                }
                Err(()) => {
                    let shown = if slice.is_empty() { "<unknown>" } else { slice };
                    return Err(Error::lexical(
                        line,
                        format!("Unexpected input '{}'", shown),
                    ));
                }
            }
        }

        tokens.push(Token::eof(self.current_line));
        Ok(tokens)
    }

    /// Update the current line based on the lexeme
    fn update_position(&mut self, lexeme: &str) {
        for ch in lexeme.chars() {
            if ch == '\n' {
                self.current_line += 1;
            }
        }
    }
}
