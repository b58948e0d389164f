use thiserror::Error;

/// Result type for jayc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the jayc front end
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexical error at line {line}: {message}")]
    Lexical { line: usize, message: String },

    #[error("{count} syntax error(s) in {file}")]
    Syntax { file: String, count: usize },
}

impl Error {
    /// Create a lexical error with line information
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            message: message.into(),
        }
    }

    /// Create a syntax summary error for a file
    pub fn syntax(file: impl Into<String>, count: usize) -> Self {
        Self::Syntax {
            file: file.into(),
            count,
        }
    }
}
