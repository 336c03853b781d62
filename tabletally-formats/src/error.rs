use serde::Serialize;

/// A validation problem on a single input line.
///
/// Row errors are data, not failures: the surrounding import still succeeds
/// and reports them alongside whatever rows did parse. Line numbers are
/// 1-based over the raw input, counting blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

impl RowError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Errors that abort a parse outright. Anything recoverable is reported as
/// a [`RowError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,

    #[error("line {line}: {message}")]
    Structural { line: usize, message: String },

    #[error("no valid rows in input ({} rows rejected)", errors.len())]
    NoValidRows { errors: Vec<RowError> },
}

impl ParseError {
    pub fn structural(line: usize, message: impl Into<String>) -> Self {
        Self::Structural {
            line,
            message: message.into(),
        }
    }
}
