use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A line that is neither blank, a comment, a section header, nor a `key = value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error on line {line}: {text:?}")]
pub struct SyntaxError {
    line: usize,
    text: String,
}

impl SyntaxError {
    #[must_use]
    pub(crate) fn new(line: usize, text: String) -> Self {
        Self { line, text }
    }

    /// The 1-indexed line number within the full input.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The offending line exactly as it appeared in the input (without its terminator).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read data: {0}")]
    Read(#[from] io::Error),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl LoadError {
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Open { .. } | Self::Read(_) => None,
        }
    }
}
