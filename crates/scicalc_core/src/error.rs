use std::fmt;
use thiserror::Error;

/// Messages at or above this length are replaced by a generic marker.
pub const MAX_DISPLAY_MESSAGE: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenIssue {
    MissingClosing,
    ExtraClosing,
}

impl fmt::Display for ParenIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParenIssue::MissingClosing => write!(f, "missing closing parenthesis"),
            ParenIssue::ExtraClosing => write!(f, "extra closing parenthesis"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{0}")]
    UnmatchedParen(ParenIssue),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("domain error: {0}")]
    Domain(String),

    #[error("dimension mismatch: {0}")]
    Dimension(String),

    #[error("matrix has no inverse")]
    Singular,

    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

impl CalcError {
    /// Text shown in place of a result.
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        if message.chars().count() < MAX_DISPLAY_MESSAGE {
            format!("Error: {message}")
        } else {
            "Error".to_string()
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::{CalcError, ParenIssue};

    #[test]
    fn short_messages_are_surfaced() {
        let err = CalcError::UnmatchedParen(ParenIssue::MissingClosing);
        assert_eq!(err.display_message(), "Error: missing closing parenthesis");
    }

    #[test]
    fn long_messages_collapse_to_generic_marker() {
        let err = CalcError::UnknownIdentifier("a".repeat(80));
        assert_eq!(err.display_message(), "Error");
    }
}
