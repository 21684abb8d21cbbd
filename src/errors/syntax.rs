//! The acquisition boundary's error value and its spoken form.

use serde::{Deserialize, Serialize};

use super::errors::Error;

/// A failed parse, reduced to what a listener needs: the message and where it
/// happened. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        SyntaxError {
            message: message.into(),
            line,
            column,
        }
    }
}

impl From<&Error> for SyntaxError {
    fn from(error: &Error) -> Self {
        let position = error.get_position();
        SyntaxError {
            message: error.get_message(),
            line: position.line,
            column: position.column,
        }
    }
}

impl From<Error> for SyntaxError {
    fn from(error: Error) -> Self {
        SyntaxError::from(&error)
    }
}

/// Turns a syntax error into the one sentence spoken in place of a narration.
///
/// `include_line` is off when a single line is being explained, where the line
/// number carries no information.
pub fn format_syntax_error(error: &SyntaxError, include_line: bool) -> String {
    if include_line {
        format!(
            "Syntax Error: '{}' on line {}, column {}",
            error.message, error.line, error.column
        )
    } else {
        format!("Syntax Error: '{}' column {}", error.message, error.column)
    }
}
