use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A front-end failure: what went wrong and where.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The sentence a user hears, in the wording CPython uses where one exists.
    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedTripleQuotedString => "UnterminatedTripleQuotedString",
            ErrorImpl::UnclosedBracket { .. } => "UnclosedBracket",
            ErrorImpl::UnmatchedBracket { .. } => "UnmatchedBracket",
            ErrorImpl::MismatchedBracket { .. } => "MismatchedBracket",
            ErrorImpl::UnexpectedIndent => "UnexpectedIndent",
            ErrorImpl::ExpectedIndentedBlock => "ExpectedIndentedBlock",
            ErrorImpl::InconsistentDedent => "InconsistentDedent",
            ErrorImpl::InvalidTarget { .. } => "InvalidTarget",
            ErrorImpl::InvalidFString { .. } => "InvalidFString",
            ErrorImpl::TooManyNestedParentheses => "TooManyNestedParentheses",
            ErrorImpl::TooManyIndentationLevels => "TooManyIndentationLevels",
            ErrorImpl::NestingTooDeep => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a colon or an operator?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "Close the string on the same line it was opened",
            )),
            ErrorImpl::UnterminatedTripleQuotedString => ErrorTip::Suggestion(String::from(
                "Add the closing three quotes of the docstring or block string",
            )),
            ErrorImpl::UnclosedBracket { bracket } => {
                ErrorTip::Suggestion(format!("Add the bracket that closes `{}`", bracket))
            }
            ErrorImpl::UnmatchedBracket { bracket } => {
                ErrorTip::Suggestion(format!("Remove the stray `{}`", bracket))
            }
            ErrorImpl::MismatchedBracket { closing, opening } => ErrorTip::Suggestion(format!(
                "`{}` cannot close `{}`",
                closing, opening
            )),
            ErrorImpl::UnexpectedIndent => ErrorTip::Suggestion(String::from(
                "This line is indented further than the block it belongs to",
            )),
            ErrorImpl::ExpectedIndentedBlock => ErrorTip::Suggestion(String::from(
                "Indent the body of the statement that ends with a colon",
            )),
            ErrorImpl::InconsistentDedent => ErrorTip::Suggestion(String::from(
                "Line the statement up with an enclosing block",
            )),
            ErrorImpl::InvalidTarget { target } => {
                ErrorTip::Suggestion(format!("A {} cannot be assigned to", target))
            }
            ErrorImpl::InvalidFString { .. } => ErrorTip::None,
            ErrorImpl::TooManyNestedParentheses => ErrorTip::Suggestion(String::from(
                "Move part of the expression into a variable",
            )),
            ErrorImpl::TooManyIndentationLevels => ErrorTip::Suggestion(String::from(
                "Move the innermost blocks into a function",
            )),
            ErrorImpl::NestingTooDeep => ErrorTip::Suggestion(String::from(
                "Split the expression into smaller ones",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("invalid character '{token}'")]
    UnrecognisedToken { token: String },
    #[error("invalid syntax")]
    UnexpectedToken { token: String },
    #[error("{message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated triple-quoted string literal")]
    UnterminatedTripleQuotedString,
    #[error("'{bracket}' was never closed")]
    UnclosedBracket { bracket: char },
    #[error("unmatched '{bracket}'")]
    UnmatchedBracket { bracket: char },
    #[error("closing parenthesis '{closing}' does not match opening parenthesis '{opening}'")]
    MismatchedBracket { closing: char, opening: char },
    #[error("unexpected indent")]
    UnexpectedIndent,
    #[error("expected an indented block")]
    ExpectedIndentedBlock,
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
    #[error("cannot assign to {target}")]
    InvalidTarget { target: String },
    #[error("f-string: {message}")]
    InvalidFString { message: String },
    #[error("too many nested parentheses")]
    TooManyNestedParentheses,
    #[error("too many levels of indentation")]
    TooManyIndentationLevels,
    #[error("expression is too deeply nested")]
    NestingTooDeep,
}
