//! Error types and error handling for the narrator.
//!
//! This module defines the errors raised while turning source text into a
//! tree, and the sentence spoken when that fails. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexer and the parser
//! - Helpful error messages and suggestions
//! - The `SyntaxError` boundary value and its spoken formatting

pub mod errors;
pub mod syntax;
