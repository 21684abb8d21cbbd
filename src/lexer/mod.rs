//! Lexical analysis of Python source.
//!
//! This module contains the lexer that converts source text into a stream of
//! tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of regex patterns
//! - Keywords, identifiers, numbers, strings and operators
//! - Indentation, which becomes Indent and Dedent tokens
//! - Bracket balancing and implicit line joining
//! - Token positions (line and column) for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
