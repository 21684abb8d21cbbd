//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens into a
//! `Module`. It uses a Pratt parser for expressions with Python's operator
//! precedence and handles:
//!
//! - Compound statements (functions, classes, control flow, decorators)
//! - Simple statements, several per line when separated by `;`
//! - Expressions, displays and comprehensions
//! - String literal decoding and f-strings
//! - Assignment target validation
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod strings;

#[cfg(test)]
mod tests;
