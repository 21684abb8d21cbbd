//! Narrator module: turns a syntax tree into spoken English.
//!
//! Submodules:
//! - narrator: entry points, the `Narration` outcome and the node dispatch
//! - stmt: phrase rules for statements
//! - expr: phrase rules for expressions and auxiliary nodes
//! - phrases: spoken forms of operators
//! - join: grammatical list joining

pub mod expr;
pub mod join;
pub mod narrator;
pub mod phrases;
pub mod stmt;

pub use narrator::{narrate, narrate_outcome, Narration, UNSUPPORTED_PHRASE};
