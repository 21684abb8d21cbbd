/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the narrator walks
///
/// Submodules:
/// - ast: the module root, node kinds and the borrowed `Node` view
/// - expressions: expression kinds, slices and comprehension clauses
/// - statements: statement kinds and their auxiliary nodes
/// - operators: boolean, binary, unary and comparison operators
pub mod ast;
pub mod expressions;
pub mod operators;
pub mod statements;
