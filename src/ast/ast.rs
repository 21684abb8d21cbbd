use std::fmt::Display;

use super::{
    expressions::{Comprehension, Expr, Slice},
    operators::{BinOp, BoolOp, CmpOp, UnaryOp},
    statements::{Alias, Arg, Arguments, ExceptHandler, Keyword, Stmt, WithItem},
};

/// The root of a parsed source file: its top-level statements in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// Node Kinds
///
/// One tag per grammar production. Used to name constructs that have no
/// phrase rule, and in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,

    // Statements
    FunctionDef,
    AsyncFunctionDef,
    ClassDef,
    Return,
    Delete,
    Assign,
    AugAssign,
    AnnAssign,
    For,
    AsyncFor,
    While,
    If,
    With,
    AsyncWith,
    Raise,
    Try,
    Assert,
    Import,
    ImportFrom,
    Global,
    Nonlocal,
    Expr,
    TypeAlias,
    Pass,
    Break,
    Continue,

    // Expressions
    BoolOp,
    NamedExpr,
    BinOp,
    UnaryOp,
    Lambda,
    IfExp,
    Dict,
    Set,
    ListComp,
    SetComp,
    DictComp,
    GeneratorExp,
    Await,
    Yield,
    YieldFrom,
    Compare,
    Call,
    Num,
    Str,
    Bytes,
    NameConstant,
    Ellipsis,
    FormattedValue,
    JoinedStr,
    Attribute,
    Subscript,
    Starred,
    Name,
    List,
    Tuple,

    // Auxiliary
    Slice,
    ExtSlice,
    Index,
    Comprehension,
    ExceptHandler,
    Arguments,
    Arg,
    Keyword,
    Alias,
    WithItem,
    BoolOperator,
    BinaryOperator,
    UnaryOperator,
    ComparisonOperator,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A borrowed view of any node in the tree, so that narration can start from
/// a whole module or from any sub-tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Module(&'a Module),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Slice(&'a Slice),
    Comprehension(&'a Comprehension),
    ExceptHandler(&'a ExceptHandler),
    Arguments(&'a Arguments),
    Arg(&'a Arg),
    Keyword(&'a Keyword),
    Alias(&'a Alias),
    WithItem(&'a WithItem),
    BoolOp(BoolOp),
    BinOp(BinOp),
    UnaryOp(UnaryOp),
    CmpOp(CmpOp),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Module(_) => NodeKind::Module,
            Node::Stmt(stmt) => stmt.kind(),
            Node::Expr(expr) => expr.kind(),
            Node::Slice(slice) => slice.kind(),
            Node::Comprehension(_) => NodeKind::Comprehension,
            Node::ExceptHandler(_) => NodeKind::ExceptHandler,
            Node::Arguments(_) => NodeKind::Arguments,
            Node::Arg(_) => NodeKind::Arg,
            Node::Keyword(_) => NodeKind::Keyword,
            Node::Alias(_) => NodeKind::Alias,
            Node::WithItem(_) => NodeKind::WithItem,
            Node::BoolOp(_) => NodeKind::BoolOperator,
            Node::BinOp(_) => NodeKind::BinaryOperator,
            Node::UnaryOp(_) => NodeKind::UnaryOperator,
            Node::CmpOp(_) => NodeKind::ComparisonOperator,
        }
    }
}

macro_rules! node_from_ref {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Node<'a> {
                fn from(value: &'a $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

macro_rules! node_from_op {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node<'_> {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

node_from_ref! {
    Module => Module,
    Stmt => Stmt,
    Expr => Expr,
    Slice => Slice,
    Comprehension => Comprehension,
    ExceptHandler => ExceptHandler,
    Arguments => Arguments,
    Arg => Arg,
    Keyword => Keyword,
    Alias => Alias,
    WithItem => WithItem,
}

node_from_op! {
    BoolOp => BoolOp,
    BinOp => BinOp,
    UnaryOp => UnaryOp,
    CmpOp => CmpOp,
}
