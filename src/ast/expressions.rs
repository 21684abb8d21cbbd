use super::{
    ast::NodeKind,
    operators::{BinOp, BoolOp, CmpOp, UnaryOp},
    statements::{Arguments, Keyword},
};

// LITERALS

/// Numeric literal, kept as source text with `_` separators dropped, so that
/// big integers and float spellings survive unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(String),
    Float(String),
    Imaginary(String),
}

/// `True`, `False` and `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singleton {
    True,
    False,
    None,
}

/// The `!s`, `!r` and `!a` suffixes of a formatted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Str,
    Repr,
    Ascii,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
    },
    /// `target := value`
    NamedExpr {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Lambda {
        args: Box<Arguments>,
        body: Box<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    /// A `None` key marks a `**mapping` entry.
    Dict {
        keys: Vec<Option<Expr>>,
        values: Vec<Expr>,
    },
    Set {
        elts: Vec<Expr>,
    },
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    Await {
        value: Box<Expr>,
    },
    Yield {
        value: Option<Box<Expr>>,
    },
    YieldFrom {
        value: Box<Expr>,
    },
    /// `ops` and `comparators` always have the same length.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    Num(Number),
    Str(String),
    Bytes(String),
    NameConstant(Singleton),
    Ellipsis,
    FormattedValue {
        value: Box<Expr>,
        conversion: Option<Conversion>,
        format_spec: Option<Box<Expr>>,
    },
    JoinedStr {
        values: Vec<Expr>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Slice>,
    },
    Starred {
        value: Box<Expr>,
    },
    Name {
        id: String,
    },
    List {
        elts: Vec<Expr>,
    },
    Tuple {
        elts: Vec<Expr>,
    },
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::BoolOp { .. } => NodeKind::BoolOp,
            Expr::NamedExpr { .. } => NodeKind::NamedExpr,
            Expr::BinOp { .. } => NodeKind::BinOp,
            Expr::UnaryOp { .. } => NodeKind::UnaryOp,
            Expr::Lambda { .. } => NodeKind::Lambda,
            Expr::IfExp { .. } => NodeKind::IfExp,
            Expr::Dict { .. } => NodeKind::Dict,
            Expr::Set { .. } => NodeKind::Set,
            Expr::ListComp { .. } => NodeKind::ListComp,
            Expr::SetComp { .. } => NodeKind::SetComp,
            Expr::DictComp { .. } => NodeKind::DictComp,
            Expr::GeneratorExp { .. } => NodeKind::GeneratorExp,
            Expr::Await { .. } => NodeKind::Await,
            Expr::Yield { .. } => NodeKind::Yield,
            Expr::YieldFrom { .. } => NodeKind::YieldFrom,
            Expr::Compare { .. } => NodeKind::Compare,
            Expr::Call { .. } => NodeKind::Call,
            Expr::Num(_) => NodeKind::Num,
            Expr::Str(_) => NodeKind::Str,
            Expr::Bytes(_) => NodeKind::Bytes,
            Expr::NameConstant(_) => NodeKind::NameConstant,
            Expr::Ellipsis => NodeKind::Ellipsis,
            Expr::FormattedValue { .. } => NodeKind::FormattedValue,
            Expr::JoinedStr { .. } => NodeKind::JoinedStr,
            Expr::Attribute { .. } => NodeKind::Attribute,
            Expr::Subscript { .. } => NodeKind::Subscript,
            Expr::Starred { .. } => NodeKind::Starred,
            Expr::Name { .. } => NodeKind::Name,
            Expr::List { .. } => NodeKind::List,
            Expr::Tuple { .. } => NodeKind::Tuple,
        }
    }

    /// Shorthand used all over the parser and the tests.
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name { id: id.into() }
    }

    /// A short description of the expression for "cannot assign to ..." errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Expr::Num(_)
            | Expr::Str(_)
            | Expr::Bytes(_)
            | Expr::Ellipsis
            | Expr::JoinedStr { .. } => "literal",
            Expr::NameConstant(Singleton::True) => "True",
            Expr::NameConstant(Singleton::False) => "False",
            Expr::NameConstant(Singleton::None) => "None",
            Expr::Call { .. } => "function call",
            Expr::Compare { .. } => "comparison",
            Expr::BoolOp { .. } | Expr::BinOp { .. } | Expr::UnaryOp { .. } => "expression",
            Expr::Lambda { .. } => "lambda",
            Expr::IfExp { .. } => "conditional expression",
            Expr::Dict { .. } => "dict literal",
            Expr::Set { .. } => "set display",
            Expr::ListComp { .. } => "list comprehension",
            Expr::SetComp { .. } => "set comprehension",
            Expr::DictComp { .. } => "dict comprehension",
            Expr::GeneratorExp { .. } => "generator expression",
            Expr::Await { .. } => "await expression",
            Expr::Yield { .. } | Expr::YieldFrom { .. } => "yield expression",
            Expr::NamedExpr { .. } => "named expression",
            Expr::FormattedValue { .. } => "f-string expression",
            Expr::Attribute { .. } => "attribute",
            Expr::Subscript { .. } => "subscript",
            Expr::Starred { .. } => "starred",
            Expr::Name { .. } => "name",
            Expr::List { .. } => "list",
            Expr::Tuple { .. } => "tuple",
        }
    }
}

/// The part of a subscript between the brackets.
#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
    Slice {
        lower: Option<Expr>,
        upper: Option<Expr>,
        step: Option<Expr>,
    },
    /// Several comma-separated dimensions, at least one of which is a slice.
    ExtSlice {
        dims: Vec<Slice>,
    },
    Index {
        value: Expr,
    },
}

impl Slice {
    pub fn kind(&self) -> NodeKind {
        match self {
            Slice::Slice { .. } => NodeKind::Slice,
            Slice::ExtSlice { .. } => NodeKind::ExtSlice,
            Slice::Index { .. } => NodeKind::Index,
        }
    }
}

/// One `for ... in ... if ...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: bool,
}
