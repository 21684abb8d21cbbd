use super::{ast::NodeKind, expressions::Expr, operators::BinOp};

/// A function definition, shared by `def` and `async def`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub args: Arguments,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub returns: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<Expr>,
    pub keywords: Vec<Keyword>,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
}

/// A `for` loop, shared by `for` and `async for`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Option<Vec<Stmt>>,
}

/// A `with` block, shared by `with` and `async with`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithBlock {
    pub items: Vec<WithItem>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryBlock {
    pub body: Vec<Stmt>,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Option<Vec<Stmt>>,
    pub finalbody: Option<Vec<Stmt>>,
}

/// Statements
///
/// Optional branches are `None` when absent from the source; the parser never
/// produces an empty `Some`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FunctionDef(FunctionDef),
    AsyncFunctionDef(FunctionDef),
    ClassDef(ClassDef),
    Return {
        value: Option<Expr>,
    },
    Delete {
        targets: Vec<Expr>,
    },
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AugAssign {
        target: Expr,
        op: BinOp,
        value: Expr,
    },
    AnnAssign {
        target: Expr,
        annotation: Expr,
        value: Option<Expr>,
        simple: bool,
    },
    For(ForLoop),
    AsyncFor(ForLoop),
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Option<Vec<Stmt>>,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Option<Vec<Stmt>>,
    },
    With(WithBlock),
    AsyncWith(WithBlock),
    Raise {
        exc: Option<Expr>,
        cause: Option<Expr>,
    },
    Try(TryBlock),
    Assert {
        test: Expr,
        msg: Option<Expr>,
    },
    Import {
        names: Vec<Alias>,
    },
    ImportFrom {
        module: Option<String>,
        names: Vec<Alias>,
        level: u32,
    },
    Global {
        names: Vec<String>,
    },
    Nonlocal {
        names: Vec<String>,
    },
    Expr {
        value: Expr,
    },
    /// `type Name = value`
    TypeAlias {
        name: Expr,
        value: Expr,
    },
    Pass,
    Break,
    Continue,
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::FunctionDef(_) => NodeKind::FunctionDef,
            Stmt::AsyncFunctionDef(_) => NodeKind::AsyncFunctionDef,
            Stmt::ClassDef(_) => NodeKind::ClassDef,
            Stmt::Return { .. } => NodeKind::Return,
            Stmt::Delete { .. } => NodeKind::Delete,
            Stmt::Assign { .. } => NodeKind::Assign,
            Stmt::AugAssign { .. } => NodeKind::AugAssign,
            Stmt::AnnAssign { .. } => NodeKind::AnnAssign,
            Stmt::For(_) => NodeKind::For,
            Stmt::AsyncFor(_) => NodeKind::AsyncFor,
            Stmt::While { .. } => NodeKind::While,
            Stmt::If { .. } => NodeKind::If,
            Stmt::With(_) => NodeKind::With,
            Stmt::AsyncWith(_) => NodeKind::AsyncWith,
            Stmt::Raise { .. } => NodeKind::Raise,
            Stmt::Try(_) => NodeKind::Try,
            Stmt::Assert { .. } => NodeKind::Assert,
            Stmt::Import { .. } => NodeKind::Import,
            Stmt::ImportFrom { .. } => NodeKind::ImportFrom,
            Stmt::Global { .. } => NodeKind::Global,
            Stmt::Nonlocal { .. } => NodeKind::Nonlocal,
            Stmt::Expr { .. } => NodeKind::Expr,
            Stmt::TypeAlias { .. } => NodeKind::TypeAlias,
            Stmt::Pass => NodeKind::Pass,
            Stmt::Break => NodeKind::Break,
            Stmt::Continue => NodeKind::Continue,
        }
    }

    /// Returns the text of a bare string-literal statement, the shape a
    /// docstring takes.
    pub fn as_docstring(&self) -> Option<&str> {
        match self {
            Stmt::Expr {
                value: Expr::Str(text),
            } => Some(text),
            _ => None,
        }
    }
}

/// The parameter list of a function or lambda.
///
/// `defaults` line up with the tail of `posonlyargs` followed by `args`;
/// `kw_defaults` has one slot per keyword-only argument.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    pub posonlyargs: Vec<Arg>,
    pub args: Vec<Arg>,
    pub vararg: Option<Arg>,
    pub kwonlyargs: Vec<Arg>,
    pub kw_defaults: Vec<Option<Expr>>,
    pub kwarg: Option<Arg>,
    pub defaults: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub arg: String,
    pub annotation: Option<Expr>,
}

/// A keyword argument in a call or class header; `arg` is `None` for `**value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithItem {
    pub context_expr: Expr,
    pub optional_vars: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptHandler {
    pub type_: Option<Expr>,
    pub name: Option<String>,
    pub body: Vec<Stmt>,
}
