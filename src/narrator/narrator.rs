//! Entry points of the narrator and the outcome every phrase rule returns.

use tracing::debug;

use crate::ast::{
    ast::{Node, NodeKind},
    statements::Stmt,
};

use super::{
    expr::{
        alias_phrase, arg_phrase, arguments_phrase, comprehension_phrase,
        handler_phrase, keyword_phrase, narrate_expr, slice_phrase, with_item_phrase,
    },
    join::join,
    phrases::{bin_op_phrase, bool_op_phrase, cmp_op_phrase, unary_op_phrase},
    stmt::narrate_stmt,
};

/// Spoken in place of any construct that has no phrase rule.
pub const UNSUPPORTED_PHRASE: &str = "an unsupported construct";

/// What a phrase rule produced: text, or the kind it could not describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    Rendered(String),
    Unsupported(NodeKind),
}

impl Narration {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Narration::Unsupported(_))
    }

    /// Flattens the outcome to text, substituting the fallback phrase.
    pub fn into_text(self) -> String {
        match self {
            Narration::Rendered(text) => text,
            Narration::Unsupported(kind) => {
                debug!(%kind, "no phrase rule, using fallback");
                UNSUPPORTED_PHRASE.to_string()
            }
        }
    }
}

/// Renders a statement sequence as one list.
pub fn sequence_text(body: &[Stmt]) -> String {
    let items: Vec<String> = body.iter().map(|stmt| narrate_stmt(stmt).into_text()).collect();
    join(&items)
}

/// Speech engines treat a line break as the end of an utterance.
fn flatten_line_breaks(text: String) -> String {
    if !text.contains(&['\n', '\r'][..]) {
        return text;
    }

    text.replace("\r\n", " ").replace(&['\n', '\r'][..], " ")
}

fn dispatch(node: Node) -> Narration {
    match node {
        Node::Module(module) => Narration::Rendered(sequence_text(&module.body)),
        Node::Stmt(stmt) => narrate_stmt(stmt),
        Node::Expr(expr) => narrate_expr(expr),
        Node::Slice(slice) => Narration::Rendered(slice_phrase(slice)),
        Node::Comprehension(clause) => Narration::Rendered(comprehension_phrase(clause)),
        Node::ExceptHandler(handler) => Narration::Rendered(handler_phrase(handler)),
        Node::Arguments(args) => Narration::Rendered(arguments_phrase(args)),
        Node::Arg(arg) => Narration::Rendered(arg_phrase(arg)),
        Node::Keyword(keyword) => Narration::Rendered(keyword_phrase(keyword)),
        Node::Alias(alias) => Narration::Rendered(alias_phrase(alias)),
        Node::WithItem(item) => Narration::Rendered(with_item_phrase(item)),
        Node::BoolOp(op) => Narration::Rendered(bool_op_phrase(op).to_string()),
        Node::BinOp(op) => Narration::Rendered(bin_op_phrase(op).to_string()),
        Node::UnaryOp(op) => Narration::Rendered(unary_op_phrase(op).to_string()),
        Node::CmpOp(op) => Narration::Rendered(cmp_op_phrase(op).to_string()),
    }
}

/// Narrates `root` and reports whether the root itself had a phrase rule.
/// Unsupported constructs further down are already folded into the text.
pub fn narrate_outcome<'a>(root: impl Into<Node<'a>>) -> Narration {
    match dispatch(root.into()) {
        Narration::Rendered(text) => Narration::Rendered(flatten_line_breaks(text)),
        unsupported => unsupported,
    }
}

/// Narrates any node of the tree as a single line of spoken English.
///
/// ```
/// use narrator::{ast::expressions::Expr, narrator::narrate};
///
/// assert_eq!(narrate(&Expr::name("total")), "total");
/// ```
pub fn narrate<'a>(root: impl Into<Node<'a>>) -> String {
    narrate_outcome(root).into_text()
}

