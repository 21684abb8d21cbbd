use crate::ast::{
    expressions::Expr,
    statements::{Alias, ClassDef, ForLoop, FunctionDef, Stmt, TryBlock, WithBlock},
};

use super::{
    expr::{
        alias_phrase, arguments_phrase, expr_text, exprs_text, handler_phrase, keywords_text,
        narrate_expr, with_item_phrase,
    },
    join::join,
    narrator::{sequence_text, Narration},
    phrases::bin_op_phrase,
};

const SYNC: &str = "a";
const ASYNC: &str = "an async";

/// Separates a leading docstring from the rest of a body.
fn split_docstring(body: &[Stmt]) -> (Option<&str>, &[Stmt]) {
    match body.split_first() {
        Some((first, rest)) => match first.as_docstring() {
            Some(docstring) => (Some(docstring), rest),
            None => (None, body),
        },
        None => (None, body),
    }
}

fn body_clause(body: &[Stmt]) -> String {
    if body.is_empty() {
        String::from("with an empty body")
    } else {
        format!("with a body of {}", sequence_text(body))
    }
}

/// Absent and empty branches both read as no branch at all.
fn branch_clause(label: &str, branch: &Option<Vec<Stmt>>) -> Option<String> {
    match branch {
        Some(body) if !body.is_empty() => Some(format!("{} {}", label, sequence_text(body))),
        _ => None,
    }
}

fn decorators_clause(decorators: &[Expr]) -> Option<String> {
    if decorators.is_empty() {
        None
    } else {
        Some(format!(", decorated with {}", exprs_text(decorators)))
    }
}

fn function_phrase(article: &str, function: &FunctionDef) -> String {
    let (docstring, body) = split_docstring(&function.body);
    let mut phrase = format!("{} function called {}", article, function.name);

    if let Some(decorators) = decorators_clause(&function.decorator_list) {
        phrase.push_str(&decorators);
    }
    if let Some(docstring) = docstring {
        phrase.push_str(&format!(", documented as {}", docstring));
    }

    phrase.push_str(&format!(", which has {}", arguments_phrase(&function.args)));

    if let Some(returns) = &function.returns {
        phrase.push_str(&format!(", and returns a value of type {}", expr_text(returns)));
    }

    format!("{}, {}", phrase, body_clause(body))
}

fn class_phrase(class: &ClassDef) -> String {
    let (docstring, body) = split_docstring(&class.body);
    let mut phrase = format!("a class called {}", class.name);

    if let Some(decorators) = decorators_clause(&class.decorator_list) {
        phrase.push_str(&decorators);
    }
    if !class.bases.is_empty() {
        phrase.push_str(&format!(", which extends {}", exprs_text(&class.bases)));
    }
    if !class.keywords.is_empty() {
        phrase.push_str(&format!(", with {}", keywords_text(&class.keywords)));
    }
    if let Some(docstring) = docstring {
        phrase.push_str(&format!(", documented as {}", docstring));
    }

    if body.is_empty() {
        format!("{}, with an empty body", phrase)
    } else {
        format!("{}, and defines {}", phrase, sequence_text(body))
    }
}

fn for_phrase(article: &str, for_loop: &ForLoop) -> String {
    let mut phrase = format!(
        "{} for loop, using {} as an iterator, looping through {}, {}",
        article,
        expr_text(&for_loop.target),
        expr_text(&for_loop.iter),
        body_clause(&for_loop.body)
    );

    if let Some(orelse) = branch_clause(", and an else branch of", &for_loop.orelse) {
        phrase.push_str(&orelse);
    }

    phrase
}

fn with_phrase(article: &str, block: &WithBlock) -> String {
    let items: Vec<String> = block.items.iter().map(with_item_phrase).collect();

    format!(
        "{} with block, using {}, {}",
        article,
        join(&items),
        body_clause(&block.body)
    )
}

fn try_phrase(block: &TryBlock) -> String {
    let mut phrase = format!("a try block, {}", body_clause(&block.body));

    if !block.handlers.is_empty() {
        let handlers: Vec<String> = block.handlers.iter().map(handler_phrase).collect();
        phrase.push_str(&format!(", handling exceptions with {}", join(&handlers)));
    }
    if let Some(orelse) = branch_clause(", with an else branch of", &block.orelse) {
        phrase.push_str(&orelse);
    }
    if let Some(finalbody) = branch_clause(", and a final body of", &block.finalbody) {
        phrase.push_str(&finalbody);
    }

    phrase
}

fn import_from_phrase(module: &Option<String>, names: &[Alias], level: u32) -> String {
    let source = match (level, module) {
        (0, Some(module)) => module.clone(),
        (0 | 1, None) => String::from("the current package"),
        (1, Some(module)) => format!("the relative module {}", module),
        (level, Some(module)) => format!("the relative module {}, {} levels up", module, level),
        (level, None) => format!("the package {} levels up", level),
    };
    let names: Vec<String> = names.iter().map(alias_phrase).collect();

    format!("an import from {} of {}", source, join(&names))
}

fn scope_phrase(scope: &str, names: &[String]) -> String {
    format!("a {} declaration of {}", scope, join(names))
}

pub fn narrate_stmt(stmt: &Stmt) -> Narration {
    let text = match stmt {
        Stmt::FunctionDef(function) => function_phrase(SYNC, function),
        Stmt::AsyncFunctionDef(function) => function_phrase(ASYNC, function),
        Stmt::ClassDef(class) => class_phrase(class),
        Stmt::Return { value } => match value {
            Some(value) => format!("a return statement returning {}", expr_text(value)),
            None => String::from("a return statement"),
        },
        Stmt::Delete { targets } => {
            format!("a delete statement, deleting {}", exprs_text(targets))
        }
        Stmt::Assign { targets, value } => format!(
            "an assignment of {} to {}",
            expr_text(value),
            exprs_text(targets)
        ),
        Stmt::AugAssign { target, op, value } => format!(
            "an augmented assignment, updating {} to itself {} {}",
            expr_text(target),
            bin_op_phrase(*op),
            expr_text(value)
        ),
        Stmt::AnnAssign {
            target,
            annotation,
            value,
            ..
        } => match value {
            Some(value) => format!(
                "an annotated assignment of {} to {} of type {}",
                expr_text(value),
                expr_text(target),
                expr_text(annotation)
            ),
            None => format!(
                "an annotation of {} as type {}",
                expr_text(target),
                expr_text(annotation)
            ),
        },
        Stmt::For(for_loop) => for_phrase(SYNC, for_loop),
        Stmt::AsyncFor(for_loop) => for_phrase(ASYNC, for_loop),
        Stmt::While { test, body, orelse } => {
            let mut phrase = format!(
                "a while loop, using {} as the test, {}",
                expr_text(test),
                body_clause(body)
            );
            if let Some(orelse) = branch_clause(", and an else branch of", orelse) {
                phrase.push_str(&orelse);
            }
            phrase
        }
        Stmt::If { test, body, orelse } => {
            let mut phrase = if body.is_empty() {
                format!(
                    "an if block, using {} as the test, with an empty true branch",
                    expr_text(test)
                )
            } else {
                format!(
                    "an if block, using {} as the test, with a true branch of {}",
                    expr_text(test),
                    sequence_text(body)
                )
            };
            if let Some(orelse) = branch_clause(", and a false branch of", orelse) {
                phrase.push_str(&orelse);
            }
            phrase
        }
        Stmt::With(block) => with_phrase(SYNC, block),
        Stmt::AsyncWith(block) => with_phrase(ASYNC, block),
        Stmt::Raise { exc, cause } => {
            let mut phrase = String::from("a raise statement");
            if let Some(exc) = exc {
                phrase.push_str(&format!(", raising {}", expr_text(exc)));
            }
            if let Some(cause) = cause {
                phrase.push_str(&format!(", with a cause of {}", expr_text(cause)));
            }
            phrase
        }
        Stmt::Try(block) => try_phrase(block),
        Stmt::Assert { test, msg } => match msg {
            Some(msg) => format!(
                "an assertion that {}, with the message {}",
                expr_text(test),
                expr_text(msg)
            ),
            None => format!("an assertion that {}", expr_text(test)),
        },
        Stmt::Import { names } => {
            let names: Vec<String> = names.iter().map(alias_phrase).collect();
            format!("an import of {}", join(&names))
        }
        Stmt::ImportFrom {
            module,
            names,
            level,
        } => import_from_phrase(module, names, *level),
        Stmt::Global { names } => scope_phrase("global", names),
        Stmt::Nonlocal { names } => scope_phrase("nonlocal", names),
        Stmt::Expr { value } => return narrate_expr(value),
        Stmt::TypeAlias { .. } => return Narration::Unsupported(stmt.kind()),
        Stmt::Pass => String::from("a pass statement"),
        Stmt::Break => String::from("a break statement"),
        Stmt::Continue => String::from("a continue statement"),
    };

    Narration::Rendered(text)
}
