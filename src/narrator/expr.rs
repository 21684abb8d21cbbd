use crate::ast::{
    expressions::{Comprehension, Conversion, Expr, Number, Singleton, Slice},
    operators::CmpOp,
    statements::{Alias, Arg, Arguments, ExceptHandler, Keyword, WithItem},
};

use super::{
    join::join,
    narrator::{sequence_text, Narration},
    phrases::{bin_op_phrase, bool_op_phrase, cmp_op_phrase, unary_op_phrase},
};

pub fn expr_text(expr: &Expr) -> String {
    narrate_expr(expr).into_text()
}

pub fn exprs_text(exprs: &[Expr]) -> String {
    let items: Vec<String> = exprs.iter().map(expr_text).collect();
    join(&items)
}

fn literal_text(parts: &[Expr]) -> Option<String> {
    parts
        .iter()
        .map(|part| match part {
            Expr::Str(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn collection_phrase(kind: &str, elts: &[Expr]) -> String {
    if elts.is_empty() {
        format!("an empty {}", kind)
    } else {
        format!("a {} of {}", kind, exprs_text(elts))
    }
}

fn comprehensions_text(generators: &[Comprehension]) -> String {
    let items: Vec<String> = generators.iter().map(comprehension_phrase).collect();
    join(&items)
}

fn conversion_phrase(conversion: Conversion) -> &'static str {
    match conversion {
        Conversion::Str => "str",
        Conversion::Repr => "repr",
        Conversion::Ascii => "ascii",
    }
}

/// One clause of a comprehension: its loop and its guards.
pub fn comprehension_phrase(clause: &Comprehension) -> String {
    let mut phrase = format!(
        "{}using {} as an iterator, looping through {}",
        if clause.is_async { "asynchronously " } else { "" },
        expr_text(&clause.target),
        expr_text(&clause.iter)
    );

    if !clause.ifs.is_empty() {
        phrase.push_str(&format!(", with guards of {}", exprs_text(&clause.ifs)));
    }

    phrase
}

pub fn slice_phrase(slice: &Slice) -> String {
    match slice {
        Slice::Index { value } => format!("index {}", expr_text(value)),
        Slice::Slice { lower, upper, step } => {
            let lower = match lower {
                Some(lower) => format!("from {}", expr_text(lower)),
                None => String::from("from the start"),
            };
            let upper = match upper {
                Some(upper) => format!("to {}", expr_text(upper)),
                None => String::from("to the end"),
            };

            match step {
                Some(step) => format!("{} {}, stepping by {}", lower, upper, expr_text(step)),
                None => format!("{} {}", lower, upper),
            }
        }
        Slice::ExtSlice { dims } => {
            let items: Vec<String> = dims.iter().map(slice_phrase).collect();
            join(&items)
        }
    }
}

pub fn arg_phrase(arg: &Arg) -> String {
    match &arg.annotation {
        Some(annotation) => format!("{} of type {}", arg.arg, expr_text(annotation)),
        None => arg.arg.clone(),
    }
}

fn with_default(phrase: String, default: Option<&Expr>) -> String {
    match default {
        Some(default) => format!("{} defaulting to {}", phrase, expr_text(default)),
        None => phrase,
    }
}

/// Every parameter in declaration order, each with its default.
fn parameter_phrases(args: &Arguments) -> Vec<String> {
    let positional: Vec<&Arg> = args.posonlyargs.iter().chain(args.args.iter()).collect();
    let first_default = positional.len().saturating_sub(args.defaults.len());
    let mut phrases = vec![];

    for (index, arg) in positional.into_iter().enumerate() {
        let default = index
            .checked_sub(first_default)
            .and_then(|offset| args.defaults.get(offset));
        phrases.push(with_default(arg_phrase(arg), default));
    }

    if let Some(vararg) = &args.vararg {
        phrases.push(format!(
            "extra positional arguments collected in {}",
            arg_phrase(vararg)
        ));
    }

    for (index, arg) in args.kwonlyargs.iter().enumerate() {
        let default = args.kw_defaults.get(index).and_then(Option::as_ref);
        phrases.push(with_default(format!("keyword-only {}", arg_phrase(arg)), default));
    }

    if let Some(kwarg) = &args.kwarg {
        phrases.push(format!(
            "extra keyword arguments collected in {}",
            arg_phrase(kwarg)
        ));
    }

    phrases
}

/// "no arguments", "1 argument: x", "2 arguments: x and y".
pub fn arguments_phrase(args: &Arguments) -> String {
    let phrases = parameter_phrases(args);

    match phrases.len() {
        0 => String::from("no arguments"),
        1 => format!("1 argument: {}", phrases[0]),
        count => format!("{} arguments: {}", count, join(&phrases)),
    }
}

pub fn keyword_phrase(keyword: &Keyword) -> String {
    match &keyword.arg {
        Some(arg) => format!("{} set to {}", arg, expr_text(&keyword.value)),
        None => format!("the keyword arguments in {}", expr_text(&keyword.value)),
    }
}

pub fn keywords_text(keywords: &[Keyword]) -> String {
    let items: Vec<String> = keywords.iter().map(keyword_phrase).collect();
    join(&items)
}

pub fn alias_phrase(alias: &Alias) -> String {
    let name = if alias.name == "*" {
        "everything"
    } else {
        alias.name.as_str()
    };

    match &alias.asname {
        Some(asname) => format!("{} as {}", name, asname),
        None => name.to_string(),
    }
}

pub fn with_item_phrase(item: &WithItem) -> String {
    match &item.optional_vars {
        Some(vars) => format!("{} as {}", expr_text(&item.context_expr), expr_text(vars)),
        None => expr_text(&item.context_expr),
    }
}

pub fn handler_phrase(handler: &ExceptHandler) -> String {
    let caught = match (&handler.type_, &handler.name) {
        (Some(type_), Some(name)) => format!("a handler for {} as {}", expr_text(type_), name),
        (Some(type_), None) => format!("a handler for {}", expr_text(type_)),
        (None, _) => String::from("a handler for any exception"),
    };

    if handler.body.is_empty() {
        format!("{}, with an empty body", caught)
    } else {
        format!("{}, with a body of {}", caught, sequence_text(&handler.body))
    }
}

fn call_phrase(func: &Expr, args: &[Expr], keywords: &[Keyword]) -> String {
    let mut items: Vec<String> = args.iter().map(expr_text).collect();
    items.extend(keywords.iter().map(keyword_phrase));

    if items.is_empty() {
        format!("{} called with no arguments", expr_text(func))
    } else {
        format!("{} called with {}", expr_text(func), join(&items))
    }
}

fn compare_phrase(left: &Expr, ops: &[CmpOp], comparators: &[Expr]) -> String {
    let mut phrase = expr_text(left);

    for (index, (op, comparator)) in ops.iter().zip(comparators).enumerate() {
        let separator = if index == 0 { " " } else { ", which " };
        phrase.push_str(separator);
        phrase.push_str(cmp_op_phrase(*op));
        phrase.push(' ');
        phrase.push_str(&expr_text(comparator));
    }

    phrase
}

fn dict_phrase(keys: &[Option<Expr>], values: &[Expr]) -> String {
    if values.is_empty() {
        return String::from("an empty dictionary");
    }

    let entries: Vec<String> = keys
        .iter()
        .zip(values)
        .map(|(key, value)| match key {
            Some(key) => format!("{} mapped to {}", expr_text(key), expr_text(value)),
            None => format!("the unpacked contents of {}", expr_text(value)),
        })
        .collect();

    format!("a dictionary of {}", join(&entries))
}

fn formatted_value_phrase(
    value: &Expr,
    conversion: Option<Conversion>,
    format_spec: Option<&Expr>,
) -> String {
    let mut phrase = format!("the value of {}", expr_text(value));

    if let Some(conversion) = conversion {
        phrase.push_str(&format!(" converted with {}", conversion_phrase(conversion)));
    }

    if let Some(spec) = format_spec {
        // A spec without nested fields reads best as its literal text.
        let spec = match spec {
            Expr::JoinedStr { values } => literal_text(values).unwrap_or_else(|| expr_text(spec)),
            other => expr_text(other),
        };
        // `f"{x:}"` carries an empty spec.
        if !spec.is_empty() {
            phrase.push_str(&format!(" formatted as {}", spec));
        }
    }

    phrase
}

fn number_phrase(number: &Number) -> String {
    match number {
        Number::Int(text) | Number::Float(text) => text.clone(),
        Number::Imaginary(text) => format!("the imaginary number {}", text),
    }
}

pub fn narrate_expr(expr: &Expr) -> Narration {
    let text = match expr {
        Expr::BoolOp { op, values } => {
            let separator = format!(" {} ", bool_op_phrase(*op));
            values.iter().map(expr_text).collect::<Vec<_>>().join(&separator)
        }
        Expr::NamedExpr { .. } => return Narration::Unsupported(expr.kind()),
        Expr::BinOp { left, op, right } => format!(
            "{} {} {}",
            expr_text(left),
            bin_op_phrase(*op),
            expr_text(right)
        ),
        Expr::UnaryOp { op, operand } => {
            format!("{} {}", unary_op_phrase(*op), expr_text(operand))
        }
        Expr::Lambda { args, body } => format!(
            "an anonymous function taking {}, and returning {}",
            arguments_phrase(args),
            expr_text(body)
        ),
        Expr::IfExp { test, body, orelse } => format!(
            "if {} then {}, otherwise {}",
            expr_text(test),
            expr_text(body),
            expr_text(orelse)
        ),
        Expr::Dict { keys, values } => dict_phrase(keys, values),
        Expr::Set { elts } => collection_phrase("set", elts),
        Expr::ListComp { elt, generators } => format!(
            "a list comprehension of {}, {}",
            expr_text(elt),
            comprehensions_text(generators)
        ),
        Expr::SetComp { elt, generators } => format!(
            "a set comprehension of {}, {}",
            expr_text(elt),
            comprehensions_text(generators)
        ),
        Expr::DictComp {
            key,
            value,
            generators,
        } => format!(
            "a dictionary comprehension of {} mapped to {}, {}",
            expr_text(key),
            expr_text(value),
            comprehensions_text(generators)
        ),
        Expr::GeneratorExp { elt, generators } => format!(
            "a generator expression of {}, {}",
            expr_text(elt),
            comprehensions_text(generators)
        ),
        Expr::Await { value } => format!("await {}", expr_text(value)),
        Expr::Yield { value } => match value {
            Some(value) => format!("yield {}", expr_text(value)),
            None => String::from("yield"),
        },
        Expr::YieldFrom { value } => format!("yield from {}", expr_text(value)),
        Expr::Compare {
            left,
            ops,
            comparators,
        } => compare_phrase(left, ops, comparators),
        Expr::Call {
            func,
            args,
            keywords,
        } => call_phrase(func, args, keywords),
        Expr::Num(number) => number_phrase(number),
        Expr::Str(text) => format!("the string {}", text),
        Expr::Bytes(text) => format!("the bytes {}", text),
        Expr::NameConstant(Singleton::True) => String::from("true"),
        Expr::NameConstant(Singleton::False) => String::from("false"),
        Expr::NameConstant(Singleton::None) => String::from("none"),
        Expr::Ellipsis => String::from("ellipsis"),
        Expr::FormattedValue {
            value,
            conversion,
            format_spec,
        } => formatted_value_phrase(value, *conversion, format_spec.as_deref()),
        Expr::JoinedStr { values } => {
            if values.is_empty() {
                String::from("an empty formatted string")
            } else {
                format!("a formatted string of {}", exprs_text(values))
            }
        }
        Expr::Attribute { value, attr } => {
            format!("the attribute {} of {}", attr, expr_text(value))
        }
        Expr::Subscript { value, slice } => match &**slice {
            Slice::Index { .. } => {
                format!("the item at {} of {}", slice_phrase(slice), expr_text(value))
            }
            _ => format!("the slice {} of {}", slice_phrase(slice), expr_text(value)),
        },
        Expr::Starred { value } => format!("the unpacked {}", expr_text(value)),
        Expr::Name { id } => id.clone(),
        Expr::List { elts } => collection_phrase("list", elts),
        Expr::Tuple { elts } => collection_phrase("tuple", elts),
    };

    Narration::Rendered(text)
}
