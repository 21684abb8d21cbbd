//! Unit tests for the parser module.
//!
//! This module contains tests for parsing Python constructs including:
//! - Assignments of every shape
//! - Operator precedence and comparison chains
//! - Displays, comprehensions, slices and calls
//! - String literals and f-strings
//! - Compound statements and decorators
//! - Syntax errors and their positions

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::Module,
        expressions::{Conversion, Expr, Number, Singleton, Slice},
        operators::{BinOp, BoolOp, CmpOp, UnaryOp},
        statements::{Alias, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Module {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string())).unwrap();
    parse(tokens, Rc::new("test.py".to_string())).unwrap()
}

fn parse_error(source: &str) -> Error {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string())).unwrap();
    parse(tokens, Rc::new("test.py".to_string())).unwrap_err()
}

fn first_stmt(source: &str) -> Stmt {
    parse_source(source).body.remove(0)
}

fn expr(source: &str) -> Expr {
    match first_stmt(source) {
        Stmt::Expr { value } => value,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn name(id: &str) -> Expr {
    Expr::name(id)
}

fn int(text: &str) -> Expr {
    Expr::Num(Number::Int(text.to_string()))
}

#[test]
fn test_parse_assignment() {
    assert_eq!(
        first_stmt("x = 42"),
        Stmt::Assign {
            targets: vec![name("x")],
            value: int("42"),
        }
    );
}

#[test]
fn test_parse_chained_assignment() {
    match first_stmt("a = b = 1\n") {
        Stmt::Assign { targets, value } => {
            assert_eq!(targets, vec![name("a"), name("b")]);
            assert_eq!(value, int("1"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_starred_unpacking() {
    match first_stmt("a, *b = c\n") {
        Stmt::Assign { targets, .. } => assert_eq!(
            targets[0],
            Expr::Tuple {
                elts: vec![
                    name("a"),
                    Expr::Starred {
                        value: Box::new(name("b"))
                    }
                ]
            }
        ),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_augmented_and_annotated_assignment() {
    assert_eq!(
        first_stmt("x += 1\n"),
        Stmt::AugAssign {
            target: name("x"),
            op: BinOp::Add,
            value: int("1"),
        }
    );

    assert_eq!(
        first_stmt("x: int = 5\n"),
        Stmt::AnnAssign {
            target: name("x"),
            annotation: name("int"),
            value: Some(int("5")),
            simple: true,
        }
    );

    match first_stmt("self.x: int\n") {
        Stmt::AnnAssign { simple, value, .. } => {
            assert!(!simple);
            assert!(value.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    assert_eq!(
        expr("1 + 2 * 3"),
        Expr::BinOp {
            left: Box::new(int("1")),
            op: BinOp::Add,
            right: Box::new(Expr::BinOp {
                left: Box::new(int("2")),
                op: BinOp::Mult,
                right: Box::new(int("3")),
            }),
        }
    );
}

#[test]
fn test_parse_power_is_right_associative() {
    assert_eq!(
        expr("2 ** 3 ** 4"),
        Expr::BinOp {
            left: Box::new(int("2")),
            op: BinOp::Pow,
            right: Box::new(Expr::BinOp {
                left: Box::new(int("3")),
                op: BinOp::Pow,
                right: Box::new(int("4")),
            }),
        }
    );
}

#[test]
fn test_parse_unary_minus_binds_looser_than_power() {
    assert_eq!(
        expr("-x ** 2"),
        Expr::UnaryOp {
            op: UnaryOp::USub,
            operand: Box::new(Expr::BinOp {
                left: Box::new(name("x")),
                op: BinOp::Pow,
                right: Box::new(int("2")),
            }),
        }
    );
}

#[test]
fn test_parse_comparison_chain() {
    assert_eq!(
        expr("a < b <= c"),
        Expr::Compare {
            left: Box::new(name("a")),
            ops: vec![CmpOp::Lt, CmpOp::LtE],
            comparators: vec![name("b"), name("c")],
        }
    );
}

#[test]
fn test_parse_two_word_comparisons() {
    match expr("a not in b") {
        Expr::Compare { ops, .. } => assert_eq!(ops, vec![CmpOp::NotIn]),
        other => panic!("unexpected {:?}", other),
    }
    match expr("a is not None") {
        Expr::Compare { ops, comparators, .. } => {
            assert_eq!(ops, vec![CmpOp::IsNot]);
            assert_eq!(comparators, vec![Expr::NameConstant(Singleton::None)]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_boolean_operations() {
    match expr("a and b and c") {
        Expr::BoolOp { op, values } => {
            assert_eq!(op, BoolOp::And);
            assert_eq!(values.len(), 3);
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(
        expr("a or b and c"),
        Expr::BoolOp {
            op: BoolOp::Or,
            values: vec![
                name("a"),
                Expr::BoolOp {
                    op: BoolOp::And,
                    values: vec![name("b"), name("c")],
                },
            ],
        }
    );
}

#[test]
fn test_parse_not_binds_looser_than_comparison() {
    match expr("not a == b") {
        Expr::UnaryOp { op, operand } => {
            assert_eq!(op, UnaryOp::Not);
            assert!(matches!(*operand, Expr::Compare { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_conditional_expression() {
    assert_eq!(
        expr("a if b else c"),
        Expr::IfExp {
            test: Box::new(name("b")),
            body: Box::new(name("a")),
            orelse: Box::new(name("c")),
        }
    );
}

#[test]
fn test_parse_call_arguments() {
    match expr("f(1, *a, k=2, **kw)") {
        Expr::Call {
            func,
            args,
            keywords,
        } => {
            assert_eq!(*func, name("f"));
            assert_eq!(args.len(), 2);
            assert!(matches!(args[1], Expr::Starred { .. }));
            assert_eq!(keywords[0].arg.as_deref(), Some("k"));
            assert_eq!(keywords[1].arg, None);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_generator_argument() {
    match expr("sum(x for x in y)") {
        Expr::Call { args, .. } => {
            assert!(matches!(args[0], Expr::GeneratorExp { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

fn slice_of(source: &str) -> Slice {
    match expr(source) {
        Expr::Subscript { slice, .. } => *slice,
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_subscripts() {
    assert_eq!(slice_of("x[1]"), Slice::Index { value: int("1") });
    assert_eq!(
        slice_of("x[1:2]"),
        Slice::Slice {
            lower: Some(int("1")),
            upper: Some(int("2")),
            step: None,
        }
    );
    assert_eq!(
        slice_of("x[::2]"),
        Slice::Slice {
            lower: None,
            upper: None,
            step: Some(int("2")),
        }
    );
    assert_eq!(
        slice_of("x[1, 2]"),
        Slice::Index {
            value: Expr::Tuple {
                elts: vec![int("1"), int("2")]
            }
        }
    );
    assert!(matches!(slice_of("x[1:2, 3]"), Slice::ExtSlice { dims } if dims.len() == 2));
}

#[test]
fn test_parse_attribute_chain() {
    assert_eq!(
        expr("a.b.c"),
        Expr::Attribute {
            value: Box::new(Expr::Attribute {
                value: Box::new(name("a")),
                attr: "b".to_string(),
            }),
            attr: "c".to_string(),
        }
    );
}

#[test]
fn test_parse_displays() {
    assert_eq!(
        expr("{}"),
        Expr::Dict {
            keys: vec![],
            values: vec![]
        }
    );
    assert_eq!(
        expr("{1, 2}"),
        Expr::Set {
            elts: vec![int("1"), int("2")]
        }
    );
    assert_eq!(expr("()"), Expr::Tuple { elts: vec![] });
    assert_eq!(expr("(1,)"), Expr::Tuple { elts: vec![int("1")] });
    assert_eq!(expr("(1)"), int("1"));
    assert_eq!(expr("[]"), Expr::List { elts: vec![] });

    match expr("{'a': 1, **b}") {
        Expr::Dict { keys, values } => {
            assert_eq!(keys, vec![Some(Expr::Str("a".to_string())), None]);
            assert_eq!(values[1], name("b"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_comprehensions() {
    match expr("[x for x in y if x]") {
        Expr::ListComp { generators, .. } => {
            assert_eq!(generators.len(), 1);
            assert_eq!(generators[0].ifs, vec![name("x")]);
            assert!(!generators[0].is_async);
        }
        other => panic!("unexpected {:?}", other),
    }

    match expr("{k: v for k, v in d}") {
        Expr::DictComp { generators, .. } => {
            assert!(matches!(generators[0].target, Expr::Tuple { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert!(matches!(expr("{x for x in y}"), Expr::SetComp { .. }));
    assert!(matches!(expr("(x for x in y)"), Expr::GeneratorExp { .. }));
}

#[test]
fn test_parse_lambda() {
    match expr("lambda x, y=1: x") {
        Expr::Lambda { args, body } => {
            assert_eq!(args.args.len(), 2);
            assert_eq!(args.defaults, vec![int("1")]);
            assert_eq!(*body, name("x"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_numbers() {
    assert_eq!(expr("3.14"), Expr::Num(Number::Float("3.14".to_string())));
    assert_eq!(expr("0xFF"), Expr::Num(Number::Int("0xFF".to_string())));
    assert_eq!(expr("2j"), Expr::Num(Number::Imaginary("2j".to_string())));
    assert_eq!(expr("1_000_000"), Expr::Num(Number::Int("1000000".to_string())));
    assert_eq!(expr("0x_FF_FF"), Expr::Num(Number::Int("0xFFFF".to_string())));
    assert_eq!(expr("1_0.5_0"), Expr::Num(Number::Float("10.50".to_string())));
}

#[test]
fn test_parse_strings() {
    assert_eq!(expr(r#"'a' "b""#), Expr::Str("ab".to_string()));
    assert_eq!(expr("b'x'"), Expr::Bytes("x".to_string()));
    assert_eq!(expr(r"'a\nb'"), Expr::Str("a\nb".to_string()));
    assert_eq!(expr(r"r'\n'"), Expr::Str(r"\n".to_string()));
    assert_eq!(expr(r"'\x41\u00e9'"), Expr::Str("Aé".to_string()));
}

#[test]
fn test_parse_fstring() {
    assert_eq!(
        expr("f'hi {name!r:>10}'"),
        Expr::JoinedStr {
            values: vec![
                Expr::Str("hi ".to_string()),
                Expr::FormattedValue {
                    value: Box::new(name("name")),
                    conversion: Some(Conversion::Repr),
                    format_spec: Some(Box::new(Expr::JoinedStr {
                        values: vec![Expr::Str(">10".to_string())]
                    })),
                },
            ]
        }
    );
}

#[test]
fn test_parse_fstring_escaped_braces() {
    assert_eq!(
        expr("f'{{x}}'"),
        Expr::JoinedStr {
            values: vec![Expr::Str("{x}".to_string())]
        }
    );
}

#[test]
fn test_parse_fstring_expression_field() {
    match expr("f'{a + b}'") {
        Expr::JoinedStr { values } => assert!(matches!(
            &values[0],
            Expr::FormattedValue { value, .. } if matches!(**value, Expr::BinOp { .. })
        )),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_function_definition() {
    let source = "@dec\ndef f(a, /, b: int = 1, *args, c, d=2, **kw) -> str:\n    \"\"\"doc\"\"\"\n    return a\n";

    match first_stmt(source) {
        Stmt::FunctionDef(function) => {
            assert_eq!(function.name, "f");
            assert_eq!(function.decorator_list, vec![name("dec")]);
            assert_eq!(function.args.posonlyargs.len(), 1);
            assert_eq!(function.args.args.len(), 1);
            assert_eq!(function.args.args[0].annotation, Some(name("int")));
            assert_eq!(function.args.defaults, vec![int("1")]);
            assert_eq!(function.args.vararg.as_ref().map(|arg| arg.arg.as_str()), Some("args"));
            assert_eq!(function.args.kwonlyargs.len(), 2);
            assert_eq!(function.args.kw_defaults, vec![None, Some(int("2"))]);
            assert!(function.args.kwarg.is_some());
            assert_eq!(function.returns, Some(name("str")));
            assert_eq!(function.body.len(), 2);
            assert_eq!(function.body[0].as_docstring(), Some("doc"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_async_statements() {
    let module = parse_source(
        "async def f():\n    async for x in y:\n        pass\n    async with a as b:\n        pass\n",
    );

    match &module.body[0] {
        Stmt::AsyncFunctionDef(function) => {
            assert!(matches!(function.body[0], Stmt::AsyncFor(_)));
            assert!(matches!(function.body[1], Stmt::AsyncWith(_)));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_class_definition() {
    match first_stmt("class A(B, metaclass=M):\n    pass\n") {
        Stmt::ClassDef(class) => {
            assert_eq!(class.name, "A");
            assert_eq!(class.bases, vec![name("B")]);
            assert_eq!(class.keywords[0].arg.as_deref(), Some("metaclass"));
            assert_eq!(class.body, vec![Stmt::Pass]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_if_elif_else() {
    match first_stmt("if a:\n    x\nelif b:\n    y\nelse:\n    z\n") {
        Stmt::If { orelse, .. } => match orelse.as_deref() {
            Some([Stmt::If { test, orelse, .. }]) => {
                assert_eq!(*test, name("b"));
                assert_eq!(
                    orelse.as_deref(),
                    Some(&[Stmt::Expr { value: name("z") }][..])
                );
            }
            other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_if_without_else() {
    match first_stmt("if a: pass\n") {
        Stmt::If { body, orelse, .. } => {
            assert_eq!(body, vec![Stmt::Pass]);
            assert!(orelse.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_loops() {
    match first_stmt("for i, x in enumerate(xs):\n    break\nelse:\n    pass\n") {
        Stmt::For(for_loop) => {
            assert!(matches!(for_loop.target, Expr::Tuple { .. }));
            assert_eq!(for_loop.body, vec![Stmt::Break]);
            assert_eq!(for_loop.orelse, Some(vec![Stmt::Pass]));
        }
        other => panic!("unexpected {:?}", other),
    }

    match first_stmt("while True:\n    continue\n") {
        Stmt::While { test, body, orelse } => {
            assert_eq!(test, Expr::NameConstant(Singleton::True));
            assert_eq!(body, vec![Stmt::Continue]);
            assert!(orelse.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_try() {
    let source = "try:\n    a\nexcept ValueError as e:\n    b\nexcept:\n    c\nelse:\n    d\nfinally:\n    e\n";

    match first_stmt(source) {
        Stmt::Try(block) => {
            assert_eq!(block.handlers.len(), 2);
            assert_eq!(block.handlers[0].type_, Some(name("ValueError")));
            assert_eq!(block.handlers[0].name.as_deref(), Some("e"));
            assert!(block.handlers[1].type_.is_none());
            assert!(block.orelse.is_some());
            assert!(block.finalbody.is_some());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_with() {
    match first_stmt("with open(p) as f, lock:\n    pass\n") {
        Stmt::With(block) => {
            assert_eq!(block.items.len(), 2);
            assert_eq!(block.items[0].optional_vars, Some(name("f")));
            assert!(block.items[1].optional_vars.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_imports() {
    assert_eq!(
        first_stmt("import os.path as p, sys\n"),
        Stmt::Import {
            names: vec![
                Alias {
                    name: "os.path".to_string(),
                    asname: Some("p".to_string())
                },
                Alias {
                    name: "sys".to_string(),
                    asname: None
                },
            ]
        }
    );

    match first_stmt("from ..pkg import (a as b, c,)\n") {
        Stmt::ImportFrom {
            module,
            names,
            level,
        } => {
            assert_eq!(module.as_deref(), Some("pkg"));
            assert_eq!(names.len(), 2);
            assert_eq!(level, 2);
        }
        other => panic!("unexpected {:?}", other),
    }

    assert!(matches!(
        first_stmt("from . import x\n"),
        Stmt::ImportFrom { module: None, level: 1, .. }
    ));
    assert!(matches!(
        first_stmt("from ... import y\n"),
        Stmt::ImportFrom { level: 3, .. }
    ));
    match first_stmt("from m import *\n") {
        Stmt::ImportFrom { names, .. } => assert_eq!(names[0].name, "*"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_simple_statements() {
    let module = parse_source(
        "def f():\n    global a, b\n    nonlocal c\n    del d, e\n    assert x, 'm'\n    raise E from c\n    return\n",
    );

    match &module.body[0] {
        Stmt::FunctionDef(function) => {
            assert_eq!(
                function.body[0],
                Stmt::Global {
                    names: vec!["a".to_string(), "b".to_string()]
                }
            );
            assert!(matches!(function.body[1], Stmt::Nonlocal { .. }));
            assert!(matches!(&function.body[2], Stmt::Delete { targets } if targets.len() == 2));
            assert!(matches!(function.body[3], Stmt::Assert { msg: Some(_), .. }));
            assert!(matches!(
                function.body[4],
                Stmt::Raise {
                    exc: Some(_),
                    cause: Some(_)
                }
            ));
            assert_eq!(function.body[5], Stmt::Return { value: None });
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_semicolon_separated_statements() {
    assert_eq!(parse_source("a = 1; b = 2;\nc\n").body.len(), 3);
}

#[test]
fn test_parse_yield_forms() {
    let module = parse_source("def g():\n    yield x\n    yield from y\n    z = yield\n");

    match &module.body[0] {
        Stmt::FunctionDef(function) => {
            assert!(matches!(
                &function.body[0],
                Stmt::Expr { value: Expr::Yield { value: Some(_) } }
            ));
            assert!(matches!(
                &function.body[1],
                Stmt::Expr { value: Expr::YieldFrom { .. } }
            ));
            assert!(matches!(
                &function.body[2],
                Stmt::Assign { value: Expr::Yield { value: None }, .. }
            ));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_parse_named_expression_and_type_alias() {
    assert!(matches!(expr("(y := 10)"), Expr::NamedExpr { .. }));
    assert_eq!(
        first_stmt("type Point = tuple\n"),
        Stmt::TypeAlias {
            name: name("Point"),
            value: name("tuple"),
        }
    );
}

#[test]
fn test_parse_empty_module() {
    assert!(parse_source("").body.is_empty());
    assert!(parse_source("# only a comment\n").body.is_empty());
}

#[test]
fn test_error_invalid_targets() {
    assert_eq!(
        *parse_error("f() = 1\n").get_internal_error(),
        ErrorImpl::InvalidTarget {
            target: "function call".to_string()
        }
    );
    assert_eq!(
        *parse_error("1 = x\n").get_internal_error(),
        ErrorImpl::InvalidTarget {
            target: "literal".to_string()
        }
    );
}

#[test]
fn test_error_missing_colon() {
    let error = parse_error("if x\n    pass\n");

    assert_eq!(error.get_message(), "expected ':'");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_error_indentation() {
    assert_eq!(
        *parse_error("if x:\npass\n").get_internal_error(),
        ErrorImpl::ExpectedIndentedBlock
    );
    assert_eq!(
        *parse_error("x = 1\n    y = 2\n").get_internal_error(),
        ErrorImpl::UnexpectedIndent
    );
}

#[test]
fn test_error_invalid_syntax_position() {
    let error = parse_error("x = 1\ny = = 2\n");

    assert_eq!(error.get_message(), "invalid syntax");
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_error_two_expressions_on_a_line() {
    assert_eq!(parse_error("x y\n").get_message(), "invalid syntax");
}

#[test]
fn test_error_non_default_argument() {
    assert_eq!(
        parse_error("def f(a=1, b): pass\n").get_message(),
        "non-default argument follows default argument"
    );
}

#[test]
fn test_error_try_without_handlers() {
    assert_eq!(
        parse_error("try:\n    pass\nx = 1\n").get_message(),
        "expected 'except' or 'finally' block"
    );
}

#[test]
fn test_error_empty_fstring_expression() {
    assert_eq!(
        parse_error("f'{}'\n").get_message(),
        "f-string: empty expression not allowed"
    );
}

#[test]
fn test_nesting_limit() {
    assert_eq!(
        *parse_error(&format!("x = {}1\n", "-".repeat(20000))).get_internal_error(),
        ErrorImpl::NestingTooDeep
    );
    assert_eq!(
        *parse_error(&format!("x = {}y\n", "not ".repeat(5000))).get_internal_error(),
        ErrorImpl::NestingTooDeep
    );
    assert_eq!(
        *parse_error(&format!("x = {}1\n", "1 + ".repeat(1000))).get_internal_error(),
        ErrorImpl::NestingTooDeep
    );

    assert!(matches!(
        first_stmt(&format!("x = {}1\n", "- ".repeat(100))),
        Stmt::Assign { .. }
    ));
    assert!(matches!(
        first_stmt(&format!("x = {}1\n", "1 + ".repeat(100))),
        Stmt::Assign { .. }
    ));
}

#[test]
fn test_format_specs_nest_one_level() {
    assert!(matches!(expr("f'{x:{width}}'\n"), Expr::JoinedStr { .. }));
    assert_eq!(
        parse_error("f'{x:{y:{z}}}'\n").get_message(),
        "f-string: expressions nested too deeply"
    );

    let deep = format!("f'{}x{}'\n", "{x:".repeat(5000), "}".repeat(5000));
    assert_eq!(
        parse_error(&deep).get_message(),
        "f-string: expressions nested too deeply"
    );
}
