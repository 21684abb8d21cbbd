//! Integration tests for end-to-end explanation.
//!
//! These tests verify that the complete pipeline works correctly from source
//! text through tokenization, parsing and narration, or through the spoken
//! syntax-error sentence when the source does not parse.

use narrator::{
    acquire,
    config::ReaderConfig,
    errors::syntax::{format_syntax_error, SyntaxError},
    explain, explain_with,
    narrator::{narrate, narrate_outcome, Narration},
};

#[test]
fn test_explain_function() {
    assert_eq!(
        explain("def add(x: int, y: int):\n    return x + y\n", true),
        "a function called add, which has 2 arguments: x of type int and y of type int, \
         with a body of a return statement returning x plus y"
    );
}

#[test]
fn test_explain_program() {
    let source = r#"
import sys


class Greeter:
    """Says hello."""

    def __init__(self, name="world"):
        self.name = name

    def greet(self):
        print(f"hello {self.name}")


if __name__ == "__main__":
    Greeter(*sys.argv[1:]).greet()
"#;

    let narration = explain(source, true);

    assert!(narration.starts_with("an import of sys, a class called Greeter, documented as Says hello., and defines "));
    assert!(narration.contains(
        "a function called __init__, which has 2 arguments: self and name defaulting to the string world"
    ));
    assert!(narration.contains("the slice from 1 to the end of the attribute argv of sys"));
    assert!(narration.contains(
        "an if block, using __name__ is equal to the string __main__ as the test"
    ));
    assert_eq!(narration.matches("Says hello.").count(), 1);
    assert!(!narration.contains('\n'));
}

#[test]
fn test_explain_reports_syntax_errors() {
    assert_eq!(
        explain("x = 1\n\nwhile True\n    pass\n", true),
        "Syntax Error: 'expected ':'' on line 3, column 11"
    );
    assert_eq!(
        explain("print('unclosed)\n", false),
        "Syntax Error: 'unterminated string literal' column 7"
    );
    assert_eq!(
        explain("def f():\nreturn 1\n", true),
        "Syntax Error: 'expected an indented block' on line 2, column 1"
    );
    assert_eq!(
        explain("f(x) = 3\n", true),
        "Syntax Error: 'cannot assign to function call' on line 1, column 1"
    );
}

#[test]
fn test_explain_reports_deep_nesting() {
    let parens = format!("x = {}1{}\n", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(
        explain(&parens, true),
        "Syntax Error: 'too many nested parentheses' on line 1, column 205"
    );

    let minuses = format!("x = {}1\n", "-".repeat(20000));
    assert!(explain(&minuses, true).starts_with("Syntax Error: 'expression is too deeply nested'"));
}

#[test]
fn test_error_sentence() {
    let error = SyntaxError::new("invalid syntax", 3, 5);

    assert_eq!(
        format_syntax_error(&error, true),
        "Syntax Error: 'invalid syntax' on line 3, column 5"
    );
    assert_eq!(
        format_syntax_error(&error, false),
        "Syntax Error: 'invalid syntax' column 5"
    );
}

#[test]
fn test_acquire_then_narrate() {
    let module = acquire("total = sum(x for x in xs)\n", "example.py").unwrap();

    assert_eq!(
        narrate(&module),
        "an assignment of sum called with a generator expression of x, \
         using x as an iterator, looping through xs to total"
    );
    assert_eq!(
        narrate_outcome(&module.body[0]),
        Narration::Rendered(narrate(&module))
    );
}

#[test]
fn test_explain_selection() {
    let selection = "        for item in items:\n            total += item\n";

    assert_eq!(
        explain_with(selection, &ReaderConfig::default()),
        "a for loop, using item as an iterator, looping through items, \
         with a body of an augmented assignment, updating total to itself plus item"
    );
}

#[test]
fn test_config_from_json_drives_explanation() {
    let config = ReaderConfig::from_json(r#"{ "include_line": false }"#).unwrap();

    assert_eq!(
        explain_with("if x:\n", &config),
        "Syntax Error: 'expected an indented block' column 1"
    );
}
