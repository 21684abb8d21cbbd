#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc, time::Instant};

use tracing::{debug, trace};

use crate::{
    ast::ast::Module,
    config::ReaderConfig,
    errors::{
        errors::{Error, ErrorTip},
        syntax::{format_syntax_error, SyntaxError},
    },
    lexer::lexer::tokenize,
    narrator::narrate,
    parser::parser::parse,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod narrator;
pub mod parser;

extern crate regex;

/// A 1-based line and column in a named source.
#[derive(Debug, Clone)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn start(file: Rc<String>) -> Self {
        Position {
            line: 1,
            column: 1,
            file,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses `source`, keeping the front-end's own error.
pub fn parse_source(source: &str, file: &str) -> Result<Module, Error> {
    let start = Instant::now();

    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    trace!(tokens = tokens.len(), "tokenized in {:?}", start.elapsed());

    let module = parse(tokens, Rc::new(file.to_string()))?;
    debug!(statements = module.body.len(), "parsed in {:?}", start.elapsed());

    Ok(module)
}

/// Builds the tree for `source`, or the syntax error a listener is told about.
pub fn acquire(source: &str, file: &str) -> Result<Module, SyntaxError> {
    parse_source(source, file).map_err(|error| {
        debug!(error = error.get_error_name(), "acquisition failed");
        SyntaxError::from(&error)
    })
}

/// Explains source text: its narration, or a spoken syntax error.
pub fn explain(source: &str, include_line: bool) -> String {
    match acquire(source, "<source>") {
        Ok(module) => narrate(&module),
        Err(error) => format_syntax_error(&error, include_line),
    }
}

pub fn explain_with(source: &str, config: &ReaderConfig) -> String {
    if config.dedent {
        explain(&dedent_selection(source), config.include_line)
    } else {
        explain(source, config.include_line)
    }
}

/// Shifts a selection left by the indentation of its first line, so that a
/// block cut from the middle of a file parses on its own. Indentation is
/// counted in characters; lines indented less than the first lose only the
/// whitespace they have.
pub fn dedent_selection(text: &str) -> String {
    let Some(first) = text.lines().next() else {
        return String::new();
    };
    let base = first.chars().take_while(|c| c.is_whitespace()).count();

    text.lines()
        .map(|line| {
            let cut = line
                .char_indices()
                .take_while(|(_, c)| c.is_whitespace())
                .take(base)
                .last()
                .map_or(0, |(index, c)| index + c.len_utf8());
            &line[cut..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn get_line(source: &str, line: u32) -> Option<&str> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    source.lines().nth(index)
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches(' ');
    (trimmed, string.len() - trimmed.len())
}

/// Renders a front-end error as a caret diagram:
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `=`, did you miss a colon or an operator?)
/// -> example.py
///   |
/// 2 | y = = 2
///   | ----^
/// ```
pub fn render_report(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;
    let mut report = String::new();

    // Writing into a String cannot fail.
    let _ = match error.get_tip() {
        ErrorTip::None => writeln!(report, "Error: {}", error.get_error_name()),
        tip => writeln!(report, "Error: {} ({})", error.get_error_name(), tip),
    };
    let _ = writeln!(report, "-> {}", position.file);
    let _ = writeln!(report, "{:>padding$}", "|");

    if let Some(line_text) = get_line(source, position.line) {
        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
        let column = usize::try_from(position.column).unwrap_or(1);
        let arrows = column.saturating_sub(removed_whitespace).max(1);

        let _ = writeln!(report, "{} | {}", line_string, line_text_removed.trim_end());
        let _ = writeln!(report, "{:>padding$} {:->arrows$}", "|", "^");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\n\nTesting { }\n";

        assert_eq!(get_line(source, 1), Some("Hello, world!"));
        assert_eq!(get_line(source, 4), Some("Testing { }"));
        assert_eq!(get_line(source, 0), None);
        assert_eq!(get_line(source, 9), None);
    }

    #[test]
    fn test_render_report() {
        let source = "x = 1\ny = = 2\n";
        let error = parse_source(source, "example.py").unwrap_err();

        assert_eq!(
            render_report(&error, source),
            "Error: UnexpectedToken (Unexpected token: `=`, did you miss a colon or an operator?)\n\
             -> example.py\n  \
             |\n\
             2 | y = = 2\n  \
             | ----^\n"
        );
    }

    #[test]
    fn test_render_report_indented_line() {
        let source = "if x:\n    y = )\n";
        let error = parse_source(source, "example.py").unwrap_err();
        let report = render_report(&error, source);

        assert!(report.contains("2 | y = )"));
        assert!(report.ends_with("| ----^\n"));
    }

    #[test]
    fn test_acquire_normalises_errors() {
        let error = acquire("def f(:\n", "example.py").unwrap_err();

        assert_eq!(error.line, 1);
        assert_eq!(error.column, 7);
        assert_eq!(error.message, "invalid syntax");
    }

    #[test]
    fn test_explain() {
        assert_eq!(explain("x = 1\n", true), "an assignment of 1 to x");
        assert_eq!(
            explain("x = = 1\n", true),
            "Syntax Error: 'invalid syntax' on line 1, column 5"
        );
        assert_eq!(
            explain("x = = 1\n", false),
            "Syntax Error: 'invalid syntax' column 5"
        );
    }

    #[test]
    fn test_dedent_selection() {
        assert_eq!(
            dedent_selection("    if x:\n        y = 1\n    z = 2"),
            "if x:\n    y = 1\nz = 2"
        );
        assert_eq!(dedent_selection("  a\nb"), "a\nb");
        assert_eq!(dedent_selection(""), "");
    }

    #[test]
    fn test_dedent_selection_multibyte_whitespace() {
        assert_eq!(dedent_selection(" x = 1\n\u{a0}y = 2\n"), "x = 1\ny = 2");
        assert_eq!(dedent_selection("\u{3000}\u{3000}a\n  b\n\u{3000} c"), "a\nb\nc");
        assert_eq!(dedent_selection("  a\n\u{a0}\u{a0}\u{a0}b"), "a\n\u{a0}b");

        assert_eq!(
            explain_with(" x = 1\n\u{a0}y = 2\n", &ReaderConfig::default()),
            "an assignment of 1 to x and an assignment of 2 to y"
        );
    }

    #[test]
    fn test_explain_with_dedent() {
        let selection = "    return a\n    return b\n";
        let config = ReaderConfig::default();

        assert_eq!(
            explain_with(selection, &config),
            "a return statement returning a and a return statement returning b"
        );

        let config = ReaderConfig {
            include_line: false,
            dedent: false,
        };
        assert_eq!(
            explain_with(selection, &config),
            "Syntax Error: 'unexpected indent' column 5"
        );
    }
}
