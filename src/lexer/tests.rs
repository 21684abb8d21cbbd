//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric and string literals
//! - Operators and punctuation
//! - Indentation, blank lines and implicit line joining
//! - Error cases

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};
use crate::errors::errors::ErrorImpl;

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.py".to_string())).unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|token| token.kind).collect()
}

fn lex_error(source: &str) -> ErrorImpl {
    tokenize(source.to_string(), Some("test.py".to_string()))
        .unwrap_err()
        .get_internal_error()
        .clone()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = lex("def async await lambda None True False nonlocal yield");

    assert_eq!(tokens[0].kind, TokenKind::Def);
    assert_eq!(tokens[1].kind, TokenKind::Async);
    assert_eq!(tokens[2].kind, TokenKind::Await);
    assert_eq!(tokens[3].kind, TokenKind::Lambda);
    assert_eq!(tokens[4].kind, TokenKind::None);
    assert_eq!(tokens[5].kind, TokenKind::True);
    assert_eq!(tokens[6].kind, TokenKind::False);
    assert_eq!(tokens[7].kind, TokenKind::Nonlocal);
    assert_eq!(tokens[8].kind, TokenKind::Yield);
    assert_eq!(tokens[9].kind, TokenKind::Newline);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo baz_123 _underscore CamelCase café");

    for (token, name) in tokens
        .iter()
        .zip(["foo", "baz_123", "_underscore", "CamelCase", "café"])
    {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, name);
    }
}

#[test]
fn test_keyword_prefix_is_an_identifier() {
    let tokens = lex("define iffy");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "define");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = lex("42 3.14 .5 1e10 1_000 0x1F 0o17 0b101 2j 1.5e-3");
    let values = ["42", "3.14", ".5", "1e10", "1_000", "0x1F", "0o17", "0b101", "2j", "1.5e-3"];

    for (token, value) in tokens.iter().zip(values) {
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.value, value);
    }
    assert_eq!(tokens[values.len()].kind, TokenKind::Newline);
}

#[test]
fn test_tokenize_strings_keep_raw_text() {
    let tokens = lex(r#"'a' "b" r'\d' b"x" f'{y}' Rb'z'"#);
    let values = [r#"'a'"#, r#""b""#, r"r'\d'", r#"b"x""#, "f'{y}'", "Rb'z'"];

    for (token, value) in tokens.iter().zip(values) {
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.value, value);
    }
}

#[test]
fn test_escaped_quote_does_not_end_string() {
    let tokens = lex(r#"'it\'s'"#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, r#"'it\'s'"#);
}

#[test]
fn test_triple_quoted_string_spans_lines() {
    let tokens = lex("'''one\ntwo'''\nx\n");

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "'''one\ntwo'''");
    assert_eq!(tokens[1].kind, TokenKind::Newline);
    assert_eq!(tokens[2].value, "x");
    assert_eq!(tokens[2].span.start.line, 3);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("**= // -> := ... != <= << ** @"),
        vec![
            TokenKind::StarStarEquals,
            TokenKind::SlashSlash,
            TokenKind::Arrow,
            TokenKind::ColonEquals,
            TokenKind::Ellipsis,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::ShiftLeft,
            TokenKind::StarStar,
            TokenKind::At,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("x # a comment\n"),
        vec![TokenKind::Identifier, TokenKind::Newline, TokenKind::EOF]
    );
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_missing_final_newline_is_supplied() {
    assert_eq!(
        kinds("x"),
        vec![TokenKind::Identifier, TokenKind::Newline, TokenKind::EOF]
    );
}

#[test]
fn test_indented_block() {
    assert_eq!(
        kinds("if x:\n    y\n"),
        vec![
            TokenKind::If,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nested_blocks_dedent_together() {
    assert_eq!(
        kinds("if a:\n    if b:\n        c\nd\n"),
        vec![
            TokenKind::If,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::If,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_blank_and_comment_lines_do_not_change_layout() {
    assert_eq!(
        kinds("x\n\n# note\n   \ny\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_brackets_join_lines() {
    assert_eq!(
        kinds("(1,\n    2)\n"),
        vec![
            TokenKind::OpenParen,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_backslash_joins_lines() {
    assert_eq!(
        kinds("x = 1 + \\\n    2\n"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_positions() {
    let tokens = lex("a = 1\nbb = 22\n");

    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.column, 1);
    assert_eq!(tokens[4].value, "bb");
    assert_eq!(tokens[4].span.start.line, 2);
    assert_eq!(tokens[4].span.start.column, 1);
    assert_eq!(tokens[6].value, "22");
    assert_eq!(tokens[6].span.start.column, 6);
    assert_eq!(tokens[6].span.end.column, 8);
}

#[test]
fn test_unrecognised_character() {
    assert_eq!(
        lex_error("x = $"),
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string()
        }
    );
}

#[test]
fn test_unterminated_strings() {
    assert_eq!(lex_error("'abc\n"), ErrorImpl::UnterminatedString);
    assert_eq!(lex_error("'''abc"), ErrorImpl::UnterminatedTripleQuotedString);
}

#[test]
fn test_bracket_errors() {
    assert_eq!(lex_error("(1, 2\n"), ErrorImpl::UnclosedBracket { bracket: '(' });
    assert_eq!(lex_error("x)"), ErrorImpl::UnmatchedBracket { bracket: ')' });
    assert_eq!(
        lex_error("(1]"),
        ErrorImpl::MismatchedBracket {
            closing: ']',
            opening: '('
        }
    );
}

#[test]
fn test_unclosed_bracket_reports_where_it_opened() {
    let error = tokenize("x = [1,\n2,\n".to_string(), None).unwrap_err();

    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_inconsistent_dedent() {
    assert_eq!(
        lex_error("if a:\n    b\n  c\n"),
        ErrorImpl::InconsistentDedent
    );
}

#[test]
fn test_bracket_nesting_limit() {
    let deepest = format!("x = {}1{}\n", "(".repeat(200), ")".repeat(200));
    assert!(tokenize(deepest, None).is_ok());

    let error = tokenize(
        format!("x = {}1{}\n", "(".repeat(5000), ")".repeat(5000)),
        None,
    )
    .unwrap_err();
    assert_eq!(*error.get_internal_error(), ErrorImpl::TooManyNestedParentheses);
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 205);
}

#[test]
fn test_indentation_limit() {
    let nested = |levels: usize| {
        let mut source: String = (0..levels)
            .map(|level| format!("{}if x:\n", " ".repeat(level)))
            .collect();
        source.push_str(&format!("{}pass\n", " ".repeat(levels)));
        source
    };

    assert!(tokenize(nested(100), None).is_ok());
    assert_eq!(lex_error(&nested(101)), ErrorImpl::TooManyIndentationLevels);
}
