//! String literal decoding: prefixes, escape sequences, implicit
//! concatenation of adjacent literals and f-string replacement fields.

use std::{iter::Peekable, rc::Rc, str::Chars};

use crate::{
    ast::expressions::{Conversion, Expr},
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    Position,
};

use super::{expr::parse_testlist, parser::create_parser, parser::Parser};

/// Format specs may hold replacement fields, but those fields may not carry
/// specs of their own.
const MAX_SPEC_NESTING: usize = 2;

/// A string token split into its prefix flags and the text between quotes.
struct StringLiteral<'a> {
    bytes: bool,
    formatted: bool,
    raw: bool,
    body: &'a str,
}

impl<'a> StringLiteral<'a> {
    fn split(text: &'a str) -> Self {
        let quoted = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let prefix = text[..text.len() - quoted.len()].to_ascii_lowercase();

        let quote_len = if quoted.starts_with("'''") || quoted.starts_with("\"\"\"") {
            3
        } else {
            1
        };
        let body = quoted
            .get(quote_len..quoted.len().saturating_sub(quote_len))
            .unwrap_or("");

        StringLiteral {
            bytes: prefix.contains('b'),
            formatted: prefix.contains('f'),
            raw: prefix.contains('r'),
            body,
        }
    }
}

fn fstring_error(message: &str, position: &Position) -> Error {
    Error::new(
        ErrorImpl::InvalidFString {
            message: String::from(message),
        },
        position.clone(),
    )
}

fn take_hex(chars: &mut Peekable<Chars>, count: usize) -> String {
    (0..count)
        .filter_map(|_| chars.next_if(|c| c.is_ascii_hexdigit()))
        .collect()
}

/// Resolves backslash escapes. Unknown escapes keep their backslash, as
/// Python does.
pub fn decode_escapes(body: &str, bytes: bool) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        let Some(next) = chars.next() else {
            result.push('\\');
            break;
        };

        match next {
            '\n' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            '\\' | '\'' | '"' => result.push(next),
            'a' => result.push('\x07'),
            'b' => result.push('\x08'),
            'f' => result.push('\x0c'),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'v' => result.push('\x0b'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.next_if(|c| ('0'..='7').contains(c)) {
                        Some(digit) => digits.push(digit),
                        None => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => result.push(decoded),
                    None => {
                        result.push('\\');
                        result.push_str(&digits);
                    }
                }
            }
            'x' | 'u' | 'U' if next == 'x' || !bytes => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits = take_hex(&mut chars, width);
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|_| digits.len() == width)
                    .and_then(char::from_u32);

                match decoded {
                    Some(decoded) => result.push(decoded),
                    None => {
                        result.push('\\');
                        result.push(next);
                        result.push_str(&digits);
                    }
                }
            }
            other => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

fn push_text(parts: &mut Vec<Expr>, text: String) {
    if text.is_empty() {
        return;
    }

    if let Some(Expr::Str(last)) = parts.last_mut() {
        last.push_str(&text);
    } else {
        parts.push(Expr::Str(text));
    }
}

fn concatenate(parts: Vec<Expr>) -> String {
    parts
        .into_iter()
        .filter_map(|part| match part {
            Expr::Str(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Parses the source of one replacement field as an expression. Wrapping it
/// in parentheses lets it span lines and makes `a, b` a tuple.
fn parse_field_expression(source: &str, file: Rc<String>, position: &Position) -> Result<Expr, Error> {
    let to_fstring_error = |error: Error| fstring_error(&error.get_message(), position);

    let tokens = tokenize(format!("({})", source), Some(file.to_string())).map_err(to_fstring_error)?;
    let mut parser = create_parser(tokens, file);
    let expr = parse_testlist(&mut parser).map_err(to_fstring_error)?;

    if parser.current_token_kind() == TokenKind::Newline {
        parser.advance();
    }
    if parser.has_tokens() {
        return Err(fstring_error("invalid syntax", position));
    }

    Ok(expr)
}

/// Parses the replacement field starting just after its `{`, returning the
/// formatted value and the index just past its `}`.
fn parse_replacement_field(
    chars: &[char],
    start: usize,
    raw: bool,
    spec_depth: usize,
    file: &Rc<String>,
    position: &Position,
) -> Result<(Expr, usize), Error> {
    let mut depth = 0;
    let mut quote = None;
    let mut index = start;

    while index < chars.len() {
        let c = chars[index];

        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            index += 1;
            continue;
        }

        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth > 0 => depth -= 1,
            '}' | ':' if depth == 0 => break,
            '!' if depth == 0 && chars.get(index + 1) != Some(&'=') => break,
            _ => {}
        }
        index += 1;
    }

    if index >= chars.len() {
        return Err(fstring_error("expecting '}'", position));
    }

    let source: String = chars[start..index].iter().collect();
    if source.trim().is_empty() {
        return Err(fstring_error("empty expression not allowed", position));
    }
    let value = parse_field_expression(source.trim(), Rc::clone(file), position)?;

    let mut conversion = None;
    if chars[index] == '!' {
        conversion = match chars.get(index + 1) {
            Some('s') => Some(Conversion::Str),
            Some('r') => Some(Conversion::Repr),
            Some('a') => Some(Conversion::Ascii),
            _ => {
                return Err(fstring_error(
                    "invalid conversion character: expected 's', 'r', or 'a'",
                    position,
                ))
            }
        };
        index += 2;
    }

    let mut format_spec = None;
    if chars.get(index) == Some(&':') {
        if spec_depth + 1 >= MAX_SPEC_NESTING {
            return Err(fstring_error("expressions nested too deeply", position));
        }

        let spec_start = index + 1;
        let mut depth = 0;
        index = spec_start;

        while index < chars.len() {
            match chars[index] {
                '{' => depth += 1,
                '}' if depth == 0 => break,
                '}' => depth -= 1,
                _ => {}
            }
            index += 1;
        }

        let spec: String = chars[spec_start..index.min(chars.len())].iter().collect();
        let values = parse_fstring_body(&spec, raw, spec_depth + 1, file, position)?;
        format_spec = Some(Box::new(Expr::JoinedStr { values }));
    }

    if chars.get(index) != Some(&'}') {
        return Err(fstring_error("expecting '}'", position));
    }

    Ok((
        Expr::FormattedValue {
            value: Box::new(value),
            conversion,
            format_spec,
        },
        index + 1,
    ))
}

/// Splits an f-string body into literal text and formatted values.
/// `spec_depth` is 0 for the string itself and 1 inside a format spec.
fn parse_fstring_body(
    body: &str,
    raw: bool,
    spec_depth: usize,
    file: &Rc<String>,
    position: &Position,
) -> Result<Vec<Expr>, Error> {
    let chars: Vec<char> = body.chars().collect();
    let mut parts = vec![];
    let mut literal = String::new();
    let mut index = 0;

    let decode = |text: &str| {
        if raw {
            text.to_string()
        } else {
            decode_escapes(text, false)
        }
    };

    while index < chars.len() {
        match chars[index] {
            '{' if chars.get(index + 1) == Some(&'{') => {
                literal.push('{');
                index += 2;
            }
            '}' if chars.get(index + 1) == Some(&'}') => {
                literal.push('}');
                index += 2;
            }
            '}' => return Err(fstring_error("single '}' is not allowed", position)),
            '{' => {
                push_text(&mut parts, decode(&literal));
                literal.clear();

                let (value, next) =
                    parse_replacement_field(&chars, index + 1, raw, spec_depth, file, position)?;
                parts.push(value);
                index = next;
            }
            c => {
                literal.push(c);
                index += 1;
            }
        }
    }

    push_text(&mut parts, decode(&literal));
    Ok(parts)
}

/// Parses one or more adjacent string literals into a single expression:
/// `Str`, `Bytes`, or `JoinedStr` when any part is an f-string.
pub fn parse_string_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let file = parser.get_file();
    let mut parts = vec![];
    let mut bytes = None;
    let mut formatted = false;

    while parser.current_token_kind() == TokenKind::String {
        let token = parser.advance().clone();
        let literal = StringLiteral::split(&token.value);

        match bytes {
            Some(previous) if previous != literal.bytes => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: token.value.clone(),
                        message: String::from("cannot mix bytes and nonbytes literals"),
                    },
                    token.span.start,
                ));
            }
            _ => bytes = Some(literal.bytes),
        }

        if literal.formatted {
            formatted = true;
            for part in parse_fstring_body(literal.body, literal.raw, 0, &file, &token.span.start)? {
                match part {
                    Expr::Str(text) => push_text(&mut parts, text),
                    other => parts.push(other),
                }
            }
        } else if literal.raw {
            push_text(&mut parts, literal.body.to_string());
        } else {
            push_text(&mut parts, decode_escapes(literal.body, literal.bytes));
        }
    }

    if bytes == Some(true) {
        Ok(Expr::Bytes(concatenate(parts)))
    } else if formatted {
        Ok(Expr::JoinedStr { values: parts })
    } else {
        Ok(Expr::Str(concatenate(parts)))
    }
}
