use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

const TAB_WIDTH: usize = 8;
const MAX_BRACKET_DEPTH: usize = 200;
const MAX_INDENT_DEPTH: usize = 100;

const NUMBER_PATTERN: &str = concat!(
    r"^(?:0[xX](?:_?[0-9a-fA-F])+",
    r"|0[oO](?:_?[0-7])+",
    r"|0[bB](?:_?[01])+",
    r"|(?:(?:[0-9](?:_?[0-9])*)?\.[0-9](?:_?[0-9])*|[0-9](?:_?[0-9])*\.?)",
    r"(?:[eE][+-]?[0-9](?:_?[0-9])*)?[jJ]?)"
);

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(regex).unwrap_or_else(|e| panic!("bad lexer pattern {}: {}", regex, e)),
        handler,
    }
}

fn operator(symbol: &str, handler: RegexHandler) -> RegexPattern {
    pattern(&format!("^{}", regex::escape(symbol)), handler)
}

lazy_static! {
    // Order matters: string prefixes before identifiers, longer operators before
    // their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r#"^(?i:rb|br|fr|rf|r|b|f|u)?('''|"""|'|")"#, string_handler),
        pattern(r"^[_\p{L}][_\p{L}\p{N}]*", symbol_handler),
        pattern(NUMBER_PATTERN, number_handler),
        pattern(r"^[ \t\x0c]+", skip_handler),
        pattern(r"^#[^\r\n]*", skip_handler),
        pattern(r"^\\\r?\n", continuation_handler),
        pattern(r"^(?:\r\n|\n|\r)", newline_handler),
        operator("(", open_bracket_handler),
        operator("[", open_bracket_handler),
        operator("{", open_bracket_handler),
        operator(")", close_bracket_handler),
        operator("]", close_bracket_handler),
        operator("}", close_bracket_handler),
        operator("**=", MK_DEFAULT_HANDLER!(TokenKind::StarStarEquals)),
        operator("//=", MK_DEFAULT_HANDLER!(TokenKind::SlashSlashEquals)),
        operator(">>=", MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals)),
        operator("<<=", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals)),
        operator("...", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis)),
        operator("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow)),
        operator(":=", MK_DEFAULT_HANDLER!(TokenKind::ColonEquals)),
        operator("**", MK_DEFAULT_HANDLER!(TokenKind::StarStar)),
        operator("//", MK_DEFAULT_HANDLER!(TokenKind::SlashSlash)),
        operator("<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft)),
        operator(">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight)),
        operator("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        operator(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        operator("==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        operator("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        operator("+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals)),
        operator("-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals)),
        operator("*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals)),
        operator("/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals)),
        operator("%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals)),
        operator("@=", MK_DEFAULT_HANDLER!(TokenKind::AtEquals)),
        operator("|=", MK_DEFAULT_HANDLER!(TokenKind::PipeEquals)),
        operator("^=", MK_DEFAULT_HANDLER!(TokenKind::CaretEquals)),
        operator("&=", MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals)),
        operator("+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        operator("-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        operator("*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
        operator("/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        operator("%", MK_DEFAULT_HANDLER!(TokenKind::Percent)),
        operator("@", MK_DEFAULT_HANDLER!(TokenKind::At)),
        operator("|", MK_DEFAULT_HANDLER!(TokenKind::Pipe)),
        operator("^", MK_DEFAULT_HANDLER!(TokenKind::Caret)),
        operator("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand)),
        operator("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde)),
        operator("<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        operator(">", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        operator("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        operator(".", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        operator(",", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        operator(":", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        operator(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    line_start: usize,
    at_line_start: bool,
    indents: Vec<usize>,
    brackets: Vec<(char, Position)>,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<unknown>"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            at_line_start: true,
            indents: vec![0],
            brackets: vec![],
            file: file_name,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.source[self.line_start..self.pos].chars().count() as u32 + 1,
            file: Rc::clone(&self.file),
        }
    }

    /// Moves past `text`, keeping the line bookkeeping in step with any line
    /// breaks it contains.
    pub fn advance_over(&mut self, text: &str) {
        let start = self.pos;
        self.pos += text.len();

        for (offset, c) in text.char_indices() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.line_start = start + offset + 1;
                }
                '\r' if !text[offset + 1..].starts_with('\n') => {
                    self.line += 1;
                    self.line_start = start + offset + 1;
                }
                _ => {}
            }
        }
    }

    pub fn push_token(&mut self, kind: TokenKind, text: &str) {
        let start = self.position();
        self.advance_over(text);
        let end = self.position();

        self.push(MK_TOKEN!(kind, text.to_string(), Span { start, end }));
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind)
    }

    fn push_marker(&mut self, kind: TokenKind) {
        let position = self.position();
        self.push(MK_TOKEN!(
            kind,
            String::new(),
            Span {
                start: position.clone(),
                end: position
            }
        ));
    }

    /// A logical line ends only where a statement has been started.
    fn end_logical_line(&mut self) {
        match self.last_kind() {
            None | Some(TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent) => {}
            Some(_) => self.push_marker(TokenKind::Newline),
        }
    }

    /// Measures the indentation of the line starting at the current position
    /// and emits Indent or Dedent tokens for it. Blank and comment-only lines
    /// leave the indentation stack alone.
    fn handle_indentation(&mut self) -> Result<(), Error> {
        self.at_line_start = false;

        let mut width = 0;
        let mut consumed = 0;

        for c in self.remainder().chars() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                '\x0c' => width = 0,
                _ => break,
            }
            consumed += c.len_utf8();
        }

        self.pos += consumed;

        match self.remainder().chars().next() {
            None | Some('\n' | '\r' | '#') => return Ok(()),
            Some('\\') if self.remainder()[1..].starts_with(&['\n', '\r'][..]) => return Ok(()),
            _ => {}
        }

        let current = self.indents.last().copied().unwrap_or(0);

        if width > current {
            if self.indents.len() > MAX_INDENT_DEPTH {
                return Err(Error::new(ErrorImpl::TooManyIndentationLevels, self.position()));
            }
            self.indents.push(width);
            self.push_marker(TokenKind::Indent);
        } else if width < current {
            while self.indents.last().is_some_and(|&top| top > width) {
                self.indents.pop();
                self.push_marker(TokenKind::Dedent);
            }

            if self.indents.last().copied().unwrap_or(0) != width {
                return Err(Error::new(ErrorImpl::InconsistentDedent, self.position()));
            }
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        if let Some((bracket, position)) = self.brackets.first() {
            return Err(Error::new(
                ErrorImpl::UnclosedBracket { bracket: *bracket },
                position.clone(),
            ));
        }

        self.end_logical_line();

        while self.indents.len() > 1 {
            self.indents.pop();
            self.push_marker(TokenKind::Dedent);
        }

        self.push_marker(TokenKind::EOF);
        Ok(())
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.push_token(TokenKind::Number, matched);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_over(matched);
    Ok(())
}

fn continuation_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_over(matched);
    Ok(())
}

fn newline_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    if lexer.brackets.is_empty() {
        lexer.end_logical_line();
        lexer.at_line_start = true;
    }

    lexer.advance_over(matched);
    Ok(())
}

fn open_bracket_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let kind = match matched {
        "(" => TokenKind::OpenParen,
        "[" => TokenKind::OpenBracket,
        _ => TokenKind::OpenCurly,
    };

    let position = lexer.position();
    if lexer.brackets.len() >= MAX_BRACKET_DEPTH {
        return Err(Error::new(ErrorImpl::TooManyNestedParentheses, position));
    }

    lexer.brackets.extend(matched.chars().map(|c| (c, position.clone())));
    lexer.push_token(kind, matched);
    Ok(())
}

fn close_bracket_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let (kind, expected) = match matched {
        ")" => (TokenKind::CloseParen, '('),
        "]" => (TokenKind::CloseBracket, '['),
        _ => (TokenKind::CloseCurly, '{'),
    };
    let closing = matched.chars().next().unwrap_or(')');

    match lexer.brackets.pop() {
        None => Err(Error::new(
            ErrorImpl::UnmatchedBracket { bracket: closing },
            lexer.position(),
        )),
        Some((opening, _)) if opening != expected => Err(Error::new(
            ErrorImpl::MismatchedBracket { closing, opening },
            lexer.position(),
        )),
        Some(_) => {
            lexer.push_token(kind, matched);
            Ok(())
        }
    }
}

/// Scans a string literal from its opening quote to its closing one. The
/// token keeps the raw text, prefix and quotes included; escapes are decoded
/// by the parser.
fn string_handler(lexer: &mut Lexer, opening: &str) -> Result<(), Error> {
    let quote = opening.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let triple_quoted = quote.len() == 3;

    let length = {
        let rest = &lexer.remainder()[opening.len()..];
        let mut chars = rest.char_indices().peekable();
        let mut length = None;

        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, '\r')) = chars.next() {
                        chars.next_if(|(_, c)| *c == '\n');
                    }
                }
                '\n' | '\r' if !triple_quoted => break,
                _ if rest[index..].starts_with(quote) => {
                    length = Some(opening.len() + index + quote.len());
                    break;
                }
                _ => {}
            }
        }

        length
    };

    match length {
        Some(length) => {
            let literal = lexer.remainder()[..length].to_string();
            lexer.push_token(TokenKind::String, &literal);
            Ok(())
        }
        None if triple_quoted => Err(Error::new(
            ErrorImpl::UnterminatedTripleQuotedString,
            lexer.position(),
        )),
        None => Err(Error::new(ErrorImpl::UnterminatedString, lexer.position())),
    }
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        lexer.push_token(*kind, matched);
    } else {
        lexer.push_token(TokenKind::Identifier, matched);
    }

    Ok(())
}

/// Splits Python source into tokens, with Newline, Indent and Dedent tokens
/// standing for the layout of the code.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        if lex.at_line_start && lex.brackets.is_empty() {
            lex.handle_indentation()?;
            continue;
        }

        let found = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|matched| (pattern.handler, matched.as_str().to_string()))
        });

        match found {
            Some((handler, matched)) => handler(&mut lex, &matched)?,
            None => {
                let token = lex.remainder().chars().next().unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: token.to_string(),
                    },
                    lex.position(),
                ));
            }
        }
    }

    lex.finish()?;
    Ok(lex.tokens)
}
