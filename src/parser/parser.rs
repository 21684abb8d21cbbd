//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! The parser uses a Pratt approach with NUD/LED handlers for expressions
//! and handlers keyed by leading token for statements.
//!
//! It maintains lookup tables for:
//! - Compound statement handlers
//! - Simple statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Module,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression tree the parser will build. Narration walks the tree
/// recursively, so this also bounds its stack use.
const MAX_NESTING_DEPTH: usize = 200;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for parsing
/// statements and expressions. The token stream always ends with an EOF
/// token, and the position never moves past it.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Expression levels currently open, see `enter_nesting`
    depth: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for compound statement handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for simple statement handlers
    simple_stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - Reference-counted string containing the source file name
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position::start(Rc::clone(&file)));

            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::new(),
                Span {
                    start: position.clone(),
                    end: position
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            file,
            stmt_lookup: HashMap::new(),
            simple_stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.describe(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects a token of the specified kind, failing with `message` if the
    /// current token is something else.
    pub fn expect_detailed(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let error = self.detailed_error(message);
        self.expect_error(expected_kind, Some(error))
    }

    /// An error at the current token carrying a specific message.
    pub fn detailed_error(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().describe(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// The generic "invalid syntax" error at the current token.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().describe(),
            },
            self.get_position(),
        )
    }

    /// Opens one level of expression nesting, failing once the tree would
    /// grow deeper than `MAX_NESTING_DEPTH`.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(ErrorImpl::NestingTooDeep, self.get_position()));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Whether the current token can begin an expression.
    pub fn at_expr_start(&self) -> bool {
        self.nud_lookup.contains_key(&self.current_token_kind())
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_simple_stmt_lookup(&self) -> &StmtLookup {
        &self.simple_stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves binding powers alone: several tokens
    /// (`-`, `*`, `not`, `(`) are both prefix and infix.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a compound statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a simple (single line, `;` separable) statement handler.
    pub fn simple_stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.simple_stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Returns the position of the current token in the source file.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Builds a parser with every lookup table populated.
pub fn create_parser(tokens: Vec<Token>, file: Rc<String>) -> Parser {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);
    parser
}

/// Parses a stream of tokens into a module.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses statements until EOF.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `file` - Reference-counted string containing the source file name
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Module, Error> {
    let mut parser = create_parser(tokens, file);
    let mut body = vec![];

    while parser.has_tokens() {
        body.extend(parse_stmt(&mut parser)?);
    }

    Ok(Module { body })
}
