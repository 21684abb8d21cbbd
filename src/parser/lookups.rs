use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*, strings::parse_string_expr};

/// Python operator precedence, weakest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Ternary,
    LogicalOr,
    LogicalAnd,
    LogicalNot,
    Relational,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Power,
    Await,
    Call,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::ColonEquals, BindingPower::Assignment, parse_named_expr);
    parser.led(TokenKind::If, BindingPower::Ternary, parse_ternary_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_bool_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_bool_expr);

    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::In, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::Not, BindingPower::Relational, parse_compare_expr);
    parser.led(TokenKind::Is, BindingPower::Relational, parse_compare_expr);

    // Bitwise
    parser.led(TokenKind::Pipe, BindingPower::BitwiseOr, parse_binary_expr);
    parser.led(TokenKind::Caret, BindingPower::BitwiseXor, parse_binary_expr);
    parser.led(TokenKind::Ampersand, BindingPower::BitwiseAnd, parse_binary_expr);
    parser.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::At, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::SlashSlash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::StarStar, BindingPower::Power, parse_power_expr);

    // Call, subscript and member
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Call, parse_subscript_expr);
    parser.led(TokenKind::Dot, BindingPower::Call, parse_member_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::None, parse_primary_expr);
    parser.nud(TokenKind::Ellipsis, parse_primary_expr);
    parser.nud(TokenKind::String, parse_string_expr);

    // Prefix
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Tilde, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_not_expr);
    parser.nud(TokenKind::Await, parse_await_expr);
    parser.nud(TokenKind::Star, parse_starred_expr);
    parser.nud(TokenKind::Lambda, parse_lambda_expr);
    parser.nud(TokenKind::Yield, parse_yield_expr);

    // Displays
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);
    parser.nud(TokenKind::OpenCurly, parse_curly_expr);

    // Compound statements
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Try, parse_try_stmt);
    parser.stmt(TokenKind::With, parse_with_stmt);
    parser.stmt(TokenKind::Def, parse_fn_decl_stmt);
    parser.stmt(TokenKind::Class, parse_class_decl_stmt);
    parser.stmt(TokenKind::At, parse_decorated_stmt);
    parser.stmt(TokenKind::Async, parse_async_stmt);

    // Simple statements
    parser.simple_stmt(TokenKind::Pass, parse_keyword_stmt);
    parser.simple_stmt(TokenKind::Break, parse_keyword_stmt);
    parser.simple_stmt(TokenKind::Continue, parse_keyword_stmt);
    parser.simple_stmt(TokenKind::Return, parse_return_stmt);
    parser.simple_stmt(TokenKind::Raise, parse_raise_stmt);
    parser.simple_stmt(TokenKind::Global, parse_scope_stmt);
    parser.simple_stmt(TokenKind::Nonlocal, parse_scope_stmt);
    parser.simple_stmt(TokenKind::Del, parse_delete_stmt);
    parser.simple_stmt(TokenKind::Assert, parse_assert_stmt);
    parser.simple_stmt(TokenKind::Import, parse_import_stmt);
    parser.simple_stmt(TokenKind::From, parse_import_from_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
