use crate::{
    ast::{
        expressions::{Comprehension, Expr, Number, Singleton, Slice},
        operators::{BinOp, BoolOp, CmpOp, UnaryOp},
        statements::{Arg, Arguments, Keyword},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let mut levels = 1;
    let result = parse_expr_levels(parser, bp, &mut levels);
    parser.leave_nesting(levels);
    result
}

/// Each prefix recursion and each infix extension of `left` deepens the tree
/// by one; `levels` counts how many this call has opened.
fn parse_expr_levels(
    parser: &mut Parser,
    bp: BindingPower,
    levels: &mut usize,
) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current one, keep extending lhs
    while let Some(&next_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()) {
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        parser.enter_nesting()?;
        *levels += 1;
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Parses comma-separated expressions at the given binding power. More than
/// one expression, or a trailing comma, makes a tuple.
pub fn parse_expr_list(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let first = parse_expr(parser, bp)?;
    if parser.current_token_kind() != TokenKind::Comma {
        return Ok(first);
    }

    let mut elts = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if !parser.at_expr_start() {
            break;
        }
        elts.push(parse_expr(parser, bp)?);
    }

    Ok(Expr::Tuple { elts })
}

pub fn parse_testlist(parser: &mut Parser) -> Result<Expr, Error> {
    parse_expr_list(parser, BindingPower::Default)
}

/// Targets stop short of comparisons so that `for x in y` leaves `in` alone.
pub fn parse_target_list(parser: &mut Parser) -> Result<Expr, Error> {
    parse_expr_list(parser, BindingPower::BitwiseOr)
}

/// Finds the first part of an assignment target that cannot be bound.
pub fn find_invalid_target(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Name { .. } | Expr::Attribute { .. } | Expr::Subscript { .. } => None,
        Expr::Tuple { elts } | Expr::List { elts } => elts.iter().find_map(find_invalid_target),
        Expr::Starred { value } => find_invalid_target(value),
        other => Some(other),
    }
}

pub fn check_target(expr: &Expr, position: Position) -> Result<(), Error> {
    match find_invalid_target(expr) {
        Some(invalid) => Err(Error::new(
            ErrorImpl::InvalidTarget {
                target: invalid.describe().to_string(),
            },
            position,
        )),
        None => Ok(()),
    }
}

fn classify_number(text: &str) -> Number {
    let text = text.replace('_', "");
    let lower = text.to_ascii_lowercase();

    if lower.ends_with('j') {
        Number::Imaginary(text)
    } else if lower.starts_with("0x") || lower.starts_with("0o") || lower.starts_with("0b") {
        Number::Int(text)
    } else if lower.contains('.') || lower.contains('e') {
        Number::Float(text)
    } else {
        Number::Int(text)
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Number => Ok(Expr::Num(classify_number(&token.value))),
        TokenKind::Identifier => Ok(Expr::Name { id: token.value }),
        TokenKind::True => Ok(Expr::NameConstant(Singleton::True)),
        TokenKind::False => Ok(Expr::NameConstant(Singleton::False)),
        TokenKind::None => Ok(Expr::NameConstant(Singleton::None)),
        TokenKind::Ellipsis => Ok(Expr::Ellipsis),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.describe(),
            },
            token.span.start,
        )),
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Dash => Some(BinOp::Sub),
        TokenKind::Star => Some(BinOp::Mult),
        TokenKind::At => Some(BinOp::MatMult),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::SlashSlash => Some(BinOp::FloorDiv),
        TokenKind::Percent => Some(BinOp::Mod),
        TokenKind::StarStar => Some(BinOp::Pow),
        TokenKind::ShiftLeft => Some(BinOp::LShift),
        TokenKind::ShiftRight => Some(BinOp::RShift),
        TokenKind::Pipe => Some(BinOp::BitOr),
        TokenKind::Caret => Some(BinOp::BitXor),
        TokenKind::Ampersand => Some(BinOp::BitAnd),
        _ => None,
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let error = parser.unexpected();
    let op = binary_operator(parser.advance().kind).ok_or(error)?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::BinOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

/// `**` is right associative and binds looser than a unary operator on its
/// right: `2 ** -1`, `a ** b ** c`.
pub fn parse_power_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::BinOp {
        left: Box::new(left),
        op: BinOp::Pow,
        right: Box::new(right),
    })
}

pub fn parse_bool_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let kind = parser.current_token_kind();
    let op = if kind == TokenKind::And {
        BoolOp::And
    } else {
        BoolOp::Or
    };

    let mut values = vec![left];
    while parser.current_token_kind() == kind {
        parser.advance();
        values.push(parse_expr(parser, bp)?);
    }

    Ok(Expr::BoolOp { op, values })
}

fn parse_comparison_operator(parser: &mut Parser) -> Result<Option<CmpOp>, Error> {
    let op = match parser.current_token_kind() {
        TokenKind::Equals => CmpOp::Eq,
        TokenKind::NotEquals => CmpOp::NotEq,
        TokenKind::Less => CmpOp::Lt,
        TokenKind::LessEquals => CmpOp::LtE,
        TokenKind::Greater => CmpOp::Gt,
        TokenKind::GreaterEquals => CmpOp::GtE,
        TokenKind::In => CmpOp::In,
        TokenKind::Not => {
            parser.advance();
            parser.expect(TokenKind::In)?;
            return Ok(Some(CmpOp::NotIn));
        }
        TokenKind::Is => {
            parser.advance();
            if parser.current_token_kind() == TokenKind::Not {
                parser.advance();
                return Ok(Some(CmpOp::IsNot));
            }
            return Ok(Some(CmpOp::Is));
        }
        _ => return Ok(None),
    };

    parser.advance();
    Ok(Some(op))
}

/// Collects a whole comparison chain, `a < b <= c`, into one node.
pub fn parse_compare_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let mut ops = vec![];
    let mut comparators = vec![];

    while let Some(op) = parse_comparison_operator(parser)? {
        ops.push(op);
        comparators.push(parse_expr(parser, bp)?);
    }

    Ok(Expr::Compare {
        left: Box::new(left),
        ops,
        comparators,
    })
}

pub fn parse_named_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    if !matches!(left, Expr::Name { .. }) {
        return Err(parser.detailed_error(&format!(
            "cannot use assignment expressions with {}",
            left.describe()
        )));
    }

    parser.advance();
    let value = parse_expr(parser, bp)?;

    Ok(Expr::NamedExpr {
        target: Box::new(left),
        value: Box::new(value),
    })
}

pub fn parse_ternary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let test = parse_expr(parser, bp)?;

    parser.expect_detailed(TokenKind::Else, "expected 'else' after 'if' expression")?;
    let orelse = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::IfExp {
        test: Box::new(test),
        body: Box::new(left),
        orelse: Box::new(orelse),
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let op = match parser.advance().kind {
        TokenKind::Dash => UnaryOp::USub,
        TokenKind::Plus => UnaryOp::UAdd,
        _ => UnaryOp::Invert,
    };
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::UnaryOp {
        op,
        operand: Box::new(operand),
    })
}

pub fn parse_not_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let operand = parse_expr(parser, BindingPower::LogicalNot)?;

    Ok(Expr::UnaryOp {
        op: UnaryOp::Not,
        operand: Box::new(operand),
    })
}

pub fn parse_await_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let value = parse_expr(parser, BindingPower::Await)?;

    Ok(Expr::Await {
        value: Box::new(value),
    })
}

pub fn parse_starred_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let value = parse_expr(parser, BindingPower::BitwiseOr)?;

    Ok(Expr::Starred {
        value: Box::new(value),
    })
}

pub fn parse_yield_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    if parser.current_token_kind() == TokenKind::From {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        return Ok(Expr::YieldFrom {
            value: Box::new(value),
        });
    }

    let value = if parser.at_expr_start() {
        Some(Box::new(parse_testlist(parser)?))
    } else {
        None
    };

    Ok(Expr::Yield { value })
}

pub fn parse_lambda_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    let args = parse_parameters(parser, TokenKind::Colon, false)?;
    parser.expect_detailed(TokenKind::Colon, "expected ':'")?;
    let body = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::Lambda {
        args: Box::new(args),
        body: Box::new(body),
    })
}

fn parse_arg(parser: &mut Parser, annotated: bool) -> Result<Arg, Error> {
    let arg = parser.expect(TokenKind::Identifier)?.value;

    let annotation = if annotated && parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Arg { arg, annotation })
}

/// Parses a parameter list up to (not including) `closing`: `)` for a
/// function definition, `:` for a lambda, which cannot annotate.
pub fn parse_parameters(
    parser: &mut Parser,
    closing: TokenKind,
    annotated: bool,
) -> Result<Arguments, Error> {
    let mut arguments = Arguments::default();
    let mut keyword_only = false;

    while parser.current_token_kind() != closing {
        if arguments.kwarg.is_some() {
            return Err(parser.detailed_error("arguments cannot follow var-keyword argument"));
        }

        match parser.current_token_kind() {
            TokenKind::Slash => {
                if keyword_only || arguments.args.is_empty() {
                    return Err(parser.detailed_error("at least one argument must precede /"));
                }
                parser.advance();
                arguments.posonlyargs = std::mem::take(&mut arguments.args);
            }
            TokenKind::Star => {
                if keyword_only {
                    return Err(parser.detailed_error("* argument may appear only once"));
                }
                parser.advance();
                keyword_only = true;

                let kind = parser.current_token_kind();
                if kind != TokenKind::Comma && kind != closing {
                    arguments.vararg = Some(parse_arg(parser, annotated)?);
                }
            }
            TokenKind::StarStar => {
                parser.advance();
                arguments.kwarg = Some(parse_arg(parser, annotated)?);
            }
            _ => {
                let position = parser.get_position();
                let arg = parse_arg(parser, annotated)?;

                let default = if parser.current_token_kind() == TokenKind::Assignment {
                    parser.advance();
                    Some(parse_expr(parser, BindingPower::Default)?)
                } else {
                    None
                };

                if keyword_only {
                    arguments.kwonlyargs.push(arg);
                    arguments.kw_defaults.push(default);
                } else {
                    match default {
                        Some(default) => arguments.defaults.push(default),
                        None if !arguments.defaults.is_empty() => {
                            return Err(Error::new(
                                ErrorImpl::UnexpectedTokenDetailed {
                                    token: arg.arg,
                                    message: String::from(
                                        "non-default argument follows default argument",
                                    ),
                                },
                                position,
                            ));
                        }
                        None => {}
                    }
                    arguments.args.push(arg);
                }
            }
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(arguments)
}

pub fn at_comprehension(parser: &Parser) -> bool {
    match parser.current_token_kind() {
        TokenKind::For => true,
        TokenKind::Async => parser.peek_kind() == TokenKind::For,
        _ => false,
    }
}

pub fn parse_comprehension_clauses(parser: &mut Parser) -> Result<Vec<Comprehension>, Error> {
    let mut generators = vec![];

    while at_comprehension(parser) {
        let is_async = parser.current_token_kind() == TokenKind::Async;
        if is_async {
            parser.advance();
        }
        parser.expect(TokenKind::For)?;

        let position = parser.get_position();
        let target = parse_target_list(parser)?;
        check_target(&target, position)?;

        parser.expect(TokenKind::In)?;
        let iter = parse_expr(parser, BindingPower::Ternary)?;

        let mut ifs = vec![];
        while parser.current_token_kind() == TokenKind::If {
            parser.advance();
            ifs.push(parse_expr(parser, BindingPower::Ternary)?);
        }

        generators.push(Comprehension {
            target,
            iter,
            ifs,
            is_async,
        });
    }

    Ok(generators)
}

/// Parses `( ... )` call arguments, shared by calls and class bases.
pub fn parse_call_arguments(parser: &mut Parser) -> Result<(Vec<Expr>, Vec<Keyword>), Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    let mut keywords = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        match parser.current_token_kind() {
            TokenKind::StarStar => {
                parser.advance();
                let value = parse_expr(parser, BindingPower::Default)?;
                keywords.push(Keyword { arg: None, value });
            }
            TokenKind::Identifier if parser.peek_kind() == TokenKind::Assignment => {
                let arg = parser.advance().value.clone();
                parser.advance();
                let value = parse_expr(parser, BindingPower::Default)?;
                keywords.push(Keyword {
                    arg: Some(arg),
                    value,
                });
            }
            _ => {
                let position = parser.get_position();
                let value = parse_expr(parser, BindingPower::Default)?;

                if at_comprehension(parser) {
                    let generators = parse_comprehension_clauses(parser)?;
                    args.push(Expr::GeneratorExp {
                        elt: Box::new(value),
                        generators,
                    });
                } else if !keywords.is_empty() && !matches!(value, Expr::Starred { .. }) {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: String::from(value.describe()),
                            message: String::from("positional argument follows keyword argument"),
                        },
                        position,
                    ));
                } else {
                    args.push(value);
                }
            }
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok((args, keywords))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let (args, keywords) = parse_call_arguments(parser)?;

    Ok(Expr::Call {
        func: Box::new(left),
        args,
        keywords,
    })
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let attr = parser.expect(TokenKind::Identifier)?.value;

    Ok(Expr::Attribute {
        value: Box::new(left),
        attr,
    })
}

fn parse_slice_item(parser: &mut Parser) -> Result<Slice, Error> {
    let ends_item = |kind: TokenKind| {
        matches!(
            kind,
            TokenKind::Colon | TokenKind::Comma | TokenKind::CloseBracket
        )
    };

    let lower = if parser.current_token_kind() == TokenKind::Colon {
        None
    } else {
        let value = parse_expr(parser, BindingPower::Default)?;
        if parser.current_token_kind() != TokenKind::Colon {
            return Ok(Slice::Index { value });
        }
        Some(value)
    };

    parser.expect(TokenKind::Colon)?;

    let upper = if ends_item(parser.current_token_kind()) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    let mut step = None;
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        if !ends_item(parser.current_token_kind()) {
            step = Some(parse_expr(parser, BindingPower::Default)?);
        }
    }

    Ok(Slice::Slice { lower, upper, step })
}

/// `x[i]` gives an index, `x[a:b]` a slice, `x[i, j]` an index of a tuple and
/// `x[a:b, i]` an extended slice.
pub fn parse_subscript_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut items = vec![parse_slice_item(parser)?];
    let mut trailing_comma = false;

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        trailing_comma = true;
        if parser.current_token_kind() == TokenKind::CloseBracket {
            break;
        }
        items.push(parse_slice_item(parser)?);
        trailing_comma = false;
    }

    parser.expect(TokenKind::CloseBracket)?;

    let slice = if items.len() == 1 && !trailing_comma {
        items.remove(0)
    } else if items.iter().all(|item| matches!(item, Slice::Index { .. })) {
        Slice::Index {
            value: Expr::Tuple {
                elts: items
                    .into_iter()
                    .filter_map(|item| match item {
                        Slice::Index { value } => Some(value),
                        _ => None,
                    })
                    .collect(),
            },
        }
    } else {
        Slice::ExtSlice { dims: items }
    };

    Ok(Expr::Subscript {
        value: Box::new(left),
        slice: Box::new(slice),
    })
}

/// Parenthesised forms: grouping, tuples and generator expressions.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(Expr::Tuple { elts: vec![] });
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if at_comprehension(parser) {
        let generators = parse_comprehension_clauses(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        return Ok(Expr::GeneratorExp {
            elt: Box::new(first),
            generators,
        });
    }

    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(first);
    }

    let elts = parse_display_items(parser, first, TokenKind::CloseParen)?;
    Ok(Expr::Tuple { elts })
}

/// Collects the remaining comma-separated items of a display whose first item
/// has been parsed, consuming the closing bracket.
fn parse_display_items(parser: &mut Parser, first: Expr, closing: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut elts = vec![first];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == closing {
            break;
        }
        elts.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(closing)?;
    Ok(elts)
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    if parser.current_token_kind() == TokenKind::CloseBracket {
        parser.advance();
        return Ok(Expr::List { elts: vec![] });
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if at_comprehension(parser) {
        let generators = parse_comprehension_clauses(parser)?;
        parser.expect(TokenKind::CloseBracket)?;
        return Ok(Expr::ListComp {
            elt: Box::new(first),
            generators,
        });
    }

    let elts = parse_display_items(parser, first, TokenKind::CloseBracket)?;
    Ok(Expr::List { elts })
}

fn parse_dict_entries(parser: &mut Parser, key: Option<Expr>, value: Expr) -> Result<Expr, Error> {
    let mut keys = vec![key];
    let mut values = vec![value];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();

        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::StarStar => {
                parser.advance();
                keys.push(None);
                values.push(parse_expr(parser, BindingPower::BitwiseOr)?);
            }
            _ => {
                keys.push(Some(parse_expr(parser, BindingPower::Default)?));
                parser.expect_detailed(TokenKind::Colon, "':' expected after dictionary key")?;
                values.push(parse_expr(parser, BindingPower::Default)?);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(Expr::Dict { keys, values })
}

/// Braces hold a dictionary, a set, or a comprehension of either.
pub fn parse_curly_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    match parser.current_token_kind() {
        TokenKind::CloseCurly => {
            parser.advance();
            return Ok(Expr::Dict {
                keys: vec![],
                values: vec![],
            });
        }
        TokenKind::StarStar => {
            parser.advance();
            let value = parse_expr(parser, BindingPower::BitwiseOr)?;
            return parse_dict_entries(parser, None, value);
        }
        _ => {}
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;

        if at_comprehension(parser) {
            let generators = parse_comprehension_clauses(parser)?;
            parser.expect(TokenKind::CloseCurly)?;
            return Ok(Expr::DictComp {
                key: Box::new(first),
                value: Box::new(value),
                generators,
            });
        }

        return parse_dict_entries(parser, Some(first), value);
    }

    if at_comprehension(parser) {
        let generators = parse_comprehension_clauses(parser)?;
        parser.expect(TokenKind::CloseCurly)?;
        return Ok(Expr::SetComp {
            elt: Box::new(first),
            generators,
        });
    }

    let elts = parse_display_items(parser, first, TokenKind::CloseCurly)?;
    Ok(Expr::Set { elts })
}
