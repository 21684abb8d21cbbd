use crate::{
    ast::{
        expressions::Expr,
        operators::BinOp,
        statements::{
            Alias, ClassDef, ExceptHandler, ForLoop, FunctionDef, Stmt, TryBlock, WithBlock,
            WithItem,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{
            check_target, find_invalid_target, parse_call_arguments, parse_expr, parse_parameters,
            parse_target_list, parse_testlist,
        },
        lookups::BindingPower,
    },
    Position,
};

use super::parser::Parser;

/// Parses the statement(s) at the current position. A compound statement is
/// one statement; a simple line may hold several separated by `;`.
pub fn parse_stmt(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let kind = parser.current_token_kind();

    if kind == TokenKind::Indent {
        return Err(Error::new(ErrorImpl::UnexpectedIndent, parser.get_position()));
    }

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return Ok(vec![handler(parser)?]);
    }

    parse_simple_stmts(parser)
}

fn parse_simple_stmts(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![];

    loop {
        body.push(parse_small_stmt(parser)?);

        if parser.current_token_kind() != TokenKind::Semicolon {
            break;
        }
        parser.advance();

        if parser.current_token().is_line_end() {
            break;
        }
    }

    match parser.current_token_kind() {
        TokenKind::Newline => {
            parser.advance();
        }
        TokenKind::EOF => {}
        _ => return Err(parser.unexpected()),
    }

    Ok(body)
}

fn parse_small_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();

    if let Some(handler) = parser.get_simple_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if parser.get_stmt_lookup().contains_key(&kind) {
        return Err(parser.unexpected());
    }

    parse_expression_stmt(parser)
}

/// Parses an indented block, or simple statements on the header's own line.
fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect_detailed(TokenKind::Colon, "expected ':'")?;

    if parser.current_token_kind() != TokenKind::Newline {
        return parse_simple_stmts(parser);
    }
    parser.advance();

    if parser.current_token_kind() != TokenKind::Indent {
        return Err(Error::new(ErrorImpl::ExpectedIndentedBlock, parser.get_position()));
    }
    parser.advance();

    let mut body = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Dedent | TokenKind::EOF
    ) {
        body.extend(parse_stmt(parser)?);
    }

    if parser.current_token_kind() == TokenKind::Dedent {
        parser.advance();
    }

    Ok(body)
}

fn parse_else_block(parser: &mut Parser) -> Result<Option<Vec<Stmt>>, Error> {
    if parser.current_token_kind() != TokenKind::Else {
        return Ok(None);
    }

    parser.advance();
    Ok(Some(parse_block(parser)?))
}

fn augmented_operator(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::PlusEquals => Some(BinOp::Add),
        TokenKind::MinusEquals => Some(BinOp::Sub),
        TokenKind::StarEquals => Some(BinOp::Mult),
        TokenKind::AtEquals => Some(BinOp::MatMult),
        TokenKind::SlashEquals => Some(BinOp::Div),
        TokenKind::SlashSlashEquals => Some(BinOp::FloorDiv),
        TokenKind::PercentEquals => Some(BinOp::Mod),
        TokenKind::StarStarEquals => Some(BinOp::Pow),
        TokenKind::ShiftLeftEquals => Some(BinOp::LShift),
        TokenKind::ShiftRightEquals => Some(BinOp::RShift),
        TokenKind::PipeEquals => Some(BinOp::BitOr),
        TokenKind::CaretEquals => Some(BinOp::BitXor),
        TokenKind::AmpersandEquals => Some(BinOp::BitAnd),
        _ => None,
    }
}

fn is_single_target(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Name { .. } | Expr::Attribute { .. } | Expr::Subscript { .. }
    )
}

fn detailed_error_at(token: &str, message: String, position: Position) -> Error {
    Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: String::from(token),
            message,
        },
        position,
    )
}

/// Expression statements, plain, chained, augmented and annotated
/// assignments, and the `type X = ...` alias.
pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.current_token_kind() == TokenKind::Identifier
        && parser.current_token().value == "type"
        && parser.peek_kind() == TokenKind::Identifier
    {
        return parse_type_alias_stmt(parser);
    }

    let position = parser.get_position();
    let first = parse_testlist(parser)?;
    let kind = parser.current_token_kind();

    if kind == TokenKind::Colon {
        if !is_single_target(&first) {
            return Err(detailed_error_at(
                first.describe(),
                format!("only single target (not {}) can be annotated", first.describe()),
                position,
            ));
        }
        parser.advance();

        let annotation = parse_expr(parser, BindingPower::Default)?;
        let value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_testlist(parser)?)
        } else {
            None
        };

        return Ok(Stmt::AnnAssign {
            simple: matches!(first, Expr::Name { .. }),
            target: first,
            annotation,
            value,
        });
    }

    if let Some(op) = augmented_operator(kind) {
        if !is_single_target(&first) {
            return Err(detailed_error_at(
                first.describe(),
                format!(
                    "'{}' is an illegal expression for augmented assignment",
                    first.describe()
                ),
                position,
            ));
        }
        parser.advance();

        let value = parse_testlist(parser)?;
        return Ok(Stmt::AugAssign {
            target: first,
            op,
            value,
        });
    }

    if kind != TokenKind::Assignment {
        return Ok(Stmt::Expr { value: first });
    }

    let mut targets = vec![(first, position)];
    let value = loop {
        parser.advance();
        let position = parser.get_position();
        let next = parse_testlist(parser)?;

        if parser.current_token_kind() != TokenKind::Assignment {
            break next;
        }
        targets.push((next, position));
    };

    let mut checked = Vec::with_capacity(targets.len());
    for (target, position) in targets {
        check_target(&target, position)?;
        checked.push(target);
    }

    Ok(Stmt::Assign {
        targets: checked,
        value,
    })
}

fn parse_type_alias_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let name = Expr::name(parser.expect(TokenKind::Identifier)?.value);

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::TypeAlias { name, value })
}

pub fn parse_keyword_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.advance().kind {
        TokenKind::Break => Ok(Stmt::Break),
        TokenKind::Continue => Ok(Stmt::Continue),
        _ => Ok(Stmt::Pass),
    }
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let value = if parser.at_expr_start() {
        Some(parse_testlist(parser)?)
    } else {
        None
    };

    Ok(Stmt::Return { value })
}

pub fn parse_raise_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    if !parser.at_expr_start() {
        return Ok(Stmt::Raise {
            exc: None,
            cause: None,
        });
    }

    let exc = parse_expr(parser, BindingPower::Default)?;
    let cause = if parser.current_token_kind() == TokenKind::From {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Stmt::Raise {
        exc: Some(exc),
        cause,
    })
}

pub fn parse_scope_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.advance().kind;

    let mut names = vec![parser.expect(TokenKind::Identifier)?.value];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        names.push(parser.expect(TokenKind::Identifier)?.value);
    }

    if kind == TokenKind::Global {
        Ok(Stmt::Global { names })
    } else {
        Ok(Stmt::Nonlocal { names })
    }
}

pub fn parse_delete_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let mut targets = vec![];

    loop {
        let position = parser.get_position();
        let target = parse_expr(parser, BindingPower::BitwiseOr)?;

        if let Some(invalid) = find_invalid_target(&target) {
            return Err(detailed_error_at(
                invalid.describe(),
                format!("cannot delete {}", invalid.describe()),
                position,
            ));
        }
        targets.push(target);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
        if !parser.at_expr_start() {
            break;
        }
    }

    Ok(Stmt::Delete { targets })
}

pub fn parse_assert_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let test = parse_expr(parser, BindingPower::Default)?;

    let msg = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Stmt::Assert { test, msg })
}

fn parse_dotted_name(parser: &mut Parser) -> Result<String, Error> {
    let mut name = parser.expect(TokenKind::Identifier)?.value;

    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        name.push('.');
        name.push_str(&parser.expect(TokenKind::Identifier)?.value);
    }

    Ok(name)
}

fn parse_alias_name(parser: &mut Parser, name: String) -> Result<Alias, Error> {
    let asname = if parser.current_token_kind() == TokenKind::As {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    Ok(Alias { name, asname })
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let mut names = vec![];

    loop {
        let name = parse_dotted_name(parser)?;
        names.push(parse_alias_name(parser, name)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(Stmt::Import { names })
}

/// `from .. pkg import a as b, c`. Dots count towards the relative level;
/// the lexer reads `...` as one token worth three.
pub fn parse_import_from_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let mut level = 0;
    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => level += 1,
            TokenKind::Ellipsis => level += 3,
            _ => break,
        }
        parser.advance();
    }

    let module = if parser.current_token_kind() == TokenKind::Identifier {
        Some(parse_dotted_name(parser)?)
    } else if level == 0 {
        return Err(parser.unexpected());
    } else {
        None
    };

    parser.expect(TokenKind::Import)?;

    if parser.current_token_kind() == TokenKind::Star {
        parser.advance();
        return Ok(Stmt::ImportFrom {
            module,
            names: vec![Alias {
                name: String::from("*"),
                asname: None,
            }],
            level,
        });
    }

    let parenthesised = parser.current_token_kind() == TokenKind::OpenParen;
    if parenthesised {
        parser.advance();
    }

    let mut names = vec![];
    loop {
        let name = parser.expect(TokenKind::Identifier)?.value;
        names.push(parse_alias_name(parser, name)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();

        if parser.current_token_kind() != TokenKind::Identifier {
            if parenthesised {
                break;
            }
            return Err(parser.detailed_error(
                "trailing comma not allowed without surrounding parentheses",
            ));
        }
    }

    if parenthesised {
        parser.expect(TokenKind::CloseParen)?;
    }

    Ok(Stmt::ImportFrom {
        module,
        names,
        level,
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // `if` or `elif`
    parser.advance();

    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    let orelse = match parser.current_token_kind() {
        TokenKind::Elif => Some(vec![parse_if_stmt(parser)?]),
        _ => parse_else_block(parser)?,
    };

    Ok(Stmt::If { test, body, orelse })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;
    let orelse = parse_else_block(parser)?;

    Ok(Stmt::While { test, body, orelse })
}

fn parse_for_loop(parser: &mut Parser) -> Result<ForLoop, Error> {
    parser.expect(TokenKind::For)?;

    let position = parser.get_position();
    let target = parse_target_list(parser)?;
    check_target(&target, position)?;

    parser.expect(TokenKind::In)?;
    let iter = parse_testlist(parser)?;

    let body = parse_block(parser)?;
    let orelse = parse_else_block(parser)?;

    Ok(ForLoop {
        target,
        iter,
        body,
        orelse,
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::For(parse_for_loop(parser)?))
}

pub fn parse_try_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();
    let body = parse_block(parser)?;

    let mut handlers = vec![];
    while parser.current_token_kind() == TokenKind::Except {
        parser.advance();

        let (type_, name) = match parser.current_token_kind() {
            TokenKind::Colon => (None, None),
            TokenKind::Star => return Err(parser.unexpected()),
            _ => {
                let type_ = parse_expr(parser, BindingPower::Default)?;
                let name = if parser.current_token_kind() == TokenKind::As {
                    parser.advance();
                    Some(parser.expect(TokenKind::Identifier)?.value)
                } else {
                    None
                };
                (Some(type_), name)
            }
        };

        let body = parse_block(parser)?;
        handlers.push(ExceptHandler { type_, name, body });
    }

    if handlers.is_empty() && parser.current_token_kind() != TokenKind::Finally {
        return Err(parser.detailed_error("expected 'except' or 'finally' block"));
    }

    let orelse = parse_else_block(parser)?;
    let finalbody = if parser.current_token_kind() == TokenKind::Finally {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Stmt::Try(TryBlock {
        body,
        handlers,
        orelse,
        finalbody,
    }))
}

fn parse_with_block(parser: &mut Parser) -> Result<WithBlock, Error> {
    parser.expect(TokenKind::With)?;
    let mut items = vec![];

    loop {
        let context_expr = parse_expr(parser, BindingPower::Default)?;

        let optional_vars = if parser.current_token_kind() == TokenKind::As {
            parser.advance();
            let position = parser.get_position();
            let target = parse_expr(parser, BindingPower::BitwiseOr)?;
            check_target(&target, position)?;
            Some(target)
        } else {
            None
        };

        items.push(WithItem {
            context_expr,
            optional_vars,
        });

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    let body = parse_block(parser)?;
    Ok(WithBlock { items, body })
}

pub fn parse_with_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::With(parse_with_block(parser)?))
}

fn parse_function_def(parser: &mut Parser) -> Result<FunctionDef, Error> {
    parser.expect(TokenKind::Def)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect_detailed(TokenKind::OpenParen, "expected '('")?;
    let args = parse_parameters(parser, TokenKind::CloseParen, true)?;
    parser.expect(TokenKind::CloseParen)?;

    let returns = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(FunctionDef {
        name,
        args,
        body,
        decorator_list: vec![],
        returns,
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::FunctionDef(parse_function_def(parser)?))
}

fn parse_class_def(parser: &mut Parser) -> Result<ClassDef, Error> {
    parser.expect(TokenKind::Class)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    let (bases, keywords) = if parser.current_token_kind() == TokenKind::OpenParen {
        parse_call_arguments(parser)?
    } else {
        (vec![], vec![])
    };

    let body = parse_block(parser)?;

    Ok(ClassDef {
        name,
        bases,
        keywords,
        body,
        decorator_list: vec![],
    })
}

pub fn parse_class_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::ClassDef(parse_class_def(parser)?))
}

pub fn parse_async_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance();

    match parser.current_token_kind() {
        TokenKind::Def => Ok(Stmt::AsyncFunctionDef(parse_function_def(parser)?)),
        TokenKind::For => Ok(Stmt::AsyncFor(parse_for_loop(parser)?)),
        TokenKind::With => Ok(Stmt::AsyncWith(parse_with_block(parser)?)),
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_decorated_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let mut decorator_list = vec![];

    while parser.current_token_kind() == TokenKind::At {
        parser.advance();
        decorator_list.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect(TokenKind::Newline)?;
    }

    match parser.current_token_kind() {
        TokenKind::Def => {
            let function = parse_function_def(parser)?;
            Ok(Stmt::FunctionDef(FunctionDef {
                decorator_list,
                ..function
            }))
        }
        TokenKind::Async if parser.peek_kind() == TokenKind::Def => {
            parser.advance();
            let function = parse_function_def(parser)?;
            Ok(Stmt::AsyncFunctionDef(FunctionDef {
                decorator_list,
                ..function
            }))
        }
        TokenKind::Class => {
            let class = parse_class_def(parser)?;
            Ok(Stmt::ClassDef(ClassDef {
                decorator_list,
                ..class
            }))
        }
        _ => Err(parser.unexpected()),
    }
}
