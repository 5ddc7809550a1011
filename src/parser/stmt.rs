use log::debug;

use crate::{
    ast::{
        ast::{Ident, Node},
        statements::{
            AssignOp, Assignment, Block, BranchKind, BranchStmt, Else, ForClause, ForHeader,
            ForStmt, IfStmt, IncDecStmt, LabeledStmt, RangeClause, RangeKey, ReturnStmt, SendStmt,
            ShortVarDecl, SimpleStmt, Stmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    TRY_NODE,
};

use super::{
    expr::{parse_expression, parse_expression_list, parse_ident, parse_identifier_list},
    lookups::{
        TOK_ARROW, TOK_ASSIGN, TOK_CLOSE_CURLY, TOK_CLOSE_PAREN, TOK_COLON, TOK_DEC, TOK_DEFINE,
        TOK_ELSE, TOK_GOTO, TOK_IDENT, TOK_IF, TOK_INC, TOK_OPEN_CURLY, TOK_RANGE, TOK_SEMICOLON,
        TOP_DECLARATION, TOP_EXPR, TOP_SIMPLE_STMT, TOP_STATEMENT,
    },
    parser::Parser,
};

pub fn parse_statement(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.peek()?;

    if let Some(handler) = parser.get_stmt_handler(&token) {
        return handler(parser);
    }

    if token.kind == TokenKind::Identifier {
        if let Some(label) = parser.attempt(parse_label)? {
            return parse_labeled_stmt(parser, label);
        }
    }

    if token.is_one_of_many(&TOP_SIMPLE_STMT) {
        return Ok(Stmt::Simple(parse_simple_stmt(parser)?));
    }

    let err = parser.missing("expected statement");
    Ok(Stmt::Error(parser.recover(err)?))
}

/// StatementList = { Statement ";" } .
///
/// The last `;` before the closing `}` may be left out. After a statement
/// that is not well-formed, or one followed by junk, the list resynchronises
/// on the next `;` or `}`.
pub fn parse_statement_list(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut stmts = vec![];

    loop {
        let token = parser.peek()?;
        if token.is(TOK_CLOSE_CURLY) || token.kind == TokenKind::EOF {
            break;
        }
        if token.is(TOK_SEMICOLON) {
            parser.next()?;
            stmts.push(Stmt::Empty(token.span));
            continue;
        }

        let stmt = parse_statement(parser)?;
        let failed = !stmt.well_formed();
        if matches!(stmt, Stmt::Error(_)) && !token.is_one_of_many(&TOP_STATEMENT) {
            // nothing was consumed for a token that cannot start a statement
            parser.next()?;
        }
        stmts.push(stmt);

        let token = parser.peek()?;
        if token.is(TOK_SEMICOLON) {
            parser.next()?;
        } else if token.is(TOK_CLOSE_CURLY) || token.kind == TokenKind::EOF {
            break;
        } else {
            // a statement that already failed has reported its fault
            if !failed {
                if let Err(err) = parser.expect(TOK_SEMICOLON) {
                    stmts.push(Stmt::Error(parser.recover(err)?));
                }
                parser.next()?;
            }
            debug!("resynchronising statement list");
            parser.resync(&[TOK_CLOSE_PAREN])?;
            if parser.accept(TOK_SEMICOLON)? {
                parser.next()?;
            }
        }
    }

    Ok(stmts)
}

/// Block = "{" StatementList "}" .
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    if !parser.accept(TOK_OPEN_CURLY)? {
        return Err(parser.missing("expected block"));
    }
    let start = parser.next()?.span.start;

    let stmts = parse_statement_list(parser)?;
    parser.expect(TOK_CLOSE_CURLY)?;
    parser.next()?;

    Ok(Block {
        stmts,
        span: parser.span_from(start),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let block = TRY_NODE!(parser, parse_block(parser), Stmt::Error);
    Ok(Stmt::Block(block))
}

/// const, type and var declarations inside a function body.
pub fn parse_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.peek()?;

    match parser.get_decl_handler(&token) {
        Some(handler) if token.is_one_of_many(&TOP_DECLARATION) => Ok(Stmt::Decl(handler(parser)?)),
        _ => {
            let err = parser.missing("expected declaration");
            Ok(Stmt::Error(parser.recover(err)?))
        }
    }
}

fn parse_label(parser: &mut Parser) -> Result<Ident, Error> {
    let label = parse_ident(parser)?;
    parser.expect(TOK_COLON)?;
    parser.next()?;
    Ok(label)
}

/// LabeledStmt = Label ":" Statement . A label right before `}` or `;`
/// labels an empty statement.
fn parse_labeled_stmt(parser: &mut Parser, label: Ident) -> Result<Stmt, Error> {
    let start = label.span.start.clone();

    let stmt = if parser.accept_any(&[TOK_SEMICOLON, TOK_CLOSE_CURLY])? {
        Stmt::Empty(parser.last_span().clone())
    } else {
        parse_statement(parser)?
    };

    Ok(Stmt::Labeled(LabeledStmt {
        label,
        stmt: Box::new(stmt),
        span: parser.span_from(start),
    }))
}

pub fn parse_go_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.next()?;
    Ok(Stmt::Go(parse_expression(parser)?))
}

pub fn parse_defer_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.next()?;
    Ok(Stmt::Defer(parse_expression(parser)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.next()?.span.start;

    let results = if parser.accept_any(&TOP_EXPR)? {
        parse_expression_list(parser)?
    } else {
        vec![]
    };

    Ok(Stmt::Return(ReturnStmt {
        results,
        span: parser.span_from(start),
    }))
}

/// break, continue, goto and fallthrough.
pub fn parse_branch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.next()?;
    let kind = match token.value.as_str() {
        "break" => BranchKind::Break,
        "continue" => BranchKind::Continue,
        "goto" => BranchKind::Goto,
        _ => BranchKind::Fallthrough,
    };

    let label = if token.is(TOK_GOTO) {
        Some(TRY_NODE!(parser, parse_ident(parser), Stmt::Error))
    } else if kind != BranchKind::Fallthrough && parser.accept(TOK_IDENT)? {
        Some(parse_ident(parser)?)
    } else {
        None
    };

    Ok(Stmt::Branch(BranchStmt {
        kind,
        label,
        span: parser.span_from(token.span.start),
    }))
}

// SIMPLE STATEMENTS

/// SimpleStmt = ShortVarDecl | Assignment | IncDecStmt | SendStmt | ExpressionStmt .
///
/// All of them start with an expression, so each form is attempted in turn
/// and the bare expression is the fallback.
pub fn parse_simple_stmt(parser: &mut Parser) -> Result<SimpleStmt, Error> {
    if let Some(decl) = parser.attempt(parse_short_var_decl)? {
        return Ok(SimpleStmt::ShortVarDecl(decl));
    }
    if let Some(assignment) = parser.attempt(parse_assignment)? {
        return Ok(SimpleStmt::Assign(assignment));
    }
    if let Some(stmt) = parser.attempt(parse_inc_dec_stmt)? {
        return Ok(SimpleStmt::IncDec(stmt));
    }
    if let Some(send) = parser.attempt(parse_send_stmt)? {
        return Ok(SimpleStmt::Send(send));
    }

    Ok(SimpleStmt::Expr(parse_expression(parser)?))
}

/// ShortVarDecl = IdentifierList ":=" ExpressionList .
fn parse_short_var_decl(parser: &mut Parser) -> Result<ShortVarDecl, Error> {
    let start = parser.peek()?.span.start;
    let names = parse_identifier_list(parser)?;
    parser.expect(TOK_DEFINE)?;
    parser.next()?;
    let values = parse_expression_list(parser)?;

    Ok(ShortVarDecl {
        names,
        values,
        span: parser.span_from(start),
    })
}

/// Assignment = ExpressionList assign_op ExpressionList .
fn parse_assignment(parser: &mut Parser) -> Result<Assignment, Error> {
    let start = parser.peek()?.span.start;
    let lhs = parse_expression_list(parser)?;

    let token = parser.peek()?;
    let Some(op) = AssignOp::from_token(&token) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("assignment operator"),
                received: token.to_string(),
            },
            token.span.start,
        ));
    };
    parser.next()?;
    let rhs = parse_expression_list(parser)?;

    Ok(Assignment {
        lhs,
        op,
        rhs,
        span: parser.span_from(start),
    })
}

/// IncDecStmt = Expression ( "++" | "--" ) .
fn parse_inc_dec_stmt(parser: &mut Parser) -> Result<IncDecStmt, Error> {
    let start = parser.peek()?.span.start;
    let expr = parse_expression(parser)?;

    let increment = parser.accept(TOK_INC)?;
    if !increment {
        parser.expect(TOK_DEC)?;
    }
    parser.next()?;

    Ok(IncDecStmt {
        expr,
        increment,
        span: parser.span_from(start),
    })
}

/// SendStmt = Channel "<-" Expression .
fn parse_send_stmt(parser: &mut Parser) -> Result<SendStmt, Error> {
    let start = parser.peek()?.span.start;
    let channel = parse_expression(parser)?;
    parser.expect(TOK_ARROW)?;
    parser.next()?;
    let value = parse_expression(parser)?;

    Ok(SendStmt {
        channel,
        value,
        span: parser.span_from(start),
    })
}

// CONTROL FLOW

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let stmt = TRY_NODE!(parser, parse_if(parser), Stmt::Error);
    Ok(Stmt::If(stmt))
}

/// IfStmt = "if" [ SimpleStmt ";" ] Expression Block [ "else" ( IfStmt | Block ) ] .
///
/// The head is first read as a simple statement. If no `;` follows, the
/// same tokens are read again as the condition.
pub fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.next()?.span.start;

    let init = if parser.accept(TOK_SEMICOLON)? {
        parser.next()?;
        None
    } else {
        parser.attempt_committed(|parser| {
            let stmt = parse_simple_stmt(parser)?;
            parser.expect(TOK_SEMICOLON)?;
            parser.next()?;
            Ok(stmt)
        })?
    };

    let condition = parse_expression(parser)?;
    let body = parse_block(parser)?;

    let otherwise = if parser.accept(TOK_ELSE)? {
        parser.next()?;
        if parser.accept(TOK_IF)? {
            Some(Else::If(Box::new(parse_if(parser)?)))
        } else if parser.accept(TOK_OPEN_CURLY)? {
            Some(Else::Block(parse_block(parser)?))
        } else {
            return Err(parser.missing("expected if statement or block"));
        }
    } else {
        None
    };

    Ok(IfStmt {
        init,
        condition,
        body,
        otherwise,
        span: parser.span_from(start),
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let stmt = TRY_NODE!(parser, parse_for(parser), Stmt::Error);
    Ok(Stmt::For(stmt))
}

/// ForStmt = "for" [ RangeClause | ForClause | Expression ] Block .
pub fn parse_for(parser: &mut Parser) -> Result<ForStmt, Error> {
    let start = parser.next()?.span.start;

    let header = if parser.accept(TOK_OPEN_CURLY)? {
        None
    } else if let Some(range) = parser.attempt(parse_range_clause)? {
        Some(ForHeader::Range(range))
    } else if let Some(clause) = parser.attempt(parse_for_clause)? {
        Some(ForHeader::Clause(clause))
    } else {
        Some(ForHeader::Condition(parse_expression(parser)?))
    };

    let body = parse_block(parser)?;

    Ok(ForStmt {
        header,
        body,
        span: parser.span_from(start),
    })
}

/// RangeClause = ( IdentifierList ":=" | ExpressionList "=" ) "range" Expression .
pub(super) fn parse_range_clause(parser: &mut Parser) -> Result<RangeClause, Error> {
    let define = parser.attempt(|parser| {
        let names = parse_identifier_list(parser)?;
        parser.expect(TOK_DEFINE)?;
        parser.next()?;
        Ok(names)
    })?;

    let key = match define {
        Some(names) => RangeKey::Define(names),
        None => {
            let exprs = parse_expression_list(parser)?;
            parser.expect(TOK_ASSIGN)?;
            parser.next()?;
            RangeKey::Assign(exprs)
        }
    };

    parser.expect(TOK_RANGE)?;
    parser.next()?;
    let expr = parse_expression(parser)?;

    Ok(RangeClause { key, expr })
}

/// ForClause = [ SimpleStmt ] ";" [ Expression ] ";" [ SimpleStmt ] .
fn parse_for_clause(parser: &mut Parser) -> Result<ForClause, Error> {
    let init = if parser.accept(TOK_SEMICOLON)? {
        None
    } else {
        Some(parse_simple_stmt(parser)?)
    };
    parser.expect(TOK_SEMICOLON)?;
    parser.next()?;

    let condition = if parser.accept(TOK_SEMICOLON)? {
        None
    } else {
        Some(parse_expression(parser)?)
    };
    parser.expect(TOK_SEMICOLON)?;
    parser.next()?;

    let post = if parser.accept(TOK_OPEN_CURLY)? {
        None
    } else {
        Some(parse_simple_stmt(parser)?)
    };

    Ok(ForClause {
        init,
        condition,
        post,
    })
}
