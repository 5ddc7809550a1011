use crate::{
    ast::{
        ast::Ident,
        expressions::{
            Arguments, BasicLit, BinaryExpr, BinaryOp, Expr, LitKind, ParenExpr, PrimaryExpr,
            Suffix, SuffixKind, UnaryExpr, UnaryOp,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    EXPECT, TRY_NODE,
};

use super::{
    lookups::{
        BindingPower, TOK_CLOSE_BRACKET, TOK_CLOSE_PAREN, TOK_COLON, TOK_COMMA, TOK_DOT,
        TOK_ELLIPSIS, TOK_IDENT, TOK_OPEN_BRACKET, TOK_OPEN_PAREN, TOP_OPERAND, TOP_UNARY_OP,
    },
    parser::Parser,
    types::parse_type,
};

pub fn parse_ident(parser: &mut Parser) -> Result<Ident, Error> {
    parser.expect(TOK_IDENT)?;
    let token = parser.next()?;

    Ok(Ident {
        name: token.value,
        span: token.span,
    })
}

/// IdentifierList = identifier { "," identifier } .
pub fn parse_identifier_list(parser: &mut Parser) -> Result<Vec<Ident>, Error> {
    let mut names = vec![parse_ident(parser)?];

    while parser.accept(TOK_COMMA)? {
        parser.next()?;
        names.push(parse_ident(parser)?);
    }

    Ok(names)
}

/// ExpressionList = Expression { "," Expression } .
pub fn parse_expression_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![parse_expression(parser)?];

    while parser.accept(TOK_COMMA)? {
        parser.next()?;
        exprs.push(parse_expression(parser)?);
    }

    Ok(exprs)
}

pub fn parse_expression(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Default)
}

/// Precedence climbing: keep folding operators that bind tighter than `bp`
/// into the left operand. Equal binding power stops the loop, so operators
/// of one level associate to the left.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let start = parser.peek()?.span.start;
    let mut left = parse_unary_expr(parser)?;

    loop {
        let token = parser.peek()?;
        let Some(op) = BinaryOp::from_token(&token) else {
            break;
        };
        let op_bp = parser.get_binding_power(op);
        if op_bp <= bp {
            break;
        }

        parser.next()?;
        let right = parse_binary_expr(parser, op_bp)?;

        left = Expr::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span: parser.span_from(start.clone()),
        });
    }

    Ok(left)
}

/// UnaryExpr = PrimaryExpr | unary_op UnaryExpr .
pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.peek()?;

    if token.is_one_of_many(&TOP_UNARY_OP) {
        if let Some(op) = UnaryOp::from_token(&token) {
            parser.next()?;
            let operand = parse_unary_expr(parser)?;

            return Ok(Expr::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
                span: parser.span_from(token.span.start),
            }));
        }
    }

    parse_primary_expr(parser)
}

/// PrimaryExpr = Operand { Selector | Index | Slice | TypeAssertion | Call } .
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.peek()?.span.start;
    let operand = parse_operand(parser)?;
    if let Expr::Error(_) = operand {
        return Ok(operand);
    }

    let suffix = TRY_NODE!(parser, parse_suffix_chain(parser), Expr::Error);

    Ok(match suffix {
        Some(suffix) => Expr::Primary(PrimaryExpr {
            operand: Box::new(operand),
            suffix,
            span: parser.span_from(start),
        }),
        None => operand,
    })
}

/// Operand = int_lit | string_lit | identifier | "(" Expression ")" .
pub fn parse_operand(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.peek()?;

    if !token.is_one_of_many(&TOP_OPERAND) {
        let err = parser.missing("expected expression");
        return Ok(Expr::Error(parser.recover(err)?));
    }

    let token = parser.next()?;
    let expr = match token.kind {
        TokenKind::Identifier => Expr::Ident(Ident {
            name: token.value,
            span: token.span,
        }),
        TokenKind::Int => Expr::Literal(BasicLit {
            kind: LitKind::Int,
            value: token.value,
            span: token.span,
        }),
        TokenKind::String => Expr::Literal(BasicLit {
            kind: LitKind::String,
            value: token.value,
            span: token.span,
        }),
        _ => {
            let inner = parse_expression(parser)?;
            EXPECT!(parser, TOK_CLOSE_PAREN, Expr::Error);

            Expr::Paren(ParenExpr {
                inner: Box::new(inner),
                span: parser.span_from(token.span.start),
            })
        }
    };

    Ok(expr)
}

/// Parses the run of suffixes after an operand, each owning the next.
fn parse_suffix_chain(parser: &mut Parser) -> Result<Option<Suffix>, Error> {
    let Some(kind) = parse_suffix(parser)? else {
        return Ok(None);
    };
    let next = parse_suffix_chain(parser)?.map(Box::new);

    Ok(Some(Suffix { kind, next }))
}

fn parse_suffix(parser: &mut Parser) -> Result<Option<SuffixKind>, Error> {
    let token = parser.peek()?;

    if token.is(TOK_DOT) {
        if let Some(selector) = parser.attempt(parse_selector)? {
            return Ok(Some(selector));
        }
        return parse_type_assertion(parser).map(Some);
    }

    if token.is(TOK_OPEN_BRACKET) {
        return parse_index_or_slice(parser).map(Some);
    }

    if token.is(TOK_OPEN_PAREN) {
        return parse_call(parser).map(Some);
    }

    Ok(None)
}

/// Selector = "." identifier .
fn parse_selector(parser: &mut Parser) -> Result<SuffixKind, Error> {
    parser.next()?;
    Ok(SuffixKind::Selector(parse_ident(parser)?))
}

/// TypeAssertion = "." "(" Type ")" .
fn parse_type_assertion(parser: &mut Parser) -> Result<SuffixKind, Error> {
    parser.next()?;
    parser.expect(TOK_OPEN_PAREN)?;
    parser.next()?;
    let ty = parse_type(parser)?;
    parser.expect(TOK_CLOSE_PAREN)?;
    parser.next()?;

    Ok(SuffixKind::TypeAssertion(ty))
}

/// Index = "[" Expression "]" .
/// Slice = "[" [ Expression ] ":" [ Expression ] "]"
///       | "[" [ Expression ] ":" Expression ":" Expression "]" .
///
/// Both share the leading expression, so it is read once and the next token
/// picks the form.
fn parse_index_or_slice(parser: &mut Parser) -> Result<SuffixKind, Error> {
    parser.next()?;

    let start = if parser.accept(TOK_COLON)? {
        None
    } else {
        Some(Box::new(parse_expression(parser)?))
    };

    if let Some(index) = start {
        if parser.accept(TOK_CLOSE_BRACKET)? {
            parser.next()?;
            return Ok(SuffixKind::Index(index));
        }
        return parse_slice_rest(parser, Some(index));
    }
    parse_slice_rest(parser, None)
}

/// The part of a slice after its optional start expression.
fn parse_slice_rest(parser: &mut Parser, start: Option<Box<Expr>>) -> Result<SuffixKind, Error> {
    parser.expect(TOK_COLON)?;
    parser.next()?;

    let mut end = None;
    let mut cap = None;
    if !parser.accept(TOK_CLOSE_BRACKET)? {
        end = Some(Box::new(parse_expression(parser)?));
        if parser.accept(TOK_COLON)? {
            parser.next()?;
            cap = Some(Box::new(parse_expression(parser)?));
        }
    }
    parser.expect(TOK_CLOSE_BRACKET)?;
    parser.next()?;

    Ok(SuffixKind::Slice { start, end, cap })
}

/// Call = "(" [ ExpressionList [ "..." ] [ "," ] ] ")" .
fn parse_call(parser: &mut Parser) -> Result<SuffixKind, Error> {
    parser.next()?;

    let mut exprs = vec![];
    let mut ellipsis = false;
    while !parser.accept(TOK_CLOSE_PAREN)? {
        exprs.push(parse_expression(parser)?);
        if parser.accept(TOK_ELLIPSIS)? {
            parser.next()?;
            ellipsis = true;
        }
        if !parser.accept(TOK_COMMA)? {
            break;
        }
        parser.next()?;
        // only a trailing comma may follow `...`
        if ellipsis {
            break;
        }
    }
    parser.expect(TOK_CLOSE_PAREN)?;
    parser.next()?;

    Ok(SuffixKind::Call(Arguments { exprs, ellipsis }))
}
