use crate::{
    ast::types::{FuncResult, ParameterDecl, Parameters, Signature, Type},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    EXPECT, TRY_NODE,
};

use super::{
    expr::{parse_ident, parse_identifier_list},
    lookups::{
        TOK_CLOSE_BRACKET, TOK_CLOSE_PAREN, TOK_COMMA, TOK_DOT, TOK_ELLIPSIS, TOK_OPEN_PAREN,
        TOK_STAR, TOP_PARAMETER_DECL, TOP_TYPE,
    },
    parser::Parser,
};

/// Type = TypeName | "(" Type ")" | "*" Type | "[" "]" Type .
pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.peek()?;

    if !token.is_one_of_many(&TOP_TYPE) {
        let err = parser.missing("expected type");
        return Ok(Type::Error(parser.recover(err)?));
    }

    if token.kind == TokenKind::Identifier {
        let name = TRY_NODE!(parser, parse_ident(parser), Type::Error);
        if parser.accept(TOK_DOT)? {
            parser.next()?;
            let member = TRY_NODE!(parser, parse_ident(parser), Type::Error);
            return Ok(Type::Qualified(name, member));
        }
        return Ok(Type::Named(name));
    }

    parser.next()?;
    if token.is(TOK_OPEN_PAREN) {
        let inner = parse_type(parser)?;
        EXPECT!(parser, TOK_CLOSE_PAREN, Type::Error);
        Ok(inner)
    } else if token.is(TOK_STAR) {
        Ok(Type::Pointer(Box::new(parse_type(parser)?)))
    } else {
        EXPECT!(parser, TOK_CLOSE_BRACKET, Type::Error);
        Ok(Type::Slice(Box::new(parse_type(parser)?)))
    }
}

/// Signature = Parameters [ Result ] .
pub fn parse_signature(parser: &mut Parser) -> Result<Signature, Error> {
    let params = parse_parameters(parser)?;

    let result = if parser.accept(TOK_OPEN_PAREN)? {
        // `()` or `((` can only be a parenthesised type; anything else is a
        // parameter list.
        let open = parser.next()?;
        let after = parser.peek()?;
        parser.push(open);

        if after.is(TOK_CLOSE_PAREN) || after.is(TOK_OPEN_PAREN) {
            Some(FuncResult::Type(parse_type(parser)?))
        } else {
            Some(FuncResult::Params(parse_parameters(parser)?))
        }
    } else if parser.accept_any(&TOP_TYPE)? {
        Some(FuncResult::Type(parse_type(parser)?))
    } else {
        None
    };

    Ok(Signature { params, result })
}

/// Parameters = "(" [ ParameterList [ "," ] ] ")" .
pub fn parse_parameters(parser: &mut Parser) -> Result<Parameters, Error> {
    parser.expect(TOK_OPEN_PAREN)?;
    let start = parser.next()?.span.start;

    let mut decls = vec![];
    while parser.accept_any(&TOP_PARAMETER_DECL)? {
        decls.push(parse_parameter_decl(parser)?);
        if !parser.accept(TOK_COMMA)? {
            break;
        }
        parser.next()?;
    }

    parser.expect(TOK_CLOSE_PAREN)?;
    parser.next()?;

    Ok(Parameters {
        decls,
        span: parser.span_from(start),
    })
}

fn accept_ellipsis(parser: &mut Parser) -> Result<bool, Error> {
    if parser.accept(TOK_ELLIPSIS)? {
        parser.next()?;
        return Ok(true);
    }
    Ok(false)
}

/// ParameterDecl = [ IdentifierList ] [ "..." ] Type .
///
/// The named form is tried first; `(int, string)` falls back to unnamed.
pub fn parse_parameter_decl(parser: &mut Parser) -> Result<ParameterDecl, Error> {
    let start = parser.peek()?.span.start;

    let named = parser.attempt(|parser| {
        let names = parse_identifier_list(parser)?;
        let variadic = accept_ellipsis(parser)?;
        let ty = parse_type(parser)?;
        Ok((names, variadic, ty))
    })?;

    let (names, variadic, ty) = match named {
        Some(parts) => parts,
        None => {
            let variadic = accept_ellipsis(parser)?;
            (vec![], variadic, parse_type(parser)?)
        }
    };

    Ok(ParameterDecl {
        names,
        variadic,
        ty,
        span: parser.span_from(start),
    })
}
