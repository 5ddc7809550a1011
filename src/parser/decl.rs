use log::debug;

use crate::{
    ast::{
        ast::{Ident, Node},
        declarations::{
            ConstSpec, Decl, FuncDecl, GenDecl, ImportSpec, PackageClause, Spec, TypeSpec, VarSpec,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    EXPECT, TRY_NODE,
};

use super::{
    expr::{parse_expression_list, parse_ident, parse_identifier_list},
    lookups::{
        TOK_ASSIGN, TOK_CLOSE_CURLY, TOK_CLOSE_PAREN, TOK_DOT, TOK_IDENT, TOK_IMPORT,
        TOK_OPEN_PAREN, TOK_PACKAGE, TOK_SEMICOLON, TOK_STRING, TOP_TOP_LEVEL_DECL, TOP_TYPE,
    },
    parser::Parser,
    stmt::parse_block,
    types::{parse_signature, parse_type},
};

type SpecHandler = fn(&mut Parser) -> Result<Spec, Error>;

/// SourceFile = [ PackageClause ";" ] { ImportDecl ";" } { TopLevelDecl ";" } .
pub fn parse_source_file(parser: &mut Parser) -> Result<Vec<Decl>, Error> {
    let mut decls = vec![];

    if parser.accept(TOK_PACKAGE)? {
        let package = parse_package_clause(parser)?;
        let failed = !package.well_formed();
        decls.push(package);
        end_top_level_decl(parser, &mut decls, failed)?;
    }

    let mut imports_allowed = true;

    loop {
        let token = parser.peek()?;
        if token.kind == TokenKind::EOF {
            break;
        }
        if token.is(TOK_SEMICOLON) {
            parser.next()?;
            continue;
        }

        let decl = match parser.get_decl_handler(&token) {
            Some(handler) if token.is(TOK_IMPORT) && imports_allowed => handler(parser)?,
            Some(handler) if token.is_one_of_many(&TOP_TOP_LEVEL_DECL) => {
                imports_allowed = false;
                handler(parser)?
            }
            _ => {
                let message = if token.is(TOK_IMPORT) {
                    "imports must appear before other declarations"
                } else {
                    "expected declaration"
                };
                let node = parser.recover(Error::new(
                    ErrorImpl::MissingNode {
                        message: message.to_string(),
                    },
                    token.span.start.clone(),
                ))?;
                // always make progress, even on a lone `)` or `}`
                parser.next()?;
                Decl::Error(node)
            }
        };

        let failed = !decl.well_formed();
        decls.push(decl);
        end_top_level_decl(parser, &mut decls, failed)?;
    }

    Ok(decls)
}

/// Consumes the `;` after a top-level declaration.
///
/// Anything else is an error, unless the declaration already `failed`: its
/// fault has been reported, so the leftovers are skipped without a second
/// diagnostic.
fn end_top_level_decl(
    parser: &mut Parser,
    decls: &mut Vec<Decl>,
    failed: bool,
) -> Result<(), Error> {
    let token = parser.peek()?;
    if token.kind == TokenKind::EOF {
        return Ok(());
    }

    if !token.is(TOK_SEMICOLON) {
        if !failed {
            if let Err(err) = parser.expect(TOK_SEMICOLON) {
                decls.push(Decl::Error(parser.recover(err)?));
            }
            parser.next()?;
        }
        debug!("resynchronising after top-level error");
        parser.resync(&[TOK_CLOSE_PAREN, TOK_CLOSE_CURLY])?;
        if !parser.accept(TOK_SEMICOLON)? {
            return Ok(());
        }
    }
    parser.next()?;
    Ok(())
}

fn parse_package_clause(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.next()?.span.start;
    let name = TRY_NODE!(parser, parse_ident(parser), Decl::Error);

    Ok(Decl::Package(PackageClause {
        name,
        span: parser.span_from(start),
    }))
}

/// A single spec, or a parenthesised group of specs separated by `;`.
fn parse_gen_decl(parser: &mut Parser, spec_fn: SpecHandler) -> Result<GenDecl, Error> {
    let start = parser.next()?.span.start;

    if !parser.accept(TOK_OPEN_PAREN)? {
        let spec = spec_fn(parser)?;
        return Ok(GenDecl {
            specs: vec![spec],
            grouped: false,
            span: parser.span_from(start),
        });
    }
    parser.next()?;

    let mut specs = vec![];
    loop {
        let token = parser.peek()?;
        if token.is(TOK_CLOSE_PAREN) || token.kind == TokenKind::EOF {
            break;
        }
        if token.is(TOK_SEMICOLON) {
            parser.next()?;
            continue;
        }

        let spec = spec_fn(parser)?;
        let failed = !spec.well_formed();
        specs.push(spec);
        if failed {
            parser.skip_to_terminator()?;
        }

        if parser.accept(TOK_SEMICOLON)? {
            parser.next()?;
        } else if !parser.accept(TOK_CLOSE_PAREN)? {
            parser.expect(TOK_SEMICOLON)?;
        }
    }

    parser.expect(TOK_CLOSE_PAREN)?;
    parser.next()?;

    Ok(GenDecl {
        specs,
        grouped: true,
        span: parser.span_from(start),
    })
}

pub fn parse_import_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let decl = TRY_NODE!(parser, parse_gen_decl(parser, parse_import_spec), Decl::Error);
    Ok(Decl::Import(decl))
}

pub fn parse_const_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let decl = TRY_NODE!(parser, parse_gen_decl(parser, parse_const_spec), Decl::Error);
    Ok(Decl::Const(decl))
}

pub fn parse_type_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let decl = TRY_NODE!(parser, parse_gen_decl(parser, parse_type_spec), Decl::Error);
    Ok(Decl::Type(decl))
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let decl = TRY_NODE!(parser, parse_gen_decl(parser, parse_var_spec), Decl::Error);
    Ok(Decl::Var(decl))
}

/// FunctionDecl = "func" identifier Signature Block .
pub fn parse_func_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.next()?.span.start;
    let name = TRY_NODE!(parser, parse_ident(parser), Decl::Error);
    let signature = TRY_NODE!(parser, parse_signature(parser), Decl::Error);
    let body = TRY_NODE!(parser, parse_block(parser), Decl::Error);

    Ok(Decl::Func(FuncDecl {
        name,
        signature,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_import_spec(parser: &mut Parser) -> Result<Spec, Error> {
    let start = parser.peek()?.span.start;

    let alias = if parser.accept_any(&[TOK_DOT, TOK_IDENT])? {
        let token = parser.next()?;
        Some(Ident {
            name: token.value,
            span: token.span,
        })
    } else {
        None
    };
    let path = EXPECT!(parser, TOK_STRING, Spec::Error).value;

    Ok(Spec::Import(ImportSpec {
        alias,
        path,
        span: parser.span_from(start),
    }))
}

/// ConstSpec = IdentifierList [ [ Type ] "=" ExpressionList ] .
pub fn parse_const_spec(parser: &mut Parser) -> Result<Spec, Error> {
    let start = parser.peek()?.span.start;
    let names = TRY_NODE!(parser, parse_identifier_list(parser), Spec::Error);

    let mut ty = None;
    if parser.accept_any(&TOP_TYPE)? {
        ty = Some(parse_type(parser)?);
        if !parser.accept(TOK_ASSIGN)? {
            let err = parser.missing("type allowed only if followed by expression");
            return Ok(Spec::Error(parser.recover(err)?));
        }
    }

    let mut values = vec![];
    if parser.accept(TOK_ASSIGN)? {
        parser.next()?;
        values = parse_expression_list(parser)?;
    }

    Ok(Spec::Const(ConstSpec {
        names,
        ty,
        values,
        span: parser.span_from(start),
    }))
}

/// TypeSpec = identifier Type .
pub fn parse_type_spec(parser: &mut Parser) -> Result<Spec, Error> {
    let start = parser.peek()?.span.start;
    let name = TRY_NODE!(parser, parse_ident(parser), Spec::Error);
    let ty = parse_type(parser)?;

    Ok(Spec::Type(TypeSpec {
        name,
        ty,
        span: parser.span_from(start),
    }))
}

/// VarSpec = IdentifierList ( Type [ "=" ExpressionList ] | "=" ExpressionList ) .
pub fn parse_var_spec(parser: &mut Parser) -> Result<Spec, Error> {
    let start = parser.peek()?.span.start;
    let names = TRY_NODE!(parser, parse_identifier_list(parser), Spec::Error);

    let ty = if parser.accept(TOK_ASSIGN)? {
        None
    } else {
        Some(parse_type(parser)?)
    };

    let mut values = vec![];
    if parser.accept(TOK_ASSIGN)? {
        parser.next()?;
        values = parse_expression_list(parser)?;
    }

    Ok(Spec::Var(VarSpec {
        names,
        ty,
        values,
        span: parser.span_from(start),
    }))
}
