//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser is recursive descent: one function per nonterminal, each called
//! only when the next token is in that nonterminal's start set. Ambiguous
//! alternatives are tried speculatively under a tracker and rolled back on
//! failure.
//!
//! It maintains lookup tables for:
//! - Declaration handlers, keyed by keyword
//! - Statement handlers, keyed by keyword or delimiter
//! - Binding powers for binary operators (precedence)

use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use log::{debug, trace};

use crate::{
    ast::{ast::{ErrorNode, Tree}, expressions::BinaryOp},
    errors::errors::{Diagnostic, Error, ErrorImpl},
    lexer::{
        lexer::scan,
        tokens::{Tok, Token, TokenKind},
    },
    Position, Span,
};

use super::{
    cursor::TokenCursor,
    decl::parse_source_file,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, StmtHandler,
        StmtLookup, TOK_CLOSE_BRACKET, TOK_CLOSE_CURLY, TOK_CLOSE_PAREN, TOK_OPEN_BRACKET,
        TOK_OPEN_CURLY, TOK_OPEN_PAREN, TOK_SEMICOLON,
    },
};

/// The main parser structure that maintains parsing state.
///
/// This struct owns the token cursor and the lookup tables for statements,
/// declarations and operator precedence. Cursor operations (`next`, `peek`,
/// `accept`, trackers) are reached through `Deref`.
pub struct Parser {
    /// Buffered tokens, trackers and recorded diagnostics
    cursor: TokenCursor,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for declaration parsing handlers
    decl_lookup: DeclLookup,
    /// Lookup table for binary operator binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Deref for Parser {
    type Target = TokenCursor;

    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl DerefMut for Parser {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

impl Parser {
    /// Creates a new Parser instance with its lookup tables filled in.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The token stream to parse, usually from [`scan`]
    pub fn new(tokens: impl Iterator<Item = Token> + 'static) -> Self {
        let mut parser = Parser {
            cursor: TokenCursor::new(tokens),
            stmt_lookup: HashMap::new(),
            decl_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Registers a binding power for a binary operator.
    ///
    /// # Arguments
    ///
    /// * `op` - The operator to register
    /// * `binding_power` - The precedence/binding power for this operator
    pub fn led(&mut self, op: BinaryOp, binding_power: BindingPower) {
        self.binding_power_lookup.insert(op, binding_power);
    }

    /// Registers a statement handler for a keyword or delimiter.
    ///
    /// # Arguments
    ///
    /// * `tok` - The token that starts the statement
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, tok: Tok, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(tok.value, stmt_fn);
    }

    /// Registers a declaration handler for a keyword.
    ///
    /// # Arguments
    ///
    /// * `tok` - The keyword that starts the declaration
    /// * `decl_fn` - The handler function for this declaration type
    pub fn decl(&mut self, tok: Tok, decl_fn: DeclHandler) {
        self.decl_lookup.insert(tok.value, decl_fn);
    }

    /// Returns the statement handler registered for `token`, if any.
    pub fn get_stmt_handler(&self, token: &Token) -> Option<StmtHandler> {
        match token.kind {
            TokenKind::Keyword | TokenKind::OpOrDelim => {
                self.stmt_lookup.get(token.value.as_str()).copied()
            }
            _ => None,
        }
    }

    /// Returns the declaration handler registered for `token`, if any.
    pub fn get_decl_handler(&self, token: &Token) -> Option<DeclHandler> {
        match token.kind {
            TokenKind::Keyword => self.decl_lookup.get(token.value.as_str()).copied(),
            _ => None,
        }
    }

    /// Returns the binding power of a binary operator.
    pub fn get_binding_power(&self, op: BinaryOp) -> BindingPower {
        self.binding_power_lookup
            .get(&op)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.last_span().end.clone(),
        }
    }

    /// Builds a [`ErrorImpl::MissingNode`] error at the next token.
    ///
    /// If the next token cannot be read, that (fatal) error is returned instead.
    pub fn missing(&mut self, message: &str) -> Error {
        match self.peek() {
            Ok(token) => Error::new(
                ErrorImpl::MissingNode {
                    message: message.to_string(),
                },
                token.span.start,
            ),
            Err(err) => err,
        }
    }

    /// Turns a production-local error into an Error node and a diagnostic.
    ///
    /// Fatal errors are handed back unchanged so they keep propagating.
    pub fn recover(&mut self, err: Error) -> Result<ErrorNode, Error> {
        if err.is_fatal() {
            return Err(err);
        }
        debug!("recovering at {}: {}", err.get_position().0, err);

        let position = err.get_position().clone();
        let span = Span {
            start: position.clone(),
            end: position,
        };
        Ok(self.add_error(err.to_string(), span))
    }

    /// Runs `production` under a tracker.
    ///
    /// # Returns
    ///
    /// `Some` if it succeeded without recording diagnostics. Otherwise the
    /// tokens it consumed and the diagnostics it recorded are rolled back and
    /// `None` is returned. Fatal errors propagate.
    pub fn attempt<T>(
        &mut self,
        production: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        self.speculate(production, true)
    }

    /// Like [`Parser::attempt`], but keeps any `Ok` result even if it
    /// recorded diagnostics. Only a returned local error rolls back.
    pub fn attempt_committed<T>(
        &mut self,
        production: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        self.speculate(production, false)
    }

    fn speculate<T>(
        &mut self,
        production: impl FnOnce(&mut Parser) -> Result<T, Error>,
        require_valid: bool,
    ) -> Result<Option<T>, Error> {
        self.open_tracker();

        match production(self) {
            Ok(node) if !require_valid || self.valid() => {
                self.close_tracker();
                Ok(Some(node))
            }
            Ok(_) => {
                trace!("abandoning attempt with diagnostics");
                self.backtrack();
                self.close_tracker();
                Ok(None)
            }
            Err(err) if err.is_fatal() => {
                self.close_tracker();
                Err(err)
            }
            Err(err) => {
                trace!("abandoning attempt: {}", err);
                self.backtrack();
                self.close_tracker();
                Ok(None)
            }
        }
    }

    /// Skips tokens up to the next `;`, `)` or `}` outside any brackets
    /// opened while skipping. The stopping token is not consumed.
    pub fn skip_to_terminator(&mut self) -> Result<(), Error> {
        let mut depth = 0usize;

        loop {
            let token = self.peek()?;
            if token.kind == TokenKind::EOF {
                break;
            }
            if depth == 0 && token.is_one_of_many(&[TOK_SEMICOLON, TOK_CLOSE_PAREN, TOK_CLOSE_CURLY]) {
                break;
            }

            if token.is_one_of_many(&[TOK_OPEN_PAREN, TOK_OPEN_BRACKET, TOK_OPEN_CURLY]) {
                depth += 1;
            } else if token.is_one_of_many(&[TOK_CLOSE_PAREN, TOK_CLOSE_BRACKET, TOK_CLOSE_CURLY]) {
                depth = depth.saturating_sub(1);
            }
            trace!("skipping {}", token);
            self.next()?;
        }

        Ok(())
    }

    /// Like [`Parser::skip_to_terminator`], but also drops any stray closer
    /// listed in `stray` and keeps going. Stops before `;`, the end token or
    /// a closer not in `stray`. Records no diagnostic.
    pub fn resync(&mut self, stray: &[Tok]) -> Result<(), Error> {
        loop {
            self.skip_to_terminator()?;
            if !self.accept_any(stray)? {
                return Ok(());
            }
            let token = self.next()?;
            trace!("dropping stray {}", token);
        }
    }
}

/// Parses a token stream into a best-effort [`Tree`].
///
/// Syntax errors do not fail the call: they end up as Error nodes in the
/// tree and as entries in `Tree::errors`. Only scanner errors and a stream
/// that ends early are returned as `Err`.
pub fn parse_tree(tokens: impl Iterator<Item = Token> + 'static) -> Result<Tree, Error> {
    let mut parser = Parser::new(tokens);
    let decls = parse_source_file(&mut parser)?;
    let errors = parser.take_errors();

    debug!(
        "parsed {} declaration(s) with {} error(s)",
        decls.len(),
        errors.len()
    );
    Ok(Tree::new(decls, errors))
}

/// Parses a token stream, failing with [`ErrorImpl::SyntaxErrors`] if any
/// diagnostic was recorded.
pub fn parse(tokens: impl Iterator<Item = Token> + 'static) -> Result<Tree, Error> {
    let tree = parse_tree(tokens)?;

    match tree.errors.first() {
        None => Ok(tree),
        Some(first) => Err(Error::new(
            ErrorImpl::SyntaxErrors {
                diagnostics: tree.errors.clone(),
            },
            first.span.start.clone(),
        )),
    }
}

/// Scans and parses `source` in one go.
pub fn parse_source(name: &str, source: &str) -> Result<Tree, Error> {
    parse_tree(scan(name, source))
}

/// Runs a single production over a token stream.
///
/// Used for fragments such as one expression or one statement. The cursor
/// is positioned at the first token, so the caller is responsible for
/// choosing a production whose start set matches.
pub fn parse_with<T>(
    tokens: impl Iterator<Item = Token> + 'static,
    production: fn(&mut Parser) -> Result<T, Error>,
) -> Result<(T, Vec<Diagnostic>), Error> {
    let mut parser = Parser::new(tokens);
    let node = production(&mut parser)?;
    Ok((node, parser.take_errors()))
}
