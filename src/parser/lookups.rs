use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{declarations::Decl, expressions::BinaryOp, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::{Tok, TokenKind},
};

use super::{decl::*, parser::Parser, stmt::*};

pub const TOK_IDENT: Tok = Tok::any(TokenKind::Identifier);
pub const TOK_INT: Tok = Tok::any(TokenKind::Int);
pub const TOK_STRING: Tok = Tok::any(TokenKind::String);

pub const TOK_PACKAGE: Tok = Tok::keyword("package");
pub const TOK_IMPORT: Tok = Tok::keyword("import");
pub const TOK_CONST: Tok = Tok::keyword("const");
pub const TOK_TYPE: Tok = Tok::keyword("type");
pub const TOK_VAR: Tok = Tok::keyword("var");
pub const TOK_FUNC: Tok = Tok::keyword("func");
pub const TOK_GO: Tok = Tok::keyword("go");
pub const TOK_DEFER: Tok = Tok::keyword("defer");
pub const TOK_RETURN: Tok = Tok::keyword("return");
pub const TOK_BREAK: Tok = Tok::keyword("break");
pub const TOK_CONTINUE: Tok = Tok::keyword("continue");
pub const TOK_GOTO: Tok = Tok::keyword("goto");
pub const TOK_FALLTHROUGH: Tok = Tok::keyword("fallthrough");
pub const TOK_IF: Tok = Tok::keyword("if");
pub const TOK_ELSE: Tok = Tok::keyword("else");
pub const TOK_FOR: Tok = Tok::keyword("for");
pub const TOK_RANGE: Tok = Tok::keyword("range");

pub const TOK_SEMICOLON: Tok = Tok::op(";");
pub const TOK_COLON: Tok = Tok::op(":");
pub const TOK_COMMA: Tok = Tok::op(",");
pub const TOK_DOT: Tok = Tok::op(".");
pub const TOK_ELLIPSIS: Tok = Tok::op("...");
pub const TOK_ASSIGN: Tok = Tok::op("=");
pub const TOK_DEFINE: Tok = Tok::op(":=");
pub const TOK_ARROW: Tok = Tok::op("<-");
pub const TOK_INC: Tok = Tok::op("++");
pub const TOK_DEC: Tok = Tok::op("--");
pub const TOK_STAR: Tok = Tok::op("*");
pub const TOK_OPEN_PAREN: Tok = Tok::op("(");
pub const TOK_CLOSE_PAREN: Tok = Tok::op(")");
pub const TOK_OPEN_BRACKET: Tok = Tok::op("[");
pub const TOK_CLOSE_BRACKET: Tok = Tok::op("]");
pub const TOK_OPEN_CURLY: Tok = Tok::op("{");
pub const TOK_CLOSE_CURLY: Tok = Tok::op("}");

// Start sets. Every production that is dispatched on a start set needs its
// tokens listed here, or it can never be reached.
lazy_static! {
    pub static ref TOP_UNARY_OP: Vec<Tok> = vec![
        Tok::op("+"),
        Tok::op("-"),
        Tok::op("!"),
        Tok::op("^"),
        Tok::op("*"),
        Tok::op("&"),
        TOK_ARROW,
    ];

    pub static ref TOP_OPERAND: Vec<Tok> = vec![TOK_IDENT, TOK_INT, TOK_STRING, TOK_OPEN_PAREN];

    pub static ref TOP_EXPR: Vec<Tok> = {
        let mut set = TOP_OPERAND.clone();
        set.extend(TOP_UNARY_OP.iter().copied());
        set
    };

    pub static ref TOP_SIMPLE_STMT: Vec<Tok> = TOP_EXPR.clone();

    pub static ref TOP_TYPE: Vec<Tok> = vec![TOK_IDENT, TOK_OPEN_PAREN, TOK_STAR, TOK_OPEN_BRACKET];

    pub static ref TOP_PARAMETER_DECL: Vec<Tok> = {
        let mut set = TOP_TYPE.clone();
        set.push(TOK_ELLIPSIS);
        set
    };

    pub static ref TOP_DECLARATION: Vec<Tok> = vec![TOK_CONST, TOK_TYPE, TOK_VAR];

    pub static ref TOP_TOP_LEVEL_DECL: Vec<Tok> = {
        let mut set = TOP_DECLARATION.clone();
        set.push(TOK_FUNC);
        set
    };

    pub static ref TOP_STATEMENT: Vec<Tok> = {
        let mut set = TOP_DECLARATION.clone();
        set.extend([
            TOK_GO,
            TOK_DEFER,
            TOK_RETURN,
            TOK_BREAK,
            TOK_CONTINUE,
            TOK_GOTO,
            TOK_FALLTHROUGH,
            TOK_OPEN_CURLY,
            TOK_IF,
            TOK_FOR,
            TOK_SEMICOLON,
        ]);
        set.extend(TOP_SIMPLE_STMT.iter().copied());
        set
    };
}

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Relational,
    Additive,
    Multiplicative,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type DeclHandler = fn(&mut Parser) -> Result<Decl, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(BinaryOp::LogicalOr, BindingPower::LogicalOr);
    parser.led(BinaryOp::LogicalAnd, BindingPower::LogicalAnd);

    // Relational
    parser.led(BinaryOp::Equal, BindingPower::Relational);
    parser.led(BinaryOp::NotEqual, BindingPower::Relational);
    parser.led(BinaryOp::Less, BindingPower::Relational);
    parser.led(BinaryOp::LessEqual, BindingPower::Relational);
    parser.led(BinaryOp::Greater, BindingPower::Relational);
    parser.led(BinaryOp::GreaterEqual, BindingPower::Relational);

    // Additive and multiplicative
    parser.led(BinaryOp::Add, BindingPower::Additive);
    parser.led(BinaryOp::Sub, BindingPower::Additive);
    parser.led(BinaryOp::Or, BindingPower::Additive);
    parser.led(BinaryOp::Xor, BindingPower::Additive);
    parser.led(BinaryOp::Mul, BindingPower::Multiplicative);
    parser.led(BinaryOp::Div, BindingPower::Multiplicative);
    parser.led(BinaryOp::Rem, BindingPower::Multiplicative);
    parser.led(BinaryOp::Shl, BindingPower::Multiplicative);
    parser.led(BinaryOp::Shr, BindingPower::Multiplicative);
    parser.led(BinaryOp::And, BindingPower::Multiplicative);
    parser.led(BinaryOp::AndNot, BindingPower::Multiplicative);

    // Declarations
    parser.decl(TOK_IMPORT, parse_import_decl);
    parser.decl(TOK_CONST, parse_const_decl);
    parser.decl(TOK_TYPE, parse_type_decl);
    parser.decl(TOK_VAR, parse_var_decl);
    parser.decl(TOK_FUNC, parse_func_decl);

    // Statements
    parser.stmt(TOK_CONST, parse_decl_stmt);
    parser.stmt(TOK_TYPE, parse_decl_stmt);
    parser.stmt(TOK_VAR, parse_decl_stmt);
    parser.stmt(TOK_GO, parse_go_stmt);
    parser.stmt(TOK_DEFER, parse_defer_stmt);
    parser.stmt(TOK_RETURN, parse_return_stmt);
    parser.stmt(TOK_BREAK, parse_branch_stmt);
    parser.stmt(TOK_CONTINUE, parse_branch_stmt);
    parser.stmt(TOK_GOTO, parse_branch_stmt);
    parser.stmt(TOK_FALLTHROUGH, parse_branch_stmt);
    parser.stmt(TOK_OPEN_CURLY, parse_block_stmt);
    parser.stmt(TOK_IF, parse_if_stmt);
    parser.stmt(TOK_FOR, parse_for_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<&'static str, StmtHandler>;
pub type DeclLookup = HashMap<&'static str, DeclHandler>;
pub type BPLookup = HashMap<BinaryOp, BindingPower>;
