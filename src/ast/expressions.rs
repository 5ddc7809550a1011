use std::fmt::Display;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    ast::{all_well_formed, render_list, ErrorNode, Ident, Node},
    types::Type,
};

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Literal(BasicLit),
    Paren(ParenExpr),
    /// An operand followed by at least one suffix.
    Primary(PrimaryExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Error(ErrorNode),
}

impl Node for Expr {
    fn well_formed(&self) -> bool {
        match self {
            Expr::Ident(ident) => ident.well_formed(),
            Expr::Literal(_) => true,
            Expr::Paren(paren) => paren.inner.well_formed(),
            Expr::Primary(primary) => primary.well_formed(),
            Expr::Unary(unary) => unary.operand.well_formed(),
            Expr::Binary(binary) => binary.left.well_formed() && binary.right.well_formed(),
            Expr::Error(_) => false,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident(ident) => write!(f, "{}", ident),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Paren(paren) => write!(f, "({})", paren.inner),
            Expr::Primary(primary) => write!(f, "{}", primary),
            Expr::Unary(unary) => write!(f, "{}{}", unary.op.as_str(), unary.operand),
            Expr::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.left,
                binary.op.as_str(),
                binary.right
            ),
            Expr::Error(err) => write!(f, "{}", err),
        }
    }
}

// LITERALS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    String,
}

/// Basic Literal
/// The raw token text; string literals keep their escapes and drop the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub span: Span,
}

impl Display for BasicLit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            LitKind::Int => write!(f, "{}", self.value),
            LitKind::String => write!(f, "\"{}\"", self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Complement,
    Deref,
    Address,
    Receive,
}

impl UnaryOp {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind != TokenKind::OpOrDelim {
            return None;
        }
        let op = match token.value.as_str() {
            "+" => UnaryOp::Plus,
            "-" => UnaryOp::Minus,
            "!" => UnaryOp::Not,
            "^" => UnaryOp::Complement,
            "*" => UnaryOp::Deref,
            "&" => UnaryOp::Address,
            "<-" => UnaryOp::Receive,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::Complement => "^",
            UnaryOp::Deref => "*",
            UnaryOp::Address => "&",
            UnaryOp::Receive => "<-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind != TokenKind::OpOrDelim {
            return None;
        }
        Self::from_op(&token.value)
    }

    pub fn from_op(op: &str) -> Option<Self> {
        let op = match op {
            "||" => BinaryOp::LogicalOr,
            "&&" => BinaryOp::LogicalAnd,
            "==" => BinaryOp::Equal,
            "!=" => BinaryOp::NotEqual,
            "<" => BinaryOp::Less,
            "<=" => BinaryOp::LessEqual,
            ">" => BinaryOp::Greater,
            ">=" => BinaryOp::GreaterEqual,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "|" => BinaryOp::Or,
            "^" => BinaryOp::Xor,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "<<" => BinaryOp::Shl,
            ">>" => BinaryOp::Shr,
            "&" => BinaryOp::And,
            "&^" => BinaryOp::AndNot,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::AndNot => "&^",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

// PRIMARY EXPRESSIONS

/// Primary Expression
///
/// `a.b[c](d)` is the operand `a` followed by the chain
/// `.b` -> `[c]` -> `(d)`, each suffix owning the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryExpr {
    pub operand: Box<Expr>,
    pub suffix: Suffix,
    pub span: Span,
}

impl PrimaryExpr {
    /// Walks the suffix chain from the operand outwards.
    pub fn suffixes(&self) -> SuffixIter<'_> {
        SuffixIter {
            current: Some(&self.suffix),
        }
    }
}

impl Node for PrimaryExpr {
    fn well_formed(&self) -> bool {
        self.operand.well_formed() && self.suffixes().all(|s| s.kind.well_formed())
    }
}

impl Display for PrimaryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operand)?;
        for suffix in self.suffixes() {
            write!(f, "{}", suffix.kind)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suffix {
    pub kind: SuffixKind,
    pub next: Option<Box<Suffix>>,
}

pub struct SuffixIter<'a> {
    current: Option<&'a Suffix>,
}

impl<'a> Iterator for SuffixIter<'a> {
    type Item = &'a Suffix;

    fn next(&mut self) -> Option<Self::Item> {
        let suffix = self.current?;
        self.current = suffix.next.as_deref();
        Some(suffix)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuffixKind {
    Selector(Ident),
    Index(Box<Expr>),
    Slice {
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
        cap: Option<Box<Expr>>,
    },
    TypeAssertion(Type),
    Call(Arguments),
}

fn optional_well_formed(expr: &Option<Box<Expr>>) -> bool {
    expr.as_ref().map_or(true, |e| e.well_formed())
}

fn render_optional(expr: &Option<Box<Expr>>) -> String {
    expr.as_ref().map(|e| e.to_string()).unwrap_or_default()
}

impl Node for SuffixKind {
    fn well_formed(&self) -> bool {
        match self {
            SuffixKind::Selector(ident) => ident.well_formed(),
            SuffixKind::Index(index) => index.well_formed(),
            // A three-index slice needs both the end and the capacity.
            SuffixKind::Slice { start, end, cap } => {
                optional_well_formed(start)
                    && optional_well_formed(end)
                    && optional_well_formed(cap)
                    && (cap.is_none() || end.is_some())
            }
            SuffixKind::TypeAssertion(ty) => ty.well_formed(),
            SuffixKind::Call(args) => all_well_formed(&args.exprs),
        }
    }
}

impl Display for SuffixKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuffixKind::Selector(ident) => write!(f, ".{}", ident),
            SuffixKind::Index(index) => write!(f, "[{}]", index),
            SuffixKind::Slice { start, end, cap } => {
                write!(f, "[{}:{}", render_optional(start), render_optional(end))?;
                if cap.is_some() {
                    write!(f, ":{}", render_optional(cap))?;
                }
                write!(f, "]")
            }
            SuffixKind::TypeAssertion(ty) => write!(f, ".({})", ty),
            SuffixKind::Call(args) => write!(f, "({})", args),
        }
    }
}

/// Call arguments; `ellipsis` marks a trailing `...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    pub exprs: Vec<Expr>,
    pub ellipsis: bool,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_list(&self.exprs, ", "))?;
        if self.ellipsis {
            write!(f, "...")?;
        }
        Ok(())
    }
}
