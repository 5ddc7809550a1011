use std::fmt::Display;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    ast::{all_well_formed, render_list, ErrorNode, Ident, Node},
    declarations::Decl,
    expressions::{BinaryOp, Expr},
};

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Decl(Decl),
    Labeled(LabeledStmt),
    Simple(SimpleStmt),
    Go(Expr),
    Defer(Expr),
    Return(ReturnStmt),
    Branch(BranchStmt),
    Block(Block),
    If(IfStmt),
    For(ForStmt),
    Empty(Span),
    Error(ErrorNode),
}

impl Node for Stmt {
    fn well_formed(&self) -> bool {
        match self {
            Stmt::Decl(decl) => decl.well_formed(),
            Stmt::Labeled(labeled) => labeled.label.well_formed() && labeled.stmt.well_formed(),
            Stmt::Simple(simple) => simple.well_formed(),
            Stmt::Go(call) | Stmt::Defer(call) => call.well_formed(),
            Stmt::Return(ret) => all_well_formed(&ret.results),
            Stmt::Branch(branch) => branch.well_formed(),
            Stmt::Block(block) => block.well_formed(),
            Stmt::If(stmt) => stmt.well_formed(),
            Stmt::For(stmt) => stmt.well_formed(),
            Stmt::Empty(_) => true,
            Stmt::Error(_) => false,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Decl(decl) => write!(f, "{}", decl),
            Stmt::Labeled(labeled) => write!(f, "{}: {}", labeled.label, labeled.stmt),
            Stmt::Simple(simple) => write!(f, "{}", simple),
            Stmt::Go(call) => write!(f, "go {}", call),
            Stmt::Defer(call) => write!(f, "defer {}", call),
            Stmt::Return(ret) if ret.results.is_empty() => write!(f, "return"),
            Stmt::Return(ret) => write!(f, "return {}", render_list(&ret.results, ", ")),
            Stmt::Branch(branch) => write!(f, "{}", branch),
            Stmt::Block(block) => write!(f, "{}", block),
            Stmt::If(stmt) => write!(f, "{}", stmt),
            Stmt::For(stmt) => write!(f, "{}", stmt),
            Stmt::Empty(_) => Ok(()),
            Stmt::Error(err) => write!(f, "{}", err),
        }
    }
}

/// Block Statement
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Node for Block {
    fn well_formed(&self) -> bool {
        all_well_formed(&self.stmts)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.stmts.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{ {} }}", render_list(&self.stmts, "; "))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: Ident,
    pub stmt: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}

/// Branch Statement
/// `break`, `continue`, `goto` and `fallthrough`. Only `goto` needs a label.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub kind: BranchKind,
    pub label: Option<Ident>,
    pub span: Span,
}

impl Node for BranchStmt {
    fn well_formed(&self) -> bool {
        match (&self.kind, &self.label) {
            (BranchKind::Goto, None) => false,
            (BranchKind::Fallthrough, Some(_)) => false,
            (_, label) => label.as_ref().map_or(true, |l| l.well_formed()),
        }
    }
}

impl Display for BranchStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} {}", self.kind.as_str(), label),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

// SIMPLE STATEMENTS

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleStmt {
    Expr(Expr),
    Send(SendStmt),
    IncDec(IncDecStmt),
    Assign(Assignment),
    ShortVarDecl(ShortVarDecl),
}

impl Node for SimpleStmt {
    fn well_formed(&self) -> bool {
        match self {
            SimpleStmt::Expr(expr) => expr.well_formed(),
            SimpleStmt::Send(send) => send.channel.well_formed() && send.value.well_formed(),
            SimpleStmt::IncDec(stmt) => stmt.expr.well_formed(),
            SimpleStmt::Assign(assign) => {
                !assign.lhs.is_empty()
                    && !assign.rhs.is_empty()
                    && all_well_formed(&assign.lhs)
                    && all_well_formed(&assign.rhs)
            }
            SimpleStmt::ShortVarDecl(decl) => {
                !decl.names.is_empty()
                    && !decl.values.is_empty()
                    && all_well_formed(&decl.names)
                    && all_well_formed(&decl.values)
            }
        }
    }
}

impl Display for SimpleStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimpleStmt::Expr(expr) => write!(f, "{}", expr),
            SimpleStmt::Send(send) => write!(f, "{} <- {}", send.channel, send.value),
            SimpleStmt::IncDec(stmt) => {
                write!(f, "{}{}", stmt.expr, if stmt.increment { "++" } else { "--" })
            }
            SimpleStmt::Assign(assign) => write!(
                f,
                "{} {} {}",
                render_list(&assign.lhs, ", "),
                assign.op,
                render_list(&assign.rhs, ", ")
            ),
            SimpleStmt::ShortVarDecl(decl) => write!(
                f,
                "{} := {}",
                render_list(&decl.names, ", "),
                render_list(&decl.values, ", ")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStmt {
    pub channel: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub expr: Expr,
    pub increment: bool,
    pub span: Span,
}

/// `=` or an operator followed by `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Plain,
    Compound(BinaryOp),
}

impl AssignOp {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind != TokenKind::OpOrDelim {
            return None;
        }
        match token.value.as_str() {
            "=" => Some(AssignOp::Plain),
            "+=" | "-=" | "|=" | "^=" | "*=" | "/=" | "%=" | "<<=" | ">>=" | "&=" | "&^=" => {
                let op = &token.value[..token.value.len() - 1];
                BinaryOp::from_op(op).map(AssignOp::Compound)
            }
            _ => None,
        }
    }
}

impl Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignOp::Plain => write!(f, "="),
            AssignOp::Compound(op) => write!(f, "{}=", op.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub lhs: Vec<Expr>,
    pub op: AssignOp,
    pub rhs: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortVarDecl {
    pub names: Vec<Ident>,
    pub values: Vec<Expr>,
    pub span: Span,
}

// CONTROL FLOW

/// If Statement
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub init: Option<SimpleStmt>,
    pub condition: Expr,
    pub body: Block,
    pub otherwise: Option<Else>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Else {
    If(Box<IfStmt>),
    Block(Block),
}

impl Node for IfStmt {
    fn well_formed(&self) -> bool {
        self.init.as_ref().map_or(true, |s| s.well_formed())
            && self.condition.well_formed()
            && self.body.well_formed()
            && match &self.otherwise {
                Some(Else::If(stmt)) => stmt.well_formed(),
                Some(Else::Block(block)) => block.well_formed(),
                None => true,
            }
    }
}

impl Display for IfStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ")?;
        if let Some(init) = &self.init {
            write!(f, "{}; ", init)?;
        }
        write!(f, "{} {}", self.condition, self.body)?;
        match &self.otherwise {
            Some(Else::If(stmt)) => write!(f, " else {}", stmt),
            Some(Else::Block(block)) => write!(f, " else {}", block),
            None => Ok(()),
        }
    }
}

/// For Statement
/// A missing header is an infinite loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub header: Option<ForHeader>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    Condition(Expr),
    Clause(ForClause),
    Range(RangeClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForClause {
    pub init: Option<SimpleStmt>,
    pub condition: Option<Expr>,
    pub post: Option<SimpleStmt>,
}

/// Range Clause
/// Iteration variables are either declared (`k, v :=`) or assigned (`a[i] =`).
#[derive(Debug, Clone, PartialEq)]
pub struct RangeClause {
    pub key: RangeKey,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeKey {
    Define(Vec<Ident>),
    Assign(Vec<Expr>),
}

impl Node for ForStmt {
    fn well_formed(&self) -> bool {
        let header = match &self.header {
            None => true,
            Some(ForHeader::Condition(expr)) => expr.well_formed(),
            Some(ForHeader::Clause(clause)) => {
                clause.init.as_ref().map_or(true, |s| s.well_formed())
                    && clause.condition.as_ref().map_or(true, |e| e.well_formed())
                    && clause.post.as_ref().map_or(true, |s| s.well_formed())
            }
            Some(ForHeader::Range(range)) => {
                let key = match &range.key {
                    RangeKey::Define(names) => !names.is_empty() && all_well_formed(names),
                    RangeKey::Assign(exprs) => !exprs.is_empty() && all_well_formed(exprs),
                };
                key && range.expr.well_formed()
            }
        };
        header && self.body.well_formed()
    }
}

fn render_optional<T: Display>(node: &Option<T>) -> String {
    node.as_ref().map(|n| n.to_string()).unwrap_or_default()
}

impl Display for ForStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.header {
            None => write!(f, "for {}", self.body),
            Some(ForHeader::Condition(expr)) => write!(f, "for {} {}", expr, self.body),
            Some(ForHeader::Clause(clause)) => {
                write!(
                    f,
                    "for {}; {};",
                    render_optional(&clause.init),
                    render_optional(&clause.condition)
                )?;
                if let Some(post) = &clause.post {
                    write!(f, " {}", post)?;
                }
                write!(f, " {}", self.body)
            }
            Some(ForHeader::Range(range)) => {
                match &range.key {
                    RangeKey::Define(names) => write!(f, "for {} := ", render_list(names, ", "))?,
                    RangeKey::Assign(exprs) => write!(f, "for {} = ", render_list(exprs, ", "))?,
                }
                write!(f, "range {} {}", range.expr, self.body)
            }
        }
    }
}
