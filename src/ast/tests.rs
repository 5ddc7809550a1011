//! Unit tests for the AST node model.
//!
//! Nodes are built by hand here; parser-produced trees are covered in the
//! parser tests.

use std::rc::Rc;

use test_log::test;

use super::{
    ast::{ErrorNode, Ident, Node, Tree},
    declarations::{ConstSpec, Decl, GenDecl, Spec, VarSpec},
    expressions::{Arguments, BasicLit, BinaryExpr, BinaryOp, Expr, LitKind, PrimaryExpr, Suffix, SuffixKind},
    statements::{AssignOp, Block, BranchKind, BranchStmt, Stmt},
    types::Type,
};
use crate::{
    errors::errors::Diagnostic,
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

fn span() -> Span {
    Span {
        start: Position(0, Rc::new("test.go".to_string())),
        end: Position(0, Rc::new("test.go".to_string())),
    }
}

fn ident(name: &str) -> Ident {
    Ident {
        name: name.to_string(),
        span: span(),
    }
}

fn int(value: &str) -> Expr {
    Expr::Literal(BasicLit {
        kind: LitKind::Int,
        value: value.to_string(),
        span: span(),
    })
}

fn error(message: &str) -> ErrorNode {
    ErrorNode {
        message: message.to_string(),
        span: span(),
    }
}

fn const_decl(spec: Spec) -> Decl {
    Decl::Const(GenDecl {
        specs: vec![spec],
        grouped: false,
        span: span(),
    })
}

#[test]
fn test_error_node_is_never_well_formed() {
    let node = error("expected type");

    assert!(!node.well_formed());
    assert_eq!(node.render(), "<error: expected type>");
}

#[test]
fn test_error_invalidates_enclosing_nodes() {
    let binary = Expr::Binary(BinaryExpr {
        left: Box::new(int("1")),
        op: BinaryOp::Add,
        right: Box::new(Expr::Error(error("expected expression"))),
        span: span(),
    });
    assert!(!binary.well_formed());

    let block = Block {
        stmts: vec![
            Stmt::Empty(span()),
            Stmt::Block(Block {
                stmts: vec![Stmt::Error(error("expected statement"))],
                span: span(),
            }),
        ],
        span: span(),
    };
    assert!(!block.well_formed());
}

#[test]
fn test_const_spec_without_type_or_value() {
    let spec = Spec::Const(ConstSpec {
        names: vec![ident("ribs")],
        ty: None,
        values: vec![],
        span: span(),
    });

    assert!(spec.well_formed());
    assert_eq!(const_decl(spec).render(), "const ribs");
}

#[test]
fn test_const_spec_type_requires_values() {
    let spec = Spec::Const(ConstSpec {
        names: vec![ident("ribs")],
        ty: Some(Type::Named(ident("int"))),
        values: vec![],
        span: span(),
    });
    assert!(!spec.well_formed());

    let spec = Spec::Const(ConstSpec {
        names: vec![ident("ribs")],
        ty: Some(Type::Named(ident("int"))),
        values: vec![int("4")],
        span: span(),
    });
    assert!(spec.well_formed());
    assert_eq!(spec.render(), "ribs int = 4");
}

#[test]
fn test_var_spec_needs_type_or_values() {
    let spec = Spec::Var(VarSpec {
        names: vec![ident("x")],
        ty: None,
        values: vec![],
        span: span(),
    });

    assert!(!spec.well_formed());
}

#[test]
fn test_primary_suffix_chain_render() {
    let primary = Expr::Primary(PrimaryExpr {
        operand: Box::new(Expr::Ident(ident("a"))),
        suffix: Suffix {
            kind: SuffixKind::Selector(ident("b")),
            next: Some(Box::new(Suffix {
                kind: SuffixKind::Index(Box::new(Expr::Ident(ident("c")))),
                next: Some(Box::new(Suffix {
                    kind: SuffixKind::Call(Arguments {
                        exprs: vec![Expr::Ident(ident("d"))],
                        ellipsis: true,
                    }),
                    next: None,
                })),
            })),
        },
        span: span(),
    });

    assert!(primary.well_formed());
    assert_eq!(primary.render(), "a.b[c](d...)");
}

#[test]
fn test_full_slice_requires_end() {
    let slice = SuffixKind::Slice {
        start: None,
        end: None,
        cap: Some(Box::new(int("3"))),
    };
    assert!(!slice.well_formed());

    let slice = SuffixKind::Slice {
        start: Some(Box::new(int("1"))),
        end: Some(Box::new(int("2"))),
        cap: Some(Box::new(int("3"))),
    };
    assert!(slice.well_formed());
    assert_eq!(slice.to_string(), "[1:2:3]");
}

#[test]
fn test_branch_labels() {
    let goto = BranchStmt {
        kind: BranchKind::Goto,
        label: None,
        span: span(),
    };
    assert!(!goto.well_formed());

    let brk = BranchStmt {
        kind: BranchKind::Break,
        label: Some(ident("outer")),
        span: span(),
    };
    assert!(brk.well_formed());
    assert_eq!(brk.to_string(), "break outer");
}

#[test]
fn test_assign_op_from_token() {
    let token = |value: &str| Token {
        kind: TokenKind::OpOrDelim,
        value: value.to_string(),
        span: span(),
    };

    assert_eq!(AssignOp::from_token(&token("=")), Some(AssignOp::Plain));
    assert_eq!(
        AssignOp::from_token(&token("&^=")),
        Some(AssignOp::Compound(BinaryOp::AndNot))
    );
    assert_eq!(AssignOp::from_token(&token("<=")), None);
    assert_eq!(AssignOp::from_token(&token("==")), None);
}

#[test]
fn test_tree_requires_no_diagnostics() {
    let decl = const_decl(Spec::Const(ConstSpec {
        names: vec![ident("ribs")],
        ty: None,
        values: vec![],
        span: span(),
    }));

    let tree = Tree::new(vec![decl.clone()], vec![]);
    assert!(tree.well_formed());
    assert_eq!(tree.iter().count(), 1);

    let tree = Tree::new(
        vec![decl],
        vec![Diagnostic {
            message: "expected ';'".to_string(),
            span: span(),
        }],
    );
    assert!(!tree.well_formed());
    assert_eq!(tree.error_messages(), vec!["expected ';'"]);
}

#[test]
fn test_tree_iteration_order() {
    let tree = Tree::new(
        vec![
            Decl::Error(error("first")),
            const_decl(Spec::Error(error("second"))),
        ],
        vec![],
    );

    let rendered = (&tree).into_iter().map(|d| d.render()).collect::<Vec<_>>();
    assert_eq!(rendered, vec!["<error: first>", "const <error: second>"]);
}
