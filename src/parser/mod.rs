//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module turns the token stream from the lexer into a [`Tree`] of
//! declarations. It is a recursive descent parser with:
//!
//! - A [`cursor::TokenCursor`] that buffers tokens and supports nested
//!   backtracking for ambiguous productions
//! - Binding powers for binary operator precedence
//! - Error nodes plus diagnostics for syntax errors, so one bad declaration
//!   does not hide the rest of the file
//!
//! [`Tree`]: crate::ast::ast::Tree

pub mod cursor;
pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
