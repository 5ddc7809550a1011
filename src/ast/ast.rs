use std::fmt::{Debug, Display};

use crate::{errors::errors::Diagnostic, Span};

use super::declarations::Decl;

/// Node Trait
///
/// Defines the behavior shared by every node in the AST.
pub trait Node: Debug + Display {
    /// Returns whether every required child is present and itself well-formed.
    ///
    /// An Error node anywhere below makes every enclosing node ill-formed, so
    /// checking the root is enough to decide pass or fail.
    fn well_formed(&self) -> bool;
    /// Deterministic text used in diagnostics and tests.
    fn render(&self) -> String {
        self.to_string()
    }
}

/// Returns whether every node in the list is well-formed.
pub fn all_well_formed<T: Node>(nodes: &[T]) -> bool {
    nodes.iter().all(|node| node.well_formed())
}

/// Renders a list of nodes separated by `separator`.
pub fn render_list<T: Display>(nodes: &[T], separator: &str) -> String {
    nodes
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Error Node
/// Stands in for a production that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    pub message: String,
    pub span: Span,
}

impl Node for ErrorNode {
    fn well_formed(&self) -> bool {
        false
    }
}

impl Display for ErrorNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<error: {}>", self.message)
    }
}

/// Identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Node for Ident {
    fn well_formed(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree
///
/// The root of a parsed source file: its top-level declarations in source
/// order, plus every diagnostic that survived backtracking.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub decls: Vec<Decl>,
    pub errors: Vec<Diagnostic>,
}

impl Tree {
    pub fn new(decls: Vec<Decl>, errors: Vec<Diagnostic>) -> Self {
        Tree { decls, errors }
    }

    /// Walks the top-level declarations in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Decl> {
        self.decls.iter()
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Decl;
    type IntoIter = std::slice::Iter<'a, Decl>;

    fn into_iter(self) -> Self::IntoIter {
        self.decls.iter()
    }
}

impl Node for Tree {
    fn well_formed(&self) -> bool {
        self.errors.is_empty() && all_well_formed(&self.decls)
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_list(&self.decls, "\n"))
    }
}
