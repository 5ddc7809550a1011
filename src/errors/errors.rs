use std::fmt::Display;

use thiserror::Error;

use crate::{Position, Span};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Fatal errors end the whole parse; everything else is recorded as a
    /// diagnostic and represented in the tree by an Error node.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::ScanError { .. } | ErrorImpl::StreamClosed
        )
    }

    /// The diagnostics carried by a failed strict parse, empty otherwise.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.internal_error {
            ErrorImpl::SyntaxErrors { diagnostics } => diagnostics,
            _ => &[],
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::ScanError { .. } => "ScanError",
            ErrorImpl::StreamClosed => "StreamClosed",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingNode { .. } => "MissingNode",
            ErrorImpl::SyntaxErrors { .. } => "SyntaxErrors",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::ScanError { message } => ErrorTip::Suggestion(format!(
                "Scanning stopped: {}",
                message
            )),
            ErrorImpl::StreamClosed => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {}, received {}, did you miss a semicolon?",
                expected, received
            )),
            ErrorImpl::MissingNode { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::SyntaxErrors { diagnostics } => ErrorTip::Suggestion(
                diagnostics
                    .iter()
                    .map(|d| d.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("error scanning: {message}")]
    ScanError { message: String },
    #[error("token stream closed")]
    StreamClosed,
    #[error("expected {expected} received {received}")]
    UnexpectedToken { expected: String, received: String },
    #[error("{message}")]
    MissingNode { message: String },
    #[error("{} syntax error(s)", .diagnostics.len())]
    SyntaxErrors { diagnostics: Vec<Diagnostic> },
}

/// A syntax error recorded while building the tree.
///
/// Every diagnostic is created together with the Error node that stands in
/// for the failed production.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.span.start.1, self.span.start.0, self.message)
    }
}
