//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Diagnostic, Error, ErrorImpl, ErrorTip};
use crate::{Position, Span};
use std::rc::Rc;
use test_log::test;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new("test.go".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::ScanError {
            message: "unrecognised character '@'".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "ScanError");
    assert_eq!(error.to_string(), "error scanning: unrecognised character '@'");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "(OpOrDelim ;)".to_string(),
            received: "(Identifier x)".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_scanner_errors_are_fatal() {
    assert!(Error::new(ErrorImpl::StreamClosed, position(0)).is_fatal());
    assert!(Error::new(
        ErrorImpl::ScanError {
            message: "unterminated string literal".to_string()
        },
        position(0)
    )
    .is_fatal());
}

#[test]
fn test_production_errors_are_local() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "(OpOrDelim ))".to_string(),
            received: "(EOF )".to_string(),
        },
        position(0),
    );
    assert!(!error.is_fatal());

    let error = Error::new(
        ErrorImpl::MissingNode {
            message: "expected type".to_string(),
        },
        position(0),
    );
    assert!(!error.is_fatal());
    assert_eq!(error.to_string(), "expected type");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::StreamClosed, position(0));

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "(OpOrDelim })".to_string(),
            received: "(EOF )".to_string(),
        },
        position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_syntax_errors_carry_diagnostics() {
    let diagnostics = vec![
        Diagnostic {
            message: "expected type".to_string(),
            span: Span {
                start: position(4),
                end: position(5),
            },
        },
        Diagnostic {
            message: "expected identifier".to_string(),
            span: Span {
                start: position(9),
                end: position(10),
            },
        },
    ];
    let error = Error::new(
        ErrorImpl::SyntaxErrors {
            diagnostics: diagnostics.clone(),
        },
        position(4),
    );

    assert_eq!(error.get_error_name(), "SyntaxErrors");
    assert_eq!(error.diagnostics(), diagnostics.as_slice());
    assert_eq!(error.to_string(), "2 syntax error(s)");
    assert_eq!(
        error.get_tip().to_string(),
        "expected type; expected identifier"
    );
}

#[test]
fn test_diagnostic_display() {
    let diagnostic = Diagnostic {
        message: "expected block".to_string(),
        span: Span {
            start: position(12),
            end: position(13),
        },
    };

    assert_eq!(diagnostic.to_string(), "test.go:12: expected block");
}
