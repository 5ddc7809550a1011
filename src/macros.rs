//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `TRY_NODE!` - Unwraps a production-local result or returns an Error node
//! - `EXPECT!` - Checks for, then consumes, a required token inside a production
//!
//! The last two keep every grammar function on the same error path: fatal
//! errors propagate with `?`, local ones become a diagnostic plus an Error node.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Unwraps `$result`, or records the local error and returns
/// `Ok($variant(error_node))` from the enclosing production.
///
/// Fatal errors are returned as `Err` untouched.
///
/// # Example
///
/// ```ignore
/// let idents = TRY_NODE!(parser, parse_identifier_list(parser), Spec::Error);
/// ```
#[macro_export]
macro_rules! TRY_NODE {
    ($parser:expr, $result:expr, $variant:path) => {
        match $result {
            Ok(value) => value,
            Err(err) => return Ok($variant($parser.recover(err)?)),
        }
    };
}

/// Requires the next token to be equivalent to `$tok` and consumes it,
/// evaluating to the consumed token. On mismatch the enclosing production
/// returns `Ok($variant(error_node))`.
///
/// # Example
///
/// ```ignore
/// EXPECT!(parser, TOK_CLOSE_PAREN, Decl::Error);
/// ```
#[macro_export]
macro_rules! EXPECT {
    ($parser:expr, $tok:expr, $variant:path) => {{
        $crate::TRY_NODE!($parser, $parser.expect($tok), $variant);
        $parser.next()?
    }};
}
