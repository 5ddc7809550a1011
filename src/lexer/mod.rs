//! Lexical analysis for the Go subset.
//!
//! The scanner is a state machine: each state consumes some input, emits
//! zero or more tokens and names the next state. It handles:
//!
//! - Keywords, identifiers, decimal integers and interpreted strings
//! - Operators and delimiters by longest match
//! - Line comments and whitespace
//! - Automatic `;` insertion at newlines and at end of input
//!
//! Tokens are handed out lazily through [`lexer::TokenStream`].

pub mod lexer;
pub mod states;
pub mod tokens;

#[cfg(test)]
mod tests;
