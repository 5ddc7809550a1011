//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout scanning and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - The split between fatal scanner errors and production-local errors
//! - Diagnostics recorded alongside in-tree Error nodes
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
