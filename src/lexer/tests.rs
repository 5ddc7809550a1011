//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer and string literals
//! - Operators by longest match
//! - Comments
//! - Automatic terminator insertion
//! - Error cases

use super::{
    lexer::{scan, scan_bytes, tokenize},
    tokens::{Token, TokenKind},
};
use crate::errors::errors::ErrorImpl;
use test_log::test;

fn kinds_and_values(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens
        .iter()
        .map(|t| (t.kind, t.value.as_str()))
        .collect()
}

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.go".to_string())).unwrap()
}

#[test]
fn test_tokenize_keywords() {
    let source = "break case chan const continue default defer else fallthrough for func go goto \
                  if import interface map package range return select struct switch type var";
    let tokens = scan("test.go", source).collect::<Vec<_>>();

    // 25 keywords, then the terminator after `var` and the end token
    assert_eq!(tokens.len(), 27);
    for token in &tokens[..25] {
        assert_eq!(token.kind, TokenKind::Keyword, "{}", token);
    }
    assert_eq!(tokens[25].value, ";");
    assert_eq!(tokens[26].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo bar baz_123 _underscore CamelCase iffy");

    assert_eq!(
        kinds_and_values(&tokens[..6]),
        vec![
            (TokenKind::Identifier, "foo"),
            (TokenKind::Identifier, "bar"),
            (TokenKind::Identifier, "baz_123"),
            (TokenKind::Identifier, "_underscore"),
            (TokenKind::Identifier, "CamelCase"),
            (TokenKind::Identifier, "iffy"),
        ]
    );
}

#[test]
fn test_tokenize_integers() {
    let tokens = lex("42 0 1234567890");

    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Int, "42"),
            (TokenKind::Int, "0"),
            (TokenKind::Int, "1234567890"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_tokenize_strings_keep_raw_text() {
    let tokens = lex(r#""hello" "" "quote\"test" "tab\t""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "");
    assert_eq!(tokens[2].value, r#"quote\"test"#);
    assert_eq!(tokens[3].value, r"tab\t");
}

#[test]
fn test_tokenize_operators_longest_match() {
    let tokens = lex("<<= << < &^= &^ & ... . := : <- ++ + != !");

    let values = tokens.iter().map(|t| t.value.as_str()).collect::<Vec<_>>();
    assert_eq!(
        values,
        vec![
            "<<=", "<<", "<", "&^=", "&^", "&", "...", ".", ":=", ":", "<-", "++", "+", "!=",
            "!", "",
        ]
    );
    assert!(tokens[..15].iter().all(|t| t.kind == TokenKind::OpOrDelim));
}

#[test]
fn test_tokenize_adjacent_operators() {
    let tokens = lex("a[i]++");

    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::OpOrDelim, "["),
            (TokenKind::Identifier, "i"),
            (TokenKind::OpOrDelim, "]"),
            (TokenKind::OpOrDelim, "++"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("x := 5 // this is a comment\ny");

    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Identifier, "x"),
            (TokenKind::OpOrDelim, ":="),
            (TokenKind::Int, "5"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::Identifier, "y"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_comment_at_end_of_input() {
    let tokens = lex("x // trailing");

    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Identifier, "x"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_terminator_after_each_trigger() {
    let triggers = [
        "x", "42", "\"s\"", "i++", "i--", "f()", "a[0]", "{}", "break", "continue",
        "fallthrough", "return",
    ];

    for trigger in triggers {
        let tokens = lex(&format!("{}\n", trigger));
        let terminator = &tokens[tokens.len() - 2];
        assert_eq!(
            (terminator.kind, terminator.value.as_str()),
            (TokenKind::OpOrDelim, ";"),
            "no terminator after {:?}",
            trigger
        );
    }
}

#[test]
fn test_no_terminator_after_other_tokens() {
    let tokens = lex("if\n");
    assert_eq!(
        kinds_and_values(&tokens),
        vec![(TokenKind::Keyword, "if"), (TokenKind::EOF, "")]
    );

    let tokens = lex("a +\nb");
    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::OpOrDelim, "+"),
            (TokenKind::Identifier, "b"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_terminator_at_end_of_input() {
    let tokens = lex("return");

    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Keyword, "return"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_no_duplicate_terminator() {
    let tokens = lex("x;\n\n\ny\n");

    assert_eq!(
        kinds_and_values(&tokens),
        vec![
            (TokenKind::Identifier, "x"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::Identifier, "y"),
            (TokenKind::OpOrDelim, ";"),
            (TokenKind::EOF, ""),
        ]
    );
}

#[test]
fn test_empty_input() {
    let tokens = lex("");

    assert_eq!(kinds_and_values(&tokens), vec![(TokenKind::EOF, "")]);
}

#[test]
fn test_token_spans() {
    let tokens = lex("ab  cd");

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[1].span.end.0, 6);
    assert_eq!(tokens[1].span.start.1.as_str(), "test.go");
}

#[test]
fn test_default_file_name() {
    let tokens = scan("", "x").collect::<Vec<_>>();

    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_stream_is_lazy() {
    // Only the first token is scanned; the bad character is never reached.
    let mut stream = scan("test.go", "x @");
    let first = stream.next().unwrap();

    assert_eq!(first.value, "x");
}

#[test]
fn test_stream_ends_after_error() {
    let tokens = scan("test.go", "x @ y").collect::<Vec<_>>();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert!(tokens[1].value.contains('@'));
}

#[test]
fn test_tokenize_unrecognised_character() {
    let result = tokenize("x := #".to_string(), Some("test.go".to_string()));

    let error = result.unwrap_err();
    assert!(error.is_fatal());
    assert_eq!(error.get_position().0, 5);
    assert!(matches!(error.get_impl(), ErrorImpl::ScanError { .. }));
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("s := \"abc".to_string(), None).unwrap_err();

    match error.get_impl() {
        ErrorImpl::ScanError { message } => assert_eq!(message, "unterminated string literal"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_newline_in_string_is_unterminated() {
    assert!(tokenize("\"ab\ncd\"".to_string(), None).is_err());
    assert!(tokenize("\"ab\\\ncd\"".to_string(), None).is_err());
}

#[test]
fn test_invalid_utf8() {
    let tokens = scan_bytes("test.go", b"x \xff y").collect::<Vec<_>>();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "invalid UTF-8 encoding at byte 2");
}

#[test]
fn test_valid_bytes() {
    let tokens = scan_bytes("test.go", b"x").collect::<Vec<_>>();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_token_equivalence() {
    let tokens = lex("if x");
    let mut any_ident = tokens[1].clone();
    any_ident.value = String::new();

    assert!(tokens[1].equiv(&any_ident));
    assert!(any_ident.equiv(&tokens[1]));
    assert!(!tokens[0].equiv(&any_ident));
    assert!(!tokens[0].equiv(&tokens[1]));
    assert_ne!(tokens[1], any_ident);
}
