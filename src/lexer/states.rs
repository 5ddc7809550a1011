use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use super::{
    lexer::{Lexer, StateFn},
    tokens::{TokenKind, KEYWORDS, OPERATORS, OPERATOR_START},
};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[0-9]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"^[ \t\r]+").unwrap();
}

/// Inserts a `;` if the last token on the line can end a statement.
fn terminator_rule(lexer: &mut Lexer) {
    let Some(last) = lexer.last_token() else {
        return;
    };

    let insert = match last.kind {
        TokenKind::Identifier | TokenKind::Int | TokenKind::String => true,
        TokenKind::OpOrDelim => matches!(last.value.as_str(), "++" | "--" | ")" | "]" | "}"),
        TokenKind::Keyword => matches!(
            last.value.as_str(),
            "break" | "continue" | "fallthrough" | "return"
        ),
        _ => false,
    };

    if insert {
        trace!("inserting terminator after {}", last);
        lexer.emit_terminator();
    }
}

pub fn lex_start(lexer: &mut Lexer) -> Option<StateFn> {
    if let Some(m) = WHITESPACE.find(lexer.remainder()) {
        let len = m.end();
        lexer.advance_n(len);
        lexer.ignore();
    }

    if lexer.remainder().starts_with("//") {
        return Some(StateFn(lex_comment));
    }

    match lexer.peek() {
        None => Some(StateFn(lex_eof)),
        Some('\n') => Some(StateFn(lex_newline)),
        Some('"') => Some(StateFn(lex_string)),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => Some(StateFn(lex_identifier)),
        Some(c) if c.is_ascii_digit() => Some(StateFn(lex_integer)),
        Some(c) if OPERATOR_START.contains(c) => Some(StateFn(lex_operator)),
        Some(c) => {
            lexer.advance_n(c.len_utf8());
            lexer.emit_error(format!("unrecognised character {:?}", c));
            None
        }
    }
}

fn lex_newline(lexer: &mut Lexer) -> Option<StateFn> {
    lexer.accept("\n");
    lexer.ignore();
    terminator_rule(lexer);
    lexer.clear_last_token();
    Some(StateFn(lex_start))
}

/// Skips a line comment, leaving the newline for the terminator rule.
fn lex_comment(lexer: &mut Lexer) -> Option<StateFn> {
    let len = lexer.remainder().find('\n').unwrap_or(lexer.remainder().len());
    lexer.advance_n(len);
    lexer.ignore();

    if lexer.at_eof() {
        Some(StateFn(lex_eof))
    } else {
        Some(StateFn(lex_newline))
    }
}

fn lex_identifier(lexer: &mut Lexer) -> Option<StateFn> {
    let len = IDENTIFIER.find(lexer.remainder()).map_or(0, |m| m.end());
    lexer.advance_n(len);

    if KEYWORDS.contains(lexer.value()) {
        lexer.emit(TokenKind::Keyword);
    } else {
        lexer.emit(TokenKind::Identifier);
    }
    Some(StateFn(lex_start))
}

fn lex_integer(lexer: &mut Lexer) -> Option<StateFn> {
    let len = INTEGER.find(lexer.remainder()).map_or(0, |m| m.end());
    lexer.advance_n(len);
    lexer.emit(TokenKind::Int);
    Some(StateFn(lex_start))
}

fn lex_string(lexer: &mut Lexer) -> Option<StateFn> {
    lexer.accept("\"");
    lexer.ignore();
    Some(StateFn(lex_string_body))
}

fn lex_string_body(lexer: &mut Lexer) -> Option<StateFn> {
    loop {
        match lexer.peek() {
            Some('"') => {
                lexer.emit(TokenKind::String);
                return Some(StateFn(lex_string_close));
            }
            Some('\\') => {
                lexer.advance_n(1);
                return Some(StateFn(lex_string_escape));
            }
            Some('\n') | None => {
                lexer.emit_error(String::from("unterminated string literal"));
                return None;
            }
            Some(c) => lexer.advance_n(c.len_utf8()),
        }
    }
}

/// The character after a backslash belongs to the literal, whatever it is.
fn lex_string_escape(lexer: &mut Lexer) -> Option<StateFn> {
    match lexer.peek() {
        Some('\n') | None => {
            lexer.emit_error(String::from("unterminated string literal"));
            None
        }
        Some(c) => {
            lexer.advance_n(c.len_utf8());
            Some(StateFn(lex_string_body))
        }
    }
}

fn lex_string_close(lexer: &mut Lexer) -> Option<StateFn> {
    lexer.accept("\"");
    lexer.ignore();
    Some(StateFn(lex_start))
}

fn lex_operator(lexer: &mut Lexer) -> Option<StateFn> {
    let operator = OPERATORS
        .iter()
        .find(|op| lexer.remainder().starts_with(**op))
        .copied();

    match operator {
        Some(op) => {
            lexer.advance_n(op.len());
            lexer.emit(TokenKind::OpOrDelim);
            Some(StateFn(lex_start))
        }
        None => {
            let c = lexer.peek().unwrap_or_default();
            lexer.advance_n(c.len_utf8());
            lexer.emit_error(format!("unrecognised character {:?}", c));
            None
        }
    }
}

fn lex_eof(lexer: &mut Lexer) -> Option<StateFn> {
    if let Some(offset) = lexer.invalid_at() {
        debug!("input is not valid UTF-8 past byte {}", offset);
        lexer.emit_error(format!("invalid UTF-8 encoding at byte {}", offset));
        return None;
    }

    terminator_rule(lexer);
    lexer.emit_eof();
    None
}
