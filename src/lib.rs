#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text (including its newline) and
/// the offset of `position` within that line. An offset equal to the source
/// length maps onto the last line, so errors at end-of-input still get an
/// excerpt.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) || (end == source.len() && pos == end) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // empty source, or an offset just past a trailing newline
    Some((line_number, String::new(), 0))
}

#[cfg(test)]
mod tests {
    const SOURCE: &str = "Hello, world!\nThis is a test\nfile.\nTesting { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 43).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("abc", 4).is_none());

        let (line_number, line, line_pos) = super::get_line_at_position("abc", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "abc");
        assert_eq!(line_pos, 3);
    }
}

/// Renders an error with a caret under the offending column.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: UnterminatedString (string literal is missing its closing quote)
        -> main.go
           |
        20 | x := "abc
           | -----^
    */

    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
