use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("break");
        set.insert("case");
        set.insert("chan");
        set.insert("const");
        set.insert("continue");
        set.insert("default");
        set.insert("defer");
        set.insert("else");
        set.insert("fallthrough");
        set.insert("for");
        set.insert("func");
        set.insert("go");
        set.insert("goto");
        set.insert("if");
        set.insert("import");
        set.insert("interface");
        set.insert("map");
        set.insert("package");
        set.insert("range");
        set.insert("return");
        set.insert("select");
        set.insert("struct");
        set.insert("switch");
        set.insert("type");
        set.insert("var");
        set
    };

    /// Operators and delimiters, longest first so a prefix scan finds the
    /// longest match (`<<=` before `<<` before `<`).
    pub static ref OPERATORS: Vec<&'static str> = {
        let mut operators = vec![
            "+", "-", "*", "/", "%", "&", "|", "^", "<<", ">>", "&^",
            "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", "&^=",
            "&&", "||", "<-", "++", "--", "==", "<", ">", "=", "!",
            "!=", "<=", ">=", ":=", "...", "(", ")", "[", "]", "{", "}",
            ",", ";", ".", ":",
        ];
        operators.sort_by(|a, b| b.len().cmp(&a.len()));
        operators
    };
}

/// Characters that can begin an operator or delimiter.
pub const OPERATOR_START: &str = "+-*/%&|^<>=!()[]{},;.:";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Error,
    EOF,
    Keyword,
    OpOrDelim,
    Identifier,
    String,
    Int,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.kind, self.value)
    }
}

/// Equivalence, not equality: an empty value on either side matches any
/// value of the same kind.
fn equivalent(kind: TokenKind, value: &str, other_kind: TokenKind, other_value: &str) -> bool {
    if value.is_empty() || other_value.is_empty() {
        return kind == other_kind;
    }
    kind == other_kind && value == other_value
}

impl Token {
    pub fn equiv(&self, other: &Token) -> bool {
        equivalent(self.kind, &self.value, other.kind, &other.value)
    }

    pub fn is(&self, tok: Tok) -> bool {
        tok.matches(self)
    }

    pub fn is_one_of_many(&self, toks: &[Tok]) -> bool {
        toks.iter().any(|tok| tok.matches(self))
    }
}

/// A token pattern used by start sets: a kind, plus an exact value for
/// keywords and operators. An empty value stands for any token of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tok {
    pub kind: TokenKind,
    pub value: &'static str,
}

impl Tok {
    pub const fn any(kind: TokenKind) -> Self {
        Tok { kind, value: "" }
    }

    pub const fn keyword(value: &'static str) -> Self {
        Tok {
            kind: TokenKind::Keyword,
            value,
        }
    }

    pub const fn op(value: &'static str) -> Self {
        Tok {
            kind: TokenKind::OpOrDelim,
            value,
        }
    }

    pub fn matches(&self, token: &Token) -> bool {
        equivalent(self.kind, self.value, token.kind, &token.value)
    }
}

impl Display for Tok {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.kind, self.value)
    }
}
