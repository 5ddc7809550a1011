use std::{collections::VecDeque, rc::Rc};

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::{
    states::lex_start,
    tokens::{Token, TokenKind},
};

/// A scanning state: runs against the lexer and names the state to run next,
/// or `None` once the stream is finished.
pub struct StateFn(pub fn(&mut Lexer) -> Option<StateFn>);

pub struct Lexer {
    source: String,
    /// Start of the token being scanned.
    start: usize,
    pos: usize,
    file: Rc<String>,
    /// Last real token emitted on the current line, consulted by the
    /// terminator rule. Error tokens are never stored here.
    last_token: Option<Token>,
    pending: VecDeque<Token>,
    /// Byte offset where the raw input stopped being valid UTF-8.
    invalid_at: Option<usize>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = match file {
            Some(file) if !file.is_empty() => Rc::new(file),
            _ => Rc::new(String::from("shell")),
        };

        Lexer {
            source,
            start: 0,
            pos: 0,
            file: file_name,
            last_token: None,
            pending: VecDeque::new(),
            invalid_at: None,
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Consumes one character if it is in `valid`.
    pub fn accept(&mut self, valid: &str) -> bool {
        match self.peek() {
            Some(c) if valid.contains(c) => {
                self.advance_n(c.len_utf8());
                true
            }
            _ => false,
        }
    }

    pub fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    /// Drops everything scanned since the last emission.
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    pub fn value(&self) -> &str {
        &self.source[self.start..self.pos]
    }

    pub fn invalid_at(&self) -> Option<usize> {
        self.invalid_at
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.last_token.as_ref()
    }

    pub fn clear_last_token(&mut self) {
        self.last_token = None;
    }

    fn span(&self) -> Span {
        Span {
            start: Position(self.start as u32, Rc::clone(&self.file)),
            end: Position(self.pos as u32, Rc::clone(&self.file)),
        }
    }

    fn push(&mut self, token: Token) {
        trace!("scanned {}", token);
        self.start = self.pos;
        self.pending.push_back(token);
    }

    /// Emits the text scanned since the last emission as a `kind` token.
    pub fn emit(&mut self, kind: TokenKind) {
        let token = MK_TOKEN!(kind, self.value().to_string(), self.span());
        self.last_token = Some(token.clone());
        self.push(token);
    }

    pub fn emit_terminator(&mut self) {
        self.start = self.pos;
        let token = MK_TOKEN!(TokenKind::OpOrDelim, String::from(";"), self.span());
        self.last_token = Some(token.clone());
        self.push(token);
    }

    pub fn emit_eof(&mut self) {
        self.start = self.pos;
        let token = MK_TOKEN!(TokenKind::EOF, String::new(), self.span());
        self.push(token);
    }

    pub fn emit_error(&mut self, message: String) {
        let token = MK_TOKEN!(TokenKind::Error, message, self.span());
        self.push(token);
    }
}

/// Lazily scanned tokens.
///
/// States only run when the previous token has been handed out, so at most
/// one state's output is buffered at a time. The stream ends after an end
/// token or an error token.
pub struct TokenStream {
    lexer: Lexer,
    state: Option<StateFn>,
}

impl TokenStream {
    fn new(lexer: Lexer) -> Self {
        TokenStream {
            lexer,
            state: Some(StateFn(lex_start)),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.lexer.pending.pop_front() {
                return Some(token);
            }
            let state = self.state.take()?;
            self.state = (state.0)(&mut self.lexer);
        }
    }
}

pub fn scan(name: &str, source: &str) -> TokenStream {
    TokenStream::new(Lexer::new(source.to_string(), Some(name.to_string())))
}

/// Scans raw bytes. Tokens are produced for the valid UTF-8 prefix, then an
/// error token stands in for the end token.
pub fn scan_bytes(name: &str, source: &[u8]) -> TokenStream {
    match std::str::from_utf8(source) {
        Ok(text) => scan(name, text),
        Err(err) => {
            let valid = err.valid_up_to();
            let prefix = String::from_utf8_lossy(&source[..valid]).into_owned();
            let mut lexer = Lexer::new(prefix, Some(name.to_string()));
            lexer.invalid_at = Some(valid);
            TokenStream::new(lexer)
        }
    }
}

/// Scans the whole source eagerly.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut tokens = vec![];

    for token in TokenStream::new(Lexer::new(source, file)) {
        if token.kind == TokenKind::Error {
            return Err(Error::new(
                ErrorImpl::ScanError {
                    message: token.value,
                },
                token.span.start,
            ));
        }
        tokens.push(token);
    }

    Ok(tokens)
}
