//! Buffered access to the token stream with nested backtracking.
//!
//! While at least one tracker is open, every token handed out is appended
//! to a recording log. Backtracking replays the log suffix after the
//! innermost mark onto the pushback buffer, so the parser sees exactly the
//! tokens it saw when the tracker was opened. Diagnostics recorded since the
//! mark are discarded with it.

use log::trace;

use crate::{
    ast::ast::ErrorNode,
    errors::errors::{Diagnostic, Error, ErrorImpl},
    lexer::tokens::{Tok, Token, TokenKind},
    Span,
};

pub struct TokenCursor {
    tokens: Box<dyn Iterator<Item = Token>>,
    /// LIFO: the top is the next token handed out.
    pushback: Vec<Token>,
    log: Vec<Token>,
    marks: Vec<usize>,
    /// Length of `errors` when each tracker was opened.
    error_marks: Vec<usize>,
    errors: Vec<Diagnostic>,
    last_span: Span,
}

impl TokenCursor {
    pub fn new(tokens: impl Iterator<Item = Token> + 'static) -> Self {
        TokenCursor {
            tokens: Box::new(tokens),
            pushback: vec![],
            log: vec![],
            marks: vec![],
            error_marks: vec![],
            errors: vec![],
            last_span: Span::null(),
        }
    }

    /// Hands out the next token.
    ///
    /// Error tokens are turned into a fatal [`ErrorImpl::ScanError`] and stay
    /// at the front of the stream. Pulling past the end is
    /// [`ErrorImpl::StreamClosed`].
    pub fn next(&mut self) -> Result<Token, Error> {
        let token = match self.pushback.pop() {
            Some(token) => token,
            None => match self.tokens.next() {
                Some(token) => token,
                None => {
                    return Err(Error::new(
                        ErrorImpl::StreamClosed,
                        self.last_span.end.clone(),
                    ))
                }
            },
        };

        if token.kind == TokenKind::Error {
            let error = Error::new(
                ErrorImpl::ScanError {
                    message: token.value.clone(),
                },
                token.span.start.clone(),
            );
            self.pushback.push(token);
            return Err(error);
        }

        if !self.marks.is_empty() {
            self.log.push(token.clone());
        }
        self.last_span = token.span.clone();
        Ok(token)
    }

    /// Returns the token just handed out by [`TokenCursor::next`].
    pub fn push(&mut self, token: Token) {
        if let Some(&mark) = self.marks.last() {
            if self.log.len() > mark {
                self.log.pop();
            }
        }
        self.pushback.push(token);
    }

    pub fn peek(&mut self) -> Result<Token, Error> {
        let token = self.next()?;
        self.push(token.clone());
        Ok(token)
    }

    pub fn accept(&mut self, tok: Tok) -> Result<bool, Error> {
        Ok(self.peek()?.is(tok))
    }

    pub fn accept_any(&mut self, toks: &[Tok]) -> Result<bool, Error> {
        Ok(self.peek()?.is_one_of_many(toks))
    }

    /// Like [`TokenCursor::accept`], but a mismatch is an
    /// [`ErrorImpl::UnexpectedToken`] at the offending token.
    pub fn expect(&mut self, tok: Tok) -> Result<(), Error> {
        let token = self.peek()?;
        if token.is(tok) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: tok.to_string(),
                    received: token.to_string(),
                },
                token.span.start,
            ))
        }
    }

    pub fn open_tracker(&mut self) {
        self.marks.push(self.log.len());
        self.error_marks.push(self.errors.len());
        trace!("open tracker {} at {}", self.marks.len(), self.log.len());
    }

    /// Drops the innermost mark without replaying anything.
    pub fn close_tracker(&mut self) {
        trace!("close tracker {}", self.marks.len());
        self.marks.pop();
        self.error_marks.pop();
        if self.marks.is_empty() {
            self.log.clear();
            self.error_marks.clear();
        }
    }

    /// Rewinds to the innermost mark. The mark itself stays open.
    pub fn backtrack(&mut self) {
        let Some(&mark) = self.marks.last() else {
            return;
        };
        trace!(
            "backtrack tracker {}: replaying {} token(s)",
            self.marks.len(),
            self.log.len() - mark
        );
        while self.log.len() > mark {
            if let Some(token) = self.log.pop() {
                self.pushback.push(token);
            }
        }
        if let Some(&errors) = self.error_marks.last() {
            self.errors.truncate(errors);
        }
    }

    /// No diagnostics were recorded since the innermost tracker was opened.
    pub fn valid(&self) -> bool {
        self.errors.len() == self.error_marks.last().copied().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// Records a diagnostic and returns the Error node that stands for it.
    pub fn add_error(&mut self, message: String, span: Span) -> ErrorNode {
        trace!("recording error at {}: {}", span.start.0, message);
        self.errors.push(Diagnostic {
            message: message.clone(),
            span: span.clone(),
        });
        ErrorNode { message, span }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.errors)
    }

    /// Span of the last token handed out.
    pub fn last_span(&self) -> &Span {
        &self.last_span
    }
}
