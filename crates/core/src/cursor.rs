//! Insertable token buffer driven by the translator.
//!
//! Expansion splices new tokens directly after the current position, so the
//! buffer is a plain vector with a cursor index rather than an iterator.
//! Inserts only ever land ahead of the cursor; tokens already visited are
//! never rewritten. A snapshot records the cursor and the splice log so a
//! failed speculative parse can undo every splice it caused.

use crate::lexer::{Spanned, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pos: usize,
    splices: usize,
}

#[derive(Debug, Default)]
pub struct TokenBuffer {
    tokens: Vec<Spanned>,
    pos: usize,
    /// (insert index, count) for every splice, oldest first.
    splice_log: Vec<(usize, usize)>,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        TokenBuffer {
            tokens,
            pos: 0,
            splice_log: Vec::new(),
        }
    }

    /// The current token, or `None` once the buffer is exhausted.
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    pub fn current_spanned(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Token at `offset` from the cursor (negative looks back).
    pub fn peek(&self, offset: isize) -> Option<&Token> {
        let idx = self.pos as isize + offset;
        if idx < 0 {
            return None;
        }
        self.tokens.get(idx as usize).map(|s| &s.token)
    }

    /// Source line of the current token; at end of input, the line of the
    /// last token.
    pub fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |s| s.line)
    }

    /// Expansion depth of the current token.
    pub fn depth(&self) -> usize {
        self.tokens.get(self.pos).map_or(0, |s| s.depth)
    }

    /// Insert `tokens` right after the current token so the next `advance`
    /// lands on the first of them. At end of input the first of them becomes
    /// current.
    pub fn splice_after_current(&mut self, tokens: Vec<Spanned>) {
        let at = (self.pos + 1).min(self.tokens.len());
        let count = tokens.len();
        self.tokens.splice(at..at, tokens);
        self.splice_log.push((at, count));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            splices: self.splice_log.len(),
        }
    }

    /// Rewind to `snap`, removing anything spliced since it was taken.
    pub fn restore(&mut self, snap: Snapshot) {
        while self.splice_log.len() > snap.splices {
            if let Some((at, count)) = self.splice_log.pop() {
                self.tokens.drain(at..at + count);
            }
        }
        self.pos = snap.pos;
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
