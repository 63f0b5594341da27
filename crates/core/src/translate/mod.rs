//! Syntax-directed translator.
//!
//! There is no AST: each grammar rule emits LaTeX into the statement's buffer
//! as it matches, consults and extends the scope tree, and hands macro calls
//! and imports to the expander, which splices new tokens into the cursor.
//! Rules return [`Attempt`]: `Ok(true)` matched, `Ok(false)` ruled out
//! without consuming anything, `Err` fatal unless a caller is backtracking.

use crate::cursor::TokenBuffer;
use crate::document::Document;
use crate::error::CompileError;
use crate::expand::Expander;
use crate::lexer::{Keyword, Spanned, Token};
use crate::options::CompileOptions;
use crate::scope::ScopeTree;
use crate::source::ModuleProvider;

pub mod builtins;
mod expressions;
mod statements;

pub use builtins::subscriptify;

pub(crate) type Attempt = Result<bool, CompileError>;

pub struct Translator<'a> {
    buf: TokenBuffer,
    scopes: ScopeTree,
    /// Scope path of the construct being translated; empty at global scope.
    path: Vec<String>,
    expander: Expander,
    provider: &'a dyn ModuleProvider,
    doc: Document,
    next_id: u32,
    /// Id of the most recently opened namespace folder, 0 for none.
    folder_id: u32,
    /// LaTeX accumulated for the current statement.
    latex: String,
    /// Name most recently declared by the current statement.
    last_declared: Option<String>,
}

impl<'a> Translator<'a> {
    pub fn new(
        tokens: Vec<Spanned>,
        options: &CompileOptions,
        provider: &'a dyn ModuleProvider,
    ) -> Self {
        Translator {
            buf: TokenBuffer::new(tokens),
            scopes: ScopeTree::with_builtins(builtins::names()),
            path: Vec::new(),
            expander: Expander::new(options.max_expansion_depth),
            provider,
            doc: Document::new(),
            next_id: 0,
            folder_id: 0,
            latex: String::new(),
            last_declared: None,
        }
    }

    /// Translate every statement and return the finished document.
    pub fn run(mut self) -> Result<Document, CompileError> {
        self.parse_block(false)?;
        Ok(self.doc)
    }

    // -- Cursor helpers -----------------------------------------

    fn err(&self, msg: impl Into<String>) -> CompileError {
        CompileError::new(self.buf.line(), msg)
    }

    /// Description of the current token for error messages.
    fn found(&self) -> String {
        self.buf
            .current()
            .map_or_else(|| "end of input".to_owned(), |t| t.to_string())
    }

    fn at_punct(&self, c: char) -> bool {
        self.buf.current().is_some_and(|t| t.is_punct(c))
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.buf.current().is_some_and(|t| t.is_keyword(kw))
    }

    fn at_op(&self, op: &str) -> bool {
        self.buf.current().is_some_and(|t| t.is_op(op))
    }

    fn next_is_punct(&self, c: char) -> bool {
        self.buf.peek(1).is_some_and(|t| t.is_punct(c))
    }

    fn expect_punct(&mut self, c: char, context: &str) -> Result<(), CompileError> {
        if self.at_punct(c) {
            self.buf.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{}' {}, found {}", c, context, self.found())))
        }
    }

    fn take_identifier(&mut self, what: &str) -> Result<String, CompileError> {
        if let Some(Token::Identifier(name)) = self.buf.current() {
            let name = name.clone();
            self.buf.advance();
            Ok(name)
        } else {
            Err(self.err(format!("expected {}, found {}", what, self.found())))
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.buf.current(), Some(Token::Newline)) {
            self.buf.advance();
        }
    }

    fn emit(&mut self, text: &str) {
        self.latex.push_str(text);
    }
}
