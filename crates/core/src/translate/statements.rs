use super::{subscriptify, Attempt, Translator};
use crate::document::{Folder, Item, Note};
use crate::error::CompileError;
use crate::expand::{MacroDefinition, NAME_PARAM};
use crate::lexer::{render_tokens, Keyword, Token};
use crate::scope::ScopeKind;

impl<'a> Translator<'a> {
    /// Statements until end of input, or until the closing `}` of a
    /// namespace (left for the caller).
    pub(super) fn parse_block(&mut self, in_namespace: bool) -> Result<(), CompileError> {
        loop {
            while matches!(self.buf.current(), Some(Token::Newline))
                || self.at_punct(';')
            {
                self.buf.advance();
            }
            match self.buf.current() {
                None if in_namespace => return Err(self.err("namespace block was not closed")),
                None => return Ok(()),
                Some(t) if in_namespace && t.is_punct('}') => return Ok(()),
                Some(_) => {}
            }
            self.parse_statement()?;
            self.end_statement(in_namespace)?;
        }
    }

    fn end_statement(&mut self, in_namespace: bool) -> Result<(), CompileError> {
        match self.buf.current() {
            None => Ok(()),
            Some(Token::Newline) | Some(Token::Punctuation(';')) => {
                self.buf.advance();
                Ok(())
            }
            Some(t) if in_namespace && t.is_punct('}') => Ok(()),
            Some(_) => Err(self.err(format!("unexpected {} after statement", self.found()))),
        }
    }

    /// Allocate the next id and a formula stub, then dispatch.
    fn parse_statement(&mut self) -> Result<(), CompileError> {
        self.next_id += 1;
        let id = self.next_id;
        let index = self.doc.push_formula(id, self.folder_id);
        let outer_latex = std::mem::take(&mut self.latex);
        let outer_declared = self.last_declared.take();

        let matched = self.parse_namespace(id, index)?
            || self.parse_function()?
            || self.parse_macro_definition()?
            || self.parse_import()?
            || self.parse_note(id, index)?
            || self.parse_expression()?;
        if !matched {
            return Err(self.err(format!("expected statement, found {}", self.found())));
        }

        let latex = std::mem::replace(&mut self.latex, outer_latex);
        self.doc.set_latex(index, latex);
        self.last_declared = outer_declared;
        Ok(())
    }

    // ns IDENT { Statement* }
    fn parse_namespace(&mut self, id: u32, index: usize) -> Attempt {
        if !self.at_keyword(Keyword::Ns) {
            return Ok(false);
        }
        self.buf.advance();
        let name = self.take_identifier("namespace name")?;
        self.doc.replace(
            index,
            Item::Folder(Folder {
                id,
                title: name.clone(),
            }),
        );
        self.scopes
            .declare_scope(&self.path, &name, ScopeKind::Namespace);
        self.skip_newlines();
        self.expect_punct('{', "after namespace name")?;
        tracing::debug!(namespace = %name, id, "entering namespace");

        self.path.push(name);
        self.folder_id = id;
        self.parse_block(true)?;
        self.expect_punct('}', "to close namespace")?;
        self.path.pop();
        self.folder_id = 0;
        Ok(true)
    }

    // fn IDENT ( IDENT,* ) { Expression }
    fn parse_function(&mut self) -> Attempt {
        if !self.at_keyword(Keyword::Fn) {
            return Ok(false);
        }
        self.buf.advance();
        let name = self.take_identifier("function name")?;
        self.scopes
            .declare_scope(&self.path, &name, ScopeKind::Function);
        self.expect_punct('(', "after function name")?;
        self.emit(&subscriptify(&name));
        self.emit("\\left(");
        tracing::debug!(function = %name, "defining function");

        self.path.push(name.clone());
        let mut first = true;
        while !self.at_punct(')') {
            if !first {
                self.expect_punct(',', "between parameters")?;
                self.emit(",");
            }
            let param = self.take_identifier("parameter name")?;
            self.scopes.declare(&self.path, &param);
            self.emit(&subscriptify(&format!("{}{}", name, param)));
            first = false;
        }
        self.buf.advance();
        self.emit("\\right)=");

        self.skip_newlines();
        self.expect_punct('{', "before function body")?;
        self.skip_newlines();
        if !self.parse_expression()? {
            return Err(self.err(format!(
                "expected expression in body of '{}', found {}",
                name,
                self.found()
            )));
        }
        self.skip_newlines();
        self.expect_punct('}', "to close function body")?;
        self.path.pop();
        Ok(true)
    }

    // macro IDENT ! ( (IDENT|__name__),* ) { raw tokens }
    fn parse_macro_definition(&mut self) -> Attempt {
        if !self.at_keyword(Keyword::Macro) {
            return Ok(false);
        }
        self.buf.advance();
        let name = self.take_identifier("macro name")?;
        self.expect_punct('!', "after macro name")?;
        self.expect_punct('(', "before macro parameters")?;
        self.scopes.declare_scope(&self.path, &name, ScopeKind::Macro);

        self.path.push(name.clone());
        let mut params = Vec::new();
        while !self.at_punct(')') {
            if !params.is_empty() {
                self.expect_punct(',', "between macro parameters")?;
            }
            let param = self.take_identifier("macro parameter")?;
            self.scopes.declare(&self.path, &param);
            params.push(param);
        }
        self.buf.advance();

        self.skip_newlines();
        self.expect_punct('{', "before macro body")?;
        let mut body = Vec::new();
        let mut depth = 0usize;
        loop {
            let Some(s) = self.buf.current_spanned() else {
                return Err(self.err(format!("body of macro '{}' was not closed", name)));
            };
            if s.token.is_punct('{') {
                depth += 1;
            } else if s.token.is_punct('}') {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            body.push(s.clone());
            self.buf.advance();
        }
        self.buf.advance();
        self.path.pop();

        if params.iter().filter(|p| *p == NAME_PARAM).count() > 1 {
            return Err(self.err(format!(
                "macro '{}' declares {} more than once",
                name, NAME_PARAM
            )));
        }
        self.expander.define(MacroDefinition {
            name,
            params,
            body: render_tokens(&body).trim().to_owned(),
        });
        Ok(true)
    }

    // import IDENT
    fn parse_import(&mut self) -> Attempt {
        if !self.at_keyword(Keyword::Import) {
            return Ok(false);
        }
        self.buf.advance();
        let module = match self.buf.current() {
            Some(Token::Identifier(m)) => m.clone(),
            _ => return Err(self.err(format!("expected module name, found {}", self.found()))),
        };
        let tokens =
            self.expander
                .expand_import(&module, self.provider, self.buf.line(), self.buf.depth())?;
        self.buf.splice_after_current(tokens);
        self.buf.advance();
        Ok(true)
    }

    fn parse_note(&mut self, id: u32, index: usize) -> Attempt {
        let text = match self.buf.current() {
            Some(Token::StringNote(text)) => text.clone(),
            _ => return Ok(false),
        };
        self.buf.advance();
        self.doc.replace(index, Item::Note(Note { id, text }));
        Ok(true)
    }
}
