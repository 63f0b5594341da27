use super::builtins::{self, subscriptify};
use super::{Attempt, Translator};
use crate::error::CompileError;
use crate::lexer::{Keyword, Token};
use crate::scope::AXIS_NAMES;

impl<'a> Translator<'a> {
    /// Expression := [-] primary, then an optional operator tail.
    ///
    /// A primary that fails to match rewinds the cursor (undoing splices)
    /// and truncates the LaTeX, so the caller sees no residue.
    pub(super) fn parse_expression(&mut self) -> Attempt {
        let snap = self.buf.snapshot();
        let mark = self.latex.len();
        if self.at_op("-") {
            self.buf.advance();
            self.emit("-");
        }
        let matched = self.parse_group()?
            || self.parse_macro_call()?
            || self.parse_function_call()?
            || self.parse_value()?
            || self.parse_list()?
            || self.parse_comprehension()?;
        if !matched {
            self.buf.restore(snap);
            self.latex.truncate(mark);
            return Ok(false);
        }
        self.parse_tail()
    }

    /// Optional trailing operator plus the rest of the expression, in source
    /// order. Without an operator the expression must end here.
    fn parse_tail(&mut self) -> Attempt {
        if let Some(Token::Operator(op)) = self.buf.current() {
            let op = op.clone();
            self.buf.advance();
            self.emit(if op == "->" { "\\to" } else { op.as_str() });
            if !self.parse_expression()? {
                return Err(self.err(format!(
                    "expected expression after '{}', found {}",
                    op,
                    self.found()
                )));
            }
            return Ok(true);
        }
        match self.buf.current() {
            None | Some(Token::Newline) => Ok(true),
            Some(Token::Punctuation(',' | ';' | ']' | ')' | '}')) => Ok(true),
            Some(_) => Err(self.err(format!("unexpected {} in expression", self.found()))),
        }
    }

    // ( Expr ) | ( Expr , Expr )
    //
    // Both forms share the first expression; the token after it decides.
    fn parse_group(&mut self) -> Attempt {
        if !self.at_punct('(') {
            return Ok(false);
        }
        self.buf.advance();
        self.emit("\\left(");
        if !self.parse_expression()? {
            return Err(self.err(format!("expected expression after '(', found {}", self.found())));
        }
        if self.at_punct(',') {
            self.buf.advance();
            self.emit(",");
            if !self.parse_expression()? {
                return Err(self.err("points must have two coordinates"));
            }
            self.expect_punct(')', "to close point")?;
        } else {
            self.expect_punct(')', "to close parenthesis")?;
        }
        self.emit("\\right)");
        Ok(true)
    }

    // IDENT ! ( token,* )
    fn parse_macro_call(&mut self) -> Attempt {
        let name = match self.buf.current() {
            Some(Token::Identifier(name)) if self.next_is_punct('!') => name.clone(),
            _ => return Ok(false),
        };
        let line = self.buf.line();
        let depth = self.buf.depth();
        if !self.expander.is_defined(&name) {
            return Err(self.err(format!("macro '{}' is not defined", name)));
        }
        self.buf.advance();
        self.buf.advance();
        if !self.at_punct('(') {
            return Err(self.err(format!(
                "expected '(' after '{}!', found {}",
                name,
                self.found()
            )));
        }
        self.buf.advance();

        let mut args = Vec::new();
        while !self.at_punct(')') {
            if !args.is_empty() {
                self.expect_punct(',', "between macro arguments")?;
            }
            let text = match self.buf.current() {
                Some(Token::StringNote(text)) => text.clone(),
                Some(Token::Newline) | None => {
                    return Err(self.err(format!("call of macro '{}' was not closed", name)))
                }
                Some(token) => token.source_text(),
            };
            args.push(text);
            self.buf.advance();
        }

        // The cursor sits on ')': the expansion goes right after it.
        let tokens =
            self.expander
                .expand_macro(&name, &args, self.last_declared.as_deref(), line, depth)?;
        self.buf.splice_after_current(tokens);
        self.buf.advance();
        Ok(true)
    }

    // builtin ( Expr,* ) | user function ( Expr,* )
    fn parse_function_call(&mut self) -> Attempt {
        let name = match self.buf.current() {
            Some(Token::Identifier(name)) => name.clone(),
            _ => return Ok(false),
        };
        let head = if let Some(form) = builtins::lookup(&name) {
            builtins::call_head(&name, form)
        } else if self.scopes.resolve_function(&self.path, &name) {
            subscriptify(&name)
        } else {
            return Ok(false);
        };
        self.buf.advance();
        self.expect_punct('(', &format!("after '{}'", name))?;
        self.emit(&head);
        self.emit("\\left(");

        let mut first = true;
        while !self.at_punct(')') {
            if !first {
                self.expect_punct(',', &format!("between arguments to '{}'", name))?;
                self.emit(",");
            }
            if !self.parse_expression()? {
                return Err(self.err(format!(
                    "expected argument to '{}', found {}",
                    name,
                    self.found()
                )));
            }
            first = false;
        }
        self.buf.advance();
        self.emit("\\right)");
        Ok(true)
    }

    // INT | IDENT, optionally indexed: [ Expr ]
    fn parse_value(&mut self) -> Attempt {
        match self.buf.current() {
            Some(Token::IntLiteral(n)) => {
                let text = n.to_string();
                self.buf.advance();
                self.emit(&text);
            }
            Some(Token::Identifier(name)) => {
                // `IDENT for ...` is a comprehension.
                if self.buf.peek(1).is_some_and(|t| t.is_keyword(Keyword::For)) {
                    return Ok(false);
                }
                let name = name.clone();
                self.parse_identifier(name)?;
            }
            _ => return Ok(false),
        }

        if self.at_punct('[') {
            self.buf.advance();
            self.emit("\\left[");
            if !self.parse_expression()? {
                return Err(self.err(format!("expected index after '[', found {}", self.found())));
            }
            self.expect_punct(']', "to close index")?;
            self.emit("\\right]");
        }
        Ok(true)
    }

    /// Emit a variable reference, handling qualified access, axis names and
    /// implicit declaration.
    fn parse_identifier(&mut self, name: String) -> Result<(), CompileError> {
        if self.next_is_punct('.') {
            let Some((scope_path, _)) = self.scopes.resolve_scope(&self.path, &name) else {
                return Err(self.err(format!("'{}' is not a namespace or function", name)));
            };
            self.buf.advance();
            self.buf.advance();
            let saved = std::mem::replace(&mut self.path, scope_path);
            let result = self.parse_member(&name);
            self.path = saved;
            return result;
        }

        if AXIS_NAMES.contains(&name.as_str()) {
            self.buf.advance();
            self.emit(&name);
            return Ok(());
        }

        if self.latex.is_empty() && self.buf.peek(1).is_some_and(|t| t.is_op("=")) {
            self.scopes.declare(&self.path, &name);
            self.last_declared = Some(name.clone());
        }
        let rendered = self.render_variable(&name)?;
        self.buf.advance();
        self.emit(&rendered);
        Ok(())
    }

    fn parse_member(&mut self, scope: &str) -> Result<(), CompileError> {
        if self.parse_function_call()? || self.parse_value()? {
            Ok(())
        } else {
            Err(self.err(format!(
                "expected member of '{}' after '.', found {}",
                scope,
                self.found()
            )))
        }
    }

    /// Subscript form of a declared variable, prefixed with the name of the
    /// scope that declares it.
    fn render_variable(&self, name: &str) -> Result<String, CompileError> {
        if AXIS_NAMES.contains(&name) {
            return Ok(name.to_owned());
        }
        let declared_in = self
            .scopes
            .resolve(&self.path, name)
            .ok_or_else(|| self.err(format!("variable {} not defined", name)))?;
        let prefix = declared_in.last().map(String::as_str).unwrap_or_default();
        Ok(subscriptify(&format!("{}{}", prefix, name)))
    }

    // [ Expr,* ]
    fn parse_list(&mut self) -> Attempt {
        if !self.at_punct('[') {
            return Ok(false);
        }
        self.buf.advance();
        self.emit("\\left[");
        let mut first = true;
        while !self.at_punct(']') {
            if !first {
                self.expect_punct(',', "between list elements")?;
                self.emit(",");
            }
            if !self.parse_expression()? {
                return Err(self.err(format!("expected list element, found {}", self.found())));
            }
            first = false;
        }
        self.buf.advance();
        self.emit("\\right]");
        Ok(true)
    }

    // IDENT for IDENT = List
    fn parse_comprehension(&mut self) -> Attempt {
        let body = match self.buf.current() {
            Some(Token::Identifier(body))
                if self.buf.peek(1).is_some_and(|t| t.is_keyword(Keyword::For)) =>
            {
                body.clone()
            }
            _ => return Ok(false),
        };
        self.buf.advance();
        self.buf.advance();
        let var = self.take_identifier("comprehension variable")?;
        if !self.at_op("=") {
            return Err(self.err(format!("expected '=' after '{}', found {}", var, self.found())));
        }
        self.buf.advance();

        if !AXIS_NAMES.contains(&var.as_str()) {
            self.scopes.declare(&self.path, &var);
        }
        let body = self.render_variable(&body)?;
        let var_rendered = self.render_variable(&var)?;
        self.emit(&body);
        self.emit("\\operatorname{for}");
        self.emit(&var_rendered);
        self.emit("=");
        if !self.parse_list()? {
            return Err(self.err(format!("{} must range over a list, found {}", var, self.found())));
        }
        Ok(true)
    }
}
