//! Macro and import expansion.
//!
//! Both produce a token sequence for the translator to splice after the
//! current token. Macro bodies are plain text templates: every `{param}` is
//! replaced by the bound argument text, then the result is lexed again. There
//! is no hygiene. Recursion is bounded only by the expansion depth carried
//! on each token.

use crate::error::CompileError;
use crate::lexer::{lex, Keyword, Spanned, Token};
use crate::source::ModuleProvider;
use std::collections::HashMap;

/// Reserved macro parameter bound to the name declared by the calling
/// statement.
pub const NAME_PARAM: &str = "__name__";

#[derive(Debug, Clone, PartialEq)]
pub struct MacroDefinition {
    pub name: String,
    pub params: Vec<String>,
    /// Body text with `{param}` placeholders.
    pub body: String,
}

impl MacroDefinition {
    /// Parameters supplied at the call site, in order.
    pub fn call_params(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .map(String::as_str)
            .filter(|p| *p != NAME_PARAM)
    }

    /// Body text with every placeholder replaced. `args` binds the call-site
    /// parameters positionally; `declared` feeds `__name__`.
    pub fn instantiate(&self, args: &[String], declared: Option<&str>) -> Result<String, String> {
        let expected = self.call_params().count();
        if args.len() != expected {
            return Err(format!(
                "macro '{}' takes {} argument(s), got {}",
                self.name,
                expected,
                args.len()
            ));
        }
        let fallback = format!("{}Object", self.name);
        let mut supplied = args.iter();
        let mut text = self.body.clone();
        for param in &self.params {
            let value = if param == NAME_PARAM {
                declared.unwrap_or(fallback.as_str())
            } else {
                supplied.next().map(String::as_str).unwrap_or_default()
            };
            text = text.replace(&format!("{{{}}}", param), value);
        }
        Ok(text)
    }
}

pub struct Expander {
    macros: HashMap<String, MacroDefinition>,
    max_depth: usize,
}

impl Expander {
    pub fn new(max_depth: usize) -> Self {
        Expander {
            macros: HashMap::new(),
            max_depth,
        }
    }

    /// Register a macro. A later definition replaces an earlier one.
    pub fn define(&mut self, def: MacroDefinition) {
        tracing::debug!(name = %def.name, params = ?def.params, "macro defined");
        self.macros.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.macros.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    fn check_depth(&self, depth: usize, line: u32, what: &str) -> Result<usize, CompileError> {
        let next = depth + 1;
        if next > self.max_depth {
            return Err(CompileError::new(
                line,
                format!(
                    "expansion depth limit exceeded while expanding {} (limit {})",
                    what, self.max_depth
                ),
            ));
        }
        Ok(next)
    }

    /// Tokens for a call of macro `name`, bracketed by newlines. `depth` is
    /// the expansion depth of the call site.
    pub fn expand_macro(
        &self,
        name: &str,
        args: &[String],
        declared: Option<&str>,
        line: u32,
        depth: usize,
    ) -> Result<Vec<Spanned>, CompileError> {
        let def = self
            .get(name)
            .ok_or_else(|| CompileError::new(line, format!("macro '{}' is not defined", name)))?;
        let next = self.check_depth(depth, line, &format!("macro '{}'", name))?;
        let text = def
            .instantiate(args, declared)
            .map_err(|msg| CompileError::new(line, msg))?;
        tracing::debug!(macro_name = name, ?args, depth = next, "expanding macro");
        let tokens = lex(&text).map_err(|e| {
            CompileError::new(
                line,
                format!("in expansion of macro '{}': {}", name, e.message),
            )
        })?;

        let mut out = Vec::with_capacity(tokens.len() + 2);
        out.push(synthetic(Token::Newline));
        out.extend(tokens);
        out.push(synthetic(Token::Newline));
        Ok(stamp(out, line, next))
    }

    /// Tokens for `import module`: the module's tokens wrapped as
    /// `ns module { ... }`, bracketed by newlines.
    pub fn expand_import(
        &self,
        module: &str,
        provider: &dyn ModuleProvider,
        line: u32,
        depth: usize,
    ) -> Result<Vec<Spanned>, CompileError> {
        let next = self.check_depth(depth, line, &format!("import '{}'", module))?;
        let source = provider
            .load_module(module)
            .map_err(|e| CompileError::new(line, format!("cannot read module '{}': {}", module, e)))?
            .ok_or_else(|| CompileError::new(line, format!("module '{}' not found", module)))?;
        let tokens = lex(&source).map_err(|e| {
            CompileError::new(
                line,
                format!("in module '{}' line {}: {}", module, e.line, e.message),
            )
        })?;
        tracing::debug!(module, tokens = tokens.len(), depth = next, "importing module");

        let mut out = Vec::with_capacity(tokens.len() + 8);
        out.extend(
            [
                Token::Newline,
                Token::Keyword(Keyword::Ns),
                Token::Identifier(module.to_owned()),
                Token::Punctuation('{'),
                Token::Newline,
            ]
            .map(synthetic),
        );
        out.extend(tokens);
        out.extend([Token::Newline, Token::Punctuation('}'), Token::Newline].map(synthetic));
        Ok(stamp(out, line, next))
    }
}

fn synthetic(token: Token) -> Spanned {
    Spanned::new(token, 0)
}

/// Move expanded tokens to the call site's line, one level deeper. Spacing
/// is kept.
fn stamp(tokens: Vec<Spanned>, line: u32, depth: usize) -> Vec<Spanned> {
    tokens
        .into_iter()
        .map(|s| Spanned { line, depth, ..s })
        .collect()
}
