use crate::error::CompileError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Ns,
    Fn,
    Macro,
    Import,
    For,
    If,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Ns => "ns",
            Keyword::Fn => "fn",
            Keyword::Macro => "macro",
            Keyword::Import => "import",
            Keyword::For => "for",
            Keyword::If => "if",
        }
    }

    fn from_word(word: &str) -> Option<Keyword> {
        match word {
            "ns" => Some(Keyword::Ns),
            "fn" => Some(Keyword::Fn),
            "macro" => Some(Keyword::Macro),
            "import" => Some(Keyword::Import),
            "for" => Some(Keyword::For),
            "if" => Some(Keyword::If),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Identifier(String),
    IntLiteral(u64),
    /// One of `{ } [ ] ( ) . , ; !`
    Punctuation(char),
    /// One of `+ - * / ^ = -> < > <= >= !=`
    Operator(String),
    /// Quoted note, content without the quotes
    StringNote(String),
    Newline,
}

impl Token {
    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, Token::Punctuation(p) if *p == c)
    }

    pub fn is_op(&self, op: &str) -> bool {
        matches!(self, Token::Operator(o) if o == op)
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, Token::Keyword(k) if *k == kw)
    }

    /// Text that lexes back to this token.
    pub fn source_text(&self) -> String {
        match self {
            Token::Keyword(k) => k.as_str().to_owned(),
            Token::Identifier(s) => s.clone(),
            Token::IntLiteral(n) => n.to_string(),
            Token::Punctuation(c) => c.to_string(),
            Token::Operator(o) => o.clone(),
            Token::StringNote(s) => {
                if s.contains('"') {
                    format!("'{}'", s)
                } else {
                    format!("\"{}\"", s)
                }
            }
            Token::Newline => "\n".to_owned(),
        }
    }

    fn is_wordlike(&self) -> bool {
        matches!(
            self,
            Token::Keyword(_) | Token::Identifier(_) | Token::IntLiteral(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Newline => write!(f, "end of line"),
            other => write!(f, "'{}'", other.source_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
    /// Expansion depth: 0 for tokens of the original text.
    pub depth: usize,
    /// Whitespace or a comment came before this token on its line.
    pub space_before: bool,
}

impl Spanned {
    pub fn new(token: Token, line: u32) -> Self {
        Spanned {
            token,
            line,
            depth: 0,
            space_before: false,
        }
    }
}

/// Join tokens back into source text. A space goes wherever the source had
/// one, and between neighbours that would otherwise lex as a single token.
pub fn render_tokens(tokens: &[Spanned]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for s in tokens {
        if let Some(p) = prev {
            let fuse = (p.is_wordlike() && s.token.is_wordlike())
                || (matches!(p, Token::Operator(_)) && matches!(s.token, Token::Operator(_)))
                || (p.is_punct('!') && s.token.is_op("="));
            if s.space_before || fuse {
                out.push(' ');
            }
        }
        out.push_str(&s.token.source_text());
        prev = Some(&s.token);
    }
    out
}

const OPERATORS: [&str; 13] = [
    "->", "<=", ">=", "!=", "+", "-", "*", "/", "^", "=", "<", ">", "!",
];

pub fn lex(src: &str) -> Result<Vec<Spanned>, CompileError> {
    let chars: Vec<(usize, char)> = src.char_indices().collect();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut spaced = false;

    while pos < chars.len() {
        let (offset, c) = chars[pos];

        // Identifier / keyword
        if c.is_ascii_alphabetic() || c == '_' {
            let start = offset;
            while pos < chars.len() && (chars[pos].1.is_ascii_alphanumeric() || chars[pos].1 == '_')
            {
                pos += 1;
            }
            let end = chars.get(pos).map_or(src.len(), |(o, _)| *o);
            let word = &src[start..end];
            let token = match Keyword::from_word(word) {
                Some(kw) => Token::Keyword(kw),
                None => Token::Identifier(word.to_owned()),
            };
            push(&mut tokens, &mut spaced, token, line);
            continue;
        }

        // Integer
        if c.is_ascii_digit() {
            let start = offset;
            while pos < chars.len() && chars[pos].1.is_ascii_digit() {
                pos += 1;
            }
            let end = chars.get(pos).map_or(src.len(), |(o, _)| *o);
            let digits = &src[start..end];
            let n: u64 = digits.parse().map_err(|_| {
                CompileError::new(line, format!("integer literal '{}' is too large", digits))
            })?;
            push(&mut tokens, &mut spaced, Token::IntLiteral(n), line);
            continue;
        }

        if matches!(c, '{' | '}' | '[' | ']' | '(' | ')' | '.' | ',' | ';') {
            push(&mut tokens, &mut spaced, Token::Punctuation(c), line);
            pos += 1;
            continue;
        }

        // Operators, longest first. A lone '!' is the macro marker.
        let rest = &src[offset..];
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            let token = if *op == "!" {
                Token::Punctuation('!')
            } else {
                Token::Operator((*op).to_owned())
            };
            push(&mut tokens, &mut spaced, token, line);
            pos += op.chars().count();
            continue;
        }

        match c {
            ' ' | '\t' | '\r' => {
                spaced = true;
                pos += 1;
            }
            '"' | '\'' => {
                let quote = c;
                pos += 1;
                let start = chars.get(pos).map_or(src.len(), |(o, _)| *o);
                while pos < chars.len() && chars[pos].1 != quote {
                    if chars[pos].1 == '\n' {
                        return Err(CompileError::new(line, "unterminated note"));
                    }
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(CompileError::new(line, "unterminated note"));
                }
                let text = &src[start..chars[pos].0];
                push(&mut tokens, &mut spaced, Token::StringNote(text.to_owned()), line);
                pos += 1;
            }
            '#' => {
                spaced = true;
                while pos < chars.len() && chars[pos].1 != '\n' {
                    pos += 1;
                }
            }
            '\n' => {
                push(&mut tokens, &mut spaced, Token::Newline, line);
                line += 1;
                pos += 1;
            }
            other => {
                return Err(CompileError::new(
                    line,
                    format!("unknown character '{}' at offset {}", other, offset),
                ));
            }
        }
    }

    Ok(tokens)
}

fn push(tokens: &mut Vec<Spanned>, spaced: &mut bool, token: Token, line: u32) {
    let mut s = Spanned::new(token, line);
    s.space_before = std::mem::take(spaced);
    tokens.push(s);
}
