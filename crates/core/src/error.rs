use serde::{Deserialize, Serialize};

/// A translation error. Every error is fatal to the run except while the
/// expression grammar is speculatively trying a point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct CompileError {
    pub message: String,
    /// 1-based source line, 0 when no line applies.
    pub line: u32,
    /// Text of the offending source line (empty when unavailable).
    pub snippet: String,
}

impl CompileError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        CompileError {
            message: message.into(),
            line,
            snippet: String::new(),
        }
    }

    /// Attach the text of the offending line taken from `source`.
    pub fn with_source(mut self, source: &str) -> Self {
        if self.line > 0 {
            if let Some(text) = source.lines().nth(self.line as usize - 1) {
                self.snippet = text.to_owned();
            }
        }
        self
    }

    /// Human-readable diagnostic: location, the offending line, and a caret
    /// marker spanning it.
    pub fn render(&self, filename: &str) -> String {
        let mut out = format!("error: {}\n  --> {}:{}\n", self.message, filename, self.line);
        if !self.snippet.is_empty() {
            let width = self.snippet.chars().count().max(1);
            out.push_str(&format!("    {}\n", self.snippet));
            out.push_str(&format!("    {}\n", "^".repeat(width)));
        }
        out
    }

    /// Serialize to the JSON shape printed by `--output json`.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "line":    self.line,
            "message": self.message,
            "snippet": self.snippet,
        })
    }
}
