//! Translation pipeline: GraphLang source -> output document.
//!
//! A thin orchestrator: lex, then drive the translator over the tokens.

use crate::document::Document;
use crate::error::CompileError;
use crate::lexer::lex;
use crate::options::CompileOptions;
use crate::source::{FileSystemProvider, ModuleProvider};
use crate::translate::Translator;
use std::path::Path;

/// Translate `source`, resolving imports from the directories in `options`.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Document, CompileError> {
    let provider = FileSystemProvider::new(&options.working_dir, &options.stdlib_dir);
    compile_with_provider(source, options, &provider)
}

/// Translate `source`, resolving imports through `provider`. Errors carry the
/// offending source line as their snippet.
pub fn compile_with_provider(
    source: &str,
    options: &CompileOptions,
    provider: &dyn ModuleProvider,
) -> Result<Document, CompileError> {
    let run = || -> Result<Document, CompileError> {
        let tokens = lex(source)?;
        tracing::debug!(tokens = tokens.len(), "lexed source");
        let doc = Translator::new(tokens, options, provider).run()?;
        tracing::info!(items = doc.items().len(), "translation finished");
        Ok(doc)
    };
    run().map_err(|e| e.with_source(source))
}

/// Read and translate the file at `path`. Imports are looked up next to the
/// file first, then in `options.stdlib_dir`.
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<Document, CompileError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        CompileError::new(0, format!("cannot read {}: {}", path.display(), e))
    })?;
    let working_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let options = CompileOptions {
        working_dir: working_dir.to_path_buf(),
        ..options.clone()
    };
    compile(&source, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryProvider;

    #[test]
    fn errors_carry_snippet() {
        let err = compile_with_provider(
            "a = 1\nb = oops",
            &CompileOptions::default(),
            &InMemoryProvider::default(),
        )
        .unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.snippet, "b = oops");
    }

    #[test]
    fn compile_file_imports_from_sibling() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shapes.graphlang"), "r = 4").unwrap();
        let main = dir.path().join("main.graphlang");
        std::fs::write(&main, "import shapes\nv = shapes.r").unwrap();

        let doc = compile_file(&main, &CompileOptions::default()).unwrap();
        let last = doc.formulas().last().unwrap();
        assert_eq!(last.latex, "v=s_{hapesr}");
    }

    #[test]
    fn compile_file_missing() {
        let err = compile_file(Path::new("/no/such/file.graphlang"), &CompileOptions::default())
            .unwrap_err();
        assert_eq!(err.line, 0);
        assert!(err.message.contains("cannot read"));
    }
}
