//! Module provider abstraction for `import` statements.
//!
//! The [`ModuleProvider`] trait hides where imported modules come from so the
//! translator can run against the filesystem or against in-memory sources in
//! tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File extension of GraphLang sources.
pub const SOURCE_EXTENSION: &str = "graphlang";

/// Resolves a module name to its source text.
pub trait ModuleProvider {
    /// Load the source of `name`. `Ok(None)` means no such module exists;
    /// `Err` means a module was found but could not be read.
    fn load_module(&self, name: &str) -> Result<Option<String>, std::io::Error>;
}

/// Filesystem-backed provider.
///
/// Tries `<working_dir>/<name>.graphlang` first and falls back to
/// `<stdlib_dir>/<name>.graphlang`. The first file that exists wins; the
/// two locations are never merged.
#[derive(Debug, Clone)]
pub struct FileSystemProvider {
    pub working_dir: PathBuf,
    pub stdlib_dir: PathBuf,
}

impl FileSystemProvider {
    pub fn new(working_dir: impl Into<PathBuf>, stdlib_dir: impl Into<PathBuf>) -> Self {
        FileSystemProvider {
            working_dir: working_dir.into(),
            stdlib_dir: stdlib_dir.into(),
        }
    }

    fn candidate(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, SOURCE_EXTENSION))
    }
}

impl ModuleProvider for FileSystemProvider {
    fn load_module(&self, name: &str) -> Result<Option<String>, std::io::Error> {
        for dir in [&self.working_dir, &self.stdlib_dir] {
            let path = Self::candidate(dir, name);
            if path.is_file() {
                tracing::debug!(module = name, path = %path.display(), "resolved import");
                return std::fs::read_to_string(&path).map(Some);
            }
        }
        Ok(None)
    }
}

/// In-memory provider keyed by module name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    modules: HashMap<String, String>,
}

impl InMemoryProvider {
    pub fn new(modules: HashMap<String, String>) -> Self {
        Self { modules }
    }

    pub fn with_module(mut self, name: &str, source: &str) -> Self {
        self.modules.insert(name.to_owned(), source.to_owned());
        self
    }
}

impl ModuleProvider for InMemoryProvider {
    fn load_module(&self, name: &str) -> Result<Option<String>, std::io::Error> {
        Ok(self.modules.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_found_and_missing() {
        let provider = InMemoryProvider::default().with_module("geo", "r = 1");
        assert_eq!(provider.load_module("geo").unwrap().as_deref(), Some("r = 1"));
        assert_eq!(provider.load_module("nope").unwrap(), None);
    }

    #[test]
    fn working_dir_shadows_stdlib() {
        let work = tempfile::tempdir().unwrap();
        let std = tempfile::tempdir().unwrap();
        std::fs::write(std.path().join("shapes.graphlang"), "s = 1").unwrap();
        std::fs::write(std.path().join("colors.graphlang"), "c = 2").unwrap();
        std::fs::write(work.path().join("shapes.graphlang"), "s = 3").unwrap();

        let provider = FileSystemProvider::new(work.path(), std.path());
        assert_eq!(provider.load_module("shapes").unwrap().as_deref(), Some("s = 3"));
        assert_eq!(provider.load_module("colors").unwrap().as_deref(), Some("c = 2"));
        assert_eq!(provider.load_module("missing").unwrap(), None);
    }
}
