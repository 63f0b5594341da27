use std::path::PathBuf;

pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 64;

/// Knobs for a single compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Nesting limit for macro and import expansion. Self-recursive macros and
    /// import cycles fail once they pass it.
    pub max_expansion_depth: usize,
    /// First place `import` looks for `<name>.graphlang`.
    pub working_dir: PathBuf,
    /// Fallback location for `import`.
    pub stdlib_dir: PathBuf,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            working_dir: PathBuf::from("."),
            stdlib_dir: PathBuf::from("stdlib"),
        }
    }
}
