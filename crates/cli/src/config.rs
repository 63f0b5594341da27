//! Compiler configuration file for `graphlang compile`.
//!
//! Read from `--config <path>`, or from `graphlang.toml` in the current
//! directory when present. Command-line flags override file values.
//!
//! # Example
//!
//! ```toml
//! [compiler]
//! max_expansion_depth = 64
//! stdlib_dir = "/usr/share/graphlang/std"
//! ```

use std::path::{Path, PathBuf};

use graphlang_core::CompileOptions;
use serde::{Deserialize, Serialize};

/// Name of the configuration file picked up from the current directory.
pub const CONFIG_FILE_NAME: &str = "graphlang.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerSettings,
}

/// `[compiler]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSettings {
    pub max_expansion_depth: Option<usize>,
    pub stdlib_dir: Option<PathBuf>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub max_expansion_depth: Option<usize>,
    pub stdlib_dir: Option<PathBuf>,
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a config file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Load the explicit config file, or `graphlang.toml` from `cwd` if it
/// exists, or the defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, String> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let implicit = cwd.join(CONFIG_FILE_NAME);
    if implicit.is_file() {
        tracing::debug!(path = %implicit.display(), "using config file");
        read_config(&implicit)
    } else {
        Ok(Config::default())
    }
}

/// `stdlib` next to the running executable.
pub fn default_stdlib_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("stdlib")))
        .unwrap_or_else(|| PathBuf::from("stdlib"))
}

/// Merge flags, file values and defaults into compile options.
pub fn resolve_options(config: &Config, overrides: Overrides) -> CompileOptions {
    let defaults = CompileOptions::default();
    CompileOptions {
        max_expansion_depth: overrides
            .max_expansion_depth
            .or(config.compiler.max_expansion_depth)
            .unwrap_or(defaults.max_expansion_depth),
        stdlib_dir: overrides
            .stdlib_dir
            .or_else(|| config.compiler.stdlib_dir.clone())
            .unwrap_or_else(default_stdlib_dir),
        working_dir: defaults.working_dir,
    }
}
