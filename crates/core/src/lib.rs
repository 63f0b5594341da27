//! graphlang-core: GraphLang translator core library.
//!
//! Translates GraphLang source into the JSON document format accepted by the
//! Desmos graphing calculator. Translation is syntax-directed: LaTeX is
//! emitted while the grammar is matched, with no intermediate tree.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`compile()`] -- translate source text with the filesystem import provider
//! - [`compile_with_provider()`] -- same, with any [`ModuleProvider`]
//! - [`compile_file()`] -- read and translate a `.graphlang` file
//! - [`Document`] -- the output document
//! - [`CompileError`] -- translation error type
//! - [`CompileOptions`] -- expansion limit and import roots

pub mod compile;
pub mod cursor;
pub mod document;
pub mod error;
pub mod expand;
pub mod lexer;
pub mod options;
pub mod scope;
pub mod source;
pub mod translate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use document::{Document, Folder, Formula, Item, Note};
pub use error::CompileError;
pub use options::CompileOptions;
pub use source::{FileSystemProvider, InMemoryProvider, ModuleProvider, SOURCE_EXTENSION};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use compile::{compile, compile_file, compile_with_provider};
pub use lexer::lex;
