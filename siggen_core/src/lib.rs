//! `siggen_core` is the engine behind the [siggen](../siggen_cli/index.html)
//! code generator. It maps an abstract description of a function's calling
//! interface onto several target-language syntaxes, regenerating source
//! artifacts idempotently and round-tripping the hand-written algorithm
//! bodies embedded in them.
//!
//! ## Processing pipeline
//!
//! ```text
//! functions.toml (registry)
//!   → FunctionSchema (validated, language-neutral interface description)
//!   → SignatureComposer / ValidationEmitter (per-dialect text rendering)
//!   → GeneratedFile (template merge around %%%GENCODE%%% markers)
//!   → ChangeGuard (write only when the bytes actually changed)
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: the data model: functions, inputs, optional inputs with
//!   range or list constraints, outputs.
//! - [`dialect`]: the closed set of target dialects and their static
//!   syntax profiles.
//! - [`compose`]: signature and call-expression rendering with canonical
//!   parameter order and column alignment.
//! - [`validate`]: parameter-validation code rendering.
//! - [`merge`]: template handling: owned-region markers, template
//!   derivation from generated files.
//! - [`extract`]: hand-written body extraction and comment stripping for
//!   re-emission in variant functions.
//! - [`session`]: the generation run itself, artifact by artifact.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use siggen_core::RunMode;
//! use siggen_core::run_session;
//!
//! let summary = run_session(Path::new("."), RunMode::Generate).unwrap();
//! println!(
//! 	"{} created, {} updated, {} unchanged",
//! 	summary.created.len(),
//! 	summary.updated.len(),
//! 	summary.unchanged
//! );
//! ```

pub use config::*;
pub use dialect::*;
pub use error::*;
pub use guard::*;
pub use registry::*;
pub use schema::*;
pub use session::*;

pub mod compose;
pub mod config;
pub mod dialect;
mod error;
pub mod extract;
mod guard;
pub mod merge;
pub mod postprocess;
pub mod registry;
pub mod schema;
pub mod session;
pub mod validate;

#[cfg(test)]
mod __fixtures;
