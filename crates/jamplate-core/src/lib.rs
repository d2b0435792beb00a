//! Core runtime model for the Jamplate template engine.
//!
//! This crate provides:
//! - The `Environment` a pipeline run works in
//! - A typed metadata store (`Meta`) with the well-known run keys
//! - The diagnostic sink that collects and flushes messages
//! - Document hierarchy resolution from a project root
//! - The `Engine` boundary for the compile and execute phases

pub mod compilation;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod environment;
pub mod error;
pub mod meta;

pub use compilation::Compilation;
pub use diagnostic::{Diagnostic, Level, Message};
pub use document::Document;
pub use engine::{Engine, LiteralEngine};
pub use environment::Environment;
pub use error::{Error, Result};
pub use meta::{Key, Memory, Meta};

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File suffix that marks a document as a primary template unit.
pub const TEMPLATE_SUFFIX: &str = ".jamplate";
