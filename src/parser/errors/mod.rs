//! Parser error handling module
//!
//! This module provides error handling for the DELTA parsers:
//! - Categorized error codes for filtering and documentation
//! - Context-aware messages ("in item name", "in state description")
//! - Non-fatal diagnostics for conditions that are reported and skipped

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{DeltaError, Diagnostic, Result, SequenceKind, Severity};
