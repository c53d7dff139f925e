//! # taxodelta-base
//!
//! Core library for DELTA (DEscription Language for TAxonomy) parsing and
//! identification matching.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! dataset   → Dataset owner (characters + items + optional specifications)
//!   ↓
//! catalog   → CharacterCatalog, ItemCatalog (+ matching), SpecificationCatalog
//!   ↓
//! parser    → Scanner, ValueExpression, Attribute, directive lexer, errors
//!   ↓
//! source    → LineSource trait, FileSource, TextSource, LineReader
//!   ↓
//! base      → Text utilities (comment stripping, lenient numbers)
//! ```
//!
//! ## Example
//!
//! ```
//! use taxodelta::{Dataset, MatchOptions, ParseOptions};
//!
//! let dataset = Dataset::from_text(
//!     "#1. petal number/ 1. four/ 2. five/",
//!     "#Viola odorata/ 1,2\n#Cardamine/ 1,1",
//!     None,
//!     &ParseOptions::default(),
//! )
//! .unwrap();
//! let items = dataset.items();
//! assert_eq!(items.first_matching(1, &[2.0], &MatchOptions::default()), 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → source → parser → catalog → dataset)
// ============================================================================

/// Foundation: comment stripping, lenient number scanning
pub mod base;

/// Line input: LineSource trait, file and in-memory sources
pub mod source;

/// Parser: scanner, value expressions, attributes, directive lexer, errors
pub mod parser;

/// Catalogs of characters, items and specifications
pub mod catalog;

/// Dataset: loads all catalogs in order
pub mod dataset;

// Re-export commonly needed items
pub use base::strip_comments;
pub use catalog::{
    Character, CharacterCatalog, CharacterDependency, CharacterType, ImplicitValue, Item,
    ItemCatalog, MatchOptions, SpecificationCatalog,
};
pub use dataset::{Dataset, DatasetPaths};
pub use parser::{
    Attribute, DeltaError, Diagnostic, ParseOptions, Relation, Result, Sentinel, ValueExpression,
};
pub use source::{FileSource, LineSource, TextSource};
