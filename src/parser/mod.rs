//! Parsers for the pieces of DELTA text that live inside one logical line
//!
//! ## Architecture
//!
//! ```text
//! attribute token "4<note>,1/(2-)3-5"
//!     ↓
//! Attribute → character number, comment, raw alternatives
//!     ↓
//! ValueExpression (Scanner) → sentinel or value list per alternative
//!
//! directive body "1-3,UM 5,RN"
//!     ↓
//! Lexer (logos) → TokenStream consumed by the specification catalog
//! ```
//!
//! Line grouping (descriptions spanning several physical lines) is the job of
//! the catalogs; everything here works on one already-assembled string.

mod attribute;
pub mod errors;
mod lexer;
mod options;
mod scanner;
mod value;

pub use attribute::{Attribute, tokenize_attributes};
pub use errors::{DeltaError, Diagnostic, ErrorCode, ParseContext, Result, SequenceKind, Severity};
pub use lexer::{Lexer, Token, TokenKind, TokenStream, tokenize};
pub use options::ParseOptions;
pub use scanner::{Scanner, split_outside_comments};
pub use value::{Relation, Sentinel, ValueExpression, ValueKind, ValueList};
