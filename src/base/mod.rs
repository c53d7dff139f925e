//! Foundation helpers for the DELTA toolchain.
//!
//! This module provides the text primitives shared by every parser layer:
//! - [`strip_comments`] - Remove nested `<...>` comment spans
//! - [`scan_number`], [`scan_integer`] - Lenient numeric prefix readers
//! - [`is_description_end`] - The `/`-terminator rule for descriptions
//!
//! This module depends only on the error types in [`crate::parser::errors`].

mod text_utils;

pub use text_utils::{
    COMMENT_CLOSE, COMMENT_OPEN, is_description_end, scan_integer, scan_number, strip_comments,
    strip_comments_lossy, trim_blanks,
};

// Offsets carried by errors
pub use text_size::TextSize;
