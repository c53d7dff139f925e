//! Line-oriented input for the DELTA catalogs.
//!
//! Every DELTA file is consumed as a sequence of *logical* lines: leading
//! blanks and tabs are removed and blank lines are skipped. Catalogs only see
//! the [`LineSource`] trait; [`FileSource`] reads from disk and [`TextSource`]
//! from a string held in memory.

mod line_source;
mod reader;

pub use line_source::{FileSource, LineSource, TextSource};
pub use reader::LineReader;
