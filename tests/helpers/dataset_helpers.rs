//! Helpers that load fixture datasets from memory or from disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use taxodelta::{Dataset, DatasetPaths, ParseOptions};

use super::source_fixtures::{VIOLET_CHARACTERS, VIOLET_ITEMS, VIOLET_SPECS};

/// The violet dataset parsed from memory, with specifications.
pub fn violets() -> Dataset {
    Dataset::from_text(
        VIOLET_CHARACTERS,
        VIOLET_ITEMS,
        Some(VIOLET_SPECS),
        &ParseOptions::default(),
    )
    .expect("violet fixtures should parse")
}

/// Write `contents` under `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture should be written");
    path
}

/// The violet dataset written to a temporary directory.
pub fn violet_files() -> (TempDir, DatasetPaths) {
    let dir = TempDir::new().expect("temp dir");
    let characters = write_file(dir.path(), "chars", VIOLET_CHARACTERS);
    let items = write_file(dir.path(), "items", VIOLET_ITEMS);
    let specs = write_file(dir.path(), "specs", VIOLET_SPECS);
    let paths = DatasetPaths::new(characters, items).with_specifications(specs);
    (dir, paths)
}
