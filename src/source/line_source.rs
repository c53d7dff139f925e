use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::parser::errors::{DeltaError, Result};

/// A named, rewindable sequence of text lines.
///
/// Catalogs depend only on this trait, never on a concrete file type.
pub trait LineSource {
    /// Name used in log and error messages (usually the file path).
    fn name(&self) -> &str;

    /// Prepare for reading from the first line. Calling it again rewinds.
    fn open(&mut self) -> Result<()>;

    /// Next physical line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Line source backed by a file on disk.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    name: String,
    reader: Option<BufReader<File>>,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            reader: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<()> {
        let file = File::open(&self.path).map_err(|source| DeltaError::MissingResource {
            name: self.name.clone(),
            source,
        })?;
        self.reader = Some(BufReader::new(file));
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        if self.reader.is_none() {
            self.open()?;
        }
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut bytes = Vec::new();
        if reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        Ok(Some(decode_line(bytes)))
    }
}

/// Decode one line as UTF-8, falling back to Latin-1, which legacy DELTA
/// datasets commonly use.
fn decode_line(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Line source over text already held in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    lines: Vec<String>,
    cursor: usize,
}

impl TextSource {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            lines: text
                .lines()
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect(),
            cursor: 0,
        }
    }
}

impl LineSource for TextSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.get(self.cursor).cloned();
        if line.is_some() {
            self.cursor += 1;
        }
        Ok(line)
    }
}
