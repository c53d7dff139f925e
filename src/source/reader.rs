use super::LineSource;
use crate::base::trim_blanks;
use crate::parser::errors::Result;

/// Logical-line reader over a [`LineSource`].
///
/// Leading blanks and tabs are removed and blank lines are skipped. One line
/// can be pushed back with [`LineReader::unread`], which lets a parser stop
/// in front of the next entry without consuming it.
pub struct LineReader<'a> {
    source: &'a mut dyn LineSource,
    line: usize,
    pending: Option<String>,
}

impl<'a> LineReader<'a> {
    pub fn new(source: &'a mut dyn LineSource) -> Self {
        Self {
            source,
            line: 0,
            pending: None,
        }
    }

    /// Open (or rewind) the underlying source and create a reader over it.
    pub fn open(source: &'a mut dyn LineSource) -> Result<Self> {
        source.open()?;
        Ok(Self::new(source))
    }

    /// Next non-blank line with leading blanks stripped.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        while let Some(raw) = self.source.read_line()? {
            self.line += 1;
            let trimmed = trim_blanks(&raw);
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
        Ok(None)
    }

    /// Push `line` back so the next call to [`next_line`](Self::next_line) returns it.
    pub fn unread(&mut self, line: String) {
        debug_assert!(self.pending.is_none(), "only one line of pushback");
        self.pending = Some(line);
    }

    /// 1-based number of the last physical line read.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}
