//! Item list: `#name/` entries followed by whitespace-separated attributes.

use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::description::read_description;
use crate::base::strip_comments_lossy;
use crate::parser::errors::{DeltaError, ParseContext, Result};
use crate::parser::{Attribute, ParseOptions, tokenize_attributes};
use crate::source::{FileSource, LineReader, LineSource, TextSource};

/// One taxon description.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    number: usize,
    name: String,
    attributes: Vec<Attribute>,
    /// Character number -> index of its first attribute.
    by_character: FxHashMap<usize, usize>,
}

impl Item {
    pub fn new(number: usize, name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        let mut by_character = FxHashMap::default();
        for (index, attribute) in attributes.iter().enumerate() {
            by_character.entry(attribute.character()).or_insert(index);
        }
        Self {
            number,
            name: name.into(),
            attributes,
            by_character,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// Name as written, comments included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name with every `<...>` comment removed.
    pub fn plain_name(&self) -> String {
        strip_comments_lossy(&self.name).trim().to_string()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// First attribute describing `character`.
    pub fn attribute_for(&self, character: usize) -> Option<&Attribute> {
        self.by_character
            .get(&character)
            .and_then(|&index| self.attributes.get(index))
    }

    /// Whether this item is consistent with `candidates` for `character`.
    ///
    /// A character the item does not describe counts as unknown.
    pub fn matches_character(
        &self,
        character: usize,
        candidates: &[f64],
        strict: bool,
        include_extremes: bool,
    ) -> bool {
        match self.attribute_for(character) {
            Some(attribute) => attribute.compare(candidates, strict, include_extremes),
            None => !strict,
        }
    }
}

/// Parsed contents of a DELTA items file.
pub struct ItemCatalog {
    source: Box<dyn LineSource>,
    options: ParseOptions,
    pub(super) items: Vec<Item>,
    directives: Vec<String>,
    parsed: bool,
    pub(super) last_matching: Cell<usize>,
}

impl ItemCatalog {
    pub fn new(source: impl LineSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            options: ParseOptions::default(),
            items: Vec::new(),
            directives: Vec::new(),
            parsed: false,
            last_matching: Cell::new(0),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }

    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(TextSource::new(name, text))
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the whole items file, replacing anything parsed before.
    ///
    /// # Errors
    /// - [`DeltaError::UnexpectedEof`] when an item name is never terminated
    /// - [`DeltaError::UnexpectedText`] when text precedes the first item
    /// - attribute errors from [`Attribute::parse_with`]
    /// - [`DeltaError::MissingResource`] / [`DeltaError::Io`] from the source
    pub fn parse(&mut self) -> Result<()> {
        self.parsed = false;
        self.items.clear();
        self.directives.clear();
        self.last_matching.set(0);

        let mut reader = LineReader::open(self.source.as_mut())?;
        tracing::debug!("parsing items from {}", reader.source_name());

        while let Some(line) = reader.next_line()? {
            if line.starts_with('*') {
                self.directives.push(line);
            } else if let Some(entry) = line.strip_prefix('#') {
                let item = read_item(&mut reader, entry, self.items.len() + 1, &self.options)?;
                tracing::trace!(
                    "item {}: {} ({} attributes)",
                    item.number,
                    item.name,
                    item.attributes.len()
                );
                self.items.push(item);
            } else {
                return Err(DeltaError::UnexpectedText {
                    text: line,
                    line: reader.line_number(),
                });
            }
        }

        self.parsed = true;
        tracing::debug!(
            "parsed {} items and {} directives",
            self.items.len(),
            self.directives.len()
        );
        Ok(())
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item `n` (1-based).
    pub fn item(&self, n: usize) -> Option<&Item> {
        n.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Name of item `n`, with or without its comments; empty when out of range.
    pub fn name(&self, n: usize, with_comment: bool) -> String {
        match self.item(n) {
            Some(item) if with_comment => item.name.clone(),
            Some(item) => item.plain_name(),
            None => String::new(),
        }
    }

    pub fn attribute_count(&self, n: usize) -> usize {
        self.item(n).map_or(0, |item| item.attributes.len())
    }

    /// Attribute `k` of item `n` rendered as `C<comment>,alternatives`.
    pub fn attribute(&self, n: usize, k: usize) -> String {
        let Some(item) = self.item(n) else {
            tracing::warn!("attribute: item {n} out of range");
            return String::new();
        };
        match k.checked_sub(1).and_then(|i| item.attributes.get(i)) {
            Some(attribute) => attribute.to_string(),
            None => {
                tracing::warn!("attribute: attribute {k} of item {n} out of range");
                String::new()
            }
        }
    }

    /// `*` directive lines, verbatim.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }
}

impl fmt::Debug for ItemCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemCatalog")
            .field("source", &self.source.name())
            .field("items", &self.items.len())
            .field("directives", &self.directives)
            .field("parsed", &self.parsed)
            .finish()
    }
}

impl fmt::Display for ItemCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} items", self.items.len())
    }
}

/// `entry` is the text after `#`.
fn read_item(
    reader: &mut LineReader<'_>,
    entry: &str,
    number: usize,
    options: &ParseOptions,
) -> Result<Item> {
    let description = read_description(reader, entry.trim_start(), ParseContext::ItemName)?;

    let mut block = description.rest;
    while let Some(line) = reader.next_line()? {
        if line.starts_with('#') {
            reader.unread(line);
            break;
        }
        if !block.is_empty() {
            block.push(' ');
        }
        block.push_str(&line);
    }

    let attributes = tokenize_attributes(&block)
        .into_iter()
        .map(|token| Attribute::parse_with(token, options))
        .collect::<Result<Vec<_>>>()?;

    Ok(Item::new(number, description.text, attributes))
}
