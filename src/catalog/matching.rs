//! Identification queries over an [`ItemCatalog`].
//!
//! `first_matching` and `next_matching` return the *highest*-numbered item
//! that matches in the scanned range, not the lowest. `next_matching` scans
//! from the previously returned item, inclusive, so calling it right after
//! `first_matching` returns the same item again unless it found a later one.

use super::items::ItemCatalog;

/// How observed values are compared with item attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// An unknown value (or an undescribed character) does not match.
    pub strict: bool,
    /// Range bounds written as extremes take part in the comparison.
    pub include_extremes: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            strict: true,
            include_extremes: true,
        }
    }
}

impl MatchOptions {
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    pub fn without_extremes(mut self) -> Self {
        self.include_extremes = false;
        self
    }
}

impl ItemCatalog {
    /// Scan every item and return the number of the highest one matching,
    /// or 0 when none does.
    pub fn first_matching(&self, character: usize, candidates: &[f64], options: &MatchOptions) -> usize {
        let found = self.scan_from(0, character, candidates, options).unwrap_or(0);
        self.last_matching.set(found);
        tracing::trace!("first_matching({character}) = {found}");
        found
    }

    /// Repeat the scan from the last returned item (inclusive) to the end.
    ///
    /// Returns 0 and keeps the remembered position when nothing matches.
    pub fn next_matching(&self, character: usize, candidates: &[f64], options: &MatchOptions) -> usize {
        let start = self.last_matching.get();
        match self.scan_from(start, character, candidates, options) {
            Some(found) => {
                self.last_matching.set(found);
                tracing::trace!("next_matching({character}) = {found}");
                found
            }
            None => 0,
        }
    }

    /// Whether item `item` matches. `false` when `item` is out of range.
    pub fn matches(
        &self,
        item: usize,
        character: usize,
        candidates: &[f64],
        options: &MatchOptions,
    ) -> bool {
        match self.item(item) {
            Some(item) => {
                item.matches_character(character, candidates, options.strict, options.include_extremes)
            }
            None => {
                tracing::warn!("matches: item {item} out of range");
                false
            }
        }
    }

    /// Number of the last item matched by `first_matching`/`next_matching`.
    pub fn last_matching(&self) -> usize {
        self.last_matching.get()
    }

    /// Highest-numbered matching item among items numbered `start..` (1-based,
    /// `0` scans everything).
    fn scan_from(
        &self,
        start: usize,
        character: usize,
        candidates: &[f64],
        options: &MatchOptions,
    ) -> Option<usize> {
        self.items
            .iter()
            .skip(start.saturating_sub(1))
            .filter(|item| {
                item.matches_character(
                    character,
                    candidates,
                    options.strict,
                    options.include_extremes,
                )
            })
            .map(|item| item.number())
            .last()
    }
}
