//! Specifications file: `CHARACTER TYPES`, `IMPLICIT VALUES` and
//! `DEPENDENT CHARACTERS` directives.
//!
//! Each `*` line starts a directive and following lines continue it. The
//! directive bodies are lexed with [`TokenStream`]; whitespace separates
//! clauses.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use indexmap::IndexMap;

use super::characters::{CharacterCatalog, CharacterType};
use crate::parser::errors::{DeltaError, Diagnostic, ErrorCode, Result};
use crate::parser::{ParseOptions, TokenKind, TokenStream};
use crate::source::{FileSource, LineReader, LineSource, TextSource};

pub const CHARACTER_TYPES: &str = "CHARACTER TYPES";
pub const IMPLICIT_VALUES: &str = "IMPLICIT VALUES";
pub const DEPENDENT_CHARACTERS: &str = "DEPENDENT CHARACTERS";

/// Control states are stored as bits of a `u32`.
const STATE_BITS: u32 = u32::BITS;

/// Values assumed for a character an item leaves out (`iv1`) or lists
/// without a value (`iv2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImplicitValue {
    pub iv1: i32,
    pub iv2: i32,
}

/// One `cc,s/s:d-d` clause: the dependents apply when the control character
/// has one of the listed states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDependency {
    control: usize,
    state_mask: u32,
    dependents: Vec<bool>,
}

impl CharacterDependency {
    pub fn control_character(&self) -> usize {
        self.control
    }

    /// Bit `i` set means state `i + 1`.
    pub fn state_mask(&self) -> u32 {
        self.state_mask
    }

    pub fn has_state(&self, state: u32) -> bool {
        (1..=STATE_BITS).contains(&state) && self.state_mask & (1 << (state - 1)) != 0
    }

    pub fn states(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=STATE_BITS).filter(|&s| self.has_state(s))
    }

    pub fn is_dependent(&self, character: usize) -> bool {
        character
            .checked_sub(1)
            .and_then(|i| self.dependents.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Dependent character numbers in ascending order.
    pub fn dependents(&self) -> impl Iterator<Item = usize> + '_ {
        self.dependents
            .iter()
            .enumerate()
            .filter(|(_, dependent)| **dependent)
            .map(|(i, _)| i + 1)
    }

    pub fn dependent_count(&self) -> usize {
        self.dependents.iter().filter(|d| **d).count()
    }
}

impl fmt::Display for CharacterDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<String> = self.states().map(|s| s.to_string()).collect();
        let dependents: Vec<String> = self.dependents().map(|d| d.to_string()).collect();
        write!(
            f,
            "{},{}:{}",
            self.control,
            states.join("/"),
            dependents.join(":")
        )
    }
}

/// Parsed contents of a DELTA specifications file.
///
/// Character numbers are checked against the [`CharacterCatalog`] passed to
/// [`parse`](Self::parse), which is also where `CHARACTER TYPES` is applied.
pub struct SpecificationCatalog {
    source: Box<dyn LineSource>,
    options: ParseOptions,
    entries: Vec<String>,
    character_count: usize,
    implicit: Vec<ImplicitValue>,
    /// Dependency records in declaration order.
    dependencies: Vec<CharacterDependency>,
    /// Control character -> positions of its records in `dependencies`.
    by_control: IndexMap<usize, Vec<usize>>,
    diagnostics: Vec<Diagnostic>,
    parsed: bool,
}

impl SpecificationCatalog {
    pub fn new(source: impl LineSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            options: ParseOptions::default(),
            entries: Vec::new(),
            character_count: 0,
            implicit: Vec::new(),
            dependencies: Vec::new(),
            by_control: IndexMap::new(),
            diagnostics: Vec::new(),
            parsed: false,
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

    /// Read the specifications file and apply it to `characters`.
    ///
    /// `characters` must already be parsed. Incompatible retypings and
    /// out-of-range character numbers are reported in
    /// [`diagnostics`](Self::diagnostics) and skipped.
    ///
    /// # Errors
    /// - [`DeltaError::MalformedDirective`] for any directive syntax error
    /// - [`DeltaError::MissingResource`] / [`DeltaError::Io`] from the source
    pub fn parse(&mut self, characters: &mut CharacterCatalog) -> Result<()> {
        self.parsed = false;
        self.entries.clear();
        self.dependencies.clear();
        self.by_control.clear();
        self.diagnostics.clear();
        self.character_count = characters.char_count();
        self.implicit = vec![ImplicitValue::default(); self.character_count];

        let mut entries: Vec<(String, usize)> = Vec::new();
        {
            let mut reader = LineReader::open(self.source.as_mut())?;
            tracing::debug!("parsing specifications from {}", reader.source_name());
            while let Some(line) = reader.next_line()? {
                if let Some(body) = line.strip_prefix('*') {
                    entries.push((body.trim_start().to_string(), reader.line_number()));
                } else if let Some((entry, _)) = entries.last_mut() {
                    entry.push(' ');
                    entry.push_str(&line);
                } else {
                    tracing::trace!("ignoring text before first directive: {line}");
                }
            }
        }

        for (entry, line) in &entries {
            self.apply(entry, *line, characters)?;
        }
        self.entries = entries.into_iter().map(|(entry, _)| entry).collect();

        self.parsed = true;
        tracing::debug!(
            "parsed {} specifications, {} dependency records, {} diagnostics",
            self.entries.len(),
            self.dependencies().count(),
            self.diagnostics.len()
        );
        Ok(())
    }

    fn apply(&mut self, entry: &str, line: usize, characters: &mut CharacterCatalog) -> Result<()> {
        if let Some(body) = entry.strip_prefix(CHARACTER_TYPES) {
            self.parse_character_types(body, line, characters)
        } else if let Some(body) = entry.strip_prefix(IMPLICIT_VALUES) {
            self.parse_implicit_values(body, line)
        } else if let Some(body) = entry.strip_prefix(DEPENDENT_CHARACTERS) {
            self.parse_dependencies(body, line)
        } else {
            tracing::trace!("skipping directive: {entry}");
            Ok(())
        }
    }

    fn parse_character_types(
        &mut self,
        body: &str,
        line: usize,
        characters: &mut CharacterCatalog,
    ) -> Result<()> {
        let mut tokens = TokenStream::new(body);
        while let Some(clause) = next_clause(&mut tokens) {
            let range = character_range(&mut tokens, CHARACTER_TYPES, &clause, line)?;
            expect(&mut tokens, TokenKind::Comma, CHARACTER_TYPES, &clause, line)?;
            let requested = match tokens.bump() {
                Some(token) if token.kind == TokenKind::Word => token
                    .text
                    .parse::<CharacterType>()
                    .map_err(|err| DeltaError::malformed(CHARACTER_TYPES, err.to_string(), line))?,
                _ => {
                    return Err(DeltaError::malformed(
                        CHARACTER_TYPES,
                        format!("missing type code in '{clause}'"),
                        line,
                    ));
                }
            };
            end_of_clause(&tokens, CHARACTER_TYPES, &clause, line)?;

            for n in self.known_characters(range, CHARACTER_TYPES, line) {
                let Some(detected) = characters.kind(n) else {
                    continue;
                };
                if detected.accepts(requested) {
                    characters.set_type(n, requested);
                } else {
                    let err = DeltaError::IncompatibleType {
                        character: n,
                        detected: detected.code(),
                        requested: requested.code(),
                    };
                    tracing::warn!("{}: {err}", self.source.name());
                    self.diagnostics.push(Diagnostic::from(&err).with_line(line));
                }
            }
        }
        Ok(())
    }

    fn parse_implicit_values(&mut self, body: &str, line: usize) -> Result<()> {
        self.implicit.fill(ImplicitValue::default());

        let mut tokens = TokenStream::new(body);
        while let Some(clause) = next_clause(&mut tokens) {
            let range = character_range(&mut tokens, IMPLICIT_VALUES, &clause, line)?;
            expect(&mut tokens, TokenKind::Comma, IMPLICIT_VALUES, &clause, line)?;
            let iv1 = signed_value(&mut tokens, &clause, line)?;
            let iv2 = if tokens.eat(TokenKind::Colon) {
                signed_value(&mut tokens, &clause, line)?
            } else {
                0
            };
            end_of_clause(&tokens, IMPLICIT_VALUES, &clause, line)?;

            for n in self.known_characters(range, IMPLICIT_VALUES, line) {
                self.implicit[n - 1] = ImplicitValue { iv1, iv2 };
            }
        }
        Ok(())
    }

    fn parse_dependencies(&mut self, body: &str, line: usize) -> Result<()> {
        let max_state = self.options.max_control_state.min(STATE_BITS);

        let mut tokens = TokenStream::new(body);
        while let Some(clause) = next_clause(&mut tokens) {
            let control = tokens.number().ok_or_else(|| {
                DeltaError::malformed(
                    DEPENDENT_CHARACTERS,
                    format!("missing control character in '{clause}'"),
                    line,
                )
            })?;
            if !(1..=self.character_count).contains(&control) {
                return Err(DeltaError::malformed(
                    DEPENDENT_CHARACTERS,
                    format!("control character {control} out of range"),
                    line,
                ));
            }
            expect(&mut tokens, TokenKind::Comma, DEPENDENT_CHARACTERS, &clause, line)?;

            let mut state_mask = 0u32;
            loop {
                let state = tokens.number().filter(|&s| s > 0).ok_or_else(|| {
                    DeltaError::malformed(
                        DEPENDENT_CHARACTERS,
                        format!("missing or zero state number in '{clause}'"),
                        line,
                    )
                })?;
                match u32::try_from(state) {
                    Ok(state) if state <= max_state => state_mask |= 1 << (state - 1),
                    _ => {
                        let message = format!(
                            "state {state} of control character {control} exceeds {max_state}, ignored"
                        );
                        tracing::warn!("{}: {message}", self.source.name());
                        self.diagnostics
                            .push(Diagnostic::warning(ErrorCode::E0404, message).with_line(line));
                    }
                }
                if !tokens.eat(TokenKind::Slash) {
                    break;
                }
            }
            expect(&mut tokens, TokenKind::Colon, DEPENDENT_CHARACTERS, &clause, line)?;

            let mut dependents = vec![false; self.character_count];
            loop {
                let range = character_range(&mut tokens, DEPENDENT_CHARACTERS, &clause, line)?;
                if *range.start() == 0 || *range.end() > self.character_count {
                    return Err(DeltaError::malformed(
                        DEPENDENT_CHARACTERS,
                        format!(
                            "dependent characters {}-{} out of range",
                            range.start(),
                            range.end()
                        ),
                        line,
                    ));
                }
                for n in range {
                    dependents[n - 1] = true;
                }
                if !tokens.eat(TokenKind::Colon) {
                    break;
                }
            }
            end_of_clause(&tokens, DEPENDENT_CHARACTERS, &clause, line)?;

            let record = CharacterDependency {
                control,
                state_mask,
                dependents,
            };
            tracing::trace!("dependency {record}");
            self.by_control
                .entry(control)
                .or_default()
                .push(self.dependencies.len());
            self.dependencies.push(record);
        }
        Ok(())
    }

    /// Characters of `range` that exist; the rest is reported and skipped.
    fn known_characters(
        &mut self,
        range: RangeInclusive<usize>,
        directive: &'static str,
        line: usize,
    ) -> RangeInclusive<usize> {
        let first = (*range.start()).max(1);
        let last = (*range.end()).min(self.character_count);
        if first != *range.start() || last != *range.end() {
            let message = format!(
                "{directive}: characters {}-{} outside 1-{}, skipped",
                range.start(),
                range.end(),
                self.character_count
            );
            tracing::warn!("{}: {message}", self.source.name());
            self.diagnostics
                .push(Diagnostic::warning(ErrorCode::E0404, message).with_line(line));
        }
        first..=last
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Directive texts (without `*`), continuation lines joined.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    /// Implicit value `iv_type` (1 or 2) of `character`; 0 when unset or
    /// when an argument is invalid.
    pub fn implicit_value(&self, character: usize, iv_type: u8) -> i32 {
        if !self.parsed {
            return 0;
        }
        let Some(values) = self.implicit_values(character) else {
            tracing::warn!("implicit_value: character {character} out of range");
            return 0;
        };
        match iv_type {
            1 => values.iv1,
            2 => values.iv2,
            _ => {
                tracing::warn!("implicit_value: iv_type {iv_type} is neither 1 nor 2");
                0
            }
        }
    }

    pub fn implicit_values(&self, character: usize) -> Option<ImplicitValue> {
        character
            .checked_sub(1)
            .and_then(|i| self.implicit.get(i))
            .copied()
    }

    /// Every dependency record, in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = &CharacterDependency> {
        self.dependencies.iter()
    }

    /// Number of characters depending on `control` having `state`.
    pub fn dependent_count(&self, control: usize, state: u32) -> usize {
        self.dependents_of("dependent_count", control, state).len()
    }

    /// The `rank`-th (1-based) character depending on `control` having
    /// `state`, in character order; 0 when there is none.
    pub fn dependent(&self, control: usize, state: u32, rank: usize) -> usize {
        let dependents = self.dependents_of("dependent", control, state);
        match rank.checked_sub(1).and_then(|i| dependents.get(i)) {
            Some(&character) => character,
            None => {
                tracing::warn!(
                    "dependent: rank {rank} outside 1-{} for control character {control} state {state}",
                    dependents.len()
                );
                0
            }
        }
    }

    /// Whether `character` depends on `control` having `state`.
    pub fn is_dependent(&self, character: usize, control: usize, state: u32) -> bool {
        if !(1..=self.character_count).contains(&character) {
            tracing::warn!("is_dependent: character {character} out of range");
            return false;
        }
        self.records("is_dependent", control, state)
            .any(|record| record.is_dependent(character))
    }

    /// Records for `control` that include `state`. Empty (after a warning)
    /// when an argument is out of range.
    fn records(
        &self,
        query: &str,
        control: usize,
        state: u32,
    ) -> impl Iterator<Item = &CharacterDependency> {
        let valid = if !(1..=self.character_count).contains(&control) {
            tracing::warn!("{query}: control character {control} out of range");
            false
        } else if !(1..=STATE_BITS).contains(&state) {
            tracing::warn!("{query}: state {state} out of range");
            false
        } else {
            true
        };
        self.by_control
            .get(&control)
            .filter(|_| valid)
            .into_iter()
            .flatten()
            .filter_map(move |&index| self.dependencies.get(index))
            .filter(move |record| record.has_state(state))
    }

    /// Union of the dependents of every matching record, ascending.
    fn dependents_of(&self, query: &str, control: usize, state: u32) -> Vec<usize> {
        let records: Vec<_> = self.records(query, control, state).collect();
        if records.is_empty() {
            return Vec::new();
        }
        (1..=self.character_count)
            .filter(|&c| records.iter().any(|record| record.is_dependent(c)))
            .collect()
    }
}

impl fmt::Debug for SpecificationCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificationCatalog")
            .field("source", &self.source.name())
            .field("entries", &self.entries)
            .field("dependencies", &self.dependencies)
            .field("parsed", &self.parsed)
            .finish()
    }
}

impl fmt::Display for SpecificationCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} specifications", self.entries.len())
    }
}

/// Skip to the next clause and return its text, or `None` at the end.
fn next_clause(tokens: &mut TokenStream<'_>) -> Option<String> {
    tokens.skip_whitespace();
    (!tokens.is_at_end()).then(|| tokens.clause_text())
}

/// `n` or `n-m`.
fn character_range(
    tokens: &mut TokenStream<'_>,
    directive: &'static str,
    clause: &str,
    line: usize,
) -> Result<RangeInclusive<usize>> {
    let missing =
        || DeltaError::malformed(directive, format!("expected character number in '{clause}'"), line);
    let first = tokens.number().ok_or_else(missing)?;
    let last = if tokens.eat(TokenKind::Minus) {
        tokens.number().ok_or_else(missing)?
    } else {
        first
    };
    if last < first {
        return Err(DeltaError::malformed(
            directive,
            format!("reversed range {first}-{last}"),
            line,
        ));
    }
    Ok(first..=last)
}

fn signed_value(tokens: &mut TokenStream<'_>, clause: &str, line: usize) -> Result<i32> {
    let negative = tokens.eat(TokenKind::Minus);
    tokens
        .number()
        .and_then(|n| i32::try_from(n).ok())
        .map(|n| if negative { -n } else { n })
        .ok_or_else(|| {
            DeltaError::malformed(
                IMPLICIT_VALUES,
                format!("expected implicit value in '{clause}'"),
                line,
            )
        })
}

fn expect(
    tokens: &mut TokenStream<'_>,
    kind: TokenKind,
    directive: &'static str,
    clause: &str,
    line: usize,
) -> Result<()> {
    if tokens.eat(kind) {
        return Ok(());
    }
    let expected = match kind {
        TokenKind::Comma => "','",
        TokenKind::Colon => "':'",
        TokenKind::Slash => "'/'",
        TokenKind::Minus => "'-'",
        _ => "separator",
    };
    Err(DeltaError::malformed(
        directive,
        format!("expected {expected} in '{clause}'"),
        line,
    ))
}

fn end_of_clause(
    tokens: &TokenStream<'_>,
    directive: &'static str,
    clause: &str,
    line: usize,
) -> Result<()> {
    if tokens.is_at_end() || tokens.at(TokenKind::Whitespace) {
        Ok(())
    } else {
        Err(DeltaError::malformed(
            directive,
            format!("unexpected text in '{clause}'"),
            line,
        ))
    }
}
