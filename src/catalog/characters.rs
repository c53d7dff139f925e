//! Character list: `#N. feature/` entries with numbered states or a unit.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::description::read_description;
use crate::parser::errors::{
    DeltaError, Diagnostic, ErrorCode, ParseContext, Result, SequenceKind,
};
use crate::parser::Scanner;
use crate::source::{FileSource, LineReader, LineSource, TextSource};

/// DELTA character types, written `UM`, `OM`, `IN`, `RN` and `TE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterType {
    UnorderedMultistate,
    OrderedMultistate,
    IntegerNumeric,
    RealNumeric,
    #[default]
    Text,
}

impl CharacterType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnorderedMultistate => "UM",
            Self::OrderedMultistate => "OM",
            Self::IntegerNumeric => "IN",
            Self::RealNumeric => "RN",
            Self::Text => "TE",
        }
    }

    pub fn is_multistate(&self) -> bool {
        matches!(self, Self::UnorderedMultistate | Self::OrderedMultistate)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::IntegerNumeric | Self::RealNumeric)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Whether a character detected as `self` may be declared as `requested`.
    ///
    /// Multistate stays multistate, numeric stays numeric, and text may
    /// stay text or become numeric.
    pub fn accepts(&self, requested: CharacterType) -> bool {
        if self.is_multistate() {
            requested.is_multistate()
        } else if self.is_numeric() {
            requested.is_numeric()
        } else {
            requested.is_text() || requested.is_numeric()
        }
    }
}

impl FromStr for CharacterType {
    type Err = DeltaError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "UM" => Ok(Self::UnorderedMultistate),
            "OM" => Ok(Self::OrderedMultistate),
            "IN" => Ok(Self::IntegerNumeric),
            "RN" => Ok(Self::RealNumeric),
            "TE" => Ok(Self::Text),
            _ => Err(DeltaError::UnknownTypeCode {
                code: code.to_string(),
            }),
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One taxonomic character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    number: usize,
    kind: CharacterType,
    feature: String,
    states: Vec<String>,
    unit: String,
}

impl Character {
    fn new(number: usize, feature: String) -> Self {
        Self {
            number,
            kind: CharacterType::Text,
            feature,
            states: Vec::new(),
            unit: String::new(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn kind(&self) -> CharacterType {
        self.kind
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// State descriptions; empty unless the character is multistate.
    pub fn states(&self) -> &[String] {
        if self.kind.is_multistate() {
            &self.states
        } else {
            &[]
        }
    }

    /// Unit; empty unless the character is numeric.
    pub fn unit(&self) -> &str {
        if self.kind.is_numeric() { &self.unit } else { "" }
    }
}

/// Parsed contents of a DELTA characters file.
pub struct CharacterCatalog {
    source: Box<dyn LineSource>,
    characters: Vec<Character>,
    directives: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    parsed: bool,
}

impl CharacterCatalog {
    pub fn new(source: impl LineSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            characters: Vec::new(),
            directives: Vec::new(),
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

    /// Read the whole characters file, replacing anything parsed before.
    ///
    /// # Errors
    /// - [`DeltaError::SequenceBreak`] when a character or state number is out of order
    /// - [`DeltaError::UnexpectedEof`] when a description is never terminated
    /// - [`DeltaError::UnexpectedText`] when a state line precedes the first character
    /// - [`DeltaError::MissingResource`] / [`DeltaError::Io`] from the source
    pub fn parse(&mut self) -> Result<()> {
        self.parsed = false;
        self.characters.clear();
        self.directives.clear();
        self.diagnostics.clear();

        let mut reader = LineReader::open(self.source.as_mut())?;
        tracing::debug!("parsing characters from {}", reader.source_name());

        while let Some(line) = reader.next_line()? {
            let mut statement = line;
            while !statement.is_empty() {
                statement = if statement.starts_with('*') {
                    self.directives.push(statement);
                    String::new()
                } else if let Some(entry) = statement.strip_prefix('#') {
                    read_character(&mut reader, entry, &mut self.characters)?
                } else {
                    read_state(
                        &mut reader,
                        &statement,
                        &mut self.characters,
                        &mut self.diagnostics,
                    )?
                };
            }
        }

        self.parsed = true;
        tracing::debug!(
            "parsed {} characters and {} directives",
            self.characters.len(),
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

    pub fn char_count(&self) -> usize {
        self.characters.len()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Character `n` (1-based).
    pub fn character(&self, n: usize) -> Option<&Character> {
        n.checked_sub(1).and_then(|i| self.characters.get(i))
    }

    pub fn kind(&self, n: usize) -> Option<CharacterType> {
        self.character(n).map(Character::kind)
    }

    pub fn feature(&self, n: usize) -> &str {
        self.character(n).map_or("", Character::feature)
    }

    pub fn unit(&self, n: usize) -> &str {
        self.character(n).map_or("", Character::unit)
    }

    pub fn state_count(&self, n: usize) -> usize {
        self.character(n).map_or(0, |c| c.states().len())
    }

    /// State `k` (1-based) of character `n`; empty when out of range.
    pub fn state(&self, n: usize, k: usize) -> &str {
        self.character(n)
            .and_then(|c| k.checked_sub(1).and_then(|i| c.states().get(i)))
            .map_or("", String::as_str)
    }

    /// Change the type of character `n`. Returns `false` when `n` is out of range.
    pub fn set_type(&mut self, n: usize, kind: CharacterType) -> bool {
        match n.checked_sub(1).and_then(|i| self.characters.get_mut(i)) {
            Some(character) => {
                character.kind = kind;
                true
            }
            None => {
                tracing::warn!("set_type: character {n} out of range");
                false
            }
        }
    }

    /// `*` directive lines, verbatim.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Debug for CharacterCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterCatalog")
            .field("source", &self.source.name())
            .field("characters", &self.characters)
            .field("directives", &self.directives)
            .field("parsed", &self.parsed)
            .finish()
    }
}

impl fmt::Display for CharacterCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} characters", self.characters.len())
    }
}

/// `entry` is the text after `#`. Returns the rest of the line.
fn read_character(
    reader: &mut LineReader<'_>,
    entry: &str,
    characters: &mut Vec<Character>,
) -> Result<String> {
    let mut scanner = Scanner::new(entry);
    scanner.skip_blanks();
    let number = scanner.integer();
    let expected = characters.len() + 1;
    if number != expected as i64 {
        return Err(DeltaError::sequence_break(
            SequenceKind::Character,
            expected,
            number,
            reader.line_number(),
        ));
    }
    skip_numbering(&mut scanner);

    let description = read_description(reader, scanner.rest(), ParseContext::CharacterFeature)?;
    tracing::trace!("character {expected}: {}", description.text);
    characters.push(Character::new(expected, description.text));
    Ok(description.rest)
}

fn read_state(
    reader: &mut LineReader<'_>,
    line: &str,
    characters: &mut [Character],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<String> {
    let Some(character) = characters.last_mut() else {
        return Err(DeltaError::UnexpectedText {
            text: line.to_string(),
            line: reader.line_number(),
        });
    };

    let mut scanner = Scanner::new(line);
    let numbered = scanner.peek().is_some_and(|c| c.is_ascii_digit());
    if numbered {
        let number = scanner.integer();
        let expected = character.states.len() + 1;
        if number != expected as i64 {
            return Err(DeltaError::sequence_break(
                SequenceKind::State,
                expected,
                number,
                reader.line_number(),
            ));
        }
    }
    skip_numbering(&mut scanner);

    let line_number = reader.line_number();
    let description = read_description(reader, scanner.rest(), ParseContext::StateDescription)?;
    let promoted = if numbered {
        character.states.push(description.text);
        CharacterType::UnorderedMultistate
    } else {
        character.unit = description.text;
        CharacterType::IntegerNumeric
    };

    if character.kind.is_text() {
        character.kind = promoted;
    } else if character.kind.is_multistate() != promoted.is_multistate() {
        let message = format!(
            "character {} already {}, {} line ignored for its type",
            character.number,
            character.kind,
            if numbered { "state" } else { "unit" }
        );
        tracing::warn!("{message}");
        diagnostics.push(Diagnostic::warning(ErrorCode::E0403, message).with_line(line_number));
    }
    Ok(description.rest)
}

/// Skip a leading `12. ` numbering.
fn skip_numbering(scanner: &mut Scanner<'_>) {
    scanner.skip_while(|c| c.is_ascii_digit() || c == '.' || c == ' ');
}
