//! Parse context tracking for context-aware error messages
//!
//! Each catalog parser records which construct it was reading when input ran
//! out, so messages can say "in item name" rather than just
//! "unexpected end of input".

use std::fmt;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// Reading a `#N. feature/` character description
    CharacterFeature,
    /// Reading a numbered state or a unit description
    StateDescription,
    /// Reading a `#name/` item name
    ItemName,
}

impl ParseContext {
    /// Get a human-readable description of this context
    pub fn description(&self) -> &'static str {
        match self {
            Self::CharacterFeature => "in character feature",
            Self::StateDescription => "in state description",
            Self::ItemName => "in item name",
        }
    }

    /// Describe what terminates the construct
    pub fn expected_description(&self) -> &'static str {
        "'/' followed by a blank or end of line"
    }
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
