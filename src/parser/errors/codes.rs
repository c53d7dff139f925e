//! Error code definitions for DELTA diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (comments, truncated input)
//! - E02xx: Sequence errors (numbering out of order)
//! - E03xx: Attribute errors (item descriptions)
//! - E04xx: Specification errors (directives in the specs file)
//! - E05xx: Resource errors (opening/reading files)

use std::fmt;

/// Error codes for DELTA diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Comment opened with `<` and never closed
    E0101,
    /// Input ended in the middle of a description
    E0102,
    /// Text found where no entry can start
    E0103,

    // =========================================================================
    // E02xx: Sequence errors
    // =========================================================================
    /// Character number out of sequence
    E0201,
    /// State number out of sequence
    E0202,

    // =========================================================================
    // E03xx: Attribute errors
    // =========================================================================
    /// Attribute without a `,` and alternatives
    E0301,
    /// Attribute that does not start with a character number
    E0302,

    // =========================================================================
    // E04xx: Specification errors
    // =========================================================================
    /// Directive body does not follow its syntax
    E0401,
    /// Unknown character type code
    E0402,
    /// Retyping conflicts with the detected character kind
    E0403,
    /// Character or state number outside the valid range
    E0404,

    // =========================================================================
    // E05xx: Resource errors
    // =========================================================================
    /// Resource cannot be opened
    E0501,
    /// Resource read failed
    E0502,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "lexical error",
            Self::E0201 | Self::E0202 => "sequence error",
            Self::E0301 | Self::E0302 => "attribute error",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "specification error",
            Self::E0501 | Self::E0502 => "resource error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "unterminated comment",
            Self::E0102 => "unexpected end of input",
            Self::E0103 => "unexpected text",
            Self::E0201 => "character sequence break",
            Self::E0202 => "state sequence break",
            Self::E0301 => "character without alternatives",
            Self::E0302 => "missing character number",
            Self::E0401 => "malformed directive",
            Self::E0402 => "unknown character type",
            Self::E0403 => "incompatible character type",
            Self::E0404 => "number out of range",
            Self::E0501 => "missing resource",
            Self::E0502 => "read error",
        }
    }

    /// Check if this is a sequence error (numbering-related)
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202)
    }

    /// Check if this is a recoverable error (parsing can continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::E0403)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
