//! DELTA error and diagnostic types
//!
//! [`DeltaError`] is what a failed `parse()` returns. [`Diagnostic`] records
//! conditions that are reported but do not stop parsing, such as a
//! specification that retypes a character inconsistently.

use std::fmt;
use std::io;

use text_size::TextSize;
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;

/// Which numbering sequence was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Character,
    State,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => f.write_str("character"),
            Self::State => f.write_str("state"),
        }
    }
}

/// Errors that can occur while reading DELTA files.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// Character or state numbers out of order.
    #[error("line {line}: {kind} sequence break (expected {expected}, found {found})")]
    SequenceBreak {
        kind: SequenceKind,
        expected: usize,
        found: i64,
        line: usize,
    },

    /// Specification directive that does not follow its syntax.
    #[error("line {line}: malformed {directive} directive: {message}")]
    MalformedDirective {
        directive: &'static str,
        message: String,
        line: usize,
    },

    /// Character type code other than UM, OM, IN, RN or TE.
    #[error("unknown character type code '{code}'")]
    UnknownTypeCode { code: String },

    /// A `<` that is never closed by a matching `>`.
    #[error("unterminated comment opened at offset {}", u32::from(*offset))]
    UnterminatedComment { offset: TextSize },

    /// Attribute with no `,` and alternatives after its character number.
    #[error("character without alternatives: '{attribute}'")]
    MissingAlternatives { attribute: String },

    /// Attribute that does not begin with a character number.
    #[error("attribute without character number: '{attribute}'")]
    MissingCharacterNumber { attribute: String },

    /// Specification retyping conflicting with the kind detected from the
    /// characters file.
    #[error("incompatible type for character {character}: detected {detected}, requested {requested}")]
    IncompatibleType {
        character: usize,
        detected: &'static str,
        requested: &'static str,
    },

    /// Input ended before a construct was terminated.
    #[error("line {line}: unexpected end of input {context}, expected {}", .context.expected_description())]
    UnexpectedEof { context: ParseContext, line: usize },

    /// Text where no entry may start.
    #[error("line {line}: unexpected text '{text}'")]
    UnexpectedText { text: String, line: usize },

    /// The named resource cannot be opened.
    #[error("unable to open {name}: {source}")]
    MissingResource {
        name: String,
        #[source]
        source: io::Error,
    },

    /// IO error while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeltaError>;

impl DeltaError {
    /// Create a sequence-break error.
    pub fn sequence_break(kind: SequenceKind, expected: usize, found: i64, line: usize) -> Self {
        Self::SequenceBreak {
            kind,
            expected,
            found,
            line,
        }
    }

    /// Create a malformed-directive error.
    pub fn malformed(directive: &'static str, message: impl Into<String>, line: usize) -> Self {
        Self::MalformedDirective {
            directive,
            message: message.into(),
            line,
        }
    }

    /// Create an unexpected-end-of-input error.
    pub fn eof(context: ParseContext, line: usize) -> Self {
        Self::UnexpectedEof { context, line }
    }

    /// The error code categorizing this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnterminatedComment { .. } => ErrorCode::E0101,
            Self::UnexpectedEof { .. } => ErrorCode::E0102,
            Self::UnexpectedText { .. } => ErrorCode::E0103,
            Self::SequenceBreak {
                kind: SequenceKind::Character,
                ..
            } => ErrorCode::E0201,
            Self::SequenceBreak {
                kind: SequenceKind::State,
                ..
            } => ErrorCode::E0202,
            Self::MissingAlternatives { .. } => ErrorCode::E0301,
            Self::MissingCharacterNumber { .. } => ErrorCode::E0302,
            Self::MalformedDirective { .. } => ErrorCode::E0401,
            Self::UnknownTypeCode { .. } => ErrorCode::E0402,
            Self::IncompatibleType { .. } => ErrorCode::E0403,
            Self::MissingResource { .. } => ErrorCode::E0501,
            Self::Io(_) => ErrorCode::E0502,
        }
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error that prevents valid parsing
    #[default]
    Error,
    /// A warning that doesn't prevent parsing
    Warning,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A reported condition that did not abort parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Categorized error code
    pub code: ErrorCode,
    /// Diagnostic severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Physical line (1-based) when known
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            line: None,
        }
    }

    /// Attach the line the condition was found on.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        match self.line {
            Some(line) => format!(
                "{} {}: line {}: {}",
                self.severity.as_str(),
                self.code,
                line,
                self.message
            ),
            None => format!("{} {}: {}", self.severity.as_str(), self.code, self.message),
        }
    }
}

impl From<&DeltaError> for Diagnostic {
    fn from(err: &DeltaError) -> Self {
        Self {
            code: err.code(),
            severity: if err.code().is_recoverable() {
                Severity::Warning
            } else {
                Severity::Error
            },
            message: err.to_string(),
            line: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_break_message() {
        let err = DeltaError::sequence_break(SequenceKind::State, 2, 3, 14);
        assert_eq!(
            err.to_string(),
            "line 14: state sequence break (expected 2, found 3)"
        );
        assert_eq!(err.code(), ErrorCode::E0202);
    }

    #[test]
    fn test_eof_mentions_context() {
        let err = DeltaError::eof(ParseContext::ItemName, 9);
        assert!(err.to_string().contains("in item name"));
        assert!(err.to_string().contains("expected '/'"));
        assert_eq!(err.code(), ErrorCode::E0102);
    }

    #[test]
    fn test_missing_resource_keeps_source() {
        let err = DeltaError::MissingResource {
            name: "chars".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.code(), ErrorCode::E0501);
    }

    #[test]
    fn test_diagnostic_from_incompatible_type_is_warning() {
        let err = DeltaError::IncompatibleType {
            character: 4,
            detected: "UM",
            requested: "RN",
        };
        let diag = Diagnostic::from(&err);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code, ErrorCode::E0403);
    }

    #[test]
    fn test_diagnostic_format() {
        let diag = Diagnostic::warning(ErrorCode::E0404, "state 40 ignored").with_line(3);
        let formatted = diag.format();
        assert!(formatted.starts_with("warning E0404"));
        assert!(formatted.contains("line 3"));
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert_eq!(Severity::Warning.as_str(), "warning");
    }
}
