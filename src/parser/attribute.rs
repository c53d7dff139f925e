//! Item attributes: `C[<comment>],alt1[<comment>]/alt2[<comment>]/...`

use std::fmt;

use super::errors::{DeltaError, Result};
use super::options::ParseOptions;
use super::scanner::{Scanner, split_outside_comments};
use super::value::ValueExpression;
use crate::base::COMMENT_OPEN;

/// One character's recorded value(s) for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    character: usize,
    comment: Option<String>,
    alternatives: Vec<ValueExpression>,
    /// `None` for a text attribute written without a `,`.
    raw_alternatives: Option<String>,
}

impl Attribute {
    /// Parse one attribute token with default options.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse one attribute token.
    ///
    /// # Errors
    /// - [`DeltaError::MissingCharacterNumber`] when the token does not start with digits
    /// - [`DeltaError::UnterminatedComment`] when a comment is never closed
    /// - [`DeltaError::MissingAlternatives`] when no `,` follows the number or comment
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let mut scanner = Scanner::new(text);
        let character = scanner
            .take_while(|c| c.is_ascii_digit())
            .parse::<usize>()
            .map_err(|_| DeltaError::MissingCharacterNumber {
                attribute: text.to_string(),
            })?;

        scanner.skip_until(&[COMMENT_OPEN, ',']);
        let comment = if scanner.at(COMMENT_OPEN) {
            Some(scanner.comment()?.to_string())
        } else {
            None
        };

        if !scanner.eat(',') {
            if options.allow_text_attributes && comment.is_some() {
                return Ok(Self {
                    character,
                    comment,
                    alternatives: Vec::new(),
                    raw_alternatives: None,
                });
            }
            return Err(DeltaError::MissingAlternatives {
                attribute: text.to_string(),
            });
        }

        let raw = scanner.rest();
        let alternatives = parse_alternatives(raw)?;

        Ok(Self {
            character,
            comment,
            alternatives,
            raw_alternatives: Some(raw.to_string()),
        })
    }

    pub fn character(&self) -> usize {
        self.character
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn alternatives(&self) -> &[ValueExpression] {
        &self.alternatives
    }

    /// Alternatives exactly as written, after the `,`.
    pub fn raw_alternatives(&self) -> &str {
        self.raw_alternatives.as_deref().unwrap_or_default()
    }

    /// True when any alternative accepts the candidates.
    pub fn compare(&self, candidates: &[f64], strict: bool, include_extremes: bool) -> bool {
        self.alternatives
            .iter()
            .any(|alt| alt.compare(candidates, strict, include_extremes))
    }
}

/// `C<comment>,alternatives`, as written in the items file.
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character)?;
        if let Some(comment) = &self.comment {
            write!(f, "<{comment}>")?;
        }
        if let Some(raw) = &self.raw_alternatives {
            write!(f, ",{raw}")?;
        }
        Ok(())
    }
}

fn parse_alternatives(raw: &str) -> Result<Vec<ValueExpression>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let mut pieces = split_outside_comments(raw, |c| c == '/');
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }

    let mut alternatives = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let mut scanner = Scanner::new(piece);
        let value = scanner.take_while(|c| c != COMMENT_OPEN);
        let mut expr = ValueExpression::parse(value);
        if scanner.at(COMMENT_OPEN) {
            expr = expr.with_comment(scanner.comment()?);
        }
        alternatives.push(expr);
    }
    Ok(alternatives)
}

/// Split an item's attribute block into attribute tokens.
///
/// Whitespace separates tokens except inside `<...>` comments.
pub fn tokenize_attributes(block: &str) -> Vec<&str> {
    split_outside_comments(block, char::is_whitespace)
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::value::Sentinel;

    #[test]
    fn test_parse_simple() {
        let attr = Attribute::parse("12,1/3").unwrap();
        assert_eq!(attr.character(), 12);
        assert_eq!(attr.comment(), None);
        assert_eq!(attr.alternatives().len(), 2);
        assert_eq!(attr.raw_alternatives(), "1/3");
    }

    #[test]
    fn test_parse_comments() {
        let attr = Attribute::parse("4<in <dry> season>,2<rarely>/U").unwrap();
        assert_eq!(attr.comment(), Some("in <dry> season"));
        assert_eq!(attr.alternatives()[0].comment(), Some("rarely"));
        assert_eq!(attr.alternatives()[1].as_sentinel(), Some(Sentinel::Unknown));
    }

    #[test]
    fn test_slash_inside_comment_is_not_a_separator() {
        let attr = Attribute::parse("3,1<a/b>/2").unwrap();
        assert_eq!(attr.alternatives().len(), 2);
        assert_eq!(attr.alternatives()[0].comment(), Some("a/b"));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let attr = Attribute::parse("3,1/").unwrap();
        assert_eq!(attr.alternatives().len(), 1);
    }

    #[test]
    fn test_missing_alternatives() {
        assert!(matches!(
            Attribute::parse("12"),
            Err(DeltaError::MissingAlternatives { .. })
        ));
        assert!(matches!(
            Attribute::parse("12<text only>"),
            Err(DeltaError::MissingAlternatives { .. })
        ));
    }

    #[test]
    fn test_text_attribute_allowed_by_option() {
        let options = ParseOptions {
            allow_text_attributes: true,
            ..ParseOptions::default()
        };
        let attr = Attribute::parse_with("12<leaves glossy>", &options).unwrap();
        assert_eq!(attr.comment(), Some("leaves glossy"));
        assert!(attr.alternatives().is_empty());
        assert_eq!(attr.to_string(), "12<leaves glossy>");
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(matches!(
            Attribute::parse("5<open,1"),
            Err(DeltaError::UnterminatedComment { .. })
        ));
        assert!(matches!(
            Attribute::parse("5,1<open"),
            Err(DeltaError::UnterminatedComment { .. })
        ));
    }

    #[test]
    fn test_missing_character_number() {
        assert!(matches!(
            Attribute::parse(",1"),
            Err(DeltaError::MissingCharacterNumber { .. })
        ));
    }

    #[test]
    fn test_compare_is_or_over_alternatives() {
        let attr = Attribute::parse("2,1/4-6").unwrap();
        assert!(attr.compare(&[1.0], true, true));
        assert!(attr.compare(&[5.0], true, true));
        assert!(!attr.compare(&[3.0], true, true));
    }

    #[test]
    fn test_display() {
        let attr = Attribute::parse("7<note>,1&2").unwrap();
        assert_eq!(attr.to_string(), "7<note>,1&2");
    }

    #[test]
    fn test_tokenize_attributes() {
        let tokens = tokenize_attributes("1,2  3<two words>,4 \t5,U");
        assert_eq!(tokens, vec!["1,2", "3<two words>,4", "5,U"]);
    }
}
