//! Text manipulation utilities for DELTA source text.
//!
//! DELTA uses `<...>` for comments, and comments may nest. Numbers are read
//! the tolerant way legacy DELTA tools read them: the longest numeric-looking
//! prefix wins, and text with no digits at all reads as zero.

use text_size::TextSize;

use crate::parser::errors::{DeltaError, Result};

/// Opening delimiter of a DELTA comment.
pub const COMMENT_OPEN: char = '<';
/// Closing delimiter of a DELTA comment.
pub const COMMENT_CLOSE: char = '>';

/// Remove every balanced `<...>` span (including nested ones) from `text`.
///
/// A `>` outside any comment is kept as ordinary text.
///
/// # Errors
/// Returns [`DeltaError::UnterminatedComment`] when a `<` is never closed.
/// The offset points at the outermost unclosed `<`.
///
/// # Example
/// ```
/// use taxodelta::base::strip_comments;
///
/// assert_eq!(strip_comments("a<b<c>d>e").unwrap(), "ae");
/// assert!(strip_comments("a<b").is_err());
/// ```
pub fn strip_comments(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut opened_at = 0usize;

    for (offset, c) in text.char_indices() {
        match c {
            COMMENT_OPEN => {
                if depth == 0 {
                    opened_at = offset;
                }
                depth += 1;
            }
            COMMENT_CLOSE if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    if depth > 0 {
        return Err(DeltaError::UnterminatedComment {
            offset: TextSize::new(opened_at as u32),
        });
    }
    Ok(out)
}

/// Like [`strip_comments`], but an unclosed comment simply swallows the rest
/// of the text instead of failing. Used by display accessors that must never
/// error.
pub fn strip_comments_lossy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            COMMENT_OPEN => depth += 1,
            COMMENT_CLOSE if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Read a decimal number from the start of `text`.
///
/// Accepts leading blanks, an optional sign, digits with an optional decimal
/// point, and an optional exponent. Returns the value and the number of bytes
/// consumed. When no digit is found the value is `0.0` and nothing is consumed.
pub fn scan_number(text: &str) -> (f64, usize) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return (0.0, 0);
    }
    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    let value = text[start..i].parse::<f64>().unwrap_or(0.0);
    (value, i)
}

/// Read a decimal integer from the start of `text`.
///
/// Same leniency as [`scan_number`]: leading blanks and a sign are accepted,
/// and text without digits reads as `0` with nothing consumed.
pub fn scan_integer(text: &str) -> (i64, usize) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let digit_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digit_start {
        return (0, 0);
    }
    let value = text[start..i].parse::<i64>().unwrap_or(0);
    (value, i)
}

/// Check whether the `/` at byte `index` of `text` ends a description,
/// i.e. it is followed by whitespace or by the end of the line.
#[inline]
pub fn is_description_end(text: &str, index: usize) -> bool {
    let bytes = text.as_bytes();
    bytes.get(index) == Some(&b'/')
        && bytes
            .get(index + 1)
            .is_none_or(|b| b.is_ascii_whitespace())
}

/// Strip leading blanks and tabs.
#[inline]
pub fn trim_blanks(text: &str) -> &str {
    text.trim_start_matches([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_nested() {
        assert_eq!(strip_comments("a<b<c>d>e").unwrap(), "ae");
        assert_eq!(strip_comments("plain").unwrap(), "plain");
        assert_eq!(strip_comments("<all>").unwrap(), "");
    }

    #[test]
    fn test_strip_comments_unterminated() {
        let err = strip_comments("ab<c<d>").unwrap_err();
        assert!(matches!(
            err,
            DeltaError::UnterminatedComment { offset } if offset == TextSize::new(2)
        ));
    }

    #[test]
    fn test_strip_comments_stray_close_is_text() {
        assert_eq!(strip_comments("a>b").unwrap(), "a>b");
    }

    #[test]
    fn test_strip_comments_lossy_drops_unclosed_tail() {
        assert_eq!(strip_comments_lossy("Viola <odorata"), "Viola ");
    }

    #[test]
    fn test_scan_number() {
        assert_eq!(scan_number("12.5-20"), (12.5, 4));
        assert_eq!(scan_number("-3"), (-3.0, 2));
        assert_eq!(scan_number(".5"), (0.5, 2));
        assert_eq!(scan_number("4."), (4.0, 2));
        assert_eq!(scan_number("2e3x"), (2000.0, 3));
        assert_eq!(scan_number("2e"), (2.0, 1));
        assert_eq!(scan_number("abc"), (0.0, 0));
        assert_eq!(scan_number(""), (0.0, 0));
    }

    #[test]
    fn test_scan_integer() {
        assert_eq!(scan_integer("12. round"), (12, 2));
        assert_eq!(scan_integer(" 7,"), (7, 2));
        assert_eq!(scan_integer("x"), (0, 0));
    }

    #[test]
    fn test_is_description_end() {
        assert!(is_description_end("round/", 5));
        assert!(is_description_end("round/ 2. oval/", 5));
        assert!(!is_description_end("3/4 cm/", 1));
        assert!(!is_description_end("abc", 1));
    }
}
