//! Value expressions: one alternative of an item attribute.
//!
//! ```text
//! sentinel := 'V' | 'U' | '-'
//! single   := NUMBER
//! and-list := NUMBER ('&' NUMBER)+
//! range    := ['(' NUMBER ['-'] ')'] NUMBER '-' NUMBER ('-' NUMBER)* ['(' ['-'] NUMBER ')']
//! ```
//!
//! Numbers are read leniently: the longest numeric-looking prefix is used and
//! text that does not look like a number reads as `0`.

use std::fmt;

use super::scanner::Scanner;

/// Non-numeric special values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// `V`: the character varies within the item.
    Variable,
    /// `U`: the value is not known.
    Unknown,
    /// `-`: the character does not apply to the item.
    NotApplicable,
}

impl Sentinel {
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'V' => Some(Self::Variable),
            'U' => Some(Self::Unknown),
            '-' => Some(Self::NotApplicable),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            Self::Variable => 'V',
            Self::Unknown => 'U',
            Self::NotApplicable => '-',
        }
    }

    pub fn compare(&self, strict: bool) -> bool {
        match self {
            Self::Variable => true,
            Self::Unknown => !strict,
            Self::NotApplicable => false,
        }
    }
}

/// How the numbers of a value list relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    /// A single value.
    #[default]
    None,
    /// `a&b&c`: all values are present together.
    And,
    /// `a-b-c`: values span an inclusive range.
    Range,
}

/// Numeric part of a value expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueList {
    values: Vec<f64>,
    relation: Relation,
    extreme_low: bool,
    extreme_high: bool,
}

impl ValueList {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// First value was written as an atypical low extreme, `(1-)` or `(1)`.
    pub fn extreme_low(&self) -> bool {
        self.extreme_low
    }

    /// Last value was written as an atypical high extreme, `(-9)` or `(9)`.
    pub fn extreme_high(&self) -> bool {
        self.extreme_high
    }

    /// An empty candidate set never matches.
    pub fn compare(&self, candidates: &[f64], include_extremes: bool) -> bool {
        if candidates.is_empty() || self.values.is_empty() {
            return false;
        }
        match self.relation {
            Relation::None => candidates[0] == self.values[0],
            Relation::And => self.values.iter().all(|v| candidates.contains(v)),
            Relation::Range => {
                let mut lo = 0;
                let mut hi = self.values.len() - 1;
                if !include_extremes {
                    if self.extreme_low {
                        lo += 1;
                    }
                    if self.extreme_high {
                        hi = hi.saturating_sub(1);
                    }
                }
                if lo > hi {
                    return false;
                }
                let (min, max) = (self.values[lo], self.values[hi]);
                candidates.iter().all(|c| (min..=max).contains(c))
            }
        }
    }

    fn parse(scanner: &mut Scanner<'_>) -> Self {
        let mut list = Self::default();

        if scanner.eat('(') {
            list.values.push(scanner.number());
            list.extreme_low = true;
            list.relation = Relation::Range;
            scanner.skip_until(&[')']);
            scanner.eat(')');
            if scanner.is_at_end() {
                return list;
            }
        }

        list.values.push(scanner.number());
        scanner.skip_until(&['-', '&', '(']);
        // The first separator fixes the relation; a different one later is text.
        let separator = match scanner.peek() {
            Some('-') => {
                list.relation = Relation::Range;
                Some('-')
            }
            Some('&') => {
                list.relation = Relation::And;
                Some('&')
            }
            _ => None,
        };
        let stops: &[char] = match separator {
            Some('-') => &['-', '('],
            Some(_) => &['&', '('],
            None => &['('],
        };
        if let Some(separator) = separator {
            scanner.eat(separator);
        }

        while !scanner.is_at_end() {
            if scanner.eat('(') {
                scanner.eat('-');
                list.values.push(scanner.number());
                list.extreme_high = true;
                list.relation = Relation::Range;
                break;
            }
            list.values.push(scanner.number());
            scanner.skip_until(stops);
            if let Some(separator) = separator {
                scanner.eat(separator);
            }
        }

        list
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Sentinel(Sentinel),
    Values(ValueList),
}

/// A parsed alternative with its optional trailing comment.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueExpression {
    kind: ValueKind,
    comment: Option<String>,
}

impl ValueExpression {
    /// Parse one alternative (without its comment). Never fails.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let mut scanner = Scanner::new(text);
        let kind = match scanner.peek().and_then(Sentinel::from_marker) {
            Some(sentinel) => ValueKind::Sentinel(sentinel),
            None => ValueKind::Values(ValueList::parse(&mut scanner)),
        };
        Self {
            kind,
            comment: None,
        }
    }

    pub fn sentinel(sentinel: Sentinel) -> Self {
        Self {
            kind: ValueKind::Sentinel(sentinel),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn as_sentinel(&self) -> Option<Sentinel> {
        match &self.kind {
            ValueKind::Sentinel(s) => Some(*s),
            ValueKind::Values(_) => None,
        }
    }

    pub fn as_values(&self) -> Option<&ValueList> {
        match &self.kind {
            ValueKind::Values(list) => Some(list),
            ValueKind::Sentinel(_) => None,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Whether the observed `candidates` are consistent with this value.
    ///
    /// `strict` makes an unknown value fail; `include_extremes` keeps the
    /// bracketed extreme bounds of a range.
    pub fn compare(&self, candidates: &[f64], strict: bool, include_extremes: bool) -> bool {
        match &self.kind {
            ValueKind::Sentinel(sentinel) => sentinel.compare(strict),
            ValueKind::Values(list) => list.compare(candidates, include_extremes),
        }
    }
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.values.split_first() else {
            return Ok(());
        };
        let separator = match self.relation {
            Relation::And => "&",
            _ => "-",
        };
        if self.extreme_low && !rest.is_empty() {
            write!(f, "({first}-)")?;
        } else if self.extreme_low {
            return write!(f, "({first})");
        } else {
            write!(f, "{first}")?;
        }

        let (middle, last) = match rest.split_last() {
            Some((last, middle)) if self.extreme_high => (middle, Some(last)),
            _ => (rest, None),
        };
        for (i, value) in middle.iter().enumerate() {
            if i > 0 || !self.extreme_low {
                f.write_str(separator)?;
            }
            write!(f, "{value}")?;
        }
        if let Some(last) = last {
            write!(f, "(-{last})")?;
        }
        Ok(())
    }
}

impl fmt::Display for ValueExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Sentinel(s) => write!(f, "{}", s.marker())?,
            ValueKind::Values(list) => write!(f, "{list}")?,
        }
        if let Some(comment) = &self.comment {
            write!(f, "<{comment}>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> ValueList {
        ValueExpression::parse(text)
            .as_values()
            .cloned()
            .expect("numeric expression")
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(ValueExpression::parse("V").as_sentinel(), Some(Sentinel::Variable));
        assert_eq!(ValueExpression::parse("U").as_sentinel(), Some(Sentinel::Unknown));
        assert_eq!(
            ValueExpression::parse("-").as_sentinel(),
            Some(Sentinel::NotApplicable)
        );
    }

    #[test]
    fn test_single_value() {
        let list = values("2.5");
        assert_eq!(list.values(), &[2.5]);
        assert_eq!(list.relation(), Relation::None);
    }

    #[test]
    fn test_and_list() {
        let list = values("1&3&4");
        assert_eq!(list.values(), &[1.0, 3.0, 4.0]);
        assert_eq!(list.relation(), Relation::And);
    }

    #[test]
    fn test_first_separator_fixes_relation() {
        let list = values("1&2-3");
        assert_eq!(list.values(), &[1.0, 2.0]);
        assert_eq!(list.relation(), Relation::And);

        let list = values("1-2&3");
        assert_eq!(list.values(), &[1.0, 2.0]);
        assert_eq!(list.relation(), Relation::Range);
    }

    #[test]
    fn test_range_with_bracketed_extremes() {
        let list = values("(1)3-6-(9)");
        assert_eq!(list.values(), &[1.0, 3.0, 6.0, 9.0]);
        assert_eq!(list.relation(), Relation::Range);
        assert!(list.extreme_low());
        assert!(list.extreme_high());
    }

    #[test]
    fn test_range_with_dashed_extremes() {
        let list = values("(1-)3-6(-9)");
        assert_eq!(list.values(), &[1.0, 3.0, 6.0, 9.0]);
        assert!(list.extreme_low());
        assert!(list.extreme_high());
    }

    #[test]
    fn test_lone_low_extreme() {
        let list = values("(4)");
        assert_eq!(list.values(), &[4.0]);
        assert!(list.extreme_low());
        assert!(!list.extreme_high());
    }

    #[test]
    fn test_malformed_number_reads_as_zero() {
        assert_eq!(values("abc").values(), &[0.0]);
    }

    #[test]
    fn test_range_compare_extremes() {
        let expr = ValueExpression::parse("(1)3-6-(9)");
        assert!(expr.compare(&[9.0], true, true));
        assert!(!expr.compare(&[9.0], true, false));
        assert!(expr.compare(&[5.0], true, false));
        assert!(!expr.compare(&[2.0], true, false));
        assert!(expr.compare(&[2.0], true, true));
    }

    #[test]
    fn test_excluding_extremes_narrows_to_inner_values() {
        let expr = ValueExpression::parse("(1)3-(9)");
        assert_eq!(
            expr.as_values().map(ValueList::values),
            Some(&[1.0, 3.0, 9.0][..])
        );
        assert!(expr.compare(&[5.0], true, true));
        assert!(!expr.compare(&[5.0], true, false));
        assert!(expr.compare(&[3.0], true, false));
    }

    #[test]
    fn test_empty_candidates_never_match_numbers() {
        assert!(!ValueExpression::parse("3").compare(&[], false, true));
        assert!(!ValueExpression::parse("1-3").compare(&[], false, true));
        assert!(ValueExpression::parse("V").compare(&[], true, true));
    }

    #[test]
    fn test_display_round_trips_notation() {
        for text in ["V", "U", "-", "3", "1&2", "(1-)3-6(-9)", "2-4", "(4)"] {
            assert_eq!(ValueExpression::parse(text).to_string(), text);
        }
        assert_eq!(ValueExpression::parse("(1)3-6-(9)").to_string(), "(1-)3-6(-9)");
    }

    #[test]
    fn test_display_includes_comment() {
        let expr = ValueExpression::parse("2").with_comment("rarely");
        assert_eq!(expr.to_string(), "2<rarely>");
    }
}
