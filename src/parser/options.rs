//! Parsing options.

/// Options that relax or bound DELTA parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept text-character attributes written as `C<text>` with no `,`.
    pub allow_text_attributes: bool,
    /// Highest control state a `DEPENDENT CHARACTERS` clause may name.
    pub max_control_state: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_text_attributes: false,
            max_control_state: 32,
        }
    }
}
