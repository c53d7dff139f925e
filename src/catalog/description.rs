use crate::base::{is_description_end, trim_blanks};
use crate::parser::errors::{DeltaError, ParseContext, Result};
use crate::source::LineReader;

/// A description read up to its terminating `/`, plus whatever followed the
/// terminator on the same line (leading blanks removed).
#[derive(Debug)]
pub(crate) struct Description {
    pub text: String,
    pub rest: String,
}

/// Read description text starting at `first`, continuing on following lines
/// until a `/` followed by whitespace or end of line. Each line break becomes
/// a single space.
pub(crate) fn read_description(
    reader: &mut LineReader<'_>,
    first: &str,
    context: ParseContext,
) -> Result<Description> {
    let mut text = String::new();
    let mut line = first.to_string();
    loop {
        if let Some(end) = (0..line.len()).find(|&i| is_description_end(&line, i)) {
            text.push_str(&line[..end]);
            let rest = trim_blanks(&line[end + 1..]).to_string();
            return Ok(Description {
                text: text.trim().to_string(),
                rest,
            });
        }
        text.push_str(&line);
        match reader.next_line()? {
            Some(next) => {
                text.push(' ');
                line = next;
            }
            None => return Err(DeltaError::eof(context, reader.line_number())),
        }
    }
}
