//! Program lines as seen by the block builder.

use tally_types::Span;

/// A view of one program line at some block depth.
///
/// `text` is what is left of the raw line after the enclosing blocks have
/// stripped their indentation; `col_offset` counts the stripped columns so
/// spans still point into the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef<'a> {
    /// 1-based program line number.
    pub number: u32,
    pub text: &'a str,
    pub col_offset: u32,
}

impl<'a> LineRef<'a> {
    pub fn new(number: u32, text: &'a str) -> Self {
        Self {
            number,
            text: text.trim_end_matches(['\r', '\n']),
            col_offset: 0,
        }
    }

    /// Number every line of a program, starting at 1.
    pub fn number_all<S: AsRef<str>>(lines: &'a [S]) -> Vec<LineRef<'a>> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| LineRef::new(i as u32 + 1, line.as_ref()))
            .collect()
    }

    /// Leading spaces and tabs.
    pub fn indent_width(&self) -> usize {
        self.text
            .bytes()
            .take_while(|&b| b == b' ' || b == b'\t')
            .count()
    }

    /// Whether the line belongs to the block of a preceding `if` header.
    pub fn is_indented(&self) -> bool {
        self.indent_width() > 0
    }

    /// Strip up to `width` leading whitespace characters.
    pub fn dedent(&self, width: usize) -> LineRef<'a> {
        let strip = width.min(self.indent_width());
        LineRef {
            number: self.number,
            text: &self.text[strip..],
            col_offset: self.col_offset + strip as u32,
        }
    }

    /// The text with surrounding whitespace removed, and the number of
    /// raw-line columns before it.
    pub fn trimmed(&self) -> (&'a str, u32) {
        let lead = self.indent_width();
        let text = self.text[lead..].trim_end();
        (text, self.col_offset + lead as u32)
    }

    /// Span of the trimmed text.
    pub fn span(&self) -> Span {
        let (text, offset) = self.trimmed();
        let start = offset + 1;
        let end = (offset + text.chars().count() as u32).max(start);
        Span::on_line(self.number, start, end)
    }
}
