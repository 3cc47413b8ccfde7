//! Conditional block processor
//!
//! Template text is read as a sequence of sections. A section opens with a
//! delimiter line, a header comment and a second delimiter line:
//!
//! ```text
//!     ///////////////////////////////////////////////////////////////////////////
//!     // Iterable C + Numeric T
//!     ///////////////////////////////////////////////////////////////////////////
//! ```
//!
//! Its body runs up to the next opening or to the end of the text. The header
//! title is a `+`-separated list of capability terms; a marker gates a section
//! when it equals one of those terms exactly. Text before the first opening
//! is an untitled preamble and is never removed.

use std::ops::Range;

use crate::generation::BlockError;

/// Prefix of a header comment line
pub const COMMENT_PREFIX: &str = "//";

/// Character a delimiter line is made of
pub const DELIMITER_CHAR: char = '/';

/// Shortest run of [`DELIMITER_CHAR`] accepted as a delimiter line
pub const MIN_DELIMITER_LEN: usize = 20;

/// A contiguous region of template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header title; `None` for the preamble
    pub title: Option<String>,
    /// 1-based line of the header comment, or 1 for the preamble
    pub line: usize,
    /// Byte range in the scanned text, opening delimiter included
    pub span: Range<usize>,
}

impl Section {
    /// Capability terms of the header, e.g. `["Iterable C", "Numeric T"]`
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.title
            .as_deref()
            .into_iter()
            .flat_map(|title| title.split('+'))
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn is_gated_by(&self, marker: &str) -> bool {
        self.terms().any(|term| term == marker)
    }
}

enum State<'a> {
    /// Reading ordinary lines, looking for a delimiter
    SeekHeader,
    /// A delimiter line starting at byte `at` may open a section
    OpenDelimiter { at: usize },
    /// Delimiter and header comment seen; the closing delimiter must follow
    InHeader {
        at: usize,
        title: &'a str,
        line: usize,
    },
}

fn is_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= MIN_DELIMITER_LEN && trimmed.chars().all(|c| c == DELIMITER_CHAR)
}

fn header_title(line: &str) -> Option<&str> {
    if is_delimiter(line) {
        return None;
    }
    line.trim()
        .strip_prefix(COMMENT_PREFIX)
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

/// Split `text` into sections.
///
/// Fails when a header comment follows a delimiter but is not closed by a
/// second delimiter on the very next line.
pub fn scan(text: &str) -> Result<Vec<Section>, BlockError> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: None,
        line: 1,
        span: 0..0,
    };
    let mut state = State::SeekHeader;
    let mut offset = 0;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        state = match state {
            State::SeekHeader => {
                if is_delimiter(line) {
                    State::OpenDelimiter { at: offset }
                } else {
                    State::SeekHeader
                }
            }
            State::OpenDelimiter { at } => {
                if let Some(title) = header_title(line) {
                    State::InHeader {
                        at,
                        title,
                        line: index + 1,
                    }
                } else if is_delimiter(line) {
                    State::OpenDelimiter { at: offset }
                } else {
                    State::SeekHeader
                }
            }
            State::InHeader { at, title, line: header_line } => {
                if !is_delimiter(line) {
                    return Err(BlockError::UnterminatedHeader {
                        title: title.to_string(),
                        line: header_line,
                    });
                }
                current.span.end = at;
                let opened = Section {
                    title: Some(title.to_string()),
                    line: header_line,
                    span: at..at,
                };
                let closed = std::mem::replace(&mut current, opened);
                if closed.title.is_some() || !closed.span.is_empty() {
                    sections.push(closed);
                }
                State::SeekHeader
            }
        };
        offset += line.len();
    }

    if let State::InHeader { title, line, .. } = state {
        return Err(BlockError::UnterminatedHeader {
            title: title.to_string(),
            line,
        });
    }

    current.span.end = text.len();
    if current.title.is_some() || !current.span.is_empty() {
        sections.push(current);
    }
    Ok(sections)
}

/// Remove every section gated by `marker` unless `keep` is set.
///
/// The text is scanned either way, so a malformed template fails whatever
/// the flag. With `keep` the output is the input, byte for byte.
pub fn strip(text: &str, marker: &str, keep: bool) -> Result<String, BlockError> {
    let sections = scan(text)?;
    if keep {
        return Ok(text.to_string());
    }

    let removed = sections.iter().filter(|s| s.is_gated_by(marker)).count();
    tracing::trace!(marker, removed, "Stripped gated sections");

    Ok(sections
        .iter()
        .filter(|section| !section.is_gated_by(marker))
        .map(|section| &text[section.span.clone()])
        .collect())
}
