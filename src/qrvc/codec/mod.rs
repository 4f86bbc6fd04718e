//! # Typed-Field Codec
//!
//! Translates between a [`Record`] and vCard text.
//!
//! [`decode`] reads the first `BEGIN:VCARD`/`END:VCARD` block of its input
//! and fails on anything it cannot parse; there is no partial recovery.
//! [`encode`] is deterministic: `VERSION` first, then every other property in
//! ascending name order, entries of one property in insertion order, CRLF
//! line endings. Encoding the same record twice yields identical bytes, and
//! `decode(encode(record)) == record` for any record built through the
//! [`Record`] constructors and setters.

pub mod escape;
pub mod lexer;
mod writer;

use crate::model::{type_tags, FieldEntry, Record};
use lexer::{parse_content_line, unfold_lines};
use std::fmt;
use thiserror::Error;

pub use writer::encode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}: {message}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    /// 1-based line number, 0 when the error is not tied to a line.
    pub line: usize,
    pub message: String,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    Empty,
    InvalidUtf8,
    MissingBegin,
    MissingEnd,
    NestedCard,
    MissingColon,
    InvalidPropertyName,
    InvalidParameter,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DecodeErrorKind::Empty => "empty input",
            DecodeErrorKind::InvalidUtf8 => "invalid UTF-8",
            DecodeErrorKind::MissingBegin => "missing BEGIN:VCARD",
            DecodeErrorKind::MissingEnd => "missing END:VCARD",
            DecodeErrorKind::NestedCard => "nested vCard",
            DecodeErrorKind::MissingColon => "missing colon separator",
            DecodeErrorKind::InvalidPropertyName => "invalid property name",
            DecodeErrorKind::InvalidParameter => "invalid parameter",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid property name \"{0}\"")]
    InvalidFieldName(String),

    #[error("invalid group \"{group}\" on property {field}")]
    InvalidGroup { field: String, group: String },

    #[error("invalid parameter name \"{param}\" on property {field}")]
    InvalidParameter { field: String, param: String },

    #[error("line break in the value of property {0}")]
    LineBreakInValue(String),
}

const BEGIN: &str = "BEGIN";
const END: &str = "END";
const VCARD: &str = "VCARD";
const TYPE_PARAM: &str = "TYPE";

/// Decodes the first vCard in `bytes`.
///
/// Missing `N` or `ADR` fields are filled with empty values.
pub fn decode(bytes: &[u8]) -> Result<Record, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        DecodeError::new(DecodeErrorKind::InvalidUtf8, 0, e.to_string())
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines = unfold_lines(text);
    let Some((first_line, first)) = lines.first() else {
        return Err(DecodeError::new(DecodeErrorKind::Empty, 0, "no content"));
    };

    let begin = parse_content_line(first, *first_line)?;
    if !is_marker(&begin.name, &begin.value, BEGIN) {
        return Err(DecodeError::new(
            DecodeErrorKind::MissingBegin,
            *first_line,
            format!("expected BEGIN:VCARD, found \"{}\"", first),
        ));
    }

    let mut record = Record::default();
    let mut last_line = *first_line;
    let mut closed = false;

    for (line_num, line) in lines.iter().skip(1) {
        last_line = *line_num;
        let content = parse_content_line(line, *line_num)?;

        if is_marker(&content.name, &content.value, END) {
            closed = true;
            break;
        }
        if content.name == BEGIN {
            return Err(DecodeError::new(
                DecodeErrorKind::NestedCard,
                *line_num,
                "BEGIN inside a vCard",
            ));
        }

        let (name, entry) = into_entry(content);
        record.push_entry(&name, entry);
    }

    if !closed {
        return Err(DecodeError::new(
            DecodeErrorKind::MissingEnd,
            last_line,
            "input ended before END:VCARD",
        ));
    }

    tracing::debug!(
        fields = record.fields().count(),
        "Decoded vCard"
    );

    record.ensure_defaults();
    Ok(record)
}

fn is_marker(name: &str, value: &str, marker: &str) -> bool {
    name == marker && value.trim().eq_ignore_ascii_case(VCARD)
}

fn into_entry(content: lexer::ContentLine) -> (String, FieldEntry) {
    let mut entry = FieldEntry::new(content.value);
    entry.group = content.group;

    for (param, values) in content.params {
        if param == TYPE_PARAM {
            for tag in values.iter().flat_map(|value| type_tags(value)) {
                if !entry.types.contains(&tag) {
                    entry.types.push(tag);
                }
            }
        } else {
            entry.params.entry(param).or_default().extend(values);
        }
    }

    (content.name, entry)
}
