use super::escape::escape_param_value;
use super::lexer::is_valid_name;
use super::{EncodeError, BEGIN, END, TYPE_PARAM, VCARD};
use crate::model::{FieldEntry, Record, FIELD_VERSION};

const CRLF: &str = "\r\n";

/// Serializes a record to vCard text.
pub fn encode(record: &Record) -> Result<Vec<u8>, EncodeError> {
    let mut out = String::new();
    push_line(&mut out, &format!("{}:{}", BEGIN, VCARD));

    for entry in record.entries(FIELD_VERSION) {
        write_entry(&mut out, FIELD_VERSION, entry)?;
    }

    for (name, entries) in record.fields() {
        if name == FIELD_VERSION {
            continue;
        }
        if !is_valid_name(name) {
            return Err(EncodeError::InvalidFieldName(name.to_string()));
        }
        for entry in entries {
            write_entry(&mut out, name, entry)?;
        }
    }

    push_line(&mut out, &format!("{}:{}", END, VCARD));

    tracing::debug!(bytes = out.len(), "Encoded vCard");
    Ok(out.into_bytes())
}

fn write_entry(out: &mut String, name: &str, entry: &FieldEntry) -> Result<(), EncodeError> {
    if entry.value.contains(['\r', '\n']) {
        return Err(EncodeError::LineBreakInValue(name.to_string()));
    }

    let mut line = String::new();

    if let Some(group) = &entry.group {
        if !is_valid_name(group) {
            return Err(EncodeError::InvalidGroup {
                field: name.to_string(),
                group: group.clone(),
            });
        }
        line.push_str(group);
        line.push('.');
    }
    line.push_str(name);

    if !entry.types.is_empty() {
        let tags: Vec<String> = entry
            .types
            .iter()
            .map(|t| param_value(&t.to_ascii_lowercase()))
            .collect();
        line.push_str(&format!(";{}={}", TYPE_PARAM, tags.join(",")));
    }

    for (param, values) in &entry.params {
        if !is_valid_name(param) {
            return Err(EncodeError::InvalidParameter {
                field: name.to_string(),
                param: param.clone(),
            });
        }
        let values: Vec<String> = values.iter().map(|v| param_value(v)).collect();
        line.push_str(&format!(";{}={}", param, values.join(",")));
    }

    line.push(':');
    line.push_str(&entry.value);
    push_line(out, &line);
    Ok(())
}

/// Caret-encodes a parameter value, quoting it when it holds a separator.
fn param_value(value: &str) -> String {
    let (escaped, needs_quotes) = escape_param_value(value);
    if needs_quotes {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(CRLF);
}
