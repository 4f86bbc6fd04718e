//! Line unfolding and content line parsing.
//!
//! Format of a content line: `[group.]name[;param=value]*:value`.

use super::escape::unescape_param_value;
use super::{DecodeError, DecodeErrorKind};

/// Splits input into logical lines, joining folded continuations.
///
/// A continuation is a physical line starting with a space or tab; the single
/// leading whitespace character is dropped. Both CRLF and bare LF endings are
/// accepted. Blank lines are skipped. Each line keeps its 1-based physical
/// line number for error reporting.
pub fn unfold_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
                continue;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        lines.push((index + 1, line.to_string()));
    }

    lines
}

/// A parsed content line before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub group: Option<String>,
    /// Property name, upper case.
    pub name: String,
    /// Parameters in order of appearance, names upper case.
    pub params: Vec<(String, Vec<String>)>,
    /// Raw value, still escaped.
    pub value: String,
}

pub fn parse_content_line(line: &str, line_num: usize) -> Result<ContentLine, DecodeError> {
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        DecodeError::new(
            DecodeErrorKind::MissingColon,
            line_num,
            format!("no ':' in \"{}\"", line),
        )
    })?;

    let (head, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (group, name_params) = parse_group(head);
    let (name, params_str) = match name_params.find(';') {
        Some(semi_pos) => (&name_params[..semi_pos], Some(&name_params[semi_pos + 1..])),
        None => (name_params, None),
    };

    if !is_valid_name(name) {
        return Err(DecodeError::new(
            DecodeErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name \"{}\"", name),
        ));
    }

    let params = match params_str {
        Some(s) => parse_parameters(s, line_num)?,
        None => Vec::new(),
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// Property, parameter and group names: letters, digits and `-`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Finds the colon separating name and parameters from the value, skipping
/// colons inside quoted parameter values.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

fn parse_group(s: &str) -> (Option<&str>, &str) {
    let name_end = s.find(';').unwrap_or(s.len());
    if let Some(dot_pos) = s[..name_end].find('.') {
        let group = &s[..dot_pos];
        if is_valid_name(group) {
            return (Some(group), &s[dot_pos + 1..]);
        }
    }
    (None, s)
}

/// Parses `a=b,c;d="e:f";CELL`. A parameter without `=` is a bare type
/// (vCard 2.1 style) and is reported as a `TYPE` value.
///
/// Commas inside a quoted value do not split it; `TYPE="voice,home"` yields
/// the single value `voice,home`, which the decoder splits into tags.
fn parse_parameters(s: &str, line_num: usize) -> Result<Vec<(String, Vec<String>)>, DecodeError> {
    let mut params = Vec::new();

    for raw in split_unquoted(s, ';', line_num)? {
        let (name, values) = match raw.split_once('=') {
            Some((name, values)) => (name.trim(), split_unquoted(values, ',', line_num)?),
            None => ("TYPE", vec![raw.clone()]),
        };

        if !is_valid_name(name) {
            return Err(DecodeError::new(
                DecodeErrorKind::InvalidParameter,
                line_num,
                format!("invalid parameter \"{}\"", raw),
            ));
        }

        let values = values
            .into_iter()
            .map(|v| unescape_param_value(&unquote(&v)))
            .filter(|v| !v.is_empty())
            .collect();
        params.push((name.to_ascii_uppercase(), values));
    }

    Ok(params)
}

/// Splits on `separator` outside double quotes. Quotes are kept.
fn split_unquoted(s: &str, separator: char, line_num: usize) -> Result<Vec<String>, DecodeError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in s.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c == separator && !in_quotes => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(DecodeError::new(
            DecodeErrorKind::InvalidParameter,
            line_num,
            "unclosed quote in parameter",
        ));
    }

    parts.push(current);
    Ok(parts.into_iter().filter(|p| !p.is_empty()).collect())
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_crlf_continuation() {
        let lines = unfold_lines("FN:John\r\n  Doe\r\nEND:VCARD\r\n");
        assert_eq!(
            lines,
            vec![(1, "FN:John Doe".to_string()), (3, "END:VCARD".to_string())]
        );
    }

    #[test]
    fn unfold_tab_continuation() {
        let lines = unfold_lines("NOTE:a\n\tb\n");
        assert_eq!(lines, vec![(1, "NOTE:ab".to_string())]);
    }

    #[test]
    fn unfold_skips_blank_lines() {
        let lines = unfold_lines("A:1\n\n\nB:2\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].0, 4);
    }

    #[test]
    fn parse_simple_line() {
        let line = parse_content_line("FN:John Doe", 1).unwrap();
        assert!(line.group.is_none());
        assert_eq!(line.name, "FN");
        assert!(line.params.is_empty());
        assert_eq!(line.value, "John Doe");
    }

    #[test]
    fn parse_lowercase_name_and_group() {
        let line = parse_content_line("item1.tel:+1-555", 1).unwrap();
        assert_eq!(line.group.as_deref(), Some("item1"));
        assert_eq!(line.name, "TEL");
    }

    #[test]
    fn parse_with_parameters() {
        let line = parse_content_line("TEL;TYPE=home,voice;pref=1:+1-555-555-5555", 1).unwrap();
        assert_eq!(
            line.params,
            vec![
                ("TYPE".to_string(), vec!["home".to_string(), "voice".to_string()]),
                ("PREF".to_string(), vec!["1".to_string()]),
            ]
        );
    }

    #[test]
    fn parse_bare_type_parameter() {
        let line = parse_content_line("TEL;CELL;VOICE:555", 1).unwrap();
        assert_eq!(
            line.params,
            vec![
                ("TYPE".to_string(), vec!["CELL".to_string()]),
                ("TYPE".to_string(), vec!["VOICE".to_string()]),
            ]
        );
    }

    #[test]
    fn parse_quoted_param_with_colon() {
        let line = parse_content_line("ADR;LABEL=\"Main St: 1\":;;Main St", 1).unwrap();
        assert_eq!(line.params[0].1, vec!["Main St: 1".to_string()]);
        assert_eq!(line.value, ";;Main St");
    }

    #[test]
    fn parse_colon_in_value() {
        let line = parse_content_line("URL:https://example.com:8080/path", 1).unwrap();
        assert_eq!(line.value, "https://example.com:8080/path");
    }

    #[test]
    fn missing_colon_is_an_error() {
        let err = parse_content_line("garbage", 7).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingColon);
        assert_eq!(err.line, 7);
    }

    #[test]
    fn invalid_name_is_an_error() {
        let err = parse_content_line("BAD NAME:x", 2).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidPropertyName);
    }

    #[test]
    fn colon_inside_unclosed_quote_is_not_a_separator() {
        let err = parse_content_line("ADR;LABEL=\"open:x", 3).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingColon);
    }

    #[test]
    fn invalid_parameter_name_is_an_error() {
        let err = parse_content_line("TEL;TY PE=cell:1", 4).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidParameter);
        assert_eq!(err.line, 4);
    }

    #[test]
    fn parse_quoted_list_stays_one_value() {
        let line = parse_content_line("TEL;TYPE=\"voice,home\":1", 1).unwrap();
        assert_eq!(line.params[0].1, vec!["voice,home".to_string()]);
    }

    #[test]
    fn parse_caret_encoded_parameter() {
        let line = parse_content_line("ADR;LABEL=\"^'Home^'^nMain St\":;;Main St", 1).unwrap();
        assert_eq!(line.params[0].1, vec!["\"Home\"\nMain St".to_string()]);
    }
}
