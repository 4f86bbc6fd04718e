//! Value escaping for vCard text (RFC 6350 §3.4) and parameter values
//! (RFC 6868 caret encoding).
//!
//! Field values are stored in their escaped wire form; these helpers convert
//! between wire text and the plain text the accessors hand out. Parameter
//! values are kept plain in the record and only encoded on the wire.

/// Escapes plain text for use as a vCard value or structured component.
pub fn escape_text(text: &str) -> String {
    escape(text, true)
}

/// Escapes text like [`escape_text`] but leaves `;` as is.
///
/// Used for the trailing segment of a structured value whose own `;`
/// characters are meant to stay component separators.
pub fn escape_text_keep_separators(text: &str) -> String {
    escape(text, false)
}

fn escape(text: &str, escape_semicolon: bool) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' if escape_semicolon => result.push_str("\\;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }

    result
}

/// Reverses [`escape_text`]. Unknown escape sequences are kept verbatim.
pub fn unescape_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('n') | Some('N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Caret-encodes a parameter value.
///
/// Returns the encoded text and whether it has to be double-quoted because
/// it holds `:`, `;`, `,` or an encoded `"`. Other control characters are
/// dropped.
pub fn escape_param_value(value: &str) -> (String, bool) {
    let mut result = String::with_capacity(value.len());
    let mut needs_quotes = false;

    for c in value.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '"' => {
                result.push_str("^'");
                needs_quotes = true;
            }
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() => {}
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}

/// Reverses [`escape_param_value`] on an unquoted value. Unknown caret
/// sequences are kept verbatim.
pub fn unescape_param_value(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('^') => result.push('^'),
            Some('n') | Some('N') => result.push('\n'),
            Some('\'') => result.push('"'),
            Some(other) => {
                result.push('^');
                result.push(other);
            }
            None => result.push('^'),
        }
    }

    result
}

/// Splits a raw structured value on every unescaped `;`.
///
/// The returned pieces are still escaped.
pub fn split_components(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = raw;
    while let Some((head, tail)) = split_first_component(rest) {
        parts.push(head);
        rest = tail;
    }
    parts.push(rest);
    parts
}

/// Splits a raw structured value at its first unescaped `;`.
///
/// Returns `None` when the value holds no separator.
pub fn split_first_component(raw: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            ';' if !escaped => return Some((&raw[..i], &raw[i + 1..])),
            _ => escaped = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }

    #[test]
    fn escape_normalizes_crlf() {
        assert_eq!(escape_text("one\r\ntwo"), "one\\ntwo");
    }

    #[test]
    fn keep_separators_leaves_semicolons() {
        assert_eq!(escape_text_keep_separators("Dept;Sub,x"), "Dept;Sub\\,x");
    }

    #[test]
    fn unescape_reverses_escape() {
        let text = "Line 1\nSmith, Jane; Esq.\\";
        assert_eq!(unescape_text(&escape_text(text)), text);
    }

    #[test]
    fn unescape_accepts_upper_case_newline() {
        assert_eq!(unescape_text("a\\Nb"), "a\nb");
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape_text("c:\\temp"), "c:\\temp");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }

    #[test]
    fn split_ignores_escaped_separators() {
        assert_eq!(
            split_components("Doe\\;Jr;Jane;;"),
            vec!["Doe\\;Jr", "Jane", "", ""]
        );
    }

    #[test]
    fn split_after_escaped_backslash() {
        assert_eq!(split_components("a\\\\;b"), vec!["a\\\\", "b"]);
    }

    #[test]
    fn split_first_only() {
        assert_eq!(split_first_component("Org;Dept;Sub"), Some(("Org", "Dept;Sub")));
        assert_eq!(split_first_component("Org"), None);
    }

    #[test]
    fn param_value_without_separators_is_bare() {
        assert_eq!(escape_param_value("home"), ("home".to_string(), false));
    }

    #[test]
    fn param_value_with_separator_needs_quotes() {
        assert_eq!(escape_param_value("a:b"), ("a:b".to_string(), true));
        assert!(escape_param_value("work,voice").1);
    }

    #[test]
    fn param_value_caret_encoding() {
        assert_eq!(
            escape_param_value("say \"hi\"^\n"),
            ("say ^'hi^'^^^n".to_string(), true)
        );
        assert_eq!(unescape_param_value("say ^'hi^'^^^n"), "say \"hi\"^\n");
        assert_eq!(unescape_param_value("a^b^"), "a^b^");
    }
}
