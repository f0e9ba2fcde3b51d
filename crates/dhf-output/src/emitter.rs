//! Block-style writer over [`serde_yaml::Value`].
//!
//! Layout follows `serde_yaml`: two-space indentation, indentless sequences
//! under mapping keys, `{}` and `[]` for empty collections. Scalar quoting is
//! stricter: a string is left plain only when both YAML 1.1 and YAML 1.2
//! loaders read it back as the same string, so words like `Yes`, `off` or
//! `~` and date- or number-like text are single-quoted.

use serde_yaml::{Mapping, Sequence, Value};

use crate::error::{OutputError, Result};

const INDENT: usize = 2;

/// Words a YAML 1.1 resolver turns into booleans or null.
const RESERVED_WORDS: [&str; 24] = [
    "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "true", "True", "TRUE", "false",
    "False", "FALSE", "on", "On", "ON", "off", "Off", "OFF", "null", "Null",
];

/// Render `value` as a complete YAML document ending in a newline.
pub fn emit(value: &Value) -> Result<String> {
    let mut out = String::new();
    match value {
        Value::Mapping(map) if !map.is_empty() => write_mapping(&mut out, map, 0, false)?,
        Value::Sequence(seq) if !seq.is_empty() => write_sequence(&mut out, seq, 0, false)?,
        _ => {
            out.push_str(&inline_node(value)?);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Scalars and empty collections, rendered on the current line.
fn inline_node(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => scalar(text),
        Value::Mapping(map) if map.is_empty() => "{}".to_string(),
        Value::Sequence(seq) if seq.is_empty() => "[]".to_string(),
        Value::Mapping(_) | Value::Sequence(_) => {
            return Err(OutputError::Unsupported("collection used as mapping key"));
        }
        Value::Tagged(_) => return Err(OutputError::Unsupported("tagged value")),
    })
}

/// `continues_line` means the cursor already sits after a `- ` marker.
fn write_mapping(
    out: &mut String,
    map: &Mapping,
    indent: usize,
    continues_line: bool,
) -> Result<()> {
    for (idx, (key, child)) in map.iter().enumerate() {
        if idx > 0 || !continues_line {
            pad(out, indent);
        }
        out.push_str(&inline_node(key)?);
        out.push(':');
        match child {
            Value::Mapping(inner) if !inner.is_empty() => {
                out.push('\n');
                write_mapping(out, inner, indent + INDENT, false)?;
            }
            Value::Sequence(items) if !items.is_empty() => {
                out.push('\n');
                write_sequence(out, items, indent, false)?;
            }
            _ => {
                out.push(' ');
                out.push_str(&inline_node(child)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn write_sequence(
    out: &mut String,
    seq: &Sequence,
    indent: usize,
    continues_line: bool,
) -> Result<()> {
    for (idx, item) in seq.iter().enumerate() {
        if idx > 0 || !continues_line {
            pad(out, indent);
        }
        out.push_str("- ");
        match item {
            Value::Mapping(inner) if !inner.is_empty() => {
                write_mapping(out, inner, indent + INDENT, true)?;
            }
            Value::Sequence(items) if !items.is_empty() => {
                write_sequence(out, items, indent + INDENT, true)?;
            }
            _ => {
                out.push_str(&inline_node(item)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

/// Render a string scalar: plain when unambiguous, otherwise quoted.
pub fn scalar(text: &str) -> String {
    if text.chars().any(needs_escape) {
        double_quoted(text)
    } else if is_plain_safe(text) {
        text.to_string()
    } else {
        format!("'{}'", text.replace('\'', "''"))
    }
}

fn needs_escape(ch: char) -> bool {
    ch.is_control() || matches!(ch, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn is_plain_safe(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if text.starts_with(' ') || text.ends_with(' ') || text.ends_with(':') {
        return false;
    }
    if text.contains(": ") || text.contains(" #") {
        return false;
    }
    !resolves_as_non_string(text)
}

/// Whether a YAML 1.1 or 1.2 resolver could read `text` as something other
/// than a string.
fn resolves_as_non_string(text: &str) -> bool {
    if RESERVED_WORDS.contains(&text) || matches!(text, "~" | "NULL" | "=" | "<<") {
        return true;
    }
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let lowered = unsigned.to_ascii_lowercase();
    if matches!(lowered.as_str(), ".inf" | ".nan") {
        return true;
    }
    if looks_like_date(text) {
        return true;
    }
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned
            .chars()
            .all(|c| c.is_ascii_hexdigit() || "xXoO_.:+-".contains(c))
}

/// `YYYY-` prefix, the start of every YAML 1.1 timestamp.
fn looks_like_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml11_booleans_are_quoted() {
        for word in ["Yes", "No", "on", "off", "Y", "n", "TRUE", "Off"] {
            assert_eq!(scalar(word), format!("'{word}'"));
        }
    }

    #[test]
    fn numbers_dates_and_nulls_are_quoted() {
        assert_eq!(scalar("42"), "'42'");
        assert_eq!(scalar("-1.5"), "'-1.5'");
        assert_eq!(scalar("0x1F"), "'0x1F'");
        assert_eq!(scalar("1:30"), "'1:30'");
        assert_eq!(scalar("2024-01-31"), "'2024-01-31'");
        assert_eq!(scalar(".inf"), "'.inf'");
        assert_eq!(scalar("~"), "'~'");
        assert_eq!(scalar("null"), "'null'");
    }

    #[test]
    fn ordinary_text_stays_plain() {
        for text in [
            "IEC 62304",
            "21 CFR 820.30(c)",
            "Phase 1/Software",
            "Validation check P1-SOFT-001 failed",
            "Yes, with caveats",
            "Größe ≤ 5 µm",
            "ISO 14971:2019",
        ] {
            assert_eq!(scalar(text), text);
        }
    }

    #[test]
    fn indicators_and_separators_force_quotes() {
        assert_eq!(scalar(""), "''");
        assert_eq!(scalar("- draft"), "'- draft'");
        assert_eq!(scalar("note: see IFU"), "'note: see IFU'");
        assert_eq!(scalar("see #4"), "'see #4'");
        assert_eq!(scalar(" padded"), "' padded'");
        assert_eq!(scalar("it's"), "it's");
        assert_eq!(scalar("'quoted'"), "'''quoted'''");
    }

    #[test]
    fn control_characters_use_double_quotes() {
        assert_eq!(scalar("line one\nline two"), "\"line one\\nline two\"");
        assert_eq!(scalar("tab\there"), "\"tab\\there\"");
        assert_eq!(scalar("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn nested_layout_matches_block_style() {
        let text = concat!(
            "group:\n",
            "  count: 1\n",
            "  items:\n",
            "  - id: A\n",
            "    tags: []\n",
            "  - id: B\n",
            "    tags:\n",
            "    - x\n",
            "  empty: {}\n",
        );
        let value: Value = serde_yaml::from_str(text).unwrap();
        assert_eq!(emit(&value).unwrap(), text);
    }

    #[test]
    fn empty_top_level_mapping() {
        let value = Value::Mapping(Mapping::new());
        assert_eq!(emit(&value).unwrap(), "{}\n");
    }

    #[test]
    fn sequence_of_sequences() {
        let value: Value = serde_yaml::from_str("- - a\n  - b\n- c\n").unwrap();
        assert_eq!(emit(&value).unwrap(), "- - a\n  - b\n- c\n");
    }

    #[test]
    fn emitted_text_reads_back_unchanged() {
        let source: Value = serde_yaml::from_str(
            "k: ['Yes', 'off', '', '12', 'a: b', \"x\\ny\", 'plain text', '2024-01-01']\n",
        )
        .unwrap();
        let text = emit(&source).unwrap();
        let back: Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, source);
    }
}
