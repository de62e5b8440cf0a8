//! Column layout (`info` responses)
//!
//! ```text
//! genes            KEGG Genes Database
//! linked db        pathway
//!                  brite
//! ```

use super::{ParseError, ParseResult};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

/// Key -> values, in first-seen key order
pub type ColumnRecord = IndexMap<String, Vec<String>>;

static COLUMN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("column separator pattern is valid"));

pub fn parse_columns(text: &str) -> ParseResult<ColumnRecord> {
    let mut record = ColumnRecord::new();
    let mut current_key: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let fields: Vec<&str> = COLUMN_SEPARATOR
            .split(line)
            .map(str::trim_start)
            .filter(|f| !f.is_empty())
            .collect();

        match fields.as_slice() {
            [] => {}
            [key, value] => {
                // A repeated key starts over
                record.insert(key.to_string(), vec![value.to_string()]);
                current_key = Some(key.to_string());
            }
            [value] => {
                let values = current_key
                    .as_deref()
                    .and_then(|key| record.get_mut(key))
                    .ok_or_else(|| ParseError::InvalidContent {
                        line_number: idx + 1,
                        reason: format!("continuation value {:?} before any key", value),
                    })?;
                values.push(value.to_string());
            }
            _ => {
                return Err(ParseError::UnsupportedLayout {
                    line_number: idx + 1,
                    found: fields.len(),
                    line: line.to_string(),
                });
            }
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = "\
genes            KEGG Genes Database
                 Release 108.0+/10-17, Oct 23
                 Kanehisa Laboratories

linked db        pathway
                 brite
                 module
";

    #[test]
    fn test_keys_and_continuations() {
        let record = parse_columns(INFO).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(
            record["genes"],
            vec![
                "KEGG Genes Database",
                "Release 108.0+/10-17, Oct 23",
                "Kanehisa Laboratories"
            ]
        );
        assert_eq!(record["linked db"], vec!["pathway", "brite", "module"]);
    }

    #[test]
    fn test_repeated_key_restarts() {
        let record = parse_columns("key   one\n      two\nkey   three\n").unwrap();
        assert_eq!(record["key"], vec!["three"]);
    }

    #[test]
    fn test_continuation_before_key() {
        let err = parse_columns("\n        orphan\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidContent { line_number: 2, .. }));
    }

    #[test]
    fn test_too_many_columns() {
        let err = parse_columns("a  b  c\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedLayout {
                line_number: 1,
                found: 3,
                line: "a  b  c".to_string(),
            }
        );
    }

    #[test]
    fn test_single_spaces_stay_inside_fields() {
        let record = parse_columns("entry name   value with spaces\n").unwrap();
        assert_eq!(record["entry name"], vec!["value with spaces"]);
    }
}
