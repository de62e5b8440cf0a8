//! KEGG text response parsing
//!
//! KEGG REST answers are plain text in one of a few layouts. The caller picks
//! the layout explicitly with a [`ParseMode`]; nothing is inferred from content.
//!
//! - `bipartite_list`: `ITEM<TAB>DESCRIPTION` per line (LIST, FIND, LINK, CONV)
//! - `four_way_list`: `ITEM<TAB>TYPE<TAB>POSITION<TAB>DESCRIPTION` (organism gene lists)
//! - `columns`: key/value columns separated by runs of spaces (INFO)
//! - `nested`: flat-file records with a 12-character label column (GET)

pub mod columns;
pub mod lists;
pub mod nested;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use columns::{parse_columns, ColumnRecord};
pub use lists::{parse_bipartite_list, parse_four_way_list, BipartiteList, FourWayList};
pub use nested::{parse_nested, NestedRecord};

/// Parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Line {line_number}: expected {expected} tab-separated fields, found {found} in {line:?}"
    )]
    FieldCount {
        line_number: usize,
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("Invalid content at line {line_number}: {reason}")]
    InvalidContent { line_number: usize, reason: String },

    #[error("Unsupported column layout at line {line_number}: {found} fields in {line:?}")]
    UnsupportedLayout {
        line_number: usize,
        found: usize,
        line: String,
    },

    #[error("Unknown parse mode '{0}'")]
    UnknownMode(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Text layout of a KEGG response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMode {
    BipartiteList,
    FourWayList,
    Columns,
    Nested,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::BipartiteList => "bipartite_list",
            ParseMode::FourWayList => "four_way_list",
            ParseMode::Columns => "columns",
            ParseMode::Nested => "nested",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bipartite_list" => Ok(ParseMode::BipartiteList),
            "four_way_list" => Ok(ParseMode::FourWayList),
            "columns" => Ok(ParseMode::Columns),
            "nested" => Ok(ParseMode::Nested),
            other => Err(ParseError::UnknownMode(other.to_string())),
        }
    }
}

/// Result of parsing a response, one variant per mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    BipartiteList(BipartiteList),
    FourWayList(FourWayList),
    Columns(ColumnRecord),
    Nested(NestedRecord),
}

impl ParsedRecord {
    pub fn mode(&self) -> ParseMode {
        match self {
            ParsedRecord::BipartiteList(_) => ParseMode::BipartiteList,
            ParsedRecord::FourWayList(_) => ParseMode::FourWayList,
            ParsedRecord::Columns(_) => ParseMode::Columns,
            ParsedRecord::Nested(_) => ParseMode::Nested,
        }
    }
}

/// Parse a whole response in the given mode
pub fn process_request_text(text: &str, mode: ParseMode) -> ParseResult<ParsedRecord> {
    match mode {
        ParseMode::BipartiteList => parse_bipartite_list(text).map(ParsedRecord::BipartiteList),
        ParseMode::FourWayList => parse_four_way_list(text).map(ParsedRecord::FourWayList),
        ParseMode::Columns => parse_columns(text).map(ParsedRecord::Columns),
        ParseMode::Nested => Ok(ParsedRecord::Nested(parse_nested(text))),
    }
}
