//! Tab-separated list layouts

use super::{ParseError, ParseResult};

/// `ITEM<TAB>DESCRIPTION` lines as two index-aligned sequences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BipartiteList {
    pub items: Vec<String>,
    pub descriptions: Vec<String>,
}

impl BipartiteList {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.items, self.descriptions)
    }
}

/// `ITEM<TAB>TYPE<TAB>POSITION<TAB>DESCRIPTION` lines as four index-aligned sequences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FourWayList {
    pub items: Vec<String>,
    pub types: Vec<String>,
    pub positions: Vec<String>,
    pub descriptions: Vec<String>,
}

impl FourWayList {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split every non-blank line into exactly `N` tab-separated fields
fn split_lines<const N: usize>(text: &str) -> ParseResult<Vec<[String; N]>> {
    let mut rows = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let row: [String; N] = fields
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| ParseError::FieldCount {
                line_number: idx + 1,
                expected: N,
                found: fields.len(),
                line: line.to_string(),
            })?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn parse_bipartite_list(text: &str) -> ParseResult<BipartiteList> {
    let mut list = BipartiteList::default();
    for [item, description] in split_lines::<2>(text)? {
        list.items.push(item);
        list.descriptions.push(description);
    }
    Ok(list)
}

pub fn parse_four_way_list(text: &str) -> ParseResult<FourWayList> {
    let mut list = FourWayList::default();
    for [item, kind, position, description] in split_lines::<4>(text)? {
        list.items.push(item);
        list.types.push(kind);
        list.positions.push(position);
        list.descriptions.push(description);
    }
    Ok(list)
}
