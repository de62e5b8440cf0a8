//! Nested flat-file layout (`get` responses)
//!
//! The first 12 characters of a line are the label column. A label starting
//! at column 0 opens a top-level record, an indented label adds a field to it,
//! a blank label continues the previous value and `///` ends an entry.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Top-level key -> field -> value
pub type NestedRecord = IndexMap<String, IndexMap<String, String>>;

const LABEL_WIDTH: usize = 12;
const TERMINATOR: &str = "///";

/// Field holding the content written on the top-level line itself
fn top_field(key: &str) -> &'static str {
    if key.contains("reference") {
        "reference_hook"
    } else {
        "descr"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// Before the first key or after a terminator
    Idle,
    InTopKey,
    InSubkey(String),
}

struct NestedParser {
    records: NestedRecord,
    current: Option<(String, IndexMap<String, String>)>,
    seen: FxHashSet<String>,
    counter: usize,
    state: State,
}

impl NestedParser {
    fn new() -> Self {
        NestedParser {
            records: NestedRecord::new(),
            current: None,
            seen: FxHashSet::default(),
            counter: 0,
            state: State::Idle,
        }
    }

    fn feed(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let split = line
            .char_indices()
            .nth(LABEL_WIDTH)
            .map_or(line.len(), |(pos, _)| pos);
        let (label, content) = line.split_at(split);
        let content = content.trim();
        let key = label.trim();

        if key.is_empty() {
            self.continue_value(content);
        } else if label.starts_with(char::is_whitespace) {
            self.open_subkey(key.to_lowercase(), content);
        } else if key == TERMINATOR {
            self.flush();
            self.state = State::Idle;
        } else {
            self.open_key(key.to_lowercase(), content);
        }
    }

    fn open_key(&mut self, key: String, content: &str) {
        self.flush();

        let key = if self.seen.contains(&key) {
            let renamed = format!("{}{}", key, self.counter);
            self.counter += 1;
            renamed
        } else {
            key
        };
        self.seen.insert(key.clone());

        let mut fields = IndexMap::new();
        fields.insert(top_field(&key).to_string(), content.to_string());
        self.current = Some((key, fields));
        self.state = State::InTopKey;
    }

    fn open_subkey(&mut self, subkey: String, content: &str) {
        let Some((_, fields)) = self.current.as_mut() else {
            // Subkeys outside a record have nowhere to go
            return;
        };
        append(fields.entry(subkey.clone()).or_default(), content);
        self.state = State::InSubkey(subkey);
    }

    fn continue_value(&mut self, content: &str) {
        let Some((key, fields)) = self.current.as_mut() else {
            return;
        };
        let field = match &self.state {
            State::Idle => return,
            State::InTopKey => top_field(key).to_string(),
            State::InSubkey(subkey) => subkey.clone(),
        };
        append(fields.entry(field).or_default(), content);
    }

    fn flush(&mut self) {
        if let Some((key, fields)) = self.current.take() {
            self.records.insert(key, fields);
        }
    }

    fn finish(mut self) -> NestedRecord {
        self.flush();
        self.records
    }
}

fn append(value: &mut String, content: &str) {
    if !value.is_empty() {
        value.push('\n');
    }
    value.push_str(content);
}

/// Parse a nested response; this layout never fails
pub fn parse_nested(text: &str) -> NestedRecord {
    let mut parser = NestedParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}
