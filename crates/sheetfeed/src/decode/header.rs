//! Header row indexing and named-column access

use std::collections::HashMap;

use crate::table::Row;

/// How header text becomes a lookup key. Applied to the header row once and
/// to every key passed to a lookup.
#[derive(Debug, Clone, Copy, Default)]
pub enum HeaderNormalization {
    /// Strip BOMs, trim, lowercase, keep only `[a-z0-9_]`
    #[default]
    SnakeKey,
    /// Lowercase, keep only `[a-z0-9]`
    Alphanumeric,
    Trimmed,
    /// Collapse whitespace runs to a single space, then trim
    CollapseWhitespace,
    Custom(fn(&str) -> String),
}

impl HeaderNormalization {
    pub fn apply(&self, s: &str) -> String {
        match self {
            HeaderNormalization::SnakeKey => snake_key(s),
            HeaderNormalization::Alphanumeric => alphanumeric_key(s),
            HeaderNormalization::Trimmed => s.trim().to_string(),
            HeaderNormalization::CollapseWhitespace => collapse_whitespace(s),
            HeaderNormalization::Custom(f) => f(s),
        }
    }
}

pub fn snake_key(s: &str) -> String {
    s.replace('\u{FEFF}', "")
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

pub fn alphanumeric_key(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized header name to column position. Later duplicates win; headers
/// that normalize to an empty key are only reachable positionally.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    raw: Vec<String>,
    keys: Vec<String>,
    positions: HashMap<String, usize>,
    normalization: HeaderNormalization,
}

impl HeaderIndex {
    pub fn from_row(row: &Row, normalization: HeaderNormalization) -> Self {
        let mut index = Self::empty(normalization);
        for (i, raw) in row.cells().iter().enumerate() {
            let key = normalization.apply(raw);
            if !key.is_empty() {
                index.positions.insert(key.clone(), i);
            }
            index.keys.push(key);
            index.raw.push(raw.clone());
        }
        index
    }

    pub fn empty(normalization: HeaderNormalization) -> Self {
        Self {
            raw: Vec::new(),
            keys: Vec::new(),
            positions: HashMap::new(),
            normalization,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn normalization(&self) -> HeaderNormalization {
        self.normalization
    }

    /// Header cells as they appeared in the table
    pub fn raw_names(&self) -> &[String] {
        &self.raw
    }

    /// Normalized keys in column order (empty where normalization removed everything)
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        let key = self.normalization.apply(key);
        if key.is_empty() {
            return None;
        }
        self.positions.get(&key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// First alias whose column exists and holds a non-empty cell, else `""`
    pub fn lookup<'r>(&self, row: &'r Row, aliases: &[&str]) -> &'r str {
        aliases
            .iter()
            .filter_map(|alias| self.position(alias))
            .map(|i| row.cell(i))
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    header: &'a HeaderIndex,
    row: &'a Row,
}

impl<'a> Record<'a> {
    pub fn new(header: &'a HeaderIndex, row: &'a Row) -> Self {
        Self { header, row }
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    pub fn header(&self) -> &'a HeaderIndex {
        self.header
    }

    pub fn has(&self, key: &str) -> bool {
        self.header.contains(key)
    }

    pub fn get(&self, key: &str) -> &'a str {
        match self.header.position(key) {
            Some(i) => self.row.cell(i),
            None => "",
        }
    }

    pub fn get_any(&self, aliases: &[&str]) -> &'a str {
        self.header.lookup(self.row, aliases)
    }

    /// Best-effort match for sheets whose headers drift: walks the distinct
    /// columns in order, skipping empty cells, and takes the first column whose
    /// key equals a normalized alias or whose header contains an alias.
    pub fn get_loose(&self, aliases: &[&str]) -> &'a str {
        let normalization = self.header.normalization;
        let targets: Vec<String> = aliases.iter().map(|a| normalization.apply(a)).collect();
        for (name, value) in self.distinct() {
            if value.is_empty() {
                continue;
            }
            let key = normalization.apply(name);
            if !key.is_empty() && targets.contains(&key) {
                return value;
            }
            if aliases.iter().any(|a| !a.is_empty() && name.contains(*a)) {
                return value;
            }
        }
        ""
    }

    /// `(trimmed header, cell)` once per distinct header, in first-seen order.
    /// A repeated header keeps its first position and takes its last column's cell.
    pub fn distinct(&self) -> Vec<(&'a str, &'a str)> {
        let mut out: Vec<(&'a str, &'a str)> = Vec::with_capacity(self.header.len());
        for (name, value) in self.iter() {
            let name = name.trim();
            match out.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => out.push((name, value)),
            }
        }
        out
    }

    /// `(raw header, cell)` pairs in column order; short rows pad with `""`
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let row = self.row;
        self.header
            .raw
            .iter()
            .enumerate()
            .map(move |(i, name)| (name.as_str(), row.cell(i)))
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in self.iter() {
            map.insert(name.to_string(), serde_json::Value::String(value.to_string()));
        }
        serde_json::Value::Object(map)
    }
}
