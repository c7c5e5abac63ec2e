//! Parsed tables: rows of string cells, header-aware views on top

use crate::decode::header::{HeaderIndex, HeaderNormalization, Record};

/// One parsed line. Rows need not share a length; `cell` pads with `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Row(cells)
    }

    pub fn cell(&self, idx: usize) -> &str {
        self.0.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every cell is empty once surrounding whitespace is ignored
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|c| c.trim().is_empty())
    }

    pub fn into_cells(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Row(cells)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows after the header
    pub fn body(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Header-indexed view over the body rows
    pub fn records(&self, normalization: HeaderNormalization) -> Records<'_> {
        let header = match self.header() {
            Some(row) => HeaderIndex::from_row(row, normalization),
            None => HeaderIndex::empty(normalization),
        };
        Records {
            header,
            rows: self.body(),
        }
    }

    /// Drop leading all-blank rows and trailing rows holding a single empty cell
    pub fn trim_blank_edges(mut self) -> Self {
        while self
            .rows
            .last()
            .is_some_and(|r| r.len() == 1 && r.cell(0).is_empty())
        {
            self.rows.pop();
        }
        let leading = self.rows.iter().take_while(|r| r.is_blank()).count();
        self.rows.drain(..leading);
        self
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = core::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

pub struct Records<'a> {
    header: HeaderIndex,
    rows: &'a [Row],
}

impl<'a> Records<'a> {
    pub fn header(&self) -> &HeaderIndex {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Record<'_>> {
        self.rows.get(idx).map(|row| Record::new(&self.header, row))
    }

    pub fn iter(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows.iter().map(|row| Record::new(&self.header, row))
    }
}
