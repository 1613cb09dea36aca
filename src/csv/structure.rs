//! CSV table data structures.
//!
//! This module defines the generic [`Record`] and [`Table`] types produced by the parser.
//! Typed content (publications, members, ...) is built from these at the boundary.

use serde::Serialize;

/// One parsed data row as an ordered field-name to value mapping.
///
/// Field order follows the header row. Keys are the header names exactly as written,
/// so lookups are case-sensitive and may contain spaces (`"google scholar"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Zip header names with row values positionally.
    ///
    /// Missing trailing values default to `""`, extra values are dropped.
    pub(crate) fn from_row(headers: &[String], values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let fields = headers
            .iter()
            .map(|header| (header.clone(), values.next().unwrap_or_default()))
            .collect();
        Self { fields }
    }

    /// Returns the value for `name`, or `None` when the header has no such column.
    ///
    /// If the header repeats a name the last column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value for `name`, treating an absent column as empty.
    pub fn field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Returns the value for `name` when it is present and not blank.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    /// Iterates over `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// All records of one source file, in source row order, header excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table from raw rows; the first row is the header.
    pub(crate) fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut rows = rows.into_iter();
        let Some(headers) = rows.next() else {
            return Self::default();
        };
        let records = rows
            .map(|values| Record::from_row(&headers, values))
            .collect();
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
