//! CSV parser implementation.
//!
//! This module turns the raw text of the site's data files into a [`Table`] of
//! [`Record`]s. Parsing never fails: malformed input degrades to ragged or oddly
//! split rows instead of an error.
//!
//! # Example
//!
//! ```
//! use labsite::csv::CsvParser;
//!
//! let input = "title,authors,year\n\"Paper, Part 1\",\"**K. Kim**, J. Lee\",2023";
//!
//! let table = CsvParser::new().parse(input);
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.records()[0].get("title"), Some("Paper, Part 1"));
//! ```

mod parse;
mod structure;
mod write;

use serde::Deserialize;
use tracing::debug;

use parse::csv_parse;
pub use structure::{Record, Table};
pub use write::{add_column, encode_field};

/// Configuration for CSV parsing.
///
/// # Examples
///
/// ```
/// use labsite::csv::CsvConfig;
///
/// let mut config = CsvConfig::new();
/// config.set_delimiter(';').set_trim(false);
/// assert_eq!(config.delimiter(), ';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter
    delimiter: char,
    /// Whether to trim whitespace found outside quoted sections
    trim: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvConfig {
    /// Creates a new CSV configuration: comma delimited, trimming enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            trim: true,
        }
    }

    /// Sets the delimiter character
    pub fn set_delimiter(&mut self, delimiter: char) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether unquoted whitespace around fields is trimmed
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn trim(&self) -> bool {
        self.trim
    }
}

/// Parser for the comma separated data files.
///
/// Supports optional double-quote enclosed fields, doubled-quote escaping, quoted
/// delimiters and line breaks, and `\n`, `\r\n` or `\r` line endings. The first
/// non-blank row is the header.
///
/// Whitespace outside quotes is trimmed; text inside quotes is kept verbatim, so
/// `"  padded  "` keeps its spaces.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: CsvConfig,
}

impl CsvParser {
    /// Creates a new CSV parser with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CsvConfig::new(),
        }
    }

    /// Creates a new CSV parser with custom configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Parses `input` into a [`Table`].
    ///
    /// Rows shorter than the header are padded with empty values, longer rows are
    /// truncated, and blank rows are skipped. Empty input gives an empty table.
    pub fn parse(&self, input: &str) -> Table {
        let rows = csv_parse(input, &self.config);
        let table = Table::from_rows(rows);
        debug!(
            columns = table.headers().len(),
            records = table.len(),
            "parsed csv table"
        );
        table
    }
}
