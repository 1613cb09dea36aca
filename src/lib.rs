//! Data layer of a bilingual (Korean/English) laboratory website.
//!
//! `labsite` reads the site's CSV tables (publications, members, news, research and
//! projects), turns them into typed entries and runs them through a filter, sort and
//! paginate pipeline. The result is handed to a presentation layer as display items
//! in the active language plus pagination controls.
//!
//! # Key Features
//!
//! - **CSV parsing** that never fails: quoted fields with embedded commas, quotes and
//!   line breaks, ragged rows and blank lines are all handled.
//! - **Typed content**: [`Publication`], [`Member`], [`NewsItem`] and [`ProjectItem`]
//!   are read from records by explicit field lookup.
//! - **Pipeline**: bucket filtering, year/date/ongoing-first ordering and pagination.
//! - **List views** that fetch and parse each table once and re-render on page,
//!   bucket or language changes.
//! - **Bilingual detail documents** split by `<!-- KR -->` / `<!-- EN -->` markers.
//!
//! # Basic Usage
//!
//! ```rust
//! use labsite::content::{Content, Publication};
//! use labsite::pipeline::{run, Bucket, Query};
//! use labsite::CsvParser;
//!
//! let input = "type,title,authors,venue,year
//! Conference,\"Touch, Reconsidered\",\"**K. Kim**, J. Lee\",CHI,2023
//! Journal,Haptics at Scale,J. Lee,TOCHI,2024 [Just Accepted]
//! ";
//!
//! let table = CsvParser::new().parse(input);
//! let publications = Publication::from_table(&table);
//!
//! let page = run(&publications, &Query::for_entry::<Publication>(10));
//! assert_eq!(page.items[0].title, "Haptics at Scale");
//!
//! let conferences = Query::for_entry::<Publication>(10).bucket(Bucket::tag("Conference"));
//! assert_eq!(run(&publications, &conferences).items[0].title, "Touch, Reconsidered");
//! ```
//!
//! # Error Handling
//!
//! Parsing has no error path. Operations that talk to the host return the crate
//! [`Result`] type wrapping [`SiteError`]:
//!
//! ```rust
//! use labsite::config::SiteConfig;
//! use labsite::content::{ContentKind, Member};
//! use labsite::fetch::MapFetcher;
//! use labsite::view::ListController;
//! use labsite::SiteError;
//!
//! let mut view: ListController<Member> = ListController::new(ContentKind::Members, &SiteConfig::new());
//! match view.load(&MapFetcher::new()) {
//!     Err(SiteError::Fetch { path, .. }) => assert_eq!(path, "data/members.csv"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! # Logging
//!
//! Events are emitted through [`tracing`]; installing a subscriber is up to the host.

use thiserror::Error;

extern crate csv as csv_crate;

pub mod clipboard;
pub mod config;
pub mod content;
pub mod csv;
pub mod detail;
pub mod fetch;
pub mod lang;
pub mod pipeline;
mod regex;
mod utils;
pub mod view;

// Reexports
pub use config::SiteConfig;
pub use content::{Content, ContentKind, DisplayItem, Member, NewsItem, ProjectItem, Publication};
pub use csv::{CsvConfig, CsvParser, Record, Table};
pub use fetch::{FetchError, ResourceFetcher};
pub use lang::Language;
pub use pipeline::{Bucket, Page, Query};
pub use view::{ListController, Rendered, ViewEvent};

/// A specialized Result type for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Errors that can occur while loading or maintaining site content.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Failed to fetch {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv_crate::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid delimiter: {0:?} is not an ASCII character")]
    InvalidDelimiter(char),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_site_error_display() {
        let error = SiteError::Fetch {
            path: "data/news.csv".to_string(),
            source: FetchError::Status {
                path: "data/news.csv".to_string(),
                status: 404,
            },
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch data/news.csv: request for data/news.csv failed with status 404"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_delimiter_display() {
        let error = SiteError::InvalidDelimiter('·');
        assert_eq!(
            error.to_string(),
            "Invalid delimiter: '·' is not an ASCII character"
        );
    }
}
