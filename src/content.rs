//! Typed content built from parsed CSV records.
//!
//! Each data file of the site has its own record type. The generic [`Record`] is read
//! once by explicit field lookup at the boundary, after which the pipeline and the
//! presentation layer work with named fields only.
//!
//! | Type | Source | Bucket field |
//! |------|--------|--------------|
//! | [`Publication`] | `data/publications.csv` | `type` |
//! | [`Member`] | `data/members.csv` | `Type` |
//! | [`NewsItem`] | `data/news.csv` | `type` |
//! | [`ProjectItem`] | `data/project.csv`, `data/research.csv` | `status` |

mod member;
mod news;
mod project;
mod publication;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::csv::{Record, Table};
use crate::lang::Language;
use crate::pipeline::{filter, group_by_year, sort, Bucket, Entry, YearRange};

pub use member::{Member, MemberPage, LINK_KEYS};
pub use news::NewsItem;
pub use project::ProjectItem;
pub use publication::{Publication, PublicationView};

/// The CSV-backed collections of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Publications,
    Members,
    News,
    Research,
    Projects,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Publications,
        ContentKind::Members,
        ContentKind::News,
        ContentKind::Research,
        ContentKind::Projects,
    ];

    /// File name under the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ContentKind::Publications => "publications.csv",
            ContentKind::Members => "members.csv",
            ContentKind::News => "news.csv",
            ContentKind::Research => "research.csv",
            ContentKind::Projects => "project.csv",
        }
    }

    /// Site-relative path of the source file, e.g. `data/news.csv`.
    pub fn path(self, config: &SiteConfig) -> String {
        let dir = config.data_dir().trim_end_matches('/');
        if dir.is_empty() {
            self.file_name().to_string()
        } else {
            format!("{dir}/{}", self.file_name())
        }
    }
}

/// A record type of the site: constructible from a CSV row and displayable.
pub trait Content: Entry + Sized {
    /// Builds the typed value by looking up its named fields; absent columns are empty.
    fn from_record(record: &Record) -> Self;

    /// What the presentation layer needs to show this entry in `lang`.
    fn display(&self, lang: Language) -> DisplayItem;

    /// Converts every record of `table`, keeping source order.
    fn from_table(table: &Table) -> Vec<Self> {
        table.iter().map(Self::from_record).collect()
    }
}

/// An external link shown with an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Column the link came from (`"github"`, `"link"`, ...).
    pub label: String,
    pub href: String,
}

/// Render instructions for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub title: String,
    /// Authors, research interest, current position or summary text.
    pub summary: String,
    pub body: Option<String>,
    /// Date, year, period or venue line.
    pub meta: String,
    pub image: Option<String>,
    pub links: Vec<Link>,
    /// Text offered for copying, such as a BibTeX entry.
    pub copy_text: Option<String>,
    /// Markdown document opened in the detail view.
    pub detail_path: Option<String>,
}

/// A titled group of entries on a non-paginated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title_kr: String,
    pub title_en: String,
    pub bucket: Bucket,
    pub years: Option<YearRange>,
}

impl Section {
    pub fn new<K: Into<String>, E: Into<String>>(title_kr: K, title_en: E, bucket: Bucket) -> Self {
        Self {
            title_kr: title_kr.into(),
            title_en: title_en.into(),
            bucket,
            years: None,
        }
    }

    #[must_use]
    pub fn years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    pub fn title(&self, lang: Language) -> &str {
        lang.pick(&self.title_kr, &self.title_en)
    }
}

/// A rendered [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub items: Vec<DisplayItem>,
}

/// Renders each section of a grouped page; sections without entries are left out.
pub fn render_sections<T: Content>(
    items: &[T],
    sections: &[Section],
    lang: Language,
) -> Vec<SectionView> {
    sections
        .iter()
        .filter_map(|section| {
            let mut selected = filter(items, &section.bucket, section.years);
            if selected.is_empty() {
                return None;
            }
            sort(&mut selected, T::SORT);
            Some(SectionView {
                title: section.title(lang).to_string(),
                items: selected.iter().map(|entry| entry.display(lang)).collect(),
            })
        })
        .collect()
}

/// Entries of one year within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    /// `None` collects entries without a readable year.
    pub year: Option<i32>,
    pub items: Vec<DisplayItem>,
}

/// Renders one section as consecutive year groups, most recent first.
pub fn render_year_groups<T: Content>(
    items: &[T],
    section: &Section,
    lang: Language,
) -> Vec<YearGroup> {
    let mut selected = filter(items, &section.bucket, section.years);
    sort(&mut selected, T::SORT);
    group_by_year(&selected)
        .into_iter()
        .map(|(year, group)| YearGroup {
            year,
            items: group.iter().map(|entry| entry.display(lang)).collect(),
        })
        .collect()
}

/// Reads an optional text column: `None` when absent or blank.
pub(crate) fn optional(record: &Record, name: &str) -> Option<String> {
    record.non_empty(name).map(str::to_string)
}
