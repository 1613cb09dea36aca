//! Site-wide configuration.

use serde::Deserialize;

use crate::content::ContentKind;
use crate::csv::CsvConfig;

/// Items per page for each paginated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    pub publications: usize,
    pub members: usize,
    pub news: usize,
    pub research: usize,
    pub projects: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            publications: 10,
            members: 12,
            news: 5,
            research: 6,
            projects: 6,
        }
    }
}

impl PageSizes {
    pub fn get(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Publications => self.publications,
            ContentKind::Members => self.members,
            ContentKind::News => self.news,
            ContentKind::Research => self.research,
            ContentKind::Projects => self.projects,
        }
    }

    fn slot(&mut self, kind: ContentKind) -> &mut usize {
        match kind {
            ContentKind::Publications => &mut self.publications,
            ContentKind::Members => &mut self.members,
            ContentKind::News => &mut self.news,
            ContentKind::Research => &mut self.research,
            ContentKind::Projects => &mut self.projects,
        }
    }
}

/// Configuration for the site's data layer.
///
/// Can be built in code or deserialized; missing keys take their defaults.
///
/// # Examples
///
/// ```
/// use labsite::config::SiteConfig;
/// use labsite::content::ContentKind;
///
/// let mut config = SiteConfig::new();
/// config
///     .set_data_dir("static/data")
///     .set_page_size(ContentKind::News, 8);
///
/// assert_eq!(config.page_size(ContentKind::News), 8);
/// assert_eq!(ContentKind::News.path(&config), "static/data/news.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory of the CSV files, relative to the site root
    data_dir: String,
    page_sizes: PageSizes,
    /// First year shown on the recent publication pages
    publication_cutoff_year: i32,
    csv: CsvConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: "data".to_string(),
            page_sizes: PageSizes::default(),
            publication_cutoff_year: 2020,
            csv: CsvConfig::new(),
        }
    }

    pub fn set_data_dir<S: Into<String>>(&mut self, dir: S) -> &mut Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the page size of `kind`. Zero is stored as one.
    pub fn set_page_size(&mut self, kind: ContentKind, size: usize) -> &mut Self {
        *self.page_sizes.slot(kind) = size.max(1);
        self
    }

    pub fn set_publication_cutoff_year(&mut self, year: i32) -> &mut Self {
        self.publication_cutoff_year = year;
        self
    }

    pub fn set_csv(&mut self, csv: CsvConfig) -> &mut Self {
        self.csv = csv;
        self
    }

    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    pub fn page_size(&self, kind: ContentKind) -> usize {
        self.page_sizes.get(kind)
    }

    pub fn page_sizes(&self) -> &PageSizes {
        &self.page_sizes
    }

    pub fn publication_cutoff_year(&self) -> i32 {
        self.publication_cutoff_year
    }

    pub fn csv(&self) -> &CsvConfig {
        &self.csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(ContentKind::Publications, 10)]
    #[case(ContentKind::Members, 12)]
    #[case(ContentKind::News, 5)]
    #[case(ContentKind::Research, 6)]
    #[case(ContentKind::Projects, 6)]
    fn test_default_page_sizes(#[case] kind: ContentKind, #[case] expected: usize) {
        assert_eq!(SiteConfig::new().page_size(kind), expected);
    }

    #[test]
    fn test_setters_chain() {
        let mut csv = CsvConfig::new();
        csv.set_delimiter(';');

        let mut config = SiteConfig::new();
        config
            .set_publication_cutoff_year(2018)
            .set_page_size(ContentKind::Members, 0)
            .set_csv(csv);

        assert_eq!(config.publication_cutoff_year(), 2018);
        assert_eq!(config.page_size(ContentKind::Members), 1);
        assert_eq!(config.csv().delimiter(), ';');
        assert_eq!(config.data_dir(), "data");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SiteConfig = serde_json::from_str(
            r#"{"data_dir": "assets", "page_sizes": {"news": 3}, "csv": {"trim": false}}"#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), "assets");
        assert_eq!(config.page_size(ContentKind::News), 3);
        assert_eq!(config.page_size(ContentKind::Publications), 10);
        assert_eq!(config.publication_cutoff_year(), 2020);
        assert!(!config.csv().trim());
        assert_eq!(config.csv().delimiter(), ',');
    }
}
