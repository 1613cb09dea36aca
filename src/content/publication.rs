//! Publications from `data/publications.csv`.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{optional, Content, DisplayItem, Link, Section};
use crate::csv::Record;
use crate::lang::Language;
use crate::pipeline::{Bucket, Entry, Matching, SortRule, YearRange};
use crate::utils::{emphasize_authors, is_blank_link, leading_year};

/// One row of the publication list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// `Conference` or `Journal`
    pub kind: String,
    pub title: String,
    /// Author line; highlighted lab members are written `**Name**`
    pub authors: String,
    pub venue: String,
    /// Raw year cell, possibly annotated (`2024 [Just Accepted]`)
    pub year: String,
    pub status: Option<String>,
    pub link: Option<String>,
    pub bibtex: Option<String>,
    pub thumbnail: Option<String>,
}

impl Entry for Publication {
    const MATCHING: Matching = Matching::Exact;
    const SORT: SortRule = SortRule::YearDescending;

    fn tag(&self) -> &str {
        &self.kind
    }

    fn is_listed(&self) -> bool {
        !self.year.trim().is_empty()
    }

    fn year(&self) -> Option<i32> {
        leading_year(&self.year)
    }
}

impl Content for Publication {
    fn from_record(record: &Record) -> Self {
        Self {
            kind: record.field("type").to_string(),
            title: record.field("title").to_string(),
            authors: record.field("authors").to_string(),
            venue: record.field("venue").to_string(),
            year: record.field("year").to_string(),
            status: optional(record, "status"),
            link: record
                .get("link")
                .filter(|href| !is_blank_link(href))
                .map(|href| href.trim().to_string()),
            bibtex: optional(record, "bibtex"),
            thumbnail: optional(record, "thumbnail"),
        }
    }

    fn display(&self, _lang: Language) -> DisplayItem {
        DisplayItem {
            title: self.title.clone(),
            summary: emphasize_authors(&self.authors),
            meta: self.venue_line(),
            image: self.thumbnail.clone(),
            links: self
                .link
                .iter()
                .map(|href| Link {
                    label: "link".to_string(),
                    href: href.clone(),
                })
                .collect(),
            copy_text: self.bibtex.clone(),
            ..Default::default()
        }
    }
}

impl Publication {
    /// `venue, year [status]`, leaving out empty parts.
    pub fn venue_line(&self) -> String {
        let mut line = [self.venue.trim(), self.year.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(status) = &self.status {
            line.push_str(&format!(" [{status}]"));
        }
        line
    }
}

/// The publication pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationView {
    /// Conference papers from the cutoff year on.
    Conference,
    /// Journal articles from the cutoff year on.
    Journal,
    /// Everything before the cutoff year, split by type.
    Former,
}

impl PublicationView {
    /// Sections shown on this page, split at the configured cutoff year.
    pub fn sections(self, config: &SiteConfig) -> Vec<Section> {
        let cutoff_year = config.publication_cutoff_year();
        let last = cutoff_year.saturating_sub(1);
        let recent = YearRange::from(cutoff_year);
        let former = YearRange::until(last);
        match self {
            PublicationView::Conference => {
                vec![Section::new("Conference", "Conference", Bucket::tag("Conference")).years(recent)]
            }
            PublicationView::Journal => {
                vec![Section::new("Journal", "Journal", Bucket::tag("Journal")).years(recent)]
            }
            PublicationView::Former => {
                vec![
                    Section::new(
                        format!("Conference (~{last})"),
                        format!("Conference (~{last})"),
                        Bucket::tag("Conference"),
                    )
                    .years(former),
                    Section::new(
                        format!("Journal (~{last})"),
                        format!("Journal (~{last})"),
                        Bucket::tag("Journal"),
                    )
                    .years(former),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{render_sections, render_year_groups};
    use crate::csv::CsvParser;
    use crate::pipeline::{run, Query};
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
type,title,authors,venue,year,status,link,bibtex
Conference,Fast Paper,\"**K. Kim**, J. Lee\",CHI,2023,,https://doi.org/x,\"@inproceedings{kim2023,
  title={Fast Paper}
}\"
Journal,Slow Paper,J. Lee,TOCHI,2021,,#,
Conference,Old Paper,**K. Kim**,UIST,2018,,,
Journal,Accepted Paper,S. Park,IJHCS,2024,Just Accepted,,
Journal,Undated Paper,S. Park,IJHCS,,,,
Workshop,Side Paper,S. Park,CHI EA,2022,,,
";

    fn publications() -> Vec<Publication> {
        Publication::from_table(&CsvParser::new().parse(CSV))
    }

    #[test]
    fn test_from_record() {
        let items = publications();
        assert_eq!(items.len(), 6);
        let first = &items[0];
        assert_eq!(first.kind, "Conference");
        assert_eq!(first.link.as_deref(), Some("https://doi.org/x"));
        assert_eq!(
            first.bibtex.as_deref(),
            Some("@inproceedings{kim2023,\n  title={Fast Paper}\n}")
        );
        // "#" is a placeholder, not a link
        assert_eq!(items[1].link, None);
        assert_eq!(items[3].year(), Some(2024));
    }

    #[test]
    fn test_display() {
        let item = publications()[0].display(Language::Kr);
        assert_eq!(item.title, "Fast Paper");
        assert_eq!(item.summary, "<strong>K. Kim</strong>, J. Lee");
        assert_eq!(item.meta, "CHI, 2023");
        assert_eq!(item.links.len(), 1);
        assert!(item.copy_text.is_some());
    }

    #[test]
    fn test_venue_line_with_status() {
        let items = publications();
        assert_eq!(items[3].venue_line(), "IJHCS, 2024 [Just Accepted]");
    }

    #[test]
    fn test_all_bucket_sorted_by_year() {
        let items = publications();
        let page = run(&items, &Query::for_entry::<Publication>(10));
        let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
        // the undated paper is not listed; the workshop paper only shows under All
        assert_eq!(
            titles,
            vec!["Accepted Paper", "Fast Paper", "Side Paper", "Slow Paper", "Old Paper"]
        );
    }

    #[test]
    fn test_views() {
        let items = publications();
        let config = SiteConfig::new();

        let conference = render_sections(&items, &PublicationView::Conference.sections(&config), Language::En);
        assert_eq!(conference.len(), 1);
        assert_eq!(conference[0].items.len(), 1);
        assert_eq!(conference[0].items[0].title, "Fast Paper");

        let journal = render_sections(&items, &PublicationView::Journal.sections(&config), Language::En);
        let titles: Vec<&str> = journal[0].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Accepted Paper", "Slow Paper"]);

        let former = render_sections(&items, &PublicationView::Former.sections(&config), Language::En);
        assert_eq!(former.len(), 1);
        assert_eq!(former[0].title, "Conference (~2019)");
        assert_eq!(former[0].items[0].title, "Old Paper");
    }

    #[test]
    fn test_cutoff_comes_from_config() {
        let items = publications();
        let mut config = SiteConfig::new();
        config.set_publication_cutoff_year(2022);

        let former = render_sections(&items, &PublicationView::Former.sections(&config), Language::En);
        let titles: Vec<&str> = former.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Conference (~2021)", "Journal (~2021)"]);
        assert_eq!(former[1].items[0].title, "Slow Paper");
    }

    #[test]
    fn test_extreme_cutoff_does_not_overflow() {
        let mut config = SiteConfig::new();
        config.set_publication_cutoff_year(i32::MIN);
        let sections = PublicationView::Former.sections(&config);
        assert_eq!(sections[0].years, Some(YearRange::until(i32::MIN)));
        assert!(render_sections(&publications(), &sections, Language::En).is_empty());
    }

    #[test]
    fn test_recent_journal_grouped_by_year() {
        let items = publications();
        let sections = PublicationView::Journal.sections(&SiteConfig::new());
        let groups = render_year_groups(&items, &sections[0], Language::En);
        let shape: Vec<(Option<i32>, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.year, g.items.iter().map(|i| i.title.as_str()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (Some(2024), vec!["Accepted Paper"]),
                (Some(2021), vec!["Slow Paper"]),
            ]
        );
    }
}
