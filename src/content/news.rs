//! News posts from `data/news.csv`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::content::{optional, Content, DisplayItem, Link};
use crate::csv::Record;
use crate::lang::Language;
use crate::pipeline::{Entry, Matching, SortRule};
use crate::utils::{is_blank_link, parse_date};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    /// Raw date cell (`2024.03.15`)
    pub date: String,
    /// Category such as `News` or `Award`; matched case-insensitively
    pub kind: String,
    pub title_kr: String,
    pub title_en: String,
    pub summary_kr: String,
    pub summary_en: String,
    pub image: Option<String>,
    pub link: Option<String>,
    /// Markdown document for the detail view
    pub detail: Option<String>,
}

impl Entry for NewsItem {
    const MATCHING: Matching = Matching::IgnoreCase;
    const SORT: SortRule = SortRule::DateDescending;

    fn tag(&self) -> &str {
        &self.kind
    }

    fn is_listed(&self) -> bool {
        !self.date.trim().is_empty()
    }

    fn year(&self) -> Option<i32> {
        self.date().map(|date| date.year())
    }

    fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

impl Content for NewsItem {
    fn from_record(record: &Record) -> Self {
        Self {
            date: record.field("date").to_string(),
            kind: record.field("type").to_string(),
            title_kr: record.field("title_kr").to_string(),
            title_en: record.field("title_en").to_string(),
            summary_kr: record.field("summary_kr").to_string(),
            summary_en: record.field("summary_en").to_string(),
            image: optional(record, "image"),
            link: record
                .get("link")
                .filter(|href| !is_blank_link(href))
                .map(|href| href.trim().to_string()),
            detail: optional(record, "detail"),
        }
    }

    fn display(&self, lang: Language) -> DisplayItem {
        DisplayItem {
            title: lang.pick(&self.title_kr, &self.title_en).to_string(),
            summary: lang.pick(&self.summary_kr, &self.summary_en).to_string(),
            meta: self.date.clone(),
            image: self.image.clone(),
            links: self
                .link
                .iter()
                .map(|href| Link {
                    label: "link".to_string(),
                    href: href.clone(),
                })
                .collect(),
            detail_path: self.detail.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::CsvParser;
    use crate::pipeline::{run, Bucket, Query};
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
date,type,title_kr,title_en,summary_kr,summary_en,detail,link
2023.05.02,News,새 연구실,New lab,,Moved to a new building,news/lab.md,
2024.11.20,award,최우수 논문상,Best Paper,,,,https://chi.acm.org
TBA,News,예정,Upcoming,,,,
,News,날짜 없음,Undated,,,,
2024.01.08,Award,학생 수상,Student award,,,news/award.md,#
";

    fn news() -> Vec<NewsItem> {
        NewsItem::from_table(&CsvParser::new().parse(CSV))
    }

    #[test]
    fn test_sorted_by_date_with_unparseable_last() {
        let items = news();
        let page = run(&items, &Query::for_entry::<NewsItem>(5));
        let titles: Vec<&str> = page.items.iter().map(|n| n.title_en.as_str()).collect();
        assert_eq!(titles, vec!["Best Paper", "Student award", "New lab", "Upcoming"]);
    }

    #[test]
    fn test_type_matching_ignores_case() {
        let items = news();
        let query = Query::for_entry::<NewsItem>(5).bucket(Bucket::tag("Award"));
        let page = run(&items, &query);
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn test_display() {
        let items = news();
        let item = items[0].display(Language::Kr);
        assert_eq!(item.title, "새 연구실");
        // Korean summary is empty, falls back to English
        assert_eq!(item.summary, "Moved to a new building");
        assert_eq!(item.meta, "2023.05.02");
        assert_eq!(item.detail_path.as_deref(), Some("news/lab.md"));
        assert!(item.links.is_empty());

        assert_eq!(items[4].link, None);
        assert_eq!(items[0].year(), Some(2023));
    }
}
