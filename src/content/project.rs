//! Projects and research topics from `data/project.csv` and `data/research.csv`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::content::{optional, Content, DisplayItem, Link};
use crate::csv::Record;
use crate::lang::Language;
use crate::pipeline::{Entry, Matching, SortRule};
use crate::utils::{is_blank_link, parse_date};

/// A funded project or research topic with a start and an optional end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectItem {
    /// `Ongoing` or `Completed`; matched case-insensitively
    pub status: String,
    pub title_kr: String,
    pub title_en: String,
    pub summary_kr: String,
    pub summary_en: String,
    pub agency_kr: String,
    pub agency_en: String,
    /// Raw start date cell (`2021.03`)
    pub start: String,
    /// Raw end date cell; blank while the project is running
    pub end: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub detail: Option<String>,
}

impl ProjectItem {
    /// `start ~ end`, with a localised "present" for ongoing work.
    pub fn period(&self, lang: Language) -> String {
        let start = self.start.trim();
        if start.is_empty() {
            return String::new();
        }
        let end = if self.is_ongoing() {
            lang.label("현재", "Present")
        } else {
            self.end.trim()
        };
        format!("{start} ~ {end}")
    }
}

impl Entry for ProjectItem {
    const MATCHING: Matching = Matching::IgnoreCase;
    const SORT: SortRule = SortRule::OngoingFirst;

    fn tag(&self) -> &str {
        &self.status
    }

    fn is_listed(&self) -> bool {
        !self.title_kr.trim().is_empty() || !self.title_en.trim().is_empty()
    }

    fn year(&self) -> Option<i32> {
        self.start().map(|date| date.year())
    }

    fn date(&self) -> Option<NaiveDate> {
        self.start()
    }

    fn is_ongoing(&self) -> bool {
        self.end.trim().is_empty()
    }

    fn start(&self) -> Option<NaiveDate> {
        parse_date(&self.start)
    }
}

impl Content for ProjectItem {
    fn from_record(record: &Record) -> Self {
        Self {
            status: record.field("status").to_string(),
            title_kr: record.field("title_kr").to_string(),
            title_en: record.field("title_en").to_string(),
            summary_kr: record.field("summary_kr").to_string(),
            summary_en: record.field("summary_en").to_string(),
            agency_kr: record.field("agency_kr").to_string(),
            agency_en: record.field("agency_en").to_string(),
            start: record.field("start").to_string(),
            end: record.field("end").to_string(),
            image: optional(record, "image"),
            link: record
                .get("link")
                .filter(|href| !is_blank_link(href))
                .map(|href| href.trim().to_string()),
            detail: optional(record, "detail"),
        }
    }

    fn display(&self, lang: Language) -> DisplayItem {
        let agency = lang.pick(&self.agency_kr, &self.agency_en);
        DisplayItem {
            title: lang.pick(&self.title_kr, &self.title_en).to_string(),
            summary: lang.pick(&self.summary_kr, &self.summary_en).to_string(),
            body: (!agency.trim().is_empty()).then(|| agency.to_string()),
            meta: self.period(lang),
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
status,title_kr,title_en,agency_kr,agency_en,start,end,detail
Completed,완료 과제,Finished,한국연구재단,NRF,2021.01,2022.01,projects/finished.md
Ongoing,진행 과제,Running,,IITP,2020.01,,
ongoing,신규 과제,New,,,2024.03,,
Completed,오래된 과제,Old,,,2018.03,2019.02,
,,,,,2017.01,,
";

    fn projects() -> Vec<ProjectItem> {
        ProjectItem::from_table(&CsvParser::new().parse(CSV))
    }

    #[test]
    fn test_ongoing_first_then_start_descending() {
        let items = projects();
        let page = run(&items, &Query::for_entry::<ProjectItem>(6));
        let titles: Vec<&str> = page.items.iter().map(|p| p.title_en.as_str()).collect();
        assert_eq!(titles, vec!["New", "Running", "Finished", "Old"]);
    }

    #[test]
    fn test_empty_end_is_ongoing() {
        let items = projects();
        assert!(!items[0].is_ongoing());
        assert!(items[1].is_ongoing());

        let pair = vec![items[0].clone(), items[1].clone()];
        let page = run(&pair, &Query::for_entry::<ProjectItem>(6));
        assert_eq!(page.items[0].title_en, "Running");
    }

    #[test]
    fn test_status_bucket() {
        let items = projects();
        let query = Query::for_entry::<ProjectItem>(6).bucket(Bucket::tag("Ongoing"));
        assert_eq!(run(&items, &query).total_items, 2);
    }

    #[test]
    fn test_display_period() {
        let items = projects();
        assert_eq!(items[1].display(Language::Kr).meta, "2020.01 ~ 현재");
        assert_eq!(items[1].display(Language::En).meta, "2020.01 ~ Present");
        assert_eq!(items[0].display(Language::En).meta, "2021.01 ~ 2022.01");

        let item = items[0].display(Language::Kr);
        assert_eq!(item.body.as_deref(), Some("한국연구재단"));
        assert_eq!(item.detail_path.as_deref(), Some("projects/finished.md"));
    }
}
