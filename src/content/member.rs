//! Lab members from `data/members.csv`.

use serde::Serialize;

use crate::content::{optional, Content, DisplayItem, Link, Section};
use crate::csv::Record;
use crate::lang::Language;
use crate::pipeline::{Bucket, Entry, Matching, SortRule};
use crate::utils::{leading_year, normalize_link};

/// Link columns of the member table, in display order.
pub const LINK_KEYS: &[&str] = &[
    "email",
    "website",
    "github",
    "linkedin",
    "instagram",
    "facebook",
    "thread",
    "google scholar",
    "dblp",
    "orcid",
];

const ALUMNI_PREFIX: &str = "Alumni-";

/// One person on the member pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Position, from the `Type` column (`Ph.D.`, `Alumni-M.S.`, `Supporter`, ...)
    pub kind: String,
    pub name_kr: String,
    pub name_en: String,
    /// Graduation year for alumni
    pub year: String,
    /// Current affiliation for alumni
    pub current: Option<String>,
    pub image: Option<String>,
    pub interest_kr: String,
    pub interest_en: String,
    pub intro_kr: String,
    pub intro_en: String,
    /// Non-blank link columns as `(column, raw value)`
    pub links: Vec<(String, String)>,
}

impl Member {
    pub fn is_alumni(&self) -> bool {
        self.kind.starts_with(ALUMNI_PREFIX)
    }

    /// Display name in `lang`, falling back to the English name.
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_kr, &self.name_en)
    }

    fn display_links(&self) -> Vec<Link> {
        self.links
            .iter()
            .filter_map(|(key, value)| {
                normalize_link(key, value).map(|href| Link {
                    label: key.clone(),
                    href,
                })
            })
            .collect()
    }
}

impl Entry for Member {
    const MATCHING: Matching = Matching::Exact;
    const SORT: SortRule = SortRule::SourceOrder;

    fn tag(&self) -> &str {
        &self.kind
    }

    fn is_listed(&self) -> bool {
        !self.name_kr.trim().is_empty() || !self.name_en.trim().is_empty()
    }

    fn year(&self) -> Option<i32> {
        leading_year(&self.year)
    }
}

impl Content for Member {
    fn from_record(record: &Record) -> Self {
        Self {
            kind: record.field("Type").to_string(),
            name_kr: record.field("name_kr").to_string(),
            name_en: record.field("name_en").to_string(),
            year: record.field("year").to_string(),
            current: optional(record, "current"),
            image: optional(record, "image"),
            interest_kr: record.field("interest_kr").to_string(),
            interest_en: record.field("interest_en").to_string(),
            intro_kr: record.field("intro_kr").to_string(),
            intro_en: record.field("intro_en").to_string(),
            links: LINK_KEYS
                .iter()
                .filter_map(|&key| record.non_empty(key).map(|v| (key.to_string(), v.to_string())))
                .collect(),
        }
    }

    fn display(&self, lang: Language) -> DisplayItem {
        let title = self.name(lang).to_string();
        let links = self.display_links();

        if self.is_alumni() {
            return DisplayItem {
                title,
                summary: self.current.clone().unwrap_or_default(),
                meta: self.year.clone(),
                links,
                ..Default::default()
            };
        }

        let intro = lang.pick(&self.intro_kr, &self.intro_en);
        DisplayItem {
            title,
            summary: lang.pick(&self.interest_kr, &self.interest_en).to_string(),
            body: (!intro.trim().is_empty()).then(|| intro.to_string()),
            image: self.image.clone(),
            links,
            ..Default::default()
        }
    }
}

/// The member pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPage {
    Students,
    Alumni,
    Supporters,
}

impl MemberPage {
    /// Sections of this page, in display order.
    pub fn sections(self) -> Vec<Section> {
        match self {
            MemberPage::Students => vec![
                Section::new("박사 후과정", "Post-Doc", Bucket::tag("Post-Doc")),
                Section::new("박사 과정", "Ph.D. Students", Bucket::tag("Ph.D.")),
                Section::new("석사 과정", "Master's Students", Bucket::tag("M.S.")),
                Section::new("학부 연구생", "Undergraduate Interns", Bucket::tag("Undergraduate")),
            ],
            MemberPage::Alumni => vec![
                Section::new("Ph.D.", "Ph.D.", Bucket::tag("Alumni-Ph.D.")),
                Section::new("M.S.", "M.S.", Bucket::tag("Alumni-M.S.")),
                Section::new("B.S.", "B.S.", Bucket::tag("Alumni-Undergraduate")),
            ],
            MemberPage::Supporters => vec![Section::new("", "", Bucket::tag("Supporter"))],
        }
    }
}
