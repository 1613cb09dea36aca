//! Filter, sort and paginate pipeline shared by all content types.
//!
//! The pipeline works on any typed [`Entry`]. A [`Query`] names the bucket to show,
//! an optional year range, the sort rule and the requested page; [`run`] returns the
//! matching [`Page`].
//!
//! ```
//! use labsite::content::{Content, Publication};
//! use labsite::csv::CsvParser;
//! use labsite::pipeline::{run, Bucket, Query, SortRule};
//!
//! let table = CsvParser::new().parse(
//!     "type,title,year\nJournal,A,2021\nConference,B,2019\nJournal,C,2023\n",
//! );
//! let publications = Publication::from_table(&table);
//!
//! let query = Query::new(SortRule::YearDescending, 10).bucket(Bucket::tag("Journal"));
//! let page = run(&publications, &query);
//! let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
//! assert_eq!(titles, vec!["C", "A"]);
//! assert_eq!(page.total_pages, 1);
//! ```

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// How a bucket tag is compared with an entry's designated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    Exact,
    IgnoreCase,
}

impl Matching {
    pub fn matches(self, value: &str, tag: &str) -> bool {
        let value = value.trim();
        match self {
            Matching::Exact => value == tag,
            Matching::IgnoreCase => value.to_lowercase() == tag.to_lowercase(),
        }
    }
}

/// A named filter partition of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// Every listed entry, including ones whose tag matches no named bucket.
    #[default]
    All,
    /// Entries whose designated field equals the tag.
    Tag(String),
}

impl Bucket {
    pub fn tag<S: Into<String>>(tag: S) -> Self {
        Bucket::Tag(tag.into())
    }

    pub fn contains<T: Entry + ?Sized>(&self, entry: &T) -> bool {
        match self {
            Bucket::All => true,
            Bucket::Tag(tag) => T::MATCHING.matches(entry.tag(), tag),
        }
    }
}

/// Inclusive year bounds; an open side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl YearRange {
    pub fn from(min: i32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn until(max: i32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Entries without a year are outside every range.
    pub fn contains(&self, year: Option<i32>) -> bool {
        year.is_some_and(|year| {
            self.min.is_none_or(|min| year >= min) && self.max.is_none_or(|max| year <= max)
        })
    }
}

/// Ordering rules used by the content types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortRule {
    /// Keep file order.
    #[default]
    SourceOrder,
    /// Numeric year, most recent first.
    YearDescending,
    /// Calendar date, most recent first.
    DateDescending,
    /// Ongoing entries first, each group by start date, most recent first.
    OngoingFirst,
}

impl SortRule {
    /// Sort key of `entry` under this rule. Larger keys sort first.
    pub fn key<T: Entry + ?Sized>(self, entry: &T) -> SortKey {
        match self {
            SortRule::SourceOrder => SortKey::Unordered,
            SortRule::YearDescending => SortKey::Year(entry.year()),
            SortRule::DateDescending => SortKey::Date(entry.date()),
            SortRule::OngoingFirst => SortKey::Span {
                ongoing: entry.is_ongoing(),
                start: entry.start(),
            },
        }
    }
}

/// Comparable sort key. `None` compares below every value, so entries with an
/// unparseable year or date end up after all valid ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Unordered,
    Year(Option<i32>),
    Date(Option<NaiveDate>),
    Span {
        ongoing: bool,
        start: Option<NaiveDate>,
    },
}

/// A typed record the pipeline can filter and sort.
pub trait Entry {
    /// How [`Bucket::Tag`] compares against [`Entry::tag`].
    const MATCHING: Matching;
    /// Sort rule the content type is shown with.
    const SORT: SortRule;

    /// Value of the designated bucket field (`type`, `Type` or `status`).
    fn tag(&self) -> &str;

    /// False when a required field is empty; such entries are never shown.
    fn is_listed(&self) -> bool {
        true
    }

    fn year(&self) -> Option<i32> {
        None
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    fn is_ongoing(&self) -> bool {
        false
    }

    fn start(&self) -> Option<NaiveDate> {
        None
    }
}

/// A page request against a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub bucket: Bucket,
    pub years: Option<YearRange>,
    pub sort: SortRule,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Query {
    /// First page of the `All` bucket.
    pub fn new(sort: SortRule, page_size: usize) -> Self {
        Self {
            bucket: Bucket::All,
            years: None,
            sort,
            page: 1,
            page_size,
        }
    }

    /// Query using the entry type's own sort rule.
    pub fn for_entry<T: Entry>(page_size: usize) -> Self {
        Self::new(T::SORT, page_size)
    }

    #[must_use]
    pub fn bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    #[must_use]
    pub fn years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    #[must_use]
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// A bounded slice of a filtered, sorted sequence plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub number: usize,
    /// `ceil(total_items / page_size)`; zero when nothing matched.
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// True when the filter matched nothing ("no results").
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Navigation state for this page, or `None` in the "no results" state.
    pub fn navigation(&self) -> Option<Navigation> {
        (!self.is_empty()).then(|| Navigation::new(self.number, self.total_pages))
    }
}

/// Navigation primitives of a paginated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
}

/// Target page of a navigation control and whether it is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavTarget {
    pub page: usize,
    pub enabled: bool,
}

/// Pagination controls for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub current: usize,
    pub total: usize,
    pub first: NavTarget,
    pub previous: NavTarget,
    pub next: NavTarget,
    pub last: NavTarget,
}

impl Navigation {
    pub fn new(current: usize, total: usize) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);
        let back = current > 1;
        let forward = current < total;
        Self {
            current,
            total,
            first: NavTarget {
                page: 1,
                enabled: back,
            },
            previous: NavTarget {
                page: current.saturating_sub(1).max(1),
                enabled: back,
            },
            next: NavTarget {
                page: (current + 1).min(total),
                enabled: forward,
            },
            last: NavTarget {
                page: total,
                enabled: forward,
            },
        }
    }

    /// The page `action` leads to, or `None` when its control is disabled.
    pub fn target(&self, action: NavAction) -> Option<usize> {
        let target = match action {
            NavAction::First => self.first,
            NavAction::Previous => self.previous,
            NavAction::Next => self.next,
            NavAction::Last => self.last,
        };
        target.enabled.then_some(target.page)
    }

    /// Whether `page` is a page this view can show.
    pub fn is_valid(&self, page: usize) -> bool {
        (1..=self.total).contains(&page)
    }
}

/// Runs filter, sort and paginate over `items`.
pub fn run<'a, T: Entry>(items: &'a [T], query: &Query) -> Page<&'a T> {
    let mut selected = filter(items, &query.bucket, query.years);
    sort(&mut selected, query.sort);
    paginate(&selected, query.page, query.page_size)
}

/// Keeps the listed entries that fall in `bucket` and, when given, in `years`.
pub fn filter<'a, T: Entry>(
    items: &'a [T],
    bucket: &Bucket,
    years: Option<YearRange>,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|entry| entry.is_listed())
        .filter(|entry| bucket.contains(*entry))
        .filter(|entry| years.is_none_or(|range| range.contains(entry.year())))
        .collect()
}

/// Stable descending sort by `rule`; ties keep their relative order.
pub fn sort<T: Entry>(items: &mut [&T], rule: SortRule) {
    if rule == SortRule::SourceOrder {
        return;
    }
    items.sort_by_cached_key(|entry| Reverse(rule.key(*entry)));
}

/// Slices page `page` (1-based) of `page_size` items out of `items`.
///
/// Out-of-range requests are not clamped: they return an empty item list with the
/// metadata of the full sequence. A `page_size` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let selected = if page == 0 || start >= total_items {
        Vec::new()
    } else {
        let end = (start + page_size).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: selected,
        number: page,
        total_pages,
        total_items,
        page_size,
    }
}

/// Groups consecutive entries of an already sorted sequence by year.
pub fn group_by_year<'a, T: Entry>(items: &[&'a T]) -> Vec<(Option<i32>, Vec<&'a T>)> {
    let chunks = items.iter().chunk_by(|entry| entry.year());
    let groups = chunks
        .into_iter()
        .map(|(year, group)| (year, group.copied().collect()))
        .collect();
    groups
}
