//! Paginated list views.
//!
//! A [`ListController`] owns the parsed table of one collection and the state of the
//! view showing it. The table is fetched and parsed once; every later change of page,
//! bucket or language re-renders from the cached entries.
//!
//! ```text
//! Idle --load--> Loading --ok--> Ready(1) --event--> Ready(n)
//!                        \--err--> Error
//! ```
//!
//! # Example
//!
//! ```
//! use labsite::config::SiteConfig;
//! use labsite::content::{ContentKind, NewsItem};
//! use labsite::fetch::MapFetcher;
//! use labsite::view::{ListController, Rendered, ViewEvent};
//!
//! let fetcher = MapFetcher::new().with(
//!     "data/news.csv",
//!     "date,type,title_kr,title_en\n2024.03.02,News,개소,Opening\n",
//! );
//!
//! let mut view: ListController<NewsItem> = ListController::new(ContentKind::News, &SiteConfig::new());
//! view.load(&fetcher).unwrap();
//!
//! match view.render() {
//!     Rendered::Items { items, navigation } => {
//!         assert_eq!(items[0].title, "개소");
//!         assert_eq!(navigation.total, 1);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(!view.dispatch(ViewEvent::Next));
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::content::{Content, ContentKind, DisplayItem};
use crate::csv::{CsvParser, Table};
use crate::fetch::{FetchError, ResourceFetcher};
use crate::lang::{Language, PreferenceStore};
use crate::pipeline::{run, Bucket, NavAction, Navigation, Page, Query, YearRange};
use crate::{Result, SiteError};

/// Parsed table of a view together with its typed entries.
///
/// Filled at most once; afterwards it is only read.
#[derive(Debug, Clone)]
pub struct TableCache<T> {
    table: Option<Table>,
    entries: Vec<T>,
}

impl<T> Default for TableCache<T> {
    fn default() -> Self {
        Self {
            table: None,
            entries: Vec::new(),
        }
    }
}

impl<T: Content> TableCache<T> {
    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Stores `table` and converts its records. Ignored when already filled.
    fn fill(&mut self, table: Table) {
        if self.is_loaded() {
            return;
        }
        self.entries = T::from_table(&table);
        self.table = Some(table);
    }
}

/// Lifecycle of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading,
    /// Showing `page` (1-based) of the current query.
    Ready { page: usize },
    /// The table could not be fetched. Terminal: there is no retry.
    Error { message: String },
}

/// User interaction with a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    PageChanged(usize),
    First,
    Previous,
    Next,
    Last,
    /// Switches the filter and returns to page 1.
    BucketChanged(Bucket),
    LanguageChanged(Language),
}

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rendered {
    Loading,
    Error { message: String },
    NoResults { message: String },
    Items {
        items: Vec<DisplayItem>,
        navigation: Navigation,
    },
}

/// Controller of one paginated collection view.
#[derive(Debug, Clone)]
pub struct ListController<T> {
    kind: ContentKind,
    path: String,
    parser: CsvParser,
    page_size: usize,
    cache: TableCache<T>,
    bucket: Bucket,
    years: Option<YearRange>,
    lang: Language,
    state: ViewState,
}

impl<T: Content> ListController<T> {
    /// Creates an idle view of `kind` using the paths and page size of `config`.
    pub fn new(kind: ContentKind, config: &SiteConfig) -> Self {
        Self {
            kind,
            path: kind.path(config),
            parser: CsvParser::new().with_config(config.csv().clone()),
            page_size: config.page_size(kind),
            cache: TableCache::default(),
            bucket: Bucket::All,
            years: None,
            lang: Language::default(),
            state: ViewState::Idle,
        }
    }

    #[must_use]
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    #[must_use]
    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    #[must_use]
    pub fn with_language(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Site-relative path of the table this view shows.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn cache(&self) -> &TableCache<T> {
        &self.cache
    }

    /// Fetches and parses the table, unless that has already happened.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Fetch`] when the fetch fails. The view then stays in
    /// [`ViewState::Error`] and later calls do nothing.
    pub fn load<F: ResourceFetcher + ?Sized>(&mut self, fetcher: &F) -> Result<()> {
        match self.begin_load() {
            Some(path) => {
                let result = fetcher.fetch(&path);
                self.finish_load(result)
            }
            None => Ok(()),
        }
    }

    /// Moves an idle view to [`ViewState::Loading`] and returns the path to fetch.
    ///
    /// Returns `None` when the view is loading, loaded or failed. Hosts that fetch
    /// asynchronously call this, then [`finish_load`](Self::finish_load) with the
    /// outcome.
    pub fn begin_load(&mut self) -> Option<String> {
        if self.state != ViewState::Idle {
            debug!(path = %self.path, state = ?self.state, "skipping load");
            return None;
        }
        self.state = ViewState::Loading;
        Some(self.path.clone())
    }

    /// Completes a load started by [`begin_load`](Self::begin_load).
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Fetch`] carrying the fetch failure.
    pub fn finish_load(&mut self, result: std::result::Result<String, FetchError>) -> Result<()> {
        if self.state != ViewState::Loading {
            debug!(path = %self.path, "ignoring load result outside of loading state");
            return Ok(());
        }
        match result {
            Ok(text) => {
                let table = self.parser.parse(&text);
                self.cache.fill(table);
                debug!(path = %self.path, entries = self.cache.entries().len(), "table cached");
                self.state = ViewState::Ready { page: 1 };
                Ok(())
            }
            Err(source) => {
                warn!(path = %self.path, error = %source, "failed to load table");
                self.state = ViewState::Error {
                    message: source.to_string(),
                };
                Err(SiteError::Fetch {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// The query for the current bucket, year range and page.
    pub fn query(&self) -> Query {
        let page = match self.state {
            ViewState::Ready { page } => page,
            _ => 1,
        };
        let query = Query::for_entry::<T>(self.page_size)
            .bucket(self.bucket.clone())
            .page(page);
        match self.years {
            Some(years) => query.years(years),
            None => query,
        }
    }

    /// The current page, once the table is loaded.
    pub fn page(&self) -> Option<Page<&T>> {
        matches!(self.state, ViewState::Ready { .. })
            .then(|| run(self.cache.entries(), &self.query()))
    }

    /// Applies `event`. Returns true when the view has to be re-rendered.
    ///
    /// Page events that point outside the current page range, or whose control is
    /// disabled, are ignored.
    pub fn dispatch(&mut self, event: ViewEvent) -> bool {
        match event {
            ViewEvent::LanguageChanged(lang) => {
                let changed = self.lang != lang;
                self.lang = lang;
                changed
            }
            ViewEvent::BucketChanged(bucket) => {
                self.bucket = bucket;
                if let ViewState::Ready { page } = &mut self.state {
                    *page = 1;
                }
                true
            }
            ViewEvent::PageChanged(page) => self.go_to(|nav| nav.is_valid(page).then_some(page)),
            ViewEvent::First => self.go_to(|nav| nav.target(NavAction::First)),
            ViewEvent::Previous => self.go_to(|nav| nav.target(NavAction::Previous)),
            ViewEvent::Next => self.go_to(|nav| nav.target(NavAction::Next)),
            ViewEvent::Last => self.go_to(|nav| nav.target(NavAction::Last)),
        }
    }

    /// Switches the view to `lang` and stores it as the preferred language.
    ///
    /// The preference is written on every call, even when the view already shows
    /// `lang`. Returns true when the view has to be re-rendered.
    pub fn change_language<S: PreferenceStore + ?Sized>(
        &mut self,
        lang: Language,
        store: &mut S,
    ) -> bool {
        lang.save(store);
        self.dispatch(ViewEvent::LanguageChanged(lang))
    }

    /// Flips between Korean and English, persisting the choice.
    pub fn toggle_language<S: PreferenceStore + ?Sized>(&mut self, store: &mut S) -> Language {
        let lang = self.lang.toggled();
        self.change_language(lang, store);
        lang
    }

    fn go_to<N: FnOnce(&Navigation) -> Option<usize>>(&mut self, target: N) -> bool {
        let Some(navigation) = self.page().and_then(|page| page.navigation()) else {
            return false;
        };
        match target(&navigation) {
            Some(page) if page != navigation.current => {
                debug!(path = %self.path, from = navigation.current, to = page, "page changed");
                self.state = ViewState::Ready { page };
                true
            }
            Some(_) => false,
            None => {
                debug!(path = %self.path, current = navigation.current, "ignoring navigation");
                false
            }
        }
    }

    /// Render instructions for the current state in the current language.
    pub fn render(&self) -> Rendered {
        let lang = self.lang;
        match &self.state {
            ViewState::Idle | ViewState::Loading => Rendered::Loading,
            ViewState::Error { .. } => Rendered::Error {
                message: lang
                    .label("데이터를 불러오지 못했습니다.", "Error loading data.")
                    .to_string(),
            },
            ViewState::Ready { .. } => {
                let Some(page) = self.page() else {
                    return Rendered::Loading;
                };
                match page.navigation() {
                    Some(navigation) => Rendered::Items {
                        items: page.items.iter().map(|entry| entry.display(lang)).collect(),
                        navigation,
                    },
                    None => Rendered::NoResults {
                        message: lang.label("표시할 항목이 없습니다.", "No items found.").to_string(),
                    },
                }
            }
        }
    }
}
