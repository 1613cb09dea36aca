//! Detail documents opened from a list entry.

use serde::Serialize;
use tracing::{debug, warn};

use crate::fetch::ResourceFetcher;
use crate::lang::{select_section, Language};

/// Turns Markdown into HTML. Supplied by the host.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

impl<F: Fn(&str) -> String> MarkdownRenderer for F {
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// Placeholder shown when a detail document cannot be loaded, in both languages.
pub const NOT_FOUND_MESSAGE: &str =
    "내용을 찾을 수 없습니다. / Content not found.";

/// Body of a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailContent {
    Html { html: String },
    NotFound { message: String },
}

/// Fetches the Markdown document at `path`, selects the section for `lang` and
/// renders it.
///
/// A failed fetch yields [`DetailContent::NotFound`]; it never affects the list the
/// document was opened from.
///
/// # Examples
///
/// ```
/// use labsite::detail::{load_detail, DetailContent};
/// use labsite::fetch::MapFetcher;
/// use labsite::lang::Language;
///
/// let fetcher = MapFetcher::new().with("news/a.md", "<!-- KR -->\n소식\n<!-- EN -->\nNews");
/// let render = |md: &str| format!("<p>{md}</p>");
///
/// let content = load_detail(&fetcher, &render, "news/a.md", Language::En);
/// assert_eq!(content, DetailContent::Html { html: "<p>News</p>".to_string() });
/// ```
pub fn load_detail<F, R>(fetcher: &F, renderer: &R, path: &str, lang: Language) -> DetailContent
where
    F: ResourceFetcher + ?Sized,
    R: MarkdownRenderer + ?Sized,
{
    match fetcher.fetch(path) {
        Ok(markdown) => {
            debug!(path, %lang, "rendering detail document");
            DetailContent::Html {
                html: renderer.render(select_section(&markdown, lang)),
            }
        }
        Err(err) => {
            warn!(path, error = %err, "failed to load detail document");
            DetailContent::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
            }
        }
    }
}
