//! Language selection and the persisted language preference.
//!
//! The site shows every text in Korean or English. The active [`Language`] is kept
//! in a [`PreferenceStore`] under [`PREFERENCE_KEY`] so it survives page loads.
//!
//! # Example
//!
//! ```
//! use labsite::lang::{Language, MemoryPreferenceStore};
//!
//! let mut store = MemoryPreferenceStore::default();
//! assert_eq!(Language::load(&store), Language::Kr);
//!
//! Language::En.save(&mut store);
//! assert_eq!(Language::load(&store), Language::En);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Key under which the preferred language is stored.
pub const PREFERENCE_KEY: &str = "preferred-lang";

const KR_MARKER: &str = "<!-- KR -->";
const EN_MARKER: &str = "<!-- EN -->";

/// Display language of the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Kr,
    En,
}

impl Language {
    /// Stored code: `"kr"` or `"en"`.
    pub fn code(self) -> &'static str {
        match self {
            Language::Kr => "kr",
            Language::En => "en",
        }
    }

    /// Reads the preferred language, defaulting to Korean when unset or unrecognised.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        store
            .get(PREFERENCE_KEY)
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }

    /// Persists this language as the preferred one.
    pub fn save<S: PreferenceStore + ?Sized>(self, store: &mut S) {
        store.set(PREFERENCE_KEY, self.code());
    }

    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Language::Kr => Language::En,
            Language::En => Language::Kr,
        }
    }

    /// Picks the text for this language.
    ///
    /// Korean falls back to the English text when the Korean one is blank; English
    /// is always used as-is.
    pub fn pick<'a>(self, kr: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Kr if !kr.trim().is_empty() => kr,
            _ => en,
        }
    }

    /// Picks between two fixed labels without fallback.
    pub fn label(self, kr: &'static str, en: &'static str) -> &'static str {
        match self {
            Language::Kr => kr,
            Language::En => en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kr" | "ko" => Ok(Language::Kr),
            "en" => Ok(Language::En),
            other => Err(format!("unknown language code: {other}")),
        }
    }
}

/// A key-value store that survives across page loads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Selects the section of a bilingual Markdown document for `lang`.
///
/// Sections start at a `<!-- KR -->` or `<!-- EN -->` marker line and run until the
/// other marker or the end of the text. When the requested marker is absent the other
/// section is used; without any marker the whole text is returned.
///
/// ```
/// use labsite::lang::{select_section, Language};
///
/// let doc = "<!-- KR -->\n안녕하세요\n<!-- EN -->\nHello\n";
/// assert_eq!(select_section(doc, Language::En), "Hello");
/// assert_eq!(select_section(doc, Language::Kr), "안녕하세요");
/// ```
pub fn select_section(markdown: &str, lang: Language) -> &str {
    let kr = markdown.find(KR_MARKER);
    let en = markdown.find(EN_MARKER);

    let (start, marker_len) = match (lang, kr, en) {
        (Language::Kr, Some(at), _) | (Language::En, Some(at), None) => (at, KR_MARKER.len()),
        (Language::En, _, Some(at)) | (Language::Kr, None, Some(at)) => (at, EN_MARKER.len()),
        (_, None, None) => return markdown.trim(),
    };

    let body_start = start + marker_len;
    let body_end = [kr, en]
        .into_iter()
        .flatten()
        .filter(|&at| at > start)
        .min()
        .unwrap_or(markdown.len());
    markdown[body_start..body_end].trim()
}
