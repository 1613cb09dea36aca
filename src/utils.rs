use crate::regex::Regex;
use chrono::NaiveDate;
use std::sync::LazyLock;

static LEADING_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").unwrap());

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:\s*[.\-/]\s*(\d{1,2}))?(?:\s*[.\-/]\s*(\d{1,2}))?\s*\.?$").unwrap()
});

static EMPHASIS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// Extracts the leading digit run of a year field as a number.
///
/// Trailing annotations are ignored, so `"2024 [Just Accepted]"` yields `2024`.
///
/// # Arguments
///
/// * `year_str` - The raw year field
pub fn leading_year(year_str: &str) -> Option<i32> {
    LEADING_YEAR_REGEX
        .captures(year_str)
        .and_then(|caps| caps[1].parse().ok())
}

/// Parses a calendar date written as `YYYY`, `YYYY.MM` or `YYYY.MM.DD`.
///
/// `.`, `-` and `/` are accepted as separators and a trailing `.` is allowed.
/// Missing month or day default to 1. Returns `None` for anything else,
/// including out of range months and days.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let caps = DATE_REGEX.captures(date_str.trim())?;
    let year = caps[1].parse::<i32>().ok()?;
    let month = caps.get(2).map_or(Some(1), |m| m.as_str().parse::<u32>().ok())?;
    let day = caps.get(3).map_or(Some(1), |m| m.as_str().parse::<u32>().ok())?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Replaces `**Name**` author highlights with `<strong>Name</strong>`.
pub fn emphasize_authors(authors: &str) -> String {
    EMPHASIS_REGEX
        .replace_all(authors, "<strong>$1</strong>")
        .into_owned()
}

/// Returns true for link values that should not be shown: empty, whitespace or `#`.
pub fn is_blank_link(href: &str) -> bool {
    let href = href.trim();
    href.is_empty() || href == "#"
}

/// Turns a raw link cell into an `href`.
///
/// E-mail addresses get a `mailto:` prefix; other values without an `http` scheme
/// get `https://`.
///
/// # Arguments
///
/// * `key` - The column the value came from (`"email"`, `"github"`, ...)
/// * `value` - The raw cell value
pub fn normalize_link(key: &str, value: &str) -> Option<String> {
    if is_blank_link(value) {
        return None;
    }
    let value = value.trim();
    if key == "email" {
        if value.starts_with("mailto:") {
            return Some(value.to_string());
        }
        return Some(format!("mailto:{value}"));
    }
    if value.starts_with("http") {
        Some(value.to_string())
    } else {
        Some(format!("https://{value}"))
    }
}
