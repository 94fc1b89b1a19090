//! Current-entry resolution.
//!
//! Picks the single entry considered "this week's":
//!
//! 1. An explicit date selector (`?date=YYYY-MM-DD` or a trailing
//!    `/YYYY-MM-DD/` path segment) that matches an entry switches to
//!    single-entry mode.
//! 2. Otherwise the entry dated on the nearest Friday on or before today.
//!
//! Resolution never mutates the feed; the single-entry view is a new slice.

use crate::feed::{Entry, Feed};
use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static DATE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// How the gallery is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Full card grid with search.
    All,
    /// Only the selected entry, search hidden, "view all" link shown.
    Single,
}

/// Outcome of resolving the current entry.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// The active entry, if any.
    pub current: Option<&'a Entry>,
    pub mode: ViewMode,
    /// Entries the page shows before any search filtering.
    pub view: Vec<&'a Entry>,
}

impl Resolution<'_> {
    pub fn is_single(&self) -> bool {
        self.mode == ViewMode::Single
    }
}

/// Extract a date selector from a request URL or path.
///
/// Accepts absolute URLs and origin-relative forms (`/2024-11-08/`,
/// `/2024-11-08/index.html`, `/?date=2024-11-08`). The `date` query
/// parameter wins over the path.
pub fn date_selector(raw_url: &str) -> Option<NaiveDate> {
    let base = url::Url::parse("http://localhost/").ok()?;
    let parsed = base.join(raw_url).ok()?;

    let from_query = parsed
        .query_pairs()
        .find(|(key, _)| key == "date")
        .and_then(|(_, value)| parse_iso(&value));
    if from_query.is_some() {
        return from_query;
    }

    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty() && *segment != "index.html")
        .last()
        .and_then(parse_iso)
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !DATE_SEGMENT.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Nearest Friday on or before `today`.
pub fn nearest_friday(today: NaiveDate) -> NaiveDate {
    let day = i64::from(today.weekday().num_days_from_sunday());
    today - Duration::days((day + 2) % 7)
}

/// Resolve the current entry and the entries to display.
pub fn resolve(feed: &Feed, selector: Option<NaiveDate>, today: NaiveDate) -> Resolution<'_> {
    if let Some(entry) = selector.and_then(|date| feed.get(date)) {
        return Resolution {
            current: Some(entry),
            mode: ViewMode::Single,
            view: vec![entry],
        };
    }

    Resolution {
        current: feed.get(nearest_friday(today)),
        mode: ViewMode::All,
        view: feed.entries().iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn feed() -> Feed {
        Feed::from_entries(vec![
            Entry::new(ymd(2024, 11, 1), "Intro to caching", None, None),
            Entry::new(ymd(2024, 11, 8), "Load balancing basics", None, None),
        ])
        .unwrap()
    }

    #[test]
    fn test_nearest_friday_every_weekday() {
        // 2024-11-08 is a Friday
        let friday = ymd(2024, 11, 8);
        assert_eq!(nearest_friday(friday), friday);
        assert_eq!(nearest_friday(ymd(2024, 11, 9)), friday); // Saturday
        assert_eq!(nearest_friday(ymd(2024, 11, 10)), friday); // Sunday
        assert_eq!(nearest_friday(ymd(2024, 11, 11)), friday); // Monday
        assert_eq!(nearest_friday(ymd(2024, 11, 14)), friday); // Thursday
        assert_eq!(nearest_friday(ymd(2024, 11, 15)), ymd(2024, 11, 15));
        assert_eq!(nearest_friday(ymd(2024, 11, 7)), ymd(2024, 11, 1));
    }

    #[test]
    fn test_nearest_friday_crosses_year() {
        assert_eq!(nearest_friday(ymd(2025, 1, 2)), ymd(2024, 12, 27));
    }

    #[test]
    fn test_resolve_friday_rule_without_selector() {
        let feed = feed();
        let res = resolve(&feed, None, ymd(2024, 11, 8));
        assert_eq!(res.current.map(Entry::date_str).as_deref(), Some("2024-11-08"));
        assert_eq!(res.mode, ViewMode::All);
        assert_eq!(res.view.len(), 2);
    }

    #[test]
    fn test_resolve_friday_rule_midweek() {
        let feed = feed();
        let res = resolve(&feed, None, ymd(2024, 11, 6));
        assert_eq!(res.current.map(Entry::date_str).as_deref(), Some("2024-11-01"));
    }

    #[test]
    fn test_resolve_no_entry_on_friday() {
        let feed = feed();
        let res = resolve(&feed, None, ymd(2024, 11, 20));
        assert!(res.current.is_none());
        assert_eq!(res.view.len(), 2);
    }

    #[test]
    fn test_resolve_selector_single_mode() {
        let feed = feed();
        let res = resolve(&feed, Some(ymd(2024, 11, 1)), ymd(2024, 11, 8));
        assert!(res.is_single());
        assert_eq!(res.view.len(), 1);
        assert_eq!(res.current.unwrap().description(), "Intro to caching");
        // The feed itself is untouched
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_resolve_unknown_selector_falls_back() {
        let feed = feed();
        let res = resolve(&feed, Some(ymd(2023, 1, 6)), ymd(2024, 11, 8));
        assert_eq!(res.mode, ViewMode::All);
        assert_eq!(res.current.map(Entry::date_str).as_deref(), Some("2024-11-08"));
    }

    #[test]
    fn test_date_selector_forms() {
        let date = Some(ymd(2024, 11, 8));
        assert_eq!(date_selector("/?date=2024-11-08"), date);
        assert_eq!(date_selector("/2024-11-08/"), date);
        assert_eq!(date_selector("/pildoras/2024-11-08"), date);
        assert_eq!(date_selector("https://example.org/p/2024-11-08/"), date);
        assert_eq!(date_selector("/2024-11-01/?date=2024-11-08"), date);
        assert_eq!(date_selector("/?q=cach&date=2024-11-08"), date);
    }

    #[test]
    fn test_date_selector_entry_page_file() {
        let date = Some(ymd(2024, 11, 8));
        assert_eq!(date_selector("/2024-11-08/index.html"), date);
        assert_eq!(date_selector("https://example.org/p/2024-11-08/index.html"), date);
        assert_eq!(date_selector("/index.html"), None);
    }

    #[test]
    fn test_date_selector_rejects_non_dates() {
        assert_eq!(date_selector("/"), None);
        assert_eq!(date_selector("/images/lb.png"), None);
        assert_eq!(date_selector("/?date=mañana"), None);
        assert_eq!(date_selector("/2024-13-40/"), None);
        assert_eq!(date_selector("/?date=2024-1-8"), None);
    }
}
