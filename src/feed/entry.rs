//! A single píldora.

use chrono::NaiveDate;
use serde::Serialize;

/// One dated post. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(serialize_with = "serialize_date")]
    date: NaiveDate,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Entry {
    /// Blank `url`/`image` values are treated as absent.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        url: Option<String>,
        image: Option<String>,
    ) -> Self {
        let non_blank = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            date,
            description: description.into(),
            url: non_blank(url),
            image: non_blank(image),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// ISO `YYYY-MM-DD` form, the entry's key in URLs and searches.
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Image filename, relative to the images directory.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// First non-empty line of the description, trimmed.
    pub fn summary(&self) -> &str {
        self.description
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
    }
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 8).unwrap()
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let entry = Entry::new(date(), "x", Some("  ".into()), Some(String::new()));
        assert_eq!(entry.url(), None);
        assert_eq!(entry.image(), None);
    }

    #[test]
    fn test_summary_first_non_empty_line() {
        let entry = Entry::new(date(), "\n  Primera línea \nSegunda", None, None);
        assert_eq!(entry.summary(), "Primera línea");
        assert_eq!(Entry::new(date(), "", None, None).summary(), "");
    }

    #[test]
    fn test_serialize_uses_iso_date() {
        let entry = Entry::new(date(), "X", None, None);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"date":"2024-11-08","description":"X"}"#);
    }
}
