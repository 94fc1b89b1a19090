//! Link-preview metadata.
//!
//! Rewrites the `og:*` / `twitter:*` / `description` meta tags of an HTML
//! shell with the current entry's fields. Tags missing from the shell are
//! skipped one by one; nothing here fails. `<title>` and the canonical link
//! belong to the page itself and are left alone.

use crate::config::SiteConfig;
use crate::debug;
use crate::feed::Entry;
use crate::share::share_url;
use crate::utils::html::escape_attr;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `<meta property|name="KEY" content="...">`
static META_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+(?:property|name)="([^"]+)"\s+content="[^"]*"\s*/?>"#).unwrap()
});

/// Preview values for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMeta {
    pub title: String,
    /// First line of the description.
    pub description: String,
    /// Absolute image URL, when the entry has an image.
    pub image: Option<String>,
    /// Canonical share URL.
    pub url: String,
}

impl PreviewMeta {
    pub fn for_entry(entry: &Entry, config: &SiteConfig) -> Self {
        let date = entry.date_str();
        let base_url = config.base_url();
        Self {
            title: config.site.entry_title(&date),
            description: entry.summary().to_string(),
            image: entry.image().map(|image| format!("{base_url}images/{image}")),
            url: share_url(&base_url, config.build.routing, &date),
        }
    }

    fn value_for(&self, key: &str) -> Option<&str> {
        match key {
            "og:title" | "twitter:title" => Some(&self.title),
            "og:description" | "twitter:description" | "description" => Some(&self.description),
            "og:image" | "twitter:image" => self.image.as_deref(),
            "og:url" => Some(&self.url),
            _ => None,
        }
    }
}

/// Apply the current entry's metadata to `html`. No entry, no change.
pub fn update(html: &str, entry: Option<&Entry>, config: &SiteConfig) -> String {
    match entry {
        Some(entry) => apply(html, &PreviewMeta::for_entry(entry, config)),
        None => html.to_string(),
    }
}

/// Rewrite every known tag present in `html` with `meta`.
pub fn apply(html: &str, meta: &PreviewMeta) -> String {
    let mut seen = Vec::new();
    let html = META_TAG.replace_all(html, |caps: &Captures| {
        let key = &caps[1];
        match meta.value_for(key) {
            Some(value) => {
                seen.push(key.to_string());
                let prefix = if caps[0].contains("property=") { "property" } else { "name" };
                format!(r#"<meta {prefix}="{key}" content="{}">"#, escape_attr(value))
            }
            None => caps[0].to_string(),
        }
    });

    for key in ["og:title", "og:description", "og:url"] {
        if !seen.iter().any(|k| k == key) {
            debug!("meta"; "no {key} tag, skipped");
        }
    }

    html.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use chrono::NaiveDate;

    const SHELL: &str = r#"<head>
<meta property="og:title" content="Píldoras del Viernes">
<meta property="og:description" content="Una píldora formativa cada viernes">
<meta property="og:image" content="">
<meta property="og:url" content="https://pildoras.example.org/">
<meta name="twitter:card" content="summary_large_image">
<title>Píldoras del Viernes</title>
<link rel="canonical" href="https://pildoras.example.org/">
</head>"#;

    fn entry(image: Option<&str>) -> Entry {
        Entry::new(
            NaiveDate::from_ymd_opt(2024, 11, 8).unwrap(),
            "Load <balancing> & \"basics\"\nsecond line",
            None,
            image.map(Into::into),
        )
    }

    #[test]
    fn test_update_sets_all_tags() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        let html = update(SHELL, Some(&entry(Some("lb.png"))), &config);

        assert!(html.contains(r#"<meta property="og:title" content="Píldora Formativa del 2024-11-08">"#));
        assert!(html.contains(
            r#"<meta property="og:description" content="Load &lt;balancing&gt; &amp; &quot;basics&quot;">"#
        ));
        assert!(html.contains(
            r#"<meta property="og:image" content="https://pildoras.example.org/images/lb.png">"#
        ));
        assert!(html.contains(
            r#"<meta property="og:url" content="https://pildoras.example.org/2024-11-08/">"#
        ));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains("<title>Píldoras del Viernes</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://pildoras.example.org/">"#));
        assert!(!html.contains("second line"));
    }

    #[test]
    fn test_update_without_entry_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        assert_eq!(update(SHELL, None, &config), SHELL);
    }

    #[test]
    fn test_missing_tags_skipped() {
        let meta = PreviewMeta {
            title: "T".into(),
            description: "D".into(),
            image: None,
            url: "https://x/".into(),
        };
        let shell = "<head><meta property=\"og:image\" content=\"keep\"><meta property=\"og:title\" content=\"\"></head>";
        let html = apply(shell, &meta);
        assert_eq!(
            html,
            "<head><meta property=\"og:image\" content=\"keep\"><meta property=\"og:title\" content=\"T\"></head>"
        );
    }

    #[test]
    fn test_dollar_signs_are_literal() {
        let meta = PreviewMeta {
            title: "Cost $1 and $2".into(),
            description: "$0".into(),
            image: None,
            url: "https://x/".into(),
        };
        let html = apply(SHELL, &meta);
        assert!(html.contains(r#"content="Cost $1 and $2""#));
        assert!(html.contains(r#"content="$0""#));
    }
}
