//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Píldoras del Viernes"
//! description = "Una píldora formativa cada viernes"
//! url = "https://pildoras.example.org/"
//! language = "es"
//! entry_title = "Píldora Formativa del {date}"
//! repository = "https://github.com/example/pildoras"
//! ```

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the entry date in `entry_title`.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Languages with a localized long date label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    /// BCP 47 code for `<html lang>`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

/// Site metadata used for page shells, link previews and feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title.
    pub title: String,

    /// Site description, used when no entry is current.
    pub description: String,

    /// Absolute site URL. Its path becomes the `<base href>`.
    pub url: Option<String>,

    /// Label language.
    pub language: Language,

    /// Title of a single entry's page, `{date}` is replaced by its ISO date.
    pub entry_title: String,

    /// Source repository, linked from the footer and the suggestion button.
    pub repository: Option<String>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: "Píldoras del Viernes".into(),
            description: "Una píldora formativa cada viernes".into(),
            url: None,
            language: Language::Es,
            entry_title: format!("Píldora Formativa del {DATE_PLACEHOLDER}"),
            repository: None,
        }
    }
}

impl SiteSectionConfig {
    /// Title for a single entry's page.
    pub fn entry_title(&self, date: &str) -> String {
        self.entry_title.replace(DATE_PLACEHOLDER, date)
    }

    /// Collect validation errors for this section.
    pub fn validate(&self, errors: &mut Vec<String>) {
        if !self.entry_title.contains(DATE_PLACEHOLDER) {
            errors.push(format!(
                "site.entry_title must contain {DATE_PLACEHOLDER}, got \"{}\"",
                self.entry_title
            ));
        }

        let Some(url_str) = &self.url else { return };
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    errors.push(format!(
                        "site.url scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ));
                }
                if parsed.host_str().is_none() {
                    errors.push("site.url must have a valid host".into());
                }
            }
            Err(e) => errors.push(format!("site.url is invalid: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.language, Language::Es);
        assert_eq!(config.site.entry_title("2024-11-08"), "Píldora Formativa del 2024-11-08");
    }

    #[test]
    fn test_site_language_en() {
        let config = test_parse_config("[site]\nlanguage = \"en\"");
        assert_eq!(config.site.language.code(), "en");
    }

    #[test]
    fn test_validate_rejects_bad_url_and_title() {
        let site = SiteSectionConfig {
            url: Some("ftp://example.com".into()),
            entry_title: "Sin fecha".into(),
            ..Default::default()
        };
        let mut errors = Vec::new();
        site.validate(&mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("ftp")));
    }

    #[test]
    fn test_validate_accepts_https() {
        let site = SiteSectionConfig {
            url: Some("https://pildoras.example.org/".into()),
            ..Default::default()
        };
        let mut errors = Vec::new();
        site.validate(&mut errors);
        assert!(errors.is_empty());
    }
}
