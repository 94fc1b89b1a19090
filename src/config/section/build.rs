//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! data = "data.yml"
//! images = "images"
//! output = "public"
//! routing = "path"        # or "query"
//! extra = [".nojekyll", "CNAME"]
//! sitemap = true
//! rss = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How links to a single entry are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStyle {
    /// `{base}2024-11-08/`, one pre-rendered page per entry.
    #[default]
    Path,
    /// `{base}?date=2024-11-08`, resolved on the index page.
    Query,
}

impl RoutingStyle {
    /// Link to an entry, relative to the base path.
    pub fn entry_href(self, date: &str) -> String {
        match self {
            Self::Path => format!("{date}/"),
            Self::Query => format!("?date={date}"),
        }
    }
}

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Feed document (YAML with a `pildoras` list).
    pub data: PathBuf,

    /// Directory holding entry images.
    pub images: PathBuf,

    /// Output directory.
    pub output: PathBuf,

    /// Optional static directory copied to `{output}/assets`.
    pub assets: Option<PathBuf>,

    /// Files copied verbatim into the output root when present.
    pub extra: Vec<PathBuf>,

    /// Entry link style.
    pub routing: RoutingStyle,

    /// Remove the output directory before building.
    #[serde(skip)]
    pub clean: bool,

    /// Generate `sitemap.xml`.
    pub sitemap: bool,

    /// Generate `rss.xml`.
    pub rss: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            data: "data.yml".into(),
            images: "images".into(),
            output: "public".into(),
            assets: None,
            extra: vec![".nojekyll".into(), "CNAME".into()],
            routing: RoutingStyle::Path,
            clean: false,
            sitemap: true,
            rss: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.routing, RoutingStyle::Path);
        assert!(config.build.sitemap);
        assert_eq!(config.build.extra.len(), 2);
    }

    #[test]
    fn test_build_query_routing() {
        let config = test_parse_config("[build]\nrouting = \"query\"\noutput = \"dist\"");
        assert_eq!(config.build.routing, RoutingStyle::Query);
        assert!(config.build.output.ends_with("dist"));
    }

    #[test]
    fn test_entry_href() {
        assert_eq!(RoutingStyle::Path.entry_href("2024-11-08"), "2024-11-08/");
        assert_eq!(RoutingStyle::Query.entry_href("2024-11-08"), "?date=2024-11-08");
    }
}
