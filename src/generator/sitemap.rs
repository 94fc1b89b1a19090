//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://pildoras.example.org/2024-11-08/</loc>
//!     <lastmod>2024-11-08</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::{published, write_output};
use crate::{config::SiteConfig, feed::Feed, log, share::share_url};
use anyhow::Result;
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub const FILE_NAME: &str = "sitemap.xml";

/// Write `sitemap.xml` if enabled.
pub fn build_sitemap(feed: &Feed, config: &SiteConfig) -> Result<()> {
    if !config.build.sitemap {
        return Ok(());
    }
    write_output(config, FILE_NAME, &Sitemap::build(feed, config).into_xml())?;
    log!("sitemap"; "{FILE_NAME}");
    Ok(())
}

/// Render the sitemap without writing it.
pub fn render_sitemap(feed: &Feed, config: &SiteConfig) -> String {
    Sitemap::build(feed, config).into_xml()
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    /// The index plus one URL per published entry.
    fn build(feed: &Feed, config: &SiteConfig) -> Self {
        let base_url = config.base_url();
        let entries = published(feed, config);

        let mut urls = Vec::with_capacity(entries.len() + 1);
        urls.push(UrlEntry {
            loc: base_url.clone(),
            lastmod: entries.first().map(|e| e.date_str()),
        });
        urls.extend(entries.iter().map(|entry| {
            let date = entry.date_str();
            UrlEntry {
                loc: share_url(&base_url, config.build.routing, &date),
                lastmod: Some(date),
            }
        }));

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 96);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoutingStyle, test_config};
    use chrono::NaiveDate;

    fn feed() -> Feed {
        Feed::parse(
            "pildoras:\n  - date: 2024-11-01\n    description: Intro to caching\n  - date: 2024-11-08\n    description: Load balancing basics\n  - date: 2025-03-07\n    description: Later\n",
        )
        .unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & <b>"), "a &amp; &lt;b&gt;");
    }

    #[test]
    fn test_sitemap_path_routing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        let xml = render_sitemap(&feed(), &config);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("<loc>https://pildoras.example.org/</loc>\n    <lastmod>2024-11-08</lastmod>"));
        assert!(xml.contains("<loc>https://pildoras.example.org/2024-11-01/</loc>"));
        assert!(!xml.contains("2025-03-07"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_sitemap_query_routing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        config.build.routing = RoutingStyle::Query;
        let xml = render_sitemap(&feed(), &config);
        assert!(xml.contains("<loc>https://pildoras.example.org/?date=2024-11-08</loc>"));
    }

    #[test]
    fn test_build_sitemap_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        build_sitemap(&feed(), &config).unwrap();
        assert!(config.build.output.join(FILE_NAME).is_file());
    }

    #[test]
    fn test_build_sitemap_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        config.build.sitemap = false;
        build_sitemap(&feed(), &config).unwrap();
        assert!(!config.build.output.join(FILE_NAME).exists());
    }
}
