//! Auxiliary files generated from the feed.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//! - **RSS**: feed readers (`rss.xml`)
//!
//! Entries beyond the future window are left out of both, the same way the
//! gallery hides them by default.

pub mod rss;
pub mod sitemap;

use crate::config::SiteConfig;
use crate::feed::{Entry, Feed};
use crate::filter::FutureWindow;
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Entries published as of `config.today()`, newest first.
pub fn published<'a>(feed: &'a Feed, config: &SiteConfig) -> Vec<&'a Entry> {
    let window = FutureWindow::new(config.today(), config.filter.lookahead_days);
    feed.entries()
        .iter()
        .filter(|entry| !window.is_beyond(entry.date()))
        .collect()
}

/// Write generated XML below the output directory.
fn write_output(config: &SiteConfig, file_name: &str, xml: &str) -> Result<()> {
    let path = config.build.output.join(file_name);
    write_file(&path, xml)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
