//! Static build.
//!
//! Build phases:
//! - **Prepare** - clean or create the output directory, drop stale entry pages
//! - **Copy** - feed file, images, assets directory, extra files, embedded assets
//! - **Render** - `index.html`, then one `YYYY-MM-DD/index.html` per entry
//!   when links use path routing
//! - **Generate** - `sitemap.xml`, `rss.xml`

use crate::{
    config::{RoutingStyle, SiteConfig},
    core::is_shutdown,
    embed::assets,
    feed::{Entry, Feed},
    filter::FilterState,
    generator::{rss::build_rss, sitemap::build_sitemap},
    log,
    logger::ProgressLine,
    render::{PageMode, PageRequest, render_page},
    resolve::resolve,
    utils::path::copy_dir,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

/// Directory names written for entry pages.
static ENTRY_DIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Build the whole site into `config.build.output`.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    prepare_output(config)?;
    copy_inputs(config)?;

    let feed = Feed::load_or_empty(&config.build.data);
    if feed.is_empty() {
        log!("warn"; "feed is empty, check {}", config.build.data.display());
    }

    write_index(config, &feed)?;
    if config.build.routing == RoutingStyle::Path {
        write_entry_pages(config, &feed)?;
    }

    build_sitemap(&feed, config)?;
    build_rss(&feed, config)?;

    log!("build"; "done, {} entries", feed.len());
    Ok(())
}

/// Create the output directory and remove entry pages from earlier builds.
fn prepare_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let removed = remove_entry_dirs(output)?;
    if removed > 0 {
        crate::debug!("build"; "removed {} stale entry pages", removed);
    }
    Ok(())
}

fn remove_entry_dirs(output: &Path) -> Result<usize> {
    let mut removed = 0;
    for item in fs::read_dir(output)? {
        let item = item?;
        let name = item.file_name();
        if item.file_type()?.is_dir() && ENTRY_DIR.is_match(&name.to_string_lossy()) {
            fs::remove_dir_all(item.path())
                .with_context(|| format!("Failed to remove {}", item.path().display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Copy the feed, images, assets and extra files into the output directory.
fn copy_inputs(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    if config.build.data.is_file()
        && let Some(name) = config.build.data.file_name()
    {
        copy_file(&config.build.data, &output.join(name))?;
    }

    if config.build.images.is_dir() {
        let copied = copy_dir(&config.build.images, &output.join("images"))?;
        crate::debug!("build"; "{} images", copied);
    }

    for file in assets::ALL {
        file.write_to(output)?;
    }
    // User assets override the embedded ones
    if let Some(dir) = config.build.assets.as_deref() {
        if !dir.is_dir() {
            bail!("build.assets is not a directory: {}", dir.display());
        }
        copy_dir(dir, &output.join("assets"))?;
    }

    for extra in &config.build.extra {
        let Some(name) = extra.file_name() else { continue };
        if extra.is_dir() {
            copy_dir(extra, &output.join(name))?;
        } else if extra.is_file() {
            copy_file(extra, &output.join(name))?;
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))
}

fn write_index(config: &SiteConfig, feed: &Feed) -> Result<()> {
    let resolution = resolve(feed, None, config.today());
    match resolution.current {
        Some(entry) => log!("build"; "current entry: {}", entry.date_str()),
        None => log!("build"; "no entry for {}", crate::resolve::nearest_friday(config.today())),
    }

    let html = render_page(
        config,
        &PageRequest {
            feed,
            resolution: &resolution,
            filter: &FilterState::default(),
            mode: PageMode::Static,
        },
    );
    write_html(&config.build.output.join("index.html"), &html)
}

/// Render every entry page in parallel.
fn write_entry_pages(config: &SiteConfig, feed: &Feed) -> Result<()> {
    if feed.is_empty() {
        return Ok(());
    }

    let progress = ProgressLine::new(&[("pages", feed.len())]);
    let result = feed.entries().par_iter().try_for_each(|entry| {
        if is_shutdown() {
            bail!("build interrupted");
        }
        write_entry_page(config, feed, entry)?;
        progress.inc("pages");
        Ok(())
    });
    progress.finish();
    result
}

fn write_entry_page(config: &SiteConfig, feed: &Feed, entry: &Entry) -> Result<()> {
    let resolution = resolve(feed, Some(entry.date()), config.today());
    let html = render_page(
        config,
        &PageRequest {
            feed,
            resolution: &resolution,
            filter: &FilterState::default(),
            mode: PageMode::Static,
        },
    );
    let path = config
        .build
        .output
        .join(entry.date_str())
        .join("index.html");
    write_html(&path, &html)
}

fn write_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}
