//! RSS 2.0 feed generation.

use super::{published, write_output};
use crate::{
    config::SiteConfig,
    feed::{Entry, Feed},
    log,
    render::markup,
    share::share_url,
};
use anyhow::{Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

pub const FILE_NAME: &str = "rss.xml";

/// Write `rss.xml` if enabled. Needs an absolute `site.url`.
pub fn build_rss(feed: &Feed, config: &SiteConfig) -> Result<()> {
    if !config.build.rss {
        return Ok(());
    }
    if config.site.url.is_none() {
        log!("rss"; "skipped, site.url is not set");
        return Ok(());
    }
    write_output(config, FILE_NAME, &render_rss(feed, config)?)?;
    log!("rss"; "{FILE_NAME}");
    Ok(())
}

/// Render and validate the channel.
pub fn render_rss(feed: &Feed, config: &SiteConfig) -> Result<String> {
    let base_url = config.base_url();
    let items: Vec<_> = published(feed, config)
        .into_iter()
        .map(|entry| entry_to_item(entry, &base_url, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&config.site.title)
        .link(&base_url)
        .description(&config.site.description)
        .language(config.site.language.code().to_string())
        .generator(format!("pildoras {}", env!("CARGO_PKG_VERSION")))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn entry_to_item(entry: &Entry, base_url: &str, config: &SiteConfig) -> rss::Item {
    let date = entry.date_str();
    let link = share_url(base_url, config.build.routing, &date);
    let title = match markup::plain_text(entry.summary()) {
        summary if summary.is_empty() => config.site.entry_title(&date),
        summary => summary,
    };
    let pub_date = entry
        .date()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc2822());

    ItemBuilder::default()
        .title(title)
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(markup::to_html(entry.description()))
        .pub_date(pub_date)
        .build()
}
