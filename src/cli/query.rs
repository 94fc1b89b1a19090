//! Query command: the gallery search from the terminal.

use crate::{
    cli::QueryArgs,
    config::SiteConfig,
    feed::{Entry, Feed},
    filter::{self, FilterOutcome, FilterState, FutureWindow},
    render::date::long_label,
};
use anyhow::Result;
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use std::fmt::Write;

/// Machine-readable result of a query.
#[derive(Debug, Serialize)]
pub struct QueryResult<'a> {
    pub query: &'a str,
    pub counter: String,
    pub visible: usize,
    pub total: usize,
    pub entries: &'a [&'a Entry],
}

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let feed = Feed::load(&config.build.data)?;
    let query = args.query();
    let outcome = search(&feed, &FilterState::replay(args.events()), config);

    if args.json {
        let result = QueryResult {
            query: &query,
            counter: outcome.counter(),
            visible: outcome.visible.len(),
            total: outcome.total,
            entries: &outcome.visible,
        };
        let formatted = if args.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{formatted}");
    } else {
        print!("{}", format_listing(&outcome, config));
    }
    Ok(())
}

/// Filter the whole feed the way the gallery's search box does.
pub fn search<'a>(feed: &'a Feed, state: &FilterState, config: &SiteConfig) -> FilterOutcome<'a> {
    let window = FutureWindow::new(config.today(), config.filter.lookahead_days);
    let view: Vec<&Entry> = feed.entries().iter().collect();
    filter::apply(&view, state, &window, feed.len())
}

fn format_listing(outcome: &FilterOutcome, config: &SiteConfig) -> String {
    let mut out = String::new();
    for entry in &outcome.visible {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            entry.date_str().if_supports_color(Stdout, |t| t.cyan()),
            long_label(entry.date(), config.site.language).if_supports_color(Stdout, |t| t.dimmed()),
            crate::render::markup::plain_text(entry.summary())
        );
    }
    let _ = writeln!(out, "{}", outcome.counter().if_supports_color(Stdout, |t| t.bold()));
    out
}
