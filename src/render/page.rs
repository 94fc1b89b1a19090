//! Full page assembly.
//!
//! ```text
//! Resolution + FilterState ──▶ CardSet ──▶ PAGE_HTML shell ──▶ meta::update
//! ```

use super::{CardLayout, CardOptions, Labels, render_card, render_cards};
use crate::config::{RoutingStyle, SiteConfig};
use crate::embed::page::{PAGE_HTML, PageVars};
use crate::feed::Feed;
use crate::filter::{self, FilterState, FutureWindow};
use crate::meta;
use crate::resolve::Resolution;
use crate::share::share_url;
use crate::utils::html::{escape, escape_attr};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt::Write;

/// How filtering reaches the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Every card is rendered; filtered ones carry `d-none` and the
    /// browser script toggles them.
    Static,
    /// Only visible cards are rendered; the browser asks the server to
    /// re-render on every filter change.
    Dynamic,
}

impl PageMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

/// Inputs of one page render.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub feed: &'a Feed,
    pub resolution: &'a Resolution<'a>,
    pub filter: &'a FilterState,
    pub mode: PageMode,
}

/// Rendered cards plus the counter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSet {
    pub html: String,
    pub visible: usize,
    pub counter: String,
}

/// Render the card container content for a request.
pub fn render_card_set(config: &SiteConfig, req: &PageRequest) -> CardSet {
    let total = req.feed.len();
    let window = FutureWindow::new(config.today(), config.filter.lookahead_days);
    let needle = req.filter.query().trim();
    let mut options = CardOptions {
        routing: config.build.routing,
        language: config.site.language,
        layout: CardLayout::Grid,
        highlight: (!needle.is_empty()).then_some(needle),
    };

    if req.resolution.is_single() {
        options.layout = CardLayout::Full;
        options.highlight = None;
        let html = render_cards(&req.resolution.view, &options);
        let visible = req.resolution.view.len();
        return CardSet {
            html,
            visible,
            counter: filter::counter_text(visible, total),
        };
    }

    let outcome = filter::apply(&req.resolution.view, req.filter, &window, total);
    let html = match req.mode {
        PageMode::Static => req
            .resolution
            .view
            .iter()
            .map(|entry| render_card(entry, &options, !outcome.is_visible(entry)))
            .collect(),
        PageMode::Dynamic => render_cards(&outcome.visible, &options),
    };
    CardSet {
        html,
        visible: outcome.visible.len(),
        counter: outcome.counter(),
    }
}

/// Render a complete gallery page.
pub fn render_page(config: &SiteConfig, req: &PageRequest) -> String {
    let labels = Labels::for_language(config.site.language);
    let single = req.resolution.is_single();
    let cards = render_card_set(config, req);
    let base_url = config.base_url();

    let (title, canonical_url) = match req.resolution.current.filter(|_| single) {
        Some(entry) => {
            let date = entry.date_str();
            (
                config.site.entry_title(&date),
                share_url(&base_url, config.build.routing, &date),
            )
        }
        None => (config.site.title.clone(), base_url.clone()),
    };

    let vars = PageVars {
        lang: config.site.language.code(),
        base_href: escape_attr(&config.base_path()).into_owned(),
        title: escape_attr(&title).into_owned(),
        description: escape_attr(&config.site.description).into_owned(),
        canonical_url: escape_attr(&canonical_url).into_owned(),
        feed_link: feed_link(config),
        mode: req.mode.as_str(),
        view: if single { "single" } else { "all" },
        total: req.feed.len(),
        lookahead: config.filter.lookahead_days,
        modifier: escape_attr(&config.filter.modifier_key).into_owned(),
        routing: match config.build.routing {
            RoutingStyle::Path => "path",
            RoutingStyle::Query => "query",
        },
        share_images: config.share.images,
        entry_title: escape_attr(&config.site.entry_title).into_owned(),
        copied: escape_attr(labels.copied).into_owned(),
        today: config.today.map(|d| d.format("%Y-%m-%d").to_string()),
        site_title: escape(&config.site.title).into_owned(),
        counter: cards.counter,
        entries_label: labels.entries,
        search_hidden: single,
        search_placeholder: labels.search_placeholder,
        query: escape_attr(req.filter.query()).into_owned(),
        suggest: suggest_button(config, labels),
        view_all_hidden: !single,
        view_all: labels.view_all,
        cards: cards.html,
        footer: footer(config, labels),
    };

    let html = PAGE_HTML.render(&vars);
    meta::update(&html, req.resolution.current, config)
}

fn feed_link(config: &SiteConfig) -> String {
    if !config.build.rss {
        return String::new();
    }
    format!(
        r#"    <link rel="alternate" type="application/rss+xml" title="{}" href="rss.xml">"#,
        escape_attr(&config.site.title)
    )
}

/// "Suggest a new entry" button opening a prefilled issue.
fn suggest_button(config: &SiteConfig, labels: &Labels) -> String {
    let Some(repo) = config.site.repository.as_deref() else {
        return String::new();
    };
    let encode = |s: &str| utf8_percent_encode(s, NON_ALPHANUMERIC).to_string();
    let href = format!(
        "{}/issues/new?title={}&labels=enhancement&body={}",
        repo.trim_end_matches('/'),
        encode(labels.suggest),
        encode("**Descripción:**\n\n**Fecha propuesta:**\n\n**URL:**\n\n**Imagen:** _(adjuntar o incluir enlace)_"),
    );
    format!(
        r#"                    <a href="{}" class="btn btn-outline-primary" target="_blank" rel="noopener"><i class="bi bi-plus-circle"></i> {}</a>"#,
        escape_attr(&href),
        labels.suggest
    )
}

fn footer(config: &SiteConfig, labels: &Labels) -> String {
    let mut html = format!(
        "            <p>{}</p>\n",
        escape(&config.site.description)
    );
    if let Some(repo) = config.site.repository.as_deref() {
        let _ = writeln!(
            html,
            r#"            <p><a href="{}" class="text-muted"><i class="bi bi-github"></i> {}</a></p>"#,
            escape_attr(repo),
            labels.source_code
        );
    }
    html
}
