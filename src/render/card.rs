//! Card renderer: entry list -> markup fragment.

use super::{Labels, date::long_label, markup};
use crate::config::{Language, RoutingStyle};
use crate::feed::Entry;
use crate::utils::html::{escape, escape_attr};
use std::fmt::Write;

/// Grid cell sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardLayout {
    /// Multi-card responsive grid.
    #[default]
    Grid,
    /// Single-entry view, full width.
    Full,
}

impl CardLayout {
    fn column_class(self) -> &'static str {
        match self {
            Self::Grid => "col-md-6 col-lg-4 mb-4",
            Self::Full => "col-12 mb-4",
        }
    }
}

/// Rendering knobs shared by every card of a page.
#[derive(Debug, Clone, Copy)]
pub struct CardOptions<'a> {
    pub routing: RoutingStyle,
    pub language: Language,
    pub layout: CardLayout,
    /// Active search term, highlighted in descriptions.
    pub highlight: Option<&'a str>,
}

impl Default for CardOptions<'_> {
    fn default() -> Self {
        Self {
            routing: RoutingStyle::default(),
            language: Language::default(),
            layout: CardLayout::default(),
            highlight: None,
        }
    }
}

/// Render every entry as a visible card.
pub fn render_cards(entries: &[&Entry], options: &CardOptions) -> String {
    let mut out = String::with_capacity(entries.len() * 1024);
    for entry in entries {
        out.push_str(&render_card(entry, options, false));
    }
    out
}

/// Render one card. `hidden` cards carry Bootstrap's `d-none`.
pub fn render_card(entry: &Entry, options: &CardOptions, hidden: bool) -> String {
    let labels = Labels::for_language(options.language);
    let date = entry.date_str();
    let mut html = String::with_capacity(1024);

    let hidden_class = if hidden { " d-none" } else { "" };
    let _ = writeln!(
        html,
        r#"<div class="{}{hidden_class}" data-date="{date}">"#,
        options.layout.column_class()
    );
    html.push_str("<div class=\"card h-100 shadow-sm\">\n");

    if let Some(image) = entry.image() {
        let _ = writeln!(
            html,
            r#"<img src="images/{}" class="card-img-top" alt="{} {date}" loading="lazy">"#,
            escape_attr(image),
            labels.image_alt
        );
    }

    html.push_str("<div class=\"card-body d-flex flex-column\">\n");
    let _ = writeln!(
        html,
        r#"<div class="text-muted small mb-2"><time datetime="{date}">{}</time></div>"#,
        long_label(entry.date(), options.language)
    );
    let _ = writeln!(
        html,
        r#"<div class="card-text">{}</div>"#,
        markup::to_html_highlighted(entry.description(), options.highlight)
    );

    html.push_str("<div class=\"mt-auto d-flex flex-wrap gap-2 pt-3\">\n");
    let _ = writeln!(
        html,
        r#"<a href="{}" class="btn btn-primary">{}</a>"#,
        escape_attr(&options.routing.entry_href(&date)),
        labels.view_entry
    );
    if let Some(url) = entry.url() {
        let _ = writeln!(
            html,
            r#"<a href="{}" class="btn btn-secondary" target="_blank" rel="noopener">{}</a>"#,
            escape_attr(url),
            labels.visit
        );
    }
    let _ = write!(
        html,
        r#"<button type="button" class="btn btn-outline-secondary share-btn" data-date="{date}" data-description="{}""#,
        escape_attr(entry.description())
    );
    if let Some(image) = entry.image() {
        let _ = write!(html, r#" data-image="{}""#, escape_attr(image));
    }
    let _ = writeln!(html, ">{}</button>", escape(labels.share));

    html.push_str("</div>\n</div>\n</div>\n</div>\n");
    html
}
