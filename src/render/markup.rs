//! Description markup.
//!
//! Descriptions are CommonMark. Rendering optionally wraps every
//! case-insensitive occurrence of the search term in `<mark>`, only inside
//! text nodes so tags and attributes are never touched.

use crate::utils::html::escape;
use pulldown_cmark::{CowStr, Event, Options, Parser, TagEnd, html};
use regex::{Regex, RegexBuilder};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a description to HTML.
pub fn to_html(source: &str) -> String {
    to_html_highlighted(source, None)
}

/// Render a description to HTML, highlighting `term` when it is non-blank.
pub fn to_html_highlighted(source: &str, term: Option<&str>) -> String {
    let parser = Parser::new_ext(source, options());
    let mut out = String::with_capacity(source.len() * 3 / 2);

    match term.map(str::trim).filter(|t| !t.is_empty()).and_then(highlighter) {
        Some(re) => {
            let events = parser.map(|event| match event {
                Event::Text(text) if re.is_match(&text) => {
                    Event::InlineHtml(CowStr::from(mark(&re, &text)))
                }
                other => other,
            });
            html::push_html(&mut out, events);
        }
        None => html::push_html(&mut out, parser),
    }
    out
}

fn highlighter(term: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .ok()
}

fn mark(re: &Regex, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&escape(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape(&text[last..]));
    out
}

/// Visible text of the rendered description, breaks collapsed to spaces.
pub fn plain_text(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) if !out.is_empty() && !out.ends_with(' ') => out.push(' '),
            _ => {}
        }
    }
    out.trim_end().to_string()
}
