//! Request URL routing and filesystem path resolution.

use crate::filter::FilterEvent;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENTRY_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}(/index\.html)?$").unwrap());

/// What a request path points at, relative to the site base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Gallery page: the index or an entry page.
    Page,
    /// `assets/...`, embedded or from the configured assets directory.
    Asset(String),
    /// `images/...`, relative to the images directory.
    Image(String),
    Data,
    Sitemap,
    Rss,
    NotFound,
}

/// Route a request URL. `data_name` is the feed file name as published.
pub fn route(url: &str, base_path: &str, data_name: &str) -> Route {
    let clean = normalize_url(url);
    let base = base_path.trim_matches('/');

    let rel = if base.is_empty() {
        clean.as_str()
    } else if clean == base {
        ""
    } else {
        match clean.strip_prefix(base).and_then(|rest| rest.strip_prefix('/')) {
            Some(rest) => rest,
            None => return Route::NotFound,
        }
    };

    match rel {
        "" | "index.html" => Route::Page,
        "sitemap.xml" => Route::Sitemap,
        "rss.xml" => Route::Rss,
        _ if rel == data_name => Route::Data,
        _ if ENTRY_PAGE.is_match(rel) => Route::Page,
        _ => {
            if let Some(asset) = rel.strip_prefix("assets/") {
                Route::Asset(asset.to_string())
            } else if let Some(image) = rel.strip_prefix("images/") {
                Route::Image(image.to_string())
            } else {
                Route::NotFound
            }
        }
    }
}

/// Resolve a relative path to a file inside `serve_root`.
pub fn resolve_path(rel: &str, serve_root: &Path) -> Option<PathBuf> {
    // Reject paths with suspicious patterns early
    if rel.contains("..") {
        return None;
    }

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = serve_root.join(rel).canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    (canonical.starts_with(&root_canonical) && canonical.is_file()).then_some(canonical)
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();
    decoded.trim_matches('/').to_string()
}

/// Filter parameters of a page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// `q`: search text
    pub query: String,
    /// `future=1`: same as holding the modifier key
    pub show_future: bool,
    /// `partial=1`: only the card markup, for in-page filtering
    pub partial: bool,
}

impl PageQuery {
    pub fn parse(url: &str) -> Self {
        let mut query = Self::default();
        let Some(parsed) = url::Url::parse("http://localhost/")
            .ok()
            .and_then(|base| base.join(url).ok())
        else {
            return query;
        };

        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "q" => query.query = value.into_owned(),
                "future" => query.show_future = is_truthy(&value),
                "partial" => query.partial = is_truthy(&value),
                _ => {}
            }
        }
        query
    }

    /// The search box input and modifier key state these parameters stand for.
    pub fn events(&self) -> Vec<FilterEvent> {
        let mut events = vec![FilterEvent::Input(self.query.clone())];
        if self.show_future {
            events.push(FilterEvent::ModifierDown);
        }
        events
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes")
}
