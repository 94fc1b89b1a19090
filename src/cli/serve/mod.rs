//! Development server rendering every page from the feed on request.
//!
//! The feed file is read on each page load, so edits show up on reload
//! without a rebuild. Filtering happens server-side: the page script asks
//! for `?q=..&future=1&partial=1` and swaps in the returned cards.

mod lifecycle;
mod path;
mod response;

use self::path::{PageQuery, Route};
use crate::{
    config::{SiteConfig, cfg},
    core::is_shutdown,
    debug,
    embed::assets,
    feed::Feed,
    filter::FilterState,
    generator::{rss::render_rss, sitemap::render_sitemap},
    log,
    render::{PageMode, PageRequest, page::render_card_set, render_page},
    resolve::{date_selector, resolve},
    utils::mime::types,
};
use anyhow::{Context, Result};
use tiny_http::{Request, Server};

/// Worker threads answering requests.
const WORKERS: usize = 4;

/// Bind and run the request loop until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let (server, addr) = lifecycle::bind_for_shutdown(config.serve.interface, config.serve.port)?;
    log!("serve"; "http://{}{}", addr, config.base_path());
    debug!("serve"; "feed: {}", config.build.data.display());

    run_request_loop(&server)
}

fn run_request_loop(server: &Server) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKERS)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let config = cfg();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();
    debug!("request"; "{} {}", request.method(), url);

    match path::route(&url, &config.base_path(), &data_name(config)) {
        Route::Page => {
            let feed = Feed::load_or_empty(&config.build.data);
            let page = render_for_url(config, &feed, &url);
            let mut headers = Vec::new();
            if let Some(count) = page.count {
                headers.push(response::make_header(response::COUNT_HEADER, &count)?);
            }
            response::respond_content(request, types::HTML, page.body, headers)
        }
        Route::Asset(rel) => {
            if let Some(file) = assets::find(&format!("assets/{rel}")) {
                return response::respond_content(request, file.mime, file.content, Vec::new());
            }
            match config.build.assets.as_deref().and_then(|dir| path::resolve_path(&rel, dir)) {
                Some(file) => response::respond_file(request, &file),
                None => response::respond_not_found(request),
            }
        }
        Route::Image(rel) => match path::resolve_path(&rel, &config.build.images) {
            Some(file) => response::respond_file(request, &file),
            None => response::respond_not_found(request),
        },
        Route::Data if config.build.data.is_file() => {
            response::respond_file(request, &config.build.data)
        }
        Route::Sitemap if config.build.sitemap => {
            let feed = Feed::load_or_empty(&config.build.data);
            response::respond_content(request, types::XML, render_sitemap(&feed, config), Vec::new())
        }
        Route::Rss if config.build.rss => {
            let feed = Feed::load_or_empty(&config.build.data);
            match render_rss(&feed, config) {
                Ok(xml) => response::respond_content(request, types::RSS, xml, Vec::new()),
                Err(e) => response::respond_error(request, &e),
            }
        }
        _ => response::respond_not_found(request),
    }
}

/// Feed file name as linked from the site root.
fn data_name(config: &SiteConfig) -> String {
    config
        .build
        .data
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A rendered page or card fragment.
#[derive(Debug)]
struct RenderedPage {
    body: String,
    /// Counter text, set for partial renders only.
    count: Option<String>,
}

fn render_for_url(config: &SiteConfig, feed: &Feed, url: &str) -> RenderedPage {
    let query = PageQuery::parse(url);
    let resolution = resolve(feed, date_selector(url), config.today());
    let filter = FilterState::replay(query.events());
    let req = PageRequest {
        feed,
        resolution: &resolution,
        filter: &filter,
        mode: PageMode::Dynamic,
    };

    if query.partial {
        let cards = render_card_set(config, &req);
        return RenderedPage {
            body: cards.html,
            count: Some(cards.counter),
        };
    }

    RenderedPage {
        body: render_page(config, &req),
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use chrono::NaiveDate;

    fn feed() -> Feed {
        Feed::parse(
            "pildoras:\n  - date: 2024-11-01\n    description: Intro to caching\n  - date: 2024-11-08\n    description: Load balancing basics\n  - date: 2024-12-06\n    description: Far future caching\n",
        )
        .unwrap()
    }

    fn config(tmp: &tempfile::TempDir) -> SiteConfig {
        test_config(tmp.path(), NaiveDate::from_ymd_opt(2024, 11, 8).unwrap())
    }

    #[test]
    fn test_partial_render_counts_visible() {
        let tmp = tempfile::tempdir().unwrap();
        let page = render_for_url(&config(&tmp), &feed(), "/?q=cach&partial=1");

        assert_eq!(page.count.as_deref(), Some("1 de 3"));
        assert!(!page.body.contains("<html"));
        assert!(page.body.contains(r#"data-date="2024-11-01""#));
        assert!(!page.body.contains(r#"data-date="2024-12-06""#));
    }

    #[test]
    fn test_partial_render_with_future() {
        let tmp = tempfile::tempdir().unwrap();
        let page = render_for_url(&config(&tmp), &feed(), "/?q=cach&future=1&partial=1");
        assert_eq!(page.count.as_deref(), Some("2 de 3"));
    }

    #[test]
    fn test_entry_page_by_path() {
        let tmp = tempfile::tempdir().unwrap();
        let page = render_for_url(&config(&tmp), &feed(), "/2024-11-01/");

        assert!(page.count.is_none());
        assert!(page.body.contains(r#"data-view="single""#));
        assert!(page.body.contains(r#"data-date="2024-11-01""#));
        assert!(!page.body.contains(r#"data-date="2024-11-08""#));
    }

    #[test]
    fn test_entry_page_by_index_file() {
        let tmp = tempfile::tempdir().unwrap();
        let url = "/2024-11-01/index.html";
        assert_eq!(path::route(url, "/", "data.yml"), Route::Page);

        let page = render_for_url(&config(&tmp), &feed(), url);
        assert!(page.body.contains(r#"data-view="single""#));
        assert!(!page.body.contains(r#"data-date="2024-11-08""#));
    }

    #[test]
    fn test_unknown_date_falls_back_to_index() {
        let tmp = tempfile::tempdir().unwrap();
        let page = render_for_url(&config(&tmp), &feed(), "/?date=2023-01-06");
        assert!(page.body.contains(r#"data-view="all""#));
        assert!(page.body.contains("2 de 3"));
    }

    #[test]
    fn test_data_name() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config(&tmp);
        config.build.data = tmp.path().join("pildoras.yml");
        assert_eq!(data_name(&config), "pildoras.yml");
    }
}
