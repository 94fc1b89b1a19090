//! Share controller.
//!
//! Builds the share bundle for an entry and walks the fallback chain:
//!
//! ```text
//! native share (+ image file if supported) ──fail──▶ clipboard + notice ──fail──▶ log
//!        │ file rejected by capability check
//!        ▼
//! native share, text only
//! ```
//!
//! The platform is a trait so the chain is testable; `CommandPlatform` backs
//! it with external commands in the terminal.

mod command;

pub use command::CommandPlatform;

use crate::config::RoutingStyle;
use crate::feed::Entry;
use crate::{debug, log};
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single platform capability.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("native sharing is not available")]
    Unavailable,

    #[error("no clipboard command found")]
    NoClipboard,

    #[error("image '{0}' is outside the images directory")]
    InvalidImage(String),

    #[error("failed to read image {0}")]
    Image(PathBuf, #[source] std::io::Error),

    #[error("{0}")]
    Command(String),
}

/// Canonical URL of an entry: `{base_url}{date}/` or `{base_url}?date={date}`.
///
/// `base_url` is origin plus base path and ends with `/`.
pub fn share_url(base_url: &str, routing: RoutingStyle, date: &str) -> String {
    format!("{base_url}{}", routing.entry_href(date))
}

/// Everything needed to share one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareBundle {
    pub date: String,
    pub url: String,
    pub title: String,
    /// URL first so link unfurlers pick it up, then the description.
    pub text: String,
    pub image: Option<String>,
}

impl ShareBundle {
    pub fn new(entry: &Entry, base_url: &str, routing: RoutingStyle) -> Self {
        let date = entry.date_str();
        let url = share_url(base_url, routing, &date);
        let text = format!("{url}\n\n{}", entry.description());
        Self {
            url,
            text,
            title: entry.description().to_string(),
            image: entry.image().map(str::to_string),
            date,
        }
    }
}

/// An image prepared for a file-inclusive share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub name: String,
    pub path: PathBuf,
    pub mime: &'static str,
}

/// Payload handed to the native share capability.
#[derive(Debug, Clone, Copy)]
pub struct SharePayload<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub file: Option<&'a SharedFile>,
}

/// Platform capabilities the share chain relies on.
pub trait SharePlatform {
    /// Whether a native share capability exists at all.
    fn can_share(&self) -> bool;

    /// Capability check for a file-inclusive payload.
    fn can_share_file(&self, file: &SharedFile) -> bool;

    fn fetch_image(&mut self, name: &str) -> Result<SharedFile, ShareError>;

    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;

    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError>;

    /// Transient user notice.
    fn notify(&mut self, message: &str);
}

/// How a share request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    SharedWithImage,
    Shared,
    Copied,
    Failed,
}

/// Per-request switches.
#[derive(Debug, Clone, Copy)]
pub struct ShareOptions<'a> {
    /// Attempt an image-inclusive share when the entry has an image.
    pub images: bool,
    /// Shown after a successful clipboard copy.
    pub copied_notice: &'a str,
}

/// Run the share chain for `bundle`.
pub fn dispatch(
    bundle: &ShareBundle,
    platform: &mut dyn SharePlatform,
    options: &ShareOptions,
) -> ShareOutcome {
    if platform.can_share() {
        let file = options
            .images
            .then_some(bundle.image.as_deref())
            .flatten()
            .and_then(|name| match platform.fetch_image(name) {
                Ok(file) => Some(file),
                Err(e) => {
                    debug!("share"; "image skipped: {e}");
                    None
                }
            })
            .filter(|file| platform.can_share_file(file));

        let payload = SharePayload {
            title: &bundle.title,
            text: &bundle.text,
            file: file.as_ref(),
        };
        match platform.share(&payload) {
            Ok(()) if payload.file.is_some() => return ShareOutcome::SharedWithImage,
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => debug!("share"; "native share failed: {e}"),
        }
    }

    match platform.write_clipboard(&bundle.text) {
        Ok(()) => {
            platform.notify(options.copied_notice);
            ShareOutcome::Copied
        }
        Err(e) => {
            log!("share"; "could not share {}: {e}", bundle.date);
            ShareOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const NOTICE: &str = "¡Contenido copiado al portapapeles!";

    #[derive(Default)]
    struct MockPlatform {
        native: bool,
        files: bool,
        share_fails: bool,
        clipboard_fails: bool,
        image_missing: bool,
        shared: Vec<(String, Option<String>)>,
        clipboard: Option<String>,
        notices: Vec<String>,
    }

    impl SharePlatform for MockPlatform {
        fn can_share(&self) -> bool {
            self.native
        }

        fn can_share_file(&self, _file: &SharedFile) -> bool {
            self.files
        }

        fn fetch_image(&mut self, name: &str) -> Result<SharedFile, ShareError> {
            if self.image_missing {
                return Err(ShareError::InvalidImage(name.into()));
            }
            Ok(SharedFile {
                name: name.into(),
                path: PathBuf::from("images").join(name),
                mime: "image/png",
            })
        }

        fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
            if self.share_fails {
                return Err(ShareError::Command("cancelled".into()));
            }
            self.shared.push((
                payload.text.to_string(),
                payload.file.map(|f| f.name.clone()),
            ));
            Ok(())
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
            if self.clipboard_fails {
                return Err(ShareError::NoClipboard);
            }
            self.clipboard = Some(text.to_string());
            Ok(())
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn options() -> ShareOptions<'static> {
        ShareOptions {
            images: true,
            copied_notice: NOTICE,
        }
    }

    fn bundle(image: Option<&str>) -> ShareBundle {
        let entry = Entry::new(
            NaiveDate::from_ymd_opt(2024, 11, 8).unwrap(),
            "X",
            None,
            image.map(Into::into),
        );
        ShareBundle::new(&entry, "https://pildoras.example.org/", RoutingStyle::Path)
    }

    #[test]
    fn test_share_text_starts_with_url() {
        let b = bundle(None);
        assert_eq!(b.url, "https://pildoras.example.org/2024-11-08/");
        assert_eq!(b.text, "https://pildoras.example.org/2024-11-08/\n\nX");
        assert!(b.text.starts_with(&b.url));
    }

    #[test]
    fn test_share_url_query_routing() {
        assert_eq!(
            share_url("https://example.org/p/", RoutingStyle::Query, "2024-11-08"),
            "https://example.org/p/?date=2024-11-08"
        );
    }

    #[test]
    fn test_no_native_share_copies_exact_text() {
        let b = bundle(None);
        let mut platform = MockPlatform::default();
        assert_eq!(dispatch(&b, &mut platform, &options()), ShareOutcome::Copied);
        assert_eq!(platform.clipboard.as_deref(), Some(b.text.as_str()));
        assert_eq!(platform.notices, vec![NOTICE.to_string()]);
    }

    #[test]
    fn test_native_share_with_image() {
        let mut platform = MockPlatform {
            native: true,
            files: true,
            ..Default::default()
        };
        let outcome = dispatch(&bundle(Some("x.png")), &mut platform, &options());
        assert_eq!(outcome, ShareOutcome::SharedWithImage);
        assert_eq!(platform.shared[0].1.as_deref(), Some("x.png"));
        assert!(platform.clipboard.is_none());
    }

    #[test]
    fn test_file_rejected_falls_back_to_text() {
        let mut platform = MockPlatform {
            native: true,
            files: false,
            ..Default::default()
        };
        let outcome = dispatch(&bundle(Some("x.png")), &mut platform, &options());
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(platform.shared[0].1, None);
    }

    #[test]
    fn test_image_fetch_failure_degrades_to_text() {
        let mut platform = MockPlatform {
            native: true,
            files: true,
            image_missing: true,
            ..Default::default()
        };
        assert_eq!(
            dispatch(&bundle(Some("x.png")), &mut platform, &options()),
            ShareOutcome::Shared
        );
    }

    #[test]
    fn test_images_disabled() {
        let mut platform = MockPlatform {
            native: true,
            files: true,
            ..Default::default()
        };
        let opts = ShareOptions {
            images: false,
            ..options()
        };
        assert_eq!(dispatch(&bundle(Some("x.png")), &mut platform, &opts), ShareOutcome::Shared);
    }

    #[test]
    fn test_share_failure_falls_back_to_clipboard() {
        let mut platform = MockPlatform {
            native: true,
            share_fails: true,
            ..Default::default()
        };
        let b = bundle(None);
        assert_eq!(dispatch(&b, &mut platform, &options()), ShareOutcome::Copied);
        assert_eq!(platform.clipboard.as_deref(), Some(b.text.as_str()));
    }

    #[test]
    fn test_everything_fails() {
        let mut platform = MockPlatform {
            native: true,
            share_fails: true,
            clipboard_fails: true,
            ..Default::default()
        };
        assert_eq!(dispatch(&bundle(None), &mut platform, &options()), ShareOutcome::Failed);
        assert!(platform.notices.is_empty());
    }
}
