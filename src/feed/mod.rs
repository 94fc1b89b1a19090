//! Feed loading: the YAML document of píldoras.
//!
//! ```yaml
//! pildoras:
//!   - date: 2024-11-08
//!     description: |
//!       **Load balancing** basics
//!     url: https://example.org/lb
//!     image: lb.png
//! ```
//!
//! A [`Feed`] is an immutable, date-descending snapshot. Cloning it is cheap,
//! so the page state owner can hand it to the resolver, the renderer and the
//! share controller without any ambient global.

mod entry;

pub use entry::Entry;

use crate::log;
use chrono::NaiveDate;
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path, path::PathBuf, sync::Arc};
use thiserror::Error;

/// Errors raised while loading a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("feed is not valid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("entry date `{0}` is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("entry date `{0}` appears more than once")]
    DuplicateDate(String),
}

/// On-disk document shape.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    pildoras: Vec<RawEntry>,
}

/// Entry as written in the document, before date validation.
#[derive(Debug, Deserialize)]
struct RawEntry {
    date: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl TryFrom<RawEntry> for Entry {
    type Error = FeedError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let date_str = raw.date.trim();
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| FeedError::InvalidDate(raw.date.clone()))?;
        Ok(Entry::new(date, raw.description, raw.url, raw.image))
    }
}

/// Immutable, date-descending list of entries.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    entries: Arc<[Entry]>,
}

impl Feed {
    /// Build a feed, sorting by date descending and rejecting duplicate dates.
    pub fn from_entries(mut entries: Vec<Entry>) -> Result<Self, FeedError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.date()) {
                return Err(FeedError::DuplicateDate(entry.date_str()));
            }
        }
        entries.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Parse a feed document.
    pub fn parse(yaml: &str) -> Result<Self, FeedError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let doc: FeedDocument = serde_yaml::from_str(yaml)?;
        let entries = doc
            .pildoras
            .into_iter()
            .map(Entry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Read and parse a feed document from disk.
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        let content =
            fs::read_to_string(path).map_err(|e| FeedError::Io(path.to_path_buf(), e))?;
        Self::parse(&content)
    }

    /// Load a feed, logging any failure and falling back to an empty feed.
    ///
    /// No retry: a failed load leaves the page without entries.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(feed) => feed,
            Err(e) => {
                log!("error"; "{}", error_chain(&e));
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look an entry up by its date.
    pub fn get(&self, date: NaiveDate) -> Option<&Entry> {
        // Sorted descending, so search with the comparison reversed
        self.entries
            .binary_search_by(|e| date.cmp(&e.date()))
            .ok()
            .map(|i| &self.entries[i])
    }
}

/// Render an error and its sources on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
