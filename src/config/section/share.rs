//! `[share]` section configuration.
//!
//! ```toml
//! [share]
//! images = true                       # try to attach the entry image
//! command = ["termux-share", "-a", "send"]
//! files = true                        # command accepts an image path
//! clipboard = ["wl-copy"]             # override clipboard detection
//! ```

use serde::{Deserialize, Serialize};

/// Share controller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Attempt image-inclusive sharing when an entry has an image.
    pub images: bool,

    /// Native share command. Empty means no native share capability.
    /// The share text is written to its stdin.
    pub command: Vec<String>,

    /// Whether `command` accepts an image path as its last argument.
    pub files: bool,

    /// Clipboard command override. Empty means auto-detect on `PATH`.
    pub clipboard: Vec<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            images: true,
            command: Vec::new(),
            files: false,
            clipboard: Vec::new(),
        }
    }
}
