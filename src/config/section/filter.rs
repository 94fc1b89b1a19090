//! `[filter]` section configuration.
//!
//! ```toml
//! [filter]
//! lookahead_days = 6      # entries later than today + 6 stay hidden
//! modifier_key = "Alt"    # held down to reveal them
//! ```

use serde::{Deserialize, Serialize};

/// Search/filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Days after today that are still visible without the modifier key.
    pub lookahead_days: u32,

    /// `KeyboardEvent.key` value that reveals future entries while held.
    pub modifier_key: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            lookahead_days: 6,
            modifier_key: "Alt".into(),
        }
    }
}
