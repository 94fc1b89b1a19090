//! Configuration utility types.
//!
//! | Module   | Purpose                                   |
//! |----------|-------------------------------------------|
//! | `error`  | Configuration error types                 |
//! | `handle` | Global configuration handle (thread-safe) |

mod error;
pub mod handle;

pub use error::{ConfigError, ValidationErrors};
pub use handle::{cfg, init_config};
