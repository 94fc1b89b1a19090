//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pildoras.toml`:
//!
//! | Module   | TOML Section | Purpose                                    |
//! |----------|--------------|--------------------------------------------|
//! | `build`  | `[build]`    | Feed/image paths, output, routing style    |
//! | `filter` | `[filter]`   | Future window and modifier key             |
//! | `serve`  | `[serve]`    | Development server                         |
//! | `share`  | `[share]`    | Native share command and clipboard         |
//! | `site`   | `[site]`     | Title, url, language, entry title          |

mod build;
mod filter;
mod serve;
mod share;
mod site;

pub use build::{BuildSectionConfig, RoutingStyle};
pub use filter::FilterConfig;
pub use serve::ServeConfig;
pub use share::ShareConfig;
pub use site::{Language, SiteSectionConfig};
