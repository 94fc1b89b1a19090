//! Site configuration management for `pildoras.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site] [build] [filter] [share] [serve]
//! ├── types/         # ConfigError, global handle
//! ├── util.rs        # base path extraction, config discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! A missing config file is not an error: every section has defaults and
//! the project root falls back to the working directory.

pub mod section;
pub mod types;
mod util;

use util::{base_path_from_url, find_config_file};

pub use section::{
    BuildSectionConfig, FilterConfig, Language, RoutingStyle, ServeConfig, ShareConfig,
    SiteSectionConfig,
};
pub use types::{ConfigError, ValidationErrors, cfg, init_config};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

/// Root configuration structure representing pildoras.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Reference date overriding the system clock (internal use only)
    #[serde(skip)]
    pub today: Option<NaiveDate>,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        config.today = cli.today;
        config.apply_command_options(&cli.command);
        config.normalize_paths();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "ignoring unknown fields in {}: {}", name, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Reference date for every date-dependent decision.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Base path for `<base href>`, always wrapped in slashes.
    pub fn base_path(&self) -> String {
        self.site
            .url
            .as_deref()
            .and_then(base_path_from_url)
            .unwrap_or_else(|| "/".to_string())
    }

    /// Origin plus base path, e.g. `https://pildoras.example.org/`.
    ///
    /// Falls back to the bare base path when no site URL is configured, so
    /// generated links stay root-relative.
    pub fn base_url(&self) -> String {
        match self.site.url.as_deref() {
            Some(url) => format!("{}/", url.trim_end_matches('/')),
            None => self.base_path(),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                interface,
                port,
                routing,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.build.routing, routing.as_ref());

                // Local base URL unless a deployment URL is configured
                if self.site.url.is_none() {
                    let addr = SocketAddr::new(self.serve.interface, self.serve.port);
                    self.site.url = Some(format!("http://{addr}"));
                }
            }
            Commands::Query { .. } | Commands::Current { .. } | Commands::Share { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        self.build.clean = args.clean;
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.routing, args.routing.as_ref());
        Self::update_option(&mut self.build.sitemap, args.sitemap.as_ref());
        Self::update_option(&mut self.build.rss, args.rss.as_ref());
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the project root.
    fn normalize_paths(&mut self) {
        use crate::utils::path::normalize_path;

        let root = normalize_path(&self.root);
        self.build.data = normalize_path(&root.join(&self.build.data));
        self.build.images = normalize_path(&root.join(&self.build.images));
        self.build.output = normalize_path(&root.join(&self.build.output));
        if let Some(assets) = self.build.assets.take() {
            self.build.assets = Some(normalize_path(&root.join(assets)));
        }
        self.build.extra = self
            .build
            .extra
            .iter()
            .map(|p| normalize_path(&root.join(p)))
            .collect();
        self.root = root;
    }

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.site.validate(&mut errors);

        if self.build.output == self.root {
            errors.push("build.output must not be the project root".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(ValidationErrors(errors)).into())
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from raw TOML. Panics on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config rooted at `root` with a fixed reference date and site URL.
#[cfg(test)]
pub fn test_config(root: &Path, today: NaiveDate) -> SiteConfig {
    let mut config = SiteConfig {
        root: root.to_path_buf(),
        config_path: root.join("pildoras.toml"),
        today: Some(today),
        ..SiteConfig::default()
    };
    config.site.url = Some("https://pildoras.example.org".into());
    config.normalize_paths();
    config
}
