//! Command-line interface definitions.

use crate::config::RoutingStyle;
use crate::filter::FilterEvent;
use chrono::NaiveDate;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Píldoras gallery generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: pildoras.toml)
    #[arg(short = 'C', long, global = true, default_value = "pildoras.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_iso_date)]
    pub today: Option<NaiveDate>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Pre-render the gallery and one page per entry
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the gallery, rendering every page load from the feed
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Entry link style
        #[arg(short, long, value_enum)]
        routing: Option<RoutingStyle>,
    },

    /// Search the feed like the gallery's search box does
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Show this week's entry
    #[command(visible_alias = "c")]
    Current {
        /// Explicit date selector, as in `?date=`
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Share an entry through the native share command or the clipboard
    Share {
        /// Entry date (YYYY-MM-DD)
        date: String,

        /// Skip the native share command and go straight to the clipboard
        #[arg(long)]
        no_native: bool,

        /// Never attach the entry image
        #[arg(long)]
        no_image: bool,
    },
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Entry link style
    #[arg(short, long, value_enum)]
    pub routing: Option<RoutingStyle>,

    /// Override site URL for deployment.
    ///
    /// The path component becomes the `<base href>` of every page.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Enable RSS feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Search term (words are joined with spaces)
    pub term: Vec<String>,

    /// Include entries beyond the future window, like holding the modifier key
    #[arg(short, long)]
    pub future: bool,

    /// Output JSON instead of a listing
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl QueryArgs {
    pub fn query(&self) -> String {
        self.term.join(" ")
    }

    /// Search box input, plus a held modifier key for `--future`.
    pub fn events(&self) -> Vec<FilterEvent> {
        let mut events = vec![FilterEvent::Input(self.query())];
        if self.future {
            events.push(FilterEvent::ModifierDown);
        }
        events
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
