//! Píldoras - a static gallery generator for a dated feed of weekly posts.

mod cli;
mod config;
mod core;
mod embed;
mod feed;
mod filter;
mod generator;
mod logger;
mod meta;
mod render;
mod resolve;
mod share;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
        Commands::Query { args } => cli::query::run_query(args, &config),
        Commands::Current { date } => cli::current::run_current(date.as_deref(), &config),
        Commands::Share {
            date,
            no_native,
            no_image,
        } => cli::share::run_share(date, *no_native, *no_image, &config).map(|_| ()),
    }
}
