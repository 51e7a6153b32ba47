//! bucket-feed - build an RSS/Atom feed from markdown posts in a bucket.

mod cli;
mod config;
mod generator;
mod logger;
mod naming;
mod publish;
mod render;
mod store;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_feed_file};
use config::FeedSiteConfig;
use publish::NoopPublisher;
use std::process::ExitCode;
use store::open_store;
use utils::date::DateTimeUtc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = FeedSiteConfig::load(cli)?;

    match &cli.command {
        Commands::Build { .. } => {
            let store = open_store(&config.store)?;
            build_feed_file(&config, store.as_ref(), &NoopPublisher, DateTimeUtc::now())?;
        }
        Commands::Publish { .. } => {
            // Resolve the publisher first so a missing command fails before any work
            let publisher = publish::from_config(&config)?;
            let store = open_store(&config.store)?;
            build_feed_file(&config, store.as_ref(), &publisher, DateTimeUtc::now())?;
        }
        Commands::List { pretty } => {
            let store = open_store(&config.store)?;
            cli::query::run_list(&config, store.as_ref(), *pretty)?;
        }
    }

    Ok(())
}
