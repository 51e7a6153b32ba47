//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Build an RSS/Atom feed from markdown posts stored in a bucket
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Feed output path, overrides `feed.path` (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: feed.toml)
    #[arg(short = 'C', long, default_value = "feed.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

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
    /// Build the feed and write it to disk
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the feed, then run the publish command
    #[command(visible_alias = "p")]
    Publish {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List stored posts in feed order as JSON
    #[command(visible_alias = "l")]
    List {
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Shared arguments for Build and Publish
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Minify the feed XML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}
