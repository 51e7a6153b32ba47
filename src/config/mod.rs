//! Configuration management for `feed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site] [store] [naming] [feed] [markdown] [publish]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config discovery, path resolution
//! └── mod.rs         # FeedSiteConfig (this file)
//! ```
//!
//! The configuration is loaded once in `main` and passed down by reference.
//! Environment variables (and a `.env` file beside the config) are consulted
//! only while loading; the process environment wins over `.env`.

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, read_dotenv, resolve_config_path};

pub use section::{
    FeedConfig, FeedFormat, MarkdownConfig, NamingConfig, PublishConfig, SiteInfoConfig,
    StoreConfig, StoreProvider,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing feed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

impl FeedSiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; the project root is the
    /// config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path =
            find_config_file(&cli.config).ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        let dotenv = read_dotenv(config_path.parent().unwrap_or(Path::new(".")));
        config.config_path = config_path;
        config.finalize(cli, |var| {
            std::env::var(var).ok().or_else(|| dotenv.get(var).cloned())
        });
        config.validate()?;

        Ok(config)
    }

    /// Finalize configuration after parsing.
    fn finalize(&mut self, cli: &Cli, env: impl Fn(&str) -> Option<String>) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = crate::utils::path::normalize_path(&root);

        self.store.apply_env(env);
        self.apply_cli(cli);
        self.normalize_paths();
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.feed.path, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } | Commands::Publish { build_args } => {
                self.apply_build_args(build_args);
            }
            Commands::List { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.feed.minify, args.minify.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve file paths against the project root.
    fn normalize_paths(&mut self) {
        self.feed.path = resolve_config_path(&self.feed.path, &self.root);
        if !self.store.path.as_os_str().is_empty() {
            self.store.path = resolve_config_path(&self.store.path, &self.root);
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all problems at once.
    ///
    /// Warnings are printed; any error fails the load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.store.validate(&mut diag);
        self.naming.validate(&mut diag);
        self.publish.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> FeedSiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\nurl = \"https://example.com\"\n{extra}");
    let (parsed, ignored) = FeedSiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
