//! `[feed]` configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format.
    Rss,
    /// Atom 1.0 format (default).
    #[default]
    Atom,
}

impl FeedFormat {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Atom => "atom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed format (RSS 2.0 or Atom 1.0).
    pub format: FeedFormat,
    /// Output path for the feed file (relative to project root).
    pub path: PathBuf,
    /// Strip indentation from the serialized XML.
    pub minify: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            format: FeedFormat::Atom,
            path: "rss.xml".into(),
            minify: false,
        }
    }
}
