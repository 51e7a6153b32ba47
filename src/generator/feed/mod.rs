//! Feed generation (RSS, Atom).
//!
//! Assembles feed items from rendered posts and serializes them:
//!
//! - **RSS 2.0**: `<channel>` with one `<item>` per post
//! - **Atom 1.0**: `<feed>` with one `<entry>` per post
//!
//! The format is fixed by `[feed] format`; it is not a per-run switch.

pub mod atom;
mod common;
pub mod rss;

pub use common::{Feed, FeedItem, FeedMetadata, build_feed, build_item};

use super::minify_xml;
use crate::config::FeedFormat;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("RSS validation failed: {0}")]
    Validation(String),

    #[error("timestamp `{0}` cannot be encoded")]
    Timestamp(String),

    #[error("failed to encode RSS feed")]
    Rss(#[from] ::rss::Error),

    #[error("failed to encode Atom feed")]
    Atom(#[from] ::atom_syndication::Error),

    #[error("failed to minify feed XML")]
    Minify(#[from] quick_xml::Error),

    #[error("failed to write feed to `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Serialize a feed in the configured format.
pub fn serialize(feed: &Feed, format: FeedFormat, minify: bool) -> Result<Vec<u8>, FeedError> {
    let xml = match format {
        FeedFormat::Rss => rss::to_xml(feed)?,
        FeedFormat::Atom => atom::to_xml(feed)?,
    };
    Ok(minify_xml(&xml, minify)?.into_owned())
}

/// Write serialized feed bytes so that `path` only ever holds a complete feed.
///
/// Bytes go to a temporary file next to `path`, which is then renamed over it.
pub fn write_feed(path: &Path, bytes: &[u8]) -> Result<(), FeedError> {
    let write_err = |err| FeedError::Write(path.to_path_buf(), err);

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
