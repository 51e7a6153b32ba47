//! Document stores: where the markdown posts live.
//!
//! The pipeline needs exactly two operations from a store, listing and
//! fetching. Everything provider-specific stays behind [`DocumentStore`].
//!
//! | Module   | Purpose                                         |
//! |----------|-------------------------------------------------|
//! | `s3`     | S3 bucket via rust-s3's blocking client         |
//! | `local`  | A directory of files, mtime as last-modified    |
//! | `order`  | Newest-first ordering of listed descriptors     |

mod local;
#[cfg(test)]
pub mod memory;
mod order;
mod s3;

pub use local::LocalStore;
pub use order::order;
pub use s3::S3Store;

use crate::config::{StoreConfig, StoreProvider};
use crate::utils::date::DateTimeUtc;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// One stored object, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDescriptor {
    /// Object key (file name, possibly with a prefix).
    pub key: String,
    /// Last modification time reported by the store.
    pub last_modified: DateTimeUtc,
}

impl DocumentDescriptor {
    pub fn new(key: impl Into<String>, last_modified: DateTimeUtc) -> Self {
        Self {
            key: key.into(),
            last_modified,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open bucket `{bucket}`: {message}")]
    Connect { bucket: String, message: String },

    #[error("failed to list `{store}`")]
    List {
        store: String,
        #[source]
        source: ::s3::error::S3Error,
    },

    #[error("failed to fetch `{key}`")]
    Fetch {
        key: String,
        #[source]
        source: ::s3::error::S3Error,
    },

    #[error("fetching `{key}` returned HTTP {status}")]
    Status { key: String, status: u16 },

    #[error("`{key}` has an unreadable last-modified time `{raw}`")]
    Timestamp { key: String, raw: String },

    #[error("document `{0}` not found")]
    NotFound(String),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Read access to the stored documents.
///
/// Calls block; there is no timeout or retry at this layer.
pub trait DocumentStore {
    /// Human-readable location for logs (e.g. `s3://bucket/prefix`).
    fn location(&self) -> String;

    /// All documents, in the store's own listing order.
    fn list(&self) -> Result<Vec<DocumentDescriptor>, StoreError>;

    /// Raw bytes of one document.
    fn fetch(&self, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Open the store selected by `[store] provider`.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn DocumentStore>, StoreError> {
    match config.provider {
        StoreProvider::S3 => Ok(Box::new(S3Store::connect(config)?)),
        StoreProvider::Local => Ok(Box::new(LocalStore::new(&config.path))),
    }
}
