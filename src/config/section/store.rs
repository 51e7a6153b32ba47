//! `[store]` configuration.
//!
//! Selects where posts come from. `s3` talks to an S3-compatible bucket;
//! `local` reads a directory, which is handy for drafting without a bucket.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Region used when neither the file nor `S3_REGION` sets one.
///
/// Applied after the environment overlay, so the field stays blank until then.
pub const DEFAULT_REGION: &str = "ap-southeast-2";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    #[default]
    S3,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub provider: StoreProvider,
    /// Bucket name. Env: `S3_BUCKET`.
    pub bucket: String,
    /// Env: `S3_REGION`.
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: String,
    /// Env: `ACCESS_KEY`.
    pub access_key: String,
    /// Env: `SECRET_KEY`.
    pub secret_key: String,
    /// Only keys under this prefix are listed.
    pub prefix: String,
    /// Directory for the local provider (relative to project root).
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::S3,
            bucket: String::new(),
            region: String::new(),
            endpoint: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            prefix: String::new(),
            path: "posts".into(),
        }
    }
}

impl StoreConfig {
    pub const BUCKET: FieldPath = FieldPath::new("store.bucket");
    pub const ACCESS_KEY: FieldPath = FieldPath::new("store.access_key");
    pub const PATH: FieldPath = FieldPath::new("store.path");

    /// Both static keys are present.
    pub fn has_keys(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }

    /// Fill empty fields from the environment, then default the region.
    ///
    /// Values in the file win; `lookup` is only consulted for blanks.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fill = |field: &mut String, var: &str| {
            if field.is_empty()
                && let Some(value) = lookup(var).filter(|v| !v.is_empty())
            {
                *field = value;
            }
        };

        fill(&mut self.bucket, "S3_BUCKET");
        fill(&mut self.access_key, "ACCESS_KEY");
        fill(&mut self.secret_key, "SECRET_KEY");
        fill(&mut self.region, "S3_REGION");

        if self.region.is_empty() {
            self.region = DEFAULT_REGION.into();
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match self.provider {
            StoreProvider::S3 => {
                if self.bucket.is_empty() {
                    diag.error_with_hint(
                        Self::BUCKET,
                        "no bucket configured",
                        format!("set {} or the S3_BUCKET environment variable", Self::BUCKET),
                    );
                }
                if !self.has_keys() {
                    diag.warn(
                        Self::ACCESS_KEY,
                        "no static credentials, using the default credential chain",
                    );
                }
            }
            StoreProvider::Local => {
                if self.path.as_os_str().is_empty() {
                    diag.error(Self::PATH, "local store needs a directory");
                }
            }
        }
    }
}
