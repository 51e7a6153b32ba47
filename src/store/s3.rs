//! S3 bucket access through rust-s3's blocking client.

use super::{DocumentDescriptor, DocumentStore, StoreError};
use crate::config::StoreConfig;
use crate::utils::date::DateTimeUtc;
use crate::{debug, log};
use ::s3::bucket::Bucket;
use ::s3::creds::Credentials;
use ::s3::region::Region;

pub struct S3Store {
    bucket: Bucket,
    name: String,
    prefix: String,
}

impl S3Store {
    /// Open the configured bucket.
    ///
    /// Without explicit keys, rust-s3's default credential chain is used
    /// (environment, profile, instance metadata).
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let connect_error = |message: String| StoreError::Connect {
            bucket: config.bucket.clone(),
            message,
        };

        let custom_endpoint = !config.endpoint.is_empty();
        let region = if custom_endpoint {
            Region::Custom {
                region: config.region.clone(),
                endpoint: config.endpoint.clone(),
            }
        } else {
            config
                .region
                .parse::<Region>()
                .map_err(|e| connect_error(format!("invalid region `{}`: {e}", config.region)))?
        };

        let credentials = if config.has_keys() {
            Credentials::new(
                Some(config.access_key.as_str()),
                Some(config.secret_key.as_str()),
                None,
                None,
                None,
            )
        } else {
            Credentials::default()
        }
        .map_err(|e| connect_error(format!("credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| connect_error(e.to_string()))?;
        if custom_endpoint {
            bucket = bucket.with_path_style();
        }

        debug!("store"; "opened s3://{} in {}", config.bucket, config.region);

        Ok(Self {
            bucket,
            name: config.bucket.clone(),
            prefix: config.prefix.clone(),
        })
    }
}

impl DocumentStore for S3Store {
    fn location(&self) -> String {
        if self.prefix.is_empty() {
            format!("s3://{}", self.name)
        } else {
            format!("s3://{}/{}", self.name, self.prefix)
        }
    }

    fn list(&self) -> Result<Vec<DocumentDescriptor>, StoreError> {
        let pages = self
            .bucket
            .list(self.prefix.clone(), None)
            .map_err(|source| StoreError::List {
                store: self.location(),
                source,
            })?;

        let mut descriptors = Vec::new();
        for object in pages.into_iter().flat_map(|page| page.contents) {
            // Zero-byte "folder" markers are not documents
            if object.key.ends_with('/') {
                debug!("store"; "skipping folder marker `{}`", object.key);
                continue;
            }
            let last_modified =
                DateTimeUtc::parse(&object.last_modified).ok_or_else(|| StoreError::Timestamp {
                    key: object.key.clone(),
                    raw: object.last_modified.clone(),
                })?;
            descriptors.push(DocumentDescriptor::new(object.key, last_modified));
        }

        log!("store"; "listed {} document(s) in {}", descriptors.len(), self.location());
        Ok(descriptors)
    }

    fn fetch(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let response = self
            .bucket
            .get_object(key)
            .map_err(|source| StoreError::Fetch {
                key: key.to_string(),
                source,
            })?;

        match response.status_code() {
            200 => Ok(response.bytes().to_vec()),
            404 => Err(StoreError::NotFound(key.to_string())),
            status => Err(StoreError::Status {
                key: key.to_string(),
                status,
            }),
        }
    }
}
