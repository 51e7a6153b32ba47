//! In-memory store for pipeline tests.

use super::{DocumentDescriptor, DocumentStore, StoreError};
use crate::utils::date::DateTimeUtc;
use std::cell::RefCell;

#[derive(Default)]
pub struct MemoryStore {
    documents: Vec<(DocumentDescriptor, Vec<u8>)>,
    fetched: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, last_modified: DateTimeUtc, body: impl Into<Vec<u8>>) -> Self {
        self.documents
            .push((DocumentDescriptor::new(key, last_modified), body.into()));
        self
    }

    /// Keys fetched so far, in fetch order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn location(&self) -> String {
        "memory".into()
    }

    fn list(&self) -> Result<Vec<DocumentDescriptor>, StoreError> {
        Ok(self.documents.iter().map(|(d, _)| d.clone()).collect())
    }

    fn fetch(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.fetched.borrow_mut().push(key.to_string());
        self.documents
            .iter()
            .find(|(d, _)| d.key == key)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}
