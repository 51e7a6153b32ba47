//! A directory of posts on disk, for local previews and tests.

use super::{DocumentDescriptor, DocumentStore, StoreError};
use crate::log;
use crate::utils::date::DateTimeUtc;
use std::fs;
use std::path::{Path, PathBuf};

/// Files directly inside `root` are documents; their mtime is the
/// last-modified time. Hidden files and subdirectories are ignored.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn io_error(&self, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
        let path = path.to_path_buf();
        move |err| StoreError::Io(path, err)
    }
}

impl DocumentStore for LocalStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn list(&self) -> Result<Vec<DocumentDescriptor>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(self.io_error(&self.root))?;

        let mut descriptors = Vec::new();
        for entry in entries {
            let entry = entry.map_err(self.io_error(&self.root))?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let metadata = entry.metadata().map_err(self.io_error(&path))?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().map_err(self.io_error(&path))?;
            descriptors.push(DocumentDescriptor::new(
                name,
                DateTimeUtc::from_system_time(modified),
            ));
        }

        // read_dir order is platform-defined; list by name so reruns agree
        descriptors.sort_by(|a, b| a.key.cmp(&b.key));

        log!("store"; "listed {} document(s) in {}", descriptors.len(), self.location());
        Ok(descriptors)
    }

    fn fetch(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == ".." {
            return Err(StoreError::NotFound(key.to_string()));
        }

        let path = self.root.join(key);
        if !path.is_file() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        fs::read(&path).map_err(self.io_error(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn write_with_mtime(dir: &Path, name: &str, body: &str, secs: u64) {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_list_files_with_mtime() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "b-post.txt", "# B", 1_667_433_600);
        write_with_mtime(dir.path(), "a-post.txt", "# A", 1_600_000_000);

        let store = LocalStore::new(dir.path());
        let docs = store.list().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].key, "a-post.txt");
        assert_eq!(docs[1].key, "b-post.txt");
        assert_eq!(docs[1].last_modified, DateTimeUtc::from_ymd(2022, 11, 3));
    }

    #[test]
    fn test_list_skips_hidden_and_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".DS_Store"), "").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("post.txt"), "hi").unwrap();

        let docs = LocalStore::new(dir.path()).list().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].key, "post.txt");
    }

    #[test]
    fn test_list_missing_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(&dir.path().join("nope"));
        assert!(matches!(store.list(), Err(StoreError::Io(..))));
    }

    #[test]
    fn test_fetch_reads_bytes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("post.txt"), "hello").unwrap();
        let store = LocalStore::new(dir.path());
        assert_eq!(store.fetch("post.txt").unwrap(), b"hello");
    }

    #[test]
    fn test_fetch_rejects_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(matches!(store.fetch("../etc/passwd"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.fetch("missing.txt"), Err(StoreError::NotFound(_))));
    }
}
