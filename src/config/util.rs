//! Configuration utility functions.

use crate::log;
use crate::utils::path::normalize_path;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/blog/posts/     ← cwd
/// /home/user/blog/feed.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Resolve a configured path against the project root.
///
/// `~` is expanded; relative paths are joined onto `root`.
pub fn resolve_config_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}

/// Read `KEY=value` pairs from `<root>/.env`.
///
/// The process environment is left untouched. A missing or malformed file
/// only produces a warning.
pub fn read_dotenv(root: &Path) -> FxHashMap<String, String> {
    let path = root.join(".env");
    let mut vars = FxHashMap::default();

    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            log!("warning"; "no .env file at {}", path.display());
            return vars;
        }
        Err(err) => {
            log!("warning"; "cannot read {}: {}", path.display(), err);
            return vars;
        }
    };

    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(err) => {
                log!("warning"; "stopped reading {}: {}", path.display(), err);
                break;
            }
        }
    }
    vars
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("posts/drafts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("feed.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("feed.toml")).unwrap();
        assert_eq!(found, dir.path().join("feed.toml"));
    }

    #[test]
    fn test_find_config_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file_from(dir.path(), Path::new("no-such-config.toml")).is_none());
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file_from(dir.path(), &path).is_none());
        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &path), Some(path));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        let relative = resolve_config_path(Path::new("public/rss.xml"), root);
        assert_eq!(relative, root.join("public/rss.xml"));

        let absolute = resolve_config_path(Path::new("/var/feeds/rss.xml"), root);
        assert_eq!(absolute, PathBuf::from("/var/feeds/rss.xml"));
    }

    #[test]
    fn test_read_dotenv() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "# credentials\nS3_BUCKET=posts\nACCESS_KEY=\"AK\"\n",
        )
        .unwrap();

        let vars = read_dotenv(dir.path());
        assert_eq!(vars.get("S3_BUCKET").map(String::as_str), Some("posts"));
        assert_eq!(vars.get("ACCESS_KEY").map(String::as_str), Some("AK"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_read_dotenv_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(read_dotenv(dir.path()).is_empty());
    }
}
