//! Post naming: display titles and permalinks derived from object keys.
//!
//! Both derivations are pure functions of the object key (and, for slugs,
//! its last-modified time), so rebuilding the feed from an unchanged bucket
//! reproduces byte-identical titles, links and ids.
//!
//! | Module  | Purpose                                           |
//! |---------|---------------------------------------------------|
//! | `title` | `rss-feed-for-ipad.txt` → `RSS Feed For iPad`     |
//! | `slug`  | `hello-world.txt` → `<base>/2022/11/hello-world`  |

mod slug;
mod title;

pub use slug::derive_slug;
pub use title::{BUILTIN_OVERRIDES, TitleOverrides, derive_title};

use crate::config::NamingConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("cannot derive a name from `{0}`: {1}")]
    InvalidInput(String, &'static str),
}

/// Rules shared by title and slug derivation, built once from `[naming]`.
#[derive(Debug, Clone)]
pub struct NamingRules {
    /// Content suffix stripped from keys (e.g. `.txt`).
    pub suffix: String,
    /// Word separator inside file names.
    pub separator: char,
    /// Words rendered with fixed capitalization.
    pub overrides: TitleOverrides,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            suffix: ".txt".into(),
            separator: '-',
            overrides: TitleOverrides::builtin(),
        }
    }
}

impl NamingRules {
    pub fn from_config(config: &NamingConfig) -> Self {
        Self {
            suffix: config.suffix.clone(),
            separator: config.separator,
            overrides: TitleOverrides::from_pairs(&config.overrides),
        }
    }

    /// File name of `key` without directories or the content suffix.
    ///
    /// Object keys may carry a `posts/` style prefix; only the last segment
    /// participates in naming.
    pub fn stem<'a>(&self, key: &'a str) -> Result<&'a str, NamingError> {
        if key.is_empty() {
            return Err(NamingError::InvalidInput(key.to_string(), "empty file name"));
        }

        let file_name = key.rsplit('/').next().unwrap_or(key);
        let stem = file_name.strip_suffix(self.suffix.as_str()).unwrap_or(file_name);

        if stem.is_empty() {
            return Err(NamingError::InvalidInput(key.to_string(), "nothing left after the suffix"));
        }
        Ok(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_strips_suffix() {
        let rules = NamingRules::default();
        assert_eq!(rules.stem("hello-world.txt"), Ok("hello-world"));
    }

    #[test]
    fn test_stem_without_suffix_is_unchanged() {
        let rules = NamingRules::default();
        assert_eq!(rules.stem("hello-world.md"), Ok("hello-world.md"));
    }

    #[test]
    fn test_stem_drops_key_prefix() {
        let rules = NamingRules::default();
        assert_eq!(rules.stem("posts/2022/hello.txt"), Ok("hello"));
    }

    #[test]
    fn test_stem_rejects_empty() {
        let rules = NamingRules::default();
        assert!(matches!(rules.stem(""), Err(NamingError::InvalidInput(..))));
        assert!(matches!(rules.stem(".txt"), Err(NamingError::InvalidInput(..))));
        assert!(matches!(rules.stem("posts/"), Err(NamingError::InvalidInput(..))));
    }

    #[test]
    fn test_from_config_uses_configured_table() {
        let mut config = NamingConfig::default();
        config.suffix = ".md".into();
        config.separator = '_';
        config.overrides.clear();
        config.overrides.insert("api".into(), "API".into());

        let rules = NamingRules::from_config(&config);
        assert_eq!(derive_title("my_api_notes.md", &rules).unwrap(), "My API Notes");
    }
}
