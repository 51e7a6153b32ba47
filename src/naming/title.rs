//! Display titles from file names.

use super::{NamingError, NamingRules};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Words that keep a fixed spelling instead of being title-cased.
pub const BUILTIN_OVERRIDES: [(&str, &str); 2] = [("ipad", "iPad"), ("rss", "RSS")];

/// Immutable lowercase-word → display-form table.
#[derive(Debug, Clone, Default)]
pub struct TitleOverrides {
    words: FxHashMap<String, String>,
}

impl TitleOverrides {
    /// The default table (`rss` → `RSS`, `ipad` → `iPad`).
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_OVERRIDES
                .iter()
                .map(|(word, display)| ((*word).to_string(), (*display).to_string()))
                .collect(),
        }
    }

    /// Build from configured pairs. Keys are matched case-insensitively.
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        Self {
            words: pairs
                .iter()
                .map(|(word, display)| (word.to_lowercase(), display.clone()))
                .collect(),
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(&word.to_lowercase()).map(String::as_str)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Derive a display title from a file name.
///
/// `rss-feed-for-ipad.txt` → `RSS Feed For iPad`. Empty segments from
/// repeated separators are dropped.
pub fn derive_title(filename: &str, rules: &NamingRules) -> Result<String, NamingError> {
    let stem = rules.stem(filename)?;

    let words: Vec<String> = stem
        .split(rules.separator)
        .filter(|word| !word.is_empty())
        .map(|word| match rules.overrides.get(word) {
            Some(display) => display.to_string(),
            None => title_case(word),
        })
        .collect();

    if words.is_empty() {
        return Err(NamingError::InvalidInput(
            filename.to_string(),
            "no words between separators",
        ));
    }

    Ok(words.join(" "))
}

/// First character upper-cased, the rest lower-cased.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
