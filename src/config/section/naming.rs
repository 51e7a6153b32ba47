//! `[naming]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::naming::BUILTIN_OVERRIDES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix stripped from object keys before naming.
    pub suffix: String,
    /// Word separator inside the stem.
    pub separator: char,
    /// Lowercased word → replacement used in titles.
    pub overrides: BTreeMap<String, String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            suffix: ".txt".into(),
            separator: '-',
            overrides: BUILTIN_OVERRIDES
                .iter()
                .map(|(word, replacement)| ((*word).to_string(), (*replacement).to_string()))
                .collect(),
        }
    }
}

impl NamingConfig {
    pub const SEPARATOR: FieldPath = FieldPath::new("naming.separator");
    pub const OVERRIDES: FieldPath = FieldPath::new("naming.overrides");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.separator == '/' || self.separator.is_whitespace() {
            diag.error(
                Self::SEPARATOR,
                format!("`{}` cannot be used as a word separator", self.separator.escape_default()),
            );
        }
        if let Some(word) = self.overrides.keys().find(|w| w.contains(self.separator)) {
            diag.warn(
                Self::OVERRIDES,
                format!("override `{word}` contains the separator and will never match"),
            );
        }
    }
}
