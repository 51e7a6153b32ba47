//! `[publish]` configuration.
//!
//! The command run by `publish` once the feed file is in place.
//!
//! ```toml
//! [publish]
//! command = ["./upload_rss_to_netlify", "$FEED_PATH"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Program and arguments. `$FEED_*` placeholders are substituted.
    pub command: Vec<String>,
    /// Run inside a pseudo-terminal so tools keep their colored output.
    pub pty: bool,
}

impl PublishConfig {
    pub const COMMAND: FieldPath = FieldPath::new("publish.command");

    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.command.first().is_some_and(|program| program.trim().is_empty()) {
            diag.error(Self::COMMAND, "program name is empty");
        }
    }
}
