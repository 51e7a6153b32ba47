//! Publishing the written feed.
//!
//! A [`Publisher`] receives the path of a feed that is already complete on
//! disk. `build` uses [`NoopPublisher`]; `publish` runs the configured
//! command through [`CommandPublisher`].

mod command;

pub use command::CommandPublisher;

use crate::config::FeedSiteConfig;
use crate::utils::exec::ExecError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no publish command configured, set `publish.command`")]
    NotConfigured,

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("`{command}` exited with {}\n{output}", exit_label(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}

/// Publishes a feed file somewhere.
pub trait Publisher {
    fn publish(&self, feed_path: &Path) -> Result<(), PublishError>;
}

/// Leaves the feed where it was written.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl Publisher for NoopPublisher {
    fn publish(&self, _feed_path: &Path) -> Result<(), PublishError> {
        Ok(())
    }
}

/// The command publisher described by `[publish]`.
pub fn from_config(config: &FeedSiteConfig) -> Result<CommandPublisher, PublishError> {
    if !config.publish.is_configured() {
        return Err(PublishError::NotConfigured);
    }
    Ok(CommandPublisher::from_config(config))
}
