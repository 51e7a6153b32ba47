//! Publishing through an external command.

use super::{PublishError, Publisher};
use crate::config::{FeedFormat, FeedSiteConfig};
use crate::log;
use crate::utils::exec::Cmd;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Runs `[publish] command` from the project root.
///
/// Arguments may reference `$FEED_PATH`, `$FEED_DIR`, `$FEED_FORMAT` and
/// `$FEED_ROOT`; the same values are exported to the child's environment.
/// The command's combined output is printed as-is.
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    command: Vec<String>,
    root: PathBuf,
    format: FeedFormat,
    pty: bool,
}

impl CommandPublisher {
    pub fn new(command: Vec<String>, root: impl Into<PathBuf>, format: FeedFormat) -> Self {
        Self {
            command,
            root: root.into(),
            format,
            pty: false,
        }
    }

    pub fn from_config(config: &FeedSiteConfig) -> Self {
        Self::new(config.publish.command.clone(), &config.root, config.feed.format)
            .pty(config.publish.pty)
    }

    pub fn pty(mut self, enable: bool) -> Self {
        self.pty = enable;
        self
    }

    fn display_name(&self) -> &str {
        self.command.first().map_or("", String::as_str)
    }

    /// `$FEED_*` variables for one run.
    fn feed_vars(&self, feed_path: &Path) -> FxHashMap<String, String> {
        let mut vars = FxHashMap::default();
        vars.insert("FEED_PATH".into(), feed_path.display().to_string());
        vars.insert(
            "FEED_DIR".into(),
            feed_path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );
        vars.insert("FEED_FORMAT".into(), self.format.label().into());
        vars.insert("FEED_ROOT".into(), self.root.display().to_string());
        vars
    }
}

/// Replace `$NAME` occurrences with values from `vars`.
fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            vars.iter().fold(arg.clone(), |acc, (key, value)| {
                acc.replace(&format!("${key}"), value)
            })
        })
        .collect()
}

impl Publisher for CommandPublisher {
    fn publish(&self, feed_path: &Path) -> Result<(), PublishError> {
        if self.command.is_empty() {
            return Err(PublishError::NotConfigured);
        }

        let vars = self.feed_vars(feed_path);
        let resolved = resolve_args(&self.command, &vars);

        log!("publish"; "`{}` running", self.display_name());

        let result = Cmd::from_slice(&resolved)
            .cwd(&self.root)
            .envs(&vars)
            .pty(self.pty)
            .run()?;

        if !result.success {
            return Err(PublishError::Failed {
                command: resolved.join(" "),
                code: result.code,
                output: result.output,
            });
        }

        let output = result.output.trim_end();
        if !output.is_empty() {
            println!("{output}");
        }
        log!("publish"; "done");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_args() {
        let mut vars = FxHashMap::default();
        vars.insert("FEED_PATH".into(), "/site/public/rss.xml".into());
        vars.insert("FEED_DIR".into(), "/site/public".into());

        let args = vec![
            "netlify".into(),
            "deploy".into(),
            "--dir".into(),
            "$FEED_DIR".into(),
            "--file=$FEED_PATH".into(),
        ];

        let resolved = resolve_args(&args, &vars);
        assert_eq!(resolved[0], "netlify");
        assert_eq!(resolved[3], "/site/public");
        assert_eq!(resolved[4], "--file=/site/public/rss.xml");
    }

    #[test]
    fn test_resolve_args_unknown_var_kept() {
        let vars = FxHashMap::default();
        let resolved = resolve_args(&["$HOME/bin/upload".to_string()], &vars);
        assert_eq!(resolved, ["$HOME/bin/upload"]);
    }

    #[test]
    fn test_feed_vars() {
        let publisher = CommandPublisher::new(vec!["upload".into()], "/site", FeedFormat::Rss);
        let vars = publisher.feed_vars(Path::new("/site/public/rss.xml"));

        assert_eq!(vars["FEED_PATH"], "/site/public/rss.xml");
        assert_eq!(vars["FEED_DIR"], "/site/public");
        assert_eq!(vars["FEED_FORMAT"], "rss");
        assert_eq!(vars["FEED_ROOT"], "/site");
    }

    #[test]
    fn test_empty_command() {
        let publisher = CommandPublisher::new(Vec::new(), "/", FeedFormat::Atom);
        assert!(matches!(
            publisher.publish(Path::new("rss.xml")),
            Err(PublishError::NotConfigured)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_sees_feed() {
        let dir = TempDir::new().unwrap();
        let feed = dir.path().join("rss.xml");
        std::fs::write(&feed, "<feed/>").unwrap();

        let command = ["sh", "-c", "test -f \"$FEED_PATH\" && test \"$FEED_FORMAT\" = atom"]
            .map(String::from)
            .to_vec();
        let publisher = CommandPublisher::new(command, dir.path(), FeedFormat::Atom);

        publisher.publish(&feed).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_failure_carries_output() {
        let dir = TempDir::new().unwrap();
        let command = ["sh", "-c", "echo 'Deploy failed'; exit 4"]
            .map(String::from)
            .to_vec();
        let publisher = CommandPublisher::new(command, dir.path(), FeedFormat::Atom);

        let err = publisher.publish(&dir.path().join("rss.xml")).unwrap_err();
        match err {
            PublishError::Failed { code, output, .. } => {
                assert_eq!(code, Some(4));
                assert_eq!(output, "Deploy failed\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
