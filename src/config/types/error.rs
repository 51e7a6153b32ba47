//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config file `{0}` not found")]
    NotFound(PathBuf),

    // Displayed in full by itself; a source() would repeat it
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found in the config, tied to the field that caused it.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_args!("[{}]", self.field.as_str()).cyan(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {hint}", "hint:".yellow())?;
        }
        Ok(())
    }
}

/// Everything one validation pass found, errors and warnings together.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    entries: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, field: FieldPath, message: String, hint: Option<String>) {
        self.entries.push(ConfigDiagnostic {
            severity,
            field,
            message,
            hint,
        });
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Error, field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(Severity::Error, field, message.into(), Some(hint.into()));
    }

    /// Record a problem that does not stop the run.
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Warning, field, message.into(), None);
    }

    fn of(&self, severity: Severity) -> Vec<&ConfigDiagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    pub fn errors(&self) -> Vec<&ConfigDiagnostic> {
        self.of(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&ConfigDiagnostic> {
        self.of(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// Number of errors.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.errors().len()
    }

    /// No errors and no warnings.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn print_warnings(&self) {
        for warning in self.warnings() {
            crate::log!("warning"; "{warning}");
        }
    }

    /// `Err(self)` when at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors();
        write!(f, "{}", "invalid configuration".red().bold())?;
        for err in &errors {
            write!(f, "\n{} {err}", "→".red())?;
        }
        if errors.len() > 1 {
            write!(f, "\n{} errors", errors.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    const FIELD: FieldPath = FieldPath::new("store.bucket");

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("feed.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("feed.toml"));

        let missing = ConfigError::NotFound(PathBuf::from("feed.toml"));
        assert!(missing.to_string().contains("not found"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FIELD, "careful");
        assert!(!diag.is_empty());
        assert!(!diag.has_errors());
        assert_eq!(diag.len(), 0);
        assert!(diag.into_result().is_ok());
    }

    #[test]
    fn test_errors_are_collected() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FIELD, "first");
        diag.warn(FIELD, "aside");
        diag.error_with_hint(FIELD, "second", "fix it");
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[1].hint.as_deref(), Some("fix it"));

        let err = diag.into_result().unwrap_err();
        let display = err.to_string();
        assert!(display.contains("first"));
        assert!(display.contains("second"));
        assert!(!display.contains("aside"));
    }
}
