//! `[site]` configuration.
//!
//! Channel-level metadata. `url` doubles as the base of every item permalink.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Channel title.
    pub title: String,
    /// Site origin, e.g. `https://example.com`.
    pub url: String,
    pub description: String,
    /// Author name, repeated on every item.
    pub author: String,
    pub email: String,
    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            description: String::new(),
            author: String::new(),
            email: String::new(),
            language: "en".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const EMAIL: FieldPath = FieldPath::new("site.email");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` is set, parses, uses http(s) and has a host
    /// - `title` is set
    /// - `email` looks like an address when set
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error_with_hint(Self::TITLE, "site title is empty", "set a channel title");
        }

        if self.url.is_empty() {
            diag.error_with_hint(
                Self::URL,
                format!("{} is required to build permalinks", Self::URL),
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            );
        } else {
            match url::Url::parse(&self.url) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        if !self.email.is_empty() && !self.email.contains('@') {
            diag.warn(Self::EMAIL, "does not look like an email address");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn validate(site: &SiteInfoConfig) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let site = SiteInfoConfig::default();
        assert_eq!(site.language, "en");
        assert!(site.url.is_empty());
    }

    #[test]
    fn test_parse() {
        let config = test_parse_config("");
        assert_eq!(config.site.title, "Test");
        assert_eq!(config.site.url, "https://example.com");
    }

    #[test]
    fn test_missing_url_is_error() {
        let site = SiteInfoConfig {
            title: "Blog".into(),
            ..Default::default()
        };
        let diag = validate(&site);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, SiteInfoConfig::URL);
    }

    #[test]
    fn test_bad_scheme_is_error() {
        let site = SiteInfoConfig {
            title: "Blog".into(),
            url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(validate(&site).has_errors());
    }

    #[test]
    fn test_unparseable_url_is_error() {
        let site = SiteInfoConfig {
            title: "Blog".into(),
            url: "example.com".into(),
            ..Default::default()
        };
        assert!(validate(&site).has_errors());
    }

    #[test]
    fn test_valid_site() {
        let site = SiteInfoConfig {
            title: "Blog".into(),
            url: "https://harrisonmalone.dev".into(),
            email: "me@example.com".into(),
            ..Default::default()
        };
        assert!(validate(&site).is_empty());
    }
}
