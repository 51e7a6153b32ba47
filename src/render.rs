//! Markdown to HTML rendering using pulldown-cmark.
//!
//! Rendering is a pure function of the input bytes. A document that cannot be
//! rendered breaks the build: the caller aborts the run instead of skipping it.

use crate::config::MarkdownConfig;
use pulldown_cmark::{Options, Parser, html};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("`{key}` is not valid UTF-8 markdown")]
    InvalidUtf8 {
        key: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Options for markdown conversion.
///
/// Everything off renders plain CommonMark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
}

impl MarkdownOptions {
    pub fn from_config(config: &MarkdownConfig) -> Self {
        Self {
            tables: config.tables,
            footnotes: config.footnotes,
            strikethrough: config.strikethrough,
            task_lists: config.task_lists,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Render a stored document to HTML.
///
/// `key` only labels the error.
pub fn render(key: &str, markdown: &[u8], options: MarkdownOptions) -> Result<String, RenderError> {
    let source = std::str::from_utf8(markdown).map_err(|source| RenderError::InvalidUtf8 {
        key: key.to_string(),
        source,
    })?;

    let parser = Parser::new_ext(source, options.to_pulldown_options());
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_commonmark() {
        let html = render("a.txt", b"# Hello\n\nSome *text*.\n", MarkdownOptions::default()).unwrap();
        assert_eq!(html, "<h1>Hello</h1>\n<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn test_render_is_pure() {
        let input = b"- one\n- two\n";
        let a = render("a.txt", input, MarkdownOptions::default()).unwrap();
        let b = render("a.txt", input, MarkdownOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(render("a.txt", b"", MarkdownOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_render_invalid_utf8_names_key() {
        let err = render("broken.txt", &[0x66, 0xff, 0xfe], MarkdownOptions::default()).unwrap_err();
        assert!(err.to_string().contains("broken.txt"));
    }

    #[test]
    fn test_strikethrough_only_when_enabled() {
        let plain = render("a.txt", b"~~gone~~", MarkdownOptions::default()).unwrap();
        assert!(!plain.contains("<del>"));

        let options = MarkdownOptions {
            strikethrough: true,
            ..MarkdownOptions::default()
        };
        let extended = render("a.txt", b"~~gone~~", options).unwrap();
        assert!(extended.contains("<del>gone</del>"));
    }

    #[test]
    fn test_tables_extension() {
        let options = MarkdownOptions {
            tables: true,
            ..MarkdownOptions::default()
        };
        let html = render("a.txt", b"| a | b |\n|---|---|\n| 1 | 2 |\n", options).unwrap();
        assert!(html.contains("<table>"));
    }
}
