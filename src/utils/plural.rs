//! Counts with nouns for log lines.

/// `"1 post"`, `"3 posts"`, `"0 items"`.
///
/// Only regular English plurals; every noun this crate logs is one.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
