//! Permalinks (`<base>/<year>/<MM>/<name>`) that double as feed item ids.

use super::{NamingError, NamingRules};
use crate::utils::date::DateTimeUtc;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Month name → two-digit month.
static MONTH_NUMBERS: LazyLock<FxHashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("January", "01"),
        ("February", "02"),
        ("March", "03"),
        ("April", "04"),
        ("May", "05"),
        ("June", "06"),
        ("July", "07"),
        ("August", "08"),
        ("September", "09"),
        ("October", "10"),
        ("November", "11"),
        ("December", "12"),
    ]
    .into_iter()
    .collect()
});

/// Look up the two-digit month for a month name.
///
/// # Panics
///
/// A name missing from the table is a bug: falling back to anything would
/// publish a wrong permalink that still looks valid.
fn month_number(name: &str) -> &'static str {
    MONTH_NUMBERS
        .get(name)
        .copied()
        .unwrap_or_else(|| panic!("month `{name}` is missing from the month lookup table"))
}

/// Derive the canonical permalink for a post.
///
/// `derive_slug("https://example.com", 2022-11-03, "hello-world.txt")`
/// → `https://example.com/2022/11/hello-world`
pub fn derive_slug(
    base: &str,
    last_modified: DateTimeUtc,
    filename: &str,
    rules: &NamingRules,
) -> Result<String, NamingError> {
    let stem = rules.stem(filename)?;
    let month = month_number(last_modified.month_name());

    Ok(format!(
        "{}/{}/{}/{}",
        base.trim_end_matches('/'),
        last_modified.year,
        month,
        stem
    ))
}
