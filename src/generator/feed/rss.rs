//! RSS 2.0 feed serialization.

use super::FeedError;
use super::common::{Feed, FeedAuthor, FeedItem};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

/// Serialize a feed as an RSS 2.0 channel.
pub fn to_xml(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let items: Vec<rss::Item> = feed.items.iter().map(item_to_rss).collect();

    let channel = ChannelBuilder::default()
        .title(feed.meta.title.clone())
        .link(feed.meta.link.clone())
        .description(feed.meta.description.clone())
        .language(Some(feed.meta.language.clone()))
        .managing_editor(rss_author(&feed.meta.author))
        .last_build_date(Some(feed.meta.updated.to_rfc2822()))
        .generator(Some(env!("CARGO_PKG_NAME").to_string()))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Validation(e.to_string()))?;

    Ok(channel.write_to(Vec::new())?)
}

fn item_to_rss(item: &FeedItem) -> rss::Item {
    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(item.link.clone()))
        .guid(Some(
            GuidBuilder::default()
                .permalink(true)
                .value(item.id.clone())
                .build(),
        ))
        .pub_date(Some(item.created.to_rfc2822()))
        .description(Some(item.content.clone()))
        .author(rss_author(&item.author))
        .build()
}

/// Format an author the way RSS expects: `email (Name)`.
///
/// A name already in that shape is kept; without an email there is no
/// valid RSS author.
fn rss_author(author: &FeedAuthor) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("author pattern is valid")
    });

    if RE_VALID_AUTHOR.is_match(&author.name) {
        return Some(author.name.clone());
    }
    if author.email.is_empty() {
        return None;
    }
    if author.name.is_empty() {
        return Some(author.email.clone());
    }
    Some(format!("{} ({})", author.email, author.name))
}
