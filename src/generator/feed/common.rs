//! Feed model shared by the RSS and Atom serializers.

use crate::config::SiteInfoConfig;
use crate::naming::{NamingError, NamingRules, derive_slug, derive_title};
use crate::store::DocumentDescriptor;
use crate::utils::date::DateTimeUtc;

/// Fixed identity attached to the channel and every item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedAuthor {
    pub name: String,
    pub email: String,
}

/// Channel-level fields.
#[derive(Debug, Clone)]
pub struct FeedMetadata {
    pub title: String,
    /// Site origin; also the base of every item permalink.
    pub link: String,
    pub description: String,
    pub language: String,
    pub author: FeedAuthor,
    /// Build time of this run.
    pub updated: DateTimeUtc,
}

impl FeedMetadata {
    pub fn from_site(site: &SiteInfoConfig, updated: DateTimeUtc) -> Self {
        Self {
            title: site.title.clone(),
            link: site.url.trim_end_matches('/').to_string(),
            description: site.description.clone(),
            language: site.language.clone(),
            author: FeedAuthor {
                name: site.author.clone(),
                email: site.email.clone(),
            },
            updated,
        }
    }
}

/// One post in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub id: String,
    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,
    /// Rendered HTML body.
    pub content: String,
    pub author: FeedAuthor,
}

/// A complete feed, items newest first.
#[derive(Debug, Clone)]
pub struct Feed {
    pub meta: FeedMetadata,
    pub items: Vec<FeedItem>,
}

/// Combine a rendered body with the names derived from its descriptor.
///
/// `link` and `id` are the same permalink.
pub fn build_item(
    html: String,
    descriptor: &DocumentDescriptor,
    meta: &FeedMetadata,
    rules: &NamingRules,
) -> Result<FeedItem, NamingError> {
    let slug = derive_slug(&meta.link, descriptor.last_modified, &descriptor.key, rules)?;

    Ok(FeedItem {
        title: derive_title(&descriptor.key, rules)?,
        link: slug.clone(),
        id: slug,
        created: descriptor.last_modified,
        updated: descriptor.last_modified,
        content: html,
        author: meta.author.clone(),
    })
}

/// Aggregate items, in the order given, under the channel metadata.
pub fn build_feed(meta: FeedMetadata, items: Vec<FeedItem>) -> Feed {
    Feed { meta, items }
}
