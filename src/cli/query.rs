//! `list` command implementation.
//!
//! Shows what the next build would publish, without fetching or rendering:
//! each stored post in feed order with the title and permalink it will get.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::FeedSiteConfig;
use crate::naming::{NamingRules, derive_slug, derive_title};
use crate::store::{DocumentDescriptor, DocumentStore, order};

/// One listed post.
#[derive(Debug, Serialize)]
pub struct ListedPost {
    #[serde(flatten)]
    pub descriptor: DocumentDescriptor,
    pub title: String,
    pub slug: String,
}

/// List the store in feed order with derived names.
pub fn list_posts(config: &FeedSiteConfig, store: &dyn DocumentStore) -> Result<Vec<ListedPost>> {
    let rules = NamingRules::from_config(&config.naming);
    let base = config.site.url.trim_end_matches('/');

    let descriptors = store
        .list()
        .with_context(|| format!("listing {}", store.location()))?;

    order(descriptors)
        .into_iter()
        .map(|descriptor| -> Result<ListedPost> {
            let title = derive_title(&descriptor.key, &rules)?;
            let slug = derive_slug(base, descriptor.last_modified, &descriptor.key, &rules)?;
            Ok(ListedPost {
                descriptor,
                title,
                slug,
            })
        })
        .collect()
}

/// Execute list command
pub fn run_list(config: &FeedSiteConfig, store: &dyn DocumentStore, pretty: bool) -> Result<()> {
    let posts = list_posts(config, store)?;
    let json = if pretty {
        serde_json::to_string_pretty(&posts)?
    } else {
        serde_json::to_string(&posts)?
    };
    println!("{json}");
    Ok(())
}
