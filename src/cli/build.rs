//! Feed building orchestration.
//!
//! Pipeline phases:
//! - **List** - descriptors from the configured store
//! - **Order** - newest first, ties in listing order
//! - **Items** - fetch, render and name each post, one at a time
//! - **Serialize** - RSS or Atom, per `[feed] format`
//! - **Write** - atomic replace of the feed file
//! - **Publish** - hand the written file to the publisher
//!
//! Any failure stops the run before the write, so the feed file on disk is
//! either the previous one or a complete new one.

use crate::{
    config::FeedSiteConfig,
    debug,
    generator::feed::{
        FeedItem, FeedMetadata, build_feed, build_item, serialize, write_feed,
    },
    log,
    logger::ProgressLine,
    naming::NamingRules,
    publish::Publisher,
    render::{MarkdownOptions, render},
    store::{DocumentDescriptor, DocumentStore, order},
    utils::{date::DateTimeUtc, plural_count},
};
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub path: PathBuf,
    pub items: usize,
    pub bytes: usize,
}

/// Per-run settings shared by every item.
struct ItemContext<'a> {
    store: &'a dyn DocumentStore,
    rules: NamingRules,
    markdown: MarkdownOptions,
    meta: &'a FeedMetadata,
}

/// Build the feed from `store`, write it, then publish it.
///
/// Pipeline: list -> order -> items -> serialize -> write -> publish
pub fn build_feed_file(
    config: &FeedSiteConfig,
    store: &dyn DocumentStore,
    publisher: &dyn Publisher,
    built_at: DateTimeUtc,
) -> Result<BuildReport> {
    let descriptors = store
        .list()
        .with_context(|| format!("listing {}", store.location()))?;
    log!("store"; "{} in {}", plural_count(descriptors.len(), "post"), store.location());

    let ordered = order(descriptors);

    let meta = FeedMetadata::from_site(&config.site, built_at);
    let ctx = ItemContext {
        store,
        rules: NamingRules::from_config(&config.naming),
        markdown: MarkdownOptions::from_config(&config.markdown),
        meta: &meta,
    };
    let items = collect_items(&ctx, &ordered)?;
    let count = items.len();

    let feed = build_feed(meta, items);
    let bytes = serialize(&feed, config.feed.format, config.feed.minify)
        .context("serializing feed")?;

    let path = config.feed.path.clone();
    write_feed(&path, &bytes)?;
    log!(
        "feed";
        "{} ({}, {})",
        path.display(),
        config.feed.format.label(),
        plural_count(count, "item")
    );

    publisher
        .publish(&path)
        .with_context(|| format!("publishing {}", path.display()))?;

    Ok(BuildReport {
        path,
        items: count,
        bytes: bytes.len(),
    })
}

/// Turn every descriptor into a feed item, stopping at the first failure.
fn collect_items(ctx: &ItemContext<'_>, ordered: &[DocumentDescriptor]) -> Result<Vec<FeedItem>> {
    if ordered.is_empty() {
        log!("warning"; "no posts found, the feed will be empty");
        return Ok(Vec::new());
    }

    let progress = ProgressLine::new("fetch", ordered.len());
    let mut items = Vec::with_capacity(ordered.len());

    for descriptor in ordered {
        match build_one(ctx, descriptor) {
            Ok(item) => {
                items.push(item);
                progress.inc();
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        }
    }

    progress.finish();

    for id in duplicate_ids(&items) {
        log!("warning"; "several posts share the id {}, readers may only see one", id);
    }
    Ok(items)
}

/// Ids that appear more than once, in feed order.
///
/// Naming only looks at the last key segment, so `a/post.txt` and
/// `b/post.txt` from the same month collide.
fn duplicate_ids(items: &[FeedItem]) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    let mut reported = FxHashSet::default();
    items
        .iter()
        .map(|item| item.id.as_str())
        .filter(|id| !seen.insert(*id) && reported.insert(*id))
        .collect()
}

fn build_one(ctx: &ItemContext<'_>, descriptor: &DocumentDescriptor) -> Result<FeedItem> {
    let key = &descriptor.key;

    let markdown = ctx.store.fetch(key)?;
    let html = render(key, &markdown, ctx.markdown)?;
    debug!("render"; "{} ({} -> {} bytes)", key, markdown.len(), html.len());

    let item = build_item(html, descriptor, ctx.meta, &ctx.rules)
        .with_context(|| format!("naming `{key}`"))?;
    Ok(item)
}

// ============================================================================
// tests
// ============================================================================
