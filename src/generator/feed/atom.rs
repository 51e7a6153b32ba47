//! Atom 1.0 feed serialization.

use super::FeedError;
use super::common::{Feed, FeedAuthor, FeedItem};
use crate::utils::date::DateTimeUtc;
use atom_syndication::{
    Content, ContentBuilder, Entry, EntryBuilder, FeedBuilder, FixedDateTime, GeneratorBuilder,
    Link, LinkBuilder, Person, PersonBuilder, Text,
};

/// Serialize a feed as an Atom 1.0 document.
pub fn to_xml(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let entries = feed
        .items
        .iter()
        .map(item_to_entry)
        .collect::<Result<Vec<Entry>, _>>()?;

    let alternate_link: Link = LinkBuilder::default()
        .href(feed.meta.link.clone())
        .rel("alternate".to_string())
        .build();

    let atom = FeedBuilder::default()
        .title(Text::plain(feed.meta.title.clone()))
        .id(feed.meta.link.clone())
        .updated(fixed(feed.meta.updated)?)
        .authors(vec![person(&feed.meta.author)])
        .links(vec![alternate_link])
        .subtitle(Some(Text::plain(feed.meta.description.clone())))
        .generator(Some(
            GeneratorBuilder::default()
                .value(env!("CARGO_PKG_NAME"))
                .version(Some(env!("CARGO_PKG_VERSION").to_string()))
                .build(),
        ))
        .lang(Some(feed.meta.language.clone()))
        .entries(entries)
        .build();

    Ok(atom.write_to(Vec::new())?)
}

fn item_to_entry(item: &FeedItem) -> Result<Entry, FeedError> {
    let link: Link = LinkBuilder::default()
        .href(item.link.clone())
        .rel("alternate".to_string())
        .build();

    let content: Content = ContentBuilder::default()
        .value(Some(item.content.clone()))
        .content_type(Some("html".to_string()))
        .build();

    Ok(EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(item.id.clone())
        .updated(fixed(item.updated)?)
        .published(Some(fixed(item.created)?))
        .links(vec![link])
        .content(Some(content))
        .authors(vec![person(&item.author)])
        .build())
}

fn person(author: &FeedAuthor) -> Person {
    PersonBuilder::default()
        .name(author.name.clone())
        .email((!author.email.is_empty()).then(|| author.email.clone()))
        .build()
}

fn fixed(dt: DateTimeUtc) -> Result<FixedDateTime, FeedError> {
    let stamp = dt.to_rfc3339();
    stamp
        .parse::<FixedDateTime>()
        .map_err(|_| FeedError::Timestamp(stamp))
}
