//! Output generators.
//!
//! - **Feed**: RSS/Atom documents assembled from rendered posts

pub mod feed;

use quick_xml::{Reader, Writer, events::Event};
use std::borrow::Cow;

/// Drop whitespace-only text between tags when `enabled`.
///
/// Works on XML events, so text nodes (including escaped HTML bodies) are
/// written back untouched. Blank runs next to an entity reference or other
/// text are part of a text node and are kept.
pub fn minify_xml(content: &[u8], enabled: bool) -> quick_xml::Result<Cow<'_, [u8]>> {
    if !enabled {
        return Ok(Cow::Borrowed(content));
    }

    let mut reader = Reader::from_reader(content);
    let mut writer = Writer::new(Vec::with_capacity(content.len()));
    let mut pending: Option<Event<'_>> = None;
    let mut after_markup = true;

    loop {
        let event = reader.read_event()?;
        let blank = matches!(&event, Event::Text(text) if text.iter().all(u8::is_ascii_whitespace));
        match event {
            Event::Eof => break,
            Event::Text(_) if blank && after_markup => {
                pending = Some(event);
                continue;
            }
            Event::Start(_)
            | Event::End(_)
            | Event::Empty(_)
            | Event::Decl(_)
            | Event::Comment(_)
            | Event::PI(_)
            | Event::DocType(_) => {
                pending = None;
                after_markup = true;
            }
            _ => {
                if let Some(blank) = pending.take() {
                    writer.write_event(blank)?;
                }
                after_markup = false;
            }
        }
        writer.write_event(event)?;
    }

    Ok(Cow::Owned(writer.into_inner()))
}
