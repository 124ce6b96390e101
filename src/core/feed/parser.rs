use chrono::{DateTime, Weekday};
use roxmltree::{Document, Node, ParsingOptions};

use super::types::{ParsedFeed, ParsedPost};

const PUB_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("feed payload is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("xml feed parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("item #{item} has no <{element}> element")]
    MissingElement { item: usize, element: &'static str },
    #[error("item #{item} has an empty <{element}> element")]
    EmptyElement { item: usize, element: &'static str },
}

pub fn parse_feed_bytes(raw: &[u8], canonical_base: &str) -> Result<ParsedFeed, FeedParseError> {
    let text = std::str::from_utf8(raw)?;
    if text.trim().is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)?;

    let channel_title = doc
        .descendants()
        .find(|node| is_plain_element(node, "channel"))
        .and_then(|channel| child_text(channel, "title"))
        .map(ToString::to_string);

    let posts = doc
        .descendants()
        .filter(|node| is_plain_element(node, "item"))
        .enumerate()
        .map(|(index, item)| post_from_item(item, index, canonical_base))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedFeed {
        channel_title,
        posts,
    })
}

/// Last `/` segment of the link with any query string removed.
pub fn extract_post_id(link: &str) -> &str {
    let segment = link.rsplit('/').next().unwrap_or(link);
    segment.split('?').next().unwrap_or(segment)
}

/// Formats an RFC 822 style `pubDate` as `YYYY-MM-DD` in its own offset.
///
/// Returns `None` when the value does not match; the caller keeps the raw text.
/// Day and month names must be the three-letter forms, and the value must not
/// carry leading or trailing whitespace.
pub fn format_pub_date(raw: &str) -> Option<String> {
    let (weekday, rest) = raw.split_once(',')?;
    if !is_name_abbreviation(weekday) {
        return None;
    }
    weekday.parse::<Weekday>().ok()?;
    if !rest.starts_with(char::is_whitespace) || rest.ends_with(char::is_whitespace) {
        return None;
    }
    if !rest.split_whitespace().nth(1).is_some_and(is_name_abbreviation) {
        return None;
    }
    let timestamp = DateTime::parse_from_str(rest.trim_start(), PUB_DATE_FORMAT).ok()?;
    Some(timestamp.format("%Y-%m-%d").to_string())
}

fn is_name_abbreviation(name: &str) -> bool {
    name.len() == 3 && name.chars().all(|c| c.is_ascii_alphabetic())
}

fn post_from_item(
    item: Node<'_, '_>,
    index: usize,
    canonical_base: &str,
) -> Result<ParsedPost, FeedParseError> {
    let title = required_child_text(item, index, "title")?;
    let link = required_child_text(item, index, "link")?;
    let pub_date = required_child_text(item, index, "pubDate")?;
    let category = child_text(item, "category").unwrap_or_default();

    let id = extract_post_id(link.trim()).trim().to_string();
    if id.is_empty() {
        return Err(FeedParseError::EmptyElement {
            item: index,
            element: "link",
        });
    }
    let date = match format_pub_date(pub_date) {
        Some(date) => date,
        None => {
            tracing::warn!(post_id = %id, pub_date, "unrecognised pubDate, keeping raw value");
            pub_date.to_string()
        }
    };

    Ok(ParsedPost {
        link: format!("{}/{id}", canonical_base.trim_end_matches('/')),
        id,
        title: title.to_string(),
        date,
        category: category.to_string(),
    })
}

fn required_child_text<'a>(
    item: Node<'a, '_>,
    index: usize,
    element: &'static str,
) -> Result<&'a str, FeedParseError> {
    let node = find_child(item, element).ok_or(FeedParseError::MissingElement {
        item: index,
        element,
    })?;
    match node.text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(FeedParseError::EmptyElement {
            item: index,
            element,
        }),
    }
}

fn child_text<'a>(parent: Node<'a, '_>, name: &str) -> Option<&'a str> {
    find_child(parent, name).map(|node| node.text().unwrap_or_default())
}

fn find_child<'a, 'input>(parent: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    parent.children().find(|node| is_plain_element(node, name))
}

fn is_plain_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}
