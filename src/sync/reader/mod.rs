pub mod atom;
pub mod rss;
pub mod scraped;

use crate::models::feed::FeedKind;

/// Feed-level marker element carried by video-platform channel feeds.
const CHANNEL_ID_MARKER: &str = "<yt:channelId>";

#[derive(Debug, Eq, PartialEq)]
pub enum FeedReaderError {
    Fetch { msg: String },
    UnrecognizedShape { msg: String },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ItemKind {
    Article,
    Video,
    Episode,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchedFeedItem {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub kind: ItemKind,
    pub enclosure_url: Option<String>,
}

#[derive(Debug, Eq, PartialEq)]
pub struct FetchedFeed {
    pub title: String,
    pub items: Vec<FetchedFeedItem>,
}

pub trait ReadFeed {
    fn read(&self, body: &str) -> Result<FetchedFeed, FeedReaderError>;
}

/// Parses a fetched document into candidate items.
///
/// The shape is sniffed structurally rather than trusted from the configured
/// kind: a feed subscribed as generic may still serve a podcast- or
/// video-shaped document. Audio enclosures win, then the channel-id marker,
/// then the generic RSS item / Atom entry shapes. Only scraped feeds bypass
/// sniffing, since arbitrary HTML has no feed shape to detect.
pub fn read_document(
    body: &str,
    feed_kind: FeedKind,
    source_url: &str,
) -> Result<FetchedFeed, FeedReaderError> {
    if feed_kind == FeedKind::Scraped {
        let reader = scraped::ScrapedReader {
            url: source_url.to_string(),
        };

        return reader.read(body);
    }

    let rss_feed = (rss::RssReader {}).read(body);

    if let Ok(fetched) = &rss_feed {
        if fetched.items.iter().any(|item| item.kind == ItemKind::Episode) {
            return rss_feed;
        }
    }

    if body.contains(CHANNEL_ID_MARKER) {
        if let Ok(fetched) = (atom::AtomReader {}).read(body) {
            return Ok(fetched);
        }
    }

    if rss_feed.is_ok() {
        return rss_feed;
    }

    (atom::AtomReader {}).read(body)
}
