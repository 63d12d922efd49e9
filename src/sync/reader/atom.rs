use crate::sync::reader::{FeedReaderError, FetchedFeed, FetchedFeedItem, ItemKind, ReadFeed};
use atom_syndication::Feed as AtomFeed;
use std::str::FromStr;

pub struct AtomReader {}

impl ReadFeed for AtomReader {
    fn read(&self, body: &str) -> Result<FetchedFeed, FeedReaderError> {
        match AtomFeed::from_str(body) {
            Ok(atom_feed) => {
                let mut fetched = FetchedFeed::from(atom_feed);

                if body.contains(super::CHANNEL_ID_MARKER) {
                    for item in fetched.items.iter_mut() {
                        item.kind = ItemKind::Video;
                    }
                }

                Ok(fetched)
            }
            Err(err) => {
                let msg = format!("{}", err);
                Err(FeedReaderError::UnrecognizedShape { msg })
            }
        }
    }
}

impl From<AtomFeed> for FetchedFeed {
    fn from(feed: AtomFeed) -> Self {
        let mut items = feed
            .entries()
            .iter()
            .filter(|entry| entry.links().first().is_some())
            .map(|entry| FetchedFeedItem {
                title: entry.title().to_string(),
                description: entry.summary().map(|s| s.to_string()),
                link: entry.links().first().unwrap().href().to_string(),
                kind: ItemKind::Article,
                enclosure_url: None,
            })
            .collect::<Vec<FetchedFeedItem>>();

        items.dedup_by(|a, b| a.link == b.link && a.title == b.title);

        FetchedFeed {
            title: feed.title().to_string(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomReader, FetchedFeed};
    use crate::sync::reader::{ItemKind, ReadFeed};
    use atom_syndication::Feed as AtomFeed;
    use std::fs;
    use std::str::FromStr;

    #[test]
    fn it_converts_atom_feed_to_fetched_feed() {
        let xml_feed = fs::read_to_string("./tests/support/atom_feed_example.xml").unwrap();
        let feed = AtomFeed::from_str(&xml_feed).unwrap();

        let fetched_feed: FetchedFeed = feed.into();

        assert_eq!(fetched_feed.title, "Example Feed".to_string());
        assert_eq!(fetched_feed.items.len(), 1);
        assert_eq!(
            fetched_feed.items[0].link,
            "http://example.org/2003/12/13/atom03".to_string()
        );
        assert_eq!(fetched_feed.items[0].kind, ItemKind::Article);
    }

    #[test]
    fn it_marks_channel_feed_entries_as_videos() {
        let xml_feed = fs::read_to_string("./tests/support/youtube_feed_example.xml").unwrap();

        let fetched_feed = (AtomReader {}).read(&xml_feed).unwrap();

        assert_eq!(fetched_feed.items.len(), 2);
        assert!(fetched_feed
            .items
            .iter()
            .all(|item| item.kind == ItemKind::Video));
    }
}
