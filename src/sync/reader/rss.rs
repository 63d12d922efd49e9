use crate::sync::reader::{FeedReaderError, FetchedFeed, FetchedFeedItem, ItemKind, ReadFeed};
use rss::Channel;

pub struct RssReader {}

impl ReadFeed for RssReader {
    fn read(&self, body: &str) -> Result<FetchedFeed, FeedReaderError> {
        match Channel::read_from(body.as_bytes()) {
            Ok(channel) => Ok(FetchedFeed::from(channel)),
            Err(err) => {
                let msg = format!("{}", err);
                Err(FeedReaderError::UnrecognizedShape { msg })
            }
        }
    }
}

impl From<Channel> for FetchedFeed {
    fn from(channel: Channel) -> Self {
        let mut items = channel
            .items()
            .iter()
            .filter(|item| item.link().is_some())
            .map(|item| {
                let enclosure_url = item
                    .enclosure()
                    .filter(|enclosure| enclosure.mime_type().starts_with("audio"))
                    .map(|enclosure| enclosure.url().to_string());

                let kind = if enclosure_url.is_some() {
                    ItemKind::Episode
                } else {
                    ItemKind::Article
                };

                FetchedFeedItem {
                    title: item
                        .title()
                        .map_or_else(|| "".to_string(), |s| s.to_string()),
                    description: item.description().map(|s| s.to_string()),
                    link: item.link().unwrap().to_string(),
                    kind,
                    enclosure_url,
                }
            })
            .collect::<Vec<FetchedFeedItem>>();

        items.dedup_by(|a, b| a.link == b.link && a.title == b.title);

        FetchedFeed {
            title: channel.title().to_string(),
            items,
        }
    }
}
