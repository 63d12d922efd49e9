use crate::bot::{Embed, MessageContent};
use crate::sync::reader::{FetchedFeedItem, ItemKind};

/// Podcast episodes go out as a rich embed; everything else is the plain
/// link, which is also what the edit-by-content-match later looks for.
pub fn render(item: &FetchedFeedItem) -> MessageContent {
    match item.kind {
        ItemKind::Episode => MessageContent::Embed(Embed {
            title: item.title.clone(),
            description: item
                .description
                .clone()
                .or_else(|| item.enclosure_url.clone()),
            url: item.link.clone(),
        }),
        _ => MessageContent::Text(item.link.clone()),
    }
}
