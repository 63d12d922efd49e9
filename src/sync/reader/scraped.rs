use crate::sync::reader::{FeedReaderError, FetchedFeed, FetchedFeedItem, ItemKind, ReadFeed};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts candidate items from an HTML page: one item per `article`
/// element that carries a link.
pub struct ScrapedReader {
    pub url: String,
}

impl ReadFeed for ScrapedReader {
    fn read(&self, body: &str) -> Result<FetchedFeed, FeedReaderError> {
        let document = Html::parse_document(body);

        let articles = selector("article")?;
        let anchors = selector("a[href]")?;
        let headings = selector("h1, h2, h3")?;
        let paragraphs = selector("p")?;
        let titles = selector("title")?;

        let mut items: Vec<FetchedFeedItem> = Vec::new();

        for article in document.select(&articles) {
            let anchor = match article.select(&anchors).next() {
                Some(anchor) => anchor,
                None => continue,
            };

            let href = match anchor.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            let link = match resolve_link(&self.url, href) {
                Some(link) => link,
                None => continue,
            };

            let title = article
                .select(&headings)
                .next()
                .map(element_text)
                .unwrap_or_else(|| element_text(anchor));

            let description = article.select(&paragraphs).next().map(element_text);

            items.push(FetchedFeedItem {
                title,
                description,
                link,
                kind: ItemKind::Article,
                enclosure_url: None,
            });
        }

        items.dedup_by(|a, b| a.link == b.link);

        if items.is_empty() {
            return Err(FeedReaderError::UnrecognizedShape {
                msg: format!("no linked article elements found at {}", self.url),
            });
        }

        let title = document
            .select(&titles)
            .next()
            .map(element_text)
            .unwrap_or_default();

        Ok(FetchedFeed { title, items })
    }
}

fn selector(css: &str) -> Result<Selector, FeedReaderError> {
    Selector::parse(css).map_err(|err| FeedReaderError::UnrecognizedShape {
        msg: format!("{:?}", err),
    })
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

fn resolve_link(base: &str, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(_) => {
            let joined = Url::parse(base).ok()?.join(href).ok()?;

            Some(joined.to_string())
        }
    }
}
