use crate::schema::feeds;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Queryable};
use std::fmt;
use std::str::FromStr;

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = feeds)]
pub struct Feed {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub channel_name: String,
    pub kind: String,

    pub added_by: Option<String>,

    pub url_status: String,
    pub url_status_counter: i32,
    pub channel_status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feed {
    pub fn kind(&self) -> Result<FeedKind, String> {
        FeedKind::from_str(&self.kind)
    }

    pub fn url_status(&self) -> UrlStatus {
        UrlStatus::from_str(&self.url_status).unwrap_or(UrlStatus::Error)
    }

    pub fn channel_status(&self) -> ChannelStatus {
        ChannelStatus::from_str(&self.channel_status).unwrap_or(ChannelStatus::Error)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FeedKind {
    GenericRss,
    Youtube,
    Podcast,
    Scraped,
}

impl FeedKind {
    pub const ALL: [FeedKind; 4] = [
        FeedKind::GenericRss,
        FeedKind::Youtube,
        FeedKind::Podcast,
        FeedKind::Scraped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::GenericRss => "generic-rss",
            FeedKind::Youtube => "youtube",
            FeedKind::Podcast => "podcast",
            FeedKind::Scraped => "scraped",
        }
    }
}

impl FromStr for FeedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic-rss" => Ok(FeedKind::GenericRss),
            "youtube" => Ok(FeedKind::Youtube),
            "podcast" => Ok(FeedKind::Podcast),
            "scraped" => Ok(FeedKind::Scraped),
            other => Err(format!("unknown feed kind {}", other)),
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UrlStatus {
    Ok,
    Stale,
    Error,
}

impl UrlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlStatus::Ok => "ok",
            UrlStatus::Stale => "stale",
            UrlStatus::Error => "error",
        }
    }
}

impl FromStr for UrlStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(UrlStatus::Ok),
            "stale" => Ok(UrlStatus::Stale),
            "error" => Ok(UrlStatus::Error),
            other => Err(format!("unknown url status {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChannelStatus {
    Ok,
    Error,
}

impl ChannelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelStatus::Ok => "ok",
            ChannelStatus::Error => "error",
        }
    }
}

impl FromStr for ChannelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(ChannelStatus::Ok),
            "error" => Ok(ChannelStatus::Error),
            other => Err(format!("unknown channel status {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FeedKind;
    use std::str::FromStr;

    #[test]
    fn feed_kind_round_trips_through_str() {
        for kind in FeedKind::ALL {
            assert_eq!(FeedKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn feed_kind_rejects_unknown_values() {
        assert!(FeedKind::from_str("nntp").is_err());
    }
}
