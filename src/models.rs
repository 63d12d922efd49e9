pub mod feed;
pub mod feed_filter;
pub mod poller_state;
pub mod seen_link;

pub use feed::{ChannelStatus, Feed, FeedKind, UrlStatus};
pub use feed_filter::{FeedFilter, FilterMode};
pub use poller_state::PollerState;
pub use seen_link::SeenLink;
