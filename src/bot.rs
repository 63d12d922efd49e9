pub mod discord_client;
pub mod notifier;

use discord_client::Error;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MessageContent {
    Text(String),
    Embed(Embed),
}

/// The narrow seam between the feed pipeline and the chat platform.
/// Channels are addressed by their logical name; message ids are opaque.
pub trait ChatApi {
    fn post(&self, channel_name: &str, content: &MessageContent) -> Result<String, Error>;

    /// Scans a bounded window of recent channel history for a message whose
    /// content equals `old_content` and rewrites it. Returns whether a
    /// message was found and edited.
    fn find_and_replace(
        &self,
        channel_name: &str,
        old_content: &str,
        new_content: &str,
    ) -> Result<bool, Error>;

    fn channel_exists(&self, channel_name: &str) -> Result<bool, Error>;
}
