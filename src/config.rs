use std::env;
use std::str::FromStr;

pub struct Config {}

impl Config {
    pub fn database_url() -> String {
        Self::required_var("DATABASE_URL")
    }

    pub fn discord_bot_token() -> String {
        Self::required_var("DISCORD_BOT_TOKEN")
    }

    pub fn discord_guild_id() -> String {
        Self::required_var("DISCORD_GUILD_ID")
    }

    pub fn discord_base_url() -> String {
        Self::var_or("DISCORD_BASE_URL", "https://discord.com/api/v10")
    }

    /// Channel receiving operator notifications about broken feeds.
    pub fn bot_channel_name() -> String {
        Self::var_or("BOT_CHANNEL_NAME", "bot-status")
    }

    pub fn db_pool_number() -> u32 {
        Self::parsed_var("DB_POOL_NUMBER", 5)
    }

    pub fn request_timeout_in_seconds() -> u64 {
        Self::parsed_var("REQUEST_TIMEOUT", 10)
    }

    /// Consecutive failed validations before a stale feed is marked broken.
    pub fn url_failure_limit() -> i32 {
        Self::parsed_var("URL_FAILURE_LIMIT", 3)
    }

    pub fn edit_lookback_messages() -> u32 {
        Self::parsed_var("EDIT_LOOKBACK_MESSAGES", 30)
    }

    pub fn max_items_per_sync() -> usize {
        Self::parsed_var("MAX_ITEMS_PER_SYNC", 5)
    }

    pub fn rss_interval_seconds() -> u64 {
        Self::parsed_var("RSS_INTERVAL_SECONDS", 300)
    }

    pub fn youtube_interval_seconds() -> u64 {
        Self::parsed_var("YOUTUBE_INTERVAL_SECONDS", 600)
    }

    pub fn podcast_interval_seconds() -> u64 {
        Self::parsed_var("PODCAST_INTERVAL_SECONDS", 900)
    }

    pub fn scraped_interval_seconds() -> u64 {
        Self::parsed_var("SCRAPED_INTERVAL_SECONDS", 900)
    }

    fn required_var(name: &str) -> String {
        env::var(name).unwrap_or_else(|_| panic!("{} must be set", name))
    }

    fn var_or(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    fn parsed_var<T: FromStr>(name: &str, default: T) -> T {
        match env::var(name) {
            Ok(value) => value
                .parse()
                .unwrap_or_else(|_| panic!("{} can not be parsed", name)),
            Err(_) => default,
        }
    }
}
