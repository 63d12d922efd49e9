use crate::bot::{ChatApi, MessageContent};
use crate::config::Config;
use crate::http_client;
use isahc::prelude::*;
use isahc::HttpClient;
use isahc::Request;
use serde::Deserialize;
use serde::Serialize;
use std::sync::OnceLock;

static API: OnceLock<Api> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct Api {
    pub base_url: String,
    pub guild_id: String,
    token: String,
    edit_lookback: u32,
    http_client: HttpClient,
}

#[derive(Debug)]
pub enum Error {
    HttpError(HttpError),
    ApiError(ErrorResponse),
}

#[derive(Eq, PartialEq, Debug)]
pub struct HttpError {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Message {
    id: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct EmbedPayload {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    url: String,
}

#[derive(Debug, Serialize)]
struct CreateMessagePayload {
    content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<EmbedPayload>,
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Api {
    pub fn new() -> Api {
        Api {
            base_url: Config::discord_base_url(),
            guild_id: Config::discord_guild_id(),
            token: Config::discord_bot_token(),
            edit_lookback: Config::edit_lookback_messages(),
            http_client: http_client::client().clone(),
        }
    }

    /// Used as the readiness probe: the bot is connected once the guild's
    /// channel list can be fetched.
    pub fn connection_ok(&self) -> bool {
        match self.guild_channels() {
            Ok(_) => true,
            Err(error) => {
                log::error!("Discord connection check failed: {:?}", error);
                false
            }
        }
    }

    fn guild_channels(&self) -> Result<Vec<Channel>, Error> {
        let path = format!("/guilds/{}/channels", self.guild_id);

        self.request::<(), Vec<Channel>>("GET", &path, None)
    }

    fn channel_id_by_name(&self, channel_name: &str) -> Result<Option<String>, Error> {
        let channels = self.guild_channels()?;

        let id = channels
            .into_iter()
            .find(|channel| channel.name.as_deref() == Some(channel_name))
            .map(|channel| channel.id);

        Ok(id)
    }

    fn resolve_channel(&self, channel_name: &str) -> Result<String, Error> {
        self.channel_id_by_name(channel_name)?
            .ok_or_else(|| {
                Error::HttpError(HttpError {
                    code: 404,
                    message: format!("no channel named {}", channel_name),
                })
            })
    }

    fn recent_messages(&self, channel_id: &str) -> Result<Vec<Message>, Error> {
        let path = format!(
            "/channels/{}/messages?limit={}",
            channel_id, self.edit_lookback
        );

        self.request::<(), Vec<Message>>("GET", &path, None)
    }

    fn request<T1: Serialize, T2: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        params: Option<T1>,
    ) -> Result<T2, Error> {
        let url = format!("{}{}", self.base_url, path);

        let request_builder = Request::builder()
            .method(method)
            .uri(url)
            .header("Authorization", format!("Bot {}", self.token))
            .header("Content-Type", "application/json");

        let mut response = match params {
            None => {
                let request = request_builder.body(())?;
                self.http_client.send(request)?
            }
            Some(data) => {
                let json = serde_json::to_string(&data).unwrap();
                let request = request_builder.body(json)?;

                self.http_client.send(request)?
            }
        };

        let mut bytes = Vec::new();
        response.copy_to(&mut bytes)?;

        let parsed_result: Result<T2, serde_json::Error> = serde_json::from_slice(&bytes);

        match parsed_result {
            Ok(result) => Ok(result),
            Err(serde_error) => {
                log::error!("Failed to parse a response {serde_error:?}");

                let parsed_error: Result<ErrorResponse, serde_json::Error> =
                    serde_json::from_slice(&bytes);

                match parsed_error {
                    Ok(result) => Err(Error::ApiError(result)),
                    Err(error) => {
                        let message = format!("{:?} {error:?}", std::str::from_utf8(&bytes));

                        let error = HttpError { code: 500, message };

                        Err(Error::HttpError(error))
                    }
                }
            }
        }
    }
}

impl ChatApi for Api {
    fn post(&self, channel_name: &str, content: &MessageContent) -> Result<String, Error> {
        let channel_id = self.resolve_channel(channel_name)?;

        let payload = match content {
            MessageContent::Text(text) => CreateMessagePayload {
                content: text.clone(),
                embeds: vec![],
            },
            MessageContent::Embed(embed) => CreateMessagePayload {
                content: "".to_string(),
                embeds: vec![EmbedPayload {
                    title: embed.title.clone(),
                    description: embed.description.clone(),
                    url: embed.url.clone(),
                }],
            },
        };

        let path = format!("/channels/{}/messages", channel_id);
        let message: Message = self.request("POST", &path, Some(payload))?;

        Ok(message.id)
    }

    fn find_and_replace(
        &self,
        channel_name: &str,
        old_content: &str,
        new_content: &str,
    ) -> Result<bool, Error> {
        let channel_id = self.resolve_channel(channel_name)?;

        let target = self
            .recent_messages(&channel_id)?
            .into_iter()
            .find(|message| message.content == old_content);

        let message = match target {
            Some(message) => message,
            None => return Ok(false),
        };

        let payload = CreateMessagePayload {
            content: new_content.to_string(),
            embeds: vec![],
        };

        let path = format!("/channels/{}/messages/{}", channel_id, message.id);
        let _edited: Message = self.request("PATCH", &path, Some(payload))?;

        Ok(true)
    }

    fn channel_exists(&self, channel_name: &str) -> Result<bool, Error> {
        let id = self.channel_id_by_name(channel_name)?;

        Ok(id.is_some())
    }
}

impl From<isahc::http::Error> for Error {
    fn from(error: isahc::http::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

impl From<isahc::Error> for Error {
    fn from(error: isahc::Error) -> Self {
        let message = format!("{error:?}");

        let error = HttpError { code: 500, message };

        Error::HttpError(error)
    }
}

pub fn api() -> &'static Api {
    API.get_or_init(Api::new)
}
