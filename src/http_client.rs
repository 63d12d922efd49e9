use crate::config::Config;
use isahc::config::RedirectPolicy;
use isahc::error::ErrorKind;
use isahc::prelude::*;
use isahc::HttpClient;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

static CLIENT: OnceLock<HttpClient> = OnceLock::new();

#[derive(Debug, Eq, PartialEq)]
pub enum FetchError {
    Timeout { url: String },
    Connection { url: String, msg: String },
    BadScheme { url: String },
    Http { url: String, code: u16 },
}

pub fn client() -> &'static HttpClient {
    CLIENT.get_or_init(init_client)
}

fn init_client() -> HttpClient {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(10))
        .timeout(request_timeout_seconds())
        .build()
        .unwrap()
}

fn request_timeout_seconds() -> Duration {
    let secs = Config::request_timeout_in_seconds();

    Duration::from_secs(secs)
}

/// Fetches the document behind `url`. A URL without a scheme is retried
/// once with an assumed `https://` scheme.
pub fn fetch_document(url: &str) -> Result<String, FetchError> {
    match Url::parse(url) {
        Ok(_) => get_text(url),
        Err(_) => {
            let with_scheme = format!("https://{}", url);

            match Url::parse(&with_scheme) {
                Ok(_) => get_text(&with_scheme),
                Err(_) => Err(FetchError::BadScheme {
                    url: url.to_string(),
                }),
            }
        }
    }
}

fn get_text(url: &str) -> Result<String, FetchError> {
    let mut response = client().get(url).map_err(|error| fetch_error(url, error))?;

    if !response.status().is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            code: response.status().as_u16(),
        });
    }

    response.text().map_err(|error| FetchError::Connection {
        url: url.to_string(),
        msg: format!("{:?}", error),
    })
}

fn fetch_error(url: &str, error: isahc::Error) -> FetchError {
    match error.kind() {
        ErrorKind::Timeout => FetchError::Timeout {
            url: url.to_string(),
        },
        _ => FetchError::Connection {
            url: url.to_string(),
            msg: format!("{:?}", error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::FetchError;
    use mockito::mock;

    #[test]
    fn fetch_document_returns_body() {
        let _m = mock("GET", "/plain-page")
            .with_status(200)
            .with_body("<rss></rss>")
            .create();

        let url = format!("{}/plain-page", mockito::server_url());

        assert_eq!(super::fetch_document(&url).unwrap(), "<rss></rss>");
    }

    #[test]
    fn fetch_document_surfaces_http_errors() {
        let _m = mock("GET", "/failing-page").with_status(500).create();

        let url = format!("{}/failing-page", mockito::server_url());

        match super::fetch_document(&url) {
            Err(FetchError::Http { code, .. }) => assert_eq!(code, 500),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn fetch_document_rejects_unparseable_urls() {
        match super::fetch_document("http://") {
            Err(FetchError::BadScheme { .. }) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
