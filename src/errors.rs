use reqwest::{header::InvalidHeaderValue, StatusCode};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum LinkhutError {
    #[error("Invalid url ({0}): must start with http:// or https://")]
    InvalidUrlScheme(String),
    #[error("Invalid url ({0}): length exceeds 2048 characters")]
    InvalidUrlLength(String),
    #[error("Missing environment variable: {0}")]
    MissingCredential(&'static str),
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] InvalidHeaderValue),
    #[error("Can't parse url: {0}")]
    ParseUrl(#[from] ParseError),
    #[error("Can't deserialize json: {0}")]
    DeserializeJson(serde_json::Error),
    #[error("Can't create client: {0}")]
    CreateClient(reqwest::Error),
    #[error("Can't send request: {0}")]
    HttpRequest(reqwest::Error),
    #[error("Can't parse response body: {0}")]
    ParseResponse(reqwest::Error),
    #[error("Request failed ({status}): {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("Missing field `{0}` in response")]
    MissingField(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
