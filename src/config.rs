use crate::errors::LinkhutError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use std::env;

/// The base url of the bookmarking service.
const LINKHUT_API_URL: &str = "https://api.ln.ht";

/// The base url of the link preview service.
const LINKPREVIEW_API_URL: &str = "https://api.linkpreview.net";

/// The environment variable holding the personal access token for the
/// bookmarking service.
pub const LINKHUT_TOKEN_VAR: &str = "LH_PAT";

/// The environment variable holding the API key for the link preview
/// service.
pub const LINKPREVIEW_KEY_VAR: &str = "LINK_PREVIEW_API_KEY";

/// The environment variable overriding the base url of the bookmarking
/// service.
const LINKHUT_URL_VAR: &str = "LH_API_URL";

/// The environment variable overriding the base url of the link preview
/// service.
const LINKPREVIEW_URL_VAR: &str = "LINK_PREVIEW_API_URL";

/// A configuration for running the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The base url of the bookmarking service.
    pub linkhut_url: String,
    /// The base url of the link preview service.
    pub linkpreview_url: String,
    /// The personal access token for the bookmarking service.
    api_token: String,
    /// The API key for the link preview service, if configured.
    preview_api_key: Option<String>,
}

impl Config {
    pub fn new(
        linkhut_url: impl Into<String>,
        linkpreview_url: impl Into<String>,
        api_token: impl Into<String>,
        preview_api_key: Option<String>,
    ) -> Self {
        Self {
            linkhut_url: linkhut_url.into(),
            linkpreview_url: linkpreview_url.into(),
            api_token: api_token.into(),
            preview_api_key,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// The access token for the bookmarking service is required; the link
    /// preview key is optional and its absence degrades title enrichment.
    pub fn init() -> Result<Config, anyhow::Error> {
        let api_token =
            env::var(LINKHUT_TOKEN_VAR).map_err(|_| LinkhutError::MissingCredential(LINKHUT_TOKEN_VAR))?;
        let preview_api_key = env::var(LINKPREVIEW_KEY_VAR).ok();
        let linkhut_url =
            env::var(LINKHUT_URL_VAR).unwrap_or_else(|_| LINKHUT_API_URL.to_owned());
        let linkpreview_url =
            env::var(LINKPREVIEW_URL_VAR).unwrap_or_else(|_| LINKPREVIEW_API_URL.to_owned());

        debug!("Using bookmarking service at {linkhut_url}");

        Ok(Config::new(
            linkhut_url,
            linkpreview_url,
            api_token,
            preview_api_key,
        ))
    }

    /// The request headers for the bookmarking service.
    pub fn linkhut_headers(&self) -> Result<HeaderMap, LinkhutError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", self.api_token))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        Ok(headers)
    }

    /// The request headers for the link preview service.
    pub fn linkpreview_headers(&self) -> Result<HeaderMap, LinkhutError> {
        let api_key = self
            .preview_api_key
            .as_deref()
            .ok_or(LinkhutError::MissingCredential(LINKPREVIEW_KEY_VAR))?;
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(api_key)?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-linkpreview-api-key"), api_key);
        Ok(headers)
    }
}
