use crate::errors::LinkhutError;
use anyhow::anyhow;
use async_trait::async_trait;
use log::{debug, trace};
use parking_lot::Mutex;
use reqwest::{header::HeaderMap, Client as ReqwestClient, StatusCode, Url};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc, time::Duration};

/// The request timeout in milliseconds.
const REQUEST_TIMEOUT: u64 = 60_000;

/// A trait to perform authenticated GET requests against a real or mock
/// service.
#[async_trait]
pub trait Fetch: Clone {
    /// Perform a GET request and return the parsed body and status code.
    ///
    /// Error statuses are mapped to [`LinkhutError::HttpStatus`] carrying
    /// the status code and response body; callers branch on the status code
    /// rather than the error identity.
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<(Value, StatusCode), LinkhutError>;
}

/// A client to request the remote services.
#[derive(Debug, Clone)]
pub struct Client {
    client: ReqwestClient,
}

impl Client {
    pub fn new() -> Result<Self, LinkhutError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT))
            .build()
            .map_err(LinkhutError::CreateClient)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for Client {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<(Value, StatusCode), LinkhutError> {
        debug!("Request {url}");
        let url = Url::parse(url)?;

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(LinkhutError::HttpRequest)?;
        let status = response.status();

        if status.is_success() {
            let body = response
                .json::<Value>()
                .await
                .map_err(LinkhutError::ParseResponse)?;
            trace!("Response ({status}): {body}");
            Ok((body, status))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(LinkhutError::HttpStatus { status, body })
        }
    }
}

/// A mock client used in testing.
///
/// Responds per endpoint path and records the url of every request.
#[derive(Debug, Default, Clone)]
pub struct MockClient {
    /// The mocked response body and status code by endpoint path.
    responses: Arc<Mutex<HashMap<String, (Value, u16)>>>,
    /// The urls of the performed requests.
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock the response for an endpoint path.
    pub fn mock(&self, path: &str, status: u16, body: Value) {
        let mut responses = self.responses.lock();
        responses.insert(path.to_owned(), (body, status));
    }

    /// The urls of all performed requests.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// The urls of the performed requests to the given endpoint path.
    pub fn requests_to(&self, path: &str) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .filter(|url| {
                Url::parse(url)
                    .map(|url| url.path() == path)
                    .unwrap_or_default()
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Fetch for MockClient {
    async fn get(&self, url: &str, _headers: HeaderMap) -> Result<(Value, StatusCode), LinkhutError> {
        self.requests.lock().push(url.to_owned());

        let path = Url::parse(url)?.path().to_owned();
        let (body, status) = {
            let responses = self.responses.lock();
            responses
                .get(&path)
                .ok_or_else(|| anyhow!("No mock for {path}"))?
                .clone()
        };
        let status =
            StatusCode::from_u16(status).map_err(|err| anyhow!("Invalid status code: {err}"))?;

        if status.is_success() {
            Ok((body, status))
        } else {
            Err(LinkhutError::HttpStatus {
                status,
                body: body.to_string(),
            })
        }
    }
}
