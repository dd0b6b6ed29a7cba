/*
[INPUT]:  FreshchatConfig, endpoint, query params, JSON body, extra headers
[OUTPUT]: FreshchatResponse for 2xx, typed FreshchatError otherwise
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing request/response handling
*/

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::config::FreshchatConfig;
use super::error::{Result, map_status_to_error};
use super::headers::{merge_headers, redacted};
use super::response::FreshchatResponse;

/// Query parameters as name/value pairs
pub type QueryParams<'a> = [(&'a str, &'a str)];

/// Main HTTP client for the Freshchat API
///
/// Cloning is cheap; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct FreshchatClient {
    http_client: Client,
    config: Arc<FreshchatConfig>,
}

impl FreshchatClient {
    /// Create a new client with a default transport
    pub fn new(config: FreshchatConfig) -> Result<Self> {
        let http_client = Client::builder().build()?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a client on top of an existing reqwest client
    pub fn with_http_client(config: FreshchatConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &FreshchatConfig {
        &self.config
    }

    /// Send a request and wrap the response.
    ///
    /// Non-2xx statuses are returned as [`FreshchatError::Api`](super::FreshchatError::Api)
    /// carrying the decoded response.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&QueryParams<'_>>,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<FreshchatResponse> {
        let url = self.config.resolve_url(endpoint)?;
        let (_, authorization) = self.config.authorization_header()?;
        let request_headers = merge_headers(headers, authorization);

        tracing::debug!(
            method = %method,
            url = %url,
            params = ?params,
            headers = ?redacted(&request_headers),
            body = ?body,
            "sending Freshchat request"
        );

        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .headers(request_headers);
        if let Some(params) = params {
            builder = builder.query(params);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = FreshchatResponse::load(builder.send().await?).await?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = response.status().as_u16(),
            body = ?response.body(),
            "received Freshchat response"
        );

        if response.is_success() {
            Ok(response)
        } else {
            Err(map_status_to_error(response).into())
        }
    }

    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<&QueryParams<'_>>,
        headers: Option<&HeaderMap>,
    ) -> Result<FreshchatResponse> {
        self.request(Method::GET, endpoint, params, None, headers)
            .await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        params: Option<&QueryParams<'_>>,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<FreshchatResponse> {
        self.request(Method::POST, endpoint, params, body, headers)
            .await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        params: Option<&QueryParams<'_>>,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<FreshchatResponse> {
        self.request(Method::PUT, endpoint, params, body, headers)
            .await
    }

    /// Send a request and deserialize the JSON response body into `T`
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: Option<&QueryParams<'_>>,
        body: Option<&Value>,
    ) -> Result<T> {
        self.request(method, endpoint, params, body, None)
            .await?
            .json()
    }
}
