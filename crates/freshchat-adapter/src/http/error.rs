/*
[INPUT]:  Error sources (HTTP status, transport, serialization, webhook keys)
[OUTPUT]: Structured error types carrying the originating response
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing the status mapping
*/

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde_json::Value;
use thiserror::Error;

use super::response::{FreshchatResponse, ResponseBody};

/// Classification of a non-2xx API response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    BadRequest,
    Unauthorised,
    Forbidden,
    NotAllowed,
    NotFound,
    Conflict,
    TooManyRequests,
    ServerSideError,
    ServerUnavailable,
    Generic,
}

impl ApiErrorKind {
    /// Total mapping from HTTP status to error kind
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::UNAUTHORIZED => Self::Unauthorised,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::METHOD_NOT_ALLOWED => Self::NotAllowed,
            StatusCode::CONFLICT => Self::Conflict,
            StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests,
            StatusCode::INTERNAL_SERVER_ERROR => Self::ServerSideError,
            StatusCode::SERVICE_UNAVAILABLE => Self::ServerUnavailable,
            _ => Self::Generic,
        }
    }

    /// Message used when the response body carries nothing better
    pub fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => {
                "Bad request, probably due to invalid syntax or missing required fields"
            }
            Self::Unauthorised => "Access to the requested resource is unauthorised",
            Self::Forbidden => "Access to the requested resource is not permitted",
            Self::NotAllowed => "Access to the requested resource is not allowed",
            Self::NotFound => "The requested resource was not found",
            Self::Conflict => "The request causes data inconsistencies",
            Self::TooManyRequests => "Too many requests. Requests overcame the proper time limit",
            Self::ServerSideError => "Something went wrong on the server side",
            Self::ServerUnavailable => {
                "The server is currently unable to handle the request due to a temporary \
                 overload or scheduled maintenance"
            }
            Self::Generic => "Encountered a Freshchat client error",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorised => "unauthorised",
            Self::Forbidden => "forbidden",
            Self::NotAllowed => "method not allowed",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::TooManyRequests => "too many requests",
            Self::ServerSideError => "server side error",
            Self::ServerUnavailable => "server unavailable",
            Self::Generic => "client error",
        };
        f.write_str(name)
    }
}

/// A non-2xx response from the Freshchat API
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    response: Box<FreshchatResponse>,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// The response that produced this error
    pub fn response(&self) -> &FreshchatResponse {
        &self.response
    }

    pub fn into_response(self) -> FreshchatResponse {
        *self.response
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (status {}): {}",
            self.kind,
            self.response.status().as_u16(),
            self.message
        )
    }
}

impl std::error::Error for ApiError {}

/// Build the error for a response whose status is outside 2xx
pub fn map_status_to_error(response: FreshchatResponse) -> ApiError {
    let kind = ApiErrorKind::from_status(response.status());
    let message = error_message(response.body())
        .unwrap_or_else(|| kind.default_message().to_string());

    ApiError {
        kind,
        message,
        response: Box::new(response),
    }
}

fn error_message(body: &ResponseBody) -> Option<String> {
    match body {
        ResponseBody::Json(Value::Object(map)) => map.get("message").map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }),
        ResponseBody::Json(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        ResponseBody::Json(_) => None,
        ResponseBody::Text(text) if !text.is_empty() => Some(text.clone()),
        ResponseBody::Text(_) => None,
    }
}

/// Main error type for the Freshchat adapter
#[derive(Error, Debug)]
pub enum FreshchatError {
    /// API returned a non-2xx response
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Header name or value could not be encoded
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Webhook public key could not be parsed
    #[error("Invalid public key: {0}")]
    InvalidKey(String),

    /// Webhook signature is not valid base64
    #[error("Invalid signature encoding: {0}")]
    InvalidSignatureEncoding(#[from] base64::DecodeError),

    /// Webhook signature did not match the payload
    #[error("Webhook signature does not match payload")]
    SignatureMismatch,

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built from the given models
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FreshchatError {
    /// Check if the caller may reasonably retry the request
    pub fn is_retryable(&self) -> bool {
        match self {
            FreshchatError::Http(_) => true,
            FreshchatError::Api(err) => matches!(
                err.kind(),
                ApiErrorKind::TooManyRequests | ApiErrorKind::ServerUnavailable
            ),
            _ => false,
        }
    }

    /// Retry delay in seconds, taken from a numeric `Retry-After` header
    pub fn retry_delay(&self) -> Option<u64> {
        if !self.is_retryable() {
            return None;
        }
        match self {
            FreshchatError::Api(err) => err
                .response()
                .header(RETRY_AFTER)
                .and_then(|value| value.trim().parse().ok()),
            _ => None,
        }
    }

    /// Kind of the API error, if this is one
    pub fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            FreshchatError::Api(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// HTTP status attached to this error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FreshchatError::Api(err) => Some(err.status()),
            FreshchatError::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ApiErrorKind::NotFound)
    }
}

/// Result type alias for Freshchat operations
pub type Result<T> = std::result::Result<T, FreshchatError>;
