/*
[INPUT]:  Raw reqwest responses
[OUTPUT]: FreshchatResponse with decoded body and response metadata
[POS]:    HTTP layer - response normalisation
[UPDATE]: When changing body decoding rules or exposed metadata
*/

use reqwest::header::{AsHeaderName, CONTENT_TYPE, HeaderMap};
use reqwest::{StatusCode, Url, Version};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{FreshchatError, Result};

const JSON_MIME: &str = "application/json";

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body of a JSON response, with nested JSON strings decoded
    Json(Value),
    /// Body of any other response, kept as text
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(text) => Some(text),
        }
    }
}

/// HTTP response from the Freshchat API
#[derive(Debug, Clone, PartialEq)]
pub struct FreshchatResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    version: Version,
    body: ResponseBody,
}

impl FreshchatResponse {
    /// Read the whole body of `response` and decode it by content type
    pub async fn load(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let version = response.version();

        let is_json = is_json_content_type(&headers);
        let text = response.text().await?;
        let body = if is_json {
            decode_json_body(text)
        } else {
            ResponseBody::Text(text)
        };

        Ok(Self {
            status,
            headers,
            url,
            version,
            body,
        })
    }

    /// Assemble a response from already decoded parts
    pub fn from_parts(status: StatusCode, headers: HeaderMap, url: Url, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            url,
            version: Version::HTTP_11,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text; `None` when absent or not visible ASCII
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Deserialize the JSON body into `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Json(value) => Ok(T::deserialize(value)?),
            ResponseBody::Text(text) => Err(FreshchatError::InvalidResponse(format!(
                "expected JSON body from {}, got text: {}",
                self.url, text
            ))),
        }
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_MIME))
}

fn decode_json_body(text: String) -> ResponseBody {
    if text.trim().is_empty() {
        return ResponseBody::Text(text);
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => ResponseBody::Json(decode_nested_json(value)),
        Err(err) => {
            tracing::warn!(error = %err, "JSON response body could not be parsed, keeping text");
            ResponseBody::Text(text)
        }
    }
}

/// Post-order walk replacing every string leaf that parses as JSON
pub fn decode_nested_json(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, decode_nested_json(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(decode_nested_json).collect()),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(decoded) => decoded,
            Err(_) => Value::String(text),
        },
        other => other,
    }
}
