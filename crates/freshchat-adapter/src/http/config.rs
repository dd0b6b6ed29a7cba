/*
[INPUT]:  App id, API token, base URL and routing defaults (code or environment)
[OUTPUT]: Immutable FreshchatConfig with URL resolution and authorization header
[POS]:    HTTP layer - client configuration
[UPDATE]: When adding configuration options or environment variables
*/

use std::fmt;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

use super::error::{FreshchatError, Result};
use super::headers::{authorization_value, sensitive_value};

/// Default Freshchat API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.freshchat.com/v2/";

pub const ENV_API_URL: &str = "FRESHCHAT_API_URL";
pub const ENV_APP_ID: &str = "FRESHCHAT_APP_ID";
pub const ENV_TOKEN: &str = "FRESHCHAT_TOKEN";
pub const ENV_CHANNEL_ID: &str = "FRESHCHAT_CHANNEL_ID";
pub const ENV_INITIAL_MESSAGE: &str = "CONVERSATION_INITIAL_MESSAGE";

/// Freshchat client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct FreshchatConfig {
    app_id: String,
    token: String,
    base_url: String,
    default_channel_id: Option<String>,
    default_initial_message: Option<String>,
}

impl FreshchatConfig {
    /// Create a configuration; the base URL comes from `FRESHCHAT_API_URL` when set
    pub fn new(app_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            token: token.into(),
            base_url: base_url_from(|key| std::env::var(key).ok()),
            default_channel_id: None,
            default_initial_message: None,
        }
    }

    /// Build a configuration entirely from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup (environment-style names)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| FreshchatError::Config(format!("{key} is not set")))
        };

        let app_id = required(ENV_APP_ID)?;
        let token = required(ENV_TOKEN)?;

        Ok(Self {
            app_id,
            token,
            base_url: base_url_from(&lookup),
            default_channel_id: lookup(ENV_CHANNEL_ID),
            default_initial_message: lookup(ENV_INITIAL_MESSAGE),
        })
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn with_default_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.default_channel_id = Some(channel_id.into());
        self
    }

    pub fn with_default_initial_message(mut self, message: impl Into<String>) -> Self {
        self.default_initial_message = Some(message.into());
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_channel_id(&self) -> Option<&str> {
        self.default_channel_id.as_deref()
    }

    pub fn default_initial_message(&self) -> Option<&str> {
        self.default_initial_message.as_deref()
    }

    /// `Authorization` header value: `Bearer <token>` unless the token already has the scheme
    pub fn authorization_value(&self) -> String {
        authorization_value(&self.token)
    }

    /// The authorization header as a (name, value) pair, value marked sensitive
    pub fn authorization_header(&self) -> Result<(HeaderName, HeaderValue)> {
        Ok((AUTHORIZATION, sensitive_value(&self.authorization_value())?))
    }

    /// Join an endpoint onto the base URL; leading slashes on `endpoint` are ignored
    pub fn resolve_url(&self, endpoint: &str) -> Result<Url> {
        Ok(resolve_url(&self.base_url, endpoint)?)
    }
}

impl fmt::Debug for FreshchatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreshchatConfig")
            .field("app_id", &self.app_id)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("default_channel_id", &self.default_channel_id)
            .field("default_initial_message", &self.default_initial_message)
            .finish()
    }
}

/// Join `endpoint` onto `base_url` as a relative path
pub fn resolve_url(base_url: &str, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
    let base = Url::parse(&normalize_base_url(base_url))?;
    base.join(endpoint.trim_start_matches('/'))
}

/// `FRESHCHAT_API_URL` from `lookup`, else the default; normalized
fn base_url_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = lookup(ENV_API_URL)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    normalize_base_url(&base_url)
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_url_strips_leading_slash() {
        let with_slash = resolve_url("https://host/base/", "/users").unwrap();
        let without_slash = resolve_url("https://host/base/", "users").unwrap();
        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash.as_str(), "https://host/base/users");
    }

    #[test]
    fn test_resolve_url_adds_missing_trailing_slash() {
        let url = resolve_url("https://host/base", "conversations/c1/messages").unwrap();
        assert_eq!(url.as_str(), "https://host/base/conversations/c1/messages");
    }

    #[test]
    fn test_resolve_url_keeps_query() {
        let url = resolve_url(DEFAULT_BASE_URL, "/conversations/c1/messages?page=2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.freshchat.com/v2/conversations/c1/messages?page=2"
        );
    }

    #[test]
    fn test_resolve_url_rejects_malformed_base() {
        let config = FreshchatConfig::new("app", "token").with_base_url("not a url");
        assert!(matches!(
            config.resolve_url("/users"),
            Err(FreshchatError::UrlParse(_))
        ));
    }

    #[test]
    fn test_authorization_header() {
        let config = FreshchatConfig::new("app", "abc");
        let (name, value) = config.authorization_header().unwrap();
        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value, "Bearer abc");
        assert!(value.is_sensitive());

        let prefixed = FreshchatConfig::new("app", "Bearer abc");
        assert_eq!(prefixed.authorization_value(), "Bearer abc");
    }

    #[test]
    fn test_builder_setters() {
        let config = FreshchatConfig::new("app", "abc")
            .with_base_url("http://127.0.0.1:8000")
            .with_default_channel_id("chan-1")
            .with_default_initial_message("hi");

        assert_eq!(config.base_url(), "http://127.0.0.1:8000/");
        assert_eq!(config.default_channel_id(), Some("chan-1"));
        assert_eq!(config.default_initial_message(), Some("hi"));
    }

    #[test]
    fn test_from_lookup_reads_all_values() {
        let config = FreshchatConfig::from_lookup(lookup_from(&[
            (ENV_APP_ID, "app-1"),
            (ENV_TOKEN, "tok"),
            (ENV_API_URL, "http://localhost:9000/v2"),
            (ENV_CHANNEL_ID, "chan-1"),
            (ENV_INITIAL_MESSAGE, "hey dude!"),
        ]))
        .unwrap();

        assert_eq!(config.app_id(), "app-1");
        assert_eq!(config.base_url(), "http://localhost:9000/v2/");
        assert_eq!(config.default_channel_id(), Some("chan-1"));
        assert_eq!(config.default_initial_message(), Some("hey dude!"));
        assert_eq!(config.authorization_value(), "Bearer tok");
    }

    #[test]
    fn test_base_url_from_env_lookup() {
        assert_eq!(
            base_url_from(lookup_from(&[(ENV_API_URL, "http://127.0.0.1:9000/v2")])),
            "http://127.0.0.1:9000/v2/"
        );
        assert_eq!(base_url_from(lookup_from(&[])), DEFAULT_BASE_URL);
        assert_eq!(base_url_from(lookup_from(&[(ENV_API_URL, "  ")])), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_new_follows_process_env() {
        // whatever FRESHCHAT_API_URL holds in this process, `new` resolves it the same way
        let expected = base_url_from(|key| std::env::var(key).ok());
        assert_eq!(FreshchatConfig::new("app", "abc").base_url(), expected);
    }

    #[test]
    fn test_from_lookup_defaults_base_url() {
        let config =
            FreshchatConfig::from_lookup(lookup_from(&[(ENV_APP_ID, "a"), (ENV_TOKEN, "t")]))
                .unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.default_channel_id(), None);
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let err = FreshchatConfig::from_lookup(lookup_from(&[(ENV_APP_ID, "a")])).unwrap_err();
        match err {
            FreshchatError::Config(message) => assert!(message.contains(ENV_TOKEN)),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = FreshchatConfig::new("app", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
