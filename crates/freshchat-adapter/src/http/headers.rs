/*
[INPUT]:  Caller supplied headers and the configured credential
[OUTPUT]: Merged request header map with authorization always present
[POS]:    HTTP layer - request header construction
[UPDATE]: When header precedence rules or credential formats change
*/

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::error::{FreshchatError, Result};

const BEARER_SCHEME: &str = "Bearer";

/// Authorization value for a token; tokens already prefixed with `Bearer ` pass through
pub fn authorization_value(token: &str) -> String {
    if has_bearer_prefix(token) {
        token.to_string()
    } else {
        format!("{BEARER_SCHEME} {token}")
    }
}

// Scheme names are case-insensitive
fn has_bearer_prefix(token: &str) -> bool {
    token
        .get(..BEARER_SCHEME.len() + 1)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "))
}

/// Merge caller headers with the authorization header into a new map.
///
/// Every caller header is kept. `Authorization` always carries `authorization`,
/// replacing any caller-supplied value for that name.
pub fn merge_headers(caller: Option<&HeaderMap>, authorization: HeaderValue) -> HeaderMap {
    let mut merged = caller.cloned().unwrap_or_default();
    merged.insert(AUTHORIZATION, authorization);
    merged
}

pub(crate) fn sensitive_value(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| FreshchatError::InvalidHeader(format!("authorization: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Header map rendering for logs with sensitive values masked
pub(crate) fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if value.is_sensitive() || name == AUTHORIZATION {
                "<redacted>".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};

    #[test]
    fn test_authorization_value_prefixes_bare_token() {
        assert_eq!(authorization_value("abc"), "Bearer abc");
    }

    #[test]
    fn test_authorization_value_is_idempotent() {
        let once = authorization_value("abc");
        assert_eq!(authorization_value(&once), "Bearer abc");
        assert_eq!(authorization_value("Bearer abc"), "Bearer abc");
    }

    #[test]
    fn test_authorization_value_requires_leading_scheme() {
        assert_eq!(authorization_value("xBearer1"), "Bearer xBearer1");
        assert_eq!(authorization_value("Bearerabc"), "Bearer Bearerabc");
        assert_eq!(authorization_value("bearer abc"), "bearer abc");
        assert_eq!(authorization_value("BEARER abc"), "BEARER abc");
    }

    #[test]
    fn test_merge_without_caller_headers() {
        let merged = merge_headers(None, HeaderValue::from_static("Bearer abc"));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_merge_keeps_caller_headers() {
        let mut caller = HeaderMap::new();
        caller.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("de"));
        caller.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let merged = merge_headers(Some(&caller), HeaderValue::from_static("Bearer abc"));

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(ACCEPT_LANGUAGE).unwrap(), "de");
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "Bearer abc");
        // caller map is untouched
        assert_eq!(caller.len(), 2);
        assert!(caller.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_merge_authorization_takes_precedence() {
        let mut caller = HeaderMap::new();
        caller.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));

        let merged = merge_headers(Some(&caller), HeaderValue::from_static("Bearer abc"));

        assert_eq!(merged.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_redacted_masks_authorization() {
        let mut headers = merge_headers(None, sensitive_value("Bearer secret").unwrap());
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));

        let rendered = redacted(&headers);

        assert!(rendered.contains(&("authorization".to_string(), "<redacted>".to_string())));
        assert!(rendered.contains(&("accept-language".to_string(), "en".to_string())));
    }

    #[test]
    fn test_sensitive_value_rejects_control_characters() {
        assert!(matches!(
            sensitive_value("Bearer a\nb"),
            Err(FreshchatError::InvalidHeader(_))
        ));
    }
}
