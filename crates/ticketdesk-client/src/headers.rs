//! Request header composition

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::ApiError;

/// Content type sent unless the caller overrides it
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Build the header set for one request
///
/// Layers, lowest priority first:
/// 1. `Content-Type: application/json`
/// 2. `Authorization: Bearer <token>` when `token` is present and non-empty
/// 3. `overrides`, in order
///
/// Every layer replaces same-named entries of the layers below it. Names are
/// compared case-insensitively, so the result holds one value per name.
pub fn merge_headers(
    token: Option<&str>,
    overrides: &[(String, String)],
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidHeader("Authorization".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in overrides {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidHeader(format!("Invalid header name ({}): {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ApiError::InvalidHeader(format!("Invalid header value for {}: {}", name, e))
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_token() {
        let headers = merge_headers(None, &[]).expect("valid headers");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_adds_bearer() {
        let headers = merge_headers(Some("abc123"), &[]).expect("valid headers");
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let headers = merge_headers(Some(""), &[]).expect("valid headers");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_override_replaces_default_case_insensitively() {
        let headers = merge_headers(
            Some("abc123"),
            &overrides(&[("content-type", "text/plain"), ("AUTHORIZATION", "Token xyz")]),
        )
        .expect("valid headers");

        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers[AUTHORIZATION], "Token xyz");
    }

    #[test]
    fn test_later_override_wins() {
        let headers = merge_headers(
            None,
            &overrides(&[("X-Trace", "first"), ("x-trace", "second")]),
        )
        .expect("valid headers");
        assert_eq!(headers["x-trace"], "second");
    }

    #[test]
    fn test_extra_headers_are_added() {
        let headers =
            merge_headers(None, &overrides(&[("Accept-Language", "de")])).expect("valid headers");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["accept-language"], "de");
    }

    #[test]
    fn test_invalid_header_value() {
        let result = merge_headers(None, &overrides(&[("X-Bad", "line\nbreak")]));
        match result {
            Err(ApiError::InvalidHeader(msg)) => assert!(msg.contains("Invalid header value")),
            other => panic!("Expected ApiError::InvalidHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_header_name() {
        let result = merge_headers(None, &overrides(&[("bad name", "v")]));
        assert!(matches!(result, Err(ApiError::InvalidHeader(_))));
    }
}
