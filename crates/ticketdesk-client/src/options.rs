//! Per-request transport options

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document, serialized when the request is sent
    Json(serde_json::Value),
    /// Raw text sent as is
    Text(String),
}

impl RequestBody {
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>, ApiError> {
        match self {
            RequestBody::Json(value) => serde_json::to_vec(&value).map_err(ApiError::from),
            RequestBody::Text(text) => Ok(text.into_bytes()),
        }
    }
}

/// Options for a single request
///
/// Everything except `headers` is handed to the transport unchanged. Header
/// overrides are layered over the defaults, see
/// [`merge_headers`](crate::headers::merge_headers).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, GET when unset
    pub method: Option<Method>,
    /// Request body
    pub body: Option<RequestBody>,
    /// Header overrides, applied in order
    pub headers: Vec<(String, String)>,
    /// Timeout for this request, overriding the client default
    pub timeout: Option<Duration>,
    /// Abort the request when this token is cancelled
    pub cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add one header override
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several header overrides
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Serialize `body` as the JSON request body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Use `body` as the raw request body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Set a timeout for this request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the request when `token` is cancelled
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn method_or_default(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_method_is_get() {
        assert_eq!(RequestOptions::new().method_or_default(), Method::GET);
        assert_eq!(
            RequestOptions::new()
                .method(Method::DELETE)
                .method_or_default(),
            Method::DELETE
        );
    }

    #[test]
    fn test_headers_keep_order() {
        let options = RequestOptions::new()
            .header("X-One", "1")
            .headers([("X-Two", "2"), ("X-One", "3")]);
        assert_eq!(
            options.headers,
            vec![
                ("X-One".to_string(), "1".to_string()),
                ("X-Two".to_string(), "2".to_string()),
                ("X-One".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Payload {
            title: &'static str,
        }

        let options = RequestOptions::new()
            .json(&Payload { title: "printer" })
            .expect("serializable");
        assert_eq!(
            options.body,
            Some(RequestBody::Json(serde_json::json!({ "title": "printer" })))
        );
    }

    #[test]
    fn test_body_bytes() {
        let json = RequestBody::Json(serde_json::json!({ "a": 1 }));
        assert_eq!(json.into_bytes().expect("bytes"), br#"{"a":1}"#.to_vec());

        let text = RequestBody::Text("plain".to_string());
        assert_eq!(text.into_bytes().expect("bytes"), b"plain".to_vec());
    }
}
