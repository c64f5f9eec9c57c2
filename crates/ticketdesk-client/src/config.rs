//! Base address resolution

use std::env;
use std::fmt;

/// Environment variable holding the API base address
pub const ENV_BASE_URL: &str = "TICKETDESK_API_BASE_URL";

/// Base address used when no environment value is set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Origin and path prefix prepended to every endpoint
///
/// Resolved once and then passed by value into the client. Endpoints are
/// appended verbatim, so `http://localhost:8000/api` joined with `/users/1`
/// targets `http://localhost:8000/api/users/1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Use `value` as is
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Resolve from an optional raw value
    ///
    /// An absent value, or one that is empty after trimming, yields
    /// [`DEFAULT_BASE_URL`].
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.trim().is_empty() => Self(value.to_string()),
            _ => Self(DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Resolve from the process environment
    ///
    /// The run time value of [`ENV_BASE_URL`] wins, then the value captured
    /// when the crate was compiled, then [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let runtime = env::var(ENV_BASE_URL).ok();
        Self::resolve_layered(runtime.as_deref(), option_env!("TICKETDESK_API_BASE_URL"))
    }

    /// Resolve from a run time and a build time value, in that order
    ///
    /// A blank value at either layer is skipped.
    pub fn resolve_layered(runtime: Option<&str>, build_time: Option<&str>) -> Self {
        let not_blank = |value: &&str| !value.trim().is_empty();
        Self::resolve(runtime.filter(not_blank).or(build_time.filter(not_blank)))
    }

    /// Build the full request URL for `endpoint`
    pub fn join(&self, endpoint: &str) -> String {
        format!("{}{}", self.0, endpoint)
    }

    /// Base address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BaseUrl {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BaseUrl {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
