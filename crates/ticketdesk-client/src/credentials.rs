//! Credential providers

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::ApiError;
use crate::storage::LocalStorage;

/// Storage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Source of the bearer token attached to each request
///
/// Called once per request. `Ok(None)` means the request goes out
/// anonymously.
#[async_trait::async_trait]
pub trait CredentialProvider: Debug + Send + Sync {
    /// Get the current token, if any
    async fn current_token(&self) -> Result<Option<String>, ApiError>;
}

#[async_trait::async_trait]
impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    async fn current_token(&self) -> Result<Option<String>, ApiError> {
        (**self).current_token().await
    }
}

/// Provider that never supplies a token
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait::async_trait]
impl CredentialProvider for NoCredentials {
    async fn current_token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Provider returning a fixed token
#[derive(Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Always supply `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Supply `token` when present
    pub fn maybe(token: Option<String>) -> Self {
        Self(token)
    }
}

impl Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken")
            .field(&self.0.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialProvider for StaticToken {
    async fn current_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.0.clone())
    }
}

/// Provider reading [`TOKEN_STORAGE_KEY`] from a [`LocalStorage`]
///
/// The key is read on every call and never written.
#[derive(Debug, Clone)]
pub struct StorageCredentials<S> {
    storage: S,
}

impl<S: LocalStorage> StorageCredentials<S> {
    /// Read tokens from `storage`
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait::async_trait]
impl<S: LocalStorage> CredentialProvider for StorageCredentials<S> {
    async fn current_token(&self) -> Result<Option<String>, ApiError> {
        self.storage.get_item(TOKEN_STORAGE_KEY).await
    }
}
