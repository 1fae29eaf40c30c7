use std::{
    collections::{BTreeSet, HashMap},
    io,
    ops::Deref,
};

use async_trait::async_trait;
use thiserror::Error;

/// Failure of the storage substrate. Nothing in moodlog retries these; the caller decides.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O failure on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Key '{0}' can't be stored by this backend")]
    InvalidKey(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }
}

/// Asynchronous string key/value store that the journal is built on. Implementations must
/// persist a value on `set` before resolving, and must treat removal of a missing key as
/// success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    async fn remove(&self, key: &str) -> Result<(), BackendError>;

    async fn list_keys(&self) -> Result<BTreeSet<String>, BackendError>;

    /// Fetches several keys at once. Every requested key is present in the result, with
    /// `None` for keys that have no value.
    async fn get_many(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, Option<String>>, BackendError>;
}

#[async_trait]
impl<T> KeyValueBackend for T
where
    T: Deref + Send + Sync,
    T::Target: KeyValueBackend,
{
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.deref().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.deref().set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.deref().remove(key).await
    }

    async fn list_keys(&self) -> Result<BTreeSet<String>, BackendError> {
        self.deref().list_keys().await
    }

    async fn get_many(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, Option<String>>, BackendError> {
        self.deref().get_many(keys).await
    }
}
