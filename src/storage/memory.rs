use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::{BackendError, KeyValueBackend};

/// In-process backend. Nothing survives the process, which makes it the backend of choice for
/// tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.values
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<BTreeSet<String>, BackendError> {
        Ok(self.values.read().await.keys().cloned().collect())
    }

    async fn get_many(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, Option<String>>, BackendError> {
        let values = self.values.read().await;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), values.get(key).cloned()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::storage::backend::KeyValueBackend;

    use super::MemoryBackend;

    #[tokio::test]
    async fn test_memory_basic() -> Result<()> {
        let backend = MemoryBackend::new();
        backend.set("a", "1").await?;
        backend.set("b", "2").await?;
        backend.set("a", "3").await?;
        backend.remove("b").await?;
        backend.remove("missing").await?;

        assert_eq!(backend.get("a").await?, Some("3".into()));
        assert_eq!(backend.get("b").await?, None);
        assert_eq!(backend.list_keys().await?.into_iter().collect::<Vec<_>>(), ["a"]);

        let many = backend.get_many(&["a".into(), "b".into()]).await?;
        assert_eq!(many.len(), 2);
        assert_eq!(many["a"], Some("3".into()));
        assert_eq!(many["b"], None);
        Ok(())
    }
}
