use std::{
    collections::{BTreeSet, HashMap},
    path::PathBuf,
};

use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use tokio_stream::wrappers::ReadDirStream;
use tracing::{debug, trace};

use crate::fs::operations::{read_if_exists, remove_if_exists, write_atomically};

use super::backend::{BackendError, KeyValueBackend};

const VALUE_SUFFIX: &str = ".value";

/// How many values [FileBackend::get_many] reads at the same time.
const READ_CONCURRENCY: usize = 4;

/// Directory backed namespace. Every key is a file `<key>.value` inside the directory, so a
/// namespace can be inspected and backed up with ordinary tools.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, BackendError> {
        if !is_storable_key(key) {
            return Err(BackendError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}{VALUE_SUFFIX}")))
    }
}

/// Keys become file names, so only a conservative character set is accepted.
fn is_storable_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let path = self.path_for(key)?;
        trace!("Reading {path:?}");
        read_if_exists(&path)
            .await
            .map_err(|e| BackendError::io(key, e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let path = self.path_for(key)?;
        debug!("Writing {path:?}");
        write_atomically(&path, value.as_bytes())
            .await
            .map_err(|e| BackendError::io(key, e))
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        let path = self.path_for(key)?;
        debug!("Removing {path:?}");
        remove_if_exists(&path)
            .await
            .map_err(|e| BackendError::io(key, e))
    }

    async fn list_keys(&self) -> Result<BTreeSet<String>, BackendError> {
        let dir_key = self.dir.to_string_lossy().to_string();
        let entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| BackendError::io(dir_key.clone(), e))?;

        let names = ReadDirStream::new(entries)
            .map_err(|e| BackendError::io(dir_key.clone(), e))
            .try_collect::<Vec<_>>()
            .await?;

        Ok(names
            .into_iter()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                name.strip_suffix(VALUE_SUFFIX).map(str::to_owned)
            })
            .filter(|key| is_storable_key(key))
            .collect())
    }

    async fn get_many(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, Option<String>>, BackendError> {
        stream::iter(keys.iter().cloned())
            .map(|key| async move {
                let value = self.get(&key).await?;
                Ok::<_, BackendError>((key, value))
            })
            .buffered(READ_CONCURRENCY)
            .try_collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::storage::backend::{BackendError, KeyValueBackend};

    use super::FileBackend;

    #[tokio::test]
    async fn test_file_backend_basic() -> Result<()> {
        let dir = tempdir()?;
        let backend = FileBackend::new(dir.path().join("entries"))?;

        backend.set("2024-01-05", "{}").await?;
        backend.set("pseudo", "Camille").await?;
        backend.set("pseudo", "Camille B").await?;

        assert_eq!(backend.get("pseudo").await?, Some("Camille B".into()));
        assert_eq!(backend.get("absent").await?, None);
        assert_eq!(
            backend.list_keys().await?.into_iter().collect::<Vec<_>>(),
            ["2024-01-05", "pseudo"]
        );

        backend.remove("pseudo").await?;
        backend.remove("pseudo").await?;
        assert_eq!(backend.get("pseudo").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_backend_survives_reopening() -> Result<()> {
        let dir = tempdir()?;
        {
            let backend = FileBackend::new(dir.path().to_path_buf())?;
            backend.set("2024-01-03", "value").await?;
        }

        let backend = FileBackend::new(dir.path().to_path_buf())?;
        assert_eq!(backend.get("2024-01-03").await?, Some("value".into()));
        Ok(())
    }

    #[tokio::test]
    async fn test_file_backend_get_many() -> Result<()> {
        let dir = tempdir()?;
        let backend = FileBackend::new(dir.path().to_path_buf())?;
        for day in 1..=9 {
            backend
                .set(&format!("2024-01-0{day}"), &day.to_string())
                .await?;
        }

        let keys = (1..=10)
            .map(|day| format!("2024-01-{day:02}"))
            .collect::<Vec<_>>();
        let values = backend.get_many(&keys).await?;

        assert_eq!(values.len(), 10);
        assert_eq!(values["2024-01-04"], Some("4".into()));
        assert_eq!(values["2024-01-10"], None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_backend_ignores_foreign_files() -> Result<()> {
        let dir = tempdir()?;
        let backend = FileBackend::new(dir.path().to_path_buf())?;
        std::fs::write(dir.path().join("notes.txt"), "hello")?;
        std::fs::write(dir.path().join("2024-01-01.value.partial"), "half")?;

        assert!(backend.list_keys().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_file_backend_rejects_path_keys() -> Result<()> {
        let dir = tempdir()?;
        let backend = FileBackend::new(dir.path().to_path_buf())?;

        let result = backend.set("../escape", "x").await;

        assert!(matches!(result, Err(BackendError::InvalidKey(_))));
        Ok(())
    }
}
