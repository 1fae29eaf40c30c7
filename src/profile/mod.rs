//! The user's display name and avatar. Both live under fixed keys that are never date shaped,
//! so they can't be confused with journal entries even in a shared namespace.

use tracing::{debug, instrument};

use crate::storage::backend::{BackendError, KeyValueBackend};

pub const DISPLAY_NAME_KEY: &str = "pseudo";
pub const AVATAR_KEY: &str = "profileImage";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub display_name: String,
    /// Self describing image, e.g. `data:image/png;base64,...`.
    pub avatar: Option<String>,
}

pub struct ProfileStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> ProfileStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Profile, BackendError> {
        let display_name = self
            .backend
            .get(DISPLAY_NAME_KEY)
            .await?
            .unwrap_or_default();
        let avatar = self
            .backend
            .get(AVATAR_KEY)
            .await?
            .filter(|v| !v.is_empty());
        debug!("Loaded profile, avatar present: {}", avatar.is_some());
        Ok(Profile {
            display_name,
            avatar,
        })
    }

    /// Stores the display name. An empty avatar keeps the previous one.
    #[instrument(skip(self, avatar))]
    pub async fn save(&self, display_name: &str, avatar: &str) -> Result<(), BackendError> {
        self.backend.set(DISPLAY_NAME_KEY, display_name).await?;
        if !avatar.is_empty() {
            self.backend.set(AVATAR_KEY, avatar).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;

    use crate::storage::{
        backend::{BackendError, KeyValueBackend, MockKeyValueBackend},
        memory::MemoryBackend,
    };

    use super::{Profile, ProfileStore, AVATAR_KEY, DISPLAY_NAME_KEY};

    const AVATAR: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[tokio::test]
    async fn test_load_defaults() -> Result<()> {
        let store = ProfileStore::new(MemoryBackend::new());
        assert_eq!(store.load().await?, Profile::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let store = ProfileStore::new(MemoryBackend::new());

        store.save("Camille", AVATAR).await?;

        assert_eq!(
            store.load().await?,
            Profile {
                display_name: "Camille".into(),
                avatar: Some(AVATAR.into()),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_avatar_keeps_previous() -> Result<()> {
        let backend = Arc::new(MemoryBackend::new());
        let store = ProfileStore::new(backend.clone());
        store.save("Camille", AVATAR).await?;

        store.save("Cam", "").await?;

        assert_eq!(backend.get(DISPLAY_NAME_KEY).await?, Some("Cam".into()));
        assert_eq!(backend.get(AVATAR_KEY).await?, Some(AVATAR.into()));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_avatar_is_never_written() -> Result<()> {
        let mut backend = MockKeyValueBackend::new();
        backend
            .expect_set()
            .withf(|key: &str, _: &str| key == DISPLAY_NAME_KEY)
            .times(1)
            .returning(|_, _| Ok(()));
        backend
            .expect_set()
            .withf(|key: &str, _: &str| key == AVATAR_KEY)
            .never();
        let store = ProfileStore::new(backend);

        store.save("Camille", "").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces() -> Result<()> {
        let mut backend = MockKeyValueBackend::new();
        backend
            .expect_get()
            .returning(|_| Err(BackendError::Unavailable("offline".into())));
        let store = ProfileStore::new(backend);

        assert!(store.load().await.is_err());
        Ok(())
    }
}
