//!  Storage is organized through [backend::KeyValueBackend].
//!  The basic idea is:
//!   - A namespace is a flat mapping from string keys to string values.
//!   - Journal entries and the profile live in separate namespaces, see [Namespaces].
//!   - [file::FileBackend] keeps a namespace in a directory, one file per key.

use std::{path::Path, sync::Arc};

pub mod backend;
pub mod file;
pub mod memory;

use file::FileBackend;

pub const ENTRIES_NAMESPACE: &str = "entries";
pub const PROFILE_NAMESPACE: &str = "profile";

/// The two namespaces of an application directory.
pub struct Namespaces<B> {
    pub entries: B,
    pub profile: B,
}

impl Namespaces<Arc<FileBackend>> {
    pub fn open(app_dir: &Path) -> Result<Self, std::io::Error> {
        Ok(Self {
            entries: Arc::new(FileBackend::new(app_dir.join(ENTRIES_NAMESPACE))?),
            profile: Arc::new(FileBackend::new(app_dir.join(PROFILE_NAMESPACE))?),
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::storage::backend::KeyValueBackend;

    use super::Namespaces;

    #[tokio::test]
    async fn test_namespaces_are_disjoint() -> Result<()> {
        let dir = tempdir()?;
        let namespaces = Namespaces::open(dir.path())?;

        namespaces.profile.set("pseudo", "Camille").await?;

        assert!(namespaces.entries.list_keys().await?.is_empty());
        assert_eq!(namespaces.profile.list_keys().await?.len(), 1);
        Ok(())
    }
}
