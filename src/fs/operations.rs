use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncReadExt, AsyncWriteExt},
};

/// Suffix of files that are still being written. They are never visible as values.
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Replaces the contents of `path` with `data`. The data is written into a sibling file which is
/// then renamed over the target, so a reader either sees the previous contents or the new ones.
/// On failure the sibling file is removed.
pub async fn write_atomically(path: &Path, data: &[u8]) -> Result<(), io::Error> {
    let partial = partial_path(path);

    let result = async {
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&partial)
            .await?;
        write_locked(&mut file, data).await?;
        drop(file);

        tokio::fs::rename(&partial, path).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    result
}

async fn write_locked(file: &mut File, data: &[u8]) -> Result<(), io::Error> {
    file.lock_exclusive()?;
    let written = write_synced(file, data).await;
    file.unlock_async().await?;
    written
}

async fn write_synced(file: &mut File, data: &[u8]) -> Result<(), io::Error> {
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Reads a whole file under a shared lock. A missing file is `None`. Bytes that are not valid
/// UTF-8 are replaced, leaving it to the caller to reject the damaged value.
pub async fn read_if_exists(path: &Path) -> Result<Option<String>, io::Error> {
    async fn extract(path: &Path) -> Result<String, io::Error> {
        let mut file = File::open(path).await?;
        file.lock_shared()?;
        let mut contents = Vec::new();
        let result = file.read_to_end(&mut contents).await;
        file.unlock_async().await?;
        result.map(|_| String::from_utf8_lossy(&contents).into_owned())
    }

    match extract(path).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Removes a file, treating a missing file as already removed.
pub async fn remove_if_exists(path: &Path) -> Result<(), io::Error> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}
