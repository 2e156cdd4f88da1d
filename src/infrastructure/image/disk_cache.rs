//! Disk-based byte cache for downloaded images.

use std::path::PathBuf;

use async_trait::async_trait;
use tempfile::TempPath;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};

use crate::domain::entities::{FileName, ImageBody};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::ByteCachePort;

/// Prefix of in-flight download files. File names can never start with a
/// dot, so staged files never collide with entries.
const STAGING_PREFIX: &str = ".download-";

/// Disk-based cache holding one file per image, named after the file name.
#[derive(Debug)]
pub struct DiskImageCache {
    cache_dir: PathBuf,
}

impl DiskImageCache {
    /// Creates a cache in the specified directory, removing leftovers of
    /// downloads that never completed.
    ///
    /// # Errors
    /// Returns error if cache directory cannot be created or read.
    pub async fn new(cache_dir: PathBuf) -> CacheResult<Self> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| CacheError::io("Failed to create cache dir", e))?;

        let mut entries = fs::read_dir(&cache_dir)
            .await
            .map_err(|e| CacheError::io("Failed to read cache dir", e))?;

        let mut count = 0usize;
        let mut total_size = 0u64;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let is_staged = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(STAGING_PREFIX));

            if is_staged {
                if let Err(e) = fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %e, "Failed to remove stale download");
                } else {
                    debug!(path = %path.display(), "Removed stale download");
                }
            } else if let Ok(meta) = entry.metadata().await
                && meta.is_file()
            {
                count += 1;
                total_size += meta.len();
            }
        }

        debug!(
            dir = %cache_dir.display(),
            count,
            size = total_size,
            "Byte cache ready"
        );

        Ok(Self { cache_dir })
    }

    /// Returns the path for a cached image.
    fn cache_path(&self, name: &FileName) -> PathBuf {
        self.cache_dir.join(name.as_str())
    }

    /// Opens a staging file that becomes the entry for `name` on commit.
    ///
    /// # Errors
    /// Returns error if the staging file cannot be created.
    pub async fn stage(&self, name: &FileName) -> CacheResult<StagedImage> {
        let dir = self.cache_dir.clone();
        let (file, path) = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(STAGING_PREFIX)
                .tempfile_in(dir)
        })
        .await
        .map_err(|e| CacheError::io("Staging task failed", e))?
        .map_err(|e| CacheError::io("Failed to create staging file", e))?
        .into_parts();

        trace!(file = %name, path = %path.display(), "Staging download");

        Ok(StagedImage {
            file: fs::File::from_std(file),
            path,
            target: self.cache_path(name),
        })
    }
}

#[async_trait]
impl ByteCachePort for DiskImageCache {
    async fn open(&self, name: &FileName) -> CacheResult<Option<ImageBody>> {
        let path = self.cache_path(name);
        match fs::File::open(&path).await {
            Ok(file) => {
                let len = file.metadata().await.ok().map(|meta| meta.len());
                trace!(file = %name, path = %path.display(), "Disk cache hit");
                Ok(Some(ImageBody::Reader {
                    reader: Box::pin(file),
                    len,
                }))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(file = %name, "Disk cache miss");
                Ok(None)
            }
            Err(e) => Err(CacheError::io("Failed to open cached image", e)),
        }
    }
}

#[cfg(test)]
impl DiskImageCache {
    /// Checks if an entry for `name` exists.
    pub async fn contains(&self, name: &FileName) -> bool {
        fs::try_exists(self.cache_path(name))
            .await
            .unwrap_or(false)
    }
}

/// An in-flight cache entry.
///
/// Dropping it without [`commit`](Self::commit) deletes the partial file, so a
/// failed transfer never leaves a truncated entry behind.
pub struct StagedImage {
    // Declared before `path` so the handle closes before the file is removed.
    file: fs::File,
    path: TempPath,
    target: PathBuf,
}

impl StagedImage {
    /// Returns the writer for the staged bytes.
    pub fn writer(&mut self) -> &mut fs::File {
        &mut self.file
    }

    /// Flushes the staged bytes and atomically moves them into place.
    ///
    /// # Errors
    /// Returns error if flushing or renaming fails.
    pub async fn commit(self) -> CacheResult<()> {
        let Self {
            mut file,
            path,
            target,
        } = self;

        file.flush()
            .await
            .map_err(|e| CacheError::io("Failed to flush cache file", e))?;
        file.sync_all()
            .await
            .map_err(|e| CacheError::io("Failed to sync cache file", e))?;
        drop(file);

        let destination = target.clone();
        tokio::task::spawn_blocking(move || path.persist(destination))
            .await
            .map_err(|e| CacheError::io("Commit task failed", e))?
            .map_err(|e| CacheError::io("Failed to move cache file into place", e.error))?;

        debug!(path = %target.display(), "Stored image in disk cache");
        Ok(())
    }
}
