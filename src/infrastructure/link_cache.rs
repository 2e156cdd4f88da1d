//! Persisted file name to link mapping.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{FileName, ResolvedLink};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::LinkCachePort;

/// Link cache backed by a single JSON object on disk.
///
/// The record is read once when opened and rewritten in full on every insert.
/// Rewrites are serialized and go through a temporary file, so the record on
/// disk is always a complete snapshot.
pub struct JsonLinkCache {
    path: PathBuf,
    links: RwLock<HashMap<FileName, ResolvedLink>>,
    persist_lock: Mutex<()>,
}

impl JsonLinkCache {
    /// Opens the record at `path`, starting empty if it does not exist.
    ///
    /// A malformed record is logged and ignored; it is overwritten on the
    /// next insert.
    ///
    /// # Errors
    /// Returns error if an existing record cannot be read.
    pub fn open(path: PathBuf) -> CacheResult<Self> {
        let links = Self::load(&path)?;
        info!(path = %path.display(), count = links.len(), "Link cache loaded");

        Ok(Self {
            path,
            links: RwLock::new(links),
            persist_lock: Mutex::new(()),
        })
    }

    fn load(path: &Path) -> CacheResult<HashMap<FileName, ResolvedLink>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CacheError::io("Failed to read link record", e))?;

        let raw: HashMap<String, String> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse link record. Starting empty.");
                return Ok(HashMap::new());
            }
        };

        let mut links = HashMap::with_capacity(raw.len());
        for (name, link) in raw {
            match (FileName::parse(name.as_str()), ResolvedLink::parse(&link)) {
                (Ok(name), Some(link)) => {
                    links.insert(name, link);
                }
                _ => warn!(file = %name, link = %link, "Skipping invalid link record entry"),
            }
        }
        Ok(links)
    }

    fn write_record(path: &Path, content: &str) -> std::io::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        std::fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[async_trait]
impl LinkCachePort for JsonLinkCache {
    async fn get(&self, name: &FileName) -> Option<ResolvedLink> {
        self.links.read().get(name).cloned()
    }

    async fn insert(&self, name: FileName, link: ResolvedLink) -> CacheResult<()> {
        let _guard = self.persist_lock.lock().await;

        let content = {
            let links = self.links.read();
            let mut snapshot: BTreeMap<&str, &str> = links
                .iter()
                .map(|(name, link)| (name.as_str(), link.as_str()))
                .collect();
            snapshot.insert(name.as_str(), link.as_str());
            serde_json::to_string_pretty(&snapshot)
                .map_err(|e| CacheError::SerializationError(e.to_string()))?
        };

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::write_record(&path, &content))
            .await
            .map_err(|e| CacheError::io("Link record task failed", e))?
            .map_err(|e| CacheError::io("Failed to write link record", e))?;

        debug!(file = %name, link = %link, "Link cached");
        self.links.write().insert(name, link);
        Ok(())
    }

    fn len(&self) -> usize {
        self.links.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn name(value: &str) -> FileName {
        FileName::parse(value).unwrap()
    }

    fn link(value: &str) -> ResolvedLink {
        ResolvedLink::parse(value).unwrap()
    }

    #[tokio::test]
    async fn test_missing_record_starts_empty() {
        let dir = tempdir().unwrap();
        let cache = JsonLinkCache::open(dir.path().join("links.json")).unwrap();

        assert!(cache.is_empty());
        assert!(cache.get(&name("Titan.png")).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_persists_whole_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        let cache = JsonLinkCache::open(path.clone()).unwrap();

        cache
            .insert(name("Titan.png"), link("https://host/Titan.png"))
            .await
            .unwrap();
        cache
            .insert(name("Nightwraith.png"), link("https://host/Nightwraith.png"))
            .await
            .unwrap();

        let record: HashMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["Titan.png"], "https://host/Titan.png");
        assert_eq!(record["Nightwraith.png"], "https://host/Nightwraith.png");
    }

    #[tokio::test]
    async fn test_record_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("links.json");

        {
            let cache = JsonLinkCache::open(path.clone()).unwrap();
            cache
                .insert(name("Titan.png"), link("https://host/Titan.png"))
                .await
                .unwrap();
        }

        let reopened = JsonLinkCache::open(path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(
            reopened.get(&name("Titan.png")).await.unwrap().as_str(),
            "https://host/Titan.png"
        );
    }

    #[tokio::test]
    async fn test_malformed_record_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(&path, "{ not json").unwrap();

        let cache = JsonLinkCache::open(path).unwrap();

        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_entries_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        std::fs::write(
            &path,
            r#"{"Titan.png": "https://host/Titan.png", "/etc/x.png": "https://host/x.png", "Bad.png": "nope"}"#,
        )
        .unwrap();

        let cache = JsonLinkCache::open(path).unwrap();

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&name("Titan.png")).await.is_some());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_unchanged() {
        let dir = tempdir().unwrap();
        // The record's parent is a regular file, so the rewrite cannot succeed.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let cache = JsonLinkCache::open(blocker.join("links.json")).unwrap();

        let result = cache
            .insert(name("Titan.png"), link("https://host/Titan.png"))
            .await;

        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
