//! Owned cache of the last successful sync result.
//!
//! Explicitly owned store instead of a process-wide mutable global: the
//! last persisted [`SyncResult`] is loaded once at open, reads are served
//! from memory, and a successful sync atomically replaces both the file
//! and the in-memory copy.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};
use uni_mirror_core::SyncResult;

/// Durable store for the most recent [`SyncResult`].
pub struct CacheStore {
    path: PathBuf,
    current: RwLock<SyncResult>,
}

impl CacheStore {
    /// Open the store, loading the last persisted result.
    ///
    /// A missing or unreadable file yields the empty default (no
    /// assignments, `last_sync = None`) with a warning; a failed sync or
    /// corrupt cache must never make reads fail.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = load_or_default(&path);
        Self {
            path,
            current: RwLock::new(current),
        }
    }

    /// Clone of the currently cached result.
    ///
    /// # Errors
    /// Returns an error only when the in-memory lock is poisoned.
    pub fn snapshot(&self) -> Result<SyncResult> {
        self.current
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| anyhow!("cache lock poisoned"))
    }

    /// Atomically replace the cached result with a fresh one.
    ///
    /// The file is written to a sibling temp path and renamed into place,
    /// so readers of the file never observe a partial write; the
    /// in-memory copy is swapped only after the file write succeeded.
    ///
    /// # Errors
    /// Returns an error when serializing or persisting fails; the
    /// previous result stays authoritative in that case.
    pub fn replace(&self, result: SyncResult) -> Result<()> {
        let body = serde_json::to_string_pretty(&result).context("failed to serialize sync result")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        let mut guard = self.current.write().map_err(|_| anyhow!("cache lock poisoned"))?;
        *guard = result;
        info!(path = %self.path.display(), "Cache replaced");
        Ok(())
    }
}

fn load_or_default(path: &Path) -> SyncResult {
    if !path.exists() {
        info!(path = %path.display(), "No cache file yet, starting empty");
        return SyncResult::default();
    }
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(result) => result,
            Err(err) => {
                warn!(path = %path.display(), %err, "Cache file corrupt, starting empty");
                SyncResult::default()
            }
        },
        Err(err) => {
            warn!(path = %path.display(), %err, "Cache file unreadable, starting empty");
            SyncResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;
    use uni_mirror_core::{Assignment, Module, UNKNOWN_MODULE};

    fn sample() -> SyncResult {
        SyncResult {
            assignments: vec![Assignment {
                id: "T1".to_owned(),
                title: "HW1".to_owned(),
                description: String::new(),
                due_date: Some("2024-01-10".to_owned()),
                module_id: None,
                module_name: UNKNOWN_MODULE.to_owned(),
                priority: 1,
                completed: false,
                url: String::new(),
                created_at: None,
                labels: BTreeSet::from(["abgabe".to_owned()]),
            }],
            modules: vec![Module {
                id: None,
                name: UNKNOWN_MODULE.to_owned(),
                order: 0,
                total: 1,
                completed: 0,
                upcoming: 1,
            }],
            last_sync: Some("2024-01-09T08:00:00Z".to_owned()),
        }
    }

    #[test]
    fn missing_file_yields_empty_default() -> Result<()> {
        let dir = tempdir()?;
        let store = CacheStore::open(dir.path().join("assignments.json"));
        let snapshot = store.snapshot()?;
        assert!(snapshot.assignments.is_empty());
        assert!(snapshot.last_sync.is_none());
        Ok(())
    }

    #[test]
    fn replace_persists_and_reloads() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("assignments.json");

        let store = CacheStore::open(&path);
        store.replace(sample())?;
        assert_eq!(store.snapshot()?, sample());

        // A fresh store sees the persisted result.
        let reopened = CacheStore::open(&path);
        assert_eq!(reopened.snapshot()?, sample());
        Ok(())
    }

    #[test]
    fn corrupt_file_yields_empty_default() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("assignments.json");
        fs::write(&path, "{ not json")?;

        let store = CacheStore::open(&path);
        let snapshot = store.snapshot()?;
        assert!(snapshot.assignments.is_empty());
        Ok(())
    }

    #[test]
    fn failed_replace_keeps_previous_result() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("assignments.json");
        let store = CacheStore::open(&path);
        store.replace(sample())?;

        // Turn the target into a directory so the rename fails.
        fs::remove_file(&path)?;
        fs::create_dir(&path)?;
        assert!(store.replace(SyncResult::default()).is_err());
        assert_eq!(store.snapshot()?, sample());
        Ok(())
    }
}
