use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use log::warn;

use super::screen::ScreenId;

/// Value a screen's entry holds before any lifecycle callback ran.
pub const UNSET: &str = "null";

/// Storage capability for the per-screen status entries.
///
/// Each call is atomic with respect to other callers; writers are
/// last-write-wins. Implementations must never surface persistence
/// failures to the caller (fire-and-forget).
pub trait StatusStore: Send + Sync {
    /// Current value for `id`, or the `UNSET` sentinel.
    fn get(&self, id: ScreenId) -> String;

    /// Overwrite the entry for `id`.
    fn set(&self, id: ScreenId, value: &str);

    /// Reset every screen's entry to the `UNSET` sentinel.
    fn reset_all(&self);

    /// All three entries in fixed A, B, C order.
    fn snapshot(&self) -> Vec<(ScreenId, String)> {
        ScreenId::ALL.iter().map(|&id| (id, self.get(id))).collect()
    }
}

/// File-backed store: a mutex-guarded map written through to a JSON file
/// on every mutation. A write that fails to persist is logged and dropped;
/// the in-memory entry still updates.
pub struct PrefsStore {
    entries: Mutex<HashMap<ScreenId, String>>,
    path: Option<PathBuf>,
}

impl PrefsStore {
    /// In-memory only, nothing persisted. Used in tests and as a fallback
    /// when no config directory is available.
    pub fn in_memory() -> Self {
        Self { entries: Mutex::new(HashMap::new()), path: None }
    }

    /// Open the store at `path`, loading any previously persisted entries.
    /// A missing or unreadable file starts the store empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_owned();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(map) => map,
                Err(e) => {
                    warn!("ignoring malformed status file {}: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { entries: Mutex::new(entries), path: Some(path) }
    }

    fn persist(&self, entries: &HashMap<ScreenId, String>) {
        let Some(path) = &self.path else { return };
        if let Err(e) = self.try_persist(path, entries) {
            warn!("couldn't persist statuses to {}: {e}", path.display());
        }
    }

    fn try_persist(&self, path: &Path, entries: &HashMap<ScreenId, String>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, json)
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, HashMap<ScreenId, String>> {
        // A poisoned lock only means another thread panicked mid-write;
        // the map itself is still a valid snapshot.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StatusStore for PrefsStore {
    fn get(&self, id: ScreenId) -> String {
        self.locked().get(&id).cloned().unwrap_or_else(|| UNSET.to_string())
    }

    fn set(&self, id: ScreenId, value: &str) {
        let mut entries = self.locked();
        entries.insert(id, value.to_string());
        self.persist(&entries);
    }

    fn reset_all(&self) {
        let mut entries = self.locked();
        for id in ScreenId::ALL {
            entries.insert(id, UNSET.to_string());
        }
        self.persist(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_reads_as_unset() {
        let store = PrefsStore::in_memory();
        assert_eq!(store.get(ScreenId::A), UNSET);
    }

    #[test]
    fn set_overwrites_instead_of_appending() {
        let store = PrefsStore::in_memory();
        store.set(ScreenId::A, "A: created");
        store.set(ScreenId::A, "A: started");
        assert_eq!(store.get(ScreenId::A), "A: started");
        assert_eq!(store.snapshot().len(), 3);
    }

    #[test]
    fn reset_all_sets_every_screen_to_unset() {
        let store = PrefsStore::in_memory();
        store.set(ScreenId::B, "B: resumed");
        store.reset_all();
        for (_, value) in store.snapshot() {
            assert_eq!(value, UNSET);
        }
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("statuses.json");
        {
            let store = PrefsStore::open(&path);
            store.set(ScreenId::C, "C: paused");
        }
        let reopened = PrefsStore::open(&path);
        assert_eq!(reopened.get(ScreenId::C), "C: paused");
        assert_eq!(reopened.get(ScreenId::A), UNSET);
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("statuses.json");
        std::fs::write(&path, "not json").expect("write");
        let store = PrefsStore::open(&path);
        assert_eq!(store.get(ScreenId::A), UNSET);
    }
}
