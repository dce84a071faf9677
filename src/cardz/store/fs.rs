use super::RecordStore;
use crate::error::{CardzError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const JOURNAL_FILENAME: &str = "commit.journal";

/// File-backed record store: one `<key>.json` file per key under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CardzError::Store(format!("Invalid record key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn journal_path(&self) -> PathBuf {
        self.root.join(JOURNAL_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CardzError::Io)?;
        }
        Ok(())
    }

    /// Write to a temp file in the same directory, then rename over the target.
    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let tmp = self.root.join(format!(".record-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(CardzError::Io)?;
        fs::rename(&tmp, target).map_err(CardzError::Io)?;
        Ok(())
    }

    fn apply_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        for (key, value) in entries {
            let path = self.key_path(key)?;
            self.write_atomic(&path, value)?;
        }
        Ok(())
    }

    /// Finish a multi-key commit interrupted before its journal was removed.
    ///
    /// Returns `true` if a journal was replayed.
    pub fn recover(&self) -> Result<bool> {
        let journal = self.journal_path();
        if !journal.exists() {
            return Ok(false);
        }

        let raw = fs::read_to_string(&journal).map_err(CardzError::Io)?;
        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(entries) => {
                tracing::warn!(
                    entries = entries.len(),
                    root = %self.root.display(),
                    "replaying interrupted commit"
                );
                self.apply_entries(&entries)?;
                fs::remove_file(&journal).map_err(CardzError::Io)?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable commit journal");
                fs::remove_file(&journal).map_err(CardzError::Io)?;
                Ok(false)
            }
        }
    }
}

impl RecordStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.recover()?;
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CardzError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.recover()?;
        let path = self.key_path(key)?;
        self.write_atomic(&path, value)
    }

    fn commit(&self, entries: &[(&str, String)]) -> Result<()> {
        self.recover()?;

        let mut pending = BTreeMap::new();
        for (key, value) in entries {
            // Validate every key before anything touches the disk.
            self.key_path(key)?;
            pending.insert(key.to_string(), value.clone());
        }

        match pending.len() {
            0 => return Ok(()),
            1 => return self.apply_entries(&pending),
            _ => {}
        }

        // 1. Durable intent: once the journal is in place the commit will complete.
        let journal = serde_json::to_string(&pending).map_err(CardzError::Serialization)?;
        self.write_atomic(&self.journal_path(), &journal)?;

        // 2. Apply every entry
        self.apply_entries(&pending)?;

        // 3. Done
        fs::remove_file(self.journal_path()).map_err(CardzError::Io)?;
        tracing::debug!(keys = pending.len(), "multi-key commit applied");
        Ok(())
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FLASHCARDS_KEY, GROUPS_KEY};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, store) = setup();
        assert_eq!(store.read(GROUPS_KEY).unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_file() {
        let (_dir, store) = setup();
        store.write(GROUPS_KEY, "[]").unwrap();
        let on_disk = fs::read_to_string(store.root().join("flashcard-groups.json")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let (_dir, store) = setup();
        assert!(matches!(
            store.write("../outside", "x"),
            Err(CardzError::Store(_))
        ));
    }

    #[test]
    fn commit_writes_every_key_and_removes_journal() {
        let (_dir, store) = setup();
        store
            .commit(&[
                (GROUPS_KEY, "[1]".to_string()),
                (FLASHCARDS_KEY, "[2]".to_string()),
            ])
            .unwrap();

        assert_eq!(store.read(GROUPS_KEY).unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.read(FLASHCARDS_KEY).unwrap().as_deref(), Some("[2]"));
        assert!(!store.root().join(JOURNAL_FILENAME).exists());
    }

    #[test]
    fn invalid_key_in_commit_writes_nothing() {
        let (_dir, store) = setup();
        let result = store.commit(&[
            (GROUPS_KEY, "[1]".to_string()),
            ("bad/key", "[2]".to_string()),
        ]);
        assert!(result.is_err());
        assert_eq!(store.read(GROUPS_KEY).unwrap(), None);
    }

    #[test]
    fn pending_journal_is_replayed_on_read() {
        let (_dir, store) = setup();
        store.write(GROUPS_KEY, "[\"old\"]").unwrap();

        // Simulate a crash after the journal landed but before it was applied.
        let mut entries = BTreeMap::new();
        entries.insert(GROUPS_KEY.to_string(), "[]".to_string());
        entries.insert(FLASHCARDS_KEY.to_string(), "[]".to_string());
        fs::write(
            store.root().join(JOURNAL_FILENAME),
            serde_json::to_string(&entries).unwrap(),
        )
        .unwrap();

        assert_eq!(store.read(GROUPS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.read(FLASHCARDS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(!store.root().join(JOURNAL_FILENAME).exists());
    }

    #[test]
    fn unreadable_journal_is_discarded() {
        let (_dir, store) = setup();
        store.write(GROUPS_KEY, "[\"kept\"]").unwrap();
        fs::write(store.root().join(JOURNAL_FILENAME), "{not json").unwrap();

        assert!(!store.recover().unwrap());
        assert_eq!(
            store.read(GROUPS_KEY).unwrap().as_deref(),
            Some("[\"kept\"]")
        );
    }
}
