//! # Storage Layer
//!
//! The record store is a small key-value persistence layer. Each key holds one
//! serialized collection; the data-access modules in [`crate::data`] decide what
//! the values mean. Keeping the store ignorant of the model lets tests swap in
//! [`memory::InMemoryStore`] without touching the filesystem.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `flashcard-groups` | JSON array of groups |
//! | `flashcards` | JSON array of flashcards |
//!
//! ## Atomicity
//!
//! A single [`RecordStore::write`] replaces one key atomically. Changes that
//! span keys (deleting a group together with its cards) go through
//! [`RecordStore::commit`], which makes every entry visible or none of them.
//!
//! ## Concurrency
//!
//! cardz assumes a single writer. Callers re-read the latest value right before
//! mutating it, which is enough for sequential callers in one process. Two
//! processes writing the same directory race and the last writer wins.
//!
//! ## Storage Layout
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── flashcard-groups.json
//! ├── flashcards.json
//! ├── config.json
//! └── commit.journal      # only present while a multi-key commit is in flight
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const GROUPS_KEY: &str = "flashcard-groups";
pub const FLASHCARDS_KEY: &str = "flashcards";

/// Abstract interface for raw record storage.
///
/// All methods take `&self`: cardz is single-threaded, so implementations that
/// need mutation use interior mutability. This lets views hold a shared handle
/// to the store and re-query it from change callbacks.
pub trait RecordStore {
    /// Read the raw value for a key. `Ok(None)` when the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value of one key.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Replace several keys at once. Either all entries land or none do.
    fn commit(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Where the records live, for diagnostics.
    fn location(&self) -> String;
}
