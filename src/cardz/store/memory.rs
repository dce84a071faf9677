use super::RecordStore;
use crate::error::{CardzError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory record store for testing. Does NOT persist data.
///
/// Uses `RefCell` since cardz is single-threaded, which keeps every
/// `RecordStore` method on `&self`.
#[derive(Default)]
pub struct InMemoryStore {
    records: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CardzError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl RecordStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn commit(&self, entries: &[(&str, String)]) -> Result<()> {
        self.check_writable()?;
        let mut records = self.records.borrow_mut();
        for (key, value) in entries {
            records.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Flashcard, FlashcardGroup, GroupId, NewFlashcard};
    use crate::store::{FLASHCARDS_KEY, GROUPS_KEY};

    /// Builds a pre-populated store without going through the data layer, so
    /// tests can seed states the data layer would never produce (orphans,
    /// hand-written JSON).
    pub struct StoreFixture {
        pub store: InMemoryStore,
        groups: Vec<FlashcardGroup>,
        cards: Vec<Flashcard>,
        clock: i64,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                groups: Vec::new(),
                cards: Vec::new(),
                clock: 1_000,
            }
        }

        fn tick(&mut self) -> i64 {
            self.clock += 1;
            self.clock
        }

        pub fn with_group(mut self, name: &str) -> Self {
            let created_at = self.tick();
            self.groups
                .push(FlashcardGroup::new(name.to_string(), None, created_at));
            self.flush()
        }

        /// Adds `count` cards to the group at `group_index` (0-based).
        pub fn with_cards(mut self, group_index: usize, count: usize) -> Self {
            let group_id = self.groups[group_index].id.clone();
            for i in 0..count {
                let created_at = self.tick();
                let card = NewFlashcard::new(
                    format!("Question {}", i + 1),
                    format!("Answer {}", i + 1),
                );
                self.cards
                    .push(Flashcard::new(group_id.clone(), card, created_at));
            }
            self.flush()
        }

        pub fn with_orphan_card(mut self, question: &str) -> Self {
            let created_at = self.tick();
            self.cards.push(Flashcard::new(
                GroupId::from("missing-group"),
                NewFlashcard::new(question, "orphaned"),
                created_at,
            ));
            self.flush()
        }

        pub fn groups(&self) -> &[FlashcardGroup] {
            &self.groups
        }

        pub fn cards(&self) -> &[Flashcard] {
            &self.cards
        }

        fn flush(self) -> Self {
            self.store
                .write(GROUPS_KEY, &serde_json::to_string(&self.groups).unwrap())
                .unwrap();
            self.store
                .write(FLASHCARDS_KEY, &serde_json::to_string(&self.cards).unwrap())
                .unwrap();
            self
        }
    }
}
