//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all cardz operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the application context**: the record store and the change bus
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., parsing user-typed selectors)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own and returns data, not strings.
//!
//! ## Generic Over RecordStore
//!
//! `CardzApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `CardzApi<FileStore>`
//! - Testing: `CardzApi<InMemoryStore>`
//!
//! The store sits behind an `Rc` so that live views can keep their own handle
//! and reload from it when the bus notifies them.

use crate::bus::ChangeBus;
use crate::commands;
use crate::data::{cards, groups};
use crate::error::Result;
use crate::index::{resolve_group, Selector};
use crate::model::{CardId, Flashcard, FlashcardGroup, GroupId, NewFlashcard};
use crate::store::RecordStore;
use crate::study::{Ordering, StudyScope, StudySession};
use crate::view::LiveView;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct CardzApi<S: RecordStore> {
    store: Rc<S>,
    bus: ChangeBus,
    data_dir: PathBuf,
}

impl<S: RecordStore + 'static> CardzApi<S> {
    pub fn new(store: S, data_dir: PathBuf) -> Self {
        Self {
            store: Rc::new(store),
            bus: ChangeBus::new(),
            data_dir,
        }
    }

    pub fn store(&self) -> Rc<S> {
        Rc::clone(&self.store)
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn create_group(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::groups::create(&*self.store, &self.bus, name, description)
    }

    pub fn list_groups(&self) -> Result<commands::CmdResult> {
        commands::groups::list(&*self.store)
    }

    pub fn update_group(
        &self,
        selector: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::groups::update(&*self.store, &self.bus, &selector, name, description)
    }

    pub fn delete_group(&self, selector: &str) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::groups::delete(&*self.store, &self.bus, &selector)
    }

    /// Delete a group the caller already resolved, e.g. after confirming
    /// with the user.
    pub fn delete_group_by_id(&self, id: &GroupId) -> Result<commands::CmdResult> {
        let selector = Selector::Id(id.as_str().to_string());
        commands::groups::delete(&*self.store, &self.bus, &selector)
    }

    /// Look up a group without changing anything, e.g. to confirm a delete.
    pub fn find_group(&self, selector: &str) -> Result<FlashcardGroup> {
        let selector: Selector = selector.parse()?;
        let all = groups::load_groups(&*self.store);
        resolve_group(&all, &selector).cloned()
    }

    pub fn add_cards(
        &self,
        group: &str,
        new_cards: Vec<NewFlashcard>,
    ) -> Result<commands::CmdResult> {
        let group: Selector = group.parse()?;
        commands::cards::add(&*self.store, &self.bus, &group, new_cards)
    }

    pub fn list_cards(
        &self,
        group: Option<&str>,
        search: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let filter = CardFilter {
            group: group.map(|s| s.parse::<Selector>()).transpose()?,
            search: search.map(str::to_string),
        };
        commands::cards::list(&*self.store, &filter)
    }

    /// Cards of a group the caller already resolved.
    pub fn list_group_cards(&self, id: &GroupId) -> Result<commands::CmdResult> {
        let filter = CardFilter {
            group: Some(Selector::Id(id.as_str().to_string())),
            search: None,
        };
        commands::cards::list(&*self.store, &filter)
    }

    pub fn update_card(
        &self,
        selector: &str,
        question: Option<&str>,
        answer: Option<&str>,
        group: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        let group: Option<Selector> = group.map(|s| s.parse::<Selector>()).transpose()?;
        commands::cards::update(
            &*self.store,
            &self.bus,
            &selector,
            question,
            answer,
            group.as_ref(),
        )
    }

    pub fn delete_card(&self, selector: &str) -> Result<commands::CmdResult> {
        let selector: Selector = selector.parse()?;
        commands::cards::delete(&*self.store, &self.bus, &selector)
    }

    /// Delete a card the caller already holds, such as the one on screen in a
    /// study session.
    pub fn delete_card_by_id(&self, id: &CardId) -> Result<bool> {
        cards::delete_flashcard(&*self.store, &self.bus, id)
    }

    pub fn doctor(&self, fix: bool) -> Result<commands::CmdResult> {
        commands::doctor::run(&*self.store, &self.bus, fix)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    /// Start a study session over one group (by selector) or every card.
    pub fn study<R: Rng + ?Sized>(
        &self,
        group: Option<&str>,
        ordering: Ordering,
        rng: &mut R,
    ) -> Result<StudySession> {
        let scope = match group {
            Some(sel) => StudyScope::Group(self.find_group(sel)?.id),
            None => StudyScope::All,
        };
        let deck = cards::load_flashcards(&*self.store);
        Ok(StudySession::new(scope, ordering, &deck, rng))
    }

    pub fn watch_groups(&self) -> LiveView<FlashcardGroup> {
        LiveView::groups(self.store(), &self.bus)
    }

    pub fn watch_cards(&self) -> LiveView<Flashcard> {
        LiveView::flashcards(self.store(), &self.bus)
    }
}

pub use crate::commands::cards::CardFilter;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CardRow, CmdMessage, CmdResult, GroupSummary, MessageLevel};
