use super::{encode, load_latest, load_lenient, next_timestamp};
use crate::bus::{ChangeBus, Signal};
use crate::error::Result;
use crate::model::{Flashcard, FlashcardGroup, GroupId, GroupPatch};
use crate::store::{RecordStore, FLASHCARDS_KEY, GROUPS_KEY};

/// Outcome of [`delete_group`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteGroupReport {
    pub group: Option<FlashcardGroup>,
    pub cards_removed: usize,
}

impl DeleteGroupReport {
    pub fn is_noop(&self) -> bool {
        self.group.is_none() && self.cards_removed == 0
    }
}

pub fn load_groups<S: RecordStore + ?Sized>(store: &S) -> Vec<FlashcardGroup> {
    load_lenient(store, GROUPS_KEY)
}

pub fn create_group<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    name: String,
    description: Option<String>,
) -> Result<FlashcardGroup> {
    let mut groups: Vec<FlashcardGroup> = load_latest(store, GROUPS_KEY)?;
    let created_at = next_timestamp(groups.iter().map(|g| g.created_at));
    let group = FlashcardGroup::new(name, description, created_at);

    groups.push(group.clone());
    store.write(GROUPS_KEY, &encode(&groups)?)?;
    tracing::debug!(id = %group.id, "group created");

    bus.emit(Signal::GroupChanged);
    Ok(group)
}

/// Shallow-merge `patch` into the group with `id`. Returns `false` (and writes
/// nothing) if no such group exists.
pub fn update_group<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    id: &GroupId,
    patch: &GroupPatch,
) -> Result<bool> {
    let mut groups: Vec<FlashcardGroup> = load_latest(store, GROUPS_KEY)?;
    let Some(group) = groups.iter_mut().find(|g| &g.id == id) else {
        tracing::debug!(%id, "update skipped, group not found");
        return Ok(false);
    };
    group.apply(patch);

    store.write(GROUPS_KEY, &encode(&groups)?)?;
    tracing::debug!(%id, "group updated");

    bus.emit(Signal::GroupChanged);
    Ok(true)
}

/// Remove a group and every flashcard that belongs to it.
///
/// Both collections are written in a single commit, so a failure leaves
/// neither changed.
pub fn delete_group<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    id: &GroupId,
) -> Result<DeleteGroupReport> {
    let mut groups: Vec<FlashcardGroup> = load_latest(store, GROUPS_KEY)?;
    let mut cards: Vec<Flashcard> = load_latest(store, FLASHCARDS_KEY)?;

    let group = groups
        .iter()
        .position(|g| &g.id == id)
        .map(|pos| groups.remove(pos));
    let before = cards.len();
    cards.retain(|c| &c.group_id != id);
    let report = DeleteGroupReport {
        group,
        cards_removed: before - cards.len(),
    };

    if report.is_noop() {
        tracing::debug!(%id, "delete skipped, nothing matched");
        return Ok(report);
    }

    store.commit(&[
        (GROUPS_KEY, encode(&groups)?),
        (FLASHCARDS_KEY, encode(&cards)?),
    ])?;
    tracing::debug!(%id, cards_removed = report.cards_removed, "group deleted");

    bus.emit(Signal::GroupChanged);
    bus.emit(Signal::FlashcardChanged);
    Ok(report)
}
