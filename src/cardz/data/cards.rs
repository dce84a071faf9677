use super::{encode, load_latest, load_lenient, next_timestamp};
use crate::bus::{ChangeBus, Signal};
use crate::error::Result;
use crate::model::{CardId, Flashcard, FlashcardPatch, GroupId, NewFlashcard};
use crate::store::{RecordStore, FLASHCARDS_KEY};

pub fn load_flashcards<S: RecordStore + ?Sized>(store: &S) -> Vec<Flashcard> {
    load_lenient(store, FLASHCARDS_KEY)
}

/// Append one card to `group_id`. The group is not checked for existence.
pub fn add_flashcard<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    group_id: &GroupId,
    card: NewFlashcard,
) -> Result<Flashcard> {
    let mut added = add_flashcards(store, bus, group_id, vec![card])?;
    Ok(added.remove(0))
}

/// Append several cards in one write and one notification.
pub fn add_flashcards<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    group_id: &GroupId,
    new_cards: Vec<NewFlashcard>,
) -> Result<Vec<Flashcard>> {
    if new_cards.is_empty() {
        return Ok(Vec::new());
    }

    let mut cards: Vec<Flashcard> = load_latest(store, FLASHCARDS_KEY)?;
    let created_at = next_timestamp(cards.iter().map(|c| c.created_at));
    let added: Vec<Flashcard> = new_cards
        .into_iter()
        .map(|card| Flashcard::new(group_id.clone(), card, created_at))
        .collect();

    cards.extend(added.iter().cloned());
    store.write(FLASHCARDS_KEY, &encode(&cards)?)?;
    tracing::debug!(group = %group_id, count = added.len(), "flashcards added");

    bus.emit(Signal::FlashcardChanged);
    Ok(added)
}

/// Shallow-merge `patch` into the card with `id`. Returns `false` (and writes
/// nothing) if no such card exists.
pub fn update_flashcard<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    id: &CardId,
    patch: &FlashcardPatch,
) -> Result<bool> {
    let mut cards: Vec<Flashcard> = load_latest(store, FLASHCARDS_KEY)?;
    let Some(card) = cards.iter_mut().find(|c| &c.id == id) else {
        tracing::debug!(%id, "update skipped, flashcard not found");
        return Ok(false);
    };
    card.apply(patch);

    store.write(FLASHCARDS_KEY, &encode(&cards)?)?;
    tracing::debug!(%id, "flashcard updated");

    bus.emit(Signal::FlashcardChanged);
    Ok(true)
}

pub fn delete_flashcard<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    id: &CardId,
) -> Result<bool> {
    let removed = delete_flashcards_where(store, bus, |c| &c.id == id)?;
    Ok(removed > 0)
}

/// Remove every card matching `predicate`. Returns how many were removed.
pub fn delete_flashcards_where<S, F>(store: &S, bus: &ChangeBus, predicate: F) -> Result<usize>
where
    S: RecordStore + ?Sized,
    F: Fn(&Flashcard) -> bool,
{
    let mut cards: Vec<Flashcard> = load_latest(store, FLASHCARDS_KEY)?;
    let before = cards.len();
    cards.retain(|c| !predicate(c));
    let removed = before - cards.len();

    if removed == 0 {
        return Ok(0);
    }

    store.write(FLASHCARDS_KEY, &encode(&cards)?)?;
    tracing::debug!(removed, "flashcards deleted");

    bus.emit(Signal::FlashcardChanged);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter(bus: &ChangeBus) -> (Rc<Cell<usize>>, crate::bus::Subscription) {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = bus.subscribe(Signal::FlashcardChanged, move || h.set(h.get() + 1));
        (hits, sub)
    }

    #[test]
    fn add_persists_and_notifies() {
        let store = InMemoryStore::new();
        let bus = ChangeBus::new();
        let (hits, _sub) = counter(&bus);
        let group = GroupId::from("g1");

        let card = add_flashcard(&store, &bus, &group, NewFlashcard::new("Q", "A")).unwrap();

        assert_eq!(card.group_id, group);
        assert_eq!(card.last_reviewed, None);
        assert_eq!(card.mastered, None);
        assert_eq!(load_flashcards(&store), vec![card]);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn bulk_add_is_one_write_and_one_signal() {
        let store = InMemoryStore::new();
        let bus = ChangeBus::new();
        let (hits, _sub) = counter(&bus);

        let added = add_flashcards(
            &store,
            &bus,
            &GroupId::from("g"),
            vec![NewFlashcard::new("1", "a"), NewFlashcard::new("2", "b")],
        )
        .unwrap();

        assert_eq!(added.len(), 2);
        assert_ne!(added[0].id, added[1].id);
        assert_eq!(load_flashcards(&store).len(), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn empty_bulk_add_is_a_noop() {
        let store = InMemoryStore::new();
        let bus = ChangeBus::new();
        let (hits, _sub) = counter(&bus);

        assert!(add_flashcards(&store, &bus, &GroupId::from("g"), vec![]).unwrap().is_empty());
        assert_eq!(store.read(FLASHCARDS_KEY).unwrap(), None);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn empty_fields_persist_as_is() {
        let store = InMemoryStore::new();
        let bus = ChangeBus::new();

        add_flashcard(&store, &bus, &GroupId::from(""), NewFlashcard::new("", "")).unwrap();

        let cards = load_flashcards(&store);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "");
        assert_eq!(cards[0].group_id.as_str(), "");
    }

    #[test]
    fn update_merges_and_keeps_identity() {
        let fixture = StoreFixture::new().with_group("G").with_cards(0, 2);
        let bus = ChangeBus::new();
        let target = fixture.cards()[1].clone();

        let patch = FlashcardPatch {
            answer: Some("New answer".into()),
            ..Default::default()
        };
        assert!(update_flashcard(&fixture.store, &bus, &target.id, &patch).unwrap());

        let cards = load_flashcards(&fixture.store);
        let updated = cards.iter().find(|c| c.id == target.id).unwrap();
        assert_eq!(updated.answer, "New answer");
        assert_eq!(updated.question, target.question);
        assert_eq!(updated.created_at, target.created_at);
        assert_eq!(cards[0], fixture.cards()[0]);
    }

    #[test]
    fn unknown_ids_leave_bytes_unchanged() {
        let fixture = StoreFixture::new().with_group("G").with_cards(0, 2);
        let bus = ChangeBus::new();
        let (hits, _sub) = counter(&bus);
        let before = fixture.store.read(FLASHCARDS_KEY).unwrap();
        let missing = CardId::from("missing");

        let patch = FlashcardPatch::default();
        assert!(!update_flashcard(&fixture.store, &bus, &missing, &patch).unwrap());
        assert!(!delete_flashcard(&fixture.store, &bus, &missing).unwrap());

        assert_eq!(fixture.store.read(FLASHCARDS_KEY).unwrap(), before);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let fixture = StoreFixture::new().with_group("G").with_cards(0, 3);
        let bus = ChangeBus::new();
        let (hits, _sub) = counter(&bus);
        let target = fixture.cards()[0].id.clone();

        assert!(delete_flashcard(&fixture.store, &bus, &target).unwrap());

        let cards = load_flashcards(&fixture.store);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.id != target));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn corrupt_collection_reads_empty_but_blocks_writes() {
        let store = InMemoryStore::new();
        store.write(FLASHCARDS_KEY, "[{\"broken\":").unwrap();
        let bus = ChangeBus::new();

        assert!(load_flashcards(&store).is_empty());
        let card = NewFlashcard::new("Q", "A");
        assert!(add_flashcard(&store, &bus, &GroupId::from("g"), card).is_err());
    }
}
