use cardz::bus::ChangeBus;
use cardz::data::{cards, groups};
use cardz::error::CardzError;
use cardz::model::{GroupPatch, NewFlashcard};
use cardz::store::fs::FileStore;
use cardz::store::{RecordStore, FLASHCARDS_KEY, GROUPS_KEY};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    (dir, store)
}

#[test]
fn data_survives_a_new_store_instance() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    let group =
        groups::create_group(&store, &bus, "Spanish".into(), Some("Basics".into())).unwrap();
    cards::add_flashcard(&store, &bus, &group.id, NewFlashcard::new("Hello", "Hola")).unwrap();

    let reopened = FileStore::new(dir.path().to_path_buf());
    let loaded_groups = groups::load_groups(&reopened);
    let loaded_cards = cards::load_flashcards(&reopened);

    assert_eq!(loaded_groups, vec![group.clone()]);
    assert_eq!(loaded_cards.len(), 1);
    assert_eq!(loaded_cards[0].group_id, group.id);
}

#[test]
fn persisted_layout_uses_camel_case_and_omits_empty_fields() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    let group = groups::create_group(&store, &bus, "Kanji".into(), None).unwrap();
    cards::add_flashcard(&store, &bus, &group.id, NewFlashcard::new("水", "water")).unwrap();

    let raw_groups = fs::read_to_string(dir.path().join("flashcard-groups.json")).unwrap();
    let raw_cards = fs::read_to_string(dir.path().join("flashcards.json")).unwrap();
    let groups_json: serde_json::Value = serde_json::from_str(&raw_groups).unwrap();
    let cards_json: serde_json::Value = serde_json::from_str(&raw_cards).unwrap();

    let g = &groups_json[0];
    assert!(g["createdAt"].is_i64());
    assert!(g.get("description").is_none());

    let c = &cards_json[0];
    assert_eq!(c["groupId"], group.id.as_str());
    assert_eq!(c["question"], "水");
    assert!(c.get("lastReviewed").is_none());
    assert!(c.get("mastered").is_none());
}

#[test]
fn reserved_fields_written_elsewhere_are_kept() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    fs::write(
        dir.path().join("flashcards.json"),
        concat!(
            r#"[{"id":"c1","question":"Q","answer":"A","createdAt":5,"groupId":"g1","#,
            r#""lastReviewed":99,"mastered":true}]"#,
        ),
    )
    .unwrap();

    cards::add_flashcard(&store, &bus, &"g1".into(), NewFlashcard::new("Q2", "A2")).unwrap();

    let loaded = cards::load_flashcards(&store);
    assert_eq!(loaded[0].last_reviewed, Some(99));
    assert_eq!(loaded[0].mastered, Some(true));
    assert!(loaded[1].created_at >= 5);
}

#[test]
fn cascade_delete_on_disk() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    let spanish = groups::create_group(&store, &bus, "Spanish".into(), None).unwrap();
    let french = groups::create_group(&store, &bus, "French".into(), None).unwrap();
    cards::add_flashcards(
        &store,
        &bus,
        &spanish.id,
        vec![NewFlashcard::new("Hello", "Hola"), NewFlashcard::new("Bye", "Adiós")],
    )
    .unwrap();
    cards::add_flashcard(&store, &bus, &french.id, NewFlashcard::new("Hello", "Bonjour")).unwrap();

    let report = groups::delete_group(&store, &bus, &spanish.id).unwrap();

    assert_eq!(report.cards_removed, 2);
    let remaining = cards::load_flashcards(&store);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].group_id, french.id);
    assert!(!dir.path().join("commit.journal").exists());
}

#[test]
fn interrupted_commit_is_replayed_on_next_read() {
    let (dir, store) = setup();
    store.write(GROUPS_KEY, "[]").unwrap();
    store.write(FLASHCARDS_KEY, "[]").unwrap();

    // A commit that stopped after writing its journal.
    let journal = serde_json::json!({
        GROUPS_KEY: r#"[{"id":"g","name":"After","createdAt":1}]"#,
        FLASHCARDS_KEY: "[]",
    });
    fs::write(dir.path().join("commit.journal"), journal.to_string()).unwrap();

    let reopened = FileStore::new(dir.path().to_path_buf());
    let loaded = groups::load_groups(&reopened);

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "After");
    assert!(!dir.path().join("commit.journal").exists());
}

#[test]
fn torn_journal_is_discarded() {
    let (dir, store) = setup();
    store.write(GROUPS_KEY, r#"[{"id":"g","name":"Before","createdAt":1}]"#).unwrap();
    fs::write(dir.path().join("commit.journal"), "{\"flashcard-gro").unwrap();

    assert!(!store.recover().unwrap());
    assert_eq!(groups::load_groups(&store)[0].name, "Before");
    assert!(!dir.path().join("commit.journal").exists());
}

#[test]
fn corrupt_file_is_read_as_empty_but_never_overwritten() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    let path = dir.path().join("flashcard-groups.json");
    fs::write(&path, "{ this is not json").unwrap();

    assert!(groups::load_groups(&store).is_empty());
    let err = groups::create_group(&store, &bus, "New".into(), None).unwrap_err();

    assert!(matches!(err, CardzError::Corrupt { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");
}

#[test]
fn unknown_ids_leave_files_untouched() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    let group = groups::create_group(&store, &bus, "Spanish".into(), None).unwrap();
    cards::add_flashcard(&store, &bus, &group.id, NewFlashcard::new("Q", "A")).unwrap();
    let groups_before = fs::read(dir.path().join("flashcard-groups.json")).unwrap();
    let cards_before = fs::read(dir.path().join("flashcards.json")).unwrap();

    assert!(!groups::update_group(&store, &bus, &"nope".into(), &GroupPatch::name("X")).unwrap());
    assert!(groups::delete_group(&store, &bus, &"nope".into()).unwrap().is_noop());
    assert!(!cards::delete_flashcard(&store, &bus, &"nope".into()).unwrap());

    assert_eq!(fs::read(dir.path().join("flashcard-groups.json")).unwrap(), groups_before);
    assert_eq!(fs::read(dir.path().join("flashcards.json")).unwrap(), cards_before);
}

#[test]
fn no_temp_files_are_left_behind() {
    let (dir, store) = setup();
    let bus = ChangeBus::new();
    let group = groups::create_group(&store, &bus, "G".into(), None).unwrap();
    for i in 0..5 {
        let card = NewFlashcard::new(format!("Q{}", i), "A");
        cards::add_flashcard(&store, &bus, &group.id, card).unwrap();
    }
    groups::delete_group(&store, &bus, &group.id).unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
