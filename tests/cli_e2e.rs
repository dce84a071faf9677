#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cardz_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("cardz"));
    cmd.env("CARDZ_DIR", dir.path().as_os_str())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_group_and_card_workflow() {
    let temp = TempDir::new().unwrap();

    cardz_cmd(&temp)
        .args(["group", "create", "Spanish", "-d", "Basics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group created: Spanish"));

    cardz_cmd(&temp)
        .args([
            "card", "add", "spanish", "-q", "Hello", "-a", "Hola", "-q", "Thanks", "-a",
            "Gracias",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 flashcard(s) created in Spanish"));

    // No subcommand lists groups.
    cardz_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Spanish - Basics"))
        .stdout(predicate::str::contains("2 cards"));

    cardz_cmd(&temp)
        .args(["card", "list", "--search", "GRACIAS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Thanks → Gracias"))
        .stdout(predicate::str::contains("Hello").not());

    cardz_cmd(&temp)
        .args(["card", "edit", "1", "-a", "¡Hola!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flashcard updated: Hello"));

    cardz_cmd(&temp)
        .args(["card", "list", "-g", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("¡Hola!"));
}

#[test]
fn test_group_delete_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    cardz_cmd(&temp)
        .args(["group", "create", "Kanji"])
        .assert()
        .success();
    cardz_cmd(&temp)
        .args(["card", "add", "Kanji", "-q", "水", "-a", "water"])
        .assert()
        .success();

    cardz_cmd(&temp)
        .args(["group", "delete", "Kanji"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Y] To delete:"))
        .stdout(predicate::str::contains("Operation cancelled."));

    cardz_cmd(&temp)
        .args(["group", "delete", "Kanji"])
        .write_stdin("Y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Group deleted: Kanji (1 flashcard(s) removed)",
        ));

    cardz_cmd(&temp)
        .args(["card", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No flashcards found."));
}

#[test]
fn test_group_delete_with_yes_flag() {
    let temp = TempDir::new().unwrap();
    cardz_cmd(&temp)
        .args(["group", "create", "French"])
        .assert()
        .success();

    cardz_cmd(&temp)
        .args(["group", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group deleted: French"));

    cardz_cmd(&temp)
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No groups yet."));
}

#[test]
fn test_group_delete_by_name_with_numeric_ids() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("flashcard-groups.json"),
        r#"[{"id":"2","name":"Keep","createdAt":1},{"id":"abcdef","name":"Other","createdAt":2}]"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("flashcards.json"),
        concat!(
            r#"[{"id":"1","question":"Kept?","answer":"A","createdAt":1,"groupId":"2"},"#,
            r#"{"id":"9","question":"Other?","answer":"A","createdAt":2,"groupId":"abcdef"}]"#,
        ),
    )
    .unwrap();

    cardz_cmd(&temp)
        .args(["group", "delete", "Keep"])
        .write_stdin("Y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleting group \"Keep\" and its 1 flashcard(s)."))
        .stdout(predicate::str::contains("Group deleted: Keep (1 flashcard(s) removed)"));

    cardz_cmd(&temp)
        .args(["card", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Other?"))
        .stdout(predicate::str::contains("Kept?").not());

    cardz_cmd(&temp)
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Other"))
        .stdout(predicate::str::contains("Keep").not());
}

#[test]
fn test_validation_errors_exit_nonzero() {
    let temp = TempDir::new().unwrap();

    cardz_cmd(&temp)
        .args(["group", "create", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Group name cannot be empty"));

    cardz_cmd(&temp)
        .args(["card", "add", "Nowhere", "-q", "Q", "-a", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    cardz_cmd(&temp)
        .args(["group", "create", "G"])
        .assert()
        .success();
    cardz_cmd(&temp)
        .args(["card", "add", "G", "-q", "Q1", "-q", "Q2", "-a", "A1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("give one -a for every -q"));
}

#[test]
fn test_doctor_finds_and_fixes_orphans() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("flashcard-groups.json"), "[]").unwrap();
    fs::write(
        temp.path().join("flashcards.json"),
        r#"[{"id":"c1","question":"Q","answer":"A","createdAt":1,"groupId":"gone"}]"#,
    )
    .unwrap();

    cardz_cmd(&temp)
        .args(["doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 flashcard(s)"));

    cardz_cmd(&temp)
        .args(["doctor", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 flashcard(s)"));

    cardz_cmd(&temp)
        .args(["doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found."));
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();

    cardz_cmd(&temp)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shuffle = true"))
        .stdout(predicate::str::contains("preview_width = 100"));

    cardz_cmd(&temp)
        .args(["config", "shuffle", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shuffle set to false"));

    cardz_cmd(&temp)
        .args(["config", "shuffle"])
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));
}

#[test]
fn test_dir_flag_overrides_env() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    cardz_cmd(&env_dir)
        .args(["group", "create", "Elsewhere", "--dir"])
        .arg(flag_dir.path())
        .assert()
        .success();

    assert!(flag_dir.path().join("flashcard-groups.json").exists());
    assert!(!env_dir.path().join("flashcard-groups.json").exists());
}

#[test]
fn test_study_without_cards_exits_cleanly() {
    let temp = TempDir::new().unwrap();
    cardz_cmd(&temp)
        .args(["study"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No flashcards to study."));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let temp = TempDir::new().unwrap();
    cardz_cmd(&temp)
        .args(["-vv", "group", "create", "Logged"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("group created"));
}
