//! End-to-end tests for the `fw` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VALID_STORY: &str = r#"{
    "start": {
        "text": "You wake in a dark forest.",
        "choices": [
            { "text": "Follow the path", "to": "shrine" },
            { "text": "Open the gate", "to": "clearing", "requires": "Key" }
        ]
    },
    "shrine": {
        "text": "A moonlit shrine. A key glints on the altar.",
        "onArrive": { "addItem": "Key", "takeDamage": 10 },
        "choices": [
            { "text": "Return to the forest", "to": "start" }
        ]
    },
    "clearing": {
        "text": "The sun begins to rise. You are safe.",
        "isEnding": true,
        "isVictory": true
    }
}"#;

const BROKEN_STORY: &str = r#"{
    "start": {
        "text": "A corridor.",
        "choices": [
            { "text": "Walk on", "to": "nowhere" }
        ]
    }
}"#;

fn fw() -> Command {
    Command::cargo_bin("fw").unwrap()
}

fn story_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("story.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn check_accepts_valid_story() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("3 nodes, 3 choices, 1 endings"));
}

#[test]
fn check_rejects_dangling_reference() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, BROKEN_STORY);

    fw().arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "node 'start' references non-existent node 'nowhere'",
        ))
        .stderr(predicate::str::contains("story validation failed"));
}

#[test]
fn check_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, "{ not json");

    fw().arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON format"));
}

#[test]
fn check_reports_missing_file() {
    fw().arg("check")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read story file"));
}

#[test]
fn stats_shows_table() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("stats")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total nodes"))
        .stdout(predicate::str::contains("Key"));
}

#[test]
fn graph_lists_edges() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("graph")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("[start]"))
        .stdout(predicate::str::contains("[clearing] (victory ending)"))
        .stdout(predicate::str::contains("--> Follow the path --> [shrine]"))
        .stdout(predicate::str::contains("(requires Key)"))
        .stdout(predicate::str::contains("3 nodes, 3 edges, 1 endings"));
}

#[test]
fn graph_focus_shows_single_node() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("graph")
        .arg("--focus")
        .arg("shrine")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph for: shrine"))
        .stdout(predicate::str::contains("Follow the path").not());
}

#[test]
fn graph_focus_unknown_node_fails() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("graph")
        .arg("--focus")
        .arg("cellar")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("node not found: \"cellar\""));
}

#[test]
fn play_runs_to_victory() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    // Pick up the key at the shrine, walk back, and unlock the gate.
    fw().arg("play")
        .arg(&file)
        .write_stdin("1\n1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You wake in a dark forest."))
        .stdout(predicate::str::contains("You survived the night"));
}

#[test]
fn play_quits_on_q() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("play")
        .arg(&file)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You survived").not());
}

#[test]
fn play_rejects_locked_choice_and_continues() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);

    fw().arg("play")
        .arg(&file)
        .write_stdin("2\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("choice requires item: Key"));
}

#[test]
fn play_persists_and_resumes_with_save_dir() {
    let dir = TempDir::new().unwrap();
    let file = story_file(&dir, VALID_STORY);
    let saves = dir.path().join("saves");

    fw().arg("play")
        .arg(&file)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("1\nq\n")
        .assert()
        .success();
    assert!(saves.join("current-game.json").exists());

    // The resumed session is already at the shrine holding the key.
    fw().arg("play")
        .arg(&file)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You survived the night"));

    // Finishing the game clears the snapshot.
    assert!(!saves.join("current-game.json").exists());
}
