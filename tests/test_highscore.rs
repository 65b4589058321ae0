use std::fs;

use flappy_bird::entities::GameOutcome;
use flappy_bird::error::HighScoreError;
use flappy_bird::highscore::*;
use tempfile::TempDir;

fn temp_store() -> (HighScoreFile, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = HighScoreFile::new(dir.path().join("score.txt"));
    (store, dir)
}

/// In-memory store that remembers every write.
#[derive(Default)]
struct MemoryStore {
    value: Option<u32>,
    writes: Vec<u32>,
}

impl HighScoreStore for MemoryStore {
    fn read_high_score(&mut self) -> u32 {
        *self.value.get_or_insert(0)
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), HighScoreError> {
        self.value = Some(score);
        self.writes.push(score);
        Ok(())
    }
}

// ── HighScoreFile ─────────────────────────────────────────────────────────────

#[test]
fn missing_file_reads_zero_and_is_created() {
    let (mut store, _dir) = temp_store();
    assert!(!store.path().exists());
    assert_eq!(store.read_high_score(), 0);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "0");
}

#[test]
fn write_then_read() {
    let (mut store, _dir) = temp_store();
    store.write_high_score(42).unwrap();
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "42");
    assert_eq!(store.read_high_score(), 42);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let (mut store, _dir) = temp_store();
    fs::write(store.path(), " 17\n").unwrap();
    assert_eq!(store.read_high_score(), 17);
}

#[test]
fn corrupt_file_reads_zero() {
    let (mut store, _dir) = temp_store();
    fs::write(store.path(), "not a number").unwrap();
    assert_eq!(store.read_high_score(), 0);

    fs::write(store.path(), "-3").unwrap();
    assert_eq!(store.read_high_score(), 0);
}

#[test]
fn unreadable_path_reads_zero() {
    let dir = TempDir::new().unwrap();
    let mut store = HighScoreFile::new(dir.path()); // a directory
    assert_eq!(store.read_high_score(), 0);
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let mut store = HighScoreFile::new(dir.path().join("nope").join("score.txt"));
    let err = store.write_high_score(5).unwrap_err();
    assert!(matches!(err, HighScoreError::Io { .. }));
    assert!(err.to_string().contains("score.txt"));
}

// ── record_outcome ────────────────────────────────────────────────────────────

#[test]
fn better_score_is_saved() {
    let (mut store, _dir) = temp_store();
    store.write_high_score(3).unwrap();
    let outcome = record_outcome(8, &mut store);
    assert_eq!(outcome, GameOutcome { score: 8, high_score: 8, new_record: true });
    assert_eq!(store.read_high_score(), 8);
}

#[test]
fn equal_score_is_not_a_record() {
    let mut store = MemoryStore { value: Some(5), ..Default::default() };
    let outcome = record_outcome(5, &mut store);
    assert_eq!(outcome, GameOutcome { score: 5, high_score: 5, new_record: false });
    assert!(store.writes.is_empty());
}

#[test]
fn worse_score_leaves_record_alone() {
    let mut store = MemoryStore { value: Some(12), ..Default::default() };
    let outcome = record_outcome(4, &mut store);
    assert_eq!(outcome.high_score, 12);
    assert!(!outcome.new_record);
    assert!(store.writes.is_empty());
}

#[test]
fn zero_score_on_first_run_creates_record() {
    let (mut store, _dir) = temp_store();
    let outcome = record_outcome(0, &mut store);
    assert_eq!(outcome, GameOutcome { score: 0, high_score: 0, new_record: false });
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "0");
}

#[test]
fn record_is_max_over_sessions_and_writes_only_increase() {
    let mut store = MemoryStore::default();
    let scores = [3, 7, 2, 7, 5, 11, 0];
    for &score in &scores {
        record_outcome(score, &mut store);
    }
    assert_eq!(store.read_high_score(), 11);
    assert_eq!(store.writes, vec![3, 7, 11]);
}

#[test]
fn record_survives_reopening_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("score.txt");
    for score in [4, 9, 6] {
        let mut store = HighScoreFile::new(&path);
        record_outcome(score, &mut store);
    }
    assert_eq!(HighScoreFile::new(&path).read_high_score(), 9);
}
