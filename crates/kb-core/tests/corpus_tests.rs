use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use kb_core::corpus::{self, CorpusSource};
use kb_core::{Article, CorpusLoadError, CorpusSnapshot, CorpusStore, ReloadOutcome};

fn fixture_dir() -> PathBuf {
    // crates/kb-core -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    root.join("test_data/corpus")
}

fn record(title: &str) -> String {
    format!(r#"{{"title": "{title}", "content": "body of {title}"}}"#)
}

#[test]
fn flat_list_and_wrapper_shapes_normalize_identically() {
    let items = format!("[{}, {}]", record("Robot"), record("Android"));
    let flat = corpus::load_str(&items).expect("flat");
    let wrapped = corpus::load_str(&format!(r#"{{"articles": {items}}}"#)).expect("wrapped");

    let titles = |s: &CorpusSnapshot| s.iter().map(|a| a.title.clone()).collect::<Vec<_>>();
    assert_eq!(titles(&flat), vec!["Robot", "Android"]);
    assert_eq!(titles(&flat), titles(&wrapped));
}

#[test]
fn one_untitled_record_among_ten_is_skipped() {
    let mut records: Vec<String> = (0..9).map(|i| record(&format!("Article {i}"))).collect();
    records.insert(4, r#"{"content": "no title here"}"#.to_string());
    let snapshot = corpus::load_str(&format!("[{}]", records.join(","))).expect("load");

    assert_eq!(snapshot.len(), 9);
    assert_eq!(snapshot.skipped(), 1);
}

#[test]
fn blank_titles_and_wrong_types_are_skipped_not_fatal() {
    let json = r#"[
        {"title": "   ", "content": "blank"},
        {"title": 42, "content": "numeric title"},
        "not an object",
        {"title": "Keeper", "content": "fine", "word_count": 1500.0}
    ]"#;
    let snapshot = corpus::load_str(json).expect("load");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.skipped(), 3);
    assert_eq!(snapshot.all()[0].word_count, 1500);
}

#[test]
fn derived_fields_fill_in_missing_metadata() {
    let json = r#"[{"title": "Actuator", "content": "moves a mechanism", "quality_score": 9.0}]"#;
    let snapshot = corpus::load_str(json).expect("load");
    let a = &snapshot.all()[0];
    assert_eq!(a.word_count, 3);
    assert_eq!(a.summary, "moves a mechanism");
    assert_eq!(a.domain, "general");
    assert_eq!(a.quality_score, 2.5, "quality is capped");
}

#[test]
fn structurally_invalid_sources_fail() {
    assert!(matches!(corpus::load_str("{not json"), Err(CorpusLoadError::Json(_))));
    assert!(matches!(corpus::load_str(r#""just a string""#), Err(CorpusLoadError::Shape(_))));
    assert!(matches!(corpus::load_str(r#"{"items": []}"#), Err(CorpusLoadError::Shape(_))));
    assert!(matches!(corpus::load_str(r#"{"articles": {}}"#), Err(CorpusLoadError::Shape(_))));
    assert!(matches!(
        corpus::load_str(r#"[{"content": "a"}, {"content": "b"}]"#),
        Err(CorpusLoadError::NoValidRecords { total: 2 })
    ));
}

#[test]
fn empty_collection_is_an_empty_snapshot() {
    let snapshot = corpus::load(CorpusSource::Bytes(b"[]")).expect("load");
    assert!(snapshot.is_empty());
}

#[test]
fn missing_file_reports_its_path() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.json");
    match corpus::load_path(&missing) {
        Err(CorpusLoadError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn directory_load_merges_json_files_in_sorted_order() {
    let snapshot = corpus::load_path(&fixture_dir()).expect("load fixtures");
    // ethics.json sorts before robotics.json
    assert_eq!(snapshot.all()[0].title, "Ethics of artificial intelligence");
    assert_eq!(snapshot.len(), 9);
    assert_eq!(snapshot.skipped(), 1);
    assert_eq!(snapshot.source(), fixture_dir().display().to_string());

    let file = fixture_dir().join("ethics.json");
    assert_eq!(corpus::load_path(&file).expect("load file").source(), file.display().to_string());

    let stats = snapshot.stats();
    assert_eq!(stats.by_domain.get("ethics"), Some(&3));
    assert_eq!(stats.by_domain.get("robotics"), Some(&3));
    assert!(stats.total_words > 0);
}

#[test]
fn directory_load_skips_broken_files_when_others_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.json"), format!("[{}]", record("Robot"))).unwrap();
    fs::write(tmp.path().join("b.json"), "{broken").unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let snapshot = corpus::load_path(tmp.path()).expect("load");
    assert_eq!(snapshot.len(), 1);
}

#[test]
fn identical_sources_share_a_fingerprint() {
    let json = format!("[{}]", record("Robot"));
    let a = corpus::load_str(&json).unwrap();
    let b = corpus::load_str(&json).unwrap();
    let c = corpus::load_str(&format!("[{}]", record("Android"))).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn reload_swaps_snapshot_without_touching_readers() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kb.json");
    fs::write(&path, format!("[{}]", record("Robot"))).unwrap();

    let store = CorpusStore::open(&path).expect("open");
    let before = store.snapshot();

    assert_eq!(store.reload_from(&path).unwrap(), ReloadOutcome::Unchanged { articles: 1 });

    fs::write(&path, format!("[{}, {}]", record("Robot"), record("Android"))).unwrap();
    assert_eq!(store.reload_from(&path).unwrap(), ReloadOutcome::Replaced { articles: 2 });

    // A reader holding the old snapshot still sees it in full.
    assert_eq!(before.len(), 1);
    assert_eq!(store.snapshot().len(), 2);
    assert!(!Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn failed_reload_keeps_current_snapshot() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("kb.json");
    fs::write(&path, format!("[{}]", record("Robot"))).unwrap();
    let store = CorpusStore::open(&path).expect("open");

    fs::write(&path, "garbage").unwrap();
    assert!(store.reload_from(&path).is_err());
    assert_eq!(store.snapshot().all()[0].title, "Robot");
}

#[test]
fn in_memory_snapshot_drops_untitled_articles() {
    let snapshot = CorpusSnapshot::from_articles(vec![Article::new("Robot", ""), Article::new("", "orphan")]);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.skipped(), 1);
}
