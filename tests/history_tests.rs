use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use kudos::config::PickerConfig;
use kudos::corpus::{Corpus, Features, LengthBand, Tone, Topic};
use kudos::history::{FileHistoryStore, History, HistoryStore, Retention, HISTORY_FILES};
use kudos::picker::Picker;
use kudos::telemetry::{StoreOp, TelemetryEvent, TelemetryRecorder};
use kudos::StoreError;

fn sample_history() -> History {
    let mut history = History::default();
    for sentence in [
        "The fries were hot.",
        "Plus the staff were friendly.",
        "Loved the spicy chicken sandwich; it was perfectly crispy.",
    ] {
        history.record(sentence, &Features::of(sentence), Tone::Evening, Retention::default());
    }
    history
}

#[test]
fn test_file_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileHistoryStore::new(dir.path().join("history"));

    let history = sample_history();
    store.save(&history).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, history, "Loaded history should equal the saved one");
    assert_eq!(loaded.last_tone, Some(Tone::Evening));
    assert_eq!(loaded.recent_topics.back(), Some(&Topic::Food));
    assert_eq!(loaded.recent_connectors, vec![false, true, false]);
}

#[test]
fn test_file_store_writes_every_file_and_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileHistoryStore::new(dir.path());
    store.save(&sample_history()).unwrap();

    for file in HISTORY_FILES {
        assert!(store.path(file).exists(), "{file} should exist after save");
    }
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "Temp files should be renamed away");
}

#[test]
fn test_missing_directory_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::new(dir.path().join("never-created"));
    assert_eq!(store.load().unwrap(), History::default());
}

#[test]
fn test_empty_file_loads_as_default_stream() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::new(dir.path());
    fs::write(store.path("recent.json"), "  \n").unwrap();
    assert!(store.load().unwrap().recent.is_empty());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::new(dir.path());
    fs::write(store.path("used.json"), "{ not json").unwrap();

    match store.load() {
        Err(StoreError::Serialization { path, .. }) => assert!(path.ends_with("used.json")),
        other => panic!("Expected a serialization error, got {other:?}"),
    }
}

#[test]
fn test_picker_survives_malformed_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHistoryStore::new(dir.path());
    fs::write(store.path("recent-topics.json"), "[\"not-a-topic\"]").unwrap();

    let corpus = Corpus::new(Tone::Any, vec!["The fries were hot.".into(), "Fast line.".into()]);
    let mut picker = Picker::new(store, PickerConfig::default(), Retention::default());
    let mut telemetry = TelemetryRecorder::new();
    let pick = picker
        .pick_with(&corpus, &mut telemetry, &mut StdRng::seed_from_u64(5))
        .expect("A broken history must not stop picking");

    assert!(corpus.contains(&pick.sentence));
    assert!(
        telemetry
            .events()
            .contains(&TelemetryEvent::HistoryFailure { op: StoreOp::Load }),
        "Load failure should be recorded"
    );
    let repaired = picker.store().load().expect("Save after the pick rewrites every file");
    assert_eq!(repaired.recent, vec![pick.sentence]);
}

#[test]
fn test_corrupt_cooldown_file_keeps_used_set() {
    let dir = tempfile::tempdir().unwrap();
    let sentences: Vec<String> = (1..=20).map(|n| format!("Visit number {n} was great.")).collect();
    let corpus = Corpus::new(Tone::Any, sentences);
    let mut picker = Picker::new(
        FileHistoryStore::new(dir.path()),
        PickerConfig::without_cooldowns(),
        Retention::default(),
    );
    let mut telemetry = TelemetryRecorder::new();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        picker.pick_with(&corpus, &mut telemetry, &mut rng).unwrap();
    }
    let before = picker.store().load().unwrap().used;
    assert_eq!(before.len(), 10);

    fs::write(picker.store().path("recent-openers.json"), "{oops").unwrap();
    let pick = picker.pick_with(&corpus, &mut telemetry, &mut rng).unwrap();
    assert!(!before.contains(&pick.sentence), "Used sentences stay blocked");

    let after = picker.store().load().unwrap();
    assert_eq!(after.used.len(), 11, "Only the corrupt file is reset");
    assert!(before.is_subset(&after.used));
    assert_eq!(after.recent.len(), 11);
    assert_eq!(after.recent_openers, vec!["visit"], "The corrupt stream restarts from empty");

    let failures = telemetry
        .events()
        .iter()
        .filter(|e| **e == TelemetryEvent::HistoryFailure { op: StoreOp::Load })
        .count();
    assert_eq!(failures, 1);
}

#[test]
fn test_lenient_load_reports_each_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileHistoryStore::new(dir.path());
    let history = sample_history();
    store.save(&history).unwrap();
    fs::write(store.path("recent-openers.json"), "{oops").unwrap();
    fs::write(store.path("last-tone.json"), "\"brunch\"").unwrap();

    let (loaded, failures) = store.load_lenient();
    assert_eq!(failures.len(), 2);
    assert!(loaded.recent_openers.is_empty());
    assert_eq!(loaded.last_tone, None);
    assert_eq!(loaded.used, history.used);
    assert_eq!(loaded.recent_topics, history.recent_topics);
}

#[test]
fn test_record_trims_to_retention() {
    let retention = Retention { recent: 2, stream: 3 };
    let mut history = History::default();
    let sentences = [
        "The fries were hot.",
        "Fast line.",
        "The staff were friendly.",
        "Great value for the price.",
        "The tables were wiped down.",
    ];
    for sentence in sentences {
        history.record(sentence, &Features::of(sentence), Tone::Any, retention);
    }

    assert_eq!(history.used.len(), 5, "The used set is never trimmed");
    assert_eq!(history.recent, vec!["Great value for the price.", "The tables were wiped down."]);
    assert_eq!(history.recent_topics.len(), 3);
    assert_eq!(history.recent_openers, vec!["the", "great", "the"]);
    assert_eq!(history.recent_length_bands.back(), Some(&LengthBand::Short));
    assert!(!history.is_recent("Fast line."));
}

#[test]
fn test_clear_used_keeps_cooldown_streams() {
    let mut history = sample_history();
    history.clear_used();
    assert!(history.used.is_empty());
    assert_eq!(history.recent.len(), 3);
    assert_eq!(history.recent_openers.len(), 3);
}
