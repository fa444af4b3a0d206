use kudos::corpus::{LengthBand, Tone, Topic};
use kudos::telemetry::{RelaxationLevel, StoreOp, TelemetryEvent, TelemetryRecorder};

fn pick(tone: Tone, level: RelaxationLevel, candidates: usize) -> TelemetryEvent {
    TelemetryEvent::PickMade {
        tone,
        level,
        topic: Topic::Food,
        band: Some(LengthBand::Short),
        candidates,
    }
}

#[test]
fn test_snapshot_counts() {
    let mut recorder = TelemetryRecorder::new();
    recorder.record(TelemetryEvent::CorpusBuilt { tone: Tone::Morning, size: 720, pool_size: 1900, level: Some(0) });
    recorder.record(TelemetryEvent::CorpusBuilt { tone: Tone::Night, size: 720, pool_size: 1900, level: None });
    recorder.record(pick(Tone::Morning, RelaxationLevel::AllFilters, 100));
    recorder.record(pick(Tone::Morning, RelaxationLevel::TopicOnly, 40));
    recorder.record(pick(Tone::Night, RelaxationLevel::AllFilters, 60));
    recorder.record(pick(Tone::Night, RelaxationLevel::UsedReset, 0));
    recorder.record(TelemetryEvent::UsedSetReset { tone: Tone::Night, cleared: 720 });
    recorder.record(TelemetryEvent::HistoryFailure { op: StoreOp::Load });
    recorder.record(TelemetryEvent::HistoryFailure { op: StoreOp::Save });
    recorder.record(TelemetryEvent::HistoryFailure { op: StoreOp::Save });
    recorder.record(TelemetryEvent::HistoryCleared);
    recorder.record(TelemetryEvent::Personalized { transforms: 2 });
    recorder.record(TelemetryEvent::Personalized { transforms: 0 });

    let snap = recorder.snapshot();
    assert_eq!(snap.corpus_stats.built, 2);
    assert_eq!(snap.corpus_stats.fallback_fills, 1);
    assert_eq!(snap.corpus_stats.total_sentences, 1440);

    assert_eq!(snap.pick_stats.total, 4);
    assert_eq!(snap.pick_stats.by_level.get(&RelaxationLevel::AllFilters), Some(&2));
    assert_eq!(snap.pick_stats.by_tone.get(&Tone::Night), Some(&2));
    assert!((snap.pick_stats.relaxed_ratio - 0.5).abs() < 1e-9);
    assert!((snap.pick_stats.avg_candidates - 50.0).abs() < 1e-9);
    assert_eq!(snap.pick_stats.personalized, 2);
    assert_eq!(snap.pick_stats.transforms_applied, 2);

    assert_eq!(snap.history_stats.load_failures, 1);
    assert_eq!(snap.history_stats.save_failures, 2);
    assert_eq!(snap.history_stats.used_resets, 1);
    assert_eq!(snap.history_stats.sentences_cleared, 720);
    assert_eq!(snap.history_stats.explicit_clears, 1);
}

#[test]
fn test_empty_snapshot_has_zero_averages() {
    let snap = TelemetryRecorder::new().snapshot();
    assert_eq!(snap.pick_stats.total, 0);
    assert_eq!(snap.pick_stats.relaxed_ratio, 0.0);
    assert_eq!(snap.pick_stats.avg_candidates, 0.0);
}

#[test]
fn test_recorder_is_bounded() {
    let mut recorder = TelemetryRecorder::new();
    for i in 0..10_050 {
        recorder.record(pick(Tone::Any, RelaxationLevel::AllFilters, i));
    }
    assert_eq!(recorder.events().len(), 10_000, "Oldest events are dropped");
    assert_eq!(recorder.events().front(), Some(&pick(Tone::Any, RelaxationLevel::AllFilters, 50)));

    recorder.clear();
    assert!(recorder.events().is_empty());
}

#[test]
fn test_events_serialize_without_text_fields() {
    let event = pick(Tone::Evening, RelaxationLevel::TopicAndItem, 12);
    let json = serde_json::to_value(&event).unwrap();
    let fields = json["PickMade"].as_object().expect("Externally tagged variant");
    let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["band", "candidates", "level", "tone", "topic"]);
    assert_eq!(json["PickMade"]["tone"], "evening");
}
