use std::collections::{BTreeMap, HashSet};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;

use kudos::config::CorpusConfig;
use kudos::corpus::banks;
use kudos::corpus::constraints::{pattern_cap, stem_cap, tally};
use kudos::corpus::quality::gate;
use kudos::corpus::selector::band_targets;
use kudos::corpus::tone::epoch_bucket;
use kudos::corpus::{build_all, build_corpus, Clock, Corpus, FixedClock, LengthBand, Tone};

static CLOCK: Lazy<FixedClock> = Lazy::new(|| FixedClock(Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()));

static CORPORA: Lazy<BTreeMap<Tone, Corpus>> =
    Lazy::new(|| build_all(&CorpusConfig::default(), &*CLOCK).expect("default corpora build"));

#[test]
fn test_every_tone_has_full_corpus() {
    assert_eq!(CORPORA.len(), Tone::ALL.len());
    for (tone, corpus) in CORPORA.iter() {
        assert_eq!(corpus.tone, *tone);
        assert_eq!(corpus.len(), 720, "{tone} corpus size");
        let unique: HashSet<&str> = corpus.iter().collect();
        assert_eq!(unique.len(), corpus.len(), "{tone} corpus has duplicates");
    }
}

#[test]
fn test_band_shares_within_two_percent() {
    let config = CorpusConfig::default();
    let targets = band_targets(config.target, config.ratios());
    let tolerance = config.target / 50;
    for (tone, corpus) in CORPORA.iter() {
        let counts = corpus.band_counts();
        for band in LengthBand::ALL {
            let (got, want) = (counts[band.index()], targets[band.index()]);
            assert!(
                got.abs_diff(want) <= tolerance,
                "{tone} {} band holds {got}, target {want}",
                band.as_str()
            );
        }
    }
}

#[test]
fn test_every_sentence_is_clean() {
    for (tone, corpus) in CORPORA.iter() {
        for sentence in corpus.iter() {
            assert!(sentence.chars().count() <= 160, "{tone}: too long: {sentence}");
            assert!(sentence.ends_with(['.', '!', '?']), "{tone}: unterminated: {sentence}");
            assert_eq!(gate(sentence).as_deref(), Ok(sentence), "{tone}: not a gate fixed point");
        }
    }
}

#[test]
fn test_stem_and_pattern_caps_hold() {
    for (tone, corpus) in CORPORA.iter() {
        let (stems, patterns) = tally(corpus.iter());
        for (stem, count) in stems {
            let cap = stem_cap(stem).unwrap_or(usize::MAX);
            assert!(count <= cap, "{tone}: stem {stem:?} used {count} times, cap {cap}");
        }
        for (pattern, count) in patterns {
            let cap = pattern_cap(pattern).unwrap_or(usize::MAX);
            assert!(count <= cap, "{tone}: pattern {pattern} used {count} times, cap {cap}");
        }
    }
}

#[test]
fn test_build_is_deterministic_per_bucket() {
    let config = CorpusConfig::default();
    let bucket = epoch_bucket(CLOCK.now(), config.bucket_days);
    let rebuilt = build_corpus(Tone::Evening, &config, bucket).unwrap();
    assert_eq!(&rebuilt, &CORPORA[&Tone::Evening], "Same tone and bucket, same corpus");

    let next = build_corpus(Tone::Evening, &config, bucket + 1).unwrap();
    assert_ne!(next.sentences(), rebuilt.sentences(), "A new bucket reshuffles the corpus");
    assert_ne!(CORPORA[&Tone::Morning].sentences(), CORPORA[&Tone::Evening].sentences());
}

#[test]
fn test_registers_stay_in_their_corpus() {
    let morning = &CORPORA[&Tone::Morning];
    assert!(
        !morning.iter().any(|s| s.to_lowercase().contains("late tonight")),
        "Night phrasing leaked into the morning corpus"
    );

    let any = &CORPORA[&Tone::Any];
    let registers = [banks::MORNING_TIMES, banks::AFTERNOON_TIMES, banks::EVENING_TIMES, banks::NIGHT_TIMES];
    let represented = registers
        .iter()
        .filter(|bank| any.iter().any(|s| {
            let lower = s.to_lowercase();
            bank.iter().any(|phrase| lower.contains(phrase))
        }))
        .count();
    assert!(represented >= 3, "Mixed corpus should draw on several registers, found {represented}");
}

#[test]
fn test_topics_are_spread() {
    for (tone, corpus) in CORPORA.iter() {
        let topics = corpus.topic_counts();
        assert!(topics.len() >= 5, "{tone} corpus covers only {} topics", topics.len());
        let largest = topics.values().copied().max().unwrap_or(0);
        assert!(largest < corpus.len() * 3 / 4, "{tone} corpus dominated by one topic");
    }
}

#[test]
fn test_corpus_new_dedupes_in_order() {
    let corpus = Corpus::new(
        Tone::Any,
        vec!["Fast line.".into(), "Hot fries.".into(), "Fast line.".into()],
    );
    assert_eq!(corpus.sentences(), ["Fast line.", "Hot fries."]);
    assert!(corpus.contains("Hot fries."));
}
