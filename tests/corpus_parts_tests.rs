use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use kudos::config::NgramCaps;
use kudos::corpus::banks;
use kudos::corpus::constraints::{pattern_cap, stem_cap, Registry};
use kudos::corpus::expander::{expand, Expansions, SentenceSet};
use kudos::corpus::features::{clauses, menu_items_in, opener_class};
use kudos::corpus::pairing::{combine, compatible, join, sample_indices, Traits};
use kudos::corpus::selector::{band_targets, ngrams, select};
use kudos::corpus::tone::{derive_seed, epoch_bucket};
use kudos::corpus::{Features, LengthBand, OpenerClass, Tone, Topic};
use kudos::KudosError;

// Expander

#[test]
fn test_expand_cartesian_product() {
    let out = expand(
        &["The {item} was {quality}."],
        &[("item", &["fries", "tenders"]), ("quality", &["hot", "crispy", "fresh"])],
    );
    assert_eq!(out.len(), 6, "2 items x 3 qualities");
    assert_eq!(out[0], "The fries was hot.");
    assert!(out.contains(&"The tenders was fresh.".to_string()));
}

#[test]
fn test_expand_empty_slot_yields_nothing() {
    let empty: &[&str] = &[];
    let out = expand(&["The {item} was {quality}."], &[("item", &["fries"]), ("quality", empty)]);
    assert!(out.is_empty(), "Empty slot list should produce an empty set");

    let missing = expand(&["The {item} was {quality}."], &[("item", &["fries"])]);
    assert!(missing.is_empty(), "Missing slot should produce an empty set");
}

#[test]
fn test_expand_capitalized_placeholder() {
    let out = expand(&["{Time}, the line moved."], &[("time", &["this morning"])]);
    assert_eq!(out, vec!["This morning, the line moved.".to_string()]);
}

#[test]
fn test_expand_drops_duplicates_and_unterminated() {
    let out = expand(
        &["Great {item}.", "Great {item}.", "No period {item}"],
        &[("item", &["fries", "fries"])],
    );
    assert_eq!(out, vec!["Great fries.".to_string()]);

    let mut set = SentenceSet::new();
    assert!(set.add("Fast line.".into()));
    assert!(!set.add("Fast line.".into()), "Duplicate rejected");
    assert!(!set.add("Fast line".into()), "Missing terminal punctuation rejected");
    assert_eq!(set.len(), 1);
}

#[test]
fn test_every_expansion_is_terminated_and_unique() {
    let expansions = Expansions::for_tone(Tone::Any);
    for list in [&expansions.service, &expansions.staff, &expansions.food, &expansions.cleanliness] {
        assert!(!list.is_empty());
        let unique: std::collections::HashSet<_> = list.iter().collect();
        assert_eq!(unique.len(), list.len(), "Expansion lists are duplicate-free");
        for sentence in list.iter() {
            assert!(
                sentence.ends_with(['.', '!', '?']),
                "Unterminated sentence: {sentence}"
            );
        }
    }
}

#[test]
fn test_tone_specific_time_phrases() {
    let morning = banks::service_times(Tone::Morning);
    assert!(morning.contains(&"during the breakfast rush"));
    assert!(!morning.contains(&"late tonight"));
    assert!(morning.contains(&"today"), "Shared phrases follow the register's own");

    let any = banks::service_times(Tone::Any);
    for phrase in ["this morning", "during lunch", "this evening", "late tonight", "today"] {
        assert!(any.contains(&phrase), "Any tone should carry {phrase}");
    }
}

#[test]
fn test_any_tone_short_lines_interleave_registers() {
    let any = banks::short_lines(Tone::Any);
    assert_eq!(any.len(), banks::SHORT_MORNING.len() + banks::SHORT_MIDDAY.len() + banks::SHORT_EVENING.len());
    assert_eq!(any[0], banks::SHORT_MORNING[0]);
    assert_eq!(any[1], banks::SHORT_MIDDAY[0]);
    assert_eq!(any[2], banks::SHORT_EVENING[0]);
    assert_eq!(banks::short_lines(Tone::Night), banks::SHORT_EVENING.to_vec());
}

// Features

#[test]
fn test_length_band_boundaries() {
    assert_eq!(LengthBand::of(80, 160), Some(LengthBand::Short));
    assert_eq!(LengthBand::of(81, 160), Some(LengthBand::Medium));
    assert_eq!(LengthBand::of(120, 160), Some(LengthBand::Medium));
    assert_eq!(LengthBand::of(121, 160), Some(LengthBand::Long));
    assert_eq!(LengthBand::of(160, 160), Some(LengthBand::Long));
    assert_eq!(LengthBand::of(161, 160), None, "Over max length is rejected");
}

#[test]
fn test_topic_classification_first_match_wins() {
    assert_eq!(Features::of("The fries were hot and fresh.").topic, Topic::Food);
    assert_eq!(Features::of("Pickup was fast.").topic, Topic::Service);
    assert_eq!(Features::of("The staff were friendly.").topic, Topic::Staff);
    assert_eq!(Features::of("The tables were wiped down.").topic, Topic::Cleanliness);
    assert_eq!(Features::of("Great value for the price.").topic, Topic::Value);
    assert_eq!(
        Features::of("The staff were friendly and the fries were hot.").topic,
        Topic::Food,
        "Food is checked before staff"
    );
    assert_eq!(Features::of("Wonderful.").topic, Topic::Other);
}

#[test]
fn test_menu_items_drop_subsumed_matches() {
    let items = menu_items_in("the spicy chicken sandwich and the cajun fries were great");
    assert_eq!(items, vec!["cajun fries".to_string(), "spicy chicken sandwich".to_string()]);
    assert_eq!(menu_items_in("the chicken was juicy"), vec!["chicken".to_string()]);
    assert!(menu_items_in("the staff were kind").is_empty());
}

#[test]
fn test_opener_and_class() {
    let loved = Features::of("Loved the fries.");
    assert_eq!(loved.opener, "loved");
    assert_eq!(loved.opener_class, OpenerClass::Verb);
    assert_eq!(Features::of("The staff were friendly.").opener_class, OpenerClass::Noun);
    assert_eq!(Features::of("Fries were hot.").opener_class, OpenerClass::Noun);
    assert_eq!(opener_class("wow"), OpenerClass::Other);
}

#[test]
fn test_connector_family_and_synonym() {
    let plus = Features::of("Plus the fries were hot.");
    assert!(plus.connector);
    assert_eq!(plus.family, "connector");
    assert_eq!(
        Features::of("Also, the music was at a nice volume.").family,
        "time-lead",
        "A leading phrase before \", the\" reads as a time lead"
    );

    let staff = Features::of("The staff were friendly.");
    assert!(!staff.connector);
    assert_eq!(staff.family, "the-x-was");
    assert_eq!(staff.synonym_key, Some("warmth"));

    assert_eq!(Features::of("Pickup was quick.").synonym_key, Some("speed"));
    assert_eq!(Features::of("Wonderful.").family, "other");
}

#[test]
fn test_clauses_split_on_stops_and_comma_joins() {
    assert_eq!(
        clauses("The line moved quickly, and the fries were hot. Great visit!"),
        vec!["the line moved quickly", "the fries were hot", "great visit"]
    );
}

// Constraints

#[test]
fn test_stem_cap_enforced() {
    let cap = stem_cap("on point").unwrap_or(0);
    assert_eq!(cap, 6);
    let mut registry = Registry::new();
    for i in 0..cap {
        assert!(registry.admit_matched(&["on point"], &[]), "Admission {i} should be under the cap");
    }
    assert!(!registry.admit_matched(&["on point"], &[]), "At the cap nothing more is admitted");
    assert_eq!(registry.stem_count("on point"), cap);
}

#[test]
fn test_pattern_cap_enforced() {
    let cap = pattern_cap("pace-shape").unwrap_or(0);
    assert_eq!(cap, 8);
    let mut registry = Registry::new();
    let text = "The counter line moved quickly.";
    for _ in 0..cap {
        assert!(registry.admit(text));
    }
    assert!(!registry.admit(text));
    assert_eq!(registry.pattern_count("pace-shape"), cap);
}

#[test]
fn test_rejected_admission_does_not_increment() {
    let mut registry = Registry::new();
    for _ in 0..6 {
        registry.admit_matched(&["on point"], &[]);
    }
    assert!(!registry.admit_matched(&["on point", "quick"], &[]));
    assert_eq!(registry.stem_count("quick"), 0, "A refused candidate touches no counter");
}

// Pairing

#[test]
fn test_sample_indices_stride_formula() {
    let picked: Vec<usize> = sample_indices(1, 10).collect();
    assert_eq!(picked, vec![7, 0, 3, 6]);
    assert_eq!(sample_indices(0, 0).count(), 0);
}

#[test]
fn test_service_only_and_locale_conflicts_skip() {
    let service = Traits::of("Pickup was fast.");
    let line = Traits::of("The counter line moved quickly.");
    assert!(!compatible(service, line), "Two service-only sentences never pair");

    let pickup = Traits::of("Curbside pickup was simple.");
    let lobby = Traits::of("The lobby felt relaxed.");
    assert!(!compatible(pickup, lobby), "Pickup-only and dine-in-only conflict");

    let food = Traits::of("The fries were hot.");
    assert!(compatible(service, food));
}

#[test]
fn test_join_modes() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(join("Fast line.", "The fries were hot.", &mut rng, 0.0), "Fast line. The fries were hot.");
    assert_eq!(join("Fast line.", "The fries were hot.", &mut rng, 1.0), "Fast line, and the fries were hot.");
    assert_eq!(
        join("Fast line.", "I loved the fries.", &mut rng, 1.0),
        "Fast line. I loved the fries.",
        "A leading I keeps the two-sentence form"
    );
    assert_eq!(join("Fast line.", "Maria at the counter was great.", &mut rng, 1.0), "Fast line. Maria at the counter was great.");
}

#[test]
fn test_combine_respects_limit_and_compatibility() {
    let mut rng = StdRng::seed_from_u64(1);
    let pickup: Vec<String> = vec!["Pickup was fast.".into()];
    let line: Vec<String> = vec!["The counter line moved quickly.".into()];
    let fries: Vec<String> = vec!["The fries were hot.".into()];
    assert!(combine(&pickup, &line, &mut rng, 0.0, usize::MAX).is_empty());
    assert_eq!(
        combine(&pickup, &fries, &mut rng, 0.0, usize::MAX),
        vec!["Pickup was fast. The fries were hot.".to_string()]
    );

    let food: Vec<String> = vec![
        "The fries were hot.".into(),
        "The nuggets were crispy.".into(),
        "The biscuits were fresh.".into(),
    ];
    let staff: Vec<String> = vec!["The staff were friendly.".into()];
    assert_eq!(combine(&food, &staff, &mut rng, 0.0, usize::MAX).len(), 3);
    assert_eq!(combine(&food, &staff, &mut rng, 0.0, 1).len(), 1);
    assert!(combine(&food, &[], &mut rng, 0.5, 10).is_empty());
}

// Selector

#[test]
fn test_band_targets_remainder_to_long() {
    assert_eq!(band_targets(720, [0.4, 0.4, 0.2]), [288, 288, 144]);
    assert_eq!(band_targets(10, [0.4, 0.4, 0.2]), [4, 4, 2]);
    assert_eq!(band_targets(7, [0.4, 0.4, 0.2]), [2, 2, 3]);
}

#[test]
fn test_ngrams_skip_stopwords() {
    assert!(ngrams("The fries were hot and fresh.").is_empty());
    let grams = ngrams("Crispy golden fries today.");
    assert!(grams.contains("crispy golden"));
    assert!(grams.contains("golden fries today"));
    assert_eq!(grams.len(), 5);
}

fn synthetic_pool() -> Vec<String> {
    let mut pool = Vec::new();
    for i in 0..30 {
        pool.push(format!("Short line number {i}."));
        pool.push(format!("A medium sentence that runs a little longer than the short band allows, number {i}."));
        pool.push(format!(
            "A long sentence that keeps going well past the medium band so it lands squarely in the long band, which tops out near here {i}."
        ));
    }
    pool
}

#[test]
fn test_select_hits_band_targets() {
    let pool = synthetic_pool();
    let mut rng = StdRng::seed_from_u64(3);
    let schedule = [NgramCaps { bigram: 1000, trigram: 1000 }];
    let selection = select(Tone::Any, &pool, 20, [0.4, 0.4, 0.2], 160, &schedule, &mut rng).unwrap();
    assert_eq!(selection.sentences.len(), 20);
    assert_eq!(selection.level, Some(0));
    let bands: Vec<LengthBand> = selection
        .sentences
        .iter()
        .map(|s| LengthBand::of(s.chars().count(), 160).unwrap())
        .collect();
    assert_eq!(bands.iter().filter(|b| **b == LengthBand::Short).count(), 8);
    assert_eq!(bands.iter().filter(|b| **b == LengthBand::Medium).count(), 8);
    assert_eq!(bands.iter().filter(|b| **b == LengthBand::Long).count(), 4);
    assert!(bands.windows(2).all(|w| w[0] <= w[1]), "Output is ordered short, medium, long");
}

#[test]
fn test_select_falls_back_to_unconstrained_fill() {
    let pool = synthetic_pool();
    let mut rng = StdRng::seed_from_u64(3);
    let schedule = [NgramCaps { bigram: 1, trigram: 1 }];
    let selection = select(Tone::Any, &pool, 30, [0.4, 0.4, 0.2], 160, &schedule, &mut rng).unwrap();
    assert_eq!(selection.level, None, "Caps of one cannot fill the target");
    assert_eq!(selection.sentences.len(), 30);
}

#[test]
fn test_select_pool_too_small_is_fatal() {
    let pool = synthetic_pool();
    let mut rng = StdRng::seed_from_u64(3);
    let schedule = [NgramCaps { bigram: 10, trigram: 10 }];
    let err = select(Tone::Night, &pool, 500, [0.4, 0.4, 0.2], 160, &schedule, &mut rng).unwrap_err();
    match err {
        KudosError::PoolTooSmall { tone, available, target } => {
            assert_eq!(tone, Tone::Night);
            assert_eq!(available, 90);
            assert_eq!(target, 500);
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[test]
fn test_select_reproducible_per_seed() {
    let pool = synthetic_pool();
    let schedule = [NgramCaps { bigram: 1000, trigram: 1000 }];
    let a = select(Tone::Any, &pool, 20, [0.4, 0.4, 0.2], 160, &schedule, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = select(Tone::Any, &pool, 20, [0.4, 0.4, 0.2], 160, &schedule, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

// Tone

#[test]
fn test_tone_for_hour() {
    assert_eq!(Tone::for_hour(5), Tone::Morning);
    assert_eq!(Tone::for_hour(10), Tone::Morning);
    assert_eq!(Tone::for_hour(11), Tone::Afternoon);
    assert_eq!(Tone::for_hour(16), Tone::Afternoon);
    assert_eq!(Tone::for_hour(17), Tone::Evening);
    assert_eq!(Tone::for_hour(20), Tone::Evening);
    assert_eq!(Tone::for_hour(21), Tone::Night);
    assert_eq!(Tone::for_hour(4), Tone::Night);
}

#[test]
fn test_tone_parse() {
    assert_eq!(Tone::parse("Morning").unwrap(), Tone::Morning);
    assert_eq!(Tone::parse(" any ").unwrap(), Tone::Any);
    assert!(matches!(Tone::parse("brunch"), Err(KudosError::UnknownTone(_))));
}

#[test]
fn test_seed_derivation() {
    let a = derive_seed("kudos-v1", Tone::Morning, 2900);
    assert_eq!(a, derive_seed("kudos-v1", Tone::Morning, 2900), "Same inputs, same seed");
    assert_ne!(a, derive_seed("kudos-v1", Tone::Evening, 2900));
    assert_ne!(a, derive_seed("kudos-v1", Tone::Morning, 2901));
    assert_ne!(a, derive_seed("kudos-v2", Tone::Morning, 2900));
}

#[test]
fn test_epoch_bucket_width() {
    let start = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
    let six_days = Utc.with_ymd_and_hms(1970, 1, 7, 23, 59, 59).unwrap();
    let seven_days = Utc.with_ymd_and_hms(1970, 1, 8, 0, 0, 0).unwrap();
    assert_eq!(epoch_bucket(start, 7), 0);
    assert_eq!(epoch_bucket(six_days, 7), 0);
    assert_eq!(epoch_bucket(seven_days, 7), 1);
    assert_eq!(epoch_bucket(seven_days, 1), 7);
}
