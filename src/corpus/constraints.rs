//! Phrase-stem and semantic-pattern ceilings for a single pool build.
//!
//! A candidate is admissible only if every counter it matches is strictly
//! below its cap. Admission increments all matched counters.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::banks;
use super::features::{alternation, clauses, compile, Matcher};

/// One capped counter.
#[derive(Debug)]
pub struct Limit {
    pub key: &'static str,
    pub matcher: Matcher,
    pub cap: usize,
}

const STEM_CAPS: &[(&str, usize)] = &[
    ("smooth", 24),
    ("quick", 40),
    ("fast", 36),
    ("friendly", 28),
    ("hot and fresh", 14),
    ("on point", 6),
    ("hit the spot", 6),
    ("shoutout", 20),
    ("really", 48),
    ("loved", 36),
    ("appreciated", 28),
    ("noticed", 28),
    ("glad", 20),
    ("perfect", 30),
    ("spotless", 10),
    ("welcoming", 24),
    ("super", 24),
    ("easy", 48),
    ("today", 90),
    ("great", 60),
    ("good value", 8),
    ("from start to finish", 6),
    ("kept things moving", 12),
    ("calm under pressure", 12),
    ("hassle", 8),
    ("the whole time", 30),
    ("the entire time", 30),
    ("all the way through", 30),
    ("exactly what i was hoping for", 30),
    ("which says a lot", 20),
    ("made to order", 30),
    ("every time i come in", 30),
    ("worth the trip", 24),
    ("made a difference", 24),
    ("on this visit", 24),
    ("take pride in", 24),
    ("takes pride in", 24),
    ("stopped by", 30),
    ("did not expect", 30),
    ("compared to other places", 24),
    ("have to mention", 24),
    ("small thing", 24),
    ("easy to overlook", 24),
    ("took a second", 24),
    ("even with a crowd", 24),
    ("people coming in and out", 24),
];

pub static STEMS: Lazy<Vec<Limit>> = Lazy::new(|| {
    STEM_CAPS
        .iter()
        .map(|&(key, cap)| Limit { key, matcher: Matcher::Substring(key), cap })
        .collect()
});

pub static PATTERNS: Lazy<Vec<Limit>> = Lazy::new(|| {
    let paces = alternation(banks::SERVICE_PACES);
    let traits = alternation(banks::STAFF_TRAITS);
    let starters = alternation(banks::QUICK_HIT_STARTERS);
    let targets = alternation(banks::SERVICE_TARGETS);
    let mut items = banks::HOT_ITEMS.to_vec();
    items.extend_from_slice(banks::DRINK_ITEMS);
    let items = alternation(&items);
    let mut areas = banks::SINGULAR_AREAS.to_vec();
    areas.extend_from_slice(banks::PLURAL_AREAS);
    let areas = alternation(&areas);
    let names = alternation(banks::NAMED_PEOPLE);

    let rows: Vec<(&'static str, String, usize)> = vec![
        ("pace-shape", format!(r"^the [a-z -]+ (?:{paces})$"), 8),
        ("pace-time-tail", format!(r"^the [a-z -]+ (?:{paces}) .+$"), 10),
        ("time-lead", format!(r"^[a-z ]+, the [a-z -]+ (?:{paces})$"), 12),
        ("liked-how", r"^(?:loved how|appreciated how|really liked that|noticed) the ".into(), 24),
        ("quick-hit", format!(r"^(?:{starters}) (?:{targets})(?: today)?$"), 10),
        ("staff-trait", format!(r"^the [a-z -]+ (?:was|were) (?:{traits})$"), 10),
        ("shoutout-being", r"^shoutout to the [a-z -]+ for being ".into(), 10),
        ("thanks-who", r"^(?:quick|big) thanks to the [a-z -]+ who ".into(), 12),
        ("super-trait", format!(r"^super (?:{traits}) [a-z -]+$"), 6),
        ("loved-item", r"^loved the [a-z -]+; (?:it was|they were) ".into(), 12),
        ("enjoyed-because", r"^really enjoyed the [a-z -]+ because ".into(), 12),
        ("my-item", r"^my [a-z -]+ (?:was|were) ".into(), 16),
        ("came-out", r"^the [a-z -]+ came out ".into(), 12),
        ("bare-item", format!(r"^(?:{items}) (?:was|were) "), 14),
        ("hot-item", r"^hot, ".into(), 6),
        ("area-state", r"^(?:noticed|glad) the [a-z -]+ (?:was|were) ".into(), 14),
        ("area-looked", r"^the [a-z -]+ looked ".into(), 10),
        ("clean-area", format!(r"^(?:really )?clean (?:{areas})$"), 8),
        ("named", format!(r"^(?:shoutout to|big thanks to) (?:{names})\b"), 4),
    ];
    rows.into_iter()
        .map(|(key, pattern, cap)| Limit { key, matcher: Matcher::Clause(compile(&pattern)), cap })
        .collect()
});

pub fn matched_stems(lower: &str) -> Vec<&'static str> {
    STEMS
        .iter()
        .filter(|limit| limit.matcher.matches(lower, &[]))
        .map(|limit| limit.key)
        .collect()
}

pub fn matched_patterns(clauses: &[String]) -> Vec<&'static str> {
    PATTERNS
        .iter()
        .filter(|limit| limit.matcher.matches("", clauses))
        .map(|limit| limit.key)
        .collect()
}

pub fn stem_cap(key: &str) -> Option<usize> {
    STEMS.iter().find(|limit| limit.key == key).map(|limit| limit.cap)
}

pub fn pattern_cap(key: &str) -> Option<usize> {
    PATTERNS.iter().find(|limit| limit.key == key).map(|limit| limit.cap)
}

/// Counters for one pool build.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    stems: HashMap<&'static str, usize>,
    patterns: HashMap<&'static str, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `text` if no matched counter is at its cap.
    pub fn admit(&mut self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let stems = matched_stems(&lower);
        let patterns = matched_patterns(&clauses(text));
        self.admit_matched(&stems, &patterns)
    }

    pub fn admit_matched(&mut self, stems: &[&'static str], patterns: &[&'static str]) -> bool {
        let stem_full = stems
            .iter()
            .any(|k| self.stem_count(k) >= stem_cap(k).unwrap_or(usize::MAX));
        let pattern_full = patterns
            .iter()
            .any(|k| self.pattern_count(k) >= pattern_cap(k).unwrap_or(usize::MAX));
        if stem_full || pattern_full {
            return false;
        }
        for key in stems {
            *self.stems.entry(*key).or_insert(0) += 1;
        }
        for key in patterns {
            *self.patterns.entry(*key).or_insert(0) += 1;
        }
        true
    }

    pub fn stem_count(&self, key: &str) -> usize {
        self.stems.get(key).copied().unwrap_or(0)
    }

    pub fn pattern_count(&self, key: &str) -> usize {
        self.patterns.get(key).copied().unwrap_or(0)
    }
}

/// Counts stem and pattern matches over a finished corpus.
pub fn tally<'a, I: IntoIterator<Item = &'a str>>(sentences: I) -> (HashMap<&'static str, usize>, HashMap<&'static str, usize>) {
    let mut stems = HashMap::new();
    let mut patterns = HashMap::new();
    for sentence in sentences {
        for key in matched_stems(&sentence.to_lowercase()) {
            *stems.entry(key).or_insert(0) += 1;
        }
        for key in matched_patterns(&clauses(sentence)) {
            *patterns.entry(key).or_insert(0) += 1;
        }
    }
    (stems, patterns)
}
