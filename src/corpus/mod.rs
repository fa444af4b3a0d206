//! Corpus construction: phrase banks expanded into templates, paired, gated,
//! capped, and selected down to a fixed-size list per tone.

pub mod banks;
pub mod builder;
pub mod constraints;
pub mod expander;
pub mod features;
pub mod pairing;
pub mod quality;
pub mod selector;
pub mod tone;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub use builder::{build_all, build_corpus};
pub use features::{Features, LengthBand, OpenerClass, Topic};
pub use tone::{Clock, FixedClock, SystemClock, Tone};

/// Fixed-size, duplicate-free, ordered sentence list for one tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub tone: Tone,
    pub seed: u64,
    pub bucket: i64,
    sentences: Vec<String>,
}

impl Corpus {
    /// Wraps an explicit sentence list. Duplicates after the first are dropped.
    pub fn new(tone: Tone, sentences: Vec<String>) -> Self {
        Self::with_seed(tone, 0, 0, sentences)
    }

    pub fn with_seed(tone: Tone, seed: u64, bucket: i64, sentences: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let sentences = sentences.into_iter().filter(|s| seen.insert(s.clone())).collect();
        Self { tone, seed, bucket, sentences }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn contains(&self, sentence: &str) -> bool {
        self.sentences.iter().any(|s| s == sentence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(String::as_str)
    }

    /// Sentences per length band, short first.
    pub fn band_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for sentence in &self.sentences {
            let band = LengthBand::of(sentence.chars().count(), usize::MAX).unwrap_or(LengthBand::Long);
            counts[band.index()] += 1;
        }
        counts
    }

    pub fn topic_counts(&self) -> BTreeMap<Topic, usize> {
        let mut counts = BTreeMap::new();
        for sentence in &self.sentences {
            *counts.entry(Features::of(sentence).topic).or_insert(0) += 1;
        }
        counts
    }
}
