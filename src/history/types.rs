use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::corpus::{Features, LengthBand, OpenerClass, Tone, Topic};

/// Retention limits applied after every recorded pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    /// Length of the recent-sentence list.
    pub recent: usize,
    /// Length of each cooldown stream.
    pub stream: usize,
}

impl Default for Retention {
    fn default() -> Self {
        Self { recent: 200, stream: 50 }
    }
}

/// Everything the picker remembers between calls. Streams are oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub used: BTreeSet<String>,
    pub recent: VecDeque<String>,
    pub recent_topics: VecDeque<Topic>,
    /// Menu items named by each pick, one entry per pick.
    pub recent_items: VecDeque<Vec<String>>,
    pub recent_openers: VecDeque<String>,
    pub recent_opener_types: VecDeque<OpenerClass>,
    pub recent_length_bands: VecDeque<LengthBand>,
    pub recent_connectors: VecDeque<bool>,
    pub recent_template_families: VecDeque<String>,
    pub last_synonym_key: Option<String>,
    pub last_tone: Option<Tone>,
}

impl History {
    /// Pushes a pick into every store, then trims each to its retention.
    pub fn record(&mut self, sentence: &str, features: &Features, tone: Tone, retention: Retention) {
        self.used.insert(sentence.to_string());
        self.recent.push_back(sentence.to_string());
        self.recent_topics.push_back(features.topic);
        self.recent_items.push_back(features.items.clone());
        self.recent_openers.push_back(features.opener.clone());
        self.recent_opener_types.push_back(features.opener_class);
        if let Some(band) = features.band {
            self.recent_length_bands.push_back(band);
        }
        self.recent_connectors.push_back(features.connector);
        self.recent_template_families.push_back(features.family.to_string());
        self.last_synonym_key = features.synonym_key.map(str::to_string);
        self.last_tone = Some(tone);
        self.trim(retention);
    }

    pub fn trim(&mut self, retention: Retention) {
        trim_front(&mut self.recent, retention.recent);
        trim_front(&mut self.recent_topics, retention.stream);
        trim_front(&mut self.recent_items, retention.stream);
        trim_front(&mut self.recent_openers, retention.stream);
        trim_front(&mut self.recent_opener_types, retention.stream);
        trim_front(&mut self.recent_length_bands, retention.stream);
        trim_front(&mut self.recent_connectors, retention.stream);
        trim_front(&mut self.recent_template_families, retention.stream);
    }

    /// Exhaustion reset: forget which sentences were used, keep the cooldowns.
    pub fn clear_used(&mut self) {
        self.used.clear();
    }

    pub fn is_recent(&self, sentence: &str) -> bool {
        self.recent.iter().any(|s| s == sentence)
    }
}

fn trim_front<T>(stream: &mut VecDeque<T>, limit: usize) {
    while stream.len() > limit {
        stream.pop_front();
    }
}

/// The last `n` entries of a stream, newest last.
pub fn tail<T>(stream: &VecDeque<T>, n: usize) -> impl Iterator<Item = &T> {
    stream.iter().skip(stream.len().saturating_sub(n))
}
