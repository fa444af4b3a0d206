use serde::{Deserialize, Serialize};

use crate::corpus::{LengthBand, Tone, Topic};

// Allowed: tones, enums, counts
// Forbidden: sentence text, personalization output

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    CorpusBuilt {
        tone: Tone,
        size: usize,
        pool_size: usize,
        /// Index of the n-gram level that filled the corpus, `None` for the fallback fill.
        level: Option<usize>,
    },

    PickMade {
        tone: Tone,
        level: RelaxationLevel,
        topic: Topic,
        band: Option<LengthBand>,
        candidates: usize,
    },

    UsedSetReset {
        tone: Tone,
        cleared: usize,
    },

    HistoryFailure {
        op: StoreOp,
    },

    HistoryCleared,

    Personalized {
        transforms: usize,
    },
}

/// Filter level a pick was made at, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelaxationLevel {
    AllFilters,
    TopicAndItem,
    TopicOnly,
    NoCooldowns,
    UsedReset,
    WholeCorpus,
}

impl RelaxationLevel {
    pub const ORDER: [RelaxationLevel; 6] = [
        RelaxationLevel::AllFilters,
        RelaxationLevel::TopicAndItem,
        RelaxationLevel::TopicOnly,
        RelaxationLevel::NoCooldowns,
        RelaxationLevel::UsedReset,
        RelaxationLevel::WholeCorpus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelaxationLevel::AllFilters => "all-filters",
            RelaxationLevel::TopicAndItem => "topic-and-item",
            RelaxationLevel::TopicOnly => "topic-only",
            RelaxationLevel::NoCooldowns => "no-cooldowns",
            RelaxationLevel::UsedReset => "used-reset",
            RelaxationLevel::WholeCorpus => "whole-corpus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOp {
    Load,
    Save,
}
