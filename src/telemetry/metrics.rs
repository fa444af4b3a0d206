use std::collections::{BTreeMap, VecDeque};

use super::event::{RelaxationLevel, StoreOp, TelemetryEvent};
use crate::corpus::Tone;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub corpus_stats: CorpusStats,
    pub pick_stats: PickStats,
    pub history_stats: HistoryStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusStats {
    pub built: u64,
    pub fallback_fills: u64,
    pub total_sentences: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickStats {
    pub total: u64,
    pub by_level: BTreeMap<RelaxationLevel, u64>,
    pub by_tone: BTreeMap<Tone, u64>,
    /// Share of picks that needed any relaxation.
    pub relaxed_ratio: f64,
    pub avg_candidates: f64,
    pub personalized: u64,
    pub transforms_applied: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStats {
    pub load_failures: u64,
    pub save_failures: u64,
    pub used_resets: u64,
    pub sentences_cleared: u64,
    pub explicit_clears: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    let mut relaxed = 0u64;
    let mut candidate_total = 0u64;

    for event in events {
        match event {
            TelemetryEvent::CorpusBuilt { size, level, .. } => {
                snap.corpus_stats.built += 1;
                snap.corpus_stats.total_sentences += *size as u64;
                if level.is_none() {
                    snap.corpus_stats.fallback_fills += 1;
                }
            }
            TelemetryEvent::PickMade { tone, level, candidates, .. } => {
                snap.pick_stats.total += 1;
                *snap.pick_stats.by_level.entry(*level).or_insert(0) += 1;
                *snap.pick_stats.by_tone.entry(*tone).or_insert(0) += 1;
                if *level != RelaxationLevel::AllFilters {
                    relaxed += 1;
                }
                candidate_total += *candidates as u64;
            }
            TelemetryEvent::UsedSetReset { cleared, .. } => {
                snap.history_stats.used_resets += 1;
                snap.history_stats.sentences_cleared += *cleared as u64;
            }
            TelemetryEvent::HistoryFailure { op } => match op {
                StoreOp::Load => snap.history_stats.load_failures += 1,
                StoreOp::Save => snap.history_stats.save_failures += 1,
            },
            TelemetryEvent::HistoryCleared => snap.history_stats.explicit_clears += 1,
            TelemetryEvent::Personalized { transforms } => {
                snap.pick_stats.personalized += 1;
                snap.pick_stats.transforms_applied += *transforms as u64;
            }
        }
    }

    // Averages
    if snap.pick_stats.total > 0 {
        snap.pick_stats.relaxed_ratio = relaxed as f64 / snap.pick_stats.total as f64;
        snap.pick_stats.avg_candidates = candidate_total as f64 / snap.pick_stats.total as f64;
    }

    snap
}
