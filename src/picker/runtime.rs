use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::filters::admitted;
use crate::config::PickerConfig;
use crate::corpus::{Corpus, Features, Tone};
use crate::error::KudosError;
use crate::history::{History, HistoryStore, Retention};
use crate::telemetry::{RelaxationLevel, StoreOp, TelemetryEvent, TelemetryRecorder};

/// The chosen sentence and how hard the picker had to relax to find it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub sentence: String,
    pub tone: Tone,
    pub level: RelaxationLevel,
    pub candidates: usize,
}

/// Stateful anti-repetition picker. Owns the history store.
pub struct Picker<S: HistoryStore> {
    store: S,
    config: PickerConfig,
    retention: Retention,
}

impl<S: HistoryStore> Picker<S> {
    pub fn new(store: S, config: PickerConfig, retention: Retention) -> Self {
        Self { store, config, retention }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Loaded history. Each unreadable part starts from empty state.
    pub fn history(&self, telemetry: &mut TelemetryRecorder) -> History {
        let (history, failures) = self.store.load_lenient();
        for e in failures {
            warn!(error = %e, "history file unreadable, starting it from empty state");
            telemetry.record(TelemetryEvent::HistoryFailure { op: StoreOp::Load });
        }
        history
    }

    /// Picks with the operating system's random source.
    pub fn pick(&mut self, corpus: &Corpus, telemetry: &mut TelemetryRecorder) -> Result<Pick, KudosError> {
        self.pick_with(corpus, telemetry, &mut OsRng)
    }

    pub fn pick_with<R: Rng + ?Sized>(
        &mut self,
        corpus: &Corpus,
        telemetry: &mut TelemetryRecorder,
        rng: &mut R,
    ) -> Result<Pick, KudosError> {
        if corpus.is_empty() {
            return Err(KudosError::EmptyCorpus(corpus.tone));
        }

        // 1. Load state and derive features for the whole corpus
        let mut history = self.history(telemetry);
        let features: Vec<Features> = corpus.iter().map(Features::of).collect();
        let sentences = corpus.sentences();

        // 2. Walk the relaxation chain until some level has candidates
        let mut chosen: Option<(usize, RelaxationLevel, usize)> = None;
        for level in RelaxationLevel::ORDER {
            let candidates: Vec<usize> = match level {
                RelaxationLevel::AllFilters
                | RelaxationLevel::TopicAndItem
                | RelaxationLevel::TopicOnly
                | RelaxationLevel::NoCooldowns => (0..sentences.len())
                    .filter(|&i| !history.used.contains(&sentences[i]) && !history.is_recent(&sentences[i]))
                    .filter(|&i| admitted(level, &features[i], &history, &self.config))
                    .collect(),
                RelaxationLevel::UsedReset => {
                    if !self.config.reset_on_exhaustion {
                        continue;
                    }
                    let cleared = history.used.len();
                    history.clear_used();
                    telemetry.record(TelemetryEvent::UsedSetReset { tone: corpus.tone, cleared });
                    info!(tone = %corpus.tone, cleared, "used set exhausted, cleared");
                    (0..sentences.len()).filter(|&i| !history.is_recent(&sentences[i])).collect()
                }
                RelaxationLevel::WholeCorpus => (0..sentences.len()).collect(),
            };
            debug!(tone = %corpus.tone, level = level.as_str(), candidates = candidates.len(), "relaxation level tried");
            if let Some(&index) = candidates.choose(rng) {
                chosen = Some((index, level, candidates.len()));
                break;
            }
        }
        let (index, level, candidates) = chosen.ok_or(KudosError::EmptyCorpus(corpus.tone))?;

        // 3. Record and persist
        let sentence = sentences[index].clone();
        let picked = &features[index];
        history.record(&sentence, picked, corpus.tone, self.retention);
        if let Err(e) = self.store.save(&history) {
            warn!(error = %e, "history not saved, pick still returned");
            telemetry.record(TelemetryEvent::HistoryFailure { op: StoreOp::Save });
        }

        telemetry.record(TelemetryEvent::PickMade {
            tone: corpus.tone,
            level,
            topic: picked.topic,
            band: picked.band,
            candidates,
        });
        info!(tone = %corpus.tone, level = level.as_str(), candidates, "pick made");
        debug!(sentence = %sentence, "picked sentence");

        Ok(Pick { sentence, tone: corpus.tone, level, candidates })
    }

    /// Forgets every pick.
    pub fn reset(&mut self, telemetry: &mut TelemetryRecorder) -> Result<(), KudosError> {
        telemetry.record(TelemetryEvent::HistoryCleared);
        self.store.save(&History::default()).map_err(|e| {
            telemetry.record(TelemetryEvent::HistoryFailure { op: StoreOp::Save });
            KudosError::from(e)
        })
    }
}
