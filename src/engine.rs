use std::collections::BTreeMap;

use tracing::info;

use crate::config::KudosConfig;
use crate::corpus::builder::build_corpus_with_stats;
use crate::corpus::tone::epoch_bucket;
use crate::corpus::{Clock, Corpus, SystemClock, Tone};
use crate::error::KudosError;
use crate::history::{FileHistoryStore, HistoryStore, Retention};
use crate::personalize::{PersonalizeContext, Personalizer};
use crate::picker::{Pick, Picker};
use crate::telemetry::{TelemetryEvent, TelemetryRecorder};

/// Built corpora, the picker with its history store, and the personalizer.
pub struct Engine<S: HistoryStore> {
    corpora: BTreeMap<Tone, Corpus>,
    picker: Picker<S>,
    personalizer: Personalizer,
    clock: Box<dyn Clock>,
    telemetry: TelemetryRecorder,
}

impl Engine<FileHistoryStore> {
    /// Engine over the configured history directory and the system clock.
    pub fn from_config(config: &KudosConfig) -> Result<Self, KudosError> {
        Self::from_config_for(config, &Tone::ALL)
    }

    /// Like `from_config`, building only the given tones.
    pub fn from_config_for(config: &KudosConfig, tones: &[Tone]) -> Result<Self, KudosError> {
        let store = FileHistoryStore::new(config.history.dir.clone());
        Self::build_for(config, store, Box::new(SystemClock), tones)
    }
}

impl<S: HistoryStore> Engine<S> {
    /// Builds every tone's corpus up front. Fails if any pool is too small.
    pub fn build(config: &KudosConfig, store: S, clock: Box<dyn Clock>) -> Result<Self, KudosError> {
        Self::build_for(config, store, clock, &Tone::ALL)
    }

    /// Builds the listed tones only. Picking any other tone is `EmptyCorpus`.
    pub fn build_for(
        config: &KudosConfig,
        store: S,
        clock: Box<dyn Clock>,
        tones: &[Tone],
    ) -> Result<Self, KudosError> {
        config.validate()?;
        let mut telemetry = TelemetryRecorder::new();
        let bucket = epoch_bucket(clock.now(), config.corpus.bucket_days);

        let mut corpora = BTreeMap::new();
        for &tone in tones {
            let (corpus, stats) = build_corpus_with_stats(tone, &config.corpus, bucket)?;
            telemetry.record(TelemetryEvent::CorpusBuilt {
                tone,
                size: corpus.len(),
                pool_size: stats.pool_bands.iter().sum(),
                level: stats.level,
            });
            corpora.insert(tone, corpus);
        }
        info!(bucket, tones = corpora.len(), "engine ready");

        Ok(Self::with_corpora(corpora, config, store, clock, telemetry))
    }

    /// Engine over prebuilt corpora.
    pub fn with_corpora(
        corpora: BTreeMap<Tone, Corpus>,
        config: &KudosConfig,
        store: S,
        clock: Box<dyn Clock>,
        telemetry: TelemetryRecorder,
    ) -> Self {
        let retention = Retention {
            recent: config.history.recent_limit,
            stream: config.history.stream_limit,
        };
        Self {
            corpora,
            picker: Picker::new(store, config.picker.clone(), retention),
            personalizer: Personalizer::new(config.personalize.clone()),
            clock,
            telemetry,
        }
    }

    pub fn get_corpus(&self, tone: Tone) -> Result<&Corpus, KudosError> {
        self.corpora.get(&tone).ok_or(KudosError::EmptyCorpus(tone))
    }

    pub fn corpora(&self) -> &BTreeMap<Tone, Corpus> {
        &self.corpora
    }

    /// Picks from the tone's corpus and updates history.
    pub fn pick(&mut self, tone: Tone) -> Result<Pick, KudosError> {
        let corpus = self.corpora.get(&tone).ok_or(KudosError::EmptyCorpus(tone))?;
        self.picker.pick(corpus, &mut self.telemetry)
    }

    /// Picks from the corpus matching the clock's hour of day.
    pub fn pick_for_now(&mut self) -> Result<Pick, KudosError> {
        let tone = Tone::for_hour(self.clock.local_hour());
        self.pick(tone)
    }

    pub fn personalize(&mut self, sentence: &str, context: &PersonalizeContext) -> String {
        let personalized = self
            .personalizer
            .personalize_with(sentence, context, &mut rand::thread_rng());
        self.telemetry.record(TelemetryEvent::Personalized {
            transforms: personalized.applied.len(),
        });
        personalized.text
    }

    /// Clears every history store.
    pub fn reset_history(&mut self) -> Result<(), KudosError> {
        self.picker.reset(&mut self.telemetry)
    }

    pub fn picker(&self) -> &Picker<S> {
        &self.picker
    }

    pub fn telemetry(&self) -> &TelemetryRecorder {
        &self.telemetry
    }
}
