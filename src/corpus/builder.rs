//! Pool building and per-tone corpus assembly.
//!
//! The pool is filled one length band at a time, long first, so the scarce
//! long candidates get first claim on stem and pattern budgets. Within a band
//! pass, singles are offered by per-source quota and then every pairing in
//! order, until the band's quota (band target x oversample) is full.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::constraints::Registry;
use super::expander::{Expansions, Source};
use super::features::LengthBand;
use super::pairing::{combine, PAIRINGS};
use super::quality;
use super::selector::{band_targets, select};
use super::tone::{derive_seed, epoch_bucket, Clock, Tone};
use super::Corpus;
use crate::config::CorpusConfig;
use crate::error::KudosError;

/// Most singles each source may contribute to the pool.
const SINGLES: &[(Source, usize)] = &[
    (Source::Service, 60),
    (Source::Staff, 60),
    (Source::Food, 80),
    (Source::Cleanliness, 40),
    (Source::Accuracy, 40),
    (Source::Atmosphere, 25),
    (Source::Value, 21),
    (Source::Pickup, 22),
    (Source::Short, 45),
    (Source::Flourish, 6),
    (Source::Brand, 6),
    (Source::Named, 4),
];

const BAND_PRIORITY: [LengthBand; 3] = [LengthBand::Long, LengthBand::Medium, LengthBand::Short];

/// Admitted candidates before selection.
#[derive(Debug, Default)]
pub struct Pool {
    pub sentences: Vec<String>,
    pub band_counts: [usize; 3],
    pub rejected: usize,
    pub capped: usize,
    registry: Registry,
    seen: HashSet<String>,
}

impl Pool {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn offer(&mut self, raw: &str, want: LengthBand, quota: usize, max_len: usize) -> bool {
        let slot = want.index();
        if self.band_counts[slot] >= quota || LengthBand::of(raw.chars().count(), max_len) != Some(want) {
            return false;
        }
        let text = match quality::gate(raw) {
            Ok(text) => text,
            Err(_) => {
                self.rejected += 1;
                return false;
            }
        };
        if LengthBand::of(text.chars().count(), max_len) != Some(want) || self.seen.contains(&text) {
            return false;
        }
        if !self.registry.admit(&text) {
            self.capped += 1;
            return false;
        }
        self.seen.insert(text.clone());
        self.sentences.push(text);
        self.band_counts[slot] += 1;
        true
    }
}

/// Diagnostics from one corpus build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub pool_bands: [usize; 3],
    pub level: Option<usize>,
}

pub fn build_pool<R: Rng + ?Sized>(tone: Tone, config: &CorpusConfig, rng: &mut R) -> Pool {
    // 1. Expand and shuffle every source list
    let mut expansions = Expansions::for_tone(tone);
    expansions.shuffle(rng);

    // 2. Join every sampled pairing once so each band pass sees the same candidates
    let mut pairs: Vec<String> = Vec::new();
    for &(first, second) in PAIRINGS {
        let joined = combine(
            expansions.get(first),
            expansions.get(second),
            rng,
            config.comma_join_probability,
            usize::MAX,
        );
        pairs.extend(joined.into_iter().filter(|s| s.chars().count() <= config.max_len));
    }

    // 3. Fill band by band
    let targets = band_targets(config.target, config.ratios());
    let mut pool = Pool::default();
    let mut singles_taken = [0usize; SINGLES.len()];
    for want in BAND_PRIORITY {
        let quota = targets[want.index()] * config.oversample;
        for (slot, &(source, limit)) in SINGLES.iter().enumerate() {
            for sentence in expansions.get(source) {
                if singles_taken[slot] >= limit {
                    break;
                }
                if pool.offer(sentence, want, quota, config.max_len) {
                    singles_taken[slot] += 1;
                }
            }
        }
        for pair in &pairs {
            if pool.band_counts[want.index()] >= quota {
                break;
            }
            pool.offer(pair, want, quota, config.max_len);
        }
        debug!(%tone, band = want.as_str(), admitted = pool.band_counts[want.index()], quota, "pool band filled");
    }
    debug!(%tone, pairs = pairs.len(), rejected = pool.rejected, capped = pool.capped, "pool built");
    pool
}

/// Builds one tone's corpus for an epoch bucket. Same inputs, same corpus.
pub fn build_corpus(tone: Tone, config: &CorpusConfig, bucket: i64) -> Result<Corpus, KudosError> {
    build_corpus_with_stats(tone, config, bucket).map(|(corpus, _)| corpus)
}

pub fn build_corpus_with_stats(
    tone: Tone,
    config: &CorpusConfig,
    bucket: i64,
) -> Result<(Corpus, BuildStats), KudosError> {
    let seed = derive_seed(&config.version_tag, tone, bucket);
    let mut rng = StdRng::seed_from_u64(seed);

    let pool = build_pool(tone, config, &mut rng);
    let selection = select(
        tone,
        &pool.sentences,
        config.target,
        config.ratios(),
        config.max_len,
        &config.ngram_schedule,
        &mut rng,
    )?;

    let corpus = Corpus::with_seed(tone, seed, bucket, selection.sentences);
    info!(%tone, bucket, size = corpus.len(), level = ?selection.level, "corpus built");
    Ok((corpus, BuildStats { pool_bands: pool.band_counts, level: selection.level }))
}

/// Builds all five corpora for the bucket containing the clock's current time.
pub fn build_all(config: &CorpusConfig, clock: &dyn Clock) -> Result<BTreeMap<Tone, Corpus>, KudosError> {
    let bucket = epoch_bucket(clock.now(), config.bucket_days);
    Tone::ALL
        .into_iter()
        .map(|tone| build_corpus(tone, config, bucket).map(|corpus| (tone, corpus)))
        .collect()
}
