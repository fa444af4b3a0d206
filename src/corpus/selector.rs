//! Length-balanced subset selection under n-gram ceilings.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use tracing::debug;

use super::features::{compile, LengthBand};
use super::tone::Tone;
use crate::config::NgramCaps;
use crate::error::KudosError;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "was", "were", "it", "i", "my", "of", "to", "for", "at", "in", "on",
    "with", "that", "how", "this", "me", "is", "be",
];

static WORD: Lazy<Regex> = Lazy::new(|| compile(r"[a-z][a-z'-]*"));

/// Result of a selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub sentences: Vec<String>,
    /// Index into the n-gram schedule that filled the target, `None` when the
    /// unconstrained fill was used.
    pub level: Option<usize>,
}

/// Per-band targets. Short and medium are floored and the remainder goes to
/// the long band.
pub fn band_targets(target: usize, ratios: [f64; 3]) -> [usize; 3] {
    let share = |ratio: f64| ((target as f64) * ratio + 1e-9).floor() as usize;
    let short = share(ratios[0]).min(target);
    let medium = share(ratios[1]).min(target - short);
    [short, medium, target - short - medium]
}

/// Lowercase bigrams and trigrams, each counted once, skipping any gram that
/// contains a stopword.
pub fn ngrams(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();
    let mut grams = HashSet::new();
    for n in [2usize, 3] {
        for window in words.windows(n) {
            if window.iter().any(|w| STOPWORDS.contains(w)) {
                continue;
            }
            grams.insert(window.join(" "));
        }
    }
    grams
}

/// Picks `target` sentences from `pool`, short band first, then medium, then
/// long. Each band is shuffled with `rng` before a greedy pass.
pub fn select<R: Rng + ?Sized>(
    tone: Tone,
    pool: &[String],
    target: usize,
    ratios: [f64; 3],
    max_len: usize,
    schedule: &[NgramCaps],
    rng: &mut R,
) -> Result<Selection, KudosError> {
    let targets = band_targets(target, ratios);
    let mut bands: [Vec<usize>; 3] = Default::default();
    for (index, sentence) in pool.iter().enumerate() {
        if let Some(band) = LengthBand::of(sentence.chars().count(), max_len) {
            bands[band.index()].push(index);
        }
    }
    let available: usize = bands.iter().map(Vec::len).sum();
    if available < target {
        return Err(KudosError::PoolTooSmall { tone, available, target });
    }
    let grams: Vec<HashSet<String>> = pool.iter().map(|s| ngrams(s)).collect();

    for (level, caps) in schedule.iter().enumerate() {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut chosen = Vec::with_capacity(target);
        for (band, band_target) in bands.iter().zip(targets) {
            let mut order = band.clone();
            order.shuffle(rng);
            let mut taken = 0;
            for index in order {
                if taken >= band_target {
                    break;
                }
                let sentence_grams = &grams[index];
                let over = sentence_grams.iter().any(|g| {
                    let cap = if g.matches(' ').count() == 1 { caps.bigram } else { caps.trigram };
                    counts.get(g.as_str()).copied().unwrap_or(0) >= cap
                });
                if over {
                    continue;
                }
                for g in sentence_grams {
                    *counts.entry(g.as_str()).or_insert(0) += 1;
                }
                chosen.push(index);
                taken += 1;
            }
        }
        debug!(%tone, level, bigram = caps.bigram, trigram = caps.trigram, chosen = chosen.len(), "ngram level tried");
        if chosen.len() == target {
            return Ok(Selection { sentences: chosen.into_iter().map(|i| pool[i].clone()).collect(), level: Some(level) });
        }
    }

    Ok(Selection { sentences: unconstrained_fill(pool, &bands, targets, target, rng), level: None })
}

/// Band targets first, then topped up from whatever is left.
fn unconstrained_fill<R: Rng + ?Sized>(
    pool: &[String],
    bands: &[Vec<usize>; 3],
    targets: [usize; 3],
    target: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut chosen = Vec::with_capacity(target);
    let mut leftovers = Vec::new();
    for (band, band_target) in bands.iter().zip(targets) {
        let mut order = band.clone();
        order.shuffle(rng);
        let split = band_target.min(order.len());
        chosen.extend_from_slice(&order[..split]);
        leftovers.extend_from_slice(&order[split..]);
    }
    let missing = target.saturating_sub(chosen.len());
    chosen.extend(leftovers.into_iter().take(missing));
    chosen.into_iter().map(|i| pool[i].clone()).collect()
}
