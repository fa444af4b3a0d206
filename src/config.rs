use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::corpus::features::{LONG_MAX, MEDIUM_MAX};
use crate::error::KudosError;

pub const CONFIG_ENV: &str = "KUDOS_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "kudos.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KudosConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub personalize: PersonalizeConfig,
}

impl KudosConfig {
    /// Reads the file named by `KUDOS_CONFIG`, else `./kudos.toml`, else
    /// returns defaults. The loaded config is validated.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();
        if config_path.exists() {
            return Self::load_from(&config_path);
        }
        Ok(KudosConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let parsed: KudosConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML from {}", path.display()))?;
        parsed
            .validate()
            .with_context(|| format!("rejected config {}", path.display()))?;
        Ok(parsed)
    }

    pub fn validate(&self) -> std::result::Result<(), KudosError> {
        let c = &self.corpus;
        if c.target == 0 {
            return Err(KudosError::Config("corpus.target must be positive".into()));
        }
        let ratios = [c.short_ratio, c.medium_ratio, c.long_ratio];
        if ratios.iter().any(|r| !(0.0..=1.0).contains(r)) {
            return Err(KudosError::Config("band ratios must lie in [0, 1]".into()));
        }
        if (ratios.iter().sum::<f64>() - 1.0).abs() > 1e-6 {
            return Err(KudosError::Config("band ratios must sum to 1".into()));
        }
        if c.max_len <= MEDIUM_MAX || c.max_len > LONG_MAX {
            return Err(KudosError::Config(format!(
                "corpus.max_len must lie in ({MEDIUM_MAX}, {LONG_MAX}]"
            )));
        }
        if c.ngram_schedule.is_empty() {
            return Err(KudosError::Config("corpus.ngram_schedule must not be empty".into()));
        }
        if c.oversample == 0 {
            return Err(KudosError::Config("corpus.oversample must be positive".into()));
        }
        if !(0.0..=1.0).contains(&c.comma_join_probability) {
            return Err(KudosError::Config("corpus.comma_join_probability must lie in [0, 1]".into()));
        }
        let k = &self.picker;
        if k.the_opener_window > 0 && k.the_opener_limit == 0 {
            return Err(KudosError::Config(
                "picker.the_opener_limit must be positive when picker.the_opener_window is set".into(),
            ));
        }
        let p = &self.personalize;
        let probabilities = [
            p.situational_probability,
            p.time_probability,
            p.casual_casing_probability,
            p.interjection_probability,
            p.typo_probability,
        ];
        if probabilities.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(KudosError::Config("personalize probabilities must lie in [0, 1]".into()));
        }
        Ok(())
    }
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Path::new(&path).to_path_buf();
    }
    Path::new(DEFAULT_CONFIG_FILE).to_path_buf()
}

/// One rung of the n-gram ceiling schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NgramCaps {
    pub bigram: usize,
    pub trigram: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusConfig {
    #[serde(default = "default_target")]
    pub target: usize,
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    #[serde(default = "default_short_ratio")]
    pub short_ratio: f64,
    #[serde(default = "default_medium_ratio")]
    pub medium_ratio: f64,
    #[serde(default = "default_long_ratio")]
    pub long_ratio: f64,
    #[serde(default = "default_version_tag")]
    pub version_tag: String,
    #[serde(default = "default_bucket_days")]
    pub bucket_days: u32,
    #[serde(default = "default_oversample")]
    pub oversample: usize,
    #[serde(default = "default_comma_join_probability")]
    pub comma_join_probability: f64,
    #[serde(default = "default_ngram_schedule")]
    pub ngram_schedule: Vec<NgramCaps>,
}

impl CorpusConfig {
    pub fn ratios(&self) -> [f64; 3] {
        [self.short_ratio, self.medium_ratio, self.long_ratio]
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            max_len: default_max_len(),
            short_ratio: default_short_ratio(),
            medium_ratio: default_medium_ratio(),
            long_ratio: default_long_ratio(),
            version_tag: default_version_tag(),
            bucket_days: default_bucket_days(),
            oversample: default_oversample(),
            comma_join_probability: default_comma_join_probability(),
            ngram_schedule: default_ngram_schedule(),
        }
    }
}

fn default_target() -> usize {
    720
}

fn default_max_len() -> usize {
    160
}

fn default_short_ratio() -> f64 {
    0.4
}

fn default_medium_ratio() -> f64 {
    0.4
}

fn default_long_ratio() -> f64 {
    0.2
}

fn default_version_tag() -> String {
    "kudos-v1".to_string()
}

fn default_bucket_days() -> u32 {
    7
}

fn default_oversample() -> usize {
    3
}

fn default_comma_join_probability() -> f64 {
    0.2
}

fn default_ngram_schedule() -> Vec<NgramCaps> {
    [(36, 18), (54, 27), (72, 36), (108, 54), (144, 72)]
        .into_iter()
        .map(|(bigram, trigram)| NgramCaps { bigram, trigram })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickerConfig {
    #[serde(default = "default_topic_cooldown")]
    pub topic_cooldown: usize,
    #[serde(default = "default_item_cooldown")]
    pub item_cooldown: usize,
    #[serde(default = "default_opening_cooldown")]
    pub opening_cooldown: usize,
    #[serde(default = "default_opening_type_cooldown")]
    pub opening_type_cooldown: usize,
    #[serde(default = "default_length_band_streak")]
    pub length_band_streak: usize,
    #[serde(default = "default_length_band_window")]
    pub length_band_window: usize,
    #[serde(default = "default_template_family_window")]
    pub template_family_window: usize,
    #[serde(default = "default_the_opener_window")]
    pub the_opener_window: usize,
    #[serde(default = "default_the_opener_limit")]
    pub the_opener_limit: usize,
    #[serde(default = "default_reset_on_exhaustion")]
    pub reset_on_exhaustion: bool,
}

impl PickerConfig {
    /// Every cooldown and window set to zero: only the used set and recent
    /// list constrain a pick.
    pub fn without_cooldowns() -> Self {
        Self {
            topic_cooldown: 0,
            item_cooldown: 0,
            opening_cooldown: 0,
            opening_type_cooldown: 0,
            length_band_streak: 0,
            length_band_window: 0,
            template_family_window: 0,
            the_opener_window: 0,
            the_opener_limit: 0,
            reset_on_exhaustion: default_reset_on_exhaustion(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            topic_cooldown: default_topic_cooldown(),
            item_cooldown: default_item_cooldown(),
            opening_cooldown: default_opening_cooldown(),
            opening_type_cooldown: default_opening_type_cooldown(),
            length_band_streak: default_length_band_streak(),
            length_band_window: default_length_band_window(),
            template_family_window: default_template_family_window(),
            the_opener_window: default_the_opener_window(),
            the_opener_limit: default_the_opener_limit(),
            reset_on_exhaustion: default_reset_on_exhaustion(),
        }
    }
}

fn default_topic_cooldown() -> usize {
    3
}

fn default_item_cooldown() -> usize {
    5
}

fn default_opening_cooldown() -> usize {
    4
}

fn default_opening_type_cooldown() -> usize {
    2
}

fn default_length_band_streak() -> usize {
    2
}

fn default_length_band_window() -> usize {
    3
}

fn default_template_family_window() -> usize {
    3
}

fn default_the_opener_window() -> usize {
    5
}

fn default_the_opener_limit() -> usize {
    2
}

fn default_reset_on_exhaustion() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    #[serde(default = "default_history_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_stream_limit")]
    pub stream_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: default_history_dir(),
            recent_limit: default_recent_limit(),
            stream_limit: default_stream_limit(),
        }
    }
}

fn default_history_dir() -> PathBuf {
    Path::new("kudos-history").to_path_buf()
}

fn default_recent_limit() -> usize {
    200
}

fn default_stream_limit() -> usize {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalizeConfig {
    #[serde(default = "default_situational_probability")]
    pub situational_probability: f64,
    #[serde(default = "default_time_probability")]
    pub time_probability: f64,
    #[serde(default = "default_casual_casing_probability")]
    pub casual_casing_probability: f64,
    #[serde(default = "default_interjection_probability")]
    pub interjection_probability: f64,
    #[serde(default = "default_typo_probability")]
    pub typo_probability: f64,
}

impl PersonalizeConfig {
    pub fn disabled() -> Self {
        Self {
            situational_probability: 0.0,
            time_probability: 0.0,
            casual_casing_probability: 0.0,
            interjection_probability: 0.0,
            typo_probability: 0.0,
        }
    }
}

impl Default for PersonalizeConfig {
    fn default() -> Self {
        Self {
            situational_probability: default_situational_probability(),
            time_probability: default_time_probability(),
            casual_casing_probability: default_casual_casing_probability(),
            interjection_probability: default_interjection_probability(),
            typo_probability: default_typo_probability(),
        }
    }
}

fn default_situational_probability() -> f64 {
    0.15
}

fn default_time_probability() -> f64 {
    0.12
}

fn default_casual_casing_probability() -> f64 {
    0.08
}

fn default_interjection_probability() -> f64 {
    0.1
}

fn default_typo_probability() -> f64 {
    0.04
}
