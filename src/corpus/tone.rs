//! Tone registers, the clock seam, and per-tone seed derivation.

use std::fmt;

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::KudosError;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Morning,
    Afternoon,
    Evening,
    Night,
    Any,
}

impl Tone {
    pub const ALL: [Tone; 5] = [Tone::Morning, Tone::Afternoon, Tone::Evening, Tone::Night, Tone::Any];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Morning => "morning",
            Tone::Afternoon => "afternoon",
            Tone::Evening => "evening",
            Tone::Night => "night",
            Tone::Any => "any",
        }
    }

    pub fn parse(label: &str) -> Result<Self, KudosError> {
        let wanted = label.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == wanted)
            .ok_or_else(|| KudosError::UnknownTone(label.to_string()))
    }

    /// Register for a local hour of day: 05-10 morning, 11-16 afternoon,
    /// 17-20 evening, anything else night.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=10 => Tone::Morning,
            11..=16 => Tone::Afternoon,
            17..=20 => Tone::Evening,
            _ => Tone::Night,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn local_hour(&self) -> u32 {
        self.now().with_timezone(&Local).hour()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant. Its hour of day is read in UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn local_hour(&self) -> u32 {
        self.0.hour()
    }
}

/// Index of the epoch bucket holding `now`.
pub fn epoch_bucket(now: DateTime<Utc>, width_days: u32) -> i64 {
    let width = SECONDS_PER_DAY * i64::from(width_days.max(1));
    now.timestamp().div_euclid(width)
}

/// Seed for one tone's corpus: the first eight bytes of
/// `sha256("{version}|{tone}|{bucket}")`, big endian.
pub fn derive_seed(version: &str, tone: Tone, bucket: i64) -> u64 {
    let digest = Sha256::digest(format!("{version}|{tone}|{bucket}").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
