use thiserror::Error;

use crate::corpus::Tone;

#[derive(Error, Debug)]
pub enum KudosError {
    #[error("pool for tone {tone} holds {available} admissible sentences, need {target}")]
    PoolTooSmall {
        tone: Tone,
        available: usize,
        target: usize,
    },

    #[error("corpus for tone {0} is empty")]
    EmptyCorpus(Tone),

    #[error("unknown tone: {0}")]
    UnknownTone(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// History persistence failures. The picker logs and swallows these.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("history io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("history serialization error in {path}: {reason}")]
    Serialization { path: String, reason: String },
}
