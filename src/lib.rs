pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod history;
pub mod personalize;
pub mod picker;
pub mod telemetry;

pub use config::KudosConfig;
pub use corpus::{Corpus, Tone};
pub use engine::Engine;
pub use error::{KudosError, StoreError};
pub use personalize::{OrderType, PersonalizeContext};
