//! Pick and corpus telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside selection logic (builder, selector, or picker filters).
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain sentence text.
//! Only tones, levels, bands, counts and error kinds are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::*;
pub use metrics::*;
pub use recorder::*;
