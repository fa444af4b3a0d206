pub mod filters;
pub mod runtime;

pub use filters::{admitted, filters_for, Filter};
pub use runtime::{Pick, Picker};
