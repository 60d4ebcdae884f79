//! Prediction pipeline: artifact format, evaluation and loading.

pub mod loader;
pub mod pipeline;

pub use loader::*;
pub use pipeline::*;
