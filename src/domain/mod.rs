//! Domain types for a single prediction.
//!
//! This module defines:
//!
//! - closed-domain field enums with raw values and display labels (`types`)
//! - numeric field bounds (`AGE`, `STUDY_HOURS`, ...)
//! - the validated record handed to the pipeline (`PredictionRequest`)

pub mod request;
pub mod types;

pub use request::*;
pub use types::*;
