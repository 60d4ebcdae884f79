//! Shared startup workflow used by both CLI and TUI front-ends.
//!
//! The pipeline is loaded exactly once here and passed on explicitly; nothing
//! downstream reaches for global state.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{ArtifactLoader, LinearPipeline};

/// Process-lifetime state: configuration plus the loaded pipeline.
#[derive(Debug)]
pub struct Session {
    pub config: AppConfig,
    pipeline: Arc<LinearPipeline>,
}

impl Session {
    /// Load the artifact named by `config`. Fails fast if it cannot be loaded.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        let loader = ArtifactLoader::new(config.model_path.clone());
        let pipeline = loader.load()?;
        Ok(Self { config, pipeline })
    }

    /// Shared handle to the pipeline loaded at startup.
    pub fn pipeline(&self) -> Arc<LinearPipeline> {
        Arc::clone(&self.pipeline)
    }
}
