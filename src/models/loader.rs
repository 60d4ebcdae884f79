//! Artifact loading.
//!
//! `load_pipeline` reads and checks the artifact. `ArtifactLoader` wraps it with
//! a write-once cell so the file is read at most once per loader; the binary
//! builds a single loader at startup and hands the resulting `Arc` to the form.
//! A file changed after the first load is not observed until restart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::error::LoadError;
use crate::models::pipeline::{LinearPipeline, PipelineArtifact};

/// Read, parse and check a pipeline artifact.
pub fn load_pipeline(path: &Path) -> Result<LinearPipeline, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let artifact: PipelineArtifact =
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    let pipeline =
        LinearPipeline::from_artifact(artifact).map_err(|reason| LoadError::Incompatible {
            path: path.to_path_buf(),
            reason,
        })?;

    tracing::info!(
        path = %path.display(),
        features = pipeline.artifact().coefficients.len(),
        "loaded prediction pipeline"
    );
    Ok(pipeline)
}

/// Loads the artifact once and hands out shared handles afterwards.
#[derive(Debug)]
pub struct ArtifactLoader {
    path: PathBuf,
    cell: OnceLock<Arc<LinearPipeline>>,
}

impl ArtifactLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the cached pipeline, loading it on first use.
    ///
    /// Failures are not cached; a failed load may be retried by the caller.
    pub fn load(&self) -> Result<Arc<LinearPipeline>, LoadError> {
        if let Some(pipeline) = self.cell.get() {
            tracing::debug!(path = %self.path.display(), "reusing cached pipeline");
            return Ok(Arc::clone(pipeline));
        }

        let pipeline = Arc::new(load_pipeline(&self.path)?);
        Ok(Arc::clone(self.cell.get_or_init(|| pipeline)))
    }
}
