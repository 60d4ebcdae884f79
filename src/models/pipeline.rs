//! The persisted prediction pipeline.
//!
//! The artifact is a JSON export of a trained preprocessing + regression
//! pipeline: standardized numeric columns followed by one-hot encoded
//! categorical columns, then a linear model over the resulting design row.
//!
//! ```text
//! score = intercept + Σ coef_j · x_j
//! x     = [ (age - μ)/σ, ..., onehot(gender), onehot(course), ... ]
//! ```

use std::collections::HashSet;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::domain::{FIELD_NAMES, FeatureValue, PredictionRequest};
use crate::error::PredictionError;

/// Value of the artifact's `format` tag.
pub const ARTIFACT_FORMAT: &str = "exam-score-pipeline";

/// Artifact layout version this build understands.
pub const FORMAT_VERSION: u32 = 1;

/// Anything that maps a batch of records to one score per record.
pub trait Predictor {
    fn predict(&self, batch: &[PredictionRequest]) -> Result<Vec<f64>, PredictionError>;
}

/// On-disk representation of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub format: String,
    pub format_version: u32,
    #[serde(default = "default_target")]
    pub target: String,
    pub numeric: Vec<NumericColumn>,
    pub categorical: Vec<CategoricalColumn>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_target() -> String {
    "exam_score".to_string()
}

/// A standardized numeric input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
}

/// A one-hot encoded input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

/// What to do with a category that was not seen during training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Reject the record.
    #[default]
    Error,
    /// Encode as an all-zero block.
    Ignore,
}

impl PipelineArtifact {
    /// Width of the encoded design row.
    pub fn encoded_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Structural checks: everything that can be verified without a record.
    ///
    /// Returns a human-readable reason on failure.
    pub fn check(&self) -> Result<(), String> {
        if self.format != ARTIFACT_FORMAT {
            return Err(format!(
                "unexpected format '{}' (expected '{ARTIFACT_FORMAT}')",
                self.format
            ));
        }
        if self.format_version != FORMAT_VERSION {
            return Err(format!(
                "format version {} is not supported (expected {FORMAT_VERSION})",
                self.format_version
            ));
        }

        let width = self.encoded_width();
        if self.coefficients.len() != width {
            return Err(format!(
                "{} coefficient(s) for {width} encoded feature(s)",
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("non-finite coefficient".to_string());
        }

        for col in &self.numeric {
            if !col.mean.is_finite() || !col.scale.is_finite() || col.scale == 0.0 {
                return Err(format!("invalid scaling for '{}'", col.name));
            }
        }
        for col in &self.categorical {
            if col.categories.is_empty() {
                return Err(format!("no categories for '{}'", col.name));
            }
        }

        let mut seen = HashSet::new();
        let names = self
            .numeric
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.categorical.iter().map(|c| c.name.as_str()));
        for name in names {
            if !FIELD_NAMES.contains(&name) {
                return Err(format!("unknown feature '{name}'"));
            }
            if !seen.insert(name) {
                return Err(format!("feature '{name}' is declared twice"));
            }
        }
        if let Some(missing) = FIELD_NAMES.iter().find(|n| !seen.contains(*n)) {
            return Err(format!("feature '{missing}' is not declared"));
        }

        Ok(())
    }
}

/// Linear pipeline evaluated with `nalgebra`.
#[derive(Debug, Clone)]
pub struct LinearPipeline {
    artifact: PipelineArtifact,
    coefficients: DVector<f64>,
}

impl LinearPipeline {
    /// Build a pipeline from a checked artifact.
    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, String> {
        artifact.check()?;
        let coefficients = DVector::from_column_slice(&artifact.coefficients);
        Ok(Self {
            artifact,
            coefficients,
        })
    }

    pub fn artifact(&self) -> &PipelineArtifact {
        &self.artifact
    }

    /// Encode one record into a design row (appended to `out`).
    fn encode_into(
        &self,
        request: &PredictionRequest,
        out: &mut Vec<f64>,
    ) -> Result<(), PredictionError> {
        for col in &self.artifact.numeric {
            match request.feature(&col.name) {
                Some(FeatureValue::Number(v)) => out.push((v - col.mean) / col.scale),
                Some(FeatureValue::Category(_)) => {
                    return Err(PredictionError::WrongType {
                        feature: col.name.clone(),
                        expected: "numeric",
                    });
                }
                None => return Err(PredictionError::MissingFeature(col.name.clone())),
            }
        }

        for col in &self.artifact.categorical {
            let value = match request.feature(&col.name) {
                Some(FeatureValue::Category(v)) => v,
                Some(FeatureValue::Number(_)) => {
                    return Err(PredictionError::WrongType {
                        feature: col.name.clone(),
                        expected: "categorical",
                    });
                }
                None => return Err(PredictionError::MissingFeature(col.name.clone())),
            };

            let hit = col.categories.iter().position(|c| c == value);
            if hit.is_none() && col.handle_unknown == HandleUnknown::Error {
                return Err(PredictionError::UnknownCategory {
                    feature: col.name.clone(),
                    value: value.to_string(),
                });
            }
            let start = out.len();
            out.resize(start + col.categories.len(), 0.0);
            if let Some(i) = hit {
                out[start + i] = 1.0;
            }
        }

        Ok(())
    }
}

impl Predictor for LinearPipeline {
    fn predict(&self, batch: &[PredictionRequest]) -> Result<Vec<f64>, PredictionError> {
        if batch.is_empty() {
            return Err(PredictionError::EmptyBatch);
        }

        let width = self.coefficients.len();
        let mut flat = Vec::with_capacity(batch.len() * width);
        for request in batch {
            self.encode_into(request, &mut flat)?;
        }

        let design = DMatrix::from_row_slice(batch.len(), width, &flat);
        let scores = design * &self.coefficients;
        let intercept = self.artifact.intercept;
        if scores.iter().any(|s| !(s + intercept).is_finite()) {
            return Err(PredictionError::NonFinite);
        }

        Ok(scores.iter().map(|s| s + intercept).collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{RawInputs, build_request};

    fn numeric(name: &str, mean: f64, scale: f64) -> NumericColumn {
        NumericColumn {
            name: name.into(),
            mean,
            scale,
        }
    }

    /// Small hand-checkable artifact: only age and gender carry weight.
    pub(crate) fn sample_artifact() -> PipelineArtifact {
        let numeric = vec![
            numeric("age", 20.0, 2.0),
            numeric("study_hours", 0.0, 1.0),
            numeric("class_attendance", 0.0, 1.0),
            numeric("sleep_hours", 0.0, 1.0),
        ];
        let cat = |name: &str, cats: &[&str]| CategoricalColumn {
            name: name.into(),
            categories: cats.iter().map(|c| c.to_string()).collect(),
            handle_unknown: HandleUnknown::Error,
        };
        let courses = ["b.sc", "diploma", "bca", "b.com", "ba", "bba", "b.tech"];
        let methods = [
            "coaching",
            "group study",
            "mixed",
            "online videos",
            "self-study",
        ];
        let categorical = vec![
            cat("gender", &["female", "male", "other"]),
            cat("course", &courses),
            cat("internet_access", &["no", "yes"]),
            cat("sleep_quality", &["average", "good", "poor"]),
            cat("study_method", &methods),
            cat("facility_rating", &["high", "low", "medium"]),
            cat("exam_difficulty", &["easy", "hard", "moderate"]),
        ];

        let mut artifact = PipelineArtifact {
            format: ARTIFACT_FORMAT.into(),
            format_version: FORMAT_VERSION,
            target: "exam_score".into(),
            numeric,
            categorical,
            coefficients: Vec::new(),
            intercept: 50.0,
        };
        let mut coefficients = vec![0.0; artifact.encoded_width()];
        coefficients[0] = 4.0; // age
        coefficients[4] = -1.0; // female
        coefficients[5] = 1.0; // male
        artifact.coefficients = coefficients;
        artifact
    }

    fn request(age: i64, gender: &str) -> PredictionRequest {
        build_request(&RawInputs {
            age,
            gender: gender.into(),
            ..RawInputs::default()
        })
        .unwrap()
    }

    #[test]
    fn predicts_hand_computed_scores() {
        let pipeline = LinearPipeline::from_artifact(sample_artifact()).unwrap();
        let batch = [
            request(22, "male"),
            request(20, "female"),
            request(18, "other"),
        ];
        let scores = pipeline.predict(&batch).unwrap();
        // 50 + 4*(22-20)/2 + 1 = 55; 50 + 0 - 1 = 49; 50 + 4*(-1) = 46
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 55.0).abs() < 1e-12);
        assert!((scores[1] - 49.0).abs() < 1e-12);
        assert!((scores[2] - 46.0).abs() < 1e-12);
    }

    #[test]
    fn empty_batch_is_an_error() {
        let pipeline = LinearPipeline::from_artifact(sample_artifact()).unwrap();
        assert_eq!(pipeline.predict(&[]), Err(PredictionError::EmptyBatch));
    }

    #[test]
    fn unknown_category_respects_handle_unknown() {
        let mut artifact = sample_artifact();
        artifact.categorical[0].categories = vec!["female".into(), "male".into()];
        artifact.coefficients.remove(6);

        let pipeline = LinearPipeline::from_artifact(artifact.clone()).unwrap();
        assert_eq!(
            pipeline.predict(&[request(20, "other")]),
            Err(PredictionError::UnknownCategory {
                feature: "gender".into(),
                value: "other".into(),
            })
        );

        artifact.categorical[0].handle_unknown = HandleUnknown::Ignore;
        let pipeline = LinearPipeline::from_artifact(artifact).unwrap();
        let scores = pipeline.predict(&[request(20, "other")]).unwrap();
        assert!((scores[0] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn numeric_column_over_categorical_field_is_a_type_error() {
        let mut artifact = sample_artifact();
        let gender = artifact.categorical.remove(0);
        artifact.coefficients.drain(4..4 + gender.categories.len());
        artifact.numeric.push(numeric("gender", 0.0, 1.0));
        artifact.coefficients.insert(4, 0.0);

        let pipeline = LinearPipeline::from_artifact(artifact).unwrap();
        assert!(matches!(
            pipeline.predict(&[request(20, "male")]),
            Err(PredictionError::WrongType {
                expected: "numeric",
                ..
            })
        ));
    }

    #[test]
    fn structural_checks_reject_bad_artifacts() {
        let mut wrong_width = sample_artifact();
        wrong_width.coefficients.pop();
        assert!(wrong_width.check().unwrap_err().contains("coefficient"));

        let mut wrong_version = sample_artifact();
        wrong_version.format_version = 2;
        assert!(wrong_version.check().unwrap_err().contains("version"));

        let mut zero_scale = sample_artifact();
        zero_scale.numeric[1].scale = 0.0;
        assert!(zero_scale.check().unwrap_err().contains("study_hours"));

        let mut missing = sample_artifact();
        let dropped = missing.categorical.pop().unwrap();
        let width = missing.coefficients.len();
        missing.coefficients.truncate(width - dropped.categories.len());
        assert!(missing.check().unwrap_err().contains("exam_difficulty"));

        let mut extra = sample_artifact();
        extra.numeric.push(numeric("height", 0.0, 1.0));
        extra.coefficients.insert(4, 0.0);
        assert!(extra.check().unwrap_err().contains("height"));
    }
}
