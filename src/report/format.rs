//! Formatted output shared by the CLI and the TUI.

use crate::domain::{
    AGE, CLASS_ATTENDANCE, Choice, Course, ExamDifficulty, FacilityRating, Gender, InternetAccess,
    NumericDomain, SLEEP_HOURS, STUDY_HOURS, SleepQuality, StudyMethod,
};
use crate::models::PipelineArtifact;

/// Prefix of the sentence shown after a successful prediction.
pub const SUCCESS_PREFIX: &str = "Based on your profile, your predicted exam score is: ";

pub const FAILURE_MESSAGE: &str = "Prediction failed. Please check your inputs and try again.";

/// Render a score with exactly one decimal digit.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}

pub fn success_message(score: f64) -> String {
    format!("{SUCCESS_PREFIX}{}", format_score(score))
}

/// Shown when a submit fails. The cause is logged, not displayed.
pub fn failure_message() -> String {
    FAILURE_MESSAGE.to_string()
}

/// Table of every record field with its domain and display labels.
pub fn format_schema() -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<18} {:<8} {}\n", "field", "type", "domain"));

    for domain in [AGE, STUDY_HOURS, CLASS_ATTENDANCE, SLEEP_HOURS] {
        out.push_str(&numeric_row(&domain));
    }
    out.push_str(&choice_row::<Gender>());
    out.push_str(&choice_row::<Course>());
    out.push_str(&choice_row::<InternetAccess>());
    out.push_str(&choice_row::<SleepQuality>());
    out.push_str(&choice_row::<StudyMethod>());
    out.push_str(&choice_row::<FacilityRating>());
    out.push_str(&choice_row::<ExamDifficulty>());

    out
}

fn numeric_row(domain: &NumericDomain) -> String {
    let (kind, range) = if domain.integer {
        ("integer", format!("{}..={}", domain.min, domain.max))
    } else {
        (
            "float",
            format!("{:.1}..={:.1} step {}", domain.min, domain.max, domain.step),
        )
    };
    format!("{:<18} {:<8} {range} (default {})\n", domain.field, kind, domain.default)
}

fn choice_row<C: Choice>() -> String {
    let options = C::options()
        .iter()
        .map(|o| format!("{} [{}]", o.raw, o.label))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{:<18} {:<8} {options}\n", C::FIELD, "enum")
}

/// Summary of a loaded artifact.
pub fn format_artifact_summary(artifact: &PipelineArtifact) -> String {
    let mut out = String::new();

    let (format, version) = (&artifact.format, artifact.format_version);
    out.push_str(&format!("=== {format} v{version} ===\n"));
    out.push_str(&format!("Target: {}\n", artifact.target));
    out.push_str(&format!(
        "Encoded width: {} | intercept: {:.4}\n",
        artifact.encoded_width(),
        artifact.intercept
    ));

    out.push_str("\nNumeric (standardized):\n");
    for col in &artifact.numeric {
        out.push_str(&format!(
            "  {:<18} mean={:.4} scale={:.4}\n",
            col.name, col.mean, col.scale
        ));
    }

    out.push_str("\nCategorical (one-hot):\n");
    for col in &artifact.categorical {
        out.push_str(&format!(
            "  {:<18} {} ({:?} unknown)\n",
            col.name,
            col.categories.join(", "),
            col.handle_unknown
        ));
    }

    out
}
