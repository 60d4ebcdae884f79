//! Command-line parsing for the exam score predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! form and pipeline code. Enum flags take raw values (e.g. `--course b.tech`);
//! they are checked by the same record builder the form uses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    AGE, CLASS_ATTENDANCE, Choice, Course, ExamDifficulty, FacilityRating, Gender, InternetAccess,
    RawInputs, SLEEP_HOURS, STUDY_HOURS, SleepQuality, StudyMethod,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "exam", version, about = "Student Exam Score Predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form.
    Tui(ModelArgs),
    /// Predict a single profile from flags and print the result.
    Predict(PredictArgs),
    /// List the record fields, their domains and display labels.
    Schema,
    /// Load the pipeline artifact and print a summary of it.
    Inspect(ModelArgs),
}

/// Artifact location.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Pipeline artifact (JSON). Defaults to $EXAM_MODEL_PATH, then
    /// `student_exam_predict_pipeline.json`.
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,
}

/// One profile. Defaults match the form's initial state.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Age in years (17-45).
    #[arg(long, default_value_t = AGE.default as i64)]
    pub age: i64,

    /// female, male, other.
    #[arg(long, default_value = Gender::ALL[0].raw())]
    pub gender: String,

    /// b.sc, diploma, bca, b.com, ba, bba, b.tech.
    #[arg(long, default_value = Course::ALL[0].raw())]
    pub course: String,

    /// Study hours per day (0-24).
    #[arg(long, default_value_t = STUDY_HOURS.default)]
    pub study_hours: f64,

    /// Class attendance in percent (25-100).
    #[arg(long, default_value_t = CLASS_ATTENDANCE.default as i64)]
    pub class_attendance: i64,

    /// yes, no.
    #[arg(long, default_value = InternetAccess::ALL[0].raw())]
    pub internet_access: String,

    /// Sleep hours per day (0-24).
    #[arg(long, default_value_t = SLEEP_HOURS.default)]
    pub sleep_hours: f64,

    /// average, poor, good.
    #[arg(long, default_value = SleepQuality::ALL[0].raw())]
    pub sleep_quality: String,

    /// "online videos", self-study, coaching, "group study", mixed.
    #[arg(long, default_value = StudyMethod::ALL[0].raw())]
    pub study_method: String,

    /// low, medium, high.
    #[arg(long, default_value = FacilityRating::ALL[0].raw())]
    pub facility_rating: String,

    /// easy, moderate, hard.
    #[arg(long, default_value = ExamDifficulty::ALL[0].raw())]
    pub exam_difficulty: String,

    /// Print the request and score as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            age: self.age,
            gender: self.gender.clone(),
            course: self.course.clone(),
            study_hours: self.study_hours,
            class_attendance: self.class_attendance,
            internet_access: self.internet_access.clone(),
            sleep_hours: self.sleep_hours,
            sleep_quality: self.sleep_quality.clone(),
            study_method: self.study_method.clone(),
            facility_rating: self.facility_rating.clone(),
            exam_difficulty: self.exam_difficulty.clone(),
        }
    }
}
