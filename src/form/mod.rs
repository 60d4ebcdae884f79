//! Form model: fields, widgets and the submit action.
//!
//! The form is front-end agnostic: the TUI renders it and forwards key presses,
//! tests drive it directly. Widgets keep enum options as `(raw, label)` pairs and
//! only ever report the raw value back.

use crate::domain::{
    AGE, CLASS_ATTENDANCE, Choice, ChoiceOption, Course, ExamDifficulty, FacilityRating, Gender,
    InternetAccess, NumericDomain, PredictionRequest, RawInputs, SLEEP_HOURS, STUDY_HOURS,
    SleepQuality, StudyMethod, build_request,
};
use crate::error::{AppError, PredictionError, ValidationError};
use crate::models::Predictor;
use crate::report::{failure_message, success_message};

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Personal,
    Lifestyle,
    Academic,
    Environment,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Personal => "Personal Details",
            Section::Lifestyle => "Lifestyle",
            Section::Academic => "Academic Habits",
            Section::Environment => "Environment",
        }
    }
}

/// The eleven form fields, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Gender,
    Course,
    SleepHours,
    SleepQuality,
    StudyHours,
    ClassAttendance,
    StudyMethod,
    InternetAccess,
    FacilityRating,
    ExamDifficulty,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::Gender,
        Field::Course,
        Field::SleepHours,
        Field::SleepQuality,
        Field::StudyHours,
        Field::ClassAttendance,
        Field::StudyMethod,
        Field::InternetAccess,
        Field::FacilityRating,
        Field::ExamDifficulty,
    ];

    /// Record key.
    pub fn name(self) -> &'static str {
        match self {
            Field::Age => AGE.field,
            Field::Gender => Gender::FIELD,
            Field::Course => Course::FIELD,
            Field::SleepHours => SLEEP_HOURS.field,
            Field::SleepQuality => SleepQuality::FIELD,
            Field::StudyHours => STUDY_HOURS.field,
            Field::ClassAttendance => CLASS_ATTENDANCE.field,
            Field::StudyMethod => StudyMethod::FIELD,
            Field::InternetAccess => InternetAccess::FIELD,
            Field::FacilityRating => FacilityRating::FIELD,
            Field::ExamDifficulty => ExamDifficulty::FIELD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Course => "Course",
            Field::SleepHours => "Sleep Hours (per day)",
            Field::SleepQuality => "Sleep Quality",
            Field::StudyHours => "Study Hours (per day)",
            Field::ClassAttendance => "Class Attendance (%)",
            Field::StudyMethod => "Study Method",
            Field::InternetAccess => "Internet Access",
            Field::FacilityRating => "Facility Rating",
            Field::ExamDifficulty => "Exam Difficulty",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Field::Age | Field::Gender | Field::Course => Section::Personal,
            Field::SleepHours | Field::SleepQuality => Section::Lifestyle,
            Field::StudyHours | Field::ClassAttendance | Field::StudyMethod => Section::Academic,
            Field::InternetAccess | Field::FacilityRating | Field::ExamDifficulty => {
                Section::Environment
            }
        }
    }

    fn widget(self) -> Widget {
        match self {
            Field::Age => Widget::Spinner(Spinner::new(AGE)),
            Field::Gender => Widget::Select(Select::of::<Gender>()),
            Field::Course => Widget::Select(Select::of::<Course>()),
            Field::SleepHours => Widget::Spinner(Spinner::new(SLEEP_HOURS)),
            Field::SleepQuality => Widget::Select(Select::of::<SleepQuality>()),
            Field::StudyHours => Widget::Spinner(Spinner::new(STUDY_HOURS)),
            Field::ClassAttendance => Widget::Spinner(Spinner::new(CLASS_ATTENDANCE)),
            Field::StudyMethod => Widget::Select(Select::of::<StudyMethod>()),
            Field::InternetAccess => Widget::Select(Select::of::<InternetAccess>()),
            Field::FacilityRating => Widget::Select(Select::of::<FacilityRating>()),
            Field::ExamDifficulty => Widget::Select(Select::of::<ExamDifficulty>()),
        }
    }
}

/// Bounded numeric input. Arrow steps stop at the bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    domain: NumericDomain,
    value: f64,
}

impl Spinner {
    pub fn new(domain: NumericDomain) -> Self {
        Self {
            domain,
            value: domain.default,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn domain(&self) -> &NumericDomain {
        &self.domain
    }

    /// Move by `steps` increments, stopping at the bounds.
    pub fn step_by(&mut self, steps: i32) {
        let next = self.value + f64::from(steps) * self.domain.step;
        self.value = next.clamp(self.domain.min, self.domain.max);
    }

    /// Set a typed value. Out-of-domain values are refused and leave the
    /// spinner unchanged.
    pub fn set(&mut self, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: self.domain.field,
            });
        }
        let value = if self.domain.integer {
            value.round()
        } else {
            value
        };
        if !self.domain.contains(value) {
            return Err(ValidationError::OutOfRange {
                field: self.domain.field,
                min: self.domain.min,
                max: self.domain.max,
                value,
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn display(&self) -> String {
        if self.domain.integer {
            format!("{}", self.value as i64)
        } else {
            format!("{:.2}", self.value)
        }
    }
}

/// Single-choice selector over `(raw, label)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    options: Vec<ChoiceOption>,
    selected: usize,
}

impl Select {
    pub fn of<C: Choice>() -> Self {
        Self {
            options: C::options(),
            selected: 0,
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Stored value handed to the record builder.
    pub fn raw(&self) -> &'static str {
        self.options[self.selected].raw
    }

    /// Cosmetic rendering of the current option.
    pub fn label(&self) -> &'static str {
        self.options[self.selected].label
    }

    /// Cycle through the options, wrapping at both ends.
    pub fn cycle(&mut self, delta: i32) {
        let n = self.options.len() as i64;
        let next = (self.selected as i64 + i64::from(delta)).rem_euclid(n);
        self.selected = next as usize;
    }

    /// Select the option shown as `label`. Returns `false` if no option has it.
    pub fn select_label(&mut self, label: &str) -> bool {
        match self.options.iter().position(|o| o.label == label) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Select the option stored as `raw`. Returns `false` if no option has it.
    pub fn select_raw(&mut self, raw: &str) -> bool {
        match self.options.iter().position(|o| o.raw == raw) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Spinner(Spinner),
    Select(Select),
}

impl Widget {
    pub fn display(&self) -> String {
        match self {
            Widget::Spinner(s) => s.display(),
            Widget::Select(s) => s.label().to_string(),
        }
    }

    /// Left/right adjustment: one step for spinners, one option for selectors.
    pub fn adjust(&mut self, delta: i32) {
        match self {
            Widget::Spinner(s) => s.step_by(delta),
            Widget::Select(s) => s.cycle(delta),
        }
    }
}

/// A successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub request: PredictionRequest,
    pub score: f64,
}

impl Prediction {
    pub fn message(&self) -> String {
        success_message(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(e) => e.into(),
            SubmitError::Prediction(e) => e.into(),
        }
    }
}

/// Run one record through the pipeline as a single-row batch.
pub fn predict_one(
    predictor: &dyn Predictor,
    request: PredictionRequest,
) -> Result<Prediction, PredictionError> {
    let scores = predictor.predict(std::slice::from_ref(&request))?;
    let score = match scores.as_slice() {
        [score] => *score,
        other => {
            return Err(PredictionError::ResultCount {
                expected: 1,
                got: other.len(),
            });
        }
    };
    if !score.is_finite() {
        return Err(PredictionError::NonFinite);
    }
    Ok(Prediction { request, score })
}

/// Validate raw inputs and predict them as a single-row batch.
///
/// Shared by the form's submit action and the `predict` command.
pub fn run_prediction(
    predictor: &dyn Predictor,
    raw: &RawInputs,
) -> Result<Prediction, SubmitError> {
    let request = build_request(raw)?;
    Ok(predict_one(predictor, request)?)
}

/// State of the whole form: one widget per field plus the last outcome.
#[derive(Debug, Clone)]
pub struct FormState {
    widgets: Vec<(Field, Widget)>,
    outcome: Option<Result<Prediction, SubmitError>>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            widgets: Field::ALL.iter().map(|&f| (f, f.widget())).collect(),
            outcome: None,
        }
    }

    pub fn widget(&self, field: Field) -> &Widget {
        &self.widgets[Self::index(field)].1
    }

    pub fn widget_mut(&mut self, field: Field) -> &mut Widget {
        &mut self.widgets[Self::index(field)].1
    }

    fn index(field: Field) -> usize {
        Field::ALL
            .iter()
            .position(|&f| f == field)
            .unwrap_or_default()
    }

    /// Select an enum option by its display label, as a user would.
    pub fn choose_label(&mut self, field: Field, label: &str) -> bool {
        match self.widget_mut(field) {
            Widget::Select(select) => select.select_label(label),
            Widget::Spinner(_) => false,
        }
    }

    /// Set a numeric field. Out-of-domain values and selector fields are refused.
    pub fn set_number(&mut self, field: Field, value: f64) -> Result<(), ValidationError> {
        match self.widget_mut(field) {
            Widget::Spinner(spinner) => spinner.set(value),
            Widget::Select(_) => Err(ValidationError::NotNumeric {
                field: field.name(),
            }),
        }
    }

    /// Load raw inputs into the widgets (used by tests and the CLI prefill).
    pub fn fill(&mut self, raw: &RawInputs) -> Result<(), ValidationError> {
        self.set_number(Field::Age, raw.age as f64)?;
        self.set_number(Field::StudyHours, raw.study_hours)?;
        self.set_number(Field::ClassAttendance, raw.class_attendance as f64)?;
        self.set_number(Field::SleepHours, raw.sleep_hours)?;
        self.fill_choice::<Gender>(Field::Gender, &raw.gender)?;
        self.fill_choice::<Course>(Field::Course, &raw.course)?;
        self.fill_choice::<InternetAccess>(Field::InternetAccess, &raw.internet_access)?;
        self.fill_choice::<SleepQuality>(Field::SleepQuality, &raw.sleep_quality)?;
        self.fill_choice::<StudyMethod>(Field::StudyMethod, &raw.study_method)?;
        self.fill_choice::<FacilityRating>(Field::FacilityRating, &raw.facility_rating)?;
        self.fill_choice::<ExamDifficulty>(Field::ExamDifficulty, &raw.exam_difficulty)?;
        Ok(())
    }

    fn fill_choice<C: Choice>(&mut self, field: Field, raw: &str) -> Result<(), ValidationError> {
        let found = match self.widget_mut(field) {
            Widget::Select(select) => select.select_raw(raw),
            Widget::Spinner(_) => false,
        };
        if found {
            Ok(())
        } else {
            Err(ValidationError::UnknownOption {
                field: C::FIELD,
                value: raw.to_string(),
                expected: C::expected(),
            })
        }
    }

    fn number(&self, field: Field) -> f64 {
        match self.widget(field) {
            Widget::Spinner(s) => s.value(),
            Widget::Select(_) => f64::NAN,
        }
    }

    fn raw_choice(&self, field: Field) -> String {
        match self.widget(field) {
            Widget::Select(s) => s.raw().to_string(),
            Widget::Spinner(s) => s.display(),
        }
    }

    /// Read every widget's stored value.
    pub fn collect_fields(&self) -> RawInputs {
        RawInputs {
            age: self.number(Field::Age) as i64,
            gender: self.raw_choice(Field::Gender),
            course: self.raw_choice(Field::Course),
            study_hours: self.number(Field::StudyHours),
            class_attendance: self.number(Field::ClassAttendance) as i64,
            internet_access: self.raw_choice(Field::InternetAccess),
            sleep_hours: self.number(Field::SleepHours),
            sleep_quality: self.raw_choice(Field::SleepQuality),
            study_method: self.raw_choice(Field::StudyMethod),
            facility_rating: self.raw_choice(Field::FacilityRating),
            exam_difficulty: self.raw_choice(Field::ExamDifficulty),
        }
    }

    /// Build one record from the current widgets and predict it.
    ///
    /// The outcome replaces whatever the previous submit displayed.
    pub fn on_submit(&mut self, predictor: &dyn Predictor) -> &Result<Prediction, SubmitError> {
        let outcome = run_prediction(predictor, &self.collect_fields());

        match &outcome {
            Ok(prediction) => tracing::info!(score = prediction.score, "prediction succeeded"),
            Err(err) => tracing::warn!(error = %err, "prediction failed"),
        }

        self.outcome.insert(outcome)
    }

    pub fn outcome(&self) -> Option<&Result<Prediction, SubmitError>> {
        self.outcome.as_ref()
    }

    /// Sentence to show for the last submit, if any.
    ///
    /// Failures get a generic sentence; the detail goes to the log.
    pub fn result_message(&self) -> Option<String> {
        self.outcome.as_ref().map(|outcome| match outcome {
            Ok(prediction) => prediction.message(),
            Err(_) => failure_message(),
        })
    }
}
