//! The prediction record and its builder.

use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AGE, CLASS_ATTENDANCE, Choice, Course, ExamDifficulty, FacilityRating, Gender, InternetAccess,
    NumericDomain, SLEEP_HOURS, STUDY_HOURS, SleepQuality, StudyMethod,
};
use crate::error::ValidationError;

/// Raw user inputs as collected by the form, before domain checks.
///
/// Enum fields hold raw values (never display labels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub age: i64,
    pub gender: String,
    pub course: String,
    pub study_hours: f64,
    pub class_attendance: i64,
    pub internet_access: String,
    pub sleep_hours: f64,
    pub sleep_quality: String,
    pub study_method: String,
    pub facility_rating: String,
    pub exam_difficulty: String,
}

impl Default for RawInputs {
    /// The form's initial state.
    fn default() -> Self {
        Self {
            age: AGE.default as i64,
            gender: Gender::ALL[0].raw().to_string(),
            course: Course::ALL[0].raw().to_string(),
            study_hours: STUDY_HOURS.default,
            class_attendance: CLASS_ATTENDANCE.default as i64,
            internet_access: InternetAccess::ALL[0].raw().to_string(),
            sleep_hours: SLEEP_HOURS.default,
            sleep_quality: SleepQuality::ALL[0].raw().to_string(),
            study_method: StudyMethod::ALL[0].raw().to_string(),
            facility_rating: FacilityRating::ALL[0].raw().to_string(),
            exam_difficulty: ExamDifficulty::ALL[0].raw().to_string(),
        }
    }
}

/// One student profile, validated against every field domain.
///
/// Serializes to a flat object with exactly the eleven record keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    age: i64,
    gender: Gender,
    course: Course,
    study_hours: f64,
    class_attendance: i64,
    internet_access: InternetAccess,
    sleep_hours: f64,
    sleep_quality: SleepQuality,
    study_method: StudyMethod,
    facility_rating: FacilityRating,
    exam_difficulty: ExamDifficulty,
}

/// A single cell of the record, as seen by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(&'static str),
}

impl PredictionRequest {
    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn course(&self) -> Course {
        self.course
    }

    pub fn study_hours(&self) -> f64 {
        self.study_hours
    }

    pub fn class_attendance(&self) -> i64 {
        self.class_attendance
    }

    pub fn internet_access(&self) -> InternetAccess {
        self.internet_access
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn sleep_quality(&self) -> SleepQuality {
        self.sleep_quality
    }

    pub fn study_method(&self) -> StudyMethod {
        self.study_method
    }

    pub fn facility_rating(&self) -> FacilityRating {
        self.facility_rating
    }

    pub fn exam_difficulty(&self) -> ExamDifficulty {
        self.exam_difficulty
    }

    /// Look up a record cell by key.
    pub fn feature(&self, name: &str) -> Option<FeatureValue> {
        let value = match name {
            "age" => FeatureValue::Number(self.age as f64),
            "gender" => FeatureValue::Category(self.gender.raw()),
            "course" => FeatureValue::Category(self.course.raw()),
            "study_hours" => FeatureValue::Number(self.study_hours),
            "class_attendance" => FeatureValue::Number(self.class_attendance as f64),
            "internet_access" => FeatureValue::Category(self.internet_access.raw()),
            "sleep_hours" => FeatureValue::Number(self.sleep_hours),
            "sleep_quality" => FeatureValue::Category(self.sleep_quality.raw()),
            "study_method" => FeatureValue::Category(self.study_method.raw()),
            "facility_rating" => FeatureValue::Category(self.facility_rating.raw()),
            "exam_difficulty" => FeatureValue::Category(self.exam_difficulty.raw()),
            _ => return None,
        };
        Some(value)
    }
}

/// Map raw inputs onto a `PredictionRequest`, field for field.
///
/// The form cannot produce out-of-domain values, but this still rejects them
/// so nothing invalid reaches the pipeline from other front-ends.
pub fn build_request(raw: &RawInputs) -> Result<PredictionRequest, ValidationError> {
    let request = PredictionRequest {
        age: check_integer(&AGE, raw.age)?,
        gender: parse_choice(&raw.gender)?,
        course: parse_choice(&raw.course)?,
        study_hours: check_number(&STUDY_HOURS, raw.study_hours)?,
        class_attendance: check_integer(&CLASS_ATTENDANCE, raw.class_attendance)?,
        internet_access: parse_choice(&raw.internet_access)?,
        sleep_hours: check_number(&SLEEP_HOURS, raw.sleep_hours)?,
        sleep_quality: parse_choice(&raw.sleep_quality)?,
        study_method: parse_choice(&raw.study_method)?,
        facility_rating: parse_choice(&raw.facility_rating)?,
        exam_difficulty: parse_choice(&raw.exam_difficulty)?,
    };
    tracing::debug!(?request, "built prediction request");
    Ok(request)
}

/// Parse a raw enum value. Display labels are rejected.
pub fn parse_choice<C: Choice>(raw: &str) -> Result<C, ValidationError> {
    C::from_raw(raw).ok_or_else(|| ValidationError::UnknownOption {
        field: C::FIELD,
        value: raw.to_string(),
        expected: C::expected(),
    })
}

fn check_integer(domain: &NumericDomain, value: i64) -> Result<i64, ValidationError> {
    check_number(domain, value as f64)?;
    Ok(value)
}

fn check_number(domain: &NumericDomain, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: domain.field,
        });
    }
    if !domain.contains(value) {
        return Err(ValidationError::OutOfRange {
            field: domain.field,
            min: domain.min,
            max: domain.max,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FIELD_NAMES;

    fn example_inputs() -> RawInputs {
        RawInputs {
            age: 22,
            gender: "male".into(),
            course: "b.tech".into(),
            study_hours: 4.0,
            class_attendance: 60,
            internet_access: "yes".into(),
            sleep_hours: 8.0,
            sleep_quality: "average".into(),
            study_method: "mixed".into(),
            facility_rating: "medium".into(),
            exam_difficulty: "moderate".into(),
        }
    }

    fn record_keys(request: &PredictionRequest) -> Vec<String> {
        let value = serde_json::to_value(request).unwrap();
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn record_has_exactly_the_eleven_keys() {
        let mut expected: Vec<String> = FIELD_NAMES.iter().map(|s| s.to_string()).collect();
        expected.sort();

        for &gender in Gender::ALL {
            for &course in Course::ALL {
                for &method in StudyMethod::ALL {
                    let raw = RawInputs {
                        gender: gender.raw().into(),
                        course: course.raw().into(),
                        study_method: method.raw().into(),
                        ..example_inputs()
                    };
                    let request = build_request(&raw).unwrap();
                    assert_eq!(record_keys(&request), expected);
                    for name in FIELD_NAMES {
                        assert!(request.feature(name).is_some(), "missing {name}");
                    }
                }
            }
        }
    }

    #[test]
    fn record_keeps_raw_values() {
        let request = build_request(&example_inputs()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["course"], "b.tech");
        assert_eq!(value["gender"], "male");
        assert_eq!(value["study_method"], "mixed");
        assert_eq!(value["age"], 22);
        assert_eq!(value["sleep_hours"], 8.0);
    }

    #[test]
    fn all_minimums_build() {
        let raw = RawInputs {
            age: 17,
            study_hours: 0.0,
            class_attendance: 25,
            sleep_hours: 0.0,
            ..example_inputs()
        };
        let request = build_request(&raw).unwrap();
        assert_eq!(request.age(), 17);
        assert_eq!(request.class_attendance(), 25);
    }

    #[test]
    fn all_maximums_build() {
        let raw = RawInputs {
            age: 45,
            study_hours: 24.0,
            class_attendance: 100,
            sleep_hours: 24.0,
            ..example_inputs()
        };
        let request = build_request(&raw).unwrap();
        assert_eq!(request.study_hours(), 24.0);
        assert_eq!(request.sleep_hours(), 24.0);
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let raw = RawInputs {
            age: 16,
            ..example_inputs()
        };
        assert!(matches!(
            build_request(&raw),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));

        let raw = RawInputs {
            class_attendance: 101,
            ..example_inputs()
        };
        assert!(matches!(
            build_request(&raw),
            Err(ValidationError::OutOfRange {
                field: "class_attendance",
                ..
            })
        ));

        let raw = RawInputs {
            sleep_hours: f64::NAN,
            ..example_inputs()
        };
        assert_eq!(
            build_request(&raw),
            Err(ValidationError::NotFinite {
                field: "sleep_hours"
            })
        );
    }

    #[test]
    fn display_labels_are_not_raw_values() {
        let raw = RawInputs {
            gender: "Male".into(),
            ..example_inputs()
        };
        let err = build_request(&raw).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownOption {
                field: "gender",
                ..
            }
        ));

        let raw = RawInputs {
            course: "B.TECH".into(),
            ..example_inputs()
        };
        assert!(build_request(&raw).is_err());
    }

    #[test]
    fn default_inputs_build() {
        let request = build_request(&RawInputs::default()).unwrap();
        assert_eq!(request.age(), 22);
        assert_eq!(request.gender(), Gender::Female);
        assert_eq!(request.course(), Course::BSc);
    }
}
