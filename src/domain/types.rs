//! Closed-domain field types.
//!
//! Every enum field has two parallel representations:
//!
//! - the **raw** value, exactly as the pipeline saw it at training time
//!   (lowercase, e.g. `b.tech`, `online videos`)
//! - the **label**, a cosmetic rendering for the form (e.g. `B.TECH`, `Online Videos`)
//!
//! Only raw values ever flow into a `PredictionRequest` or the pipeline.

use serde::{Deserialize, Serialize};

/// One selectable option: the stored raw value and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub raw: &'static str,
    pub label: &'static str,
}

/// A closed set of raw values with cosmetic labels.
pub trait Choice: Copy + Eq + Sized + 'static {
    /// Record key this choice is stored under.
    const FIELD: &'static str;
    /// Options in form order. The first one is the form default.
    const ALL: &'static [Self];

    fn raw(self) -> &'static str;
    fn label(self) -> &'static str;

    fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.raw() == raw)
    }

    fn options() -> Vec<ChoiceOption> {
        Self::ALL
            .iter()
            .map(|c| ChoiceOption {
                raw: c.raw(),
                label: c.label(),
            })
            .collect()
    }

    /// Comma-separated raw values, for error messages and help text.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|c| c.raw())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Choice for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Female, Gender::Male, Gender::Other];

    fn raw(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Other => "Other",
        }
    }
}

/// Degree programme. Labels are upper-cased rather than title-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "b.sc")]
    BSc,
    #[serde(rename = "diploma")]
    Diploma,
    #[serde(rename = "bca")]
    Bca,
    #[serde(rename = "b.com")]
    BCom,
    #[serde(rename = "ba")]
    Ba,
    #[serde(rename = "bba")]
    Bba,
    #[serde(rename = "b.tech")]
    BTech,
}

impl Choice for Course {
    const FIELD: &'static str = "course";
    const ALL: &'static [Self] = &[
        Course::BSc,
        Course::Diploma,
        Course::Bca,
        Course::BCom,
        Course::Ba,
        Course::Bba,
        Course::BTech,
    ];

    fn raw(self) -> &'static str {
        match self {
            Course::BSc => "b.sc",
            Course::Diploma => "diploma",
            Course::Bca => "bca",
            Course::BCom => "b.com",
            Course::Ba => "ba",
            Course::Bba => "bba",
            Course::BTech => "b.tech",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Course::BSc => "B.SC",
            Course::Diploma => "DIPLOMA",
            Course::Bca => "BCA",
            Course::BCom => "B.COM",
            Course::Ba => "BA",
            Course::Bba => "BBA",
            Course::BTech => "B.TECH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternetAccess {
    Yes,
    No,
}

impl Choice for InternetAccess {
    const FIELD: &'static str = "internet_access";
    const ALL: &'static [Self] = &[InternetAccess::Yes, InternetAccess::No];

    fn raw(self) -> &'static str {
        match self {
            InternetAccess::Yes => "yes",
            InternetAccess::No => "no",
        }
    }

    fn label(self) -> &'static str {
        match self {
            InternetAccess::Yes => "Yes",
            InternetAccess::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Average,
    Poor,
    Good,
}

impl Choice for SleepQuality {
    const FIELD: &'static str = "sleep_quality";
    const ALL: &'static [Self] = &[
        SleepQuality::Average,
        SleepQuality::Poor,
        SleepQuality::Good,
    ];

    fn raw(self) -> &'static str {
        match self {
            SleepQuality::Average => "average",
            SleepQuality::Poor => "poor",
            SleepQuality::Good => "good",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SleepQuality::Average => "Average",
            SleepQuality::Poor => "Poor",
            SleepQuality::Good => "Good",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyMethod {
    #[serde(rename = "online videos")]
    OnlineVideos,
    #[serde(rename = "self-study")]
    SelfStudy,
    #[serde(rename = "coaching")]
    Coaching,
    #[serde(rename = "group study")]
    GroupStudy,
    #[serde(rename = "mixed")]
    Mixed,
}

impl Choice for StudyMethod {
    const FIELD: &'static str = "study_method";
    const ALL: &'static [Self] = &[
        StudyMethod::OnlineVideos,
        StudyMethod::SelfStudy,
        StudyMethod::Coaching,
        StudyMethod::GroupStudy,
        StudyMethod::Mixed,
    ];

    fn raw(self) -> &'static str {
        match self {
            StudyMethod::OnlineVideos => "online videos",
            StudyMethod::SelfStudy => "self-study",
            StudyMethod::Coaching => "coaching",
            StudyMethod::GroupStudy => "group study",
            StudyMethod::Mixed => "mixed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            StudyMethod::OnlineVideos => "Online Videos",
            StudyMethod::SelfStudy => "Self-Study",
            StudyMethod::Coaching => "Coaching",
            StudyMethod::GroupStudy => "Group Study",
            StudyMethod::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityRating {
    Low,
    Medium,
    High,
}

impl Choice for FacilityRating {
    const FIELD: &'static str = "facility_rating";
    const ALL: &'static [Self] = &[
        FacilityRating::Low,
        FacilityRating::Medium,
        FacilityRating::High,
    ];

    fn raw(self) -> &'static str {
        match self {
            FacilityRating::Low => "low",
            FacilityRating::Medium => "medium",
            FacilityRating::High => "high",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FacilityRating::Low => "Low",
            FacilityRating::Medium => "Medium",
            FacilityRating::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamDifficulty {
    Easy,
    Moderate,
    Hard,
}

impl Choice for ExamDifficulty {
    const FIELD: &'static str = "exam_difficulty";
    const ALL: &'static [Self] = &[
        ExamDifficulty::Easy,
        ExamDifficulty::Moderate,
        ExamDifficulty::Hard,
    ];

    fn raw(self) -> &'static str {
        match self {
            ExamDifficulty::Easy => "easy",
            ExamDifficulty::Moderate => "moderate",
            ExamDifficulty::Hard => "hard",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExamDifficulty::Easy => "Easy",
            ExamDifficulty::Moderate => "Moderate",
            ExamDifficulty::Hard => "Hard",
        }
    }
}

/// Inclusive bounds, spinner step and form default for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDomain {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Whole numbers only (age, attendance).
    pub integer: bool,
}

impl NumericDomain {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const AGE: NumericDomain = NumericDomain {
    field: "age",
    min: 17.0,
    max: 45.0,
    step: 1.0,
    default: 22.0,
    integer: true,
};

pub const STUDY_HOURS: NumericDomain = NumericDomain {
    field: "study_hours",
    min: 0.0,
    max: 24.0,
    step: 0.5,
    default: 4.0,
    integer: false,
};

pub const CLASS_ATTENDANCE: NumericDomain = NumericDomain {
    field: "class_attendance",
    min: 25.0,
    max: 100.0,
    step: 1.0,
    default: 60.0,
    integer: true,
};

pub const SLEEP_HOURS: NumericDomain = NumericDomain {
    field: "sleep_hours",
    min: 0.0,
    max: 24.0,
    step: 0.5,
    default: 8.0,
    integer: false,
};

/// Record keys in pipeline column order.
pub const FIELD_NAMES: [&str; 11] = [
    "age",
    "gender",
    "course",
    "study_hours",
    "class_attendance",
    "internet_access",
    "sleep_hours",
    "sleep_quality",
    "study_method",
    "facility_rating",
    "exam_difficulty",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<C: Choice + std::fmt::Debug>() {
        for &choice in C::ALL {
            assert_eq!(C::from_raw(choice.raw()), Some(choice));
            assert_eq!(
                choice.raw(),
                choice.raw().to_lowercase(),
                "{choice:?} raw must be lowercase"
            );
            // Labels are for display only; they never parse back as raw values
            // unless they happen to be spelled identically.
            if choice.label() != choice.raw() {
                assert_eq!(C::from_raw(choice.label()), None);
            }
        }
    }

    #[test]
    fn every_choice_round_trips_through_raw() {
        assert_round_trip::<Gender>();
        assert_round_trip::<Course>();
        assert_round_trip::<InternetAccess>();
        assert_round_trip::<SleepQuality>();
        assert_round_trip::<StudyMethod>();
        assert_round_trip::<FacilityRating>();
        assert_round_trip::<ExamDifficulty>();
    }

    #[test]
    fn serde_uses_raw_values() {
        let json = serde_json::to_string(&StudyMethod::OnlineVideos).unwrap();
        assert_eq!(json, "\"online videos\"");
        let course: Course = serde_json::from_str("\"b.tech\"").unwrap();
        assert_eq!(course, Course::BTech);
    }

    #[test]
    fn course_labels_are_upper_case() {
        assert_eq!(Course::BSc.label(), "B.SC");
        assert_eq!(StudyMethod::SelfStudy.label(), "Self-Study");
    }

    #[test]
    fn defaults_lie_inside_domains() {
        for domain in [AGE, STUDY_HOURS, CLASS_ATTENDANCE, SLEEP_HOURS] {
            assert!(domain.contains(domain.default), "{}", domain.field);
        }
    }
}
