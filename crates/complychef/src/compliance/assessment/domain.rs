use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::identity::{OrganizationId, UserRef};

/// How badly a non-compliant finding weighs in the rating formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub const fn ordered() -> [Severity; 3] {
        [Severity::Minor, Severity::Major, Severity::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Compliant,
    NonCompliant,
    NotAssessed,
}

impl AnswerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AnswerStatus::Compliant => "compliant",
            AnswerStatus::NonCompliant => "non_compliant",
            AnswerStatus::NotAssessed => "not_assessed",
        }
    }
}

/// Predicted regulatory star rating. The scale has no one-star value; the
/// formula it mirrors jumps from zero straight to two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarRating {
    Zero,
    Two,
    Three,
    Four,
    Five,
}

impl StarRating {
    pub const fn value(self) -> u8 {
        match self {
            StarRating::Zero => 0,
            StarRating::Two => 2,
            StarRating::Three => 3,
            StarRating::Four => 4,
            StarRating::Five => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StarRating::Zero => "zero",
            StarRating::Two => "two",
            StarRating::Three => "three",
            StarRating::Four => "four",
            StarRating::Five => "five",
        }
    }
}

/// One answered checklist question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentAnswer {
    pub item_code: String,
    pub status: AnswerStatus,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub evidence_flag: Option<bool>,
}

/// Collaborator-supplied facts about the organization the validation rules
/// depend on. High-risk business categories must evidence certain findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssessmentContext {
    pub high_risk_business: bool,
}

/// One saved self-assessment. A single record exists per (organization,
/// date); resaving the same date replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub organization: OrganizationId,
    pub date: NaiveDate,
    pub answers: Vec<AssessmentAnswer>,
    pub predicted_rating: StarRating,
    pub completed_by: UserRef,
    pub saved_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn view(&self) -> AssessmentView {
        let answered = self
            .answers
            .iter()
            .filter(|answer| answer.status != AnswerStatus::NotAssessed)
            .count();
        let non_compliant = self
            .answers
            .iter()
            .filter(|answer| answer.status == AnswerStatus::NonCompliant)
            .count();

        AssessmentView {
            date: self.date,
            answered,
            non_compliant,
            predicted_rating: self.predicted_rating.value(),
            rating_label: self.predicted_rating.label(),
            answers: self.answers.clone(),
            completed_by: self.completed_by.display_name.clone(),
            saved_at: self.saved_at,
        }
    }
}

/// Serialized projection of a saved assessment for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub date: NaiveDate,
    pub answered: usize,
    pub non_compliant: usize,
    pub predicted_rating: u8,
    pub rating_label: &'static str,
    pub answers: Vec<AssessmentAnswer>,
    pub completed_by: String,
    pub saved_at: DateTime<Utc>,
}
