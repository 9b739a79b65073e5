//! Regulatory self-assessment: the fixed checklist taxonomy, star-rating
//! prediction, and Green Shield eligibility.

pub mod checklist;
pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use checklist::{AssessmentChecklist, AssessmentItem, ItemCategory};
pub use domain::{
    AnswerStatus, AssessmentAnswer, AssessmentContext, AssessmentRecord, AssessmentView, Severity,
    StarRating,
};
pub use eligibility::{evaluate_green_shield, GreenShieldInputs, GreenShieldStatus};
pub use repository::{AssessmentStore, AssessmentStoreError};
pub use router::assessment_router;
pub use scoring::{predict_rating, rating_for, tally_non_compliance, SeverityTally};
pub use service::{AssessmentService, AssessmentServiceError, AssessmentValidationError};
