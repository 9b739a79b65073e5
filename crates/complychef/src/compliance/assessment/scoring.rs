use super::domain::{AnswerStatus, AssessmentAnswer, Severity, StarRating};

/// Non-compliance counts by severity for one answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeverityTally {
    pub minors: usize,
    pub majors: usize,
    pub criticals: usize,
}

/// Count severities across non-compliant answers only. Compliant and
/// not-assessed answers never contribute, and neither does a non-compliant
/// answer missing its severity (validation rejects those before scoring).
pub fn tally_non_compliance(answers: &[AssessmentAnswer]) -> SeverityTally {
    let mut tally = SeverityTally::default();
    for answer in answers {
        if answer.status != AnswerStatus::NonCompliant {
            continue;
        }
        match answer.severity {
            Some(Severity::Minor) => tally.minors += 1,
            Some(Severity::Major) => tally.majors += 1,
            Some(Severity::Critical) => tally.criticals += 1,
            None => {}
        }
    }

    tally
}

/// The fixed rating table. Rules are evaluated in order and the first match
/// wins, so a single critical caps the rating at two stars no matter how few
/// minors there are. The scale jumps from zero to two; one star does not
/// exist in the formula this mirrors.
pub fn rating_for(tally: SeverityTally) -> StarRating {
    if tally.majors >= 3 || tally.criticals >= 2 {
        StarRating::Zero
    } else if tally.criticals >= 1 || tally.majors >= 1 || tally.minors >= 6 {
        StarRating::Two
    } else if tally.minors >= 4 {
        StarRating::Three
    } else if tally.minors >= 1 {
        StarRating::Four
    } else {
        StarRating::Five
    }
}

/// Predicted star rating for an answer set, recomputed from scratch on
/// every call.
pub fn predict_rating(answers: &[AssessmentAnswer]) -> StarRating {
    rating_for(tally_non_compliance(answers))
}
