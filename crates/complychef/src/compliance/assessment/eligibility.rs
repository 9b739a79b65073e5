use serde::{Deserialize, Serialize};

/// Collaborator-held facts the Green Shield award is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenShieldInputs {
    #[serde(default)]
    pub licence_number: Option<String>,
    #[serde(default)]
    pub licence_document_uploaded: bool,
    #[serde(default)]
    pub supervisor_certificates: usize,
    #[serde(default)]
    pub completed_self_assessments: usize,
}

/// Eligibility verdict plus the requirements still unmet, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreenShieldStatus {
    pub eligible: bool,
    pub missing: Vec<&'static str>,
}

/// Green Shield is a plain conjunction over the supplied facts; it carries
/// no weighting and is independent of the star-rating formula.
pub fn evaluate_green_shield(inputs: &GreenShieldInputs) -> GreenShieldStatus {
    let mut missing = Vec::new();

    let licence_present = inputs
        .licence_number
        .as_deref()
        .map(str::trim)
        .is_some_and(|number| !number.is_empty());
    if !licence_present {
        missing.push("business licence number");
    }
    if !inputs.licence_document_uploaded {
        missing.push("uploaded licence document");
    }
    if inputs.supervisor_certificates == 0 {
        missing.push("at least one supervisor certificate");
    }
    if inputs.completed_self_assessments == 0 {
        missing.push("at least one completed self-assessment");
    }

    GreenShieldStatus {
        eligible: missing.is_empty(),
        missing,
    }
}
