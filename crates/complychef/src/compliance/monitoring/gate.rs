use super::domain::CheckStatus;

/// Validation errors raised while turning a submission into a stored log.
#[derive(Debug, thiserror::Error)]
pub enum LogValidationError {
    #[error("unknown check key '{key}'")]
    UnknownCheck { key: String },
    #[error("check '{key}' must name the equipment instance it was read from")]
    MissingEquipmentInstance { key: String },
    #[error("equipment instance '{id}' is not configured")]
    UnknownEquipmentInstance { id: String },
    #[error("equipment instance '{id}' is inactive")]
    InactiveEquipmentInstance { id: String },
    #[error("equipment instance '{id}' is not scheduled for the requested shift")]
    WrongShiftEquipmentInstance { id: String },
    #[error("check '{key}' expects {expected} equipment, instance '{id}' is {found}")]
    EquipmentClassMismatch {
        key: String,
        id: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("check '{key}' records a temperature reading")]
    ExpectedTemperature { key: String },
    #[error("check '{key}' records a procedural outcome")]
    ExpectedProcedural { key: String },
    #[error("receiving checks must name the goods category delivered")]
    MissingReceivingCategory,
    #[error("'{label}' is not a goods receiving category")]
    NotAReceivingCategory { label: &'static str },
    #[error("a corrective action note is required when the result is '{}'", .status.label())]
    MissingCorrectiveNote { status: CheckStatus },
}

/// Policy dial controlling when a corrective action note is mandatory.
/// Failures always require one; warnings only when the organization opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorrectiveActionPolicy {
    pub require_note_on_warning: bool,
}

/// Guard enforcing the corrective action note requirement at log time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectiveActionGate {
    policy: CorrectiveActionPolicy,
}

impl CorrectiveActionGate {
    pub fn with_policy(policy: CorrectiveActionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CorrectiveActionPolicy {
        self.policy
    }

    pub fn requires_note(&self, status: CheckStatus) -> bool {
        match status {
            CheckStatus::Fail => true,
            CheckStatus::Warning => self.policy.require_note_on_warning,
            CheckStatus::Pass => false,
        }
    }

    /// A note is accepted on any status; it is only mandatory per policy.
    /// Whitespace-only notes count as missing.
    pub fn validate(&self, status: CheckStatus, note: Option<&str>) -> Result<(), LogValidationError> {
        let present = note.map(str::trim).is_some_and(|note| !note.is_empty());
        if self.requires_note(status) && !present {
            return Err(LogValidationError::MissingCorrectiveNote { status });
        }

        Ok(())
    }
}
