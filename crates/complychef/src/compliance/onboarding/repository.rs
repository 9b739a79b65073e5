use crate::compliance::identity::{OrganizationId, UserRef};

use super::domain::OnboardingProgress;

#[derive(Debug, thiserror::Error)]
pub enum ProgressStoreError {
    #[error("onboarding store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for setup progress, one row per (organization, user).
pub trait OnboardingStore: Send + Sync {
    fn load(
        &self,
        organization: &OrganizationId,
        user_id: &str,
    ) -> Result<Option<OnboardingProgress>, ProgressStoreError>;

    fn save(
        &self,
        organization: &OrganizationId,
        user_id: &str,
        progress: &OnboardingProgress,
    ) -> Result<(), ProgressStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("onboarding hook failed: {0}")]
    Transport(String),
}

/// Side effects the setup flow triggers: template seeding when the
/// interstitial phase runs, and the terminal completion signal.
pub trait OnboardingHooks: Send + Sync {
    fn seed_templates(&self, organization: &OrganizationId) -> Result<(), HookError>;

    fn onboarding_completed(
        &self,
        organization: &OrganizationId,
        user: &UserRef,
    ) -> Result<(), HookError>;
}
