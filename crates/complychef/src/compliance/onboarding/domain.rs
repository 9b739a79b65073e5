use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a setup phase is driven on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseNavigation {
    /// Generic Back/Next buttons.
    Guided,
    /// The phase's own content advances the flow.
    SelfNavigating,
    /// Runs a one-time side effect and moves on without user input.
    Interstitial,
}

impl PhaseNavigation {
    pub const fn label(self) -> &'static str {
        match self {
            PhaseNavigation::Guided => "guided",
            PhaseNavigation::SelfNavigating => "self_navigating",
            PhaseNavigation::Interstitial => "interstitial",
        }
    }
}

/// One phase in the setup plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingPhase {
    pub key: &'static str,
    pub title: &'static str,
    pub navigation: PhaseNavigation,
    pub skippable: bool,
}

/// Completion flags for one phase. Going back never clears these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseState {
    pub completed: bool,
    #[serde(default)]
    pub skipped: bool,
}

/// Persisted onboarding position for one (organization, user).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OnboardingProgress {
    pub current_phase: usize,
    #[serde(default)]
    pub phases: BTreeMap<String, PhaseState>,
    #[serde(default)]
    pub finished: bool,
}

impl OnboardingProgress {
    pub fn phase_state(&self, key: &str) -> PhaseState {
        self.phases.get(key).copied().unwrap_or_default()
    }

    pub fn is_completed(&self, key: &str) -> bool {
        self.phase_state(key).completed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("phase '{phase}' cannot be skipped")]
    SkipNotAllowed { phase: &'static str },
    #[error("onboarding can only finish from the final phase, not '{phase}'")]
    NotAtFinalPhase { phase: &'static str },
    #[error("onboarding is already finished")]
    AlreadyFinished,
}
