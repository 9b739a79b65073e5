use super::domain::{OnboardingPhase, PhaseNavigation};

/// The fixed setup plan new organizations walk through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingPlan {
    phases: Vec<OnboardingPhase>,
}

impl OnboardingPlan {
    pub fn standard() -> Self {
        use PhaseNavigation::*;

        Self {
            phases: vec![
                OnboardingPhase {
                    key: "welcome",
                    title: "Welcome",
                    navigation: Guided,
                    skippable: false,
                },
                OnboardingPhase {
                    key: "business_profile",
                    title: "Business profile",
                    navigation: Guided,
                    skippable: false,
                },
                OnboardingPhase {
                    key: "team_invites",
                    title: "Invite your team",
                    navigation: Guided,
                    skippable: true,
                },
                OnboardingPhase {
                    key: "equipment_setup",
                    title: "Equipment setup",
                    navigation: SelfNavigating,
                    skippable: false,
                },
                OnboardingPhase {
                    key: "section_toggles",
                    title: "Choose your checks",
                    navigation: Guided,
                    skippable: false,
                },
                OnboardingPhase {
                    key: "seed_templates",
                    title: "Preparing your diary",
                    navigation: Interstitial,
                    skippable: false,
                },
                OnboardingPhase {
                    key: "training_intro",
                    title: "Training introduction",
                    navigation: Guided,
                    skippable: true,
                },
                OnboardingPhase {
                    key: "summary",
                    title: "All set",
                    navigation: Guided,
                    skippable: false,
                },
            ],
        }
    }

    pub fn phases(&self) -> &[OnboardingPhase] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Option<&OnboardingPhase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.phases.len().saturating_sub(1)
    }
}
