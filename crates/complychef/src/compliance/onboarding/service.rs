use std::sync::Arc;

use serde::Serialize;

use crate::compliance::identity::OrgContext;

use super::domain::{OnboardingError, PhaseNavigation};
use super::phases::OnboardingPlan;
use super::repository::{HookError, OnboardingHooks, OnboardingStore, ProgressStoreError};
use super::tracker::OnboardingTracker;

/// Serialized snapshot of the setup flow for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingView {
    pub index: usize,
    pub total: usize,
    pub phase_key: &'static str,
    pub phase_title: &'static str,
    pub navigation: &'static str,
    pub skippable: bool,
    pub finished: bool,
    pub completed: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// Drives the tracker against persisted progress and runs the side effects
/// the pure state machine leaves to its caller: template seeding when the
/// interstitial phase is first crossed, and the terminal completion signal.
pub struct OnboardingService<S, H> {
    store: Arc<S>,
    hooks: Arc<H>,
    plan: OnboardingPlan,
}

impl<S, H> OnboardingService<S, H>
where
    S: OnboardingStore + 'static,
    H: OnboardingHooks + 'static,
{
    pub fn new(store: Arc<S>, hooks: Arc<H>) -> Self {
        Self {
            store,
            hooks,
            plan: OnboardingPlan::standard(),
        }
    }

    pub fn plan(&self) -> &OnboardingPlan {
        &self.plan
    }

    /// Current position without any transition. New users see the first
    /// phase; nothing is persisted until they move.
    pub fn state(&self, context: &OrgContext) -> Result<OnboardingView, OnboardingServiceError> {
        let tracker = self.load(context)?;
        Ok(self.view(&tracker))
    }

    pub fn advance(&self, context: &OrgContext) -> Result<OnboardingView, OnboardingServiceError> {
        let mut tracker = self.load(context)?;
        tracker.advance()?;
        self.run_interstitials(context, &mut tracker)?;
        self.persist(context, &tracker)?;
        Ok(self.view(&tracker))
    }

    /// Step back one phase. Interstitial phases have no screen to land on,
    /// so back keeps moving until it reaches a navigable one.
    pub fn back(&self, context: &OrgContext) -> Result<OnboardingView, OnboardingServiceError> {
        let mut tracker = self.load(context)?;
        tracker.back()?;
        while tracker.current().navigation == PhaseNavigation::Interstitial && tracker.index() > 0
        {
            tracker.back()?;
        }
        self.persist(context, &tracker)?;
        Ok(self.view(&tracker))
    }

    pub fn skip(&self, context: &OrgContext) -> Result<OnboardingView, OnboardingServiceError> {
        let mut tracker = self.load(context)?;
        tracker.skip()?;
        self.run_interstitials(context, &mut tracker)?;
        self.persist(context, &tracker)?;
        Ok(self.view(&tracker))
    }

    /// Complete the flow from the final phase. The completion signal fires
    /// before the terminal state is persisted, so a failed delivery leaves
    /// the flow unfinished and the call retryable.
    pub fn finish(&self, context: &OrgContext) -> Result<OnboardingView, OnboardingServiceError> {
        let mut tracker = self.load(context)?;
        tracker.finish()?;
        self.hooks
            .onboarding_completed(&context.organization, &context.user)?;
        self.persist(context, &tracker)?;
        Ok(self.view(&tracker))
    }

    fn load<'a>(
        &'a self,
        context: &OrgContext,
    ) -> Result<OnboardingTracker<'a>, OnboardingServiceError> {
        let progress = self
            .store
            .load(&context.organization, &context.user.id)?
            .unwrap_or_default();
        Ok(OnboardingTracker::resume(&self.plan, progress))
    }

    fn persist(
        &self,
        context: &OrgContext,
        tracker: &OnboardingTracker<'_>,
    ) -> Result<(), OnboardingServiceError> {
        self.store
            .save(&context.organization, &context.user.id, tracker.progress())?;
        Ok(())
    }

    /// Cross any interstitial phases in front of the cursor, seeding on the
    /// first visit only. A completed interstitial advances without rerunning
    /// its side effect.
    fn run_interstitials(
        &self,
        context: &OrgContext,
        tracker: &mut OnboardingTracker<'_>,
    ) -> Result<(), OnboardingServiceError> {
        while !tracker.is_finished()
            && tracker.current().navigation == PhaseNavigation::Interstitial
        {
            let key = tracker.current().key;
            if !tracker.progress().is_completed(key) {
                self.hooks.seed_templates(&context.organization)?;
            }

            let before = tracker.index();
            tracker.advance()?;
            if tracker.index() == before {
                break;
            }
        }

        Ok(())
    }

    fn view(&self, tracker: &OnboardingTracker<'_>) -> OnboardingView {
        let phase = tracker.current();
        let progress = tracker.progress();
        let completed: Vec<&'static str> = self
            .plan
            .phases()
            .iter()
            .filter(|phase| progress.is_completed(phase.key))
            .map(|phase| phase.key)
            .collect();
        let skipped: Vec<&'static str> = self
            .plan
            .phases()
            .iter()
            .filter(|phase| progress.phase_state(phase.key).skipped)
            .map(|phase| phase.key)
            .collect();

        OnboardingView {
            index: tracker.index(),
            total: self.plan.len(),
            phase_key: phase.key,
            phase_title: phase.title,
            navigation: phase.navigation.label(),
            skippable: phase.skippable,
            finished: tracker.is_finished(),
            completed,
            skipped,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
    #[error(transparent)]
    Store(#[from] ProgressStoreError),
    #[error(transparent)]
    Hook(#[from] HookError),
}
