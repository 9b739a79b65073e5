use super::domain::{OnboardingError, OnboardingPhase, OnboardingProgress};
use super::phases::OnboardingPlan;

/// State machine over the setup plan. The phase index is always clamped to
/// the plan; `finish` is the only terminal transition. Pure apart from the
/// progress it mutates; persistence and side effects live in the service.
#[derive(Debug)]
pub struct OnboardingTracker<'a> {
    plan: &'a OnboardingPlan,
    progress: OnboardingProgress,
}

impl<'a> OnboardingTracker<'a> {
    pub fn new(plan: &'a OnboardingPlan) -> Self {
        Self {
            plan,
            progress: OnboardingProgress::default(),
        }
    }

    /// Pick up a saved session. An out-of-range saved index (the plan may
    /// have shrunk between releases) clamps to the final phase.
    pub fn resume(plan: &'a OnboardingPlan, mut progress: OnboardingProgress) -> Self {
        progress.current_phase = progress.current_phase.min(plan.last_index());
        Self { plan, progress }
    }

    pub fn index(&self) -> usize {
        self.progress.current_phase
    }

    pub fn current(&self) -> &OnboardingPhase {
        &self.plan.phases()[self.progress.current_phase.min(self.plan.last_index())]
    }

    pub fn progress(&self) -> &OnboardingProgress {
        &self.progress
    }

    pub fn into_progress(self) -> OnboardingProgress {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress.finished
    }

    /// Mark the current phase completed and move forward. At the final phase
    /// the index stays put; `finish` is the way out.
    pub fn advance(&mut self) -> Result<(), OnboardingError> {
        self.ensure_active()?;
        self.mark_completed(false);
        self.progress.current_phase =
            (self.progress.current_phase + 1).min(self.plan.last_index());
        Ok(())
    }

    /// Move one phase back. Completion flags are never cleared; revisiting a
    /// phase does not un-complete it.
    pub fn back(&mut self) -> Result<(), OnboardingError> {
        self.ensure_active()?;
        self.progress.current_phase = self.progress.current_phase.saturating_sub(1);
        Ok(())
    }

    pub fn skip(&mut self) -> Result<(), OnboardingError> {
        self.ensure_active()?;
        let phase = self.current();
        if !phase.skippable {
            return Err(OnboardingError::SkipNotAllowed { phase: phase.key });
        }

        self.mark_completed(true);
        self.progress.current_phase =
            (self.progress.current_phase + 1).min(self.plan.last_index());
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), OnboardingError> {
        self.ensure_active()?;
        let phase = self.current();
        if self.progress.current_phase != self.plan.last_index() {
            return Err(OnboardingError::NotAtFinalPhase { phase: phase.key });
        }

        self.mark_completed(false);
        self.progress.finished = true;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), OnboardingError> {
        if self.progress.finished {
            return Err(OnboardingError::AlreadyFinished);
        }

        Ok(())
    }

    fn mark_completed(&mut self, skipped: bool) {
        let key = self.current().key.to_string();
        let state = self.progress.phases.entry(key).or_default();
        state.completed = true;
        if skipped {
            state.skipped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::onboarding::domain::OnboardingError;

    fn plan() -> OnboardingPlan {
        OnboardingPlan::standard()
    }

    #[test]
    fn a_new_tracker_starts_at_the_first_phase() {
        let plan = plan();
        let tracker = OnboardingTracker::new(&plan);

        assert_eq!(tracker.index(), 0);
        assert_eq!(tracker.current().key, "welcome");
        assert!(!tracker.is_finished());
    }

    #[test]
    fn advance_completes_the_phase_and_moves_on() {
        let plan = plan();
        let mut tracker = OnboardingTracker::new(&plan);

        tracker.advance().expect("advance allowed");

        assert_eq!(tracker.index(), 1);
        assert!(tracker.progress().is_completed("welcome"));
        assert!(!tracker.progress().phase_state("welcome").skipped);
    }

    #[test]
    fn back_twice_then_next_preserves_earlier_flags() {
        let plan = plan();
        let mut tracker = OnboardingTracker::new(&plan);
        tracker.advance().expect("advance allowed");
        tracker.advance().expect("advance allowed");
        assert_eq!(tracker.index(), 2);
        let before = tracker.progress().phases.clone();

        tracker.back().expect("back allowed");
        tracker.back().expect("back allowed");
        tracker.advance().expect("advance allowed");

        assert_eq!(tracker.index(), 1);
        assert_eq!(
            tracker.progress().phase_state("welcome"),
            before["welcome"]
        );
        assert_eq!(
            tracker.progress().phase_state("business_profile"),
            before["business_profile"]
        );
    }

    #[test]
    fn back_at_the_first_phase_stays_put() {
        let plan = plan();
        let mut tracker = OnboardingTracker::new(&plan);

        tracker.back().expect("back allowed");

        assert_eq!(tracker.index(), 0);
    }

    #[test]
    fn advance_at_the_final_phase_keeps_the_index() {
        let plan = plan();
        let mut tracker = OnboardingTracker::resume(
            &plan,
            OnboardingProgress {
                current_phase: plan.last_index(),
                ..OnboardingProgress::default()
            },
        );

        tracker.advance().expect("advance allowed");

        assert_eq!(tracker.index(), plan.last_index());
        assert!(tracker.progress().is_completed("summary"));
        assert!(!tracker.is_finished());
    }

    #[test]
    fn skip_honours_the_skippable_flag() {
        let plan = plan();
        let mut tracker = OnboardingTracker::new(&plan);

        let error = tracker.skip().expect_err("welcome is not skippable");
        match error {
            OnboardingError::SkipNotAllowed { phase } => assert_eq!(phase, "welcome"),
            other => panic!("expected skip refusal, got {other:?}"),
        }

        tracker.advance().expect("advance allowed");
        tracker.advance().expect("advance allowed");
        assert_eq!(tracker.current().key, "team_invites");
        tracker.skip().expect("team invites skippable");

        assert_eq!(tracker.index(), 3);
        let state = tracker.progress().phase_state("team_invites");
        assert!(state.completed);
        assert!(state.skipped);
    }

    #[test]
    fn the_skipped_flag_survives_a_revisit() {
        let plan = plan();
        let mut tracker = OnboardingTracker::new(&plan);
        tracker.advance().expect("advance allowed");
        tracker.advance().expect("advance allowed");
        tracker.skip().expect("team invites skippable");

        tracker.back().expect("back allowed");
        tracker.advance().expect("advance allowed");

        let state = tracker.progress().phase_state("team_invites");
        assert!(state.completed);
        assert!(state.skipped);
    }

    #[test]
    fn finish_is_only_valid_at_the_final_phase() {
        let plan = plan();
        let mut tracker = OnboardingTracker::new(&plan);

        let error = tracker.finish().expect_err("not at the final phase");
        assert!(matches!(error, OnboardingError::NotAtFinalPhase { .. }));

        let mut tracker = OnboardingTracker::resume(
            &plan,
            OnboardingProgress {
                current_phase: plan.last_index(),
                ..OnboardingProgress::default()
            },
        );
        tracker.finish().expect("finish allowed");

        assert!(tracker.is_finished());
        assert!(tracker.progress().is_completed("summary"));
        assert!(matches!(
            tracker.advance(),
            Err(OnboardingError::AlreadyFinished)
        ));
        assert!(matches!(
            tracker.finish(),
            Err(OnboardingError::AlreadyFinished)
        ));
    }

    #[test]
    fn resume_clamps_an_out_of_range_index() {
        let plan = plan();
        let tracker = OnboardingTracker::resume(
            &plan,
            OnboardingProgress {
                current_phase: 99,
                ..OnboardingProgress::default()
            },
        );

        assert_eq!(tracker.index(), plan.last_index());
        assert_eq!(tracker.current().key, "summary");
    }
}
