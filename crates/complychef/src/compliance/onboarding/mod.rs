//! Guided account setup: the fixed phase plan, the resumable position
//! tracker, and the service that seeds templates along the way.

pub mod domain;
pub mod phases;
pub mod repository;
pub mod service;
pub mod tracker;

pub use domain::{OnboardingError, OnboardingPhase, OnboardingProgress, PhaseNavigation, PhaseState};
pub use phases::OnboardingPlan;
pub use repository::{HookError, OnboardingHooks, OnboardingStore, ProgressStoreError};
pub use service::{OnboardingService, OnboardingServiceError, OnboardingView};
pub use tracker::OnboardingTracker;
