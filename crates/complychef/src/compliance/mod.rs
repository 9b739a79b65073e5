pub mod assessment;
pub mod identity;
pub mod monitoring;
pub mod onboarding;
pub mod probelog;
