use serde::{Deserialize, Serialize};

/// Stable identifier for a food-service organization (a single site or venue).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

/// Who performed an action, as recorded against logs and assessments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub display_name: String,
}

/// Caller identity attached to every service entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgContext {
    pub organization: OrganizationId,
    pub user: UserRef,
}

impl OrgContext {
    pub fn new(organization: impl Into<String>, user: UserRef) -> Self {
        Self {
            organization: OrganizationId(organization.into()),
            user,
        }
    }
}
