use crate::domain::CallerIdentity;
use crate::services::authz::{AuthorizationDecision, DenyReason};

/// Staff may read anyone's certificate; everyone else only their own.
///
/// `is_active` is not consulted.
pub fn authorize(identity: &CallerIdentity, owner: &str) -> AuthorizationDecision {
    if identity.is_staff || identity.is_self(owner) {
        AuthorizationDecision::Allow
    } else {
        AuthorizationDecision::Deny(DenyReason::Forbidden)
    }
}
