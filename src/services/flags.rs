//! Process-wide feature flags.
//!
//! Flags can be flipped at runtime; request handling reads a snapshot once
//! (see `middleware::auth::access`) so one request never observes two values.

use std::sync::atomic::{AtomicBool, Ordering};

/// Per-request view of the scope enforcement flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeEnforcement {
    Enforced,
    Skipped,
}

impl From<bool> for ScopeEnforcement {
    fn from(enforced: bool) -> Self {
        if enforced { Self::Enforced } else { Self::Skipped }
    }
}

#[derive(Debug, Default)]
pub struct FeatureFlags {
    enforce_jwt_scopes: AtomicBool,
}

impl FeatureFlags {
    pub fn new(enforce_jwt_scopes: bool) -> Self {
        Self {
            enforce_jwt_scopes: AtomicBool::new(enforce_jwt_scopes),
        }
    }

    pub fn set_enforce_jwt_scopes(&self, enforced: bool) {
        self.enforce_jwt_scopes.store(enforced, Ordering::Relaxed);
        tracing::info!(enforced, "scope enforcement flag changed");
    }

    pub fn scope_enforcement(&self) -> ScopeEnforcement {
        self.enforce_jwt_scopes.load(Ordering::Relaxed).into()
    }
}
