/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 *   - identity resolvers, certificate store, feature flags
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::repos::CertificateStore;
use crate::services::{auth::ResolverChain, flags::FeatureFlags};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<ResolverChain>,
    pub certificates: Arc<dyn CertificateStore>,
    pub flags: Arc<FeatureFlags>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("identity", &self.identity)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        identity: ResolverChain,
        certificates: Arc<dyn CertificateStore>,
        flags: Arc<FeatureFlags>,
    ) -> Self {
        Self {
            identity: Arc::new(identity),
            certificates,
            flags,
        }
    }
}
