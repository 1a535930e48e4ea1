/*
 * Responsibility
 * - the "authenticated context" type handlers see
 * - built by the middleware, stored in request extensions
 *
 * Notes
 * - token verification / session lookup belong to services::auth
 * - `scope_enforcement` is the flag value snapshotted for this request
 */
use crate::domain::CallerIdentity;
use crate::services::flags::ScopeEnforcement;

#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: CallerIdentity,
    pub scope_enforcement: ScopeEnforcement,
}

impl AuthCtx {
    pub fn new(identity: CallerIdentity, scope_enforcement: ScopeEnforcement) -> Self {
        Self {
            identity,
            scope_enforcement,
        }
    }
}
