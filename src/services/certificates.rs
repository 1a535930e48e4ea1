/*
 * Responsibility
 * - the certificate read path after authentication:
 *   authorization gate → course id parse → scope check → lookup
 * - storage failures stay distinct from "no certificate"
 */
use thiserror::Error;

use crate::domain::{CallerIdentity, CertificateRecord, CourseKey, CourseKeyError};
use crate::repos::{CertificateStore, RepoError};
use crate::services::authz::{self, AuthorizationDecision, DenyReason};
use crate::services::flags::ScopeEnforcement;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("access denied: {}", .0.error_code())]
    Denied(DenyReason),
    #[error("invalid course id: {0}")]
    InvalidCourseId(#[from] CourseKeyError),
    #[error("no certificate for user")]
    NotFound,
    #[error("certificate storage failure")]
    Storage(#[from] RepoError),
}

/// `course_id` is the raw path segment. The gate runs before it is parsed, so a caller reading
/// someone else's certificate is refused no matter what course id they sent.
pub async fn certificate_status(
    store: &dyn CertificateStore,
    identity: &CallerIdentity,
    enforcement: ScopeEnforcement,
    owner: &str,
    course_id: &str,
) -> Result<CertificateRecord, AccessError> {
    if let AuthorizationDecision::Deny(reason) = authz::authorize(identity, owner) {
        return Err(AccessError::Denied(reason));
    }

    let course = course_id.parse::<CourseKey>().map_err(|err| {
        tracing::debug!(error = %err, course_id, "rejecting course id");
        err
    })?;

    if let AuthorizationDecision::Deny(reason) =
        authz::check_scopes(identity, enforcement, owner, &course)
    {
        return Err(AccessError::Denied(reason));
    }

    store
        .latest_for(owner, &course)
        .await?
        .ok_or(AccessError::NotFound)
}
