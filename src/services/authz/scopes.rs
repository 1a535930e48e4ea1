use crate::domain::{CallerIdentity, CourseKey};
use crate::services::authz::{AuthorizationDecision, DenyReason};
use crate::services::flags::ScopeEnforcement;

pub const CERTIFICATES_READ: &str = "certificates:read";

const CONTENT_ORG_FILTER: &str = "content_org";
const USER_FILTER: &str = "user";
const USER_ME: &str = "me";

/// Token scope check for a read of `owner`'s certificate in `course`.
///
/// Skipped entirely when enforcement is off or the caller did not use a token.
/// Otherwise the token must:
/// - carry `certificates:read`
/// - name the course org, if it carries any `content_org:*` filter
/// - belong to `owner`, if it carries `user:me`
/// - carry at least one of those two filters; an unfiltered token covers nothing
pub fn check_scopes(
    identity: &CallerIdentity,
    enforcement: ScopeEnforcement,
    owner: &str,
    course: &CourseKey,
) -> AuthorizationDecision {
    let scopes = match (enforcement, &identity.auth_scopes) {
        (ScopeEnforcement::Enforced, Some(scopes)) => scopes,
        _ => return AuthorizationDecision::Allow,
    };

    if !scopes.has_scope(CERTIFICATES_READ) {
        return insufficient("missing certificates:read scope");
    }

    let mut orgs = scopes.filter_values(CONTENT_ORG_FILTER).peekable();
    let org_filtered = orgs.peek().is_some();
    if org_filtered && !orgs.any(|org| org == course.org()) {
        return insufficient("content_org filter does not cover course");
    }

    let me_only = scopes
        .filter_values(USER_FILTER)
        .any(|value| value == USER_ME);
    if me_only && !identity.is_self(owner) {
        return insufficient("user:me filter does not cover requested user");
    }

    if !org_filtered && !me_only {
        return insufficient("token carries no content_org or user:me filter");
    }

    AuthorizationDecision::Allow
}

fn insufficient(why: &'static str) -> AuthorizationDecision {
    tracing::debug!(reason = why, "token scopes rejected");
    AuthorizationDecision::Deny(DenyReason::InsufficientScope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenScopes;

    fn course() -> CourseKey {
        "course-v1:edx+verified+2024".parse().unwrap()
    }

    fn token_identity(username: &str, scope: &str, filters: &[&str]) -> CallerIdentity {
        CallerIdentity {
            username: username.into(),
            is_staff: false,
            is_active: true,
            auth_scopes: Some(TokenScopes::from_claims(
                Some(scope),
                Some(filters.iter().map(|f| f.to_string()).collect()),
            )),
        }
    }

    const DENY: AuthorizationDecision = AuthorizationDecision::Deny(DenyReason::InsufficientScope);

    #[test]
    fn unfiltered_staff_token_covers_no_course() {
        let mut caller = token_identity("staff", "certificates:read", &[]);
        caller.is_staff = true;
        let mitx: CourseKey = "course-v1:MITx+any+run".parse().unwrap();
        assert_eq!(
            check_scopes(&caller, ScopeEnforcement::Enforced, "alice", &mitx),
            DENY
        );
    }

    #[test]
    fn skipped_enforcement_allows_anything() {
        let caller = token_identity("alice", "", &[]);
        assert_eq!(
            check_scopes(&caller, ScopeEnforcement::Skipped, "bob", &course()),
            AuthorizationDecision::Allow
        );
    }

    #[test]
    fn session_identities_are_not_scope_checked() {
        let caller = CallerIdentity {
            username: "alice".into(),
            is_staff: false,
            is_active: true,
            auth_scopes: None,
        };
        assert_eq!(
            check_scopes(&caller, ScopeEnforcement::Enforced, "alice", &course()),
            AuthorizationDecision::Allow
        );
    }

    #[test]
    fn enforced_token_rules() {
        let cases: &[(&str, &str, &[&str], &str, AuthorizationDecision)] = &[
            ("alice", "certificates:read", &[], "alice", DENY),
            ("alice", "profile email", &["content_org:edx"], "alice", DENY),
            (
                "alice",
                "certificates:read",
                &["content_org:edx"],
                "alice",
                AuthorizationDecision::Allow,
            ),
            ("alice", "certificates:read", &["user:me"], "alice", AuthorizationDecision::Allow),
            // Filters unrelated to orgs or users do not count.
            ("alice", "certificates:read", &["tenant:blue"], "alice", DENY),
            (
                "alice",
                "certificates:read",
                &["content_org:edx", "user:me"],
                "alice",
                AuthorizationDecision::Allow,
            ),
            (
                "alice",
                "certificates:read",
                &["content_org:MITx", "content_org:edx"],
                "alice",
                AuthorizationDecision::Allow,
            ),
            ("alice", "certificates:read", &["content_org:MITx"], "alice", DENY),
            ("alice", "certificates:read", &["user:me"], "bob", DENY),
            // Without user:me the owner is left to the authorization gate.
            (
                "alice",
                "certificates:read",
                &["content_org:edx"],
                "bob",
                AuthorizationDecision::Allow,
            ),
        ];

        for (caller, scope, filters, owner, expected) in cases {
            let identity = token_identity(caller, scope, filters);
            assert_eq!(
                check_scopes(&identity, ScopeEnforcement::Enforced, owner, &course()),
                *expected,
                "scope={scope:?} filters={filters:?} owner={owner}"
            );
        }
    }
}
