/*
 * Responsibility
 * - the resolved principal of a request, independent of how it authenticated
 * - built per request by the identity resolvers; never persisted
 */

/// Fine-grained permissions carried by a bearer token.
///
/// - `scopes`: what the token may do (e.g. `certificates:read`)
/// - `filters`: which resources it may do it on (e.g. `content_org:edx`, `user:me`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenScopes {
    pub scopes: Vec<String>,
    pub filters: Vec<String>,
}

impl TokenScopes {
    /// Parse the space separated `scope` claim.
    pub fn from_claims(scope: Option<&str>, filters: Option<Vec<String>>) -> Self {
        Self {
            scopes: scope
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            filters: filters.unwrap_or_default(),
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Values of all filters of the form `{kind}:{value}`.
    pub fn filter_values<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.filters.iter().filter_map(move |f| {
            f.split_once(':')
                .filter(|(k, _)| *k == kind)
                .map(|(_, v)| v)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub username: String,
    pub is_staff: bool,
    pub is_active: bool,
    /// Present only when the caller authenticated with a token.
    pub auth_scopes: Option<TokenScopes>,
}

impl CallerIdentity {
    pub fn is_self(&self, username: &str) -> bool {
        self.username == username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_claim_is_split_on_whitespace() {
        let scopes = TokenScopes::from_claims(Some("email  certificates:read\tprofile"), None);
        assert!(scopes.has_scope("certificates:read"));
        assert!(scopes.has_scope("profile"));
        assert!(!scopes.has_scope("grades:read"));
        assert!(scopes.filters.is_empty());
    }

    #[test]
    fn filter_values_select_by_kind() {
        let scopes = TokenScopes::from_claims(
            None,
            Some(vec![
                "content_org:edx".into(),
                "user:me".into(),
                "content_org:MITx".into(),
            ]),
        );
        let orgs: Vec<_> = scopes.filter_values("content_org").collect();
        assert_eq!(orgs, vec!["edx", "MITx"]);
        assert_eq!(scopes.filter_values("user").collect::<Vec<_>>(), vec!["me"]);
        assert!(scopes.scopes.is_empty());
    }
}
