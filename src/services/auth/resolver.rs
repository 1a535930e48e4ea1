//! Identity resolution.
//!
//! Each authentication mechanism is one `IdentityResolver`. The chain picks the resolver whose
//! credential is present on the request (Authorization header first, then session cookie) and
//! never falls through to another mechanism once one has been selected.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use thiserror::Error;

use crate::domain::{CallerIdentity, TokenScopes};
use crate::repos::{RepoError, UserStore};
use crate::services::auth::access_jwt::AccessTokenVerifier;
use crate::services::auth::session::SessionStore;
use crate::services::cache::{CacheClient, CacheError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credentials")]
    MissingCredentials,
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("unknown user")]
    UnknownUser,
    #[error("identity backend failure: {0}")]
    Backend(String),
}

impl From<RepoError> for AuthError {
    fn from(e: RepoError) -> Self {
        AuthError::Backend(e.to_string())
    }
}

impl From<CacheError> for AuthError {
    fn from(e: CacheError) -> Self {
        AuthError::Backend(e.to_string())
    }
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    // Mechanism name (for logging).
    fn name(&self) -> &'static str;

    // Whether this mechanism's credential is present on the request.
    fn applies(&self, headers: &HeaderMap) -> bool;

    async fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, AuthError>;
}

async fn load_identity(
    users: &dyn UserStore,
    username: &str,
    auth_scopes: Option<TokenScopes>,
) -> Result<CallerIdentity, AuthError> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    // is_active is carried, not enforced: reading one's own certificate stays allowed.
    Ok(CallerIdentity {
        username: user.username,
        is_staff: user.is_staff,
        is_active: user.is_active,
        auth_scopes,
    })
}

/// `Authorization: Bearer <jwt>` or `Authorization: JWT <jwt>`.
pub struct TokenResolver {
    verifier: AccessTokenVerifier,
    users: Arc<dyn UserStore>,
}

impl TokenResolver {
    pub fn new(verifier: AccessTokenVerifier, users: Arc<dyn UserStore>) -> Self {
        Self { verifier, users }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidCredentials("authorization header is not ascii".into()))?;

    let token = raw
        .strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("JWT "))
        .ok_or_else(|| AuthError::InvalidCredentials("unsupported authorization scheme".into()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidCredentials("empty token".into()));
    }
    Ok(token)
}

#[async_trait]
impl IdentityResolver for TokenResolver {
    fn name(&self) -> &'static str {
        "jwt"
    }

    fn applies(&self, headers: &HeaderMap) -> bool {
        headers.contains_key(header::AUTHORIZATION)
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, AuthError> {
        let token = bearer_token(headers)?;

        let verified = self.verifier.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "access token verification failed");
            AuthError::InvalidCredentials(err.to_string())
        })?;

        tracing::debug!(jti = ?verified.jti, username = %verified.username, "access token verified");

        load_identity(self.users.as_ref(), &verified.username, Some(verified.scopes)).await
    }
}

/// Session cookie issued by the login system.
pub struct SessionResolver<C: CacheClient> {
    cookie_name: String,
    sessions: SessionStore<C>,
    users: Arc<dyn UserStore>,
}

impl<C: CacheClient> SessionResolver<C> {
    pub fn new(
        cookie_name: impl Into<String>,
        sessions: SessionStore<C>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions,
            users,
        }
    }

    fn session_key<'h>(&self, headers: &'h HeaderMap) -> Option<&'h str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.trim())
    }
}

#[async_trait]
impl<C: CacheClient> IdentityResolver for SessionResolver<C> {
    fn name(&self) -> &'static str {
        "session"
    }

    fn applies(&self, headers: &HeaderMap) -> bool {
        self.session_key(headers).is_some()
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, AuthError> {
        let session_key = self
            .session_key(headers)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AuthError::InvalidCredentials("empty session cookie".into()))?;

        let username = self
            .sessions
            .username_for(session_key)
            .await
            .map_err(|err| {
                tracing::error!(
                    error = %err,
                    backend = self.sessions.backend_name(),
                    "session lookup failed"
                );
                AuthError::from(err)
            })?
            .ok_or_else(|| AuthError::InvalidCredentials("unknown session".into()))?;

        load_identity(self.users.as_ref(), &username, None).await
    }
}

/// Ordered set of resolvers; the first one that applies wins.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn IdentityResolver>>,
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.resolvers.iter().map(|r| r.name()).collect();
        f.debug_struct("ResolverChain")
            .field("resolvers", &names)
            .finish()
    }
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Arc<dyn IdentityResolver>>) -> Self {
        Self { resolvers }
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, AuthError> {
        let resolver = self
            .resolvers
            .iter()
            .find(|r| r.applies(headers))
            .ok_or(AuthError::MissingCredentials)?;

        let identity = resolver.resolve(headers).await?;
        tracing::debug!(
            mechanism = resolver.name(),
            username = %identity.username,
            "caller identified"
        );
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::HeaderValue;

    use super::*;
    use crate::repos::{InMemoryUserStore, UserRow};
    use crate::services::cache::MemoryCache;

    async fn users() -> Arc<InMemoryUserStore> {
        let users = InMemoryUserStore::new();
        users
            .insert(UserRow {
                username: "alice".into(),
                is_staff: false,
                is_active: false,
            })
            .await;
        Arc::new(users)
    }

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_token_accepts_both_schemes() {
        let h = headers(&[(header::AUTHORIZATION, "Bearer abc")]);
        assert_eq!(bearer_token(&h).unwrap(), "abc");
        let h = headers(&[(header::AUTHORIZATION, "JWT abc")]);
        assert_eq!(bearer_token(&h).unwrap(), "abc");
        let h = headers(&[(header::AUTHORIZATION, "Basic abc")]);
        assert!(matches!(
            bearer_token(&h),
            Err(AuthError::InvalidCredentials(_))
        ));
        let h = headers(&[(header::AUTHORIZATION, "Bearer  ")]);
        assert!(bearer_token(&h).is_err());
    }

    #[tokio::test]
    async fn session_resolver_reads_named_cookie() {
        let store = users().await;
        let sessions = SessionStore::new(MemoryCache::new());
        let key = sessions
            .create("alice", Duration::from_secs(60))
            .await
            .unwrap();
        let resolver = SessionResolver::new("sessionid", sessions, store);

        let cookie = format!("csrftoken=x; sessionid={key}");
        let h = headers(&[(header::COOKIE, cookie.as_str())]);
        assert!(resolver.applies(&h));

        let identity = resolver.resolve(&h).await.unwrap();
        assert_eq!(identity.username, "alice");
        assert!(!identity.is_active);
        assert_eq!(identity.auth_scopes, None);

        let other = headers(&[(header::COOKIE, "csrftoken=x")]);
        assert!(!resolver.applies(&other));
    }

    #[tokio::test]
    async fn unknown_session_is_invalid_credentials() {
        let resolver = SessionResolver::new(
            "sessionid",
            SessionStore::new(MemoryCache::new()),
            users().await,
        );
        let h = headers(&[(header::COOKIE, "sessionid=nope")]);
        assert!(matches!(
            resolver.resolve(&h).await,
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[tokio::test]
    async fn chain_without_credentials_is_missing() {
        let resolver = SessionResolver::new(
            "sessionid",
            SessionStore::new(MemoryCache::new()),
            users().await,
        );
        let chain = ResolverChain::new(vec![Arc::new(resolver)]);
        assert!(matches!(
            chain.resolve(&HeaderMap::new()).await,
            Err(AuthError::MissingCredentials)
        ));
    }
}
