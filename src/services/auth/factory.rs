/// Factory: build the identity resolver chain from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::UserStore;
use crate::services::auth::{
    AccessTokenVerifier, IdentityResolver, ResolverChain, SessionResolver, SessionStore,
    TokenResolver, access_jwt::AccessJwtError,
};
use crate::services::cache::CacheClient;

// Order matters: an Authorization header takes precedence over a session cookie.
pub fn build_resolver_chain<C: CacheClient>(
    config: &Config,
    users: Arc<dyn UserStore>,
    cache: C,
) -> Result<ResolverChain, AccessJwtError> {
    let verifier = AccessTokenVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )?;

    let resolvers: Vec<Arc<dyn IdentityResolver>> = vec![
        Arc::new(TokenResolver::new(verifier, users.clone())),
        Arc::new(SessionResolver::new(
            config.session_cookie_name.clone(),
            SessionStore::new(cache),
            users,
        )),
    ];

    Ok(ResolverChain::new(resolvers))
}
