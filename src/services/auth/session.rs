//! Session lookup backed by the shared cache.
//!
//! The login system writes `session:{key}` → username; the session key travels in a cookie.

use std::time::Duration;

use uuid::Uuid;

use crate::services::cache::{CacheClient, CacheResult};

#[derive(Clone, Debug)]
pub struct SessionStore<C: CacheClient> {
    cache: C,
    prefix: String,
}

impl<C: CacheClient> SessionStore<C> {
    pub fn new(cache: C) -> Self {
        Self::new_with_prefix(cache, "session")
    }

    pub fn new_with_prefix(cache: C, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, session_key: &str) -> String {
        format!("{}:{}", self.prefix, session_key)
    }

    pub fn backend_name(&self) -> &'static str {
        self.cache.backend_name()
    }

    /// `Ok(None)` when the session is unknown or expired.
    pub async fn username_for(&self, session_key: &str) -> CacheResult<Option<String>> {
        let username = self.cache.get_string(&self.key(session_key)).await?;
        Ok(username.filter(|u| !u.is_empty()))
    }

    /// Open a session for `username` and return its key.
    pub async fn create(&self, username: &str, ttl: Duration) -> CacheResult<String> {
        let session_key = Uuid::new_v4().simple().to_string();
        self.cache
            .set_with_ttl(&self.key(&session_key), username, ttl)
            .await?;
        Ok(session_key)
    }
}
