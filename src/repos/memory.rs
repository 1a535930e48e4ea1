//! In-memory stores.
//!
//! Used by the HTTP tests and for wiring the router without Postgres.
//! Cheap to clone; clones share the same data.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CertificateRecord, CourseKey};
use crate::repos::{
    certificate_repo::CertificateStore,
    error::RepoError,
    user_repo::{UserRow, UserStore},
};

#[derive(Clone, Debug, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRow>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: UserRow) {
        self.users.write().await.insert(user.username.clone(), user);
    }

    /// Returns false when the user does not exist.
    pub async fn set_active(&self, username: &str, is_active: bool) -> bool {
        match self.users.write().await.get_mut(username) {
            Some(user) => {
                user.is_active = is_active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRow>, RepoError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryCertificateStore {
    records: Arc<RwLock<Vec<CertificateRecord>>>,
}

impl InMemoryCertificateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: CertificateRecord) {
        self.records.write().await.push(record);
    }
}

#[async_trait]
impl CertificateStore for InMemoryCertificateStore {
    async fn latest_for(
        &self,
        username: &str,
        course_id: &CourseKey,
    ) -> Result<Option<CertificateRecord>, RepoError> {
        let records = self.records.read().await;
        // Ties on created_date resolve to the later insert.
        let latest = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.username == username && &r.course_id == course_id)
            .max_by_key(|(i, r)| (r.created_date, *i))
            .map(|(_, r)| r.clone());

        Ok(latest)
    }
}
