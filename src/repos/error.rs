/**
 * Responsibility
 * - the meaning repos report upward
 */
use thiserror::Error;

use crate::domain::{CourseKeyError, UnknownVariant};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    // A stored row that does not map onto the domain types.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl From<UnknownVariant> for RepoError {
    fn from(e: UnknownVariant) -> Self {
        RepoError::Corrupt(e.to_string())
    }
}

impl From<CourseKeyError> for RepoError {
    fn from(e: CourseKeyError) -> Self {
        RepoError::Corrupt(e.to_string())
    }
}
