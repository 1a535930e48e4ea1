/*
 * Responsibility
 * - certificate lookup by (username, course_id)
 * - rows are written by the certificate generation system; this side only reads
 * - when several rows match, the most recently created one is authoritative
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::{CertificateRecord, CourseKey};
use crate::repos::error::RepoError;

#[async_trait]
pub trait CertificateStore: Send + Sync {
    async fn latest_for(
        &self,
        username: &str,
        course_id: &CourseKey,
    ) -> Result<Option<CertificateRecord>, RepoError>;
}

#[derive(Debug, FromRow)]
pub struct CertificateRow {
    pub username: String,
    pub course_id: String,
    pub status: String,
    pub grade: Option<String>,
    pub download_url: Option<String>,
    pub mode: String,
    pub created_date: DateTime<Utc>,
}

// The generation system writes '' rather than NULL for unset text columns.
fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

impl TryFrom<CertificateRow> for CertificateRecord {
    type Error = RepoError;

    fn try_from(row: CertificateRow) -> Result<Self, Self::Error> {
        Ok(CertificateRecord {
            username: row.username,
            course_id: row.course_id.parse()?,
            status: row.status.parse()?,
            grade: non_empty(row.grade),
            download_url: non_empty(row.download_url),
            certificate_mode: row.mode.parse()?,
            created_date: row.created_date,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgCertificateStore {
    db: PgPool,
}

impl PgCertificateStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CertificateStore for PgCertificateStore {
    async fn latest_for(
        &self,
        username: &str,
        course_id: &CourseKey,
    ) -> Result<Option<CertificateRecord>, RepoError> {
        let row = sqlx::query_as::<_, CertificateRow>(
            r#"
            SELECT
                username, course_id, status, grade, download_url, mode, created_date
            FROM certificates_generatedcertificate
            WHERE username = $1 AND course_id = $2
            ORDER BY created_date DESC
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(course_id.to_string())
        .fetch_optional(&self.db)
        .await?;

        row.map(CertificateRecord::try_from).transpose()
    }
}
