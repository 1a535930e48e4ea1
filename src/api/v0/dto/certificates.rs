/*
 * Responsibility
 * - 200 response body of the certificate endpoint
 * - key set is part of the public contract; add fields only with a version bump
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::CertificateRecord;

#[derive(Debug, Serialize)]
pub struct CertificateResponse {
    pub username: String,
    pub status: &'static str,
    pub is_passing: bool,
    pub grade: Option<String>,
    pub download_url: Option<String>,
    pub certificate_type: &'static str,
    pub course_id: String,
    pub created_date: DateTime<Utc>,
}

impl From<CertificateRecord> for CertificateResponse {
    fn from(record: CertificateRecord) -> Self {
        Self {
            username: record.username,
            status: record.status.as_str(),
            is_passing: record.status.is_passing(),
            grade: record.grade,
            download_url: record.download_url,
            certificate_type: record.certificate_mode.as_str(),
            course_id: record.course_id.to_string(),
            created_date: record.created_date,
        }
    }
}
