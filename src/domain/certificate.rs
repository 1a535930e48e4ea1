/*
 * Responsibility
 * - certificate record as read from storage (read-only in this service)
 * - status / mode enumerations and their wire strings
 */
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::course_key::CourseKey;

/// A storage string that does not name a known status or mode.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Lifecycle state owned by the certificate generation system.
    CertificateStatus, "certificate status", {
        Deleted => "deleted",
        Deleting => "deleting",
        Downloadable => "downloadable",
        Error => "error",
        Generating => "generating",
        NotPassing => "notpassing",
        Restricted => "restricted",
        Unavailable => "unavailable",
        Auditing => "auditing",
        AuditPassing => "audit_passing",
        AuditNotPassing => "audit_notpassing",
        Unverified => "unverified",
        Invalidated => "invalidated",
        Requesting => "requesting",
    }
);

wire_enum!(
    /// Enrollment track the certificate was issued for.
    CourseMode, "course mode", {
        Audit => "audit",
        Honor => "honor",
        Verified => "verified",
        Professional => "professional",
        NoIdProfessional => "no-id-professional",
        Credit => "credit",
        Masters => "masters",
    }
);

impl CertificateStatus {
    pub fn is_passing(&self) -> bool {
        matches!(self, Self::Downloadable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    pub username: String,
    pub course_id: CourseKey,
    pub status: CertificateStatus,
    pub grade: Option<String>,
    pub download_url: Option<String>,
    pub certificate_mode: CourseMode,
    pub created_date: DateTime<Utc>,
}
