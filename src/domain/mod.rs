/*
 * Responsibility
 * - storage/HTTP independent types shared by services, repos and handlers
 */
pub mod certificate;
pub mod course_key;
pub mod identity;

pub use certificate::{CertificateRecord, CertificateStatus, CourseMode, UnknownVariant};
pub use course_key::{CourseKey, CourseKeyError};
pub use identity::{CallerIdentity, TokenScopes};
