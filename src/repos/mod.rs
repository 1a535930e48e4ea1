/*
 * Responsibility
 * - storage seams (UserStore / CertificateStore) and their implementations
 */
pub mod certificate_repo;
pub mod error;
pub mod memory;
pub mod user_repo;

pub use certificate_repo::{CertificateStore, PgCertificateStore};
pub use error::RepoError;
pub use memory::{InMemoryCertificateStore, InMemoryUserStore};
pub use user_repo::{PgUserStore, UserRow, UserStore};
