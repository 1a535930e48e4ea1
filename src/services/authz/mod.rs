//! Authorization decisions for the certificate read path.
//!
//! Both checks are pure: identity + request target in, decision out.

pub mod gate;
pub mod scopes;

pub use gate::authorize;
pub use scopes::{CERTIFICATES_READ, check_scopes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    InsufficientScope,
    Forbidden,
}

impl DenyReason {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientScope => "insufficient_scope",
            Self::Forbidden => "forbidden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    Deny(DenyReason),
}
