pub mod access_jwt;
pub mod factory;
pub mod resolver;
pub mod session;

pub use access_jwt::AccessTokenVerifier;
pub use factory::build_resolver_chain;
pub use resolver::{AuthError, IdentityResolver, ResolverChain, SessionResolver, TokenResolver};
pub use session::SessionStore;
