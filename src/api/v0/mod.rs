/*
 * Responsibility
 * - public surface of v0 (routes() and the pieces the middleware needs)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
