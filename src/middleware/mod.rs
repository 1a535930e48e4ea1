/*
 * Responsibility
 * - middleware public interface
 * - http: cross-cutting transport layers / auth: identity resolution for protected routes
 */
pub mod auth;
pub mod http;
