/*
 * Responsibility
 * - business logic between handlers and repos
 * - auth: who is calling / authz: may they read it / certificates: the read path
 */
pub mod auth;
pub mod authz;
pub mod cache;
pub mod certificates;
pub mod flags;
