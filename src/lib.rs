/*
 * Responsibility
 * - crate root: module tree shared by the binary and the HTTP tests
 */
pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
