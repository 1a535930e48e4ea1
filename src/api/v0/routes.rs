/*
 * Responsibility
 * - URL structure of the v0 certificates API
 * - every route here requires authentication (applied in app.rs)
 */
use axum::{Router, routing::get};

use crate::api::v0::handlers::certificates::get_certificate;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/{course_id}/{username}", get(get_certificate))
}
