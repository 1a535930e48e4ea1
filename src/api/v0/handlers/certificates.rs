/*
 * Responsibility
 * - GET /certificates/v0/{course_id}/{username}
 * - run the read path on the raw path segments, map the outcome onto the response contract
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v0::{dto::certificates::CertificateResponse, extractors::AuthCtxExtractor},
    error::AppError,
    services::certificates,
    state::AppState,
};

pub async fn get_certificate(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Path((course_id, username)): Path<(String, String)>,
) -> Result<Json<CertificateResponse>, AppError> {
    let record = certificates::certificate_status(
        state.certificates.as_ref(),
        &auth.identity,
        auth.scope_enforcement,
        &username,
        &course_id,
    )
    .await?;

    Ok(Json(CertificateResponse::from(record)))
}
