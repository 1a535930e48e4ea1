//! Identity resolution → AuthCtx in request extensions.
//!
//! - The resolver chain picks the mechanism from the credential present
//!   (Authorization header → JWT, otherwise session cookie).
//! - The scope enforcement flag is read once here and travels with the request.
//! - Any failure is a bare 401; backend failures become 500.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v0::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Apply authentication to every route of `router`.
///
/// ```ignore
/// let v0 = api::v0::routes();
/// let v0 = middleware::auth::access::apply(v0, state.clone());
/// app = app.nest("/certificates/v0", v0);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unknown paths stay 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match state.identity.resolve(req.headers()).await {
        Ok(identity) => identity,
        Err(AuthError::MissingCredentials) => return Err(AppError::Unauthorized),
        Err(err) => {
            tracing::warn!(error = %err, "authentication failed");
            return Err(err.into());
        }
    };

    let auth_ctx = AuthCtx::new(identity, state.flags.scope_enforcement());

    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
