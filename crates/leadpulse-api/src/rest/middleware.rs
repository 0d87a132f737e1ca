//! Request middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use leadpulse_core::AppError;

use crate::auth::verify_token;
use crate::rest::response::ApiError;
use crate::AppState;

/// Bearer-token authentication. Verifies the token, resolves the calling
/// agent, and makes the agent id available to handlers as an extension.
/// This is the only failure that aborts a request before computation.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("missing authorization header"))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("authorization header is not a bearer token"))?;

    let agent = verify_token(token, &state.auth)?;
    request.extensions_mut().insert(agent);

    Ok(next.run(request).await)
}
