use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::common::ApiError;
use crate::domains::auth::{AuthError, Claims, TokenVerifier};

/// Permission-checking middleware
///
/// Wraps a route with a required permission: the bearer token is verified
/// first, then the permission membership is checked, and only then does the
/// inner handler run. Failures short-circuit with the JSON error envelope.
/// Verified claims are stored in request extensions for the handler.
pub async fn require_permission(
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match authorize(&verifier, header.as_deref(), permission).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => {
            debug!(error = %err, permission, "request rejected");
            ApiError::from(err).into_response()
        }
    }
}

/// Verify the Authorization header and require a permission
async fn authorize(
    verifier: &TokenVerifier,
    header: Option<&str>,
    permission: &str,
) -> Result<Claims, AuthError> {
    let token = TokenVerifier::token_from_header(header)?;
    let claims = verifier.verify(token).await?;
    claims.require_permission(permission)?;
    Ok(claims)
}
