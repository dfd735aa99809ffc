use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity bound to the request for the remainder of its
/// handling. Never persisted; every request re-verifies its token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub display_name: String,
}

/// Bearer-token authentication middleware. Extracts the token from the
/// Authorization header, verifies it against the external identity provider,
/// and injects the resulting [`AuthUser`] into the request, or short-circuits
/// with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = state.verifier.verify(&token).await?;

    let auth_user = AuthUser {
        display_name: claims.display_name(),
        email: claims.email,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
/// An absent header is MissingToken; a present but malformed one is
/// InvalidToken.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("header is not valid UTF-8".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("expected Bearer scheme".to_string()))?;

    if token.trim().is_empty() {
        return Err(AuthError::InvalidToken("empty token".to_string()));
    }

    Ok(token.to_string())
}
