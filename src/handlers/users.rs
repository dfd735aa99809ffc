use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::NewUser;
use crate::state::AppState;

/// POST /users - create a user, idempotent on email.
///
/// Uniqueness is enforced by an existence query before the insert, not a
/// database constraint; a duplicate email is acknowledged, not an error.
pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<Json<Value>, ApiError> {
    if state.store.user_exists(&user.email).await? {
        return Ok(Json(json!({
            "success": true,
            "data": { "created": false, "message": "User already exists" }
        })));
    }

    let id = state.store.insert_user(&user).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "created": true, "id": id }
    })))
}
