use axum::{extract::State, routing::post, Json, Router};

use crate::api::errors::ApiError;
use crate::api::validation::validate_password_len;
use crate::core::security;
use crate::core::state::AppState;
use crate::db::models::User;
use crate::schemas::auth::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::schemas::MessageResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/change-password", post(change_password))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = find_user(&state, &payload.email).await?;

    let valid = security::verify_stored(&payload.password, &user.password)
        .map_err(|e| ApiError::internal(e, "Failed to verify password"))?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid password"));
    }

    let details = state
        .store()
        .users()
        .role_details(user.role, &user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("Role-specific data not found".to_string()))?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: merged_profile(&user, details)?,
    }))
}

async fn change_password(
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_password_len(&payload.new_password)?;

    let user = find_user(&state, &payload.email).await?;

    let valid = security::verify_stored(&payload.old_password, &user.password)
        .map_err(|e| ApiError::internal(e, "Failed to verify password"))?;
    if !valid {
        return Err(ApiError::Unauthorized("Old password is incorrect"));
    }

    let hashed = security::hash_password(&payload.new_password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;
    state.store().users().set_password(&user.id, &hashed).await.map_err(ApiError::from)?;

    tracing::info!(user_id = %user.id, "Password changed");
    Ok(Json(MessageResponse { message: "Password changed successfully".to_string() }))
}

async fn find_user(state: &AppState, email: &str) -> Result<User, ApiError> {
    state
        .store()
        .users()
        .find_by_email(email)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// User row merged with the role detail record. The stored credential never
/// leaves the service; the role key stays authoritative over detail fields.
fn merged_profile(user: &User, details: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    let mut merged = serde_json::Map::new();
    merged.insert("id".to_string(), serde_json::Value::String(user.id.clone()));
    merged.insert("email".to_string(), serde_json::Value::String(user.email.clone()));

    if let serde_json::Value::Object(details) = details {
        merged.extend(details);
    }
    merged.remove("password");

    let role = serde_json::to_value(user.role)
        .map_err(|e| ApiError::internal(e, "Failed to encode user role"))?;
    merged.insert("role".to_string(), role);

    Ok(serde_json::Value::Object(merged))
}
