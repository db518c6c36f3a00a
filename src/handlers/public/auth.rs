// handlers/public/auth.rs - POST /api/auth/register, POST /api/auth/login

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{AuthResponse, LoginRequest, RegisterRequest};
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/auth/register - create an account and return a token (201)
pub async fn register_post(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let draft = json_body(body)?.validate()?;
    let response = state.auth.register(draft).await?;
    Ok(ApiResponse::created(response))
}

/// POST /api/auth/login - exchange credentials for a token
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let (username, password) = json_body(body)?.validate()?;
    let response = state.auth.login(&username, &password).await?;
    Ok(ApiResponse::success(response))
}
