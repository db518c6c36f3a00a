// handlers/protected/projects.rs - /api/projects and /api/projects/:id

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Extension, Json,
};

use crate::api::{ProjectRequest, ProjectResponse};
use crate::handlers::{json_body, path_params};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::types::ProjectId;

/// POST /api/projects
pub async fn projects_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<ProjectRequest>, JsonRejection>,
) -> ApiResult<ProjectResponse> {
    let draft = json_body(body)?.validate()?;
    let project = state.projects.create(&user.username, draft).await?;
    Ok(ApiResponse::created(project))
}

/// GET /api/projects
pub async fn projects_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<ProjectResponse>> {
    let projects = state.projects.list(&user.username).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /api/projects/:id
pub async fn project_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> ApiResult<ProjectResponse> {
    let id = path_params(path)?;
    let project = state.projects.get(&user.username, id).await?;
    Ok(ApiResponse::success(project))
}

/// PUT /api/projects/:id - overwrites name and description
pub async fn project_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<ProjectId>, PathRejection>,
    body: Result<Json<ProjectRequest>, JsonRejection>,
) -> ApiResult<ProjectResponse> {
    let id = path_params(path)?;
    let draft = json_body(body)?.validate()?;
    let project = state.projects.update(&user.username, id, draft).await?;
    Ok(ApiResponse::success(project))
}

/// DELETE /api/projects/:id - removes the project and its tasks
pub async fn project_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<ProjectId>, PathRejection>,
) -> ApiResult<()> {
    let id = path_params(path)?;
    state.projects.delete(&user.username, id).await?;
    Ok(ApiResponse::no_content())
}
