// handlers/protected/tasks.rs - /api/projects/:projectId/tasks[/:taskId]

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    Extension, Json,
};

use crate::api::request::parse_optional;
use crate::api::{TaskListParams, TaskRequest, TaskResponse};
use crate::handlers::{json_body, path_params, query_params};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::TaskFilter;
use crate::state::AppState;
use crate::types::{ProjectId, TaskId};

/// POST /api/projects/:projectId/tasks
pub async fn tasks_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<ProjectId>, PathRejection>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<TaskResponse> {
    let project_id = path_params(path)?;
    let draft = json_body(body)?.validate()?;
    let task = state.tasks.create(&user.username, project_id, draft).await?;
    Ok(ApiResponse::created(task))
}

/// GET /api/projects/:projectId/tasks?status=&priority=&sortBy=
pub async fn tasks_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<ProjectId>, PathRejection>,
    query: Result<Query<TaskListParams>, QueryRejection>,
) -> ApiResult<Vec<TaskResponse>> {
    let project_id = path_params(path)?;
    let params = query_params(query)?;

    let filter = TaskFilter {
        status: parse_optional(params.status.as_deref())?,
        priority: parse_optional(params.priority.as_deref())?,
        sort_by: params.sort_by,
    };

    let tasks = state.tasks.list(&user.username, project_id, filter).await?;
    Ok(ApiResponse::success(tasks))
}

/// GET /api/projects/:projectId/tasks/:taskId
pub async fn task_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(ProjectId, TaskId)>, PathRejection>,
) -> ApiResult<TaskResponse> {
    let (project_id, task_id) = path_params(path)?;
    let task = state.tasks.get(&user.username, project_id, task_id).await?;
    Ok(ApiResponse::success(task))
}

/// PUT /api/projects/:projectId/tasks/:taskId - full overwrite, project unchanged
pub async fn task_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(ProjectId, TaskId)>, PathRejection>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> ApiResult<TaskResponse> {
    let (project_id, task_id) = path_params(path)?;
    let draft = json_body(body)?.validate()?;
    let task = state.tasks.update(&user.username, project_id, task_id, draft).await?;
    Ok(ApiResponse::success(task))
}

/// DELETE /api/projects/:projectId/tasks/:taskId
pub async fn task_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(ProjectId, TaskId)>, PathRejection>,
) -> ApiResult<()> {
    let (project_id, task_id) = path_params(path)?;
    state.tasks.delete(&user.username, project_id, task_id).await?;
    Ok(ApiResponse::no_content())
}
