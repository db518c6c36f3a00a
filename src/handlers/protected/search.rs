// handlers/protected/search.rs - GET /api/tasks/search
//                                GET /api/projects/:projectId/tasks/search
//
// Both routes search every project the caller owns; the nested route's
// projectId is not consulted.

use axum::{
    extract::rejection::QueryRejection,
    extract::{Query, State},
    Extension,
};

use crate::api::request::parse_optional;
use crate::api::{TaskResponse, TaskSearchParams};
use crate::error::ApiError;
use crate::handlers::query_params;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::TaskSearch;
use crate::state::AppState;

pub async fn search_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<TaskSearchParams>, QueryRejection>,
) -> ApiResult<Vec<TaskResponse>> {
    let params = query_params(query)?;
    let text = params
        .query
        .ok_or_else(|| ApiError::bad_request("Required parameter 'query' is missing"))?;

    let search = TaskSearch {
        query: text,
        status: parse_optional(params.status.as_deref())?,
        priority: parse_optional(params.priority.as_deref())?,
        sort_by: params.sort_by,
    };

    let tasks = state.tasks.search(&user.username, search).await?;
    Ok(ApiResponse::success(tasks))
}
