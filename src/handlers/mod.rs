// handlers/mod.rs - handler tiers
//
// public:    no authentication (service info, health, register, login)
// protected: bearer token required (projects, tasks, search)

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, Query},
    Json,
};

use crate::error::ApiError;

pub mod protected;
pub mod public;

/// Unwraps a JSON body, turning axum's rejection into the API error envelope
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}

/// Unwraps path parameters; a non-numeric id is a 400, not a 404
pub(crate) fn path_params<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    path.map(|Path(value)| value).map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub(crate) fn query_params<T>(
    query: Result<Query<T>, axum::extract::rejection::QueryRejection>,
) -> Result<T, ApiError> {
    query.map(|Query(value)| value).map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}
