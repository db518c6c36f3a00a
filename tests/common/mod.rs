#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tasktrack_api::api::{ProjectResponse, TaskResponse};
use tasktrack_api::config::AppConfig;
use tasktrack_api::database::models::{ProjectDraft, TaskDraft};
use tasktrack_api::database::MemoryRepository;
use tasktrack_api::services::RegisterDraft;
use tasktrack_api::state::AppState;
use tasktrack_api::types::{TaskPriority, TaskStatus};

pub const PASSWORD: &str = "correct-horse";

/// Development defaults with a cheap bcrypt cost and quiet logging
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = "integration-test-secret".to_string();
    config.security.password_hash_cost = 4;
    config.api.enable_request_logging = false;
    config.database.url = None;
    config
}

pub fn state() -> AppState {
    state_with(test_config())
}

pub fn state_with(config: AppConfig) -> AppState {
    AppState::new(config, Arc::new(MemoryRepository::new()))
}

/// Registers `username` and returns its bearer token
pub async fn register(state: &AppState, username: &str) -> Result<String> {
    let response = state
        .auth
        .register(RegisterDraft {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: PASSWORD.to_string(),
        })
        .await
        .with_context(|| format!("register {}", username))?;
    Ok(response.token)
}

pub async fn project(state: &AppState, owner: &str, name: &str) -> Result<ProjectResponse> {
    let draft = ProjectDraft {
        name: name.to_string(),
        description: None,
    };
    Ok(state.projects.create(owner, draft).await?)
}

pub fn task_draft(title: &str, status: TaskStatus, priority: TaskPriority) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: None,
        status,
        priority,
        due_date: None,
    }
}

pub fn due(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn ids(tasks: &[TaskResponse]) -> Vec<i64> {
    tasks.iter().map(|t| t.id.0).collect()
}

pub fn titles(tasks: &[TaskResponse]) -> Vec<String> {
    tasks.iter().map(|t| t.title.clone()).collect()
}

/// Drives one request through the router and returns status plus JSON body
/// (`Value::Null` for an empty body)
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
    };
    Ok((status, value))
}
