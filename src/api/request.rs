use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::{ProjectDraft, TaskDraft};
use crate::error::ApiError;
use crate::services::RegisterDraft;
use crate::types::{TaskPriority, TaskStatus};

pub const TASK_TITLE_MAX: usize = 200;
pub const TASK_DESCRIPTION_MAX: usize = 2000;
pub const PROJECT_NAME_MAX: usize = 100;
pub const PROJECT_DESCRIPTION_MAX: usize = 500;

/// Collects per-field messages; the first message for a field wins
#[derive(Debug, Default)]
struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: &str) {
        self.0.entry(field.to_string()).or_insert_with(|| message.to_string());
    }

    fn into_result(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Validation failed", Some(self.0)))
        }
    }
}

fn too_long(value: &Option<String>, max: usize) -> bool {
    value.as_deref().is_some_and(|v| v.chars().count() > max)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

impl TaskRequest {
    pub fn validate(self) -> Result<TaskDraft, ApiError> {
        let mut errors = FieldErrors::default();

        if is_blank(&self.title) {
            errors.add("title", "Task title is required");
        } else if too_long(&self.title, TASK_TITLE_MAX) {
            errors.add("title", "Title must not exceed 200 characters");
        }
        if too_long(&self.description, TASK_DESCRIPTION_MAX) {
            errors.add("description", "Description must not exceed 2000 characters");
        }
        if self.status.is_none() {
            errors.add("status", "Status is required");
        }
        if self.priority.is_none() {
            errors.add("priority", "Priority is required");
        }
        errors.into_result()?;

        match (self.title, self.status, self.priority) {
            (Some(title), Some(status), Some(priority)) => Ok(TaskDraft {
                title,
                description: self.description,
                status,
                priority,
                due_date: self.due_date,
            }),
            _ => Err(ApiError::validation_error("Validation failed", None)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectRequest {
    pub fn validate(self) -> Result<ProjectDraft, ApiError> {
        let mut errors = FieldErrors::default();

        if is_blank(&self.name) {
            errors.add("name", "Project name is required");
        } else if too_long(&self.name, PROJECT_NAME_MAX) {
            errors.add("name", "Name must not exceed 100 characters");
        }
        if too_long(&self.description, PROJECT_DESCRIPTION_MAX) {
            errors.add("description", "Description must not exceed 500 characters");
        }
        errors.into_result()?;

        let name = self.name.ok_or_else(|| ApiError::validation_error("Validation failed", None))?;
        Ok(ProjectDraft {
            name,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<RegisterDraft, ApiError> {
        let mut errors = FieldErrors::default();

        match self.username.as_deref() {
            None => errors.add("username", "Username is required"),
            Some(u) if u.trim().is_empty() => errors.add("username", "Username is required"),
            Some(u) if !(3..=50).contains(&u.chars().count()) => {
                errors.add("username", "Username must be between 3 and 50 characters")
            }
            _ => {}
        }
        match self.email.as_deref() {
            None => errors.add("email", "Email is required"),
            Some(e) if e.trim().is_empty() => errors.add("email", "Email is required"),
            Some(e) if !is_email(e) => errors.add("email", "Email should be valid"),
            Some(e) if e.chars().count() > 100 => errors.add("email", "Email must not exceed 100 characters"),
            _ => {}
        }
        match self.password.as_deref() {
            None | Some("") => errors.add("password", "Password is required"),
            Some(p) if p.chars().count() < 6 => errors.add("password", "Password must be at least 6 characters"),
            _ => {}
        }
        errors.into_result()?;

        match (self.username, self.email, self.password) {
            (Some(username), Some(email), Some(password)) => Ok(RegisterDraft {
                username,
                email,
                password,
            }),
            _ => Err(ApiError::validation_error("Validation failed", None)),
        }
    }
}

fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace),
        _ => false,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<(String, String), ApiError> {
        let mut errors = FieldErrors::default();
        if is_blank(&self.username) {
            errors.add("username", "Username is required");
        }
        if self.password.as_deref().map_or(true, str::is_empty) {
            errors.add("password", "Password is required");
        }
        errors.into_result()?;

        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::validation_error("Validation failed", None)),
        }
    }
}

/// Query string of `GET /api/projects/{projectId}/tasks`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_by: Option<String>,
}

/// Query string of the two search routes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSearchParams {
    pub query: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_by: Option<String>,
}

/// Parses an optional enum query parameter; absent or empty means no filter
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<T>().map(Some).map_err(|e| ApiError::bad_request(e.to_string())),
    }
}
