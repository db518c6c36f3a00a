// handlers/protected/mod.rs - endpoints behind jwt_auth_middleware
//
// Every handler takes the caller's identity from `AuthUser` and hands it to
// the service; authorization itself lives in the services.

pub mod projects;
pub mod search;
pub mod tasks;

pub use projects::{project_delete, project_get, project_put, projects_get, projects_post};
pub use search::search_get;
pub use tasks::{task_delete, task_get, task_put, tasks_get, tasks_post};
