pub mod format;
pub mod request;

pub use format::{AuthResponse, ProjectResponse, TaskResponse};
pub use request::{LoginRequest, ProjectRequest, RegisterRequest, TaskListParams, TaskRequest, TaskSearchParams};
