pub mod auth_service;
pub mod error;
pub mod identity;
pub mod ownership;
pub mod project_service;
pub mod task_service;

pub use auth_service::{AuthService, RegisterDraft};
pub use error::{ServiceError, ServiceResult};
pub use identity::IdentityResolver;
pub use ownership::{AuthorizedProject, OwnershipGuard};
pub use project_service::ProjectService;
pub use task_service::{TaskFilter, TaskSearch, TaskService};
