pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectDraft};
pub use task::{Task, TaskDraft};
pub use user::{NewUser, User};
