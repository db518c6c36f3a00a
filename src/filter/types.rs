use crate::types::{ProjectId, TaskPriority, TaskStatus, UserId};

/// Which tasks a query may ever see. Built by the ownership guard or the
/// identity resolver, never from raw request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Tasks of one project already authorized for the caller
    Project(ProjectId),
    /// Tasks of every project owned by this user
    Owner(UserId),
}

/// One conjunct of the composed task predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCondition {
    Scope(TaskScope),
    Status(TaskStatus),
    Priority(TaskPriority),
    /// Case-insensitive literal substring of title OR description
    Search(String),
}

/// Task columns accepted by `sortBy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    Id,
    Title,
    Description,
    Status,
    Priority,
    DueDate,
    CreatedAt,
    UpdatedAt,
    Project,
}

impl TaskSortField {
    pub fn column(&self) -> &'static str {
        match self {
            TaskSortField::Id => "id",
            TaskSortField::Title => "title",
            TaskSortField::Description => "description",
            TaskSortField::Status => "status",
            TaskSortField::Priority => "priority",
            TaskSortField::DueDate => "due_date",
            TaskSortField::CreatedAt => "created_at",
            TaskSortField::UpdatedAt => "updated_at",
            TaskSortField::Project => "project_id",
        }
    }
}

/// Bind values for a rendered statement, in `$n` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Id(i64),
    Text(String),
    Status(TaskStatus),
    Priority(TaskPriority),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
