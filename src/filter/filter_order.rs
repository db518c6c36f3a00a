use std::cmp::Ordering;

use crate::database::models::Task;

use super::error::FilterError;
use super::types::TaskSortField;

pub struct FilterOrder;

impl FilterOrder {
    /// Accepts the camelCase wire names and their snake_case column names
    pub fn parse(name: &str) -> Result<TaskSortField, FilterError> {
        Ok(match name {
            "id" => TaskSortField::Id,
            "title" => TaskSortField::Title,
            "description" => TaskSortField::Description,
            "status" => TaskSortField::Status,
            "priority" => TaskSortField::Priority,
            "dueDate" | "due_date" => TaskSortField::DueDate,
            "createdAt" | "created_at" => TaskSortField::CreatedAt,
            "updatedAt" | "updated_at" => TaskSortField::UpdatedAt,
            "project" | "projectId" | "project_id" => TaskSortField::Project,
            other => return Err(FilterError::UnknownSortField(other.to_string())),
        })
    }

    /// Ascending by `field`, nulls last, ties by id. Text columns use the "C"
    /// collation so PostgreSQL agrees with byte-wise ordering in memory.
    pub fn generate(field: Option<TaskSortField>) -> String {
        match field {
            None | Some(TaskSortField::Id) => "ORDER BY \"id\" ASC".to_string(),
            Some(f @ (TaskSortField::Title | TaskSortField::Description)) => {
                format!("ORDER BY \"{}\" COLLATE \"C\" ASC NULLS LAST, \"id\" ASC", f.column())
            }
            Some(f) => format!("ORDER BY \"{}\" ASC NULLS LAST, \"id\" ASC", f.column()),
        }
    }

    pub fn compare(field: Option<TaskSortField>, a: &Task, b: &Task) -> Ordering {
        let primary = match field {
            None | Some(TaskSortField::Id) => Ordering::Equal,
            Some(TaskSortField::Title) => a.title.cmp(&b.title),
            Some(TaskSortField::Description) => nulls_last(&a.description, &b.description),
            Some(TaskSortField::Status) => a.status.cmp(&b.status),
            Some(TaskSortField::Priority) => a.priority.cmp(&b.priority),
            Some(TaskSortField::DueDate) => nulls_last(&a.due_date, &b.due_date),
            Some(TaskSortField::CreatedAt) => a.created_at.cmp(&b.created_at),
            Some(TaskSortField::UpdatedAt) => a.updated_at.cmp(&b.updated_at),
            Some(TaskSortField::Project) => a.project_id.cmp(&b.project_id),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
