use std::cmp::Ordering;

use crate::database::models::Task;
use crate::types::{TaskPriority, TaskStatus, UserId};

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::{fold_case, FilterWhere};
use super::types::{SqlResult, TaskCondition, TaskScope, TaskSortField};

/// Composed task retrieval: an ownership scope plus optional filters and an
/// optional ascending sort. Every filter is independent; an absent filter
/// places no restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    scope: TaskScope,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    search: Option<String>,
    sort: Option<TaskSortField>,
}

impl TaskQuery {
    pub fn new(scope: TaskScope) -> Self {
        Self {
            scope,
            status: None,
            priority: None,
            search: None,
            sort: None,
        }
    }

    pub fn status(mut self, status: Option<TaskStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Option<TaskPriority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn search(mut self, text: Option<&str>) -> Self {
        self.search = text.map(str::to_string);
        self
    }

    pub fn sort_by(mut self, field: Option<&str>) -> Result<Self, FilterError> {
        self.sort = field.map(FilterOrder::parse).transpose()?;
        Ok(self)
    }

    pub fn sort_field(&self) -> Option<TaskSortField> {
        self.sort
    }

    pub fn conditions(&self) -> Vec<TaskCondition> {
        let mut conditions = vec![TaskCondition::Scope(self.scope)];
        if let Some(status) = self.status { conditions.push(TaskCondition::Status(status)); }
        if let Some(priority) = self.priority { conditions.push(TaskCondition::Priority(priority)); }
        if let Some(ref text) = self.search { conditions.push(TaskCondition::Search(text.clone())); }
        conditions
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.conditions());
        let query = [
            "SELECT * FROM \"tasks\"".to_string(),
            format!("WHERE {}", where_clause),
            FilterOrder::generate(self.sort),
        ]
        .join(" ");
        SqlResult { query, params }
    }

    /// Conditions for in-memory evaluation: the search needle is case-folded
    /// once here instead of per row
    fn folded_conditions(&self) -> Vec<TaskCondition> {
        self.conditions()
            .into_iter()
            .map(|condition| match condition {
                TaskCondition::Search(text) => TaskCondition::Search(fold_case(&text)),
                other => other,
            })
            .collect()
    }

    /// `owner` is the user owning `task`'s project
    pub fn matches(&self, task: &Task, owner: UserId) -> bool {
        let conditions = self.folded_conditions();
        conditions.iter().all(|c| FilterWhere::matches(c, task, owner))
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        FilterOrder::compare(self.sort, a, b)
    }

    /// Filter and order `(task, project owner)` rows in memory
    pub fn apply<I>(&self, rows: I) -> Vec<Task>
    where
        I: IntoIterator<Item = (Task, UserId)>,
    {
        let conditions = self.folded_conditions();
        let mut tasks: Vec<Task> = rows
            .into_iter()
            .filter(|(task, owner)| conditions.iter().all(|c| FilterWhere::matches(c, task, *owner)))
            .map(|(task, _)| task)
            .collect();
        tasks.sort_by(|a, b| self.compare(a, b));
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::SqlParam;
    use crate::types::{ProjectId, TaskId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn task(id: i64, project: i64, title: &str, description: Option<&str>, status: TaskStatus, priority: TaskPriority) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Task {
            id: TaskId(id),
            project_id: ProjectId(project),
            title: title.to_string(),
            description: description.map(str::to_string),
            status,
            priority,
            due_date: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn project_scope_sql_without_filters() {
        let sql = TaskQuery::new(TaskScope::Project(ProjectId(3))).to_sql();
        assert_eq!(sql.query, "SELECT * FROM \"tasks\" WHERE \"project_id\" = $1 ORDER BY \"id\" ASC");
        assert_eq!(sql.params, vec![SqlParam::Id(3)]);
    }

    #[test]
    fn owner_scope_sql_with_search_and_sort() {
        let sql = TaskQuery::new(TaskScope::Owner(UserId(9)))
            .search(Some("Parser"))
            .sort_by(Some("priority"))
            .unwrap()
            .to_sql();
        assert_eq!(
            sql.query,
            "SELECT * FROM \"tasks\" WHERE \"project_id\" IN (SELECT \"id\" FROM \"projects\" WHERE \"user_id\" = $1) \
             AND (\"title\" ILIKE $2 ESCAPE '\\' OR \"description\" ILIKE $2 ESCAPE '\\') \
             ORDER BY \"priority\" ASC NULLS LAST, \"id\" ASC"
        );
        assert_eq!(sql.params, vec![SqlParam::Id(9), SqlParam::Text("%Parser%".into())]);
    }

    #[test]
    fn all_filters_combine() {
        let query = TaskQuery::new(TaskScope::Project(ProjectId(1)))
            .status(Some(TaskStatus::Done))
            .priority(Some(TaskPriority::High))
            .search(Some("x"));
        assert_eq!(query.conditions().len(), 4);
        assert_eq!(query.to_sql().params.len(), 4);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = TaskQuery::new(TaskScope::Owner(UserId(1))).sort_by(Some("owner")).unwrap_err();
        assert_eq!(err, FilterError::UnknownSortField("owner".into()));
    }

    #[test]
    fn absent_filters_match_everything_in_scope() {
        let query = TaskQuery::new(TaskScope::Project(ProjectId(1)));
        assert!(query.matches(&task(1, 1, "a", None, TaskStatus::Todo, TaskPriority::Low), UserId(5)));
        assert!(!query.matches(&task(2, 2, "a", None, TaskStatus::Todo, TaskPriority::Low), UserId(5)));
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let query = TaskQuery::new(TaskScope::Owner(UserId(1))).search(Some("parser"));
        let rows = vec![
            (task(1, 1, "Refactor Parser", None, TaskStatus::Todo, TaskPriority::Low), UserId(1)),
            (task(2, 1, "Docs", Some("parser edge cases"), TaskStatus::Done, TaskPriority::High), UserId(1)),
            (task(3, 1, "Lexer", Some("tokens"), TaskStatus::Todo, TaskPriority::Low), UserId(1)),
            (task(4, 2, "parser for someone else", None, TaskStatus::Todo, TaskPriority::Low), UserId(2)),
        ];
        let ids: Vec<i64> = query.apply(rows).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let query = TaskQuery::new(TaskScope::Owner(UserId(1))).search(Some("50%"));
        assert!(query.matches(&task(1, 1, "ship 50% of it", None, TaskStatus::Todo, TaskPriority::Low), UserId(1)));
        assert!(!query.matches(&task(2, 1, "ship 500 of it", None, TaskStatus::Todo, TaskPriority::Low), UserId(1)));
    }

    #[test]
    fn sorts_ascending_with_missing_due_dates_last() {
        let mut a = task(1, 1, "a", None, TaskStatus::Todo, TaskPriority::Low);
        let mut b = task(2, 1, "b", None, TaskStatus::Todo, TaskPriority::Low);
        let c = task(3, 1, "c", None, TaskStatus::Todo, TaskPriority::Low);
        a.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        b.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        let query = TaskQuery::new(TaskScope::Owner(UserId(1))).sort_by(Some("dueDate")).unwrap();
        let ids: Vec<i64> = query
            .apply(vec![(c, UserId(1)), (a, UserId(1)), (b, UserId(1))])
            .iter()
            .map(|t| t.id.0)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn enum_sort_follows_declaration_order() {
        let rows = vec![
            (task(1, 1, "a", None, TaskStatus::Done, TaskPriority::Low), UserId(1)),
            (task(2, 1, "b", None, TaskStatus::Todo, TaskPriority::High), UserId(1)),
            (task(3, 1, "c", None, TaskStatus::InProgress, TaskPriority::Medium), UserId(1)),
        ];
        let query = TaskQuery::new(TaskScope::Owner(UserId(1))).sort_by(Some("status")).unwrap();
        let ids: Vec<i64> = query.apply(rows).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
