use crate::database::models::Task;
use crate::types::UserId;

use super::types::{SqlParam, TaskCondition, TaskScope};

/// Renders task conditions to a PostgreSQL WHERE clause and evaluates the
/// same conditions against in-memory rows.
pub struct FilterWhere {
    param_values: Vec<SqlParam>,
}

impl FilterWhere {
    fn new() -> Self {
        Self { param_values: vec![] }
    }

    pub fn generate(conditions: &[TaskCondition]) -> (String, Vec<SqlParam>) {
        let mut filter_where = Self::new();
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|condition| filter_where.build_sql_condition(condition))
            .collect();
        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        (where_clause, filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &TaskCondition) -> String {
        match condition {
            TaskCondition::Scope(TaskScope::Project(project_id)) => {
                format!("\"project_id\" = {}", self.param(SqlParam::Id(project_id.0)))
            }
            TaskCondition::Scope(TaskScope::Owner(user_id)) => format!(
                "\"project_id\" IN (SELECT \"id\" FROM \"projects\" WHERE \"user_id\" = {})",
                self.param(SqlParam::Id(user_id.0))
            ),
            TaskCondition::Status(status) => format!("\"status\" = {}", self.param(SqlParam::Status(*status))),
            TaskCondition::Priority(priority) => {
                format!("\"priority\" = {}", self.param(SqlParam::Priority(*priority)))
            }
            TaskCondition::Search(text) => {
                let p = self.param(SqlParam::Text(like_pattern(text)));
                format!(r#"("title" ILIKE {p} ESCAPE '\' OR "description" ILIKE {p} ESCAPE '\')"#)
            }
        }
    }

    fn param(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }

    /// `owner` is the user owning the task's project. A `Search` needle must
    /// already be folded with `fold_case`.
    pub fn matches(condition: &TaskCondition, task: &Task, owner: UserId) -> bool {
        match condition {
            TaskCondition::Scope(TaskScope::Project(project_id)) => task.project_id == *project_id,
            TaskCondition::Scope(TaskScope::Owner(user_id)) => owner == *user_id,
            TaskCondition::Status(status) => task.status == *status,
            TaskCondition::Priority(priority) => task.priority == *priority,
            TaskCondition::Search(needle) => {
                fold_case(&task.title).contains(needle.as_str())
                    || task
                        .description
                        .as_deref()
                        .is_some_and(|d| fold_case(d).contains(needle.as_str()))
            }
        }
    }
}

/// Lowercases one character at a time with the simple (single character)
/// mapping, the way `ILIKE` folds. `str::to_lowercase` is context sensitive
/// (final sigma) and can expand a character (`İ`), so it is not used here.
pub fn fold_case(text: &str) -> String {
    text.chars().map(|c| c.to_lowercase().next().unwrap_or(c)).collect()
}

/// Wrap search text as `%text%` with LIKE metacharacters escaped
fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
