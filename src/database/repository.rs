use async_trait::async_trait;
use sqlx::{self, postgres::PgArguments, PgPool, Postgres};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewUser, Project, ProjectDraft, Task, TaskDraft, User};
use crate::database::store::Store;
use crate::filter::{SqlParam, TaskQuery};
use crate::types::{ProjectId, TaskId, UserId};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)
    }

    async fn find_project(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>, DatabaseError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn list_projects(&self, owner: UserId) -> Result<Vec<Project>, DatabaseError> {
        let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE user_id = $1 ORDER BY id ASC")
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn insert_project(&self, owner: UserId, draft: ProjectDraft) -> Result<Project, DatabaseError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (user_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        Ok(project)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        owner: UserId,
        draft: ProjectDraft,
    ) -> Result<Option<Project>, DatabaseError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $1, description = $2, updated_at = now()
            WHERE id = $3 AND user_id = $4
            RETURNING *
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        Ok(project)
    }

    async fn delete_project(&self, id: ProjectId, owner: UserId) -> Result<bool, DatabaseError> {
        // tasks go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_task(&self, id: TaskId, project: ProjectId) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn query_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, DatabaseError> {
        let sql_result = query.to_sql();
        tracing::debug!(sql = %sql_result.query, params = ?sql_result.params, "query_tasks");

        let mut q = sqlx::query_as::<_, Task>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn insert_task(&self, project: ProjectId, draft: TaskDraft) -> Result<Task, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, priority, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(project)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.status)
        .bind(draft.priority)
        .bind(draft.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, project: ProjectId, draft: TaskDraft) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, status = $3, priority = $4, due_date = $5, updated_at = now()
            WHERE id = $6 AND project_id = $7
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.status)
        .bind(draft.priority)
        .bind(draft.due_date)
        .bind(id)
        .bind(project)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId, project: ProjectId) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments> {
    match v {
        SqlParam::Id(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Status(status) => q.bind(*status),
        SqlParam::Priority(priority) => q.bind(*priority),
    }
}
