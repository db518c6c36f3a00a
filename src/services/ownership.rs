use std::sync::Arc;

use crate::database::models::{Project, User};
use crate::database::Store;
use crate::filter::TaskScope;
use crate::services::error::{ServiceError, ServiceResult};
use crate::types::ProjectId;

/// A project the caller has been proven to own
#[derive(Debug, Clone)]
pub struct AuthorizedProject {
    project: Project,
}

impl AuthorizedProject {
    pub fn id(&self) -> ProjectId {
        self.project.id
    }

    /// Task scope limited to this project
    pub fn scope(&self) -> TaskScope {
        TaskScope::Project(self.project.id)
    }

    pub fn into_project(self) -> Project {
        self.project
    }
}

/// Every project-scoped operation goes through `authorize_project`.
///
/// The lookup is keyed by id and owner together, so a project that does not
/// exist and one owned by someone else both come back as the same
/// `NotFound("Project not found")`.
#[derive(Clone)]
pub struct OwnershipGuard {
    store: Arc<dyn Store>,
}

impl OwnershipGuard {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn authorize_project(&self, user: &User, project_id: ProjectId) -> ServiceResult<AuthorizedProject> {
        let project = self
            .store
            .find_project(project_id, user.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Project not found"))?;
        Ok(AuthorizedProject { project })
    }

    /// Scope covering every project the user owns
    pub fn owner_scope(user: &User) -> TaskScope {
        TaskScope::Owner(user.id)
    }
}
