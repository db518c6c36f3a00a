use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Store;
use crate::services::{AuthService, ProjectService, TaskService};

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub auth: AuthService,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            auth: AuthService::new(store.clone(), config.security.clone()),
            projects: ProjectService::new(store.clone()),
            tasks: TaskService::new(store.clone(), config.query.clone()),
            config: Arc::new(config),
            store,
        }
    }
}
