use std::sync::Arc;

use crate::database::models::User;
use crate::database::Store;
use crate::services::error::{ServiceError, ServiceResult};

/// Maps the authenticated username to its `User` row.
///
/// Resolution happens on every call; a user deleted between requests is
/// `NotFound` on the next one.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn Store>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, identity: &str) -> ServiceResult<User> {
        self.store
            .find_user_by_username(identity)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }
}
