use std::sync::Arc;

use tracing::{info, warn};

use crate::api::format::AuthResponse;
use crate::auth::{self, Claims};
use crate::config::SecurityConfig;
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, Store};
use crate::services::error::{ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Validated registration input
#[derive(Debug, Clone)]
pub struct RegisterDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration, login and token issuance
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    security: SecurityConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    pub async fn register(&self, draft: RegisterDraft) -> ServiceResult<AuthResponse> {
        if self.store.username_exists(&draft.username).await? {
            return Err(ServiceError::already_exists("Username already exists"));
        }
        if self.store.email_exists(&draft.email).await? {
            return Err(ServiceError::already_exists("Email already exists"));
        }

        let cost = self.security.password_hash_cost;
        let password = draft.password;
        let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {}", e)))?;

        let user = self
            .store
            .insert_user(NewUser {
                username: draft.username,
                email: draft.email,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                DatabaseError::Conflict(constraint) if constraint.contains("email") => {
                    ServiceError::already_exists("Email already exists")
                }
                DatabaseError::Conflict(_) => ServiceError::already_exists("Username already exists"),
                other => other.into(),
            })?;

        info!(user = %user.username, "user registered");
        self.issue(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<AuthResponse> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            warn!(user = %username, "login for unknown user");
            return Err(ServiceError::unauthenticated(INVALID_CREDENTIALS));
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || auth::verify_password(&password, &hash))
            .await
            .map_err(|e| ServiceError::Internal(format!("verify task failed: {}", e)))?;

        if !verified {
            warn!(user = %username, "login with wrong password");
            return Err(ServiceError::unauthenticated(INVALID_CREDENTIALS));
        }

        info!(user = %user.username, "user logged in");
        self.issue(user)
    }

    fn issue(&self, user: User) -> ServiceResult<AuthResponse> {
        let claims = Claims::new(&user.username, self.security.jwt_expiry_hours);
        let token = auth::generate_jwt(&claims, &self.security.jwt_secret)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        Ok(AuthResponse {
            token,
            username: user.username,
            email: user.email,
        })
    }
}
