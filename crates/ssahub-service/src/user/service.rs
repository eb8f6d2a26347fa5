//! Account administration used by the operator CLI.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ssahub_auth::{PasswordHasher, PasswordValidator};
use ssahub_core::config::auth::AuthConfig;
use ssahub_core::error::AppError;
use ssahub_database::UserStore;
use ssahub_entity::user::{NewUser, User, UserPatch, UserRole};

/// Request to create a back-office account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Creates and lists accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher,
            validator: PasswordValidator::new(config),
        }
    }

    pub async fn create(&self, req: CreateUserRequest) -> Result<User, AppError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AppError::missing_field("username"));
        }
        let email = req.email.trim();
        if !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        self.validator.validate(&req.password)?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: self.hasher.hash_password(&req.password)?,
                role: req.role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = ?user.role, "User created");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    /// Replace the password after running the strength rules.
    pub async fn reset_password(&self, id: Uuid, password: &str) -> Result<User, AppError> {
        self.validator.validate(password)?;
        let user = self
            .users
            .update(
                id,
                UserPatch {
                    password_hash: Some(self.hasher.hash_password(password)?),
                    ..Default::default()
                },
            )
            .await?;
        info!(user_id = %id, "Password reset");
        Ok(user)
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<User, AppError> {
        self.users
            .update(
                id,
                UserPatch {
                    is_active: Some(active),
                    ..Default::default()
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssahub_core::ErrorKind;
    use ssahub_database::Stores;

    fn service() -> UserService {
        UserService::new(
            Stores::memory().users,
            Arc::new(PasswordHasher::new()),
            &AuthConfig::default(),
        )
    }

    fn request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            email: email.into(),
            password: "minutes2026".into(),
            role: UserRole::Editor,
        }
    }

    #[tokio::test]
    async fn test_password_is_hashed() {
        let user = service().create(request("ed", "ed@ssa.example")).await.unwrap();
        assert_ne!(user.password_hash, "minutes2026");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let svc = service();
        svc.create(request("ed", "ed@ssa.example")).await.unwrap();
        let err = svc.create(request("ed2", "ED@ssa.example")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let err = service()
            .create(CreateUserRequest {
                password: "short".into(),
                ..request("ed", "ed@ssa.example")
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_reset_password_by_username() {
        let svc = service();
        let hasher = PasswordHasher::new();
        svc.create(request("ed", "ed@ssa.example")).await.unwrap();

        let user = svc.find_by_username("ED").await.unwrap();
        let updated = svc.reset_password(user.id, "rotated2027").await.unwrap();
        assert!(hasher.verify_password("rotated2027", &updated.password_hash).unwrap());

        let err = svc.find_by_username("nobody").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
