//! Email/password sign-in.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use ssahub_auth::{JwtEncoder, PasswordHasher};
use ssahub_core::error::AppError;
use ssahub_database::UserStore;
use ssahub_entity::user::{User, UserPatch};

use crate::context::RequestContext;

/// Same message for every credential failure.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Verifies credentials and issues access tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            warn!(email = %email, "Login attempt for unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !user.is_active || !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Rejected login");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let issued = self.encoder.issue(&user)?;
        let user = self
            .users
            .update(
                user.id,
                UserPatch {
                    last_login_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginOutcome {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// The account behind a verified token; inactive accounts are refused.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }
}
