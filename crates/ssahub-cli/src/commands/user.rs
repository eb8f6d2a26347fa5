//! Back-office account commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use ssahub_core::config::AppConfig;
use ssahub_core::error::AppError;
use ssahub_entity::user::{User, UserRole};
use ssahub_service::user::CreateUserRequest;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all accounts
    List {
        /// Only show accounts with this role
        #[arg(short, long)]
        role: Option<UserRole>,
    },
    /// Create an account
    Create {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
        #[arg(short, long, default_value = "editor")]
        role: UserRole,
    },
    /// Allow an account to sign in again
    Enable { username: String },
    /// Block an account from signing in
    Disable { username: String },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    id: String,
    username: String,
    email: String,
    role: String,
    active: bool,
    last_login: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            active: u.is_active,
            last_login: u
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = super::user_service(config).await?;

    match &args.command {
        UserCommand::List { role } => {
            let rows: Vec<UserRow> = users
                .list()
                .await?
                .iter()
                .filter(|u| role.is_none_or(|r| u.role == r))
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create {
            username,
            email,
            password,
            role,
        } => {
            let password = super::password_or_prompt(password, "Password")?;
            let user = users
                .create(CreateUserRequest {
                    username: username.clone(),
                    email: email.clone(),
                    password,
                    role: *role,
                })
                .await?;
            output::print_success(&format!(
                "User '{}' created as {} (id: {})",
                user.username, user.role, user.id
            ));
        }
        UserCommand::Enable { username } => {
            let user = users.find_by_username(username).await?;
            users.set_active(user.id, true).await?;
            output::print_success(&format!("User '{username}' enabled"));
        }
        UserCommand::Disable { username } => {
            let user = users.find_by_username(username).await?;
            users.set_active(user.id, false).await?;
            output::print_success(&format!("User '{username}' disabled"));
        }
    }

    Ok(())
}
