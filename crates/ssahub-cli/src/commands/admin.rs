//! Admin account commands.

use clap::{Args, Subcommand};

use ssahub_core::config::AppConfig;
use ssahub_core::error::AppError;
use ssahub_entity::user::UserRole;
use ssahub_service::user::CreateUserRequest;

use crate::output::{self, OutputFormat};
use super::user::UserRow;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create a new admin account
    Create {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email used to sign in
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List admin accounts
    List,
    /// Reset an account's password
    ResetPassword {
        /// Username of the account
        #[arg(short, long)]
        username: String,
        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn input_or_prompt(value: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match value {
        Some(v) => Ok(v.clone()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = super::user_service(config).await?;

    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
        } => {
            let username = input_or_prompt(username, "Admin username")?;
            let email = input_or_prompt(email, "Admin email")?;
            let password = super::password_or_prompt(password, "Admin password")?;

            let user = users
                .create(CreateUserRequest {
                    username,
                    email,
                    password,
                    role: UserRole::Admin,
                })
                .await?;

            output::print_success(&format!(
                "Admin '{}' created (id: {})",
                user.username, user.id
            ));
        }
        AdminCommand::List => {
            let rows: Vec<UserRow> = users
                .list()
                .await?
                .iter()
                .filter(|u| u.role == UserRole::Admin)
                .map(UserRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        AdminCommand::ResetPassword { username, password } => {
            let user = users.find_by_username(username).await?;
            let password = super::password_or_prompt(password, "New password")?;
            users.reset_password(user.id, &password).await?;
            output::print_success(&format!("Password reset for '{}'", user.username));
        }
    }

    Ok(())
}
