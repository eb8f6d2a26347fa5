//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod serve;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use ssahub_auth::PasswordHasher;
use ssahub_core::config::AppConfig;
use ssahub_core::error::AppError;
use ssahub_database::Stores;
use ssahub_service::UserService;

/// SSA Hub: content backend for the student association site
#[derive(Debug, Parser)]
#[command(name = "ssahub-admin", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (reads `config/{env}.toml`)
    #[arg(short, long, env = "SSAHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account management
    Admin(admin::AdminArgs),
    /// Back-office account management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Admin(args) => admin::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
        }
    }
}

/// Account service over the configured record store.
pub async fn user_service(config: &AppConfig) -> Result<UserService, AppError> {
    if config.database.is_memory() {
        return Err(AppError::configuration(
            "database.url points at the in-memory store; accounts would not persist",
        ));
    }
    let stores = Stores::connect(&config.database).await?;
    Ok(UserService::new(
        stores.users.clone(),
        Arc::new(PasswordHasher::new()),
        &config.auth,
    ))
}

/// Use the flag value or prompt for a confirmed password.
pub fn password_or_prompt(password: &Option<String>, prompt: &str) -> Result<String, AppError> {
    match password {
        Some(p) => Ok(p.clone()),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}
