//! Command handlers

pub mod metadata;
pub mod record;
pub mod send;

use anyhow::{Context, Result};
use colored::*;
use log::info;

use super::app::GlobalArgs;
use crate::api::{RecordOutcome, Sfdc};
use crate::auth::Credentials;
use crate::config::Config;

/// Load config and credentials, then log in once
pub async fn connect(global: &GlobalArgs) -> Result<Sfdc> {
    let mut config = match &global.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env_overrides();
            config
        }
        None => Config::load()?,
    };
    if let Some(version) = &global.api_version {
        config.api_version = version.clone();
    }

    let password = if global.prompt_password {
        Some(rpassword::prompt_password("Password: ").context("Failed to read password")?)
    } else {
        None
    };
    let credentials = match (&global.env_file, password) {
        (Some(path), Some(password)) => Credentials::from_env_file_with_password(path, password)?,
        (Some(path), None) => Credentials::from_env_file(path)?,
        (None, Some(password)) => Credentials::from_env_with_password(password)?,
        (None, None) => Credentials::from_env()?,
    };

    info!("Connecting with API version {}", config.api_version);
    println!("🔐 {}", format!("Logging in as {}...", credentials.username).dimmed());
    let sfdc = Sfdc::connect(&credentials, &config).await?;
    println!("🌍 Instance: {}", sfdc.session().base_url().bright_green());

    Ok(sfdc)
}

/// Print an outcome; returns whether it succeeded
pub(crate) fn report<T: std::fmt::Display>(outcome: RecordOutcome<T>) -> bool {
    match outcome {
        RecordOutcome::Success(value) => {
            println!("{}", value);
            true
        }
        RecordOutcome::Failed { status, body } => {
            eprintln!("{} {}", "❌ Request failed with status".red(), status.to_string().red().bold());
            if !body.is_empty() {
                eprintln!("{}", body);
            }
            false
        }
    }
}

pub(crate) fn parse_json(data: &str) -> Result<serde_json::Value> {
    serde_json::from_str(data).with_context(|| format!("Invalid JSON: {}", data))
}
