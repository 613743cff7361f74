//! Sign-in, sign-out and account commands.

use clap::Args;
use serde::Serialize;

use cloudbox_client::{AuthClient, Session};
use cloudbox_core::config::ClientConfig;
use cloudbox_core::error::AppError;
use cloudbox_entity::user::{Credentials, PasswordChange, ProfileUpdate, Registration};
use cloudbox_explorer::format::{calculate_percentage, format_datetime, format_file_size};
use cloudbox_explorer::validation::{is_valid_email, validate_password, validate_password_match};

use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account e-mail (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (prompted if omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account e-mail (prompted if omitted)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Display name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Password (prompted if omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `profile`
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// New display name (prompted if omitted)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for `passwd`
#[derive(Debug, Args)]
pub struct PasswdArgs {
    /// Current password (prompted if omitted)
    #[arg(long)]
    pub current: Option<String>,
    /// New password (prompted with confirmation if omitted)
    #[arg(long = "new")]
    pub new_password: Option<String>,
    /// Confirmation of the new password, required with --new
    #[arg(long, requires = "new_password")]
    pub confirm: Option<String>,
}

/// Quota summary printed by `whoami --format json`.
#[derive(Debug, Serialize)]
struct AccountSummary<'a> {
    email: &'a str,
    name: &'a str,
    storage_used: u64,
    storage_quota: u64,
    usage_percent: f64,
}

fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

/// Check a new password against the policy and its confirmation.
pub fn check_new_password(password: &str, confirmation: &str) -> Result<(), AppError> {
    validate_password(password)?;
    validate_password_match(password, confirmation)?;
    Ok(())
}

fn prompt_email(email: &Option<String>) -> Result<String, AppError> {
    match email {
        Some(e) => Ok(e.clone()),
        None => dialoguer::Input::<String>::new()
            .with_prompt("E-mail")
            .validate_with(|input: &String| {
                if is_valid_email(input) {
                    Ok(())
                } else {
                    Err("Invalid e-mail address")
                }
            })
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e))),
    }
}

/// Sign in and persist the session
pub async fn login(args: &LoginArgs, config: &ClientConfig) -> Result<(), AppError> {
    let email = prompt_email(&args.email)?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let auth = AuthClient::new(&config.api)?;
    let session = auth.login(&Credentials { email: email.clone(), password }).await?;
    session.save(&config.session.token_file).await?;

    output::print_success(&format!("Signed in as {}", email));
    Ok(())
}

/// Create an account
pub async fn register(
    args: &RegisterArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let email = prompt_email(&args.email)?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };
    validate_password(&password)?;

    let auth = AuthClient::new(&config.api)?;
    let profile = auth
        .register(&Registration {
            email,
            password,
            full_name: args.name.clone(),
        })
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&profile),
        OutputFormat::Table => output::print_success(&format!(
            "Account created for {} (id: {}). Run `cloudbox login` to sign in.",
            profile.email, profile.id
        )),
    }
    Ok(())
}

/// Sign out. The local session is removed even when the server is unreachable.
pub async fn logout(config: &ClientConfig) -> Result<(), AppError> {
    let Some(session) = Session::load(&config.session.token_file).await? else {
        output::print_warning("Not signed in");
        return Ok(());
    };

    AuthClient::new(&config.api)?.logout(&session).await;
    Session::clear(&config.session.token_file).await?;

    output::print_success("Signed out");
    Ok(())
}

/// Show the signed-in account and its storage usage
pub async fn whoami(config: &ClientConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::load_session(config).await?;
    let profile = AuthClient::new(&config.api)?.profile(&session).await?;
    let decimals = config.explorer.size_decimals;
    let percent = calculate_percentage(profile.storage_used, profile.storage_quota, 1);

    match format {
        OutputFormat::Json => output::print_json(&AccountSummary {
            email: &profile.email,
            name: profile.display_name(),
            storage_used: profile.storage_used,
            storage_quota: profile.storage_quota,
            usage_percent: percent,
        }),
        OutputFormat::Table => {
            output::print_kv("Name", profile.display_name());
            output::print_kv("E-mail", &profile.email);
            output::print_kv(
                "Storage",
                &format!(
                    "{} / {} ({}%)",
                    format_file_size(profile.storage_used, decimals),
                    format_file_size(profile.storage_quota, decimals),
                    percent
                ),
            );
            output::print_kv(
                "Available",
                &format_file_size(profile.storage_remaining(), decimals),
            );
            output::print_kv("Member since", &format_datetime(profile.created_at));
            output::print_kv("Server", &session.base_url);
        }
    }
    Ok(())
}

/// Change the display name
pub async fn profile(
    args: &ProfileArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::load_session(config).await?;
    let full_name = match &args.name {
        Some(n) => n.trim().to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Display name")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?
            .trim()
            .to_string(),
    };

    let profile = AuthClient::new(&config.api)?
        .update_profile(&session, &ProfileUpdate { full_name })
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&profile),
        OutputFormat::Table => {
            output::print_success(&format!("Display name set to '{}'", profile.display_name()))
        }
    }
    Ok(())
}

/// Change the account password
pub async fn passwd(args: &PasswdArgs, config: &ClientConfig) -> Result<(), AppError> {
    let session = super::load_session(config).await?;
    let current_password = match &args.current {
        Some(p) => p.clone(),
        None => prompt_password("Current password")?,
    };
    let (new_password, confirmation) = match &args.new_password {
        Some(p) => (p.clone(), args.confirm.clone().unwrap_or_default()),
        None => (
            prompt_password("New password")?,
            prompt_password("Confirm new password")?,
        ),
    };
    check_new_password(&new_password, &confirmation)?;

    AuthClient::new(&config.api)?
        .change_password(
            &session,
            &PasswordChange {
                current_password,
                new_password,
            },
        )
        .await?;

    output::print_success("Password changed");
    Ok(())
}
