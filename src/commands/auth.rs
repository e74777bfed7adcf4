//! Sign-in, registration and session commands.

use clap::Args;
use serde::Serialize;

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_entity::user::User;

use super::Portal;
use crate::output::{self, OutputFormat};

/// Arguments for `login` and `register`
#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct WhoamiView<'a> {
    username: &'a str,
    full_name: &'a str,
    role: &'a str,
    email: Option<&'a str>,
    student_code: Option<&'a str>,
    landing_page: &'static str,
}

/// `portal login`
pub async fn login(portal: &Portal, args: &CredentialArgs) -> AppResult<()> {
    let username = prompt_username(args)?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let token = portal.api.login(&username, &password).await?;
    sign_in(portal, &token).await
}

/// `portal register`
pub async fn register(portal: &Portal, args: &CredentialArgs) -> AppResult<()> {
    let username = prompt_username(args)?;
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    let token = portal.api.register(&username, &password).await?;
    output::print_success(&format!("Account '{username}' created"));
    sign_in(portal, &token).await
}

/// `portal logout`
pub async fn logout(portal: &Portal) -> AppResult<()> {
    portal.sessions().clear("logout").await?;
    output::print_success("Signed out");
    Ok(())
}

/// `portal whoami`
pub async fn whoami(portal: &Portal, format: OutputFormat) -> AppResult<()> {
    let ctx = portal.open_page("/").await?;
    let user = ctx.user();
    let view = WhoamiView {
        username: &user.username,
        full_name: user.display_name(),
        role: user.role.as_str(),
        email: user.email.as_deref(),
        student_code: user
            .student_profile
            .as_ref()
            .and_then(|p| p.student_code.as_deref()),
        landing_page: portal.guard.enforcer().landing_path_for(&user.role),
    };

    match format {
        OutputFormat::Json => output::print_json(&view),
        OutputFormat::Table => {
            output::print_kv("Username", view.username);
            output::print_kv("Name", view.full_name);
            output::print_kv("Role", view.role);
            if let Some(email) = view.email {
                output::print_kv("Email", email);
            }
            if let Some(code) = view.student_code {
                output::print_kv("Student code", code);
            }
            output::print_kv("Home page", view.landing_page);
        }
    }
    Ok(())
}

async fn sign_in(portal: &Portal, token: &str) -> AppResult<()> {
    portal.sessions().start(token).await?;
    let user: User = match portal.api.me(token).await {
        Ok(user) => user,
        Err(e) => {
            portal.sessions().clear("profile fetch failed after sign-in").await?;
            return Err(e);
        }
    };
    portal.sessions().remember_user(&user).await?;

    let landing = portal.guard.enforcer().landing_path_for(&user.role);
    output::print_success(&format!(
        "Signed in as {} ({})",
        user.display_name(),
        user.role
    ));
    output::print_kv("Home page", landing);
    Ok(())
}

fn prompt_username(args: &CredentialArgs) -> AppResult<String> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::validation("Username must not be empty"));
    }
    Ok(username)
}
