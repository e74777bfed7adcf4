//! Profile editing.

use chrono::NaiveDate;
use clap::Args;

use campus_core::result::AppResult;
use campus_entity::user::UpdateProfile;
use campus_service::ProfilePage;

use super::Portal;
use crate::output::{self, OutputFormat};

/// Arguments for `portal profile`
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// New display name
    #[arg(long)]
    pub full_name: Option<String>,
    /// New email address
    #[arg(long)]
    pub email: Option<String>,
    /// New birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birthdate: Option<NaiveDate>,
    /// New department (teachers)
    #[arg(long)]
    pub department: Option<String>,
    /// New title (teachers)
    #[arg(long)]
    pub title: Option<String>,
}

/// Execute `portal profile`
pub async fn execute(portal: &Portal, args: &ProfileArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = portal.open_page("/").await?;
    let update = UpdateProfile {
        full_name: args.full_name.clone(),
        email: args.email.clone(),
        birthdate: args.birthdate,
        department: args.department.clone(),
        title: args.title.clone(),
    };

    let user = ProfilePage::new(portal.api.clone()).update(&ctx, &update).await?;
    portal.sessions().remember_user(&user).await?;

    match format {
        OutputFormat::Json => output::print_json(&user),
        OutputFormat::Table => {
            output::print_success("Profile updated");
            output::print_kv("Name", user.display_name());
            if let Some(email) = &user.email {
                output::print_kv("Email", email);
            }
        }
    }
    Ok(())
}
