//! Admin pages: role management.

use clap::{Args, Subcommand};

use campus_core::result::AppResult;
use campus_entity::user::UserRole;
use campus_service::AdminConsole;

use super::Portal;
use crate::output;

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
    /// Change a user's role
    SetRole {
        /// Account to change
        username: String,
        /// student, teacher or admin
        #[arg(value_parser = parse_role)]
        role: UserRole,
    },
}

/// Execute admin commands
pub async fn execute(portal: &Portal, args: &AdminArgs) -> AppResult<()> {
    let ctx = portal.open_page("/admin").await?;
    let console = AdminConsole::new(portal.api.clone());

    match &args.command {
        AdminCommand::SetRole { username, role } => {
            console.set_role(&ctx, username, *role).await?;
            output::print_success(&format!("'{username}' is now {role}"));
        }
    }
    Ok(())
}

fn parse_role(s: &str) -> Result<UserRole, String> {
    s.parse::<UserRole>().map_err(|e| e.message)
}
