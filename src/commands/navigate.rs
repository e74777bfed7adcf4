//! `portal open <path>`: one guarded navigation.

use tokio_util::sync::CancellationToken;
use tracing::info;

use campus_auth::{AccessOutcome, Navigator};
use campus_client::ApiUserResolver;
use campus_core::result::AppResult;

use super::Portal;
use crate::output;

/// Reports redirects on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, path: &str) {
        info!(to = path, "Redirecting");
        output::print_warning(&format!("Redirected to {path}"));
    }
}

/// Runs the guard for `path` and reports the outcome.
pub async fn open(portal: &Portal, path: &str) -> AppResult<()> {
    let resolver = ApiUserResolver::new(portal.api.as_ref());
    let outcome = portal
        .guard
        .enforce_access(path, &resolver, &ConsoleNavigator, &CancellationToken::new())
        .await?;

    match outcome {
        AccessOutcome::Allowed { path, user: Some(user) } => output::print_success(&format!(
            "Opened {path} as {} ({})",
            user.display_name(),
            user.role
        )),
        AccessOutcome::Allowed { path, user: None } => {
            output::print_success(&format!("Opened {path}"))
        }
        AccessOutcome::Redirected { from, reason, .. } => {
            output::print_kv("Requested", &from);
            output::print_kv("Reason", &reason.to_string());
        }
    }
    Ok(())
}
