//! CLI command definitions and dispatch.

pub mod admin;
pub mod auth;
pub mod navigate;
pub mod profile;
pub mod student;
pub mod teacher;

use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use campus_auth::{AccessGuard, AccessOutcome, FileSessionStore, RedirectReason, SessionManager};
use campus_client::{ApiUserResolver, HttpPortalApi, PortalApi};
use campus_core::config::AppConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_service::{GradeAggregator, PageContext};

use crate::output::OutputFormat;
use navigate::ConsoleNavigator;

/// Campus Portal: student, teacher and admin portal client
#[derive(Debug, Parser)]
#[command(name = "portal", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to $CAMPUS_CONFIG or config/default.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(auth::CredentialArgs),
    /// Create an account and sign in
    Register(auth::CredentialArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Navigate to a page, applying the access rules
    Open {
        /// Page path, e.g. /student
        path: String,
    },
    /// List the classes you are enrolled in
    Classes,
    /// Show your grades for a class
    Grades {
        /// Class id
        class_id: i64,
    },
    /// Edit your profile
    Profile(profile::ProfileArgs),
    /// Teacher pages
    Teacher(teacher::TeacherArgs),
    /// Admin pages
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let portal = Portal::from_config(config)?;
        let format = self.format;
        match &self.command {
            Commands::Login(args) => auth::login(&portal, args).await,
            Commands::Register(args) => auth::register(&portal, args).await,
            Commands::Logout => auth::logout(&portal).await,
            Commands::Whoami => auth::whoami(&portal, format).await,
            Commands::Open { path } => navigate::open(&portal, path).await,
            Commands::Classes => student::classes(&portal, format).await,
            Commands::Grades { class_id } => student::grades(&portal, *class_id, format).await,
            Commands::Profile(args) => profile::execute(&portal, args, format).await,
            Commands::Teacher(args) => teacher::execute(&portal, args, format).await,
            Commands::Admin(args) => admin::execute(&portal, args).await,
        }
    }
}

/// Wiring shared by every command: backend client, session and guard.
#[derive(Debug, Clone)]
pub struct Portal {
    /// Backend client.
    pub api: Arc<dyn PortalApi>,
    /// Route guard with the stored session.
    pub guard: AccessGuard,
    /// Grade weights from `[grading]`.
    pub aggregator: GradeAggregator,
}

impl Portal {
    /// Builds the client, file session store and guard from configuration.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let api: Arc<dyn PortalApi> = Arc::new(HttpPortalApi::new(&config.api)?);
        let store = Arc::new(FileSessionStore::from_config(&config.session));
        let guard = AccessGuard::new(SessionManager::new(store));
        Ok(Self {
            api,
            guard,
            aggregator: GradeAggregator::from_config(&config.grading),
        })
    }

    /// Stored session.
    pub fn sessions(&self) -> &SessionManager {
        self.guard.sessions()
    }

    /// Navigates to `path` and returns the page context when access is
    /// granted. A redirect becomes an error naming the target page.
    ///
    /// Ctrl-C cancels the navigation and every request made for the page,
    /// until the returned page is dropped.
    pub async fn open_page(&self, path: &str) -> AppResult<Page> {
        let cancel = CancellationToken::new();
        let interrupt = InterruptWatch::spawn(cancel.clone(), tokio::signal::ctrl_c());

        let resolver = ApiUserResolver::new(self.api.as_ref());
        let outcome = self
            .guard
            .enforce_access(path, &resolver, &ConsoleNavigator, &cancel)
            .await?;

        match outcome {
            AccessOutcome::Allowed { path, user } => {
                let token = self
                    .sessions()
                    .token()
                    .await?
                    .ok_or_else(|| AppError::authentication("Not signed in; run `portal login`"))?;
                let user = match user {
                    Some(user) => user,
                    None => self.resolve_current(&token, &cancel).await?,
                };
                Ok(Page {
                    ctx: PageContext::with_cancel(path, token, user, cancel),
                    _interrupt: interrupt,
                })
            }
            AccessOutcome::Redirected { from, to, reason } => Err(redirect_error(&from, to, &reason)),
        }
    }

    async fn resolve_current(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> AppResult<campus_entity::user::User> {
        let user = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::cancelled("Interrupted")),
            user = self.api.me(token) => user,
        };
        match user {
            Ok(user) => {
                self.sessions().remember_user(&user).await?;
                Ok(user)
            }
            Err(e) => {
                if e.is_auth_failure() {
                    self.sessions().clear("token rejected").await?;
                }
                Err(e)
            }
        }
    }
}

/// A page opened by [`Portal::open_page`].
///
/// Dereferences to its [`PageContext`]. Dropping it stops listening for
/// Ctrl-C.
#[derive(Debug)]
pub struct Page {
    ctx: PageContext,
    _interrupt: InterruptWatch,
}

impl Deref for Page {
    type Target = PageContext;

    fn deref(&self) -> &PageContext {
        &self.ctx
    }
}

impl DerefMut for Page {
    fn deref_mut(&mut self) -> &mut PageContext {
        &mut self.ctx
    }
}

/// Cancels a token when `signal` fires. The listener task is aborted on drop.
#[derive(Debug)]
struct InterruptWatch {
    task: JoinHandle<()>,
}

impl InterruptWatch {
    fn spawn<F>(cancel: CancellationToken, signal: F) -> Self
    where
        F: Future<Output = std::io::Result<()>> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            if signal.await.is_ok() {
                cancel.cancel();
            }
        });
        Self { task }
    }
}

impl Drop for InterruptWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn redirect_error(from: &str, to: &str, reason: &RedirectReason) -> AppError {
    match reason {
        RedirectReason::NoSession => {
            AppError::authentication(format!("{from} requires sign-in; run `portal login`"))
        }
        RedirectReason::SessionInvalid => AppError::authentication(format!(
            "Session expired; redirected to {to}. Run `portal login` again"
        )),
        RedirectReason::Forbidden(role) => AppError::authorization(format!(
            "{from} is not available to role '{}' (redirected to {to})",
            role.as_str()
        )),
    }
}
