// Command handlers for workspace operations

use crate::cli::{Args, Command};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use wsc_core::navigation::routes;
use wsc_core::notifications::{self, SharedToasts, ToastLevel};
use wsc_core::{
    ActionDispatcher, ConsoleConfig, HttpWorkspaceApi, RecordingNavigator, WorkspacesPage,
};

pub mod create;
pub mod delete;
pub mod list;
pub mod watch;

/// Shared collaborators for a single command run.
pub struct Console {
    pub config: ConsoleConfig,
    pub api: Arc<HttpWorkspaceApi>,
    pub navigator: Arc<RecordingNavigator>,
    pub toasts: SharedToasts,
}

impl Console {
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = ConsoleConfig::load(args.config.as_deref())
            .context("Failed to load console configuration")?;
        if let Some(url) = &args.api_url {
            config.api_url = url.clone();
            config.validate()?;
        }
        debug!("Using API endpoint {}", config.endpoint());

        let api = HttpWorkspaceApi::new(&config).context("Failed to create API client")?;
        let toasts = notifications::shared(config.toast_timeout());

        Ok(Self {
            config,
            api: Arc::new(api),
            navigator: Arc::new(RecordingNavigator::new()),
            toasts,
        })
    }

    pub fn page(&self) -> WorkspacesPage {
        WorkspacesPage::new(self.navigator.clone())
    }

    pub fn dispatcher(&self) -> ActionDispatcher {
        ActionDispatcher::new(self.api.clone(), self.navigator.clone())
            .with_toasts(self.toasts.clone())
    }

    /// Fails once anything has redirected the console to the login route.
    pub fn ensure_authorized(&self) -> Result<()> {
        if self.navigator.has_visited(routes::LOGIN) {
            bail!("Not authorized: set WSC_API_TOKEN or api_token to a valid session token");
        }
        Ok(())
    }

    pub fn print_toasts(&self) {
        for (level, message) in notifications::active_messages(&self.toasts, Instant::now()) {
            match level {
                ToastLevel::Danger => eprintln!("{}", message.red()),
                ToastLevel::Success => eprintln!("{}", message.green()),
            }
        }
    }
}

/// Main command dispatcher
pub async fn execute_command(args: Args) -> Result<()> {
    let console = Console::from_args(&args)?;

    match args.command {
        Command::List { json } => list::handle_list(&console, json).await,
        Command::Watch { interval } => watch::handle_watch(&console, interval).await,
        Command::Open { id } => list::handle_open(&console, &id).await,
        Command::Delete { ids, rows, all } => {
            delete::handle_delete(&console, ids, rows, all).await
        }
        Command::Create {
            name,
            description,
            wait,
        } => create::handle_create(&console, name, description, wait).await,
    }
}
