//! Workspaces console core
//!
//! Everything the workspaces list page needs apart from drawing it: the API
//! client, the row model with selection carried across refreshes, fetch
//! sequencing, row actions and the create flow. The `wsc` binary drives it
//! from the terminal, but nothing here assumes a particular front end.

pub mod actions;
pub mod client;
pub mod config;
pub mod constants;
pub mod create;
pub mod error;
pub mod navigation;
pub mod notifications;
pub mod page;
pub mod poller;
pub mod polling;
pub mod rows;
pub mod selection;
pub mod workspace;

pub use actions::{ActionDispatcher, RowAction};
pub use client::{HttpWorkspaceApi, WorkspaceApi};
pub use config::ConsoleConfig;
pub use create::create_workspace_and_wait;
pub use error::{ApiError, ConsoleError, Result};
pub use navigation::{Navigator, PageRoute, RecordingNavigator};
pub use page::{Toolbar, WorkspacesPage, EMPTY_STATE_MESSAGE};
pub use poller::{fetch_once, run_poller};
pub use polling::{FetchOutcome, FetchTicket, PollingController};
pub use rows::{reconcile, Row, RowCells};
pub use selection::{set_selection, SelectionTarget};
pub use workspace::{
    snapshot_from, DefaultStatusClassifier, NewWorkspace, StatusClassifier, Workspace,
    WorkspaceSnapshot,
};
