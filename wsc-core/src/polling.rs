//! Fetch bookkeeping for the workspaces page.
//!
//! Every fetch gets a [`FetchTicket`] carrying a sequence number. When fetches
//! overlap, a completion older than the newest one already applied is dropped,
//! so a slow stale response can never overwrite fresher data.

use crate::error::ApiError;
use crate::navigation::{routes, Navigator};
use crate::workspace::{snapshot_from, Workspace, WorkspaceSnapshot};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot was replaced.
    Applied,
    /// The error was recorded.
    Failed,
    /// The session was rejected; the error was recorded and the login route
    /// requested.
    SignedOut,
    /// A newer fetch had already completed; the result was dropped.
    Stale,
    /// The page was gone by the time the fetch completed.
    Unmounted,
}

#[derive(Debug, Default)]
pub struct PollingController {
    toggle: bool,
    issued: u64,
    applied: u64,
    snapshot: Arc<WorkspaceSnapshot>,
    error: Option<ApiError>,
}

impl PollingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the manual toggle and issues the ticket for exactly one fetch.
    pub fn refresh(&mut self) -> FetchTicket {
        self.toggle = !self.toggle;
        self.issue()
    }

    /// Issues a ticket for a scheduled fetch without touching the toggle.
    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        debug!("Issued fetch #{}", self.issued);
        FetchTicket { seq: self.issued }
    }

    /// Records the result of the fetch identified by `ticket`.
    ///
    /// Success replaces the snapshot and clears any recorded error. Failure is
    /// recorded for display; an authentication failure also sends the user to
    /// the login route.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Workspace>, ApiError>,
        navigator: &dyn Navigator,
    ) -> FetchOutcome {
        if ticket.seq <= self.applied {
            debug!(
                "Dropping stale fetch #{} (already applied #{})",
                ticket.seq, self.applied
            );
            return FetchOutcome::Stale;
        }
        self.applied = ticket.seq;

        match result {
            Ok(workspaces) => {
                debug!("Fetch #{} returned {} workspaces", ticket.seq, workspaces.len());
                self.snapshot = Arc::new(snapshot_from(workspaces));
                self.error = None;
                FetchOutcome::Applied
            }
            Err(err) if err.is_auth_failure() => {
                info!("Session rejected, redirecting to login");
                navigator.go_to_route(routes::LOGIN);
                self.error = Some(err);
                FetchOutcome::SignedOut
            }
            Err(err) => {
                warn!("Failed to list workspaces: {}", err);
                self.error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    pub fn snapshot(&self) -> &Arc<WorkspaceSnapshot> {
        &self.snapshot
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn toggle(&self) -> bool {
        self.toggle
    }

    /// True while a newer ticket than the last applied one is outstanding.
    pub fn is_pending(&self) -> bool {
        self.issued > self.applied
    }
}
