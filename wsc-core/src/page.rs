//! The workspaces list page: fetch state, row model and toolbar.

use crate::client::WorkspaceApi;
use crate::error::{ApiError, Result};
use crate::navigation::{Navigator, PageRoute};
use crate::polling::{FetchOutcome, FetchTicket, PollingController};
use crate::rows::{reconcile, Row, COLUMNS};
use crate::selection::{any_selected, set_selection, SelectionTarget};
use crate::workspace::{DefaultStatusClassifier, StatusClassifier, Workspace, WorkspaceSnapshot};
use std::sync::Arc;
use tracing::debug;

pub const EMPTY_STATE_MESSAGE: &str = "Did not find any workspaces.\n\
This could be because no workspaces exist, or because you do not have access to any workspaces.\n\
Please contact an admin to create workspaces for you and/or to get access.";

/// Toolbar state derived from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    pub show_delete_button: bool,
    pub error: Option<String>,
    pub new_workspace_open: bool,
}

pub struct WorkspacesPage {
    polling: PollingController,
    rows: Vec<Row>,
    classifier: Arc<dyn StatusClassifier>,
    navigator: Arc<dyn Navigator>,
    new_workspace_open: bool,
    mounted: bool,
}

impl WorkspacesPage {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            polling: PollingController::new(),
            rows: Vec::new(),
            classifier: Arc::new(DefaultStatusClassifier),
            navigator,
            new_workspace_open: false,
            mounted: true,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn StatusClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Where an address with an optional workspace id should land.
    pub fn route(workspace_id: Option<&str>) -> PageRoute {
        PageRoute::resolve(workspace_id)
    }

    /// Manual refresh: issues the ticket for one fetch.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.polling.refresh()
    }

    /// Scheduled refresh from the poller.
    pub fn begin_poll(&mut self) -> FetchTicket {
        self.polling.issue()
    }

    /// Applies a finished fetch and reconciles the rows when it is accepted.
    pub fn complete_refresh(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<Vec<Workspace>, ApiError>,
    ) -> FetchOutcome {
        if !self.mounted {
            debug!("Discarding fetch #{} after unmount", ticket.seq());
            return FetchOutcome::Unmounted;
        }
        let outcome = self
            .polling
            .complete(ticket, result, self.navigator.as_ref());
        if outcome == FetchOutcome::Applied {
            self.reconcile_rows();
        }
        outcome
    }

    /// Fetches once and applies the result.
    pub async fn refresh(&mut self, api: &dyn WorkspaceApi) -> FetchOutcome {
        let ticket = self.begin_refresh();
        let result = api.list_workspaces().await;
        self.complete_refresh(ticket, result)
    }

    fn reconcile_rows(&mut self) {
        let rows = reconcile(
            self.polling.snapshot(),
            Some(&self.rows),
            self.classifier.as_ref(),
        );
        debug!("Reconciled {} rows", rows.len());
        self.rows = rows;
    }

    pub fn select(&mut self, target: SelectionTarget, selected: bool) -> Result<()> {
        self.rows = set_selection(&self.rows, target, selected)?;
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn snapshot(&self) -> &WorkspaceSnapshot {
        self.polling.snapshot()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.polling.error()
    }

    pub fn dismiss_error(&mut self) {
        self.polling.clear_error();
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar {
            show_delete_button: any_selected(&self.rows),
            error: self.error().map(|e| e.to_string()),
            new_workspace_open: self.new_workspace_open,
        }
    }

    pub fn open_new_workspace(&mut self) {
        self.new_workspace_open = true;
    }

    pub fn close_new_workspace(&mut self) {
        self.new_workspace_open = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Drops the row model; fetches completing afterwards are discarded.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.rows.clear();
    }

    /// Plain-text rendering: the table, or the empty-state message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(err) = self.error() {
            out.push_str(&format!("Error: {err}\n"));
        }
        if self.rows.is_empty() {
            out.push_str(EMPTY_STATE_MESSAGE);
            out.push('\n');
            return out;
        }

        let mut widths = COLUMNS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells.as_array()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let index_width = (self.rows.len() - 1).to_string().len().max(1);

        let mut line = |marker: &str, index: &str, cells: [&str; 3]| {
            let text = format!(
                "{marker} {index:>iw$}  {:<w0$}  {:<w1$}  {}",
                cells[0],
                cells[1],
                cells[2],
                iw = index_width,
                w0 = widths[0],
                w1 = widths[1],
            );
            out.push_str(text.trim_end());
            out.push('\n');
        };

        line("   ", "", COLUMNS);
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if row.selected { "[x]" } else { "[ ]" };
            line(marker, &i.to_string(), row.cells.as_array());
        }
        out
    }
}
