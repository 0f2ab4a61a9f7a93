use crate::client::WorkspaceApi;
use crate::navigation::{routes, Navigator};
use crate::notifications::{notify, SharedToasts, ToastLevel};
use crate::rows::Row;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Entries of the per-row action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Details,
    Delete,
}

/// Turns row identities into navigation and delete requests.
///
/// Deletes are fire-and-forget: they never touch the row model, and the row
/// disappears on the next refresh once the server no longer lists it.
#[derive(Clone)]
pub struct ActionDispatcher {
    api: Arc<dyn WorkspaceApi>,
    navigator: Arc<dyn Navigator>,
    toasts: Option<SharedToasts>,
}

impl ActionDispatcher {
    pub fn new(api: Arc<dyn WorkspaceApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            toasts: None,
        }
    }

    /// Delete results are reported to `toasts` in addition to the log.
    pub fn with_toasts(mut self, toasts: SharedToasts) -> Self {
        self.toasts = Some(toasts);
        self
    }

    pub fn view_details(&self, id: &str) {
        self.navigator.go_to_route(&routes::workspace_detail(id));
    }

    /// Issues one delete request for `id` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn delete_one(&self, id: &str) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let toasts = self.toasts.clone();
        let id = id.to_string();

        tokio::spawn(async move {
            let (level, message) = match api.delete_workspace(&id).await {
                Ok(()) => {
                    info!("Deleted workspace {}", id);
                    (ToastLevel::Success, format!("Deleted workspace {id}"))
                }
                Err(e) => {
                    warn!("Failed to delete workspace {}: {}", id, e);
                    (ToastLevel::Danger, format!("Failed to delete workspace {id}: {e}"))
                }
            };
            if let Some(toasts) = toasts {
                notify(&toasts, level, message);
            }
        })
    }

    /// Calls [`delete_one`](Self::delete_one) for every selected row, in row
    /// order, without waiting between requests.
    pub fn delete_selected(&self, rows: &[Row]) -> Vec<JoinHandle<()>> {
        rows.iter()
            .filter(|row| row.selected)
            .map(|row| self.delete_one(&row.id))
            .collect()
    }

    /// Runs a row-menu action. Indexes with no row are ignored; only
    /// [`RowAction::Delete`] yields a handle.
    pub fn row_action(&self, rows: &[Row], index: usize, action: RowAction) -> Option<JoinHandle<()>> {
        let row = rows.get(index)?;
        match action {
            RowAction::Details => {
                self.view_details(&row.id);
                None
            }
            RowAction::Delete => Some(self.delete_one(&row.id)),
        }
    }
}
