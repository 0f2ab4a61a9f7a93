use crate::client::WorkspaceApi;
use crate::page::WorkspacesPage;
use crate::polling::FetchOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Runs one list fetch for a shared page.
///
/// The lock is released while the request is in flight, so a manual refresh
/// and a scheduled poll can overlap; the page drops whichever completes stale.
pub async fn fetch_once(
    page: &Mutex<WorkspacesPage>,
    api: &dyn WorkspaceApi,
    manual: bool,
) -> FetchOutcome {
    let ticket = {
        let mut page = page.lock().await;
        if !page.is_mounted() {
            return FetchOutcome::Unmounted;
        }
        if manual {
            page.begin_refresh()
        } else {
            page.begin_poll()
        }
    };

    let result = api.list_workspaces().await;
    page.lock().await.complete_refresh(ticket, result)
}

/// Refreshes `page` every `every` until `shutdown` turns true, the page is
/// unmounted, or the session is rejected. A rejected session has already
/// been sent to the login route, so polling on would only repeat the redirect.
pub async fn run_poller(
    page: Arc<Mutex<WorkspacesPage>>,
    api: Arc<dyn WorkspaceApi>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Workspace poller running (refreshes every {} seconds)",
        every.as_secs()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        let outcome = fetch_once(&page, api.as_ref(), false).await;
        debug!("Scheduled refresh finished: {:?}", outcome);
        match outcome {
            FetchOutcome::Unmounted => break,
            FetchOutcome::SignedOut => {
                info!("Session rejected, stopping the poller");
                break;
            }
            _ => {}
        }
    }

    info!("Workspace poller stopped");
}
