use super::Console;
use anyhow::{bail, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::info;
use wsc_core::navigation::routes;
use wsc_core::{run_poller, WorkspaceApi};

const REDRAW_EVERY: Duration = Duration::from_millis(250);

pub async fn handle_watch(console: &Console, interval: Option<u64>) -> Result<()> {
    let every = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| console.config.poll_interval());
    if every.is_zero() {
        bail!("--interval must be greater than zero");
    }

    let page = Arc::new(Mutex::new(console.page()));
    let api: Arc<dyn WorkspaceApi> = console.api.clone();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = tokio::spawn(run_poller(page.clone(), api, every, shutdown_rx));

    let mut redraw = tokio::time::interval(REDRAW_EVERY);
    let mut last_screen = String::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
            _ = redraw.tick() => {
                if console.navigator.has_visited(routes::LOGIN) {
                    break;
                }
                let screen = page.lock().await.render();
                if screen != last_screen {
                    print!("\x1b[2J\x1b[H{screen}");
                    std::io::stdout().flush()?;
                    last_screen = screen;
                }
                console.print_toasts();
            }
        }
    }

    shutdown_tx.send(true).ok();
    page.lock().await.unmount();
    poller.await?;
    console.ensure_authorized()
}
