use super::list::{load_page, print_page};
use super::Console;
use anyhow::{bail, Result};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use wsc_core::SelectionTarget;

async fn wait_all(handles: Vec<JoinHandle<()>>) -> Result<()> {
    for handle in handles {
        handle.await?;
    }
    Ok(())
}

pub async fn handle_delete(
    console: &Console,
    ids: Vec<String>,
    rows: Vec<usize>,
    all: bool,
) -> Result<()> {
    let dispatcher = console.dispatcher();

    if !ids.is_empty() {
        let handles = ids.iter().map(|id| dispatcher.delete_one(id)).collect();
        wait_all(handles).await?;
        console.print_toasts();
        return Ok(());
    }

    if rows.is_empty() && !all {
        bail!("Nothing to delete: pass workspace ids, --rows or --all");
    }

    let mut page = load_page(console).await?;
    if all {
        page.select(SelectionTarget::All, true)?;
    } else {
        for index in rows {
            page.select(SelectionTarget::Row(index), true)?;
        }
    }
    debug!("Selected rows before delete:\n{}", page.render());

    let handles = dispatcher.delete_selected(page.rows());
    info!("Issued {} delete requests", handles.len());
    wait_all(handles).await?;
    console.print_toasts();

    page.refresh(&*console.api).await;
    console.ensure_authorized()?;
    print_page(&page);
    Ok(())
}
