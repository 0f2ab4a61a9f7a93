use super::list::print_page;
use super::Console;
use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;
use wsc_core::{create_workspace_and_wait, NewWorkspace, WorkspaceApi};

pub async fn handle_create(
    console: &Console,
    name: Option<String>,
    description: Option<String>,
    wait: bool,
) -> Result<()> {
    let request = NewWorkspace::new(name.as_deref(), description.as_deref());
    let mut page = console.page();
    page.open_new_workspace();

    let workspace = if wait {
        create_workspace_and_wait(&*console.api, &request, &console.config)
            .await
            .context("Failed to create workspace")?
    } else {
        console
            .api
            .create_workspace(&request)
            .await
            .context("Failed to create workspace")?
    };

    page.close_new_workspace();
    page.refresh(&*console.api).await;
    console.ensure_authorized()?;
    debug!("Toolbar after create: {:?}", page.toolbar());

    println!(
        "{} {}",
        "Created workspace".green(),
        workspace.display_name().unwrap_or(&workspace.id)
    );
    println!("  id: {}", workspace.id);
    if page.error().is_none() {
        print_page(&page);
    }
    Ok(())
}
