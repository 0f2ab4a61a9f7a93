use super::Console;
use anyhow::{bail, Result};
use colored::Colorize;
use wsc_core::rows::format_timestamp;
use wsc_core::{DefaultStatusClassifier, PageRoute, StatusClassifier, Workspace, WorkspacesPage};

/// Fetches once, failing on any fetch error.
pub async fn load_page(console: &Console) -> Result<WorkspacesPage> {
    let mut page = console.page();
    page.refresh(&*console.api).await;
    console.ensure_authorized()?;
    if let Some(err) = page.error() {
        bail!("Failed to list workspaces: {err}");
    }
    Ok(page)
}

pub fn print_page(page: &WorkspacesPage) {
    if page.is_empty() {
        print!("{}", page.render().yellow());
    } else {
        print!("{}", page.render());
    }
}

pub async fn handle_list(console: &Console, json: bool) -> Result<()> {
    let page = load_page(console).await?;

    if json {
        let ordered: Vec<&Workspace> = page
            .rows()
            .iter()
            .filter_map(|row| page.snapshot().get(&row.id))
            .collect();
        println!("{}", serde_json::to_string_pretty(&ordered)?);
        return Ok(());
    }

    print_page(&page);
    Ok(())
}

fn field(label: &str, value: &str) {
    println!("{} {}", format!("{label:<12}").bold(), value);
}

pub async fn handle_open(console: &Console, id: &str) -> Result<()> {
    if let PageRoute::Redirect(path) = WorkspacesPage::route(Some(id)) {
        println!("{} {}", "→".cyan(), path);
    }

    let page = load_page(console).await?;
    let Some(workspace) = page.snapshot().get(id) else {
        bail!("Workspace not found: {id}");
    };

    field("ID:", &workspace.id);
    field("Name:", workspace.display_name().unwrap_or("-"));
    if let Some(description) = &workspace.description {
        field("Description:", description);
    }
    field("Created:", &format_timestamp(&workspace.timestamp));
    field("Status:", &DefaultStatusClassifier.classify(workspace));
    for project in &workspace.project_ids {
        println!("  - {project}");
    }
    Ok(())
}
