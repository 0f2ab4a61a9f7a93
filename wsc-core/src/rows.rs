//! Row model for the workspaces table.
//!
//! [`reconcile`] rebuilds the rows from a fresh snapshot on every change while
//! carrying each row's selection over by workspace id. Row order depends only
//! on the snapshot: newest workspace first, ties kept in snapshot order.

use crate::navigation::routes;
use crate::workspace::{StatusClassifier, Workspace, WorkspaceSnapshot};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Column headers, in cell order.
pub const COLUMNS: [&str; 3] = ["Name", "Time of creation", "Status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    /// Workspace name, or `id: <{id}>` when it has none.
    pub label: String,
    /// Detail route the label links to.
    pub link: String,
    pub created: String,
    pub status: String,
}

impl RowCells {
    pub fn as_array(&self) -> [&str; 3] {
        [&self.label, &self.created, &self.status]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub cells: RowCells,
    pub selected: bool,
}

pub fn fallback_label(id: &str) -> String {
    format!("id: <{id}>")
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a %b %d %Y %H:%M:%S UTC").to_string()
}

/// Newest first. The sort is stable, so equal timestamps keep input order.
pub fn sort_by_timestamp<'a, I>(workspaces: I) -> Vec<&'a Workspace>
where
    I: IntoIterator<Item = &'a Workspace>,
{
    let mut sorted: Vec<&Workspace> = workspaces.into_iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

fn build_cells(workspace: &Workspace, classifier: &dyn StatusClassifier) -> RowCells {
    RowCells {
        label: workspace
            .display_name()
            .map(String::from)
            .unwrap_or_else(|| fallback_label(&workspace.id)),
        link: routes::workspace_detail(&workspace.id),
        created: format_timestamp(&workspace.timestamp),
        status: classifier.classify(workspace),
    }
}

/// Maps the current snapshot to table rows.
///
/// A row whose id appeared in `previous` keeps that row's `selected` flag even
/// if the record itself changed; every other row starts unselected. Rows for
/// ids missing from `current` are dropped. `None` and an empty slice behave
/// the same.
pub fn reconcile(
    current: &WorkspaceSnapshot,
    previous: Option<&[Row]>,
    classifier: &dyn StatusClassifier,
) -> Vec<Row> {
    let was_selected: HashMap<&str, bool> = previous
        .unwrap_or_default()
        .iter()
        .map(|row| (row.id.as_str(), row.selected))
        .collect();

    sort_by_timestamp(current.values())
        .into_iter()
        .map(|workspace| Row {
            id: workspace.id.clone(),
            cells: build_cells(workspace, classifier),
            selected: was_selected
                .get(workspace.id.as_str())
                .copied()
                .unwrap_or(false),
        })
        .collect()
}
