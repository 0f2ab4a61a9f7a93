use std::sync::Mutex;
use tracing::debug;

pub mod routes {
    use reqwest::Url;

    pub const LOGIN: &str = "/login";
    pub const WORKSPACES: &str = "/workspaces";

    /// Percent-escapes `id` as one path segment, matching the escaping the
    /// API client applies to `/workspaces/{id}` requests.
    fn segment(id: &str) -> String {
        let Ok(mut url) = Url::parse("http://localhost/") else {
            return id.to_string();
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push(id);
        }
        url.path().strip_prefix('/').unwrap_or(url.path()).to_string()
    }

    pub fn workspace_detail(id: &str) -> String {
        format!("{WORKSPACES}/{}", segment(id))
    }

    pub fn workspace_projects(id: &str) -> String {
        format!("{WORKSPACES}/{}/projects", segment(id))
    }
}

/// Side-effecting route changes requested by the console.
pub trait Navigator: Send + Sync {
    fn go_to_route(&self, path: &str);
}

/// What the workspaces page shows for a given address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    /// The workspaces table.
    List,
    /// A specific workspace was addressed; go to its projects instead.
    Redirect(String),
}

impl PageRoute {
    pub fn resolve(workspace_id: Option<&str>) -> Self {
        match workspace_id.filter(|id| !id.is_empty()) {
            Some(id) => PageRoute::Redirect(routes::workspace_projects(id)),
            None => PageRoute::List,
        }
    }
}

/// Keeps every requested route in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last_route(&self) -> Option<String> {
        self.visited().pop()
    }

    pub fn has_visited(&self, path: &str) -> bool {
        self.visited().iter().any(|p| p == path)
    }
}

impl Navigator for RecordingNavigator {
    fn go_to_route(&self, path: &str) {
        debug!("Navigating to {}", path);
        match self.visited.lock() {
            Ok(mut visited) => visited.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }
    }
}
