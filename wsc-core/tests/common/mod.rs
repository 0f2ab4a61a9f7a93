//! Common test utilities: an in-process workspaces API for client tests.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use wsc_core::{ConsoleConfig, NewWorkspace, Workspace};

#[derive(Default)]
struct MockState {
    workspaces: Vec<Workspace>,
    token: Option<String>,
    failing_deletes: HashSet<String>,
    deleted: Vec<String>,
    list_calls: u32,
    next_id: u32,
    // Created workspace held back for this many list calls.
    pending: Option<(Workspace, u32)>,
    hide_created_for: u32,
}

impl MockState {
    fn reject(&self, headers: &HeaderMap) -> Option<Response> {
        let expected = self.token.as_ref()?;
        let given = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if given == Some(expected.as_str()) {
            return None;
        }
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "session expired" })),
            )
                .into_response(),
        )
    }
}

type Shared = Arc<Mutex<MockState>>;

/// Handle to a running mock API.
pub struct MockApi {
    state: Shared,
    pub base_url: String,
}

impl MockApi {
    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig {
            api_url: self.base_url.clone(),
            api_base: "/api/v1".to_string(),
            api_token: None,
            poll_interval_secs: 1,
            request_timeout_secs: 5,
            max_get_next_attempts: 3,
            millis_between_get_next_attempts: 10,
            toast_timeout_millis: 8000,
        }
    }

    pub fn set_workspaces(&self, workspaces: Vec<Workspace>) {
        self.state.lock().unwrap().workspaces = workspaces;
    }

    pub fn remove(&self, id: &str) {
        self.state.lock().unwrap().workspaces.retain(|w| w.id != id);
    }

    pub fn require_token(&self, token: &str) {
        self.state.lock().unwrap().token = Some(token.to_string());
    }

    pub fn fail_delete(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_deletes
            .insert(id.to_string());
    }

    pub fn hide_created_for(&self, list_calls: u32) {
        self.state.lock().unwrap().hide_created_for = list_calls;
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn list_calls(&self) -> u32 {
        self.state.lock().unwrap().list_calls
    }
}

async fn list_workspaces(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = state.lock().unwrap();
    if let Some(rejection) = st.reject(&headers) {
        return rejection;
    }
    st.list_calls += 1;

    if let Some((workspace, remaining)) = st.pending.take() {
        if remaining <= 1 {
            st.workspaces.push(workspace);
        } else {
            st.pending = Some((workspace, remaining - 1));
        }
    }

    Json(st.workspaces.clone()).into_response()
}

async fn create_workspace(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<NewWorkspace>,
) -> Response {
    let mut st = state.lock().unwrap();
    if let Some(rejection) = st.reject(&headers) {
        return rejection;
    }
    st.next_id += 1;
    let workspace = Workspace {
        id: format!("created-{}", st.next_id),
        name: req.name,
        description: req.description,
        timestamp: Utc::now(),
        project_ids: Vec::new(),
        inputs: Default::default(),
    };

    if st.hide_created_for == 0 {
        st.workspaces.push(workspace.clone());
    } else {
        st.pending = Some((workspace.clone(), st.hide_created_for));
    }

    Json(workspace).into_response()
}

async fn delete_workspace(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut st = state.lock().unwrap();
    if let Some(rejection) = st.reject(&headers) {
        return rejection;
    }
    if st.failing_deletes.contains(&id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "storage unavailable" })),
        )
            .into_response();
    }
    let before = st.workspaces.len();
    st.workspaces.retain(|w| w.id != id);
    if st.workspaces.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Workspace not found: {id}") })),
        )
            .into_response();
    }
    st.deleted.push(id);
    Json(json!({ "message": "Workspace deleted" })).into_response()
}

/// Starts the mock API on an ephemeral local port.
pub async fn spawn_mock_api(workspaces: Vec<Workspace>) -> MockApi {
    let state: Shared = Arc::new(Mutex::new(MockState {
        workspaces,
        ..Default::default()
    }));

    let app = Router::new()
        .route(
            "/api/v1/workspaces",
            get(list_workspaces).post(create_workspace),
        )
        .route("/api/v1/workspaces/{id}", delete(delete_workspace))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().expect("Failed to read mock API address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock API crashed");
    });

    MockApi {
        state,
        base_url: format!("http://{addr}"),
    }
}

/// Fixture: a workspace created `millis` after the epoch.
pub fn workspace(id: &str, name: Option<&str>, millis: i64) -> Workspace {
    Workspace {
        id: id.to_string(),
        name: name.map(String::from),
        description: None,
        timestamp: DateTime::from_timestamp_millis(millis).expect("valid timestamp"),
        project_ids: Vec::new(),
        inputs: Default::default(),
    }
}
