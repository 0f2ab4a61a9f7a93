//! End-to-end tests for the workspaces page
//!
//! Drives the page, the action dispatcher and the poller against the mock
//! API: refresh cycles, selection across refreshes, bulk delete, login
//! redirects and the create flow.

mod common;

use common::{spawn_mock_api, workspace};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex};
use wsc_core::notifications::{self, ToastLevel};
use wsc_core::{
    create_workspace_and_wait, fetch_once, run_poller, ActionDispatcher, ConsoleError,
    FetchOutcome, HttpWorkspaceApi, NewWorkspace, RecordingNavigator, RowAction,
    SelectionTarget, WorkspaceApi, WorkspacesPage, EMPTY_STATE_MESSAGE,
};

fn row_ids(page: &WorkspacesPage) -> Vec<String> {
    page.rows().iter().map(|r| r.id.clone()).collect()
}

#[tokio::test]
async fn test_initial_load_then_single_item_appears() {
    let mock = spawn_mock_api(vec![]).await;
    let api = HttpWorkspaceApi::new(&mock.config()).unwrap();
    let mut page = WorkspacesPage::new(Arc::new(RecordingNavigator::new()));

    assert_eq!(page.refresh(&api).await, FetchOutcome::Applied);
    assert!(page.is_empty());
    assert!(page.render().contains(EMPTY_STATE_MESSAGE));

    mock.set_workspaces(vec![workspace("w1", Some("Demo"), 1_000)]);
    page.refresh(&api).await;

    assert_eq!(page.rows().len(), 1);
    assert_eq!(page.rows()[0].cells.label, "Demo");
    assert!(!page.rows()[0].selected);
}

#[tokio::test]
async fn test_select_all_survives_refresh_with_same_data() {
    let mock = spawn_mock_api(vec![
        workspace("w1", Some("one"), 1_000),
        workspace("w2", Some("two"), 2_000),
        workspace("w3", Some("three"), 3_000),
    ])
    .await;
    let api = HttpWorkspaceApi::new(&mock.config()).unwrap();
    let mut page = WorkspacesPage::new(Arc::new(RecordingNavigator::new()));

    page.refresh(&api).await;
    let order = row_ids(&page);
    assert_eq!(order, vec!["w3", "w2", "w1"]);

    page.select(SelectionTarget::All, true).unwrap();
    page.refresh(&api).await;

    assert_eq!(row_ids(&page), order);
    assert!(page.rows().iter().all(|r| r.selected));
    assert!(page.toolbar().show_delete_button);
}

#[tokio::test]
async fn test_new_rows_start_unselected() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    let api = HttpWorkspaceApi::new(&mock.config()).unwrap();
    let mut page = WorkspacesPage::new(Arc::new(RecordingNavigator::new()));

    page.refresh(&api).await;
    page.select(SelectionTarget::All, true).unwrap();

    mock.set_workspaces(vec![workspace("w1", None, 1_000), workspace("w9", None, 9_000)]);
    page.refresh(&api).await;

    let rows = page.rows();
    assert_eq!(rows[0].id, "w9");
    assert!(!rows[0].selected);
    assert!(rows[1].selected);
}

#[tokio::test]
async fn test_selected_workspace_deleted_server_side() {
    let mock = spawn_mock_api(vec![
        workspace("w1", Some("one"), 1_000),
        workspace("w2", Some("two"), 2_000),
    ])
    .await;
    let api = Arc::new(HttpWorkspaceApi::new(&mock.config()).unwrap());
    let nav = Arc::new(RecordingNavigator::new());
    let mut page = WorkspacesPage::new(nav.clone());
    let dispatcher = ActionDispatcher::new(api.clone(), nav);

    page.refresh(&*api).await;
    let w2 = page.rows().iter().position(|r| r.id == "w2").unwrap();
    page.select(SelectionTarget::Row(w2), true).unwrap();

    mock.remove("w2");
    page.refresh(&*api).await;

    assert_eq!(row_ids(&page), vec!["w1"]);
    assert!(dispatcher.delete_selected(page.rows()).is_empty());
    assert!(mock.deleted().is_empty());
}

#[tokio::test]
async fn test_delete_selected_then_refresh_removes_rows() {
    let mock = spawn_mock_api(vec![
        workspace("w1", None, 1_000),
        workspace("w2", None, 2_000),
        workspace("w3", None, 3_000),
    ])
    .await;
    let api = Arc::new(HttpWorkspaceApi::new(&mock.config()).unwrap());
    let nav = Arc::new(RecordingNavigator::new());
    let mut page = WorkspacesPage::new(nav.clone());
    let dispatcher = ActionDispatcher::new(api.clone(), nav);

    page.refresh(&*api).await;
    // Rows are w3, w2, w1.
    page.select(SelectionTarget::Row(0), true).unwrap();
    page.select(SelectionTarget::Row(2), true).unwrap();

    let handles = dispatcher.delete_selected(page.rows());
    assert_eq!(handles.len(), 2);
    // Deleting never touches the rows directly.
    assert_eq!(page.rows().len(), 3);
    for handle in handles {
        handle.await.unwrap();
    }

    let mut deleted = mock.deleted();
    deleted.sort();
    assert_eq!(deleted, vec!["w1".to_string(), "w3".to_string()]);

    page.refresh(&*api).await;
    assert_eq!(row_ids(&page), vec!["w2"]);
    assert!(!page.toolbar().show_delete_button);
}

#[tokio::test]
async fn test_delete_results_raise_toasts() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000), workspace("w2", None, 2_000)]).await;
    mock.fail_delete("w2");
    let api = Arc::new(HttpWorkspaceApi::new(&mock.config()).unwrap());
    let toasts = notifications::shared(mock.config().toast_timeout());
    let dispatcher =
        ActionDispatcher::new(api, Arc::new(RecordingNavigator::new())).with_toasts(toasts.clone());

    dispatcher.delete_one("w1").await.unwrap();
    dispatcher.delete_one("w2").await.unwrap();

    let active = notifications::active_messages(&toasts, Instant::now());
    assert_eq!(active.len(), 2);
    assert_eq!(active[0], (ToastLevel::Success, "Deleted workspace w1".to_string()));
    assert_eq!(active[1].0, ToastLevel::Danger);
    assert!(active[1].1.contains("storage unavailable"));
}

#[tokio::test]
async fn test_row_actions() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    let api = Arc::new(HttpWorkspaceApi::new(&mock.config()).unwrap());
    let nav = Arc::new(RecordingNavigator::new());
    let mut page = WorkspacesPage::new(nav.clone());
    let dispatcher = ActionDispatcher::new(api.clone(), nav.clone());

    page.refresh(&*api).await;

    assert!(dispatcher.row_action(page.rows(), 0, RowAction::Details).is_none());
    assert_eq!(nav.last_route().as_deref(), Some("/workspaces/w1"));

    assert!(dispatcher.row_action(page.rows(), 7, RowAction::Delete).is_none());
    assert!(mock.deleted().is_empty());

    dispatcher
        .row_action(page.rows(), 0, RowAction::Delete)
        .expect("delete handle")
        .await
        .unwrap();
    assert_eq!(mock.deleted(), vec!["w1".to_string()]);
}

#[tokio::test]
async fn test_auth_failure_redirects_to_login() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    mock.require_token("s3cret");
    let api = HttpWorkspaceApi::new(&mock.config()).unwrap();
    let nav = Arc::new(RecordingNavigator::new());
    let mut page = WorkspacesPage::new(nav.clone());

    assert_eq!(page.refresh(&api).await, FetchOutcome::SignedOut);

    assert_eq!(nav.last_route().as_deref(), Some("/login"));
    assert!(page.error().unwrap().is_auth_failure());
}

#[tokio::test]
async fn test_fetch_error_then_manual_refresh_recovers() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    let good = HttpWorkspaceApi::new(&mock.config()).unwrap();
    let mut bad_config = mock.config();
    bad_config.api_base = "/api/v0".to_string();
    let bad = HttpWorkspaceApi::new(&bad_config).unwrap();
    let nav = Arc::new(RecordingNavigator::new());
    let mut page = WorkspacesPage::new(nav.clone());

    assert_eq!(page.refresh(&bad).await, FetchOutcome::Failed);
    assert!(page.toolbar().error.is_some());
    assert!(nav.visited().is_empty());

    assert_eq!(page.refresh(&good).await, FetchOutcome::Applied);
    assert!(page.toolbar().error.is_none());
    assert_eq!(row_ids(&page), vec!["w1"]);
}

#[tokio::test]
async fn test_create_workspace_and_wait() {
    let mock = spawn_mock_api(vec![]).await;
    mock.hide_created_for(2);
    let config = mock.config();
    let api = HttpWorkspaceApi::new(&config).unwrap();

    let created = create_workspace_and_wait(&api, &NewWorkspace::new(Some("fresh"), None), &config)
        .await
        .unwrap();

    assert_eq!(created.name.as_deref(), Some("fresh"));
    assert_eq!(mock.list_calls(), 2);
}

#[tokio::test]
async fn test_create_workspace_gives_up_after_attempts() {
    let mock = spawn_mock_api(vec![]).await;
    mock.hide_created_for(10);
    let config = mock.config();
    let api = HttpWorkspaceApi::new(&config).unwrap();

    let err = create_workspace_and_wait(&api, &NewWorkspace::default(), &config)
        .await
        .unwrap_err();

    match err {
        ConsoleError::AttemptsExhausted { id, attempts } => {
            assert_eq!(id, "created-1");
            assert_eq!(attempts, config.max_get_next_attempts);
        }
        other => panic!("Expected AttemptsExhausted, got {:?}", other),
    }
    assert_eq!(mock.list_calls(), config.max_get_next_attempts);
}

#[tokio::test]
async fn test_poller_refreshes_until_shutdown() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    let api: Arc<dyn WorkspaceApi> = Arc::new(HttpWorkspaceApi::new(&mock.config()).unwrap());
    let page = Arc::new(Mutex::new(WorkspacesPage::new(Arc::new(
        RecordingNavigator::new(),
    ))));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let poller = tokio::spawn(run_poller(
        page.clone(),
        api.clone(),
        Duration::from_millis(20),
        shutdown_rx,
    ));

    tokio::time::sleep(Duration::from_millis(150)).await;
    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(5), poller)
        .await
        .expect("poller should stop")
        .unwrap();

    assert!(mock.list_calls() >= 2);
    assert_eq!(row_ids(&*page.lock().await), vec!["w1"]);
}

#[tokio::test]
async fn test_poller_stops_after_login_redirect() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    mock.require_token("s3cret");
    let api: Arc<dyn WorkspaceApi> = Arc::new(HttpWorkspaceApi::new(&mock.config()).unwrap());
    let nav = Arc::new(RecordingNavigator::new());
    let page = Arc::new(Mutex::new(WorkspacesPage::new(nav.clone())));
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let poller = tokio::spawn(run_poller(
        page.clone(),
        api,
        Duration::from_millis(20),
        shutdown_rx,
    ));

    tokio::time::timeout(Duration::from_secs(5), poller)
        .await
        .expect("poller should stop on its own")
        .unwrap();

    let logins = nav.visited().iter().filter(|r| *r == "/login").count();
    assert_eq!(logins, 1);
    assert!(page.lock().await.error().unwrap().is_auth_failure());
}

#[tokio::test]
async fn test_fetch_once_after_unmount() {
    let mock = spawn_mock_api(vec![workspace("w1", None, 1_000)]).await;
    let api = HttpWorkspaceApi::new(&mock.config()).unwrap();
    let page = Mutex::new(WorkspacesPage::new(Arc::new(RecordingNavigator::new())));

    assert_eq!(fetch_once(&page, &api, true).await, FetchOutcome::Applied);
    page.lock().await.unmount();

    assert_eq!(fetch_once(&page, &api, true).await, FetchOutcome::Unmounted);
    assert_eq!(mock.list_calls(), 1);
    assert!(page.lock().await.rows().is_empty());
}
