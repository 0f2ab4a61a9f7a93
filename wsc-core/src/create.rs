//! Creating a workspace and waiting for it to show up in the list.

use crate::client::WorkspaceApi;
use crate::config::ConsoleConfig;
use crate::error::{ApiError, ConsoleError, Result};
use crate::workspace::{NewWorkspace, Workspace};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Calls `check` up to `attempts` times, sleeping `delay` between calls, until
/// it yields a value. Authentication failures end the loop at once; other
/// errors count as a failed attempt. `Ok(None)` means every attempt came up
/// empty.
pub async fn poll_until<T, F, Fut>(
    attempts: u32,
    delay: Duration,
    mut check: F,
) -> std::result::Result<Option<T>, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<Option<T>, ApiError>>,
{
    for attempt in 1..=attempts {
        match check(attempt).await {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => debug!("Attempt {}/{} not ready", attempt, attempts),
            Err(e) if e.is_auth_failure() => return Err(e),
            Err(e) => warn!("Attempt {}/{} failed: {}", attempt, attempts, e),
        }
        if attempt < attempts {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(None)
}

/// Creates a workspace, then polls the list until it appears.
pub async fn create_workspace_and_wait(
    api: &dyn WorkspaceApi,
    request: &NewWorkspace,
    config: &ConsoleConfig,
) -> Result<Workspace> {
    let created = api.create_workspace(request).await?;
    info!("Created workspace {}", created.id);

    let id = created.id.clone();
    let found = poll_until(
        config.max_get_next_attempts,
        config.get_next_delay(),
        |_| {
            let id = id.clone();
            async move {
                let list = api.list_workspaces().await?;
                Ok::<_, ApiError>(list.into_iter().find(|w| w.id == id))
            }
        },
    )
    .await?;

    found.ok_or(ConsoleError::AttemptsExhausted {
        id,
        attempts: config.max_get_next_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_returns_first_value() {
        let calls = AtomicU32::new(0);
        let result = poll_until(5, Duration::from_millis(3000), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, ApiError>((attempt == 3).then_some(attempt)) }
        })
        .await
        .unwrap();

        assert_eq!(result, Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_exhausts() {
        let start = tokio::time::Instant::now();
        let result = poll_until(3, Duration::from_millis(3000), |_| async {
            Ok::<Option<()>, ApiError>(None)
        })
        .await
        .unwrap();

        assert_eq!(result, None);
        // Two sleeps between three attempts.
        assert_eq!(start.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_retries_transient_errors() {
        let result = poll_until(3, Duration::from_millis(10), |attempt| async move {
            if attempt == 1 {
                Err(ApiError::Http {
                    status: 502,
                    message: "bad gateway".into(),
                })
            } else {
                Ok(Some(attempt))
            }
        })
        .await
        .unwrap();

        assert_eq!(result, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_stops_on_auth_failure() {
        let calls = AtomicU32::new(0);
        let result = poll_until(5, Duration::from_millis(10), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Option<()>, _>(ApiError::Unauthorized("expired".into())) }
        })
        .await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
