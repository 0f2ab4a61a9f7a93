//! Default tuning knobs shared by the console.

/// Path prefix for every API request.
pub const API_BASE: &str = "/api/v1";

/// Retry ceiling when polling for the next result of a long-running request.
pub const QA_MAX_GET_NEXT_ATTEMPTS: u32 = 5;

/// Delay between two get-next polling attempts.
pub const QA_MILLISECONDS_BETWEEN_GET_NEXT_ATTEMPTS: u64 = 3 * 1000;

/// Lifetime of a transient notification.
pub const TOAST_TIMEOUT_MILLISECONDS: u64 = 8 * 1000;
