use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: Instant,
}

/// Transient messages that expire a fixed time after they are pushed.
#[derive(Debug)]
pub struct ToastQueue {
    timeout: Duration,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            toasts: Vec::new(),
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    pub fn push_at(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            level,
            message: message.into(),
            expires_at: now + self.timeout,
        });
    }

    /// Drops expired toasts and returns the rest, oldest first.
    pub fn active(&mut self, now: Instant) -> &[Toast] {
        self.toasts.retain(|t| t.expires_at > now);
        &self.toasts
    }
}

/// A queue shared between the page and background tasks.
pub type SharedToasts = Arc<Mutex<ToastQueue>>;

pub fn shared(timeout: Duration) -> SharedToasts {
    Arc::new(Mutex::new(ToastQueue::new(timeout)))
}

pub fn notify(toasts: &SharedToasts, level: ToastLevel, message: impl Into<String>) {
    match toasts.lock() {
        Ok(mut queue) => queue.push(level, message),
        Err(poisoned) => poisoned.into_inner().push(level, message),
    }
}

/// Messages of the toasts still alive at `now`.
pub fn active_messages(toasts: &SharedToasts, now: Instant) -> Vec<(ToastLevel, String)> {
    let mut queue = match toasts.lock() {
        Ok(queue) => queue,
        Err(poisoned) => poisoned.into_inner(),
    };
    queue
        .active(now)
        .iter()
        .map(|t| (t.level, t.message.clone()))
        .collect()
}
