use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Failures reported by the workspace API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The session is missing or no longer valid (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for the authentication-failure class that forces a login redirect.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Row index {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workspace {id} did not appear after {attempts} attempts")]
    AttemptsExhausted { id: String, attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml_ng::Error> for ConsoleError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ConsoleError::Config(err.to_string())
    }
}

impl ConsoleError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ConsoleError::Api(e) if e.is_auth_failure())
    }
}
