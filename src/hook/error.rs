use thiserror::Error;

/// Structured rejection a hook returns to abort the request.
///
/// Carries the client-facing message and HTTP status the host should use
/// when surfacing the abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub message: String,
    pub status: u16,
}

impl Rejection {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self { message: message.into(), status }
    }

    /// The fixed rejection for anonymous create/update requests.
    pub fn unauthorized() -> Self {
        Self::new("You must be logged in", 401)
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

/// Hook system errors with structured error types
#[derive(Debug, Error, Clone)]
pub enum HookError {
    #[error("Request rejected: {0}")]
    Rejected(Rejection),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Hook execution failed: {0}")]
    ExecutionError(String),
}

impl HookError {
    /// HTTP status code the host should respond with
    pub fn status_code(&self) -> u16 {
        match self {
            HookError::Rejected(rejection) => rejection.status,
            HookError::InvalidPayload(_) => 400,
            HookError::TimeoutError(_) | HookError::ExecutionError(_) => 500,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            HookError::Rejected(rejection) => &rejection.message,
            HookError::InvalidPayload(msg) => msg,
            HookError::TimeoutError(msg) => msg,
            HookError::ExecutionError(msg) => msg,
        }
    }
}

impl From<Rejection> for HookError {
    fn from(rejection: Rejection) -> Self {
        HookError::Rejected(rejection)
    }
}

impl From<crate::record::PendingChangeError> for HookError {
    fn from(error: crate::record::PendingChangeError) -> Self {
        HookError::InvalidPayload(error.to_string())
    }
}
