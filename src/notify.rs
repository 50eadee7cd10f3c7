use std::fmt;

use tracing::warn;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// The result of one user action, handed back to the event loop instead of
/// raising a dialog. Failures carry the reason verbatim; nothing is retried
/// and nothing is fatal.
#[derive(Debug, Clone)]
pub struct Notice {
    pub outcome: Outcome,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            message: message.into(),
        }
    }

    /// Failure notice for an API call, with the server's text appended to the
    /// action description verbatim.
    pub fn api_failure(what: &str, err: &ApiError) -> Self {
        match err {
            ApiError::Rejected { status, message } => {
                warn!(%status, %message, "{what} rejected");
            }
            ApiError::Transport(source) => {
                warn!(error = %source, "{what} failed");
            }
        }
        Self::failure(format!("{what}: {err}"))
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Success => write!(f, "ok: {}", self.message),
            Outcome::Failure => write!(f, "error: {}", self.message),
        }
    }
}
