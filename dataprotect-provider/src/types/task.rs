//! Backend task records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a backend task.
///
/// Only [`Succeeded`](Self::Succeeded) and the failure values
/// ([`Failed`](Self::Failed), [`Aborted`](Self::Aborted)) are terminal.
/// Values this client does not know are treated as still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Aborted,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Aborted)
    }

    pub fn is_terminal(self) -> bool {
        self.is_success() || self.is_failure()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Aborted => "aborted",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A task as returned by `GET /tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub status: TaskStatus,
    /// Failure detail attached by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}
