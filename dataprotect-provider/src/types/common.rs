//! Pagination envelopes and the synchronous/asynchronous response shape.

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints.
///
/// # Default
///
/// The default is `page = 1, page_size = 50`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl ListParams {
    /// Largest page the API serves.
    pub const MAX_PAGE_SIZE: u32 = 200;

    /// Clamp pagination values to valid ranges.
    #[must_use]
    pub fn validated(&self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    /// Render as a query string suffix (`?page=..&page_size=..`).
    pub fn to_query(&self) -> String {
        let p = self.validated();
        format!("?page={}&page_size={}", p.page, p.page_size)
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        Self {
            items,
            page,
            page_size,
            total_count,
        }
    }

    /// Whether there are more pages after this one.
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < u64::from(self.total_count)
    }
}

/// Body of an HTTP 202 answer: the operation continues as a backend task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    /// Opaque task identifier to poll.
    pub task_id: String,
    /// Id of the object a deferred creation is producing, when the backend
    /// already knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl TaskHandle {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            resource_id: None,
        }
    }

    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }
}

/// Outcome of a mutating call.
///
/// The backend either completes the operation inline (HTTP 200/201, body is the
/// object) or accepts it for asynchronous execution (HTTP 202, body is a
/// [`TaskHandle`]). Callers switch on this once: `Immediate` values are used
/// directly, `Deferred` handles go to [`await_task`](crate::await_task).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// Completed synchronously.
    Immediate(T),
    /// Accepted; completion is tracked by the task.
    Deferred(TaskHandle),
}

impl<T> Submission<T> {
    /// Task id when the operation was deferred.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::Immediate(_) => None,
            Self::Deferred(handle) => Some(&handle.task_id),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Transform the immediate value, keeping a deferred handle as is.
    pub fn map<U, F>(self, f: F) -> Submission<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Immediate(value) => Submission::Immediate(f(value)),
            Self::Deferred(handle) => Submission::Deferred(handle),
        }
    }
}
