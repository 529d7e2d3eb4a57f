use serde::Deserialize;

use crate::error::SyncError;

/// Raw project record as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProject {
    /// Opaque project identifier.
    pub id: String,
    /// Project display name.
    pub name: String,
}

/// Raw section record as returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    /// Opaque section identifier.
    pub id: String,
    /// Section display name.
    pub name: String,
    /// Remote ordering hint.
    #[serde(default)]
    pub order: i64,
}

/// Raw due-date object attached to a task.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDue {
    /// ISO calendar date or date-time string.
    #[serde(default)]
    pub date: Option<String>,
}

/// Raw task record as returned by the remote API.
///
/// Every optional field carries an explicit default so that partial
/// records deserialize instead of failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTask {
    /// Opaque task identifier.
    pub id: String,
    /// Task title ("content" on the wire).
    pub content: String,
    /// Task description, may be absent.
    #[serde(default)]
    pub description: String,
    /// Due-date object, may be absent or lack a date.
    #[serde(default)]
    pub due: Option<RemoteDue>,
    /// Section the task belongs to, may be absent.
    #[serde(default)]
    pub section_id: Option<String>,
    /// Priority on the remote scale, defaults to the lowest.
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Completion flag.
    #[serde(default)]
    pub is_completed: bool,
    /// Permalink to the task.
    #[serde(default)]
    pub url: String,
    /// Remote creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Labels attached directly to the task.
    #[serde(default)]
    pub labels: Vec<String>,
}

const fn default_priority() -> u8 {
    1
}

/// Read-only access to the remote task-management API.
///
/// One sync cycle issues exactly three calls, strictly ordered: projects,
/// then sections, then tasks. Implementations perform no retries; retry
/// policy belongs to the caller.
#[allow(async_fn_in_trait)]
pub trait RemoteSource: Send + Sync {
    /// List all projects visible to the credential.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on transport failure, rejection, or an
    /// undecodable response.
    async fn list_projects(&self) -> Result<Vec<RemoteProject>, SyncError>;

    /// List the sections of the given project.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on transport failure, rejection, or an
    /// undecodable response.
    async fn list_sections(&self, project_id: &str) -> Result<Vec<RemoteSection>, SyncError>;

    /// List the tasks of the given project.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on transport failure, rejection, or an
    /// undecodable response.
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<RemoteTask>, SyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_task_record_deserializes_with_defaults() {
        let raw = r#"{"id": "T9", "content": "Essay"}"#;
        let task: RemoteTask = serde_json::from_str(raw).unwrap_or_else(|err| panic!("decode: {err}"));
        assert_eq!(task.id, "T9");
        assert_eq!(task.content, "Essay");
        assert!(task.due.is_none());
        assert!(task.section_id.is_none());
        assert_eq!(task.priority, 1);
        assert!(!task.is_completed);
        assert!(task.labels.is_empty());
    }

    #[test]
    fn due_object_without_date_is_accepted() {
        let raw = r#"{"id": "T1", "content": "HW", "due": {"string": "someday"}}"#;
        let task: RemoteTask = serde_json::from_str(raw).unwrap_or_else(|err| panic!("decode: {err}"));
        let due = task.due.unwrap_or_else(|| panic!("due object expected"));
        assert!(due.date.is_none());
    }
}
