use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Display name substituted when a task's section cannot be resolved.
pub const UNKNOWN_MODULE: &str = "Unbekannt";

/// One deliverable task synced from the remote project.
///
/// Immutable once constructed for a sync cycle; a new cycle produces an
/// entirely new collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Opaque remote task identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Task description, may be empty.
    #[serde(default)]
    pub description: String,
    /// ISO calendar date or date-time; `None` means "no due date".
    #[serde(default)]
    pub due_date: Option<String>,
    /// Section the task belongs to, if resolvable.
    #[serde(default)]
    pub module_id: Option<String>,
    /// Denormalized section display name ([`UNKNOWN_MODULE`] when unresolved).
    pub module_name: String,
    /// Remote-defined priority scale (Todoist: 1 lowest .. 4 highest).
    pub priority: u8,
    /// Whether the task is marked completed remotely.
    pub completed: bool,
    /// Permalink to the remote task, may be empty.
    #[serde(default)]
    pub url: String,
    /// Remote creation timestamp, if provided.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Labels attached to the task.
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

/// One project section with aggregated assignment statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Section identifier; `None` groups assignments without a resolvable section.
    pub id: Option<String>,
    /// Section display name.
    pub name: String,
    /// Remote ordering hint (0 when the section is unknown).
    #[serde(default)]
    pub order: i64,
    /// Number of matching assignments in this module.
    pub total: usize,
    /// Number of completed assignments.
    pub completed: usize,
    /// Number of assignments still open (`total - completed`).
    pub upcoming: usize,
}

/// Atomic output of one sync cycle.
///
/// A sync either fully succeeds and replaces the prior result, or fails and
/// the prior cached result remains authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Assignments sorted ascending by due date (undated ones last).
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Module statistics sorted lexicographically by name.
    #[serde(default)]
    pub modules: Vec<Module>,
    /// RFC 3339 timestamp of the cycle, `None` before the first sync.
    #[serde(default)]
    pub last_sync: Option<String>,
}
