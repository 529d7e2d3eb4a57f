//! Sync orchestration: one cycle from project resolution to aggregation.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

use uni_mirror_core::{
    RemoteSource, SectionIndex, SyncError, SyncResult, map_tasks, module_stats, resolve_project,
};

/// Runs full sync cycles against a remote source.
///
/// A cycle is all-or-nothing: any failure aborts it and surfaces the
/// originating [`SyncError`] unchanged, leaving previously cached results
/// untouched. The service keeps no state between cycles; the section
/// index and assignment list are cycle-local. Concurrent cycles are not
/// supported — callers must serialize them.
pub struct SyncService<R> {
    remote: R,
    project_name: String,
    assignment_label: String,
}

impl<R> SyncService<R> {
    /// Create a service mirroring `project_name`, filtered by
    /// `assignment_label` (empty = sync everything).
    pub fn new(remote: R, project_name: impl Into<String>, assignment_label: impl Into<String>) -> Self {
        Self {
            remote,
            project_name: project_name.into(),
            assignment_label: assignment_label.into(),
        }
    }

    /// Name of the mirrored project.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Configured deliverable label (may be empty).
    #[must_use]
    pub fn assignment_label(&self) -> &str {
        &self.assignment_label
    }
}

impl<R: RemoteSource> SyncService<R> {
    /// Run one sync cycle, stamping the result with `now`.
    ///
    /// Sequences project resolution, section load, task load, mapping,
    /// and aggregation; each step depends on the previous one's output.
    ///
    /// # Errors
    /// Propagates the first [`SyncError`] of any step unchanged.
    pub async fn run_cycle(&self, now: OffsetDateTime) -> Result<SyncResult, SyncError> {
        info!(project = %self.project_name, "Starting sync cycle");

        let projects = self.remote.list_projects().await?;
        let project_id = resolve_project(&self.project_name, &projects)?;
        info!(phase = "resolve_project", %project_id, "Resolved project");

        let sections = self.remote.list_sections(&project_id).await?;
        let section_index = SectionIndex::build(&sections);
        info!(phase = "load_sections", count = section_index.len(), "Indexed sections");

        let tasks = self.remote.list_tasks(&project_id).await?;
        info!(phase = "load_tasks", count = tasks.len(), "Loaded tasks");

        let assignments = map_tasks(&tasks, &section_index, &self.assignment_label);
        let modules = module_stats(&assignments, &section_index);
        info!(
            phase = "aggregate",
            assignments = assignments.len(),
            modules = modules.len(),
            "Sync cycle complete"
        );

        let last_sync = now.format(&Rfc3339).map_or_else(
            |err| {
                warn!(%err, "Failed to format sync timestamp");
                None
            },
            Some,
        );

        Ok(SyncResult {
            assignments,
            modules,
            last_sync,
        })
    }
}
