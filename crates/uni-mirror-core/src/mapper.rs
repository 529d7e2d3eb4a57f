//! Conversion of raw remote records into validated domain entities.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::due::DUE_SENTINEL;
use crate::error::SyncError;
use crate::model::{Assignment, UNKNOWN_MODULE};
use crate::remote::{RemoteProject, RemoteSection, RemoteTask};

/// Resolve a project display name to its remote identifier.
///
/// Matching is a case-insensitive exact comparison. When two remote
/// projects share the same case-insensitive name the behavior is
/// undefined upstream; the first match wins.
///
/// # Errors
/// Returns [`SyncError::ProjectNotFound`] when no project matches.
pub fn resolve_project(name: &str, projects: &[RemoteProject]) -> Result<String, SyncError> {
    let wanted = name.to_lowercase();
    projects
        .iter()
        .find(|project| project.name.to_lowercase() == wanted)
        .map(|project| project.id.clone())
        .ok_or_else(|| SyncError::ProjectNotFound(name.to_owned()))
}

/// Per-section metadata kept for the duration of one sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMeta {
    /// Section display name.
    pub name: String,
    /// Remote ordering hint.
    pub order: i64,
}

/// Lookup from section id to display metadata, cycle-local.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    sections: BTreeMap<String, SectionMeta>,
}

impl SectionIndex {
    /// Index the sections of a project by id.
    #[must_use]
    pub fn build(sections: &[RemoteSection]) -> Self {
        let sections = sections
            .iter()
            .map(|section| {
                (
                    section.id.clone(),
                    SectionMeta {
                        name: section.name.clone(),
                        order: section.order,
                    },
                )
            })
            .collect();
        Self { sections }
    }

    /// Look up a section by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SectionMeta> {
        self.sections.get(id)
    }

    /// Number of indexed sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Map raw tasks into [`Assignment`]s.
///
/// A non-empty `label_filter` keeps only tasks carrying that label
/// (case-insensitive); an empty filter keeps every task. Missing due
/// dates and unresolvable sections are defaulted, never an error. The
/// output is sorted ascending by due date with undated assignments last.
#[must_use]
pub fn map_tasks(tasks: &[RemoteTask], sections: &SectionIndex, label_filter: &str) -> Vec<Assignment> {
    let filter = label_filter.trim().to_lowercase();

    let mut assignments: Vec<Assignment> = tasks
        .iter()
        .filter(|task| filter.is_empty() || carries_label(task, &filter))
        .map(|task| map_task(task, sections))
        .collect();

    // Missing dates sort last via the maximal sentinel; the sort is stable,
    // so identical input yields identical output.
    assignments.sort_by(|a, b| {
        a.due_date
            .as_deref()
            .unwrap_or(DUE_SENTINEL)
            .cmp(b.due_date.as_deref().unwrap_or(DUE_SENTINEL))
    });

    debug!(count = assignments.len(), "Mapped assignments");
    assignments
}

fn carries_label(task: &RemoteTask, filter_lower: &str) -> bool {
    task.labels
        .iter()
        .any(|label| label.to_lowercase() == filter_lower)
}

fn map_task(task: &RemoteTask, sections: &SectionIndex) -> Assignment {
    let due_date = task.due.as_ref().and_then(|due| due.date.clone());

    let (module_id, module_name) = match task.section_id.as_deref() {
        Some(section_id) => sections.get(section_id).map_or_else(
            || {
                warn!(task = %task.id, section = %section_id, "Section not in index, using sentinel");
                (None, UNKNOWN_MODULE.to_owned())
            },
            |meta| (Some(section_id.to_owned()), meta.name.clone()),
        ),
        None => (None, UNKNOWN_MODULE.to_owned()),
    };

    Assignment {
        id: task.id.clone(),
        title: task.content.clone(),
        description: task.description.clone(),
        due_date,
        module_id,
        module_name,
        priority: task.priority,
        completed: task.is_completed,
        url: task.url.clone(),
        created_at: task.created_at.clone(),
        labels: task.labels.iter().cloned().collect(),
    }
}
