//! Module statistics and time-window views derived from mapped assignments.

use std::collections::BTreeMap;

use time::{Duration, OffsetDateTime};
use tracing::warn;

use crate::due::parse_due;
use crate::mapper::SectionIndex;
use crate::model::{Assignment, Module, UNKNOWN_MODULE};

/// Horizon of the week-ahead view.
const WEEK: Duration = Duration::days(7);

/// Group assignments by module and accumulate completion statistics.
///
/// Assignments without a resolvable section form their own sentinel-named
/// group. Only modules with at least one matching assignment appear. The
/// result is ordered lexicographically by name (id is only a deterministic
/// tie-break); the remote ordering hint is carried from the section index.
#[must_use]
pub fn module_stats(assignments: &[Assignment], sections: &SectionIndex) -> Vec<Module> {
    let mut grouped: BTreeMap<Option<String>, Module> = BTreeMap::new();

    for assignment in assignments {
        let stats = grouped
            .entry(assignment.module_id.clone())
            .or_insert_with(|| Module {
                id: assignment.module_id.clone(),
                name: if assignment.module_name.is_empty() {
                    UNKNOWN_MODULE.to_owned()
                } else {
                    assignment.module_name.clone()
                },
                order: assignment
                    .module_id
                    .as_deref()
                    .and_then(|id| sections.get(id))
                    .map_or(0, |meta| meta.order),
                total: 0,
                completed: 0,
                upcoming: 0,
            });

        stats.total += 1;
        if assignment.completed {
            stats.completed += 1;
        } else {
            stats.upcoming += 1;
        }
    }

    let mut modules: Vec<Module> = grouped.into_values().collect();
    modules.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    modules
}

/// Select assignments due within `[from, to]`, inclusive at both bounds.
///
/// Undated assignments never match. Assignments whose due date does not
/// parse are skipped with a warning rather than aborting the computation.
/// Completed assignments are included; use
/// [`filter_window_outstanding`] to drop them.
#[must_use]
pub fn filter_window(assignments: &[Assignment], from: OffsetDateTime, to: OffsetDateTime) -> Vec<Assignment> {
    assignments
        .iter()
        .filter(|assignment| in_window(assignment, from, to))
        .cloned()
        .collect()
}

/// Like [`filter_window`], but additionally drops assignments already
/// marked completed — the "still-outstanding" view.
#[must_use]
pub fn filter_window_outstanding(
    assignments: &[Assignment],
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> Vec<Assignment> {
    assignments
        .iter()
        .filter(|assignment| !assignment.completed && in_window(assignment, from, to))
        .cloned()
        .collect()
}

/// Assignments due within the next seven days of `now`, completed included.
#[must_use]
pub fn week_view(assignments: &[Assignment], now: OffsetDateTime) -> Vec<Assignment> {
    filter_window(assignments, now, now + WEEK)
}

fn in_window(assignment: &Assignment, from: OffsetDateTime, to: OffsetDateTime) -> bool {
    let Some(raw) = assignment.due_date.as_deref() else {
        return false;
    };
    match parse_due(raw) {
        Some(due) => from <= due && due <= to,
        None => {
            warn!(assignment = %assignment.id, due = %raw, "Skipping assignment with unparseable due date");
            false
        }
    }
}
