//! Domain model and synchronization logic for uni-mirror.
//!
//! Converts the loosely-typed Todoist schema (projects, sections, tasks)
//! into the local assignment/module model and derives aggregates from it.
//! All remote I/O happens behind the [`RemoteSource`] trait.

/// Statistics and time-window views over mapped assignments.
pub mod aggregate;
/// Due-date parsing helpers.
pub mod due;
/// Error taxonomy shared across the sync pipeline.
pub mod error;
/// Raw records into validated domain entities.
pub mod mapper;
/// Local domain entities.
pub mod model;
/// Raw remote records and the remote-source contract.
pub mod remote;

pub use aggregate::{filter_window, filter_window_outstanding, module_stats, week_view};
pub use error::SyncError;
pub use mapper::{SectionIndex, map_tasks, resolve_project};
pub use model::{Assignment, Module, SyncResult, UNKNOWN_MODULE};
pub use remote::{RemoteDue, RemoteProject, RemoteSection, RemoteSource, RemoteTask};
