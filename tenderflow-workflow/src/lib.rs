//! Persistence and lifecycle management for the tender workflow: SQLite
//! storage, the offer upsert-by-submission lifecycle, project creation from
//! accepted offers with work-breakdown editing, and the Gantt projection.

pub mod config;
pub mod error;
pub mod gantt;
pub mod offers;
pub mod projects;
pub mod storage;

pub use config::WorkflowConfig;
pub use error::StoreError;
pub use gantt::{project_timeline, GanttBar, GanttChart};
pub use offers::{OfferLifecycle, OfferSummary};
pub use projects::{
    add_work_item, advance_to_monitoring, close_item, remove_work_item, update_postmortem,
    update_work_item, validate_work_item, ProjectError, ProjectLifecycle, DEFAULT_HOURLY_RATE,
};
pub use storage::Database;
