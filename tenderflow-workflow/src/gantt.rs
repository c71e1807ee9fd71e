//! Read-only Gantt projection over a set of work items.
//!
//! Pure function of the item list, re-derivable from persisted state at any
//! time; nothing here is stored.

use chrono::NaiveDate;
use shared_types::{WorkItem, WorkItemKind};

/// One horizontal bar, positioned as fractions of the timeline window.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttBar {
    pub item_id: String,
    pub name: String,
    pub kind: WorkItemKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub completion_pct: u8,
    /// Horizontal offset of the bar, 0.0 at the window start.
    pub offset_fraction: f64,
    /// Width of the bar; a same-day item still spans one day.
    pub width_fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GanttChart {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub total_days: i64,
    pub bars: Vec<GanttBar>,
}

/// Project the items onto a timeline spanning `[min(start), max(end)]`.
///
/// Items missing either date are excluded without error; `None` when no
/// item carries both dates.
pub fn project_timeline(items: &[&WorkItem]) -> Option<GanttChart> {
    let dated: Vec<(&WorkItem, NaiveDate, NaiveDate)> = items
        .iter()
        .filter_map(|item| Some((*item, item.start_date?, item.end_date?)))
        .collect();

    let window_start = dated.iter().map(|(_, start, _)| *start).min()?;
    let window_end = dated.iter().map(|(_, _, end)| *end).max()?;
    let total_days = ((window_end - window_start).num_days() + 1).max(1);

    let bars = dated
        .into_iter()
        .map(|(item, start, end)| {
            let offset_days = (start - window_start).num_days();
            let width_days = ((end - start).num_days() + 1).max(1);
            GanttBar {
                item_id: item.id.clone(),
                name: item.name.clone(),
                kind: item.kind,
                start,
                end,
                completion_pct: item.completion_pct,
                offset_fraction: offset_days as f64 / total_days as f64,
                width_fraction: width_days as f64 / total_days as f64,
            }
        })
        .collect();

    Some(GanttChart {
        window_start,
        window_end,
        total_days,
        bars,
    })
}
