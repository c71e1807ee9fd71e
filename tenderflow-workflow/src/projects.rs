//! Project lifecycle: creation from an accepted offer, work-breakdown
//! editing with validation, monitoring seeding, closure and postmortem.
//!
//! The project under edit is a plain in-memory [`Project`]; persistence is
//! an explicit save (upsert keyed by the project id). Phase statuses are a
//! flat enumeration with free reassignment, like offer statuses.

use std::sync::Arc;

use chrono::{Local, Utc};
use shared_types::{
    ClosureRecord, CompanyProfile, HumanResource, OfferRecord, OfferStatus, Postmortem, Project,
    ProjectStatus, WorkItem, WorkItemKind, WorkItemStatus,
};
use thiserror::Error;
use tracing::info;

use crate::error::StoreError;
use crate::storage::Database;

/// Hourly rate assigned to human resources seeded from the company team.
pub const DEFAULT_HOURLY_RATE: f64 = 75.0;

#[derive(Error, Debug)]
pub enum ProjectError {
    /// Only an accepted offer may spawn a project.
    #[error("offer {offer_id} has status {status}, only accepted offers may start a project")]
    OfferNotAccepted {
        offer_id: String,
        status: OfferStatus,
    },

    #[error("work item {item_id} cannot depend on itself")]
    SelfDependency { item_id: String },

    #[error("dependency {dependency_id} does not reference a work item of this project")]
    UnknownDependency { dependency_id: String },

    #[error("resource {resource_id} does not reference a resource pool of this project")]
    UnknownResource { resource_id: String },

    #[error("work item not found: {item_id}")]
    UnknownItem { item_id: String },

    /// Closing requires 100% completion and a done status.
    #[error("work item {item_id} is not finished, cannot close it")]
    NotClosable { item_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ProjectLifecycle {
    db: Arc<Database>,
}

impl ProjectLifecycle {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Build a fresh project from an accepted offer. Name, client and
    /// reference are seeded from the offer content; human resources come
    /// from the company team profile at the default rate. Nothing is
    /// persisted until [`ProjectLifecycle::save`].
    pub fn create_from_offer(
        &self,
        offer: &OfferRecord,
        company: &CompanyProfile,
    ) -> Result<Project, ProjectError> {
        if offer.status != OfferStatus::Accepted {
            return Err(ProjectError::OfferNotAccepted {
                offer_id: offer.id.clone(),
                status: offer.status,
            });
        }

        let requirements = &offer.content.requirements;
        let client = if requirements.client.is_empty() {
            "N/A".to_string()
        } else {
            requirements.client.clone()
        };

        let project = Project {
            id: format!("proj_{}", Local::now().format("%Y%m%d%H%M%S")),
            offer_id: offer.id.clone(),
            company_id: offer.company_id.clone(),
            offer_reference: requirements.project_number.clone(),
            name: offer.display_name(),
            client,
            status: ProjectStatus::Kickoff,
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            kickoff: Default::default(),
            planning: Default::default(),
            monitoring: Default::default(),
            closure: Default::default(),
            postmortem: Default::default(),
            budget: Default::default(),
            duration: Default::default(),
            resources: Default::default(),
        };

        let mut project = project;
        project.resources.human = company
            .team
            .iter()
            .map(|member| HumanResource {
                id: shared_types::short_id(),
                name: member.name.clone(),
                role: member.position.clone(),
                hourly_rate: DEFAULT_HOURLY_RATE,
            })
            .collect();

        info!(project_id = %project.id, offer_id = %offer.id, "project created from offer");
        Ok(project)
    }

    pub fn save(&self, project: &Project) -> Result<(), ProjectError> {
        self.db.upsert_project(project)?;
        Ok(())
    }

    pub fn load(&self, project_id: &str) -> Result<Project, ProjectError> {
        Ok(self.db.get_project(project_id)?)
    }

    pub fn list(&self, company_id: &str) -> Result<Vec<Project>, ProjectError> {
        Ok(self.db.list_projects(company_id)?)
    }
}

/// Validate a work item against the project it belongs to: no
/// self-dependency, dependencies resolve in the cross-type item set,
/// resource ids resolve in the project pools.
pub fn validate_work_item(project: &Project, item: &WorkItem) -> Result<(), ProjectError> {
    for dependency_id in &item.dependency_ids {
        if *dependency_id == item.id {
            return Err(ProjectError::SelfDependency {
                item_id: item.id.clone(),
            });
        }
        let known = project
            .planning
            .all_items()
            .iter()
            .any(|other| other.id == *dependency_id);
        if !known {
            return Err(ProjectError::UnknownDependency {
                dependency_id: dependency_id.clone(),
            });
        }
    }

    for resource_id in &item.human_resource_ids {
        if !project.resources.human.iter().any(|r| r.id == *resource_id) {
            return Err(ProjectError::UnknownResource {
                resource_id: resource_id.clone(),
            });
        }
    }
    for resource_id in &item.material_resource_ids {
        if !project.resources.material.iter().any(|r| r.id == *resource_id) {
            return Err(ProjectError::UnknownResource {
                resource_id: resource_id.clone(),
            });
        }
    }
    for resource_id in &item.informational_resource_ids {
        if !project
            .resources
            .informational
            .iter()
            .any(|r| r.id == *resource_id)
        {
            return Err(ProjectError::UnknownResource {
                resource_id: resource_id.clone(),
            });
        }
    }

    Ok(())
}

fn planning_list(project: &mut Project, kind: WorkItemKind) -> &mut Vec<WorkItem> {
    match kind {
        WorkItemKind::Milestone => &mut project.planning.milestones,
        WorkItemKind::Deliverable => &mut project.planning.deliverables,
        WorkItemKind::Activity => &mut project.planning.activities,
        WorkItemKind::Task => &mut project.planning.tasks,
    }
}

/// Add a work item to the planning list matching its kind.
pub fn add_work_item(project: &mut Project, item: WorkItem) -> Result<(), ProjectError> {
    validate_work_item(project, &item)?;
    planning_list(project, item.kind).push(item);
    Ok(())
}

/// Replace the planning item with the same id.
pub fn update_work_item(project: &mut Project, item: WorkItem) -> Result<(), ProjectError> {
    validate_work_item(project, &item)?;
    let list = planning_list(project, item.kind);
    let Some(slot) = list.iter_mut().find(|existing| existing.id == item.id) else {
        return Err(ProjectError::UnknownItem {
            item_id: item.id.clone(),
        });
    };
    *slot = item;
    Ok(())
}

/// Remove a planning item by id, whatever its kind, and prune references to
/// it from the remaining items' dependency lists.
pub fn remove_work_item(project: &mut Project, item_id: &str) -> Result<WorkItem, ProjectError> {
    let removed = [
        WorkItemKind::Milestone,
        WorkItemKind::Deliverable,
        WorkItemKind::Activity,
        WorkItemKind::Task,
    ]
    .into_iter()
    .find_map(|kind| {
        let list = planning_list(project, kind);
        let idx = list.iter().position(|item| item.id == item_id)?;
        Some(list.remove(idx))
    });

    let Some(removed) = removed else {
        return Err(ProjectError::UnknownItem {
            item_id: item_id.to_string(),
        });
    };

    for kind in [
        WorkItemKind::Milestone,
        WorkItemKind::Deliverable,
        WorkItemKind::Activity,
        WorkItemKind::Task,
    ] {
        for item in planning_list(project, kind).iter_mut() {
            item.dependency_ids.retain(|id| id != item_id);
            if item.parent_milestone_id.as_deref() == Some(item_id) {
                item.parent_milestone_id = None;
            }
        }
    }

    Ok(removed)
}

/// Move the project to monitoring. Empty monitoring lists are seeded from
/// planning by deep copy, each copy gaining an empty progress-notes field;
/// non-empty lists are left alone so re-entering the phase never resets
/// tracked progress.
pub fn advance_to_monitoring(project: &mut Project) {
    project.status = ProjectStatus::Monitoring;
    seed_tracking(&project.planning.milestones, &mut project.monitoring.milestones);
    seed_tracking(
        &project.planning.deliverables,
        &mut project.monitoring.deliverables,
    );
    seed_tracking(&project.planning.activities, &mut project.monitoring.activities);
    seed_tracking(&project.planning.tasks, &mut project.monitoring.tasks);
}

fn seed_tracking(plan: &[WorkItem], tracked: &mut Vec<WorkItem>) {
    if !tracked.is_empty() || plan.is_empty() {
        return;
    }
    *tracked = plan
        .iter()
        .cloned()
        .map(|mut item| {
            item.progress_notes = Some(String::new());
            item
        })
        .collect();
}

/// Close a tracked item: only allowed at 100% completion with a done
/// status. Appends a closure record with the current timestamp.
pub fn close_item(project: &mut Project, item_id: &str) -> Result<(), ProjectError> {
    let item = project
        .monitoring
        .all_items()
        .into_iter()
        .find(|item| item.id == item_id)
        .cloned()
        .ok_or_else(|| ProjectError::UnknownItem {
            item_id: item_id.to_string(),
        })?;

    if item.completion_pct != 100 || item.status != WorkItemStatus::Done {
        return Err(ProjectError::NotClosable {
            item_id: item_id.to_string(),
        });
    }

    project.closure.closed_items.push(ClosureRecord {
        kind: item.kind,
        name: item.name,
        closed_at: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    });
    Ok(())
}

/// Apply postmortem edits. A no-op unless the project is done; returns
/// whether the edit was applied.
pub fn update_postmortem(project: &mut Project, postmortem: Postmortem) -> bool {
    if project.status != ProjectStatus::Done {
        return false;
    }
    project.postmortem = postmortem;
    true
}
