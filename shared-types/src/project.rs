use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project phase. No ordering is enforced between phases; the status is a
/// flat label the user moves freely, mirroring the offer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "demarrage")]
    Kickoff,
    #[serde(rename = "planification")]
    Planning,
    #[serde(rename = "execution")]
    Execution,
    #[serde(rename = "suivi")]
    Monitoring,
    #[serde(rename = "cloture")]
    Closure,
    #[serde(rename = "termine")]
    Done,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Kickoff,
        ProjectStatus::Planning,
        ProjectStatus::Execution,
        ProjectStatus::Monitoring,
        ProjectStatus::Closure,
        ProjectStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Kickoff => "demarrage",
            ProjectStatus::Planning => "planification",
            ProjectStatus::Execution => "execution",
            ProjectStatus::Monitoring => "suivi",
            ProjectStatus::Closure => "cloture",
            ProjectStatus::Done => "termine",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown project status: {s}"))
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four schedulable work-breakdown entity kinds. One shape, one tag;
/// dependency resolution and the Gantt projection are uniform over the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItemKind {
    #[serde(rename = "jalon")]
    Milestone,
    #[serde(rename = "livrable")]
    Deliverable,
    #[serde(rename = "activite")]
    Activity,
    #[serde(rename = "tache")]
    Task,
}

impl WorkItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemKind::Milestone => "jalon",
            WorkItemKind::Deliverable => "livrable",
            WorkItemKind::Activity => "activite",
            WorkItemKind::Task => "tache",
        }
    }
}

impl std::fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorkItemStatus {
    #[default]
    #[serde(rename = "A faire")]
    Todo,
    #[serde(rename = "En cours")]
    InProgress,
    #[serde(rename = "Termine")]
    Done,
    #[serde(rename = "Bloque")]
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    #[serde(rename = "Basse")]
    Low,
    #[default]
    #[serde(rename = "Normale")]
    Normal,
    #[serde(rename = "Haute")]
    High,
    #[serde(rename = "Critique")]
    Critical,
}

/// A milestone, deliverable, activity or task.
///
/// Dependency ids reference other work items of any kind within the same
/// project; a self-reference is invalid. Resource ids reference the owning
/// project's resource pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkItemKind,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "date_debut", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "date_fin", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "duree_jours", default = "default_duration")]
    pub duration_days: i64,
    #[serde(rename = "statut", default)]
    pub status: WorkItemStatus,
    #[serde(rename = "priorite", default)]
    pub priority: Priority,
    #[serde(rename = "responsable_id", default)]
    pub responsible_id: Option<String>,
    #[serde(rename = "ressources_humaines", default)]
    pub human_resource_ids: Vec<String>,
    #[serde(rename = "ressources_materielles", default)]
    pub material_resource_ids: Vec<String>,
    #[serde(rename = "ressources_info", default)]
    pub informational_resource_ids: Vec<String>,
    #[serde(rename = "dependances", default)]
    pub dependency_ids: Vec<String>,
    #[serde(rename = "jalon_parent", default)]
    pub parent_milestone_id: Option<String>,
    #[serde(rename = "avancement_pct", default)]
    pub completion_pct: u8,
    #[serde(default)]
    pub notes: String,
    /// Only present on the monitoring copies of planning items.
    #[serde(rename = "notes_suivi", default, skip_serializing_if = "Option::is_none")]
    pub progress_notes: Option<String>,
}

fn default_duration() -> i64 {
    1
}

impl WorkItem {
    pub fn new(kind: WorkItemKind, name: impl Into<String>) -> Self {
        Self {
            id: crate::short_id(),
            kind,
            name: name.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            duration_days: 1,
            status: WorkItemStatus::Todo,
            priority: Priority::Normal,
            responsible_id: None,
            human_resource_ids: Vec::new(),
            material_resource_ids: Vec::new(),
            informational_resource_ids: Vec::new(),
            dependency_ids: Vec::new(),
            parent_milestone_id: None,
            completion_pct: 0,
            notes: String::new(),
            progress_notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub influence: String,
    #[serde(rename = "interet", default)]
    pub interest: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    #[serde(rename = "probabilite", default)]
    pub probability: String,
    #[serde(default)]
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KickoffPhase {
    #[serde(rename = "parties_prenantes", default)]
    pub stakeholders: Vec<Stakeholder>,
    #[serde(rename = "hypotheses", default)]
    pub assumptions: Vec<String>,
    #[serde(rename = "risques", default)]
    pub risks: Vec<Risk>,
    #[serde(rename = "plan_communication", default)]
    pub communication_plan: Vec<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningPhase {
    #[serde(rename = "date_debut", default)]
    pub start_date: String,
    #[serde(rename = "date_fin", default)]
    pub end_date: String,
    #[serde(rename = "jalons", default)]
    pub milestones: Vec<WorkItem>,
    #[serde(rename = "livrables", default)]
    pub deliverables: Vec<WorkItem>,
    #[serde(rename = "activites", default)]
    pub activities: Vec<WorkItem>,
    #[serde(rename = "taches", default)]
    pub tasks: Vec<WorkItem>,
    #[serde(rename = "chemin_critique", default)]
    pub critical_path: Vec<String>,
}

impl PlanningPhase {
    /// Flattened view of all work items, every kind together, as used for
    /// dependency selection and the Gantt projection.
    pub fn all_items(&self) -> Vec<&WorkItem> {
        self.milestones
            .iter()
            .chain(self.deliverables.iter())
            .chain(self.activities.iter())
            .chain(self.tasks.iter())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "titre", default)]
    pub title: String,
    #[serde(default)]
    pub participants: String,
    #[serde(rename = "lieu", default)]
    pub location: String,
    #[serde(rename = "ordre_du_jour", default)]
    pub agenda: String,
    #[serde(default)]
    pub decisions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPhase {
    #[serde(rename = "jalons", default)]
    pub milestones: Vec<WorkItem>,
    #[serde(rename = "livrables", default)]
    pub deliverables: Vec<WorkItem>,
    #[serde(rename = "activites", default)]
    pub activities: Vec<WorkItem>,
    #[serde(rename = "taches", default)]
    pub tasks: Vec<WorkItem>,
    #[serde(rename = "reunions", default)]
    pub meetings: Vec<Meeting>,
    #[serde(rename = "alertes", default)]
    pub alerts: Vec<String>,
}

impl MonitoringPhase {
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
            && self.deliverables.is_empty()
            && self.activities.is_empty()
            && self.tasks.is_empty()
    }

    pub fn all_items(&self) -> Vec<&WorkItem> {
        self.milestones
            .iter()
            .chain(self.deliverables.iter())
            .chain(self.activities.iter())
            .chain(self.tasks.iter())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureRecord {
    #[serde(rename = "type")]
    pub kind: WorkItemKind,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "date_fermeture")]
    pub closed_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClosurePhase {
    #[serde(rename = "elements_fermes", default)]
    pub closed_items: Vec<ClosureRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Postmortem {
    #[serde(rename = "points_forts", default)]
    pub strengths: Vec<String>,
    #[serde(rename = "ameliorations", default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    #[serde(rename = "planifie", default)]
    pub planned: f64,
    #[serde(rename = "reel", default)]
    pub actual: f64,
    #[serde(default)]
    pub variance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationSnapshot {
    #[serde(rename = "planifiee_jours", default)]
    pub planned_days: i64,
    #[serde(rename = "reelle_jours", default)]
    pub actual_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanResource {
    pub id: String,
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "taux_horaire", default)]
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialResource {
    pub id: String,
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(rename = "quantite", default)]
    pub quantity: f64,
    #[serde(rename = "unite", default)]
    pub unit: String,
    #[serde(rename = "cout_unitaire", default)]
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationalResource {
    pub id: String,
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

/// Resource pools owned by the project and referenced by work items via id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectResources {
    #[serde(rename = "humaines", default)]
    pub human: Vec<HumanResource>,
    #[serde(rename = "materielles", default)]
    pub material: Vec<MaterialResource>,
    #[serde(rename = "informationnelles", default)]
    pub informational: Vec<InformationalResource>,
}

/// A project spawned from an accepted offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "projet_id")]
    pub id: String,
    #[serde(rename = "offre_id")]
    pub offer_id: String,
    #[serde(rename = "entreprise_id")]
    pub company_id: String,
    #[serde(rename = "offre_reference", default)]
    pub offer_reference: String,
    #[serde(rename = "nom_projet", default)]
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(rename = "statut")]
    pub status: ProjectStatus,
    #[serde(rename = "date_creation")]
    pub created_at: String,
    #[serde(rename = "demarrage", default)]
    pub kickoff: KickoffPhase,
    #[serde(rename = "planification", default)]
    pub planning: PlanningPhase,
    #[serde(rename = "suivi", default)]
    pub monitoring: MonitoringPhase,
    #[serde(rename = "cloture", default)]
    pub closure: ClosurePhase,
    #[serde(default)]
    pub postmortem: Postmortem,
    #[serde(rename = "budget", default)]
    pub budget: BudgetSnapshot,
    #[serde(rename = "duree", default)]
    pub duration: DurationSnapshot,
    #[serde(rename = "ressources_projet", default)]
    pub resources: ProjectResources,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_item_round_trips_persisted_keys() {
        let item = WorkItem::new(WorkItemKind::Task, "Coffrage");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "tache");
        assert_eq!(value["statut"], "A faire");
        assert_eq!(value["priorite"], "Normale");
        assert!(value.get("notes_suivi").is_none());

        let back: WorkItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn planning_all_items_spans_every_kind() {
        let mut plan = PlanningPhase::default();
        plan.milestones.push(WorkItem::new(WorkItemKind::Milestone, "J1"));
        plan.deliverables.push(WorkItem::new(WorkItemKind::Deliverable, "L1"));
        plan.activities.push(WorkItem::new(WorkItemKind::Activity, "A1"));
        plan.tasks.push(WorkItem::new(WorkItemKind::Task, "T1"));
        assert_eq!(plan.all_items().len(), 4);
    }

    #[test]
    fn project_status_parses_persisted_names() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
    }
}
