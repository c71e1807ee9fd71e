pub mod company;
pub mod offer;
pub mod project;
pub mod submission;

pub use company::{CompanyProfile, PriorProject, TeamProfileMember};
pub use offer::{
    BudgetLineItem, CalendarMilestone, ConformityReport, FinancialOffer, MethodologicalApproach,
    OfferBundle, OfferRecord, OfferStatus, OfferedDeliverable, Phase, RequirementRecord,
    TeamMember, TechnicalOffer,
};
pub use project::{
    BudgetSnapshot, ClosurePhase, ClosureRecord, DurationSnapshot, HumanResource,
    InformationalResource, KickoffPhase, MaterialResource, Meeting, MonitoringPhase,
    PlanningPhase, Postmortem, Priority, Project, ProjectResources, ProjectStatus, Risk,
    Stakeholder, WorkItem, WorkItemKind, WorkItemStatus,
};
pub use submission::{Recommendation, TenderSubmission};

/// Short random identifier used for work items and project resources.
///
/// Matches the persisted format of the original records: the first eight
/// characters of a v4 UUID.
pub fn short_id() -> String {
    uuid::Uuid::new_v4().to_string()[..8].to_string()
}
