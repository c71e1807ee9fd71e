use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured requirements extracted from one tender document.
///
/// Field names serialize to the French keys the extraction prompt asks the
/// delegate to produce, which are also the keys persisted inside an offer's
/// `contenu` column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementRecord {
    #[serde(rename = "numero_projet", default)]
    pub project_number: String,
    #[serde(rename = "nom_projet", default)]
    pub project_name: String,
    #[serde(default)]
    pub client: String,
    #[serde(rename = "date_cloture", default)]
    pub closing_date: String,
    #[serde(rename = "duree_projet", default)]
    pub duration: String,
    #[serde(rename = "budget_estime", default)]
    pub estimated_budget: String,
    #[serde(rename = "sommaire", default)]
    pub summary: String,
    #[serde(rename = "methodologie_requise", default)]
    pub required_methodology: Vec<String>,
    #[serde(rename = "livrables", default)]
    pub deliverables: Vec<String>,
    #[serde(rename = "exigences_techniques", default)]
    pub technical_requirements: Vec<String>,
    #[serde(rename = "criteres_evaluation", default)]
    pub evaluation_criteria: Vec<String>,
    #[serde(rename = "documents_requis", default)]
    pub required_documents: Vec<String>,
}

/// One phase of the methodological approach. The duration is free text
/// (e.g. "10 jours"); the financial calculator parses it best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "duree", default)]
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodologicalApproach {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub role: String,
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub experience: String,
    #[serde(rename = "responsabilites", default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferedDeliverable {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub format: String,
}

/// Free-text calendar entry of the generated offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarMilestone {
    #[serde(rename = "etape", default)]
    pub stage: String,
    #[serde(rename = "date_debut", default)]
    pub start: String,
    #[serde(rename = "date_fin", default)]
    pub end: String,
}

/// Technical offer generated from the requirements, freely editable by the
/// user before saving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalOffer {
    #[serde(rename = "titre_offre", default)]
    pub title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(rename = "comprehension_projet", default)]
    pub project_understanding: String,
    #[serde(rename = "approche_methodologique", default)]
    pub approach: MethodologicalApproach,
    #[serde(rename = "equipe_proposee", default)]
    pub team: Vec<TeamMember>,
    #[serde(rename = "livrables", default)]
    pub deliverables: Vec<OfferedDeliverable>,
    #[serde(rename = "calendrier", default)]
    pub calendar: Vec<CalendarMilestone>,
    #[serde(rename = "garanties_qualite", default)]
    pub quality_guarantees: Vec<String>,
    #[serde(rename = "references_clients", default)]
    pub client_references: String,
    #[serde(rename = "avantages_concurrentiels", default)]
    pub competitive_advantages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    #[serde(default)]
    pub description: String,
    /// Hours.
    #[serde(rename = "quantite", default)]
    pub quantity: f64,
    #[serde(rename = "unite", default)]
    pub unit: String,
    #[serde(rename = "prix_unitaire", default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total: f64,
}

/// Financial offer derived from the technical offer's phases.
///
/// Invariants (re-established by `recompute_totals` after every edit):
/// `total_ht == Σ line.total`, `taxes == total_ht * 0.14975`,
/// `total_ttc == total_ht + taxes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialOffer {
    #[serde(rename = "taux_horaire_base", default)]
    pub base_hourly_rate: f64,
    #[serde(rename = "postes_budgetaires", default)]
    pub line_items: Vec<BudgetLineItem>,
    #[serde(rename = "total_heures", default)]
    pub total_hours: f64,
    #[serde(rename = "total_ht", default)]
    pub subtotal: f64,
    #[serde(default)]
    pub taxes: f64,
    #[serde(rename = "total_ttc", default)]
    pub total_with_tax: f64,
}

/// Advisory conformity assessment. Never blocks a save or a status change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConformityReport {
    #[serde(rename = "conforme")]
    pub compliant: bool,
    #[serde(rename = "points_conformes", default)]
    pub compliant_points: Vec<String>,
    #[serde(rename = "points_manquants", default)]
    pub missing_points: Vec<String>,
    #[serde(rename = "recommandations", default)]
    pub recommendations: Vec<String>,
    #[serde(rename = "score_conformite", default)]
    pub score: u8,
}

/// The complete offer content persisted in the `contenu` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferBundle {
    #[serde(rename = "exigences")]
    pub requirements: RequirementRecord,
    #[serde(rename = "offre_technique")]
    pub technical_offer: TechnicalOffer,
    #[serde(rename = "offre_financiere")]
    pub financial_offer: FinancialOffer,
    #[serde(rename = "conformite", default, skip_serializing_if = "Option::is_none")]
    pub conformity: Option<ConformityReport>,
    #[serde(rename = "date_creation")]
    pub created_at: String,
}

/// Lifecycle status of a saved offer. Transitions are user-driven and
/// unconstrained: any status may be overwritten with any other. Only
/// `Accepted` makes the offer eligible for project creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    #[serde(rename = "brouillon")]
    Draft,
    #[serde(rename = "a_valider")]
    ToValidate,
    #[serde(rename = "validee")]
    Validated,
    #[serde(rename = "envoyee")]
    Sent,
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "acceptee")]
    Accepted,
    #[serde(rename = "refusee")]
    Refused,
}

impl OfferStatus {
    pub const ALL: [OfferStatus; 7] = [
        OfferStatus::Draft,
        OfferStatus::ToValidate,
        OfferStatus::Validated,
        OfferStatus::Sent,
        OfferStatus::Pending,
        OfferStatus::Accepted,
        OfferStatus::Refused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Draft => "brouillon",
            OfferStatus::ToValidate => "a_valider",
            OfferStatus::Validated => "validee",
            OfferStatus::Sent => "envoyee",
            OfferStatus::Pending => "en_attente",
            OfferStatus::Accepted => "acceptee",
            OfferStatus::Refused => "refusee",
        }
    }
}

impl std::str::FromStr for OfferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown offer status: {s}"))
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted offer row. At most one row exists per tender submission;
/// saving again updates the row in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRecord {
    pub id: String,
    #[serde(rename = "entreprise_id")]
    pub company_id: String,
    #[serde(rename = "soumission_id")]
    pub submission_id: String,
    #[serde(rename = "statut")]
    pub status: OfferStatus,
    #[serde(rename = "contenu")]
    pub content: OfferBundle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfferRecord {
    /// Display name with the same fallback chain as the original catalogue:
    /// technical-offer title, then extracted project name, then a truncated id.
    pub fn display_name(&self) -> String {
        let title = &self.content.technical_offer.title;
        if !title.is_empty() {
            return title.clone();
        }
        let name = &self.content.requirements.project_name;
        if !name.is_empty() {
            return name.clone();
        }
        format!("Offre {}", &self.id[..self.id.len().min(8)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_status_round_trips_through_persisted_names() {
        for status in OfferStatus::ALL {
            let parsed: OfferStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("acceptée".parse::<OfferStatus>().is_err());
    }

    #[test]
    fn bundle_serializes_with_french_keys() {
        let bundle = OfferBundle {
            requirements: RequirementRecord::default(),
            technical_offer: TechnicalOffer::default(),
            financial_offer: FinancialOffer::default(),
            conformity: None,
            created_at: "2024-06-01".to_string(),
        };
        let value = serde_json::to_value(&bundle).unwrap();
        assert!(value.get("exigences").is_some());
        assert!(value.get("offre_technique").is_some());
        assert!(value.get("offre_financiere").is_some());
        assert!(value.get("conformite").is_none());
        assert!(value.get("date_creation").is_some());
    }

    #[test]
    fn requirement_record_tolerates_missing_keys() {
        let record: RequirementRecord =
            serde_json::from_str(r#"{"nom_projet": "Centre sportif"}"#).unwrap();
        assert_eq!(record.project_name, "Centre sportif");
        assert!(record.deliverables.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_requirements_then_id() {
        let mut record = OfferRecord {
            id: "abcdef123456".to_string(),
            company_id: "c1".to_string(),
            submission_id: "s1".to_string(),
            status: OfferStatus::Draft,
            content: OfferBundle {
                requirements: RequirementRecord::default(),
                technical_offer: TechnicalOffer::default(),
                financial_offer: FinancialOffer::default(),
                conformity: None,
                created_at: String::new(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(record.display_name(), "Offre abcdef12");
        record.content.requirements.project_name = "Pont Champlain".to_string();
        assert_eq!(record.display_name(), "Pont Champlain");
        record.content.technical_offer.title = "Offre de services".to_string();
        assert_eq!(record.display_name(), "Offre de services");
    }
}
