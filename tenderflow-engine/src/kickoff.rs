//! Kickoff suggestions for a project spawned from an accepted offer.
//!
//! One delegate call proposing stakeholders, risks, inclusions and
//! exclusions. Suggestions are a convenience: any failure degrades to an
//! empty set and never blocks project creation.

use std::sync::Arc;

use serde::Deserialize;
use shared_types::{CompanyProfile, OfferBundle, Risk, Stakeholder};
use tenderflow_llm_sdk::CompletionManager;
use tracing::warn;

use crate::structured::slice_outer_object;

const KICKOFF_MAX_TOKENS: u32 = 1500;

/// Delegate-suggested seed content for a new project's kickoff phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KickoffSuggestions {
    #[serde(rename = "parties_prenantes", default)]
    pub stakeholders: Vec<Stakeholder>,
    #[serde(rename = "risques", default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

impl KickoffSuggestions {
    pub fn is_empty(&self) -> bool {
        self.stakeholders.is_empty()
            && self.risks.is_empty()
            && self.inclusions.is_empty()
            && self.exclusions.is_empty()
    }
}

pub struct KickoffAdvisor {
    manager: Arc<CompletionManager>,
}

impl KickoffAdvisor {
    pub fn new(manager: Arc<CompletionManager>) -> Self {
        Self { manager }
    }

    /// Suggest kickoff elements for the offer. Never fails: provider errors
    /// and malformed responses yield empty suggestions.
    pub async fn suggest(&self, offer: &OfferBundle, company: &CompanyProfile) -> KickoffSuggestions {
        let project_name = if offer.technical_offer.title.is_empty() {
            offer.requirements.project_name.as_str()
        } else {
            offer.technical_offer.title.as_str()
        };
        let prompt = build_kickoff_prompt(project_name, company);

        let completion = match self.manager.analyze(prompt, KICKOFF_MAX_TOKENS).await {
            Ok(completion) => completion,
            Err(e) => {
                warn!(error = %e, "kickoff suggestions unavailable");
                return KickoffSuggestions::default();
            }
        };

        let Some(object) = slice_outer_object(&completion.text) else {
            warn!("kickoff response contained no JSON object");
            return KickoffSuggestions::default();
        };

        match serde_json::from_str(object) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, "kickoff suggestions not parsable");
                KickoffSuggestions::default()
            }
        }
    }
}

fn build_kickoff_prompt(project_name: &str, company: &CompanyProfile) -> String {
    format!(
        r#"Analyse cette offre et suggere des elements de demarrage.
Projet: {project_name}  Entreprise: {company_name}
Specialites: {specialties}

JSON uniquement:
{{
  "parties_prenantes": [{{"nom":"Client","role":"Commanditaire","influence":"Elevee","interet":"Eleve"}}],
  "risques": [{{"description":"Retard","impact":"Moyen","probabilite":"Moyenne","mitigation":"Suivi hebdo"}}],
  "inclusions": ["Installation selon plans"], "exclusions": ["Travaux civils"]
}}"#,
        company_name = company.name,
        specialties = company.specialties.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stub_manager;
    use shared_types::{FinancialOffer, RequirementRecord, TechnicalOffer};

    fn sample_bundle() -> OfferBundle {
        OfferBundle {
            requirements: RequirementRecord {
                project_name: "Pont Champlain".to_string(),
                ..Default::default()
            },
            technical_offer: TechnicalOffer::default(),
            financial_offer: FinancialOffer::default(),
            conformity: None,
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn suggest_parses_object_out_of_prose() {
        let manager = stub_manager(Ok(
            "Voici mes suggestions :\n{\"inclusions\": [\"Installation\"], \"exclusions\": []}",
        ));
        let advisor = KickoffAdvisor::new(manager);

        let suggestions = advisor
            .suggest(&sample_bundle(), &CompanyProfile::default())
            .await;
        assert_eq!(suggestions.inclusions, vec!["Installation".to_string()]);
    }

    #[tokio::test]
    async fn suggest_degrades_to_empty_on_provider_failure() {
        let manager = stub_manager(Err("quota exceeded"));
        let advisor = KickoffAdvisor::new(manager);

        let suggestions = advisor
            .suggest(&sample_bundle(), &CompanyProfile::default())
            .await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn suggest_degrades_to_empty_on_malformed_json() {
        let manager = stub_manager(Ok("{pas du json valide"));
        let advisor = KickoffAdvisor::new(manager);

        let suggestions = advisor
            .suggest(&sample_bundle(), &CompanyProfile::default())
            .await;
        assert!(suggestions.is_empty());
    }

    #[test]
    fn prompt_prefers_offer_title_then_project_name() {
        let bundle = sample_bundle();
        let name = if bundle.technical_offer.title.is_empty() {
            bundle.requirements.project_name.as_str()
        } else {
            bundle.technical_offer.title.as_str()
        };
        assert_eq!(name, "Pont Champlain");
    }
}
