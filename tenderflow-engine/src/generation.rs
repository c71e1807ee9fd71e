//! Technical-offer generation from extracted requirements and history.

use std::sync::Arc;

use shared_types::{CompanyProfile, PriorProject, RequirementRecord, TechnicalOffer};
use tenderflow_llm_sdk::{CompletionManager, LlmError};
use thiserror::Error;
use tracing::debug;

use crate::structured::strip_code_fences;

const GENERATION_MAX_TOKENS: u32 = 3000;

/// Sentinel embedded in the prompt when the company has no history.
const NO_PRIOR_PROJECT: &str = "Aucun projet antérieur.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Erreur génération : {0}")]
    Provider(#[from] LlmError),

    #[error("Erreur parsing : {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Requirements could not be serialized into the prompt.
    #[error("Exigences non sérialisables : {0}")]
    InvalidRequirements(serde_json::Error),
}

/// Generates a [`TechnicalOffer`] scaffold from the requirement record, the
/// company's prior similar projects and its profile. The result is freely
/// editable by the user before saving.
pub struct OfferGenerator {
    manager: Arc<CompletionManager>,
}

impl OfferGenerator {
    pub fn new(manager: Arc<CompletionManager>) -> Self {
        Self { manager }
    }

    pub async fn generate(
        &self,
        requirements: &RequirementRecord,
        prior_projects: &[PriorProject],
        company: &CompanyProfile,
    ) -> Result<TechnicalOffer, GenerationError> {
        let requirements_json = serde_json::to_string_pretty(requirements)
            .map_err(GenerationError::InvalidRequirements)?;
        let prompt = build_generation_prompt(
            company,
            &prior_projects_digest(prior_projects),
            &requirements_json,
        );

        let completion = self.manager.analyze(prompt, GENERATION_MAX_TOKENS).await?;
        debug!(provider = %completion.provider, "generation response received");

        let cleaned = strip_code_fences(&completion.text);
        let offer: TechnicalOffer = serde_json::from_str(&cleaned)?;
        Ok(offer)
    }
}

/// One line per prior project, or the no-history sentinel.
fn prior_projects_digest(projects: &[PriorProject]) -> String {
    if projects.is_empty() {
        return NO_PRIOR_PROJECT.to_string();
    }
    projects
        .iter()
        .map(|p| {
            format!(
                "- {} ({}$, {} jours): {}",
                p.name, p.amount, p.duration_days, p.specifications
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_generation_prompt(
    company: &CompanyProfile,
    prior_projects: &str,
    requirements_json: &str,
) -> String {
    let contact = if company.contact_name.is_empty() {
        "À définir"
    } else {
        company.contact_name.as_str()
    };

    format!(
        r#"
Génère une offre technique professionnelle en format JSON.

ENTREPRISE :
- Nom : {name}
- Spécialités : {specialties}
- Licence RBQ : {licence}

PROJETS SIMILAIRES :
{prior_projects}

EXIGENCES DU PROJET :
{requirements_json}

Réponds UNIQUEMENT avec un objet JSON (sans markdown) :
{{
    "titre_offre": "string",
    "introduction": "paragraphe de présentation",
    "comprehension_projet": "notre compréhension du projet",
    "approche_methodologique": {{
        "description": "notre approche",
        "phases": [
            {{"nom": "Phase 1", "description": "...", "duree": "X jours"}},
            {{"nom": "Phase 2", "description": "...", "duree": "X jours"}}
        ]
    }},
    "equipe_proposee": [
        {{"role": "Chef de projet", "nom": "{contact}", "experience": "...", "responsabilites": ["...", "..."]}},
        {{"role": "Autre", "nom": "À définir", "experience": "...", "responsabilites": ["...", "..."]}}
    ],
    "livrables": [
        {{"nom": "Livrable 1", "description": "...", "format": "PDF/Autre"}},
        {{"nom": "Livrable 2", "description": "...", "format": "PDF/Autre"}}
    ],
    "calendrier": [
        {{"etape": "Démarrage", "date_debut": "À définir", "date_fin": "À définir"}},
        {{"etape": "Phase 1", "date_debut": "À définir", "date_fin": "À définir"}}
    ],
    "garanties_qualite": ["garantie 1", "garantie 2"],
    "references_clients": "Disponibles sur demande",
    "avantages_concurrentiels": ["avantage 1", "avantage 2"]
}}
"#,
        name = company.name,
        specialties = company.specialties.join(", "),
        licence = company.rbq_licence,
    )
}
