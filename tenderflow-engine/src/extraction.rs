//! Requirement extraction from raw tender text.

use std::sync::Arc;

use shared_types::RequirementRecord;
use tenderflow_llm_sdk::{CompletionManager, LlmError};
use thiserror::Error;
use tracing::debug;

use crate::structured::strip_code_fences;

/// Character budget for the document excerpt embedded in the prompt.
pub const DOCUMENT_CHAR_BUDGET: usize = 8000;

const EXTRACTION_MAX_TOKENS: u32 = 2000;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The delegate call failed (all providers exhausted, auth, network).
    #[error("Erreur extraction : {0}")]
    Provider(#[from] LlmError),

    /// The cleaned response was not a valid requirement record. The raw
    /// response is discarded; no partial record is returned.
    #[error("Erreur parsing : {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Extracts a structured [`RequirementRecord`] from tender document text
/// with a single delegate call. No internal retry; callers re-invoke.
pub struct RequirementExtractor {
    manager: Arc<CompletionManager>,
}

impl RequirementExtractor {
    pub fn new(manager: Arc<CompletionManager>) -> Self {
        Self { manager }
    }

    pub async fn extract(&self, document_text: &str) -> Result<RequirementRecord, ExtractionError> {
        let excerpt = truncate_chars(document_text, DOCUMENT_CHAR_BUDGET);
        let prompt = build_extraction_prompt(excerpt);

        let completion = self.manager.analyze(prompt, EXTRACTION_MAX_TOKENS).await?;
        debug!(provider = %completion.provider, "extraction response received");

        let cleaned = strip_code_fences(&completion.text);
        let record: RequirementRecord = serde_json::from_str(&cleaned)?;
        Ok(record)
    }
}

/// Char-boundary-safe truncation to at most `budget` characters.
fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn build_extraction_prompt(document: &str) -> String {
    format!(
        r#"
Analyse cet appel d'offres et extrais les exigences clés en format JSON strict.

DOCUMENT :
{document}

Réponds UNIQUEMENT avec un objet JSON (sans markdown, sans ```json) :
{{
    "numero_projet": "string",
    "nom_projet": "string",
    "client": "string",
    "date_cloture": "YYYY-MM-DD",
    "duree_projet": "X jours/mois",
    "budget_estime": "montant si disponible",
    "sommaire": "description courte du projet",
    "methodologie_requise": ["point 1", "point 2"],
    "livrables": ["livrable 1", "livrable 2"],
    "exigences_techniques": ["exigence 1", "exigence 2"],
    "criteres_evaluation": ["critère 1", "critère 2"],
    "documents_requis": ["doc 1", "doc 2"]
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stub_manager;

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4).chars().count(), 4);
        assert_eq!(truncate_chars("court", 8000), "court");
    }

    #[test]
    fn prompt_embeds_document_and_key_list() {
        let prompt = build_extraction_prompt("Réfection de toiture");
        assert!(prompt.contains("Réfection de toiture"));
        assert!(prompt.contains("\"exigences_techniques\""));
        assert!(prompt.contains("\"documents_requis\""));
    }

    #[tokio::test]
    async fn extract_parses_fenced_response() {
        let manager = stub_manager(Ok(
            "```json\n{\"nom_projet\": \"Centre sportif\", \"livrables\": [\"Plans\"]}\n```",
        ));
        let extractor = RequirementExtractor::new(manager);

        let record = extractor.extract("document").await.unwrap();
        assert_eq!(record.project_name, "Centre sportif");
        assert_eq!(record.deliverables, vec!["Plans".to_string()]);
    }

    #[tokio::test]
    async fn extract_rejects_non_json_without_partial_record() {
        let manager = stub_manager(Ok("je ne peux pas répondre"));
        let extractor = RequirementExtractor::new(manager);

        let err = extractor.extract("document").await.unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn extract_propagates_provider_failure() {
        let manager = stub_manager(Err("quota exceeded"));
        let extractor = RequirementExtractor::new(manager);

        let err = extractor.extract("document").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Provider(_)));
    }
}
