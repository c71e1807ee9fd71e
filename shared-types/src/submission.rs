use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Go/no-go recommendation attached to an analyzed tender submission.
/// Unrecognized values deserialize to `Unknown` rather than failing, since
/// the analysis text is produced by an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recommendation {
    Go,
    NoGo,
    Maybe,
    Unknown,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Go => "GO",
            Recommendation::NoGo => "NO-GO",
            Recommendation::Maybe => "PEUT-ÊTRE",
            Recommendation::Unknown => "INCONNU",
        }
    }

    /// Submissions worth drafting an offer for.
    pub fn is_qualified(&self) -> bool {
        matches!(self, Recommendation::Go | Recommendation::Maybe)
    }
}

impl From<String> for Recommendation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "GO" => Recommendation::Go,
            "NO-GO" => Recommendation::NoGo,
            "PEUT-ÊTRE" => Recommendation::Maybe,
            _ => Recommendation::Unknown,
        }
    }
}

impl From<Recommendation> for String {
    fn from(value: Recommendation) -> Self {
        value.as_str().to_string()
    }
}

/// An analyzed call for tenders, produced by the external analysis
/// collaborator. Read-only from the offer workflow's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderSubmission {
    pub id: String,
    #[serde(rename = "entreprise_id")]
    pub company_id: String,
    #[serde(rename = "projet_numero", default)]
    pub project_number: String,
    #[serde(rename = "nom_projet", default)]
    pub project_name: String,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub score: u8,
    #[serde(rename = "statut", default)]
    pub status: String,
    #[serde(rename = "analyse", default)]
    pub analysis: String,
    #[serde(default)]
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_tolerates_unknown_values() {
        let rec: Recommendation = serde_json::from_str(r#""OUI""#).unwrap();
        assert_eq!(rec, Recommendation::Unknown);
        let rec: Recommendation = serde_json::from_str(r#""PEUT-ÊTRE""#).unwrap();
        assert_eq!(rec, Recommendation::Maybe);
        assert!(rec.is_qualified());
        assert!(!Recommendation::NoGo.is_qualified());
    }
}
