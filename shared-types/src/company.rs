use serde::{Deserialize, Serialize};

/// A member of the company team, used to pre-populate project human
/// resources and the generated offer's team scaffold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamProfileMember {
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(rename = "poste", default)]
    pub position: String,
}

/// Company profile embedded in generation prompts and rendered documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(rename = "nom_entreprise", default)]
    pub name: String,
    #[serde(rename = "specialites", default)]
    pub specialties: Vec<String>,
    #[serde(rename = "licence_rbq", default)]
    pub rbq_licence: String,
    #[serde(rename = "contact_nom", default)]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telephone", default)]
    pub phone: String,
    #[serde(rename = "equipe", default)]
    pub team: Vec<TeamProfileMember>,
}

/// Historical project fed to the offer generator as context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorProject {
    #[serde(rename = "nom_projet", default)]
    pub name: String,
    #[serde(rename = "montant", default)]
    pub amount: f64,
    #[serde(rename = "duree_jours", default)]
    pub duration_days: i64,
    #[serde(default)]
    pub specifications: String,
}
