//! Plain-text rendering of a complete offer bundle.

use chrono::Local;
use shared_types::{CompanyProfile, OfferBundle};

use crate::conformity::format_amount;

const HEAVY_RULE: &str =
    "═══════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str =
    "───────────────────────────────────────────────────────────────";

/// Render the offer as the sectioned services-proposal document.
pub fn render_offer_document(offer: &OfferBundle, company: &CompanyProfile) -> String {
    let technical = &offer.technical_offer;
    let financial = &offer.financial_offer;
    let mut out = String::new();

    out.push_str(&format!(
        "\n{HEAVY_RULE}\n                    OFFRE DE SERVICES PROFESSIONNELS\n{HEAVY_RULE}\n\n"
    ));
    let title = if technical.title.is_empty() {
        "Offre technique"
    } else {
        technical.title.as_str()
    };
    out.push_str(&format!("{title}\n\n"));

    out.push_str(&section("INFORMATIONS ENTREPRISE"));
    out.push_str(&format!(
        "Entreprise : {}\nLicence RBQ : {}\nContact : {}\nEmail : {}\nTéléphone : {}\n",
        company.name, company.rbq_licence, company.contact_name, company.email, company.phone
    ));

    out.push_str(&section("1. INTRODUCTION"));
    out.push_str(&format!("{}\n", technical.introduction));

    out.push_str(&section("2. COMPRÉHENSION DU PROJET"));
    out.push_str(&format!("{}\n", technical.project_understanding));

    out.push_str(&section("3. APPROCHE MÉTHODOLOGIQUE"));
    out.push_str(&format!("{}\n\nPHASES DU PROJET :\n", technical.approach.description));
    for (i, phase) in technical.approach.phases.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} ({})\n   {}\n",
            i + 1,
            phase.name,
            phase.duration,
            phase.description
        ));
    }

    out.push_str(&section("4. ÉQUIPE PROPOSÉE"));
    for member in &technical.team {
        out.push_str(&format!(
            "\n- {} : {}\n  Expérience : {}\n  Responsabilités : {}\n",
            member.role,
            member.name,
            member.experience,
            member.responsibilities.join(", ")
        ));
    }

    out.push_str(&section("5. LIVRABLES"));
    for deliverable in &technical.deliverables {
        out.push_str(&format!(
            "\n- {}\n  Description : {}\n  Format : {}\n",
            deliverable.name, deliverable.description, deliverable.format
        ));
    }

    out.push_str(&section("6. OFFRE FINANCIÈRE"));
    out.push_str(&format!(
        "Taux horaire de base : {} $/h\n\nPOSTES BUDGÉTAIRES :\n",
        financial.base_hourly_rate
    ));
    for line in &financial.line_items {
        out.push_str(&format!(
            "\n- {}\n  Quantité : {} {}\n  Prix unitaire : {} $\n  Total : {} $\n",
            line.description,
            line.quantity,
            line.unit,
            line.unit_price,
            format_amount(line.total)
        ));
    }

    out.push_str(&section("SOMMAIRE FINANCIER"));
    out.push_str(&format!(
        "Total heures : {:.0} h\nSous-total HT : {} $\nTaxes (TPS+TVQ) : {} $\n─────────────────────────────────────────\nTOTAL TTC : {} $\n─────────────────────────────────────────\n",
        financial.total_hours,
        format_amount(financial.subtotal),
        format_amount(financial.taxes),
        format_amount(financial.total_with_tax)
    ));

    out.push_str(&format!(
        "\nDate : {}\n\nCordialement,\n{}\n\n{HEAVY_RULE}\n",
        Local::now().format("%Y-%m-%d"),
        company.name
    ));

    out
}

fn section(title: &str) -> String {
    format!("\n{LIGHT_RULE}\n{title}\n{LIGHT_RULE}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{
        BudgetLineItem, FinancialOffer, MethodologicalApproach, OfferedDeliverable, Phase,
        RequirementRecord, TeamMember, TechnicalOffer,
    };

    fn sample_bundle() -> OfferBundle {
        OfferBundle {
            requirements: RequirementRecord::default(),
            technical_offer: TechnicalOffer {
                title: "Réfection de toiture — Centre sportif".to_string(),
                introduction: "Présentation de notre entreprise.".to_string(),
                approach: MethodologicalApproach {
                    description: "Approche en deux phases.".to_string(),
                    phases: vec![Phase {
                        name: "Préparation".to_string(),
                        description: "Mobilisation du chantier".to_string(),
                        duration: "5 jours".to_string(),
                    }],
                },
                team: vec![TeamMember {
                    role: "Chef de projet".to_string(),
                    name: "Marie Tremblay".to_string(),
                    experience: "15 ans".to_string(),
                    responsibilities: vec!["Coordination".to_string()],
                }],
                deliverables: vec![OfferedDeliverable {
                    name: "Plans finaux".to_string(),
                    description: "Plans tel que construit".to_string(),
                    format: "PDF".to_string(),
                }],
                ..Default::default()
            },
            financial_offer: FinancialOffer {
                base_hourly_rate: 100.0,
                line_items: vec![BudgetLineItem {
                    description: "Préparation".to_string(),
                    quantity: 40.0,
                    unit: "heures".to_string(),
                    unit_price: 100.0,
                    total: 4000.0,
                }],
                total_hours: 40.0,
                subtotal: 4000.0,
                taxes: 599.0,
                total_with_tax: 4599.0,
            },
            conformity: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn document_contains_every_section_in_order() {
        let company = CompanyProfile {
            name: "Constructions Tremblay".to_string(),
            rbq_licence: "5678-1234-01".to_string(),
            ..Default::default()
        };
        let doc = render_offer_document(&sample_bundle(), &company);

        let sections = [
            "OFFRE DE SERVICES PROFESSIONNELS",
            "INFORMATIONS ENTREPRISE",
            "1. INTRODUCTION",
            "2. COMPRÉHENSION DU PROJET",
            "3. APPROCHE MÉTHODOLOGIQUE",
            "4. ÉQUIPE PROPOSÉE",
            "5. LIVRABLES",
            "6. OFFRE FINANCIÈRE",
            "SOMMAIRE FINANCIER",
        ];
        let mut cursor = 0;
        for title in sections {
            let idx = doc[cursor..].find(title).expect(title);
            cursor += idx + title.len();
        }

        assert!(doc.contains("Réfection de toiture — Centre sportif"));
        assert!(doc.contains("Chef de projet : Marie Tremblay"));
        assert!(doc.contains("TOTAL TTC : 4,599.00 $"));
        assert!(doc.contains("Cordialement,\nConstructions Tremblay"));
    }

    #[test]
    fn untitled_offer_falls_back_to_generic_heading() {
        let mut bundle = sample_bundle();
        bundle.technical_offer.title.clear();
        let doc = render_offer_document(&bundle, &CompanyProfile::default());
        assert!(doc.contains("Offre technique\n"));
    }
}
