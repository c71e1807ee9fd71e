//! Advisory conformity assessment of an offer against the extracted
//! requirements.
//!
//! Fixed 100-point rubric: deliverables 30, technical requirements 25, team
//! 20, financial 25. The keyword heuristic for technical requirements is a
//! known best-effort match (first three words longer than four characters,
//! substring search in the serialized offer); it both over- and
//! under-credits and is kept as observed behavior. The result never gates a
//! save or a status change.

use shared_types::{ConformityReport, FinancialOffer, RequirementRecord, TechnicalOffer};

const DELIVERABLES_POINTS: u32 = 30;
const TECHNICAL_POINTS: u32 = 25;
const TECHNICAL_PARTIAL: u32 = 10;
const TEAM_POINTS: u32 = 20;
const TEAM_PARTIAL: u32 = 10;
const FINANCIAL_POINTS: u32 = 25;
const FINANCIAL_PARTIAL: u32 = 15;

/// Score below which the offer is flagged non-compliant (advisory only).
pub const CONFORMITY_THRESHOLD: u8 = 50;

pub fn assess_conformity(
    technical: &TechnicalOffer,
    financial: &FinancialOffer,
    requirements: &RequirementRecord,
) -> ConformityReport {
    let mut report = ConformityReport::default();
    let mut total_points = 0u32;
    let mut obtained = 0u32;

    // Deliverables coverage (set containment on names)
    total_points += DELIVERABLES_POINTS;
    let offered: Vec<&str> = technical.deliverables.iter().map(|d| d.name.as_str()).collect();
    let missing: Vec<&str> = requirements
        .deliverables
        .iter()
        .map(String::as_str)
        .filter(|required| !offered.contains(required))
        .collect();

    if requirements.deliverables.is_empty() {
        obtained += DELIVERABLES_POINTS;
        report
            .compliant_points
            .push("✅ Livrables présents".to_string());
    } else if missing.is_empty() {
        obtained += DELIVERABLES_POINTS;
        report
            .compliant_points
            .push("✅ Tous les livrables requis sont inclus".to_string());
    } else {
        report.missing_points.push(format!(
            "⚠️ Livrables potentiellement manquants : {} (vérifiez que les noms correspondent)",
            missing.join(", ")
        ));
    }

    // Technical requirements (keyword presence heuristic)
    total_points += TECHNICAL_POINTS;
    if requirements.technical_requirements.is_empty() {
        obtained += TECHNICAL_POINTS;
        report
            .compliant_points
            .push("✅ Aucune exigence technique spécifique requise".to_string());
    } else {
        let offer_text = serde_json::to_string(technical)
            .unwrap_or_default()
            .to_lowercase();
        let unaddressed: Vec<&str> = requirements
            .technical_requirements
            .iter()
            .map(String::as_str)
            .filter(|requirement| !requirement_addressed(requirement, &offer_text))
            .collect();

        if unaddressed.is_empty() {
            obtained += TECHNICAL_POINTS;
            report
                .compliant_points
                .push("✅ Exigences techniques adressées".to_string());
        } else {
            let preview: Vec<&str> = unaddressed.iter().take(3).copied().collect();
            report.missing_points.push(format!(
                "⚠️ Exigences techniques à vérifier : {}",
                preview.join(", ")
            ));
            obtained += TECHNICAL_PARTIAL;
        }
    }

    // Team completeness
    total_points += TEAM_POINTS;
    if technical.team.is_empty() {
        report
            .missing_points
            .push("⚠️ Aucun membre d'équipe défini dans l'offre technique".to_string());
    } else {
        let incomplete = technical
            .team
            .iter()
            .filter(|m| m.name.is_empty() || m.role.is_empty())
            .count();
        if incomplete > 0 {
            report.missing_points.push(format!(
                "⚠️ {incomplete} membre(s) de l'équipe avec informations incomplètes (nom ou rôle manquant)"
            ));
            obtained += TEAM_PARTIAL;
        } else {
            obtained += TEAM_POINTS;
            report.compliant_points.push(format!(
                "✅ Équipe proposée : {} membre(s) défini(s)",
                technical.team.len()
            ));
        }
    }

    // Financial completeness
    total_points += FINANCIAL_POINTS;
    if financial.total_with_tax > 0.0 && !financial.line_items.is_empty() {
        obtained += FINANCIAL_POINTS;
        report.compliant_points.push(format!(
            "✅ Offre financière complète : {} $ TTC ({} poste(s))",
            format_amount(financial.total_with_tax),
            financial.line_items.len()
        ));
    } else if financial.total_with_tax > 0.0 {
        obtained += FINANCIAL_PARTIAL;
        report
            .missing_points
            .push("⚠️ Offre financière sans détail des postes budgétaires".to_string());
    } else {
        report
            .missing_points
            .push("⚠️ Offre financière incomplète ou montant nul".to_string());
    }

    report.score = if total_points > 0 {
        ((obtained as f64 / total_points as f64) * 100.0) as u8
    } else {
        0
    };
    report.compliant = report.score >= CONFORMITY_THRESHOLD;

    if !report.missing_points.is_empty() {
        report.recommendations.push(
            "📋 Des points méritent attention (voir ci-dessus), mais vous pouvez soumettre quand même"
                .to_string(),
        );
    }
    report
        .recommendations
        .push("📋 Relisez attentivement l'offre avant envoi".to_string());
    report
        .recommendations
        .push("📎 Vérifiez que tous les documents requis sont joints".to_string());

    report
}

/// A requirement counts as addressed when one of its first three words
/// longer than four characters appears in the serialized offer text.
fn requirement_addressed(requirement: &str, offer_text: &str) -> bool {
    requirement
        .to_lowercase()
        .split_whitespace()
        .take(3)
        .filter(|word| word.chars().count() > 4)
        .any(|word| offer_text.contains(word))
}

/// `13797.0` → `"13,797.00"` (thousands separator, two decimals).
pub(crate) fn format_amount(amount: f64) -> String {
    let raw = format!("{:.2}", amount.abs());
    let (integer, decimals) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = integer.chars().collect();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{decimals}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{BudgetLineItem, OfferedDeliverable, TeamMember};

    fn deliverable(name: &str) -> OfferedDeliverable {
        OfferedDeliverable {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn member(role: &str, name: &str) -> TeamMember {
        TeamMember {
            role: role.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn funded_financial() -> FinancialOffer {
        FinancialOffer {
            line_items: vec![BudgetLineItem {
                description: "Phase 1".to_string(),
                quantity: 80.0,
                unit: "heures".to_string(),
                unit_price: 100.0,
                total: 8000.0,
            }],
            subtotal: 8000.0,
            taxes: 1198.0,
            total_with_tax: 9198.0,
            ..Default::default()
        }
    }

    fn full_offer() -> (TechnicalOffer, FinancialOffer, RequirementRecord) {
        let technical = TechnicalOffer {
            deliverables: vec![deliverable("A"), deliverable("B"), deliverable("C")],
            team: vec![member("Chef de projet", "Marie Tremblay")],
            ..Default::default()
        };
        let requirements = RequirementRecord {
            deliverables: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        };
        (technical, funded_financial(), requirements)
    }

    #[test]
    fn superset_of_deliverables_earns_full_credit() {
        let (technical, financial, requirements) = full_offer();
        let report = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(report.score, 100);
        assert!(report.compliant);
    }

    #[test]
    fn missing_deliverable_zeroes_the_category_and_is_listed() {
        let (mut technical, financial, requirements) = full_offer();
        technical.deliverables = vec![deliverable("A")];

        let report = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(report.score, 70);
        assert!(report
            .missing_points
            .iter()
            .any(|p| p.contains("manquants") && p.contains('B')));
    }

    #[test]
    fn empty_technical_requirements_earn_full_credit() {
        let (technical, financial, requirements) = full_offer();
        assert!(requirements.technical_requirements.is_empty());
        let report = assess_conformity(&technical, &financial, &requirements);
        assert!(report
            .compliant_points
            .iter()
            .any(|p| p.contains("Aucune exigence technique")));
    }

    #[test]
    fn unaddressed_requirement_earns_partial_credit() {
        let (technical, financial, mut requirements) = full_offer();
        requirements.technical_requirements =
            vec!["Membrane élastomère certifiée".to_string()];

        let report = assess_conformity(&technical, &financial, &requirements);
        // 30 + 10 + 20 + 25
        assert_eq!(report.score, 85);
        assert!(report
            .missing_points
            .iter()
            .any(|p| p.contains("Exigences techniques à vérifier")));
    }

    #[test]
    fn keyword_match_in_offer_text_addresses_requirement() {
        let (mut technical, financial, mut requirements) = full_offer();
        requirements.technical_requirements = vec!["Membrane élastomère posée".to_string()];
        technical.introduction = "Pose de membrane haute performance".to_string();

        let report = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn incomplete_team_member_earns_partial_credit() {
        let (mut technical, financial, requirements) = full_offer();
        technical.team.push(member("Contremaître", ""));

        let report = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn empty_team_zeroes_the_category() {
        let (mut technical, financial, requirements) = full_offer();
        technical.team.clear();

        let report = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(report.score, 80);
    }

    #[test]
    fn financial_without_line_items_earns_partial_credit() {
        let (technical, mut financial, requirements) = full_offer();
        financial.line_items.clear();

        let report = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(report.score, 90);
    }

    #[test]
    fn zero_total_zeroes_the_financial_category() {
        let (technical, _, requirements) = full_offer();
        let report = assess_conformity(&technical, &FinancialOffer::default(), &requirements);
        assert_eq!(report.score, 75);
        assert!(report
            .missing_points
            .iter()
            .any(|p| p.contains("montant nul")));
    }

    #[test]
    fn compliant_iff_score_at_least_fifty() {
        // 30 (no required deliverables) + 25 (no technical requirements)
        // + 0 (no team) + 0 (no financial) = 55 → compliant
        let report = assess_conformity(
            &TechnicalOffer::default(),
            &FinancialOffer::default(),
            &RequirementRecord::default(),
        );
        assert_eq!(report.score, 55);
        assert!(report.compliant);

        // Add unmet deliverables → 25 → not compliant
        let requirements = RequirementRecord {
            deliverables: vec!["A".to_string()],
            ..Default::default()
        };
        let report = assess_conformity(
            &TechnicalOffer::default(),
            &FinancialOffer::default(),
            &requirements,
        );
        assert_eq!(report.score, 25);
        assert!(!report.compliant);
    }

    #[test]
    fn compliance_flag_tracks_threshold_across_reachable_scores() {
        // Reachable per-category credits: deliverables {0, 30}, technical
        // requirements {10, 25}, team {0, 10, 20}, financial {0, 15, 25}.
        // The cross product spans 45, 50 and 55 around the threshold.
        let deliverable_levels: [(u32, Vec<String>); 2] =
            [(30, vec![]), (0, vec!["Plans finaux".to_string()])];
        let technical_levels: [(u32, Vec<String>); 2] = [
            (25, vec![]),
            (10, vec!["xxxxx yyyyy zzzzz".to_string()]),
        ];
        let team_levels: [(u32, Vec<TeamMember>); 3] = [
            (20, vec![member("Chef de projet", "Marie Tremblay")]),
            (10, vec![member("Contremaître", "")]),
            (0, vec![]),
        ];

        for (d_points, required_deliverables) in &deliverable_levels {
            for (t_points, technical_requirements) in &technical_levels {
                for (e_points, team) in &team_levels {
                    let financial_levels: [(u32, FinancialOffer); 3] = [
                        (25, funded_financial()),
                        (
                            15,
                            FinancialOffer {
                                total_with_tax: 9198.0,
                                ..Default::default()
                            },
                        ),
                        (0, FinancialOffer::default()),
                    ];
                    for (f_points, financial) in &financial_levels {
                        let technical = TechnicalOffer {
                            team: team.clone(),
                            ..Default::default()
                        };
                        let requirements = RequirementRecord {
                            deliverables: required_deliverables.clone(),
                            technical_requirements: technical_requirements.clone(),
                            ..Default::default()
                        };

                        let expected = d_points + t_points + e_points + f_points;
                        let report = assess_conformity(&technical, financial, &requirements);
                        assert_eq!(u32::from(report.score), expected);
                        assert_eq!(report.compliant, expected >= 50);
                    }
                }
            }
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let (technical, financial, requirements) = full_offer();
        let first = assess_conformity(&technical, &financial, &requirements);
        let second = assess_conformity(&technical, &financial, &requirements);
        assert_eq!(first, second);
    }

    #[test]
    fn recommendations_always_include_review_and_attachments() {
        let (technical, financial, requirements) = full_offer();
        let report = assess_conformity(&technical, &financial, &requirements);
        assert!(report.missing_points.is_empty());
        assert_eq!(report.recommendations.len(), 2);

        let report = assess_conformity(
            &TechnicalOffer::default(),
            &FinancialOffer::default(),
            &requirements,
        );
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.recommendations[0].contains("méritent attention"));
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(13797.0), "13,797.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(0.0), "0.00");
    }
}
