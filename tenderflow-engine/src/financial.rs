//! Financial offer derivation from technical-offer phases.
//!
//! The day count is read out of each phase's free-text duration with a
//! best-effort pattern; phases that don't match are skipped, never an error.

use shared_types::{BudgetLineItem, FinancialOffer, TechnicalOffer};
use tracing::warn;

/// Fixed workday length used to convert phase days into billable hours.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Quebec combined sales-tax rate (TPS 5% + TVQ 9.975%).
pub const COMBINED_TAX_RATE: f64 = 0.14975;

/// Derive a [`FinancialOffer`] from the technical offer's phases at the
/// given base hourly rate.
pub fn compute_financial_offer(technical: &TechnicalOffer, hourly_rate: f64) -> FinancialOffer {
    let mut offer = FinancialOffer {
        base_hourly_rate: hourly_rate,
        ..Default::default()
    };

    for phase in &technical.approach.phases {
        let Some(days) = parse_day_count(&phase.duration) else {
            warn!(
                phase = %phase.name,
                duration = %phase.duration,
                "phase duration not parsable as a day count, skipping"
            );
            continue;
        };

        let hours = days as f64 * HOURS_PER_DAY;
        let cost = hours * hourly_rate;

        offer.line_items.push(BudgetLineItem {
            description: if phase.name.is_empty() {
                "Phase".to_string()
            } else {
                phase.name.clone()
            },
            quantity: hours,
            unit: "heures".to_string(),
            unit_price: hourly_rate,
            total: cost,
        });
    }

    recompute_totals(&mut offer);
    offer
}

/// Re-establish all derived totals from the line items.
///
/// Always a full re-sum, never an incremental patch of the touched field;
/// call after any manual line-item edit.
pub fn recompute_totals(offer: &mut FinancialOffer) {
    for line in &mut offer.line_items {
        line.total = line.quantity * line.unit_price;
    }
    offer.total_hours = offer.line_items.iter().map(|l| l.quantity).sum();
    offer.subtotal = offer.line_items.iter().map(|l| l.total).sum();
    offer.taxes = offer.subtotal * COMBINED_TAX_RATE;
    offer.total_with_tax = offer.subtotal + offer.taxes;
}

/// Extract an integer day count from free text like "10 jours" or "5 jour".
fn parse_day_count(duration: &str) -> Option<u32> {
    let pattern = regex::Regex::new(r"(\d+)\s*jours?").unwrap();
    pattern
        .captures(&duration.to_lowercase())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{MethodologicalApproach, Phase};

    fn offer_with_phases(durations: &[&str]) -> TechnicalOffer {
        TechnicalOffer {
            approach: MethodologicalApproach {
                description: String::new(),
                phases: durations
                    .iter()
                    .enumerate()
                    .map(|(i, d)| Phase {
                        name: format!("Phase {}", i + 1),
                        description: String::new(),
                        duration: d.to_string(),
                    })
                    .collect(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn parses_day_counts_case_insensitively() {
        assert_eq!(parse_day_count("10 jours"), Some(10));
        assert_eq!(parse_day_count("5 jour"), Some(5));
        assert_eq!(parse_day_count("Environ 15 JOURS"), Some(15));
        assert_eq!(parse_day_count("3jours"), Some(3));
        assert_eq!(parse_day_count("N/A"), None);
        assert_eq!(parse_day_count("deux semaines"), None);
    }

    #[test]
    fn skips_unparsable_phases_and_sums_the_rest() {
        let technical = offer_with_phases(&["10 jours", "N/A", "5 jour"]);
        let offer = compute_financial_offer(&technical, 100.0);

        assert_eq!(offer.line_items.len(), 2);
        assert_eq!(offer.total_hours, 120.0);
        assert_eq!(offer.subtotal, 12000.0);
        assert!((offer.taxes - 1797.0).abs() < 1e-9);
        assert!((offer.total_with_tax - 13797.0).abs() < 1e-9);
    }

    #[test]
    fn line_totals_match_quantity_times_unit_price() {
        let technical = offer_with_phases(&["7 jours", "2 jours"]);
        let offer = compute_financial_offer(&technical, 85.0);

        for line in &offer.line_items {
            assert_eq!(line.total, line.quantity * line.unit_price);
        }
        assert_eq!(
            offer.subtotal,
            offer.line_items.iter().map(|l| l.total).sum::<f64>()
        );
        assert!((offer.total_with_tax - (offer.subtotal + offer.taxes)).abs() < 1e-9);
    }

    #[test]
    fn recompute_resums_everything_after_an_edit() {
        let technical = offer_with_phases(&["10 jours"]);
        let mut offer = compute_financial_offer(&technical, 100.0);

        offer.line_items[0].quantity = 40.0;
        recompute_totals(&mut offer);

        assert_eq!(offer.line_items[0].total, 4000.0);
        assert_eq!(offer.total_hours, 40.0);
        assert_eq!(offer.subtotal, 4000.0);
        assert!((offer.taxes - 4000.0 * COMBINED_TAX_RATE).abs() < 1e-9);
        assert!((offer.total_with_tax - (offer.subtotal + offer.taxes)).abs() < 1e-9);
    }

    #[test]
    fn empty_phase_list_yields_zeroed_offer() {
        let offer = compute_financial_offer(&offer_with_phases(&[]), 100.0);
        assert!(offer.line_items.is_empty());
        assert_eq!(offer.total_with_tax, 0.0);
        assert_eq!(offer.base_hourly_rate, 100.0);
    }
}
