//! Algorithmic core of the tender workflow: requirement extraction, offer
//! generation, financial roll-up, conformity scoring, business-day
//! arithmetic, kickoff suggestions and document rendering.
//!
//! Delegate-backed components ([`RequirementExtractor`], [`OfferGenerator`],
//! [`KickoffAdvisor`]) take an `Arc<CompletionManager>` and never retry
//! internally; the deterministic components are plain functions.

pub mod calendar;
pub mod conformity;
pub mod document;
pub mod extraction;
pub mod financial;
pub mod generation;
pub mod kickoff;
pub mod session;
pub mod structured;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar::{add_business_days, is_business_day};
pub use conformity::{assess_conformity, CONFORMITY_THRESHOLD};
pub use document::render_offer_document;
pub use extraction::{ExtractionError, RequirementExtractor};
pub use financial::{compute_financial_offer, recompute_totals, COMBINED_TAX_RATE, HOURS_PER_DAY};
pub use generation::{GenerationError, OfferGenerator};
pub use kickoff::{KickoffAdvisor, KickoffSuggestions};
pub use session::OfferSession;
