//! In-progress offer draft, owned by the active editing context.
//!
//! The draft lives across the extraction, generation, financial and
//! conformity steps; nothing is persisted until the caller commits the
//! materialized bundle through the offer lifecycle. Dropping the session
//! discards unsaved edits.

use chrono::Utc;
use shared_types::{
    ConformityReport, FinancialOffer, OfferBundle, RequirementRecord, TechnicalOffer,
};

#[derive(Debug, Clone, Default)]
pub struct OfferSession {
    requirements: Option<RequirementRecord>,
    technical_offer: Option<TechnicalOffer>,
    financial_offer: Option<FinancialOffer>,
    conformity: Option<ConformityReport>,
}

impl OfferSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_requirements(&mut self, requirements: RequirementRecord) {
        self.requirements = Some(requirements);
    }

    pub fn set_technical_offer(&mut self, offer: TechnicalOffer) {
        self.technical_offer = Some(offer);
    }

    pub fn set_financial_offer(&mut self, offer: FinancialOffer) {
        self.financial_offer = Some(offer);
    }

    pub fn set_conformity(&mut self, report: ConformityReport) {
        self.conformity = Some(report);
    }

    pub fn requirements(&self) -> Option<&RequirementRecord> {
        self.requirements.as_ref()
    }

    pub fn technical_offer(&self) -> Option<&TechnicalOffer> {
        self.technical_offer.as_ref()
    }

    pub fn technical_offer_mut(&mut self) -> Option<&mut TechnicalOffer> {
        self.technical_offer.as_mut()
    }

    pub fn financial_offer(&self) -> Option<&FinancialOffer> {
        self.financial_offer.as_ref()
    }

    pub fn financial_offer_mut(&mut self) -> Option<&mut FinancialOffer> {
        self.financial_offer.as_mut()
    }

    pub fn conformity(&self) -> Option<&ConformityReport> {
        self.conformity.as_ref()
    }

    /// Run the conformity rubric on the current draft parts and keep the
    /// report on the session. `None` until requirements, technical and
    /// financial parts are all present.
    pub fn assess(&mut self) -> Option<&ConformityReport> {
        let report = crate::conformity::assess_conformity(
            self.technical_offer.as_ref()?,
            self.financial_offer.as_ref()?,
            self.requirements.as_ref()?,
        );
        self.conformity = Some(report);
        self.conformity.as_ref()
    }

    /// Materialize the bundle for persistence, stamping the creation date.
    ///
    /// Idempotent: calling twice yields equal bundles apart from the stamp.
    /// `None` while any of the three mandatory parts is missing.
    pub fn bundle(&self) -> Option<OfferBundle> {
        Some(OfferBundle {
            requirements: self.requirements.clone()?,
            technical_offer: self.technical_offer.clone()?,
            financial_offer: self.financial_offer.clone()?,
            conformity: self.conformity.clone(),
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        })
    }
}
