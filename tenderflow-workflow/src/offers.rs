//! Offer lifecycle: upsert-by-submission persistence and free status moves.

use std::sync::Arc;

use chrono::Utc;
use shared_types::{OfferBundle, OfferRecord, OfferStatus};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::Database;

/// Catalogue line for an offer list, with the display fallbacks of the
/// original records.
#[derive(Debug, Clone)]
pub struct OfferSummary {
    pub id: String,
    pub submission_id: String,
    pub name: String,
    pub project_number: String,
    pub client: String,
    pub status: OfferStatus,
    pub total_with_tax: f64,
}

impl From<&OfferRecord> for OfferSummary {
    fn from(offer: &OfferRecord) -> Self {
        Self {
            id: offer.id.clone(),
            submission_id: offer.submission_id.clone(),
            name: offer.display_name(),
            project_number: offer.content.requirements.project_number.clone(),
            client: offer.content.requirements.client.clone(),
            status: offer.status,
            total_with_tax: offer.content.financial_offer.total_with_tax,
        }
    }
}

/// Owns offer persistence. Statuses form a flat enumeration with free
/// reassignment; nothing here validates a source state, and a conformity
/// report below threshold never blocks a save.
pub struct OfferLifecycle {
    db: Arc<Database>,
}

impl OfferLifecycle {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Save the bundle for a submission. Exactly one offer row exists per
    /// submission id: the first save inserts, every later save updates
    /// content, status and timestamp in place.
    pub fn save(
        &self,
        company_id: &str,
        submission_id: &str,
        content: &OfferBundle,
        status: OfferStatus,
    ) -> Result<OfferRecord, StoreError> {
        let now = Utc::now();

        if let Some(existing) = self.db.find_offer_by_submission(submission_id)? {
            self.db.update_offer(&existing.id, content, status, now)?;
            info!(offer_id = %existing.id, status = %status, "offer updated");
            return self.db.get_offer(&existing.id);
        }

        let record = OfferRecord {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            submission_id: submission_id.to_string(),
            status,
            content: content.clone(),
            created_at: now,
            updated_at: now,
        };
        self.db.insert_offer(&record)?;
        info!(offer_id = %record.id, status = %status, "offer created");
        Ok(record)
    }

    /// Overwrite the status, bumping the timestamp. Any-to-any moves are
    /// allowed by design.
    pub fn update_status(
        &self,
        offer_id: &str,
        new_status: OfferStatus,
    ) -> Result<OfferRecord, StoreError> {
        self.db.set_offer_status(offer_id, new_status, Utc::now())?;
        info!(offer_id = %offer_id, status = %new_status, "offer status changed");
        self.db.get_offer(offer_id)
    }

    pub fn get(&self, offer_id: &str) -> Result<OfferRecord, StoreError> {
        self.db.get_offer(offer_id)
    }

    pub fn find_by_submission(
        &self,
        submission_id: &str,
    ) -> Result<Option<OfferRecord>, StoreError> {
        self.db.find_offer_by_submission(submission_id)
    }

    /// Offers for a company, most recently touched first.
    pub fn list(&self, company_id: &str) -> Result<Vec<OfferRecord>, StoreError> {
        self.db.list_offers(company_id)
    }

    pub fn list_summaries(&self, company_id: &str) -> Result<Vec<OfferSummary>, StoreError> {
        Ok(self
            .db
            .list_offers(company_id)?
            .iter()
            .map(OfferSummary::from)
            .collect())
    }
}
