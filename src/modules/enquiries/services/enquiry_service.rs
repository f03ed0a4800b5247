use chrono::Utc;
use tracing::info;

use crate::core::parse::sequence_code;
use crate::core::Result;
use crate::modules::enquiries::models::{
    CreateEnquiryRequest, Enquiry, EnquiryStats, EnquiryStatus,
};
use crate::modules::enquiries::repositories::EnquiryQuery;
use crate::store::EntityStore;

/// Service for leads
pub struct EnquiryService {
    store: EntityStore,
}

impl EnquiryService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Record an enquiry with the next six-digit number
    pub async fn create_enquiry(&self, request: CreateEnquiryRequest) -> Result<Enquiry> {
        let existing = self.store.enquiries.count(&EnquiryQuery::default()).await?;
        let enquiry = Enquiry::new(sequence_code("", existing + 1, 6), request, Utc::now())?;

        self.store.enquiries.create(&enquiry).await?;

        info!(
            enquiry_id = %enquiry.id,
            enquiry_no = %enquiry.enquiry_no,
            "Enquiry recorded"
        );
        Ok(enquiry)
    }

    /// Per-status counts over every enquiry
    pub async fn enquiry_stats(&self) -> Result<EnquiryStats> {
        count_by_status(&self.store).await
    }
}

/// One count per status; unaffected by any list filter
pub(crate) async fn count_by_status(store: &EntityStore) -> Result<EnquiryStats> {
    let mut stats = EnquiryStats::default();
    for status in EnquiryStatus::ALL {
        let count = store
            .enquiries
            .count(&EnquiryQuery::with_status(status))
            .await?;
        stats.record(status, count);
    }
    Ok(stats)
}
