use chrono::Utc;
use tracing::info;

use crate::core::Result;
use crate::modules::memberships::models::{CreateMembershipRequest, Membership};
use crate::store::EntityStore;

/// Service for membership packages
pub struct MembershipService {
    store: EntityStore,
}

impl MembershipService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Create an active package
    pub async fn create_membership(&self, request: CreateMembershipRequest) -> Result<Membership> {
        let membership = Membership::new(request, Utc::now())?;
        self.store.memberships.create(&membership).await?;

        info!(
            membership_id = %membership.id,
            package = %membership.package_name,
            "Membership package created"
        );
        Ok(membership)
    }
}
