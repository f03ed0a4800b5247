use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::follow_ups::models::{
    CreateFollowUpRequest, FollowUp, UpdateFollowUpStatusRequest,
};
use crate::store::EntityStore;

/// Service for member follow-ups
pub struct FollowUpService {
    store: EntityStore,
}

impl FollowUpService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Schedule a follow-up for an existing member
    pub async fn create_follow_up(&self, request: CreateFollowUpRequest) -> Result<FollowUp> {
        if self.store.members.find_by_id(request.member_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Member with id '{}' not found",
                request.member_id
            )));
        }

        let follow_up = FollowUp::new(request, Utc::now());
        self.store.follow_ups.create(&follow_up).await?;

        info!(
            follow_up_id = %follow_up.id,
            member_id = %follow_up.member_id,
            follow_up_type = %follow_up.follow_up_type,
            "Follow-up scheduled"
        );
        Ok(follow_up)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        update: UpdateFollowUpStatusRequest,
    ) -> Result<FollowUp> {
        let mut follow_up = self
            .store
            .follow_ups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Follow-up with id '{}' not found", id)))?;

        let previous = follow_up.status;
        follow_up.set_status(update, Utc::now());

        if !self.store.follow_ups.update(&follow_up).await? {
            return Err(AppError::not_found(format!("Follow-up with id '{}' not found", id)));
        }

        info!(
            follow_up_id = %id,
            from = %previous,
            to = %follow_up.status,
            "Follow-up status updated"
        );
        Ok(follow_up)
    }
}
