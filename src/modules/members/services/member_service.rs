// MemberService
// Record operations on members: sequential client ids, partial updates, deletes.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::parse::sequence_code;
use crate::core::{AppError, Result};
use crate::modules::members::models::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::modules::members::repositories::MemberQuery;
use crate::store::EntityStore;

/// Service for member records
pub struct MemberService {
    store: EntityStore,
}

impl MemberService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Create a member with the next client id (MEM000001, ...)
    pub async fn create_member(&self, request: CreateMemberRequest) -> Result<Member> {
        if let Some(membership_id) = request.membership_id {
            if self.store.memberships.find_by_id(membership_id).await?.is_none() {
                return Err(AppError::not_found(format!(
                    "Membership with id '{}' not found",
                    membership_id
                )));
            }
        }

        let existing = self.store.members.count(&MemberQuery::default()).await?;
        let client_id = sequence_code("MEM", existing + 1, 6);
        let member = Member::new(client_id, request, Utc::now())?;

        self.store.members.create(&member).await?;

        info!(member_id = %member.id, client_id = %member.client_id, "Member created");
        Ok(member)
    }

    pub async fn get_member(&self, id: Uuid) -> Result<Member> {
        self.store
            .members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Member with id '{}' not found", id)))
    }

    /// Apply a partial update and persist it
    pub async fn update_member(&self, id: Uuid, update: UpdateMemberRequest) -> Result<Member> {
        let mut member = self.get_member(id).await?;
        member.apply(update, Utc::now())?;

        if !self.store.members.update(&member).await? {
            return Err(AppError::not_found(format!("Member with id '{}' not found", id)));
        }

        info!(member_id = %id, status = %member.status, "Member updated");
        Ok(member)
    }

    /// Delete a member. Payments and follow-ups keep their dangling reference.
    pub async fn delete_member(&self, id: Uuid) -> Result<()> {
        if !self.store.members.delete(id).await? {
            return Err(AppError::not_found(format!("Member with id '{}' not found", id)));
        }

        warn!(member_id = %id, "Member deleted; related records are left in place");
        Ok(())
    }
}
