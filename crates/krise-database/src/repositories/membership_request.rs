//! Membership request repository implementation.
//!
//! Terminal-state immutability is enforced in SQL: every status transition
//! carries `WHERE status = 'PENDING'`, so a second resolution of the same
//! request updates zero rows no matter how the callers interleave.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::membership::{
    MembershipRequest, NewMembershipRequest, RequestKind, RequestStatus,
};
use krise_entity::stores::MembershipRequestStore;

/// PostgreSQL-backed membership request store.
#[derive(Debug, Clone)]
pub struct MembershipRequestRepository {
    pool: PgPool,
}

impl MembershipRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRequestStore for MembershipRequestRepository {
    async fn create(&self, request: NewMembershipRequest) -> AppResult<MembershipRequest> {
        sqlx::query_as::<_, MembershipRequest>(
            "INSERT INTO membership_requests (household_id, sender_id, receiver_id, kind, status) \
             VALUES ($1, $2, $3, $4, 'PENDING') \
             RETURNING *",
        )
        .bind(request.household_id)
        .bind(request.sender_id)
        .bind(request.receiver_id)
        .bind(request.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create membership request", e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipRequest>> {
        sqlx::query_as::<_, MembershipRequest>("SELECT * FROM membership_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find membership request", e)
            })
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE membership_requests SET status = $2 WHERE id = $1 AND status = 'PENDING'",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update request status", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn cancel_other_pending_for_user(&self, user_id: Uuid, except: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE membership_requests SET status = 'CANCELED' \
             WHERE status = 'PENDING' AND id <> $2 \
               AND (sender_id = $1 OR receiver_id = $1)",
        )
        .bind(user_id)
        .bind(except)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cancel pending requests", e)
        })?;

        Ok(result.rows_affected())
    }

    async fn find_active_between(
        &self,
        household_id: Uuid,
        user_id: Uuid,
        kind: RequestKind,
    ) -> AppResult<Option<MembershipRequest>> {
        sqlx::query_as::<_, MembershipRequest>(
            "SELECT * FROM membership_requests \
             WHERE household_id = $1 AND kind = $3 AND status = 'PENDING' \
               AND (sender_id = $2 OR receiver_id = $2) \
             LIMIT 1",
        )
        .bind(household_id)
        .bind(user_id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active request", e)
        })
    }

    async fn find_by_receiver(
        &self,
        receiver_id: Uuid,
        kind: RequestKind,
        status: RequestStatus,
    ) -> AppResult<Vec<MembershipRequest>> {
        sqlx::query_as::<_, MembershipRequest>(
            "SELECT * FROM membership_requests \
             WHERE receiver_id = $1 AND kind = $2 AND status = $3 \
             ORDER BY created_at DESC",
        )
        .bind(receiver_id)
        .bind(kind)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list requests by receiver", e)
        })
    }

    async fn find_by_household(
        &self,
        household_id: Uuid,
        kind: RequestKind,
        statuses: &[RequestStatus],
    ) -> AppResult<Vec<MembershipRequest>> {
        sqlx::query_as::<_, MembershipRequest>(
            "SELECT * FROM membership_requests \
             WHERE household_id = $1 AND kind = $2 AND status = ANY($3) \
             ORDER BY created_at DESC",
        )
        .bind(household_id)
        .bind(kind)
        .bind(statuses)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list requests by household",
                e,
            )
        })
    }

    async fn delete_by_household(&self, household_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM membership_requests WHERE household_id = $1")
            .bind(household_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete household requests",
                    e,
                )
            })?;

        Ok(result.rows_affected())
    }
}
