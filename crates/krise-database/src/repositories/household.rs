//! Household repository implementation.
//!
//! Membership mutations run in a single transaction that locks the
//! household row, applies the change, and recounts `member_count` from the
//! actual rows. Recount-on-write keeps the cached count from drifting even
//! under concurrent joins.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::household::{Household, NewHousehold, UnregisteredMember};
use krise_entity::stores::HouseholdStore;

/// PostgreSQL-backed household store.
#[derive(Debug, Clone)]
pub struct HouseholdRepository {
    pool: PgPool,
}

impl HouseholdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Recount registered plus unregistered members inside `tx`.
    async fn recount_members(
        tx: &mut Transaction<'_, Postgres>,
        household_id: Uuid,
    ) -> AppResult<i32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM users WHERE household_id = $1) + \
                    (SELECT COUNT(*) FROM unregistered_members WHERE household_id = $1)",
        )
        .bind(household_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))?;

        sqlx::query("UPDATE households SET member_count = $2, updated_at = NOW() WHERE id = $1")
            .bind(household_id)
            .bind(count as i32)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update member count", e)
            })?;

        Ok(count as i32)
    }

    /// Lock the household row, failing with NotFound if it does not exist.
    async fn lock_household(
        tx: &mut Transaction<'_, Postgres>,
        household_id: Uuid,
    ) -> AppResult<Household> {
        sqlx::query_as::<_, Household>("SELECT * FROM households WHERE id = $1 FOR UPDATE")
            .bind(household_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock household", e))?
            .ok_or_else(|| AppError::not_found(format!("Household {household_id} not found")))
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn commit(tx: Transaction<'_, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

#[async_trait]
impl HouseholdStore for HouseholdRepository {
    async fn create(&self, household: NewHousehold) -> AppResult<Household> {
        let mut tx = self.begin().await?;

        // Lock the owner row so a concurrent join cannot slip in between the
        // check and the assignment.
        let owner_household: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT household_id FROM users WHERE id = $1 FOR UPDATE")
                .bind(household.owner_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock owner", e)
                })?;

        match owner_household {
            None => {
                return Err(AppError::not_found(format!(
                    "User {} not found",
                    household.owner_id
                )));
            }
            Some(Some(_)) => {
                return Err(AppError::validation("User already belongs to a household"));
            }
            Some(None) => {}
        }

        let created = sqlx::query_as::<_, Household>(
            "INSERT INTO households (name, address, owner_id, member_count) \
             VALUES ($1, $2, $3, 1) \
             RETURNING *",
        )
        .bind(&household.name)
        .bind(&household.address)
        .bind(household.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create household", e))?;

        sqlx::query("UPDATE users SET household_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(household.owner_id)
            .bind(created.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign owner", e))?;

        Self::commit(tx).await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Household>> {
        sqlx::query_as::<_, Household>("SELECT * FROM households WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find household", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Household>> {
        sqlx::query_as::<_, Household>(
            "SELECT * FROM households WHERE name ILIKE '%' || $1 || '%' \
             ORDER BY name ASC LIMIT 20",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to search households by name", e)
        })
    }

    async fn update_details(&self, id: Uuid, name: &str, address: &str) -> AppResult<Household> {
        sqlx::query_as::<_, Household>(
            "UPDATE households SET name = $2, address = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update household", e))?
        .ok_or_else(|| AppError::not_found(format!("Household {id} not found")))
    }

    async fn add_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.begin().await?;

        Self::lock_household(&mut tx, household_id).await?;

        let current: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT household_id FROM users WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock user", e)
                })?;

        match current {
            None => return Err(AppError::not_found(format!("User {user_id} not found"))),
            Some(Some(_)) => {
                // The user joined another household first; this accept lost
                // the race.
                return Err(AppError::validation("User already belongs to a household"));
            }
            Some(None) => {}
        }

        sqlx::query("UPDATE users SET household_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(household_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign member", e))?;

        Self::recount_members(&mut tx, household_id).await?;
        Self::commit(tx).await
    }

    async fn remove_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.begin().await?;

        Self::lock_household(&mut tx, household_id).await?;

        let result = sqlx::query(
            "UPDATE users SET household_id = NULL, updated_at = NOW() \
             WHERE id = $1 AND household_id = $2",
        )
        .bind(user_id)
        .bind(household_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove member", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::validation(
                "User is not a member of this household",
            ));
        }

        Self::recount_members(&mut tx, household_id).await?;
        Self::commit(tx).await
    }

    async fn change_owner(&self, household_id: Uuid, new_owner_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE households SET owner_id = $2, updated_at = NOW() \
             WHERE id = $1 \
               AND EXISTS (SELECT 1 FROM users WHERE id = $2 AND household_id = $1)",
        )
        .bind(household_id)
        .bind(new_owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to change owner", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::validation(
                "New owner must be a registered member of the household",
            ));
        }
        Ok(())
    }

    async fn delete_cascade(&self, household_id: Uuid) -> AppResult<()> {
        let mut tx = self.begin().await?;

        Self::lock_household(&mut tx, household_id).await?;

        sqlx::query(
            "UPDATE users SET household_id = NULL, updated_at = NOW() WHERE household_id = $1",
        )
        .bind(household_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear member references", e)
        })?;

        sqlx::query("DELETE FROM unregistered_members WHERE household_id = $1")
            .bind(household_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete unregistered members",
                    e,
                )
            })?;

        sqlx::query("DELETE FROM households WHERE id = $1")
            .bind(household_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete household", e)
            })?;

        Self::commit(tx).await
    }

    async fn add_unregistered(
        &self,
        household_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember> {
        let mut tx = self.begin().await?;

        Self::lock_household(&mut tx, household_id).await?;

        let member = sqlx::query_as::<_, UnregisteredMember>(
            "INSERT INTO unregistered_members (household_id, full_name) \
             VALUES ($1, $2) RETURNING *",
        )
        .bind(household_id)
        .bind(full_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to add unregistered member", e)
        })?;

        Self::recount_members(&mut tx, household_id).await?;
        Self::commit(tx).await?;
        Ok(member)
    }

    async fn update_unregistered(
        &self,
        member_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember> {
        sqlx::query_as::<_, UnregisteredMember>(
            "UPDATE unregistered_members SET full_name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(member_id)
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to update unregistered member",
                e,
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Unregistered member {member_id} not found")))
    }

    async fn remove_unregistered(&self, member_id: Uuid) -> AppResult<()> {
        let mut tx = self.begin().await?;

        let household_id: Option<Uuid> =
            sqlx::query_scalar("SELECT household_id FROM unregistered_members WHERE id = $1")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to find unregistered member",
                        e,
                    )
                })?;

        let Some(household_id) = household_id else {
            return Err(AppError::not_found(format!(
                "Unregistered member {member_id} not found"
            )));
        };

        Self::lock_household(&mut tx, household_id).await?;

        sqlx::query("DELETE FROM unregistered_members WHERE id = $1")
            .bind(member_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete unregistered member",
                    e,
                )
            })?;

        Self::recount_members(&mut tx, household_id).await?;
        Self::commit(tx).await
    }

    async fn find_unregistered_by_id(
        &self,
        member_id: Uuid,
    ) -> AppResult<Option<UnregisteredMember>> {
        sqlx::query_as::<_, UnregisteredMember>("SELECT * FROM unregistered_members WHERE id = $1")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find unregistered member",
                    e,
                )
            })
    }

    async fn find_unregistered(&self, household_id: Uuid) -> AppResult<Vec<UnregisteredMember>> {
        sqlx::query_as::<_, UnregisteredMember>(
            "SELECT * FROM unregistered_members WHERE household_id = $1 ORDER BY full_name ASC",
        )
        .bind(household_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list unregistered members",
                e,
            )
        })
    }
}
