//! Repository for the `requirement_sets` table.

use coi_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::requirement_set::{
    CreateRequirementSet, RequirementSet, UpdateRequirementSet,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, created_at, updated_at";

/// Provides CRUD operations for requirement sets, scoped to one owner.
pub struct RequirementSetRepo;

impl RequirementSetRepo {
    /// Insert a new requirement set, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: &CreateRequirementSet,
    ) -> Result<RequirementSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO requirement_sets (owner_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequirementSet>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find one of the owner's sets by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: Uuid,
        id: DbId,
    ) -> Result<Option<RequirementSet>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM requirement_sets WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, RequirementSet>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's sets, most recently created first.
    pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<RequirementSet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requirement_sets WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RequirementSet>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a set. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the owner has no set with the given `id`.
    pub async fn update(
        pool: &PgPool,
        owner_id: Uuid,
        id: DbId,
        input: &UpdateRequirementSet,
    ) -> Result<Option<RequirementSet>, sqlx::Error> {
        let query = format!(
            "UPDATE requirement_sets SET
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequirementSet>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a set and, by cascade, its rules. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner_id: Uuid, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM requirement_sets WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
