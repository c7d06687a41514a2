//! Repository for the `requirements` table.
//!
//! Rules are always addressed through their parent set; callers confirm the
//! set belongs to the requesting owner first.

use coi_core::requirements::operators::LogicalOperator;
use coi_core::types::DbId;
use sqlx::PgPool;

use crate::models::requirement::{CreateRequirement, Requirement, UpdateRequirement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requirement_set_id, field_name, comparison_operator, \
    expected_value, logical_operator, enabled, created_at, updated_at";

/// Provides CRUD operations for the rules of a requirement set.
pub struct RequirementRepo;

impl RequirementRepo {
    /// Insert a rule into a set, returning the created row.
    ///
    /// `logical_operator` defaults to `and`, `enabled` to `true`.
    pub async fn create(
        pool: &PgPool,
        requirement_set_id: DbId,
        input: &CreateRequirement,
    ) -> Result<Requirement, sqlx::Error> {
        let query = format!(
            "INSERT INTO requirements
                (requirement_set_id, field_name, comparison_operator, expected_value,
                 logical_operator, enabled)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Requirement>(&query)
            .bind(requirement_set_id)
            .bind(&input.field_name)
            .bind(input.comparison_operator.as_str())
            .bind(&input.expected_value)
            .bind(input.logical_operator.unwrap_or_default().as_str())
            .bind(input.enabled)
            .fetch_one(pool)
            .await
    }

    /// Rules of a set in stored (creation) order.
    pub async fn list_by_set(
        pool: &PgPool,
        requirement_set_id: DbId,
    ) -> Result<Vec<Requirement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requirements WHERE requirement_set_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Requirement>(&query)
            .bind(requirement_set_id)
            .fetch_all(pool)
            .await
    }

    /// Update a rule. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the set has no rule with the given `id`.
    pub async fn update(
        pool: &PgPool,
        requirement_set_id: DbId,
        id: DbId,
        input: &UpdateRequirement,
    ) -> Result<Option<Requirement>, sqlx::Error> {
        let query = format!(
            "UPDATE requirements SET
                field_name = COALESCE($3, field_name),
                comparison_operator = COALESCE($4, comparison_operator),
                expected_value = COALESCE($5, expected_value),
                logical_operator = COALESCE($6, logical_operator),
                enabled = COALESCE($7, enabled)
             WHERE id = $1 AND requirement_set_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Requirement>(&query)
            .bind(id)
            .bind(requirement_set_id)
            .bind(&input.field_name)
            .bind(input.comparison_operator.map(|op| op.as_str()))
            .bind(&input.expected_value)
            .bind(input.logical_operator.map(LogicalOperator::as_str))
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        requirement_set_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM requirements WHERE id = $1 AND requirement_set_id = $2")
                .bind(id)
                .bind(requirement_set_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
