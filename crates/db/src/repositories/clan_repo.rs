//! Repository for the `clans` table.
//!
//! Counters are only ever changed with in-SQL increments so concurrent
//! ingestions never lose an update.

use classhopper_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::clan::Clan;

const COLUMNS: &str = "id, name, member_count, project_count, created_at, updated_at";

pub struct ClanRepo;

impl ClanRepo {
    /// Resolve a clan by exact name for a joining member.
    ///
    /// Creates the clan with `member_count = 1, project_count = 0`, or bumps
    /// `member_count` by one if it already exists. Backed by the
    /// `uq_clans_name` constraint, so two concurrent first members of the
    /// same clan end up in a single row.
    pub async fn upsert_member_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Clan, sqlx::Error> {
        let query = format!(
            "INSERT INTO clans (name, member_count, project_count)
             VALUES ($1, 1, 0)
             ON CONFLICT ON CONSTRAINT uq_clans_name
             DO UPDATE SET member_count = clans.member_count + 1, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clan>(&query)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Increment `project_count` by `count`.
    pub async fn add_projects_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        clan_id: DbId,
        count: i32,
    ) -> Result<Clan, sqlx::Error> {
        let query = format!(
            "UPDATE clans SET project_count = project_count + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Clan>(&query)
            .bind(clan_id)
            .bind(count)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a clan by exact (case-sensitive) name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Clan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clans WHERE name = $1");
        sqlx::query_as::<_, Clan>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all clans alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Clan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clans ORDER BY name ASC");
        sqlx::query_as::<_, Clan>(&query).fetch_all(pool).await
    }
}
