//! Repository for the `clan_members` table.

use classhopper_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::clan_member::{ClanMember, CreateClanMember};

const COLUMNS: &str = "id, student_id, clan_id, role, created_at";

pub struct ClanMemberRepo;

impl ClanMemberRepo {
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateClanMember,
    ) -> Result<ClanMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO clan_members (student_id, clan_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClanMember>(&query)
            .bind(input.student_id)
            .bind(input.clan_id)
            .bind(&input.role)
            .fetch_one(&mut **tx)
            .await
    }

    /// List the memberships of one clan, oldest first.
    pub async fn list_by_clan(pool: &PgPool, clan_id: DbId) -> Result<Vec<ClanMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clan_members WHERE clan_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ClanMember>(&query)
            .bind(clan_id)
            .fetch_all(pool)
            .await
    }
}
