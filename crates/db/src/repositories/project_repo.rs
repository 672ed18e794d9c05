//! Repository for the `projects` table.

use classhopper_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::project::{CreateProject, Project};

const COLUMNS: &str = "id, name, summary, category, tech_tags, status, owner_student_id, \
                        clan_id, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project inside an ingestion transaction.
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, summary, category, tech_tags, status, owner_student_id, clan_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.summary)
            .bind(&input.category)
            .bind(&input.tech_tags)
            .bind(&input.status)
            .bind(input.owner_student_id)
            .bind(input.clan_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List projects owned by a student, in creation order.
    pub async fn list_by_owner(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_student_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }
}
