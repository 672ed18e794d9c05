//! Repository for the `students` table.

use classhopper_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::student::{CreateStudent, Student};

const COLUMNS: &str = "id, first_name, last_name, email, phone, university, department, \
                        class_year, display_handle, consent_kvkk, created_at, updated_at";

pub struct StudentRepo;

impl StudentRepo {
    /// Insert a student inside an ingestion transaction.
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateStudent,
    ) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students
                (first_name, last_name, email, phone, university, department,
                 class_year, display_handle, consent_kvkk)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.university)
            .bind(&input.department)
            .bind(&input.class_year)
            .bind(&input.display_handle)
            .bind(input.consent_kvkk)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all students ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }
}
