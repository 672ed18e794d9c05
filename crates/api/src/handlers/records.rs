//! Read-only listings of the records produced by ingestion.

use axum::extract::{Query, State};
use axum::Json;
use classhopper_db::models::admin_audit::AdminAudit;
use classhopper_db::models::clan::Clan;
use classhopper_db::models::project::Project;
use classhopper_db::models::student::Student;
use classhopper_db::repositories::{AdminAuditRepo, ClanRepo, ProjectRepo, StudentRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/clans
pub async fn list_clans(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Clan>>>> {
    let clans = ClanRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: clans }))
}

/// GET /api/v1/admin/students
pub async fn list_students(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Student>>>> {
    let students = StudentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/admin/projects
pub async fn list_projects(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/admin/audit
pub async fn list_audit(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<DataResponse<Vec<AdminAudit>>>> {
    let entries = AdminAuditRepo::list(&state.pool, page.limit, page.offset).await?;
    Ok(Json(DataResponse { data: entries }))
}
