use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Manager, ManagerDetail, ManagerFilter, ManagerPatch, Staff, WriteMode};
use crate::error::StaffServiceError;
use crate::handlers::intern::InternResponse;
use crate::handlers::parse_id;
use crate::handlers::staff::{PROTECTED, RoleSummary, StaffRequest, StaffResponse};
use crate::state::AppState;
use crate::usecase::manager::{
    CreateManagerUseCase, DeleteManagerUseCase, GetManagerDetailUseCase, GetManagerUseCase,
    ListManagersUseCase, UpdateManagerUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ManagerResponse {
    #[serde(flatten)]
    pub staff: StaffResponse,
    pub department: String,
    pub has_company_card: &'static str,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Manager> for ManagerResponse {
    fn from(m: &Manager) -> Self {
        Self {
            staff: StaffResponse::new(Staff::Manager(m)),
            department: m.department.clone(),
            has_company_card: PROTECTED,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Single-manager representation: the base fields plus every mentored intern.
#[derive(Debug, Serialize)]
pub struct ManagerDetailResponse {
    #[serde(flatten)]
    pub manager: ManagerResponse,
    pub interns: Vec<InternResponse>,
}

impl From<&ManagerDetail> for ManagerDetailResponse {
    fn from(detail: &ManagerDetail) -> Self {
        Self {
            manager: ManagerResponse::from(&detail.manager),
            interns: detail.interns.iter().map(InternResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManagerRoleResponse {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub department: String,
}

impl From<&Manager> for ManagerRoleResponse {
    fn from(m: &Manager) -> Self {
        Self {
            id: m.id,
            name: m.full_name(),
            role: m.role(),
            department: m.department.clone(),
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ManagerRequest {
    #[serde(flatten)]
    pub staff: StaffRequest,
    pub department: Option<String>,
}

impl From<ManagerRequest> for ManagerPatch {
    fn from(body: ManagerRequest) -> Self {
        Self {
            staff: body.staff.into(),
            department: body.department,
        }
    }
}

/// `has_company_card` is not filterable: filtering would reveal the masked value.
#[derive(Debug, Default, Deserialize)]
pub struct ManagerListQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub is_active: Option<bool>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepartmentQuery {
    pub department: Option<String>,
}

// ── GET /managers ────────────────────────────────────────────────────────────

pub async fn list_managers(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ManagerListQuery>, StaffServiceError>,
) -> Result<Json<Vec<ManagerResponse>>, StaffServiceError> {
    let managers = list(
        &state,
        ManagerFilter {
            search: query.search,
            department: query.department,
            is_active: query.is_active,
            hire_date: query.hire_date,
        },
    )
    .await?;
    Ok(Json(managers.iter().map(ManagerResponse::from).collect()))
}

// ── POST /managers ───────────────────────────────────────────────────────────

pub async fn create_manager(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<ManagerRequest>, StaffServiceError>,
) -> Result<(StatusCode, Json<ManagerResponse>), StaffServiceError> {
    let usecase = CreateManagerUseCase {
        managers: state.manager_repo(),
        interns: state.intern_repo(),
        addresses: state.address_repo(),
    };
    let manager = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ManagerResponse::from(&manager))))
}

// ── GET /managers/{id} ───────────────────────────────────────────────────────

pub async fn get_manager(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ManagerDetailResponse>, StaffServiceError> {
    let id = parse_id(&id, StaffServiceError::ManagerNotFound)?;
    let usecase = GetManagerDetailUseCase {
        managers: state.manager_repo(),
        interns: state.intern_repo(),
    };
    let detail = usecase.execute(id).await?;
    Ok(Json(ManagerDetailResponse::from(&detail)))
}

// ── PUT / PATCH /managers/{id} ───────────────────────────────────────────────

pub async fn update_manager(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<ManagerRequest>, StaffServiceError>,
) -> Result<Json<ManagerResponse>, StaffServiceError> {
    write_manager(state, &id, body, WriteMode::Replace).await
}

pub async fn partial_update_manager(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<ManagerRequest>, StaffServiceError>,
) -> Result<Json<ManagerResponse>, StaffServiceError> {
    write_manager(state, &id, body, WriteMode::Patch).await
}

async fn write_manager(
    state: AppState,
    id: &str,
    body: ManagerRequest,
    mode: WriteMode,
) -> Result<Json<ManagerResponse>, StaffServiceError> {
    let id = parse_id(id, StaffServiceError::ManagerNotFound)?;
    let usecase = UpdateManagerUseCase {
        managers: state.manager_repo(),
        interns: state.intern_repo(),
        addresses: state.address_repo(),
    };
    let manager = usecase.execute(id, body.into(), mode).await?;
    Ok(Json(ManagerResponse::from(&manager)))
}

// ── DELETE /managers/{id} ────────────────────────────────────────────────────

pub async fn delete_manager(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StaffServiceError> {
    let id = parse_id(&id, StaffServiceError::ManagerNotFound)?;
    let usecase = DeleteManagerUseCase {
        managers: state.manager_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /managers/{id}/role ──────────────────────────────────────────────────

pub async fn get_manager_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ManagerRoleResponse>, StaffServiceError> {
    let id = parse_id(&id, StaffServiceError::ManagerNotFound)?;
    let usecase = GetManagerUseCase {
        managers: state.manager_repo(),
    };
    let manager = usecase.execute(id).await?;
    Ok(Json(ManagerRoleResponse::from(&manager)))
}

// ── GET /managers/by_department ──────────────────────────────────────────────

pub async fn managers_by_department(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<DepartmentQuery>, StaffServiceError>,
) -> Result<Json<Vec<ManagerResponse>>, StaffServiceError> {
    let managers = list(
        &state,
        ManagerFilter {
            department: query.department,
            ..ManagerFilter::default()
        },
    )
    .await?;
    Ok(Json(managers.iter().map(ManagerResponse::from).collect()))
}

// ── GET /managers/all_roles ──────────────────────────────────────────────────

pub async fn all_manager_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleSummary>>, StaffServiceError> {
    let managers = list(&state, ManagerFilter::default()).await?;
    Ok(Json(
        managers
            .iter()
            .map(|m| RoleSummary::new(Staff::Manager(m)))
            .collect(),
    ))
}

async fn list(state: &AppState, filter: ManagerFilter) -> Result<Vec<Manager>, StaffServiceError> {
    let usecase = ListManagersUseCase {
        managers: state.manager_repo(),
    };
    usecase.execute(&filter).await
}
