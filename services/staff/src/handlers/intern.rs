use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Intern, InternFilter, InternPatch, MentorFilter, Staff, WriteMode};
use crate::error::StaffServiceError;
use crate::handlers::parse_id;
use crate::handlers::staff::{RoleSummary, StaffRequest, StaffResponse};
use crate::state::AppState;
use crate::usecase::intern::{
    CreateInternUseCase, DeleteInternUseCase, GetInternUseCase, ListInternsUseCase,
    UpdateInternUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InternResponse {
    #[serde(flatten)]
    pub staff: StaffResponse,
    /// Mentor id only; the mentor itself is never expanded.
    pub mentor: Option<Uuid>,
    pub mentor_name: Option<String>,
    pub internship_end_date: NaiveDate,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Intern> for InternResponse {
    fn from(i: &Intern) -> Self {
        Self {
            staff: StaffResponse::new(Staff::Intern(i)),
            mentor: i.mentor_id(),
            mentor_name: i.mentor_name().map(str::to_owned),
            internship_end_date: i.internship_end_date,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InternRoleResponse {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    /// Mentor full name.
    pub mentor: Option<String>,
    pub internship_end_date: NaiveDate,
}

impl From<&Intern> for InternRoleResponse {
    fn from(i: &Intern) -> Self {
        Self {
            id: i.id,
            name: i.full_name(),
            role: i.role(),
            mentor: i.mentor_name().map(str::to_owned),
            internship_end_date: i.internship_end_date,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct InternRequest {
    #[serde(flatten)]
    pub staff: StaffRequest,
    #[serde(default, deserialize_with = "roster_core::serde::double_option")]
    pub mentor: Option<Option<Uuid>>,
    pub internship_end_date: Option<NaiveDate>,
}

impl From<InternRequest> for InternPatch {
    fn from(body: InternRequest) -> Self {
        Self {
            staff: body.staff.into(),
            mentor: body.mentor,
            internship_end_date: body.internship_end_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InternListQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub mentor_id: Option<String>,
    pub internship_end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MentorQuery {
    pub mentor_id: Option<String>,
}

impl MentorQuery {
    fn mentor_filter(&self) -> Result<Option<MentorFilter>, StaffServiceError> {
        mentor_filter(self.mentor_id.as_deref())
    }
}

/// A blank `mentor_id` means "no filter"; anything else must be a UUID.
fn mentor_filter(mentor_id: Option<&str>) -> Result<Option<MentorFilter>, StaffServiceError> {
    let Some(raw) = mentor_id.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    Uuid::parse_str(raw)
        .map(|id| Some(MentorFilter::Assigned(id)))
        .map_err(|_| StaffServiceError::invalid("mentor_id", "Must be a valid UUID."))
}

// ── GET /interns ─────────────────────────────────────────────────────────────

pub async fn list_interns(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<InternListQuery>, StaffServiceError>,
) -> Result<Json<Vec<InternResponse>>, StaffServiceError> {
    let interns = list(
        &state,
        InternFilter {
            mentor: mentor_filter(query.mentor_id.as_deref())?,
            search: query.search,
            is_active: query.is_active,
            internship_end_date: query.internship_end_date,
        },
    )
    .await?;
    Ok(Json(interns.iter().map(InternResponse::from).collect()))
}

// ── POST /interns ────────────────────────────────────────────────────────────

pub async fn create_intern(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<InternRequest>, StaffServiceError>,
) -> Result<(StatusCode, Json<InternResponse>), StaffServiceError> {
    let usecase = CreateInternUseCase {
        managers: state.manager_repo(),
        interns: state.intern_repo(),
        addresses: state.address_repo(),
    };
    let intern = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(InternResponse::from(&intern))))
}

// ── GET /interns/{id} ────────────────────────────────────────────────────────

pub async fn get_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InternResponse>, StaffServiceError> {
    let intern = find(&state, &id).await?;
    Ok(Json(InternResponse::from(&intern)))
}

// ── PUT / PATCH /interns/{id} ────────────────────────────────────────────────

pub async fn update_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<InternRequest>, StaffServiceError>,
) -> Result<Json<InternResponse>, StaffServiceError> {
    write_intern(state, &id, body, WriteMode::Replace).await
}

pub async fn partial_update_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<InternRequest>, StaffServiceError>,
) -> Result<Json<InternResponse>, StaffServiceError> {
    write_intern(state, &id, body, WriteMode::Patch).await
}

async fn write_intern(
    state: AppState,
    id: &str,
    body: InternRequest,
    mode: WriteMode,
) -> Result<Json<InternResponse>, StaffServiceError> {
    let id = parse_id(id, StaffServiceError::InternNotFound)?;
    let usecase = UpdateInternUseCase {
        managers: state.manager_repo(),
        interns: state.intern_repo(),
        addresses: state.address_repo(),
    };
    let intern = usecase.execute(id, body.into(), mode).await?;
    Ok(Json(InternResponse::from(&intern)))
}

// ── DELETE /interns/{id} ─────────────────────────────────────────────────────

pub async fn delete_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StaffServiceError> {
    let id = parse_id(&id, StaffServiceError::InternNotFound)?;
    let usecase = DeleteInternUseCase {
        interns: state.intern_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /interns/{id}/role ───────────────────────────────────────────────────

pub async fn get_intern_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InternRoleResponse>, StaffServiceError> {
    let intern = find(&state, &id).await?;
    Ok(Json(InternRoleResponse::from(&intern)))
}

// ── GET /interns/by_mentor ───────────────────────────────────────────────────

pub async fn interns_by_mentor(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<MentorQuery>, StaffServiceError>,
) -> Result<Json<Vec<InternResponse>>, StaffServiceError> {
    let filter = InternFilter {
        mentor: query.mentor_filter()?,
        ..InternFilter::default()
    };
    let interns = list(&state, filter).await?;
    Ok(Json(interns.iter().map(InternResponse::from).collect()))
}

// ── GET /interns/without_mentor ──────────────────────────────────────────────

pub async fn interns_without_mentor(
    State(state): State<AppState>,
) -> Result<Json<Vec<InternResponse>>, StaffServiceError> {
    let filter = InternFilter {
        mentor: Some(MentorFilter::Unassigned),
        ..InternFilter::default()
    };
    let interns = list(&state, filter).await?;
    Ok(Json(interns.iter().map(InternResponse::from).collect()))
}

// ── GET /interns/all_roles ───────────────────────────────────────────────────

pub async fn all_intern_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoleSummary>>, StaffServiceError> {
    let interns = list(&state, InternFilter::default()).await?;
    Ok(Json(
        interns
            .iter()
            .map(|i| RoleSummary::new(Staff::Intern(i)))
            .collect(),
    ))
}

async fn find(state: &AppState, raw_id: &str) -> Result<Intern, StaffServiceError> {
    let id = parse_id(raw_id, StaffServiceError::InternNotFound)?;
    let usecase = GetInternUseCase {
        interns: state.intern_repo(),
    };
    usecase.execute(id).await
}

async fn list(state: &AppState, filter: InternFilter) -> Result<Vec<Intern>, StaffServiceError> {
    let usecase = ListInternsUseCase {
        interns: state.intern_repo(),
    };
    usecase.execute(&filter).await
}
