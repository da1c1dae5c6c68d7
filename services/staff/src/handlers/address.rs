use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Address, AddressFilter, AddressPatch, WriteMode};
use crate::error::StaffServiceError;
use crate::handlers::parse_id;
use crate::state::AppState;
use crate::usecase::address::{
    CreateAddressUseCase, DeleteAddressUseCase, GetAddressUseCase, ListAddressesUseCase,
    UpdateAddressUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub id: Uuid,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "roster_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Address> for AddressResponse {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id,
            street_address: a.street_address.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            postal_code: a.postal_code.clone(),
            country: a.country.clone(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AddressRequest {
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl From<AddressRequest> for AddressPatch {
    fn from(body: AddressRequest) -> Self {
        Self {
            street_address: body.street_address,
            city: body.city,
            state: body.state,
            postal_code: body.postal_code,
            country: body.country,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressListQuery {
    pub search: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

// ── GET /addresses ───────────────────────────────────────────────────────────

pub async fn list_addresses(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<AddressListQuery>, StaffServiceError>,
) -> Result<Json<Vec<AddressResponse>>, StaffServiceError> {
    let usecase = ListAddressesUseCase {
        addresses: state.address_repo(),
    };
    let addresses = usecase
        .execute(&AddressFilter {
            search: query.search,
            country: query.country,
            state: query.state,
        })
        .await?;
    Ok(Json(addresses.iter().map(AddressResponse::from).collect()))
}

// ── POST /addresses ──────────────────────────────────────────────────────────

pub async fn create_address(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<AddressRequest>, StaffServiceError>,
) -> Result<(StatusCode, Json<AddressResponse>), StaffServiceError> {
    let usecase = CreateAddressUseCase {
        addresses: state.address_repo(),
    };
    let address = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(AddressResponse::from(&address))))
}

// ── GET /addresses/{id} ──────────────────────────────────────────────────────

pub async fn get_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AddressResponse>, StaffServiceError> {
    let id = parse_id(&id, StaffServiceError::AddressNotFound)?;
    let usecase = GetAddressUseCase {
        addresses: state.address_repo(),
    };
    let address = usecase.execute(id).await?;
    Ok(Json(AddressResponse::from(&address)))
}

// ── PUT / PATCH /addresses/{id} ──────────────────────────────────────────────

pub async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<AddressRequest>, StaffServiceError>,
) -> Result<Json<AddressResponse>, StaffServiceError> {
    write_address(state, &id, body, WriteMode::Replace).await
}

pub async fn partial_update_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<AddressRequest>, StaffServiceError>,
) -> Result<Json<AddressResponse>, StaffServiceError> {
    write_address(state, &id, body, WriteMode::Patch).await
}

async fn write_address(
    state: AppState,
    id: &str,
    body: AddressRequest,
    mode: WriteMode,
) -> Result<Json<AddressResponse>, StaffServiceError> {
    let id = parse_id(id, StaffServiceError::AddressNotFound)?;
    let usecase = UpdateAddressUseCase {
        addresses: state.address_repo(),
    };
    let address = usecase.execute(id, body.into(), mode).await?;
    Ok(Json(AddressResponse::from(&address)))
}

// ── DELETE /addresses/{id} ───────────────────────────────────────────────────

pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StaffServiceError> {
    let id = parse_id(&id, StaffServiceError::AddressNotFound)?;
    let usecase = DeleteAddressUseCase {
        addresses: state.address_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
