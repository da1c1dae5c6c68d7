//! Request and response pieces shared by the manager and intern handlers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Staff, StaffPatch};
use crate::handlers::address::AddressResponse;

/// Output value of every masked field.
///
/// Placeholder: the field is hidden from every caller until a real
/// requester-aware policy exists.
pub const PROTECTED: &str = "***PROTECTED***";

// ── Request ──────────────────────────────────────────────────────────────────

/// Writable staff fields. Unknown keys (`id`, `has_company_card`, timestamps)
/// are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct StaffRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "roster_core::serde::double_option")]
    pub address: Option<Option<Uuid>>,
}

impl From<StaffRequest> for StaffPatch {
    fn from(body: StaffRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            hire_date: body.hire_date,
            salary: body.salary,
            is_active: body.is_active,
            address: body.address,
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// Fields every staff representation starts with.
#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    /// Always two decimal places, e.g. `"90000.00"`.
    pub salary: String,
    pub is_active: bool,
    pub address: Option<AddressResponse>,
    pub role: String,
}

impl StaffResponse {
    pub fn new(staff: Staff<'_>) -> Self {
        let profile = staff.profile();
        Self {
            id: staff.id(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            full_name: staff.full_name(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            hire_date: profile.hire_date,
            salary: format!("{:.2}", profile.salary),
            is_active: profile.is_active,
            address: staff.address().map(AddressResponse::from),
            role: staff.role(),
        }
    }
}

/// `{id, name, role}` entry returned by the `all_roles` routes.
#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl RoleSummary {
    pub fn new(staff: Staff<'_>) -> Self {
        Self {
            id: staff.id(),
            name: staff.full_name(),
            role: staff.role(),
        }
    }
}
