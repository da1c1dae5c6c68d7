use uuid::Uuid;

use crate::error::StaffServiceError;

pub mod address;
pub mod health;
pub mod intern;
pub mod manager;
pub mod staff;

/// Parse a path id; anything that is not a UUID cannot name a row.
pub(crate) fn parse_id(raw: &str, not_found: StaffServiceError) -> Result<Uuid, StaffServiceError> {
    Uuid::parse_str(raw).map_err(|_| not_found)
}
