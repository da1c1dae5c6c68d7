use uuid::Uuid;

use roster_core::error::FieldErrors;

use crate::domain::repository::{AddressRepository, InternRepository, ManagerRepository};
use crate::domain::types::StaffProfile;
use crate::error::StaffServiceError;

/// Message recorded against `email` when another staff member already uses it.
pub const EMAIL_TAKEN: &str = "A staff member with this email already exists.";

/// Message for a reference to a row that does not exist.
pub fn invalid_pk(id: Uuid) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Cross-row checks shared by manager and intern writes: the email must be
/// unused by every other staff member of either kind, and a referenced
/// address must exist.
pub async fn check_profile<M, I, A>(
    managers: &M,
    interns: &I,
    addresses: &A,
    profile: &StaffProfile,
    exclude: Option<Uuid>,
    errors: &mut FieldErrors,
) -> Result<(), StaffServiceError>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    if !errors.contains("email")
        && (managers.email_taken(&profile.email, exclude).await?
            || interns.email_taken(&profile.email, exclude).await?)
    {
        errors.add("email", EMAIL_TAKEN);
    }
    if let Some(address_id) = profile.address_id {
        if addresses.find_by_id(address_id).await?.is_none() {
            errors.add("address", invalid_pk(address_id));
        }
    }
    Ok(())
}
