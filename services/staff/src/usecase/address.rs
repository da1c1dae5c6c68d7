use chrono::Utc;
use uuid::Uuid;

use roster_core::error::FieldErrors;

use crate::domain::repository::AddressRepository;
use crate::domain::types::{Address, AddressFilter, AddressPatch, WriteMode};
use crate::error::StaffServiceError;

// ── ListAddresses ────────────────────────────────────────────────────────────

pub struct ListAddressesUseCase<A: AddressRepository> {
    pub addresses: A,
}

impl<A: AddressRepository> ListAddressesUseCase<A> {
    pub async fn execute(&self, filter: &AddressFilter) -> Result<Vec<Address>, StaffServiceError> {
        self.addresses.list(filter).await
    }
}

// ── GetAddress ───────────────────────────────────────────────────────────────

pub struct GetAddressUseCase<A: AddressRepository> {
    pub addresses: A,
}

impl<A: AddressRepository> GetAddressUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<Address, StaffServiceError> {
        self.addresses
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::AddressNotFound)
    }
}

// ── CreateAddress ────────────────────────────────────────────────────────────

pub struct CreateAddressUseCase<A: AddressRepository> {
    pub addresses: A,
}

impl<A: AddressRepository> CreateAddressUseCase<A> {
    pub async fn execute(&self, patch: AddressPatch) -> Result<Address, StaffServiceError> {
        let mut errors = FieldErrors::new();
        let Some(draft) = patch.resolve(None, WriteMode::Create, &mut errors) else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let address = self
            .addresses
            .create(Uuid::now_v7(), &draft, Utc::now())
            .await?;
        tracing::info!(address_id = %address.id, "address created");
        Ok(address)
    }
}

// ── UpdateAddress (PUT / PATCH) ──────────────────────────────────────────────

pub struct UpdateAddressUseCase<A: AddressRepository> {
    pub addresses: A,
}

impl<A: AddressRepository> UpdateAddressUseCase<A> {
    pub async fn execute(
        &self,
        id: Uuid,
        patch: AddressPatch,
        mode: WriteMode,
    ) -> Result<Address, StaffServiceError> {
        let current = self
            .addresses
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::AddressNotFound)?;

        let mut errors = FieldErrors::new();
        let Some(draft) = patch.resolve(Some(&current.draft()), mode, &mut errors) else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let address = self
            .addresses
            .update(id, &draft, Utc::now())
            .await?
            .ok_or(StaffServiceError::AddressNotFound)?;
        tracing::info!(address_id = %id, "address updated");
        Ok(address)
    }
}

// ── DeleteAddress ────────────────────────────────────────────────────────────

pub struct DeleteAddressUseCase<A: AddressRepository> {
    pub addresses: A,
}

impl<A: AddressRepository> DeleteAddressUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<(), StaffServiceError> {
        if !self.addresses.delete(id).await? {
            return Err(StaffServiceError::AddressNotFound);
        }
        tracing::info!(address_id = %id, "address deleted");
        Ok(())
    }
}
