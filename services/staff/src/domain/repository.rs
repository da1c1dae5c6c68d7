#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    Address, AddressDraft, AddressFilter, Intern, InternDraft, InternFilter, Manager,
    ManagerDraft, ManagerFilter,
};
use crate::error::StaffServiceError;

/// Repository for postal addresses.
pub trait AddressRepository: Send + Sync {
    async fn list(&self, filter: &AddressFilter) -> Result<Vec<Address>, StaffServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Address>, StaffServiceError>;

    async fn create(
        &self,
        id: Uuid,
        draft: &AddressDraft,
        now: DateTime<Utc>,
    ) -> Result<Address, StaffServiceError>;

    /// Overwrite every writable column. Returns `None` if the row is gone.
    async fn update(
        &self,
        id: Uuid,
        draft: &AddressDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Address>, StaffServiceError>;

    /// Delete an address, clearing staff references to it first.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError>;
}

/// Repository for managers.
pub trait ManagerRepository: Send + Sync {
    /// Managers ordered by last name, then first name, with addresses loaded.
    async fn list(&self, filter: &ManagerFilter) -> Result<Vec<Manager>, StaffServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, StaffServiceError>;

    /// Whether a manager other than `exclude` already uses `email`.
    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StaffServiceError>;

    /// Insert a manager. `has_company_card` takes its server default.
    async fn create(
        &self,
        id: Uuid,
        draft: &ManagerDraft,
        now: DateTime<Utc>,
    ) -> Result<Manager, StaffServiceError>;

    async fn update(
        &self,
        id: Uuid,
        draft: &ManagerDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Manager>, StaffServiceError>;

    /// Delete a manager, detaching mentored interns first.
    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError>;
}

/// Repository for interns.
pub trait InternRepository: Send + Sync {
    /// Interns ordered by last name, then first name, with address and mentor loaded.
    async fn list(&self, filter: &InternFilter) -> Result<Vec<Intern>, StaffServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Intern>, StaffServiceError>;

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StaffServiceError>;

    async fn create(
        &self,
        id: Uuid,
        draft: &InternDraft,
        now: DateTime<Utc>,
    ) -> Result<Intern, StaffServiceError>;

    async fn update(
        &self,
        id: Uuid,
        draft: &InternDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Intern>, StaffServiceError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError>;
}
