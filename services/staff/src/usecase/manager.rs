use chrono::Utc;
use uuid::Uuid;

use roster_core::error::FieldErrors;

use crate::domain::repository::{AddressRepository, InternRepository, ManagerRepository};
use crate::domain::types::{
    InternFilter, Manager, ManagerDetail, ManagerFilter, ManagerPatch, MentorFilter, WriteMode,
};
use crate::error::StaffServiceError;
use crate::usecase::staff::check_profile;

// ── ListManagers ─────────────────────────────────────────────────────────────

/// Backs the plain list as well as `by_department` and `all_roles`.
pub struct ListManagersUseCase<M: ManagerRepository> {
    pub managers: M,
}

impl<M: ManagerRepository> ListManagersUseCase<M> {
    pub async fn execute(&self, filter: &ManagerFilter) -> Result<Vec<Manager>, StaffServiceError> {
        self.managers.list(filter).await
    }
}

// ── GetManager ───────────────────────────────────────────────────────────────

pub struct GetManagerUseCase<M: ManagerRepository> {
    pub managers: M,
}

impl<M: ManagerRepository> GetManagerUseCase<M> {
    pub async fn execute(&self, id: Uuid) -> Result<Manager, StaffServiceError> {
        self.managers
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::ManagerNotFound)
    }
}

// ── GetManagerDetail ─────────────────────────────────────────────────────────

pub struct GetManagerDetailUseCase<M: ManagerRepository, I: InternRepository> {
    pub managers: M,
    pub interns: I,
}

impl<M: ManagerRepository, I: InternRepository> GetManagerDetailUseCase<M, I> {
    pub async fn execute(&self, id: Uuid) -> Result<ManagerDetail, StaffServiceError> {
        let manager = self
            .managers
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::ManagerNotFound)?;
        let interns = self
            .interns
            .list(&InternFilter {
                mentor: Some(MentorFilter::Assigned(id)),
                ..InternFilter::default()
            })
            .await?;
        Ok(ManagerDetail { manager, interns })
    }
}

// ── CreateManager ────────────────────────────────────────────────────────────

pub struct CreateManagerUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub managers: M,
    pub interns: I,
    pub addresses: A,
}

impl<M, I, A> CreateManagerUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub async fn execute(&self, patch: ManagerPatch) -> Result<Manager, StaffServiceError> {
        let mut errors = FieldErrors::new();
        let Some(draft) = patch.resolve(None, WriteMode::Create, &mut errors) else {
            return Err(errors.into());
        };
        check_profile(
            &self.managers,
            &self.interns,
            &self.addresses,
            &draft.profile,
            None,
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let manager = self
            .managers
            .create(Uuid::now_v7(), &draft, Utc::now())
            .await?;
        tracing::info!(manager_id = %manager.id, "manager created");
        Ok(manager)
    }
}

// ── UpdateManager (PUT / PATCH) ──────────────────────────────────────────────

pub struct UpdateManagerUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub managers: M,
    pub interns: I,
    pub addresses: A,
}

impl<M, I, A> UpdateManagerUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub async fn execute(
        &self,
        id: Uuid,
        patch: ManagerPatch,
        mode: WriteMode,
    ) -> Result<Manager, StaffServiceError> {
        let current = self
            .managers
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::ManagerNotFound)?;

        let mut errors = FieldErrors::new();
        let Some(draft) = patch.resolve(Some(&current.draft()), mode, &mut errors) else {
            return Err(errors.into());
        };
        check_profile(
            &self.managers,
            &self.interns,
            &self.addresses,
            &draft.profile,
            Some(id),
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let manager = self
            .managers
            .update(id, &draft, Utc::now())
            .await?
            .ok_or(StaffServiceError::ManagerNotFound)?;
        tracing::info!(manager_id = %id, "manager updated");
        Ok(manager)
    }
}

// ── DeleteManager ────────────────────────────────────────────────────────────

pub struct DeleteManagerUseCase<M: ManagerRepository> {
    pub managers: M,
}

impl<M: ManagerRepository> DeleteManagerUseCase<M> {
    pub async fn execute(&self, id: Uuid) -> Result<(), StaffServiceError> {
        if !self.managers.delete(id).await? {
            return Err(StaffServiceError::ManagerNotFound);
        }
        tracing::info!(manager_id = %id, "manager deleted");
        Ok(())
    }
}
