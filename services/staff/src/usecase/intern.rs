use chrono::Utc;
use uuid::Uuid;

use roster_core::error::FieldErrors;

use crate::domain::repository::{AddressRepository, InternRepository, ManagerRepository};
use crate::domain::types::{Intern, InternDraft, InternFilter, InternPatch, WriteMode};
use crate::error::StaffServiceError;
use crate::usecase::staff::{check_profile, invalid_pk};

// ── ListInterns ──────────────────────────────────────────────────────────────

/// Backs the plain list as well as `by_mentor`, `without_mentor` and `all_roles`.
pub struct ListInternsUseCase<I: InternRepository> {
    pub interns: I,
}

impl<I: InternRepository> ListInternsUseCase<I> {
    pub async fn execute(&self, filter: &InternFilter) -> Result<Vec<Intern>, StaffServiceError> {
        self.interns.list(filter).await
    }
}

// ── GetIntern ────────────────────────────────────────────────────────────────

pub struct GetInternUseCase<I: InternRepository> {
    pub interns: I,
}

impl<I: InternRepository> GetInternUseCase<I> {
    pub async fn execute(&self, id: Uuid) -> Result<Intern, StaffServiceError> {
        self.interns
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::InternNotFound)
    }
}

// ── CreateIntern ─────────────────────────────────────────────────────────────

pub struct CreateInternUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub managers: M,
    pub interns: I,
    pub addresses: A,
}

impl<M, I, A> CreateInternUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub async fn execute(&self, patch: InternPatch) -> Result<Intern, StaffServiceError> {
        let mut errors = FieldErrors::new();
        let Some(draft) = patch.resolve(None, WriteMode::Create, &mut errors) else {
            return Err(errors.into());
        };
        check_intern(
            &self.managers,
            &self.interns,
            &self.addresses,
            &draft,
            None,
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let intern = self
            .interns
            .create(Uuid::now_v7(), &draft, Utc::now())
            .await?;
        tracing::info!(intern_id = %intern.id, mentor_id = ?intern.mentor_id(), "intern created");
        Ok(intern)
    }
}

// ── UpdateIntern (PUT / PATCH) ───────────────────────────────────────────────

pub struct UpdateInternUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub managers: M,
    pub interns: I,
    pub addresses: A,
}

impl<M, I, A> UpdateInternUseCase<M, I, A>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    pub async fn execute(
        &self,
        id: Uuid,
        patch: InternPatch,
        mode: WriteMode,
    ) -> Result<Intern, StaffServiceError> {
        let current = self
            .interns
            .find_by_id(id)
            .await?
            .ok_or(StaffServiceError::InternNotFound)?;

        let mut errors = FieldErrors::new();
        let Some(draft) = patch.resolve(Some(&current.draft()), mode, &mut errors) else {
            return Err(errors.into());
        };
        check_intern(
            &self.managers,
            &self.interns,
            &self.addresses,
            &draft,
            Some(id),
            &mut errors,
        )
        .await?;
        errors.into_result()?;

        let intern = self
            .interns
            .update(id, &draft, Utc::now())
            .await?
            .ok_or(StaffServiceError::InternNotFound)?;
        tracing::info!(intern_id = %id, "intern updated");
        Ok(intern)
    }
}

// ── DeleteIntern ─────────────────────────────────────────────────────────────

pub struct DeleteInternUseCase<I: InternRepository> {
    pub interns: I,
}

impl<I: InternRepository> DeleteInternUseCase<I> {
    pub async fn execute(&self, id: Uuid) -> Result<(), StaffServiceError> {
        if !self.interns.delete(id).await? {
            return Err(StaffServiceError::InternNotFound);
        }
        tracing::info!(intern_id = %id, "intern deleted");
        Ok(())
    }
}

async fn check_intern<M, I, A>(
    managers: &M,
    interns: &I,
    addresses: &A,
    draft: &InternDraft,
    exclude: Option<Uuid>,
    errors: &mut FieldErrors,
) -> Result<(), StaffServiceError>
where
    M: ManagerRepository,
    I: InternRepository,
    A: AddressRepository,
{
    check_profile(managers, interns, addresses, &draft.profile, exclude, errors).await?;
    if let Some(mentor_id) = draft.mentor_id {
        if managers.find_by_id(mentor_id).await?.is_none() {
            errors.add("mentor", invalid_pk(mentor_id));
        }
    }
    Ok(())
}
