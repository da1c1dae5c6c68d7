use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, Condition,
    DatabaseConnection, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, SqlErr, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use roster_core::sea_ext::icontains;
use roster_staff_schema::{addresses, interns, managers};

use crate::domain::repository::{AddressRepository, InternRepository, ManagerRepository};
use crate::domain::types::{
    Address, AddressDraft, AddressFilter, Intern, InternDraft, InternFilter, Manager,
    ManagerDraft, ManagerFilter, Mentor, MentorFilter, StaffProfile,
};
use crate::error::StaffServiceError;
use crate::usecase::staff::{EMAIL_TAKEN, invalid_pk};

// ── Address repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAddressRepository {
    pub db: Arc<DatabaseConnection>,
}

impl AddressRepository for DbAddressRepository {
    async fn list(&self, filter: &AddressFilter) -> Result<Vec<Address>, StaffServiceError> {
        let mut cond = Condition::all();
        if let Some(search) = non_empty(&filter.search) {
            cond = cond.add(
                Condition::any()
                    .add(icontains(addresses::Column::StreetAddress, search))
                    .add(icontains(addresses::Column::City, search))
                    .add(icontains(addresses::Column::State, search))
                    .add(icontains(addresses::Column::Country, search)),
            );
        }
        if let Some(country) = non_empty(&filter.country) {
            cond = cond.add(addresses::Column::Country.eq(country));
        }
        if let Some(state) = non_empty(&filter.state) {
            cond = cond.add(addresses::Column::State.eq(state));
        }
        let models = addresses::Entity::find()
            .filter(cond)
            .order_by_asc(addresses::Column::CreatedAt)
            .order_by_asc(addresses::Column::Id)
            .all(&*self.db)
            .await
            .context("list addresses")?;
        Ok(models.into_iter().map(address_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Address>, StaffServiceError> {
        let model = addresses::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .context("find address by id")?;
        Ok(model.map(address_from_model))
    }

    async fn create(
        &self,
        id: Uuid,
        draft: &AddressDraft,
        now: DateTime<Utc>,
    ) -> Result<Address, StaffServiceError> {
        let mut am = address_active_model(id, draft, now);
        am.created_at = Set(now);
        let model = am.insert(&*self.db).await.context("create address")?;
        Ok(address_from_model(model))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &AddressDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Address>, StaffServiceError> {
        match address_active_model(id, draft, now).update(&*self.db).await {
            Ok(model) => Ok(Some(address_from_model(model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update address").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError> {
        let txn = self.db.begin().await.context("begin delete address")?;
        managers::Entity::update_many()
            .col_expr(managers::Column::AddressId, Expr::value(None::<Uuid>))
            .filter(managers::Column::AddressId.eq(id))
            .exec(&txn)
            .await
            .context("detach managers from address")?;
        interns::Entity::update_many()
            .col_expr(interns::Column::AddressId, Expr::value(None::<Uuid>))
            .filter(interns::Column::AddressId.eq(id))
            .exec(&txn)
            .await
            .context("detach interns from address")?;
        let result = addresses::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete address")?;
        txn.commit().await.context("commit delete address")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Manager repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbManagerRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ManagerRepository for DbManagerRepository {
    async fn list(&self, filter: &ManagerFilter) -> Result<Vec<Manager>, StaffServiceError> {
        let mut cond = Condition::all();
        if let Some(search) = non_empty(&filter.search) {
            cond = cond.add(
                Condition::any()
                    .add(icontains(managers::Column::FirstName, search))
                    .add(icontains(managers::Column::LastName, search))
                    .add(icontains(managers::Column::Email, search))
                    .add(icontains(managers::Column::Department, search)),
            );
        }
        if let Some(department) = non_empty(&filter.department) {
            cond = cond.add(icontains(managers::Column::Department, department));
        }
        if let Some(is_active) = filter.is_active {
            cond = cond.add(managers::Column::IsActive.eq(is_active));
        }
        if let Some(hire_date) = filter.hire_date {
            cond = cond.add(managers::Column::HireDate.eq(hire_date));
        }
        let rows = managers::Entity::find()
            .filter(cond)
            .find_also_related(addresses::Entity)
            .order_by_asc(managers::Column::LastName)
            .order_by_asc(managers::Column::FirstName)
            .order_by_asc(managers::Column::Id)
            .all(&*self.db)
            .await
            .context("list managers")?;
        Ok(rows
            .into_iter()
            .map(|(model, address)| manager_from_model(model, address))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, StaffServiceError> {
        let row = managers::Entity::find_by_id(id)
            .find_also_related(addresses::Entity)
            .one(&*self.db)
            .await
            .context("find manager by id")?;
        Ok(row.map(|(model, address)| manager_from_model(model, address)))
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StaffServiceError> {
        let count = managers::Entity::find()
            .filter(managers::Column::Email.eq(email))
            .apply_if(exclude, |q, id| q.filter(managers::Column::Id.ne(id)))
            .count(&*self.db)
            .await
            .context("check manager email")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        id: Uuid,
        draft: &ManagerDraft,
        now: DateTime<Utc>,
    ) -> Result<Manager, StaffServiceError> {
        let mut am = manager_active_model(id, draft, now);
        am.has_company_card = Set(true);
        am.created_at = Set(now);
        let model = am
            .insert(&*self.db)
            .await
            .map_err(|e| write_error(e, "create manager", &manager_references(draft)))?;
        let address = load_address(&self.db, model.address_id).await?;
        Ok(manager_from_model(model, address))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &ManagerDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Manager>, StaffServiceError> {
        let model = match manager_active_model(id, draft, now).update(&*self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(e) => {
                return Err(write_error(e, "update manager", &manager_references(draft)));
            }
        };
        let address = load_address(&self.db, model.address_id).await?;
        Ok(Some(manager_from_model(model, address)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError> {
        let txn = self.db.begin().await.context("begin delete manager")?;
        interns::Entity::update_many()
            .col_expr(interns::Column::MentorId, Expr::value(None::<Uuid>))
            .filter(interns::Column::MentorId.eq(id))
            .exec(&txn)
            .await
            .context("detach interns from mentor")?;
        let result = managers::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete manager")?;
        txn.commit().await.context("commit delete manager")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Intern repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInternRepository {
    pub db: Arc<DatabaseConnection>,
}

impl DbInternRepository {
    /// Resolve mentor names for a batch of interns in one query.
    async fn load_mentors(
        &self,
        mentor_ids: impl IntoIterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, Mentor>, StaffServiceError> {
        let mut ids: Vec<Uuid> = mentor_ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let models = managers::Entity::find()
            .filter(managers::Column::Id.is_in(ids))
            .all(&*self.db)
            .await
            .context("load mentors")?;
        Ok(models
            .into_iter()
            .map(|m| (m.id, mentor_from_model(m)))
            .collect())
    }

    async fn hydrate(
        &self,
        model: interns::Model,
        address: Option<addresses::Model>,
    ) -> Result<Intern, StaffServiceError> {
        let mut mentors = self.load_mentors(model.mentor_id).await?;
        let mentor = model.mentor_id.and_then(|id| mentors.remove(&id));
        Ok(intern_from_model(model, address, mentor))
    }
}

impl InternRepository for DbInternRepository {
    async fn list(&self, filter: &InternFilter) -> Result<Vec<Intern>, StaffServiceError> {
        let mut cond = Condition::all();
        if let Some(search) = non_empty(&filter.search) {
            cond = cond.add(
                Condition::any()
                    .add(icontains(interns::Column::FirstName, search))
                    .add(icontains(interns::Column::LastName, search))
                    .add(icontains(interns::Column::Email, search))
                    .add(icontains(managers::Column::FirstName, search))
                    .add(icontains(managers::Column::LastName, search)),
            );
        }
        if let Some(is_active) = filter.is_active {
            cond = cond.add(interns::Column::IsActive.eq(is_active));
        }
        if let Some(end_date) = filter.internship_end_date {
            cond = cond.add(interns::Column::InternshipEndDate.eq(end_date));
        }
        match filter.mentor {
            Some(MentorFilter::Assigned(mentor_id)) => {
                cond = cond.add(interns::Column::MentorId.eq(mentor_id));
            }
            Some(MentorFilter::Unassigned) => {
                cond = cond.add(interns::Column::MentorId.is_null());
            }
            None => {}
        }
        // The mentor join only feeds the search condition; rows stay one per intern.
        let rows = interns::Entity::find()
            .join(JoinType::LeftJoin, interns::Relation::Mentor.def())
            .filter(cond)
            .find_also_related(addresses::Entity)
            .order_by_asc(interns::Column::LastName)
            .order_by_asc(interns::Column::FirstName)
            .order_by_asc(interns::Column::Id)
            .all(&*self.db)
            .await
            .context("list interns")?;

        let mentors = self
            .load_mentors(rows.iter().filter_map(|(m, _)| m.mentor_id))
            .await?;
        Ok(rows
            .into_iter()
            .map(|(model, address)| {
                let mentor = model.mentor_id.and_then(|id| mentors.get(&id).cloned());
                intern_from_model(model, address, mentor)
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Intern>, StaffServiceError> {
        let row = interns::Entity::find_by_id(id)
            .find_also_related(addresses::Entity)
            .one(&*self.db)
            .await
            .context("find intern by id")?;
        match row {
            Some((model, address)) => Ok(Some(self.hydrate(model, address).await?)),
            None => Ok(None),
        }
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StaffServiceError> {
        let count = interns::Entity::find()
            .filter(interns::Column::Email.eq(email))
            .apply_if(exclude, |q, id| q.filter(interns::Column::Id.ne(id)))
            .count(&*self.db)
            .await
            .context("check intern email")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        id: Uuid,
        draft: &InternDraft,
        now: DateTime<Utc>,
    ) -> Result<Intern, StaffServiceError> {
        let mut am = intern_active_model(id, draft, now);
        am.created_at = Set(now);
        let model = am
            .insert(&*self.db)
            .await
            .map_err(|e| write_error(e, "create intern", &intern_references(draft)))?;
        let address = load_address(&self.db, model.address_id).await?;
        self.hydrate(model, address).await
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &InternDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Intern>, StaffServiceError> {
        let model = match intern_active_model(id, draft, now).update(&*self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(e) => return Err(write_error(e, "update intern", &intern_references(draft))),
        };
        let address = load_address(&self.db, model.address_id).await?;
        Ok(Some(self.hydrate(model, address).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError> {
        let result = interns::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .context("delete intern")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A reference column, the wire field it is reported under, and the written id.
type Reference = (&'static str, &'static str, Option<Uuid>);

fn manager_references(draft: &ManagerDraft) -> [Reference; 1] {
    [("address_id", "address", draft.profile.address_id)]
}

fn intern_references(draft: &InternDraft) -> [Reference; 2] {
    [
        ("address_id", "address", draft.profile.address_id),
        ("mentor_id", "mentor", draft.mentor_id),
    ]
}

/// Constraint races lost after the use-case checks surface as validation
/// failures: a unique `email` index, or a referenced row deleted meanwhile.
fn write_error(err: DbErr, context: &'static str, references: &[Reference]) -> StaffServiceError {
    match constraint_error(err.sql_err(), references) {
        Some(invalid) => invalid,
        None => anyhow::Error::new(err).context(context).into(),
    }
}

fn constraint_error(
    sql_err: Option<SqlErr>,
    references: &[Reference],
) -> Option<StaffServiceError> {
    match sql_err? {
        SqlErr::UniqueConstraintViolation(_) => {
            Some(StaffServiceError::invalid("email", EMAIL_TAKEN))
        }
        // Postgres names the violated constraint, e.g. `fk_interns_mentor_id`.
        SqlErr::ForeignKeyConstraintViolation(detail) => {
            references.iter().find_map(|&(column, field, id)| {
                id.filter(|_| detail.contains(column))
                    .map(|id| StaffServiceError::invalid(field, invalid_pk(id)))
            })
        }
        _ => None,
    }
}

async fn load_address(
    db: &DatabaseConnection,
    address_id: Option<Uuid>,
) -> Result<Option<addresses::Model>, StaffServiceError> {
    let Some(id) = address_id else {
        return Ok(None);
    };
    let model = addresses::Entity::find_by_id(id)
        .one(db)
        .await
        .context("load staff address")?;
    Ok(model)
}

// `created_at` and `has_company_card` stay NotSet: updates never touch them.

fn address_active_model(
    id: Uuid,
    draft: &AddressDraft,
    now: DateTime<Utc>,
) -> addresses::ActiveModel {
    addresses::ActiveModel {
        id: Set(id),
        street_address: Set(draft.street_address.clone()),
        city: Set(draft.city.clone()),
        state: Set(draft.state.clone()),
        postal_code: Set(draft.postal_code.clone()),
        country: Set(draft.country.clone()),
        created_at: NotSet,
        updated_at: Set(now),
    }
}

fn manager_active_model(
    id: Uuid,
    draft: &ManagerDraft,
    now: DateTime<Utc>,
) -> managers::ActiveModel {
    let p = &draft.profile;
    managers::ActiveModel {
        id: Set(id),
        first_name: Set(p.first_name.clone()),
        last_name: Set(p.last_name.clone()),
        email: Set(p.email.clone()),
        phone: Set(p.phone.clone()),
        hire_date: Set(p.hire_date),
        salary: Set(p.salary),
        is_active: Set(p.is_active),
        address_id: Set(p.address_id),
        department: Set(draft.department.clone()),
        has_company_card: NotSet,
        created_at: NotSet,
        updated_at: Set(now),
    }
}

fn intern_active_model(
    id: Uuid,
    draft: &InternDraft,
    now: DateTime<Utc>,
) -> interns::ActiveModel {
    let p = &draft.profile;
    interns::ActiveModel {
        id: Set(id),
        first_name: Set(p.first_name.clone()),
        last_name: Set(p.last_name.clone()),
        email: Set(p.email.clone()),
        phone: Set(p.phone.clone()),
        hire_date: Set(p.hire_date),
        salary: Set(p.salary),
        is_active: Set(p.is_active),
        address_id: Set(p.address_id),
        mentor_id: Set(draft.mentor_id),
        internship_end_date: Set(draft.internship_end_date),
        created_at: NotSet,
        updated_at: Set(now),
    }
}

fn address_from_model(m: addresses::Model) -> Address {
    Address {
        id: m.id,
        street_address: m.street_address,
        city: m.city,
        state: m.state,
        postal_code: m.postal_code,
        country: m.country,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn manager_from_model(m: managers::Model, address: Option<addresses::Model>) -> Manager {
    Manager {
        id: m.id,
        profile: StaffProfile {
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            hire_date: m.hire_date,
            salary: m.salary,
            is_active: m.is_active,
            address_id: m.address_id,
        },
        department: m.department,
        has_company_card: m.has_company_card,
        address: address.map(address_from_model),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn mentor_from_model(m: managers::Model) -> Mentor {
    manager_from_model(m, None).as_mentor()
}

fn intern_from_model(
    m: interns::Model,
    address: Option<addresses::Model>,
    mentor: Option<Mentor>,
) -> Intern {
    Intern {
        id: m.id,
        profile: StaffProfile {
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            hire_date: m.hire_date,
            salary: m.salary,
            is_active: m.is_active,
            address_id: m.address_id,
        },
        mentor,
        internship_end_date: m.internship_end_date,
        address: address.map(address_from_model),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}
