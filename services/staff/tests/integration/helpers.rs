use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use roster_staff::domain::repository::{AddressRepository, InternRepository, ManagerRepository};
use roster_staff::domain::types::{
    Address, AddressDraft, AddressFilter, AddressPatch, Intern, InternDraft, InternFilter,
    InternPatch, Manager, ManagerDraft, ManagerFilter, ManagerPatch, Mentor, MentorFilter,
    StaffPatch,
};
use roster_staff::error::StaffServiceError;

// ── In-memory store ──────────────────────────────────────────────────────────

struct ManagerRow {
    id: Uuid,
    draft: ManagerDraft,
    has_company_card: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

struct InternRow {
    id: Uuid,
    draft: InternDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Rows keep raw reference ids; reads resolve them so set-null on delete and
/// mentor renames behave like the database.
#[derive(Default)]
pub struct Store {
    addresses: Vec<Address>,
    managers: Vec<ManagerRow>,
    interns: Vec<InternRow>,
}

impl Store {
    fn address(&self, id: Option<Uuid>) -> Option<Address> {
        id.and_then(|id| self.addresses.iter().find(|a| a.id == id).cloned())
    }

    fn manager(&self, row: &ManagerRow) -> Manager {
        Manager {
            id: row.id,
            profile: row.draft.profile.clone(),
            department: row.draft.department.clone(),
            has_company_card: row.has_company_card,
            address: self.address(row.draft.profile.address_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn intern(&self, row: &InternRow) -> Intern {
        let mentor = row.draft.mentor_id.and_then(|id| {
            self.managers.iter().find(|m| m.id == id).map(|m| Mentor {
                id: m.id,
                full_name: m.draft.profile.full_name(),
            })
        });
        Intern {
            id: row.id,
            profile: row.draft.profile.clone(),
            mentor,
            internship_end_date: row.draft.internship_end_date,
            address: self.address(row.draft.profile.address_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

type Shared = Arc<Mutex<Store>>;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ── MemAddressRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemAddressRepo {
    store: Shared,
}

impl AddressRepository for MemAddressRepo {
    async fn list(&self, filter: &AddressFilter) -> Result<Vec<Address>, StaffServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .addresses
            .iter()
            .filter(|a| {
                non_empty(&filter.search).is_none_or(|q| {
                    [&a.street_address, &a.city, &a.state, &a.country]
                        .iter()
                        .any(|field| contains_ci(field, q))
                })
            })
            .filter(|a| non_empty(&filter.country).is_none_or(|c| a.country == c))
            .filter(|a| non_empty(&filter.state).is_none_or(|s| a.state == s))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Address>, StaffServiceError> {
        Ok(self.store.lock().unwrap().address(Some(id)))
    }

    async fn create(
        &self,
        id: Uuid,
        draft: &AddressDraft,
        now: DateTime<Utc>,
    ) -> Result<Address, StaffServiceError> {
        let address = Address {
            id,
            street_address: draft.street_address.clone(),
            city: draft.city.clone(),
            state: draft.state.clone(),
            postal_code: draft.postal_code.clone(),
            country: draft.country.clone(),
            created_at: now,
            updated_at: now,
        };
        self.store.lock().unwrap().addresses.push(address.clone());
        Ok(address)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &AddressDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Address>, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        let Some(address) = store.addresses.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        address.street_address = draft.street_address.clone();
        address.city = draft.city.clone();
        address.state = draft.state.clone();
        address.postal_code = draft.postal_code.clone();
        address.country = draft.country.clone();
        address.updated_at = now;
        Ok(Some(address.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.addresses.len();
        store.addresses.retain(|a| a.id != id);
        if store.addresses.len() == before {
            return Ok(false);
        }
        for row in &mut store.managers {
            if row.draft.profile.address_id == Some(id) {
                row.draft.profile.address_id = None;
            }
        }
        for row in &mut store.interns {
            if row.draft.profile.address_id == Some(id) {
                row.draft.profile.address_id = None;
            }
        }
        Ok(true)
    }
}

// ── MemManagerRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemManagerRepo {
    store: Shared,
}

impl ManagerRepository for MemManagerRepo {
    async fn list(&self, filter: &ManagerFilter) -> Result<Vec<Manager>, StaffServiceError> {
        let store = self.store.lock().unwrap();
        let mut managers: Vec<Manager> = store
            .managers
            .iter()
            .filter(|m| {
                let p = &m.draft.profile;
                non_empty(&filter.search).is_none_or(|q| {
                    [&p.first_name, &p.last_name, &p.email, &m.draft.department]
                        .iter()
                        .any(|field| contains_ci(field, q))
                })
            })
            .filter(|m| {
                non_empty(&filter.department).is_none_or(|d| contains_ci(&m.draft.department, d))
            })
            .filter(|m| filter.is_active.is_none_or(|a| m.draft.profile.is_active == a))
            .filter(|m| filter.hire_date.is_none_or(|d| m.draft.profile.hire_date == d))
            .map(|row| store.manager(row))
            .collect();
        managers.sort_by(|a, b| {
            (&a.profile.last_name, &a.profile.first_name)
                .cmp(&(&b.profile.last_name, &b.profile.first_name))
        });
        Ok(managers)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Manager>, StaffServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .managers
            .iter()
            .find(|m| m.id == id)
            .map(|row| store.manager(row)))
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StaffServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .managers
            .iter()
            .any(|m| m.draft.profile.email == email && Some(m.id) != exclude))
    }

    async fn create(
        &self,
        id: Uuid,
        draft: &ManagerDraft,
        now: DateTime<Utc>,
    ) -> Result<Manager, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        store.managers.push(ManagerRow {
            id,
            draft: draft.clone(),
            has_company_card: true,
            created_at: now,
            updated_at: now,
        });
        let row = store.managers.last().unwrap();
        Ok(store.manager(row))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &ManagerDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Manager>, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        let Some(row) = store.managers.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        row.draft = draft.clone();
        row.updated_at = now;
        let store = &*store;
        Ok(store
            .managers
            .iter()
            .find(|m| m.id == id)
            .map(|row| store.manager(row)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.managers.len();
        store.managers.retain(|m| m.id != id);
        if store.managers.len() == before {
            return Ok(false);
        }
        for row in &mut store.interns {
            if row.draft.mentor_id == Some(id) {
                row.draft.mentor_id = None;
            }
        }
        Ok(true)
    }
}

// ── MemInternRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemInternRepo {
    store: Shared,
}

impl InternRepository for MemInternRepo {
    async fn list(&self, filter: &InternFilter) -> Result<Vec<Intern>, StaffServiceError> {
        let store = self.store.lock().unwrap();
        let mut interns: Vec<Intern> = store
            .interns
            .iter()
            .filter(|i| {
                let p = &i.draft.profile;
                let mentor = store
                    .managers
                    .iter()
                    .find(|m| Some(m.id) == i.draft.mentor_id)
                    .map(|m| &m.draft.profile);
                non_empty(&filter.search).is_none_or(|q| {
                    [&p.first_name, &p.last_name, &p.email]
                        .into_iter()
                        .chain(mentor.into_iter().flat_map(|m| [&m.first_name, &m.last_name]))
                        .any(|field| contains_ci(field, q))
                })
            })
            .filter(|i| filter.is_active.is_none_or(|a| i.draft.profile.is_active == a))
            .filter(|i| {
                filter
                    .internship_end_date
                    .is_none_or(|d| i.draft.internship_end_date == d)
            })
            .filter(|i| match filter.mentor {
                Some(MentorFilter::Assigned(id)) => i.draft.mentor_id == Some(id),
                Some(MentorFilter::Unassigned) => i.draft.mentor_id.is_none(),
                None => true,
            })
            .map(|row| store.intern(row))
            .collect();
        interns.sort_by(|a, b| {
            (&a.profile.last_name, &a.profile.first_name)
                .cmp(&(&b.profile.last_name, &b.profile.first_name))
        });
        Ok(interns)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Intern>, StaffServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .interns
            .iter()
            .find(|i| i.id == id)
            .map(|row| store.intern(row)))
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StaffServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .interns
            .iter()
            .any(|i| i.draft.profile.email == email && Some(i.id) != exclude))
    }

    async fn create(
        &self,
        id: Uuid,
        draft: &InternDraft,
        now: DateTime<Utc>,
    ) -> Result<Intern, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        store.interns.push(InternRow {
            id,
            draft: draft.clone(),
            created_at: now,
            updated_at: now,
        });
        let row = store.interns.last().unwrap();
        Ok(store.intern(row))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &InternDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Intern>, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        let Some(row) = store.interns.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        row.draft = draft.clone();
        row.updated_at = now;
        let store = &*store;
        Ok(store
            .interns
            .iter()
            .find(|i| i.id == id)
            .map(|row| store.intern(row)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StaffServiceError> {
        let mut store = self.store.lock().unwrap();
        let before = store.interns.len();
        store.interns.retain(|i| i.id != id);
        Ok(store.interns.len() != before)
    }
}

// ── Repository set ───────────────────────────────────────────────────────────

/// Three repositories over one shared store.
pub struct Repos {
    pub addresses: MemAddressRepo,
    pub managers: MemManagerRepo,
    pub interns: MemInternRepo,
}

impl Repos {
    pub fn new() -> Self {
        let store: Shared = Arc::new(Mutex::new(Store::default()));
        Self {
            addresses: MemAddressRepo {
                store: Arc::clone(&store),
            },
            managers: MemManagerRepo {
                store: Arc::clone(&store),
            },
            interns: MemInternRepo { store },
        }
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn address_patch(city: &str) -> AddressPatch {
    AddressPatch {
        street_address: Some("1 Main St".into()),
        city: Some(city.into()),
        state: Some("IL".into()),
        postal_code: Some("62701".into()),
        country: Some("USA".into()),
    }
}

pub fn staff_patch(first_name: &str, last_name: &str, email: &str) -> StaffPatch {
    StaffPatch {
        first_name: Some(first_name.into()),
        last_name: Some(last_name.into()),
        email: Some(email.into()),
        phone: Some("555".into()),
        hire_date: Some(date(2020, 1, 1)),
        salary: Some(Decimal::new(9_000_000, 2)),
        is_active: None,
        address: None,
    }
}

/// Ann Lee, Engineering.
pub fn ann() -> ManagerPatch {
    ManagerPatch {
        staff: staff_patch("Ann", "Lee", "ann@x.com"),
        department: Some("Engineering".into()),
    }
}

pub fn manager_patch(first_name: &str, last_name: &str, email: &str, department: &str) -> ManagerPatch {
    ManagerPatch {
        staff: staff_patch(first_name, last_name, email),
        department: Some(department.into()),
    }
}

pub fn intern_patch(first_name: &str, email: &str, mentor: Option<Uuid>) -> InternPatch {
    InternPatch {
        staff: staff_patch(first_name, "Park", email),
        mentor: Some(mentor),
        internship_end_date: Some(date(2024, 6, 1)),
    }
}
