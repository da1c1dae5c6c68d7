use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use roster_core::error::FieldErrors;

/// Role text used for an intern whose mentor reference is absent.
pub const NO_MENTOR: &str = "No mentor assigned";

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PHONE_LEN: usize = 20;
const MAX_STREET_LEN: usize = 255;
const MAX_POSTAL_CODE_LEN: usize = 20;
const SALARY_MAX_DIGITS: u32 = 10;
const SALARY_DECIMAL_PLACES: u32 = 2;

// ── Address ──────────────────────────────────────────────────────────────────

/// A postal address referenced (optionally) by staff records.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: Uuid,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-writable address columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn draft(&self) -> AddressDraft {
        AddressDraft {
            street_address: self.street_address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }
}

/// Address fields as supplied by a client; `None` means "not supplied".
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl AddressPatch {
    pub fn resolve(
        self,
        stored: Option<&AddressDraft>,
        mode: WriteMode,
        errors: &mut FieldErrors,
    ) -> Option<AddressDraft> {
        let mut merge = Merge::new(errors, mode);
        let street_address = merge.text(
            "street_address",
            self.street_address,
            stored.map(|s| &s.street_address),
            MAX_STREET_LEN,
        );
        let city = merge.text("city", self.city, stored.map(|s| &s.city), MAX_NAME_LEN);
        let state = merge.text("state", self.state, stored.map(|s| &s.state), MAX_NAME_LEN);
        let postal_code = merge.text(
            "postal_code",
            self.postal_code,
            stored.map(|s| &s.postal_code),
            MAX_POSTAL_CODE_LEN,
        );
        let country = merge.text(
            "country",
            self.country,
            stored.map(|s| &s.country),
            MAX_NAME_LEN,
        );
        Some(AddressDraft {
            street_address: street_address?,
            city: city?,
            state: state?,
            postal_code: postal_code?,
            country: country?,
        })
    }
}

// ── Staff (shared field set) ─────────────────────────────────────────────────

/// Columns shared by every staff kind. Embedded by [`Manager`] and [`Intern`].
#[derive(Debug, Clone, PartialEq)]
pub struct StaffProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub is_active: bool,
    pub address_id: Option<Uuid>,
}

impl StaffProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Staff fields as supplied by a client; `None` means "not supplied".
///
/// `address` distinguishes "not supplied" (`None`) from "cleared" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct StaffPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub is_active: Option<bool>,
    pub address: Option<Option<Uuid>>,
}

impl StaffPatch {
    pub fn resolve(
        self,
        stored: Option<&StaffProfile>,
        mode: WriteMode,
        errors: &mut FieldErrors,
    ) -> Option<StaffProfile> {
        let mut merge = Merge::new(errors, mode);
        let first_name = merge.text(
            "first_name",
            self.first_name,
            stored.map(|s| &s.first_name),
            MAX_NAME_LEN,
        );
        let last_name = merge.text(
            "last_name",
            self.last_name,
            stored.map(|s| &s.last_name),
            MAX_NAME_LEN,
        );
        let email = merge.text("email", self.email, stored.map(|s| &s.email), MAX_EMAIL_LEN);
        if let Some(email) = &email {
            if !merge.errors.contains("email") && !is_valid_email(email) {
                merge.errors.add("email", "Enter a valid email address.");
            }
        }
        let phone = merge.text("phone", self.phone, stored.map(|s| &s.phone), MAX_PHONE_LEN);
        let hire_date = merge.value("hire_date", self.hire_date, stored.map(|s| &s.hire_date));
        let salary = merge.value("salary", self.salary, stored.map(|s| &s.salary));
        if let Some(salary) = salary {
            check_salary(merge.errors, salary);
        }
        // Optional columns keep their stored value on both PUT and PATCH.
        let is_active = self
            .is_active
            .or(stored.map(|s| s.is_active))
            .unwrap_or(true);
        let address_id = self
            .address
            .unwrap_or_else(|| stored.and_then(|s| s.address_id));
        Some(StaffProfile {
            first_name: first_name?,
            last_name: last_name?,
            email: email?,
            phone: phone?,
            hire_date: hire_date?,
            salary: salary?,
            is_active,
            address_id,
        })
    }
}

// ── Manager ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Manager {
    pub id: Uuid,
    pub profile: StaffProfile,
    pub department: String,
    /// Server-controlled; never written from client input.
    pub has_company_card: bool,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manager {
    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }

    pub fn role(&self) -> String {
        Staff::Manager(self).role()
    }

    pub fn draft(&self) -> ManagerDraft {
        ManagerDraft {
            profile: self.profile.clone(),
            department: self.department.clone(),
        }
    }

    pub fn as_mentor(&self) -> Mentor {
        Mentor {
            id: self.id,
            full_name: self.full_name(),
        }
    }
}

/// Client-writable manager columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerDraft {
    pub profile: StaffProfile,
    pub department: String,
}

#[derive(Debug, Clone, Default)]
pub struct ManagerPatch {
    pub staff: StaffPatch,
    pub department: Option<String>,
}

impl ManagerPatch {
    pub fn resolve(
        self,
        stored: Option<&ManagerDraft>,
        mode: WriteMode,
        errors: &mut FieldErrors,
    ) -> Option<ManagerDraft> {
        let profile = self
            .staff
            .resolve(stored.map(|s| &s.profile), mode, errors);
        let department = Merge::new(errors, mode).text(
            "department",
            self.department,
            stored.map(|s| &s.department),
            MAX_NAME_LEN,
        );
        Some(ManagerDraft {
            profile: profile?,
            department: department?,
        })
    }
}

/// A manager together with every intern it mentors.
#[derive(Debug, Clone)]
pub struct ManagerDetail {
    pub manager: Manager,
    pub interns: Vec<Intern>,
}

// ── Intern ───────────────────────────────────────────────────────────────────

/// The slice of a mentoring manager an intern carries around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mentor {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intern {
    pub id: Uuid,
    pub profile: StaffProfile,
    pub mentor: Option<Mentor>,
    pub internship_end_date: NaiveDate,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Intern {
    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }

    pub fn role(&self) -> String {
        Staff::Intern(self).role()
    }

    pub fn mentor_id(&self) -> Option<Uuid> {
        self.mentor.as_ref().map(|m| m.id)
    }

    pub fn mentor_name(&self) -> Option<&str> {
        self.mentor.as_ref().map(|m| m.full_name.as_str())
    }

    pub fn draft(&self) -> InternDraft {
        InternDraft {
            profile: self.profile.clone(),
            mentor_id: self.mentor_id(),
            internship_end_date: self.internship_end_date,
        }
    }
}

/// Client-writable intern columns.
#[derive(Debug, Clone, PartialEq)]
pub struct InternDraft {
    pub profile: StaffProfile,
    pub mentor_id: Option<Uuid>,
    pub internship_end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct InternPatch {
    pub staff: StaffPatch,
    pub mentor: Option<Option<Uuid>>,
    pub internship_end_date: Option<NaiveDate>,
}

impl InternPatch {
    pub fn resolve(
        self,
        stored: Option<&InternDraft>,
        mode: WriteMode,
        errors: &mut FieldErrors,
    ) -> Option<InternDraft> {
        let profile = self
            .staff
            .resolve(stored.map(|s| &s.profile), mode, errors);
        let internship_end_date = Merge::new(errors, mode).value(
            "internship_end_date",
            self.internship_end_date,
            stored.map(|s| &s.internship_end_date),
        );
        let mentor_id = self
            .mentor
            .unwrap_or_else(|| stored.and_then(|s| s.mentor_id));
        Some(InternDraft {
            profile: profile?,
            mentor_id,
            internship_end_date: internship_end_date?,
        })
    }
}

// ── Role resolution ──────────────────────────────────────────────────────────

/// Closed set of staff kinds; the role text is derived, never stored.
#[derive(Debug, Clone, Copy)]
pub enum Staff<'a> {
    Manager(&'a Manager),
    Intern(&'a Intern),
}

impl<'a> Staff<'a> {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Manager(m) => m.id,
            Self::Intern(i) => i.id,
        }
    }

    pub fn profile(&self) -> &'a StaffProfile {
        match *self {
            Self::Manager(m) => &m.profile,
            Self::Intern(i) => &i.profile,
        }
    }

    pub fn address(&self) -> Option<&'a Address> {
        match *self {
            Self::Manager(m) => m.address.as_ref(),
            Self::Intern(i) => i.address.as_ref(),
        }
    }

    pub fn full_name(&self) -> String {
        match self {
            Self::Manager(m) => m.full_name(),
            Self::Intern(i) => i.full_name(),
        }
    }

    pub fn role(&self) -> String {
        match self {
            Self::Manager(m) => format!("Manager - {}", m.department),
            Self::Intern(i) => {
                format!("Intern - Mentored by {}", i.mentor_name().unwrap_or(NO_MENTOR))
            }
        }
    }
}

// ── Writes ───────────────────────────────────────────────────────────────────

/// How client input is merged with the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST: required fields must be supplied, optional fields take defaults.
    Create,
    /// PUT: required fields must be supplied, optional fields keep stored values.
    Replace,
    /// PATCH: every field falls back to its stored value.
    Patch,
}

impl WriteMode {
    fn keeps_stored(self) -> bool {
        self == Self::Patch
    }
}

// ── Filters ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AddressFilter {
    /// Substring over street, city, state and country (case-insensitive).
    pub search: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ManagerFilter {
    /// Substring over first/last name, email and department (case-insensitive).
    pub search: Option<String>,
    /// Substring over department (case-insensitive).
    pub department: Option<String>,
    pub is_active: Option<bool>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentorFilter {
    Assigned(Uuid),
    Unassigned,
}

#[derive(Debug, Clone, Default)]
pub struct InternFilter {
    /// Substring over first/last name, email and the mentor's first/last name
    /// (case-insensitive).
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub mentor: Option<MentorFilter>,
    pub internship_end_date: Option<NaiveDate>,
}

// ── Field checks ─────────────────────────────────────────────────────────────

/// Merges client input with a stored row, recording a message against every
/// missing or malformed field so one response reports all of them.
struct Merge<'e> {
    errors: &'e mut FieldErrors,
    keep_stored: bool,
}

impl<'e> Merge<'e> {
    fn new(errors: &'e mut FieldErrors, mode: WriteMode) -> Self {
        Self {
            errors,
            keep_stored: mode.keeps_stored(),
        }
    }

    fn value<T: Clone>(
        &mut self,
        field: &str,
        supplied: Option<T>,
        stored: Option<&T>,
    ) -> Option<T> {
        let value = match supplied {
            Some(v) => Some(v),
            None if self.keep_stored => stored.cloned(),
            None => None,
        };
        self.errors.require(field, value)
    }

    /// Trimmed text, checked for blankness and length when present.
    fn text(
        &mut self,
        field: &str,
        supplied: Option<String>,
        stored: Option<&String>,
        max_len: usize,
    ) -> Option<String> {
        let supplied = supplied.map(|v| v.trim().to_owned());
        let value = self.value(field, supplied, stored)?;
        check_text(self.errors, field, &value, max_len);
        Some(value)
    }
}

fn check_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.is_empty() {
        errors.add(field, "This field may not be blank.");
    } else if value.chars().count() > max_len {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        );
    }
}

fn check_salary(errors: &mut FieldErrors, salary: Decimal) {
    if salary.scale() > SALARY_DECIMAL_PLACES {
        errors.add(
            "salary",
            format!("Ensure that there are no more than {SALARY_DECIMAL_PLACES} decimal places."),
        );
        return;
    }
    let whole_digits = SALARY_MAX_DIGITS - SALARY_DECIMAL_PLACES;
    if salary.trunc().abs() >= Decimal::from(10_i64.pow(whole_digits)) {
        errors.add(
            "salary",
            format!("Ensure that there are no more than {whole_digits} digits before the decimal point."),
        );
    }
}

/// Syntactic email check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
