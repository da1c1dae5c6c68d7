//! sea-orm entities for the staff service.

pub mod addresses;
pub mod interns;
pub mod managers;
