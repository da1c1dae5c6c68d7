//! Shared plumbing for Roster services: error bodies, validation errors,
//! request ids, serde helpers, tracing and sea-orm query helpers.

pub mod config;
pub mod error;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
