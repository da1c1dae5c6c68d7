use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAddressRepository, DbInternRepository, DbManagerRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn address_repo(&self) -> DbAddressRepository {
        DbAddressRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn manager_repo(&self) -> DbManagerRepository {
        DbManagerRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn intern_repo(&self) -> DbInternRepository {
        DbInternRepository {
            db: Arc::clone(&self.db),
        }
    }
}
