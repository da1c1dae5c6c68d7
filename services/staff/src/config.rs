use roster_core::config::{env_or, required_env};

/// Staff service configuration loaded from environment variables.
#[derive(Debug)]
pub struct StaffConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3110). Env var: `STAFF_PORT`.
    pub staff_port: u16,
    /// Apply pending migrations before serving (default false).
    /// Env var: `STAFF_RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl StaffConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required_env("DATABASE_URL")?,
            staff_port: env_or("STAFF_PORT", 3110),
            run_migrations: env_or("STAFF_RUN_MIGRATIONS", false),
        })
    }
}
