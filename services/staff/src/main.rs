use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use roster_core::tracing::init_tracing;
use roster_staff::config::StaffConfig;
use roster_staff::router::build_router;
use roster_staff::state::AppState;
use roster_staff_migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,sea_orm=warn");

    let config = StaffConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("migrations applied");
    }

    let router = build_router(AppState::new(db));
    let http_addr = format!("0.0.0.0:{}", config.staff_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("staff service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
