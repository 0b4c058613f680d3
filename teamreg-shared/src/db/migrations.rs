/// Schema migrations
///
/// Migration files live in `migrations/` at the workspace root and are
/// embedded into the binary at compile time, so a deployed server needs no
/// files on disk to bring its schema up to date.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies every migration that has not been applied yet
///
/// Each migration runs in its own transaction; a failing migration is rolled
/// back and reported.
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::db::pool::{create_pool, DatabaseConfig};
/// use teamreg_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Number of migrations bundled into this build
pub fn embedded_migration_count() -> usize {
    sqlx::migrate!("../migrations").iter().count()
}
