/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root and
/// are embedded into the binary with `sqlx::migrate!`. Each migration is a
/// pair of files: `{version}_{name}.up.sql` and `{version}_{name}.down.sql`.
///
/// # Example
///
/// ```no_run
/// use jotter_shared::db::migrations::run_migrations;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations.
///
/// Safe to call on every startup; already-applied migrations are skipped,
/// and sqlx takes an advisory lock so concurrent processes do not race.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the connection is
/// lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
