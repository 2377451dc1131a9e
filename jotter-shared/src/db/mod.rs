/// Database layer for Jotter
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: embedded migration runner
///
/// The pool is constructed once at startup and handed to components
/// explicitly; there is no global connection singleton. Models live in the
/// `models` module at the crate root.
///
/// # Example
///
/// ```no_run
/// use jotter_shared::db::pool::{create_pool, DatabaseConfig};
/// use jotter_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
