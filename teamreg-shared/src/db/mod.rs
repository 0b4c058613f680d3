/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool lifecycle with health checks
/// - `migrations`: Embedded schema migrations
/// - `error`: Store error taxonomy shared by every model
///
/// Models live in the `models` module at crate root level.
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod error;
pub mod migrations;
pub mod pool;
