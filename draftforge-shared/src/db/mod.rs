/// Database layer
///
/// Connection pooling and migrations for the DraftForge PostgreSQL database.
///
/// # Modules
///
/// - [`pool`]: connection pool creation and health checks
/// - [`migrations`]: sqlx migration runner
///
/// Each request handler borrows a connection from the shared pool for the
/// duration of its queries; the pool reclaims it when the future completes,
/// success or failure.

pub mod migrations;
pub mod pool;
