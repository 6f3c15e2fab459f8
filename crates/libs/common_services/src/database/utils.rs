use crate::database::DbError;
use app_state::{DatabaseSettings, SecretSettings};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Pool};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Connect to the database, verify it answers within the acquire timeout and run migrations.
/// # Errors
///
/// * `PgPoolOptions::connect` can return an error if the database connection fails.
/// * The startup ping can time out.
/// * `sqlx::migrate` can return an error if migrations fail.
pub async fn get_db_pool(
    db_settings: &DatabaseSettings,
    secrets: &SecretSettings,
) -> Result<Pool<Postgres>, DbError> {
    info!("Connecting to database.");
    let acquire_timeout = Duration::from_secs(db_settings.acquire_timeout);
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .max_lifetime(Duration::from_secs(db_settings.max_lifetime))
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout))
        .acquire_timeout(acquire_timeout)
        .test_before_acquire(true)
        .connect(&secrets.database_url)
        .await?;

    with_timeout(acquire_timeout, sqlx::query("SELECT 1").execute(&pool)).await?;
    info!("Database connected.");

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("../../../migrations").run(pool).await?;
    Ok(())
}

/// Bound a database future so a slow database cannot stall a request.
pub async fn with_timeout<T, E>(
    limit: Duration,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, DbError>
where
    DbError: From<E>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(DbError::Timeout(limit)),
    }
}
