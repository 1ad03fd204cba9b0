//! Database connection pool management
//!
//! One sqlx MySqlPool per process, shared by every invocation.
//! The pool connects lazily so a down server never blocks startup.
//!
//! sqlx keeps re-dialing a refused server until `acquire_timeout` and then
//! reports only `PoolTimedOut`. A cold pool therefore dials the server once
//! directly first, so a dead host fails at once with the driver's own error.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, MySql};

use crate::bootstrap::StatementRunner;
use crate::config::DbConfig;
use crate::error::{BootstrapError, Result};

/// Connect options for the server itself (no default database).
pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
    let mut opts = MySqlConnectOptions::new().port(config.port);
    if let Some(host) = &config.host {
        opts = opts.host(host);
    }
    if let Some(user) = &config.user {
        opts = opts.username(user);
    }
    if let Some(password) = &config.password {
        opts = opts.password(password);
    }
    opts
}

/// Create the lazily-connecting MySQL pool.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let pool = create_pool(&config);
/// ```
pub fn create_pool(config: &DbConfig) -> MySqlPool {
    let settings = &config.pool;
    tracing::debug!(
        dialect = %config.dialect,
        max_connections = settings.max_connections(),
        acquire_timeout_secs = settings.acquire_timeout.as_secs(),
        recycle_secs = settings.recycle.as_secs(),
        "creating connection pool"
    );

    MySqlPoolOptions::new()
        .min_connections(0)
        .max_connections(settings.max_connections())
        .acquire_timeout(settings.acquire_timeout)
        .max_lifetime(settings.recycle)
        .connect_lazy_with(connect_options(config))
}

/// Dial the server once, bounded by the pool's acquire timeout.
async fn connect_once(pool: &MySqlPool) -> Result<MySqlConnection> {
    let options = pool.connect_options();
    let timeout = pool.options().get_acquire_timeout();
    match tokio::time::timeout(timeout, MySqlConnection::connect_with(&options)).await {
        Ok(conn) => conn.map_err(BootstrapError::connect),
        Err(_) => Err(BootstrapError::connect(sqlx::Error::PoolTimedOut)),
    }
}

/// Check out a connection, reporting the real connect error on failure.
async fn acquire(pool: &MySqlPool) -> Result<PoolConnection<MySql>> {
    if pool.size() == 0 {
        // Nothing open yet: verify the server answers before the pool starts re-dialing.
        let conn = connect_once(pool).await?;
        if let Err(e) = conn.close().await {
            tracing::debug!(error = %e, "closing reachability check connection");
        }
    }

    match pool.acquire().await {
        Ok(conn) => Ok(conn),
        Err(sqlx::Error::PoolTimedOut) if pool.size() == 0 => {
            // The server went away while the pool was empty; say why.
            let conn = connect_once(pool).await?;
            let _ = conn.close().await;
            Err(BootstrapError::connect(sqlx::Error::PoolTimedOut))
        }
        Err(e) => Err(BootstrapError::connect(e)),
    }
}

#[async_trait]
impl StatementRunner for MySqlPool {
    async fn execute(&self, sql: &str) -> Result<()> {
        // Released back to the pool when `conn` drops, on every path.
        let mut conn = acquire(self).await?;
        sqlx::Executor::execute(&mut *conn, sqlx::raw_sql(sql))
            .await
            .map_err(BootstrapError::execute)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{handle, CREATE_DATABASE_STMT};
    use crate::config::Dialect;
    use std::time::{Duration, Instant};

    // Live tests need a reachable server:
    // DB_HOST=... DB_USER=... DB_PASSWORD=... cargo test -p dbinit-core -- --ignored

    fn live_config() -> DbConfig {
        DbConfig::from_env().expect("invalid DB_* environment")
    }

    #[tokio::test]
    async fn pool_honours_settings() {
        let config = DbConfig::new("127.0.0.1", "root", "secret", Dialect::MySql);
        let pool = create_pool(&config);

        let opts = pool.options();
        assert_eq!(opts.get_max_connections(), 7);
        assert_eq!(opts.get_min_connections(), 0);
        assert_eq!(opts.get_acquire_timeout(), config.pool.acquire_timeout);
        assert_eq!(opts.get_max_lifetime(), Some(config.pool.recycle));
        // Lazy: nothing has been opened yet
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn unreachable_host_reports_connect_error() {
        let mut config = DbConfig::new("127.0.0.1", "root", "secret", Dialect::MySql);
        // Port 1 is reserved and closed on any sane test host
        config.port = 1;
        config.pool.acquire_timeout = Duration::from_secs(10);
        let pool = create_pool(&config);

        let started = Instant::now();
        let err = StatementRunner::execute(&pool, CREATE_DATABASE_STMT)
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Connect { .. }));
        assert!(!matches!(
            err,
            BootstrapError::Connect {
                source: sqlx::Error::PoolTimedOut
            }
        ));

        let response = handle(&config, &pool, b"").await;
        let elapsed = started.elapsed();

        assert!(response.starts_with("Error: "), "got {response}");
        assert!(
            response.to_lowercase().contains("refused"),
            "expected the driver's connect error, got {response}"
        );
        // Both invocations failed on the first dial, not after the pool gave up
        assert!(
            elapsed < Duration::from_secs(5),
            "took {elapsed:?}, acquire_timeout is 10s"
        );
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn creates_database_idempotently() {
        let config = live_config();
        let pool = create_pool(&config);

        assert_eq!(handle(&config, &pool, b"{}").await, "ok");
        // Second run sees the schema already present
        assert_eq!(handle(&config, &pool, b"{}").await, "ok");

        let row: (String,) = sqlx::query_as(
            "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA WHERE SCHEMA_NAME = 'wordpress'",
        )
        .fetch_one(&pool)
        .await
        .expect("schema lookup failed");
        assert_eq!(row.0, "wordpress");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn wrong_password_reports_error() {
        let mut config = live_config();
        config.password = Some("definitely-not-the-password".into());
        let pool = create_pool(&config);

        let response = handle(&config, &pool, b"").await;
        assert!(response.starts_with("Error: "), "got {response}");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_invocations_share_pool() {
        let config = live_config();
        let pool = create_pool(&config);

        // Spawn 10 concurrent invocations
        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let pool = pool.clone();
                let config = config.clone();
                tokio::spawn(async move { handle(&config, &pool, b"").await })
            })
            .collect();

        for task in tasks {
            let response = task.await.expect("task panicked");
            assert_eq!(response, "ok");
        }

        // Pool still usable afterwards
        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }
}
