// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::{DatabaseSettings, PoolSettings};
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a connection pool from the configured settings.
///
/// Every connection runs the same init batch:
/// - foreign keys enabled (not default in SQLite)
/// - WAL mode for concurrent readers
/// - busy timeout so concurrent writers wait instead of failing
/// - prepared statement cache sized from the pool settings
pub fn create_connection_pool(settings: &DatabaseSettings) -> AppResult<ConnectionPool> {
    if let Some(parent) = settings.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(AppError::Io)?;
        }
    }

    let manager = SqliteConnectionManager::file(&settings.path)
        .with_init(init_connection(settings.pool));

    build_pool(manager, &settings.pool)
}

fn init_connection(
    pool: PoolSettings,
) -> impl Fn(&mut rusqlite::Connection) -> rusqlite::Result<()> + Send + Sync + 'static {
    move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            pool.busy_timeout_ms
        ))?;
        conn.set_prepared_statement_cache_capacity(pool.statement_cache_capacity);
        Ok(())
    }
}

fn build_pool(manager: SqliteConnectionManager, pool: &PoolSettings) -> AppResult<ConnectionPool> {
    Pool::builder()
        .max_size(pool.max_size)
        .min_idle(pool.min_idle)
        .connection_timeout(Duration::from_secs(pool.connection_timeout_secs))
        .idle_timeout(pool.idle_timeout_secs.map(Duration::from_secs))
        .test_on_check_out(pool.test_on_check_out)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a single-connection in-memory pool for tests.
///
/// With one connection the in-memory database is shared by every checkout.
#[cfg(test)]
pub fn create_test_pool() -> ConnectionPool {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    });

    Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("in-memory pool")
}
