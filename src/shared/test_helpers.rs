#[cfg(test)]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
#[cfg(test)]
use sqlx::SqlitePool;

/// In-memory database with the schema applied.
///
/// Every connection to `:memory:` opens a fresh database, so the pool is
/// pinned to a single connection that is never recycled.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    crate::core::database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// File-backed database with several pooled connections, for tests that need
/// real concurrent access. The files are removed on drop.
#[cfg(test)]
pub struct TempDatabase {
    pub pool: SqlitePool,
    path: std::path::PathBuf,
}

#[cfg(test)]
impl TempDatabase {
    pub async fn create() -> Self {
        let path = std::env::temp_dir().join(format!("item-catalog-{}.db", uuid::Uuid::now_v7()));

        let config = crate::core::config::DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        };

        let pool = crate::core::database::create_pool(&config)
            .await
            .expect("failed to open database file");

        crate::core::database::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        Self { pool, path }
    }
}

#[cfg(test)]
impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}
