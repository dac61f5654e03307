//! SQLite user repository implementation.

use crate::row::{to_count, UserRow};
use crate::traits::{UserRepository, UserTransaction};
use async_trait::async_trait;
use social_config::DatabaseConfig;
use social_core::{NewUser, SocialError, SocialResult, User, UserId};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL
    )
"#;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Takes the write lock up front so a read-then-write transaction never has
/// to upgrade its lock after another writer committed.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// SQLite user repository implementation.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a repository over an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects a pool from configuration and bootstraps the schema when
    /// `auto_create_schema` is set.
    ///
    /// An in-memory database lives inside its connection, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> SocialResult<Self> {
        info!("Connecting to SQLite database...");

        let in_memory = config.is_in_memory();
        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = SqlitePoolOptions::new().acquire_timeout(config.connect_timeout());
        let pool_options = if in_memory {
            pool_options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .min_connections(config.min_connections)
                .max_connections(config.max_connections)
                .idle_timeout(Some(config.idle_timeout()))
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            SocialError::Database(format!("Failed to connect: {}", e))
        })?;

        info!(in_memory, "SQLite connection pool established");

        let repository = Self::new(pool);
        if config.auto_create_schema {
            repository.create_schema().await?;
        }
        Ok(repository)
    }

    /// Opens a fresh private in-memory store with the schema in place.
    pub async fn in_memory() -> SocialResult<Self> {
        Self::connect(&DatabaseConfig::with_url("sqlite::memory:")).await
    }

    /// Creates the `users` table if it does not exist.
    pub async fn create_schema(&self) -> SocialResult<()> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        debug!("users table ready");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl std::fmt::Debug for SqliteUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteUserRepository")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn begin(&self) -> SocialResult<Box<dyn UserTransaction>> {
        let tx = self.pool.begin_with(BEGIN_WRITE).await?;
        debug!("SQLite transaction started");
        Ok(Box::new(SqliteUserTransaction { tx }))
    }

    async fn find_all(&self) -> SocialResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, age FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> SocialResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(to_count(count))
    }

    async fn ping(&self) -> SocialResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| SocialError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

/// An open SQLite transaction.
pub struct SqliteUserTransaction {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl UserTransaction for SqliteUserTransaction {
    async fn insert(&mut self, user: &NewUser) -> SocialResult<User> {
        debug!("Inserting user: {}", user.name);

        let result = sqlx::query("INSERT INTO users (name, age) VALUES (?, ?)")
            .bind(&user.name)
            .bind(user.age)
            .execute(&mut *self.tx)
            .await?;

        Ok(user.clone().with_id(UserId::new(result.last_insert_rowid())))
    }

    async fn find_by_id(&mut self, id: UserId) -> SocialResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, age FROM users WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(row.map(User::from))
    }

    async fn update(&mut self, user: &User) -> SocialResult<User> {
        debug!("Updating user: {}", user.id);

        sqlx::query("UPDATE users SET name = ?, age = ? WHERE id = ?")
            .bind(&user.name)
            .bind(user.age)
            .bind(user.id.into_inner())
            .execute(&mut *self.tx)
            .await?;

        Ok(user.clone())
    }

    async fn delete(&mut self, id: UserId) -> SocialResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> SocialResult<()> {
        self.tx.commit().await?;
        debug!("SQLite transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> SocialResult<()> {
        self.tx.rollback().await?;
        debug!("SQLite transaction rolled back");
        Ok(())
    }
}
