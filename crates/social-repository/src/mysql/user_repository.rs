//! MySQL user repository implementation.

use crate::row::{to_count, UserRow};
use crate::traits::{UserRepository, UserTransaction};
use async_trait::async_trait;
use social_config::DatabaseConfig;
use social_core::{NewUser, SocialError, SocialResult, User, UserId};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, Transaction};
use tracing::{debug, info, warn};

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        age INT NOT NULL
    )
"#;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Creates a repository over an existing pool.
    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connects a pool from configuration and bootstraps the schema when
    /// `auto_create_schema` is set.
    pub async fn connect(config: &DatabaseConfig) -> SocialResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                SocialError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection pool established");

        let repository = Self::new(pool);
        if config.auto_create_schema {
            repository.create_schema().await?;
        }
        Ok(repository)
    }

    /// Creates the `users` table if it does not exist.
    pub async fn create_schema(&self) -> SocialResult<()> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        debug!("users table ready");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn begin(&self) -> SocialResult<Box<dyn UserTransaction>> {
        let tx = self.pool.begin().await?;
        debug!("MySQL transaction started");
        Ok(Box::new(MySqlUserTransaction { tx }))
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

/// An open MySQL transaction.
pub struct MySqlUserTransaction {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl UserTransaction for MySqlUserTransaction {
    async fn insert(&mut self, user: &NewUser) -> SocialResult<User> {
        debug!("Inserting user: {}", user.name);

        let result = sqlx::query("INSERT INTO users (name, age) VALUES (?, ?)")
            .bind(&user.name)
            .bind(user.age)
            .execute(&mut *self.tx)
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| SocialError::internal("Assigned user id out of range"))?;

        Ok(user.clone().with_id(UserId::new(id)))
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
        debug!("MySQL transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> SocialResult<()> {
        self.tx.rollback().await?;
        debug!("MySQL transaction rolled back");
        Ok(())
    }
}
