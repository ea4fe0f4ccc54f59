use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::{
    database::repositories::postgres_books::PostgresBooksRepository,
    error::{BooksError, Result},
};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    min_connections: u32,
    books: PostgresBooksRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| {
                BooksError::Database(format!("Database connection failed: {e}"))
            })?;

        info!(
            "Database pool initialized with max_connections={}, min_connections={}",
            max_connections, min_connections
        );

        Ok(Self {
            books: PostgresBooksRepository::new(pool.clone()),
            pool,
            max_connections,
            min_connections,
        })
    }

    /// Create a PostgresDatabase from an existing pool (mainly for testing)
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            books: PostgresBooksRepository::new(pool.clone()),
            pool,
            max_connections: 10,
            min_connections: 1,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn books(&self) -> PostgresBooksRepository {
        self.books.clone()
    }

    /// Apply pending migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| {
                BooksError::Database(format!("Migration failed: {e}"))
            })?;

        Ok(())
    }
}
