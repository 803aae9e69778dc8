//! PostgreSQL item store.
//!
//! Every call opens its own connection, runs one statement (plus a commit
//! for inserts) and closes the connection before returning. There is no
//! pool and no statement spans more than one call. Opening a connection is
//! bounded by `connect_timeout_secs`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use tracing::{debug, info, instrument};

use super::{Item, ItemStore, StoreError, StoreResult};
use crate::core::config::DatabaseConfig;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS items (id SERIAL PRIMARY KEY, name TEXT NOT NULL)";

// Ids are cast so SERIAL and BIGSERIAL columns both decode as i64.
const SELECT_ITEMS: &str = "SELECT id::BIGINT, name FROM items ORDER BY id";

const INSERT_ITEM: &str = "INSERT INTO items (name) VALUES ($1) RETURNING id::BIGINT, name";

/// Item store backed by a PostgreSQL `items` table.
pub struct PgItemStore {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl PgItemStore {
    /// Create a store from database configuration. Does not connect.
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        Self {
            options,
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    /// Create the `items` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_TABLE)
            .execute(&mut conn)
            .await
            .map_err(StoreError::query)?;
        release(conn).await;
        info!("Ensured items table exists");
        Ok(())
    }

    async fn connect(&self) -> StoreResult<PgConnection> {
        bounded_connect(self.connect_timeout, PgConnection::connect_with(&self.options)).await
    }
}

/// Await a connection attempt for at most `limit`.
async fn bounded_connect<T, F>(limit: Duration, connect: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, connect).await {
        Ok(result) => result.map_err(StoreError::connection),
        Err(_) => Err(StoreError::connection(format!(
            "connection attempt timed out after {:?}",
            limit
        ))),
    }
}

/// Close a connection explicitly. A failed close only loses the socket.
async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        debug!("Error closing database connection: {}", e);
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    #[instrument(skip_all)]
    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, (i64, String)>(SELECT_ITEMS)
            .fetch_all(&mut conn)
            .await
            .map_err(StoreError::query)?;
        release(conn).await;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Item { id, name })
            .collect())
    }

    #[instrument(skip_all)]
    async fn insert_item(&self, name: &str) -> StoreResult<Item> {
        let mut conn = self.connect().await?;

        let mut tx = conn.begin().await.map_err(StoreError::query)?;
        let (id, name) = sqlx::query_as::<_, (i64, String)>(INSERT_ITEM)
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::query)?;
        tx.commit().await.map_err(StoreError::query)?;

        release(conn).await;
        Ok(Item { id, name })
    }
}
