use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

use crate::errors::StoreResult;
use crate::store::{EntityKind, Records, Store};

mod mapper;
mod queries;

/// Store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the tables exist.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_tables(pool).await
    }

    /// Open a private in-memory database.
    ///
    /// The pool keeps a single connection alive for its whole lifetime,
    /// since every new in-memory connection starts with an empty database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_tables(pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn with_tables(pool: SqlitePool) -> StoreResult<Self> {
        queries::create_tables(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    async fn store(&self, records: &Records) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = match records {
            Records::Authors(authors) => queries::insert_authors(&mut tx, authors).await,
            Records::Books(books) => queries::insert_books(&mut tx, books).await,
        };

        if let Err(err) = result {
            warn!(kind = %records.kind(), error = %err, "bulk insert failed");
            return Err(err.into());
        }
        tx.commit().await?;

        info!(kind = %records.kind(), rows = records.len(), "records stored");
        Ok(())
    }

    async fn query_all(&self, kind: EntityKind) -> StoreResult<Records> {
        match kind {
            EntityKind::Author => {
                let rows = queries::list_authors(&self.pool).await?;
                Ok(Records::Authors(mapper::map_authors(rows)))
            }
            EntityKind::Book => {
                let rows = queries::list_books(&self.pool).await?;
                let links = queries::list_links(&self.pool).await?;
                Ok(Records::Books(mapper::map_books(rows, links)?))
            }
        }
    }
}
