use crate::config::PostgresConfig;
use crate::db::models::StockUnit;
use crate::db::schema::{POSTGRES_INIT, STOCK_TABLE};
use crate::db::seed::{MAX_ROWS_PER_INSERT, SeedSource, assign_expirations, build_insert};
use crate::error::StoreError;
use backon::{ConstantBuilder, Retryable};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::{Pool, Postgres, Row};
use std::time::Duration;
use tracing::{info, warn};

pub type PgPool = Pool<Postgres>;

/// Upper bound on rows returned by a listing.
pub const LIST_LIMIT: i64 = 200;

/// Pause between the first failed liveness check and the single retry.
pub const READY_RETRY_DELAY: Duration = Duration::from_secs(2);

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already held this many rows; nothing was inserted.
    AlreadyPopulated(i64),
    /// The table was empty and this many rows were inserted.
    Inserted(usize),
}

/// Shared handle to the stock table. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct InventoryStore {
    pool: PgPool,
}

impl InventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool without touching the network; call [`Self::wait_until_ready`] before use.
    pub fn connect(cfg: &PostgresConfig, max_connections: u32) -> Self {
        Self::connect_with_timeout(cfg, max_connections, ACQUIRE_TIMEOUT)
    }

    pub fn connect_with_timeout(
        cfg: &PostgresConfig,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Self {
        let port = cfg.port();
        info!(
            host = %cfg.host,
            port,
            user = %cfg.user,
            database = %cfg.db,
            "creating database pool"
        );
        let options = PgConnectOptions::new()
            .host(&cfg.host)
            .port(port)
            .username(&cfg.user)
            .password(&cfg.password)
            .database(&cfg.db)
            .ssl_mode(PgSslMode::Disable);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);
        Self::new(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Liveness check: one `SELECT 1` round-trip.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Ping the server, retrying exactly once after [`READY_RETRY_DELAY`]. A second failure
    /// is reported as [`StoreError::Unavailable`].
    pub async fn wait_until_ready(&self) -> Result<(), StoreError> {
        self.ping_with_retry(|err, dur| {
            warn!(error = %err, "waiting {:?} for database to come online", dur);
        })
        .await
    }

    async fn ping_with_retry<F>(&self, on_retry: F) -> Result<(), StoreError>
    where
        F: FnMut(&StoreError, Duration),
    {
        (|| async move { self.ping().await })
            .retry(
                ConstantBuilder::default()
                    .with_delay(READY_RETRY_DELAY)
                    .with_max_times(1),
            )
            .notify(on_retry)
            .await
            .map_err(|err| match err {
                StoreError::Database(inner) => StoreError::Unavailable(inner),
                other => other,
            })
    }

    /// Create the namespace and stock table if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        for stmt in POSTGRES_INIT {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM juice")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Populate an empty table from `source`. A table with any rows is left untouched and the
    /// source is not read.
    pub async fn seed_if_empty<R: Rng + ?Sized>(
        &self,
        source: &SeedSource,
        rng: &mut R,
    ) -> Result<SeedOutcome, StoreError> {
        let existing = self.count().await?;
        if existing > 0 {
            info!(table = STOCK_TABLE, rows = existing, "table already populated");
            return Ok(SeedOutcome::AlreadyPopulated(existing));
        }

        let names = source.load().await?;
        let rows = assign_expirations(names, rng, Utc::now());
        if rows.is_empty() {
            warn!(table = STOCK_TABLE, "seed source is empty; nothing inserted");
            return Ok(SeedOutcome::Inserted(0));
        }

        let mut tx = self.pool.begin().await?;
        for chunk in rows.chunks(MAX_ROWS_PER_INSERT) {
            if let Some(mut builder) = build_insert(chunk) {
                builder.build().execute(&mut *tx).await?;
            }
        }
        tx.commit().await?;

        info!(table = STOCK_TABLE, rows = rows.len(), "inserted seed rows");
        Ok(SeedOutcome::Inserted(rows.len()))
    }

    /// Up to [`LIST_LIMIT`] rows in the backend's scan order.
    pub async fn list_stock(&self) -> Result<Vec<StockUnit>, StoreError> {
        let rows = sqlx::query("SELECT id, name, expiration FROM juice LIMIT $1")
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    fn row_to_model(row: PgRow) -> Result<StockUnit, StoreError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let expiration: NaiveDate = row.try_get("expiration")?;

        Ok(StockUnit {
            id,
            name,
            expiration,
        })
    }
}
