//! Database module: stock models, schema and the PostgreSQL-backed store.
//!
//! Layout:
//! - `models.rs`: `StockUnit` and its wire rendering
//! - `schema.rs`: idempotent DDL replayed on each boot
//! - `seed.rs`: seed name sources, expiration sampling, bulk insert builder
//! - `postgres.rs`: `InventoryStore`, the handle shared with request handlers

pub mod models;
pub mod postgres;
pub mod schema;
pub mod seed;

pub use models::{NewStockUnit, StockUnit};
pub use postgres::{InventoryStore, LIST_LIMIT, PgPool, SeedOutcome};
pub use schema::POSTGRES_INIT;
pub use seed::SeedSource;
