//! PostgreSQL DDL for the inventory store.
//!
//! Every statement is `IF NOT EXISTS`, so the set is replayed on each boot.

/// Table holding stock units. Created in the connection's search path; the `inventory`
/// namespace is created alongside it but not used for lookups.
pub const STOCK_TABLE: &str = "juice";

pub const CREATE_NAMESPACE: &str = "CREATE SCHEMA IF NOT EXISTS inventory";

pub const CREATE_STOCK_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS juice (
    id          bigint GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    name        varchar NOT NULL,
    expiration  date
)
"#;

/// Statements in execution order.
pub const POSTGRES_INIT: [&str; 2] = [CREATE_NAMESPACE, CREATE_STOCK_TABLE];
