//! Seed data for an empty stock table: a name list plus randomly drawn expiration dates.

use crate::db::models::NewStockUnit;
use crate::error::StoreError;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rand::Rng;
use sqlx::{Postgres, QueryBuilder};
use std::path::PathBuf;

/// Width of the expiration window: one Julian year.
pub const EXPIRATION_WINDOW_SECS: i64 = 31_557_600;

/// PostgreSQL caps a statement at 65535 bind parameters; each row binds two.
pub const MAX_ROWS_PER_INSERT: usize = u16::MAX as usize / 2;

/// Where seed names come from.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// Text file, one name per line.
    File(PathBuf),
    Names(Vec<String>),
}

impl SeedSource {
    /// Read the names, dropping blank lines and surrounding whitespace. Order is preserved.
    pub async fn load(&self) -> Result<Vec<String>, StoreError> {
        match self {
            SeedSource::File(path) => {
                let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
                    StoreError::SeedSource {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok(parse_names(&contents))
            }
            SeedSource::Names(names) => Ok(names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()),
        }
    }
}

pub fn parse_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Draw a date uniformly from `[now, now + EXPIRATION_WINDOW_SECS]`.
pub fn random_expiration<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> NaiveDate {
    let offset = rng.gen_range(0..=EXPIRATION_WINDOW_SECS);
    (now + TimeDelta::seconds(offset)).date_naive()
}

pub fn assign_expirations<R: Rng + ?Sized>(
    names: Vec<String>,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<NewStockUnit> {
    names
        .into_iter()
        .map(|name| NewStockUnit {
            name,
            expiration: random_expiration(rng, now),
        })
        .collect()
}

/// Multi-row parameterized insert. `None` for an empty slice, since `VALUES` needs at least
/// one tuple.
pub fn build_insert(rows: &[NewStockUnit]) -> Option<QueryBuilder<'static, Postgres>> {
    if rows.is_empty() {
        return None;
    }
    let mut builder = QueryBuilder::new("INSERT INTO juice (name, expiration) ");
    builder.push_values(rows, |mut b, row| {
        b.push_bind(row.name.clone()).push_bind(row.expiration);
    });
    Some(builder)
}
