use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One persisted inventory record.
///
/// `expiration` is a calendar date in storage; on the wire it is rendered as an RFC 3339 UTC
/// timestamp at midnight, e.g. `"2025-06-01T00:00:00Z"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockUnit {
    pub id: i64,
    pub name: String,
    #[serde(
        serialize_with = "serialize_expiration",
        deserialize_with = "deserialize_expiration"
    )]
    pub expiration: NaiveDate,
}

/// A row about to be inserted; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockUnit {
    pub name: String,
    pub expiration: NaiveDate,
}

fn serialize_expiration<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    date.and_time(NaiveTime::MIN).and_utc().serialize(serializer)
}

fn deserialize_expiration<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer).map(|ts| ts.date_naive())
}
