//! Runtime configuration sourced from the process environment.
//!
//! Database parameters come from `POSTGRES_*` variables; service knobs from `INVENTORY_*`.
//! `main` loads a `.env` file (if any) before calling [`Config::from_env`].

use figment::{
    Figment,
    error::Kind,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8090";
pub const DEFAULT_SEED_PATH: &str = "src/juices.txt";
pub const DEFAULT_LOGLEVEL: &str = "info";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub service: ServiceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, figment::Error> {
        Ok(Self {
            postgres: PostgresConfig::from_env()?,
            service: ServiceConfig::from_env()?,
        })
    }
}

/// Connection parameters for the backing PostgreSQL server.
///
/// Text fields are taken verbatim from the environment: figment's value parsing would turn
/// `007` into `7` or reject `[x]`, which corrupts credentials.
#[derive(Clone)]
pub struct PostgresConfig {
    pub host: String,
    port: Option<String>,
    pub user: String,
    pub password: String,
    pub db: String,
}

impl PostgresConfig {
    pub fn new(
        host: impl Into<String>,
        port: Option<u16>,
        user: impl Into<String>,
        password: impl Into<String>,
        db: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.map(|p| p.to_string()),
            user: user.into(),
            password: password.into(),
            db: db.into(),
        }
    }

    pub fn from_env() -> Result<Self, figment::Error> {
        Ok(Self {
            host: required("POSTGRES_HOST")?,
            port: Env::var("POSTGRES_PORT"),
            user: required("POSTGRES_USER")?,
            password: required("POSTGRES_PASSWORD")?,
            db: required("POSTGRES_DB")?,
        })
    }

    /// Configured port, or 5432 when it is missing or not a valid TCP port.
    pub fn port(&self) -> u16 {
        let Some(raw) = self.port.as_deref() else {
            return DEFAULT_PG_PORT;
        };
        match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!(port = %raw, "invalid POSTGRES_PORT, using {}", DEFAULT_PG_PORT);
                DEFAULT_PG_PORT
            }
        }
    }
}

fn required(name: &'static str) -> Result<String, figment::Error> {
    Env::var(name).ok_or_else(|| Kind::MissingField(name.into()).into())
}

// Password stays out of logs and panics.
impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port())
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("db", &self.db)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub seed_path: String,
    pub loglevel: String,
    pub max_connections: u32,
}

/// Numeric service knobs, extracted through figment so defaults and type errors are reported
/// the usual way.
#[derive(Serialize, Deserialize)]
struct ServiceLimits {
    max_connections: u32,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, figment::Error> {
        let limits: ServiceLimits = Figment::from(Serialized::defaults(ServiceLimits {
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }))
        .merge(Env::prefixed("INVENTORY_").only(&["max_connections"]))
        .extract()?;
        if limits.max_connections == 0 {
            return Err(
                Kind::Message("INVENTORY_MAX_CONNECTIONS must be at least 1".to_string()).into(),
            );
        }

        Ok(Self {
            listen_addr: Env::var_or("INVENTORY_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            seed_path: Env::var_or("INVENTORY_SEED_PATH", DEFAULT_SEED_PATH),
            loglevel: Env::var_or("INVENTORY_LOGLEVEL", DEFAULT_LOGLEVEL),
            max_connections: limits.max_connections,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            seed_path: DEFAULT_SEED_PATH.to_string(),
            loglevel: DEFAULT_LOGLEVEL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
