//! Startup sequence: connect, ping, ensure schema, seed. Each step must succeed before the
//! next runs, and all of them before the listener is bound.

use crate::config::Config;
use crate::db::{InventoryStore, SeedOutcome, SeedSource};
use crate::error::StoreError;
use rand::Rng;
use tracing::info;

pub async fn bootstrap<R: Rng + ?Sized>(
    cfg: &Config,
    rng: &mut R,
) -> Result<InventoryStore, StoreError> {
    let store = InventoryStore::connect(&cfg.postgres, cfg.service.max_connections);
    let source = SeedSource::File(cfg.service.seed_path.clone().into());
    prepare(&store, &source, rng).await?;
    Ok(store)
}

/// Run the readiness, schema and seed steps against an existing store.
pub async fn prepare<R: Rng + ?Sized>(
    store: &InventoryStore,
    source: &SeedSource,
    rng: &mut R,
) -> Result<SeedOutcome, StoreError> {
    store.wait_until_ready().await?;
    store.init_schema().await?;
    let outcome = store.seed_if_empty(source, rng).await?;
    info!(?outcome, "successfully set up database");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostgresConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    #[tokio::test]
    async fn prepare_stops_when_the_store_never_answers() {
        let cfg = PostgresConfig::new("127.0.0.1", Some(1), "u", "p", "d");
        let store = InventoryStore::connect_with_timeout(&cfg, 1, Duration::from_millis(200));
        // Reading this source would fail with `SeedSource`, and a schema step would fail
        // with `Database`; only the readiness step yields `Unavailable`.
        let source = SeedSource::File("/definitely/not/here/juices.txt".into());

        let err = prepare(&store, &source, &mut StdRng::seed_from_u64(0))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }
}
