use juice_inventory::StoreError;
use juice_inventory::config::Config;
use juice_inventory::router::{InventoryState, inventory_router};
use juice_inventory::service::bootstrap::bootstrap;
use mimalloc::MiMalloc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), StoreError> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.service.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        postgres = ?cfg.postgres,
        listen_addr = %cfg.service.listen_addr,
        seed_path = %cfg.service.seed_path,
        loglevel = %cfg.service.loglevel,
        "starting up"
    );

    let mut rng = StdRng::from_entropy();
    let store = match bootstrap(&cfg, &mut rng).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to initialize inventory store");
            return Err(e);
        }
    };

    let app = inventory_router(InventoryState::new(store.clone()));

    let listener = TcpListener::bind(&cfg.service.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.service.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.pool().close().await;
    info!("server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
