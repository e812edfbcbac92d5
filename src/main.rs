use std::error::Error;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use wordcount_tracker::{
    router, AppState, Challenge, Config, CsvFileStore, Gateway, JsonKvStore, Tracker,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    for path in [&config.data_path, &config.fallback_path] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
    }
    info!("csv data will be saved to {}", config.data_path.display());
    if let Some(url) = &config.remote_url {
        info!("tracker reads and writes progress through {url}");
    }

    let gateway = Gateway::new(config.primary_store(), JsonKvStore::new(&config.fallback_path));
    let tracker = Tracker::start(Challenge::default(), gateway).await;
    let state = AppState::new(CsvFileStore::new(&config.data_path), tracker);
    let app = router(state);

    let addr = config.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
            error!(
                "port {} is already in use, try PORT={}",
                config.port,
                config.port.saturating_add(1)
            );
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    info!("listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped, happy writing");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
