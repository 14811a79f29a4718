use feeder_console::{router, AppState, Config};
use feeder_console::gallery::ReloadReason;
use std::net::SocketAddr;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let state = AppState::new(config).await?;
    info!("feeder api at {}", state.api.base_url());

    spawn_refresh_loop(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn spawn_refresh_loop(state: AppState) {
    tokio::spawn(async move {
        state.health.check().await;
        state.gallery.reload(ReloadReason::Initial).await;

        let mut ticker = interval(state.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            state.health.check().await;
            state.gallery.auto_refresh().await;
        }
    });
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
