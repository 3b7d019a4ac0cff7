//! System monitor entry point.

use common::shutdown_signal;
use monitor::{Config, Monitor};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        metrics_file = %config.metrics_file.display(),
        sample_interval_ms = config.sample_interval.as_millis() as u64,
        write_interval_ms = config.write_interval.as_millis() as u64,
        "starting system monitor"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor = tokio::spawn(Monitor::new(config).run(shutdown_rx));

    let signal = shutdown_signal().await;
    tracing::info!(%signal, "stopping monitor");
    let _ = shutdown_tx.send(true);

    if let Err(e) = monitor.await {
        tracing::error!(error = %e, "monitor terminated abnormally");
    }
    tracing::info!("system monitor stopped");
}
