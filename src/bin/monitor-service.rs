use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use orbitwatch_adapter_monitor::{BroadcastEmitter, MonitorService};
use orbitwatch_adapter_spacetrack::SpaceTrackClient;
use orbitwatch_domain::{Credentials, MonitorConfig, OutboundEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = config_path();
    let config = if config_path.exists() {
        MonitorConfig::load_from_path(&config_path)
            .with_context(|| format!("loading {}", config_path.display()))?
    } else {
        tracing::info!(path = %config_path.display(), "no config file, using defaults");
        MonitorConfig::default()
    };

    let credentials = Credentials {
        username: env::var("SPACE_TRACK_USERNAME")
            .context("SPACE_TRACK_USERNAME is not set")?,
        password: env::var("SPACE_TRACK_PASSWORD")
            .context("SPACE_TRACK_PASSWORD is not set")?,
    };

    let provider = Arc::new(SpaceTrackClient::new(config.provider.base_url.clone()));
    let emitter = Arc::new(BroadcastEmitter::default());
    let service = MonitorService::new(config, provider, emitter.clone());

    // Transport boundary: subscribers drain the broadcast channel; here the
    // binary writes alerts as JSON lines and logs snapshot cadence.
    let mut events = emitter.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(OutboundEvent::Alert(alert)) => match serde_json::to_string(&alert) {
                    Ok(line) => println!("{line}"),
                    Err(error) => tracing::warn!(%error, "unserializable alert"),
                },
                Ok(OutboundEvent::Snapshot(snapshot)) => {
                    tracing::debug!(
                        rsos = snapshot.rsos.len(),
                        logs = snapshot.logs.len(),
                        "dashboard snapshot emitted"
                    );
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let monitored = service
        .session_start(credentials)
        .await
        .context("starting the monitoring session")?;
    tracing::info!(monitored, "monitoring session started");

    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    tracing::info!("shutting down");
    service.stop().await;
    Ok(())
}

fn config_path() -> PathBuf {
    if let Ok(path) = env::var("ORBITWATCH_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".orbitwatch").join("config.yaml");
    }

    PathBuf::from("orbitwatch-config.yaml")
}
