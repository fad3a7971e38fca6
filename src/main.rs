//! Sensornet host server entry point.
//!
//! Thin bootstrap glue: resolves configuration, sets up logging, wires the
//! (placeholder) host components, and waits for a shutdown signal. All of the
//! interesting behavior lives in the library's `config` module.

use anyhow::Result;
use clap::Parser;
use sensornet::cli::{Cli, Role};
use sensornet::config::{ConfigStore, Kind, Profile, Schema, StoreOptions};
use sensornet::logging::{LogOutput, LoggingConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

/// Required shape of a host configuration.
fn host_schema() -> Schema {
    Schema::new()
        .map(
            "mqtt",
            Schema::new().key("host", Kind::Str).key("port", Kind::Int),
        )
        .map("database", Schema::new().key("path", Kind::Str))
        .map("dashboard", Schema::new().key("port", Kind::Int))
        .map("logging", Schema::new().key("level", Kind::Str))
}

/// Required shape of a client configuration.
fn client_schema() -> Schema {
    Schema::new()
        .key("client_id", Kind::Str)
        .key("sensor_pin", Kind::Int)
        .key("sensor_type", Kind::Str)
        .key("update_interval", Kind::Int)
        .map(
            "mqtt",
            Schema::new().key("host", Kind::Str).key("port", Kind::Int),
        )
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (profile, schema) = match cli.role {
        Role::Client => (Profile::Client, client_schema()),
        Role::Host => (Profile::Host, host_schema()),
    };
    let config_path = cli.config_path();

    // A malformed config file aborts startup here; a missing one starts from
    // profile defaults.
    let store = ConfigStore::load_with_options(
        &config_path,
        StoreOptions {
            env_path: Some(PathBuf::from(&cli.env_file)),
            profile: Some(profile),
        },
    )?;

    // Logging level comes from the resolved tree unless --verbose wins.
    let config = if cli.verbose {
        LoggingConfig::new(Level::DEBUG, LogOutput::parse(&cli.log))
    } else {
        LoggingConfig::from_level_str(
            store.get_str("logging.level").as_deref(),
            LogOutput::parse(&cli.log),
        )
    };
    config.init()?;

    info!(
        config = %store.file_path().display(),
        role = %profile,
        "sensornet host initialized"
    );

    // Resolution ran before the subscriber was installed, so its missing-file
    // warning had nowhere to go; report the condition again now that it does.
    if !Path::new(&config_path).exists() {
        warn!(
            path = %config_path,
            "config file not found, running on profile defaults and environment overrides"
        );
    }

    if !store.validate(&schema) {
        warn!("configuration failed schema validation, continuing with resolved values");
    }

    // Component wiring. The real subsystems consume these sections; until
    // they exist the sections are logged so operators can verify resolution.
    let mqtt = store.section("mqtt");
    info!(
        host = %mqtt.get("host").and_then(|v| v.as_str()).unwrap_or("?"),
        port = mqtt.get("port").and_then(|v| v.as_i64()).unwrap_or(0),
        "mqtt broker started (placeholder)"
    );

    let database = store.section("database");
    info!(
        path = %database.get("path").and_then(|v| v.as_str()).unwrap_or("?"),
        "data manager started (placeholder)"
    );

    let dashboard = store.section("dashboard");
    info!(
        port = dashboard.get("port").and_then(|v| v.as_i64()).unwrap_or(0),
        "web dashboard started (placeholder)"
    );

    info!("host server started, waiting for shutdown signal");
    shutdown_signal().await;

    info!("shutdown signal received, stopping host server");
    Ok(())
}
