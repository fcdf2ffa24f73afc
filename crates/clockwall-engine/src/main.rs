//! Engine binary for Clockwall.
//!
//! Wires the heartbeat, the clock collection and a tracing renderer on a
//! single-threaded runtime, then ticks until interrupted or until the
//! configured run time elapses.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `clockwall.yaml` (or `CLOCKWALL_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the time source, heartbeat and collection
//! 4. Add the configured initial clocks
//! 5. Run the heartbeat on a `LocalSet` until shutdown
//! 6. Log the final readouts

mod error;
mod render;

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clockwall_core::config::LoggingConfig;
use clockwall_core::display::DisplayTime;
use clockwall_core::{ClockCollection, ClockwallConfig, Heartbeat, SystemTimeSource, TimeSource};
use clockwall_types::ClockKind;
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::render::{DIAL_CENTER, TraceRenderer};

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "CLOCKWALL_CONFIG";

/// Configuration file read when `CLOCKWALL_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "clockwall.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration fails to load or the run loop fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        period_ms = config.heartbeat.period_ms,
        align_to_second = config.heartbeat.align_to_second,
        initial_clocks = config.clocks.initial.len(),
        max_run_seconds = config.engine.max_run_seconds,
        "clockwall-engine starting"
    );

    // 3-6. Everything that holds `Rc` state runs on one LocalSet.
    let local = LocalSet::new();
    local.run_until(run(config)).await?;

    info!("clockwall-engine shutdown complete");
    Ok(())
}

async fn run(config: ClockwallConfig) -> Result<(), EngineError> {
    let time_source: Rc<dyn TimeSource> = Rc::new(SystemTimeSource::new());
    let heartbeat = Rc::new(Heartbeat::new(&config.heartbeat));
    let mut collection = ClockCollection::new(
        Rc::clone(&heartbeat),
        Rc::clone(&time_source),
        config.clocks.clone(),
    );

    let renderer = Rc::new(TraceRenderer::new(DIAL_CENTER));
    collection.subscribe(renderer.as_collection_observer());

    // 4. Initial clocks. With none configured, show one local digital clock.
    if config.clocks.initial.is_empty() {
        let clock = collection.add_clock(ClockKind::Digital, None);
        clock.borrow_mut().subscribe(renderer.as_clock_observer());
    }
    for initial in &config.clocks.initial {
        let clock = collection.add_clock(initial.kind, initial.offset_minutes()?);
        clock.borrow_mut().subscribe(renderer.as_clock_observer());
    }
    info!(
        clocks = collection.len(),
        time_zones = clockwall_types::TIME_ZONE_COUNT,
        "Clocks initialized"
    );

    // 5. Tick until shutdown.
    let handle = heartbeat.spawn_local(time_source.as_ref());
    let max_run_seconds = config.engine.max_run_seconds;
    let time_limit = async {
        if max_run_seconds == 0 {
            std::future::pending::<()>().await;
        } else {
            tokio::time::sleep(Duration::from_secs(max_run_seconds)).await;
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupt received");
        }
        () = time_limit => {
            info!(max_run_seconds, "Run time limit reached");
        }
    }

    heartbeat.stop();
    handle.await.map_err(|e| EngineError::Heartbeat {
        message: e.to_string(),
    })?;

    // 6. Final readouts.
    for clock in collection.clocks() {
        let clock = clock.borrow();
        info!(
            clock_id = %clock.id(),
            kind = %clock.kind(),
            offset_minutes = clock.time_zone_offset_minutes(),
            zone = clockwall_types::label_for_offset(clock.time_zone_offset_minutes()).unwrap_or("local"),
            readout = %DisplayTime::of(&clock),
            "Final readout"
        );
    }
    info!(heartbeats = heartbeat.fired(), "Run finished");
    Ok(())
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load configuration from `CLOCKWALL_CONFIG`, else `clockwall.yaml`,
/// else defaults.
fn load_config() -> Result<ClockwallConfig, EngineError> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        Ok(ClockwallConfig::from_file(&config_path)?)
    } else {
        Ok(ClockwallConfig::parse("{}")?)
    }
}
