use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use sonos_remote::logging::{self, LoggingMode};
use sonos_remote::{
    ButtonEvent, ConsoleDisplay, PlaybackController, RemoteConfig, SonosNetwork, ZoneNetwork, ZoneRegistry,
};

/// Sonos Remote
///
/// Reads button presses from stdin, one per line (play-pause, volume-up,
/// volume-down, preset-1, preset-2, or p + - 1 2), and prints two status
/// lines after each.
#[derive(Parser, Debug)]
#[command(name = "sonos-remote")]
#[command(about = "Five-button remote for a single zone player")]
#[command(version)]
struct Args {
    /// Zone to control (exact, case-sensitive)
    #[arg(short, long)]
    zone: Option<String>,

    /// Configuration file (defaults to <config dir>/sonos-remote/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Volume change per volume button press
    #[arg(long)]
    volume_step: Option<u8>,

    /// Discovery window in seconds
    #[arg(short = 'd', long)]
    discovery_timeout: Option<u64>,

    /// silent, development or debug (overrides SONOS_REMOTE_LOG_MODE)
    #[arg(long)]
    log_mode: Option<LoggingMode>,

    /// List discovered zones and exit
    #[arg(long)]
    list: bool,
}

impl Args {
    fn load_config(&self) -> Result<RemoteConfig> {
        let mut config = match &self.config {
            Some(path) => RemoteConfig::load(path)?,
            None => RemoteConfig::load_or_default()?,
        };

        if let Some(zone) = &self.zone {
            config.zone_name = zone.clone();
        }
        if let Some(step) = self.volume_step {
            config.volume_step = step;
        }
        if let Some(timeout) = self.discovery_timeout {
            config.discovery_timeout = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let logging_ready = match args.log_mode {
        Some(mode) => logging::init_logging(mode),
        None => logging::init_logging_from_env(),
    };
    logging_ready.context("Failed to initialize logging")?;

    let config = args.load_config().context("Invalid configuration")?;
    debug!(?config, "configuration");

    let mut network = SonosNetwork::from_config(&config);

    if args.list {
        let registry = ZoneRegistry::new(network.discover());
        if registry.is_empty() {
            println!("No zones found");
        }
        for device in registry.devices() {
            println!("{}\t{}\t{}", device.zone_name(), device.model_name, device.base_url());
        }
        return Ok(());
    }

    let mut controller = PlaybackController::new(network, ConsoleDisplay::stdout(), config);
    // A missing zone is shown on the display; play-pause retries
    let _ = controller.start();

    controller.run(spawn_stdin_events());
    Ok(())
}

/// Parse stdin lines into button events on a reader thread
fn spawn_stdin_events() -> mpsc::Receiver<ButtonEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<ButtonEvent>() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    eprintln!("{}", e);
                }
            }
        }
    });

    rx
}
