//! fault-watch demo binary.
//!
//! Installs the process fault listeners from an optional settings file, then waits for
//! faults. `--simulate` triggers one fault on startup to exercise the configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use fault_watch::config::load_settings;
use fault_watch::error::RejectionError;
use fault_watch::events::spawn_watched;
use fault_watch::observability::init_logging;
use fault_watch::{unhandled, FaultConfig, FaultSettings};

#[derive(Parser)]
#[command(name = "fault-watch")]
#[command(about = "Log and react to process faults", long_about = None)]
struct Cli {
    /// Settings file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit trace lines for setup and dispatch decisions.
    #[arg(short, long)]
    verbose: bool,

    /// Trigger a fault after the listeners are installed.
    #[arg(long, value_enum)]
    simulate: Option<Simulate>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Simulate {
    Panic,
    Rejection,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => FaultSettings::default(),
    };
    settings.verbose |= cli.verbose;

    init_logging(settings.verbose);
    tracing::info!(settings = ?settings, "fault-watch starting");

    unhandled(FaultConfig::from_settings(&settings));

    match cli.simulate {
        Some(Simulate::Panic) => {
            let _ = std::thread::spawn(|| panic!("simulated panic")).join();
        }
        Some(Simulate::Rejection) => {
            spawn_watched(async { Err::<(), _>(RejectionError("simulated rejection".into())) });
        }
        None => {}
    }

    tracing::info!("Waiting for faults");
    std::future::pending::<()>().await;
    Ok(())
}
