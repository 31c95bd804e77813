use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::logging;
use connect_four::ui::{terminal, App};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

/// Two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the target frame rate
    #[arg(long)]
    frame_rate: Option<u32>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(frame_rate) = cli.frame_rate {
        config.display.frame_rate = frame_rate;
    }
    if let Some(log_file) = cli.log_file {
        config.logging.file = Some(log_file);
    }
    config.validate().context("validating command line overrides")?;

    logging::init(&config.logging).context("initializing logging")?;
    info!(config = %cli.config.display(), "starting connect four");

    run(config).context("running game")
}

fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    terminal::install_panic_hook();
    terminal::enter().context("entering alternate screen")?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut tui = match Terminal::new(backend) {
        Ok(tui) => tui,
        Err(err) => {
            terminal::restore();
            return Err(err).context("creating terminal");
        }
    };

    // Create app and run
    let mut app = App::new(config.display);
    let res = app.run(&mut tui);

    // Restore terminal, always runs, even on error
    terminal::restore();

    res.context("game loop failed")
}
