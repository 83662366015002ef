//! powerbar: a single-line, powerline-style status bar for terminal hosts.
//!
//! Reads host events as JSON lines on stdin and prints the rendered bar on
//! stdout.  Run with:  `RUST_LOG=debug powerbar --width 120`

use anyhow::Result;
use clap::Parser;
use powerbar_app::HostOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "powerbar")]
#[command(version, about = "Powerline-style status bar rendered from host events", long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/powerbar/powerbar.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render at a fixed width instead of following the terminal
    #[arg(short, long)]
    width: Option<usize>,

    /// Disable colors (also honours NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Print the settings definitions as JSON and exit
    #[arg(long)]
    print_settings: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the bar; logs go to stderr.  RUST_LOG controls
    // verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let no_color = cli.no_color || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let options = HostOptions {
        config_path: Some(cli.config.unwrap_or_else(powerbar_config::default_path)),
        width: cli.width.filter(|&w| w > 0),
        no_color,
    };

    if cli.print_settings {
        println!("{}", powerbar_app::settings_json(options)?);
        return Ok(());
    }

    tracing::info!("powerbar v{} starting", env!("CARGO_PKG_VERSION"));
    powerbar_app::run(options).await?;
    Ok(())
}
