mod cmd_devices;
mod cmd_listen;
mod cmd_replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use touchgest::GestureConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "touchgest")]
#[command(about = "Touchscreen gesture recognizer for libinput debug-events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a recorded debug-events transcript.
    Replay(ReplayArgs),
    /// Recognize gestures from debug-events lines on stdin.
    Listen(ListenArgs),
    /// List touch-capable devices from `libinput list-devices` output.
    Devices(DevicesArgs),
}

#[derive(Debug, Args)]
struct ReplayArgs {
    trace: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    /// File with the expected event labels, one per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    #[arg(long = "tail-ms", default_value_t = 2_500)]
    tail_ms: u64,
}

#[derive(Debug, Args)]
struct ListenArgs {
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DevicesArgs {
    /// Reads stdin when omitted.
    file: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<GestureConfig> {
    match path {
        Some(path) => GestureConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GestureConfig::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => cmd_replay::run_replay(cmd_replay::ReplayOptions {
            trace_path: args.trace,
            config: load_config(args.config.as_deref())?,
            expect_path: args.expect,
            tail_ms: args.tail_ms,
        }),
        Commands::Listen(args) => cmd_listen::run_listen(load_config(args.config.as_deref())?),
        Commands::Devices(args) => cmd_devices::run_devices(args.file.as_deref()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "touchgest=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}
