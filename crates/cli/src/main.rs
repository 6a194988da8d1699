// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tickbus - drive the event bus from scripted scenarios

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod demo;
mod output;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{kinds, replay};
use std::path::PathBuf;
use tickbus::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tickbus",
    version,
    about = "tickbus - replay scripted events through a tick-driven event bus"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List event kinds usable in scenarios
    Kinds(kinds::KindsArgs),
    /// Replay a scenario file through the bus
    Replay(replay::ReplayArgs),
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Kinds(args) => kinds::handle(args),
        Commands::Replay(args) => {
            let config = load_config(cli.config)?;
            replay::handle(args, config)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable; `RUST_LOG` overrides the
/// default `warn` level.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}
