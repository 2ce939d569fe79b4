//! Parcurve CLI - Bootstrap discount curves from a TOML curve definition.
//!
//! # Usage
//!
//! ```bash
//! # Solved pillars
//! parcurve bootstrap curve.toml
//!
//! # Zero rates, or the repricing check of every instrument
//! parcurve bootstrap curve.toml --zeros
//! parcurve --format json bootstrap curve.toml --repricing
//!
//! # Discount factors at arbitrary dates
//! parcurve df curve.toml 2017-03-16 2021-03-16
//!
//! # Check a curve file without solving it
//! parcurve validate curve.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, format)?,
        Commands::Df(args) => commands::df::execute(args, format)?,
        Commands::Validate(args) => commands::validate::execute(args, format)?,
    }

    Ok(())
}
