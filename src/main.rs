// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! packflow - Asset Pipeline Configuration Resolver
//!
//! Merge a pipeline blueprint with an environment overlay into one
//! concrete description for an external bundling engine.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use packflow::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "packflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Resolve {
            env,
            blueprint,
            format,
            output,
        } => packflow::cli::resolve::run(env, blueprint, format, output, cli.verbose),
        Commands::Validate { blueprint } => {
            packflow::cli::validate::run(blueprint, cli.verbose)
        }
        Commands::Diff { blueprint, format } => {
            packflow::cli::diff::run(blueprint, format, cli.verbose)
        }
        Commands::Init { name, force } => packflow::cli::init::run(name, force, cli.verbose),
    }
}
