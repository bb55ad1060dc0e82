// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Resolve command - emit the pipeline description for one environment

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::OutputFormat;
use crate::pipeline::Environment;
use crate::resolver::Resolver;

/// Run the resolve command
pub fn run(
    env: Environment,
    blueprint_path: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let blueprint = super::load_blueprint(blueprint_path.as_deref())?;

    let base_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;

    let resolver = Resolver::new(blueprint, base_dir);
    let description = resolver.resolve(env)?;

    let rendered = match format {
        OutputFormat::Json => description.to_json()?,
        OutputFormat::Yaml => description.to_yaml()?,
    };

    match output {
        Some(ref path) => {
            std::fs::write(path, &rendered).map_err(|e| {
                miette::miette!("Failed to write '{}': {}", path.display(), e)
            })?;
            println!(
                "  {} Wrote {} pipeline description to {}",
                "✓".green(),
                env,
                path.display().to_string().cyan()
            );
        }
        None => {
            println!("{}", rendered);
        }
    }

    if verbose {
        eprintln!();
        eprintln!("{}", format!("Resolved for {}:", env).bold());
        eprintln!("  Fingerprint: {}", description.fingerprint()?.dimmed());
        for rule in &description.rules {
            let loaders: Vec<&str> = rule.loaders.iter().map(|l| l.loader.as_str()).collect();
            eprintln!("  Rule {} -> {}", rule.pattern.cyan(), loaders.join(" | "));
        }
    }

    Ok(())
}
