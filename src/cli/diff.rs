// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Diff command - compare the development and production resolutions

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::DiffFormat;
use crate::resolver::Resolver;

/// Run the diff command
pub fn run(blueprint_path: Option<PathBuf>, format: DiffFormat, verbose: bool) -> Result<()> {
    let blueprint = super::load_blueprint(blueprint_path.as_deref())?;

    let base_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let diff = Resolver::new(blueprint, base_dir).diff()?;

    match format {
        DiffFormat::Json => {
            println!("{}", diff.to_json()?);
        }
        DiffFormat::Text => {
            println!("{}", "development → production".bold());
            println!();

            println!("{}:", "Changed by the overlay".bold());
            for change in &diff.changes {
                println!(
                    "  {} {}: {} → {}",
                    "Δ".yellow(),
                    change.field.cyan(),
                    render(&change.development),
                    render(&change.production)
                );
            }

            println!();
            println!("{}:", "Invariant".bold());
            for field in &diff.invariant {
                println!("  {} {}", "✓".green(), field.cyan());
            }

            if verbose {
                println!();
                println!("Fingerprints:");
                println!("  development: {}", diff.development_fingerprint.dimmed());
                println!("  production:  {}", diff.production_fingerprint.dimmed());
            }
        }
    }

    Ok(())
}

/// Compact one-line rendering of a changed value
fn render(value: &serde_json::Value) -> String {
    let compact = value.to_string();
    if compact.chars().count() > 60 {
        let head: String = compact.chars().take(60).collect();
        format!("{}…", head)
    } else {
        compact
    }
}
