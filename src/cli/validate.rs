// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Validate command - check the blueprint for both environments

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::pipeline::{Environment, PipelineValidator};
use crate::resolver::Resolver;

/// Run the validate command
pub fn run(blueprint_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    println!("{}", "Validating pipeline blueprint...".bold());
    println!();

    let blueprint = super::load_blueprint(blueprint_path.as_deref())?;
    println!("  {} Blueprint loaded", "✓".green());

    let base_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let resolver = Resolver::new(blueprint, base_dir);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for environment in Environment::ALL {
        match resolver.resolve(environment) {
            Ok(description) => {
                let validation = PipelineValidator::validate(&description);
                for warning in &validation.warnings {
                    warnings.push(format!("{}: {}", environment, warning));
                }
                println!(
                    "  {} {} resolves ({} rules)",
                    "✓".green(),
                    environment,
                    description.rules.len()
                );
                if verbose {
                    println!("      Fingerprint: {}", description.fingerprint()?.dimmed());
                    for rule in &description.rules {
                        let loaders: Vec<&str> =
                            rule.loaders.iter().map(|l| l.loader.as_str()).collect();
                        println!(
                            "      - {} {}",
                            rule.pattern.cyan(),
                            format!("[{}]", loaders.join(" | ")).dimmed()
                        );
                    }
                }
            }
            Err(e) => {
                errors.push(format!("{}: {}", environment, e));
                println!("  {} {} fails to resolve", "✗".red(), environment);
            }
        }
    }

    if !errors.is_empty() {
        println!();
        println!("{}:", "Errors".red().bold());
        for error in &errors {
            println!("  {} {}", "✗".red(), error);
        }
    }

    if !warnings.is_empty() {
        println!();
        println!("{}:", "Warnings".yellow().bold());
        for warning in &warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }

    println!();

    if !errors.is_empty() {
        Err(miette::miette!("Blueprint validation failed"))
    } else if !warnings.is_empty() {
        println!("{}", "Blueprint is valid but has warnings.".yellow().bold());
        Ok(())
    } else {
        println!("{}", "Blueprint is valid!".green().bold());
        Ok(())
    }
}
