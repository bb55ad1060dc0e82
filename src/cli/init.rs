// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Init command - scaffold a blueprint file

use colored::Colorize;
use miette::Result;
use std::path::Path;

use crate::pipeline::{Blueprint, DEFAULT_BLUEPRINT_FILE};

/// Run the init command
pub fn run(name: Option<String>, force: bool, verbose: bool) -> Result<()> {
    let project_name = name.unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.file_name().map(|s| s.to_string_lossy().to_string()))
            .unwrap_or_else(|| "app".to_string())
    });

    println!("{}", "Initializing packflow blueprint...".bold());
    println!();

    if Path::new(DEFAULT_BLUEPRINT_FILE).exists() && !force {
        return Err(miette::miette!(
            "{} already exists. Pass --force to overwrite.",
            DEFAULT_BLUEPRINT_FILE
        ));
    }

    let blueprint = Blueprint {
        name: project_name,
        ..Blueprint::default()
    };

    let content = format!(
        "# packflow blueprint\n\
         # The environment overlay (optimize, debug, ENV) is applied by\n\
         # 'packflow resolve' - only environment-independent settings live here.\n\
         {}",
        blueprint.to_yaml()?
    );

    std::fs::write(DEFAULT_BLUEPRINT_FILE, &content).map_err(|e| {
        miette::miette!("Failed to write {}: {}", DEFAULT_BLUEPRINT_FILE, e)
    })?;

    println!("  {} Created {}", "✓".green(), DEFAULT_BLUEPRINT_FILE);
    println!();
    println!("{}", "Blueprint initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to fit your pipeline", DEFAULT_BLUEPRINT_FILE.cyan());
    println!("  2. Run {} to check both environments", "packflow validate".cyan());
    println!("  3. Run {} to emit a description", "packflow resolve".cyan());
    println!();

    if verbose {
        println!("{}", "Generated blueprint:".dimmed());
        println!("{}", "─".repeat(50).dimmed());
        println!("{}", content.dimmed());
    }

    Ok(())
}
