// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for packflow.

pub mod diff;
pub mod init;
pub mod resolve;
pub mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::PackflowError;
use crate::pipeline::{Blueprint, Environment, DEFAULT_BLUEPRINT_FILE};

/// Asset pipeline configuration resolver
///
/// Merge a pipeline blueprint with an environment overlay into one
/// concrete description for an external bundling engine.
#[derive(Parser, Debug)]
#[clap(
    name = "packflow",
    version,
    about = "Asset pipeline configuration resolver for environment-aware bundler builds",
    long_about = None,
    after_help = "Examples:\n\
        packflow init                     Scaffold a .packflow.yaml blueprint\n\
        packflow resolve                  Resolve the development pipeline\n\
        packflow resolve --env production Resolve the production pipeline\n\
        packflow validate                 Check the blueprint for both environments\n\
        packflow diff                     Show what the overlay changes\n\n\
        See 'packflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the pipeline for an environment and emit the description
    Resolve {
        /// Target environment (development, production)
        #[clap(short, long, default_value = "development", value_parser = parse_environment)]
        env: Environment,

        /// Blueprint file (defaults to .packflow.yaml, then the built-in template)
        #[clap(short, long, value_name = "FILE")]
        blueprint: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "json", value_parser = parse_output_format)]
        format: OutputFormat,

        /// Write the description to a file instead of stdout
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate the blueprint for both environments
    Validate {
        /// Blueprint file (defaults to .packflow.yaml, then the built-in template)
        #[clap(short, long, value_name = "FILE")]
        blueprint: Option<PathBuf>,
    },

    /// Show what differs between the development and production resolutions
    Diff {
        /// Blueprint file (defaults to .packflow.yaml, then the built-in template)
        #[clap(short, long, value_name = "FILE")]
        blueprint: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "text", value_parser = parse_diff_format)]
        format: DiffFormat,
    },

    /// Scaffold a .packflow.yaml blueprint in the current directory
    Init {
        /// Project name (defaults to current directory name)
        name: Option<String>,

        /// Overwrite an existing blueprint
        #[clap(short, long)]
        force: bool,
    },
}

/// Output format for the resolve command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output format for the diff command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffFormat {
    Text,
    Json,
}

impl FromStr for DiffFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown diff format: {}", s)),
        }
    }
}

fn parse_environment(s: &str) -> Result<Environment, PackflowError> {
    s.parse()
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

fn parse_diff_format(s: &str) -> Result<DiffFormat, String> {
    s.parse()
}

/// Load the blueprint a command should operate on.
///
/// Explicit path wins; otherwise `.packflow.yaml` in the working
/// directory if present; otherwise the built-in default template.
pub(crate) fn load_blueprint(path: Option<&Path>) -> Result<Blueprint, PackflowError> {
    match path {
        Some(p) => Blueprint::from_file(p),
        None => {
            let default_path = Path::new(DEFAULT_BLUEPRINT_FILE);
            if default_path.exists() {
                Blueprint::from_file(default_path)
            } else {
                Ok(Blueprint::default())
            }
        }
    }
}
