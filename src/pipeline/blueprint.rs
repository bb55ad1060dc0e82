// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Pipeline blueprint
//!
//! The base pipeline description before the environment overlay is
//! applied. Loaded from a `.packflow.yaml` (or `.toml`) project file,
//! or built in for an Elm single-page application toolchain.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::PackflowError;
use crate::pipeline::{DevServer, LoaderStep, Rule};

/// Default blueprint file name looked up in the working directory
pub const DEFAULT_BLUEPRINT_FILE: &str = ".packflow.yaml";

/// Base pipeline description, environment-agnostic.
///
/// The two rule slots are named rather than an open list: the resolver
/// always emits the source rule first and the asset rule second, so
/// first-match precedence is fixed by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Compile-to-JS rule template. Always first in the resolved rule
    /// list; its final loader receives the overlay options.
    pub source: Rule,

    /// Static-asset rule template. Always second.
    pub assets: Rule,

    /// Pattern the engine must never parse as modules
    pub no_parse: String,

    /// Output directory; resolved to an absolute path against the
    /// resolver's base directory when relative
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Dev-server settings attached to development resolutions
    #[serde(default)]
    pub dev_server: DevServer,

    /// Extra constant definitions. `ENV` is injected by the resolver
    /// and wins on conflict.
    #[serde(default)]
    pub definitions: BTreeMap<String, Value>,
}

fn default_name() -> String {
    "app".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("public")
}

impl Default for Blueprint {
    /// Built-in template for an Elm single-page application: an Elm
    /// compile rule chained after an asset-fingerprinting loader, and
    /// a file-copying rule for images and markup.
    fn default() -> Self {
        Self {
            name: default_name(),
            source: Rule {
                pattern: r"\.elm$".into(),
                exclude: vec!["elm-stuff".into(), "node_modules".into()],
                loaders: vec![
                    LoaderStep::new("elm-asset-webpack-loader"),
                    LoaderStep::new("elm-webpack-loader")
                        .with_option("verbose", json!(true))
                        .with_option("warn", json!(true))
                        .with_option("runtimeOptions", json!(["-A128M", "-H128M", "-n8m"])),
                ],
            },
            assets: Rule {
                pattern: r"\.(jpe?g|png|gif|svg|html)$".into(),
                exclude: vec!["node_modules".into()],
                loaders: vec![
                    LoaderStep::new("file-loader").with_option("name", json!("[name].[ext]")),
                ],
            },
            no_parse: r"\.elm$".into(),
            output: default_output(),
            dev_server: DevServer::default(),
            definitions: BTreeMap::new(),
        }
    }
}

impl Blueprint {
    /// Load a blueprint from a YAML or TOML file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self, PackflowError> {
        if !path.exists() {
            return Err(PackflowError::BlueprintNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PackflowError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("toml") => Self::from_toml(&content),
            _ => Err(PackflowError::UnsupportedBlueprintFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parse a blueprint from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, PackflowError> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Parse a blueprint from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PackflowError> {
        toml::from_str(toml_str).map_err(Into::into)
    }

    /// Serialize the blueprint to YAML
    pub fn to_yaml(&self) -> Result<String, PackflowError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}
