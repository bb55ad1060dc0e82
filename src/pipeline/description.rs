// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Resolved pipeline description structures
//!
//! Defines the immutable configuration object handed to the external
//! bundling engine. The engine owns file matching, loader invocation,
//! and artifact output; this is purely the description of that work.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::errors::PackflowError;
use crate::pipeline::Environment;

/// Resolved, environment-concrete pipeline description.
///
/// Constructed once per invocation by the resolver and never mutated.
/// Rule order is significant: the engine applies the first matching
/// rule per file path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDescription {
    /// Environment this description was resolved for
    pub environment: Environment,

    /// Produce optimized output (production only)
    pub optimize: bool,

    /// Ask the engine to keep compiler watch mode on
    pub force_watch: bool,

    /// Emit debug-instrumented output (development only)
    pub debug: bool,

    /// Processing rules, in first-match precedence order
    pub rules: Vec<Rule>,

    /// Paths matching this pattern are handed to loaders verbatim,
    /// never parsed as modules. Identical across environments.
    pub no_parse: String,

    /// Absolute directory the engine writes artifacts beneath
    pub output_path: PathBuf,

    /// Dev-server settings; present in development only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServer>,

    /// Compile-time constant definitions (JSON literals only)
    pub definitions: BTreeMap<String, Value>,
}

impl PipelineDescription {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PackflowError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, PackflowError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// BLAKE3 fingerprint of the canonical JSON form.
    ///
    /// Map keys serialize in sorted order, so structurally equal
    /// descriptions always fingerprint identically. Suitable as a
    /// cache key for the external engine.
    pub fn fingerprint(&self) -> Result<String, PackflowError> {
        let canonical = serde_json::to_string(self)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(canonical.as_bytes());
        Ok(hasher.finalize().to_hex().to_string())
    }
}

/// A pattern-matched file-processing rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Regex over file paths selecting the files this rule processes
    pub pattern: String,

    /// Regex patterns excluding paths from the match
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Loader chain applied in sequence to each matched file
    pub loaders: Vec<LoaderStep>,
}

/// One named external loader plus its option mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderStep {
    /// External loader identifier
    pub loader: String,

    /// Options passed to the loader verbatim
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, Value>,
}

impl LoaderStep {
    /// Create a loader step with no options
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: serde_json::Map::new(),
        }
    }

    /// Add an option to the step
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Development server settings for the external engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevServer {
    /// Inline live-reload client into the served bundle
    #[serde(default = "default_true")]
    pub inline: bool,

    /// Colorize the engine's stats output
    #[serde(default = "default_true")]
    pub stats_colors: bool,

    /// Serve the index document for unknown routes (single-page apps)
    #[serde(default = "default_true")]
    pub history_api_fallback: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DevServer {
    fn default() -> Self {
        Self {
            inline: true,
            stats_colors: true,
            history_api_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_description() -> PipelineDescription {
        PipelineDescription {
            environment: Environment::Development,
            optimize: false,
            force_watch: true,
            debug: true,
            rules: vec![Rule {
                pattern: r"\.elm$".into(),
                exclude: vec!["node_modules".into()],
                loaders: vec![LoaderStep::new("elm-webpack-loader")
                    .with_option("optimize", json!(false))],
            }],
            no_parse: r"\.elm$".into(),
            output_path: PathBuf::from("/project/public"),
            dev_server: Some(DevServer::default()),
            definitions: BTreeMap::from([("ENV".to_string(), json!("development"))]),
        }
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let description = sample_description();
        assert_eq!(
            description.fingerprint().unwrap(),
            description.fingerprint().unwrap()
        );
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let description = sample_description();
        let mut other = description.clone();
        other.optimize = true;
        assert_ne!(
            description.fingerprint().unwrap(),
            other.fingerprint().unwrap()
        );
    }

    #[test]
    fn test_json_round_trip() {
        let description = sample_description();
        let json = description.to_json().unwrap();
        let parsed: PipelineDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, description);
    }

    #[test]
    fn test_dev_server_omitted_from_json_when_absent() {
        let mut description = sample_description();
        description.dev_server = None;
        let json = description.to_json().unwrap();
        assert!(!json.contains("dev_server"));
    }

    #[test]
    fn test_loader_step_options_build_up() {
        let step = LoaderStep::new("file-loader")
            .with_option("name", json!("[name].[ext]"))
            .with_option("emit", json!(true));
        assert_eq!(step.options.len(), 2);
        assert_eq!(step.options["name"], json!("[name].[ext]"));
    }
}
