// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Error types with actionable messages
//!
//! Every resolution failure is a terminal validation error surfaced
//! synchronously to the caller; nothing in the resolver is retryable.
//! The CLI layer adds the usual file I/O failure modes on top.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for packflow operations
pub type PackflowResult<T> = Result<T, PackflowError>;

/// Main error type for packflow
#[derive(Error, Debug, Diagnostic)]
pub enum PackflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Resolution Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Unsupported environment '{value}'")]
    #[diagnostic(
        code(packflow::invalid_environment),
        help("Supported environments: development, production (aliases: dev, prod)")
    )]
    InvalidEnvironment { value: String },

    #[error("Rule '{rule}' is invalid: {reason}")]
    #[diagnostic(
        code(packflow::invalid_rule),
        help("Every rule needs a non-empty match pattern and at least one loader")
    )]
    InvalidRule { rule: String, reason: String },

    #[error("Definition '{key}' is invalid: {reason}")]
    #[diagnostic(
        code(packflow::invalid_definition),
        help("Definition values must be JSON literals: null, boolean, number, or string")
    )]
    InvalidDefinition { key: String, reason: String },

    #[error("Invalid output path '{path}': {reason}")]
    #[diagnostic(code(packflow::invalid_output_path))]
    InvalidOutputPath { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Blueprint Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Blueprint file not found: {path}")]
    #[diagnostic(
        code(packflow::blueprint_not_found),
        help("Create a blueprint with 'packflow init' or pass one with --blueprint")
    )]
    BlueprintNotFound { path: PathBuf },

    #[error("Unsupported blueprint format: {path}")]
    #[diagnostic(
        code(packflow::unsupported_blueprint_format),
        help("Supported formats: YAML (.yaml, .yml) and TOML (.toml)")
    )]
    UnsupportedBlueprintFormat { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(packflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(packflow::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(packflow::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(packflow::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(packflow::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(packflow::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for PackflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for PackflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for PackflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for PackflowError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl PackflowError {
    /// Create an invalid rule error for the rule identified by `label`
    pub fn invalid_rule(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: label.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid environment error
    pub fn invalid_environment(value: impl Into<String>) -> Self {
        Self::InvalidEnvironment { value: value.into() }
    }
}
