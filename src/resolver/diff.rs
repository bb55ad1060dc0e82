// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Environment diff
//!
//! Field-level comparison of the development and production
//! resolutions of one blueprint. The rule order, `no_parse`, and
//! output path must come out identical; everything else the overlay
//! touches shows up as a change.

use serde::Serialize;
use serde_json::{json, Value};

use super::Resolver;
use crate::errors::PackflowError;
use crate::pipeline::Environment;

/// One field that differs between the two resolutions
#[derive(Debug, Clone, Serialize)]
pub struct FieldChange {
    pub field: String,
    pub development: Value,
    pub production: Value,
}

/// Diff between the development and production resolutions
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentDiff {
    pub development_fingerprint: String,
    pub production_fingerprint: String,

    /// Fields the overlay changes between environments
    pub changes: Vec<FieldChange>,

    /// Fields verified identical across environments
    pub invariant: Vec<String>,
}

impl EnvironmentDiff {
    pub fn to_json(&self) -> Result<String, PackflowError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

impl Resolver {
    /// Resolve both environments and compare them field by field
    pub fn diff(&self) -> Result<EnvironmentDiff, PackflowError> {
        let dev = self.resolve(Environment::Development)?;
        let prod = self.resolve(Environment::Production)?;

        let mut changes = Vec::new();
        let mut invariant = Vec::new();

        let mut record = |field: &str, dev_value: Value, prod_value: Value| {
            if dev_value == prod_value {
                invariant.push(field.to_string());
            } else {
                changes.push(FieldChange {
                    field: field.to_string(),
                    development: dev_value,
                    production: prod_value,
                });
            }
        };

        record("optimize", json!(dev.optimize), json!(prod.optimize));
        record("force_watch", json!(dev.force_watch), json!(prod.force_watch));
        record("debug", json!(dev.debug), json!(prod.debug));
        record(
            "definitions.ENV",
            dev.definitions["ENV"].clone(),
            prod.definitions["ENV"].clone(),
        );
        record(
            "dev_server",
            json!(dev.dev_server.is_some()),
            json!(prod.dev_server.is_some()),
        );
        record("rules", serde_json::to_value(&dev.rules)?, serde_json::to_value(&prod.rules)?);
        record("no_parse", json!(dev.no_parse), json!(prod.no_parse));
        record(
            "output_path",
            Value::String(dev.output_path.display().to_string()),
            Value::String(prod.output_path.display().to_string()),
        );

        Ok(EnvironmentDiff {
            development_fingerprint: dev.fingerprint()?,
            production_fingerprint: prod.fingerprint()?,
            changes,
            invariant,
        })
    }
}
