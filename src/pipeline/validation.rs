// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Pipeline validation
//!
//! Validates a resolved description before it is handed to the
//! external engine. `check` is the strict form used by the resolver;
//! `validate` collects every problem plus non-fatal warnings for the
//! CLI report.

use regex::Regex;
use std::collections::HashSet;

use crate::errors::PackflowError;
use crate::pipeline::{PipelineDescription, Rule};

/// Pipeline description validator
pub struct PipelineValidator;

impl PipelineValidator {
    /// Strict validation: first structural error as a typed failure.
    ///
    /// Called by the resolver so an invalid description is never
    /// returned to a caller.
    pub fn check(description: &PipelineDescription) -> Result<(), PackflowError> {
        if description.rules.is_empty() {
            return Err(PackflowError::invalid_rule("pipeline", "no rules defined"));
        }

        for (idx, rule) in description.rules.iter().enumerate() {
            Self::check_rule(idx, rule)?;
        }

        Self::check_pattern("noParse", &description.no_parse)?;

        if !description.output_path.is_absolute() {
            return Err(PackflowError::InvalidOutputPath {
                path: description.output_path.clone(),
                reason: "must resolve to a single absolute directory".into(),
            });
        }

        for (key, value) in &description.definitions {
            if value.is_object() || value.is_array() {
                return Err(PackflowError::InvalidDefinition {
                    key: key.clone(),
                    reason: "value is not a JSON literal".into(),
                });
            }
        }

        Ok(())
    }

    /// Report-style validation: every error, plus warnings
    pub fn validate(description: &PipelineDescription) -> ValidationResult {
        let mut result = ValidationResult::new();

        if description.rules.is_empty() {
            result.add_error("Pipeline has no rules defined");
        }

        for (idx, rule) in description.rules.iter().enumerate() {
            if let Err(e) = Self::check_rule(idx, rule) {
                result.add_error(&e.to_string());
            }
        }

        if let Err(e) = Self::check_pattern("noParse", &description.no_parse) {
            result.add_error(&e.to_string());
        }

        if !description.output_path.is_absolute() {
            result.add_error(&format!(
                "Output path '{}' is not absolute",
                description.output_path.display()
            ));
        }

        for (key, value) in &description.definitions {
            if value.is_object() || value.is_array() {
                result.add_error(&format!("Definition '{}' is not a JSON literal", key));
            }
        }

        // First-match order is significant: a later rule with the same
        // pattern can never fire.
        let mut seen = HashSet::new();
        for rule in &description.rules {
            if !rule.pattern.is_empty() && !seen.insert(rule.pattern.as_str()) {
                result.add_warning(&format!(
                    "Duplicate rule pattern '{}' - the later rule is shadowed by first-match precedence",
                    rule.pattern
                ));
            }
        }

        for (idx, rule) in description.rules.iter().enumerate() {
            if rule.exclude.iter().any(|e| e == &rule.pattern) {
                result.add_warning(&format!(
                    "Rule '{}' excludes its own match pattern and can never apply",
                    Self::rule_label(idx, rule)
                ));
            }
        }

        result
    }

    /// Validate a single rule
    fn check_rule(idx: usize, rule: &Rule) -> Result<(), PackflowError> {
        let label = Self::rule_label(idx, rule);

        if rule.pattern.is_empty() {
            return Err(PackflowError::invalid_rule(label, "match pattern is empty"));
        }

        Self::check_pattern(&label, &rule.pattern)?;

        for exclude in &rule.exclude {
            if exclude.is_empty() {
                return Err(PackflowError::invalid_rule(label, "exclusion pattern is empty"));
            }
            Self::check_pattern(&label, exclude)?;
        }

        if rule.loaders.is_empty() {
            return Err(PackflowError::invalid_rule(label, "loader sequence is empty"));
        }

        for step in &rule.loaders {
            if step.loader.trim().is_empty() {
                return Err(PackflowError::invalid_rule(label, "loader identifier is empty"));
            }
        }

        Ok(())
    }

    /// Ensure a pattern compiles as a regex
    fn check_pattern(label: &str, pattern: &str) -> Result<(), PackflowError> {
        if pattern.is_empty() {
            return Err(PackflowError::invalid_rule(label, "pattern is empty"));
        }
        Regex::new(pattern).map_err(|e| {
            PackflowError::invalid_rule(label, format!("pattern does not compile: {e}"))
        })?;
        Ok(())
    }

    fn rule_label(idx: usize, rule: &Rule) -> String {
        if rule.pattern.is_empty() {
            format!("#{}", idx + 1)
        } else {
            rule.pattern.clone()
        }
    }
}

/// Result of report-style validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
