// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 packflow contributors

//! Environment overlay resolution
//!
//! The core of packflow: a pure, synchronous merge of a blueprint with
//! an environment overlay into one validated pipeline description.
//! Same blueprint and environment always yield a structurally
//! identical description; there is no I/O and no transient failure
//! mode anywhere in this module.

mod diff;

pub use diff::{EnvironmentDiff, FieldChange};

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::PackflowError;
use crate::pipeline::{Blueprint, Environment, PipelineDescription, PipelineValidator};

/// Resolves a blueprint into environment-concrete pipeline descriptions
pub struct Resolver {
    blueprint: Blueprint,
    base_dir: PathBuf,
}

impl Resolver {
    /// Create a resolver for a blueprint.
    ///
    /// `base_dir` anchors the blueprint's output directory when it is
    /// relative; it must be absolute for resolution to succeed.
    pub fn new(blueprint: Blueprint, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            blueprint,
            base_dir: base_dir.into(),
        }
    }

    /// Create a resolver over the built-in default blueprint
    pub fn with_defaults(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(Blueprint::default(), base_dir)
    }

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// Resolve the blueprint for one environment.
    ///
    /// Overlay literals: `optimize` in production, `debug` in
    /// development, `force_watch` always, and the `ENV` definition set
    /// to the environment's canonical name. Rules are emitted in fixed
    /// precedence order (source first, assets second) for every
    /// environment; `no_parse` is never overridden by the overlay.
    pub fn resolve(&self, environment: Environment) -> Result<PipelineDescription, PackflowError> {
        let optimize = environment.is_production();
        let force_watch = true;
        let debug = environment.is_development();

        // The compile loader is the last step of the source chain; it
        // carries the overlay options.
        let mut source = self.blueprint.source.clone();
        if let Some(compile) = source.loaders.last_mut() {
            compile.options.insert("optimize".into(), Value::Bool(optimize));
            compile.options.insert("forceWatch".into(), Value::Bool(force_watch));
            if debug {
                compile.options.insert("debug".into(), Value::Bool(true));
            }
        }

        let rules = vec![source, self.blueprint.assets.clone()];

        let mut definitions = self.blueprint.definitions.clone();
        definitions.insert("ENV".into(), Value::String(environment.to_string()));

        let description = PipelineDescription {
            environment,
            optimize,
            force_watch,
            debug,
            rules,
            no_parse: self.blueprint.no_parse.clone(),
            output_path: self.resolve_output_path()?,
            dev_server: environment
                .is_development()
                .then(|| self.blueprint.dev_server.clone()),
            definitions,
        };

        PipelineValidator::check(&description)?;

        debug!(environment = %environment, rules = description.rules.len(), "resolved pipeline description");
        Ok(description)
    }

    fn resolve_output_path(&self) -> Result<PathBuf, PackflowError> {
        let output = &self.blueprint.output;
        if output.as_os_str().is_empty() {
            return Err(PackflowError::InvalidOutputPath {
                path: output.clone(),
                reason: "output path is empty".into(),
            });
        }

        let resolved = if output.is_absolute() {
            output.clone()
        } else {
            self.base_dir.join(output)
        };

        if !resolved.is_absolute() {
            return Err(PackflowError::InvalidOutputPath {
                path: resolved,
                reason: format!(
                    "base directory '{}' is not absolute",
                    self.base_dir.display()
                ),
            });
        }

        Ok(resolved)
    }
}

/// Resolve the built-in default blueprint for one environment
pub fn resolve(environment: Environment, base_dir: &Path) -> Result<PipelineDescription, PackflowError> {
    Resolver::with_defaults(base_dir).resolve(environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Rule;
    use serde_json::json;

    fn resolver() -> Resolver {
        Resolver::with_defaults("/project")
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver();
        for environment in Environment::ALL {
            let first = resolver.resolve(environment).unwrap();
            let second = resolver.resolve(environment).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                first.fingerprint().unwrap(),
                second.fingerprint().unwrap()
            );
        }
    }

    #[test]
    fn test_env_definition_uses_canonical_names() {
        let resolver = resolver();
        let dev = resolver.resolve(Environment::Development).unwrap();
        let prod = resolver.resolve(Environment::Production).unwrap();
        assert_eq!(dev.definitions["ENV"], json!("development"));
        assert_eq!(prod.definitions["ENV"], json!("production"));
    }

    #[test]
    fn test_optimize_tracks_production() {
        let resolver = resolver();
        assert!(resolver.resolve(Environment::Production).unwrap().optimize);
        assert!(!resolver.resolve(Environment::Development).unwrap().optimize);
    }

    #[test]
    fn test_debug_tracks_development() {
        let resolver = resolver();
        assert!(resolver.resolve(Environment::Development).unwrap().debug);
        assert!(!resolver.resolve(Environment::Production).unwrap().debug);
    }

    #[test]
    fn test_force_watch_in_both_environments() {
        let resolver = resolver();
        for environment in Environment::ALL {
            assert!(resolver.resolve(environment).unwrap().force_watch);
        }
    }

    #[test]
    fn test_no_parse_identical_across_environments() {
        let resolver = resolver();
        let dev = resolver.resolve(Environment::Development).unwrap();
        let prod = resolver.resolve(Environment::Production).unwrap();
        assert_eq!(dev.no_parse, prod.no_parse);
        assert_eq!(dev.no_parse, r"\.elm$");
    }

    #[test]
    fn test_source_rule_first_in_every_environment() {
        let resolver = resolver();
        for environment in Environment::ALL {
            let description = resolver.resolve(environment).unwrap();
            assert_eq!(description.rules[0].pattern, r"\.elm$");
            assert_eq!(description.rules[1].pattern, r"\.(jpe?g|png|gif|svg|html)$");
        }
    }

    #[test]
    fn test_compile_loader_carries_overlay_options() {
        let resolver = resolver();
        let dev = resolver.resolve(Environment::Development).unwrap();
        let prod = resolver.resolve(Environment::Production).unwrap();

        let dev_compile = dev.rules[0].loaders.last().unwrap();
        assert_eq!(dev_compile.options["optimize"], json!(false));
        assert_eq!(dev_compile.options["forceWatch"], json!(true));
        assert_eq!(dev_compile.options["debug"], json!(true));

        let prod_compile = prod.rules[0].loaders.last().unwrap();
        assert_eq!(prod_compile.options["optimize"], json!(true));
        assert_eq!(prod_compile.options["forceWatch"], json!(true));
        assert!(!prod_compile.options.contains_key("debug"));
    }

    #[test]
    fn test_dev_server_only_in_development() {
        let resolver = resolver();
        assert!(resolver
            .resolve(Environment::Development)
            .unwrap()
            .dev_server
            .is_some());
        assert!(resolver
            .resolve(Environment::Production)
            .unwrap()
            .dev_server
            .is_none());
    }

    #[test]
    fn test_output_path_is_absolute() {
        let description = resolver().resolve(Environment::Production).unwrap();
        assert!(description.output_path.is_absolute());
        assert_eq!(description.output_path, PathBuf::from("/project/public"));
    }

    #[test]
    fn test_absolute_blueprint_output_kept_verbatim() {
        let mut blueprint = Blueprint::default();
        blueprint.output = PathBuf::from("/var/www/site");
        let resolver = Resolver::new(blueprint, "/project");
        let description = resolver.resolve(Environment::Production).unwrap();
        assert_eq!(description.output_path, PathBuf::from("/var/www/site"));
    }

    #[test]
    fn test_fingerprints_differ_between_environments() {
        let resolver = resolver();
        let dev = resolver.resolve(Environment::Development).unwrap();
        let prod = resolver.resolve(Environment::Production).unwrap();
        assert_ne!(dev.fingerprint().unwrap(), prod.fingerprint().unwrap());
    }

    #[test]
    fn test_env_definition_overrides_blueprint_value() {
        let mut blueprint = Blueprint::default();
        blueprint.definitions.insert("ENV".into(), json!("custom"));
        blueprint.definitions.insert("API_URL".into(), json!("https://api.example.com"));
        let resolver = Resolver::new(blueprint, "/project");
        let description = resolver.resolve(Environment::Production).unwrap();
        assert_eq!(description.definitions["ENV"], json!("production"));
        assert_eq!(description.definitions["API_URL"], json!("https://api.example.com"));
    }

    #[test]
    fn test_invalid_rule_in_blueprint_fails_resolution() {
        let mut blueprint = Blueprint::default();
        blueprint.source = Rule {
            pattern: String::new(),
            exclude: vec![],
            loaders: vec![],
        };
        let resolver = Resolver::new(blueprint, "/project");
        let err = resolver.resolve(Environment::Development).unwrap_err();
        assert!(matches!(err, PackflowError::InvalidRule { .. }));
    }

    #[test]
    fn test_empty_output_path_fails_resolution() {
        let mut blueprint = Blueprint::default();
        blueprint.output = PathBuf::new();
        let resolver = Resolver::new(blueprint, "/project");
        let err = resolver.resolve(Environment::Development).unwrap_err();
        assert!(matches!(err, PackflowError::InvalidOutputPath { .. }));
    }

    #[test]
    fn test_relative_base_dir_fails_resolution() {
        let resolver = Resolver::with_defaults("relative/dir");
        let err = resolver.resolve(Environment::Development).unwrap_err();
        assert!(matches!(err, PackflowError::InvalidOutputPath { .. }));
    }

    #[test]
    fn test_free_function_matches_resolver() {
        let via_fn = resolve(Environment::Production, Path::new("/project")).unwrap();
        let via_resolver = resolver().resolve(Environment::Production).unwrap();
        assert_eq!(via_fn, via_resolver);
    }
}
