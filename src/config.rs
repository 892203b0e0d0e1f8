//! Configuration file support for phase-resolver.
//!
//! Provides YAML-based configuration through `phase-resolver.config.yml`
//! files, and merges it with command-line arguments into [`Settings`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::cli::Args;
use phase_resolver::application::dto::{OutputFormat, ResolveRequest};
use phase_resolver::dependency_resolution::domain::{
    ArtifactCoords, ArtifactKey, Dependency, DependencyView,
};
use phase_resolver::shared::error::ResolverError;
use phase_resolver::shared::security::read_checked;
use phase_resolver::shared::Result;

pub const CONFIG_FILENAME: &str = "phase-resolver.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub repository: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub view: Option<DependencyView>,
    /// `group:artifact` -> version pins for transitive artifacts
    pub managed_versions: Option<HashMap<String, String>>,
    /// Direct dependency overrides, as coordinate strings
    pub overrides: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_checked(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        warn!("Unknown config field '{}' will be ignored", key);
    }
}

/// Effective settings after merging the config file under the CLI arguments.
#[derive(Debug)]
pub struct Settings {
    pub root: ArtifactCoords,
    pub repository: PathBuf,
    pub format: OutputFormat,
    pub view: DependencyView,
    pub output: Option<PathBuf>,
    pub overrides: Vec<Dependency>,
    pub managed_versions: HashMap<ArtifactKey, String>,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Merges `args` over `config`. Scalar CLI flags replace config values;
    /// overrides and managed versions are merged per artifact key with the
    /// CLI entry winning.
    ///
    /// # Errors
    /// Returns `ResolverError::Validation` for malformed coordinates, pins or
    /// a missing repository manifest path.
    pub fn merge(args: &Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let root: ArtifactCoords = args
            .root
            .parse()
            .map_err(|e: anyhow::Error| validation(format!("root artifact: {}", e)))?;

        let repository = args
            .repository
            .clone()
            .or(config.repository)
            .ok_or_else(|| {
                validation(
                    "no repository manifest given. Pass --repository <FILE> or set 'repository' in the config file"
                        .to_string(),
                )
            })?;

        let mut overrides: Vec<Dependency> = Vec::new();
        let config_overrides = config.overrides.unwrap_or_default();
        for value in args.overrides.iter().chain(config_overrides.iter()) {
            let dependency = Dependency::parse(value)
                .map_err(|e| validation(format!("override '{}': {}", value, e)))?;
            if !overrides.iter().any(|o| o.key() == dependency.key()) {
                overrides.push(dependency);
            }
        }

        let mut managed_versions = HashMap::new();
        for (key, version) in config.managed_versions.unwrap_or_default() {
            managed_versions.insert(parse_key(&key)?, version);
        }
        for pin in &args.managed {
            let (key, version) = pin.split_once('=').ok_or_else(|| {
                validation(format!("managed version '{}': expected KEY=VERSION", pin))
            })?;
            managed_versions.insert(parse_key(key)?, version.trim().to_string());
        }

        Ok(Self {
            root,
            repository,
            format: args.format.or(config.format).unwrap_or_default(),
            view: args.view.or(config.view).unwrap_or_default(),
            output: args.output.clone(),
            overrides,
            managed_versions,
            timeout: args
                .timeout
                .or(config.timeout_secs)
                .map(Duration::from_secs),
        })
    }

    pub fn to_request(&self) -> ResolveRequest {
        let mut request = ResolveRequest::new(self.root.clone())
            .with_overrides(self.overrides.clone())
            .with_managed_versions(self.managed_versions.clone())
            .with_view(self.view);
        if let Some(timeout) = self.timeout {
            request = request.with_timeout(timeout);
        }
        request
    }
}

fn parse_key(value: &str) -> Result<ArtifactKey> {
    value
        .trim()
        .parse()
        .map_err(|e: anyhow::Error| validation(format!("managed version key '{}': {}", value, e)))
}

fn validation(message: String) -> anyhow::Error {
    ResolverError::Validation { message }.into()
}
