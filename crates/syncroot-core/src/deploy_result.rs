//! Persisted summary of the last completed run
//!
//! The record is one JSON document rewritten atomically after each run.
//! Readers treat a missing or unreadable file as "no previous run" and fields
//! added by newer versions are ignored by older ones.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use syncroot_fs::io::{self, RobustnessConfig};
use syncroot_fs::{ConfigFormat, NormalizedPath};
use tracing::{debug, warn};

use crate::Result;

/// Deploy results keyed by environment name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployResult {
    environments: BTreeMap<String, EnvironmentDeploy>,
}

impl DeployResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `deploy.name`.
    pub fn insert(&mut self, deploy: EnvironmentDeploy) {
        self.environments.insert(deploy.name.clone(), deploy);
    }

    pub fn get(&self, environment: &str) -> Option<&EnvironmentDeploy> {
        self.environments.get(environment)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvironmentDeploy> {
        self.environments.values()
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Whether every recorded environment deployed successfully.
    pub fn all_succeeded(&self) -> bool {
        self.environments.values().all(|e| e.deploy_success)
    }
}

/// What happened to one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentDeploy {
    pub name: String,
    /// Resolved revision of the environment's source.
    pub signature: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub deploy_success: bool,
    pub manifest_checksum: Option<String>,
    pub modules: BTreeMap<String, ModuleDeploy>,
}

impl EnvironmentDeploy {
    /// Start a record for `name` with the current time as `started_at`.
    pub fn started(name: impl Into<String>, signature: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            signature: signature.into(),
            started_at: now,
            finished_at: now,
            ..Self::default()
        }
    }

    /// Close the record with the current time.
    pub fn finish(mut self, success: bool) -> Self {
        self.finished_at = Utc::now();
        self.deploy_success = success;
        self
    }

    pub fn with_module(mut self, name: impl Into<String>, module: ModuleDeploy) -> Self {
        self.modules.insert(name.into(), module);
        self
    }
}

/// One module deployed into an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleDeploy {
    pub source: String,
    pub version: String,
    pub cache_hit: bool,
}

/// Reads and writes deploy-result files.
#[derive(Debug, Default)]
pub struct DeployResultStore {
    robustness: RobustnessConfig,
}

impl DeployResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the file at `path` with `result` as indented JSON.
    pub fn write(&self, path: &NormalizedPath, result: &DeployResult) -> Result<()> {
        let mut content = ConfigFormat::Json.render(path, result)?;
        content.push('\n');
        io::write_atomic(path, content.as_bytes(), self.robustness)?;
        debug!(path = %path, environments = result.len(), "wrote deploy result");
        Ok(())
    }

    /// Read the file at `path`, falling back to an empty result on any failure.
    pub fn read(&self, path: &NormalizedPath) -> DeployResult {
        match self.try_read(path) {
            Ok(result) => result,
            Err(e) => {
                warn!(path = %path, error = %e, "could not read deploy result");
                DeployResult::default()
            }
        }
    }

    /// Read the file at `path`, surfacing failures.
    pub fn try_read(&self, path: &NormalizedPath) -> Result<DeployResult> {
        let content = io::read_text(path)?;
        Ok(ConfigFormat::Json.parse(path, &content)?)
    }
}
