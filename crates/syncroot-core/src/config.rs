//! Settings consumed by a run

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use syncroot_fs::{ConfigStore, NormalizedPath};

use crate::Result;

/// Default location of the deploy-result file inside a target directory.
pub const DEFAULT_DEPLOY_RESULT_FILE: &str = ".syncroot-deploy.json";

/// Default per-command timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds before an external command is killed. Zero disables the limit.
    pub timeout: u64,
    /// Tolerate failed fetches when cached content is available.
    pub use_cache_fallback: bool,
    /// Post-run command, given as a list of words.
    pub postrun: Vec<String>,
    pub cachedir: String,
    pub deploy_result_file: String,
    pub sources: BTreeMap<String, SourceSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            use_cache_fallback: false,
            postrun: Vec::new(),
            cachedir: String::new(),
            deploy_result_file: DEFAULT_DEPLOY_RESULT_FILE.to_string(),
            sources: BTreeMap::new(),
        }
    }
}

/// One configured content source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Directory the source's environments are deployed into.
    pub basedir: String,
    /// Literal prefix or `/regex/` removed from environment names.
    pub strip_component: Option<String>,
}

impl Settings {
    /// Load settings from a `.toml`, `.json`, `.yaml` or `.yml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = NormalizedPath::new(path);
        Ok(ConfigStore::new().load(&path)?)
    }

    /// The post-run template: `postrun` words joined by single spaces.
    pub fn postrun_template(&self) -> String {
        self.postrun.join(" ")
    }

    /// Every directory setting paired with the label used in diagnostics.
    pub fn directory_settings(&self) -> Vec<(String, &str)> {
        let mut settings = vec![("cachedir".to_string(), self.cachedir.as_str())];
        for (name, source) in &self.sources {
            settings.push((format!("sources.{name}.basedir"), source.basedir.as_str()));
        }
        settings
    }
}

/// Per-invocation switches set on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Plan without touching the filesystem.
    pub dry_run: bool,
    /// Collect configuration errors instead of aborting on the first one.
    pub validate: bool,
}
