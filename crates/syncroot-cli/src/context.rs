//! Settings lookup shared by commands

use std::path::{Path, PathBuf};

use syncroot_core::Settings;
use tracing::debug;

use crate::error::{CliError, Result};

/// Settings file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "syncroot.yaml";

/// Where settings come from for this invocation.
#[derive(Debug, Clone)]
pub struct Context {
    config: Option<PathBuf>,
    pub dry_run: bool,
}

impl Context {
    pub fn new(config: Option<PathBuf>, dry_run: bool) -> Self {
        Self { config, dry_run }
    }

    /// The settings file this invocation reads, if any.
    ///
    /// An explicit `--config` is always returned. Otherwise the default file
    /// is used only when it exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = Path::new(DEFAULT_CONFIG);
                default.exists().then(|| default.to_path_buf())
            }
        }
    }

    /// Load settings, or defaults when no settings file is in play.
    pub fn settings(&self) -> Result<Settings> {
        match self.config_path() {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::user(format!(
                        "settings file {} does not exist",
                        path.display()
                    )));
                }
                debug!(path = %path.display(), "loading settings");
                Ok(Settings::load(&path)?)
            }
            None => {
                debug!("no settings file, using defaults");
                Ok(Settings::default())
            }
        }
    }
}
