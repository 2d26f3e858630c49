//! Process-lifetime record of what a run modified

use std::collections::BTreeSet;
use std::sync::Mutex;

use serde::Serialize;
use syncroot_fs::NormalizedPath;

/// Sorted snapshot of a [`ChangeTracker`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub directories: Vec<NormalizedPath>,
    pub environments: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.environments.is_empty()
    }

    /// Directories joined by single spaces.
    pub fn joined_directories(&self) -> String {
        self.directories
            .iter()
            .map(NormalizedPath::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Environment names joined by single spaces.
    pub fn joined_environments(&self) -> String {
        self.environments.join(" ")
    }
}

/// Thread-safe set of modified directories and environments.
///
/// Recording the same value twice has no effect.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    directories: Mutex<BTreeSet<NormalizedPath>>,
    environments: Mutex<BTreeSet<String>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a modified directory. Returns `true` if it was not yet known.
    pub fn record_directory(&self, path: impl Into<NormalizedPath>) -> bool {
        let path = path.into();
        if path.is_empty() {
            return false;
        }
        self.directories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path)
    }

    /// Record a modified environment. Returns `true` if it was not yet known.
    pub fn record_environment(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.environments
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name)
    }

    pub fn snapshot(&self) -> ChangeSet {
        let directories = self
            .directories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect();
        let environments = self
            .environments
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect();
        ChangeSet {
            directories,
            environments,
        }
    }
}
