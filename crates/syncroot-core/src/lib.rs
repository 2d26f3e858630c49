//! Run orchestration for syncroot
//!
//! This crate ties the filesystem and process layers together into one run:
//!
//! - **Settings**: the deserialized configuration and per-run options
//! - **Change tracking**: which directories and environments a run touched
//! - **Deploy results**: a persisted JSON summary of the last run
//! - **Post-run hook**: a command template fired once all targets are done
//! - **Fatal reporting**: abort-or-collect handling of configuration errors
//!
//! # Architecture
//!
//! ```text
//!              syncroot-cli
//!                   |
//!             syncroot-core
//!                   |
//!        +----------+----------+
//!        |                     |
//!   syncroot-fs          syncroot-exec
//! ```

pub mod changes;
pub mod config;
pub mod deploy_result;
pub mod environment;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod reporter;
pub mod run;

pub use changes::{ChangeSet, ChangeTracker};
pub use config::{RunOptions, Settings, SourceSettings};
pub use deploy_result::{DeployResult, DeployResultStore, EnvironmentDeploy, ModuleDeploy};
pub use environment::strip_component;
pub use error::{Error, Result};
pub use hooks::PostRunHook;
pub use logging::Verbosity;
pub use reporter::FatalReporter;
pub use run::{Finish, Preparation, SyncRun};
