//! Filesystem primitives for syncroot
//!
//! Provides the pieces every resolver needs before and after fetching
//! content into a target tree:
//!
//! - [`NormalizedPath`]: canonical spelling of directory paths
//! - [`DirectoryManager`]: create-or-validate and purge-and-recreate
//! - [`checksum`]: SHA-256 content identity of files
//! - [`promote`]: relocation of staged files to their final location
//! - [`io`]: locked, atomic writes
//! - [`ConfigStore`]: extension-driven config loading

pub mod checksum;
pub mod config;
pub mod dirs;
pub mod error;
pub mod io;
pub mod path;
pub mod promote;

pub use checksum::{content_checksum, file_checksum};
pub use config::{ConfigFormat, ConfigStore};
pub use dirs::{DirectoryManager, Purge};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
pub use promote::{Promotion, promote};
