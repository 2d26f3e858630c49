//! Command implementations for syncroot-cli
//!
//! Every command returns the process exit status on success.

pub mod check;
pub mod checksum;
pub mod exec;
pub mod postrun;
pub mod promote;
pub mod status;

pub use check::run_check;
pub use checksum::run_checksum;
pub use exec::run_exec;
pub use postrun::run_postrun;
pub use promote::run_promote;
pub use status::run_status;
