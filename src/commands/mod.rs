//! Command handlers for the CLI
//!
//! Each command is implemented in its own module.

pub mod compile;
pub mod version;

pub use compile::cmd_compile;
pub use version::cmd_version;
