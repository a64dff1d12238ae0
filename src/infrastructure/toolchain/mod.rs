//! Toolchain discovery

mod locator;

pub use locator::{backend_path_env, check_backend_installed, locate_toolchain};
