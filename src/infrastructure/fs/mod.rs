//! File system helpers

mod home;

pub use home::{denim_home_dir, denim_state_dir, DENIM_DIR, DENIM_TEST_HOME_VAR};
