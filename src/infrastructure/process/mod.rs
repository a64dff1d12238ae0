//! Process runner implementations

mod system;

pub use system::SystemProcessRunner;
