//! Domain Policies
//!
//! Business rules that govern behavior.
//! These are pure functions that operate on domain entities.

mod obfuscation_policy;

pub use obfuscation_policy::{is_marked_unit, ObfuscationPolicy, MARKED_UNIT_PREFIX};
