//! Common test utilities for denim CLI tests.
//!
//! - `TestEnv`: isolated home, project and fake toolchain
//! - Fixtures: the fake `nim` and `clang` scripts

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
