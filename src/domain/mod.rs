//! Domain Layer
//!
//! The core of Denim - build rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Build request, manifest, toolchain descriptions
//! - `value_objects/` - Immutable value types (obfuscation parameters, seed, flags)
//! - `policies/` - Which units get obfuscated
//! - `ports/` - Interface definitions for infrastructure (process runner, events)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches the file system
//! 2. **Pure Functions** - Validation and flag serialization are deterministic given a seed
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod value_objects;
