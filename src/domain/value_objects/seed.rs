//! Seed Digest Value Object
//!
//! The key handed to the backend's instruction-substitution pass.
//! Derived from seed material by SHA-256, truncated to 16 bytes.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{DenimError, DenimResult};

/// Number of digest bytes kept for the backend key
pub const SEED_DIGEST_BYTES: usize = 16;

/// Number of random bytes gathered when no seed material is supplied
pub const FRESH_ENTROPY_BYTES: usize = 32;

/// Seed digest value object
///
/// Always 32 lowercase hex characters (16 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeedDigest(String);

impl SeedDigest {
    /// Digest the given seed material
    pub fn from_material(material: &str) -> Self {
        let hash = Sha256::digest(material.as_bytes());
        let hex = format!("{:x}", hash);
        Self(hex[..SEED_DIGEST_BYTES * 2].to_string())
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SeedDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Seed material together with the digest derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSeed {
    /// Material the digest was computed from
    pub material: String,
    /// Whether the material was generated rather than supplied
    pub generated: bool,
    /// Derived backend key
    pub digest: SeedDigest,
}

/// Derive the backend seed from `material`.
///
/// Empty material is replaced by the hex SHA-256 of 32 bytes from the OS
/// random source before digesting, so every such call yields a new seed.
pub fn derive_seed(material: &str) -> DenimResult<ResolvedSeed> {
    if material.is_empty() {
        let material = fresh_material()?;
        let digest = SeedDigest::from_material(&material);
        return Ok(ResolvedSeed {
            material,
            generated: true,
            digest,
        });
    }

    Ok(ResolvedSeed {
        material: material.to_string(),
        generated: false,
        digest: SeedDigest::from_material(material),
    })
}

fn fresh_material() -> DenimResult<String> {
    let mut buf = [0u8; FRESH_ENTROPY_BYTES];
    getrandom::getrandom(&mut buf).map_err(|e| DenimError::Entropy(e.to_string()))?;
    Ok(format!("{:x}", Sha256::digest(buf)))
}

/// Draw a uniformly distributed value in `1..=upper` from the OS random source.
pub fn random_count(upper: u32) -> DenimResult<i64> {
    let upper = upper.max(1);
    let mut buf = [0u8; 4];
    getrandom::getrandom(&mut buf).map_err(|e| DenimError::Entropy(e.to_string()))?;
    Ok(i64::from(u32::from_le_bytes(buf) % upper) + 1)
}
