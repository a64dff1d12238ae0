//! Obfuscation Parameters
//!
//! The validated obfuscation configuration for one build, and its
//! serialization into backend flags.
//!
//! ## Lifecycle
//!
//! Constructed once from CLI/config, validated once, then read-only. The seed
//! is resolved on first use and cached on the instance, so every compile step
//! of a build shares one derived key.

use std::fmt;

use once_cell::sync::OnceCell;

use super::backend_flag::BackendFlag;
use super::seed::{derive_seed, ResolvedSeed};
use crate::error::{DenimError, DenimResult};

/// Maximum bogus-control-flow probability (percent)
pub const MAX_PROBABILITY: i64 = 100;
/// Maximum bogus-control-flow passes
pub const MAX_BCF_LOOP: i64 = 5;
/// Maximum instruction-substitution passes
pub const MAX_SUB_LOOP: i64 = 4;
/// Maximum flattening splits per basic block
pub const MAX_SPLIT: i64 = 5;

/// Numeric obfuscation setting subject to an upper bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObfuscationFeature {
    BogusControlFlowProbability,
    BogusControlFlowLoop,
    SubstitutionLoop,
    FlattenSplit,
}

impl ObfuscationFeature {
    /// Inclusive upper bound
    pub fn max(&self) -> i64 {
        match self {
            ObfuscationFeature::BogusControlFlowProbability => MAX_PROBABILITY,
            ObfuscationFeature::BogusControlFlowLoop => MAX_BCF_LOOP,
            ObfuscationFeature::SubstitutionLoop => MAX_SUB_LOOP,
            ObfuscationFeature::FlattenSplit => MAX_SPLIT,
        }
    }
}

impl fmt::Display for ObfuscationFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObfuscationFeature::BogusControlFlowProbability => "bogus control flow probability",
            ObfuscationFeature::BogusControlFlowLoop => "bogus control flow loop count",
            ObfuscationFeature::SubstitutionLoop => "substitution loop count",
            ObfuscationFeature::FlattenSplit => "flatten split count",
        })
    }
}

/// Bogus control flow pass settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BogusControlFlow {
    pub enabled: bool,
    pub loop_count: i64,
    pub probability_percent: i64,
}

/// Instruction substitution pass settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionSubstitution {
    pub enabled: bool,
    pub loop_count: i64,
}

/// Control flow flattening pass settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlowFlattening {
    pub enabled: bool,
    pub split_count: i64,
}

/// User-requested obfuscation configuration for one build
#[derive(Debug, Default)]
pub struct ObfuscationParameters {
    pub bogus_control_flow: BogusControlFlow,
    pub instruction_substitution: InstructionSubstitution,
    pub control_flow_flattening: ControlFlowFlattening,
    seed_material: String,
    seed: OnceCell<ResolvedSeed>,
}

impl Default for BogusControlFlow {
    fn default() -> Self {
        Self {
            enabled: true,
            loop_count: 1,
            probability_percent: MAX_PROBABILITY,
        }
    }
}

impl Default for InstructionSubstitution {
    fn default() -> Self {
        Self {
            enabled: true,
            loop_count: 1,
        }
    }
}

impl Default for ControlFlowFlattening {
    fn default() -> Self {
        Self {
            enabled: true,
            split_count: 1,
        }
    }
}

impl ObfuscationParameters {
    pub fn new(
        bogus_control_flow: BogusControlFlow,
        instruction_substitution: InstructionSubstitution,
        control_flow_flattening: ControlFlowFlattening,
        seed_material: impl Into<String>,
    ) -> Self {
        Self {
            bogus_control_flow,
            instruction_substitution,
            control_flow_flattening,
            seed_material: seed_material.into(),
            seed: OnceCell::new(),
        }
    }

    /// Replace the seed material. Only valid before the seed is first used.
    pub fn with_seed_material(mut self, material: impl Into<String>) -> Self {
        self.seed_material = material.into();
        self.seed = OnceCell::new();
        self
    }

    /// Seed material as supplied (empty when a fresh seed will be generated)
    pub fn seed_material(&self) -> &str {
        &self.seed_material
    }

    /// Check every enabled feature against its upper bound.
    ///
    /// Fails on the first violation in a fixed order: bcf probability, bcf
    /// loop, substitution loop, flatten split.
    pub fn validate(&self) -> DenimResult<()> {
        let bcf = &self.bogus_control_flow;
        let sub = &self.instruction_substitution;
        let flatten = &self.control_flow_flattening;

        let checks = [
            (
                bcf.enabled,
                ObfuscationFeature::BogusControlFlowProbability,
                bcf.probability_percent,
            ),
            (
                bcf.enabled,
                ObfuscationFeature::BogusControlFlowLoop,
                bcf.loop_count,
            ),
            (
                sub.enabled,
                ObfuscationFeature::SubstitutionLoop,
                sub.loop_count,
            ),
            (
                flatten.enabled,
                ObfuscationFeature::FlattenSplit,
                flatten.split_count,
            ),
        ];

        for (enabled, feature, value) in checks {
            if enabled && value > feature.max() {
                return Err(DenimError::OutOfRange {
                    feature,
                    value,
                    max: feature.max(),
                });
            }
        }
        Ok(())
    }

    /// The seed for this build, resolved once and reused afterwards.
    pub fn seed(&self) -> DenimResult<&ResolvedSeed> {
        self.seed.get_or_try_init(|| derive_seed(&self.seed_material))
    }

    /// The seed if it has already been resolved
    pub fn resolved_seed(&self) -> Option<&ResolvedSeed> {
        self.seed.get()
    }

    /// Serialize into backend flags.
    ///
    /// Order: bcf switch, probability, loop; substitution switch, loop; then
    /// the seed flag, always last. Flattening emits nothing.
    pub fn build_flags(&self) -> DenimResult<Vec<BackendFlag>> {
        let mut flags = Vec::new();

        let bcf = &self.bogus_control_flow;
        if bcf.enabled {
            flags.push(BackendFlag::switch("bcf"));
            flags.push(BackendFlag::value(
                "bcf_prob",
                clamp_integer_arg(bcf.probability_percent),
            ));
            flags.push(BackendFlag::value(
                "bcf_loop",
                clamp_integer_arg(bcf.loop_count),
            ));
        }

        let sub = &self.instruction_substitution;
        if sub.enabled {
            flags.push(BackendFlag::switch("sub"));
            flags.push(BackendFlag::value(
                "sub_loop",
                clamp_integer_arg(sub.loop_count),
            ));
        }

        let seed = self.seed()?;
        flags.push(BackendFlag::value("aesSeed", &seed.digest));
        Ok(flags)
    }
}

impl Clone for ObfuscationParameters {
    /// Clones share the seed material but not a resolved random seed.
    fn clone(&self) -> Self {
        Self::new(
            self.bogus_control_flow,
            self.instruction_substitution,
            self.control_flow_flattening,
            self.seed_material.clone(),
        )
    }
}

/// Floor a count at 1 before it is placed on the command line.
pub fn clamp_integer_arg(x: i64) -> i64 {
    x.max(1)
}
