//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod backend_flag;
mod build_stage;
mod obfuscation;
mod seed;

pub use backend_flag::{flags_to_args, BackendFlag};
pub use build_stage::{BuildPhase, BuildStage};
pub use obfuscation::{
    clamp_integer_arg, BogusControlFlow, ControlFlowFlattening, InstructionSubstitution,
    ObfuscationFeature, ObfuscationParameters, MAX_BCF_LOOP, MAX_PROBABILITY, MAX_SPLIT,
    MAX_SUB_LOOP,
};
pub use seed::{derive_seed, random_count, ResolvedSeed, SeedDigest};
