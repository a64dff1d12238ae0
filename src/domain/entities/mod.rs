//! Domain Entities
//!
//! - `BuildRequest` - What the caller asked to build
//! - `BuildManifest` - Compile and link steps emitted by the front-end
//! - `FrontEndCompiler` / `ObfuscatingBackend` - How the external tools are invoked

mod build_request;
mod manifest;
mod toolchain;

pub use build_request::BuildRequest;
pub use manifest::{
    is_resource, strip_compiler_token, BuildManifest, CompileStep, LinkStep, DEBUG_INFO_FLAG,
    RESOURCE_SUFFIX,
};
pub use toolchain::{
    FrontEndCompiler, ObfuscatingBackend, Toolchain, BACKEND_COMPILER, BACKEND_TOOL, FRONTEND_TOOL,
};
