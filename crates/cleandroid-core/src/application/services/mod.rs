//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish use cases
//! like "generate the layer folders" or "add these permissions".

pub mod dependency_service;
pub mod manifest_service;
pub mod project_service;
pub mod scaffold_service;

mod patching;

#[cfg(test)]
pub(crate) mod test_support;

pub use dependency_service::DependencyService;
pub use manifest_service::ManifestService;
pub use patching::PatchOutcome;
pub use project_service::ProjectService;
pub use scaffold_service::{GenerationReport, ScaffoldService};
