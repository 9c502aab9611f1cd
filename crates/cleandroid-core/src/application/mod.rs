//! Application layer for cleandroid.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (scaffold, permissions, dependencies)
//! - **Ports**: Interface definitions (traits) for the filesystem and file discovery
//! - **Errors**: Application-specific error types
//!
//! Services read documents through ports, hand them to the domain patchers,
//! and write the result back. All editing rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DependencyService, GenerationReport, ManifestService, PatchOutcome, ProjectService,
    ScaffoldService,
};

pub use ports::{Filesystem, ProjectLocator};

pub use error::ApplicationError;
