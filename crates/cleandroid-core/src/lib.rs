//! cleandroid core - domain and application layers.
//!
//! This crate holds everything the `cleandroid` tool knows about Android
//! Clean Architecture projects, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          cleandroid-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Scaffold, Manifest, Dependency, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │     (Filesystem, ProjectLocator)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     cleandroid-adapters (Infra)         │
//! │  (LocalFilesystem, WalkdirLocator, ...) │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Catalogs, TextDocument, patchers)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use cleandroid_core::prelude::*;
//! # fn run(fs: Box<dyn Filesystem>) -> CleandroidResult<()> {
//! let service = ManifestService::new(fs);
//! let outcome = service.add_permissions(
//!     "app/src/main/AndroidManifest.xml".as_ref(),
//!     &[PermissionLevel::Basic.category()],
//!     false,
//! )?;
//! println!("{} permissions added", outcome.report.added.len());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        DependencyService, GenerationReport, ManifestService, PatchOutcome, ProjectService,
        ScaffoldService,
        ports::{Filesystem, ProjectLocator},
    };
    pub use crate::domain::{
        DependencyEntry, DependencyMethod, GradleDialect, Layer, LayerSpec, PackageName,
        PatchReport, PatchStage, PermissionCategory, PermissionLevel, ProjectFile, TextDocument,
    };
    pub use crate::error::{CleandroidError, CleandroidResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
